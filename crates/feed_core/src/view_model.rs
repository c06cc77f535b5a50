use crate::{EmptyState, FailureReason};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FeedViewModel {
    pub section_title: String,
    pub filter_section: Option<String>,
    pub articles: Vec<ArticleRow>,
    pub requested_page: u32,
    /// First-page load in flight.
    pub refreshing: bool,
    /// Later-page load in flight.
    pub loading_more: bool,
    pub end_of_feed: bool,
    pub connected: bool,
    pub empty_state: Option<EmptyState>,
    pub last_failure: Option<FailureReason>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleRow {
    /// 1-based position in the list.
    pub position: usize,
    pub title: String,
    pub published_at: String,
    pub url: String,
}
