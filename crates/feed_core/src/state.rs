use crate::view_model::{ArticleRow, FeedViewModel};
use crate::{section_title, Article, Page};

/// Tag carried by every issued fetch; completions with any other tag are stale.
pub type Generation = u64;

/// Describes one issued fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub generation: Generation,
    pub section: Option<String>,
    pub page: u32,
}

impl FetchTicket {
    pub fn is_first_page(&self) -> bool {
        self.page == 1
    }
}

/// Why a fetch produced no page, as far as the feed cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureReason {
    InvalidUrl,
    Network,
    HttpStatus(u16),
    MalformedResponse,
}

/// What to show instead of the list when it is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyState {
    NoConnection,
    NoResults,
    SomethingWrong,
}

/// Accumulated feed across pages plus paging and loading state.
///
/// At most one fetch is in flight. `reset` abandons it: its completion no
/// longer matches `in_flight` and is dropped by [`FeedState::take_in_flight`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedState {
    items: Vec<Article>,
    requested_page: u32,
    is_loading: bool,
    filter_section: Option<String>,
    total_pages: Option<u32>,
    last_generation: Generation,
    in_flight: Option<FetchTicket>,
    connected: bool,
    empty_state: Option<EmptyState>,
    last_failure: Option<FailureReason>,
    dirty: bool,
}

impl Default for FeedState {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            requested_page: 1,
            is_loading: false,
            filter_section: None,
            total_pages: None,
            last_generation: 0,
            in_flight: None,
            connected: true,
            empty_state: None,
            last_failure: None,
            dirty: false,
        }
    }
}

impl FeedState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_section(section: Option<String>) -> Self {
        Self {
            filter_section: normalize_section(section),
            ..Self::default()
        }
    }

    pub fn items(&self) -> &[Article] {
        &self.items
    }

    pub fn requested_page(&self) -> u32 {
        self.requested_page
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn filter_section(&self) -> Option<&str> {
        self.filter_section.as_deref()
    }

    pub fn total_pages(&self) -> Option<u32> {
        self.total_pages
    }

    pub fn in_flight(&self) -> Option<&FetchTicket> {
        self.in_flight.as_ref()
    }

    pub fn connected(&self) -> bool {
        self.connected
    }

    pub fn empty_state(&self) -> Option<EmptyState> {
        self.empty_state
    }

    pub fn last_failure(&self) -> Option<FailureReason> {
        self.last_failure
    }

    /// True once the server-reported page count has been consumed.
    pub fn is_exhausted(&self) -> bool {
        self.total_pages.is_some_and(|total| self.requested_page > total)
    }

    /// Clears the list, rewinds to page 1 and abandons any in-flight fetch.
    pub fn reset(&mut self) {
        self.items.clear();
        self.requested_page = 1;
        self.total_pages = None;
        self.in_flight = None;
        self.is_loading = false;
        self.empty_state = None;
        self.last_failure = None;
        self.mark_dirty();
    }

    /// Replaces the list on the first page, appends otherwise.
    pub fn apply_page(&mut self, page: Page, was_first_page: bool) {
        if was_first_page {
            self.items = page.articles;
        } else {
            self.items.extend(page.articles);
        }
        self.requested_page = page.page_number.saturating_add(1);
        self.total_pages = page.total_pages;
        self.last_failure = None;
        self.mark_dirty();
    }

    /// Records a failed fetch. The list and the requested page stay as they were.
    pub fn apply_failure(&mut self, reason: FailureReason) {
        self.last_failure = Some(reason);
        self.mark_dirty();
    }

    pub fn mark_loading(&mut self, loading: bool) {
        if self.is_loading != loading {
            self.is_loading = loading;
            self.mark_dirty();
        }
    }

    /// Stores the new filter; returns whether it differs from the previous one.
    pub fn set_filter_section(&mut self, section: Option<String>) -> bool {
        let section = normalize_section(section);
        if self.filter_section == section {
            return false;
        }
        self.filter_section = section;
        self.mark_dirty();
        true
    }

    pub fn set_connected(&mut self, connected: bool) {
        if self.connected != connected {
            self.connected = connected;
            self.mark_dirty();
        }
    }

    pub fn set_empty_state(&mut self, empty_state: Option<EmptyState>) {
        if self.empty_state != empty_state {
            self.empty_state = empty_state;
            self.mark_dirty();
        }
    }

    /// Issues a ticket for `requested_page` and marks the feed as loading.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.last_generation += 1;
        let ticket = FetchTicket {
            generation: self.last_generation,
            section: self.filter_section.clone(),
            page: self.requested_page,
        };
        self.in_flight = Some(ticket.clone());
        self.mark_loading(true);
        ticket
    }

    /// Hands back the in-flight ticket if `generation` matches it; `None` means stale.
    pub fn take_in_flight(&mut self, generation: Generation) -> Option<FetchTicket> {
        if self
            .in_flight
            .as_ref()
            .is_some_and(|ticket| ticket.generation == generation)
        {
            self.in_flight.take()
        } else {
            None
        }
    }

    pub fn view(&self) -> FeedViewModel {
        let refreshing = self
            .in_flight
            .as_ref()
            .is_some_and(FetchTicket::is_first_page);
        FeedViewModel {
            section_title: section_title(self.filter_section.as_deref()),
            filter_section: self.filter_section.clone(),
            articles: self
                .items
                .iter()
                .enumerate()
                .map(|(index, article)| ArticleRow {
                    position: index + 1,
                    title: article.title.clone(),
                    published_at: article.published_at.clone(),
                    url: article.url.clone(),
                })
                .collect(),
            requested_page: self.requested_page,
            refreshing,
            loading_more: self.is_loading && !refreshing,
            end_of_feed: self.is_exhausted(),
            connected: self.connected,
            empty_state: self.empty_state,
            last_failure: self.last_failure,
            dirty: self.dirty,
        }
    }

    /// Returns whether anything changed since the last call and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}

fn normalize_section(section: Option<String>) -> Option<String> {
    section
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
