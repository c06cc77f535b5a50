/// One news item as returned by the content API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    pub title: String,
    /// ISO-8601 timestamp exactly as the server sent it.
    pub published_at: String,
    pub url: String,
}

impl Article {
    pub fn new(
        title: impl Into<String>,
        published_at: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            published_at: published_at.into(),
            url: url.into(),
        }
    }
}

/// One batch of articles plus the page index the server believes it served.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub articles: Vec<Article>,
    pub page_number: u32,
    /// Total page count, when the server reports one.
    pub total_pages: Option<u32>,
    /// Result entries dropped because a mandatory field was missing or mistyped.
    pub skipped: usize,
}

impl Page {
    pub fn new(page_number: u32, articles: Vec<Article>) -> Self {
        Self {
            articles,
            page_number,
            total_pages: None,
            skipped: 0,
        }
    }

    pub fn with_total_pages(mut self, total_pages: Option<u32>) -> Self {
        self.total_pages = total_pages;
        self
    }

    pub fn with_skipped(mut self, skipped: usize) -> Self {
        self.skipped = skipped;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }
}
