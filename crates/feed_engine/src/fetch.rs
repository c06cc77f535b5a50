use std::time::Duration;

use feed_core::{Page, API_KEY_PARAM};
use feed_logging::{feed_debug, feed_info, feed_warn};
use futures_util::StreamExt;
use reqwest::StatusCode;
use url::Url;

use crate::{parse_page, EngineError, FetchError};

#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub connect_timeout: Duration,
    /// Longest silence tolerated while waiting for response bytes.
    pub read_timeout: Duration,
    /// Ceiling on the whole request, connect included.
    pub request_timeout: Duration,
    pub max_bytes: u64,
    pub user_agent: String,
    /// Refuse plain `http`; the query string carries the API key.
    pub https_only: bool,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(15),
            read_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(25),
            max_bytes: 5 * 1024 * 1024,
            user_agent: concat!("newsfeed/", env!("CARGO_PKG_VERSION")).to_string(),
            https_only: true,
        }
    }
}

#[async_trait::async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetch and parse one page of search results. Never retries.
    async fn fetch(&self, url: &str) -> Result<Page, FetchError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    client: reqwest::Client,
    settings: FetchSettings,
}

impl ReqwestFetcher {
    pub fn new(settings: FetchSettings) -> Result<Self, EngineError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .read_timeout(settings.read_timeout)
            .timeout(settings.request_timeout)
            .user_agent(settings.user_agent.clone())
            .https_only(settings.https_only)
            .build()
            .map_err(|err| EngineError::Client(err.to_string()))?;
        Ok(Self { client, settings })
    }

    pub fn settings(&self) -> &FetchSettings {
        &self.settings
    }

    async fn read_body(&self, response: reqwest::Response) -> Result<String, FetchError> {
        let max_bytes = self.settings.max_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(FetchError::TooLarge {
                    max_bytes,
                    actual: Some(content_len),
                });
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(FetchError::TooLarge {
                    max_bytes,
                    actual: Some(next_len),
                });
            }
            bytes.extend_from_slice(&chunk);
        }

        String::from_utf8(bytes)
            .map_err(|err| FetchError::MalformedResponse(format!("body is not utf-8: {err}")))
    }
}

#[async_trait::async_trait]
impl Fetcher for ReqwestFetcher {
    async fn fetch(&self, url: &str) -> Result<Page, FetchError> {
        let parsed = Url::parse(url).map_err(|err| FetchError::InvalidUrl(err.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(FetchError::InvalidUrl(format!(
                "unsupported scheme {}",
                parsed.scheme()
            )));
        }
        if self.settings.https_only && parsed.scheme() != "https" {
            return Err(FetchError::InvalidUrl(format!(
                "refusing insecure request to {}",
                redacted(&parsed)
            )));
        }

        let shown = redacted(&parsed);
        feed_debug!("GET {}", shown);
        let response = self
            .client
            .get(parsed)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if status != StatusCode::OK {
            feed_warn!("Request to {} answered {}", shown, status);
            return Err(FetchError::HttpStatus(status.as_u16()));
        }

        let body = self.read_body(response).await?;
        let page = parse_page(&body)?;
        feed_info!(
            "Fetched page {} with {} articles from {}",
            page.page_number,
            page.articles.len(),
            shown
        );
        Ok(page)
    }
}

/// Copy of `url` fit for logs: the API key value is masked.
fn redacted(url: &Url) -> Url {
    let mut shown = url.clone();
    if url.query().is_none() {
        return shown;
    }
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(key, value)| {
            let value = if key == API_KEY_PARAM {
                "redacted".to_string()
            } else {
                value.into_owned()
            };
            (key.into_owned(), value)
        })
        .collect();
    shown.query_pairs_mut().clear().extend_pairs(pairs);
    shown
}

// reqwest errors embed the request URL, key included.
fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    let err = err.without_url();
    let timed_out = err.is_timeout();
    feed_warn!("Transport failure (timeout: {}): {}", timed_out, err);
    FetchError::NetworkFailure {
        cause: err.to_string(),
        timed_out,
    }
}
