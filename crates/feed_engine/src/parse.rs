use feed_core::{Article, Page};
use feed_logging::{feed_debug, feed_warn};
use serde::Deserialize;
use serde_json::Value;

use crate::FetchError;

#[derive(Debug, Deserialize)]
struct Envelope {
    response: SearchResponse,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchResponse {
    current_page: u32,
    #[serde(default)]
    pages: Option<Value>,
    results: Vec<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResultEntry {
    web_title: String,
    web_publication_date: String,
    web_url: String,
}

/// Parse a search response body into a [`Page`].
///
/// The envelope (`response.currentPage`, `response.results`) must be intact or
/// the whole body is rejected as malformed. Individual result entries missing
/// one of `webTitle`, `webPublicationDate` or `webUrl` are skipped and counted
/// in [`Page::skipped`].
pub fn parse_page(body: &str) -> Result<Page, FetchError> {
    if body.trim().is_empty() {
        return Err(FetchError::MalformedResponse("empty body".into()));
    }

    let envelope: Envelope = serde_json::from_str(body)
        .map_err(|err| FetchError::MalformedResponse(err.to_string()))?;
    let response = envelope.response;

    let mut articles = Vec::with_capacity(response.results.len());
    let mut skipped = 0;
    for (index, entry) in response.results.into_iter().enumerate() {
        match serde_json::from_value::<ResultEntry>(entry) {
            Ok(entry) => articles.push(Article::new(
                entry.web_title,
                entry.web_publication_date,
                entry.web_url,
            )),
            Err(err) => {
                feed_warn!("Skipping result #{} on page {}: {}", index, response.current_page, err);
                skipped += 1;
            }
        }
    }

    let total_pages = response
        .pages
        .as_ref()
        .and_then(Value::as_u64)
        .and_then(|pages| u32::try_from(pages).ok());

    feed_debug!(
        "Parsed page {} with {} articles ({} skipped, total pages {:?})",
        response.current_page,
        articles.len(),
        skipped,
        total_pages
    );

    Ok(Page::new(response.current_page, articles)
        .with_total_pages(total_pages)
        .with_skipped(skipped))
}
