use thiserror::Error;
use url::Url;

/// Query parameter carrying the credential; never log its value.
pub const API_KEY_PARAM: &str = "api-key";

/// Default content search endpoint.
pub const DEFAULT_BASE_URL: &str = "https://content.guardianapis.com/search";

/// The configured base URL cannot be used to build requests.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid base url {base_url:?}: {reason}")]
pub struct InvalidConfigurationError {
    pub base_url: String,
    pub reason: String,
}

impl InvalidConfigurationError {
    fn new(base_url: &str, reason: impl Into<String>) -> Self {
        Self {
            base_url: base_url.to_string(),
            reason: reason.into(),
        }
    }
}

/// Builds request URLs against a validated base URL.
///
/// Query parameters are appended in the order `section` (only when a filter
/// is set), `page`, `format`, `api-key`. Parameters already present on the
/// base URL are kept in front of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryBuilder {
    base_url: Url,
    api_key: String,
}

impl QueryBuilder {
    pub fn new(
        base_url: &str,
        api_key: impl Into<String>,
    ) -> Result<Self, InvalidConfigurationError> {
        let parsed = Url::parse(base_url.trim())
            .map_err(|err| InvalidConfigurationError::new(base_url, err.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(InvalidConfigurationError::new(
                base_url,
                format!("unsupported scheme {}", parsed.scheme()),
            ));
        }
        if parsed.host_str().map_or(true, str::is_empty) {
            return Err(InvalidConfigurationError::new(base_url, "missing host"));
        }
        Ok(Self {
            base_url: parsed,
            api_key: api_key.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// True when requests built here travel over TLS.
    pub fn is_secure(&self) -> bool {
        self.base_url.scheme() == "https"
    }

    pub fn build(&self, filter_section: Option<&str>, page: u32) -> String {
        let mut url = self.base_url.clone();
        {
            let mut pairs = url.query_pairs_mut();
            if let Some(section) = filter_section.map(str::trim).filter(|s| !s.is_empty()) {
                pairs.append_pair("section", section);
            }
            pairs.append_pair("page", &page.to_string());
            pairs.append_pair("format", "json");
            pairs.append_pair(API_KEY_PARAM, &self.api_key);
        }
        url.into()
    }
}

/// One-shot form of [`QueryBuilder::build`] that validates `base_url` on every call.
pub fn build_query_url(
    base_url: &str,
    filter_section: Option<&str>,
    page: u32,
    api_key: &str,
) -> Result<String, InvalidConfigurationError> {
    Ok(QueryBuilder::new(base_url, api_key)?.build(filter_section, page))
}
