//! Newsfeed engine: HTTP fetch, response parsing and background execution.
mod engine;
mod fetch;
mod parse;
mod types;

pub use engine::{EngineEvents, EngineHandle};
pub use fetch::{FetchSettings, Fetcher, ReqwestFetcher};
pub use parse::parse_page;
pub use types::{EngineError, EngineEvent, FetchError};
