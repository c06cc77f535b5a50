//! Newsfeed core: pure feed state machine, query building and view-model helpers.
mod article;
mod effect;
mod msg;
mod query;
mod section;
mod state;
mod update;
mod view_model;

pub use article::{Article, Page};
pub use effect::Effect;
pub use msg::Msg;
pub use query::{
    build_query_url, InvalidConfigurationError, QueryBuilder, API_KEY_PARAM, DEFAULT_BASE_URL,
};
pub use section::{find_section, section_title, Section, SECTIONS};
pub use state::{EmptyState, FailureReason, FeedState, FetchTicket, Generation};
pub use update::update;
pub use view_model::{ArticleRow, FeedViewModel};
