//! Scout core: pure session state machine and view-model helpers.
mod effect;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::Msg;
pub use state::{
    normalize_candidate_url, validate_crawl_input, AppState, ChatMessage, CrawlOutcome,
    CrawlRequest, CrawlStatus, HistoryEntry, Role, SessionDetail, ValidationError,
    CRAWL_FAILURE_NOTICE, DISCUSSION_ERROR_REPLY, MISSING_REPLY_FALLBACK, MISSING_SUMMARY_FALLBACK,
};
pub use update::update;
pub use view_model::{AppViewModel, ChatView};
