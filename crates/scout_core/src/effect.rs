use crate::{ChatMessage, CrawlRequest};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Issue the backend crawl call for this generation.
    StartCrawl {
        generation: u64,
        request: CrawlRequest,
    },
    /// Schedule the next reveal tick. Stale generations are dropped by the
    /// update function, which is the whole cancellation mechanism.
    StreamTick { generation: u64 },
    /// Re-fetch the session listing.
    RefreshHistory,
    /// Fetch full detail for a reopened session.
    LoadSession { id: String },
    /// Load the persisted chat thread for a session.
    LoadThread { session_id: String },
    /// Append one message to the persisted chat thread.
    PersistMessage {
        session_id: String,
        message: ChatMessage,
    },
    /// Send a discussion prompt to the backend.
    SendPrompt { session_id: String, prompt: String },
}
