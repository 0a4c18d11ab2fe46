use chrono::{DateTime, Utc};

use crate::{ChatMessage, CrawlOutcome, HistoryEntry, SessionDetail};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Refresh the session listing (issued once at startup and on demand).
    HistoryRefreshRequested,
    /// User submitted a crawl (keyword plus domain and/or candidate URLs).
    CrawlSubmitted {
        keyword: String,
        domain: String,
        urls: Vec<String>,
    },
    /// Backend crawl call resolved. Error payloads have already been logged
    /// at the IO seam; here they only mean "failed".
    CrawlFinished {
        generation: u64,
        outcome: Result<CrawlOutcome, String>,
    },
    /// One tick of the simulated streaming reveal.
    StreamTick { generation: u64 },
    /// Fresh session listing from the backend.
    HistoryRefreshed(Vec<HistoryEntry>),
    /// User opened a previously created session for discussion.
    SessionOpened { id: String },
    /// Detail fetch for an opened session resolved.
    SessionLoaded {
        id: String,
        detail: Result<SessionDetail, String>,
    },
    /// Persisted chat thread loaded for an opened session.
    ThreadLoaded {
        session_id: String,
        messages: Vec<ChatMessage>,
    },
    /// User submitted a discussion prompt for the open session.
    PromptSubmitted {
        prompt: String,
        now: DateTime<Utc>,
    },
    /// Discussion call resolved (or failed; the thread never does).
    DiscussionFinished {
        session_id: String,
        reply: Result<String, String>,
        now: DateTime<Utc>,
    },
    /// Fallback for placeholder wiring.
    NoOp,
}
