use crate::{ChatMessage, CrawlStatus, HistoryEntry};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub status: CrawlStatus,
    pub keyword: String,
    pub site_domain: Option<String>,
    /// Revealed prefix of the summary; equals the full summary once the
    /// session is `Completed`.
    pub streamed_summary: String,
    pub crawled_urls: Vec<String>,
    pub urls_crawled: u64,
    pub notice: Option<String>,
    pub history: Vec<HistoryEntry>,
    pub chat: Option<ChatView>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatView {
    pub session_id: String,
    pub keyword: String,
    pub summary: String,
    pub url_count: usize,
    pub messages: Vec<ChatMessage>,
    pub awaiting_reply: bool,
}
