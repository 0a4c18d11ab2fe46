use chrono::{DateTime, Utc};
use thiserror::Error;
use url::Url;

use crate::view_model::{AppViewModel, ChatView};

/// Substituted when a crawl response carries no summary field.
pub const MISSING_SUMMARY_FALLBACK: &str = "No summary available";
/// Substituted when a discussion response carries no message field.
pub const MISSING_REPLY_FALLBACK: &str = "No response received";
/// Appended as the assistant turn when a discussion call fails outright.
pub const DISCUSSION_ERROR_REPLY: &str = "Sorry, I encountered an error. Please try again.";
/// Shown when a crawl submission fails at the network level.
pub const CRAWL_FAILURE_NOTICE: &str = "Error: Failed to fetch crawl data. Please try again.";

/// Lifecycle of the crawl slot. Transitions are strictly forward;
/// `Failed` is terminal and a retry starts a brand-new session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CrawlStatus {
    #[default]
    Idle,
    Validating,
    Requesting,
    Succeeded,
    Streaming,
    Completed,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

/// One chat turn. Immutable once created; timestamps are descriptive only,
/// insertion order is the authoritative ordering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

/// Lightweight projection of a known crawl session, refreshed wholesale
/// from the backend listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub id: String,
    pub keyword: String,
    pub site_domain: Option<String>,
    pub url_count: usize,
}

/// Validated crawl submission, ready for the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrawlRequest {
    Domain { keyword: String, domain: String },
    Urls { keyword: String, urls: Vec<String> },
}

impl CrawlRequest {
    pub fn keyword(&self) -> &str {
        match self {
            CrawlRequest::Domain { keyword, .. } | CrawlRequest::Urls { keyword, .. } => keyword,
        }
    }

    pub fn domain(&self) -> Option<&str> {
        match self {
            CrawlRequest::Domain { domain, .. } => Some(domain),
            CrawlRequest::Urls { .. } => None,
        }
    }
}

/// Successful crawl result after IO-seam defaulting: a missing summary has
/// already been replaced with [`MISSING_SUMMARY_FALLBACK`], missing URL data
/// with empty/zero values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlOutcome {
    pub keyword_id: Option<String>,
    pub summary: String,
    pub urls: Vec<String>,
    pub urls_crawled: u64,
}

/// Full detail of a previously created session, fetched when it is reopened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionDetail {
    pub id: String,
    pub keyword: String,
    pub site_domain: Option<String>,
    pub urls: Vec<String>,
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter a keyword")]
    EmptyKeyword,
    #[error("Please enter both keyword and domain")]
    MissingTarget,
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// The crawl slot: input parameters plus whatever the backend has assigned.
/// `id` does not exist until the backend call succeeds.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct CrawlSession {
    pub id: Option<String>,
    pub keyword: String,
    pub site_domain: Option<String>,
    pub urls: Vec<String>,
    pub urls_crawled: u64,
    pub summary: String,
    pub status: CrawlStatus,
}

/// Simulated incremental reveal of an already-received text blob.
/// The cursor counts characters and never moves backwards.
#[derive(Debug, Clone, PartialEq, Eq)]
struct StreamState {
    full_text: String,
    char_count: usize,
    cursor: usize,
}

impl StreamState {
    fn new(full_text: String) -> Self {
        let char_count = full_text.chars().count();
        Self {
            full_text,
            char_count,
            cursor: 0,
        }
    }

    fn revealed(&self) -> String {
        self.full_text.chars().take(self.cursor).collect()
    }

    fn is_complete(&self) -> bool {
        self.cursor >= self.char_count
    }

    fn advance(&mut self) {
        self.cursor = (self.cursor + 1).min(self.char_count);
    }
}

/// The session currently open for discussion, with its chat thread.
#[derive(Debug, Clone, PartialEq, Eq)]
struct OpenSession {
    id: String,
    keyword: String,
    site_domain: Option<String>,
    urls: Vec<String>,
    summary: String,
    messages: Vec<ChatMessage>,
    awaiting_reply: bool,
}

impl OpenSession {
    fn new(id: String) -> Self {
        Self {
            id,
            keyword: String::new(),
            site_domain: None,
            urls: Vec::new(),
            summary: String::new(),
            messages: Vec::new(),
            awaiting_reply: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    session: CrawlSession,
    stream: Option<StreamState>,
    crawl_generation: u64,
    notice: Option<String>,
    history: Vec<HistoryEntry>,
    open: Option<OpenSession>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            status: self.session.status,
            keyword: self.session.keyword.clone(),
            site_domain: self.session.site_domain.clone(),
            streamed_summary: self
                .stream
                .as_ref()
                .map(StreamState::revealed)
                .unwrap_or_default(),
            crawled_urls: self.session.urls.clone(),
            urls_crawled: self.session.urls_crawled,
            notice: self.notice.clone(),
            history: self.history.clone(),
            chat: self.open.as_ref().map(|open| ChatView {
                session_id: open.id.clone(),
                keyword: open.keyword.clone(),
                summary: open.summary.clone(),
                url_count: open.urls.len(),
                messages: open.messages.clone(),
                awaiting_reply: open.awaiting_reply,
            }),
            dirty: self.dirty,
        }
    }

    /// Returns the dirty flag and clears it.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Generation of the most recent crawl submission. Responses and stream
    /// ticks carrying an older generation are discarded.
    pub fn crawl_generation(&self) -> u64 {
        self.crawl_generation
    }

    pub(crate) fn set_notice(&mut self, notice: impl Into<String>) {
        self.notice = Some(notice.into());
        self.dirty = true;
    }

    /// Starts a fresh crawl session for a validated request. Bumping the
    /// generation here is what cancels any in-flight stream or response.
    pub(crate) fn begin_crawl(&mut self, request: &CrawlRequest) -> u64 {
        self.crawl_generation += 1;
        self.stream = None;
        self.notice = None;
        self.session = CrawlSession {
            keyword: request.keyword().to_owned(),
            site_domain: request.domain().map(ToOwned::to_owned),
            status: CrawlStatus::Validating,
            ..CrawlSession::default()
        };
        self.dirty = true;
        self.crawl_generation
    }

    pub(crate) fn request_issued(&mut self) {
        self.session.status = CrawlStatus::Requesting;
    }

    pub(crate) fn apply_crawl_success(&mut self, outcome: CrawlOutcome) {
        self.session.id = outcome.keyword_id;
        self.session.summary = outcome.summary;
        self.session.urls = outcome.urls;
        self.session.urls_crawled = outcome.urls_crawled;
        self.session.status = CrawlStatus::Succeeded;
        self.stream = Some(StreamState::new(self.session.summary.clone()));
        self.dirty = true;
    }

    /// Moves `Succeeded` into `Streaming` when there is text to reveal.
    /// Returns false (and completes immediately) for an empty blob.
    pub(crate) fn begin_streaming(&mut self) -> bool {
        match &self.stream {
            Some(stream) if !stream.is_complete() => {
                self.session.status = CrawlStatus::Streaming;
                true
            }
            _ => {
                self.session.status = CrawlStatus::Completed;
                false
            }
        }
    }

    pub(crate) fn is_streaming(&self) -> bool {
        self.session.status == CrawlStatus::Streaming && self.stream.is_some()
    }

    /// Reveals one more character. Returns true once the full text is shown,
    /// at which point the session is `Completed`.
    pub(crate) fn advance_stream(&mut self) -> bool {
        let Some(stream) = self.stream.as_mut() else {
            return true;
        };
        stream.advance();
        self.dirty = true;
        if stream.is_complete() {
            self.session.status = CrawlStatus::Completed;
            true
        } else {
            false
        }
    }

    /// Terminal failure: no partial session is retained beyond the inputs.
    pub(crate) fn apply_crawl_failure(&mut self) {
        self.session.id = None;
        self.session.summary = String::new();
        self.session.urls = Vec::new();
        self.session.urls_crawled = 0;
        self.session.status = CrawlStatus::Failed;
        self.stream = None;
        self.notice = Some(CRAWL_FAILURE_NOTICE.to_owned());
        self.dirty = true;
    }

    /// Wholesale replacement of the history cache.
    pub(crate) fn replace_history(&mut self, entries: Vec<HistoryEntry>) {
        self.history = entries;
        self.dirty = true;
    }

    pub(crate) fn open_session(&mut self, id: String) {
        self.open = Some(OpenSession::new(id));
        self.dirty = true;
    }

    pub(crate) fn open_session_id(&self) -> Option<String> {
        self.open.as_ref().map(|open| open.id.clone())
    }

    pub(crate) fn awaiting_reply(&self) -> bool {
        self.open
            .as_ref()
            .map(|open| open.awaiting_reply)
            .unwrap_or(false)
    }

    /// Fills the open-session view. Ignored if the user has since opened a
    /// different session.
    pub(crate) fn apply_session_detail(&mut self, detail: SessionDetail) {
        let Some(open) = self.open.as_mut() else {
            return;
        };
        if open.id != detail.id {
            return;
        }
        open.keyword = detail.keyword;
        open.site_domain = detail.site_domain;
        open.urls = detail.urls;
        open.summary = detail.summary;
        self.dirty = true;
    }

    pub(crate) fn set_thread(&mut self, session_id: &str, messages: Vec<ChatMessage>) {
        let Some(open) = self.open.as_mut() else {
            return;
        };
        if open.id != session_id {
            return;
        }
        open.messages = messages;
        self.dirty = true;
    }

    pub(crate) fn push_open_message(&mut self, message: ChatMessage) {
        if let Some(open) = self.open.as_mut() {
            open.messages.push(message);
            self.dirty = true;
        }
    }

    pub(crate) fn set_awaiting_reply(&mut self, awaiting: bool) {
        if let Some(open) = self.open.as_mut() {
            open.awaiting_reply = awaiting;
        }
    }

    /// Appends an assistant turn if the session is still the open one.
    /// The caller persists the message regardless.
    pub(crate) fn apply_discussion_reply(&mut self, session_id: &str, message: ChatMessage) {
        let Some(open) = self.open.as_mut() else {
            return;
        };
        if open.id != session_id {
            return;
        }
        open.messages.push(message);
        open.awaiting_reply = false;
        self.dirty = true;
    }
}

/// Normalizes one candidate URL: defaults to `https` when no scheme is
/// present, then requires a host of at least 3 chars containing a `.`.
pub fn normalize_candidate_url(raw: &str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::InvalidUrl(raw.to_owned()));
    }
    let candidate = if trimmed.contains("://") {
        trimmed.to_owned()
    } else {
        format!("https://{trimmed}")
    };
    let parsed =
        Url::parse(&candidate).map_err(|_| ValidationError::InvalidUrl(trimmed.to_owned()))?;
    match parsed.host_str() {
        Some(host) if host.len() >= 3 && host.contains('.') => Ok(parsed.to_string()),
        _ => Err(ValidationError::InvalidUrl(trimmed.to_owned())),
    }
}

/// Validates a crawl submission before any network call is made.
///
/// A non-empty URL list takes precedence over the domain; one malformed
/// entry fails the whole submission. An empty URL list is treated as absent
/// and never forwarded, so the domain path then requires a domain.
pub fn validate_crawl_input(
    keyword: &str,
    domain: &str,
    urls: &[String],
) -> Result<CrawlRequest, ValidationError> {
    let keyword = keyword.trim();
    if keyword.is_empty() {
        return Err(ValidationError::EmptyKeyword);
    }

    if !urls.is_empty() {
        let mut normalized = Vec::with_capacity(urls.len());
        for raw in urls {
            normalized.push(normalize_candidate_url(raw)?);
        }
        return Ok(CrawlRequest::Urls {
            keyword: keyword.to_owned(),
            urls: normalized,
        });
    }

    let domain = domain.trim();
    if domain.is_empty() {
        return Err(ValidationError::MissingTarget);
    }
    Ok(CrawlRequest::Domain {
        keyword: keyword.to_owned(),
        domain: domain.to_owned(),
    })
}
