use chrono::{DateTime, Utc};
use client_logging::client_warn;
use serde::{Deserialize, Serialize};

use crate::{KvStore, StoreError};

const THREAD_KEY_PREFIX: &str = "chat_";

fn thread_key(session_id: &str) -> String {
    format!("{THREAD_KEY_PREFIX}{session_id}")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoredRole {
    User,
    Assistant,
}

/// Persistence shape of one chat turn: `{role, content, timestamp}` with an
/// RFC 3339 timestamp string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredMessage {
    pub role: StoredRole,
    pub content: String,
    pub timestamp: String,
}

impl StoredMessage {
    /// The timestamp as an instant. An unparseable value becomes the current
    /// time rather than losing the message over a secondary field.
    pub fn timestamp_or_now(&self) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(&self.timestamp)
            .map(|ts| ts.with_timezone(&Utc))
            .unwrap_or_else(|_| Utc::now())
    }
}

/// Append-only chat thread persistence, one record per session id.
///
/// Threads are best-effort: a read problem degrades to an empty thread and
/// the primary crawl flow never depends on a write having succeeded.
pub struct ChatThreadStore<S: KvStore> {
    store: S,
}

impl<S: KvStore> ChatThreadStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Loads the thread for a session. Absent or corrupt records are
    /// equivalent to a new, empty thread.
    pub fn load(&self, session_id: &str) -> Vec<StoredMessage> {
        let key = thread_key(session_id);
        let raw = match self.store.get(&key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(err) => {
                client_warn!("Failed to read chat thread {}: {}", key, err);
                return Vec::new();
            }
        };
        match serde_json::from_str::<Vec<StoredMessage>>(&raw) {
            Ok(messages) => messages,
            Err(err) => {
                client_warn!("Failed to parse chat thread {}: {}", key, err);
                Vec::new()
            }
        }
    }

    /// Appends one message and writes the full thread back under the
    /// session's key. Repeated calls with identical content each add a new
    /// entry; there is no edit or delete.
    pub fn append(
        &self,
        session_id: &str,
        message: StoredMessage,
    ) -> Result<Vec<StoredMessage>, StoreError> {
        let mut messages = self.load(session_id);
        messages.push(message);
        let serialized = serde_json::to_string(&messages)
            .map_err(|err| StoreError::Serialize(err.to_string()))?;
        self.store.set(&thread_key(session_id), &serialized)?;
        Ok(messages)
    }
}
