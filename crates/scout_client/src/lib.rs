//! Scout client: backend HTTP interfaces and local persistence.
mod api;
mod client;
mod kv;
mod thread;
mod types;

pub use api::{BackendSettings, HttpApi, ScoutApi};
pub use client::{ClientCommand, ClientEvent, ClientHandle};
pub use kv::{FileKvStore, KvStore, MemoryKvStore, StoreError};
pub use thread::{ChatThreadStore, StoredMessage, StoredRole};
pub use types::{
    ApiError, CrawlRequest, CrawlResponse, DiscussionResponse, KeywordDetail, KeywordSummary,
};
