use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use chrono::Utc;
use client_logging::{client_info, client_warn};
use scout_client::{
    ChatThreadStore, ClientCommand, ClientEvent, ClientHandle, FileKvStore, ScoutApi,
    StoredMessage, StoredRole,
};
use scout_core::{
    ChatMessage, CrawlOutcome, Effect, HistoryEntry, Msg, Role, SessionDetail,
    MISSING_REPLY_FALLBACK, MISSING_SUMMARY_FALLBACK,
};

use crate::app::AppEvent;

/// Interval between stream reveal ticks.
const STREAM_TICK_INTERVAL: Duration = Duration::from_millis(5);

/// Executes the effects the update function emits: backend calls through the
/// client handle, thread persistence through the kv store, and the delayed
/// stream ticks. Results come back to the dispatch loop as messages.
pub struct EffectRunner {
    client: ClientHandle,
    store: ChatThreadStore<FileKvStore>,
    tick_tx: mpsc::Sender<u64>,
    event_tx: mpsc::Sender<AppEvent>,
}

impl EffectRunner {
    pub fn new(
        api: Arc<dyn ScoutApi>,
        store: ChatThreadStore<FileKvStore>,
        event_tx: mpsc::Sender<AppEvent>,
    ) -> Self {
        let (client, client_events) = ClientHandle::new(api);
        let tick_tx = spawn_stream_ticker(event_tx.clone());
        spawn_event_loop(client_events, event_tx.clone());
        Self {
            client,
            store,
            tick_tx,
            event_tx,
        }
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::StartCrawl {
                    generation,
                    request,
                } => {
                    client_info!(
                        "StartCrawl generation={} keyword={}",
                        generation,
                        request.keyword()
                    );
                    self.client.submit(ClientCommand::Crawl {
                        generation,
                        request: map_request(request),
                    });
                }
                Effect::StreamTick { generation } => {
                    let _ = self.tick_tx.send(generation);
                }
                Effect::RefreshHistory => self.client.submit(ClientCommand::RefreshHistory),
                Effect::LoadSession { id } => {
                    self.client.submit(ClientCommand::LoadSession { id });
                }
                Effect::LoadThread { session_id } => {
                    let messages = self
                        .store
                        .load(&session_id)
                        .iter()
                        .map(to_core_message)
                        .collect();
                    let _ = self.event_tx.send(AppEvent::Dispatch(Msg::ThreadLoaded {
                        session_id,
                        messages,
                    }));
                }
                Effect::PersistMessage {
                    session_id,
                    message,
                } => {
                    // Best effort; the in-memory thread is already current.
                    if let Err(err) = self.store.append(&session_id, to_stored_message(&message)) {
                        client_warn!("Failed to persist chat message for {}: {}", session_id, err);
                    }
                }
                Effect::SendPrompt { session_id, prompt } => {
                    self.client
                        .submit(ClientCommand::Discuss { session_id, prompt });
                }
            }
        }
    }
}

/// Ticker thread: each queued generation sleeps one interval, then comes back
/// as a `StreamTick` message. Staleness is the update function's problem.
fn spawn_stream_ticker(event_tx: mpsc::Sender<AppEvent>) -> mpsc::Sender<u64> {
    let (tick_tx, tick_rx) = mpsc::channel::<u64>();
    thread::spawn(move || {
        while let Ok(generation) = tick_rx.recv() {
            thread::sleep(STREAM_TICK_INTERVAL);
            if event_tx
                .send(AppEvent::Dispatch(Msg::StreamTick { generation }))
                .is_err()
            {
                break;
            }
        }
    });
    tick_tx
}

fn spawn_event_loop(client_events: mpsc::Receiver<ClientEvent>, event_tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        while let Ok(event) = client_events.recv() {
            if event_tx
                .send(AppEvent::Dispatch(map_client_event(event)))
                .is_err()
            {
                break;
            }
        }
    });
}

fn map_client_event(event: ClientEvent) -> Msg {
    match event {
        ClientEvent::CrawlFinished { generation, result } => Msg::CrawlFinished {
            generation,
            outcome: match result {
                Ok(response) => Ok(CrawlOutcome {
                    keyword_id: response.keyword_id,
                    summary: response
                        .summary
                        .unwrap_or_else(|| MISSING_SUMMARY_FALLBACK.to_string()),
                    urls: response.urls,
                    urls_crawled: response.urls_crawled,
                }),
                Err(err) => {
                    client_warn!("Crawl failed: {}", err);
                    Err(err.to_string())
                }
            },
        },
        ClientEvent::DiscussionFinished { session_id, result } => Msg::DiscussionFinished {
            session_id,
            reply: match result {
                Ok(response) => Ok(response
                    .message
                    .unwrap_or_else(|| MISSING_REPLY_FALLBACK.to_string())),
                Err(err) => {
                    client_warn!("Discussion failed: {}", err);
                    Err(err.to_string())
                }
            },
            now: Utc::now(),
        },
        ClientEvent::HistoryFetched(result) => match result {
            Ok(entries) => Msg::HistoryRefreshed(
                entries
                    .into_iter()
                    .map(|entry| HistoryEntry {
                        id: entry.id,
                        keyword: entry.keyword,
                        site_domain: entry.site_domain,
                        url_count: entry.urls.len(),
                    })
                    .collect(),
            ),
            Err(err) => {
                // Keep the previous listing; it is only as fresh as the
                // last successful refresh.
                client_warn!("History refresh failed: {}", err);
                Msg::NoOp
            }
        },
        ClientEvent::SessionFetched { id, result } => Msg::SessionLoaded {
            id,
            detail: match result {
                Ok(detail) => Ok(SessionDetail {
                    id: detail.id,
                    keyword: detail.keyword,
                    site_domain: detail.site_domain,
                    urls: detail.urls,
                    summary: detail
                        .summary
                        .unwrap_or_else(|| MISSING_SUMMARY_FALLBACK.to_string()),
                }),
                Err(err) => {
                    client_warn!("Session detail load failed: {}", err);
                    Err(err.to_string())
                }
            },
        },
    }
}

fn map_request(request: scout_core::CrawlRequest) -> scout_client::CrawlRequest {
    match request {
        scout_core::CrawlRequest::Domain { keyword, domain } => {
            scout_client::CrawlRequest::Domain { keyword, domain }
        }
        scout_core::CrawlRequest::Urls { keyword, urls } => {
            scout_client::CrawlRequest::Urls { keyword, urls }
        }
    }
}

fn to_stored_message(message: &ChatMessage) -> StoredMessage {
    StoredMessage {
        role: match message.role {
            Role::User => StoredRole::User,
            Role::Assistant => StoredRole::Assistant,
        },
        content: message.content.clone(),
        timestamp: message.timestamp.to_rfc3339(),
    }
}

fn to_core_message(stored: &StoredMessage) -> ChatMessage {
    ChatMessage {
        role: match stored.role {
            StoredRole::User => Role::User,
            StoredRole::Assistant => Role::Assistant,
        },
        content: stored.content.clone(),
        timestamp: stored.timestamp_or_now(),
    }
}
