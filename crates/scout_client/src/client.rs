use std::sync::{mpsc, Arc};
use std::thread;

use crate::{
    ApiError, CrawlRequest, CrawlResponse, DiscussionResponse, KeywordDetail, KeywordSummary,
    ScoutApi,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientCommand {
    Crawl {
        generation: u64,
        request: CrawlRequest,
    },
    Discuss {
        session_id: String,
        prompt: String,
    },
    RefreshHistory,
    LoadSession {
        id: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientEvent {
    CrawlFinished {
        generation: u64,
        result: Result<CrawlResponse, ApiError>,
    },
    DiscussionFinished {
        session_id: String,
        result: Result<DiscussionResponse, ApiError>,
    },
    HistoryFetched(Result<Vec<KeywordSummary>, ApiError>),
    SessionFetched {
        id: String,
        result: Result<KeywordDetail, ApiError>,
    },
}

/// Command side of the background IO loop. One dedicated thread owns a tokio
/// runtime; each command becomes a spawned task, so calls overlap freely and
/// events arrive in resolution order.
pub struct ClientHandle {
    cmd_tx: mpsc::Sender<ClientCommand>,
}

impl ClientHandle {
    /// Spawns the IO thread and returns the handle plus the event stream.
    pub fn new(api: Arc<dyn ScoutApi>) -> (Self, mpsc::Receiver<ClientEvent>) {
        let (cmd_tx, cmd_rx) = mpsc::channel::<ClientCommand>();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            while let Ok(command) = cmd_rx.recv() {
                let api = api.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    let event = handle_command(api.as_ref(), command).await;
                    let _ = event_tx.send(event);
                });
            }
        });

        (Self { cmd_tx }, event_rx)
    }

    pub fn submit(&self, command: ClientCommand) {
        let _ = self.cmd_tx.send(command);
    }
}

async fn handle_command(api: &dyn ScoutApi, command: ClientCommand) -> ClientEvent {
    match command {
        ClientCommand::Crawl {
            generation,
            request,
        } => {
            let result = match &request {
                CrawlRequest::Domain { keyword, domain } => {
                    api.crawl_by_domain(keyword, domain).await
                }
                CrawlRequest::Urls { keyword, urls } => api.crawl_urls(keyword, urls).await,
            };
            ClientEvent::CrawlFinished { generation, result }
        }
        ClientCommand::Discuss { session_id, prompt } => {
            let result = api.discuss(&session_id, &prompt).await;
            ClientEvent::DiscussionFinished { session_id, result }
        }
        ClientCommand::RefreshHistory => ClientEvent::HistoryFetched(api.list_keywords().await),
        ClientCommand::LoadSession { id } => {
            let result = api.keyword_detail(&id).await;
            ClientEvent::SessionFetched { id, result }
        }
    }
}
