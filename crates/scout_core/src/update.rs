use crate::{
    validate_crawl_input, AppState, ChatMessage, Effect, Msg, Role, DISCUSSION_ERROR_REPLY,
};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::HistoryRefreshRequested => vec![Effect::RefreshHistory],
        Msg::CrawlSubmitted {
            keyword,
            domain,
            urls,
        } => match validate_crawl_input(&keyword, &domain, &urls) {
            Err(err) => {
                state.set_notice(err.to_string());
                Vec::new()
            }
            Ok(request) => {
                let generation = state.begin_crawl(&request);
                state.request_issued();
                vec![Effect::StartCrawl {
                    generation,
                    request,
                }]
            }
        },
        Msg::CrawlFinished {
            generation,
            outcome,
        } => {
            // A response from a superseded submission must not touch state.
            if generation != state.crawl_generation() {
                return (state, Vec::new());
            }
            match outcome {
                Ok(outcome) => {
                    state.apply_crawl_success(outcome);
                    let mut effects = vec![Effect::RefreshHistory];
                    if state.begin_streaming() {
                        effects.push(Effect::StreamTick { generation });
                    }
                    effects
                }
                Err(_) => {
                    state.apply_crawl_failure();
                    Vec::new()
                }
            }
        }
        Msg::StreamTick { generation } => {
            if generation != state.crawl_generation() || !state.is_streaming() {
                return (state, Vec::new());
            }
            if state.advance_stream() {
                Vec::new()
            } else {
                vec![Effect::StreamTick { generation }]
            }
        }
        Msg::HistoryRefreshed(entries) => {
            state.replace_history(entries);
            Vec::new()
        }
        Msg::SessionOpened { id } => {
            state.open_session(id.clone());
            vec![
                Effect::LoadSession { id: id.clone() },
                Effect::LoadThread { session_id: id },
            ]
        }
        Msg::SessionLoaded { id: _, detail } => {
            match detail {
                Ok(detail) => state.apply_session_detail(detail),
                Err(_) => state.set_notice("Failed to load crawl data"),
            }
            Vec::new()
        }
        Msg::ThreadLoaded {
            session_id,
            messages,
        } => {
            state.set_thread(&session_id, messages);
            Vec::new()
        }
        Msg::PromptSubmitted { prompt, now } => {
            let trimmed = prompt.trim();
            let Some(session_id) = state.open_session_id() else {
                return (state, Vec::new());
            };
            // Resubmission is blocked while a reply is outstanding.
            if trimmed.is_empty() || state.awaiting_reply() {
                return (state, Vec::new());
            }
            let message = ChatMessage {
                role: Role::User,
                content: trimmed.to_owned(),
                timestamp: now,
            };
            state.push_open_message(message.clone());
            state.set_awaiting_reply(true);
            vec![
                Effect::PersistMessage {
                    session_id: session_id.clone(),
                    message,
                },
                Effect::SendPrompt {
                    session_id,
                    prompt: trimmed.to_owned(),
                },
            ]
        }
        Msg::DiscussionFinished {
            session_id,
            reply,
            now,
        } => {
            let content = match reply {
                Ok(text) => text,
                Err(_) => DISCUSSION_ERROR_REPLY.to_owned(),
            };
            let message = ChatMessage {
                role: Role::Assistant,
                content,
                timestamp: now,
            };
            state.apply_discussion_reply(&session_id, message.clone());
            vec![Effect::PersistMessage {
                session_id,
                message,
            }]
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
