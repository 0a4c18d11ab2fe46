use std::io::{self, BufRead};
use std::path::PathBuf;
use std::sync::{mpsc, Arc};
use std::thread;

use chrono::Utc;
use client_logging::client_info;
use scout_client::{BackendSettings, ChatThreadStore, FileKvStore, HttpApi};
use scout_core::{update, AppState, Msg};

use crate::effects::EffectRunner;
use crate::render;

/// Everything the dispatch loop can receive: state-machine messages from the
/// effect runner and parsed terminal input.
pub enum AppEvent {
    Dispatch(Msg),
    Quit,
}

enum Parsed {
    Event(AppEvent),
    Help,
    Ignore,
}

pub fn run(settings: BackendSettings, data_dir: PathBuf) -> anyhow::Result<()> {
    let (event_tx, event_rx) = mpsc::channel::<AppEvent>();

    let api = Arc::new(HttpApi::new(settings)?);
    let store = ChatThreadStore::new(FileKvStore::new(data_dir)?);
    let runner = EffectRunner::new(api, store, event_tx.clone());

    spawn_stdin_reader(event_tx);

    println!("{}", render::HELP);

    let mut state = AppState::default();
    let mut streamed_printed = 0usize;
    dispatch(
        &mut state,
        Msg::HistoryRefreshRequested,
        &runner,
        &mut streamed_printed,
    );

    while let Ok(event) = event_rx.recv() {
        match event {
            AppEvent::Dispatch(msg) => dispatch(&mut state, msg, &runner, &mut streamed_printed),
            AppEvent::Quit => break,
        }
    }
    client_info!("scout_app shutting down");
    Ok(())
}

fn dispatch(state: &mut AppState, msg: Msg, runner: &EffectRunner, streamed_printed: &mut usize) {
    let (next, effects) = update(std::mem::take(state), msg);
    *state = next;
    runner.run(effects);
    if state.consume_dirty() {
        render::print_update(&state.view(), streamed_printed);
    }
}

fn spawn_stdin_reader(event_tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            match parse_line(&line) {
                Parsed::Event(event) => {
                    let quitting = matches!(event, AppEvent::Quit);
                    if event_tx.send(event).is_err() || quitting {
                        return;
                    }
                }
                Parsed::Help => println!("{}", render::HELP),
                Parsed::Ignore => {}
            }
        }
        // Stdin closed; shut the dispatch loop down too.
        let _ = event_tx.send(AppEvent::Quit);
    });
}

fn parse_line(line: &str) -> Parsed {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Parsed::Ignore;
    }
    let (command, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (trimmed, ""),
    };
    match command {
        "crawl" => {
            let mut words = rest.split_whitespace();
            let keyword = words.next().unwrap_or("").to_string();
            let domain = words.next().unwrap_or("").to_string();
            Parsed::Event(AppEvent::Dispatch(Msg::CrawlSubmitted {
                keyword,
                domain,
                urls: Vec::new(),
            }))
        }
        "crawl-urls" => {
            let mut words = rest.split_whitespace();
            let keyword = words.next().unwrap_or("").to_string();
            let urls = words.map(ToString::to_string).collect();
            Parsed::Event(AppEvent::Dispatch(Msg::CrawlSubmitted {
                keyword,
                domain: String::new(),
                urls,
            }))
        }
        "open" => Parsed::Event(AppEvent::Dispatch(Msg::SessionOpened {
            id: rest.to_string(),
        })),
        "say" => Parsed::Event(AppEvent::Dispatch(Msg::PromptSubmitted {
            prompt: rest.to_string(),
            now: Utc::now(),
        })),
        "history" => Parsed::Event(AppEvent::Dispatch(Msg::HistoryRefreshRequested)),
        "quit" | "exit" => Parsed::Event(AppEvent::Quit),
        _ => Parsed::Help,
    }
}
