use std::sync::Once;

use scout_core::{
    update, AppState, CrawlOutcome, CrawlStatus, Effect, Msg, CRAWL_FAILURE_NOTICE,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(client_logging::initialize_for_tests);
}

fn submit_domain_crawl(state: AppState, keyword: &str, domain: &str) -> (AppState, Vec<Effect>) {
    update(
        state,
        Msg::CrawlSubmitted {
            keyword: keyword.to_string(),
            domain: domain.to_string(),
            urls: Vec::new(),
        },
    )
}

fn outcome(summary: &str, urls: &[&str]) -> CrawlOutcome {
    CrawlOutcome {
        keyword_id: Some("abc123".to_string()),
        summary: summary.to_string(),
        urls: urls.iter().map(ToString::to_string).collect(),
        urls_crawled: urls.len() as u64,
    }
}

#[test]
fn successful_crawl_arms_stream_and_refreshes_history() {
    init_logging();
    let (state, effects) = submit_domain_crawl(AppState::new(), "mobitel", "lk");
    let generation = match &effects[0] {
        Effect::StartCrawl { generation, .. } => *generation,
        other => panic!("expected StartCrawl, got {other:?}"),
    };

    let (state, effects) = update(
        state,
        Msg::CrawlFinished {
            generation,
            outcome: Ok(outcome("Hello", &["a", "b"])),
        },
    );

    let view = state.view();
    assert_eq!(view.status, CrawlStatus::Streaming);
    assert_eq!(view.crawled_urls, vec!["a".to_string(), "b".to_string()]);
    assert_eq!(view.urls_crawled, 2);
    assert_eq!(view.streamed_summary, "");
    assert_eq!(
        effects,
        vec![Effect::RefreshHistory, Effect::StreamTick { generation }]
    );
}

#[test]
fn failed_crawl_is_terminal_with_no_partial_state() {
    init_logging();
    let (state, effects) = submit_domain_crawl(AppState::new(), "mobitel", "lk");
    let generation = match &effects[0] {
        Effect::StartCrawl { generation, .. } => *generation,
        other => panic!("expected StartCrawl, got {other:?}"),
    };

    let (state, effects) = update(
        state,
        Msg::CrawlFinished {
            generation,
            outcome: Err("http status 502".to_string()),
        },
    );

    let view = state.view();
    assert_eq!(view.status, CrawlStatus::Failed);
    assert_eq!(view.notice.as_deref(), Some(CRAWL_FAILURE_NOTICE));
    assert_eq!(view.streamed_summary, "");
    assert!(view.crawled_urls.is_empty());
    assert_eq!(view.urls_crawled, 0);
    assert!(effects.is_empty());
}

#[test]
fn stale_crawl_response_is_discarded() {
    init_logging();
    let (state, _) = submit_domain_crawl(AppState::new(), "first", "lk");
    let (state, effects) = submit_domain_crawl(state, "second", "lk");
    let live_generation = match &effects[0] {
        Effect::StartCrawl { generation, .. } => *generation,
        other => panic!("expected StartCrawl, got {other:?}"),
    };
    assert_eq!(live_generation, 2);

    // The first submission resolves late; its generation is stale.
    let before = state.view();
    let (state, effects) = update(
        state,
        Msg::CrawlFinished {
            generation: 1,
            outcome: Ok(outcome("stale", &["x"])),
        },
    );

    assert_eq!(state.view(), before);
    assert!(effects.is_empty());
    assert_eq!(state.view().keyword, "second");
    assert_eq!(state.view().status, CrawlStatus::Requesting);
}

#[test]
fn history_refresh_replaces_cache_wholesale() {
    init_logging();
    use scout_core::HistoryEntry;

    let entry = |id: &str, keyword: &str| HistoryEntry {
        id: id.to_string(),
        keyword: keyword.to_string(),
        site_domain: Some("lk".to_string()),
        url_count: 3,
    };

    let (state, _) = update(
        AppState::new(),
        Msg::HistoryRefreshed(vec![entry("1", "alpha"), entry("2", "beta")]),
    );
    assert_eq!(state.view().history.len(), 2);

    let (state, effects) = update(state, Msg::HistoryRefreshed(vec![entry("3", "gamma")]));
    assert!(effects.is_empty());
    let history = state.view().history;
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].keyword, "gamma");
}

#[test]
fn refresh_request_emits_the_listing_effect() {
    init_logging();
    let (_, effects) = update(AppState::new(), Msg::HistoryRefreshRequested);
    assert_eq!(effects, vec![Effect::RefreshHistory]);
}
