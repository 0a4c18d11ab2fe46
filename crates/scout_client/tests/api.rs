use std::time::Duration;

use pretty_assertions::assert_eq;
use scout_client::{ApiError, BackendSettings, CrawlResponse, HttpApi, ScoutApi};
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn api_for(server: &MockServer) -> HttpApi {
    HttpApi::new(BackendSettings {
        base_url: server.uri(),
        ..BackendSettings::default()
    })
    .expect("build http api")
}

#[tokio::test]
async fn crawl_by_domain_sends_query_params_and_decodes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/crawl"))
        .and(query_param("keyword", "mobitel"))
        .and(query_param("domain", "lk"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "summary": "Hello",
            "urls": ["a", "b"],
            "urls_crawled": 2,
            "keyword_id": "abc123",
        })))
        .mount(&server)
        .await;

    let response = api_for(&server)
        .crawl_by_domain("mobitel", "lk")
        .await
        .expect("crawl ok");

    assert_eq!(
        response,
        CrawlResponse {
            summary: Some("Hello".to_string()),
            urls: vec!["a".to_string(), "b".to_string()],
            urls_crawled: 2,
            keyword_id: Some("abc123".to_string()),
        }
    );
}

#[tokio::test]
async fn crawl_response_tolerates_missing_fields() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/crawl"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let response = api_for(&server)
        .crawl_by_domain("mobitel", "lk")
        .await
        .expect("crawl ok");

    assert_eq!(response.summary, None);
    assert!(response.urls.is_empty());
    assert_eq!(response.urls_crawled, 0);
    assert_eq!(response.keyword_id, None);
}

#[tokio::test]
async fn crawl_urls_posts_the_candidate_list_as_json() {
    let server = MockServer::start().await;
    let urls = vec![
        "https://example.com/".to_string(),
        "https://example.org/x".to_string(),
    ];
    Mock::given(method("POST"))
        .and(path("/crawl"))
        .and(query_param("keyword", "mobitel"))
        .and(body_json(json!([
            "https://example.com/",
            "https://example.org/x"
        ])))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "summary": "ok",
            "urls": ["https://example.com/"],
            "urls_crawled": 1,
        })))
        .mount(&server)
        .await;

    let response = api_for(&server)
        .crawl_urls("mobitel", &urls)
        .await
        .expect("crawl ok");
    assert_eq!(response.urls_crawled, 1);
}

#[tokio::test]
async fn non_2xx_maps_to_http_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/crawl"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let err = api_for(&server)
        .crawl_by_domain("mobitel", "lk")
        .await
        .unwrap_err();
    assert_eq!(err, ApiError::HttpStatus(502));
}

#[tokio::test]
async fn slow_backend_resolves_to_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/crawl"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(json!({})),
        )
        .mount(&server)
        .await;

    let api = HttpApi::new(BackendSettings {
        base_url: server.uri(),
        request_timeout: Duration::from_millis(50),
        ..BackendSettings::default()
    })
    .expect("build http api");

    let err = api.crawl_by_domain("mobitel", "lk").await.unwrap_err();
    assert!(matches!(err, ApiError::Timeout(_)), "got {err:?}");
}

#[tokio::test]
async fn discuss_passes_keyword_id_and_prompt() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/discussion"))
        .and(query_param("keywordId", "abc123"))
        .and(query_param("user_prompt", "what services exist?"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Broadband and mobile.",
        })))
        .mount(&server)
        .await;

    let response = api_for(&server)
        .discuss("abc123", "what services exist?")
        .await
        .expect("discuss ok");
    assert_eq!(response.message.as_deref(), Some("Broadband and mobile."));
}

#[tokio::test]
async fn listing_decodes_backend_field_names() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/keyword/all"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"_id": "1", "keyword": "alpha", "siteDomain": "lk", "urls": ["a", "b"]},
            {"_id": "2", "keyword": "beta", "urls": []},
        ])))
        .mount(&server)
        .await;

    let entries = api_for(&server).list_keywords().await.expect("listing ok");
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].id, "1");
    assert_eq!(entries[0].site_domain.as_deref(), Some("lk"));
    assert_eq!(entries[0].urls.len(), 2);
    assert_eq!(entries[1].site_domain, None);
}

#[tokio::test]
async fn detail_is_fetched_by_id_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/keyword/full"))
        .and(query_param("keyword", "abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "_id": "abc123",
            "keyword": "mobitel",
            "siteDomain": "lk",
            "urls": ["https://example.com/"],
            "summary": "A summary",
        })))
        .mount(&server)
        .await;

    let detail = api_for(&server)
        .keyword_detail("abc123")
        .await
        .expect("detail ok");
    assert_eq!(detail.id, "abc123");
    assert_eq!(detail.summary.as_deref(), Some("A summary"));
}
