use serde::Deserialize;
use thiserror::Error;

/// Response shape of both crawl endpoints. Every field beyond the summary is
/// optional upstream, so everything defaults rather than failing the decode.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CrawlResponse {
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub urls: Vec<String>,
    #[serde(default)]
    pub urls_crawled: u64,
    #[serde(default)]
    pub keyword_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DiscussionResponse {
    #[serde(default)]
    pub message: Option<String>,
}

/// One row of the `keyword/all` listing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct KeywordSummary {
    #[serde(rename = "_id")]
    pub id: String,
    pub keyword: String,
    #[serde(default, rename = "siteDomain")]
    pub site_domain: Option<String>,
    #[serde(default)]
    pub urls: Vec<String>,
}

/// Full record behind `keyword/full`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct KeywordDetail {
    #[serde(rename = "_id")]
    pub id: String,
    pub keyword: String,
    #[serde(default, rename = "siteDomain")]
    pub site_domain: Option<String>,
    #[serde(default)]
    pub urls: Vec<String>,
    #[serde(default)]
    pub summary: Option<String>,
}

/// A validated crawl submission as the wire layer sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrawlRequest {
    Domain { keyword: String, domain: String },
    Urls { keyword: String, urls: Vec<String> },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("backend returned http status {0}")]
    HttpStatus(u16),
    #[error("request timed out: {0}")]
    Timeout(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("could not decode backend response: {0}")]
    Decode(String),
}
