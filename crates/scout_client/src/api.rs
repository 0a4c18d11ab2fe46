use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::{ApiError, CrawlResponse, DiscussionResponse, KeywordDetail, KeywordSummary};

#[derive(Debug, Clone)]
pub struct BackendSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    /// Without this a stalled backend would leave a session requesting
    /// forever; the whole call resolves to a Timeout error instead.
    pub request_timeout: Duration,
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000/api/v1".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// The backend surface the client depends on: both crawl variants, the
/// discussion endpoint, and the session listing/detail reads.
#[async_trait::async_trait]
pub trait ScoutApi: Send + Sync {
    async fn crawl_by_domain(&self, keyword: &str, domain: &str)
        -> Result<CrawlResponse, ApiError>;

    async fn crawl_urls(&self, keyword: &str, urls: &[String]) -> Result<CrawlResponse, ApiError>;

    async fn discuss(&self, keyword_id: &str, prompt: &str)
        -> Result<DiscussionResponse, ApiError>;

    async fn list_keywords(&self) -> Result<Vec<KeywordSummary>, ApiError>;

    async fn keyword_detail(&self, id: &str) -> Result<KeywordDetail, ApiError>;
}

#[derive(Debug, Clone)]
pub struct HttpApi {
    client: reqwest::Client,
    settings: BackendSettings,
}

impl HttpApi {
    pub fn new(settings: BackendSettings) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ApiError::Network(err.to_string()))?;
        Ok(Self { client, settings })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.settings.base_url.trim_end_matches('/'), path)
    }
}

#[async_trait::async_trait]
impl ScoutApi for HttpApi {
    async fn crawl_by_domain(
        &self,
        keyword: &str,
        domain: &str,
    ) -> Result<CrawlResponse, ApiError> {
        let response = self
            .client
            .get(self.endpoint("crawl"))
            .query(&[("keyword", keyword), ("domain", domain)])
            .send()
            .await
            .map_err(map_reqwest_error)?;
        decode_json(response).await
    }

    async fn crawl_urls(&self, keyword: &str, urls: &[String]) -> Result<CrawlResponse, ApiError> {
        let response = self
            .client
            .post(self.endpoint("crawl"))
            .query(&[("keyword", keyword)])
            .json(&urls)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        decode_json(response).await
    }

    async fn discuss(
        &self,
        keyword_id: &str,
        prompt: &str,
    ) -> Result<DiscussionResponse, ApiError> {
        let response = self
            .client
            .get(self.endpoint("discussion"))
            .query(&[("keywordId", keyword_id), ("user_prompt", prompt)])
            .send()
            .await
            .map_err(map_reqwest_error)?;
        decode_json(response).await
    }

    async fn list_keywords(&self) -> Result<Vec<KeywordSummary>, ApiError> {
        let response = self
            .client
            .get(self.endpoint("keyword/all"))
            .send()
            .await
            .map_err(map_reqwest_error)?;
        decode_json(response).await
    }

    async fn keyword_detail(&self, id: &str) -> Result<KeywordDetail, ApiError> {
        let response = self
            .client
            .get(self.endpoint("keyword/full"))
            .query(&[("keyword", id)])
            .send()
            .await
            .map_err(map_reqwest_error)?;
        decode_json(response).await
    }
}

/// Non-2xx is surfaced as a status error before any decode is attempted.
async fn decode_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let status = response.status();
    if !status.is_success() {
        return Err(ApiError::HttpStatus(status.as_u16()));
    }
    response
        .json::<T>()
        .await
        .map_err(|err| ApiError::Decode(err.to_string()))
}

fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::Timeout(err.to_string());
    }
    ApiError::Network(err.to_string())
}
