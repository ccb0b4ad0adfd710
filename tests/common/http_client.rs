//! HTTP client helpers for tests.

use std::time::Duration;

use serde_json::json;

use warden::constants::WARDEN_CACHE_HEADER;
use warden::gateway::handler::AskResponse;
use warden::gateway::{ErrorResponse, HealthResponse, MetricsResponse};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

pub struct TestClient {
    client: reqwest::Client,
    base_url: String,
}

/// An `/ask` reply: the body plus the cache header.
#[derive(Debug)]
pub enum AskReply {
    Answered {
        body: AskResponse,
        cache: String,
    },
    Refused {
        body: ErrorResponse,
        cache: String,
    },
}

impl AskReply {
    pub fn cache(&self) -> &str {
        match self {
            AskReply::Answered { cache, .. } | AskReply::Refused { cache, .. } => cache,
        }
    }
}

impl TestClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: base_url.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        let path = path.trim_start_matches('/');
        format!("{}/{}", self.base_url, path)
    }

    pub async fn ask_raw(&self, body: serde_json::Value) -> Result<reqwest::Response, TestClientError> {
        Ok(self.client.post(self.url("/ask")).json(&body).send().await?)
    }

    pub async fn ask(&self, query: &str) -> Result<AskReply, TestClientError> {
        let resp = self.ask_raw(json!({ "query": query })).await?;

        let cache = resp
            .headers()
            .get(WARDEN_CACHE_HEADER)
            .and_then(|h| h.to_str().ok())
            .unwrap_or("unknown")
            .to_string();

        match resp.status().as_u16() {
            200 => Ok(AskReply::Answered {
                body: resp.json().await?,
                cache,
            }),
            400 => Ok(AskReply::Refused {
                body: resp.json().await?,
                cache,
            }),
            status => {
                let body = resp.text().await.unwrap_or_default();
                Err(TestClientError::UnexpectedStatus(status, body))
            }
        }
    }

    pub async fn health(&self) -> Result<HealthResponse, TestClientError> {
        self.get_json("/health").await
    }

    pub async fn metrics(&self) -> Result<MetricsResponse, TestClientError> {
        self.get_json("/metrics").await
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, TestClientError> {
        let resp = self.client.get(self.url(path)).send().await?;

        if resp.status().is_success() {
            Ok(resp.json().await?)
        } else {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            Err(TestClientError::UnexpectedStatus(status, body))
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TestClientError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Unexpected HTTP status: {0} - Body: {1}")]
    UnexpectedStatus(u16, String),
}
