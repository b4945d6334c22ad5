use anyhow::{Context, Result};
use reqwest::Client;
use url::Url;

use crate::models::ProblemRecord;

// ─── Error types ────────────────────────────────────────────────────────────

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("HTTP {status}: {message}")]
    Api { status: u16, message: String },
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

// ─── Client ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    endpoint: Url,
}

impl ApiClient {
    pub fn new(endpoint: &str) -> Result<Self> {
        let endpoint =
            Url::parse(endpoint).with_context(|| format!("Invalid API URL: {endpoint}"))?;

        let client = Client::builder()
            .user_agent("codetrack-tui/0.1.0")
            .build()?;

        Ok(Self { client, endpoint })
    }

    /// The single fetch this app ever performs: the full problem collection
    /// as one JSON array. Non-2xx responses become `ApiError::Api`.
    pub async fn fetch_problems(&self) -> Result<Vec<ProblemRecord>, ApiError> {
        let resp = self.client.get(self.endpoint.clone()).send().await?;

        let status = resp.status();
        if status.is_client_error() || status.is_server_error() {
            let message = resp.text().await.unwrap_or_default();
            return Err(ApiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(resp.json().await?)
    }
}
