//! reqwest adapter for the media-monitoring REST API.
//!
//! Implements `BackendPort`. Statuses are passed through untouched; deciding
//! which ones count as success is up to each action.

use crate::domain::{BackendRequest, BackendResponse, DomainError, HttpMethod};
use crate::ports::BackendPort;
use crate::shared::config::ApiConfig;
use reqwest::Client;
use tracing::{debug, warn};

/// HTTP client bound to one backend base URL (e.g. `http://localhost:5000/api`).
pub struct RestBackend {
    client: Client,
    base_url: String,
}

impl RestBackend {
    pub fn new(api: &ApiConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: api.base_url(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait::async_trait]
impl BackendPort for RestBackend {
    async fn send(&self, request: &BackendRequest) -> Result<BackendResponse, DomainError> {
        let url = self.url(&request.path);
        let builder = match request.method {
            HttpMethod::Get => self.client.get(&url).query(&request.query),
            HttpMethod::Post => {
                let builder = self.client.post(&url);
                match &request.body {
                    Some(body) => builder.json(body),
                    None => builder,
                }
            }
        };

        let response = builder.send().await.map_err(|e| {
            warn!(request = %request, error = %e, "backend request failed");
            DomainError::Transport(format!("{} {}: {}", request, url, e))
        })?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| DomainError::Transport(format!("read body of {}: {}", request, e)))?;

        debug!(request = %request, status, body_len = body.len(), "backend responded");

        Ok(BackendResponse { status, body })
    }
}
