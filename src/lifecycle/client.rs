// ABOUTME: HTTP client for the computer use Lifecycle API (status, start, stop endpoints)

use super::LifecycleError;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

pub const STATUS_PATH: &str = "/computer_use/api/status";
pub const START_PATH: &str = "/computer_use/api/start";
pub const STOP_PATH: &str = "/computer_use/api/stop";

/// Body of `GET /computer_use/api/status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusReport {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl StatusReport {
    pub fn new(status: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            message: None,
        }
    }
}

/// Body of the start and stop endpoints. Anything other than `"ok"` is a failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandReply {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl CommandReply {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            message: None,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LifecycleApi: Send + Sync {
    async fn status(&self) -> Result<StatusReport, LifecycleError>;
    async fn start(&self) -> Result<CommandReply, LifecycleError>;
    async fn stop(&self) -> Result<CommandReply, LifecycleError>;
}

pub struct HttpLifecycleClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl HttpLifecycleClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        // reqwest::Client::new() is infallible, fall back to it if the builder fails
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            http_client,
            base_url: base_url.into(),
        }
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        url: &str,
    ) -> Result<T, LifecycleError> {
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(LifecycleError::Protocol(format!("{url} returned HTTP {status}")));
        }

        let body = response.text().await?;
        debug!("{} -> {}", url, body);
        serde_json::from_str(&body)
            .map_err(|e| LifecycleError::Protocol(format!("Unparseable body from {url}: {e}")))
    }
}

#[async_trait]
impl LifecycleApi for HttpLifecycleClient {
    async fn status(&self) -> Result<StatusReport, LifecycleError> {
        let url = self.endpoint(STATUS_PATH);
        self.send_json(self.http_client.get(&url), &url).await
    }

    async fn start(&self) -> Result<CommandReply, LifecycleError> {
        let url = self.endpoint(START_PATH);
        self.send_json(self.http_client.post(&url), &url).await
    }

    async fn stop(&self) -> Result<CommandReply, LifecycleError> {
        let url = self.endpoint(STOP_PATH);
        self.send_json(self.http_client.post(&url), &url).await
    }
}
