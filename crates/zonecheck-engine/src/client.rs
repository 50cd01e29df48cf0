use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

use crate::error::{EngineError, Result};
use crate::models::{RpcRequest, RpcResponse};

/// Request timeout used when none is configured.
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Something that can analyze a domain and return raw result entries.
#[async_trait]
pub trait DomainAnalyzer: Send + Sync {
    /// Endpoint the analyzer talks to, for logs
    fn endpoint(&self) -> &str;

    /// Runs one analysis of `domain` and returns the engine's result
    /// entries verbatim, in engine order.
    ///
    /// A response whose `error` member is present and non-null fails the
    /// call. `"error": null` is read as "no error", so such a response
    /// succeeds with its `result` entries.
    async fn analyze(&self, domain: &str) -> Result<Vec<Value>>;
}

/// JSON-RPC client for a Zonemaster backend.
#[derive(Clone)]
pub struct ZonemasterClient {
    url: String,
    client: Client,
    timeout_secs: u64,
}

impl ZonemasterClient {
    pub fn new(url: impl Into<String>, timeout_secs: Option<u64>) -> Result<Self> {
        let timeout_secs = timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS);
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(EngineError::Client)?;

        Ok(Self {
            url: url.into(),
            client,
            timeout_secs,
        })
    }

    pub fn timeout_secs(&self) -> u64 {
        self.timeout_secs
    }
}

#[async_trait]
impl DomainAnalyzer for ZonemasterClient {
    fn endpoint(&self) -> &str {
        &self.url
    }

    async fn analyze(&self, domain: &str) -> Result<Vec<Value>> {
        let req = RpcRequest::start_domain_test(domain);

        tracing::debug!(url = %self.url, domain, "Calling Zonemaster API");

        let resp = self
            .client
            .post(&self.url)
            .header("Content-Type", "application/json")
            .json(&req)
            .send()
            .await
            .map_err(EngineError::Transport)?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            tracing::error!(status = %status, body = %body, "Zonemaster API request failed");
            return Err(EngineError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = resp.bytes().await.map_err(EngineError::Transport)?;
        let rpc: RpcResponse = serde_json::from_slice(&body)?;

        if let Some(error) = rpc.error {
            tracing::warn!(domain, error = %error, "Zonemaster API returned an error");
            return Err(EngineError::Rpc(error));
        }

        let entries = rpc.into_entries();
        tracing::debug!(domain, count = entries.len(), "Zonemaster API response received");
        Ok(entries)
    }
}
