//! Endpoint callers
//!
//! The harness issues calls through the [`EndpointCaller`] seam so the same
//! scenarios run in-process (straight into the dispatcher) and over HTTP
//! (through a real server, the way the race is demonstrated in production).

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

use racelab_core::{Dispatcher, RequestContext};

/// What a single call resolved to
#[derive(Debug, Clone)]
pub struct CallReply {
    pub resolved_id: String,
}

/// Why a single call failed outright (distinct from a mismatch)
#[derive(Debug, Error)]
pub enum CallError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("endpoint rejected call: {0}")]
    Rejected(String),
}

/// Issues one call against a named endpoint.
#[async_trait]
pub trait EndpointCaller: Send + Sync {
    async fn call(&self, endpoint: &str, id: &str, delay_ms: u64) -> Result<CallReply, CallError>;
}

/// In-process caller wrapping the dispatcher directly
pub struct DispatcherCaller {
    dispatcher: Arc<Dispatcher>,
}

impl DispatcherCaller {
    pub fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }
}

#[async_trait]
impl EndpointCaller for DispatcherCaller {
    async fn call(&self, endpoint: &str, id: &str, delay_ms: u64) -> Result<CallReply, CallError> {
        let record = self
            .dispatcher
            .route(endpoint, RequestContext::new(id, delay_ms))
            .await
            .map_err(|e| CallError::Rejected(e.to_string()))?;

        Ok(CallReply {
            resolved_id: record.resolved_id,
        })
    }
}

#[derive(Debug, Deserialize)]
struct StrategyBody {
    id: String,
}

/// HTTP caller issuing real GETs against a running server
pub struct HttpCaller {
    client: reqwest::Client,
    base_url: String,
}

impl HttpCaller {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl EndpointCaller for HttpCaller {
    async fn call(&self, endpoint: &str, id: &str, delay_ms: u64) -> Result<CallReply, CallError> {
        let url = format!("{}/{}/{}/{}", self.base_url, endpoint, id, delay_ms);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| CallError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CallError::Rejected(format!("{status}: {body}")));
        }

        let body: StrategyBody = response
            .json()
            .await
            .map_err(|e| CallError::Transport(format!("malformed response body: {e}")))?;

        Ok(CallReply {
            resolved_id: body.id,
        })
    }
}
