//! Response models for the REST API

use racelab_core::{Discipline, HandlerIdentity, ResultRecord};
use serde::{Deserialize, Serialize};

/// Extended response body for the strategy endpoints.
///
/// `id` is the resolved id read back after the delay; the rest is
/// diagnostic metadata for observing the race from the outside.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyResponse {
    pub id: String,
    pub timeout_ms: u64,
    pub discipline: Discipline,
    pub strategy: String,
    pub timestamp_ms: i64,
    pub handler: HandlerIdentity,
}

impl From<ResultRecord> for StrategyResponse {
    fn from(record: ResultRecord) -> Self {
        Self {
            id: record.resolved_id,
            timeout_ms: record.delay_ms,
            discipline: record.discipline,
            strategy: record.strategy,
            timestamp_ms: record.timestamp_ms,
            handler: record.handler,
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now(),
        }
    }
}
