//! Core error types for racelab

use thiserror::Error;

/// Errors produced by the core routing layer
#[derive(Debug, Error)]
pub enum CoreError {
    /// The endpoint name is not one of the registered strategies
    #[error("unknown endpoint: '{endpoint}'")]
    UnknownEndpoint { endpoint: String },
}

impl CoreError {
    pub fn unknown_endpoint(endpoint: impl Into<String>) -> Self {
        CoreError::UnknownEndpoint {
            endpoint: endpoint.into(),
        }
    }
}

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, CoreError>;
