//! REST API surface for racelab
//!
//! Thin collaborator around `racelab-core`: extracts `{id}` and optional
//! `{timeout_ms}` path parameters, forwards them through the dispatcher and
//! formats the resulting record (plus diagnostic metadata) as JSON.

pub mod app;
pub mod context;
pub mod errors;
pub mod handlers;
pub mod models;

pub use app::{create_app, AppConfig};
pub use context::AppContext;
pub use errors::{RestError, RestResult};
pub use models::StrategyResponse;
