//! Core domain logic for racelab
//!
//! Racelab demonstrates what happens when per-request mutable state lives in
//! a handler instance shared across concurrently-processed requests. This
//! crate holds the pieces with real concurrency semantics: the request data
//! model, the simulated-processing delay, the three handler strategies and
//! the dispatcher that routes endpoint names to them.

pub mod delay;
pub mod dispatcher;
pub mod error;
pub mod strategy;
pub mod types;

pub use delay::{shutdown_channel, DelayOutcome, ShutdownController, ShutdownSignal};
pub use dispatcher::{
    Dispatcher, SAFE_PROTOTYPE_ENDPOINT, SAFE_SINGLETON_ENDPOINT, UNSAFE_ENDPOINT,
};
pub use error::{CoreError, Result};
pub use strategy::HandlerStrategy;
pub use types::{Discipline, HandlerIdentity, RequestContext, ResultRecord};
