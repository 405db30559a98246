//! Load-generation and verification harness
//!
//! Drives many calls (concurrently or strictly one at a time) against a
//! chosen racelab endpoint, checks that every call resolved to the id it
//! sent, and aggregates the observed correctness rate. Works either
//! in-process against a [`racelab_core::Dispatcher`] or over HTTP against a
//! running server.

pub mod caller;
pub mod report;
pub mod scenario;

pub use caller::{CallError, CallReply, DispatcherCaller, EndpointCaller, HttpCaller};
pub use scenario::{run_concurrent, run_sequential, MismatchSample, ScenarioOutcome};
