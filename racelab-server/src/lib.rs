//! Racelab server library
//!
//! Configuration, logging setup and the server lifecycle (startup, serving,
//! graceful shutdown). The binary in `main.rs` is a thin clap wrapper around
//! [`Server`].

pub mod config;
pub mod logging;
pub mod startup;

pub use config::{HttpServerConfig, LoggingConfig, ServerConfig};
pub use startup::Server;
