//! Logging for mefguard.
//! `tracing` crate with `EnvFilter`, per-subsystem log levels.

pub mod setup;

pub use setup::{init_tracing, LOG_ENV_VAR};
