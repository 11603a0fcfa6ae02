//! # mefguard-core
//!
//! Foundation crate for the mefguard analyzer.
//! Defines errors, config, tracing setup, cancellation, and the constants that
//! form the contract between the rule, its fixer, and the host.

pub mod config;
pub mod constants;
pub mod errors;
pub mod tracing;
pub mod traits;

pub use config::MefGuardConfig;
pub use errors::error_code::ErrorCode;
pub use traits::cancellation::{Cancellable, CancellationToken};
