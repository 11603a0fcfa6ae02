//! Error handling for mefguard.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod config_error;
pub mod detection_error;
pub mod error_code;
pub mod parse_error;
pub mod pipeline_error;
pub mod rewrite_error;
pub mod scan_error;

pub use config_error::ConfigError;
pub use detection_error::DetectionError;
pub use error_code::ErrorCode;
pub use parse_error::ParseError;
pub use pipeline_error::{PipelineError, PipelineResult};
pub use rewrite_error::RewriteError;
pub use scan_error::ScanError;
