//! ErrorCode trait for host-facing error reporting.

/// Every error enum implements this to expose a stable code string the host
/// can route on without parsing messages.
pub trait ErrorCode {
    /// Returns the code string (e.g., "REWRITE_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const SCAN_ERROR: &str = "SCAN_ERROR";
pub const PARSE_ERROR: &str = "PARSE_ERROR";
pub const UNSUPPORTED_LANGUAGE: &str = "UNSUPPORTED_LANGUAGE";
pub const DETECTION_ERROR: &str = "DETECTION_ERROR";
pub const REWRITE_ERROR: &str = "REWRITE_ERROR";
pub const RELOCATION_FAILED: &str = "RELOCATION_FAILED";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const CANCELLED: &str = "CANCELLED";
