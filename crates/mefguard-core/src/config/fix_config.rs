//! Fix configuration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants;

/// Which fixer to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FixVariant {
    /// Constructors only, literal log message, ensures the error-notification
    /// namespace and `System`.
    ConstructorOnly,
    /// Constructors and callback methods, logs `e.Message`, ensures `System`.
    #[default]
    CallbackAware,
}

impl FixVariant {
    pub fn name(&self) -> &'static str {
        match self {
            Self::ConstructorOnly => "constructor-only",
            Self::CallbackAware => "callback-aware",
        }
    }
}

impl fmt::Display for FixVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FixVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "constructor-only" => Ok(Self::ConstructorOnly),
            "callback-aware" => Ok(Self::CallbackAware),
            other => Err(format!(
                "unknown fix variant '{other}' (expected constructor-only or callback-aware)"
            )),
        }
    }
}

/// How the rewriter finds the edited declaration again after normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RelocationStrategy {
    /// Look up the tracking marker attached before normalization.
    #[default]
    Marker,
    /// Match name, parameter list text and non-static modifier.
    Signature,
}

impl RelocationStrategy {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Marker => "marker",
            Self::Signature => "signature",
        }
    }
}

impl fmt::Display for RelocationStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RelocationStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "marker" => Ok(Self::Marker),
            "signature" => Ok(Self::Signature),
            other => Err(format!(
                "unknown relocation strategy '{other}' (expected marker or signature)"
            )),
        }
    }
}

/// Configuration for the fixer.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FixConfig {
    /// `constructor-only` or `callback-aware`. Default: `callback-aware`.
    pub variant: Option<String>,
    /// Two-argument logging call placed in the catch block.
    pub logger_call: Option<String>,
    /// Name bound by the catch clause. Default: `e`.
    pub catch_variable: Option<String>,
    /// Caught exception type. Default: `Exception`.
    pub exception_type: Option<String>,
    /// Literal message used by the constructor-only variant.
    pub message: Option<String>,
    /// `marker` or `signature`. Default: `marker`.
    pub relocation: Option<String>,
}

impl FixConfig {
    /// Returns the effective variant; unknown names fall back to the default
    /// (rejected earlier by `MefGuardConfig::validate`).
    pub fn effective_variant(&self) -> FixVariant {
        self.variant
            .as_deref()
            .and_then(|v| v.parse().ok())
            .unwrap_or_default()
    }

    pub fn effective_logger_call(&self) -> &str {
        self.logger_call.as_deref().unwrap_or(constants::LOGGER_CALL)
    }

    pub fn effective_catch_variable(&self) -> &str {
        self.catch_variable
            .as_deref()
            .unwrap_or(constants::CATCH_VARIABLE)
    }

    pub fn effective_exception_type(&self) -> &str {
        self.exception_type
            .as_deref()
            .unwrap_or(constants::CATCH_EXCEPTION_TYPE)
    }

    pub fn effective_message(&self) -> &str {
        self.message
            .as_deref()
            .unwrap_or(constants::CONSTRUCTOR_FIX_MESSAGE)
    }

    pub fn effective_relocation(&self) -> RelocationStrategy {
        self.relocation
            .as_deref()
            .and_then(|v| v.parse().ok())
            .unwrap_or_default()
    }
}
