//! Analysis configuration.

use serde::{Deserialize, Serialize};

use crate::constants;

/// Configuration for the two rule passes.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Attribute name that marks injected constructors. Default: `ImportingConstructor`.
    pub marker_attribute: Option<String>,
    /// Namespace prefix of host callback interfaces. Default: `Microsoft.VisualStudio.`.
    pub interface_prefix: Option<String>,
    /// Enable the constructor pass. Default: true.
    pub constructor_rule: Option<bool>,
    /// Enable the interface-callback pass. Default: true.
    pub callback_rule: Option<bool>,
    /// Extra C# files declaring host interfaces, relative to the project root.
    #[serde(default)]
    pub interface_stubs: Vec<String>,
    /// Honor `mefguard-ignore` comments and warning pragmas. Default: true.
    pub respect_suppressions: Option<bool>,
}

impl AnalysisConfig {
    pub fn effective_marker_attribute(&self) -> &str {
        self.marker_attribute
            .as_deref()
            .unwrap_or(constants::INJECTION_MARKER)
    }

    pub fn effective_interface_prefix(&self) -> &str {
        self.interface_prefix
            .as_deref()
            .unwrap_or(constants::HOST_INTERFACE_PREFIX)
    }

    pub fn effective_constructor_rule(&self) -> bool {
        self.constructor_rule.unwrap_or(true)
    }

    pub fn effective_callback_rule(&self) -> bool {
        self.callback_rule.unwrap_or(true)
    }

    pub fn effective_respect_suppressions(&self) -> bool {
        self.respect_suppressions.unwrap_or(true)
    }
}
