//! Top-level mefguard configuration with layered resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{AnalysisConfig, EndOfLine, FixConfig, FixVariant, FormatConfig, RelocationStrategy, ScanConfig};
use crate::constants;
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`MEFGUARD_*`)
/// 3. Project config (`mefguard.toml` in project root)
/// 4. User config (`~/.mefguard/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct MefGuardConfig {
    pub analysis: AnalysisConfig,
    pub fix: FixConfig,
    pub format: FormatConfig,
    pub scan: ScanConfig,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    /// Replaces the project `mefguard.toml` lookup.
    pub config_path: Option<PathBuf>,
    pub fix_variant: Option<String>,
    pub relocation: Option<String>,
    pub scan_threads: Option<usize>,
    pub scan_max_file_size: Option<u64>,
}

impl MefGuardConfig {
    /// Load configuration with layered resolution rooted at `root`.
    pub fn load(root: &Path, cli_overrides: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Layer 4 (lowest priority): user config
        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                match Self::merge_toml_file(&mut config, &user_config_path) {
                    Ok(()) => {}
                    Err(e @ ConfigError::ParseError { .. }) => return Err(e),
                    Err(e) => {
                        tracing::warn!(error = %e, "ignoring unreadable user config");
                    }
                }
            }
        }

        // Layer 3: project config
        let project_config_path = cli_overrides
            .and_then(|cli| cli.config_path.clone())
            .unwrap_or_else(|| root.join(constants::CONFIG_FILE_NAME));
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        } else if cli_overrides.is_some_and(|cli| cli.config_path.is_some()) {
            return Err(ConfigError::FileNotFound {
                path: project_config_path.display().to_string(),
            });
        }

        // Layer 2: environment variables
        Self::apply_env_overrides(&mut config);

        // Layer 1 (highest priority): CLI flags
        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;
        tracing::debug!(
            variant = %config.fix.effective_variant(),
            relocation = %config.fix.effective_relocation(),
            "configuration resolved"
        );

        Ok(config)
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Validate the configuration values.
    pub fn validate(config: &MefGuardConfig) -> Result<(), ConfigError> {
        if let Some(ref variant) = config.fix.variant {
            variant
                .parse::<FixVariant>()
                .map_err(|message| ConfigError::ValidationFailed {
                    field: "fix.variant".to_string(),
                    message,
                })?;
        }
        if let Some(ref relocation) = config.fix.relocation {
            relocation
                .parse::<RelocationStrategy>()
                .map_err(|message| ConfigError::ValidationFailed {
                    field: "fix.relocation".to_string(),
                    message,
                })?;
        }
        if let Some(ref eol) = config.format.end_of_line {
            if EndOfLine::parse(eol).is_none() {
                return Err(ConfigError::ValidationFailed {
                    field: "format.end_of_line".to_string(),
                    message: format!("unknown value '{eol}' (expected auto, lf or crlf)"),
                });
            }
        }
        if let Some(size) = config.format.indent_size {
            if size == 0 || size > 16 {
                return Err(ConfigError::ValidationFailed {
                    field: "format.indent_size".to_string(),
                    message: "must be between 1 and 16".to_string(),
                });
            }
        }
        if let Some(max_file_size) = config.scan.max_file_size {
            if max_file_size == 0 {
                return Err(ConfigError::ValidationFailed {
                    field: "scan.max_file_size".to_string(),
                    message: "must be greater than 0".to_string(),
                });
            }
        }
        for (field, value) in [
            ("analysis.marker_attribute", &config.analysis.marker_attribute),
            ("fix.logger_call", &config.fix.logger_call),
            ("fix.catch_variable", &config.fix.catch_variable),
            ("fix.exception_type", &config.fix.exception_type),
        ] {
            if value.as_deref().is_some_and(|v| v.trim().is_empty()) {
                return Err(ConfigError::ValidationFailed {
                    field: field.to_string(),
                    message: "must not be empty".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Returns the user config path: `~/.mefguard/config.toml`.
    fn user_config_path() -> Option<PathBuf> {
        dirs_path().map(|d| d.join("config.toml"))
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored.
    fn merge_toml_file(config: &mut MefGuardConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: MefGuardConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`; `other` wins wherever it has a value.
    pub fn merge(base: &mut MefGuardConfig, other: &MefGuardConfig) {
        // Analysis
        if other.analysis.marker_attribute.is_some() {
            base.analysis.marker_attribute = other.analysis.marker_attribute.clone();
        }
        if other.analysis.interface_prefix.is_some() {
            base.analysis.interface_prefix = other.analysis.interface_prefix.clone();
        }
        if other.analysis.constructor_rule.is_some() {
            base.analysis.constructor_rule = other.analysis.constructor_rule;
        }
        if other.analysis.callback_rule.is_some() {
            base.analysis.callback_rule = other.analysis.callback_rule;
        }
        if !other.analysis.interface_stubs.is_empty() {
            base.analysis.interface_stubs = other.analysis.interface_stubs.clone();
        }
        if other.analysis.respect_suppressions.is_some() {
            base.analysis.respect_suppressions = other.analysis.respect_suppressions;
        }

        // Fix
        if other.fix.variant.is_some() {
            base.fix.variant = other.fix.variant.clone();
        }
        if other.fix.logger_call.is_some() {
            base.fix.logger_call = other.fix.logger_call.clone();
        }
        if other.fix.catch_variable.is_some() {
            base.fix.catch_variable = other.fix.catch_variable.clone();
        }
        if other.fix.exception_type.is_some() {
            base.fix.exception_type = other.fix.exception_type.clone();
        }
        if other.fix.message.is_some() {
            base.fix.message = other.fix.message.clone();
        }
        if other.fix.relocation.is_some() {
            base.fix.relocation = other.fix.relocation.clone();
        }

        // Format
        if other.format.indent_size.is_some() {
            base.format.indent_size = other.format.indent_size;
        }
        if other.format.use_tabs.is_some() {
            base.format.use_tabs = other.format.use_tabs;
        }
        if other.format.end_of_line.is_some() {
            base.format.end_of_line = other.format.end_of_line.clone();
        }

        // Scan
        if other.scan.max_file_size.is_some() {
            base.scan.max_file_size = other.scan.max_file_size;
        }
        if other.scan.threads.is_some() {
            base.scan.threads = other.scan.threads;
        }
        if !other.scan.extra_ignore.is_empty() {
            base.scan.extra_ignore = other.scan.extra_ignore.clone();
        }
        if other.scan.follow_symlinks.is_some() {
            base.scan.follow_symlinks = other.scan.follow_symlinks;
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `MEFGUARD_FIX_VARIANT`, `MEFGUARD_SCAN_THREADS`, etc.
    fn apply_env_overrides(config: &mut MefGuardConfig) {
        if let Ok(val) = std::env::var("MEFGUARD_ANALYSIS_INTERFACE_PREFIX") {
            config.analysis.interface_prefix = Some(val);
        }
        if let Ok(val) = std::env::var("MEFGUARD_ANALYSIS_CONSTRUCTOR_RULE") {
            if let Ok(v) = val.parse::<bool>() {
                config.analysis.constructor_rule = Some(v);
            }
        }
        if let Ok(val) = std::env::var("MEFGUARD_ANALYSIS_CALLBACK_RULE") {
            if let Ok(v) = val.parse::<bool>() {
                config.analysis.callback_rule = Some(v);
            }
        }
        if let Ok(val) = std::env::var("MEFGUARD_FIX_VARIANT") {
            config.fix.variant = Some(val);
        }
        if let Ok(val) = std::env::var("MEFGUARD_FIX_RELOCATION") {
            config.fix.relocation = Some(val);
        }
        if let Ok(val) = std::env::var("MEFGUARD_FORMAT_INDENT_SIZE") {
            if let Ok(v) = val.parse::<usize>() {
                config.format.indent_size = Some(v);
            }
        }
        if let Ok(val) = std::env::var("MEFGUARD_FORMAT_END_OF_LINE") {
            config.format.end_of_line = Some(val);
        }
        if let Ok(val) = std::env::var("MEFGUARD_SCAN_MAX_FILE_SIZE") {
            if let Ok(v) = val.parse::<u64>() {
                config.scan.max_file_size = Some(v);
            }
        }
        if let Ok(val) = std::env::var("MEFGUARD_SCAN_THREADS") {
            if let Ok(v) = val.parse::<usize>() {
                config.scan.threads = Some(v);
            }
        }
    }

    /// Apply CLI overrides (highest priority).
    fn apply_cli_overrides(config: &mut MefGuardConfig, cli: &CliOverrides) {
        if let Some(ref v) = cli.fix_variant {
            config.fix.variant = Some(v.clone());
        }
        if let Some(ref v) = cli.relocation {
            config.fix.relocation = Some(v.clone());
        }
        if let Some(v) = cli.scan_threads {
            config.scan.threads = Some(v);
        }
        if let Some(v) = cli.scan_max_file_size {
            config.scan.max_file_size = Some(v);
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

/// Returns the user-level config directory: `~/.mefguard/`.
fn dirs_path() -> Option<PathBuf> {
    home_dir().map(|h| h.join(".mefguard"))
}

fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
