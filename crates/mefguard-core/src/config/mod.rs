//! Configuration system for mefguard.
//! TOML-based, layered resolution: CLI > env > project > user > defaults.

pub mod analysis_config;
pub mod fix_config;
pub mod format_config;
pub mod mefguard_config;
pub mod scan_config;

pub use analysis_config::AnalysisConfig;
pub use fix_config::{FixConfig, FixVariant, RelocationStrategy};
pub use format_config::{EndOfLine, FormatConfig};
pub use mefguard_config::{CliOverrides, MefGuardConfig};
pub use scan_config::ScanConfig;
