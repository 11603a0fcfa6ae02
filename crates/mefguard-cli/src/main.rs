//! mefguard: report MEF importing constructors and host callbacks without a
//! try/catch, or wrap them in one.
//!
//! ```bash
//! mefguard check src/ --format json
//! mefguard fix src/ --variant constructor-only --dry-run
//! ```

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use mefguard_analysis::reporters::console::ConsoleReporter;
use mefguard_analysis::reporters::{available_formats, create_reporter, Reporter};
use mefguard_analysis::rules::Diagnostic;
use mefguard_analysis::{Pipeline, ProjectReport, RunMode};
use mefguard_core::config::{CliOverrides, MefGuardConfig};
use mefguard_core::errors::{PipelineError, PipelineResult};
use mefguard_core::tracing::init_tracing;
use mefguard_core::ErrorCode;

#[derive(Parser)]
#[command(name = "mefguard", version)]
#[command(about = "Find and fix MEF constructors and host callbacks that can throw uncaught", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Report unprotected declarations
    Check {
        /// File or directory to scan
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "console")]
        format: String,

        /// Config file used instead of the project mefguard.toml
        #[arg(long)]
        config: Option<PathBuf>,

        /// Disable ANSI colors in console output
        #[arg(long)]
        no_color: bool,

        /// Worker threads, 0 for auto
        #[arg(long)]
        threads: Option<usize>,
    },

    /// Wrap unprotected declarations in a logging try/catch
    Fix {
        /// File or directory to scan
        #[arg(default_value = ".")]
        path: PathBuf,

        /// constructor-only or callback-aware
        #[arg(long)]
        variant: Option<String>,

        /// marker or signature
        #[arg(long)]
        relocation: Option<String>,

        /// Print what would change without writing files
        #[arg(long)]
        dry_run: bool,

        /// Config file used instead of the project mefguard.toml
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

const EXIT_FINDINGS: u8 = 1;
const EXIT_FAILURE: u8 = 2;

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    let outcome = match cli.command {
        Commands::Check {
            path,
            format,
            config,
            no_color,
            threads,
        } => {
            let overrides = CliOverrides {
                config_path: config,
                scan_threads: threads,
                ..Default::default()
            };
            run_check(&path, &format, !no_color, &overrides)
        }
        Commands::Fix {
            path,
            variant,
            relocation,
            dry_run,
            config,
        } => {
            let overrides = CliOverrides {
                config_path: config,
                fix_variant: variant,
                relocation,
                ..Default::default()
            };
            run_fix(&path, dry_run, &overrides)
        }
    };

    match outcome {
        Ok(code) => code,
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::from(EXIT_FAILURE)
        }
    }
}

/// Directory whose `mefguard.toml` applies to `path`.
fn config_root(path: &Path) -> &Path {
    if path.is_file() {
        path.parent().unwrap_or(path)
    } else {
        path
    }
}

fn run_pipeline(
    path: &Path,
    mode: RunMode,
    overrides: &CliOverrides,
) -> Result<PipelineResult<ProjectReport>, String> {
    let config = MefGuardConfig::load(config_root(path), Some(overrides))
        .map_err(|e| e.coded_string())?;
    let result = Pipeline::new(config)
        .run(path, mode)
        .map_err(|e| e.coded_string())?;
    report_errors(&result.errors);
    Ok(result)
}

fn report_errors(errors: &[PipelineError]) {
    for error in errors {
        tracing::warn!(code = error.error_code(), "{error}");
        eprintln!("warning: {}", error.coded_string());
    }
}

fn run_check(
    path: &Path,
    format: &str,
    use_color: bool,
    overrides: &CliOverrides,
) -> Result<ExitCode, String> {
    let reporter: Box<dyn Reporter> = match format {
        "console" => Box::new(ConsoleReporter::new(use_color)),
        other => create_reporter(other).ok_or_else(|| {
            format!(
                "unknown format '{other}' (expected one of: {})",
                available_formats().join(", ")
            )
        })?,
    };
    let result = run_pipeline(path, RunMode::Check, overrides)?;
    let diagnostics: Vec<Diagnostic> = result.data.diagnostics().cloned().collect();
    print!("{}", reporter.generate(&diagnostics)?);
    tracing::info!(
        files = result.data.files_scanned,
        duration_ms = result.data.duration_ms,
        "check finished"
    );
    Ok(exit_for(&result.data))
}

fn run_fix(path: &Path, dry_run: bool, overrides: &CliOverrides) -> Result<ExitCode, String> {
    let result = run_pipeline(path, RunMode::Fix { write: !dry_run }, overrides)?;
    let report = &result.data;
    for unit in &report.units {
        let Some(fixed) = &unit.fixed else {
            continue;
        };
        let verb = if fixed.written { "fixed" } else { "would fix" };
        println!(
            "{}: {verb} {} declaration(s)",
            unit.path.display(),
            fixed.applied
        );
        if dry_run {
            println!("{}", fixed.text);
        }
    }
    println!(
        "{} fix(es) applied, {} diagnostic(s) remaining",
        report.fixes_applied(),
        report.active_count()
    );
    Ok(exit_for(report))
}

fn exit_for(report: &ProjectReport) -> ExitCode {
    if report.active_count() > 0 {
        ExitCode::from(EXIT_FINDINGS)
    } else {
        ExitCode::SUCCESS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_fix_flags() {
        let cli = Cli::try_parse_from([
            "mefguard",
            "fix",
            "src",
            "--variant",
            "constructor-only",
            "--dry-run",
        ])
        .unwrap();
        match cli.command {
            Commands::Fix {
                path,
                variant,
                dry_run,
                ..
            } => {
                assert_eq!(path, PathBuf::from("src"));
                assert_eq!(variant.as_deref(), Some("constructor-only"));
                assert!(dry_run);
            }
            Commands::Check { .. } => panic!("expected fix"),
        }
    }

    #[test]
    fn test_check_defaults() {
        let cli = Cli::try_parse_from(["mefguard", "check"]).unwrap();
        match cli.command {
            Commands::Check { path, format, .. } => {
                assert_eq!(path, PathBuf::from("."));
                assert_eq!(format, "console");
            }
            Commands::Fix { .. } => panic!("expected check"),
        }
    }
}
