//! End-to-end pipeline tests over temporary project directories.

use std::fs;
use std::path::Path;

use mefguard_analysis::scanner::walk_directory;
use mefguard_analysis::{Pipeline, RunMode};
use mefguard_core::config::{MefGuardConfig, ScanConfig};
use mefguard_core::errors::{ParseError, PipelineError, ScanError};
use mefguard_core::traits::{Cancellable, CancellationToken};
use tempfile::TempDir;

const FOO: &str = r#"using System.ComponentModel.Composition;

namespace Demo
{
    public class Foo
    {
        [ImportingConstructor]
        public Foo(IBar bar)
        {
            Bar();
        }
    }
}
"#;

const HANDLER: &str = r#"using Microsoft.VisualStudio.Shell;

namespace Demo
{
    public class Handler : IVsCallback
    {
        public void OnIdle()
        {
            Work();
        }
    }
}
"#;

const SHELL_STUB: &str = r#"namespace Microsoft.VisualStudio.Shell
{
    public interface IVsCallback
    {
        void OnIdle();
    }
}
"#;

fn write(root: &Path, relative: &str, text: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, text).unwrap();
}

/// A project with two source files, a build output directory, and an
/// interface stub excluded from the scan.
fn project() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write(root, "src/Foo.cs", FOO);
    write(root, "src/Handler.cs", HANDLER);
    write(root, "bin/Debug/Generated.cs", FOO);
    write(root, "obj/Temp.cs", FOO);
    write(root, "stubs/Shell.cs", SHELL_STUB);
    write(root, ".mefguardignore", "stubs/\n");
    write(root, "README.md", "not C#\n");
    dir
}

fn with_stubs() -> MefGuardConfig {
    MefGuardConfig::from_toml("[analysis]\ninterface_stubs = [\"stubs/Shell.cs\"]\n").unwrap()
}

/// The walker honors the default ignores and the project ignore file.
#[test]
fn test_walker_ignores() {
    let dir = project();
    let files = walk_directory(dir.path(), &ScanConfig::default(), &CancellationToken::new()).unwrap();
    let names: Vec<String> = files
        .iter()
        .map(|f| f.path.strip_prefix(dir.path()).unwrap().display().to_string())
        .collect();
    assert_eq!(names.len(), 2, "{names:?}");
    assert!(names[0].ends_with("Foo.cs"));
    assert!(names[1].ends_with("Handler.cs"));
    assert!(files.iter().all(|f| f.file_size > 0));
}

/// Extra ignore patterns from the scan config apply too.
#[test]
fn test_walker_extra_ignore() {
    let dir = project();
    let config = ScanConfig {
        extra_ignore: vec!["Handler.cs".to_string()],
        ..Default::default()
    };
    let files = walk_directory(dir.path(), &config, &CancellationToken::new()).unwrap();
    assert_eq!(files.len(), 1);
}

/// A missing root is a fatal scan error.
#[test]
fn test_walker_missing_root() {
    let dir = TempDir::new().unwrap();
    let err = walk_directory(&dir.path().join("absent"), &ScanConfig::default(), &CancellationToken::new())
        .unwrap_err();
    assert!(matches!(err, ScanError::RootNotFound { .. }));
}

/// Check mode without stubs only sees the constructor.
#[test]
fn test_check_without_stubs() {
    let dir = project();
    let result = Pipeline::new(MefGuardConfig::default())
        .run(dir.path(), RunMode::Check)
        .unwrap();
    assert!(result.is_clean());
    let report = result.data;
    assert_eq!(report.files_scanned, 2);
    assert_eq!(report.units.len(), 2);
    assert_eq!(report.active_count(), 1);
    assert!(report.units.iter().all(|u| u.remaining.is_none() && u.fixed.is_none()));
}

/// Interface stubs from the config make host callbacks visible.
#[test]
fn test_check_with_stubs() {
    let dir = project();
    let result = Pipeline::new(with_stubs())
        .run(dir.path(), RunMode::Check)
        .unwrap();
    assert!(result.is_clean());
    assert_eq!(result.data.active_count(), 2);
    let lines: Vec<u32> = result.data.diagnostics().map(|d| d.location.line).collect();
    assert_eq!(lines, vec![7, 7]);
}

/// A missing stub is reported as a non-fatal error.
#[test]
fn test_missing_stub_is_non_fatal() {
    let dir = project();
    let config = MefGuardConfig::from_toml("[analysis]\ninterface_stubs = [\"stubs/Absent.cs\"]\n").unwrap();
    let result = Pipeline::new(config).run(dir.path(), RunMode::Check).unwrap();
    assert_eq!(result.error_count(), 1);
    assert!(matches!(result.errors[0], PipelineError::Scan(ScanError::Io { .. })));
    assert_eq!(result.data.active_count(), 1);
}

/// Fix mode with writing rewrites the files; a second run finds nothing.
#[test]
fn test_fix_writes_files() {
    let dir = project();
    let result = Pipeline::new(with_stubs())
        .run(dir.path(), RunMode::Fix { write: true })
        .unwrap();
    assert!(result.is_clean(), "{:?}", result.errors);
    assert_eq!(result.data.fixes_applied(), 2);
    assert_eq!(result.data.active_count(), 0);
    assert!(result
        .data
        .units
        .iter()
        .all(|u| u.fixed.as_ref().is_some_and(|f| f.written)));

    let foo = fs::read_to_string(dir.path().join("src/Foo.cs")).unwrap();
    assert!(foo.contains("catch (Exception e)"));
    assert!(foo.contains("using System;\n"));
    let handler = fs::read_to_string(dir.path().join("src/Handler.cs")).unwrap();
    assert!(handler.contains("LogErrorWithoutShowingErrorNotificationUI(e.Message, e);"));

    // Build output is never touched.
    let generated = fs::read_to_string(dir.path().join("bin/Debug/Generated.cs")).unwrap();
    assert_eq!(generated, FOO);

    let again = Pipeline::new(with_stubs())
        .run(dir.path(), RunMode::Fix { write: true })
        .unwrap();
    assert_eq!(again.data.active_count(), 0);
    assert_eq!(again.data.fixes_applied(), 0);
    assert_eq!(fs::read_to_string(dir.path().join("src/Foo.cs")).unwrap(), foo);
}

/// A dry run computes the fixed text without writing it.
#[test]
fn test_fix_dry_run() {
    let dir = project();
    let result = Pipeline::new(MefGuardConfig::default())
        .run(dir.path(), RunMode::Fix { write: false })
        .unwrap();
    let fixed: Vec<_> = result.data.units.iter().filter_map(|u| u.fixed.as_ref()).collect();
    assert_eq!(fixed.len(), 1);
    assert!(!fixed[0].written);
    assert!(fixed[0].text.contains("try"));
    assert_eq!(fs::read_to_string(dir.path().join("src/Foo.cs")).unwrap(), FOO);
    assert_eq!(result.data.active_count(), 0);
}

/// The configured fix variant is honored.
#[test]
fn test_fix_variant_from_config() {
    let dir = project();
    let config = MefGuardConfig::from_toml("[fix]\nvariant = \"constructor-only\"\n").unwrap();
    let result = Pipeline::new(config)
        .run(dir.path(), RunMode::Fix { write: false })
        .unwrap();
    let text = &result
        .data
        .units
        .iter()
        .find_map(|u| u.fixed.as_ref())
        .unwrap()
        .text;
    assert!(text.contains("\"Erorr in MEF ctor\""));
    assert!(text.contains("using DebuggerShared.Services.ErrorNotification;"));
}

/// Undecodable files are skipped with a parse error; the rest is analysed.
#[test]
fn test_invalid_utf8_is_non_fatal() {
    let dir = project();
    fs::write(dir.path().join("src/Bad.cs"), [0xff, 0xfe, 0x00, 0x63]).unwrap();
    let result = Pipeline::new(MefGuardConfig::default())
        .run(dir.path(), RunMode::Check)
        .unwrap();
    assert_eq!(result.error_count(), 1);
    assert!(matches!(
        result.errors[0],
        PipelineError::Parse(ParseError::Encoding { .. })
    ));
    assert_eq!(result.data.units.len(), 2);
}

/// A single file can be the root.
#[test]
fn test_single_file_root() {
    let dir = project();
    let result = Pipeline::new(MefGuardConfig::default())
        .run(&dir.path().join("src/Foo.cs"), RunMode::Check)
        .unwrap();
    assert_eq!(result.data.files_scanned, 1);
    assert_eq!(result.data.active_count(), 1);
}

/// A cancelled pipeline stops with an error.
#[test]
fn test_cancelled_run() {
    let dir = project();
    let cancel = CancellationToken::new();
    cancel.cancel();
    let err = Pipeline::new(MefGuardConfig::default())
        .with_cancellation(cancel)
        .run(dir.path(), RunMode::Check)
        .unwrap_err();
    assert!(matches!(
        err,
        PipelineError::Scan(ScanError::Cancelled) | PipelineError::Cancelled
    ));
}
