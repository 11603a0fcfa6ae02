//! Parallel file walker using the `ignore` crate's `WalkParallel`.
//!
//! Respects `.gitignore`, `.mefguardignore` (gitignore syntax, hierarchical)
//! and the default build-output ignores.

use std::path::{Path, PathBuf};

use crossbeam_channel as channel;
use mefguard_core::config::ScanConfig;
use mefguard_core::constants::IGNORE_FILE_NAME;
use mefguard_core::errors::ScanError;
use mefguard_core::traits::{Cancellable, CancellationToken};

/// Directories never scanned.
pub const DEFAULT_IGNORES: &[&str] = &["bin", "obj", ".git", ".vs", "packages", "node_modules"];

/// Extensions of the C# sources the analyzer reads.
pub const SOURCE_EXTENSIONS: &[&str] = &["cs"];

/// A source file found by the walker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredFile {
    pub path: PathBuf,
    pub file_size: u64,
}

/// Walk `root` in parallel and return `.cs` files sorted by path.
pub fn walk_directory(
    root: &Path,
    config: &ScanConfig,
    cancel: &CancellationToken,
) -> Result<Vec<DiscoveredFile>, ScanError> {
    if !root.exists() {
        return Err(ScanError::RootNotFound {
            path: root.to_path_buf(),
        });
    }
    if root.is_file() {
        let metadata = std::fs::metadata(root).map_err(|source| ScanError::Io {
            path: root.to_path_buf(),
            source,
        })?;
        return Ok(vec![DiscoveredFile {
            path: root.to_path_buf(),
            file_size: metadata.len(),
        }]);
    }

    let threads = config.effective_threads();
    let mut builder = ignore::WalkBuilder::new(root);
    builder
        .hidden(false)
        .git_ignore(true)
        .git_global(true)
        .git_exclude(true)
        .require_git(false)
        .add_custom_ignore_filename(IGNORE_FILE_NAME)
        .max_filesize(Some(config.effective_max_file_size()))
        .follow_links(config.effective_follow_symlinks());
    if threads > 0 {
        builder.threads(threads);
    }

    let mut overrides = ignore::overrides::OverrideBuilder::new(root);
    for pattern in DEFAULT_IGNORES {
        let _ = overrides.add(&format!("!{pattern}/**"));
        let _ = overrides.add(&format!("!{pattern}"));
    }
    for pattern in &config.extra_ignore {
        let _ = overrides.add(&format!("!{pattern}"));
    }
    match overrides.build() {
        Ok(built) => {
            builder.overrides(built);
        }
        Err(e) => tracing::warn!(error = %e, "ignoring invalid scan override patterns"),
    }

    let (tx, rx) = channel::unbounded();
    builder.build_parallel().run(|| {
        let tx = tx.clone();
        let cancel = cancel.clone();
        Box::new(move |entry| {
            if cancel.is_cancelled() {
                return ignore::WalkState::Quit;
            }
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    tracing::debug!(error = %e, "skipping unreadable entry");
                    return ignore::WalkState::Continue;
                }
            };
            if !entry.file_type().is_some_and(|ft| ft.is_file()) || !is_source_file(entry.path()) {
                return ignore::WalkState::Continue;
            }
            let Ok(metadata) = entry.metadata() else {
                return ignore::WalkState::Continue;
            };
            let _ = tx.send(DiscoveredFile {
                path: entry.path().to_path_buf(),
                file_size: metadata.len(),
            });
            ignore::WalkState::Continue
        })
    });
    drop(tx);

    if cancel.is_cancelled() {
        return Err(ScanError::Cancelled);
    }
    let mut files: Vec<DiscoveredFile> = rx.into_iter().collect();
    files.sort_by(|a, b| a.path.cmp(&b.path));
    tracing::debug!(root = %root.display(), files = files.len(), "scan complete");
    Ok(files)
}

pub fn is_source_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| SOURCE_EXTENSIONS.iter().any(|s| ext.eq_ignore_ascii_case(s)))
}
