//! Project driver: scan, parse, build the interface catalog, analyse and
//! optionally fix every unit.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use mefguard_core::config::MefGuardConfig;
use mefguard_core::errors::{ParseError, PipelineError, PipelineResult, ScanError};
use mefguard_core::traits::{Cancellable, CancellationToken};
use rayon::prelude::*;

use crate::fixes::CodeFixProvider;
use crate::parsers::{CSharpParser, LanguageParser, SourceUnit};
use crate::rules::{Diagnostic, RuleEngine};
use crate::scanner::{walk_directory, DiscoveredFile};
use crate::semantic::{InterfaceCatalog, SyntacticModel};

/// What to do after analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    Check,
    /// Apply fixes; `write` persists the new text to disk.
    Fix { write: bool },
}

/// Fixed text of one unit.
#[derive(Debug, Clone)]
pub struct FixedUnit {
    pub text: String,
    pub applied: usize,
    pub written: bool,
}

#[derive(Debug, Clone)]
pub struct UnitReport {
    pub path: PathBuf,
    /// Diagnostics before any fix.
    pub diagnostics: Vec<Diagnostic>,
    /// Diagnostics still active after fixing, `None` in check mode.
    pub remaining: Option<Vec<Diagnostic>>,
    pub fixed: Option<FixedUnit>,
}

#[derive(Debug, Clone, Default)]
pub struct ProjectReport {
    pub units: Vec<UnitReport>,
    pub files_scanned: usize,
    pub duration_ms: u64,
}

impl ProjectReport {
    pub fn diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.units.iter().flat_map(|u| &u.diagnostics)
    }

    /// Unsuppressed diagnostics left after the run: the remaining ones in fix
    /// mode, all of them in check mode.
    pub fn active_count(&self) -> usize {
        self.units
            .iter()
            .map(|u| {
                u.remaining
                    .as_ref()
                    .unwrap_or(&u.diagnostics)
                    .iter()
                    .filter(|d| !d.suppressed)
                    .count()
            })
            .sum()
    }

    pub fn fixes_applied(&self) -> usize {
        self.units
            .iter()
            .filter_map(|u| u.fixed.as_ref())
            .map(|f| f.applied)
            .sum()
    }
}

pub struct Pipeline {
    config: MefGuardConfig,
    parser: CSharpParser,
    cancel: CancellationToken,
}

impl Pipeline {
    pub fn new(config: MefGuardConfig) -> Self {
        Self {
            config,
            parser: CSharpParser::new(),
            cancel: CancellationToken::new(),
        }
    }

    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn config(&self) -> &MefGuardConfig {
        &self.config
    }

    /// Run over every C# file under `root`.
    pub fn run(
        &self,
        root: &Path,
        mode: RunMode,
    ) -> Result<PipelineResult<ProjectReport>, PipelineError> {
        let start = Instant::now();
        let files = walk_directory(root, &self.config.scan, &self.cancel)?;
        let mut result = PipelineResult::<ProjectReport>::default();

        let (units, parse_errors) = self.parse_files(&files);
        result.errors.extend(parse_errors);
        let stubs = self.parse_stubs(root, &mut result);

        if self.cancel.is_cancelled() {
            return Err(PipelineError::Cancelled);
        }

        let catalog = InterfaceCatalog::from_trees(
            units.iter().chain(stubs.iter()).map(|u| &u.tree),
        );
        tracing::info!(
            files = files.len(),
            interfaces = catalog.len(),
            "catalog built"
        );
        let model = SyntacticModel::new(Arc::new(catalog));
        let engine = RuleEngine::from_config(&self.config.analysis);
        let fixer = CodeFixProvider::from_config(&self.config);

        let outcomes: Vec<(UnitReport, Vec<PipelineError>)> = units
            .par_iter()
            .map(|unit| self.process_unit(unit, &engine, &model, &fixer, mode))
            .collect();

        for (report, errors) in outcomes {
            result.data.units.push(report);
            result.errors.extend(errors);
        }
        result.data.files_scanned = files.len();
        result.data.duration_ms = start.elapsed().as_millis() as u64;
        tracing::info!(
            files = files.len(),
            diagnostics = result.data.diagnostics().count(),
            errors = result.error_count(),
            "run complete"
        );
        Ok(result)
    }

    /// Parse discovered files in parallel. Unreadable or undecodable files
    /// become non-fatal errors.
    pub fn parse_files(&self, files: &[DiscoveredFile]) -> (Vec<SourceUnit>, Vec<PipelineError>) {
        let parsed: Vec<Result<SourceUnit, PipelineError>> = files
            .par_iter()
            .map(|file| self.parse_path(&file.path))
            .collect();
        let mut units = Vec::with_capacity(parsed.len());
        let mut errors = Vec::new();
        for item in parsed {
            match item {
                Ok(unit) => units.push(unit),
                Err(e) => {
                    tracing::warn!(error = %e, "skipping file");
                    errors.push(e);
                }
            }
        }
        (units, errors)
    }

    pub fn parse_path(&self, path: &Path) -> Result<SourceUnit, PipelineError> {
        let bytes = std::fs::read(path).map_err(|source| ScanError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let source = String::from_utf8(bytes).map_err(|e| ParseError::Encoding {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Ok(self.parser.parse(&source, path)?)
    }

    fn parse_stubs(
        &self,
        root: &Path,
        result: &mut PipelineResult<ProjectReport>,
    ) -> Vec<SourceUnit> {
        let base = if root.is_file() {
            root.parent().unwrap_or(root)
        } else {
            root
        };
        let mut stubs = Vec::new();
        for stub in &self.config.analysis.interface_stubs {
            match self.parse_path(&base.join(stub)) {
                Ok(unit) => stubs.push(unit),
                Err(e) => {
                    tracing::warn!(stub = %stub, error = %e, "interface stub not loaded");
                    result.add_error(e);
                }
            }
        }
        stubs
    }

    fn process_unit(
        &self,
        unit: &SourceUnit,
        engine: &RuleEngine,
        model: &SyntacticModel,
        fixer: &CodeFixProvider,
        mode: RunMode,
    ) -> (UnitReport, Vec<PipelineError>) {
        let analysis = engine.analyze_unit(unit, model);
        let mut errors: Vec<PipelineError> =
            analysis.errors.into_iter().map(PipelineError::from).collect();
        let mut report = UnitReport {
            path: unit.path.clone(),
            diagnostics: analysis.diagnostics,
            remaining: None,
            fixed: None,
        };

        let RunMode::Fix { write } = mode else {
            return (report, errors);
        };
        if report.diagnostics.iter().all(|d| d.suppressed) {
            report.remaining = Some(report.diagnostics.clone());
            return (report, errors);
        }

        let mut outcome = fixer.fix_all(unit, engine, model, &self.cancel);
        let file = unit.file_name();
        errors.extend(
            std::mem::take(&mut outcome.failures)
                .into_iter()
                .map(|source| PipelineError::Rewrite {
                    file: file.clone(),
                    source,
                }),
        );
        if outcome.cancelled {
            errors.push(PipelineError::Cancelled);
        }
        let fixed_unit = unit.with_tree(outcome.tree.clone());
        report.remaining = Some(engine.analyze_unit(&fixed_unit, model).diagnostics);

        if outcome.changed() {
            let text = outcome.tree.text();
            let mut written = false;
            if write {
                match std::fs::write(&unit.path, &text) {
                    Ok(()) => written = true,
                    Err(source) => errors.push(
                        ScanError::Io {
                            path: unit.path.clone(),
                            source,
                        }
                        .into(),
                    ),
                }
            }
            report.fixed = Some(FixedUnit {
                text,
                applied: outcome.applied,
                written,
            });
        }
        (report, errors)
    }
}
