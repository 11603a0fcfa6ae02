//! Console reporter: one `file:line:col: severity rule: message` line per
//! diagnostic.

use super::Reporter;
use crate::rules::{Diagnostic, Severity};

pub struct ConsoleReporter {
    pub use_color: bool,
}

impl ConsoleReporter {
    pub fn new(use_color: bool) -> Self {
        Self { use_color }
    }

    fn color_start(&self, severity: Severity) -> &'static str {
        if !self.use_color {
            return "";
        }
        match severity {
            Severity::Error => "\x1b[31m",
            Severity::Warning => "\x1b[33m",
            Severity::Info => "\x1b[36m",
            Severity::Hint => "\x1b[90m",
        }
    }

    fn color_end(&self) -> &'static str {
        if self.use_color {
            "\x1b[0m"
        } else {
            ""
        }
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Reporter for ConsoleReporter {
    fn name(&self) -> &'static str {
        "console"
    }

    fn generate(&self, diagnostics: &[Diagnostic]) -> Result<String, String> {
        let mut output = String::new();
        for d in diagnostics {
            let suppressed_tag = if d.suppressed { " [suppressed]" } else { "" };
            output.push_str(&format!(
                "{}:{}:{}: {}{}{} {}: {}{}\n",
                d.location.file,
                d.location.line,
                d.location.column,
                self.color_start(d.severity),
                d.severity,
                self.color_end(),
                d.rule_id,
                d.message,
                suppressed_tag,
            ));
        }

        let suppressed = diagnostics.iter().filter(|d| d.suppressed).count();
        let active = diagnostics.len() - suppressed;
        output.push_str(&format!(
            "{active} diagnostic(s), {suppressed} suppressed\n"
        ));
        Ok(output)
    }
}
