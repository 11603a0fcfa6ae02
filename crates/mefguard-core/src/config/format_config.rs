//! Layout of synthesized code.

use serde::{Deserialize, Serialize};

/// End-of-line policy for normalized code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EndOfLine {
    /// `\r\n` if the source contains one, else `\n`.
    #[default]
    Auto,
    Lf,
    CrLf,
}

impl EndOfLine {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "auto" => Some(Self::Auto),
            "lf" => Some(Self::Lf),
            "crlf" => Some(Self::CrLf),
            _ => None,
        }
    }

    /// Resolve against a concrete source text.
    pub fn resolve(self, source: &str) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::CrLf => "\r\n",
            Self::Auto if source.contains("\r\n") => "\r\n",
            Self::Auto => "\n",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FormatConfig {
    /// Spaces per indentation level. Default: 4.
    pub indent_size: Option<usize>,
    /// Indent with tabs instead of spaces. Default: false.
    pub use_tabs: Option<bool>,
    /// `auto`, `lf` or `crlf`. Default: `auto`.
    pub end_of_line: Option<String>,
}

impl FormatConfig {
    pub fn effective_indent_size(&self) -> usize {
        self.indent_size.unwrap_or(4)
    }

    pub fn effective_use_tabs(&self) -> bool {
        self.use_tabs.unwrap_or(false)
    }

    /// One indentation level as text.
    pub fn indent_unit(&self) -> String {
        if self.effective_use_tabs() {
            "\t".to_string()
        } else {
            " ".repeat(self.effective_indent_size())
        }
    }

    pub fn effective_end_of_line(&self) -> EndOfLine {
        self.end_of_line
            .as_deref()
            .and_then(EndOfLine::parse)
            .unwrap_or_default()
    }
}
