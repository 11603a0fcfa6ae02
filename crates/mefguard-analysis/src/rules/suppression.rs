//! Inline suppression: `mefguard-ignore` comments and warning pragmas.

use mefguard_core::constants::SUPPRESSION_MARKER;
use rustc_hash::FxHashSet;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Rules {
    All,
    Only(FxHashSet<String>),
}

impl Rules {
    fn parse(list: &str) -> Self {
        let ids: FxHashSet<String> = list
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        if ids.is_empty() {
            Self::All
        } else {
            Self::Only(ids)
        }
    }

    fn covers(&self, rule_id: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(ids) => ids.contains(rule_id),
        }
    }
}

#[derive(Debug, Clone)]
enum Pragma {
    Disable(Rules),
    Restore(Rules),
}

/// Suppression facts for one source text.
///
/// Supports:
/// - `// mefguard-ignore` on the flagged line or the line above it
/// - `// mefguard-ignore RuleA, RuleB` limited to the listed rule ids
/// - `#pragma warning disable [ids]` up to a matching `#pragma warning restore`
#[derive(Debug, Clone, Default)]
pub struct SuppressionChecker {
    /// Per line (0-based): the rules an ignore comment on that line covers.
    ignores: Vec<Option<Rules>>,
    /// Pragmas in line order, with their 1-based line.
    pragmas: Vec<(u32, Pragma)>,
}

impl SuppressionChecker {
    pub fn new(source: &str) -> Self {
        let mut ignores = Vec::new();
        let mut pragmas = Vec::new();
        for (idx, line) in source.lines().enumerate() {
            ignores.push(parse_ignore(line));
            if let Some(pragma) = parse_pragma(line) {
                pragmas.push((idx as u32 + 1, pragma));
            }
        }
        Self { ignores, pragmas }
    }

    /// Whether a diagnostic of `rule_id` starting on `line` (1-based) is
    /// silenced.
    pub fn is_suppressed(&self, line: u32, rule_id: &str) -> bool {
        if line == 0 {
            return false;
        }
        let idx = (line - 1) as usize;
        let ignored_at = |i: usize| {
            self.ignores
                .get(i)
                .and_then(Option::as_ref)
                .is_some_and(|rules| rules.covers(rule_id))
        };
        if ignored_at(idx) || (idx > 0 && ignored_at(idx - 1)) {
            return true;
        }
        self.disabled_by_pragma(line, rule_id)
    }

    fn disabled_by_pragma(&self, line: u32, rule_id: &str) -> bool {
        let mut disabled = false;
        for (pragma_line, pragma) in &self.pragmas {
            if *pragma_line >= line {
                break;
            }
            match pragma {
                Pragma::Disable(rules) if rules.covers(rule_id) => disabled = true,
                Pragma::Restore(rules) if rules.covers(rule_id) => disabled = false,
                _ => {}
            }
        }
        disabled
    }
}

fn parse_ignore(line: &str) -> Option<Rules> {
    let pos = line.find(SUPPRESSION_MARKER)?;
    let before = &line[..pos];
    if !(before.contains("//") || before.contains("/*")) {
        return None;
    }
    let after = line[pos + SUPPRESSION_MARKER.len()..].trim();
    let after = after.trim_end_matches("*/").trim();
    Some(Rules::parse(after))
}

fn parse_pragma(line: &str) -> Option<Pragma> {
    let rest = line.trim_start().strip_prefix('#')?.trim_start();
    let rest = rest.strip_prefix("pragma")?.trim_start();
    let rest = rest.strip_prefix("warning")?.trim_start();
    // Trailing comments are not part of the id list.
    let rest = rest.split("//").next().unwrap_or_default();
    if let Some(ids) = rest.strip_prefix("disable") {
        Some(Pragma::Disable(Rules::parse(ids)))
    } else {
        rest.strip_prefix("restore")
            .map(|ids| Pragma::Restore(Rules::parse(ids)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ignore_requires_comment() {
        assert_eq!(parse_ignore("var s = \"mefguard-ignore\";"), None);
        assert_eq!(parse_ignore("// mefguard-ignore"), Some(Rules::All));
    }

    #[test]
    fn test_pragma_parsing() {
        assert!(matches!(
            parse_pragma("#pragma warning disable"),
            Some(Pragma::Disable(Rules::All))
        ));
        assert!(matches!(
            parse_pragma("  # pragma warning restore CS0168 // done"),
            Some(Pragma::Restore(Rules::Only(_)))
        ));
        assert!(parse_pragma("#pragma checksum \"x\"").is_none());
    }
}
