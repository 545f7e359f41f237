//! The phrase rule: the diagnostic policy the server ships with.
//!
//! Scans document text line by line for a configured phrase and reports
//! one diagnostic per occurrence. The rule is deliberately dumb - the
//! dispatch layer only cares about "text in, ordered diagnostics out", so
//! swapping in a smarter rule touches nothing else.

use crate::lsp::types::{Diagnostic, DiagnosticSeverity, Range};

/// Source tag attached to every diagnostic this rule produces
pub const DIAGNOSTIC_SOURCE: &str = "wordwatch";

/// One occurrence of the phrase. Columns are byte offsets into the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhraseMatch {
    pub line: u32,
    pub start: u32,
    pub end: u32,
}

impl PhraseMatch {
    pub fn range(&self) -> Range {
        Range::on_line(self.line, self.start, self.end)
    }
}

/// Flags occurrences of a single phrase and knows what to offer instead
#[derive(Debug, Clone)]
pub struct PhraseRule {
    phrase: String,
    replacement: String,
}

impl PhraseRule {
    pub fn new(phrase: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            phrase: phrase.into(),
            replacement: replacement.into(),
        }
    }

    pub fn phrase(&self) -> &str {
        &self.phrase
    }

    pub fn replacement(&self) -> &str {
        &self.replacement
    }

    /// A mask of the same length as the phrase, for the censor action
    pub fn censor_text(&self) -> String {
        "*".repeat(self.phrase.len())
    }

    /// Every occurrence, in line order and left to right within a line
    pub fn matches(&self, text: &str) -> Vec<PhraseMatch> {
        if self.phrase.is_empty() {
            return Vec::new();
        }

        let mut found = Vec::new();
        for (line_number, line) in text.split('\n').enumerate() {
            for (start, matched) in line.match_indices(self.phrase.as_str()) {
                found.push(PhraseMatch {
                    line: line_number as u32,
                    start: start as u32,
                    end: (start + matched.len()) as u32,
                });
            }
        }
        found
    }

    /// One diagnostic per occurrence, spanning exactly the matched columns
    pub fn diagnostics(&self, text: &str) -> Vec<Diagnostic> {
        self.matches(text)
            .into_iter()
            .map(|found| Diagnostic {
                range: found.range(),
                severity: DiagnosticSeverity::Error,
                source: DIAGNOSTIC_SOURCE.to_string(),
                message: format!("{} is not allowed", self.phrase),
            })
            .collect()
    }
}

impl Default for PhraseRule {
    fn default() -> Self {
        Self::new("VS Code", "Neovim")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_match_exact_columns() {
        let rule = PhraseRule::default();
        let diagnostics = rule.diagnostics("has VS Code here");

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].range, Range::on_line(0, 4, 11));
        assert_eq!(diagnostics[0].severity, DiagnosticSeverity::Error);
        assert_eq!(diagnostics[0].source, DIAGNOSTIC_SOURCE);
        assert_eq!(diagnostics[0].message, "VS Code is not allowed");
    }

    #[test]
    fn matches_come_out_in_document_order() {
        let rule = PhraseRule::default();
        let text = "first VS Code\nclean line\nVS Code and VS Code again";

        let matches = rule.matches(text);
        assert_eq!(
            matches,
            vec![
                PhraseMatch {
                    line: 0,
                    start: 6,
                    end: 13
                },
                PhraseMatch {
                    line: 2,
                    start: 0,
                    end: 7
                },
                PhraseMatch {
                    line: 2,
                    start: 12,
                    end: 19
                },
            ]
        );
    }

    #[test]
    fn every_occurrence_yields_a_diagnostic() {
        let rule = PhraseRule::default();
        let text = "VS Code\nVS Code\nVS Code";

        assert_eq!(rule.diagnostics(text).len(), 3);
    }

    #[test]
    fn clean_text_yields_nothing() {
        let rule = PhraseRule::default();
        assert!(rule.diagnostics("nothing to see\nhere").is_empty());
        assert!(rule.diagnostics("").is_empty());
    }

    #[test]
    fn empty_phrase_never_matches() {
        let rule = PhraseRule::new("", "x");
        assert!(rule.matches("anything").is_empty());
    }

    #[test]
    fn configured_phrase_and_censor_mask() {
        let rule = PhraseRule::new("TODO", "DONE");
        assert_eq!(rule.phrase(), "TODO");
        assert_eq!(rule.replacement(), "DONE");
        assert_eq!(rule.censor_text(), "****");

        let matches = rule.matches("a TODO b TODO");
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[1].start, 9);
        assert_eq!(matches[1].end, 13);
    }
}
