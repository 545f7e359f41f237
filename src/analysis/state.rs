//! In-memory document state.
//!
//! The store is the only state that survives between messages. It has a
//! single owner (the dispatch loop), so there is no locking: one writer,
//! one reader, same thread.

use std::collections::HashMap;
use tracing::debug;

use super::phrase::PhraseRule;
use crate::lsp::types::Diagnostic;

/// The server's cached copy of one client-edited buffer
#[derive(Debug, Clone, Default)]
pub struct Document {
    pub text: String,
}

/// Mapping from uri to current document text, plus the active rule
#[derive(Debug)]
pub struct DocumentStore {
    documents: HashMap<String, Document>,
    rule: PhraseRule,
}

impl DocumentStore {
    pub fn new(rule: PhraseRule) -> Self {
        Self {
            documents: HashMap::new(),
            rule,
        }
    }

    pub fn rule(&self) -> &PhraseRule {
        &self.rule
    }

    /// Insert or overwrite a document, returning diagnostics for the new
    /// text
    pub fn open(&mut self, uri: &str, text: String) -> Vec<Diagnostic> {
        let diagnostics = self.rule.diagnostics(&text);
        self.documents.insert(uri.to_string(), Document { text });
        diagnostics
    }

    /// Replace the text of a known document (whole-document sync).
    ///
    /// Updating a uri that was never opened is a deliberate no-op that
    /// reports no diagnostics, not an error.
    pub fn update(&mut self, uri: &str, text: String) -> Vec<Diagnostic> {
        match self.documents.get_mut(uri) {
            Some(document) => {
                document.text = text;
                self.rule.diagnostics(&document.text)
            }
            None => {
                debug!("update for unopened document: {uri}");
                Vec::new()
            }
        }
    }

    /// Current text, or the empty string for an unknown uri
    pub fn text(&self, uri: &str) -> &str {
        self.documents
            .get(uri)
            .map(|document| document.text.as_str())
            .unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl Default for DocumentStore {
    fn default() -> Self {
        Self::new(PhraseRule::default())
    }
}
