//! `textDocument/didOpen` / `textDocument/didChange`: whole-document sync.
//!
//! Both are notifications, so neither produces a response. Each one does
//! push a `textDocument/publishDiagnostics` notification with diagnostics
//! recomputed from the new text.

use serde_json::Value;
use tracing::debug;

use super::{Capability, CapabilityError};
use crate::analysis::DocumentStore;
use crate::lsp::methods;
use crate::lsp::types::{
    DidChangeTextDocumentParams, DidOpenTextDocumentParams, PublishDiagnosticsParams,
};
use crate::rpc::{self, Envelope, Notification};

pub struct DidOpen;

impl Capability for DidOpen {
    fn handle(
        &self,
        store: &mut DocumentStore,
        msg: &Envelope,
    ) -> Result<Vec<Value>, CapabilityError> {
        let notification: Notification<DidOpenTextDocumentParams> =
            serde_json::from_str(&msg.body)?;
        let document = notification.params.text_document;
        debug!("opened document: {}", document.uri);

        let diagnostics = store.open(&document.uri, document.text);

        Ok(vec![rpc::notification(
            methods::PUBLISH_DIAGNOSTICS,
            PublishDiagnosticsParams {
                uri: document.uri,
                diagnostics,
            },
        )?])
    }
}

pub struct DidChange;

impl Capability for DidChange {
    fn handle(
        &self,
        store: &mut DocumentStore,
        msg: &Envelope,
    ) -> Result<Vec<Value>, CapabilityError> {
        let notification: Notification<DidChangeTextDocumentParams> =
            serde_json::from_str(&msg.body)?;
        let DidChangeTextDocumentParams {
            text_document,
            content_changes,
        } = notification.params;
        debug!("changed document: {}", text_document.uri);

        // whole-document sync: every change event carries the full text,
        // and each one gets its own publish
        let mut outgoing = Vec::new();
        for change in content_changes {
            let diagnostics = store.update(&text_document.uri, change.text);
            outgoing.push(rpc::notification(
                methods::PUBLISH_DIAGNOSTICS,
                PublishDiagnosticsParams {
                    uri: text_document.uri.clone(),
                    diagnostics,
                },
            )?);
        }

        Ok(outgoing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::envelope;
    use serde_json::json;

    #[test]
    fn did_open_publishes_diagnostics() {
        let mut store = DocumentStore::default();
        let msg = envelope(
            methods::DID_OPEN,
            None,
            json!({"textDocument": {
                "uri": "file:///a.txt",
                "languageId": "text",
                "version": 1,
                "text": "has VS Code here"
            }}),
        );

        let outgoing = DidOpen.handle(&mut store, &msg).unwrap();
        assert_eq!(outgoing.len(), 1);

        let published = &outgoing[0];
        assert_eq!(published["method"], methods::PUBLISH_DIAGNOSTICS);
        assert!(published.get("id").is_none());
        assert_eq!(published["params"]["uri"], "file:///a.txt");

        let diagnostics = published["params"]["diagnostics"].as_array().unwrap();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0]["range"]["start"]["character"], 4);
        assert_eq!(diagnostics[0]["range"]["end"]["character"], 11);
        assert_eq!(diagnostics[0]["range"]["start"]["line"], 0);

        assert_eq!(store.text("file:///a.txt"), "has VS Code here");
    }

    #[test]
    fn did_change_publishes_per_change_in_order() {
        let mut store = DocumentStore::default();
        store.open("file:///a.txt", "start".to_string());

        let msg = envelope(
            methods::DID_CHANGE,
            None,
            json!({
                "textDocument": {"uri": "file:///a.txt", "version": 2},
                "contentChanges": [
                    {"text": "now VS Code"},
                    {"text": "clean again"}
                ]
            }),
        );

        let outgoing = DidChange.handle(&mut store, &msg).unwrap();
        assert_eq!(outgoing.len(), 2);
        assert_eq!(
            outgoing[0]["params"]["diagnostics"].as_array().unwrap().len(),
            1
        );
        assert!(
            outgoing[1]["params"]["diagnostics"].as_array().unwrap().is_empty()
        );

        // last write wins
        assert_eq!(store.text("file:///a.txt"), "clean again");
    }

    #[test]
    fn did_change_unknown_uri_publishes_empty_diagnostics() {
        let mut store = DocumentStore::default();

        let msg = envelope(
            methods::DID_CHANGE,
            None,
            json!({
                "textDocument": {"uri": "file:///never-opened", "version": 1},
                "contentChanges": [{"text": "VS Code everywhere"}]
            }),
        );

        let outgoing = DidChange.handle(&mut store, &msg).unwrap();
        assert_eq!(outgoing.len(), 1);
        assert!(
            outgoing[0]["params"]["diagnostics"].as_array().unwrap().is_empty()
        );
        assert!(store.is_empty());
    }
}
