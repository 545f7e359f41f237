//! `textDocument/codeAction`: quick fixes for every phrase occurrence.
//!
//! Each match gets two independent actions - replace the phrase with the
//! configured replacement, or censor it with a same-length mask - each
//! expressed as a text edit scoped to exactly the matched range.

use serde_json::Value;
use std::collections::HashMap;

use super::{Capability, CapabilityError};
use crate::analysis::DocumentStore;
use crate::lsp::types::{CodeAction, CodeActionParams, TextEdit, WorkspaceEdit};
use crate::rpc::{self, Envelope, Request};

pub struct CodeActions;

impl Capability for CodeActions {
    fn handle(
        &self,
        store: &mut DocumentStore,
        msg: &Envelope,
    ) -> Result<Vec<Value>, CapabilityError> {
        let request: Request<CodeActionParams> = serde_json::from_str(&msg.body)?;
        let uri = request.params.text_document.uri;

        let rule = store.rule();
        let text = store.text(&uri);

        let mut actions = Vec::new();
        for found in rule.matches(text) {
            let replace_edit = TextEdit {
                range: found.range(),
                new_text: rule.replacement().to_string(),
            };
            actions.push(CodeAction {
                title: format!("Replace {} with {}", rule.phrase(), rule.replacement()),
                edit: WorkspaceEdit {
                    changes: HashMap::from([(uri.clone(), vec![replace_edit])]),
                },
            });

            let censor_edit = TextEdit {
                range: found.range(),
                new_text: rule.censor_text(),
            };
            actions.push(CodeAction {
                title: format!("Censor {}", rule.phrase()),
                edit: WorkspaceEdit {
                    changes: HashMap::from([(uri.clone(), vec![censor_edit])]),
                },
            });
        }

        Ok(vec![rpc::response(request.id, actions)?])
    }
}
