//! `textDocument/completion`: a static suggestion list, no state access.

use serde_json::Value;

use super::{Capability, CapabilityError};
use crate::analysis::DocumentStore;
use crate::lsp::types::{CompletionItem, CompletionParams};
use crate::rpc::{self, Envelope, Request};

pub struct Completion;

impl Capability for Completion {
    fn handle(
        &self,
        _store: &mut DocumentStore,
        msg: &Envelope,
    ) -> Result<Vec<Value>, CapabilityError> {
        let request: Request<CompletionParams> = serde_json::from_str(&msg.body)?;

        let items = vec![CompletionItem {
            label: "Neovim (BTW)".to_string(),
            detail: "Very Cool Editor".to_string(),
            documentation: "For people who like to type `:wq`".to_string(),
        }];

        Ok(vec![rpc::response(request.id, items)?])
    }
}
