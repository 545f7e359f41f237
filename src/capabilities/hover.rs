//! `textDocument/hover`: a short description of the document under the
//! cursor. Unknown documents degrade to zero-length text.

use serde_json::Value;

use super::{Capability, CapabilityError};
use crate::analysis::DocumentStore;
use crate::lsp::types::{HoverResult, TextDocumentPositionParams};
use crate::rpc::{self, Envelope, Request};

pub struct Hover;

impl Capability for Hover {
    fn handle(
        &self,
        store: &mut DocumentStore,
        msg: &Envelope,
    ) -> Result<Vec<Value>, CapabilityError> {
        let request: Request<TextDocumentPositionParams> = serde_json::from_str(&msg.body)?;
        let uri = request.params.text_document.uri;
        let text = store.text(&uri);

        let result = HoverResult {
            contents: format!("File {}, Characters {}", uri, text.len()),
        };

        Ok(vec![rpc::response(request.id, result)?])
    }
}
