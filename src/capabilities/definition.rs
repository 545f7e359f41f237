//! `textDocument/definition`: a deterministic placeholder target.
//!
//! The server does no symbol resolution; the contract only asks for a
//! well-formed, deterministic location. We point at column 0 of the line
//! above the cursor, clamped at the top of the file.

use serde_json::Value;

use super::{Capability, CapabilityError};
use crate::analysis::DocumentStore;
use crate::lsp::types::{Location, Range, TextDocumentPositionParams};
use crate::rpc::{self, Envelope, Request};

pub struct Definition;

impl Capability for Definition {
    fn handle(
        &self,
        _store: &mut DocumentStore,
        msg: &Envelope,
    ) -> Result<Vec<Value>, CapabilityError> {
        let request: Request<TextDocumentPositionParams> = serde_json::from_str(&msg.body)?;
        let params = request.params;

        let line = params.position.line.saturating_sub(1);
        let result = Location {
            uri: params.text_document.uri,
            range: Range::on_line(line, 0, 0),
        };

        Ok(vec![rpc::response(request.id, result)?])
    }
}
