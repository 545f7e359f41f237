//! `initialize`: advertise what the server can do.

use serde_json::Value;
use tracing::info;

use super::{Capability, CapabilityError};
use crate::analysis::DocumentStore;
use crate::lsp::types::{
    CompletionOptions, InitializeParams, InitializeResult, ServerCapabilities, ServerInfo,
};
use crate::rpc::{self, Envelope, Request};

/// Sync kind 1: the client resends the whole document on every change
const FULL_DOCUMENT_SYNC: u8 = 1;

/// Pure function of client metadata to a capability advertisement; no
/// state access, always succeeds.
pub struct Initialize;

impl Capability for Initialize {
    fn handle(
        &self,
        _store: &mut DocumentStore,
        msg: &Envelope,
    ) -> Result<Vec<Value>, CapabilityError> {
        let request: Request<InitializeParams> = serde_json::from_str(&msg.body)?;

        if let Some(client) = &request.params.client_info {
            info!(
                "connected to: {} {}",
                client.name,
                client.version.as_deref().unwrap_or("unknown")
            );
        }

        let result = InitializeResult {
            capabilities: ServerCapabilities {
                text_document_sync: FULL_DOCUMENT_SYNC,
                hover_provider: true,
                definition_provider: true,
                code_action_provider: true,
                completion_provider: CompletionOptions::default(),
            },
            server_info: ServerInfo {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        };

        Ok(vec![rpc::response(request.id, result)?])
    }
}
