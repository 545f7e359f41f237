//! Capability handlers and the method dispatcher.
//!
//! Each protocol method the server supports is one [`Capability`]
//! implementation. The [`Dispatcher`] owns the registry from method name
//! to handler and nothing else; document state is threaded into every
//! call. Routing is an exact method-name match, and unknown methods are
//! ignored on purpose - unknown notifications are legal in this protocol
//! family.

pub mod code_action;
pub mod completion;
pub mod definition;
pub mod hover;
pub mod initialize;
pub mod lifecycle;
pub mod sync;

use serde_json::Value;
use std::collections::HashMap;
use tracing::{trace, warn};

use crate::analysis::DocumentStore;
use crate::lsp::methods;
use crate::rpc::Envelope;

/// Error types for capability handlers
#[derive(Debug, thiserror::Error)]
pub enum CapabilityError {
    #[error("malformed or unserializable payload: {0}")]
    Json(#[from] serde_json::Error),
}

/// One protocol method's behavior.
///
/// Handlers parse their own typed params out of the envelope body, may
/// read or mutate the document store, and return zero or more outgoing
/// messages (full JSON-RPC envelopes) to be framed and written in order.
pub trait Capability {
    fn handle(
        &self,
        store: &mut DocumentStore,
        msg: &Envelope,
    ) -> Result<Vec<Value>, CapabilityError>;
}

/// Routes decoded messages to the capability registered for their method
pub struct Dispatcher {
    handlers: HashMap<&'static str, Box<dyn Capability>>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// The standard capability set
    pub fn with_default_capabilities() -> Self {
        let mut dispatcher = Self::new();
        dispatcher.register(methods::INITIALIZE, Box::new(initialize::Initialize));
        dispatcher.register(methods::SHUTDOWN, Box::new(lifecycle::Shutdown));
        dispatcher.register(methods::DID_OPEN, Box::new(sync::DidOpen));
        dispatcher.register(methods::DID_CHANGE, Box::new(sync::DidChange));
        dispatcher.register(methods::HOVER, Box::new(hover::Hover));
        dispatcher.register(methods::DEFINITION, Box::new(definition::Definition));
        dispatcher.register(methods::CODE_ACTION, Box::new(code_action::CodeActions));
        dispatcher.register(methods::COMPLETION, Box::new(completion::Completion));
        dispatcher
    }

    pub fn register(&mut self, method: &'static str, handler: Box<dyn Capability>) {
        self.handlers.insert(method, handler);
    }

    /// Route one message.
    ///
    /// Unknown methods produce no output and no error. A handler failure
    /// (usually a malformed payload for a known method) is logged and the
    /// message is skipped; the loop never dies for one bad message.
    pub fn dispatch(&self, store: &mut DocumentStore, msg: &Envelope) -> Vec<Value> {
        let Some(handler) = self.handlers.get(msg.method.as_str()) else {
            trace!("ignoring unhandled method: {}", msg.method);
            return Vec::new();
        };

        match handler.handle(store, msg) {
            Ok(outgoing) => outgoing,
            Err(err) => {
                warn!("handler for {} failed: {err}", msg.method);
                Vec::new()
            }
        }
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::envelope;
    use serde_json::json;

    struct Echo;

    impl Capability for Echo {
        fn handle(
            &self,
            _store: &mut DocumentStore,
            msg: &Envelope,
        ) -> Result<Vec<Value>, CapabilityError> {
            Ok(vec![json!({"echo": msg.method})])
        }
    }

    #[test]
    fn routes_by_exact_method_name() {
        let mut dispatcher = Dispatcher::new();
        dispatcher.register("test/echo", Box::new(Echo));
        let mut store = DocumentStore::default();

        let outgoing = dispatcher.dispatch(&mut store, &envelope("test/echo", None, json!({})));
        assert_eq!(outgoing, vec![json!({"echo": "test/echo"})]);

        // prefix or case mismatch does not route
        let outgoing = dispatcher.dispatch(&mut store, &envelope("test/Echo", None, json!({})));
        assert!(outgoing.is_empty());
    }

    #[test]
    fn unknown_method_is_silently_ignored() {
        let dispatcher = Dispatcher::with_default_capabilities();
        let mut store = DocumentStore::default();

        let outgoing = dispatcher.dispatch(
            &mut store,
            &envelope("workspace/didChangeConfiguration", None, json!({})),
        );
        assert!(outgoing.is_empty());
    }

    #[test]
    fn handler_failure_is_swallowed() {
        let dispatcher = Dispatcher::with_default_capabilities();
        let mut store = DocumentStore::default();

        // known method, nonsense params
        let msg = envelope(methods::DID_OPEN, None, json!({"wrong": "shape"}));
        let outgoing = dispatcher.dispatch(&mut store, &msg);
        assert!(outgoing.is_empty());
    }
}
