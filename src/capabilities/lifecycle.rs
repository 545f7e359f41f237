//! `shutdown`: acknowledge and wait for the client's `exit` notification.
//!
//! `exit` itself is not a capability - the processing loop handles it
//! directly, since it must stop reading frames.

use serde_json::Value;
use tracing::debug;

use super::{Capability, CapabilityError};
use crate::analysis::DocumentStore;
use crate::rpc::{self, Envelope};

pub struct Shutdown;

impl Capability for Shutdown {
    fn handle(
        &self,
        _store: &mut DocumentStore,
        msg: &Envelope,
    ) -> Result<Vec<Value>, CapabilityError> {
        debug!("shutdown requested");

        // shutdown is a request; a client that sends it as a notification
        // gets no reply, which is all we could do anyway
        let Some(id) = msg.id else {
            return Ok(Vec::new());
        };

        Ok(vec![rpc::response(id, Value::Null)?])
    }
}
