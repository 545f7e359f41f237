//! JSON-RPC 2.0 plumbing: framing, codec, envelope types, and builders
//! for outgoing messages.

pub mod codec;
pub mod framing;

pub use codec::{DecodeError, Envelope, decode, encode};
pub use framing::{FrameBuffer, FrameStream, FrameStreamError, FramingError};

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// JSON-RPC 2.0 version identifier
pub const JSONRPC_VERSION: &str = "2.0";

/// Typed request envelope, parsed per-method once routing has happened
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Request<P> {
    pub jsonrpc: String,
    pub id: i64,
    pub method: String,
    pub params: P,
}

/// Typed response envelope; `id` matches the triggering request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Response<R> {
    pub jsonrpc: String,
    pub id: i64,
    pub result: R,
}

/// Typed notification envelope; notifications have no id and no response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification<P> {
    pub jsonrpc: String,
    pub method: String,
    pub params: P,
}

/// Build a full response envelope for the request with this `id`
pub fn response<R: Serialize>(id: i64, result: R) -> Result<Value, serde_json::Error> {
    serde_json::to_value(Response {
        jsonrpc: JSONRPC_VERSION.to_string(),
        id,
        result,
    })
}

/// Build a full notification envelope
pub fn notification<P: Serialize>(method: &str, params: P) -> Result<Value, serde_json::Error> {
    serde_json::to_value(Notification {
        jsonrpc: JSONRPC_VERSION.to_string(),
        method: method.to_string(),
        params,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_echoes_id() {
        let value = response(7, "ok").unwrap();
        assert_eq!(value["id"], 7);
        assert_eq!(value["jsonrpc"], JSONRPC_VERSION);
        assert_eq!(value["result"], "ok");
    }

    #[test]
    fn notification_has_no_id() {
        let value = notification("textDocument/publishDiagnostics", Value::Null).unwrap();
        assert_eq!(value["method"], "textDocument/publishDiagnostics");
        assert!(value.get("id").is_none());
    }
}
