//! Shared helpers for unit tests.

use crate::rpc::Envelope;
use serde_json::Value;

/// Wrap a JSON body in its wire frame
pub fn frame(body: &str) -> Vec<u8> {
    format!("Content-Length: {}\r\n\r\n{}", body.len(), body).into_bytes()
}

/// Build a decoded envelope the way the codec would produce it
pub fn envelope(method: &str, id: Option<i64>, params: Value) -> Envelope {
    let mut msg = serde_json::json!({
        "jsonrpc": "2.0",
        "method": method,
        "params": params,
    });
    if let Some(id) = id {
        msg["id"] = serde_json::json!(id);
    }

    Envelope {
        method: method.to_string(),
        id,
        body: msg.to_string(),
    }
}
