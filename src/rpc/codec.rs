//! Encoding and decoding of framed JSON-RPC messages
//!
//! Decode takes one complete frame (header and body) and produces a
//! generic [`Envelope`]: the method name, the optional request id, and the
//! full JSON text for method-specific parsing downstream. Encode takes any
//! serializable message and produces the framed wire bytes, computing the
//! Content-Length on the encoded bytes rather than the character count.

use serde::{Deserialize, Serialize};

use super::framing::HEADER_DELIMITER;

/// Error types for message decoding
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("frame has no header/body delimiter")]
    MissingDelimiter,

    #[error("message body is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),

    #[error("message body is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("message has no method field")]
    MissingMethod,
}

/// A decoded inbound message.
///
/// `id` is present for requests and must be echoed verbatim in the
/// matching response; notifications carry no id. `body` keeps the whole
/// JSON text so each capability can parse its own typed params.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    pub method: String,
    pub id: Option<i64>,
    pub body: String,
}

impl Envelope {
    pub fn is_request(&self) -> bool {
        self.id.is_some()
    }
}

/// Minimal view of a message, just enough to route it
#[derive(Deserialize)]
struct EnvelopeProbe {
    // older clients of the original wire format sent the capitalized name
    #[serde(alias = "Method")]
    method: Option<String>,
    id: Option<i64>,
}

/// Decode one frame into a generic envelope
pub fn decode(frame: &[u8]) -> Result<Envelope, DecodeError> {
    let body_start = frame
        .windows(HEADER_DELIMITER.len())
        .position(|window| window == HEADER_DELIMITER)
        .map(|at| at + HEADER_DELIMITER.len())
        .ok_or(DecodeError::MissingDelimiter)?;

    let body = std::str::from_utf8(&frame[body_start..])?;
    let probe: EnvelopeProbe = serde_json::from_str(body)?;
    let method = probe.method.ok_or(DecodeError::MissingMethod)?;

    Ok(Envelope {
        method,
        id: probe.id,
        body: body.to_string(),
    })
}

/// Encode a message into framed wire bytes: `Content-Length: <N>\r\n\r\n<body>`
pub fn encode<T: Serialize>(msg: &T) -> Result<String, serde_json::Error> {
    let body = serde_json::to_string(msg)?;
    // String::len is a byte count, which is what the header wants
    Ok(format!("Content-Length: {}\r\n\r\n{}", body.len(), body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::frame;

    #[derive(Serialize)]
    struct EncodingExample {
        #[serde(rename = "Testing")]
        testing: bool,
    }

    #[test]
    fn encode_is_bit_exact() {
        let encoded = encode(&EncodingExample { testing: true }).unwrap();
        assert_eq!(encoded, "Content-Length: 16\r\n\r\n{\"Testing\":true}");
    }

    #[test]
    fn encode_counts_bytes_not_chars() {
        #[derive(Serialize)]
        struct Unicode {
            text: &'static str,
        }

        let encoded = encode(&Unicode { text: "héllo" }).unwrap();
        let body = r#"{"text":"héllo"}"#;
        assert_eq!(encoded, format!("Content-Length: {}\r\n\r\n{}", body.len(), body));
        assert!(body.len() > body.chars().count());
    }

    #[test]
    fn decode_extracts_method_and_payload() {
        let body = r#"{"Method":"hi"}"#;
        let envelope = decode(&frame(body)).unwrap();

        assert_eq!(envelope.method, "hi");
        assert_eq!(envelope.id, None);
        assert_eq!(envelope.body, body);
        assert_eq!(envelope.body.len(), 15);
        assert!(!envelope.is_request());
    }

    #[test]
    fn decode_keeps_request_id() {
        let envelope = decode(&frame(r#"{"method":"hover","id":7,"params":{}}"#)).unwrap();

        assert_eq!(envelope.method, "hover");
        assert_eq!(envelope.id, Some(7));
        assert!(envelope.is_request());
    }

    #[test]
    fn decode_rejects_missing_method() {
        let err = decode(&frame(r#"{"id":3,"result":null}"#)).unwrap_err();
        assert!(matches!(err, DecodeError::MissingMethod));
    }

    #[test]
    fn decode_rejects_invalid_json() {
        let err = decode(&frame("not json at all")).unwrap_err();
        assert!(matches!(err, DecodeError::InvalidJson(_)));
    }

    #[test]
    fn decode_rejects_missing_delimiter() {
        let err = decode(b"Content-Length: 2").unwrap_err();
        assert!(matches!(err, DecodeError::MissingDelimiter));
    }

    #[test]
    fn round_trip_recovers_canonical_body() {
        let msg = crate::rpc::Notification {
            jsonrpc: crate::rpc::JSONRPC_VERSION.to_string(),
            method: "textDocument/didOpen".to_string(),
            params: serde_json::json!({"textDocument": {"uri": "file:///a", "text": "hé"}}),
        };

        let canonical = serde_json::to_string(&msg).unwrap();
        let encoded = encode(&msg).unwrap();

        let mut buffer = crate::rpc::FrameBuffer::new();
        buffer.extend(encoded.as_bytes());
        let framed = buffer.try_take_frame().unwrap().unwrap();

        let envelope = decode(&framed).unwrap();
        assert_eq!(envelope.body, canonical);
        assert_eq!(envelope.method, "textDocument/didOpen");
    }
}
