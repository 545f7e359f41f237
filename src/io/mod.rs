//! I/O primitives: the byte-stream transport the protocol runs over.

pub mod transport;
