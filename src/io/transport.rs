//! Transport layer - Pure byte-stream abstraction for message exchange
//!
//! The server talks to its client over an opaque byte stream. This module
//! provides the transport abstraction plus the production stdio
//! implementation and a scriptable mock for tests. Chunk boundaries carry
//! no meaning: a single `receive` may return part of a message, one
//! message, or several.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::io;
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt, BufReader, Stdin, Stdout};

/// Size of the read buffer for stdin reading operations
const READ_BUFFER_SIZE: usize = 4096;

/// Core transport trait for bidirectional byte exchange
#[async_trait]
pub trait Transport: Send {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Send raw bytes, fully flushed before returning
    async fn send(&mut self, bytes: &[u8]) -> Result<(), Self::Error>;

    /// Receive the next chunk of bytes from the peer
    async fn receive(&mut self) -> Result<Vec<u8>, Self::Error>;

    /// Close the transport
    async fn close(&mut self) -> Result<(), Self::Error>;

    /// Check if transport is still active
    fn is_connected(&self) -> bool;
}

// ============================================================================
// Stdio Transport Implementation
// ============================================================================

/// Error types for stdio transport
#[derive(Debug, thiserror::Error)]
pub enum StdioTransportError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Transport is disconnected")]
    Disconnected,
}

/// Transport over the process's own stdin/stdout.
///
/// Reads are sequential; a completed `send` means the bytes have been
/// flushed to stdout.
pub struct StdioTransport {
    stdin: BufReader<Stdin>,
    stdout: Stdout,
    connected: bool,
}

impl StdioTransport {
    pub fn new() -> Self {
        Self {
            stdin: BufReader::new(tokio::io::stdin()),
            stdout: tokio::io::stdout(),
            connected: true,
        }
    }
}

impl Default for StdioTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for StdioTransport {
    type Error = StdioTransportError;

    async fn send(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        if !self.connected {
            return Err(StdioTransportError::Disconnected);
        }

        self.stdout.write_all(bytes).await?;
        self.stdout.flush().await?;
        Ok(())
    }

    async fn receive(&mut self) -> Result<Vec<u8>, Self::Error> {
        if !self.connected {
            return Err(StdioTransportError::Disconnected);
        }

        let mut buffer = [0u8; READ_BUFFER_SIZE];
        let n = self.stdin.read(&mut buffer).await?;
        if n == 0 {
            // EOF: the client hung up
            self.connected = false;
            return Err(StdioTransportError::Disconnected);
        }

        Ok(buffer[..n].to_vec())
    }

    async fn close(&mut self) -> Result<(), Self::Error> {
        self.connected = false;
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.connected
    }
}

// ============================================================================
// Mock Transport Implementation
// ============================================================================

/// Error type for mock transport
#[derive(Debug, thiserror::Error)]
#[allow(dead_code)]
pub enum MockTransportError {
    #[error("Transport is disconnected")]
    Disconnected,
}

/// Mock transport for testing - scripted inbound chunks, recorded output.
///
/// Inbound chunks are returned one per `receive` call so tests control
/// exactly how bytes are split across reads. A drained script behaves
/// like a closed connection.
#[allow(dead_code)]
pub struct MockTransport {
    /// Frames that were sent via this transport
    sent: Arc<Mutex<Vec<Vec<u8>>>>,

    /// Scripted chunks returned by successive receive() calls
    chunks: VecDeque<Vec<u8>>,

    /// Connection status
    connected: bool,
}

#[allow(dead_code)]
impl MockTransport {
    pub fn new() -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
            chunks: VecDeque::new(),
            connected: true,
        }
    }

    /// Create a mock transport with scripted inbound chunks
    pub fn with_chunks(chunks: Vec<Vec<u8>>) -> Self {
        let mut transport = Self::new();
        transport.chunks.extend(chunks);
        transport
    }

    /// Queue one more inbound chunk
    pub fn push_chunk(&mut self, chunk: Vec<u8>) {
        self.chunks.push_back(chunk);
    }

    /// Shared handle to the sent-frame log, usable after the transport has
    /// been moved into a server
    pub fn sent_log(&self) -> Arc<Mutex<Vec<Vec<u8>>>> {
        Arc::clone(&self.sent)
    }

    /// All frames sent so far
    pub fn sent_frames(&self) -> Vec<Vec<u8>> {
        self.sent.lock().unwrap().clone()
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for MockTransport {
    type Error = MockTransportError;

    async fn send(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        if !self.connected {
            return Err(MockTransportError::Disconnected);
        }

        self.sent.lock().unwrap().push(bytes.to_vec());
        Ok(())
    }

    async fn receive(&mut self) -> Result<Vec<u8>, Self::Error> {
        if !self.connected {
            return Err(MockTransportError::Disconnected);
        }

        match self.chunks.pop_front() {
            Some(chunk) => Ok(chunk),
            None => {
                self.connected = false;
                Err(MockTransportError::Disconnected)
            }
        }
    }

    async fn close(&mut self) -> Result<(), Self::Error> {
        self.connected = false;
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.connected
    }
}

// ============================================================================
// Tests
// ============================================================================
