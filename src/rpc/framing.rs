//! Message framing layer
//!
//! Splits an unbounded byte stream into discrete protocol frames using
//! Content-Length headers:
//!
//! `Content-Length: <length>\r\n\r\n<content>`
//!
//! The splitter copes with partial reads and with several frames arriving
//! in a single read. A frame is emitted only once its declared byte count
//! is fully buffered, and it is emitted exactly once.

use crate::io::transport::Transport;
use std::collections::VecDeque;
use tracing::trace;

/// Header/body separator, exactly one blank line
pub(crate) const HEADER_DELIMITER: &[u8] = b"\r\n\r\n";

/// Header field carrying the decimal byte count of the body
const CONTENT_LENGTH: &str = "Content-Length:";

/// Maximum declared body size to prevent memory exhaustion
const MAX_FRAME_SIZE: usize = 16 * 1024 * 1024; // 16MB

/// Error types for message framing
#[derive(Debug, thiserror::Error)]
pub enum FramingError {
    #[error("Invalid frame header: {0}")]
    InvalidHeader(String),

    #[error("Invalid Content-Length value: {0}")]
    InvalidContentLength(String),

    #[error("Frame too large: {size} bytes (max: {max})")]
    FrameTooLarge { size: usize, max: usize },
}

impl FramingError {
    /// Whether the stream can be trusted after this error.
    ///
    /// A header we could not parse is skipped and scanning resumes at the
    /// next delimiter. An oversize declared length is fatal: the body
    /// length cannot be trusted, so there is no safe resynchronization
    /// point.
    pub fn is_fatal(&self) -> bool {
        matches!(self, FramingError::FrameTooLarge { .. })
    }
}

// ============================================================================
// Frame buffer - pure incremental splitter
// ============================================================================

/// Incremental frame splitter over an append-only byte buffer.
///
/// Feed bytes in with [`FrameBuffer::extend`] in whatever chunk sizes the
/// transport produces, then drain complete frames with
/// [`FrameBuffer::try_take_frame`].
#[derive(Debug, Default)]
pub struct FrameBuffer {
    buffer: Vec<u8>,
}

impl FrameBuffer {
    pub fn new() -> Self {
        Self { buffer: Vec::new() }
    }

    /// Append freshly read bytes
    pub fn extend(&mut self, bytes: &[u8]) {
        self.buffer.extend_from_slice(bytes);
    }

    /// Try to remove one complete frame (header and body) from the front
    /// of the buffer.
    ///
    /// Returns `Ok(None)` when more input is needed. On a recoverable
    /// header error the bytes through the offending delimiter are
    /// discarded so scanning resumes at the next frame boundary.
    pub fn try_take_frame(&mut self) -> Result<Option<Vec<u8>>, FramingError> {
        let Some(header_end) = find_delimiter(&self.buffer) else {
            return Ok(None);
        };
        let body_start = header_end + HEADER_DELIMITER.len();

        let content_length = match parse_content_length(&self.buffer[..header_end]) {
            Ok(length) => length,
            Err(err) => {
                if !err.is_fatal() {
                    self.buffer.drain(..body_start);
                }
                return Err(err);
            }
        };

        let frame_end = body_start + content_length;
        if self.buffer.len() < frame_end {
            trace!(
                "framing: incomplete frame - need {} more bytes",
                frame_end - self.buffer.len()
            );
            return Ok(None);
        }

        let frame: Vec<u8> = self.buffer.drain(..frame_end).collect();
        trace!("framing: parsed complete frame ({content_length} byte body)");
        Ok(Some(frame))
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}

fn find_delimiter(buffer: &[u8]) -> Option<usize> {
    buffer
        .windows(HEADER_DELIMITER.len())
        .position(|window| window == HEADER_DELIMITER)
}

/// Parse the Content-Length value out of a raw header section
fn parse_content_length(header: &[u8]) -> Result<usize, FramingError> {
    let header = std::str::from_utf8(header)
        .map_err(|_| FramingError::InvalidHeader("header is not valid UTF-8".to_string()))?;

    for line in header.split("\r\n") {
        if let Some(value) = line.strip_prefix(CONTENT_LENGTH) {
            let value = value.trim();
            let length = value
                .parse::<usize>()
                .map_err(|_| FramingError::InvalidContentLength(value.to_string()))?;

            if length > MAX_FRAME_SIZE {
                return Err(FramingError::FrameTooLarge {
                    size: length,
                    max: MAX_FRAME_SIZE,
                });
            }

            return Ok(length);
        }
    }

    Err(FramingError::InvalidHeader(
        "missing Content-Length header".to_string(),
    ))
}

// ============================================================================
// Frame stream - splitter bound to a transport
// ============================================================================

/// Error types for a transport-backed frame stream
#[derive(Debug, thiserror::Error)]
pub enum FrameStreamError<E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    #[error("Transport error: {0}")]
    Transport(E),

    #[error(transparent)]
    Framing(#[from] FramingError),
}

/// Pulls complete frames out of a transport.
///
/// Buffers partial reads and queues extra frames that arrive in the same
/// chunk, so callers always see whole frames in arrival order.
pub struct FrameStream<T: Transport> {
    transport: T,
    buffer: FrameBuffer,
    ready: VecDeque<Vec<u8>>,
}

impl<T: Transport> FrameStream<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            buffer: FrameBuffer::new(),
            ready: VecDeque::new(),
        }
    }

    /// Mutable access to the underlying transport, for writing replies
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Next complete frame, reading from the transport as needed.
    ///
    /// Recoverable framing errors are surfaced to the caller; a later call
    /// resumes at the next frame boundary.
    pub async fn next_frame(&mut self) -> Result<Vec<u8>, FrameStreamError<T::Error>> {
        loop {
            if let Some(frame) = self.ready.pop_front() {
                return Ok(frame);
            }

            self.drain_buffer()?;
            if let Some(frame) = self.ready.pop_front() {
                return Ok(frame);
            }

            let chunk = self
                .transport
                .receive()
                .await
                .map_err(FrameStreamError::Transport)?;
            self.buffer.extend(&chunk);
        }
    }

    fn drain_buffer(&mut self) -> Result<(), FramingError> {
        while let Some(frame) = self.buffer.try_take_frame()? {
            self.ready.push_back(frame);
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
