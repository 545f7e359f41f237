//! The sequential message-processing loop.
//!
//! Frames are processed strictly in arrival order: read one frame, decode,
//! dispatch, write every outgoing message fully, then read the next frame.
//! The only place the loop suspends is waiting for more input bytes, so
//! response order always matches request order and the document store
//! needs no locking.

use tracing::{debug, error, info, warn};

use crate::analysis::DocumentStore;
use crate::capabilities::Dispatcher;
use crate::io::transport::Transport;
use crate::lsp::methods;
use crate::rpc::{self, FrameStream, FrameStreamError, FramingError};

pub struct Server<T: Transport> {
    frames: FrameStream<T>,
    dispatcher: Dispatcher,
    store: DocumentStore,
}

impl<T: Transport> Server<T> {
    pub fn new(transport: T, dispatcher: Dispatcher, store: DocumentStore) -> Self {
        Self {
            frames: FrameStream::new(transport),
            dispatcher,
            store,
        }
    }

    /// Process messages until the client exits or the transport closes.
    ///
    /// A single malformed message is logged and skipped; only an
    /// unrecoverable framing error aborts the loop with an error.
    pub async fn run(&mut self) -> Result<(), FramingError> {
        loop {
            let frame = match self.frames.next_frame().await {
                Ok(frame) => frame,
                Err(FrameStreamError::Transport(err)) => {
                    debug!("transport closed: {err}");
                    return Ok(());
                }
                Err(FrameStreamError::Framing(err)) if err.is_fatal() => {
                    error!("unrecoverable framing error: {err}");
                    return Err(err);
                }
                Err(FrameStreamError::Framing(err)) => {
                    warn!("skipping malformed frame: {err}");
                    continue;
                }
            };

            let msg = match rpc::decode(&frame) {
                Ok(msg) => msg,
                Err(err) => {
                    warn!("skipping undecodable message: {err}");
                    continue;
                }
            };

            debug!("received message: {}", msg.method);

            if msg.method == methods::EXIT {
                info!("client requested exit");
                if let Err(err) = self.frames.transport_mut().close().await {
                    warn!("error closing transport: {err}");
                }
                return Ok(());
            }

            for message in self.dispatcher.dispatch(&mut self.store, &msg) {
                let framed = match rpc::encode(&message) {
                    Ok(framed) => framed,
                    Err(err) => {
                        error!("failed to encode outgoing message: {err}");
                        continue;
                    }
                };

                if let Err(err) = self.frames.transport_mut().send(framed.as_bytes()).await {
                    error!("failed to write outgoing message: {err}");
                    return Ok(());
                }
            }
        }
    }
}
