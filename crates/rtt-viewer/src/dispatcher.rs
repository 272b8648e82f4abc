//! Dispatcher for control messages
//!
//! Line sources and the UI loop never touch the stream controller directly.
//! They send [`ControlMessage`]s through a `Dispatcher`, and the UI loop drains
//! the channel once per frame, so every message is processed on one thread
//! and in arrival order.

use rtt_log_stream::ControlMessage;
use std::sync::mpsc::{self, Receiver, Sender};

/// Sending half of the control channel
#[derive(Clone)]
pub struct Dispatcher {
    message_tx: Sender<ControlMessage>,
}

impl Dispatcher {
    pub fn new(message_tx: Sender<ControlMessage>) -> Self {
        Self { message_tx }
    }

    /// Create a dispatcher and the receiver it feeds
    pub fn channel() -> (Self, Receiver<ControlMessage>) {
        let (tx, rx) = mpsc::channel();
        (Self::new(tx), rx)
    }

    /// Queue a message for the UI loop
    ///
    /// Returns false once the receiving side is gone.
    pub fn dispatch(&self, message: ControlMessage) -> bool {
        match self.message_tx.send(message) {
            Ok(()) => true,
            Err(e) => {
                log::error!("Dispatcher: failed to send message: {}", e);
                false
            }
        }
    }
}
