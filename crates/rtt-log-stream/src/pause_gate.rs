//! Pause gate
//!
//! Routes every ingested line either into the raw buffer (and on to the
//! filter stage) or, while paused, into a side buffer that is replayed in
//! order on resume.

use crate::line_buffer::LineBuffer;
use crate::types::LogLine;

/// Flow state of the gate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, strum::Display)]
pub enum GateState {
    #[default]
    Flowing,
    Paused,
}

/// Owns the raw buffer and the pause buffer
#[derive(Debug, Clone)]
pub struct PauseGate {
    state: GateState,
    raw: LineBuffer,
    paused: LineBuffer,
    /// Lines forwarded downstream but not yet taken by the controller
    forwarded: Vec<LogLine>,
    next_seq: u64,
    overflow_reported: bool,
}

impl PauseGate {
    /// Create a flowing gate. The bound applies to both buffers.
    pub fn new(max_lines: Option<usize>) -> Self {
        Self {
            state: GateState::Flowing,
            raw: LineBuffer::new(max_lines),
            paused: LineBuffer::new(max_lines),
            forwarded: Vec::new(),
            next_seq: 0,
            overflow_reported: false,
        }
    }

    /// Accept one line from the source
    pub fn ingest(&mut self, text: &str) {
        let line = LogLine::new(self.next_seq, text);
        self.next_seq += 1;

        match self.state {
            GateState::Flowing => self.admit(line),
            GateState::Paused => {
                if self.paused.push(line).is_some() && !self.overflow_reported {
                    log::warn!(
                        "Pause buffer full ({} lines), dropping oldest paused lines",
                        self.paused.len()
                    );
                    self.overflow_reported = true;
                }
            }
        }
    }

    /// Pause or resume. Returns false when already in the requested state.
    ///
    /// Resuming moves the whole pause buffer into the raw buffer and the
    /// downstream queue, oldest first.
    pub fn set_paused(&mut self, paused: bool) -> bool {
        let target = if paused {
            GateState::Paused
        } else {
            GateState::Flowing
        };
        if target == self.state {
            return false;
        }
        self.state = target;

        if target == GateState::Flowing {
            let buffered = self.paused.drain();
            log::debug!("Resuming, flushing {} paused lines", buffered.len());
            for line in buffered {
                self.admit(line);
            }
            self.overflow_reported = false;
        } else {
            log::debug!("Pausing at {} raw lines", self.raw.len());
        }
        true
    }

    /// Take everything forwarded since the last call
    pub fn take_forwarded(&mut self) -> Vec<LogLine> {
        std::mem::take(&mut self.forwarded)
    }

    /// Lines are waiting to be taken downstream
    pub fn has_forwarded(&self) -> bool {
        !self.forwarded.is_empty()
    }

    pub fn is_paused(&self) -> bool {
        self.state == GateState::Paused
    }

    /// All lines ingested while flowing (plus flushed ones), oldest first
    pub fn raw(&self) -> &LineBuffer {
        &self.raw
    }

    /// Number of lines currently held back by a pause
    pub fn paused_len(&self) -> usize {
        self.paused.len()
    }

    /// Empty every buffer and restart numbering. The flow state is kept.
    pub fn clear(&mut self) {
        self.raw.clear();
        self.paused.clear();
        self.forwarded.clear();
        self.next_seq = 0;
        self.overflow_reported = false;
    }

    fn admit(&mut self, line: LogLine) {
        self.raw.push(line.clone());
        self.forwarded.push(line);
    }
}
