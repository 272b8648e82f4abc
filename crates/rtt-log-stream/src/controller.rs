//! Stream controller
//!
//! Drives one processing cycle per call: lines go through the pause gate,
//! the filter and highlight timers are advanced, and the result is merged into
//! at most one render directive. The controller is single-threaded by
//! contract; callers serialize access (typically one consumer draining a
//! channel).

use crate::filter::FilterStage;
use crate::highlight::HighlightStage;
use crate::line_buffer::LineBuffer;
use crate::message::ControlMessage;
use crate::pause_gate::PauseGate;
use crate::sink::{render_directive, DisplaySink, SinkError};
use crate::types::{HighlightedLine, InputField, RenderDirective};
use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Longest quiet stretch after which an empty `process` still runs a cycle
pub const HEARTBEAT_INTERVAL: Duration = Duration::from_millis(500);

/// Construction options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreamOptions {
    /// Bound for the raw and pause buffers. `None` keeps every line.
    pub max_lines: Option<usize>,
}

/// Split a raw chunk into lines.
///
/// An empty chunk has no lines. A trailing newline ends the last line rather
/// than starting an empty one; empty lines between delimiters are kept.
pub fn split_chunk(chunk: &str) -> impl Iterator<Item = &str> {
    let body = chunk.strip_suffix('\n').unwrap_or(chunk);
    let has_lines = !chunk.is_empty();
    body.split('\n').filter(move |_| has_lines)
}

/// Owns every buffer of the pipeline
#[derive(Debug, Clone)]
pub struct LogStreamController {
    gate: PauseGate,
    filter: FilterStage,
    highlight: HighlightStage,
    last_cycle: Option<Instant>,
    /// Lines dropped from the window that no directive has reported yet
    evicted_since_emit: usize,
    /// Pending-edit flags last pushed to a sink, filter then highlight
    reported_pending: [bool; 2],
    /// A sink call failed; the next cycle redraws everything
    resync_due: bool,
}

impl Default for LogStreamController {
    fn default() -> Self {
        Self::new(StreamOptions::default())
    }
}

impl LogStreamController {
    pub fn new(options: StreamOptions) -> Self {
        Self {
            gate: PauseGate::new(options.max_lines),
            filter: FilterStage::new(),
            highlight: HighlightStage::new(),
            last_cycle: None,
            evicted_since_emit: 0,
            reported_pending: [false; 2],
            resync_due: false,
        }
    }

    /// Process a chunk at the current monotonic time
    pub fn process(&mut self, chunk: &str) -> Option<RenderDirective> {
        self.process_at(chunk, Instant::now())
    }

    /// Process a chunk at `now`.
    ///
    /// An empty chunk only runs a cycle when lines are waiting (after a
    /// resume), a filter or highlight edit has finished its quiet period, the
    /// display needs a redraw after a failed sink call, or the heartbeat
    /// interval has passed.
    pub fn process_at(&mut self, chunk: &str, now: Instant) -> Option<RenderDirective> {
        let mut ingested = 0usize;
        for line in split_chunk(chunk) {
            self.gate.ingest(line);
            ingested += 1;
        }

        let heartbeat_due = self
            .last_cycle
            .is_none_or(|last| now.saturating_duration_since(last) > HEARTBEAT_INTERVAL);
        let edit_due = self.filter.is_due(now) || self.highlight.is_due(now);
        if ingested == 0
            && !self.gate.has_forwarded()
            && !edit_due
            && !self.resync_due
            && !heartbeat_due
        {
            return None;
        }
        self.run_cycle(now)
    }

    /// Record the current filter text
    pub fn set_filter(&mut self, text: &str, now: Instant) {
        if self.filter.set_input(text, now) {
            log::debug!("Filter edit pending: {:?}", text);
        }
    }

    /// Record the current highlight text
    pub fn set_highlight(&mut self, text: &str, now: Instant) {
        if self.highlight.set_input(text, now) {
            log::debug!("Highlight edit pending: {:?}", text);
        }
    }

    /// Pause or resume the stream. Returns false for redundant transitions.
    ///
    /// Lines flushed by a resume are filtered and highlighted with the strings
    /// applied when the next cycle runs, not the ones applied at ingest time.
    pub fn set_paused(&mut self, paused: bool) -> bool {
        self.gate.set_paused(paused)
    }

    /// Dispatch one control message
    pub fn handle(&mut self, message: ControlMessage, now: Instant) -> Option<RenderDirective> {
        match message {
            ControlMessage::LineIngested(chunk) => self.process_at(&chunk, now),
            ControlMessage::FilterChanged(text) => {
                self.set_filter(&text, now);
                None
            }
            ControlMessage::HighlightChanged(text) => {
                self.set_highlight(&text, now);
                None
            }
            ControlMessage::PauseToggled(paused) => {
                if self.set_paused(paused) && !paused {
                    // Surface the flushed lines right away
                    self.process_at("", now)
                } else {
                    None
                }
            }
            ControlMessage::Clear => Some(self.clear()),
        }
    }

    /// Reset every buffer and both input strings.
    ///
    /// The pause state is left as commanded. Returns an empty `Replace`.
    pub fn clear(&mut self) -> RenderDirective {
        log::info!(
            "Clearing {} raw and {} paused lines",
            self.gate.raw().len(),
            self.gate.paused_len()
        );
        self.gate.clear();
        self.filter.reset();
        self.highlight.reset();
        self.last_cycle = None;
        self.evicted_since_emit = 0;
        self.resync_due = false;
        RenderDirective::replace(Vec::new())
    }

    /// Process a chunk and push the outcome to `sink`.
    ///
    /// Pending-edit changes of the input fields are reported first, then the
    /// directive (if any) is rendered. Returns whether a directive was rendered.
    ///
    /// When the sink fails the directive is lost, and the next cycle emits a
    /// `Replace` of the whole highlighted buffer instead of an `Append`.
    pub fn drive<S: DisplaySink + ?Sized>(
        &mut self,
        chunk: &str,
        now: Instant,
        sink: &mut S,
    ) -> Result<bool, SinkError> {
        let directive = self.process_at(chunk, now);
        self.present(directive, sink)
    }

    /// Dispatch a control message and push the outcome to `sink`
    pub fn dispatch<S: DisplaySink + ?Sized>(
        &mut self,
        message: ControlMessage,
        now: Instant,
        sink: &mut S,
    ) -> Result<bool, SinkError> {
        let directive = self.handle(message, now);
        self.present(directive, sink)
    }

    /// Clear and push the empty `Replace` to `sink`
    pub fn clear_into<S: DisplaySink + ?Sized>(&mut self, sink: &mut S) -> Result<(), SinkError> {
        let directive = self.clear();
        let result = self
            .report_input_fields(sink)
            .and_then(|()| render_directive(&directive, sink));
        self.note_sink_result(&result);
        result
    }

    /// Every line ingested while flowing (or flushed by a resume)
    pub fn raw_lines(&self) -> &LineBuffer {
        self.gate.raw()
    }

    /// Lines matching the applied filter
    pub fn filtered_lines(&self) -> &LineBuffer {
        self.filter.lines()
    }

    /// Filtered lines with their highlight flags
    pub fn highlighted_lines(&self) -> &VecDeque<HighlightedLine> {
        self.highlight.lines()
    }

    pub fn applied_filter(&self) -> &str {
        self.filter.applied()
    }

    pub fn applied_highlight(&self) -> &str {
        self.highlight.applied()
    }

    /// Whether an edit of `field` is waiting for its debounce period
    pub fn has_pending_edit(&self, field: InputField) -> bool {
        match field {
            InputField::Filter => self.filter.has_pending_edit(),
            InputField::Highlight => self.highlight.has_pending_edit(),
        }
    }

    pub fn is_paused(&self) -> bool {
        self.gate.is_paused()
    }

    /// Lines held back by the current pause
    pub fn paused_len(&self) -> usize {
        self.gate.paused_len()
    }

    fn run_cycle(&mut self, now: Instant) -> Option<RenderDirective> {
        self.last_cycle = Some(now);
        let mut batch = self.gate.take_forwarded();

        // Keep the derived buffers inside the raw window
        if let Some(first) = self.gate.raw().first_seq() {
            batch.retain(|line| line.seq >= first);
            let dropped = self.filter.trim_before(first);
            self.highlight.trim_front(dropped);
            self.evicted_since_emit += dropped;
        }

        let filter_full_recompute = self.filter.tick(now, self.gate.raw());
        let new_filtered = if filter_full_recompute {
            // The rebuild already covered this cycle's lines
            Vec::new()
        } else {
            self.filter.on_new_lines(&batch)
        };

        self.highlight.tick(now);
        let mut directive = self.highlight.on_new_filtered_lines(
            self.filter.lines(),
            &new_filtered,
            filter_full_recompute,
            self.evicted_since_emit,
        );
        if self.resync_due && !directive.as_ref().is_some_and(RenderDirective::is_replace) {
            log::debug!("Redrawing after a failed sink call");
            directive = Some(RenderDirective::replace(
                self.highlight.lines().iter().cloned().collect(),
            ));
        }
        self.resync_due = false;

        if let Some(directive) = &directive {
            self.evicted_since_emit = 0;
            log::debug!(
                "Cycle: {} raw, {} forwarded, {} emitted as {}",
                self.gate.raw().len(),
                batch.len(),
                directive.lines.len(),
                directive.mode
            );
        }
        directive
    }

    fn present<S: DisplaySink + ?Sized>(
        &mut self,
        directive: Option<RenderDirective>,
        sink: &mut S,
    ) -> Result<bool, SinkError> {
        let result = self.report_input_fields(sink).and_then(|()| match &directive {
            Some(directive) => render_directive(directive, sink).map(|()| true),
            None => Ok(false),
        });
        self.note_sink_result(&result);
        result
    }

    fn note_sink_result<T>(&mut self, result: &Result<T, SinkError>) {
        if let Err(e) = result {
            log::warn!("Display update failed, redrawing on the next cycle: {}", e);
            self.resync_due = true;
        }
    }

    fn report_input_fields<S: DisplaySink + ?Sized>(
        &mut self,
        sink: &mut S,
    ) -> Result<(), SinkError> {
        for (slot, field) in [InputField::Filter, InputField::Highlight].into_iter().enumerate() {
            let pending = self.has_pending_edit(field);
            if self.reported_pending[slot] != pending {
                sink.set_input_field_state(field, pending)?;
                self.reported_pending[slot] = pending;
            }
        }
        Ok(())
    }
}
