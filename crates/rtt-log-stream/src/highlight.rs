//! Highlight stage
//!
//! Mirrors the filtered buffer 1:1 with highlight flags and decides whether
//! the display can be extended (`Append`) or must be redrawn (`Replace`).
//! Replace happens only when the filter stage rebuilt its buffer or the
//! debounced highlight string changed; every other cycle with new lines is
//! an append of just those lines.

use crate::debounce::DebouncedInput;
use crate::filter::contains_folded;
use crate::line_buffer::LineBuffer;
use crate::types::{HighlightedLine, LogLine, RenderDirective};
use std::collections::VecDeque;
use std::time::Instant;

/// Debounced highlight string and the highlighted mirror of the filtered buffer
#[derive(Debug, Clone, Default)]
pub struct HighlightStage {
    input: DebouncedInput,
    /// Lower-cased applied string
    needle: String,
    lines: VecDeque<HighlightedLine>,
    /// The applied string changed since the last update
    recompute_due: bool,
}

impl HighlightStage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the current highlight text, restarting the debounce timer on change
    pub fn set_input(&mut self, text: &str, now: Instant) -> bool {
        self.input.set(text, now)
    }

    /// Advance the debounce timer. Returns true when the applied string changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        if !self.input.poll(now) {
            return false;
        }
        self.needle = self.input.applied().to_lowercase();
        self.recompute_due = true;
        log::debug!("Highlight applied {:?}", self.input.applied());
        true
    }

    /// Bring the highlighted buffer up to date with the filter stage output.
    ///
    /// `filtered` is the complete filtered buffer, `batch` the lines the
    /// filter stage appended this cycle and `evicted` the number of leading
    /// lines dropped from both buffers since the last directive.
    pub fn on_new_filtered_lines(
        &mut self,
        filtered: &LineBuffer,
        batch: &[LogLine],
        filter_full_recompute: bool,
        evicted: usize,
    ) -> Option<RenderDirective> {
        if filter_full_recompute || self.recompute_due {
            self.recompute_due = false;
            self.lines = filtered.iter().map(|line| self.annotate(line)).collect();
            log::debug!(
                "Highlight replace: {} lines (filter recompute: {})",
                self.lines.len(),
                filter_full_recompute
            );
            return Some(RenderDirective::replace(self.lines.iter().cloned().collect()));
        }

        if batch.is_empty() && evicted == 0 {
            return None;
        }

        let appended: Vec<HighlightedLine> = batch.iter().map(|line| self.annotate(line)).collect();
        self.lines.extend(appended.iter().cloned());
        Some(RenderDirective::append(appended, evicted))
    }

    /// Whether a line contains the applied highlight string.
    /// The empty highlight marks nothing.
    pub fn highlights(&self, line: &LogLine) -> bool {
        !self.needle.is_empty() && contains_folded(line.as_str(), &self.needle)
    }

    /// Drop leading lines, keeping the mirror aligned with the filtered buffer
    pub fn trim_front(&mut self, count: usize) {
        let count = count.min(self.lines.len());
        self.lines.drain(..count);
    }

    /// Highlighted mirror of the filtered buffer
    pub fn lines(&self) -> &VecDeque<HighlightedLine> {
        &self.lines
    }

    pub fn applied(&self) -> &str {
        self.input.applied()
    }

    /// The next `tick` at `now` would apply an edit
    pub fn is_due(&self, now: Instant) -> bool {
        self.input.is_due(now)
    }

    pub fn has_pending_edit(&self) -> bool {
        self.input.has_pending_edit()
    }

    /// Forget both strings and every highlighted line
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn annotate(&self, line: &LogLine) -> HighlightedLine {
        HighlightedLine::new(line, self.highlights(line))
    }
}
