//! Filter stage
//!
//! Keeps the lines of the raw buffer that contain the applied filter string,
//! compared case-insensitively. The filtered buffer is extended line by line
//! and only rebuilt from scratch when the applied string changes.

use crate::debounce::DebouncedInput;
use crate::line_buffer::LineBuffer;
use crate::types::LogLine;
use std::time::Instant;

/// Case-insensitive substring test against an already lower-cased needle
pub(crate) fn contains_folded(text: &str, folded_needle: &str) -> bool {
    text.to_lowercase().contains(folded_needle)
}

/// Debounced filter string and the lines matching it
#[derive(Debug, Clone, Default)]
pub struct FilterStage {
    input: DebouncedInput,
    /// Lower-cased applied string
    needle: String,
    lines: LineBuffer,
}

impl FilterStage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the current filter text, restarting the debounce timer on change
    pub fn set_input(&mut self, text: &str, now: Instant) -> bool {
        self.input.set(text, now)
    }

    /// Apply a debounced change and rebuild against the whole raw buffer.
    ///
    /// Returns true when a full recompute happened.
    pub fn tick(&mut self, now: Instant, raw: &LineBuffer) -> bool {
        if !self.input.poll(now) {
            return false;
        }
        self.needle = self.input.applied().to_lowercase();
        self.lines.clear();
        let matching: Vec<LogLine> = raw.iter().filter(|l| self.matches(l)).cloned().collect();
        self.lines.extend(matching);
        log::debug!(
            "Filter applied {:?}: {} of {} lines match",
            self.input.applied(),
            self.lines.len(),
            raw.len()
        );
        true
    }

    /// Filter newly arrived lines, append the matches and return them
    pub fn on_new_lines(&mut self, batch: &[LogLine]) -> Vec<LogLine> {
        let matching: Vec<LogLine> = batch.iter().filter(|l| self.matches(l)).cloned().collect();
        self.lines.extend(matching.iter().cloned());
        matching
    }

    /// Whether a line passes the applied filter. The empty filter passes all.
    pub fn matches(&self, line: &LogLine) -> bool {
        self.needle.is_empty() || contains_folded(line.as_str(), &self.needle)
    }

    /// Drop lines that fell out of the raw window
    pub fn trim_before(&mut self, seq: u64) -> usize {
        self.lines.trim_before(seq)
    }

    /// Lines matching the applied filter, in raw order
    pub fn lines(&self) -> &LineBuffer {
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

    /// Forget both strings and every filtered line
    pub fn reset(&mut self) {
        self.input.reset();
        self.needle.clear();
        self.lines.clear();
    }
}
