//! Console buffer
//!
//! The terminal-side display sink. Keeps at most `scrollback` lines; lines it
//! dropped on its own are counted in `hidden` so a later eviction from the
//! controller consumes those first.

use rtt_log_stream::{DisplaySink, HighlightedLine, InputField, SinkError};
use std::collections::VecDeque;

#[derive(Debug, Clone, Default)]
pub struct ConsoleBuffer {
    lines: VecDeque<HighlightedLine>,
    scrollback: usize,
    hidden: usize,
    filter_pending: bool,
    highlight_pending: bool,
}

impl ConsoleBuffer {
    pub fn new(scrollback: usize) -> Self {
        Self {
            lines: VecDeque::new(),
            scrollback: scrollback.max(1),
            hidden: 0,
            filter_pending: false,
            highlight_pending: false,
        }
    }

    pub fn lines(&self) -> &VecDeque<HighlightedLine> {
        &self.lines
    }

    /// Lines the controller considers displayed but scrolled out of the buffer
    pub fn hidden(&self) -> usize {
        self.hidden
    }

    pub fn is_pending(&self, field: InputField) -> bool {
        match field {
            InputField::Filter => self.filter_pending,
            InputField::Highlight => self.highlight_pending,
        }
    }

    /// The visible window: `scroll_offset` lines up from the newest, `height` tall
    pub fn window(&self, scroll_offset: usize, height: usize) -> Vec<&HighlightedLine> {
        let total = self.lines.len();
        if total == 0 || height == 0 {
            return Vec::new();
        }

        let effective_scroll = scroll_offset.min(self.max_scroll(height));
        let end = total - effective_scroll;
        let start = end.saturating_sub(height);
        self.lines.range(start..end).collect()
    }

    /// Largest useful scroll offset for a viewport of `height`
    pub fn max_scroll(&self, height: usize) -> usize {
        self.lines.len().saturating_sub(height)
    }

    fn enforce_scrollback(&mut self) {
        while self.lines.len() > self.scrollback {
            self.lines.pop_front();
            self.hidden += 1;
        }
    }
}

impl DisplaySink for ConsoleBuffer {
    fn replace(&mut self, lines: &[HighlightedLine]) -> Result<(), SinkError> {
        self.lines.clear();
        self.hidden = 0;
        self.lines.extend(lines.iter().cloned());
        self.enforce_scrollback();
        Ok(())
    }

    fn append(&mut self, lines: &[HighlightedLine]) -> Result<(), SinkError> {
        self.lines.extend(lines.iter().cloned());
        self.enforce_scrollback();
        Ok(())
    }

    fn evict_front(&mut self, count: usize) -> Result<(), SinkError> {
        let from_hidden = count.min(self.hidden);
        self.hidden -= from_hidden;
        let visible = (count - from_hidden).min(self.lines.len());
        self.lines.drain(..visible);
        Ok(())
    }

    fn set_input_field_state(
        &mut self,
        field: InputField,
        pending_edit: bool,
    ) -> Result<(), SinkError> {
        match field {
            InputField::Filter => self.filter_pending = pending_edit,
            InputField::Highlight => self.highlight_pending = pending_edit,
        }
        Ok(())
    }
}
