//! Display sink trait
//!
//! The narrow capability the controller needs from whatever shows the log:
//! a terminal view, a GUI widget or the [`RecordingSink`] test double.

use crate::types::{HighlightedLine, InputField, RenderDirective, RenderMode};
use thiserror::Error;

/// Errors raised by a display sink while rendering
#[derive(Error, Debug)]
pub enum SinkError {
    #[error("Display rejected the update: {0}")]
    Rejected(String),

    #[error("Display I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Receiver of render directives
///
/// Implementations must clear previous content on `replace` and must not
/// touch already rendered lines on `append`.
pub trait DisplaySink {
    /// Clear the display, then show `lines`
    fn replace(&mut self, lines: &[HighlightedLine]) -> Result<(), SinkError>;

    /// Show `lines` after the existing content
    fn append(&mut self, lines: &[HighlightedLine]) -> Result<(), SinkError>;

    /// Drop the `count` oldest displayed lines
    fn evict_front(&mut self, _count: usize) -> Result<(), SinkError> {
        Ok(())
    }

    /// Advisory: an edit of `field` is waiting for its debounce period
    fn set_input_field_state(
        &mut self,
        field: InputField,
        pending_edit: bool,
    ) -> Result<(), SinkError>;
}

/// Apply a directive to a sink
pub fn render_directive<S: DisplaySink + ?Sized>(
    directive: &RenderDirective,
    sink: &mut S,
) -> Result<(), SinkError> {
    match directive.mode {
        RenderMode::Replace => sink.replace(&directive.lines),
        RenderMode::Append => {
            if directive.evicted > 0 {
                sink.evict_front(directive.evicted)?;
            }
            sink.append(&directive.lines)
        }
    }
}

/// A call observed by [`RecordingSink`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkEvent {
    Replace(usize),
    Append(usize),
    Evict(usize),
    InputField(InputField, bool),
}

/// Sink that mirrors the displayed content and records every call
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    /// What a real display would currently show
    pub shown: Vec<HighlightedLine>,
    /// Every call, in order
    pub events: Vec<SinkEvent>,
    /// Latest pending-edit flag per field
    pub filter_pending: bool,
    pub highlight_pending: bool,
    fail_next: Option<String>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next call fail with `reason`
    pub fn fail_next(&mut self, reason: &str) {
        self.fail_next = Some(reason.to_string());
    }

    /// Texts currently shown
    pub fn texts(&self) -> Vec<&str> {
        self.shown.iter().map(|line| &*line.text).collect()
    }

    /// Highlight flags currently shown
    pub fn flags(&self) -> Vec<bool> {
        self.shown.iter().map(|line| line.highlighted).collect()
    }

    fn check(&mut self) -> Result<(), SinkError> {
        match self.fail_next.take() {
            Some(reason) => Err(SinkError::Rejected(reason)),
            None => Ok(()),
        }
    }
}

impl DisplaySink for RecordingSink {
    fn replace(&mut self, lines: &[HighlightedLine]) -> Result<(), SinkError> {
        self.check()?;
        self.shown = lines.to_vec();
        self.events.push(SinkEvent::Replace(lines.len()));
        Ok(())
    }

    fn append(&mut self, lines: &[HighlightedLine]) -> Result<(), SinkError> {
        self.check()?;
        self.shown.extend_from_slice(lines);
        self.events.push(SinkEvent::Append(lines.len()));
        Ok(())
    }

    fn evict_front(&mut self, count: usize) -> Result<(), SinkError> {
        self.check()?;
        let count = count.min(self.shown.len());
        self.shown.drain(..count);
        self.events.push(SinkEvent::Evict(count));
        Ok(())
    }

    fn set_input_field_state(
        &mut self,
        field: InputField,
        pending_edit: bool,
    ) -> Result<(), SinkError> {
        self.check()?;
        match field {
            InputField::Filter => self.filter_pending = pending_edit,
            InputField::Highlight => self.highlight_pending = pending_edit,
        }
        self.events.push(SinkEvent::InputField(field, pending_edit));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LogLine;

    fn lines(texts: &[&str]) -> Vec<HighlightedLine> {
        texts
            .iter()
            .enumerate()
            .map(|(seq, text)| HighlightedLine::new(&LogLine::new(seq as u64, *text), false))
            .collect()
    }

    #[test]
    fn test_render_append_then_replace() {
        let mut sink = RecordingSink::new();
        render_directive(&RenderDirective::append(lines(&["a", "b"]), 0), &mut sink).unwrap();
        render_directive(&RenderDirective::append(lines(&["c"]), 0), &mut sink).unwrap();
        assert_eq!(sink.texts(), vec!["a", "b", "c"]);

        render_directive(&RenderDirective::replace(lines(&["z"])), &mut sink).unwrap();
        assert_eq!(sink.texts(), vec!["z"]);
        assert_eq!(
            sink.events,
            vec![SinkEvent::Append(2), SinkEvent::Append(1), SinkEvent::Replace(1)]
        );
    }

    #[test]
    fn test_render_evicts_before_append() {
        let mut sink = RecordingSink::new();
        render_directive(&RenderDirective::append(lines(&["a", "b"]), 0), &mut sink).unwrap();
        render_directive(&RenderDirective::append(lines(&["c"]), 1), &mut sink).unwrap();
        assert_eq!(sink.texts(), vec!["b", "c"]);
    }

    #[test]
    fn test_failure_propagates() {
        let mut sink = RecordingSink::new();
        sink.fail_next("widget gone");
        let err = render_directive(&RenderDirective::replace(Vec::new()), &mut sink).unwrap_err();
        assert_eq!(err.to_string(), "Display rejected the update: widget gone");
        assert!(sink.events.is_empty());

        // Only the next call fails
        render_directive(&RenderDirective::replace(Vec::new()), &mut sink).unwrap();
    }
}
