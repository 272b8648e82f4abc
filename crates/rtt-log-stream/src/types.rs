//! Type definitions shared by the stream stages and the display boundary

use std::sync::Arc;

/// A single ingested log line
///
/// Clones share the text allocation, so the raw, filtered and highlighted
/// buffers never copy line content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine {
    /// Position in the raw buffer, strictly increasing until the next clear
    pub seq: u64,

    /// Line text without its newline delimiter
    pub text: Arc<str>,
}

/// A filtered line annotated with its highlight flag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightedLine {
    /// Line text
    pub text: Arc<str>,

    /// Whether the line contains the applied highlight string
    pub highlighted: bool,
}

/// How a directive's lines relate to what is already displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum RenderMode {
    /// Render the lines after the existing content
    Append,

    /// Clear the display, then render the lines
    Replace,
}

/// The only artifact handed to the display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderDirective {
    /// Append or replace
    pub mode: RenderMode,

    /// Lines to render, in display order
    pub lines: Vec<HighlightedLine>,

    /// Leading lines the display must drop before appending.
    ///
    /// Only non-zero in `Append` mode when the controller runs with a line
    /// bound and old lines fell out of the window.
    pub evicted: usize,
}

/// The two debounced text inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum InputField {
    #[strum(to_string = "filter")]
    Filter,
    #[strum(to_string = "highlight")]
    Highlight,
}

impl LogLine {
    /// Create a new line
    pub fn new(seq: u64, text: impl Into<Arc<str>>) -> Self {
        Self {
            seq,
            text: text.into(),
        }
    }

    /// Line text as a string slice
    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl HighlightedLine {
    /// Annotate a log line
    pub fn new(line: &LogLine, highlighted: bool) -> Self {
        Self {
            text: Arc::clone(&line.text),
            highlighted,
        }
    }
}

impl RenderDirective {
    /// A directive that wipes the display and shows `lines`
    pub fn replace(lines: Vec<HighlightedLine>) -> Self {
        Self {
            mode: RenderMode::Replace,
            lines,
            evicted: 0,
        }
    }

    /// A directive that extends the display
    pub fn append(lines: Vec<HighlightedLine>, evicted: usize) -> Self {
        Self {
            mode: RenderMode::Append,
            lines,
            evicted,
        }
    }

    /// True for `Replace` directives
    pub fn is_replace(&self) -> bool {
        self.mode == RenderMode::Replace
    }

    /// Texts of the carried lines, mostly useful for assertions and logging
    pub fn texts(&self) -> Vec<&str> {
        self.lines.iter().map(|line| &*line.text).collect()
    }

    /// Highlight flags of the carried lines
    pub fn flags(&self) -> Vec<bool> {
        self.lines.iter().map(|line| line.highlighted).collect()
    }
}
