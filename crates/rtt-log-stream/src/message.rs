//! Control messages consumed by the controller

/// Everything a source or UI can ask of the controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlMessage {
    /// A raw text chunk, possibly holding several newline-separated lines
    LineIngested(String),
    /// Current text of the filter input
    FilterChanged(String),
    /// Current text of the highlight input
    HighlightChanged(String),
    /// `true` pauses the stream, `false` resumes it
    PauseToggled(bool),
    /// Drop all buffered and displayed lines
    Clear,
}
