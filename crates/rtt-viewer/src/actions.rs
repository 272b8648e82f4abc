//! Semantic UI actions produced by the keyboard layer

use strum::Display;

/// Which part of the viewer receives typed keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display)]
pub enum Focus {
    #[default]
    Log,
    Filter,
    Highlight,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Focus::Log => Focus::Filter,
            Focus::Filter => Focus::Highlight,
            Focus::Highlight => Focus::Log,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            Focus::Log => Focus::Highlight,
            Focus::Filter => Focus::Log,
            Focus::Highlight => Focus::Filter,
        }
    }

    pub fn is_input(self) -> bool {
        matches!(self, Focus::Filter | Focus::Highlight)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,

    // Focus
    FocusNext,
    FocusPrevious,
    FocusLog,
    FocusFilter,
    FocusHighlight,

    // Editing the focused input field
    InputChar(char),
    InputBackspace,
    InputClearLine,

    // Stream control
    TogglePause,
    Clear,

    // Log scrolling
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    ScrollToTop,
    ScrollToBottom,
    SetVisibleHeight(usize),
}
