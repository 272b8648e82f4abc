//! Viewer state and reducer

use crate::actions::{Action, Focus};
use crate::console::ConsoleBuffer;
use rtt_log_stream::{ControlMessage, LogStreamController};

/// Counters shown in the status bar, sampled from the controller once per frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreamStats {
    pub raw: usize,
    pub filtered: usize,
    pub paused_backlog: usize,
}

impl StreamStats {
    pub fn sample(controller: &LogStreamController) -> Self {
        Self {
            raw: controller.raw_lines().len(),
            filtered: controller.filtered_lines().len(),
            paused_backlog: controller.paused_len(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ViewerState {
    pub running: bool,
    pub focus: Focus,
    pub filter_input: String,
    pub highlight_input: String,
    pub paused: bool,
    /// What the display sink currently shows
    pub console: ConsoleBuffer,
    /// Scroll offset (0 = bottom/newest)
    pub scroll_offset: usize,
    /// Visible height for scroll bounds
    pub visible_height: usize,
    pub stats: StreamStats,
    /// Where lines come from, for the status bar
    pub source: String,
}

impl ViewerState {
    pub fn new(scrollback: usize, source: impl Into<String>) -> Self {
        Self {
            running: true,
            focus: Focus::default(),
            filter_input: String::new(),
            highlight_input: String::new(),
            paused: false,
            console: ConsoleBuffer::new(scrollback),
            scroll_offset: 0,
            visible_height: 0,
            stats: StreamStats::default(),
            source: source.into(),
        }
    }

    fn focused_input(&mut self) -> Option<&mut String> {
        match self.focus {
            Focus::Filter => Some(&mut self.filter_input),
            Focus::Highlight => Some(&mut self.highlight_input),
            Focus::Log => None,
        }
    }

    fn max_scroll(&self) -> usize {
        self.console.max_scroll(self.visible_height)
    }

    /// Keep the scroll offset inside the current content
    pub fn clamp_scroll(&mut self) {
        self.scroll_offset = self.scroll_offset.min(self.max_scroll());
    }
}

pub fn reduce(mut state: ViewerState, action: &Action) -> ViewerState {
    let page = state.visible_height.max(1);

    match action {
        Action::Quit => state.running = false,

        Action::FocusNext => state.focus = state.focus.next(),
        Action::FocusPrevious => state.focus = state.focus.previous(),
        Action::FocusLog => state.focus = Focus::Log,
        Action::FocusFilter => state.focus = Focus::Filter,
        Action::FocusHighlight => state.focus = Focus::Highlight,

        Action::InputChar(c) => {
            if let Some(input) = state.focused_input() {
                input.push(*c);
            }
        }
        Action::InputBackspace => {
            if let Some(input) = state.focused_input() {
                input.pop();
            }
        }
        Action::InputClearLine => {
            if let Some(input) = state.focused_input() {
                input.clear();
            }
        }

        Action::TogglePause => state.paused = !state.paused,
        Action::Clear => {
            // The controller resets both strings on clear
            state.filter_input.clear();
            state.highlight_input.clear();
            state.scroll_offset = 0;
        }

        Action::ScrollUp => {
            if state.scroll_offset < state.max_scroll() {
                state.scroll_offset += 1;
            }
        }
        Action::ScrollDown => state.scroll_offset = state.scroll_offset.saturating_sub(1),
        Action::PageUp => {
            state.scroll_offset = (state.scroll_offset + page).min(state.max_scroll());
        }
        Action::PageDown => state.scroll_offset = state.scroll_offset.saturating_sub(page),
        Action::ScrollToTop => state.scroll_offset = state.max_scroll(),
        Action::ScrollToBottom => state.scroll_offset = 0,
        Action::SetVisibleHeight(height) => {
            state.visible_height = *height;
            state.clamp_scroll();
        }
    }

    state
}

/// The control message an action implies, given the state after reducing it
///
/// Filter and highlight text are not covered here; the UI loop samples the
/// input fields once per frame and sends their current text.
pub fn control_message_for(action: &Action, state: &ViewerState) -> Option<ControlMessage> {
    match action {
        Action::TogglePause => Some(ControlMessage::PauseToggled(state.paused)),
        Action::Clear => Some(ControlMessage::Clear),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rtt_log_stream::{DisplaySink, HighlightedLine, LogLine};

    fn state_with_lines(count: usize, height: usize) -> ViewerState {
        let mut state = ViewerState::new(100, "stdin");
        let lines: Vec<_> = (0..count)
            .map(|i| HighlightedLine::new(&LogLine::new(i as u64, format!("line {i}")), false))
            .collect();
        state.console.append(&lines).unwrap();
        reduce(state, &Action::SetVisibleHeight(height))
    }

    #[test]
    fn test_typing_goes_to_focused_field() {
        let mut state = ViewerState::new(10, "stdin");
        state = reduce(state, &Action::FocusFilter);
        for c in "err".chars() {
            state = reduce(state, &Action::InputChar(c));
        }
        state = reduce(state, &Action::InputBackspace);
        state = reduce(state, &Action::FocusNext);
        state = reduce(state, &Action::InputChar('x'));

        assert_eq!(state.filter_input, "er");
        assert_eq!(state.highlight_input, "x");
        assert_eq!(state.focus, Focus::Highlight);
    }

    #[test]
    fn test_typing_without_input_focus_is_ignored() {
        let state = reduce(ViewerState::new(10, "stdin"), &Action::InputChar('a'));
        assert!(state.filter_input.is_empty());
        assert!(state.highlight_input.is_empty());
    }

    #[test]
    fn test_pause_toggle_message() {
        let state = reduce(ViewerState::new(10, "stdin"), &Action::TogglePause);
        assert!(state.paused);
        assert_eq!(
            control_message_for(&Action::TogglePause, &state),
            Some(ControlMessage::PauseToggled(true))
        );

        let state = reduce(state, &Action::TogglePause);
        assert_eq!(
            control_message_for(&Action::TogglePause, &state),
            Some(ControlMessage::PauseToggled(false))
        );
    }

    #[test]
    fn test_clear_resets_inputs() {
        let mut state = ViewerState::new(10, "stdin");
        state.filter_input = "err".into();
        state.highlight_input = "boot".into();
        state.paused = true;

        let state = reduce(state, &Action::Clear);
        assert!(state.filter_input.is_empty());
        assert!(state.highlight_input.is_empty());
        assert!(state.paused);
        assert_eq!(
            control_message_for(&Action::Clear, &state),
            Some(ControlMessage::Clear)
        );
    }

    #[test]
    fn test_scroll_bounds() {
        let mut state = state_with_lines(10, 4);
        state = reduce(state, &Action::ScrollToTop);
        assert_eq!(state.scroll_offset, 6);

        state = reduce(state, &Action::ScrollUp);
        assert_eq!(state.scroll_offset, 6);

        state = reduce(state, &Action::PageDown);
        assert_eq!(state.scroll_offset, 2);

        state = reduce(state, &Action::PageDown);
        assert_eq!(state.scroll_offset, 0);

        state = reduce(state, &Action::PageUp);
        assert_eq!(state.scroll_offset, 4);

        state = reduce(state, &Action::ScrollToBottom);
        assert_eq!(state.scroll_offset, 0);
    }

    #[test]
    fn test_taller_viewport_clamps_scroll() {
        let mut state = state_with_lines(10, 4);
        state = reduce(state, &Action::ScrollToTop);
        state = reduce(state, &Action::SetVisibleHeight(8));
        assert_eq!(state.scroll_offset, 2);
    }

    #[test]
    fn test_scroll_actions_send_nothing() {
        let state = ViewerState::new(10, "stdin");
        assert_eq!(control_message_for(&Action::ScrollUp, &state), None);
        assert_eq!(control_message_for(&Action::InputChar('a'), &state), None);
    }
}
