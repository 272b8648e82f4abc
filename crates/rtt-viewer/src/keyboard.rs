use crate::actions::{Action, Focus};
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Convert a raw key event into a semantic action
///
/// Input fields swallow printable characters, so single-letter shortcuts
/// only work while the log has focus.
pub fn translate_key(key: &KeyEvent, focus: Focus) -> Option<Action> {
    // Global keys
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            return Some(Action::Quit);
        }
        KeyCode::Tab => return Some(Action::FocusNext),
        KeyCode::BackTab => return Some(Action::FocusPrevious),
        KeyCode::PageUp => return Some(Action::PageUp),
        KeyCode::PageDown => return Some(Action::PageDown),
        _ => {}
    }

    if focus.is_input() {
        translate_input_key(key)
    } else {
        translate_log_key(key)
    }
}

fn translate_input_key(key: &KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Esc | KeyCode::Enter => Some(Action::FocusLog),
        KeyCode::Backspace => Some(Action::InputBackspace),
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(Action::InputClearLine)
        }
        KeyCode::Char(c)
            if !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            Some(Action::InputChar(c))
        }
        _ => None,
    }
}

fn translate_log_key(key: &KeyEvent) -> Option<Action> {
    let plain = key.modifiers == KeyModifiers::NONE;
    match key.code {
        KeyCode::Char('q') if plain => Some(Action::Quit),
        KeyCode::Char('p') | KeyCode::Char(' ') if plain => Some(Action::TogglePause),
        KeyCode::Char('c') if plain => Some(Action::Clear),
        KeyCode::Char('/') | KeyCode::Char('f') if plain => Some(Action::FocusFilter),
        KeyCode::Char('h') if plain => Some(Action::FocusHighlight),

        // Vim navigation
        KeyCode::Char('k') if plain => Some(Action::ScrollUp),
        KeyCode::Up => Some(Action::ScrollUp),
        KeyCode::Char('j') if plain => Some(Action::ScrollDown),
        KeyCode::Down => Some(Action::ScrollDown),
        KeyCode::Char('g') if plain => Some(Action::ScrollToTop),
        KeyCode::Home => Some(Action::ScrollToTop),
        KeyCode::Char('G') => Some(Action::ScrollToBottom),
        KeyCode::End => Some(Action::ScrollToBottom),
        _ => None,
    }
}
