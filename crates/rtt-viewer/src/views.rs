use crate::actions::Focus;
use crate::state::ViewerState;
use crate::theme::Theme;
use ratatui::{
    layout::{Constraint, Direction, Layout, Position, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use rtt_log_stream::InputField;

struct Areas {
    log: Rect,
    filter: Rect,
    highlight: Rect,
    status: Rect,
}

fn layout(area: Rect) -> Areas {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),    // Log pane
            Constraint::Length(3), // Filter and highlight inputs
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    let inputs = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[1]);

    Areas {
        log: rows[0],
        filter: inputs[0],
        highlight: inputs[1],
        status: rows[2],
    }
}

/// Number of log lines that fit in `area`
pub fn log_viewport_height(area: Rect) -> usize {
    layout(area).log.height.saturating_sub(2) as usize // -2 for borders
}

/// Render the whole viewer
pub fn render(state: &ViewerState, theme: &Theme, area: Rect, f: &mut Frame) {
    let areas = layout(area);
    render_log(state, theme, areas.log, f);
    render_input(state, theme, InputField::Filter, areas.filter, f);
    render_input(state, theme, InputField::Highlight, areas.highlight, f);
    render_status_bar(state, theme, areas.status, f);
}

fn log_title(state: &ViewerState) -> String {
    let mut title = String::from(" Log ");
    if state.paused {
        title.push_str("[PAUSED] ");
    }
    if state.scroll_offset > 0 {
        title.push_str(&format!("- ↓{} ", state.scroll_offset));
    }
    title
}

fn render_log(state: &ViewerState, theme: &Theme, area: Rect, f: &mut Frame) {
    let block = Block::default()
        .title(log_title(state))
        .borders(Borders::ALL)
        .border_style(theme.panel_border(state.focus == Focus::Log))
        .title_style(theme.panel_title());

    let height = area.height.saturating_sub(2) as usize;
    let visible: Vec<Line> = state
        .console
        .window(state.scroll_offset, height)
        .into_iter()
        .map(|line| {
            let style = if line.highlighted {
                theme.log_highlight()
            } else {
                theme.text()
            };
            Line::from(Span::styled(line.text.to_string(), style))
        })
        .collect();

    let paragraph = Paragraph::new(visible)
        .block(block)
        .style(theme.panel_background());
    f.render_widget(paragraph, area);
}

fn render_input(state: &ViewerState, theme: &Theme, field: InputField, area: Rect, f: &mut Frame) {
    let (text, focus, label) = match field {
        InputField::Filter => (&state.filter_input, Focus::Filter, " Filter "),
        InputField::Highlight => (&state.highlight_input, Focus::Highlight, " Highlight "),
    };
    let focused = state.focus == focus;

    let block = Block::default()
        .title(label)
        .borders(Borders::ALL)
        .border_style(theme.panel_border(focused))
        .title_style(theme.panel_title());

    let paragraph = Paragraph::new(text.as_str())
        .style(theme.input(state.console.is_pending(field)))
        .block(block);
    f.render_widget(paragraph, area);

    if focused {
        f.set_cursor_position(input_cursor(area, text));
    }
}

/// Cursor after the last character, kept inside the field's border
fn input_cursor(area: Rect, text: &str) -> Position {
    let typed = u16::try_from(text.chars().count()).unwrap_or(u16::MAX);
    let max_x = area.right().saturating_sub(2);
    let x = area.x.saturating_add(1).saturating_add(typed).min(max_x);
    Position::new(x, area.y.saturating_add(1))
}

fn render_status_bar(state: &ViewerState, theme: &Theme, area: Rect, f: &mut Frame) {
    let badge = if state.paused {
        Span::styled(
            format!(" PAUSED +{} ", state.stats.paused_backlog),
            theme.paused_badge(),
        )
    } else {
        Span::styled(" LIVE ", theme.flowing_badge())
    };

    let mut spans = vec![
        badge,
        Span::styled(
            format!(
                " {} | {}/{} lines ",
                state.source, state.stats.filtered, state.stats.raw
            ),
            theme.muted(),
        ),
    ];

    let hints: &[(&str, &str)] = if state.focus.is_input() {
        &[("Esc", "back"), ("Tab", "next field"), ("^U", "clear field")]
    } else {
        &[
            ("p", "pause"),
            ("c", "clear"),
            ("/", "filter"),
            ("h", "highlight"),
            ("j/k", "scroll"),
            ("q", "quit"),
        ]
    };
    for (key, description) in hints {
        spans.push(Span::styled(format!(" {key}"), theme.key_hint()));
        spans.push(Span::styled(format!(" {description}"), theme.key_description()));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};
    use rtt_log_stream::{DisplaySink, HighlightedLine, LogLine};

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_viewport_height() {
        assert_eq!(log_viewport_height(Rect::new(0, 0, 80, 24)), 18);
        assert_eq!(log_viewport_height(Rect::new(0, 0, 100, 40)), 34);
    }

    #[test]
    fn test_input_cursor_stays_inside_field() {
        let area = Rect::new(10, 5, 20, 3);
        assert_eq!(input_cursor(area, ""), Position::new(11, 6));
        assert_eq!(input_cursor(area, "err"), Position::new(14, 6));
        assert_eq!(input_cursor(area, &"x".repeat(100)), Position::new(28, 6));
        // Longer than u16::MAX characters, e.g. a huge paste
        assert_eq!(input_cursor(area, &"x".repeat(70_000)), Position::new(28, 6));
    }

    #[test]
    fn test_render_shows_lines_and_pause_marker() {
        let mut state = ViewerState::new(100, "stdin");
        state.paused = true;
        state.filter_input = "boot".into();
        state
            .console
            .append(&[
                HighlightedLine::new(&LogLine::new(0, "boot ok"), false),
                HighlightedLine::new(&LogLine::new(1, "boot done"), true),
            ])
            .unwrap();

        let mut terminal = Terminal::new(TestBackend::new(60, 12)).unwrap();
        let theme = Theme::default();
        terminal
            .draw(|f| render(&state, &theme, f.area(), f))
            .unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("[PAUSED]"));
        assert!(text.contains("boot ok"));
        assert!(text.contains("boot done"));
        assert!(text.contains("Filter"));
    }
}
