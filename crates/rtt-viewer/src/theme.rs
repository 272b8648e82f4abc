use ratatui::{prelude::*, style::palette::tailwind};

/// Viewer theme - centralized color and style management
#[derive(Debug, Clone)]
pub struct Theme {
    // Background colors
    pub bg_primary: Color,
    pub bg_panel: Color,

    // Text colors
    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_muted: Color,

    // Accent colors
    pub accent_primary: Color,

    // Status colors
    pub status_warning: Color,
    pub status_info: Color,

    /// Foreground of highlighted log lines
    pub log_highlight: Color,
    /// Input field background while an edit waits for its debounce period
    pub input_pending_bg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            bg_primary: tailwind::SLATE.c950,
            bg_panel: tailwind::SLATE.c900,

            text_primary: tailwind::SLATE.c100,
            text_secondary: tailwind::SLATE.c200,
            text_muted: tailwind::SLATE.c400,

            accent_primary: tailwind::CYAN.c400,

            status_warning: tailwind::YELLOW.c400,
            status_info: tailwind::BLUE.c400,

            log_highlight: tailwind::GREEN.c300,
            input_pending_bg: tailwind::GREEN.c300,
        }
    }

    // Prebuilt styles for common use cases

    /// Style for panel backgrounds
    pub fn panel_background(&self) -> Style {
        Style::default().bg(self.bg_panel)
    }

    /// Style for panel borders
    pub fn panel_border(&self, focused: bool) -> Style {
        if focused {
            Style::default()
                .fg(self.accent_primary)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.text_muted)
        }
    }

    /// Style for panel titles
    pub fn panel_title(&self) -> Style {
        Style::default()
            .fg(self.accent_primary)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for key hints (e.g., "p" in "p pause")
    pub fn key_hint(&self) -> Style {
        Style::default()
            .fg(self.accent_primary)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for key descriptions
    pub fn key_description(&self) -> Style {
        Style::default().fg(self.text_secondary)
    }

    /// Plain log text
    pub fn text(&self) -> Style {
        Style::default().fg(self.text_primary)
    }

    /// Log line containing the applied highlight string
    pub fn log_highlight(&self) -> Style {
        Style::default()
            .fg(self.log_highlight)
            .add_modifier(Modifier::BOLD)
    }

    /// Text of an input field, marked while its edit is pending
    pub fn input(&self, pending_edit: bool) -> Style {
        if pending_edit {
            Style::default().fg(Color::Black).bg(self.input_pending_bg)
        } else {
            Style::default().fg(self.text_primary).bg(self.bg_primary)
        }
    }

    /// Status bar badge for the paused state
    pub fn paused_badge(&self) -> Style {
        Style::default()
            .fg(Color::Black)
            .bg(self.status_warning)
            .add_modifier(Modifier::BOLD)
    }

    /// Status bar badge for the flowing state
    pub fn flowing_badge(&self) -> Style {
        Style::default()
            .fg(Color::White)
            .bg(self.status_info)
            .add_modifier(Modifier::BOLD)
    }

    pub fn muted(&self) -> Style {
        Style::default().fg(self.text_muted)
    }
}
