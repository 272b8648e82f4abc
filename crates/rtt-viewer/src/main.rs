use anyhow::{Context, Result};
use ratatui::{
    backend::CrosstermBackend,
    crossterm::{
        event::{self, Event, KeyEventKind},
        execute,
        terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    },
    Terminal,
};
use rtt_log_stream::{ControlMessage, LogStreamController, StreamOptions};
use rtt_viewer_config::ViewerConfig;
use std::io;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Receiver;
use std::sync::Arc;
use std::time::{Duration, Instant};

mod actions;
mod console;
mod dispatcher;
mod keyboard;
mod line_source;
mod logger;
mod state;
mod theme;
mod views;

use actions::Action;
use dispatcher::Dispatcher;
use line_source::FileTailSource;
use state::{StreamStats, ViewerState};
use theme::Theme;

/// Upper bound on queued messages handled per frame, so a flood of input
/// cannot starve the keyboard
const MAX_MESSAGES_PER_FRAME: usize = 10_000;

fn main() -> Result<()> {
    let log_file = logger::init()?;
    log::info!("Starting rtt-viewer, logging to {}", log_file.display());

    let mut config = ViewerConfig::load();
    if let Some(path) = std::env::args().nth(1) {
        config.source_file = Some(path);
    }
    log::debug!("Config: {:?}", config);

    let (dispatcher, message_rx) = Dispatcher::channel();
    let stop = Arc::new(AtomicBool::new(false));
    let source = match &config.source_file {
        Some(path) => {
            let tail = FileTailSource::new(PathBuf::from(path), config.strip_ansi);
            tail.spawn(
                dispatcher.clone(),
                Duration::from_millis(config.poll_interval_ms),
                stop.clone(),
            );
            path.clone()
        }
        None => {
            // Never joined: a blocked stdin read ends with the process
            line_source::spawn_stdin_source(dispatcher.clone(), config.strip_ansi);
            "stdin".to_string()
        }
    };

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let controller = LogStreamController::new(StreamOptions {
        max_lines: config.line_bound(),
    });
    let state = ViewerState::new(config.scrollback, source);

    let result = run_app(
        &mut terminal,
        state,
        controller,
        &dispatcher,
        &message_rx,
        Duration::from_millis(config.refresh_interval_ms),
    );
    stop.store(true, Ordering::Relaxed);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &result {
        log::error!("Viewer failed: {:#}", err);
        eprintln!("Error: {:#}", err);
    }

    log::info!("Exiting rtt-viewer");
    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut state: ViewerState,
    mut controller: LogStreamController,
    dispatcher: &Dispatcher,
    message_rx: &Receiver<ControlMessage>,
    refresh_interval: Duration,
) -> Result<()> {
    let theme = Theme::default();
    let mut sent_filter = String::new();
    let mut sent_highlight = String::new();

    loop {
        // Hand the current input text to the controller; it debounces
        if state.filter_input != sent_filter {
            sent_filter = state.filter_input.clone();
            dispatcher.dispatch(ControlMessage::FilterChanged(sent_filter.clone()));
        }
        if state.highlight_input != sent_highlight {
            sent_highlight = state.highlight_input.clone();
            dispatcher.dispatch(ControlMessage::HighlightChanged(sent_highlight.clone()));
        }

        let now = Instant::now();
        for message in message_rx.try_iter().take(MAX_MESSAGES_PER_FRAME) {
            controller
                .dispatch(message, now, &mut state.console)
                .context("Failed to update the log view")?;
        }
        // Heartbeat: applies settled filter and highlight edits
        controller
            .drive("", now, &mut state.console)
            .context("Failed to update the log view")?;

        state.stats = StreamStats::sample(&controller);
        state.paused = controller.is_paused();
        state.clamp_scroll();

        let mut visible_height = state.visible_height;
        terminal.draw(|frame| {
            let area = frame.area();
            visible_height = views::log_viewport_height(area);
            views::render(&state, &theme, area, frame);
        })?;
        if visible_height != state.visible_height {
            state = state::reduce(state, &Action::SetVisibleHeight(visible_height));
        }

        // Check if we should quit
        if !state.running {
            break;
        }

        // Handle events
        if event::poll(refresh_interval)? {
            if let Event::Key(key) = event::read()? {
                // Only process key press events (ignore key release)
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if let Some(action) = keyboard::translate_key(&key, state.focus) {
                    log::trace!("Key {:?} -> {:?}", key.code, action);
                    state = state::reduce(state, &action);
                    if let Some(message) = state::control_message_for(&action, &state) {
                        dispatcher.dispatch(message);
                    }
                }
            }
        }
    }

    Ok(())
}
