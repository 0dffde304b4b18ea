//! Terminal User Interface (TUI) for the breathing exercise.
//!
//! Built with ratatui and crossterm. Key presses and session events are
//! multiplexed on the tokio runtime so the countdown keeps moving while
//! waiting for input.

mod app;
mod event;
mod ui;

pub use app::App;

use std::io;

use crossterm::{
    event::EventStream,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::prelude::*;

use crate::error::SerenityError;
use crate::features::breathing::{SessionRunner, SessionSnapshot};

/// Run the breathing screen until the user quits.
///
/// Returns the state the session was left in.
///
/// # Errors
///
/// Returns an error if the TUI fails to initialize or run.
pub async fn run(runner: SessionRunner) -> Result<SessionSnapshot, SerenityError> {
    // Setup terminal
    enable_raw_mode()
        .map_err(|e| SerenityError::Config(format!("Failed to enable raw mode: {e}")))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)
        .map_err(|e| SerenityError::Config(format!("Failed to setup terminal: {e}")))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)
        .map_err(|e| SerenityError::Config(format!("Failed to create terminal: {e}")))?;

    let mut app = App::new(runner);
    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    result.map(|()| app.snapshot())
}

/// Run the main application loop.
async fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), SerenityError> {
    let mut events = EventStream::new();

    while !app.should_quit {
        terminal
            .draw(|frame| ui::render(frame, app))
            .map_err(|e| SerenityError::Config(format!("Failed to draw: {e}")))?;

        tokio::select! {
            _ = app.runner.next_change() => {
                // Coalesce a tick and a breath landing together into one frame.
                app.runner.drain_pending();
            }
            maybe_event = events.next() => match maybe_event {
                Some(Ok(event)) => match event::action_for(&event) {
                    Some(event::Action::Quit) => app.should_quit = true,
                    Some(event::Action::Toggle) => app.toggle(),
                    Some(event::Action::Reset) => app.reset(),
                    None => {}
                },
                Some(Err(e)) => {
                    return Err(SerenityError::Config(format!("Event read failed: {e}")));
                }
                None => app.should_quit = true,
            },
        }
    }

    Ok(())
}
