//! Application state for the breathing screen.

use crate::features::breathing::{SessionRunner, SessionSnapshot};

/// Application state.
pub struct App {
    /// The session being shown.
    pub runner: SessionRunner,
    /// Status message to display.
    pub status: Option<String>,
    /// Whether the app should quit.
    pub should_quit: bool,
}

impl App {
    /// Create a new app instance around an idle session.
    #[must_use]
    pub fn new(runner: SessionRunner) -> Self {
        Self {
            runner,
            status: None,
            should_quit: false,
        }
    }

    /// Start when stopped, pause when running.
    pub fn toggle(&mut self) {
        if self.runner.session().is_finished() {
            self.status = Some("Session complete. Press r to go again.".to_string());
            return;
        }
        self.runner.toggle();
        self.status = None;
    }

    /// Rewind to the full length.
    pub fn reset(&mut self) {
        self.runner.reset();
        self.status = None;
    }

    /// Current state of the session.
    #[must_use]
    pub const fn snapshot(&self) -> SessionSnapshot {
        self.runner.snapshot()
    }

    /// Fraction of the session elapsed.
    #[must_use]
    pub fn progress(&self) -> f64 {
        self.runner.session().progress()
    }

    /// Label for the start/pause control.
    #[must_use]
    pub const fn control_label(&self) -> &'static str {
        if self.runner.session().is_running() {
            "pause"
        } else {
            "start"
        }
    }
}
