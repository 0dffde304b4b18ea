//! Countdown state of a breathing session.
//!
//! The session owns the seconds remaining and the running flag. It knows
//! nothing about wall-clock time: ticks and breaths are fed in by the
//! [`SessionRunner`](super::SessionRunner).

use serde::{Deserialize, Serialize};

use super::phase::{Breath, Phase};

/// Default session length in seconds.
pub const DEFAULT_SESSION_SECONDS: u32 = 60;

/// A guided breathing session.
#[derive(Debug, Clone)]
pub struct BreathingSession {
    /// Full length in seconds
    length: u32,
    /// Seconds left on the countdown
    remaining: u32,
    /// Whether the countdown is running
    running: bool,
    /// Current half of the cadence (meaningful only while running)
    breath: Breath,
}

/// Point-in-time view of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    /// Whether the countdown is running.
    pub running: bool,
    /// Seconds left.
    pub seconds_remaining: u32,
    /// Displayed phase.
    pub phase: Phase,
}

impl BreathingSession {
    /// Create an idle session of `length` seconds.
    #[must_use]
    pub const fn new(length: u32) -> Self {
        Self {
            length,
            remaining: length,
            running: false,
            breath: Breath::Inhale,
        }
    }

    /// Start or resume the countdown.
    ///
    /// Returns true if the session transitioned into running. Entering
    /// running always begins with an inhale.
    pub fn start(&mut self) -> bool {
        if self.running || self.remaining == 0 {
            return false;
        }
        self.running = true;
        self.breath = Breath::Inhale;
        true
    }

    /// Pause the countdown, keeping the time remaining.
    pub fn pause(&mut self) {
        self.running = false;
    }

    /// Stop and rewind to the full length.
    pub fn reset(&mut self) {
        self.running = false;
        self.remaining = self.length;
        self.breath = Breath::Inhale;
    }

    /// Advance the countdown by one second.
    ///
    /// Returns true if the session just completed.
    pub fn tick(&mut self) -> bool {
        if !self.running {
            return false;
        }

        self.remaining = self.remaining.saturating_sub(1);

        if self.remaining == 0 {
            self.running = false;
            true
        } else {
            false
        }
    }

    /// Switch to the given half of the cadence. Ignored while stopped.
    pub fn set_breath(&mut self, breath: Breath) {
        if self.running {
            self.breath = breath;
        }
    }

    /// Whether the countdown is running.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Whether the countdown reached zero.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.remaining == 0
    }

    /// Seconds left.
    #[must_use]
    pub const fn seconds_remaining(&self) -> u32 {
        self.remaining
    }

    /// Full session length in seconds.
    #[must_use]
    pub const fn length(&self) -> u32 {
        self.length
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        Phase::derive(self.running, self.is_finished(), self.breath)
    }

    /// Get progress as a fraction (0.0 - 1.0).
    #[must_use]
    pub fn progress(&self) -> f64 {
        if self.length == 0 {
            return 1.0;
        }
        1.0 - (f64::from(self.remaining) / f64::from(self.length))
    }

    /// Capture the current state.
    #[must_use]
    pub const fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            running: self.running,
            seconds_remaining: self.remaining,
            phase: self.phase(),
        }
    }
}

impl Default for BreathingSession {
    fn default() -> Self {
        Self::new(DEFAULT_SESSION_SECONDS)
    }
}

/// Format seconds as MM:SS.
#[must_use]
pub fn format_mmss(total_seconds: u32) -> String {
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    format!("{minutes:02}:{seconds:02}")
}

/// Render a progress bar.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn render_progress_bar(progress: f64, width: usize) -> String {
    let filled = ((progress.clamp(0.0, 1.0)) * width as f64) as usize;
    let empty = width.saturating_sub(filled);

    format!("[{}{}]", "█".repeat(filled), "░".repeat(empty))
}
