//! Guided breathing exercise.
//!
//! A fixed-length countdown paired with an inhale/exhale cadence:
//! - `session`: countdown state and start/pause/reset/tick
//! - `phase`: phase labels and cadence timing
//! - `runner`: the cancellable wall-clock timers driving a session

pub mod phase;
pub mod runner;
pub mod session;

pub use phase::{Breath, Cadence, Phase};
pub use runner::{SessionEvent, SessionRunner};
pub use session::{
    format_mmss, render_progress_bar, BreathingSession, SessionSnapshot, DEFAULT_SESSION_SECONDS,
};

use crate::config::BreathingConfig;

impl From<&BreathingConfig> for SessionRunner {
    fn from(config: &BreathingConfig) -> Self {
        Self::new(
            BreathingSession::new(config.session_seconds),
            Cadence::from_secs(
                u64::from(config.inhale_seconds),
                u64::from(config.exhale_seconds),
            ),
        )
    }
}
