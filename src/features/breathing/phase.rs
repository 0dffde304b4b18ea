//! Breathing phases and the inhale/exhale cadence.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// One half of the breathing cadence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Breath {
    /// Breathing in
    Inhale,
    /// Breathing out
    Exhale,
}

impl Breath {
    /// The half that follows this one.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Inhale => Self::Exhale,
            Self::Exhale => Self::Inhale,
        }
    }
}

/// What the session is showing right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Not running and not finished
    Idle,
    /// Running, first half of the cadence
    Inhale,
    /// Running, second half of the cadence
    Exhale,
    /// Not running, countdown reached zero
    Complete,
}

impl Phase {
    /// Derive the phase from the session flags and the current breath.
    ///
    /// `breath` only matters while running.
    #[must_use]
    pub const fn derive(running: bool, finished: bool, breath: Breath) -> Self {
        match (running, finished, breath) {
            (true, _, Breath::Inhale) => Self::Inhale,
            (true, _, Breath::Exhale) => Self::Exhale,
            (false, true, _) => Self::Complete,
            (false, false, _) => Self::Idle,
        }
    }

    /// Text shown to the user.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Idle => "Ready?",
            Self::Inhale => "Breathe In...",
            Self::Exhale => "Breathe Out...",
            Self::Complete => "Session Complete",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Inhale and exhale durations of one breathing period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cadence {
    /// Time spent breathing in.
    pub inhale: Duration,
    /// Time spent breathing out.
    pub exhale: Duration,
}

impl Cadence {
    /// Create a cadence from whole seconds.
    #[must_use]
    pub const fn from_secs(inhale: u64, exhale: u64) -> Self {
        Self {
            inhale: Duration::from_secs(inhale),
            exhale: Duration::from_secs(exhale),
        }
    }

    /// How long the given half lasts.
    #[must_use]
    pub const fn duration_of(&self, breath: Breath) -> Duration {
        match breath {
            Breath::Inhale => self.inhale,
            Breath::Exhale => self.exhale,
        }
    }
}

impl Default for Cadence {
    fn default() -> Self {
        Self::from_secs(4, 4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_labels() {
        assert_eq!(Phase::Idle.label(), "Ready?");
        assert_eq!(Phase::Inhale.label(), "Breathe In...");
        assert_eq!(Phase::Exhale.label(), "Breathe Out...");
        assert_eq!(Phase::Complete.label(), "Session Complete");
    }

    #[test]
    fn test_derive_not_running() {
        assert_eq!(Phase::derive(false, false, Breath::Exhale), Phase::Idle);
        assert_eq!(Phase::derive(false, true, Breath::Inhale), Phase::Complete);
    }

    #[test]
    fn test_derive_running_follows_breath() {
        assert_eq!(Phase::derive(true, false, Breath::Inhale), Phase::Inhale);
        assert_eq!(Phase::derive(true, false, Breath::Exhale), Phase::Exhale);
    }

    #[test]
    fn test_breath_next() {
        assert_eq!(Breath::Inhale.next(), Breath::Exhale);
        assert_eq!(Breath::Exhale.next(), Breath::Inhale);
    }

    #[test]
    fn test_default_cadence_is_four_in_four_out() {
        let cadence = Cadence::default();
        assert_eq!(cadence.duration_of(Breath::Inhale), Duration::from_secs(4));
        assert_eq!(cadence.duration_of(Breath::Exhale), Duration::from_secs(4));
    }
}
