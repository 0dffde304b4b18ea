//! Mood entries and scores.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::SerenityError;

/// A mood score between 1 (lowest) and 5 (highest).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct MoodScore(u8);

impl MoodScore {
    /// Lowest score.
    pub const MIN: u8 = 1;
    /// Highest score.
    pub const MAX: u8 = 5;

    /// Numeric value.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Icon for the score.
    #[must_use]
    pub const fn icon(self) -> &'static str {
        match self.0 {
            1 => "😞",
            2 => "☁️",
            3 => "😐",
            4 => "☀️",
            _ => "😊",
        }
    }

    /// Short description of the score.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self.0 {
            1 => "Awful",
            2 => "Low",
            3 => "Okay",
            4 => "Good",
            _ => "Great",
        }
    }
}

impl TryFrom<u8> for MoodScore {
    type Error = SerenityError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(SerenityError::InvalidInput(format!(
                "mood score must be between {} and {}, got {value}",
                Self::MIN,
                Self::MAX
            )))
        }
    }
}

impl From<MoodScore> for u8 {
    fn from(score: MoodScore) -> Self {
        score.0
    }
}

impl std::fmt::Display for MoodScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A logged mood.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodEntry {
    /// Unique identifier
    pub id: String,
    /// When the mood was logged (milliseconds since the epoch when stored)
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
    /// Score from 1 to 5
    pub score: MoodScore,
    /// Optional free-text note
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Tags
    #[serde(default)]
    pub tags: Vec<String>,
}

impl MoodEntry {
    /// Create an entry stamped now. Blank notes are dropped.
    #[must_use]
    pub fn new(score: MoodScore, note: Option<String>, tags: Vec<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            score,
            note: note.filter(|n| !n.trim().is_empty()),
            tags,
        }
    }
}
