//! Mood statistics.

use chrono::{DateTime, Local, Utc};
use serde::Serialize;

use super::entry::{MoodEntry, MoodScore};

/// Number of entries shown in the trend chart.
pub const TREND_LENGTH: usize = 7;

/// One bar of the trend chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    /// Short weekday of the entry, in local time.
    pub day: String,
    /// When it was logged.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
    /// Score logged.
    pub score: MoodScore,
}

/// Summary of the mood log.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodStats {
    /// Number of entries.
    pub total: usize,
    /// Mean score, or zero when nothing is logged.
    pub average: f64,
    /// Up to the last seven entries, oldest first.
    pub trend: Vec<TrendPoint>,
}

impl MoodStats {
    /// Compute statistics over `entries`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn from_entries(entries: &[MoodEntry]) -> Self {
        let total = entries.len();
        let average = if total == 0 {
            0.0
        } else {
            let sum: u32 = entries.iter().map(|e| u32::from(e.score.value())).sum();
            f64::from(sum) / total as f64
        };

        let mut sorted: Vec<&MoodEntry> = entries.iter().collect();
        sorted.sort_by_key(|e| e.timestamp);
        let trend = sorted
            .iter()
            .skip(total.saturating_sub(TREND_LENGTH))
            .map(|e| TrendPoint {
                day: e.timestamp.with_timezone(&Local).format("%a").to_string(),
                timestamp: e.timestamp,
                score: e.score,
            })
            .collect();

        Self {
            total,
            average,
            trend,
        }
    }

    /// Average as displayed: one decimal place, or `0` when empty.
    #[must_use]
    pub fn average_display(&self) -> String {
        if self.total == 0 {
            "0".to_string()
        } else {
            format!("{:.1}", self.average)
        }
    }
}
