//! Mood tracking.
//!
//! - `entry`: mood entries and the 1-5 score
//! - `log`: the persisted, append-only mood log
//! - `stats`: average and recent trend
//! - `chart`: terminal rendering of the trend

pub mod chart;
pub mod entry;
pub mod log;
pub mod stats;

pub use chart::{render_sparkline, render_trend};
pub use entry::{MoodEntry, MoodScore};
pub use log::{MoodLog, MOOD_KEY};
pub use stats::{MoodStats, TrendPoint, TREND_LENGTH};
