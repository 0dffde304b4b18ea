//! Reflective journal.
//!
//! Entries are analysed by the companion for sentiment and a short
//! reflection before being saved.

pub mod entry;
pub mod log;

pub use entry::{word_count, Analysis, JournalEntry, Sentiment, FALLBACK_REFLECTION};
pub use log::{JournalLog, JOURNAL_KEY};
