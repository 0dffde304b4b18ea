//! Journal entries and their reflections.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Reflection used when the analysis call fails.
pub const FALLBACK_REFLECTION: &str =
    "Unable to analyze at this moment, but well done for writing this down.";

/// Overall tone of a journal entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    /// Upbeat
    Positive,
    /// Neither up nor down
    Neutral,
    /// Low
    Negative,
}

impl Sentiment {
    /// Lowercase name, as stored.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Neutral => "neutral",
            Self::Negative => "negative",
        }
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Structured result of analysing free text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Analysis {
    /// Detected sentiment.
    pub sentiment: Sentiment,
    /// Short supportive reflection.
    pub reflection: String,
}

impl Analysis {
    /// The result substituted when analysis is unavailable.
    #[must_use]
    pub fn fallback() -> Self {
        Self {
            sentiment: Sentiment::Neutral,
            reflection: FALLBACK_REFLECTION.to_string(),
        }
    }
}

/// A journal entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntry {
    /// Unique identifier
    pub id: String,
    /// When the entry was written (milliseconds since the epoch when stored)
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
    /// What the user wrote
    pub content: String,
    /// Detected sentiment, once analysed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<Sentiment>,
    /// Companion reflection, once analysed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_reflection: Option<String>,
}

impl JournalEntry {
    /// Create an unanalysed entry stamped now.
    #[must_use]
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            content: content.into(),
            sentiment: None,
            ai_reflection: None,
        }
    }

    /// Fill in sentiment and reflection.
    pub fn apply_analysis(&mut self, analysis: Analysis) {
        self.sentiment = Some(analysis.sentiment);
        self.ai_reflection = Some(analysis.reflection);
    }

    /// Number of space-separated words.
    #[must_use]
    pub fn word_count(&self) -> usize {
        word_count(&self.content)
    }
}

/// Count space-separated words, ignoring runs of whitespace.
#[must_use]
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_entry_is_unanalysed() {
        let entry = JournalEntry::new("A long day.");
        assert!(entry.sentiment.is_none());
        assert!(entry.ai_reflection.is_none());
        assert!(!entry.id.is_empty());
    }

    #[test]
    fn test_apply_fallback() {
        let mut entry = JournalEntry::new("Something happened.");
        entry.apply_analysis(Analysis::fallback());

        assert_eq!(entry.sentiment, Some(Sentiment::Neutral));
        assert_eq!(entry.ai_reflection.as_deref(), Some(FALLBACK_REFLECTION));
    }

    #[test]
    fn test_serialized_layout() {
        let mut entry = JournalEntry::new("Grateful for the sun.");
        entry.apply_analysis(Analysis {
            sentiment: Sentiment::Positive,
            reflection: "Sunlight matters.".to_string(),
        });

        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["sentiment"], "positive");
        assert_eq!(value["aiReflection"], "Sunlight matters.");
        assert!(value["timestamp"].is_i64());
    }

    #[test]
    fn test_deserialize_without_analysis() {
        let raw = r#"{"id":"1700000000000","timestamp":1700000000000,"content":"hi"}"#;
        let entry: JournalEntry = serde_json::from_str(raw).unwrap();

        assert_eq!(entry.id, "1700000000000");
        assert_eq!(entry.timestamp.timestamp_millis(), 1_700_000_000_000);
        assert!(entry.sentiment.is_none());
    }

    #[test]
    fn test_word_count() {
        assert_eq!(word_count(""), 0);
        assert_eq!(word_count("one"), 1);
        assert_eq!(word_count("  two   words "), 2);
        assert_eq!(JournalEntry::new("a b c").word_count(), 3);
    }
}
