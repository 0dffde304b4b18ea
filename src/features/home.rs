//! The landing screen.

use chrono::{Local, Timelike};
use serde::Serialize;

/// Quote shown on the landing screen.
pub const QUOTE: &str = "Peace comes from within. Do not seek it without.";
/// Author of [`QUOTE`].
pub const QUOTE_AUTHOR: &str = "Buddha";
/// Medical disclaimer.
pub const DISCLAIMER: &str = "This application uses AI to support your wellness journey \
but is not a replacement for professional medical advice.";

/// A prompt pointing at one of the tools.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HomeCard {
    /// Heading.
    pub title: &'static str,
    /// Prompt text.
    pub body: &'static str,
    /// Command that opens the tool.
    pub command: &'static str,
}

/// Everything shown on the landing screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HomeScreen {
    /// Time-of-day greeting.
    pub greeting: &'static str,
    /// Line under the greeting.
    pub subtitle: &'static str,
    /// Tool prompts.
    pub cards: Vec<HomeCard>,
    /// Quote of the moment.
    pub quote: &'static str,
    /// Author of the quote.
    pub quote_author: &'static str,
    /// Medical disclaimer.
    pub disclaimer: &'static str,
}

impl HomeScreen {
    /// Build the screen for the current local time.
    #[must_use]
    pub fn now(has_moods: bool) -> Self {
        Self::at_hour(Local::now().hour(), has_moods)
    }

    /// Build the screen for a given hour of the day (0-23).
    #[must_use]
    pub fn at_hour(hour: u32, has_moods: bool) -> Self {
        let check_in = if has_moods {
            "Keep your streak going. Log your mood today."
        } else {
            "Start tracking your emotional journey."
        };

        Self {
            greeting: greeting_for(hour),
            subtitle: "Take a moment for yourself today.",
            cards: vec![
                HomeCard {
                    title: "Talk to Serenity",
                    body: "Feeling overwhelmed? Let's chat about it in a safe space.",
                    command: "serenity chat",
                },
                HomeCard {
                    title: "Check In",
                    body: check_in,
                    command: "serenity mood add <1-5>",
                },
                HomeCard {
                    title: "Journal",
                    body: "Write down what's on your mind.",
                    command: "serenity journal write",
                },
                HomeCard {
                    title: "Breathe",
                    body: "A one-minute guided breathing exercise.",
                    command: "serenity breathe",
                },
            ],
            quote: QUOTE,
            quote_author: QUOTE_AUTHOR,
            disclaimer: DISCLAIMER,
        }
    }
}

const fn greeting_for(hour: u32) -> &'static str {
    match hour {
        0..=11 => "Good Morning.",
        12..=17 => "Good Afternoon.",
        _ => "Good Evening.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_greeting_by_hour() {
        assert_eq!(HomeScreen::at_hour(7, false).greeting, "Good Morning.");
        assert_eq!(HomeScreen::at_hour(12, false).greeting, "Good Afternoon.");
        assert_eq!(HomeScreen::at_hour(21, false).greeting, "Good Evening.");
    }

    #[test]
    fn test_check_in_text_depends_on_history() {
        let fresh = HomeScreen::at_hour(9, false);
        let returning = HomeScreen::at_hour(9, true);

        assert_eq!(fresh.cards[1].body, "Start tracking your emotional journey.");
        assert_eq!(
            returning.cards[1].body,
            "Keep your streak going. Log your mood today."
        );
    }
}
