use chrono::{DateTime, Local, Utc};
use colored::{ColoredString, Colorize};

use crate::features::breathing::{render_progress_bar, Phase, SessionSnapshot};
use crate::features::chat::ChatMessage;
use crate::features::home::HomeScreen;
use crate::features::journal::{JournalEntry, Sentiment};
use crate::features::mood::{render_sparkline, render_trend, MoodEntry, MoodScore, MoodStats};
use crate::llm::prompts::CRISIS_FOOTER;

const RULE_WIDTH: usize = 60;
const CHART_WIDTH: usize = 20;

fn rule() -> String {
    "─".repeat(RULE_WIDTH)
}

fn local_time(timestamp: &DateTime<Utc>) -> String {
    timestamp
        .with_timezone(&Local)
        .format("%B %-d, %H:%M")
        .to_string()
}

fn colored_score(score: MoodScore) -> ColoredString {
    let text = format!("{} {}", score.icon(), score.label());
    match score.value() {
        1 => text.red(),
        2 => text.yellow(),
        3 => text.normal(),
        4 => text.bright_green(),
        _ => text.green(),
    }
}

fn sentiment_badge(sentiment: Sentiment) -> ColoredString {
    let text = format!("[{sentiment}]");
    match sentiment {
        Sentiment::Positive => text.green(),
        Sentiment::Neutral => text.dimmed(),
        Sentiment::Negative => text.red(),
    }
}

/// Format the landing screen
pub fn format_home_pretty(home: &HomeScreen) -> String {
    let mut output = format!("{}\n", home.greeting.bold());
    output.push_str(&format!("{}\n\n", home.subtitle.dimmed()));

    for card in &home.cards {
        output.push_str(&format!("{}\n", card.title.cyan().bold()));
        output.push_str(&format!("  {}\n", card.body));
        output.push_str(&format!("  {}\n\n", card.command.dimmed()));
    }

    output.push_str(&format!("{}\n", "Quote of the Moment".bold()));
    output.push_str(&format!("  \"{}\"\n", home.quote.italic()));
    output.push_str(&format!("  {}\n\n", format!("- {}", home.quote_author).dimmed()));
    output.push_str(&home.disclaimer.dimmed().to_string());
    output
}

/// Format a newly logged mood
pub fn format_mood_entry_pretty(entry: &MoodEntry) -> String {
    let mut output = format!("{} {}\n", "Mood logged:".green(), colored_score(entry.score));
    output.push_str(&format!("  {}: {}\n", "When".dimmed(), local_time(&entry.timestamp)));
    if let Some(note) = &entry.note {
        output.push_str(&format!("  {}: {}\n", "Note".dimmed(), note));
    }
    if !entry.tags.is_empty() {
        let tags = entry
            .tags
            .iter()
            .map(|t| format!("#{t}"))
            .collect::<Vec<_>>()
            .join(" ");
        output.push_str(&format!("  {}: {}\n", "Tags".dimmed(), tags.cyan()));
    }
    output
}

/// Format mood entries, newest first
pub fn format_mood_entries_pretty(entries: &[&MoodEntry]) -> String {
    if entries.is_empty() {
        return "Moods (0 entries)\n  Start tracking your emotional journey.".to_string();
    }

    let mut output = format!("Moods ({} entries)\n", entries.len());
    output.push_str(&rule());
    output.push('\n');

    for entry in entries {
        let mut line = format!(
            "{}  {}",
            local_time(&entry.timestamp).dimmed(),
            colored_score(entry.score)
        );
        if let Some(note) = &entry.note {
            line.push_str(&format!("  {note}"));
        }
        if !entry.tags.is_empty() {
            let tags = entry
                .tags
                .iter()
                .map(|t| format!("#{t}"))
                .collect::<Vec<_>>()
                .join(" ");
            line.push_str(&format!("  {}", tags.cyan()));
        }
        output.push_str(&line);
        output.push('\n');
    }

    output
}

/// Format mood statistics
pub fn format_mood_stats_pretty(stats: &MoodStats) -> String {
    let mut output = format!("{}\n", "Mood Tracker".bold());
    output.push_str(&rule());
    output.push('\n');
    output.push_str(&format!(
        "  {}: {}\n",
        "Average mood".dimmed(),
        stats.average_display().bold()
    ));
    output.push_str(&format!("  {}: {}\n", "Total entries".dimmed(), stats.total));

    if stats.trend.is_empty() {
        output.push_str("\n  Log a mood to see your week.\n");
        return output;
    }

    let scores: Vec<MoodScore> = stats.trend.iter().map(|p| p.score).collect();
    output.push_str(&format!("  {}: {}\n\n", "Trend".dimmed(), render_sparkline(&scores)));
    output.push_str(&format!("{}\n", "Your Week".bold()));
    output.push_str(&render_trend(&stats.trend, CHART_WIDTH));
    output.push('\n');
    output
}

/// Format a single journal entry
pub fn format_journal_entry_pretty(entry: &JournalEntry) -> String {
    let mut header = local_time(&entry.timestamp).to_uppercase().dimmed().to_string();
    if let Some(sentiment) = entry.sentiment {
        header.push_str(&format!("  {}", sentiment_badge(sentiment)));
    }

    let mut output = format!("{header}\n{}\n", entry.content);
    if let Some(reflection) = &entry.ai_reflection {
        output.push_str(&format!("  {} {}\n", "✦".cyan(), reflection.italic()));
    }
    output
}

/// Format a newly written journal entry
pub fn format_journal_saved_pretty(entry: &JournalEntry) -> String {
    let mut output = format!(
        "{} ({} words)\n\n",
        "Entry saved.".green(),
        entry.word_count()
    );
    output.push_str(&format_journal_entry_pretty(entry));
    output
}

/// Format journal entries, newest first
pub fn format_journal_entries_pretty(entries: &[&JournalEntry]) -> String {
    if entries.is_empty() {
        return "Recent Entries (0)\n  Your journal is empty. Start writing today.".to_string();
    }

    let mut output = format!("Recent Entries ({})\n", entries.len());
    output.push_str(&rule());
    output.push('\n');

    let formatted: Vec<String> = entries
        .iter()
        .map(|e| format_journal_entry_pretty(e))
        .collect();
    output.push_str(&formatted.join("\n"));
    output
}

/// Format a companion reply
pub fn format_reply_pretty(reply: &ChatMessage) -> String {
    format!(
        "{} {}\n\n{}",
        "Serenity:".cyan().bold(),
        reply.text,
        CRISIS_FOOTER.dimmed()
    )
}

/// Format one line of a plain breathing session
pub fn format_session_pretty(snapshot: &SessionSnapshot, length: u32) -> String {
    let label = match snapshot.phase {
        Phase::Inhale => snapshot.phase.label().cyan(),
        Phase::Exhale => snapshot.phase.label().blue(),
        Phase::Complete => snapshot.phase.label().green().bold(),
        Phase::Idle => snapshot.phase.label().normal(),
    };
    let progress = if length == 0 {
        1.0
    } else {
        1.0 - f64::from(snapshot.seconds_remaining) / f64::from(length)
    };

    format!(
        "{}  {:<16} {}",
        crate::features::breathing::format_mmss(snapshot.seconds_remaining).bold(),
        label,
        render_progress_bar(progress, 20).dimmed()
    )
}
