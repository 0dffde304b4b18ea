//! Terminal charts for the mood trend.

use super::entry::MoodScore;
use super::stats::TrendPoint;

/// Characters for sparkline rendering.
const BAR_CHARS: [char; 8] = [' ', '▁', '▂', '▃', '▄', '▅', '▆', '▇'];
const FULL_BLOCK: char = '█';

/// Render the trend as one row per entry.
///
/// ```text
/// Mon |████████        2 ☁️
/// Tue |████████████████ 4 ☀️
/// ```
#[must_use]
pub fn render_trend(points: &[TrendPoint], bar_width: usize) -> String {
    points
        .iter()
        .map(|point| {
            let filled = bar_length(point.score, bar_width);
            format!(
                "{} |{}{} {} {}",
                point.day,
                FULL_BLOCK.to_string().repeat(filled),
                " ".repeat(bar_width - filled),
                point.score,
                point.score.icon()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render scores as a compact inline chart.
#[must_use]
pub fn render_sparkline(scores: &[MoodScore]) -> String {
    scores
        .iter()
        .map(|score| {
            let level = usize::from(score.value()) * (BAR_CHARS.len() - 1) / usize::from(MoodScore::MAX);
            BAR_CHARS[level.min(BAR_CHARS.len() - 1)]
        })
        .collect()
}

fn bar_length(score: MoodScore, bar_width: usize) -> usize {
    usize::from(score.value()) * bar_width / usize::from(MoodScore::MAX)
}
