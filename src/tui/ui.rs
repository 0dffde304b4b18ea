//! UI rendering for the breathing screen.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

use crate::features::breathing::{format_mmss, Phase};
use crate::tui::app::App;

/// Render the application UI.
pub fn render(frame: &mut Frame<'_>, app: &App) {
    // Header, phase, timer, progress, status bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(frame.area());

    render_header(frame, chunks[0]);
    render_phase(frame, app, chunks[1]);
    render_timer(frame, app, chunks[2]);
    render_progress(frame, app, chunks[3]);
    render_status_bar(frame, app, chunks[4]);
}

const fn phase_color(phase: Phase) -> Color {
    match phase {
        Phase::Idle => Color::Gray,
        Phase::Inhale => Color::Cyan,
        Phase::Exhale => Color::Blue,
        Phase::Complete => Color::Green,
    }
}

fn render_header(frame: &mut Frame<'_>, area: Rect) {
    let header = Paragraph::new(" Breathe ")
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );

    frame.render_widget(header, area);
}

fn render_phase(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let phase = app.snapshot().phase;
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1), Constraint::Min(0)])
        .split(area);

    let label = Paragraph::new(Line::from(Span::styled(
        phase.label(),
        Style::default()
            .fg(phase_color(phase))
            .add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center);

    frame.render_widget(label, rows[1]);
}

fn render_timer(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let timer = Paragraph::new(format_mmss(app.snapshot().seconds_remaining))
        .alignment(Alignment::Center)
        .style(Style::default().add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(timer, area);
}

fn render_progress(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let phase = app.snapshot().phase;
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL))
        .gauge_style(Style::default().fg(phase_color(phase)))
        .ratio(app.progress().clamp(0.0, 1.0))
        .label("");

    frame.render_widget(gauge, area);
}

fn render_status_bar(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let help = format!("space:{} | r:reset | q:quit", app.control_label());
    let status_text = app.status.as_deref().unwrap_or(&help);

    let status = Paragraph::new(status_text).style(Style::default().fg(Color::DarkGray));

    frame.render_widget(status, area);
}
