use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
};

use crate::app::App;
use crate::models::QuizStep;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(4),
        Constraint::Length(1),
    ])
    .margin(2)
    .split(area);

    let Some(step) = app.step() else {
        render_placeholder(frame, chunks[1], app.is_loading());
        render_controls(frame, chunks[3], false);
        return;
    };

    render_progress(frame, chunks[0], step);
    render_poster(frame, chunks[1], step, app.feedback());
    render_question_text(frame, chunks[2], &step.question);
    render_controls(frame, chunks[3], app.input_enabled());
}

fn render_placeholder(frame: &mut Frame, area: Rect, loading: bool) {
    let text = if loading { "Loading movies..." } else { "" };
    let widget = Paragraph::new(text)
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}

fn render_progress(frame: &mut Frame, area: Rect, step: &QuizStep) {
    let widget = Paragraph::new(step.question_number.as_str())
        .alignment(Alignment::Right)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}

/// The poster cannot be drawn in a terminal; show what it is instead.
/// The border carries the answer feedback colour.
fn render_poster(frame: &mut Frame, area: Rect, step: &QuizStep, feedback: Option<bool>) {
    let border_color = match feedback {
        Some(true) => Color::Green,
        Some(false) => Color::Red,
        None => Color::DarkGray,
    };

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            step.title.as_str(),
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("poster · {}", format_size(step.image.len())),
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_color)
            .padding(Padding::vertical(1)),
    );
    frame.render_widget(widget, area);
}

fn format_size(bytes: usize) -> String {
    if bytes >= 1024 {
        format!("{} KB", bytes / 1024)
    } else {
        format!("{} B", bytes)
    }
}

fn render_question_text(frame: &mut Frame, area: Rect, text: &str) {
    let widget = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .fg(Color::White)
        .bold();
    frame.render_widget(widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect, enabled: bool) {
    let color = if enabled { Color::Gray } else { Color::DarkGray };
    let widget = Paragraph::new("n/← no  ·  y/→ yes  ·  q quit")
        .alignment(Alignment::Center)
        .fg(color);
    frame.render_widget(widget, area);
}
