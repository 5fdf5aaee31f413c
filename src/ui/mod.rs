mod notice;
mod quiz;
mod welcome;

use ratatui::{prelude::*, widgets::Block};

use crate::app::{App, Screen};

pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    frame.render_widget(Block::default().bg(Color::Reset), area);

    match app.screen {
        Screen::Welcome => welcome::render(frame, area, app.lobby()),
        Screen::Quiz => quiz::render(frame, area, app),
    }

    if let Some(notice) = app.notice() {
        notice::render(frame, area, notice);
    }
}
