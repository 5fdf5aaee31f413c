use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap},
};

use crate::models::Notice;

const NOTICE_WIDTH: u16 = 52;

pub fn render(frame: &mut Frame, area: Rect, notice: &Notice) {
    let message_lines = notice.message.lines().count() as u16;
    let popup = centered(area, NOTICE_WIDTH, message_lines + 6);

    let mut content: Vec<Line> = vec![Line::from("")];
    content.extend(notice.message.lines().map(|line| Line::from(line.fg(Color::White))));
    content.push(Line::from(""));
    content.push(Line::from(Span::styled(
        format!("[ {} ]", notice.button_text),
        Style::default().fg(Color::Green).bold(),
    )));

    let widget = Paragraph::new(content)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title(Line::from(notice.title.as_str()).centered().bold())
                .borders(Borders::ALL)
                .border_style(Color::Cyan)
                .padding(Padding::horizontal(1)),
        );

    frame.render_widget(Clear, popup);
    frame.render_widget(widget, popup);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
