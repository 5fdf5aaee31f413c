use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph},
};

use crate::app::Lobby;

pub fn render(frame: &mut Frame, area: Rect, lobby: &Lobby) {
    let lines = lobby_lines(lobby);
    let [_, panel, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(lines.len() as u16 + 4),
        Constraint::Fill(1),
    ])
    .areas(area);
    let [_, panel, _] = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Max(48),
        Constraint::Fill(1),
    ])
    .areas(panel);

    let widget = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .title(Line::from(" MOVIE QUIZ ").centered().fg(Color::Cyan).bold())
            .borders(Borders::ALL)
            .border_style(Color::DarkGray)
            .padding(Padding::vertical(1)),
    );
    frame.render_widget(widget, panel);
}

fn lobby_lines(lobby: &Lobby) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(format!(
            "{} questions about Top-250 ratings",
            lobby.questions_amount
        )),
        Line::from("Answer yes or no".fg(Color::DarkGray)),
        Line::from(""),
    ];

    match &lobby.best_game {
        Some(best) => {
            lines.push(Line::from(format!("Quizzes played: {}", lobby.games_played)));
            lines.push(Line::from(Span::styled(
                format!("Record: {}/{} ({})", best.correct, best.total, best.date),
                Style::default().fg(Color::Yellow),
            )));
        }
        None => lines.push(Line::from("No rounds played yet".fg(Color::DarkGray))),
    }

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("ENTER", Style::default().fg(Color::Green).bold()),
        Span::raw(" start  "),
        Span::styled("y/n", Style::default().fg(Color::Green).bold()),
        Span::raw(" answer  "),
        Span::styled("q", Style::default().fg(Color::Green).bold()),
        Span::raw(" quit"),
    ]));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GameResult;

    fn text(lines: &[Line]) -> Vec<String> {
        lines.iter().map(|line| line.to_string()).collect()
    }

    #[test]
    fn test_first_visit() {
        let lines = text(&lobby_lines(&Lobby::default()));
        assert_eq!(lines[0], "10 questions about Top-250 ratings");
        assert!(lines.contains(&"No rounds played yet".to_string()));
        assert!(lines.last().unwrap().contains("y/n answer"));
    }

    #[test]
    fn test_returning_player() {
        let lobby = Lobby {
            questions_amount: 5,
            games_played: 3,
            best_game: Some(GameResult {
                correct: 4,
                total: 5,
                date: "02.03.25 18:40".to_string(),
            }),
        };
        let lines = text(&lobby_lines(&lobby));
        assert_eq!(lines[0], "5 questions about Top-250 ratings");
        assert!(lines.contains(&"Quizzes played: 3".to_string()));
        assert!(lines.contains(&"Record: 4/5 (02.03.25 18:40)".to_string()));
    }
}
