use crossterm::event::KeyCode;

use crate::models::{GameResult, Notice, NoticeAction, QuizStep};
use crate::protocol::{SessionCommand, ViewUpdate};
use crate::stats::StatisticService;

/// Which screen the terminal shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Welcome,
    Quiz,
}

/// What the welcome screen tells the player before the first round.
#[derive(Debug, Clone, PartialEq)]
pub struct Lobby {
    pub questions_amount: usize,
    pub games_played: u64,
    /// `None` until a round has been stored.
    pub best_game: Option<GameResult>,
}

impl Lobby {
    pub fn new(questions_amount: usize, statistics: &StatisticService) -> Self {
        let games_played = statistics.games_count();
        Self {
            questions_amount,
            games_played,
            best_game: (games_played > 0).then(|| statistics.best_game()),
        }
    }
}

impl Default for Lobby {
    fn default() -> Self {
        Self {
            questions_amount: crate::config::DEFAULT_QUESTIONS_AMOUNT,
            games_played: 0,
            best_game: None,
        }
    }
}

/// Terminal-side mirror of what the session asked to display.
pub struct App {
    pub screen: Screen,
    lobby: Lobby,
    step: Option<QuizStep>,
    input_enabled: bool,
    feedback: Option<bool>,
    loading: bool,
    notice: Option<Notice>,
    pub should_quit: bool,
}

impl App {
    pub fn new() -> Self {
        Self::with_lobby(Lobby::default())
    }

    pub fn with_lobby(lobby: Lobby) -> Self {
        Self {
            screen: Screen::Welcome,
            lobby,
            step: None,
            input_enabled: false,
            feedback: None,
            loading: false,
            notice: None,
            should_quit: false,
        }
    }

    pub fn lobby(&self) -> &Lobby {
        &self.lobby
    }

    pub fn step(&self) -> Option<&QuizStep> {
        self.step.as_ref()
    }

    pub fn input_enabled(&self) -> bool {
        self.input_enabled
    }

    /// `Some(true)` for a correct answer, `Some(false)` for a wrong one.
    pub fn feedback(&self) -> Option<bool> {
        self.feedback
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn apply(&mut self, update: ViewUpdate) {
        match update {
            ViewUpdate::ShowQuestion(step) => self.step = Some(step),
            ViewUpdate::SetInputEnabled(enabled) => self.input_enabled = enabled,
            ViewUpdate::ShowAnswerFeedback { correct } => self.feedback = Some(correct),
            ViewUpdate::ClearAnswerFeedback => self.feedback = None,
            ViewUpdate::ShowLoading => self.loading = true,
            ViewUpdate::HideLoading => self.loading = false,
            ViewUpdate::ShowNotice(notice) => self.notice = Some(notice),
        }
    }

    /// Translate a key press into a session command, if it maps to one.
    pub fn handle_key(&mut self, key: KeyCode) -> Option<SessionCommand> {
        if matches!(key, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc) {
            self.should_quit = true;
            return Some(SessionCommand::Shutdown);
        }

        if self.notice.is_some() {
            return match key {
                KeyCode::Enter | KeyCode::Char(' ') => self.dismiss_notice(),
                _ => None,
            };
        }

        match self.screen {
            Screen::Welcome => match key {
                KeyCode::Enter => {
                    self.screen = Screen::Quiz;
                    Some(SessionCommand::Start)
                }
                _ => None,
            },
            Screen::Quiz => match key {
                KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Right | KeyCode::Char('l') => {
                    self.submit_answer(true)
                }
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Left | KeyCode::Char('h') => {
                    self.submit_answer(false)
                }
                _ => None,
            },
        }
    }

    fn submit_answer(&mut self, yes: bool) -> Option<SessionCommand> {
        if !self.input_enabled || self.step.is_none() {
            return None;
        }
        // The session disables input too; this only stops key repeat.
        self.input_enabled = false;
        Some(SessionCommand::Answer { yes })
    }

    fn dismiss_notice(&mut self) -> Option<SessionCommand> {
        let notice = self.notice.take()?;
        if notice.action == NoticeAction::Restart {
            self.step = None;
        }
        Some(notice.action.into())
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
