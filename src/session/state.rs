//! The round state machine.

use std::time::Duration;

use tokio::sync::mpsc;

use crate::factory::QuestionSource;
use crate::models::{GameResult, Notice, Question, QuizStep};
use crate::protocol::{FactoryEvent, SessionCommand, ViewUpdate};
use crate::stats::StatisticService;

/// Where the session is in a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Nothing requested yet.
    Idle,
    /// Catalog load in flight.
    Loading,
    /// Waiting for the next question or for the player's answer to it.
    AwaitingAnswer,
    /// Answer feedback is visible; the advance timer is running.
    Evaluating,
    /// Round summary is on screen, waiting for a restart.
    Finalizing,
    /// A load failed and the retry notice is open.
    Failed,
}

/// Round parameters, fixed for the session's lifetime.
#[derive(Debug, Clone, Copy)]
pub struct SessionConfig {
    pub questions_amount: usize,
    pub feedback_delay: Duration,
}

/// Identifies one scheduled feedback timer.
pub type FeedbackTicket = u64;

/// Single owner of all round state.
///
/// Every input arrives through one of the `handle_*` methods, which the
/// session task calls one at a time.
pub struct QuizSession<S> {
    state: SessionState,
    source: S,
    statistics: StatisticService,
    config: SessionConfig,
    view: mpsc::UnboundedSender<ViewUpdate>,
    timers: mpsc::UnboundedSender<FeedbackTicket>,
    current_question_index: usize,
    correct_answers: usize,
    current_question: Option<Question>,
    feedback_ticket: FeedbackTicket,
}

impl<S: QuestionSource> QuizSession<S> {
    pub fn new(
        source: S,
        statistics: StatisticService,
        config: SessionConfig,
        view: mpsc::UnboundedSender<ViewUpdate>,
        timers: mpsc::UnboundedSender<FeedbackTicket>,
    ) -> Self {
        Self {
            state: SessionState::Idle,
            source,
            statistics,
            config,
            view,
            timers,
            current_question_index: 0,
            correct_answers: 0,
            current_question: None,
            feedback_ticket: 0,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn current_question_index(&self) -> usize {
        self.current_question_index
    }

    pub fn correct_answers(&self) -> usize {
        self.correct_answers
    }

    pub fn statistics(&self) -> &StatisticService {
        &self.statistics
    }

    /// Apply a presentation command. Returns `false` once the session should stop.
    pub fn handle_command(&mut self, command: SessionCommand) -> bool {
        match command {
            SessionCommand::Start if self.state == SessionState::Idle => self.begin_loading(),
            SessionCommand::Answer { yes } => self.answer(yes),
            SessionCommand::Retry if self.state == SessionState::Failed => self.begin_loading(),
            SessionCommand::Restart => self.restart(),
            SessionCommand::Shutdown => return false,
            other => tracing::debug!("Ignoring {:?} in state {:?}", other, self.state),
        }
        true
    }

    pub fn handle_factory_event(&mut self, event: FactoryEvent) {
        match event {
            FactoryEvent::DataLoaded => {
                if self.state != SessionState::Loading {
                    tracing::debug!("Catalog reloaded in state {:?}; nothing to do", self.state);
                    return;
                }
                self.transition(SessionState::AwaitingAnswer);
                self.current_question = None;
                self.source.request_next_question();
            }
            FactoryEvent::Question(question) => {
                if self.state != SessionState::AwaitingAnswer || self.current_question.is_some() {
                    tracing::debug!("Dropping unrequested question in state {:?}", self.state);
                    return;
                }
                self.show_question(question);
            }
            FactoryEvent::DataFailed(error) => {
                let waiting = match self.state {
                    SessionState::Loading => true,
                    SessionState::AwaitingAnswer => self.current_question.is_none(),
                    _ => false,
                };
                if !waiting {
                    tracing::warn!("Ignoring late failure in state {:?}: {}", self.state, error);
                    return;
                }
                tracing::warn!("Failed to load data: {}", error);
                self.transition(SessionState::Failed);
                self.send(ViewUpdate::HideLoading);
                self.send(ViewUpdate::SetInputEnabled(false));
                self.send(ViewUpdate::ShowNotice(Notice::load_failed(error.user_message())));
            }
        }
    }

    /// The answer feedback delay for `ticket` has elapsed.
    pub fn handle_feedback_elapsed(&mut self, ticket: FeedbackTicket) {
        if self.state != SessionState::Evaluating || ticket != self.feedback_ticket {
            return;
        }
        self.send(ViewUpdate::ClearAnswerFeedback);

        if self.is_last_question() {
            self.finish_round();
        } else {
            self.current_question_index += 1;
            self.current_question = None;
            self.transition(SessionState::AwaitingAnswer);
            self.send(ViewUpdate::SetInputEnabled(true));
            self.source.request_next_question();
        }
    }

    fn begin_loading(&mut self) {
        self.transition(SessionState::Loading);
        self.send(ViewUpdate::SetInputEnabled(false));
        self.send(ViewUpdate::ShowLoading);
        self.source.load_data();
    }

    fn restart(&mut self) {
        tracing::info!("Restarting round");
        self.current_question_index = 0;
        self.correct_answers = 0;
        self.current_question = None;
        // Invalidate any timer still in flight.
        self.feedback_ticket += 1;
        self.send(ViewUpdate::ClearAnswerFeedback);
        self.begin_loading();
    }

    fn show_question(&mut self, question: Question) {
        let step = QuizStep {
            image: question.image_data.clone(),
            title: question.title.clone(),
            question: question.text.clone(),
            question_number: format!(
                "{}/{}",
                self.current_question_index + 1,
                self.config.questions_amount
            ),
        };
        self.current_question = Some(question);
        self.send(ViewUpdate::HideLoading);
        self.send(ViewUpdate::ShowQuestion(step));
        self.send(ViewUpdate::SetInputEnabled(true));
    }

    fn answer(&mut self, yes: bool) {
        let correct = match (&self.current_question, self.state) {
            (Some(question), SessionState::AwaitingAnswer) => question.is_correct(yes),
            _ => {
                tracing::debug!("Ignoring answer in state {:?}", self.state);
                return;
            }
        };

        self.send(ViewUpdate::SetInputEnabled(false));
        if correct {
            self.correct_answers += 1;
        }
        debug_assert!(self.correct_answers <= self.current_question_index + 1);

        self.send(ViewUpdate::ShowAnswerFeedback { correct });
        self.transition(SessionState::Evaluating);
        self.schedule_feedback();
    }

    fn schedule_feedback(&mut self) {
        self.feedback_ticket += 1;
        let ticket = self.feedback_ticket;
        let timers = self.timers.clone();
        let delay = self.config.feedback_delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // Fails once the session is gone, which makes the timer a no-op.
            let _ = timers.send(ticket);
        });
    }

    fn is_last_question(&self) -> bool {
        self.current_question_index + 1 >= self.config.questions_amount
    }

    fn finish_round(&mut self) {
        self.transition(SessionState::Finalizing);
        let result = GameResult::now(self.correct_answers, self.config.questions_amount);
        if let Err(e) = self.statistics.store(&result) {
            tracing::error!("Failed to persist round result: {}", e);
        }
        tracing::info!("Round finished: {}/{}", result.correct, result.total);

        let summary = self.round_summary(&result);
        self.send(ViewUpdate::ShowNotice(Notice::round_over(summary)));
    }

    fn round_summary(&self, result: &GameResult) -> String {
        let best = self.statistics.best_game();
        format!(
            "Your result: {}/{}\nQuizzes played: {}\nRecord: {}/{} ({})\nAverage accuracy: {:.2}%",
            result.correct,
            result.total,
            self.statistics.games_count(),
            best.correct,
            best.total,
            best.date,
            self.statistics.total_accuracy()
        )
    }

    fn transition(&mut self, next: SessionState) {
        tracing::debug!("Session {:?} -> {:?}", self.state, next);
        self.state = next;
    }

    fn send(&self, update: ViewUpdate) {
        // A closed view drops presentation calls.
        let _ = self.view.send(update);
    }
}
