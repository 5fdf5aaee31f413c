use crate::error::QuizError;
use crate::models::{current_timestamp, GameResult};

use super::KeyValueStore;

mod keys {
    pub const GAMES_COUNT: &str = "games_count";
    pub const CORRECT_ANSWERS: &str = "correct_answers";
    pub const BEST_GAME_CORRECT: &str = "best_game_correct";
    pub const BEST_GAME_TOTAL: &str = "best_game_total";
    pub const BEST_GAME_DATE: &str = "best_game_date";
}

/// Cumulative statistics over every round ever played.
pub struct StatisticService {
    storage: Box<dyn KeyValueStore>,
    /// Round length assumed by [`total_accuracy`](Self::total_accuracy).
    questions_amount: usize,
}

impl StatisticService {
    pub fn new(storage: Box<dyn KeyValueStore>, questions_amount: usize) -> Self {
        Self {
            storage,
            questions_amount,
        }
    }

    pub fn games_count(&self) -> u64 {
        self.storage.integer(keys::GAMES_COUNT)
    }

    pub fn correct_answers(&self) -> u64 {
        self.storage.integer(keys::CORRECT_ANSWERS)
    }

    /// Best round so far. Before any round is stored this is `0/0` dated now.
    pub fn best_game(&self) -> GameResult {
        self.recorded_best().unwrap_or_else(|| GameResult {
            correct: 0,
            total: 0,
            date: current_timestamp(),
        })
    }

    fn recorded_best(&self) -> Option<GameResult> {
        let date = self.storage.string(keys::BEST_GAME_DATE)?;
        Some(GameResult {
            correct: self.storage.integer(keys::BEST_GAME_CORRECT) as usize,
            total: self.storage.integer(keys::BEST_GAME_TOTAL) as usize,
            date,
        })
    }

    /// Percentage of correct answers over all rounds, truncated to a whole
    /// number before conversion.
    pub fn total_accuracy(&self) -> f64 {
        let games = self.games_count();
        if games == 0 || self.questions_amount == 0 {
            return 0.0;
        }
        let asked = self.questions_amount as u64 * games;
        (100 * self.correct_answers() / asked) as f64
    }

    /// Record a finished round and persist the new totals.
    pub fn store(&mut self, result: &GameResult) -> Result<(), QuizError> {
        let games = self.games_count() + 1;
        let correct = self.correct_answers() + result.correct as u64;
        self.storage.set_integer(keys::GAMES_COUNT, games);
        self.storage.set_integer(keys::CORRECT_ANSWERS, correct);

        let replaces_best = match self.recorded_best() {
            Some(best) => result.is_better_than(&best),
            None => true,
        };
        if replaces_best {
            tracing::info!("New best round: {}/{}", result.correct, result.total);
            self.storage.set_integer(keys::BEST_GAME_CORRECT, result.correct as u64);
            self.storage.set_integer(keys::BEST_GAME_TOTAL, result.total as u64);
            self.storage.set_string(keys::BEST_GAME_DATE, &result.date);
        }

        self.storage.flush().map_err(QuizError::Storage)
    }
}
