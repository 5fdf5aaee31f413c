use chrono::Local;

/// Timestamp format used for stored rounds.
pub const DATE_FORMAT: &str = "%d.%m.%y %H:%M";

/// Outcome of one completed round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameResult {
    pub correct: usize,
    pub total: usize,
    pub date: String,
}

impl GameResult {
    /// Result stamped with the current local time.
    pub fn now(correct: usize, total: usize) -> Self {
        Self {
            correct,
            total,
            date: current_timestamp(),
        }
    }

    /// Compares by correct answers only; ties are not better.
    pub fn is_better_than(&self, other: &GameResult) -> bool {
        self.correct > other.correct
    }
}

pub fn current_timestamp() -> String {
    Local::now().format(DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(correct: usize) -> GameResult {
        GameResult {
            correct,
            total: 10,
            date: "01.02.25 10:00".to_string(),
        }
    }

    #[test]
    fn test_is_better_than_is_strict() {
        assert!(result(7).is_better_than(&result(6)));
        assert!(!result(6).is_better_than(&result(6)));
        assert!(!result(5).is_better_than(&result(6)));
    }

    #[test]
    fn test_now_uses_date_format() {
        let result = GameResult::now(3, 10);
        // dd.mm.yy hh:mm
        assert_eq!(result.date.len(), 14);
        assert_eq!(&result.date[2..3], ".");
        assert_eq!(&result.date[8..9], " ");
    }
}
