//! View models handed to the presentation layer.

/// "Question is shown" state.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizStep {
    pub image: Vec<u8>,
    pub title: String,
    pub question: String,
    /// Position label, e.g. "3/10".
    pub question_number: String,
}

/// What happens when the player dismisses a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeAction {
    /// Re-attempt the full catalog load.
    Retry,
    /// Start a new round.
    Restart,
}

/// A modal message with a single button.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub title: String,
    pub message: String,
    pub button_text: String,
    pub action: NoticeAction,
}

impl Notice {
    pub fn load_failed(message: String) -> Self {
        Self {
            title: "Error".to_string(),
            message,
            button_text: "Try again".to_string(),
            action: NoticeAction::Retry,
        }
    }

    pub fn round_over(summary: String) -> Self {
        Self {
            title: "This round is over!".to_string(),
            message: summary,
            button_text: "Play again".to_string(),
            action: NoticeAction::Restart,
        }
    }
}
