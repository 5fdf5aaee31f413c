//! Messages exchanged between the session, its question source and the
//! presentation layer.
//!
//! Every boundary is an unbounded `mpsc` channel; a closed receiver simply
//! drops further messages.

use crate::error::QuizError;
use crate::models::{Notice, NoticeAction, Question, QuizStep};

/// Requests from the presentation layer to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCommand {
    /// Begin the first round.
    Start,

    /// The player pressed "yes" (`true`) or "no" (`false`).
    Answer { yes: bool },

    /// Re-attempt loading after a failure notice.
    Retry,

    /// Start a new round.
    Restart,

    /// Stop the session task.
    Shutdown,
}

impl From<NoticeAction> for SessionCommand {
    fn from(action: NoticeAction) -> Self {
        match action {
            NoticeAction::Retry => SessionCommand::Retry,
            NoticeAction::Restart => SessionCommand::Restart,
        }
    }
}

/// Instructions from the session to the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewUpdate {
    /// Show a question with its poster and position label.
    ShowQuestion(QuizStep),

    /// Enable or disable the yes/no inputs.
    SetInputEnabled(bool),

    /// Highlight the poster green (correct) or red (wrong).
    ShowAnswerFeedback { correct: bool },

    /// Remove the highlight.
    ClearAnswerFeedback,

    ShowLoading,

    HideLoading,

    /// Present a modal notice; its action is sent back as a command.
    ShowNotice(Notice),
}

/// Output of the question source.
#[derive(Debug)]
pub enum FactoryEvent {
    /// The catalog was replaced with a fresh non-empty list.
    DataLoaded,

    /// Loading the catalog or deriving a question failed.
    DataFailed(QuizError),

    /// A question is ready.
    Question(Question),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_action_maps_to_command() {
        assert_eq!(SessionCommand::from(NoticeAction::Retry), SessionCommand::Retry);
        assert_eq!(SessionCommand::from(NoticeAction::Restart), SessionCommand::Restart);
    }
}
