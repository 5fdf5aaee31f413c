//! Quiz session: the round state machine and the task that drives it.

mod runner;
mod state;

pub use runner::{spawn, SessionHandle};
pub use state::{FeedbackTicket, QuizSession, SessionConfig, SessionState};
