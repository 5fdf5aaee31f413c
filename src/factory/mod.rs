//! Question derivation from the movie catalog.

mod question_factory;

pub use question_factory::{compose_question, QuestionFactory};

/// What the session needs from its question supplier.
///
/// Both calls return immediately; outcomes arrive later as
/// [`FactoryEvent`](crate::protocol::FactoryEvent)s.
pub trait QuestionSource: Send {
    /// (Re)load the movie catalog.
    fn load_data(&self);

    /// Derive one question from the loaded catalog.
    fn request_next_question(&self);
}
