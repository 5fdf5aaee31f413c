//! Error types shared across the quiz pipeline.

use thiserror::Error;

/// Failure of a single HTTP request.
#[derive(Debug, Error)]
pub enum NetworkError {
    /// Connection, DNS, timeout or body read failure.
    #[error("transport error: {0}")]
    Transport(String),

    /// The server answered with a status outside `200..300`.
    #[error("unexpected HTTP status {0}")]
    Status(u16),
}

/// Errors surfaced by the quiz engine.
///
/// Every variant is recoverable: the session turns them into a retry notice.
#[derive(Debug, Error)]
pub enum QuizError {
    /// Catalog request failed at the network level.
    #[error(transparent)]
    Network(#[from] NetworkError),

    /// Catalog payload did not match the expected schema.
    #[error("failed to decode movie list: {0}")]
    Decode(#[from] serde_json::Error),

    /// The movie API answered 200 but reported an error in the payload.
    #[error("movie API error: {0}")]
    Api(String),

    /// Poster bytes for the chosen movie could not be fetched.
    #[error("failed to load poster: {0}")]
    ImageLoad(#[source] NetworkError),

    /// A question was requested while no movies are loaded.
    #[error("movie catalog is empty")]
    EmptyCatalog,

    /// Reading or writing persisted statistics failed.
    #[error("statistics storage error: {0}")]
    Storage(#[source] std::io::Error),

    /// Terminal setup, drawing or input failed.
    #[error("terminal error: {0}")]
    Terminal(#[from] std::io::Error),

    /// Invalid configuration value.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl QuizError {
    /// Message shown to the player in the retry notice.
    pub fn user_message(&self) -> String {
        match self {
            QuizError::Network(_) | QuizError::Decode(_) => {
                "Unable to load data. Check your connection and try again.".to_string()
            }
            QuizError::Api(message) => format!("The movie service refused the request: {}", message),
            QuizError::ImageLoad(_) => "Unable to load the movie poster.".to_string(),
            QuizError::EmptyCatalog => "No movies are available yet.".to_string(),
            QuizError::Storage(_) | QuizError::Terminal(_) | QuizError::Config(_) => self.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_error_converts_into_quiz_error() {
        let err: QuizError = NetworkError::Status(404).into();
        assert!(matches!(err, QuizError::Network(NetworkError::Status(404))));
        assert_eq!(err.to_string(), "unexpected HTTP status 404");
    }

    #[test]
    fn test_user_message_is_never_empty() {
        let errors = [
            QuizError::Network(NetworkError::Transport("dns".to_string())),
            QuizError::Api("Invalid API Key".to_string()),
            QuizError::ImageLoad(NetworkError::Status(500)),
            QuizError::EmptyCatalog,
        ];
        for err in errors {
            assert!(!err.user_message().is_empty());
        }
        assert!(
            QuizError::Api("Invalid API Key".to_string())
                .user_message()
                .contains("Invalid API Key")
        );
    }
}
