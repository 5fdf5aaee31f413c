//! Runtime configuration.
//!
//! Values come from the environment (optionally seeded from a `.env` file);
//! the binary lets command-line flags override a few of them.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use dotenvy::dotenv;
use url::Url;

use crate::error::QuizError;

/// Top-250 endpoint queried when `MOVIE_QUIZ_API_URL` is unset.
pub const DEFAULT_MOVIES_URL: &str = "https://tv-api.com/en/API/Top250Movies/k_zcuw1ytf";

/// Number of questions in one round.
pub const DEFAULT_QUESTIONS_AMOUNT: usize = 10;

/// How long the answer feedback stays visible.
pub const DEFAULT_FEEDBACK_DELAY: Duration = Duration::from_secs(1);

#[derive(Debug, Clone)]
pub struct Config {
    pub movies_url: Url,
    pub stats_path: PathBuf,
    pub questions_amount: usize,
    pub feedback_delay: Duration,
    pub http_timeout: Option<Duration>,
    pub log_dir: PathBuf,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self, QuizError> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, QuizError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw_url = lookup("MOVIE_QUIZ_API_URL").unwrap_or_else(|| DEFAULT_MOVIES_URL.to_string());
        let movies_url = parse_url(&raw_url)?;

        let stats_path = lookup("MOVIE_QUIZ_STATS_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("movie-quiz-stats.json"));

        let questions_amount = match lookup("MOVIE_QUIZ_QUESTIONS") {
            Some(raw) => parse_number::<usize>("MOVIE_QUIZ_QUESTIONS", &raw)?,
            None => DEFAULT_QUESTIONS_AMOUNT,
        };
        if questions_amount == 0 {
            return Err(QuizError::Config(
                "MOVIE_QUIZ_QUESTIONS must be at least 1".to_string(),
            ));
        }

        let feedback_delay = match lookup("MOVIE_QUIZ_FEEDBACK_MS") {
            Some(raw) => Duration::from_millis(parse_number("MOVIE_QUIZ_FEEDBACK_MS", &raw)?),
            None => DEFAULT_FEEDBACK_DELAY,
        };

        let http_timeout = lookup("MOVIE_QUIZ_HTTP_TIMEOUT_SECS")
            .map(|raw| parse_number("MOVIE_QUIZ_HTTP_TIMEOUT_SECS", &raw).map(Duration::from_secs))
            .transpose()?;

        let log_dir = lookup("MOVIE_QUIZ_LOG_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("logs"));

        let rust_log = lookup("RUST_LOG").unwrap_or_else(|| "info".to_string());

        Ok(Self {
            movies_url,
            stats_path,
            questions_amount,
            feedback_delay,
            http_timeout,
            log_dir,
            rust_log,
        })
    }

    /// Replace the catalog endpoint, validating it first.
    pub fn with_movies_url(mut self, raw: &str) -> Result<Self, QuizError> {
        self.movies_url = parse_url(raw)?;
        Ok(self)
    }
}

fn parse_url(raw: &str) -> Result<Url, QuizError> {
    let url = Url::parse(raw).map_err(|e| QuizError::Config(format!("bad movies URL {}: {}", raw, e)))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(QuizError::Config(format!(
            "movies URL must be http(s), got {}",
            other
        ))),
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T, QuizError> {
    raw.trim()
        .parse()
        .map_err(|_| QuizError::Config(format!("{} is not a valid number: {}", key, raw)))
}
