//! # movie-quiz
//!
//! A yes/no quiz about movie ratings. Each round asks ten questions derived
//! from a remotely loaded Top-250 list, keeps score, and records lifetime
//! statistics.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use movie_quiz::{Config, MovieQuiz, QuizError};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), QuizError> {
//!     let config = Config::from_env()?;
//!     MovieQuiz::new(config).run().await
//! }
//! ```
//!
//! The engine can also be driven without the terminal front-end: spawn a
//! session with [`session::spawn`], send it [`SessionCommand`]s through the
//! returned [`SessionHandle`], and consume the [`ViewUpdate`] stream.

mod app;
pub mod config;
pub mod data;
pub mod error;
pub mod factory;
pub mod models;
pub mod protocol;
pub mod session;
pub mod stats;
pub mod terminal;
mod ui;

use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use tokio::sync::mpsc;

pub use app::{App, Lobby, Screen};
pub use config::Config;
pub use data::{MoviesLoader, MoviesLoading, NetworkClient, NetworkRouting};
pub use error::{NetworkError, QuizError};
pub use factory::{QuestionFactory, QuestionSource};
pub use models::{GameResult, MovieRecord, Notice, NoticeAction, Question, QuizStep};
pub use protocol::{FactoryEvent, SessionCommand, ViewUpdate};
pub use session::{SessionConfig, SessionHandle, SessionState};
pub use stats::{JsonFileStore, KeyValueStore, MemoryStore, StatisticService};

/// How long to wait for a key press before redrawing.
const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// The quiz wired to the network, the statistics file and the terminal.
pub struct MovieQuiz {
    config: Config,
}

impl MovieQuiz {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Run the quiz in the terminal until the player quits.
    pub async fn run(self) -> Result<(), QuizError> {
        let config = self.config;

        let network: Arc<dyn NetworkRouting> = Arc::new(NetworkClient::new(config.http_timeout)?);
        let loader = MoviesLoader::new(Arc::clone(&network), config.movies_url.clone());
        tracing::info!("Starting movie quiz against {}", loader.url());
        let loader: Arc<dyn MoviesLoading> = Arc::new(loader);

        let store = JsonFileStore::open(&config.stats_path).map_err(QuizError::Storage)?;
        tracing::info!("Keeping statistics in {}", store.path().display());
        let statistics = StatisticService::new(Box::new(store), config.questions_amount);
        let lobby = Lobby::new(config.questions_amount, &statistics);

        let (session, mut updates) = session::spawn(
            move |events| QuestionFactory::new(loader, network, events),
            statistics,
            SessionConfig {
                questions_amount: config.questions_amount,
                feedback_delay: config.feedback_delay,
            },
        );

        let mut app = App::with_lobby(lobby);
        let mut term = terminal::init()?;
        let result = run_event_loop(&mut term, &mut app, &session, &mut updates);
        terminal::restore()?;

        session.shutdown().await;
        result
    }
}

fn run_event_loop(
    terminal: &mut terminal::QuizTerminal,
    app: &mut App,
    session: &SessionHandle,
    updates: &mut mpsc::UnboundedReceiver<ViewUpdate>,
) -> Result<(), QuizError> {
    loop {
        while let Ok(update) = updates.try_recv() {
            app.apply(update);
        }

        terminal.draw(|frame| ui::render(frame, app))?;

        if app.should_quit {
            break;
        }

        if event::poll(INPUT_POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if let Some(command) = app.handle_key(key.code) {
                    session.send(command);
                }
            }
        }
    }

    Ok(())
}
