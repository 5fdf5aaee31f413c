use std::path::PathBuf;

use clap::Parser;
use movie_quiz::{Config, MovieQuiz};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Movie list endpoint (overrides MOVIE_QUIZ_API_URL)
    #[arg(short, long)]
    api_url: Option<String>,

    /// File the lifetime statistics are kept in (overrides MOVIE_QUIZ_STATS_FILE)
    #[arg(short, long)]
    stats_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let config = match load_config(args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    };

    // The TUI owns stdout, so logs only go to a file.
    let file_appender = tracing_appender::rolling::daily(&config.log_dir, "movie-quiz.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::registry()
        .with(EnvFilter::new(&config.rust_log))
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    if let Err(e) = MovieQuiz::new(config).run().await {
        tracing::error!("Quiz terminated: {}", e);
        eprintln!("Error running quiz: {}", e);
        std::process::exit(1);
    }
}

fn load_config(args: Args) -> Result<Config, movie_quiz::QuizError> {
    let mut config = Config::from_env()?;
    if let Some(url) = args.api_url {
        config = config.with_movies_url(&url)?;
    }
    if let Some(path) = args.stats_file {
        config.stats_path = path;
    }
    Ok(config)
}
