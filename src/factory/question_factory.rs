use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::sync::{mpsc, Mutex, RwLock};

use crate::data::{MoviesLoading, NetworkRouting};
use crate::error::QuizError;
use crate::models::{MovieRecord, Question};
use crate::protocol::FactoryEvent;

use super::QuestionSource;

/// Thresholds are drawn from `MIN_THRESHOLD..MAX_THRESHOLD`.
const MIN_THRESHOLD: u32 = 7;
const MAX_THRESHOLD: u32 = 10;

/// Coin values above this ask "greater than", the rest "less than".
const GREATER_THAN_CUTOFF: u32 = 49;

/// Derives rating questions from a remotely loaded movie catalog.
///
/// Work runs on spawned tasks; results are reported through the event
/// channel handed in at construction.
#[derive(Clone)]
pub struct QuestionFactory {
    inner: Arc<Inner>,
}

struct Inner {
    loader: Arc<dyn MoviesLoading>,
    network: Arc<dyn NetworkRouting>,
    /// Replaced whole on every successful load.
    movies: RwLock<Arc<[MovieRecord]>>,
    rng: Mutex<StdRng>,
    events: mpsc::UnboundedSender<FactoryEvent>,
}

impl QuestionFactory {
    pub fn new(
        loader: Arc<dyn MoviesLoading>,
        network: Arc<dyn NetworkRouting>,
        events: mpsc::UnboundedSender<FactoryEvent>,
    ) -> Self {
        Self::with_rng(loader, network, events, StdRng::from_entropy())
    }

    /// Factory with a reproducible random sequence.
    pub fn with_seed(
        loader: Arc<dyn MoviesLoading>,
        network: Arc<dyn NetworkRouting>,
        events: mpsc::UnboundedSender<FactoryEvent>,
        seed: u64,
    ) -> Self {
        Self::with_rng(loader, network, events, StdRng::seed_from_u64(seed))
    }

    fn with_rng(
        loader: Arc<dyn MoviesLoading>,
        network: Arc<dyn NetworkRouting>,
        events: mpsc::UnboundedSender<FactoryEvent>,
        rng: StdRng,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                loader,
                network,
                movies: RwLock::new(Arc::from(Vec::new())),
                rng: Mutex::new(rng),
                events,
            }),
        }
    }

    /// Snapshot of the current catalog.
    pub async fn movies(&self) -> Arc<[MovieRecord]> {
        Arc::clone(&*self.inner.movies.read().await)
    }
}

impl QuestionSource for QuestionFactory {
    fn load_data(&self) {
        tokio::spawn(Arc::clone(&self.inner).load());
    }

    fn request_next_question(&self) {
        tokio::spawn(Arc::clone(&self.inner).next_question());
    }
}

impl Inner {
    fn emit(&self, event: FactoryEvent) {
        // The session may already be gone; nothing to report to then.
        let _ = self.events.send(event);
    }

    async fn load(self: Arc<Self>) {
        match self.loader.load_movies().await {
            Ok(movies) if movies.is_empty() => {
                tracing::warn!("Movie catalog loaded but contains no movies");
                self.emit(FactoryEvent::DataFailed(QuizError::EmptyCatalog));
            }
            Ok(movies) => {
                *self.movies.write().await = Arc::from(movies);
                self.emit(FactoryEvent::DataLoaded);
            }
            Err(e) => {
                tracing::error!("Failed to load movie catalog: {}", e);
                self.emit(FactoryEvent::DataFailed(e));
            }
        }
    }

    async fn next_question(self: Arc<Self>) {
        let movies = Arc::clone(&*self.movies.read().await);
        if movies.is_empty() {
            tracing::warn!("Question requested before the catalog was loaded; reloading");
            tokio::spawn(Arc::clone(&self).load());
            self.emit(FactoryEvent::DataFailed(QuizError::EmptyCatalog));
            return;
        }

        let (index, threshold, coin) = {
            let mut rng = self.rng.lock().await;
            (
                rng.gen_range(0..movies.len()),
                rng.gen_range(MIN_THRESHOLD..MAX_THRESHOLD),
                rng.gen_range(0..100),
            )
        };
        let movie = &movies[index];

        let image_data = match self.network.fetch(&movie.resized_poster_url()).await {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::error!("Failed to load poster for {}: {}", movie.title, e);
                self.emit(FactoryEvent::DataFailed(QuizError::ImageLoad(e)));
                return;
            }
        };

        let question = compose_question(movie, image_data, threshold, coin);
        tracing::debug!("Prepared question about {}", movie.title);
        self.emit(FactoryEvent::Question(question));
    }
}

/// Build the question for `movie` from already drawn random values.
pub fn compose_question(movie: &MovieRecord, image_data: Vec<u8>, threshold: u32, coin: u32) -> Question {
    let (text, correct_answer) = if coin > GREATER_THAN_CUTOFF {
        (
            format!("Is the rating of this movie greater than {}?", threshold),
            movie.rating > f64::from(threshold),
        )
    } else {
        (
            format!("Is the rating of this movie less than {}?", threshold),
            movie.rating < f64::from(threshold),
        )
    };

    Question {
        image_data,
        title: movie.title.clone(),
        text,
        correct_answer,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NetworkError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use url::Url;

    fn movie(title: &str, rating: f64) -> MovieRecord {
        MovieRecord {
            title: title.to_string(),
            rating,
            poster_url: Url::parse(&format!("https://example.com/{}._V1_.jpg", title)).unwrap(),
        }
    }

    struct StaticLoader {
        movies: Vec<MovieRecord>,
        calls: AtomicUsize,
    }

    impl StaticLoader {
        fn new(movies: Vec<MovieRecord>) -> Arc<Self> {
            Arc::new(Self {
                movies,
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl MoviesLoading for StaticLoader {
        async fn load_movies(&self) -> Result<Vec<MovieRecord>, QuizError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.movies.clone())
        }
    }

    struct FailingLoader;

    #[async_trait]
    impl MoviesLoading for FailingLoader {
        async fn load_movies(&self) -> Result<Vec<MovieRecord>, QuizError> {
            Err(NetworkError::Status(503).into())
        }
    }

    struct PosterServer {
        fail: bool,
    }

    #[async_trait]
    impl NetworkRouting for PosterServer {
        async fn fetch(&self, _url: &Url) -> Result<Vec<u8>, NetworkError> {
            if self.fail {
                Err(NetworkError::Transport("connection reset".to_string()))
            } else {
                Ok(vec![0xFF, 0xD8, 0xFF])
            }
        }
    }

    fn ten_movies() -> Vec<MovieRecord> {
        (0..10).map(|i| movie(&format!("movie{}", i), 7.0 + i as f64 / 5.0)).collect()
    }

    #[test]
    fn test_compose_greater_than() {
        let question = compose_question(&movie("Kill Bill", 8.1), vec![1], 8, 50);
        assert_eq!(question.text, "Is the rating of this movie greater than 8?");
        assert!(question.correct_answer);
        assert_eq!(question.title, "Kill Bill");

        let question = compose_question(&movie("Kill Bill", 8.1), vec![1], 9, 99);
        assert!(!question.correct_answer);
    }

    #[test]
    fn test_compose_less_than() {
        let question = compose_question(&movie("Tesla", 5.1), vec![1], 7, 49);
        assert_eq!(question.text, "Is the rating of this movie less than 7?");
        assert!(question.correct_answer);

        // Equal rating is neither greater nor less.
        let question = compose_question(&movie("Exact", 8.0), vec![1], 8, 0);
        assert!(!question.correct_answer);
        let question = compose_question(&movie("Exact", 8.0), vec![1], 8, 75);
        assert!(!question.correct_answer);
    }

    #[tokio::test]
    async fn test_load_then_question() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let factory = QuestionFactory::with_seed(
            StaticLoader::new(ten_movies()),
            Arc::new(PosterServer { fail: false }),
            tx,
            7,
        );

        factory.load_data();
        assert!(matches!(rx.recv().await, Some(FactoryEvent::DataLoaded)));
        assert_eq!(factory.movies().await.len(), 10);

        factory.request_next_question();
        match rx.recv().await {
            Some(FactoryEvent::Question(question)) => {
                assert!(!question.text.is_empty());
                assert!(!question.image_data.is_empty());
                assert!(question.title.starts_with("movie"));
            }
            other => panic!("expected a question, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_empty_catalog_reports_failure_and_reloads() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let loader = StaticLoader::new(ten_movies());
        let factory = QuestionFactory::new(loader.clone(), Arc::new(PosterServer { fail: false }), tx);

        factory.request_next_question();
        assert!(matches!(
            rx.recv().await,
            Some(FactoryEvent::DataFailed(QuizError::EmptyCatalog))
        ));
        assert!(matches!(rx.recv().await, Some(FactoryEvent::DataLoaded)));
        assert_eq!(loader.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_empty_load_keeps_previous_catalog() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let factory = QuestionFactory::new(StaticLoader::new(Vec::new()), Arc::new(PosterServer { fail: false }), tx);

        factory.load_data();
        assert!(matches!(
            rx.recv().await,
            Some(FactoryEvent::DataFailed(QuizError::EmptyCatalog))
        ));
        assert!(factory.movies().await.is_empty());
    }

    #[tokio::test]
    async fn test_load_failure_is_forwarded() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let factory = QuestionFactory::new(Arc::new(FailingLoader), Arc::new(PosterServer { fail: false }), tx);

        factory.load_data();
        assert!(matches!(
            rx.recv().await,
            Some(FactoryEvent::DataFailed(QuizError::Network(NetworkError::Status(503))))
        ));
    }

    #[tokio::test]
    async fn test_poster_failure_produces_no_question() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let factory = QuestionFactory::new(
            StaticLoader::new(ten_movies()),
            Arc::new(PosterServer { fail: true }),
            tx,
        );

        factory.load_data();
        assert!(matches!(rx.recv().await, Some(FactoryEvent::DataLoaded)));

        factory.request_next_question();
        assert!(matches!(
            rx.recv().await,
            Some(FactoryEvent::DataFailed(QuizError::ImageLoad(_)))
        ));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_seeded_factories_agree() {
        async fn first_question(seed: u64) -> Question {
            let (tx, mut rx) = mpsc::unbounded_channel();
            let factory = QuestionFactory::with_seed(
                StaticLoader::new(ten_movies()),
                Arc::new(PosterServer { fail: false }),
                tx,
                seed,
            );
            factory.load_data();
            rx.recv().await;
            factory.request_next_question();
            match rx.recv().await {
                Some(FactoryEvent::Question(question)) => question,
                other => panic!("expected a question, got {:?}", other),
            }
        }

        assert_eq!(first_question(42).await, first_question(42).await);
    }
}
