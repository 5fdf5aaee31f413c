use std::sync::Arc;

use async_trait::async_trait;
use url::Url;

use crate::data::NetworkRouting;
use crate::error::QuizError;
use crate::models::{MostPopularMovies, MovieRecord};

/// Source of the movie catalog.
#[async_trait]
pub trait MoviesLoading: Send + Sync {
    /// Fetch the full list, in the order the server sent it.
    async fn load_movies(&self) -> Result<Vec<MovieRecord>, QuizError>;
}

/// Loads the catalog from a fixed endpoint.
pub struct MoviesLoader {
    network: Arc<dyn NetworkRouting>,
    url: Url,
}

impl MoviesLoader {
    pub fn new(network: Arc<dyn NetworkRouting>, url: Url) -> Self {
        Self { network, url }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait]
impl MoviesLoading for MoviesLoader {
    async fn load_movies(&self) -> Result<Vec<MovieRecord>, QuizError> {
        let body = self.network.fetch(&self.url).await?;
        let movies = decode_movies(&body)?;
        tracing::info!("Loaded {} movies from {}", movies.len(), self.url);
        Ok(movies)
    }
}

/// Decode a Top-250 response body.
///
/// A non-empty `errorMessage` is the API's way of failing with status 200.
pub fn decode_movies(body: &[u8]) -> Result<Vec<MovieRecord>, QuizError> {
    let response: MostPopularMovies = serde_json::from_slice(body)?;
    if !response.error_message.trim().is_empty() {
        return Err(QuizError::Api(response.error_message));
    }
    Ok(response.items)
}
