mod loader;
mod network;

pub use loader::{decode_movies, MoviesLoader, MoviesLoading};
pub use network::{NetworkClient, NetworkRouting};
