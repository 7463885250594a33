use chrono::{DateTime, Utc};
use tracing::{error, info, warn};

use crate::error::Result;
use crate::models::Movie;
use crate::services::gateway::MovieGateway;

pub const LOAD_FAILED_MESSAGE: &str = "Failed to fetch movies";

/// Handed out by [`MovieListing::begin_fetch`]; only the newest ticket may
/// update the listing.
#[derive(Debug)]
#[must_use]
pub struct FetchTicket {
    generation: u64,
}

/// A page's own copy of the movie list plus its loading/error state.
#[derive(Debug, Default)]
pub struct MovieListing {
    movies: Vec<Movie>,
    loading: bool,
    error: Option<&'static str>,
    fetched_at: Option<DateTime<Utc>>,
    generation: u64,
}

impl MovieListing {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&'static str> {
        self.error
    }

    pub fn fetched_at(&self) -> Option<DateTime<Utc>> {
        self.fetched_at
    }

    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.generation += 1;
        self.loading = true;
        FetchTicket {
            generation: self.generation,
        }
    }

    /// Drops interest in every outstanding fetch, as when the page goes away.
    pub fn invalidate(&mut self) {
        self.generation += 1;
        self.loading = false;
    }

    /// Applies a fetch result. Returns `false` and changes nothing when a
    /// newer fetch (or an invalidation) has superseded `ticket`. A failure
    /// keeps the previously loaded movies.
    pub fn finish(&mut self, ticket: FetchTicket, result: Result<Vec<Movie>>) -> bool {
        if ticket.generation != self.generation {
            warn!(
                ticket = ticket.generation,
                current = self.generation,
                "Discarding stale movie list"
            );
            return false;
        }

        self.loading = false;
        match result {
            Ok(movies) => {
                info!(count = movies.len(), "Loaded movies");
                self.movies = movies;
                self.error = None;
                self.fetched_at = Some(Utc::now());
            }
            Err(e) => {
                error!(error = %e, "Failed to fetch movies");
                self.error = Some(LOAD_FAILED_MESSAGE);
            }
        }
        true
    }

    pub async fn load<G>(&mut self, gateway: &G, limit: u32, offset: u32) -> bool
    where
        G: MovieGateway + ?Sized,
    {
        let ticket = self.begin_fetch();
        let result = gateway.list_movies(limit, offset).await;
        self.finish(ticket, result)
    }

    /// Swaps in a re-fetched copy of one movie, keeping its position.
    pub fn replace(&mut self, movie: Movie) -> bool {
        match self.movies.iter_mut().find(|m| m.id == movie.id) {
            Some(slot) => {
                *slot = movie;
                true
            }
            None => false,
        }
    }
}
