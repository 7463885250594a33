#![allow(dead_code)]

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use http::StatusCode;

use movie_catalog::{
    Error, HealthStatus, Movie, MovieDraft, MovieGateway, RatingAggregate, RatingSubmission,
    RefreshOutcome, Result,
};

pub fn movie(id: i64, title: &str, average: f64, count: u32) -> Movie {
    Movie {
        id,
        title: title.to_string(),
        release_year: Some(2000 + id as i32),
        genre: Some("Drama".to_string()),
        country: None,
        director: None,
        actors: None,
        average_rating: average,
        rating_count: count,
    }
}

fn server_error() -> Error {
    Error::Http {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        body: "boom".to_string(),
    }
}

/// In-memory stand-in for the API that recomputes aggregates the way the
/// server does and counts every call.
#[derive(Default)]
pub struct FakeGateway {
    pub movies: Mutex<Vec<Movie>>,
    pub fail_ratings: AtomicBool,
    pub fail_gets: AtomicBool,
    pub fail_lists: AtomicBool,
    pub rating_calls: AtomicUsize,
    pub get_calls: AtomicUsize,
    pub list_calls: AtomicUsize,
    pub refresh_calls: AtomicUsize,
}

impl FakeGateway {
    pub fn with_movies(movies: Vec<Movie>) -> Self {
        Self {
            movies: Mutex::new(movies),
            ..Self::default()
        }
    }

    pub fn rating_calls(&self) -> usize {
        self.rating_calls.load(Ordering::SeqCst)
    }

    pub fn get_calls(&self) -> usize {
        self.get_calls.load(Ordering::SeqCst)
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn set(&self, flag: &AtomicBool, value: bool) {
        flag.store(value, Ordering::SeqCst);
    }
}

#[async_trait]
impl MovieGateway for FakeGateway {
    async fn list_movies(&self, limit: u32, offset: u32) -> Result<Vec<Movie>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_lists.load(Ordering::SeqCst) {
            return Err(server_error());
        }
        let movies = self.movies.lock().unwrap();
        Ok(movies
            .iter()
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn get_movie(&self, id: i64) -> Result<Movie> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_gets.load(Ordering::SeqCst) {
            return Err(server_error());
        }
        self.movies
            .lock()
            .unwrap()
            .iter()
            .find(|m| m.id == id)
            .cloned()
            .ok_or(Error::Http {
                status: StatusCode::NOT_FOUND,
                body: r#"{"detail":"Movie not found"}"#.to_string(),
            })
    }

    async fn create_movie(&self, draft: &MovieDraft) -> Result<Movie> {
        let mut movies = self.movies.lock().unwrap();
        let movie = Movie {
            id: movies.len() as i64 + 1,
            title: draft.title.clone(),
            release_year: draft.release_year,
            genre: draft.genre.clone(),
            country: draft.country.clone(),
            director: draft.director.clone(),
            actors: draft.actors.clone(),
            average_rating: 0.0,
            rating_count: 0,
        };
        movies.push(movie.clone());
        Ok(movie)
    }

    async fn submit_rating(&self, submission: &RatingSubmission) -> Result<RatingAggregate> {
        self.rating_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_ratings.load(Ordering::SeqCst) {
            return Err(server_error());
        }
        let mut movies = self.movies.lock().unwrap();
        let movie = movies
            .iter_mut()
            .find(|m| m.id == submission.movie_id())
            .ok_or(Error::Http {
                status: StatusCode::NOT_FOUND,
                body: String::new(),
            })?;

        let total = movie.average_rating * f64::from(movie.rating_count)
            + f64::from(submission.score());
        movie.rating_count += 1;
        movie.average_rating = total / f64::from(movie.rating_count);

        Ok(RatingAggregate {
            movie_id: movie.id,
            average_rating: movie.average_rating,
            rating_count: movie.rating_count,
        })
    }

    async fn refresh_aggregates(&self) -> Result<RefreshOutcome> {
        self.refresh_calls.fetch_add(1, Ordering::SeqCst);
        Ok(RefreshOutcome { refreshed: true })
    }

    async fn health(&self) -> Result<HealthStatus> {
        Ok(HealthStatus {
            status: "ok".to_string(),
        })
    }
}
