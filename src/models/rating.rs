use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

pub const MIN_SCORE: u8 = 1;
pub const MAX_SCORE: u8 = 5;

/// Body of `POST /ratings`. Only constructible through [`RatingSubmission::new`],
/// so an instance has already passed local validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RatingSubmission {
    movie_id: i64,
    #[serde(rename = "usuario")]
    username: String,
    #[serde(rename = "rating")]
    score: u8,
}

impl RatingSubmission {
    pub fn new(movie_id: i64, username: &str, score: u8) -> Result<Self, ValidationError> {
        if score == 0 {
            return Err(ValidationError::MissingScore);
        }
        if !(MIN_SCORE..=MAX_SCORE).contains(&score) {
            return Err(ValidationError::ScoreOutOfRange(score));
        }

        let username = username.trim();
        if username.is_empty() {
            return Err(ValidationError::EmptyUsername);
        }

        Ok(Self {
            movie_id,
            username: username.to_string(),
            score,
        })
    }

    pub fn movie_id(&self) -> i64 {
        self.movie_id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn score(&self) -> u8 {
        self.score
    }
}

/// The aggregate the server recomputed after accepting a rating.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatingAggregate {
    pub movie_id: i64,
    #[serde(rename = "nota_media", alias = "average_rating")]
    pub average_rating: f64,
    #[serde(rename = "qtd_avaliacoes", alias = "rating_count")]
    pub rating_count: u32,
}
