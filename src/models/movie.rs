use serde::{Deserialize, Serialize};

use crate::catalog::parse_comma_list;
use super::rating::RatingAggregate;

/// A catalog entry as the API returns it.
///
/// `average_rating` only means something while `rating_count > 0`; a zero
/// average with zero ratings is "unrated", not "rated zero".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: i64,
    #[serde(rename = "titulo", alias = "title")]
    pub title: String,
    #[serde(rename = "ano_lancamento", alias = "release_year", default)]
    pub release_year: Option<i32>,
    #[serde(rename = "genero", alias = "genre", default)]
    pub genre: Option<String>,
    #[serde(rename = "pais", alias = "country", default)]
    pub country: Option<String>,
    #[serde(rename = "diretor", alias = "director", default)]
    pub director: Option<String>,
    #[serde(rename = "atores", alias = "actors", default)]
    pub actors: Option<String>,
    #[serde(rename = "nota_media", alias = "average_rating", default)]
    pub average_rating: f64,
    #[serde(rename = "qtd_avaliacoes", alias = "rating_count", default)]
    pub rating_count: u32,
}

/// Payload for `POST /movies`; the server fills in id and aggregates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MovieDraft {
    #[serde(rename = "titulo", alias = "title")]
    pub title: String,
    #[serde(rename = "ano_lancamento", alias = "release_year")]
    pub release_year: Option<i32>,
    #[serde(rename = "genero", alias = "genre")]
    pub genre: Option<String>,
    #[serde(rename = "pais", alias = "country")]
    pub country: Option<String>,
    #[serde(rename = "diretor", alias = "director")]
    pub director: Option<String>,
    #[serde(rename = "atores", alias = "actors")]
    pub actors: Option<String>,
}

impl Movie {
    pub fn is_rated(&self) -> bool {
        self.rating_count > 0
    }

    pub fn genres(&self) -> Vec<&str> {
        parse_comma_list(self.genre.as_deref())
    }

    pub fn countries(&self) -> Vec<&str> {
        parse_comma_list(self.country.as_deref())
    }

    pub fn actors(&self) -> Vec<&str> {
        parse_comma_list(self.actors.as_deref())
    }

    /// The first `n` billed actors.
    pub fn top_cast(&self, n: usize) -> Vec<&str> {
        let mut cast = self.actors();
        cast.truncate(n);
        cast
    }

    /// One-decimal rating, or `None` while unrated.
    pub fn rating_label(&self) -> Option<String> {
        self.is_rated().then(|| format!("{:.1}", self.average_rating))
    }

    /// Overwrite both aggregates with the values the server computed.
    pub fn apply_aggregate(&mut self, aggregate: &RatingAggregate) {
        if aggregate.movie_id == self.id {
            self.average_rating = aggregate.average_rating;
            self.rating_count = aggregate.rating_count;
        }
    }
}

impl MovieDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}
