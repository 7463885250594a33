use std::collections::BTreeSet;

use serde::Serialize;

use crate::models::Movie;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct AggregateStats {
    pub total_count: usize,
    /// Movies with at least one rating.
    pub rated_count: usize,
    /// Sum of every movie's rating count.
    pub total_reviews: u64,
    /// Mean of `average_rating` over rated movies only; 0 when none are rated.
    pub average_rating: f64,
}

pub fn aggregate_stats<'a, I>(movies: I) -> AggregateStats
where
    I: IntoIterator<Item = &'a Movie>,
{
    let mut stats = AggregateStats::default();
    let mut rated_sum = 0.0;

    for movie in movies {
        stats.total_count += 1;
        stats.total_reviews += u64::from(movie.rating_count);
        if movie.is_rated() {
            stats.rated_count += 1;
            rated_sum += movie.average_rating;
        }
    }

    if stats.rated_count > 0 {
        stats.average_rating = rated_sum / stats.rated_count as f64;
    }
    stats
}

/// Every genre that appears anywhere in the list, sorted and deduplicated.
/// Case is kept as stored, so "Drama" and "drama" are two entries.
pub fn distinct_genres<'a, I>(movies: I) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a Movie>,
{
    movies
        .into_iter()
        .flat_map(Movie::genres)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
