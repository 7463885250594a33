use crate::models::Movie;

use super::filter::genre_matches;
use super::sort::{SortKey, sort_movies};

/// Keeps the movies matching `predicate`, orders them by rating and takes
/// the first `n`.
pub fn top_n<'a, I, P>(movies: I, n: usize, predicate: P) -> Vec<&'a Movie>
where
    I: IntoIterator<Item = &'a Movie>,
    P: Fn(&Movie) -> bool,
{
    let mut ranked = sort_movies(
        movies.into_iter().filter(|movie| predicate(*movie)),
        SortKey::Rating,
    );
    ranked.truncate(n);
    ranked
}

/// Best `n` among movies that have at least one rating.
pub fn top_rated<'a, I>(movies: I, n: usize) -> Vec<&'a Movie>
where
    I: IntoIterator<Item = &'a Movie>,
{
    top_n(movies, n, Movie::is_rated)
}

/// Per-genre leaderboard: [`top_rated`] restricted by the loose genre match.
pub fn genre_leaderboard<'a, I>(movies: I, genre: &str, n: usize) -> Vec<&'a Movie>
where
    I: IntoIterator<Item = &'a Movie>,
{
    top_n(movies, n, |movie| movie.is_rated() && genre_matches(movie, genre))
}
