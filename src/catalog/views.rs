//! The derived collections each page renders from its fetched list.

use crate::models::Movie;

use super::filter::{filter_by_genre, filter_by_title_substring};
use super::ranking::{genre_leaderboard, top_n, top_rated};
use super::sort::{SortKey, sort_movies};
use super::stats::{AggregateStats, aggregate_stats};

const SHELF_SIZE: usize = 20;
const ALL_MOVIES_SHELF_SIZE: usize = 30;
const LEADERBOARD_SIZE: usize = 10;
const HOME_GENRES: [&str; 3] = ["Action", "Comedy", "Drama"];
const LEADERBOARD_GENRES: [&str; 2] = ["Comedy", "Animation"];

/// Search box, genre dropdown and sort selector of the browse page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BrowseQuery {
    pub search: String,
    pub genre: String,
    pub sort: SortKey,
}

pub fn browse<'a>(movies: &'a [Movie], query: &BrowseQuery) -> Vec<&'a Movie> {
    let matching = filter_by_title_substring(movies, &query.search);
    let matching = filter_by_genre(matching, &query.genre);
    sort_movies(matching, query.sort)
}

#[derive(Debug, Clone, PartialEq)]
pub struct GenreShelf<'a> {
    pub genre: &'static str,
    pub movies: Vec<&'a Movie>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HomeShelves<'a> {
    /// First rated movie, falling back to the first movie at all.
    pub featured: Option<&'a Movie>,
    pub top_rated: Vec<&'a Movie>,
    pub recent: Vec<&'a Movie>,
    /// Only genres with at least one match.
    pub genres: Vec<GenreShelf<'a>>,
    pub all: Vec<&'a Movie>,
}

impl<'a> HomeShelves<'a> {
    pub fn build(movies: &'a [Movie]) -> Self {
        let featured = movies
            .iter()
            .find(|movie| movie.is_rated())
            .or_else(|| movies.first());

        let top_rated = top_n(movies, SHELF_SIZE, |movie| movie.average_rating > 0.0);

        let mut recent = sort_movies(movies, SortKey::Year);
        recent.truncate(SHELF_SIZE);

        let genres = HOME_GENRES
            .iter()
            .map(|&genre| {
                let mut shelf = filter_by_genre(movies, genre);
                shelf.truncate(SHELF_SIZE);
                GenreShelf { genre, movies: shelf }
            })
            .filter(|shelf| !shelf.movies.is_empty())
            .collect();

        let all = movies.iter().take(ALL_MOVIES_SHELF_SIZE).collect();

        Self {
            featured,
            top_rated,
            recent,
            genres,
            all,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalyticsDashboard<'a> {
    pub stats: AggregateStats,
    pub top10: Vec<&'a Movie>,
    /// Only genres with at least one rated match.
    pub leaderboards: Vec<GenreShelf<'a>>,
}

impl<'a> AnalyticsDashboard<'a> {
    pub fn build(movies: &'a [Movie]) -> Self {
        let leaderboards = LEADERBOARD_GENRES
            .iter()
            .map(|&genre| GenreShelf {
                genre,
                movies: genre_leaderboard(movies, genre, LEADERBOARD_SIZE),
            })
            .filter(|board| !board.movies.is_empty())
            .collect();

        Self {
            stats: aggregate_stats(movies),
            top10: top_rated(movies, LEADERBOARD_SIZE),
            leaderboards,
        }
    }
}
