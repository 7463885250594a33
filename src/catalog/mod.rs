//! Pure derivations over an already-fetched movie list.
//!
//! Every function borrows its input and hands back a new `Vec<&Movie>` (or a
//! plain value), so results chain: `sort_movies(filter_by_genre(&movies, "drama"), SortKey::Year)`.

mod fields;
mod filter;
mod ranking;
mod sort;
mod stats;
pub mod views;

pub use fields::parse_comma_list;
pub use filter::{filter_by_genre, filter_by_title_substring, genre_matches};
pub use ranking::{genre_leaderboard, top_n, top_rated};
pub use sort::{SortKey, compare_by_rating, compare_titles, sort_movies};
pub use stats::{AggregateStats, aggregate_stats, distinct_genres};
pub use views::{AnalyticsDashboard, BrowseQuery, HomeShelves, browse};
