use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::error::Error;
use crate::models::Movie;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Ascending, by [`compare_titles`].
    #[default]
    Title,
    /// Newest first.
    Year,
    /// Highest average first, more ratings breaking ties.
    Rating,
}

impl FromStr for SortKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "title" => Ok(SortKey::Title),
            "year" => Ok(SortKey::Year),
            "rating" => Ok(SortKey::Rating),
            other => Err(Error::UnknownSortKey(other.to_string())),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SortKey::Title => "title",
            SortKey::Year => "year",
            SortKey::Rating => "rating",
        };
        f.write_str(name)
    }
}

/// Locale-style title collation. Base letters decide first, ignoring
/// accents and case ("Être" sorts with the E titles), then accents
/// (unaccented first), then case (lowercase first). Whitespace sorts before
/// punctuation, punctuation before digits, digits before letters.
pub fn compare_titles(a: &str, b: &str) -> Ordering {
    TitleKey::new(a).cmp(&TitleKey::new(b))
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
struct TitleKey {
    primary: Vec<(u8, char)>,
    secondary: Vec<char>,
    tertiary: Vec<bool>,
    raw: String,
}

impl TitleKey {
    fn new(title: &str) -> Self {
        let decomposed: Vec<char> = title.nfd().collect();

        let primary = decomposed
            .iter()
            .copied()
            .filter(|c| !is_combining_mark(*c))
            .flat_map(char::to_lowercase)
            .map(|c| (char_class(c), c))
            .collect();
        let secondary = decomposed.iter().copied().flat_map(char::to_lowercase).collect();
        let tertiary = decomposed.iter().map(|c| c.is_uppercase()).collect();

        TitleKey {
            primary,
            secondary,
            tertiary,
            raw: title.to_string(),
        }
    }
}

fn char_class(c: char) -> u8 {
    if c.is_whitespace() {
        0
    } else if c.is_numeric() {
        2
    } else if c.is_alphabetic() {
        3
    } else {
        1
    }
}

pub fn compare_by_rating(a: &Movie, b: &Movie) -> Ordering {
    b.average_rating
        .total_cmp(&a.average_rating)
        .then_with(|| b.rating_count.cmp(&a.rating_count))
}

fn compare_by_year(a: &Movie, b: &Movie) -> Ordering {
    // `Option` orders `None` first, so reversing puts missing years last.
    b.release_year.cmp(&a.release_year)
}

/// Returns a newly ordered list; the sort is stable, so re-sorting an
/// already sorted list leaves it unchanged.
pub fn sort_movies<'a, I>(movies: I, key: SortKey) -> Vec<&'a Movie>
where
    I: IntoIterator<Item = &'a Movie>,
{
    let mut sorted: Vec<&Movie> = movies.into_iter().collect();
    match key {
        SortKey::Title => sorted.sort_by_cached_key(|movie| TitleKey::new(&movie.title)),
        SortKey::Year => sorted.sort_by(|a, b| compare_by_year(a, b)),
        SortKey::Rating => sorted.sort_by(|a, b| compare_by_rating(a, b)),
    }
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures::{ids, movie};

    fn catalog() -> Vec<Movie> {
        vec![
            movie(1, "alien", 1979, "Horror", 4.0, 10),
            movie(2, "Blade Runner", 1982, "Sci-Fi", 4.5, 3),
            movie(3, "Aliens", 1986, "Action", 4.0, 25),
            movie(4, "Brazil", 1985, "Comedy", 4.5, 3),
            movie(5, "Unrated", 2020, "", 0.0, 0),
        ]
    }

    #[test]
    fn title_sort_ignores_case() {
        let movies = catalog();
        assert_eq!(ids(sort_movies(&movies, SortKey::Title)), vec![1, 3, 2, 4, 5]);
    }

    #[test]
    fn title_sort_places_accented_titles_with_their_base_letter() {
        let movies = vec![
            movie(1, "Zorro", 1975, "Adventure", 3.0, 4),
            movie(2, "Être et avoir", 2002, "Documentary", 4.0, 6),
            movie(3, "Amélie", 2001, "Comedy", 4.2, 90),
            movie(4, "Amelia", 2009, "Drama", 3.1, 8),
        ];
        assert_eq!(ids(sort_movies(&movies, SortKey::Title)), vec![4, 3, 2, 1]);
    }

    #[test]
    fn title_collation_orders_accents_then_case() {
        assert_eq!(compare_titles("resume", "résumé"), Ordering::Less);
        assert_eq!(compare_titles("résumé", "resumes"), Ordering::Less);
        assert_eq!(compare_titles("a", "A"), Ordering::Less);
        assert_eq!(compare_titles("Ábc", "abd"), Ordering::Less);
        assert_eq!(compare_titles("Heat", "Heat"), Ordering::Equal);
    }

    #[test]
    fn title_collation_puts_punctuation_and_digits_before_letters() {
        assert_eq!(compare_titles("_Tag", "Alien"), Ordering::Less);
        assert_eq!(compare_titles("2001", "Alien"), Ordering::Less);
        assert_eq!(compare_titles("Alien 3", "Alien_3"), Ordering::Less);
    }

    #[test]
    fn year_sort_is_newest_first_with_missing_years_last() {
        let mut movies = catalog();
        movies[0].release_year = None;
        assert_eq!(ids(sort_movies(&movies, SortKey::Year)), vec![5, 3, 4, 2, 1]);
    }

    #[test]
    fn rating_sort_breaks_ties_on_count_and_keeps_source_order_otherwise() {
        let movies = catalog();
        assert_eq!(ids(sort_movies(&movies, SortKey::Rating)), vec![2, 4, 3, 1, 5]);
    }

    #[test]
    fn rating_sort_is_a_permutation_and_idempotent() {
        let movies = catalog();
        let once = sort_movies(&movies, SortKey::Rating);
        let twice = sort_movies(once.iter().copied(), SortKey::Rating);
        assert_eq!(ids(once.iter().copied()), ids(twice));

        let mut sorted_ids = ids(once);
        sorted_ids.sort();
        assert_eq!(sorted_ids, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn input_is_left_untouched() {
        let movies = catalog();
        let before = movies.clone();
        let _ = sort_movies(&movies, SortKey::Year);
        assert_eq!(movies, before);
    }

    #[test]
    fn parses_sort_keys() {
        assert_eq!("Rating".parse::<SortKey>().unwrap(), SortKey::Rating);
        assert_eq!(" year ".parse::<SortKey>().unwrap(), SortKey::Year);
        assert!(matches!("popularity".parse::<SortKey>(), Err(Error::UnknownSortKey(_))));
        assert_eq!(SortKey::default().to_string(), "title");
    }

    #[test]
    fn empty_list_sorts_to_empty() {
        assert!(sort_movies(&Vec::<Movie>::new(), SortKey::Rating).is_empty());
    }
}
