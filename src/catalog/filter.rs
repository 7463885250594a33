use crate::models::Movie;

/// Case-insensitive substring match against the raw genre string.
///
/// Deliberately loose: "Comedy" matches "Romantic Comedy" and "Drama"
/// matches "Dramatic Comedy". An empty `genre` matches everything.
pub fn genre_matches(movie: &Movie, genre: &str) -> bool {
    if genre.is_empty() {
        return true;
    }
    let needle = genre.to_lowercase();
    movie
        .genre
        .as_deref()
        .is_some_and(|g| g.to_lowercase().contains(&needle))
}

pub fn filter_by_genre<'a, I>(movies: I, genre: &str) -> Vec<&'a Movie>
where
    I: IntoIterator<Item = &'a Movie>,
{
    movies
        .into_iter()
        .filter(|movie| genre_matches(movie, genre))
        .collect()
}

pub fn filter_by_title_substring<'a, I>(movies: I, term: &str) -> Vec<&'a Movie>
where
    I: IntoIterator<Item = &'a Movie>,
{
    let needle = term.to_lowercase();
    movies
        .into_iter()
        .filter(|movie| movie.title.to_lowercase().contains(&needle))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures::{ids, movie};

    fn catalog() -> Vec<Movie> {
        vec![
            movie(1, "Toy Story", 1995, "Animation, Comedy", 4.2, 10),
            movie(2, "Heat", 1995, "Crime,Thriller", 4.0, 8),
            movie(3, "Sabrina", 1995, "Romantic Comedy", 3.1, 3),
            movie(4, "Casino", 1995, "Dramatic Comedy", 4.1, 5),
            movie(5, "Untitled", 2001, "", 0.0, 0),
        ]
    }

    #[test]
    fn empty_genre_keeps_everything_in_order() {
        let movies = catalog();
        assert_eq!(ids(filter_by_genre(&movies, "")), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn genre_is_case_insensitive_substring() {
        let movies = catalog();
        assert_eq!(ids(filter_by_genre(&movies, "comedy")), vec![1, 3, 4]);
        assert_eq!(ids(filter_by_genre(&movies, "THRILL")), vec![2]);
        // Known false positive.
        assert_eq!(ids(filter_by_genre(&movies, "Drama")), vec![4]);
    }

    #[test]
    fn title_search_ignores_case() {
        let movies = catalog();
        assert_eq!(ids(filter_by_title_substring(&movies, "IN")), vec![3, 4]);
        assert_eq!(ids(filter_by_title_substring(&movies, "")).len(), 5);
        assert!(filter_by_title_substring(&movies, "zzz").is_empty());
    }

    #[test]
    fn filters_chain_without_touching_source() {
        let movies = catalog();
        let before = movies.clone();
        let comedies = filter_by_genre(&movies, "comedy");
        assert_eq!(ids(filter_by_title_substring(comedies, "toy")), vec![1]);
        assert_eq!(movies, before);
    }
}
