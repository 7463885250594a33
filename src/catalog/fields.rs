/// Splits a delimited field (`genre`, `country`, `actors`) into trimmed,
/// non-empty entries. This is the only place those fields get split.
pub fn parse_comma_list(field: Option<&str>) -> Vec<&str> {
    field
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_and_drops_empty_segments() {
        assert_eq!(parse_comma_list(Some("Action, Comedy ,")), vec!["Action", "Comedy"]);
        assert_eq!(parse_comma_list(Some(" , ,, ")), Vec::<&str>::new());
    }

    #[test]
    fn absent_or_empty_field_is_empty() {
        assert!(parse_comma_list(None).is_empty());
        assert!(parse_comma_list(Some("")).is_empty());
    }

    #[test]
    fn keeps_inner_spaces() {
        assert_eq!(
            parse_comma_list(Some("Science Fiction,  Film-Noir")),
            vec!["Science Fiction", "Film-Noir"]
        );
    }
}
