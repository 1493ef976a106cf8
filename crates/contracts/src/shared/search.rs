//! Case-insensitive search over display records.

/// Records that can be matched against a free-text search term.
pub trait Searchable {
    /// Display values the search term is matched against.
    fn search_fields(&self) -> Vec<&str>;

    /// Case-insensitive substring match ORed across `search_fields`.
    /// A blank term matches everything.
    fn matches_filter(&self, term: &str) -> bool {
        let needle = term.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        self.search_fields()
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        name: String,
        city: String,
    }

    impl Searchable for Row {
        fn search_fields(&self) -> Vec<&str> {
            vec![self.name.as_str(), self.city.as_str()]
        }
    }

    fn rows() -> Vec<Row> {
        vec![
            Row { name: "Hotel Villa Real".into(), city: "Cartagena".into() },
            Row { name: "Posada del Mar".into(), city: "Villavicencio".into() },
            Row { name: "Casa Andina".into(), city: "Bogotá".into() },
        ]
    }

    fn count(term: &str) -> usize {
        rows().iter().filter(|r| r.matches_filter(term)).count()
    }

    #[test]
    fn test_filter_is_case_insensitive_across_fields() {
        assert_eq!(count("VILLA"), 2);
        assert_eq!(count("bogotá"), 1);
        assert_eq!(count("   "), 3);
        assert_eq!(count("zzz"), 0);
    }

    #[test]
    fn test_term_is_trimmed() {
        let row = &rows()[1];
        assert!(row.matches_filter("  posada "));
        assert!(!row.matches_filter("andina"));
    }
}
