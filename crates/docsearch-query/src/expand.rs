//! Expansion of typed input into a prefix + fuzzy query expression.

/// Inputs shorter than this (after trimming) never reach the index.
pub const MIN_QUERY_LENGTH: usize = 2;

/// Splits typed input into the terms used for expansion, snippets and
/// highlighting: whitespace-separated words longer than one character.
pub fn query_terms(input: &str) -> impl Iterator<Item = &str> {
    input
        .split_whitespace()
        .filter(|term| term.chars().count() > 1)
}

/// Returns true if the input is long enough to be searched.
///
/// Length is measured in characters after trimming surrounding whitespace.
pub fn is_searchable(input: &str, min_length: usize) -> bool {
    input.trim().chars().count() >= min_length
}

/// Expands typed input into a query expression.
///
/// Every term becomes a prefix clause and a fuzzy clause with edit distance 1,
/// so `sample protocl` turns into `sample* sample~1 protocl* protocl~1`. The
/// terms are passed through untouched, so input containing query syntax can
/// produce an expression the parser rejects.
pub fn expand_query(input: &str) -> String {
    query_terms(input)
        .map(|term| format!("{term}* {term}~1"))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expands_each_term() {
        assert_eq!(expand_query("metadata"), "metadata* metadata~1");
        assert_eq!(
            expand_query("sample protocol"),
            "sample* sample~1 protocol* protocol~1"
        );
    }

    #[test]
    fn drops_single_character_terms() {
        assert_eq!(expand_query("a sample b"), "sample* sample~1");
        assert_eq!(expand_query("a b"), "");
    }

    #[test]
    fn splits_on_any_whitespace() {
        assert_eq!(expand_query(" mass\tspec\n"), "mass* mass~1 spec* spec~1");
    }

    #[test]
    fn counts_characters_not_bytes() {
        assert_eq!(query_terms("é ab").collect::<Vec<_>>(), vec!["ab"]);
    }

    #[test]
    fn searchable_threshold_uses_trimmed_length() {
        assert!(!is_searchable("a", MIN_QUERY_LENGTH));
        assert!(!is_searchable("  a  ", MIN_QUERY_LENGTH));
        assert!(!is_searchable("", MIN_QUERY_LENGTH));
        assert!(is_searchable("ab", MIN_QUERY_LENGTH));
        assert!(is_searchable(" a b ", MIN_QUERY_LENGTH));
    }
}
