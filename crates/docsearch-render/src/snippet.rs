//! Snippet extraction.
//!
//! A snippet is a short excerpt of a document's content around the earliest query term.
//! Documents that matched only through their keywords show the start of their content
//! with a note naming the keyword; anything else shows the start of the content.
//!
//! All window sizes and offsets are counted in characters, never bytes.

use docsearch_config::SnippetSettings;
use docsearch_index::Document;
use serde::Serialize;

use crate::QueryTerms;

/// Marker for text cut off at either end of a snippet.
pub const ELLIPSIS: &str = "...";

/// What a snippet was anchored on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SnippetAnchor {
    /// A term occurs in the content at this character offset.
    Content {
        /// Character offset of the match.
        offset: usize,
        /// The matching term.
        term: String,
    },
    /// A term occurs only in the keywords.
    Keyword {
        /// The matching term.
        term: String,
    },
    /// No term occurs in the content or keywords.
    Fallback,
}

/// A display excerpt of a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snippet {
    /// Excerpt text, with ellipses and keyword note applied.
    pub text: String,
    /// How the excerpt was chosen.
    pub anchor: SnippetAnchor,
}

/// Extracts the snippet for `document` given the user's query.
pub fn extract_snippet(document: &Document, query: &str, settings: &SnippetSettings) -> Snippet {
    extract_with_terms(document, &QueryTerms::new(query), settings)
}

/// Extracts a snippet with already prepared query terms.
pub(crate) fn extract_with_terms(
    document: &Document,
    terms: &QueryTerms,
    settings: &SnippetSettings,
) -> Snippet {
    let content = document.content.as_str();

    if let Some((offset, term)) = terms.earliest_in(content) {
        let total = content.chars().count();
        let start = offset.saturating_sub(settings.context_before);
        let end = total.min(offset + settings.context_after);

        let mut text = String::new();
        if start > 0 {
            text.push_str(ELLIPSIS);
        }
        text.push_str(char_slice(content, start, end));
        if end < total {
            text.push_str(ELLIPSIS);
        }
        return Snippet {
            text,
            anchor: SnippetAnchor::Content {
                offset,
                term: term.to_string(),
            },
        };
    }

    if let Some(term) = terms.first_contained_in(&document.keywords) {
        let mut text = preview(content, settings.keyword_preview);
        text.push_str(&format!(" [Matches keyword: {term}]"));
        return Snippet {
            text,
            anchor: SnippetAnchor::Keyword {
                term: term.to_string(),
            },
        };
    }

    let mut text = char_slice(content, 0, settings.fallback_preview).to_string();
    text.push_str(ELLIPSIS);
    Snippet {
        text,
        anchor: SnippetAnchor::Fallback,
    }
}

/// Returns the first `limit` characters, with an ellipsis if anything was cut.
fn preview(content: &str, limit: usize) -> String {
    let head = char_slice(content, 0, limit);
    if head.len() < content.len() {
        format!("{head}{ELLIPSIS}")
    } else {
        head.to_string()
    }
}

/// Slices `text` by character positions, clamped to its length.
fn char_slice(text: &str, start: usize, end: usize) -> &str {
    let byte_at = |chars: usize| {
        text.char_indices()
            .nth(chars)
            .map_or(text.len(), |(index, _)| index)
    };
    let start_byte = byte_at(start);
    let end_byte = byte_at(end.max(start));
    &text[start_byte..end_byte]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document(content: &str, keywords: &str) -> Document {
        Document {
            title: "Title".into(),
            content: content.into(),
            section: "Section".into(),
            keywords: keywords.into(),
            url: "./page.html".into(),
        }
    }

    fn snippet(content: &str, keywords: &str, query: &str) -> Snippet {
        extract_snippet(
            &document(content, keywords),
            query,
            &SnippetSettings::default(),
        )
    }

    #[test]
    fn window_around_match() {
        let before = "x".repeat(50);
        let after = "y".repeat(200);
        let content = format!("{before}the metadata column specifies {after}");
        let offset = content.find("metadata").unwrap();

        let result = snippet(&content, "", "metadata");

        assert_eq!(
            result.anchor,
            SnippetAnchor::Content {
                offset,
                term: "metadata".into()
            }
        );
        let expected_start = offset - 40;
        let expected = format!("...{}...", &content[expected_start..offset + 120]);
        assert_eq!(result.text, expected);
    }

    #[test]
    fn no_ellipsis_when_window_covers_content() {
        let result = snippet("Short metadata note.", "", "metadata");
        assert_eq!(result.text, "Short metadata note.");
    }

    #[test]
    fn anchors_on_earliest_term() {
        let content = "Each protocol is described before any sample is listed.";
        let result = snippet(content, "", "sample protocol");
        assert_eq!(
            result.anchor,
            SnippetAnchor::Content {
                offset: 5,
                term: "protocol".into()
            }
        );
    }

    #[test]
    fn match_is_case_insensitive() {
        let result = snippet("About METADATA files.", "", "metadata");
        assert!(matches!(result.anchor, SnippetAnchor::Content { offset: 6, .. }));
    }

    #[test]
    fn keyword_match_annotates() {
        let content = "z".repeat(130);
        let result = snippet(&content, "SDRF, Proteomics", "proteomics");
        assert_eq!(
            result.text,
            format!("{}... [Matches keyword: proteomics]", "z".repeat(120))
        );
        assert_eq!(
            result.anchor,
            SnippetAnchor::Keyword {
                term: "proteomics".into()
            }
        );
    }

    #[test]
    fn keyword_match_short_content_has_no_ellipsis() {
        let result = snippet("Brief.", "organism", "organism");
        assert_eq!(result.text, "Brief. [Matches keyword: organism]");
    }

    #[test]
    fn fallback_always_adds_ellipsis() {
        let result = snippet("Nothing relevant.", "", "metadata");
        assert_eq!(result.text, "Nothing relevant....");
        assert_eq!(result.anchor, SnippetAnchor::Fallback);

        let long = "w".repeat(200);
        let result = snippet(&long, "", "metadata");
        assert_eq!(result.text, format!("{}...", "w".repeat(150)));
    }

    #[test]
    fn multibyte_content_is_sliced_on_characters() {
        let content = format!("{}metadata{}", "é".repeat(60), "ü".repeat(150));
        let result = snippet(&content, "", "metadata");
        let expected = format!("...{}metadata{}...", "é".repeat(40), "ü".repeat(112));
        assert_eq!(result.text, expected);
        assert!(matches!(result.anchor, SnippetAnchor::Content { offset: 60, .. }));
    }

    #[test]
    fn custom_window_sizes() {
        let settings = SnippetSettings {
            context_before: 2,
            context_after: 6,
            ..SnippetSettings::default()
        };
        let result = extract_snippet(&document("abcdefsample tail", ""), "sample", &settings);
        assert_eq!(result.text, "...efsample...");
    }

    #[test]
    fn char_slice_clamps() {
        assert_eq!(char_slice("héllo", 1, 3), "él");
        assert_eq!(char_slice("héllo", 3, 100), "lo");
        assert_eq!(char_slice("héllo", 10, 20), "");
    }
}
