//! Term highlighting for HTML and terminal output.

use crate::{QueryTerms, colors};

/// Opening marker for a highlighted term in HTML.
pub const MARK_OPEN: &str = "<mark>";
/// Closing marker for a highlighted term in HTML.
pub const MARK_CLOSE: &str = "</mark>";

/// Wraps every case-insensitive occurrence of each query term in `<mark>` tags.
///
/// The text is inserted as is; it is expected to be trusted site content.
pub fn highlight_html(text: &str, terms: &QueryTerms) -> String {
    terms.wrap(text, MARK_OPEN, MARK_CLOSE)
}

/// Highlights query terms with bold yellow ANSI styling.
pub fn highlight_ansi(text: &str, terms: &QueryTerms) -> String {
    terms.wrap(text, colors::MATCH, colors::RESET)
}

/// Styles `text` as a header with query terms highlighted inside it.
///
/// Each match ends by switching back to the header style, so text after a match keeps it.
pub fn highlight_ansi_header(text: &str, terms: &QueryTerms) -> String {
    let restore = format!("{}{}{}", colors::RESET, colors::BOLD, colors::CYAN);
    colors::header(&terms.wrap(text, colors::MATCH, &restore))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marks_every_term() {
        let terms = QueryTerms::new("sample protocol");
        assert_eq!(
            highlight_html("Sample protocol per sample", &terms),
            "<mark>Sample</mark> <mark>protocol</mark> per <mark>sample</mark>"
        );
    }

    #[test]
    fn metacharacters_are_literal() {
        let dotted = QueryTerms::new("v1.2");
        assert_eq!(highlight_html("v1x2 v1.2", &dotted), "v1x2 <mark>v1.2</mark>");

        let starred = QueryTerms::new("a*");
        assert_eq!(highlight_html("aaa a*", &starred), "aaa <mark>a*</mark>");
    }

    #[test]
    fn short_terms_are_ignored() {
        let terms = QueryTerms::new("a");
        assert_eq!(highlight_html("a banana", &terms), "a banana");
    }

    #[test]
    fn ansi_styles_matches() {
        let terms = QueryTerms::new("data");
        let out = highlight_ansi("Metadata", &terms);
        assert_eq!(out, format!("Meta{}data{}", colors::MATCH, colors::RESET));
    }

    #[test]
    fn header_style_resumes_after_match() {
        let terms = QueryTerms::new("protocol");
        let out = highlight_ansi_header("Protocols", &terms);
        let header = format!("{}{}", colors::BOLD, colors::CYAN);
        assert_eq!(
            out,
            format!(
                "{header}{}Protocol{}{header}s{}",
                colors::MATCH,
                colors::RESET,
                colors::RESET
            )
        );
    }

    #[test]
    fn header_without_matches_is_plain_header() {
        let terms = QueryTerms::new("zebrafish");
        assert_eq!(highlight_ansi_header("Protocols", &terms), colors::header("Protocols"));
    }
}
