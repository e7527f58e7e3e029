//! Case-insensitive matching of query terms in document text.
//!
//! Terms are matched as literal text: regex metacharacters typed by the user are escaped,
//! so `v1.2` only matches a literal `v1.2`.

use docsearch_query::query_terms;
use regex::{Regex, RegexBuilder};

/// A single term and its matcher.
#[derive(Debug, Clone)]
struct Term {
    /// Lowercased term text.
    text: String,
    /// Case-insensitive literal matcher.
    pattern: Regex,
}

/// The terms of a query, ready for matching.
#[derive(Debug, Clone, Default)]
pub struct QueryTerms {
    /// Terms in query order.
    terms: Vec<Term>,
}

impl QueryTerms {
    /// Extracts the terms of `query`: whitespace-separated words longer than one character.
    pub fn new(query: &str) -> Self {
        let terms = query_terms(query)
            .filter_map(|term| {
                RegexBuilder::new(&regex::escape(term))
                    .case_insensitive(true)
                    .build()
                    .ok()
                    .map(|pattern| Term {
                        text: term.to_lowercase(),
                        pattern,
                    })
            })
            .collect();
        Self { terms }
    }

    /// Returns true if the query has no usable terms.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Returns the lowercased terms in query order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(|term| term.text.as_str())
    }

    /// Finds the earliest occurrence of any term in `text`.
    ///
    /// Returns the character offset of the match and the term that produced it. When two
    /// terms match at the same offset, the one that comes first in the query wins.
    pub fn earliest_in(&self, text: &str) -> Option<(usize, &str)> {
        let mut best: Option<(usize, &str)> = None;
        for term in &self.terms {
            let Some(found) = term.pattern.find(text) else {
                continue;
            };
            if best.is_none_or(|(offset, _)| found.start() < offset) {
                best = Some((found.start(), term.text.as_str()));
            }
        }
        best.map(|(byte_offset, term)| (text[..byte_offset].chars().count(), term))
    }

    /// Returns the first term, in query order, that occurs in `text`.
    pub fn first_contained_in(&self, text: &str) -> Option<&str> {
        self.terms
            .iter()
            .find(|term| term.pattern.is_match(text))
            .map(|term| term.text.as_str())
    }

    /// Wraps every occurrence of every term in `open` and `close`.
    ///
    /// Terms are applied one after another, each pass scanning the output of the previous
    /// one, so markers from different terms may nest or overlap.
    pub fn wrap(&self, text: &str, open: &str, close: &str) -> String {
        let replacement = format!("{open}${{0}}{close}");
        self.terms.iter().fold(text.to_string(), |acc, term| {
            term.pattern
                .replace_all(&acc, replacement.as_str())
                .into_owned()
        })
    }
}
