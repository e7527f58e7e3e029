//! Snippets, highlighting and result rendering for docsearch.
//!
//! Given ranked results from `docsearch-index`, this crate resolves each reference back
//! to its document, picks an excerpt around the first matching query term, marks every
//! occurrence of the query terms, and assembles the results panel as HTML or as styled
//! terminal text.

#![warn(missing_docs)]

pub mod colors;
mod highlight;
mod render;
mod snippet;
mod terms;

pub use highlight::{
    MARK_CLOSE, MARK_OPEN, highlight_ansi, highlight_ansi_header, highlight_html,
};
pub use render::{
    DEFAULT_RESULT_LIMIT, NO_RESULTS_HTML, Panel, RenderedResult, Renderer, render_terminal,
};
pub use snippet::{ELLIPSIS, Snippet, SnippetAnchor, extract_snippet};
pub use terms::QueryTerms;
