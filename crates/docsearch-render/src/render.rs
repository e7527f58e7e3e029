//! Result rendering.
//!
//! Turns ranked query results into the contents of the results panel. Each render
//! produces a complete panel; nothing is carried over from the previous one.

use docsearch_config::{Config, SnippetSettings};
use docsearch_index::{Document, QueryResult};
use serde::Serialize;
use tracing::warn;

use crate::{
    QueryTerms, Snippet, colors,
    highlight::{highlight_ansi, highlight_ansi_header, highlight_html},
    snippet::extract_with_terms,
};

/// Markup shown when a query matched nothing.
pub const NO_RESULTS_HTML: &str = r#"<div class="no-results">No results found</div>"#;

/// Default number of results shown.
pub const DEFAULT_RESULT_LIMIT: usize = 10;

/// One displayed result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedResult {
    /// Position of the document in the collection.
    pub reference: usize,
    /// Relevance score.
    pub score: f32,
    /// Document title.
    pub title: String,
    /// Document section.
    pub section: String,
    /// Link target.
    pub url: String,
    /// Excerpt of the content.
    pub snippet: Snippet,
    /// Title with matches marked.
    pub title_html: String,
    /// Snippet text with matches marked.
    pub snippet_html: String,
}

impl RenderedResult {
    /// Returns the HTML fragment for this result.
    pub fn to_html(&self) -> String {
        format!(
            concat!(
                "<a href=\"{}\" class=\"search-result-item\">",
                "<div class=\"result-title\">{}</div>",
                "<div class=\"result-section\">{}</div>",
                "<div class=\"result-snippet\">{}</div>",
                "</a>"
            ),
            self.url, self.title_html, self.section, self.snippet_html
        )
    }
}

/// The state of the results panel after a render.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Panel {
    /// Whether the panel is shown.
    pub visible: bool,
    /// Displayed results, best first.
    pub items: Vec<RenderedResult>,
    /// Panel markup.
    pub html: String,
}

impl Panel {
    /// A hidden, empty panel.
    pub fn hidden() -> Self {
        Self::default()
    }

    /// Returns true if the panel is visible with no results.
    pub fn is_no_results(&self) -> bool {
        self.visible && self.items.is_empty()
    }

    /// Hides the panel, keeping its contents.
    pub fn close(&mut self) {
        self.visible = false;
    }
}

/// Renders query results into a panel.
#[derive(Debug, Clone, PartialEq)]
pub struct Renderer {
    /// Maximum number of results shown.
    limit: usize,
    /// Snippet window sizes.
    snippet: SnippetSettings,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(DEFAULT_RESULT_LIMIT, SnippetSettings::default())
    }
}

impl Renderer {
    /// Creates a renderer showing at most `limit` results.
    pub fn new(limit: usize, snippet: SnippetSettings) -> Self {
        Self { limit, snippet }
    }

    /// Creates a renderer from loaded configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.search.result_limit, config.snippet)
    }

    /// Renders `results` for `query` against the loaded `documents`.
    ///
    /// Keeps the first results in the order given, skipping references that do not
    /// resolve to a document. The panel is visible even when nothing matched.
    pub fn render(&self, documents: &[Document], results: &[QueryResult], query: &str) -> Panel {
        let terms = QueryTerms::new(query);
        let items: Vec<RenderedResult> = results
            .iter()
            .filter_map(|result| {
                let resolved = documents.get(result.reference);
                if resolved.is_none() {
                    warn!(
                        reference = result.reference,
                        documents = documents.len(),
                        "result does not resolve to a document"
                    );
                }
                resolved.map(|document| self.render_item(document, result, &terms))
            })
            .take(self.limit)
            .collect();

        let html = if items.is_empty() {
            NO_RESULTS_HTML.to_string()
        } else {
            items.iter().map(RenderedResult::to_html).collect()
        };

        Panel {
            visible: true,
            items,
            html,
        }
    }

    /// Renders one resolved result.
    fn render_item(
        &self,
        document: &Document,
        result: &QueryResult,
        terms: &QueryTerms,
    ) -> RenderedResult {
        let snippet = extract_with_terms(document, terms, &self.snippet);
        RenderedResult {
            reference: result.reference,
            score: result.score,
            title: document.title.clone(),
            section: document.section.clone(),
            url: document.url.clone(),
            title_html: highlight_html(&document.title, terms),
            snippet_html: highlight_html(&snippet.text, terms),
            snippet,
        }
    }
}

/// Renders a panel for the terminal, highlighting `query` terms.
pub fn render_terminal(panel: &Panel, query: &str) -> String {
    if !panel.visible {
        return String::new();
    }
    if panel.items.is_empty() {
        return format!("{}\n", colors::warning("No results found"));
    }

    let terms = QueryTerms::new(query);
    let mut out = String::new();
    for (rank, item) in panel.items.iter().enumerate() {
        out.push_str(&format!(
            "{}. {}  {}\n",
            rank + 1,
            highlight_ansi_header(&item.title, &terms),
            colors::dim(&item.section)
        ));
        out.push_str(&format!("   {}\n", colors::dim(&item.url)));
        out.push_str(&format!(
            "   {}\n",
            highlight_ansi(&item.snippet.text, &terms)
        ));
    }
    out
}
