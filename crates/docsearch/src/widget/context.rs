//! The loaded collection and its index.

use std::sync::Arc;

use docsearch_config::Config;
use docsearch_index::{Document, IndexError, QueryOutcome, QueryStrategy, SearchIndex};
use docsearch_render::{Panel, Renderer};

/// Everything needed to answer queries, built once after the index loads.
///
/// Never mutated after construction; shared by reference with the event loop.
pub struct SearchContext {
    /// Documents in source order; a result's reference is a position here.
    documents: Arc<[Document]>,
    /// Full-text index over `documents`.
    index: SearchIndex,
    /// Panel renderer.
    renderer: Renderer,
}

/// The outcome of one query and the panel rendered from it.
#[derive(Debug, Clone)]
pub struct SearchResponse {
    /// Results and the strategy that produced them.
    pub outcome: QueryOutcome,
    /// The panel to display.
    pub panel: Panel,
}

impl SearchContext {
    /// Indexes `documents` using the configured search and snippet settings.
    pub fn build(documents: Vec<Document>, config: &Config) -> Result<Self, IndexError> {
        let index = SearchIndex::build(&documents, &config.search)?;
        Ok(Self {
            documents: documents.into(),
            index,
            renderer: Renderer::from_config(config),
        })
    }

    /// Returns the loaded documents.
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    /// Returns the search index.
    pub fn index(&self) -> &SearchIndex {
        &self.index
    }

    /// Runs `query` and renders the results panel.
    ///
    /// Input too short to search yields a hidden, empty panel.
    pub fn search(&self, query: &str) -> SearchResponse {
        let outcome = self.index.run_query(query);
        let panel = if outcome.strategy == QueryStrategy::Skipped {
            Panel::hidden()
        } else {
            self.renderer
                .render(&self.documents, &outcome.results, query)
        };
        SearchResponse { outcome, panel }
    }
}
