//! Error types for the docsearch-index crate.

use std::{io, path::PathBuf};

use docsearch_query::QueryError;
use thiserror::Error;

/// Errors that can occur while building the search index.
#[derive(Debug, Error)]
pub enum IndexError {
    /// Failed to create the index or its reader.
    #[error("failed to create index: {0}")]
    Create(String),

    /// Failed to write to the index.
    #[error("failed to write to index: {0}")]
    Write(String),

    /// Failed to commit changes to the index.
    #[error("failed to commit index: {0}")]
    Commit(String),

    /// Invalid stemmer language.
    #[error("unsupported stemmer language: {0}")]
    InvalidLanguage(String),
}

impl IndexError {
    /// Creates a `Create` error from a Tantivy error.
    pub(crate) fn create(source: &tantivy::TantivyError) -> Self {
        Self::Create(source.to_string())
    }

    /// Creates a `Write` error from a Tantivy error.
    pub(crate) fn write(source: &tantivy::TantivyError) -> Self {
        Self::Write(source.to_string())
    }

    /// Creates a `Commit` error from a Tantivy error.
    pub(crate) fn commit(source: &tantivy::TantivyError) -> Self {
        Self::Commit(source.to_string())
    }
}

/// Errors that can occur while obtaining the document collection.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The HTTP request failed or returned an error status.
    #[error("failed to fetch {url}: {source}")]
    Fetch {
        /// Requested URL.
        url: String,
        /// Underlying HTTP error.
        source: reqwest::Error,
    },

    /// The index file could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        /// Path of the index file.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The payload is not a valid document array.
    #[error("malformed search index from {origin}: {source}")]
    Parse {
        /// Where the payload came from.
        origin: String,
        /// Underlying JSON error.
        source: serde_json::Error,
    },

    /// The payload is neither JSON nor a `SEARCH_INDEX` script.
    #[error("search index is neither a JSON array nor a SEARCH_INDEX assignment")]
    EmbeddedFormat,

    /// The index location could not be resolved from the page location.
    #[error("cannot resolve index location: {0}")]
    Location(String),
}

/// Errors from a single query attempt.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The query text is not valid query syntax.
    #[error(transparent)]
    Query(#[from] QueryError),

    /// The engine failed while executing a valid query.
    #[error("search failed: {0}")]
    Engine(String),
}

impl SearchError {
    /// Creates an `Engine` error from a Tantivy error.
    pub(crate) fn engine(source: &tantivy::TantivyError) -> Self {
        Self::Engine(source.to_string())
    }

    /// Returns true if the query text itself was rejected.
    pub fn is_syntax(&self) -> bool {
        matches!(self, Self::Query(_))
    }
}
