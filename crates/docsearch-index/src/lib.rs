//! Tantivy-backed document index for docsearch.
//!
//! This crate turns the site's document collection into something a search box can query:
//! - Loading the collection from an embedded payload, a file next to the page, or a URL
//! - Building an in-memory Tantivy index with weighted title, keywords, section and content
//! - Compiling query syntax into Tantivy queries
//! - Running the typed input through prefix + fuzzy expansion, with a literal fallback
//!
//! # Example
//!
//! ```
//! use docsearch_config::SearchSettings;
//! use docsearch_index::{Document, SearchIndex};
//!
//! let docs = vec![Document {
//!     title: "Sample metadata".into(),
//!     content: "Describe the metadata of every sample.".into(),
//!     section: "Guidelines".into(),
//!     keywords: "organism".into(),
//!     url: "./sample.html".into(),
//! }];
//!
//! let index = SearchIndex::build(&docs, &SearchSettings::default()).unwrap();
//! let results = index.query("metadta");
//! assert_eq!(results[0].reference, 0);
//! ```

#![warn(missing_docs)]

mod compile;
mod document;
mod error;
mod loader;
mod schema;
mod search;

pub use document::{Document, parse_documents};
pub use error::{IndexError, LoadError, SearchError};
pub use loader::{IndexLoader, IndexLocation, IndexSource, PageLocation, base_path};
pub use schema::{DocField, IndexSchema};
pub use search::{QueryOutcome, QueryResult, QueryStrategy, SearchIndex};
