//! Query syntax for docsearch.
//!
//! A query is a whitespace-separated list of clauses. Clauses are OR-combined
//! unless a presence marker says otherwise:
//!
//! - **Terms**: `metadata` - a word to look for
//! - **Prefix**: `meta*` - any indexed word starting with `meta`
//! - **Wildcards**: `*data` or `m*a` - `*` matches any run of characters
//! - **Fuzzy**: `metdata~1` - words within one edit of `metdata`
//! - **Fields**: `title:sample` - search one field only
//! - **Boosting**: `sample^5` - adjust clause importance
//! - **Presence**: `+sample` must match, `-draft` must not match
//!
//! The crate also owns the term expansion applied to what a user types into
//! the search box, see [`expand_query`].
//!
//! # Example
//!
//! ```
//! use docsearch_query::{expand_query, parse};
//!
//! let expanded = expand_query("sample protocl");
//! assert_eq!(expanded, "sample* sample~1 protocl* protocl~1");
//!
//! let query = parse(&expanded).unwrap();
//! assert_eq!(query.clauses.len(), 4);
//! ```

#![warn(missing_docs)]

mod ast;
mod error;
mod expand;
mod lexer;
mod parser;

pub use ast::{Clause, Presence, Query, Wildcard};
pub use error::{LexError, ParseError, QueryError, QueryErrorKind};
pub use expand::{MIN_QUERY_LENGTH, expand_query, is_searchable, query_terms};
pub use lexer::{Token, tokenize};
pub use parser::parse;
