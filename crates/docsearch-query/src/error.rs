//! Error types for query parsing and compilation.
//!
//! Any of these errors means the query text was not valid query syntax. The
//! search layer reacts to them by retrying the raw input as a literal query.

use std::{error::Error, fmt};

use thiserror::Error as ThisError;

/// Lexer error with position information.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
#[error("{message} at byte {position}")]
pub struct LexError {
    /// Error message.
    pub message: String,
    /// Byte position in input where error occurred.
    pub position: usize,
    /// The original input string.
    pub input: String,
}

impl LexError {
    /// Creates a new lexer error.
    pub fn new(message: impl Into<String>, position: usize, input: &str) -> Self {
        Self {
            message: message.into(),
            position,
            input: input.to_string(),
        }
    }
}

/// Parse error with the index of the offending token.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
#[error("{message}")]
pub struct ParseError {
    /// Error message.
    pub message: String,
    /// Token index where error occurred (if applicable).
    pub token_index: Option<usize>,
}

impl ParseError {
    /// Creates a new parse error.
    pub fn new(message: impl Into<String>, token_index: Option<usize>) -> Self {
        Self {
            message: message.into(),
            token_index,
        }
    }
}

/// A unified error type for invalid queries.
#[derive(Debug, Clone)]
pub struct QueryError {
    /// The kind of error that occurred.
    pub kind: QueryErrorKind,
    /// The original query string (if available).
    pub query: Option<String>,
}

/// The specific kind of query error.
#[derive(Debug, Clone)]
pub enum QueryErrorKind {
    /// Lexer error (tokenization failed).
    Lex {
        /// Error message.
        message: String,
        /// Byte position in input.
        position: usize,
    },
    /// Parser error (invalid clause structure).
    Parse {
        /// Error message.
        message: String,
    },
    /// Compilation error (valid syntax the index cannot execute).
    Compile {
        /// Error message.
        message: String,
    },
}

impl QueryError {
    /// Creates a compile error.
    pub fn compile(message: impl Into<String>) -> Self {
        Self {
            kind: QueryErrorKind::Compile {
                message: message.into(),
            },
            query: None,
        }
    }

    /// Sets the query string for this error.
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    /// Returns the error message without context.
    pub fn message(&self) -> &str {
        match &self.kind {
            QueryErrorKind::Lex { message, .. }
            | QueryErrorKind::Parse { message }
            | QueryErrorKind::Compile { message } => message,
        }
    }

    /// Returns a suggestion for common errors.
    pub fn suggestion(&self) -> Option<&'static str> {
        let message = self.message();
        if message.contains("unknown field") {
            Some("Valid fields are: title, keywords, section, content")
        } else if message.contains("after '~'") {
            Some("Give an edit distance, e.g. 'protocol~1'")
        } else if message.contains("after '^'") {
            Some("Give a boost factor, e.g. 'sample^2'")
        } else {
            None
        }
    }
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = match &self.kind {
            QueryErrorKind::Lex { .. } | QueryErrorKind::Parse { .. } => "query syntax error",
            QueryErrorKind::Compile { .. } => "query error",
        };

        write!(f, "{prefix}: {}", self.message())?;

        if let Some(query) = &self.query {
            write!(f, "\n  {query}")?;
            if let QueryErrorKind::Lex { position, .. } = &self.kind {
                let clamped = (*position).min(query.len());
                write!(f, "\n  {}^", " ".repeat(clamped))?;
            }
        }

        if let Some(suggestion) = self.suggestion() {
            write!(f, "\nhint: {suggestion}")?;
        }

        Ok(())
    }
}

impl Error for QueryError {}

impl From<LexError> for QueryError {
    fn from(err: LexError) -> Self {
        Self {
            kind: QueryErrorKind::Lex {
                message: err.message,
                position: err.position,
            },
            query: Some(err.input),
        }
    }
}

impl From<ParseError> for QueryError {
    fn from(err: ParseError) -> Self {
        Self {
            kind: QueryErrorKind::Parse {
                message: err.message,
            },
            query: None,
        }
    }
}
