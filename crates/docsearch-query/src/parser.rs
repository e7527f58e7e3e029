//! Query parser.
//!
//! Parses a token stream into a flat list of clauses.
//!
//! # Grammar
//!
//! ```text
//! query    → clause*
//! clause   → presence? FIELD_PREFIX? TERM modifier*
//! presence → "+" | "-"
//! modifier → "~" DIGITS | "^" NUMBER
//! ```

use crate::{
    ast::{Clause, Presence, Query, Wildcard},
    error::{ParseError, QueryError},
    lexer::{Token, tokenize},
};

/// Largest edit distance the fuzzy matcher supports.
const MAX_EDIT_DISTANCE: u8 = 2;

/// Clause-by-clause parser for query token streams.
struct Parser {
    /// Token stream to parse.
    tokens: Vec<Token>,
    /// Current position in token stream.
    position: usize,
}

impl Parser {
    /// Creates a new parser from a token stream.
    fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            position: 0,
        }
    }

    /// Parses the token stream into a query.
    fn parse(mut self) -> Result<Query, ParseError> {
        let mut clauses = Vec::new();
        while self.position < self.tokens.len() {
            clauses.push(self.parse_clause()?);
        }
        Ok(Query { clauses })
    }

    /// Parses: clause → presence? FIELD_PREFIX? TERM modifier*
    fn parse_clause(&mut self) -> Result<Clause, ParseError> {
        let presence = match self.peek() {
            Some(Token::Required) => {
                self.advance();
                Presence::Required
            }
            Some(Token::Prohibited) => {
                self.advance();
                Presence::Prohibited
            }
            _ => Presence::Optional,
        };

        let field = if let Some(Token::FieldPrefix(name)) = self.peek() {
            let name = name.clone();
            self.advance();
            Some(name)
        } else {
            None
        };

        let term = match self.peek().cloned() {
            Some(Token::Term(text)) => {
                self.advance();
                text
            }
            other => return Err(self.missing_term(other.as_ref(), presence, field.as_deref())),
        };

        let mut clause = Clause {
            term,
            field,
            presence,
            edit_distance: 0,
            boost: None,
        };
        self.parse_modifiers(&mut clause)?;
        Ok(clause)
    }

    /// Parses the modifiers trailing a term.
    fn parse_modifiers(&mut self, clause: &mut Clause) -> Result<(), ParseError> {
        let mut seen_distance = false;
        loop {
            match self.peek() {
                Some(Token::EditDistance(distance)) => {
                    let distance = *distance;
                    if seen_distance {
                        return Err(self.error("duplicate edit distance"));
                    }
                    if distance > MAX_EDIT_DISTANCE {
                        return Err(self.error(format!(
                            "edit distance {distance} exceeds maximum of {MAX_EDIT_DISTANCE}"
                        )));
                    }
                    if clause.wildcard() != Wildcard::None && distance > 0 {
                        return Err(self.error("cannot combine a wildcard with an edit distance"));
                    }
                    seen_distance = true;
                    clause.edit_distance = distance;
                }
                Some(Token::Boost(factor)) => {
                    let factor = *factor;
                    if clause.boost.is_some() {
                        return Err(self.error("duplicate boost"));
                    }
                    clause.boost = Some(factor);
                }
                _ => return Ok(()),
            }
            self.advance();
        }
    }

    /// Builds the error for a clause whose term is missing.
    fn missing_term(
        &self,
        found: Option<&Token>,
        presence: Presence,
        field: Option<&str>,
    ) -> ParseError {
        let after = match (field, presence) {
            (Some(name), _) => format!(" after '{name}:'"),
            (None, Presence::Required) => " after '+'".to_string(),
            (None, Presence::Prohibited) => " after '-'".to_string(),
            (None, Presence::Optional) => String::new(),
        };
        let message = match found {
            Some(Token::EditDistance(_)) => format!("unexpected edit distance{after}"),
            Some(Token::Boost(_)) => format!("unexpected boost{after}"),
            Some(token) => format!("expected term{after}, found {token:?}"),
            None => format!("expected term{after}"),
        };
        self.error(message)
    }

    /// Creates an error at the current token.
    fn error(&self, message: impl Into<String>) -> ParseError {
        ParseError::new(message, Some(self.position))
    }

    /// Returns the current token without consuming it.
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.position)
    }

    /// Advances to the next token.
    fn advance(&mut self) {
        self.position += 1;
    }
}

/// Parses a query string into a [`Query`].
pub fn parse(input: &str) -> Result<Query, QueryError> {
    let tokens = tokenize(input)?;
    Parser::new(tokens)
        .parse()
        .map_err(|e| QueryError::from(e).with_query(input))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_query() {
        assert!(parse("").unwrap().is_empty());
        assert!(parse("   ").unwrap().is_empty());
    }

    #[test]
    fn expanded_query_clauses() {
        let query = parse("meta* meta~1").unwrap();
        assert_eq!(
            query.clauses,
            vec![
                Clause::new("meta*"),
                Clause {
                    edit_distance: 1,
                    ..Clause::new("meta")
                },
            ]
        );
    }

    #[test]
    fn full_clause() {
        let query = parse("+title:sample~2^3").unwrap();
        assert_eq!(
            query.clauses,
            vec![Clause {
                term: "sample".into(),
                field: Some("title".into()),
                presence: Presence::Required,
                edit_distance: 2,
                boost: Some(3.0),
            }]
        );
    }

    #[test]
    fn field_without_term() {
        let err = parse("title:").unwrap_err();
        assert!(err.message().contains("expected term after 'title:'"));
        assert_eq!(err.query.as_deref(), Some("title:"));
    }

    #[test]
    fn dangling_presence() {
        let err = parse("sample +").unwrap_err();
        assert!(err.message().contains("after '+'"));
    }

    #[test]
    fn modifier_without_term() {
        let err = parse("~1").unwrap_err();
        assert!(err.message().contains("unexpected edit distance"));
    }

    #[test]
    fn wildcard_with_edit_distance() {
        let err = parse("meta*~1").unwrap_err();
        assert!(err.message().contains("wildcard"));
    }

    #[test]
    fn wildcard_with_zero_distance_is_allowed() {
        let query = parse("meta*~0").unwrap();
        assert_eq!(query.clauses[0].edit_distance, 0);
    }

    #[test]
    fn edit_distance_too_large() {
        let err = parse("sample~3").unwrap_err();
        assert!(err.message().contains("exceeds maximum"));
    }

    #[test]
    fn duplicate_modifiers() {
        assert!(parse("sample~1~1").is_err());
        assert!(parse("sample^2^3").is_err());
    }

    #[test]
    fn expansion_of_special_input_is_rejected() {
        // What the expansion produces for a user typing "meta*".
        assert!(parse("meta** meta*~1").is_err());
        // ... and for a trailing boost operator.
        assert!(parse("sample^* sample^~1").is_err());
    }
}
