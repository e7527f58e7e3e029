//! Query lexer (tokenizer).
//!
//! Converts a query string into a stream of tokens for the parser.

use std::{iter::Peekable, str::Chars};

use crate::error::LexError;

/// A token in the query language.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// A bare word, `*` wildcards included.
    Term(String),

    /// Field prefix (e.g., "title:" produces FieldPrefix("title")).
    FieldPrefix(String),

    /// Required marker (`+` at the start of a clause).
    Required,

    /// Prohibited marker (`-` at the start of a clause).
    Prohibited,

    /// Edit distance modifier (e.g., "~1" produces EditDistance(1)).
    EditDistance(u8),

    /// Boost modifier (e.g., "^2.5" produces Boost(2.5)).
    Boost(f32),
}

/// Tokenizes a query string.
struct Lexer<'a> {
    /// The original input string.
    input: &'a str,
    /// Character iterator with one-character lookahead.
    chars: Peekable<Chars<'a>>,
    /// Current byte position in input.
    position: usize,
    /// True right after whitespace or at the start of input.
    at_clause_start: bool,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given input.
    fn new(input: &'a str) -> Self {
        Self {
            input,
            chars: input.chars().peekable(),
            position: 0,
            at_clause_start: true,
        }
    }

    /// Creates an error at a specific position.
    fn error_at(&self, message: impl Into<String>, position: usize) -> LexError {
        LexError::new(message, position, self.input)
    }

    /// Tokenizes the entire input, returning all tokens or an error.
    fn tokenize(mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();

        while let Some(token) = self.next_token()? {
            tokens.push(token);
        }

        Ok(tokens)
    }

    /// Returns the next token, or None if at end of input.
    fn next_token(&mut self) -> Result<Option<Token>, LexError> {
        if self.skip_whitespace() {
            self.at_clause_start = true;
        }

        let Some(&ch) = self.chars.peek() else {
            return Ok(None);
        };

        let clause_start = self.at_clause_start;
        self.at_clause_start = false;

        match ch {
            '+' if clause_start => {
                self.advance();
                Ok(Some(Token::Required))
            }
            '-' if clause_start => {
                self.advance();
                Ok(Some(Token::Prohibited))
            }
            '~' => self.read_edit_distance(),
            '^' => self.read_boost(),
            _ => self.read_term_or_field(),
        }
    }

    /// Reads a term or a field prefix.
    fn read_term_or_field(&mut self) -> Result<Option<Token>, LexError> {
        let start_pos = self.position;
        let mut word = String::new();

        while let Some(&ch) = self.chars.peek() {
            if ch.is_whitespace() || ch == '~' || ch == '^' {
                break;
            }

            if ch == ':' {
                self.advance(); // consume the colon
                if word.is_empty() {
                    return Err(self.error_at("empty field name before ':'", start_pos));
                }
                return Ok(Some(Token::FieldPrefix(word)));
            }

            word.push(ch);
            self.advance();
        }

        Ok(Some(Token::Term(word)))
    }

    /// Reads an edit distance modifier (~N).
    fn read_edit_distance(&mut self) -> Result<Option<Token>, LexError> {
        let start_pos = self.position;
        self.advance(); // consume '~'

        let digits = self.read_while(|ch| ch.is_ascii_digit());
        if digits.is_empty() {
            return Err(self.error_at("expected edit distance after '~'", start_pos));
        }

        match digits.parse::<u8>() {
            Ok(distance) => Ok(Some(Token::EditDistance(distance))),
            Err(_) => Err(self.error_at(format!("invalid edit distance: {digits}"), start_pos)),
        }
    }

    /// Reads a boost modifier (^N or ^N.N).
    fn read_boost(&mut self) -> Result<Option<Token>, LexError> {
        let start_pos = self.position;
        self.advance(); // consume '^'

        let mut seen_dot = false;
        let number = self.read_while(|ch| {
            if ch == '.' && !seen_dot {
                seen_dot = true;
                return true;
            }
            ch.is_ascii_digit()
        });

        if number.is_empty() {
            return Err(self.error_at("expected number after '^'", start_pos));
        }

        match number.parse::<f32>() {
            Ok(factor) => Ok(Some(Token::Boost(factor))),
            Err(_) => Err(self.error_at(format!("invalid boost value: {number}"), start_pos)),
        }
    }

    /// Consumes characters while `accept` returns true.
    fn read_while(&mut self, mut accept: impl FnMut(char) -> bool) -> String {
        let mut out = String::new();
        while let Some(&ch) = self.chars.peek() {
            if !accept(ch) {
                break;
            }
            out.push(ch);
            self.advance();
        }
        out
    }

    /// Skips whitespace characters, returning true if any were skipped.
    fn skip_whitespace(&mut self) -> bool {
        let mut skipped = false;
        while let Some(&ch) = self.chars.peek() {
            if !ch.is_whitespace() {
                break;
            }
            skipped = true;
            self.advance();
        }
        skipped
    }

    /// Advances to the next character.
    fn advance(&mut self) {
        if let Some(ch) = self.chars.next() {
            self.position += ch.len_utf8();
        }
    }
}

/// Convenience function to tokenize a query string.
pub fn tokenize(input: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(input).tokenize()
}
