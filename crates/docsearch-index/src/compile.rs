//! Query compiler.
//!
//! Compiles parsed clauses into Tantivy queries over the weighted text fields.

use docsearch_config::FieldBoosts;
use docsearch_query::{Clause, Presence, Query as ParsedQuery, QueryError, Wildcard};
use tantivy::{
    Term,
    query::{
        AllQuery, BooleanQuery, BoostQuery, FuzzyTermQuery, Occur, Query, RegexQuery, TermQuery,
    },
    schema::{Field, IndexRecordOption},
    tokenizer::{TextAnalyzer, TokenStream},
};

use crate::schema::{DocField, IndexSchema};

/// A Tantivy query and the occurrence it is combined with.
type Subquery = (Occur, Box<dyn Query>);

/// Compiles parsed queries into Tantivy queries.
#[derive(Clone)]
pub struct QueryCompiler {
    /// Index schema for field references.
    schema: IndexSchema,
    /// Text analyzer for tokenizing query terms.
    analyzer: TextAnalyzer,
    /// Per-field weights.
    boosts: FieldBoosts,
}

impl QueryCompiler {
    /// Creates a new query compiler.
    pub fn new(schema: IndexSchema, analyzer: TextAnalyzer, boosts: FieldBoosts) -> Self {
        Self {
            schema,
            analyzer,
            boosts,
        }
    }

    /// Compiles a parsed query into a Tantivy query.
    ///
    /// Clauses are OR-combined unless marked required or prohibited. Returns `None` when no
    /// clause produces a searchable term.
    pub fn compile(&self, query: &ParsedQuery) -> Result<Option<Box<dyn Query>>, QueryError> {
        let mut subqueries = Vec::new();
        for clause in &query.clauses {
            subqueries.extend(self.compile_clause(clause)?);
        }
        Ok(combine(subqueries))
    }

    /// Compiles raw text as a plain OR of its terms across all fields.
    ///
    /// No query syntax is interpreted; punctuation is dropped by the analyzer.
    pub fn compile_literal(&self, text: &str) -> Option<Box<dyn Query>> {
        let subqueries = self
            .tokenize(text)
            .into_iter()
            .map(|token| {
                let per_field = DocField::ALL
                    .into_iter()
                    .map(|field| {
                        let term = Term::from_field_text(self.schema.field(field), &token);
                        let query: Box<dyn Query> =
                            Box::new(TermQuery::new(term, IndexRecordOption::WithFreqs));
                        (Occur::Should, boosted(query, field.boost(&self.boosts)))
                    })
                    .collect();
                (
                    Occur::Should,
                    Box::new(BooleanQuery::new(per_field)) as Box<dyn Query>,
                )
            })
            .collect();
        combine(subqueries)
    }

    /// Compiles one clause into zero or more subqueries.
    ///
    /// A term the analyzer splits into several tokens yields one subquery per token, each
    /// with the clause's presence.
    fn compile_clause(&self, clause: &Clause) -> Result<Vec<Subquery>, QueryError> {
        let fields = self.clause_fields(clause)?;
        let occur = match clause.presence {
            Presence::Optional => Occur::Should,
            Presence::Required => Occur::Must,
            Presence::Prohibited => Occur::MustNot,
        };
        let clause_boost = clause.boost.unwrap_or(1.0);

        let mut subqueries = Vec::new();
        for text in self.clause_terms(clause) {
            let mut per_field: Vec<Subquery> = Vec::with_capacity(fields.len());
            for &field in &fields {
                let query = term_query(clause, self.schema.field(field), &text)?;
                let weight = field.boost(&self.boosts) * clause_boost;
                per_field.push((Occur::Should, boosted(query, weight)));
            }
            subqueries.push((occur, Box::new(BooleanQuery::new(per_field)) as Box<dyn Query>));
        }
        Ok(subqueries)
    }

    /// Resolves the fields a clause searches.
    fn clause_fields(&self, clause: &Clause) -> Result<Vec<DocField>, QueryError> {
        match &clause.field {
            None => Ok(DocField::ALL.to_vec()),
            Some(name) => DocField::from_name(name)
                .map(|field| vec![field])
                .ok_or_else(|| QueryError::compile(format!("unknown field: {name}"))),
        }
    }

    /// Returns the index terms a clause searches for.
    ///
    /// Wildcard terms bypass stemming and are only lowercased, since a stemmed prefix
    /// would no longer be a prefix of anything.
    fn clause_terms(&self, clause: &Clause) -> Vec<String> {
        match clause.wildcard() {
            Wildcard::None => self.tokenize(&clause.term),
            Wildcard::Trailing | Wildcard::Pattern => vec![clause.term.to_lowercase()],
        }
    }

    /// Tokenizes text using the configured analyzer.
    fn tokenize(&self, text: &str) -> Vec<String> {
        let mut analyzer = self.analyzer.clone();
        let mut stream = analyzer.token_stream(text);
        let mut tokens = Vec::new();
        while let Some(token) = stream.next() {
            tokens.push(token.text.clone());
        }
        tokens
    }
}

/// Builds the query for one term in one field.
fn term_query(clause: &Clause, field: Field, text: &str) -> Result<Box<dyn Query>, QueryError> {
    let query: Box<dyn Query> = match clause.wildcard() {
        Wildcard::Trailing => {
            let prefix = text.trim_end_matches('*');
            Box::new(FuzzyTermQuery::new_prefix(
                Term::from_field_text(field, prefix),
                0,
                true,
            ))
        }
        Wildcard::Pattern => {
            let pattern = text
                .split('*')
                .map(regex::escape)
                .collect::<Vec<_>>()
                .join(".*");
            let query = RegexQuery::from_pattern(&pattern, field)
                .map_err(|e| QueryError::compile(format!("invalid pattern '{text}': {e}")))?;
            Box::new(query)
        }
        Wildcard::None if clause.edit_distance > 0 => Box::new(FuzzyTermQuery::new(
            Term::from_field_text(field, text),
            clause.edit_distance,
            true,
        )),
        Wildcard::None => Box::new(TermQuery::new(
            Term::from_field_text(field, text),
            IndexRecordOption::WithFreqs,
        )),
    };
    Ok(query)
}

/// Wraps a query in a score multiplier unless the multiplier is 1.
fn boosted(query: Box<dyn Query>, weight: f32) -> Box<dyn Query> {
    if (weight - 1.0).abs() < f32::EPSILON {
        query
    } else {
        Box::new(BoostQuery::new(query, weight))
    }
}

/// Combines clause subqueries into a single boolean query.
///
/// Prohibited clauses alone exclude from the whole collection.
fn combine(mut subqueries: Vec<Subquery>) -> Option<Box<dyn Query>> {
    if subqueries.is_empty() {
        return None;
    }
    if subqueries
        .iter()
        .all(|(occur, _)| *occur == Occur::MustNot)
    {
        subqueries.insert(0, (Occur::Must, Box::new(AllQuery)));
    }
    Some(Box::new(BooleanQuery::new(subqueries)))
}
