//! In-memory index construction and query execution.
//!
//! Typed input is first run as an expanded query, where every term becomes a prefix match
//! plus an edit-distance-1 match. If the expanded query cannot be parsed or executed, the
//! raw input is searched literally. A literal failure yields no results.

use std::cmp::Ordering;

use docsearch_config::SearchSettings;
use docsearch_query::{expand_query, is_searchable, parse};
use tantivy::{
    Index, IndexReader, IndexWriter, ReloadPolicy, TantivyDocument,
    collector::TopDocs,
    query::Query,
    schema::Value,
};
use tracing::{debug, warn};

use crate::{
    Document, IndexError, SearchError,
    compile::QueryCompiler,
    schema::{DOCSEARCH_TOKENIZER, IndexSchema, text_analyzer},
};

/// Heap size for the index writer (20 MB).
///
/// Tantivy requires at least 15 MB per writer thread.
const WRITER_HEAP_SIZE: usize = 20_000_000;

/// A matching document.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QueryResult {
    /// Position of the document in the collection the index was built from.
    pub reference: usize,
    /// Relevance score; higher is better.
    pub score: f32,
}

/// How a query was answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryStrategy {
    /// The input was too short to search.
    Skipped,
    /// The expanded prefix + fuzzy query succeeded.
    Expanded,
    /// The expanded query failed and the raw input was searched literally.
    Literal,
    /// Both attempts failed.
    Failed,
}

impl QueryStrategy {
    /// Returns a lowercase name for display.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Skipped => "skipped",
            Self::Expanded => "expanded",
            Self::Literal => "literal",
            Self::Failed => "failed",
        }
    }
}

/// The results of a query together with how they were obtained.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryOutcome {
    /// Matches in descending score order.
    pub results: Vec<QueryResult>,
    /// Which attempt produced the results.
    pub strategy: QueryStrategy,
    /// The query text that was executed.
    pub expression: String,
}

/// A searchable, immutable index over a document collection.
pub struct SearchIndex {
    /// Reader over the single committed generation.
    reader: IndexReader,
    /// Schema with field handles.
    schema: IndexSchema,
    /// Compiler for parsed queries.
    compiler: QueryCompiler,
    /// Inputs shorter than this are not searched.
    min_query_length: usize,
    /// Number of indexed documents.
    len: usize,
}

impl SearchIndex {
    /// Builds an index over `documents`.
    ///
    /// Each document is indexed with its position in the slice as its reference.
    pub fn build(documents: &[Document], settings: &SearchSettings) -> Result<Self, IndexError> {
        let schema = IndexSchema::new();
        let index = Index::create_in_ram(schema.schema().clone());

        let analyzer = text_analyzer(&settings.stemmer)?;
        index
            .tokenizers()
            .register(DOCSEARCH_TOKENIZER, analyzer.clone());

        let mut writer: IndexWriter = index
            .writer_with_num_threads(1, WRITER_HEAP_SIZE)
            .map_err(|e| IndexError::create(&e))?;
        for (position, document) in documents.iter().enumerate() {
            writer
                .add_document(to_tantivy_document(&schema, position, document))
                .map_err(|e| IndexError::write(&e))?;
        }
        writer.commit().map_err(|e| IndexError::commit(&e))?;

        let reader: IndexReader = index
            .reader_builder()
            .reload_policy(ReloadPolicy::Manual)
            .try_into()
            .map_err(|e| IndexError::create(&e))?;

        debug!(documents = documents.len(), stemmer = %settings.stemmer, "built search index");

        Ok(Self {
            compiler: QueryCompiler::new(schema.clone(), analyzer, settings.boosts),
            reader,
            schema,
            min_query_length: settings.min_query_length,
            len: documents.len(),
        })
    }

    /// Returns the number of indexed documents.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the index holds no documents.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Searches with every term of `input` expanded to a prefix and a fuzzy match.
    pub fn search_expanded(&self, input: &str) -> Result<Vec<QueryResult>, SearchError> {
        self.search_syntax(&expand_query(input))
    }

    /// Parses `expression` as query syntax and searches with it.
    pub fn search_syntax(&self, expression: &str) -> Result<Vec<QueryResult>, SearchError> {
        let parsed = parse(expression)?;
        match self.compiler.compile(&parsed)? {
            Some(query) => self.execute(&*query),
            None => Ok(Vec::new()),
        }
    }

    /// Searches for the terms of `input` without interpreting query syntax.
    pub fn search_literal(&self, input: &str) -> Result<Vec<QueryResult>, SearchError> {
        match self.compiler.compile_literal(input) {
            Some(query) => self.execute(&*query),
            None => Ok(Vec::new()),
        }
    }

    /// Runs the full query strategy for typed input.
    ///
    /// Never fails: inputs that are too short, and inputs neither attempt can handle,
    /// produce an empty result list.
    pub fn run_query(&self, input: &str) -> QueryOutcome {
        if !is_searchable(input, self.min_query_length) {
            return QueryOutcome {
                results: Vec::new(),
                strategy: QueryStrategy::Skipped,
                expression: String::new(),
            };
        }

        let expanded_error = match self.search_expanded(input) {
            Ok(results) => {
                return QueryOutcome {
                    results,
                    strategy: QueryStrategy::Expanded,
                    expression: expand_query(input),
                };
            }
            Err(e) => e,
        };
        debug!(input, error = %expanded_error, "expanded query failed, searching literally");

        match self.search_literal(input) {
            Ok(results) => QueryOutcome {
                results,
                strategy: QueryStrategy::Literal,
                expression: input.to_string(),
            },
            Err(e) => {
                warn!(input, error = %e, "literal query failed");
                QueryOutcome {
                    results: Vec::new(),
                    strategy: QueryStrategy::Failed,
                    expression: input.to_string(),
                }
            }
        }
    }

    /// Returns the matches for typed input in descending score order.
    pub fn query(&self, input: &str) -> Vec<QueryResult> {
        self.run_query(input).results
    }

    /// Executes a compiled query and collects every match.
    fn execute(&self, query: &dyn Query) -> Result<Vec<QueryResult>, SearchError> {
        let searcher = self.reader.searcher();
        let top_docs = searcher
            .search(query, &TopDocs::with_limit(self.len.max(1)))
            .map_err(|e| SearchError::engine(&e))?;

        let mut results = Vec::with_capacity(top_docs.len());
        for (score, address) in top_docs {
            let doc: TantivyDocument = searcher.doc(address).map_err(|e| SearchError::engine(&e))?;
            let Some(reference) = doc
                .get_first(self.schema.reference)
                .and_then(|value| value.as_u64())
            else {
                warn!(?address, "indexed document has no reference");
                continue;
            };
            results.push(QueryResult {
                reference: reference as usize,
                score,
            });
        }

        results.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.reference.cmp(&b.reference))
        });
        Ok(results)
    }
}

/// Converts a document into its indexed form.
fn to_tantivy_document(
    schema: &IndexSchema,
    position: usize,
    document: &Document,
) -> TantivyDocument {
    let mut doc = TantivyDocument::default();
    doc.add_u64(schema.reference, position as u64);
    doc.add_text(schema.title, &document.title);
    doc.add_text(schema.keywords, &document.keywords);
    doc.add_text(schema.section, &document.section);
    doc.add_text(schema.content, &document.content);
    doc
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(title: &str, content: &str, section: &str, keywords: &str) -> Document {
        Document {
            title: title.into(),
            content: content.into(),
            section: section.into(),
            keywords: keywords.into(),
            url: format!("./{}.html", title.to_lowercase().replace(' ', "-")),
        }
    }

    fn collection() -> Vec<Document> {
        vec![
            doc(
                "Sample metadata",
                "Every sample row describes one biological specimen.",
                "Guidelines",
                "characteristics",
            ),
            doc(
                "Data protocol",
                "The protocol section lists instruments and settings.",
                "Templates",
                "instrument",
            ),
            doc(
                "Draft notes",
                "Unreviewed sample ideas.",
                "Conventions",
                "draft",
            ),
        ]
    }

    fn build(documents: &[Document]) -> SearchIndex {
        SearchIndex::build(documents, &SearchSettings::default()).unwrap()
    }

    fn references(results: &[QueryResult]) -> Vec<usize> {
        results.iter().map(|r| r.reference).collect()
    }

    #[test]
    fn references_are_positions() {
        let index = build(&collection());
        assert_eq!(index.len(), 3);

        let results = index.query("instrument");
        assert_eq!(references(&results), vec![1]);
    }

    #[test]
    fn prefix_matches() {
        let index = build(&collection());
        let outcome = index.run_query("proto");
        assert_eq!(outcome.strategy, QueryStrategy::Expanded);
        assert_eq!(outcome.expression, "proto* proto~1");
        assert_eq!(references(&outcome.results), vec![1]);
    }

    #[test]
    fn typo_matches_with_edit_distance_one() {
        let index = build(&collection());
        assert_eq!(references(&index.query("protocl")), vec![1]);
        assert_eq!(references(&index.query("metadta")), vec![0]);
    }

    #[test]
    fn title_outranks_content() {
        let index = build(&collection());
        let results = index.query("protocol");
        assert_eq!(results[0].reference, 1);

        let results = index.query("sample");
        assert_eq!(results[0].reference, 0);
        assert!(results[0].score > results.last().unwrap().score);
    }

    #[test]
    fn short_input_is_skipped() {
        let index = build(&collection());
        let outcome = index.run_query(" s ");
        assert_eq!(outcome.strategy, QueryStrategy::Skipped);
        assert!(outcome.results.is_empty());
    }

    #[test]
    fn single_character_terms_are_dropped() {
        let index = build(&collection());
        let outcome = index.run_query("a protocol");
        assert_eq!(outcome.expression, "protocol* protocol~1");
        assert_eq!(references(&outcome.results), vec![1]);
    }

    #[test]
    fn syntax_characters_fall_back_to_literal() {
        let index = build(&collection());
        let outcome = index.run_query("Metadata^");
        assert_eq!(outcome.strategy, QueryStrategy::Literal);
        assert_eq!(references(&outcome.results), vec![0]);
    }

    #[test]
    fn outcome_follows_expanded_step() {
        let index = build(&collection());

        let expanded = index.search_expanded("sampl").unwrap();
        let outcome = index.run_query("sampl");
        assert_eq!(outcome.strategy, QueryStrategy::Expanded);
        assert_eq!(references(&outcome.results), references(&expanded));

        assert!(index.search_expanded("Metadata^").is_err());
        assert_eq!(index.run_query("Metadata^").strategy, QueryStrategy::Literal);
    }

    #[test]
    fn syntax_only_input_returns_nothing() {
        let index = build(&collection());
        for input in ["~~", "^^^", "::", "+-"] {
            assert!(index.query(input).is_empty(), "{input}");
        }
    }

    #[test]
    fn prohibited_terms_exclude() {
        let index = build(&collection());
        let results = index.query("sample -draft");
        assert!(!references(&results).contains(&2));
        assert!(references(&results).contains(&0));
    }

    #[test]
    fn unknown_field_falls_back() {
        let index = build(&collection());
        assert!(index.search_syntax("author:alice").unwrap_err().is_syntax());
        let outcome = index.run_query("author:sample");
        assert_eq!(outcome.strategy, QueryStrategy::Literal);
        assert!(!outcome.results.is_empty());
    }

    #[test]
    fn all_matches_are_returned() {
        let documents: Vec<Document> = (0..15)
            .map(|i| doc(&format!("Page {i}"), "shared sample text", "Core", ""))
            .collect();
        let index = build(&documents);

        let mut refs = references(&index.query("sample"));
        refs.sort_unstable();
        assert_eq!(refs, (0..15).collect::<Vec<_>>());
    }

    #[test]
    fn empty_collection() {
        let index = build(&[]);
        assert!(index.is_empty());
        assert!(index.query("sample").is_empty());
    }

    #[test]
    fn invalid_stemmer_is_rejected() {
        let settings = SearchSettings {
            stemmer: "klingon".into(),
            ..SearchSettings::default()
        };
        assert!(matches!(
            SearchIndex::build(&collection(), &settings),
            Err(IndexError::InvalidLanguage(_))
        ));
    }
}
