//! Index schema definition for the docsearch index.
//!
//! Defines the Tantivy schema used for the document collection:
//! - `ref`: Position of the document in the loaded collection (u64, indexed, stored, fast)
//! - `title`: Page or section title (text)
//! - `keywords`: Space-separated keywords (text)
//! - `section`: Site section name (text)
//! - `content`: Plain-text content (text)
//!
//! Text fields are indexed only. The documents themselves stay with the caller and are
//! looked up by reference, so nothing but `ref` is stored.
//!
//! Every text field and every query term goes through the same `docsearch_text` analyzer,
//! so a typed word and an indexed word meet on the same stem.

use docsearch_config::FieldBoosts;
use serde_json::Value;
use tantivy::{
    schema::{
        FAST, Field, INDEXED, IndexRecordOption, STORED, Schema, TextFieldIndexing, TextOptions,
    },
    tokenizer::{Language, LowerCaser, RemoveLongFilter, SimpleTokenizer, Stemmer, TextAnalyzer},
};

use crate::IndexError;

/// Name under which the text analyzer is registered with the index.
pub const DOCSEARCH_TOKENIZER: &str = "docsearch_text";

/// Tokens longer than this many bytes are dropped.
const MAX_TOKEN_LENGTH: usize = 40;

/// Builds the text analyzer for the stemmer language named `stemmer`.
///
/// The name is matched case-insensitively against Tantivy's stemmer languages
/// (`english`, `German`, ...).
pub fn text_analyzer(stemmer: &str) -> Result<TextAnalyzer, IndexError> {
    let language = stemmer_language(stemmer)?;
    Ok(TextAnalyzer::builder(SimpleTokenizer::default())
        .filter(LowerCaser)
        .filter(RemoveLongFilter::limit(MAX_TOKEN_LENGTH))
        .filter(Stemmer::new(language))
        .build())
}

/// Resolves a stemmer name through Tantivy's own `Language` names.
fn stemmer_language(name: &str) -> Result<Language, IndexError> {
    let mut chars = name.trim().chars();
    let variant: String = match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    };
    serde_json::from_value(Value::String(variant))
        .map_err(|_| IndexError::InvalidLanguage(name.to_string()))
}

/// A searchable text field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocField {
    /// Page or section title.
    Title,
    /// Keywords.
    Keywords,
    /// Site section name.
    Section,
    /// Plain-text content.
    Content,
}

impl DocField {
    /// All searchable fields, in schema order.
    pub const ALL: [Self; 4] = [Self::Title, Self::Keywords, Self::Section, Self::Content];

    /// Returns the schema name of the field.
    pub fn name(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Keywords => "keywords",
            Self::Section => "section",
            Self::Content => "content",
        }
    }

    /// Looks up a field by its schema name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.name() == name)
    }

    /// Returns the configured weight of the field.
    pub fn boost(self, boosts: &FieldBoosts) -> f32 {
        match self {
            Self::Title => boosts.title,
            Self::Keywords => boosts.keywords,
            Self::Section => boosts.section,
            Self::Content => boosts.content,
        }
    }
}

/// Handles to all fields in the index schema.
#[derive(Debug, Clone)]
pub struct IndexSchema {
    /// The underlying Tantivy schema.
    schema: Schema,
    /// Document reference.
    pub reference: Field,
    /// Title field.
    pub title: Field,
    /// Keywords field.
    pub keywords: Field,
    /// Section field.
    pub section: Field,
    /// Content field.
    pub content: Field,
}

impl IndexSchema {
    /// Creates a new index schema with all fields configured.
    pub fn new() -> Self {
        let mut builder = Schema::builder();

        let reference = builder.add_u64_field("ref", INDEXED | STORED | FAST);

        let text_options = TextOptions::default().set_indexing_options(
            TextFieldIndexing::default()
                .set_tokenizer(DOCSEARCH_TOKENIZER)
                .set_index_option(IndexRecordOption::WithFreqsAndPositions),
        );
        let title = builder.add_text_field(DocField::Title.name(), text_options.clone());
        let keywords = builder.add_text_field(DocField::Keywords.name(), text_options.clone());
        let section = builder.add_text_field(DocField::Section.name(), text_options.clone());
        let content = builder.add_text_field(DocField::Content.name(), text_options);

        let schema = builder.build();

        Self {
            schema,
            reference,
            title,
            keywords,
            section,
            content,
        }
    }

    /// Returns a reference to the underlying Tantivy schema.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Returns the Tantivy field for a searchable field.
    pub fn field(&self, field: DocField) -> Field {
        match field {
            DocField::Title => self.title,
            DocField::Keywords => self.keywords,
            DocField::Section => self.section,
            DocField::Content => self.content,
        }
    }
}

impl Default for IndexSchema {
    fn default() -> Self {
        Self::new()
    }
}
