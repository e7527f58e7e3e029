//! The document record and parsing of the document collection.
//!
//! The site build writes the collection twice: as `search-index.json` and as a script
//! assigning the same array to `SEARCH_INDEX`. Both forms are accepted here.

use serde::{Deserialize, Deserializer, Serialize};

use crate::LoadError;

/// One searchable page or page section.
///
/// A document is identified by its position in the loaded collection; that position is
/// the reference stored in the index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Document {
    /// Page or section title.
    #[serde(deserialize_with = "null_as_empty")]
    pub title: String,
    /// Plain-text content.
    #[serde(deserialize_with = "null_as_empty")]
    pub content: String,
    /// Human readable name of the part of the site the page belongs to.
    #[serde(deserialize_with = "null_as_empty")]
    pub section: String,
    /// Space-separated keywords.
    #[serde(deserialize_with = "null_as_empty")]
    pub keywords: String,
    /// Link target, relative to the site root.
    #[serde(deserialize_with = "null_as_empty")]
    pub url: String,
}

/// Reads a string field, treating `null` like a missing field.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Name of the global the generated script assigns.
const SCRIPT_GLOBAL: &str = "SEARCH_INDEX";

/// Parses a document collection from JSON or from the generated script form.
///
/// `origin` names the source in error messages.
pub fn parse_documents(payload: &str, origin: &str) -> Result<Vec<Document>, LoadError> {
    let json = strip_script_wrapper(payload)?;
    serde_json::from_str(json).map_err(|source| LoadError::Parse {
        origin: origin.to_string(),
        source,
    })
}

/// Returns the JSON array inside `payload`.
///
/// Accepts a bare JSON value, or `const SEARCH_INDEX = [...];` preceded by `//` comment
/// lines.
fn strip_script_wrapper(payload: &str) -> Result<&str, LoadError> {
    let mut rest = payload.trim_start();
    while rest.starts_with("//") {
        rest = rest.split_once('\n').map_or("", |(_, tail)| tail).trim_start();
    }

    if rest.starts_with('[') || rest.starts_with('{') {
        return Ok(rest);
    }

    let Some(global_at) = rest.find(SCRIPT_GLOBAL) else {
        return Err(LoadError::EmbeddedFormat);
    };
    let declaration = &rest[..global_at];
    if !declaration
        .split_whitespace()
        .all(|word| matches!(word, "const" | "let" | "var" | "window."))
    {
        return Err(LoadError::EmbeddedFormat);
    }

    let after_global = rest[global_at + SCRIPT_GLOBAL.len()..].trim_start();
    let Some(value) = after_global.strip_prefix('=') else {
        return Err(LoadError::EmbeddedFormat);
    };
    let value = value.trim();
    Ok(value.strip_suffix(';').unwrap_or(value).trim_end())
}
