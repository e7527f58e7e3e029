//! Configuration file parsing.
//!
//! Parses individual `.docsearch.toml` files into intermediate `RawConfig` structures
//! that preserve the optional nature of all fields before merging.

use std::{fs, path::Path};

use serde::Deserialize;

use crate::ConfigError;

/// Raw configuration as parsed directly from a TOML file.
///
/// All fields are optional to support partial configs that will be merged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawConfig {
    /// When true, stop discovery here - ignore parent and global configs.
    pub root: Option<bool>,
    /// Loader settings section.
    pub loader: Option<RawLoaderSettings>,
    /// Search settings section.
    pub search: Option<RawSearchSettings>,
    /// Snippet settings section.
    pub snippet: Option<RawSnippetSettings>,
    /// Widget settings section.
    pub widget: Option<RawWidgetSettings>,
}

/// Raw loader settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawLoaderSettings {
    /// File name of the JSON document collection.
    pub index_file: Option<String>,
    /// Path segments whose pages live one directory below the site root.
    pub nested_sections: Option<Vec<String>>,
}

/// Raw search settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawSearchSettings {
    /// Stemming language.
    pub stemmer: Option<String>,
    /// Shortest trimmed input that triggers a search.
    pub min_query_length: Option<usize>,
    /// Maximum number of results rendered.
    pub result_limit: Option<usize>,
    /// Per-field boost overrides.
    pub boosts: Option<RawBoosts>,
}

/// Raw per-field boost overrides.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawBoosts {
    /// Title field boost.
    pub title: Option<f32>,
    /// Keywords field boost.
    pub keywords: Option<f32>,
    /// Section field boost.
    pub section: Option<f32>,
    /// Content field boost.
    pub content: Option<f32>,
}

/// Raw snippet settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawSnippetSettings {
    /// Characters kept before the first match.
    pub context_before: Option<usize>,
    /// Characters kept from the first match onwards.
    pub context_after: Option<usize>,
    /// Content preview length when only the keywords matched.
    pub keyword_preview: Option<usize>,
    /// Content preview length when nothing matched.
    pub fallback_preview: Option<usize>,
}

/// Raw widget settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawWidgetSettings {
    /// Debounce quiet period in milliseconds.
    pub debounce_ms: Option<u64>,
    /// Placeholder shown once the index is ready.
    pub ready_placeholder: Option<String>,
    /// Placeholder shown when the index failed to load.
    pub unavailable_placeholder: Option<String>,
}

/// Parses a configuration file from disk.
pub fn parse_config_file(path: &Path) -> Result<RawConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    parse_config_str(&contents, path)
}

/// Parses configuration from a TOML string.
///
/// The `path` parameter is used for error reporting.
pub fn parse_config_str(contents: &str, path: &Path) -> Result<RawConfig, ConfigError> {
    toml::from_str(contents).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })
}

/// Checks if a config file has `root = true` set.
///
/// Returns false if the file cannot be read or parsed.
pub fn is_root_config(path: &Path) -> bool {
    parse_config_file(path).is_ok_and(|config| config.root == Some(true))
}
