//! Configuration system for docsearch.
//!
//! docsearch uses TOML configuration files named `.docsearch.toml`. Configuration is resolved
//! by walking up the directory tree from the current working directory, collecting any
//! `.docsearch.toml` files found, then loading `~/.docsearch.toml` as the global config with
//! lowest precedence. Every setting has a default, so running without any file is fine.

#![warn(missing_docs)]

mod discovery;
mod error;
mod merge;
mod parse;
mod templates;
mod validate;

use std::path::{Path, PathBuf};

pub use discovery::{CONFIG_FILENAME, discover_config_files, global_config_path, is_global_config};
pub use error::ConfigError;
pub use merge::{ParsedConfig, merge_configs};
pub use parse::{
    RawBoosts, RawConfig, RawLoaderSettings, RawSearchSettings, RawSnippetSettings,
    RawWidgetSettings, parse_config_file, parse_config_str,
};
use serde::{Deserialize, Serialize};
pub use templates::config_template;
pub use validate::ConfigWarning;
use validate::validate_config;

/// Top-level merged configuration for docsearch.
///
/// This represents the fully resolved configuration after merging all discovered
/// `.docsearch.toml` files according to precedence rules.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Index loading settings.
    pub loader: LoaderSettings,
    /// Search-related settings.
    pub search: SearchSettings,
    /// Snippet window settings.
    pub snippet: SnippetSettings,
    /// Search box behaviour.
    pub widget: WidgetSettings,
}

impl Config {
    /// Loads configuration by discovering and merging all relevant `.docsearch.toml` files.
    ///
    /// Returns `Ok(Config::default())` if no configuration files are found.
    pub fn load(cwd: &Path) -> Result<Self, ConfigError> {
        let config_files = discover_config_files(cwd);
        Self::load_from_files(&config_files)
    }

    /// Loads configuration from a specific list of config file paths.
    ///
    /// Files should be provided in precedence order: highest precedence first.
    pub fn load_from_files(files: &[PathBuf]) -> Result<Self, ConfigError> {
        if files.is_empty() {
            return Ok(Self::default());
        }

        let parsed: Vec<ParsedConfig> = files
            .iter()
            .map(|path| {
                let config = parse_config_file(path)?;
                Ok(ParsedConfig {
                    path: path.clone(),
                    config,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        Ok(merge_configs(&parsed))
    }

    /// Validates the configuration and returns any warnings.
    pub fn validate(&self) -> Vec<ConfigWarning> {
        validate_config(self)
    }

    /// Serializes the effective settings to TOML format.
    pub fn settings_to_toml(&self) -> Result<String, ConfigError> {
        let serializable = SerializableSettings {
            loader: &self.loader,
            search: &self.search,
            snippet: &self.snippet,
            widget: &self.widget,
        };
        Ok(toml::to_string_pretty(&serializable)?)
    }
}

/// Where and how the document collection is fetched.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoaderSettings {
    /// File name of the JSON document collection.
    pub index_file: String,
    /// Path segments whose pages live one directory below the site root.
    pub nested_sections: Vec<String>,
}

impl Default for LoaderSettings {
    fn default() -> Self {
        Self {
            index_file: String::from("search-index.json"),
            nested_sections: vec![String::from("conventions"), String::from("templates")],
        }
    }
}

/// Relative importance of each indexed field.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct FieldBoosts {
    /// Title field boost.
    pub title: f32,
    /// Keywords field boost.
    pub keywords: f32,
    /// Section field boost.
    pub section: f32,
    /// Content field boost.
    pub content: f32,
}

impl Default for FieldBoosts {
    fn default() -> Self {
        Self {
            title: 10.0,
            keywords: 8.0,
            section: 5.0,
            content: 1.0,
        }
    }
}

/// Search-related settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Stemming language.
    pub stemmer: String,
    /// Shortest trimmed input, in characters, that triggers a search.
    pub min_query_length: usize,
    /// Maximum number of results rendered.
    pub result_limit: usize,
    /// Field boost weights.
    pub boosts: FieldBoosts,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            stemmer: String::from("english"),
            min_query_length: 2,
            result_limit: 10,
            boosts: FieldBoosts::default(),
        }
    }
}

/// Snippet window sizes, in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SnippetSettings {
    /// Characters kept before the first match.
    pub context_before: usize,
    /// Characters kept from the first match onwards.
    pub context_after: usize,
    /// Content preview length when only the keywords matched.
    pub keyword_preview: usize,
    /// Content preview length when nothing matched.
    pub fallback_preview: usize,
}

impl Default for SnippetSettings {
    fn default() -> Self {
        Self {
            context_before: 40,
            context_after: 120,
            keyword_preview: 120,
            fallback_preview: 150,
        }
    }
}

/// Search box behaviour.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WidgetSettings {
    /// Quiet period after the last keystroke before a search runs.
    pub debounce_ms: u64,
    /// Placeholder shown once the index is ready.
    pub ready_placeholder: String,
    /// Placeholder shown when the index failed to load.
    pub unavailable_placeholder: String,
}

impl Default for WidgetSettings {
    fn default() -> Self {
        Self {
            debounce_ms: 200,
            ready_placeholder: String::from("Search documentation..."),
            unavailable_placeholder: String::from("Search unavailable"),
        }
    }
}

/// Internal struct for TOML serialization of settings.
#[derive(Serialize)]
struct SerializableSettings<'a> {
    /// Loader settings.
    loader: &'a LoaderSettings,
    /// Search settings.
    search: &'a SearchSettings,
    /// Snippet settings.
    snippet: &'a SnippetSettings,
    /// Widget settings.
    widget: &'a WidgetSettings,
}
