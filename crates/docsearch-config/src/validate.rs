//! Configuration validation.
//!
//! Validates a loaded configuration and reports warnings for settings that load fine but
//! make the search box behave oddly.

use std::fmt;

use crate::{Config, FieldBoosts};

/// A non-fatal warning about the configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigWarning {
    /// A field boost is zero, negative or not a number.
    NonPositiveBoost {
        /// Name of the field.
        field: &'static str,
        /// Configured boost.
        value: f32,
    },
    /// `result_limit` is zero, so nothing is ever shown.
    ZeroResultLimit,
    /// `min_query_length` is zero, so an empty box searches.
    ZeroMinQueryLength,
    /// `index_file` is empty.
    EmptyIndexFile,
    /// `debounce_ms` is unusually long.
    LongDebounce {
        /// Configured quiet period.
        debounce_ms: u64,
    },
}

/// Debounce values above this are reported.
const LONG_DEBOUNCE_MS: u64 = 2_000;

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveBoost { field, value } => {
                write!(f, "boost for '{field}' should be positive, got {value}")
            }
            Self::ZeroResultLimit => write!(f, "result_limit is 0: no results will be shown"),
            Self::ZeroMinQueryLength => {
                write!(f, "min_query_length is 0: empty input will be searched")
            }
            Self::EmptyIndexFile => write!(f, "loader.index_file is empty"),
            Self::LongDebounce { debounce_ms } => {
                write!(f, "debounce_ms of {debounce_ms} will make search feel slow")
            }
        }
    }
}

/// Validates the configuration and returns any warnings.
pub fn validate_config(config: &Config) -> Vec<ConfigWarning> {
    let mut warnings = validate_boosts(&config.search.boosts);

    if config.search.result_limit == 0 {
        warnings.push(ConfigWarning::ZeroResultLimit);
    }
    if config.search.min_query_length == 0 {
        warnings.push(ConfigWarning::ZeroMinQueryLength);
    }
    if config.loader.index_file.trim().is_empty() {
        warnings.push(ConfigWarning::EmptyIndexFile);
    }
    if config.widget.debounce_ms > LONG_DEBOUNCE_MS {
        warnings.push(ConfigWarning::LongDebounce {
            debounce_ms: config.widget.debounce_ms,
        });
    }

    warnings
}

/// Checks every field boost.
fn validate_boosts(boosts: &FieldBoosts) -> Vec<ConfigWarning> {
    [
        ("title", boosts.title),
        ("keywords", boosts.keywords),
        ("section", boosts.section),
        ("content", boosts.content),
    ]
    .into_iter()
    .filter(|(_, value)| value.is_nan() || *value <= 0.0)
    .map(|(field, value)| ConfigWarning::NonPositiveBoost { field, value })
    .collect()
}
