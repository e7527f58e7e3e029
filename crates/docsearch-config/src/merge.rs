//! Configuration merging.
//!
//! Merges multiple `RawConfig` files into a single resolved `Config`, applying
//! precedence rules on top of the defaults.

use std::path::PathBuf;

use crate::{
    Config, FieldBoosts, LoaderSettings, SearchSettings, SnippetSettings, WidgetSettings,
    parse::{
        RawBoosts, RawConfig, RawLoaderSettings, RawSearchSettings, RawSnippetSettings,
        RawWidgetSettings,
    },
};

/// A parsed config file with its source path.
pub struct ParsedConfig {
    /// Path to the config file.
    pub path: PathBuf,
    /// Parsed raw configuration.
    pub config: RawConfig,
}

/// Merges multiple configuration files into a single resolved `Config`.
///
/// Configs should be provided in precedence order: highest precedence first (closest to CWD),
/// lowest precedence last (global config). For every scalar setting the first defined value
/// wins.
pub fn merge_configs(configs: &[ParsedConfig]) -> Config {
    let mut config = Config::default();

    // Lowest precedence first so higher precedence overwrites.
    for parsed in configs.iter().rev() {
        let raw = &parsed.config;
        if let Some(loader) = &raw.loader {
            apply_raw_loader(&mut config.loader, loader);
        }
        if let Some(search) = &raw.search {
            apply_raw_search(&mut config.search, search);
        }
        if let Some(snippet) = &raw.snippet {
            apply_raw_snippet(&mut config.snippet, snippet);
        }
        if let Some(widget) = &raw.widget {
            apply_raw_widget(&mut config.widget, widget);
        }
    }

    config
}

/// Overwrites `target` with `value` when present.
fn set<T: Clone>(target: &mut T, value: Option<&T>) {
    if let Some(v) = value {
        target.clone_from(v);
    }
}

/// Applies raw loader settings to result.
fn apply_raw_loader(result: &mut LoaderSettings, raw: &RawLoaderSettings) {
    set(&mut result.index_file, raw.index_file.as_ref());
    set(&mut result.nested_sections, raw.nested_sections.as_ref());
}

/// Applies raw search settings to result.
fn apply_raw_search(result: &mut SearchSettings, raw: &RawSearchSettings) {
    set(&mut result.stemmer, raw.stemmer.as_ref());
    set(&mut result.min_query_length, raw.min_query_length.as_ref());
    set(&mut result.result_limit, raw.result_limit.as_ref());
    if let Some(boosts) = &raw.boosts {
        apply_raw_boosts(&mut result.boosts, boosts);
    }
}

/// Applies raw boost overrides to result.
fn apply_raw_boosts(result: &mut FieldBoosts, raw: &RawBoosts) {
    set(&mut result.title, raw.title.as_ref());
    set(&mut result.keywords, raw.keywords.as_ref());
    set(&mut result.section, raw.section.as_ref());
    set(&mut result.content, raw.content.as_ref());
}

/// Applies raw snippet settings to result.
fn apply_raw_snippet(result: &mut SnippetSettings, raw: &RawSnippetSettings) {
    set(&mut result.context_before, raw.context_before.as_ref());
    set(&mut result.context_after, raw.context_after.as_ref());
    set(&mut result.keyword_preview, raw.keyword_preview.as_ref());
    set(&mut result.fallback_preview, raw.fallback_preview.as_ref());
}

/// Applies raw widget settings to result.
fn apply_raw_widget(result: &mut WidgetSettings, raw: &RawWidgetSettings) {
    set(&mut result.debounce_ms, raw.debounce_ms.as_ref());
    set(&mut result.ready_placeholder, raw.ready_placeholder.as_ref());
    set(
        &mut result.unavailable_placeholder,
        raw.unavailable_placeholder.as_ref(),
    );
}
