//! Rendering and JSON serialization for CLI output.

use std::process::ExitCode;

pub use docsearch_render::colors::{dim, header, warning};
use docsearch_render::{RenderedResult, render_terminal};
use serde::Serialize;

use crate::{cli::args::OutputArgs, widget::SearchResponse};

/// JSON output for one query.
#[derive(Serialize)]
struct JsonSearchOutput<'a> {
    /// The input as typed.
    query: &'a str,
    /// How the query was answered.
    strategy: &'static str,
    /// The expression that was executed.
    expression: &'a str,
    /// Number of matching documents before truncation.
    total_matches: usize,
    /// Displayed results.
    results: &'a [RenderedResult],
}

/// Prints a search response in the selected output mode.
pub fn output_response(
    query: &str,
    response: &SearchResponse,
    output: &OutputArgs,
    min_query_length: usize,
) -> ExitCode {
    let panel = &response.panel;

    if output.json {
        let json = JsonSearchOutput {
            query,
            strategy: response.outcome.strategy.as_str(),
            expression: &response.outcome.expression,
            total_matches: response.outcome.results.len(),
            results: &panel.items,
        };
        return match serde_json::to_string_pretty(&json) {
            Ok(json) => {
                println!("{json}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("error: failed to serialize JSON: {e}");
                ExitCode::FAILURE
            }
        };
    }

    if !panel.visible {
        eprintln!(
            "{}",
            dim(&format!(
                "query not searched: at least {min_query_length} characters are needed"
            ))
        );
        return ExitCode::SUCCESS;
    }

    if output.html {
        println!("{}", panel.html);
        return ExitCode::SUCCESS;
    }

    print!("{}", render_terminal(panel, query));
    let total = response.outcome.results.len();
    if total > panel.items.len() {
        println!();
        println!(
            "{}",
            dim(&format!("Showing {} of {total} results", panel.items.len()))
        );
    }
    ExitCode::SUCCESS
}
