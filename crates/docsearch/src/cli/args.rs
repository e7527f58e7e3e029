//! Clap argument definitions for the `docsearch` CLI.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Top-level CLI options.
#[derive(Parser)]
#[command(name = "docsearch")]
#[command(about = "Search-as-you-type for static documentation sites")]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Where to load the document collection from.
///
/// With no flag, the configured index file in the current directory is used.
#[derive(Args, Debug, Clone, Default)]
#[group(multiple = false)]
pub struct SourceArgs {
    /// Index file path or URL
    #[arg(long, value_name = "PATH|URL")]
    pub index: Option<String>,

    /// Page path or URL; the index is resolved relative to it
    #[arg(long, value_name = "PATH|URL")]
    pub page: Option<String>,

    /// Script or JSON file holding an embedded index payload
    #[arg(long, value_name = "FILE")]
    pub embedded: Option<PathBuf>,
}

/// Shared output mode flags.
#[derive(Args, Debug, Clone, Default)]
#[group(multiple = false)]
pub struct OutputArgs {
    /// Output the results panel markup
    #[arg(long)]
    pub html: bool,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Shared explain/debug flag.
#[derive(Args, Debug, Clone, Default)]
pub struct ExplainArgs {
    /// Show the expanded query, its parsed clauses and the strategy used
    #[arg(long)]
    pub explain: bool,
}

/// Arguments for `docsearch search`.
#[derive(Args, Debug, Clone)]
pub struct SearchCommand {
    /// Search input, as typed into the search box
    pub query: String,

    #[command(flatten)]
    /// Index source.
    pub source: SourceArgs,

    #[command(flatten)]
    /// Output formatting flags.
    pub output: OutputArgs,

    #[command(flatten)]
    /// Explain/debug flags.
    pub explain: ExplainArgs,
}

/// Arguments for `docsearch interactive`.
#[derive(Args, Debug, Clone)]
pub struct InteractiveCommand {
    #[command(flatten)]
    /// Index source.
    pub source: SourceArgs,

    /// Print panel markup instead of terminal output
    #[arg(long)]
    pub html: bool,
}

/// Arguments for `docsearch check`.
#[derive(Args, Debug, Clone)]
pub struct CheckCommand {
    #[command(flatten)]
    /// Index source.
    pub source: SourceArgs,
}

/// Arguments for `docsearch init`.
#[derive(Args, Debug, Clone)]
pub struct InitCommand {
    /// Overwrite existing configuration file
    #[arg(long)]
    pub force: bool,
}

/// Supported `docsearch` subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Run one query and print the rendered results
    #[command(after_help = "\
QUERY EXPANSION:
  Every term longer than one character is searched as a prefix and with one
  typo allowed: 'proto' runs 'proto* proto~1'. If that expression is rejected,
  the input is searched literally instead.

EXAMPLES:
  docsearch search metadata
  docsearch search 'sample protocol' --index site/search-index.json
  docsearch search sdrf --page https://example.org/docs/templates/human.html
  docsearch search metadta --explain")]
    Search(SearchCommand),

    /// Read keystrokes from stdin and print each panel update
    #[command(after_help = "\
INPUT:
  Each line replaces the contents of the search box. Typing is debounced, so
  lines arriving in quick succession produce a single search.

  :escape   Press Escape
  :outside  Click outside the search box
  :focus    Press Ctrl+K")]
    Interactive(InteractiveCommand),

    /// Load the index and report on its documents
    Check(CheckCommand),

    /// Initialize docsearch configuration in current directory
    Init(InitCommand),

    /// Show effective configuration settings
    Config,
}
