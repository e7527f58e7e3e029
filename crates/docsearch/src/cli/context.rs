//! Shared context for running CLI commands.

use std::{
    env, fs,
    path::{Path, PathBuf},
    process::ExitCode,
};

use docsearch_config::Config;
use docsearch_index::{Document, IndexLoader, IndexLocation, IndexSource, LoadError, PageLocation};

use super::args::SourceArgs;
use crate::widget::SearchContext;

/// Command execution context built once per CLI invocation.
pub struct CommandContext {
    /// Current working directory.
    pub cwd: PathBuf,
    /// Loaded configuration (may be default if no config files found).
    pub config: Config,
}

impl CommandContext {
    /// Loads the current directory and configuration.
    pub fn load() -> Result<Self, ExitCode> {
        let cwd = current_dir_or_failure()?;
        let config = load_config_or_failure(&cwd)?;
        Ok(Self { cwd, config })
    }

    /// Loads only the current directory, skipping configuration parsing.
    ///
    /// Used for `init`, which should work even when an existing config file is invalid.
    pub fn load_cwd_only() -> Result<Self, ExitCode> {
        let cwd = current_dir_or_failure()?;
        Ok(Self {
            cwd,
            config: Config::default(),
        })
    }

    /// Resolves the source flags to an index source.
    ///
    /// Relative paths are taken from the working directory; with no flag the configured
    /// index file in the working directory is used.
    pub fn index_source(&self, args: &SourceArgs) -> Result<IndexSource, ExitCode> {
        let source = if let Some(index) = &args.index {
            IndexLocation::parse(index)
                .map(|location| IndexSource::Location(self.absolute(location)))
        } else if let Some(page) = &args.page {
            PageLocation::parse(page).map(|page| match page {
                PageLocation::File(path) => {
                    IndexSource::Page(PageLocation::File(self.cwd.join(path)))
                }
                url @ PageLocation::Url(_) => IndexSource::Page(url),
            })
        } else if let Some(embedded) = &args.embedded {
            let path = self.cwd.join(embedded);
            fs::read_to_string(&path)
                .map(IndexSource::Embedded)
                .map_err(|source| LoadError::Read { path, source })
        } else {
            Ok(IndexSource::Location(IndexLocation::File(
                self.cwd.join(&self.config.loader.index_file),
            )))
        };

        source.map_err(|e| {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        })
    }

    /// Loads the document collection named by the source flags.
    pub async fn load_documents(&self, args: &SourceArgs) -> Result<Vec<Document>, ExitCode> {
        let source = self.index_source(args)?;
        IndexLoader::new(self.config.loader.clone())
            .load(&source)
            .await
            .map_err(|e| {
                eprintln!("error: failed to load search index: {e}");
                ExitCode::FAILURE
            })
    }

    /// Loads the document collection and indexes it.
    pub async fn search_context(&self, args: &SourceArgs) -> Result<SearchContext, ExitCode> {
        let documents = self.load_documents(args).await?;
        SearchContext::build(documents, &self.config).map_err(|e| {
            eprintln!("error: failed to build search index: {e}");
            ExitCode::FAILURE
        })
    }

    /// Makes a file location absolute against the working directory.
    fn absolute(&self, location: IndexLocation) -> IndexLocation {
        match location {
            IndexLocation::File(path) => IndexLocation::File(self.cwd.join(path)),
            url @ IndexLocation::Url(_) => url,
        }
    }
}

/// Returns the current working directory or exits with a consistent error.
fn current_dir_or_failure() -> Result<PathBuf, ExitCode> {
    env::current_dir().map_err(|e| {
        eprintln!("error: could not determine current directory: {e}");
        ExitCode::FAILURE
    })
}

/// Loads configuration from the provided directory or exits with an error.
fn load_config_or_failure(cwd: &Path) -> Result<Config, ExitCode> {
    Config::load(cwd).map_err(|e| {
        eprintln!("error: failed to load configuration: {e}");
        ExitCode::FAILURE
    })
}
