//! Obtaining the document collection.
//!
//! The collection comes from an embedded payload when the page carries one, otherwise
//! from `search-index.json` next to the site root. Pages inside a nested section sit one
//! directory deeper than the root, so the index is looked up one level up from them.

use std::{
    fmt,
    path::{Path, PathBuf},
};

use docsearch_config::LoaderSettings;
use reqwest::{Client, Response, Url};
use tracing::{debug, info};

use crate::{Document, LoadError, parse_documents};

/// Returns the relative prefix from a page to the site root.
///
/// `"../"` when `pathname` contains `/<section>/` for any nested section, else `""`.
pub fn base_path<S: AsRef<str>>(pathname: &str, nested_sections: &[S]) -> &'static str {
    let nested = nested_sections
        .iter()
        .map(AsRef::as_ref)
        .filter(|section| !section.is_empty())
        .any(|section| pathname.contains(&format!("/{section}/")));
    if nested { "../" } else { "" }
}

/// Where the current page lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageLocation {
    /// A page served over HTTP(S).
    Url(Url),
    /// A page on the local filesystem.
    File(PathBuf),
}

impl PageLocation {
    /// Parses a page location from a URL or a filesystem path.
    ///
    /// `http`, `https` and `file` URLs are recognised; anything else is treated as a path.
    pub fn parse(location: &str) -> Result<Self, LoadError> {
        if !location.contains("://") {
            return Ok(Self::File(PathBuf::from(location)));
        }

        let url = Url::parse(location)
            .map_err(|e| LoadError::Location(format!("invalid page URL '{location}': {e}")))?;
        match url.scheme() {
            "http" | "https" => Ok(Self::Url(url)),
            "file" => url
                .to_file_path()
                .map(Self::File)
                .map_err(|()| LoadError::Location(format!("invalid file URL '{location}'"))),
            scheme => Err(LoadError::Location(format!(
                "unsupported scheme '{scheme}' in '{location}'"
            ))),
        }
    }

    /// Returns the path component used to decide the base path.
    pub fn pathname(&self) -> String {
        match self {
            Self::Url(url) => url.path().to_string(),
            Self::File(path) => path.to_string_lossy().replace('\\', "/"),
        }
    }

    /// Resolves the location of the index file for this page.
    pub fn index_location(&self, settings: &LoaderSettings) -> Result<IndexLocation, LoadError> {
        let relative = format!(
            "{}{}",
            base_path(&self.pathname(), &settings.nested_sections),
            settings.index_file
        );
        match self {
            Self::Url(url) => url.join(&relative).map(IndexLocation::Url).map_err(|e| {
                LoadError::Location(format!("cannot resolve '{relative}' against {url}: {e}"))
            }),
            Self::File(path) => {
                let dir = path.parent().unwrap_or_else(|| Path::new(""));
                Ok(IndexLocation::File(dir.join(relative)))
            }
        }
    }
}

/// Where the index file is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexLocation {
    /// Fetched over HTTP(S).
    Url(Url),
    /// Read from disk.
    File(PathBuf),
}

impl IndexLocation {
    /// Parses an index location from a URL or a filesystem path.
    pub fn parse(location: &str) -> Result<Self, LoadError> {
        Ok(match PageLocation::parse(location)? {
            PageLocation::Url(url) => Self::Url(url),
            PageLocation::File(path) => Self::File(path),
        })
    }
}

impl fmt::Display for IndexLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Url(url) => write!(f, "{url}"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Where the document collection comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexSource {
    /// A payload already present in the page.
    Embedded(String),
    /// The index file belonging to a page.
    Page(PageLocation),
    /// An index file at a known location.
    Location(IndexLocation),
}

/// Loads the document collection from its source.
#[derive(Debug, Clone)]
pub struct IndexLoader {
    /// Index file name and nested section names.
    settings: LoaderSettings,
    /// HTTP client for remote pages.
    client: Client,
}

impl IndexLoader {
    /// Creates a loader with the given settings.
    pub fn new(settings: LoaderSettings) -> Self {
        Self {
            settings,
            client: Client::new(),
        }
    }

    /// Loads and parses the document collection.
    pub async fn load(&self, source: &IndexSource) -> Result<Vec<Document>, LoadError> {
        let documents = match source {
            IndexSource::Embedded(payload) => parse_documents(payload, "embedded index")?,
            IndexSource::Page(page) => {
                self.load_location(&page.index_location(&self.settings)?)
                    .await?
            }
            IndexSource::Location(location) => self.load_location(location).await?,
        };
        info!(documents = documents.len(), "search index loaded");
        Ok(documents)
    }

    /// Loads and parses the index file at `location`.
    async fn load_location(&self, location: &IndexLocation) -> Result<Vec<Document>, LoadError> {
        debug!(%location, "loading search index");
        let payload = match location {
            IndexLocation::Url(url) => self.fetch(url).await?,
            IndexLocation::File(path) => read(path).await?,
        };
        parse_documents(&payload, &location.to_string())
    }

    /// Fetches a remote index file.
    async fn fetch(&self, url: &Url) -> Result<String, LoadError> {
        let fetch_error = |source| LoadError::Fetch {
            url: url.to_string(),
            source,
        };
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .and_then(Response::error_for_status)
            .map_err(fetch_error)?;
        response.text().await.map_err(fetch_error)
    }
}

/// Reads a local index file.
async fn read(path: &Path) -> Result<String, LoadError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| LoadError::Read {
            path: path.to_path_buf(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    const INDEX: &str = r#"[{"title": "Home", "content": "Welcome", "section": "", "keywords": "", "url": "index.html"}]"#;

    fn settings() -> LoaderSettings {
        LoaderSettings::default()
    }

    #[test]
    fn base_path_for_nested_sections() {
        let sections = settings().nested_sections;
        assert_eq!(base_path("/site/templates/human.html", &sections), "../");
        assert_eq!(base_path("/conventions/ptm.html", &sections), "../");
        assert_eq!(base_path("/index.html", &sections), "");
        assert_eq!(base_path("/templates.html", &sections), "");
        assert_eq!(base_path("/mytemplates/x.html", &sections), "");
    }

    #[test]
    fn page_location_parsing() {
        assert!(matches!(
            PageLocation::parse("https://example.org/docs/index.html").unwrap(),
            PageLocation::Url(_)
        ));
        assert_eq!(
            PageLocation::parse("site/index.html").unwrap(),
            PageLocation::File(PathBuf::from("site/index.html"))
        );
        assert!(matches!(
            PageLocation::parse("ftp://example.org/index.html"),
            Err(LoadError::Location(_))
        ));
    }

    #[test]
    fn url_index_location_is_relative_to_page() {
        let page = PageLocation::parse("https://example.org/docs/templates/human.html").unwrap();
        let location = page.index_location(&settings()).unwrap();
        assert_eq!(
            location.to_string(),
            "https://example.org/docs/search-index.json"
        );

        let page = PageLocation::parse("https://example.org/docs/index.html").unwrap();
        let location = page.index_location(&settings()).unwrap();
        assert_eq!(
            location.to_string(),
            "https://example.org/docs/search-index.json"
        );
    }

    #[test]
    fn file_index_location_is_relative_to_page() {
        let page = PageLocation::File(PathBuf::from("/site/conventions/ptm.html"));
        assert_eq!(
            page.index_location(&settings()).unwrap(),
            IndexLocation::File(PathBuf::from("/site/conventions/../search-index.json"))
        );
    }

    #[tokio::test]
    async fn loads_embedded_payload() {
        let loader = IndexLoader::new(settings());
        let source = IndexSource::Embedded(format!("const SEARCH_INDEX = {INDEX};"));
        let documents = loader.load(&source).await.unwrap();
        assert_eq!(documents[0].title, "Home");
    }

    #[tokio::test]
    async fn loads_file_next_to_nested_page() {
        let temp = tempfile::tempdir().unwrap();
        fs::write(temp.path().join("search-index.json"), INDEX).unwrap();
        fs::create_dir_all(temp.path().join("templates")).unwrap();

        let loader = IndexLoader::new(settings());
        let page = PageLocation::File(temp.path().join("templates/human.html"));
        let documents = loader.load(&IndexSource::Page(page)).await.unwrap();

        assert_eq!(documents.len(), 1);
    }

    #[tokio::test]
    async fn loads_explicit_location() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("custom.json");
        fs::write(&path, INDEX).unwrap();

        let loader = IndexLoader::new(settings());
        let location = IndexLocation::parse(&path.to_string_lossy()).unwrap();
        let documents = loader.load(&IndexSource::Location(location)).await.unwrap();

        assert_eq!(documents[0].url, "index.html");
    }

    #[tokio::test]
    async fn missing_file_is_read_error() {
        let temp = tempfile::tempdir().unwrap();
        let loader = IndexLoader::new(settings());
        let page = PageLocation::File(temp.path().join("index.html"));

        let err = loader.load(&IndexSource::Page(page)).await.unwrap_err();
        assert!(matches!(err, LoadError::Read { .. }));
    }

    #[tokio::test]
    async fn malformed_file_is_parse_error() {
        let temp = tempfile::tempdir().unwrap();
        fs::write(temp.path().join("search-index.json"), "<html>404</html>").unwrap();
        let loader = IndexLoader::new(settings());
        let page = PageLocation::File(temp.path().join("index.html"));

        let err = loader.load(&IndexSource::Page(page)).await.unwrap_err();
        assert!(matches!(err, LoadError::EmbeddedFormat | LoadError::Parse { .. }));
    }

    #[tokio::test]
    async fn unreachable_server_is_fetch_error() {
        let loader = IndexLoader::new(settings());
        let page = PageLocation::parse("http://127.0.0.1:9/index.html").unwrap();

        let err = loader.load(&IndexSource::Page(page)).await.unwrap_err();
        assert!(matches!(err, LoadError::Fetch { .. }));
    }
}
