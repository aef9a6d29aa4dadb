//! Loader for the progress document.
//!
//! The document comes either from an HTTP(S) URL or from a local file path. HTTP requests
//! ask every cache along the way to stay out of it, so each load reflects the latest
//! contents.

use std::fmt;
use std::path::{Path, PathBuf};

use reqwest::header::{CACHE_CONTROL, PRAGMA};
use reqwest::{Client, StatusCode};
use thiserror::Error;

use crate::models::ProgressDocument;

/// Default location of the progress document, relative to the working directory.
pub const DEFAULT_SOURCE: &str = "./data/progress.json";

/// Load failures. All of them surface to the user as the same fallback text.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to load {url}: server responded {status}")]
    Status { status: StatusCode, url: String },

    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid progress document: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Where the progress document lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Url(String),
    File(PathBuf),
}

impl Source {
    /// `http://` and `https://` are URLs; anything else is a file path.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        let lower = raw.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Self::Url(raw.to_string())
        } else {
            Self::File(PathBuf::from(raw))
        }
    }
}

impl Default for Source {
    fn default() -> Self {
        Self::File(PathBuf::from(DEFAULT_SOURCE))
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Url(url) => f.write_str(url),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Fetches progress documents.
#[derive(Debug, Clone, Default)]
pub struct ProgressClient {
    client: Client,
}

impl ProgressClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a preconfigured HTTP client (timeouts, proxies, TLS).
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Load and parse the document from `source`.
    pub async fn load(&self, source: &Source) -> Result<ProgressDocument, LoadError> {
        let bytes = match source {
            Source::Url(url) => self.fetch(url).await?,
            Source::File(path) => read_file(path).await?,
        };
        let doc = ProgressDocument::from_json(&bytes)?;
        tracing::debug!(
            source = %source,
            status_rows = doc.status_rows.len(),
            agents = doc.agents.len(),
            activity = doc.activity.len(),
            "Loaded progress document"
        );
        Ok(doc)
    }

    async fn fetch(&self, url: &str) -> Result<Vec<u8>, LoadError> {
        let response = self
            .client
            .get(url)
            .header(CACHE_CONTROL, "no-store")
            .header(PRAGMA, "no-cache")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::Status {
                status,
                url: url.to_string(),
            });
        }
        Ok(response.bytes().await?.to_vec())
    }
}

async fn read_file(path: &Path) -> Result<Vec<u8>, LoadError> {
    tokio::fs::read(path).await.map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_source_kinds() {
        assert_eq!(
            Source::parse("https://example.com/progress.json"),
            Source::Url("https://example.com/progress.json".to_string())
        );
        assert_eq!(
            Source::parse("HTTP://localhost:8080/p.json"),
            Source::Url("HTTP://localhost:8080/p.json".to_string())
        );
        assert_eq!(
            Source::parse(" ./data/progress.json "),
            Source::File(PathBuf::from("./data/progress.json"))
        );
        assert_eq!(Source::default(), Source::parse(DEFAULT_SOURCE));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let client = ProgressClient::new();
        let source = Source::File(PathBuf::from("/definitely/not/here/progress.json"));
        let result = tokio_test::block_on(client.load(&source));
        assert!(matches!(result, Err(LoadError::Io { .. })));
    }

    #[test]
    fn status_error_names_the_url() {
        let err = LoadError::Status {
            status: StatusCode::NOT_FOUND,
            url: "http://localhost/p.json".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Failed to load http://localhost/p.json: server responded 404 Not Found"
        );
    }
}
