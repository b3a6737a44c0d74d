//! Where the raw dataset text comes from.
//!
//! The loader only needs "give me the table as text"; this module provides
//! that for local files, HTTP(S) resources, and in-memory strings.

use crate::error::{LoadError, Result};
use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

/// Default location of the dataset, relative to the working directory
pub const DEFAULT_DATASET_PATH: &str = "data/movies.csv";

/// A fetchable source of raw dataset text.
///
/// `Send + Sync` so a single source can back a loader shared across tasks.
#[async_trait]
pub trait DatasetSource: Send + Sync {
    /// Human-readable location, used in logs and errors
    fn describe(&self) -> String;

    /// Retrieve the full payload
    async fn fetch(&self) -> Result<String>;
}

/// Reads the dataset from a file on disk
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Default for FileSource {
    fn default() -> Self {
        Self::new(DEFAULT_DATASET_PATH)
    }
}

#[async_trait]
impl DatasetSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch(&self) -> Result<String> {
        debug!("Reading dataset file {}", self.path.display());
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|e| LoadError::fetch(self.describe(), e))?;
        // Tolerate stray non-UTF-8 bytes instead of failing the whole load
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

/// Fetches the dataset over HTTP(S)
#[derive(Debug, Clone)]
pub struct HttpSource {
    url: String,
    client: reqwest::Client,
}

impl HttpSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl DatasetSource for HttpSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    async fn fetch(&self) -> Result<String> {
        debug!("Requesting dataset from {}", self.url);
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| LoadError::fetch(self.describe(), e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::fetch(
                self.describe(),
                format!("unexpected status {}", status),
            ));
        }

        response
            .text()
            .await
            .map_err(|e| LoadError::fetch(self.describe(), e))
    }
}

/// Serves a fixed in-memory payload
#[derive(Debug, Clone)]
pub struct StaticSource {
    name: String,
    text: Arc<str>,
}

impl StaticSource {
    pub fn new(name: impl Into<String>, text: impl Into<Arc<str>>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }
}

#[async_trait]
impl DatasetSource for StaticSource {
    fn describe(&self) -> String {
        self.name.clone()
    }

    async fn fetch(&self) -> Result<String> {
        Ok(self.text.to_string())
    }
}

/// Pick a source for a location string
///
/// Example: "https://host/movies.csv" -> HttpSource
///          "data/movies.csv"         -> FileSource
pub fn source_for(location: &str) -> Arc<dyn DatasetSource> {
    if location.starts_with("http://") || location.starts_with("https://") {
        Arc::new(HttpSource::new(location))
    } else {
        Arc::new(FileSource::new(location))
    }
}
