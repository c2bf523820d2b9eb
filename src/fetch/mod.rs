// src/fetch/mod.rs

use crate::error::RetrievalError;
use async_trait::async_trait;
use reqwest::Client;
use std::{
    collections::HashMap,
    io,
    path::{Path, PathBuf},
    sync::Arc,
};
use tracing::{debug, trace};
use url::Url;

/// Anything that can hand back the raw text stored at a path.
#[async_trait]
pub trait TextSource: Send + Sync {
    async fn fetch_text(&self, path: &str) -> Result<String, RetrievalError>;
}

/// Fetches over HTTP(S). Non-success statuses are errors.
#[derive(Debug, Clone, Default)]
pub struct HttpSource {
    client: Client,
}

impl HttpSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl TextSource for HttpSource {
    async fn fetch_text(&self, path: &str) -> Result<String, RetrievalError> {
        debug!("Fetching text from {}", path);
        let text = self
            .client
            .get(path)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        trace!(bytes = text.len(), %path, "received body");
        Ok(text)
    }
}

/// Reads from the local filesystem, optionally under a root directory.
#[derive(Debug, Clone, Default)]
pub struct FsSource {
    root: Option<PathBuf>,
}

impl FsSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve every path under `root`; a leading `/` on the requested
    /// path is ignored so `/data/races.csv` lands in `root/data/races.csv`.
    pub fn rooted(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
        }
    }

    fn resolve(&self, path: &str) -> PathBuf {
        match &self.root {
            Some(root) => root.join(path.trim_start_matches('/')),
            None => Path::new(path).to_path_buf(),
        }
    }
}

#[async_trait]
impl TextSource for FsSource {
    async fn fetch_text(&self, path: &str) -> Result<String, RetrievalError> {
        let full = self.resolve(path);
        debug!("Reading text from {}", full.display());
        Ok(tokio::fs::read_to_string(&full).await?)
    }
}

/// Serves text held in memory, keyed by exact path.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    files: HashMap<String, String>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<String>, text: impl Into<String>) {
        self.files.insert(path.into(), text.into());
    }

    pub fn with(mut self, path: impl Into<String>, text: impl Into<String>) -> Self {
        self.insert(path, text);
        self
    }

    pub fn remove(&mut self, path: &str) -> Option<String> {
        self.files.remove(path)
    }
}

#[async_trait]
impl TextSource for MemorySource {
    async fn fetch_text(&self, path: &str) -> Result<String, RetrievalError> {
        self.files.get(path).cloned().ok_or_else(|| {
            RetrievalError::Io(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} not found", path),
            ))
        })
    }
}

/// HTTP for `http://` and `https://` bases, filesystem for anything else.
pub fn source_for_base(base: &str) -> Arc<dyn TextSource> {
    if is_remote(base) {
        Arc::new(HttpSource::new())
    } else {
        Arc::new(FsSource::new())
    }
}

pub fn is_remote(base: &str) -> bool {
    Url::parse(base)
        .map(|u| matches!(u.scheme(), "http" | "https"))
        .unwrap_or(false)
}
