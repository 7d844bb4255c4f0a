//! Where the catalog UI loads its descriptor from on each page load

use async_trait::async_trait;
use std::path::PathBuf;

use crate::catalog::Catalog;
use crate::error::{Error, Result};

#[async_trait]
pub trait DescriptorSource: Send + Sync {
    async fn load(&self) -> Result<Catalog>;
}

/// Reads the descriptor file from disk
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl DescriptorSource for FileSource {
    async fn load(&self) -> Result<Catalog> {
        let content = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            Error::Descriptor(format!("Could not read {}: {}", self.path.display(), e))
        })?;
        Catalog::from_json(&content)
    }
}

/// Fetches the descriptor over HTTP, failing on non-2xx
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: reqwest::Client,
    url: String,
}

impl HttpSource {
    pub fn new(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl DescriptorSource for HttpSource {
    async fn load(&self) -> Result<Catalog> {
        let response = self.client.get(&self.url).send().await?;
        if !response.status().is_success() {
            return Err(Error::Descriptor(format!(
                "Failed to load settings: {} returned {}",
                self.url,
                response.status()
            )));
        }
        let body = response.text().await?;
        Catalog::from_json(&body)
    }
}
