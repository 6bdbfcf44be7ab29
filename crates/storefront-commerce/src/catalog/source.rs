//! Where catalog bytes come from.

use crate::error::CatalogError;
use async_trait::async_trait;
use std::path::PathBuf;

/// Raw response from a catalog source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogPayload {
    /// HTTP-style status. Local sources report 200.
    pub status: u16,
    /// Response body, expected to be a JSON array of products.
    pub body: Vec<u8>,
}

impl CatalogPayload {
    /// A successful payload.
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    /// Check for a 2xx status.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// A source of catalog data.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetch the catalog payload. Transport failures map to `Unavailable`.
    async fn fetch(&self) -> Result<CatalogPayload, CatalogError>;

    /// Human-readable location, used in logs.
    fn describe(&self) -> String;
}

/// Reads the catalog from a JSON file on disk.
#[derive(Debug, Clone)]
pub struct FileCatalogSource {
    path: PathBuf,
}

impl FileCatalogSource {
    /// Create a source for the given path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CatalogSource for FileCatalogSource {
    async fn fetch(&self) -> Result<CatalogPayload, CatalogError> {
        let body = tokio::fs::read(&self.path)
            .await
            .map_err(|e| CatalogError::Unavailable(format!("{}: {}", self.path.display(), e)))?;
        Ok(CatalogPayload::ok(body))
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Serves a fixed payload from memory.
#[derive(Debug, Clone)]
pub struct StaticCatalogSource {
    payload: CatalogPayload,
}

impl StaticCatalogSource {
    /// Serve `body` with status 200.
    pub fn new(body: impl Into<Vec<u8>>) -> Self {
        Self {
            payload: CatalogPayload::ok(body),
        }
    }

    /// Serve `body` with an explicit status.
    pub fn with_status(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            payload: CatalogPayload {
                status,
                body: body.into(),
            },
        }
    }
}

#[async_trait]
impl CatalogSource for StaticCatalogSource {
    async fn fetch(&self) -> Result<CatalogPayload, CatalogError> {
        Ok(self.payload.clone())
    }

    fn describe(&self) -> String {
        "static".to_string()
    }
}

/// Fetches the catalog over HTTP.
#[cfg(feature = "http")]
#[derive(Debug, Clone)]
pub struct HttpCatalogSource {
    client: reqwest::Client,
    url: String,
}

#[cfg(feature = "http")]
impl HttpCatalogSource {
    /// Create a source for `url` with a default client.
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), url)
    }

    /// Create a source that reuses an existing client.
    pub fn with_client(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[cfg(feature = "http")]
#[async_trait]
impl CatalogSource for HttpCatalogSource {
    async fn fetch(&self) -> Result<CatalogPayload, CatalogError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| CatalogError::Unavailable(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| CatalogError::Unavailable(e.to_string()))?;
        Ok(CatalogPayload {
            status,
            body: body.to_vec(),
        })
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_file_source_reads_bytes() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"[]").unwrap();

        let source = FileCatalogSource::new(file.path());
        let payload = source.fetch().await.unwrap();
        assert_eq!(payload.status, 200);
        assert_eq!(payload.body, b"[]");
    }

    #[tokio::test]
    async fn test_missing_file_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileCatalogSource::new(dir.path().join("products.json"));
        let err = source.fetch().await.unwrap_err();
        assert!(matches!(err, CatalogError::Unavailable(_)));
    }

    #[test]
    fn test_payload_success_range() {
        assert!(CatalogPayload::ok("x").is_success());
        assert!(!StaticCatalogSource::with_status(304, "").payload.is_success());
        assert!(!StaticCatalogSource::with_status(500, "").payload.is_success());
    }
}
