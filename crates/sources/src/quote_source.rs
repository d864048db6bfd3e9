//! Quote data source backed by a JSON cache file and an optional endpoint

use crate::cache::{read_quotes, write_quotes};
use crate::remote::RemoteFetcher;
use async_trait::async_trait;
use inkboard_core::{DataSource, QuotePool, SourceError, SourceMetadata};
use inkboard_types::{QuoteRecord, SourceConfig};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Quote source
///
/// Reads the quote list from `cache_path`. When an endpoint is configured,
/// `fetch_remote` downloads a fresh list, validates it and replaces the
/// cache file; a response that does not parse leaves the cache untouched.
pub struct QuoteSource {
    metadata: SourceMetadata,
    cache_path: PathBuf,
    fetcher: Option<RemoteFetcher>,
}

impl QuoteSource {
    pub fn new(config: &SourceConfig) -> Result<Self, SourceError> {
        let fetcher = match &config.endpoint {
            Some(endpoint) if !endpoint.trim().is_empty() => Some(RemoteFetcher::new(
                endpoint.trim(),
                Duration::from_secs(config.fetch_timeout_secs),
            )?),
            _ => None,
        };

        let description = match &fetcher {
            Some(fetcher) => format!(
                "{} (from {}, fetch timeout {}s)",
                config.cache_path.display(),
                fetcher.endpoint(),
                config.fetch_timeout_secs
            ),
            None => config.cache_path.display().to_string(),
        };

        Ok(Self {
            metadata: SourceMetadata {
                id: "quotes".to_string(),
                name: "Quotes".to_string(),
                description,
            },
            cache_path: config.cache_path.clone(),
            fetcher,
        })
    }

    pub fn cache_path(&self) -> &Path {
        &self.cache_path
    }
}

#[async_trait]
impl DataSource for QuoteSource {
    fn metadata(&self) -> &SourceMetadata {
        &self.metadata
    }

    async fn load_cached(&self) -> Result<QuotePool, SourceError> {
        read_quotes(&self.cache_path).await
    }

    async fn fetch_remote(&self) -> Result<(), SourceError> {
        let fetcher = self.fetcher.as_ref().ok_or(SourceError::NoEndpoint)?;

        let body = fetcher.fetch().await?;
        let quotes: Vec<QuoteRecord> = serde_json::from_slice(&body)?;
        write_quotes(&self.cache_path, &body).await?;

        log::info!(
            "Fetched {} quotes from {} into {}",
            quotes.len(),
            fetcher.endpoint(),
            self.cache_path.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    const BODY: &str = r#"[{"quote": "Fetched wisdom", "author": "Server"}]"#;

    /// Serve a single HTTP response on a local port, returning its URL
    async fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
        });
        format!("http://{}/quotes.json", addr)
    }

    fn config(cache_path: PathBuf, endpoint: Option<String>) -> SourceConfig {
        SourceConfig {
            cache_path,
            endpoint,
            fetch_timeout_secs: 5,
        }
    }

    #[tokio::test]
    async fn test_fetch_remote_writes_cache() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quotes.json");
        let url = serve_once("200 OK", BODY).await;

        let source = QuoteSource::new(&config(path.clone(), Some(url))).unwrap();
        source.fetch_remote().await.unwrap();

        let pool = source.load_cached().await.unwrap();
        assert_eq!(pool.quotes, vec![QuoteRecord::new("Fetched wisdom", "Server")]);
    }

    #[tokio::test]
    async fn test_load_or_fetch_without_cache() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quotes.json");
        let url = serve_once("200 OK", BODY).await;

        let source = QuoteSource::new(&config(path.clone(), Some(url))).unwrap();
        let pool = source.load_or_fetch().await.unwrap();
        assert_eq!(pool.quotes.len(), 1);
        assert!(path.exists());
    }

    #[tokio::test]
    async fn test_bad_status_keeps_cache() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quotes.json");
        std::fs::write(&path, r#"[{"quote": "old", "author": ""}]"#).unwrap();
        let url = serve_once("500 Internal Server Error", "oops").await;

        let source = QuoteSource::new(&config(path.clone(), Some(url))).unwrap();
        let err = source.fetch_remote().await.unwrap_err();
        assert!(matches!(err, SourceError::Status { status: 500, .. }));

        let pool = source.load_cached().await.unwrap();
        assert_eq!(pool.quotes[0].text, "old");
    }

    #[tokio::test]
    async fn test_unparseable_body_keeps_cache() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quotes.json");
        std::fs::write(&path, r#"[{"quote": "old", "author": ""}]"#).unwrap();
        let url = serve_once("200 OK", "{\"error\": true}").await;

        let source = QuoteSource::new(&config(path.clone(), Some(url))).unwrap();
        let err = source.fetch_remote().await.unwrap_err();
        assert!(matches!(err, SourceError::Parse(_)));

        let pool = source.load_cached().await.unwrap();
        assert_eq!(pool.quotes[0].text, "old");
    }

    #[tokio::test]
    async fn test_no_endpoint() {
        let dir = tempfile::tempdir().unwrap();
        let source = QuoteSource::new(&config(dir.path().join("q.json"), None)).unwrap();

        assert!(matches!(
            source.fetch_remote().await,
            Err(SourceError::NoEndpoint)
        ));
        assert!(matches!(
            source.load_or_fetch().await,
            Err(SourceError::Unavailable(_))
        ));
    }

    #[test]
    fn test_blank_endpoint_is_cache_only() {
        let source =
            QuoteSource::new(&config(PathBuf::from("q.json"), Some("  ".to_string()))).unwrap();
        assert!(source.fetcher.is_none());
        assert_eq!(source.metadata().description, "q.json");
        assert_eq!(source.cache_path(), Path::new("q.json"));
    }

    #[test]
    fn test_description_names_fetch_timeout() {
        let source = QuoteSource::new(&config(
            PathBuf::from("q.json"),
            Some("http://localhost/q.json".to_string()),
        ))
        .unwrap();
        assert_eq!(
            source.metadata().description,
            "q.json (from http://localhost/q.json, fetch timeout 5s)"
        );
    }
}
