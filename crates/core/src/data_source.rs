//! Data source trait and related types

use async_trait::async_trait;
use chrono::{DateTime, Local};
use inkboard_types::QuoteRecord;
use std::path::PathBuf;
use thiserror::Error;

/// Metadata about a data source
#[derive(Debug, Clone)]
pub struct SourceMetadata {
    /// Unique identifier for this source type
    pub id: String,
    /// Human-readable name
    pub name: String,
    /// Where the quotes come from (file path, URL)
    pub description: String,
}

/// A loaded quote list together with the time it was fetched
#[derive(Debug, Clone, PartialEq)]
pub struct QuotePool {
    pub quotes: Vec<QuoteRecord>,
    pub fetched_at: DateTime<Local>,
}

impl QuotePool {
    pub fn new(quotes: Vec<QuoteRecord>, fetched_at: DateTime<Local>) -> Self {
        Self { quotes, fetched_at }
    }
}

/// Errors raised while loading or fetching quotes
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to access quote cache {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse quote list: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("no endpoint configured")]
    NoEndpoint,
    #[error("request to {url} failed: {message}")]
    Request { url: String, message: String },
    #[error("bad status from {url}: {status}")]
    Status { url: String, status: u16 },
    #[error("failed to load quotes (no cache and fetch failed): {0}")]
    Unavailable(#[source] Box<SourceError>),
}

/// Trait for quote data sources
///
/// A data source owns a cache location and, optionally, a remote endpoint.
/// `load_cached` never touches the network; `fetch_remote` refreshes the
/// cache from the endpoint without parsing it into a pool.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Get metadata about this source
    fn metadata(&self) -> &SourceMetadata;

    /// Load the quote list from the cache location
    async fn load_cached(&self) -> Result<QuotePool, SourceError>;

    /// Fetch the quote list from the remote endpoint into the cache location
    async fn fetch_remote(&self) -> Result<(), SourceError>;

    /// Load from the cache, falling back to fetch-then-load when the cache
    /// is missing or unreadable
    async fn load_or_fetch(&self) -> Result<QuotePool, SourceError> {
        match self.load_cached().await {
            Ok(pool) => Ok(pool),
            Err(cache_err) => {
                log::info!(
                    "[{}] Cache unavailable ({}), fetching from remote",
                    self.metadata().id,
                    cache_err
                );
                self.fetch_remote()
                    .await
                    .map_err(|e| SourceError::Unavailable(Box::new(e)))?;
                self.load_cached().await
            }
        }
    }
}

/// Type-erased data source for dynamic dispatch
pub type BoxedDataSource = Box<dyn DataSource>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    struct FakeSource {
        metadata: SourceMetadata,
        cached: AtomicBool,
        fetch_ok: bool,
        fetches: AtomicUsize,
    }

    impl FakeSource {
        fn new(cached: bool, fetch_ok: bool) -> Self {
            Self {
                metadata: SourceMetadata {
                    id: "fake".to_string(),
                    name: "Fake".to_string(),
                    description: "in-memory".to_string(),
                },
                cached: AtomicBool::new(cached),
                fetch_ok,
                fetches: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl DataSource for FakeSource {
        fn metadata(&self) -> &SourceMetadata {
            &self.metadata
        }

        async fn load_cached(&self) -> Result<QuotePool, SourceError> {
            if self.cached.load(Ordering::SeqCst) {
                Ok(QuotePool::new(
                    vec![QuoteRecord::new("cached", "")],
                    Local::now(),
                ))
            } else {
                Err(SourceError::Io {
                    path: PathBuf::from("missing.json"),
                    source: std::io::Error::from(std::io::ErrorKind::NotFound),
                })
            }
        }

        async fn fetch_remote(&self) -> Result<(), SourceError> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            if self.fetch_ok {
                self.cached.store(true, Ordering::SeqCst);
                Ok(())
            } else {
                Err(SourceError::NoEndpoint)
            }
        }
    }

    #[tokio::test]
    async fn test_load_or_fetch_prefers_cache() {
        let source = FakeSource::new(true, true);
        let pool = source.load_or_fetch().await.unwrap();
        assert_eq!(pool.quotes[0].text, "cached");
        assert_eq!(source.fetches.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_load_or_fetch_fetches_when_cache_missing() {
        let source = FakeSource::new(false, true);
        let pool = source.load_or_fetch().await.unwrap();
        assert_eq!(pool.quotes.len(), 1);
        assert_eq!(source.fetches.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_load_or_fetch_reports_fetch_failure() {
        let source = FakeSource::new(false, false);
        let err = source.load_or_fetch().await.unwrap_err();
        assert!(matches!(err, SourceError::Unavailable(_)));
        assert!(err.to_string().contains("no endpoint configured"));
    }
}
