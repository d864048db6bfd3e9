//! On-disk quote list cache

use chrono::{DateTime, Local};
use inkboard_core::{QuotePool, SourceError};
use inkboard_types::QuoteRecord;
use std::path::Path;

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> SourceError + '_ {
    move |source| SourceError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Read and parse the quote list at `path`
///
/// The file's modification time becomes the pool's fetch time; when it
/// cannot be read, the current time is used instead.
pub async fn read_quotes(path: &Path) -> Result<QuotePool, SourceError> {
    let data = tokio::fs::read(path).await.map_err(io_error(path))?;
    let quotes: Vec<QuoteRecord> = serde_json::from_slice(&data)?;

    let fetched_at = match tokio::fs::metadata(path).await.and_then(|m| m.modified()) {
        Ok(modified) => DateTime::<Local>::from(modified),
        Err(e) => {
            log::debug!("No modification time for {}: {}", path.display(), e);
            Local::now()
        }
    };

    log::debug!("Read {} quotes from {}", quotes.len(), path.display());
    Ok(QuotePool::new(quotes, fetched_at))
}

/// Replace the quote list at `path` with `data`
///
/// The bytes are written to a sibling temporary file first and renamed into
/// place, so readers never observe a half-written cache.
pub async fn write_quotes(path: &Path, data: &[u8]) -> Result<(), SourceError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(io_error(parent))?;
    }

    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp_path = Path::new(&tmp_name);

    tokio::fs::write(tmp_path, data)
        .await
        .map_err(io_error(tmp_path))?;
    tokio::fs::rename(tmp_path, path)
        .await
        .map_err(io_error(path))?;
    Ok(())
}
