use crate::store::error::StoreError;
use chrono::NaiveDate;
use log::info;
use std::io;
use std::path::{Path, PathBuf};

const CACHE_DIR_NAME: &str = "enriched_weather_cache";

/// Platform cache directory with this crate's sub-folder appended.
pub fn get_cache_dir() -> Result<PathBuf, StoreError> {
    dirs::cache_dir()
        .map(|p| p.join(CACHE_DIR_NAME))
        .ok_or_else(|| {
            StoreError::CacheDirResolution(io::Error::new(
                io::ErrorKind::NotFound,
                "Could not determine system cache directory",
            ))
        })
}

pub async fn ensure_cache_dir_exists(path: &Path) -> Result<(), StoreError> {
    match tokio::fs::metadata(path).await {
        Ok(metadata) if metadata.is_dir() => Ok(()),
        Ok(_) => Err(StoreError::CacheDirCreation(
            path.to_path_buf(),
            io::Error::new(
                io::ErrorKind::AlreadyExists,
                "Cache path exists but is not a directory",
            ),
        )),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            info!("Creating cache directory: {}", path.display());
            tokio::fs::create_dir_all(path)
                .await
                .map_err(|e| StoreError::CacheDirCreation(path.to_path_buf(), e))
        }
        Err(e) => Err(StoreError::CacheDirCreation(path.to_path_buf(), e)),
    }
}

/// Every calendar day in `[start, end]`, ascending. Empty when `start > end`.
pub(crate) fn days_inclusive(start: NaiveDate, end: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    start.iter_days().take_while(move |day| *day <= end)
}

/// Number of calendar days in `[start, end]`, or 0 when `start > end`.
pub(crate) fn inclusive_day_count(start: NaiveDate, end: NaiveDate) -> i64 {
    if start > end {
        0
    } else {
        (end - start).num_days() + 1
    }
}
