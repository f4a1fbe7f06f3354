use crate::store::error::StoreError;
use crate::store::memory_store::{SummaryTable, TableSnapshot};
use crate::store::SummaryStore;
use crate::types::daily_summary::DailySummary;
use crate::utils::{ensure_cache_dir_exists, get_cache_dir};
use bincode::config::{Configuration, Fixint, LittleEndian};
use chrono::NaiveDate;
use log::{debug, info};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tokio::sync::RwLock;

const STORE_FILE_NAME: &str = "daily_summaries.bin";
const BINCODE_CONFIG: Configuration<LittleEndian, Fixint> =
    bincode::config::standard().with_fixed_int_encoding();

/// [`SummaryStore`] persisted as one bincode file inside a directory.
///
/// The file is loaded once on open and served from memory. Every `bulk_insert` writes
/// the complete table to a temporary file in the same directory and renames it over the
/// old one, so a batch is either durable as a whole or not at all; on failure the
/// in-memory table is left as it was.
#[derive(Debug)]
pub struct FileSummaryStore {
    path: PathBuf,
    table: RwLock<SummaryTable>,
}

impl FileSummaryStore {
    /// Opens the store in the platform cache directory.
    pub async fn open_default() -> Result<Self, StoreError> {
        let dir = get_cache_dir()?;
        Self::open(&dir).await
    }

    pub async fn open(dir: &Path) -> Result<Self, StoreError> {
        ensure_cache_dir_exists(dir).await?;
        let path = dir.join(STORE_FILE_NAME);

        let table = if tokio::fs::try_exists(&path)
            .await
            .map_err(|e| StoreError::Read(path.clone(), e))?
        {
            let read_path = path.clone();
            tokio::task::spawn_blocking(move || Self::read_table(&read_path)).await??
        } else {
            SummaryTable::default()
        };
        info!(
            "Opened summary store {} with {} row(s)",
            path.display(),
            table.len()
        );

        Ok(Self {
            path,
            table: RwLock::new(table),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_table(path: &Path) -> Result<SummaryTable, StoreError> {
        let bytes = std::fs::read(path).map_err(|e| StoreError::Read(path.to_path_buf(), e))?;
        let (snapshot, _) =
            bincode::serde::decode_from_slice::<TableSnapshot, _>(&bytes, BINCODE_CONFIG)
                .map_err(|e| StoreError::Decode(path.to_path_buf(), Box::new(e)))?;
        Ok(SummaryTable::from_snapshot(snapshot))
    }

    fn write_table(path: &Path, snapshot: TableSnapshot) -> Result<(), StoreError> {
        let bytes = bincode::serde::encode_to_vec(&snapshot, BINCODE_CONFIG)
            .map_err(|e| StoreError::Encode(Box::new(e)))?;
        let dir = path.parent().unwrap_or_else(|| Path::new("."));

        let mut tmp =
            NamedTempFile::new_in(dir).map_err(|e| StoreError::Write(path.to_path_buf(), e))?;
        tmp.write_all(&bytes)
            .and_then(|_| tmp.as_file().sync_all())
            .map_err(|e| StoreError::Write(path.to_path_buf(), e))?;
        tmp.persist(path)
            .map_err(|e| StoreError::Write(path.to_path_buf(), e.error))?;
        debug!("Wrote {} bytes to {}", bytes.len(), path.display());
        Ok(())
    }
}

impl SummaryStore for FileSummaryStore {
    async fn find_by_location_and_date_range(
        &self,
        latitude: f64,
        longitude: f64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailySummary>, StoreError> {
        Ok(self.table.read().await.find(latitude, longitude, start, end))
    }

    async fn bulk_insert(&self, rows: Vec<DailySummary>) -> Result<Vec<DailySummary>, StoreError> {
        // Held across the write so concurrent batches are applied one at a time.
        let mut table = self.table.write().await;

        let mut updated = table.clone();
        let stored = updated.insert_all(rows);
        if updated.len() == table.len() {
            return Ok(stored);
        }

        let path = self.path.clone();
        let snapshot = updated.to_snapshot();
        tokio::task::spawn_blocking(move || Self::write_table(&path, snapshot)).await??;

        *table = updated;
        Ok(stored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{date, summary};
    use std::error::Error;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_rows_survive_reopen() -> Result<(), Box<dyn Error>> {
        let dir = tempdir()?;
        let days = [date(2024, 9, 1), date(2024, 9, 2)];
        {
            let store = FileSummaryStore::open(dir.path()).await?;
            let inserted = store
                .bulk_insert(days.iter().map(|d| summary(40.0, -3.5, *d)).collect())
                .await?;
            assert_eq!(inserted[1].id, Some(2));
        }

        let reopened = FileSummaryStore::open(dir.path()).await?;
        let found = reopened
            .find_by_location_and_date_range(40.0, -3.5, days[0], days[1])
            .await?;
        assert_eq!(found.len(), 2);
        assert_eq!(found[0], summary_with_id(40.0, -3.5, days[0], 1));

        let next = reopened
            .bulk_insert(vec![summary(40.0, -3.5, date(2024, 9, 3))])
            .await?;
        assert_eq!(next[0].id, Some(3));
        Ok(())
    }

    #[tokio::test]
    async fn test_duplicate_insert_keeps_stored_row() -> Result<(), Box<dyn Error>> {
        let dir = tempdir()?;
        let store = FileSummaryStore::open(dir.path()).await?;
        let day = date(2024, 9, 1);
        let first = store.bulk_insert(vec![summary(1.0, 1.0, day)]).await?;
        let again = store.bulk_insert(vec![summary(1.0, 1.0, day)]).await?;
        assert_eq!(first, again);
        Ok(())
    }

    #[tokio::test]
    async fn test_corrupt_file_is_decode_error() -> Result<(), Box<dyn Error>> {
        let dir = tempdir()?;
        std::fs::write(dir.path().join(STORE_FILE_NAME), b"\x01\x02")?;
        let result = FileSummaryStore::open(dir.path()).await;
        assert!(matches!(result, Err(StoreError::Decode(..))));
        Ok(())
    }

    #[tokio::test]
    async fn test_failed_write_leaves_table_unchanged() -> Result<(), Box<dyn Error>> {
        let dir = tempdir()?;
        let store_dir = dir.path().join("store");
        let store = FileSummaryStore::open(&store_dir).await?;
        std::fs::remove_dir_all(&store_dir)?;

        let result = store.bulk_insert(vec![summary(1.0, 1.0, date(2024, 9, 1))]).await;
        assert!(matches!(result, Err(StoreError::Write(..))));

        let found = store
            .find_by_location_and_date_range(1.0, 1.0, date(2024, 9, 1), date(2024, 9, 1))
            .await?;
        assert!(found.is_empty());
        Ok(())
    }

    fn summary_with_id(lat: f64, lon: f64, day: NaiveDate, id: u64) -> DailySummary {
        DailySummary {
            id: Some(id),
            ..summary(lat, lon, day)
        }
    }
}
