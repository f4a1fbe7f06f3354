use crate::store::error::StoreError;
use crate::store::{location_key, summary_key, SummaryKey, SummaryStore};
use crate::types::daily_summary::DailySummary;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use tokio::sync::Mutex;

/// Rows ordered by (latitude, longitude, date) plus the last assigned id.
#[derive(Debug, Clone, Default)]
pub(crate) struct SummaryTable {
    rows: BTreeMap<SummaryKey, DailySummary>,
    last_id: u64,
}

/// Flat form of a [`SummaryTable`] as written to disk.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct TableSnapshot {
    pub last_id: u64,
    pub rows: Vec<DailySummary>,
}

impl SummaryTable {
    pub(crate) fn find(
        &self,
        latitude: f64,
        longitude: f64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Vec<DailySummary> {
        if start > end {
            return Vec::new();
        }
        let (lat, lon) = location_key(latitude, longitude);
        self.rows
            .range((lat, lon, start)..=(lat, lon, end))
            .map(|(_, row)| row.clone())
            .collect()
    }

    /// Inserts rows whose key is absent; an already stored row wins and is returned in
    /// place of the offered one.
    pub(crate) fn insert_all(&mut self, rows: Vec<DailySummary>) -> Vec<DailySummary> {
        let mut stored = Vec::with_capacity(rows.len());
        for mut row in rows {
            match self.rows.entry(summary_key(&row)) {
                Entry::Occupied(existing) => stored.push(existing.get().clone()),
                Entry::Vacant(slot) => {
                    self.last_id += 1;
                    row.id = Some(self.last_id);
                    stored.push(slot.insert(row).clone());
                }
            }
        }
        stored
    }

    pub(crate) fn len(&self) -> usize {
        self.rows.len()
    }

    pub(crate) fn to_snapshot(&self) -> TableSnapshot {
        TableSnapshot {
            last_id: self.last_id,
            rows: self.rows.values().cloned().collect(),
        }
    }

    pub(crate) fn from_snapshot(snapshot: TableSnapshot) -> Self {
        let last_id = snapshot
            .rows
            .iter()
            .filter_map(|row| row.id)
            .fold(snapshot.last_id, u64::max);
        let rows = snapshot
            .rows
            .into_iter()
            .map(|row| (summary_key(&row), row))
            .collect();
        Self { rows, last_id }
    }
}

/// Process-local [`SummaryStore`]. Contents are lost when it is dropped.
#[derive(Debug, Default)]
pub struct MemorySummaryStore {
    table: Mutex<SummaryTable>,
}

impl MemorySummaryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.table.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl SummaryStore for MemorySummaryStore {
    async fn find_by_location_and_date_range(
        &self,
        latitude: f64,
        longitude: f64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailySummary>, StoreError> {
        Ok(self.table.lock().await.find(latitude, longitude, start, end))
    }

    async fn bulk_insert(&self, rows: Vec<DailySummary>) -> Result<Vec<DailySummary>, StoreError> {
        Ok(self.table.lock().await.insert_all(rows))
    }
}
