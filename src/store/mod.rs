//! Durable storage of enriched daily summaries, keyed by (latitude, longitude, date).

pub mod error;
pub mod file_store;
pub mod memory_store;

use crate::store::error::StoreError;
use crate::types::daily_summary::DailySummary;
use chrono::NaiveDate;
use ordered_float::OrderedFloat;
use std::future::Future;

/// Persistence boundary of [`crate::WeatherService`].
///
/// Implementations hold at most one row per (latitude, longitude, date). Inserting a
/// row whose key is already stored leaves the stored row untouched. Failures are
/// returned as-is and never retried here.
pub trait SummaryStore: Send + Sync {
    /// Stored rows for exactly this location with `start <= date <= end`, in any order.
    fn find_by_location_and_date_range(
        &self,
        latitude: f64,
        longitude: f64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> impl Future<Output = Result<Vec<DailySummary>, StoreError>> + Send;

    /// Persists the whole batch or nothing and returns the rows as stored.
    fn bulk_insert(
        &self,
        rows: Vec<DailySummary>,
    ) -> impl Future<Output = Result<Vec<DailySummary>, StoreError>> + Send;
}

/// Exact-match identity of a stored row.
pub(crate) type SummaryKey = (OrderedFloat<f64>, OrderedFloat<f64>, NaiveDate);

pub(crate) fn location_key(latitude: f64, longitude: f64) -> (OrderedFloat<f64>, OrderedFloat<f64>) {
    (OrderedFloat(latitude), OrderedFloat(longitude))
}

pub(crate) fn summary_key(row: &DailySummary) -> SummaryKey {
    (OrderedFloat(row.latitude), OrderedFloat(row.longitude), row.date)
}
