//! Read-through lookup of enriched daily weather.
//!
//! A lookup reads what the store already knows for the location, fetches only the
//! missing days upstream, enriches and persists those, and returns the merged rows
//! sorted by date together with every non-fatal problem met on the way.

use crate::enrichment::engine::enrich;
use crate::error::WeatherServiceError;
use crate::fetcher::day_fetcher::{RateLimitedFetcher, WeatherSource, GENERIC_FETCH_ERROR};
use crate::settings::Settings;
use crate::store::SummaryStore;
use crate::types::geocoding::GeocodeOutcome;
use crate::types::query::{QueryTarget, WeatherQuery};
use crate::types::response::{FetchError, ResponseError, WeatherServiceResponse};
use crate::utils::{days_inclusive, inclusive_day_count};
use bon::bon;
use chrono::NaiveDate;
use log::{debug, info, warn};
use std::collections::HashSet;

const AMBIGUOUS_LOCATION: &str = "Multiple locations found. Please specify coordinates manually.";
const INVERTED_RANGE: &str = "Start date must not be after end date";

/// A geographical coordinate, latitude first.
///
/// ```
/// use enriched_weather::LatLon;
///
/// let alcoy = LatLon(38.6985, -0.4738);
/// assert_eq!(alcoy.0, 38.6985);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLon(pub f64, pub f64);

/// Orchestrates store reads, upstream fetches, enrichment and persistence.
///
/// Rows are keyed by the coordinates exactly as requested: they are stored with the
/// requested latitude and longitude, not the upstream's echo, so a repeated lookup for
/// the same coordinates finds them again.
///
/// # Examples
///
/// ```no_run
/// use chrono::NaiveDate;
/// use enriched_weather::{LatLon, MemorySummaryStore, Settings, WeatherService};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let settings = Settings::from_env()?;
/// let service = WeatherService::new(&settings, MemorySummaryStore::new())?;
///
/// let response = service
///     .resolve()
///     .location(LatLon(40.7128, -74.006))
///     .start(NaiveDate::from_ymd_opt(2024, 9, 1).unwrap())
///     .end(NaiveDate::from_ymd_opt(2024, 9, 7).unwrap())
///     .call()
///     .await?;
///
/// for day in &response.weather_data {
///     println!("{} {} humidex={:.1}K", day.date, day.season, day.humidex);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct WeatherService<S, F = RateLimitedFetcher> {
    store: S,
    source: F,
    max_date_range_days: u32,
}

impl<S: SummaryStore> WeatherService<S, RateLimitedFetcher> {
    /// A service backed by the HTTP fetcher configured from `settings`.
    pub fn new(settings: &Settings, store: S) -> Result<Self, WeatherServiceError> {
        let source = RateLimitedFetcher::new(settings)?;
        Ok(Self::with_source(store, source, settings.max_date_range_days))
    }
}

#[bon]
impl<S: SummaryStore, F: WeatherSource> WeatherService<S, F> {
    /// A service over any [`WeatherSource`], for tests or alternative upstreams.
    /// Ranges longer than `max_date_range_days` are rejected.
    pub fn with_source(store: S, source: F, max_date_range_days: u32) -> Self {
        Self {
            store,
            source,
            max_date_range_days,
        }
    }

    /// The store lookups read from and persist into.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The upstream missing days are fetched from.
    pub fn source(&self) -> &F {
        &self.source
    }

    /// Enriched weather for every day in `[start, end]` at `location`.
    ///
    /// Days that could not be fetched appear as entries in `errors`; the other days are
    /// still returned. An inverted or too wide range yields a single error and no data.
    ///
    /// # Errors
    ///
    /// Returns [`WeatherServiceError::Store`] if reading or writing the store fails.
    #[builder]
    pub async fn resolve(
        &self,
        location: LatLon,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<WeatherServiceResponse, WeatherServiceError> {
        self.resolve_range(location, start, end).await
    }

    /// Like [`WeatherService::resolve`], starting from a free-text location name.
    ///
    /// The name is geocoded first. No match, or a failing geocoding call, yields a
    /// "not found" error. Several matches yield an error plus all candidates in
    /// `geocoding_results` and no weather lookup. A single match is resolved and
    /// attached to the response.
    ///
    /// # Errors
    ///
    /// Returns [`WeatherServiceError::Store`] if reading or writing the store fails.
    #[builder]
    pub async fn resolve_by_name(
        &self,
        #[builder(into)] location: String,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<WeatherServiceResponse, WeatherServiceError> {
        self.resolve_name(&location, start, end).await
    }

    /// Resolves a query that names its location either by coordinates or by name,
    /// never both.
    pub async fn resolve_query(
        &self,
        query: &WeatherQuery,
    ) -> Result<WeatherServiceResponse, WeatherServiceError> {
        match query.target() {
            Err(message) => Ok(WeatherServiceResponse::from_error(message)),
            Ok(QueryTarget::Coordinates {
                latitude,
                longitude,
            }) => {
                self.resolve_range(LatLon(latitude, longitude), query.start_date, query.end_date)
                    .await
            }
            Ok(QueryTarget::Name(name)) => {
                self.resolve_name(&name, query.start_date, query.end_date)
                    .await
            }
        }
    }

    fn validate_range(&self, start: NaiveDate, end: NaiveDate) -> Result<(), String> {
        if start > end {
            return Err(INVERTED_RANGE.to_string());
        }
        if inclusive_day_count(start, end) > i64::from(self.max_date_range_days) {
            return Err(format!(
                "Date range exceeds maximum allowed ({} days)",
                self.max_date_range_days
            ));
        }
        Ok(())
    }

    async fn resolve_name(
        &self,
        location: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<WeatherServiceResponse, WeatherServiceError> {
        if let Err(message) = self.validate_range(start, end) {
            return Ok(WeatherServiceResponse::from_error(message));
        }

        let candidates = match self.source.fetch_coordinates(location).await {
            Ok(candidates) => candidates,
            Err(e) => {
                warn!("Geocoding '{location}' failed, treating as no match: {e}");
                Vec::new()
            }
        };

        match GeocodeOutcome::from_candidates(candidates) {
            GeocodeOutcome::NotFound => Ok(WeatherServiceResponse::from_error(format!(
                "Could not find coordinates for location: {location}"
            ))),
            GeocodeOutcome::Ambiguous(candidates) => {
                info!(
                    "'{location}' matched {} locations, not resolving",
                    candidates.len()
                );
                Ok(WeatherServiceResponse {
                    weather_data: Vec::new(),
                    errors: vec![ResponseError::message(AMBIGUOUS_LOCATION)],
                    geocoding_results: candidates,
                })
            }
            GeocodeOutcome::Found(candidate) => {
                let location = LatLon(candidate.lat, candidate.lon);
                let mut response = self.resolve_range(location, start, end).await?;
                response.geocoding_results = vec![candidate];
                Ok(response)
            }
        }
    }

    async fn resolve_range(
        &self,
        location: LatLon,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<WeatherServiceResponse, WeatherServiceError> {
        if let Err(message) = self.validate_range(start, end) {
            return Ok(WeatherServiceResponse::from_error(message));
        }
        let LatLon(latitude, longitude) = location;

        let mut rows = self
            .store
            .find_by_location_and_date_range(latitude, longitude, start, end)
            .await?;
        let stored: HashSet<NaiveDate> = rows.iter().map(|row| row.date).collect();
        let missing: Vec<NaiveDate> = days_inclusive(start, end)
            .filter(|day| !stored.contains(day))
            .collect();
        debug!(
            "({latitude}, {longitude}) {start}..={end}: {} stored, {} missing",
            stored.len(),
            missing.len()
        );

        let mut errors = Vec::new();
        if !missing.is_empty() {
            let (raw, mut fetch_errors) = self
                .source
                .fetch_days(latitude, longitude, &missing)
                .await;

            let (raw, unexpected): (Vec<_>, Vec<_>) = raw
                .into_iter()
                .partition(|record| missing.binary_search(&record.date).is_ok());
            if !unexpected.is_empty() {
                warn!(
                    "Discarding {} upstream record(s) for dates that were not requested",
                    unexpected.len()
                );
            }

            // Every missing day ends up either fetched or reported.
            let accounted: HashSet<NaiveDate> = raw
                .iter()
                .map(|record| record.date)
                .chain(fetch_errors.iter().map(|e| e.date))
                .collect();
            for &day in missing.iter().filter(|day| !accounted.contains(day)) {
                warn!("Upstream returned nothing for {day}");
                fetch_errors.push(FetchError::new(day, GENERIC_FETCH_ERROR));
            }
            fetch_errors.sort_by_key(|e| e.date);
            errors.extend(fetch_errors.into_iter().map(ResponseError::from));

            if !raw.is_empty() {
                let fresh = enrich(&raw)
                    .into_iter()
                    .map(|mut row| {
                        row.latitude = latitude;
                        row.longitude = longitude;
                        row
                    })
                    .collect();
                let persisted = self.store.bulk_insert(fresh).await?;
                info!(
                    "Stored {} new daily summaries for ({latitude}, {longitude})",
                    persisted.len()
                );
                rows.extend(persisted);
            }
        }

        rows.sort_by_key(|row| row.date);
        rows.dedup_by_key(|row| row.date);

        Ok(WeatherServiceResponse {
            weather_data: rows,
            errors,
            geocoding_results: Vec::new(),
        })
    }
}
