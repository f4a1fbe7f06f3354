use crate::fetcher::error::FetcherError;
use crate::fetcher::rate_limiter::{CallLimiter, SlidingWindowLimiter};
use crate::settings::Settings;
use crate::types::geocoding::GeocodingCandidate;
use crate::types::raw_day::RawDayRecord;
use crate::types::response::FetchError;
use chrono::NaiveDate;
use futures_util::future::join_all;
use log::{debug, warn};
use reqwest::{Client, Response};
use std::future::Future;
use std::sync::Arc;

pub(crate) const GENERIC_FETCH_ERROR: &str = "error fetching weather daily summary from API";

/// Upstream source of raw day records and geocoding candidates.
///
/// [`RateLimitedFetcher`] is the HTTP implementation; [`crate::WeatherService`] is generic
/// over this trait so it can be driven without a network.
pub trait WeatherSource: Send + Sync {
    /// Fetches every date independently. Failed days become [`FetchError`]s and never
    /// abort the others; both lists are complete once the future resolves.
    fn fetch_days(
        &self,
        latitude: f64,
        longitude: f64,
        dates: &[NaiveDate],
    ) -> impl Future<Output = (Vec<RawDayRecord>, Vec<FetchError>)> + Send;

    fn fetch_coordinates(
        &self,
        location: &str,
    ) -> impl Future<Output = Result<Vec<GeocodingCandidate>, FetcherError>> + Send;
}

/// HTTP client for the day summary and geocoding endpoints.
///
/// Every request, day or geocoding, first acquires the shared limiter.
#[derive(Debug, Clone)]
pub struct RateLimitedFetcher<L = SlidingWindowLimiter> {
    client: Client,
    limiter: Arc<L>,
    api_key: String,
    day_summary_url: String,
    geocoding_url: String,
    geocoding_results_limit: u32,
}

impl RateLimitedFetcher<SlidingWindowLimiter> {
    /// Creates a fetcher with its own per-minute limiter sized from `settings`.
    pub fn new(settings: &Settings) -> Result<Self, FetcherError> {
        let limiter = SlidingWindowLimiter::per_minute(settings.max_calls_per_minute);
        Self::with_limiter(settings, Arc::new(limiter))
    }
}

impl<L: CallLimiter> RateLimitedFetcher<L> {
    /// Creates a fetcher that draws on `limiter`, which may be shared with other
    /// fetchers so that together they stay under one call budget.
    pub fn with_limiter(settings: &Settings, limiter: Arc<L>) -> Result<Self, FetcherError> {
        let client = Client::builder()
            .timeout(settings.request_timeout())
            .build()
            .map_err(FetcherError::ClientBuild)?;
        Ok(Self {
            client,
            limiter,
            api_key: settings.api_key.clone(),
            day_summary_url: settings.day_summary_url.clone(),
            geocoding_url: settings.geocoding_url.clone(),
            geocoding_results_limit: settings.geocoding_results_limit,
        })
    }

    /// The limiter every request of this fetcher waits on.
    pub fn limiter(&self) -> &Arc<L> {
        &self.limiter
    }

    async fn fetch_day(
        &self,
        latitude: f64,
        longitude: f64,
        date: NaiveDate,
    ) -> Result<RawDayRecord, FetcherError> {
        self.limiter.acquire().await;
        let url = &self.day_summary_url;
        let response = self
            .client
            .get(url)
            .query(&[
                ("lat", latitude.to_string()),
                ("lon", longitude.to_string()),
                ("date", date.format("%Y-%m-%d").to_string()),
                ("appid", self.api_key.clone()),
                ("units", "standard".to_string()),
            ])
            .send()
            .await
            .map_err(|e| FetcherError::NetworkRequest(url.clone(), e))?;

        let body = successful_body(url, response).await?;
        let record: RawDayRecord =
            serde_json::from_str(&body).map_err(|e| FetcherError::JsonParse(url.clone(), e))?;
        if record.date != date {
            return Err(FetcherError::DateMismatch {
                url: url.clone(),
                requested: date,
                received: record.date,
            });
        }
        Ok(record)
    }
}

impl<L: CallLimiter> WeatherSource for RateLimitedFetcher<L> {
    async fn fetch_days(
        &self,
        latitude: f64,
        longitude: f64,
        dates: &[NaiveDate],
    ) -> (Vec<RawDayRecord>, Vec<FetchError>) {
        debug!(
            "Fetching {} day(s) for ({latitude}, {longitude})",
            dates.len()
        );
        let outcomes = join_all(dates.iter().map(|&date| async move {
            (date, self.fetch_day(latitude, longitude, date).await)
        }))
        .await;

        let mut records = Vec::with_capacity(outcomes.len());
        let mut errors = Vec::new();
        for (date, outcome) in outcomes {
            match outcome {
                Ok(record) => records.push(record),
                Err(e) => {
                    warn!("Failed to fetch day summary for {date}: {e}");
                    errors.push(to_fetch_error(date, e));
                }
            }
        }
        (records, errors)
    }

    async fn fetch_coordinates(
        &self,
        location: &str,
    ) -> Result<Vec<GeocodingCandidate>, FetcherError> {
        self.limiter.acquire().await;
        let url = &self.geocoding_url;
        let response = self
            .client
            .get(url)
            .query(&[
                ("q", location.to_string()),
                ("limit", self.geocoding_results_limit.to_string()),
                ("appid", self.api_key.clone()),
            ])
            .send()
            .await
            .map_err(|e| FetcherError::NetworkRequest(url.clone(), e))?;

        let body = successful_body(url, response).await?;
        serde_json::from_str(&body).map_err(|e| FetcherError::JsonParse(url.clone(), e))
    }
}

async fn successful_body(url: &str, response: Response) -> Result<String, FetcherError> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| FetcherError::NetworkRequest(url.to_string(), e))?;
    if !status.is_success() {
        return Err(FetcherError::HttpStatus {
            url: url.to_string(),
            status,
            body,
        });
    }
    Ok(body)
}

/// Client errors keep the upstream body (as JSON when it parses); anything else gets
/// the generic message.
fn to_fetch_error(date: NaiveDate, error: FetcherError) -> FetchError {
    match error {
        FetcherError::HttpStatus { status, body, .. } if status.is_client_error() => {
            let message = serde_json::from_str(&body)
                .unwrap_or(serde_json::Value::String(body));
            FetchError::new(date, message)
        }
        _ => FetchError::new(date, GENERIC_FETCH_ERROR),
    }
}
