mod enrichment;
mod error;
mod fetcher;
mod frames;
mod settings;
mod store;
mod types;
mod utils;
mod weather_service;

#[cfg(test)]
mod test_support;

pub use error::WeatherServiceError;
pub use weather_service::*;

pub use enrichment::engine::{enrich, enrich_day};
pub use enrichment::indices::{
    heat_index, humidex, wind_chill, WIND_CHILL_MAX_TEMPERATURE, WIND_CHILL_MIN_WIND_SPEED,
};

pub use fetcher::day_fetcher::{RateLimitedFetcher, WeatherSource};
pub use fetcher::error::FetcherError;
pub use fetcher::rate_limiter::{CallLimiter, SlidingWindowLimiter};

pub use store::error::StoreError;
pub use store::file_store::FileSummaryStore;
pub use store::memory_store::MemorySummaryStore;
pub use store::SummaryStore;

pub use frames::daily_summary_frame::DailySummaryFrame;
pub use frames::error::FrameError;

pub use settings::{Settings, SettingsError, DEFAULT_DAY_SUMMARY_URL, DEFAULT_GEOCODING_URL};

pub use types::classification::{PrecipitationIntensity, Season};
pub use types::daily_summary::DailySummary;
pub use types::geocoding::{GeocodeOutcome, GeocodingCandidate};
pub use types::query::WeatherQuery;
pub use types::raw_day::*;
pub use types::response::{
    FetchError, ResponseError, ResponseStatus, WeatherServiceResponse,
};
