use bon::Builder;
use serde::{Deserialize, Serialize};
use std::num::ParseIntError;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_DAY_SUMMARY_URL: &str =
    "https://api.openweathermap.org/data/3.0/onecall/day_summary";
pub const DEFAULT_GEOCODING_URL: &str = "https://api.openweathermap.org/geo/1.0/direct";

const API_KEY_VAR: &str = "OPENWEATHERMAP_API_KEY";
const DAY_SUMMARY_URL_VAR: &str = "OPENWEATHERMAP_DAY_SUMMARY_URL";
const GEOCODING_URL_VAR: &str = "OPENWEATHERMAP_GEOCODING_URL";
const MAX_CALLS_VAR: &str = "OPENWEATHERMAP_MAX_CALLS_PER_MINUTE";
const GEOCODING_LIMIT_VAR: &str = "GEOCODING_RESULTS_LIMIT";
const MAX_DATE_RANGE_VAR: &str = "WEATHER_SERVICE_MAX_DATE_RANGE";
const REQUEST_TIMEOUT_VAR: &str = "WEATHER_SERVICE_REQUEST_TIMEOUT_SECS";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Required environment variable '{0}' is not set")]
    MissingVar(&'static str),

    #[error("Environment variable '{var}' has invalid value '{value}'")]
    InvalidNumber {
        var: &'static str,
        value: String,
        #[source]
        source: ParseIntError,
    },
}

/// Upstream endpoints, credentials and limits of a [`crate::WeatherService`].
///
/// ```
/// use enriched_weather::Settings;
///
/// let settings = Settings::builder().api_key("secret").max_calls_per_minute(30).build();
/// assert_eq!(settings.max_date_range_days, 31);
/// assert_eq!(settings.max_calls_per_minute, 30);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Builder)]
pub struct Settings {
    #[builder(into)]
    pub api_key: String,

    #[builder(into, default = DEFAULT_DAY_SUMMARY_URL.to_string())]
    #[serde(default = "default_day_summary_url")]
    pub day_summary_url: String,

    #[builder(into, default = DEFAULT_GEOCODING_URL.to_string())]
    #[serde(default = "default_geocoding_url")]
    pub geocoding_url: String,

    /// Shared budget for day and geocoding calls within any rolling minute.
    #[builder(default = 60)]
    #[serde(default = "default_max_calls_per_minute")]
    pub max_calls_per_minute: usize,

    #[builder(default = 5)]
    #[serde(default = "default_geocoding_results_limit")]
    pub geocoding_results_limit: u32,

    /// Largest accepted inclusive day count of a single lookup.
    #[builder(default = 31)]
    #[serde(default = "default_max_date_range_days")]
    pub max_date_range_days: u32,

    #[builder(default = 30)]
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_day_summary_url() -> String {
    DEFAULT_DAY_SUMMARY_URL.to_string()
}

fn default_geocoding_url() -> String {
    DEFAULT_GEOCODING_URL.to_string()
}

fn default_max_calls_per_minute() -> usize {
    60
}

fn default_geocoding_results_limit() -> u32 {
    5
}

fn default_max_date_range_days() -> u32 {
    31
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl Settings {
    /// Reads settings from the process environment.
    ///
    /// Only `OPENWEATHERMAP_API_KEY` is required; everything else falls back to its default.
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self, SettingsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_VAR)
            .filter(|key| !key.is_empty())
            .ok_or(SettingsError::MissingVar(API_KEY_VAR))?;

        Ok(Settings {
            api_key,
            day_summary_url: lookup(DAY_SUMMARY_URL_VAR).unwrap_or_else(default_day_summary_url),
            geocoding_url: lookup(GEOCODING_URL_VAR).unwrap_or_else(default_geocoding_url),
            max_calls_per_minute: parse_or(&lookup, MAX_CALLS_VAR, default_max_calls_per_minute())?,
            geocoding_results_limit: parse_or(
                &lookup,
                GEOCODING_LIMIT_VAR,
                default_geocoding_results_limit(),
            )?,
            max_date_range_days: parse_or(
                &lookup,
                MAX_DATE_RANGE_VAR,
                default_max_date_range_days(),
            )?,
            request_timeout_secs: parse_or(
                &lookup,
                REQUEST_TIMEOUT_VAR,
                default_request_timeout_secs(),
            )?,
        })
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn parse_or<F, T>(lookup: &F, var: &'static str, default: T) -> Result<T, SettingsError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr<Err = ParseIntError>,
{
    match lookup(var) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|source| SettingsError::InvalidNumber { var, value, source }),
    }
}
