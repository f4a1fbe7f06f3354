//! The externally observable result of a weather lookup.
//!
//! Expected, partial failures (a single day that could not be fetched, an ambiguous
//! location name, a range that is too wide) are carried as entries in
//! [`WeatherServiceResponse::errors`] instead of being returned as `Err`, so a
//! 31-day request can return 30 good days together with one error.

use crate::types::daily_summary::DailySummary;
use crate::types::geocoding::GeocodingCandidate;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Failure to fetch a single day from the upstream API.
///
/// For upstream "bad request" class responses `message` holds the upstream body
/// (parsed as JSON when possible), otherwise a generic message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FetchError {
    pub date: NaiveDate,
    pub message: serde_json::Value,
}

impl FetchError {
    pub fn new(date: NaiveDate, message: impl Into<serde_json::Value>) -> Self {
        Self {
            date,
            message: message.into(),
        }
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            serde_json::Value::String(s) => write!(f, "{}: {}", self.date, s),
            other => write!(f, "{}: {}", self.date, other),
        }
    }
}

/// One entry of [`WeatherServiceResponse::errors`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResponseError {
    /// A day whose upstream fetch failed.
    Fetch(FetchError),
    /// A request-level problem: invalid input, unknown or ambiguous location.
    Message { message: String },
}

impl ResponseError {
    pub fn message(message: impl Into<String>) -> Self {
        ResponseError::Message {
            message: message.into(),
        }
    }
}

impl From<FetchError> for ResponseError {
    fn from(error: FetchError) -> Self {
        ResponseError::Fetch(error)
    }
}

impl fmt::Display for ResponseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseError::Fetch(e) => e.fmt(f),
            ResponseError::Message { message } => f.write_str(message),
        }
    }
}

/// Coarse outcome of a lookup, for layers that map it to e.g. HTTP status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResponseStatus {
    /// No errors.
    Success,
    /// Some days resolved, some errored.
    PartialSuccess,
    /// Errors and no data.
    Failed,
}

/// Merged, date-sorted result of a lookup plus everything that went wrong on the way.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeatherServiceResponse {
    pub weather_data: Vec<DailySummary>,
    #[serde(default)]
    pub errors: Vec<ResponseError>,
    /// Geocoding candidates when the lookup started from a location name.
    #[serde(default)]
    pub geocoding_results: Vec<GeocodingCandidate>,
}

impl WeatherServiceResponse {
    /// A response carrying a single request-level error and no data.
    pub fn from_error(message: impl Into<String>) -> Self {
        Self {
            weather_data: Vec::new(),
            errors: vec![ResponseError::message(message)],
            geocoding_results: Vec::new(),
        }
    }

    pub fn status(&self) -> ResponseStatus {
        match (self.errors.is_empty(), self.weather_data.is_empty()) {
            (true, _) => ResponseStatus::Success,
            (false, false) => ResponseStatus::PartialSuccess,
            (false, true) => ResponseStatus::Failed,
        }
    }

    pub fn is_partial_success(&self) -> bool {
        self.status() == ResponseStatus::PartialSuccess
    }

    /// Errors for individual days, skipping request-level ones.
    pub fn fetch_errors(&self) -> impl Iterator<Item = &FetchError> {
        self.errors.iter().filter_map(|e| match e {
            ResponseError::Fetch(fetch) => Some(fetch),
            ResponseError::Message { .. } => None,
        })
    }
}
