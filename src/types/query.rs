//! Loosely specified lookup request, as a front-facing layer would parse it.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A lookup by either coordinates or location name.
///
/// Exactly one way of naming the location must be used: both `latitude` and
/// `longitude`, or `location`. See [`crate::WeatherService::resolve_query`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherQuery {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub location: Option<String>,
}

/// How a [`WeatherQuery`] names its location, once validated.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum QueryTarget {
    Coordinates { latitude: f64, longitude: f64 },
    Name(String),
}

pub(crate) const BOTH_LOCATION_FORMS: &str =
    "Provide either latitude and longitude OR location, not both";
pub(crate) const NO_LOCATION_FORM: &str = "Provide either latitude and longitude OR location";

impl WeatherQuery {
    pub(crate) fn target(&self) -> Result<QueryTarget, &'static str> {
        match (self.latitude, self.longitude, &self.location) {
            (Some(_), Some(_), Some(_)) => Err(BOTH_LOCATION_FORMS),
            (Some(latitude), Some(longitude), None) => Ok(QueryTarget::Coordinates {
                latitude,
                longitude,
            }),
            (_, _, Some(name)) => Ok(QueryTarget::Name(name.clone())),
            _ => Err(NO_LOCATION_FORM),
        }
    }
}
