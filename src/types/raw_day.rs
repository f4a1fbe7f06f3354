//! Wire shape of one location-day as returned by the OpenWeatherMap "day summary" endpoint.
//!
//! These records are transient: they live between the fetch and the enrichment step
//! and are discarded once the derived [`crate::DailySummary`] rows are persisted.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Raw per-day weather payload for one location.
///
/// All temperatures are in Kelvin (`units=standard`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawDayRecord {
    pub lat: f64,
    pub lon: f64,
    /// Timezone offset of the location, e.g. `"+02:00"`.
    pub tz: String,
    pub date: NaiveDate,
    pub units: String,
    pub cloud_cover: CloudCover,
    pub humidity: Humidity,
    pub precipitation: Precipitation,
    pub temperature: Temperature,
    pub pressure: Pressure,
    pub wind: Wind,
}

/// Cloud cover in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CloudCover {
    pub afternoon: f64,
}

/// Relative humidity in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Humidity {
    pub afternoon: f64,
}

/// Precipitation in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Precipitation {
    pub total: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Temperature {
    pub min: f64,
    pub max: f64,
    pub afternoon: f64,
    pub night: f64,
    pub evening: f64,
    pub morning: f64,
}

/// Atmospheric pressure in hPa.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pressure {
    pub afternoon: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wind {
    pub max: WindMax,
}

/// Maximum wind of the day: speed in m/s, direction in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindMax {
    pub speed: f64,
    pub direction: f64,
}
