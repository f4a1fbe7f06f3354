//! The enriched, persisted record for one location-date.

use crate::types::classification::{PrecipitationIntensity, Season};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Enriched weather for one `(latitude, longitude, date)` triple.
///
/// The raw measurements are copied from the upstream [`crate::RawDayRecord`]; every
/// field below the raw block is derived by [`crate::enrich`] and is a pure function
/// of the raw fields. A summary is created once, on the first successful fetch for
/// its key, and never updated afterwards.
///
/// Temperatures are in Kelvin, precipitation in mm, wind speed in m/s, pressure in hPa.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySummary {
    /// Identifier assigned by the [`crate::SummaryStore`] on insert; `None` until persisted.
    #[serde(default)]
    pub id: Option<u64>,
    pub date: NaiveDate,
    pub latitude: f64,
    pub longitude: f64,
    /// Timezone offset of the location, e.g. `"+02:00"`.
    pub timezone: String,

    pub temp_min: f64,
    pub temp_max: f64,
    pub temp_afternoon: f64,
    pub temp_night: f64,
    pub temp_evening: f64,
    pub temp_morning: f64,

    pub cloud_cover_afternoon: f64,
    pub humidity_afternoon: f64,
    pub precipitation_total: f64,
    pub pressure_afternoon: f64,
    pub wind_speed_max: f64,
    pub wind_direction_max: f64,

    /// `temp_max - temp_min`.
    pub temp_range: f64,
    /// `temp_range / temp_max`.
    pub temp_variability_index: f64,
    pub season: Season,
    pub extreme_temperature: bool,
    pub extreme_precipitation: bool,
    pub extreme_wind: bool,
    /// Felt air temperature, in Kelvin.
    pub humidex: f64,
    pub precipitation_intensity: PrecipitationIntensity,
    /// Only defined on cold, windy afternoons.
    pub wind_chill: Option<f64>,
    pub heat_index: f64,
}

impl DailySummary {
    /// Whether any of the three extremity flags is raised.
    pub fn is_extreme(&self) -> bool {
        self.extreme_temperature || self.extreme_precipitation || self.extreme_wind
    }
}
