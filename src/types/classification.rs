//! Qualitative classifications derived from raw daily measurements.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Season inferred from the afternoon temperature.
///
/// Each band is closed on its lower bound and open on its upper bound:
///
/// | Afternoon temperature (K) | Season                     |
/// |---------------------------|----------------------------|
/// | `>= 303.15`               | [`Season::Summer`]         |
/// | `[293.15, 303.15)`        | [`Season::LateSpringEarlyFall`] |
/// | `[283.15, 293.15)`        | [`Season::SpringFall`]     |
/// | below                     | [`Season::Winter`]         |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Season {
    #[serde(rename = "Summer")]
    Summer,
    #[serde(rename = "Late Spring/Early Fall")]
    LateSpringEarlyFall,
    #[serde(rename = "Spring/Fall")]
    SpringFall,
    #[serde(rename = "Winter")]
    Winter,
}

impl Season {
    /// Classifies an afternoon temperature given in Kelvin.
    ///
    /// ```
    /// use enriched_weather::Season;
    ///
    /// assert_eq!(Season::from_afternoon_temperature(303.15), Season::Summer);
    /// assert_eq!(Season::from_afternoon_temperature(293.15), Season::LateSpringEarlyFall);
    /// assert_eq!(Season::from_afternoon_temperature(270.0), Season::Winter);
    /// ```
    pub fn from_afternoon_temperature(kelvin: f64) -> Self {
        if kelvin >= 303.15 {
            Season::Summer
        } else if kelvin >= 293.15 {
            Season::LateSpringEarlyFall
        } else if kelvin >= 283.15 {
            Season::SpringFall
        } else {
            Season::Winter
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Season::Summer => "Summer",
            Season::LateSpringEarlyFall => "Late Spring/Early Fall",
            Season::SpringFall => "Spring/Fall",
            Season::Winter => "Winter",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Intensity category for the total precipitation of a day, in millimetres.
///
/// `0` is [`PrecipitationIntensity::None`], `(0, 10)` is `Light`, `[10, 50)` is
/// `Moderate` and anything from `50` upwards is `Heavy`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrecipitationIntensity {
    None,
    Light,
    Moderate,
    Heavy,
}

impl PrecipitationIntensity {
    pub fn from_total(millimetres: f64) -> Self {
        if millimetres == 0.0 {
            PrecipitationIntensity::None
        } else if millimetres < 10.0 {
            PrecipitationIntensity::Light
        } else if millimetres < 50.0 {
            PrecipitationIntensity::Moderate
        } else {
            PrecipitationIntensity::Heavy
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PrecipitationIntensity::None => "None",
            PrecipitationIntensity::Light => "Light",
            PrecipitationIntensity::Moderate => "Moderate",
            PrecipitationIntensity::Heavy => "Heavy",
        }
    }
}

impl fmt::Display for PrecipitationIntensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
