//! Meteorological indices computed from a single day's measurements.
//!
//! Every function here is pure and works in Kelvin at its boundaries; conversions to
//! Celsius or Fahrenheit happen internally where a formula is defined in those units.

const KELVIN_OFFSET: f64 = 273.15;

/// Afternoon temperatures at or below this (10 °C) are cold enough for wind chill.
pub const WIND_CHILL_MAX_TEMPERATURE: f64 = 283.15;
/// Wind speeds above this (4.8 km/h) are strong enough for wind chill.
pub const WIND_CHILL_MIN_WIND_SPEED: f64 = 1.33;

pub(crate) fn kelvin_to_celsius(kelvin: f64) -> f64 {
    kelvin - KELVIN_OFFSET
}

pub(crate) fn celsius_to_kelvin(celsius: f64) -> f64 {
    celsius + KELVIN_OFFSET
}

pub(crate) fn kelvin_to_fahrenheit(kelvin: f64) -> f64 {
    (kelvin - KELVIN_OFFSET) * 9.0 / 5.0 + 32.0
}

pub(crate) fn fahrenheit_to_kelvin(fahrenheit: f64) -> f64 {
    (fahrenheit - 32.0) * 5.0 / 9.0 + KELVIN_OFFSET
}

/// Canadian humidex for an air temperature (K) and relative humidity (%), in Kelvin.
///
/// The dew point is approximated from temperature and humidity first.
/// See <https://www.ohcow.on.ca/edit/files/general_handouts/heat-stress-calculator.html>.
pub fn humidex(temperature: f64, relative_humidity: f64) -> f64 {
    let t = kelvin_to_celsius(temperature);
    let dewpoint = (relative_humidity / 100.0).powf(1.0 / 8.0) * (112.0 + 0.9 * t) + 0.1 * t - 112.0;
    let vapour_pressure = 6.11 * 10f64.powf(7.5 * dewpoint / (237.7 + dewpoint));
    celsius_to_kelvin(t + 0.5555 * (vapour_pressure - 10.0))
}

/// Wind chill (K) for an air temperature (K) and wind speed (m/s).
///
/// `None` unless the temperature is at or below [`WIND_CHILL_MAX_TEMPERATURE`] and the
/// wind is faster than [`WIND_CHILL_MIN_WIND_SPEED`].
/// See <https://www.weather.gov/epz/wxcalc_windchill>.
pub fn wind_chill(temperature: f64, wind_speed: f64) -> Option<f64> {
    if temperature > WIND_CHILL_MAX_TEMPERATURE || wind_speed <= WIND_CHILL_MIN_WIND_SPEED {
        return None;
    }
    Some(
        306.15
            - (0.453843 * wind_speed.sqrt() + 0.464255 - 0.0453843 * wind_speed)
                * (306.15 - temperature),
    )
}

/// NWS heat index (K) for an air temperature (K) and relative humidity (%).
///
/// Uses the simple Steadman approximation below 80 °F and the Rothfusz regression with
/// its low/high humidity adjustments otherwise.
/// See <https://www.wpc.ncep.noaa.gov/html/heatindex_equation.shtml>.
pub fn heat_index(temperature: f64, relative_humidity: f64) -> f64 {
    let f = kelvin_to_fahrenheit(temperature);
    let rh = relative_humidity;

    let simple = 0.5 * (f + 61.0 + ((f - 68.0) * 1.2) + (rh * 0.094));
    if simple < 80.0 {
        return fahrenheit_to_kelvin(simple);
    }

    let rothfusz = -42.379 + 2.04901523 * f + 10.14333127 * rh
        - 0.22475541 * f * rh
        - 0.00683783 * f * f
        - 0.05481717 * rh * rh
        + 0.00122874 * f * f * rh
        + 0.00085282 * f * rh * rh
        - 0.00000199 * f * f * rh * rh;

    fahrenheit_to_kelvin(rothfusz + heat_index_adjustment(f, rh))
}

fn heat_index_adjustment(f: f64, rh: f64) -> f64 {
    if rh < 13.0 && (80.0..=112.0).contains(&f) {
        ((13.0 - rh) / 4.0) * ((17.0 - (f - 95.0).abs()) / 17.0).sqrt()
    } else if rh > 85.0 && (80.0..=87.0).contains(&f) {
        ((rh - 85.0) / 10.0) * ((87.0 - f) / 5.0)
    } else {
        0.0
    }
}
