use crate::enrichment::indices::{heat_index, humidex, wind_chill};
use crate::types::classification::{PrecipitationIntensity, Season};
use crate::types::daily_summary::DailySummary;
use crate::types::raw_day::RawDayRecord;

const EXTREME_HEAT: f64 = 308.15;
const EXTREME_COLD: f64 = 263.15;
const EXTREME_PRECIPITATION: f64 = 50.0;
const EXTREME_WIND: f64 = 20.0;

/// Enriches a batch of raw day records, preserving order.
///
/// Each row is derived on its own; no output depends on any other row in the batch.
/// The returned summaries are not persisted yet, so their `id` is `None`.
///
/// # Examples
///
/// ```
/// use enriched_weather::{enrich, RawDayRecord, Season};
///
/// let raw: RawDayRecord = serde_json::from_value(serde_json::json!({
///     "lat": 33, "lon": 35, "tz": "+02:00", "date": "2020-07-15", "units": "standard",
///     "cloud_cover": {"afternoon": 10}, "humidity": {"afternoon": 70},
///     "precipitation": {"total": 55},
///     "temperature": {"min": 293.15, "max": 308.15, "afternoon": 306.15,
///                     "night": 295.15, "evening": 303.15, "morning": 294.15},
///     "pressure": {"afternoon": 1010},
///     "wind": {"max": {"speed": 22, "direction": 180}}
/// })).unwrap();
///
/// let enriched = enrich(&[raw]);
/// assert_eq!(enriched[0].season, Season::Summer);
/// assert!(enriched[0].wind_chill.is_none());
/// ```
pub fn enrich(records: &[RawDayRecord]) -> Vec<DailySummary> {
    records.iter().map(enrich_day).collect()
}

/// Enriches one raw day record.
pub fn enrich_day(raw: &RawDayRecord) -> DailySummary {
    let t = &raw.temperature;
    let temp_range = t.max - t.min;
    let humidity = raw.humidity.afternoon;
    let precipitation = raw.precipitation.total;
    let wind_speed = raw.wind.max.speed;

    DailySummary {
        id: None,
        date: raw.date,
        latitude: raw.lat,
        longitude: raw.lon,
        timezone: raw.tz.clone(),
        temp_min: t.min,
        temp_max: t.max,
        temp_afternoon: t.afternoon,
        temp_night: t.night,
        temp_evening: t.evening,
        temp_morning: t.morning,
        cloud_cover_afternoon: raw.cloud_cover.afternoon,
        humidity_afternoon: humidity,
        precipitation_total: precipitation,
        pressure_afternoon: raw.pressure.afternoon,
        wind_speed_max: wind_speed,
        wind_direction_max: raw.wind.max.direction,
        temp_range,
        temp_variability_index: temp_range / t.max,
        season: Season::from_afternoon_temperature(t.afternoon),
        extreme_temperature: t.max >= EXTREME_HEAT || t.min < EXTREME_COLD,
        extreme_precipitation: precipitation > EXTREME_PRECIPITATION,
        extreme_wind: wind_speed > EXTREME_WIND,
        humidex: humidex(t.afternoon, humidity),
        precipitation_intensity: PrecipitationIntensity::from_total(precipitation),
        wind_chill: wind_chill(t.afternoon, wind_speed),
        heat_index: heat_index(t.afternoon, humidity),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::raw_day::{
        CloudCover, Humidity, Precipitation, Pressure, Temperature, Wind, WindMax,
    };
    use chrono::NaiveDate;

    fn raw_day(date: NaiveDate, afternoon: f64, wind_speed: f64) -> RawDayRecord {
        RawDayRecord {
            lat: 40.7128,
            lon: -74.006,
            tz: "+00:00".to_string(),
            date,
            units: "standard".to_string(),
            cloud_cover: CloudCover { afternoon: 50.0 },
            humidity: Humidity { afternoon: 60.0 },
            precipitation: Precipitation { total: 5.0 },
            temperature: Temperature {
                min: 288.15,
                max: 298.15,
                afternoon,
                night: 290.15,
                evening: 293.15,
                morning: 289.15,
            },
            pressure: Pressure { afternoon: 1013.0 },
            wind: Wind {
                max: WindMax {
                    speed: wind_speed,
                    direction: 180.0,
                },
            },
        }
    }

    fn hot_stormy_day() -> RawDayRecord {
        RawDayRecord {
            lat: 33.0,
            lon: 35.0,
            tz: "+02:00".to_string(),
            date: NaiveDate::from_ymd_opt(2020, 7, 15).unwrap(),
            units: "standard".to_string(),
            cloud_cover: CloudCover { afternoon: 10.0 },
            humidity: Humidity { afternoon: 70.0 },
            precipitation: Precipitation { total: 55.0 },
            temperature: Temperature {
                min: 293.15,
                max: 308.15,
                afternoon: 306.15,
                night: 295.15,
                evening: 303.15,
                morning: 294.15,
            },
            pressure: Pressure { afternoon: 1010.0 },
            wind: Wind {
                max: WindMax {
                    speed: 22.0,
                    direction: 180.0,
                },
            },
        }
    }

    #[test]
    fn test_enrich_hot_stormy_day() {
        let rows = enrich(&[hot_stormy_day()]);
        assert_eq!(rows.len(), 1);
        let row = &rows[0];

        // Raw fields are carried over unchanged.
        assert_eq!(row.latitude, 33.0);
        assert_eq!(row.longitude, 35.0);
        assert_eq!(row.timezone, "+02:00");
        assert_eq!(row.date, NaiveDate::from_ymd_opt(2020, 7, 15).unwrap());
        assert_eq!(row.cloud_cover_afternoon, 10.0);
        assert_eq!(row.pressure_afternoon, 1010.0);
        assert_eq!(row.wind_direction_max, 180.0);
        assert_eq!(row.id, None);

        assert!((row.temp_range - 15.0).abs() < 1e-9);
        assert!((row.temp_variability_index - 0.0487).abs() < 1e-3);
        assert_eq!(row.season, Season::Summer);
        assert!(row.extreme_temperature);
        assert!(row.extreme_precipitation);
        assert!(row.extreme_wind);
        assert_eq!(row.precipitation_intensity, PrecipitationIntensity::Heavy);
        assert_eq!(row.wind_chill, None);
        assert!((row.humidex - 320.15).abs() < 0.5);
        assert!((row.heat_index - 316.65).abs() < 0.5);
    }

    #[test]
    fn test_enrich_is_deterministic() {
        let raw = hot_stormy_day();
        let first = enrich_day(&raw);
        for _ in 0..10 {
            let again = enrich_day(&raw);
            assert_eq!(again.humidex.to_bits(), first.humidex.to_bits());
            assert_eq!(again.heat_index.to_bits(), first.heat_index.to_bits());
            assert_eq!(
                again.temp_variability_index.to_bits(),
                first.temp_variability_index.to_bits()
            );
            assert_eq!(again, first);
        }
    }

    #[test]
    fn test_enrich_preserves_order_and_rows_are_independent() {
        let d1 = NaiveDate::from_ymd_opt(2024, 1, 3).unwrap();
        let d2 = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let cold = raw_day(d1, 270.0, 8.0);
        let mild = raw_day(d2, 295.15, 5.0);

        let batch = enrich(&[cold.clone(), mild.clone()]);
        assert_eq!(batch[0].date, d1);
        assert_eq!(batch[1].date, d2);
        assert_eq!(batch[0], enrich_day(&cold));
        assert_eq!(batch[1], enrich_day(&mild));
    }

    #[test]
    fn test_wind_chill_only_on_cold_windy_days() {
        let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert!(enrich_day(&raw_day(day, 270.0, 8.0)).wind_chill.is_some());
        assert!(enrich_day(&raw_day(day, 283.15, 1.34)).wind_chill.is_some());
        assert!(enrich_day(&raw_day(day, 283.16, 30.0)).wind_chill.is_none());
        assert!(enrich_day(&raw_day(day, 250.0, 1.33)).wind_chill.is_none());
    }

    #[test]
    fn test_extreme_cold_and_mild_defaults() {
        let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let mut raw = raw_day(day, 295.15, 5.0);
        let mild = enrich_day(&raw);
        assert!(!mild.is_extreme());
        assert_eq!(mild.season, Season::LateSpringEarlyFall);
        assert_eq!(mild.precipitation_intensity, PrecipitationIntensity::Light);

        raw.temperature.min = 263.14;
        assert!(enrich_day(&raw).extreme_temperature);
        raw.temperature.min = 263.15;
        assert!(!enrich_day(&raw).extreme_temperature);
    }

    #[test]
    fn test_empty_batch() {
        assert!(enrich(&[]).is_empty());
    }
}
