//! Fixtures shared by the unit tests of several modules.

use crate::enrichment::engine::enrich_day;
use crate::settings::Settings;
use crate::types::daily_summary::DailySummary;
use crate::types::raw_day::RawDayRecord;
use chrono::NaiveDate;
use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const DAY_PATH: &str = "/data/3.0/onecall/day_summary";
pub const GEO_PATH: &str = "/geo/1.0/direct";

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Upstream day summary body for a mild day.
pub fn day_payload(lat: f64, lon: f64, date: NaiveDate) -> Value {
    json!({
        "lat": lat,
        "lon": lon,
        "tz": "+00:00",
        "date": date.format("%Y-%m-%d").to_string(),
        "units": "standard",
        "cloud_cover": {"afternoon": 40},
        "humidity": {"afternoon": 55},
        "precipitation": {"total": 2.5},
        "temperature": {
            "min": 285.15, "max": 296.15, "afternoon": 294.15,
            "night": 287.15, "evening": 291.15, "morning": 286.15
        },
        "pressure": {"afternoon": 1015},
        "wind": {"max": {"speed": 6.2, "direction": 210}}
    })
}

pub fn settings_for(server: &MockServer) -> Settings {
    Settings::builder()
        .api_key("test-key")
        .day_summary_url(format!("{}{}", server.uri(), DAY_PATH))
        .geocoding_url(format!("{}{}", server.uri(), GEO_PATH))
        .max_calls_per_minute(1000)
        .request_timeout_secs(5)
        .build()
}

/// Serves a successful day summary for `date`, expecting exactly `times` calls.
pub async fn mount_day(server: &MockServer, lat: f64, lon: f64, date: NaiveDate, times: u64) {
    Mock::given(method("GET"))
        .and(path(DAY_PATH))
        .and(query_param("date", date.format("%Y-%m-%d").to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(day_payload(lat, lon, date)))
        .expect(times)
        .mount(server)
        .await;
}

pub async fn mount_day_status(server: &MockServer, date: NaiveDate, status: u16, body: Value) {
    Mock::given(method("GET"))
        .and(path(DAY_PATH))
        .and(query_param("date", date.format("%Y-%m-%d").to_string()))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .expect(1)
        .mount(server)
        .await;
}

pub async fn mount_geocoding(server: &MockServer, name: &str, candidates: Value) {
    Mock::given(method("GET"))
        .and(path(GEO_PATH))
        .and(query_param("q", name))
        .respond_with(ResponseTemplate::new(200).set_body_json(candidates))
        .expect(1)
        .mount(server)
        .await;
}

/// An enriched, not yet persisted summary for the mild fixture day.
pub fn summary(lat: f64, lon: f64, date: NaiveDate) -> DailySummary {
    let raw: RawDayRecord = serde_json::from_value(day_payload(lat, lon, date)).unwrap();
    enrich_day(&raw)
}
