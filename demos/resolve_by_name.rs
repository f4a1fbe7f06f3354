use chrono::NaiveDate;
use enriched_weather::{MemorySummaryStore, ResponseStatus, Settings, WeatherService};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let settings = Settings::from_env()?;
    let service = WeatherService::new(&settings, MemorySummaryStore::new())?;
    let name = std::env::args().nth(1).unwrap_or_else(|| "Alcoy".to_string());

    let response = service
        .resolve_by_name()
        .location(name.as_str())
        .start(NaiveDate::from_ymd_opt(2024, 9, 1).unwrap())
        .end(NaiveDate::from_ymd_opt(2024, 9, 3).unwrap())
        .call()
        .await?;

    if response.status() == ResponseStatus::Failed {
        for error in &response.errors {
            println!("Error: {error}");
        }
        for candidate in &response.geocoding_results {
            println!(
                "Candidate: {} ({:?}) at {}, {}",
                candidate.name, candidate.country, candidate.lat, candidate.lon
            );
        }
        return Ok(());
    }

    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
