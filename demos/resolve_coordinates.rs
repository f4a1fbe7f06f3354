use chrono::NaiveDate;
use enriched_weather::{FileSummaryStore, LatLon, Settings, WeatherService};
use polars::prelude::{col, lit};
use std::env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    configure_polars_display();
    let settings = Settings::from_env()?;
    let store = FileSummaryStore::open_default().await?;
    let service = WeatherService::new(&settings, store)?;

    let response = service
        .resolve()
        .location(LatLon(40.7128, -74.006))
        .start(NaiveDate::from_ymd_opt(2024, 9, 1).unwrap())
        .end(NaiveDate::from_ymd_opt(2024, 9, 14).unwrap())
        .call()
        .await?;

    println!("Status: {:?}", response.status());
    for error in &response.errors {
        println!("Error: {error}");
    }

    let frame = response.to_frame()?;
    println!("{}", frame.collect()?);

    let warm = frame
        .filter(col("season").eq(lit("Summer")))
        .collect()?;
    println!("Summer days:\n{warm}");

    Ok(())
}

fn configure_polars_display() {
    env::set_var("POLARS_FMT_MAX_COLS", "-1");
    env::set_var("POLARS_FMT_MAX_ROWS", "20");
}
