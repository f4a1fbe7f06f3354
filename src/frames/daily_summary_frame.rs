//! Columnar view over a set of [`DailySummary`] rows.

use crate::frames::error::FrameError;
use crate::types::daily_summary::DailySummary;
use crate::types::response::WeatherServiceResponse;
use chrono::NaiveDate;
use polars::df;
use polars::prelude::*;
use std::path::Path;

/// A Polars `LazyFrame` with one column per [`DailySummary`] field.
///
/// `season` and `precipitation_intensity` are stored as their display strings, `date`
/// as a Polars `Date`.
#[derive(Clone)]
pub struct DailySummaryFrame {
    pub frame: LazyFrame,
}

impl DailySummaryFrame {
    pub fn new(frame: LazyFrame) -> Self {
        Self { frame }
    }

    pub fn from_summaries(rows: &[DailySummary]) -> Result<Self, FrameError> {
        let df = df!(
            "id" => rows.iter().map(|r| r.id).collect::<Vec<_>>(),
            "date" => rows.iter().map(|r| r.date).collect::<Vec<_>>(),
            "latitude" => rows.iter().map(|r| r.latitude).collect::<Vec<_>>(),
            "longitude" => rows.iter().map(|r| r.longitude).collect::<Vec<_>>(),
            "timezone" => rows.iter().map(|r| r.timezone.as_str()).collect::<Vec<_>>(),
            "temp_min" => rows.iter().map(|r| r.temp_min).collect::<Vec<_>>(),
            "temp_max" => rows.iter().map(|r| r.temp_max).collect::<Vec<_>>(),
            "temp_afternoon" => rows.iter().map(|r| r.temp_afternoon).collect::<Vec<_>>(),
            "temp_night" => rows.iter().map(|r| r.temp_night).collect::<Vec<_>>(),
            "temp_evening" => rows.iter().map(|r| r.temp_evening).collect::<Vec<_>>(),
            "temp_morning" => rows.iter().map(|r| r.temp_morning).collect::<Vec<_>>(),
            "cloud_cover_afternoon" => rows.iter().map(|r| r.cloud_cover_afternoon).collect::<Vec<_>>(),
            "humidity_afternoon" => rows.iter().map(|r| r.humidity_afternoon).collect::<Vec<_>>(),
            "precipitation_total" => rows.iter().map(|r| r.precipitation_total).collect::<Vec<_>>(),
            "pressure_afternoon" => rows.iter().map(|r| r.pressure_afternoon).collect::<Vec<_>>(),
            "wind_speed_max" => rows.iter().map(|r| r.wind_speed_max).collect::<Vec<_>>(),
            "wind_direction_max" => rows.iter().map(|r| r.wind_direction_max).collect::<Vec<_>>(),
            "temp_range" => rows.iter().map(|r| r.temp_range).collect::<Vec<_>>(),
            "temp_variability_index" => rows.iter().map(|r| r.temp_variability_index).collect::<Vec<_>>(),
            "season" => rows.iter().map(|r| r.season.as_str()).collect::<Vec<_>>(),
            "extreme_temperature" => rows.iter().map(|r| r.extreme_temperature).collect::<Vec<_>>(),
            "extreme_precipitation" => rows.iter().map(|r| r.extreme_precipitation).collect::<Vec<_>>(),
            "extreme_wind" => rows.iter().map(|r| r.extreme_wind).collect::<Vec<_>>(),
            "humidex" => rows.iter().map(|r| r.humidex).collect::<Vec<_>>(),
            "precipitation_intensity" => rows.iter().map(|r| r.precipitation_intensity.as_str()).collect::<Vec<_>>(),
            "wind_chill" => rows.iter().map(|r| r.wind_chill).collect::<Vec<_>>(),
            "heat_index" => rows.iter().map(|r| r.heat_index).collect::<Vec<_>>(),
        )?;
        Ok(Self::new(df.lazy()))
    }

    /// Lazily applies `predicate`; the current frame is left unchanged.
    ///
    /// ```no_run
    /// # use enriched_weather::WeatherServiceResponse;
    /// use polars::prelude::{col, lit};
    ///
    /// # fn run(response: WeatherServiceResponse) -> Result<(), Box<dyn std::error::Error>> {
    /// let muggy = response
    ///     .to_frame()?
    ///     .filter(col("humidex").gt(lit(308.15)))
    ///     .frame
    ///     .collect()?;
    /// println!("{muggy}");
    /// # Ok(())
    /// # }
    /// ```
    pub fn filter(&self, predicate: Expr) -> DailySummaryFrame {
        DailySummaryFrame::new(self.frame.clone().filter(predicate))
    }

    /// Rows with `start <= date <= end`.
    pub fn get_range(&self, start: NaiveDate, end: NaiveDate) -> DailySummaryFrame {
        self.filter(
            col("date")
                .gt_eq(lit(start))
                .and(col("date").lt_eq(lit(end))),
        )
    }

    /// The row for a single day, if present.
    pub fn get_at(&self, date: NaiveDate) -> DailySummaryFrame {
        self.filter(col("date").eq(lit(date)))
    }

    pub fn collect(&self) -> Result<DataFrame, FrameError> {
        Ok(self.frame.clone().collect()?)
    }

    /// Collects the frame and writes it as Snappy-compressed Parquet.
    pub async fn write_parquet(&self, path: &Path) -> Result<(), FrameError> {
        let mut df = self.collect()?;
        let path_buf = path.to_path_buf();
        tokio::task::spawn_blocking(move || {
            let file = std::fs::File::create(&path_buf)
                .map_err(|e| FrameError::ParquetWriteIo(path_buf.clone(), e))?;
            ParquetWriter::new(file)
                .with_compression(ParquetCompression::Snappy)
                .finish(&mut df)
                .map_err(|e| FrameError::ParquetWritePolars(path_buf, e))?;
            Ok::<(), FrameError>(())
        })
        .await??;
        Ok(())
    }
}

impl WeatherServiceResponse {
    /// The returned rows as a [`DailySummaryFrame`].
    pub fn to_frame(&self) -> Result<DailySummaryFrame, FrameError> {
        DailySummaryFrame::from_summaries(&self.weather_data)
    }
}
