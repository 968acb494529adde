//! Contains the `StationFrame` structure holding one station's forecast table.

use crate::weather_data::error::WeatherDataError;
use chrono::{DateTime, Utc};
use polars::prelude::*;
use std::collections::HashSet;

/// Name of the timestamp column every station frame starts with.
pub const DATETIME_COLUMN: &str = "datetime";

pub(crate) const UTC: &str = "UTC";

/// A wrapper around a Polars `DataFrame` holding one station's forecast.
///
/// The first column is `datetime` (`Datetime(Milliseconds, "UTC")`, ascending and
/// unique); every other column is a `Float64` variable named by its provider
/// identifier. Missing values are nulls.
///
/// Frames come out of the extraction pipeline; the same type is used for plain
/// 15-minute or hourly tables, for interpolated hourly tables and for merged ones.
#[derive(Debug, Clone)]
pub struct StationFrame {
    /// The underlying Polars DataFrame.
    pub frame: DataFrame,
}

impl StationFrame {
    pub fn new(frame: DataFrame) -> Self {
        Self { frame }
    }

    /// A frame with no rows and no columns, meaning "nothing to merge".
    pub fn empty() -> Self {
        Self::new(DataFrame::empty())
    }

    /// Builds a frame from millisecond timestamps and value columns, in the given order.
    pub(crate) fn from_parts(
        millis: Vec<i64>,
        columns: Vec<(String, Vec<Option<f64>>)>,
    ) -> Result<Self, WeatherDataError> {
        let mut all = Vec::with_capacity(columns.len() + 1);
        all.push(datetime_column(millis));
        all.extend(
            columns
                .into_iter()
                .map(|(name, values)| value_column(&name, values)),
        );
        Ok(Self::new(DataFrame::new(all)?))
    }

    pub fn height(&self) -> usize {
        self.frame.height()
    }

    pub fn is_empty(&self) -> bool {
        self.frame.height() == 0
    }

    pub fn column_names(&self) -> Vec<String> {
        self.frame
            .get_column_names()
            .into_iter()
            .map(|name| name.to_string())
            .collect()
    }

    /// Column names without the `datetime` column.
    pub fn value_column_names(&self) -> Vec<String> {
        self.column_names()
            .into_iter()
            .filter(|name| name != DATETIME_COLUMN)
            .collect()
    }

    /// Timestamps as unix milliseconds. A frame without columns has no timestamps.
    pub fn timestamps_millis(&self) -> Result<Vec<i64>, WeatherDataError> {
        if self.frame.width() == 0 {
            return Ok(Vec::new());
        }
        let column = self
            .frame
            .column(DATETIME_COLUMN)
            .map_err(|e| WeatherDataError::ColumnNotFound(DATETIME_COLUMN.to_string(), e))?;

        let divisor = match column.dtype() {
            DataType::Datetime(TimeUnit::Milliseconds, _) => 1,
            DataType::Datetime(TimeUnit::Microseconds, _) => 1_000,
            DataType::Datetime(TimeUnit::Nanoseconds, _) => 1_000_000,
            other => {
                return Err(WeatherDataError::UnexpectedColumnType {
                    column: DATETIME_COLUMN.to_string(),
                    dtype: other.to_string(),
                })
            }
        };

        let physical = column.cast(&DataType::Int64)?;
        physical
            .i64()?
            .into_iter()
            .map(|value| {
                value
                    .map(|v| v.div_euclid(divisor))
                    .ok_or_else(|| WeatherDataError::misaligned("null timestamp in datetime column"))
            })
            .collect()
    }

    pub fn timestamps(&self) -> Result<Vec<DateTime<Utc>>, WeatherDataError> {
        self.timestamps_millis()?
            .into_iter()
            .map(|ms| {
                DateTime::from_timestamp_millis(ms).ok_or_else(|| {
                    WeatherDataError::misaligned(format!("timestamp {ms} ms is out of range"))
                })
            })
            .collect()
    }

    /// Values of a column as `f64`, with nulls and NaNs as `None`.
    pub fn values(&self, name: &str) -> Result<Vec<Option<f64>>, WeatherDataError> {
        let column = self
            .frame
            .column(name)
            .map_err(|e| WeatherDataError::ColumnNotFound(name.to_string(), e))?;
        let floats = column.cast(&DataType::Float64)?;
        let values = floats
            .f64()?
            .into_iter()
            .map(|value| value.filter(|v| !v.is_nan()))
            .collect();
        Ok(values)
    }

    /// Fails with [`WeatherDataError::GridAlignment`] if a timestamp occurs twice.
    pub fn ensure_unique_timestamps(&self) -> Result<(), WeatherDataError> {
        let mut seen = HashSet::new();
        for ms in self.timestamps_millis()? {
            if !seen.insert(ms) {
                let at = DateTime::from_timestamp_millis(ms)
                    .map(|dt| dt.to_rfc3339())
                    .unwrap_or_else(|| ms.to_string());
                return Err(WeatherDataError::misaligned(format!(
                    "duplicate timestamp {at}"
                )));
            }
        }
        Ok(())
    }
}

impl From<StationFrame> for DataFrame {
    fn from(station_frame: StationFrame) -> Self {
        station_frame.frame
    }
}

pub(crate) fn datetime_column(millis: Vec<i64>) -> Column {
    let datetimes = Int64Chunked::from_vec(DATETIME_COLUMN.into(), millis)
        .into_datetime(TimeUnit::Milliseconds, Some(UTC.into()));
    Column::from(datetimes.into_series())
}

pub(crate) fn value_column(name: &str, values: Vec<Option<f64>>) -> Column {
    let floats = Float64Chunked::from_iter_options(name.into(), values.into_iter());
    Column::from(floats.into_series())
}
