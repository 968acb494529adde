use crate::types::station_frame::{StationFrame, DATETIME_COLUMN};
use crate::types::time_series::TimeSeries;
use crate::weather_data::error::WeatherDataError;
use std::collections::HashSet;

/// Turns one raw time series into a [`StationFrame`].
///
/// The `datetime` column is the closed-open grid `start, start + interval, … < end`.
/// Variable array `i` becomes the column named `names[i]`; order is preserved.
/// NaN values become nulls.
///
/// # Errors
///
/// Returns [`WeatherDataError::MalformedSeries`] if the interval is not positive or
/// does not evenly divide `end - start`, if the number of names differs from the
/// number of variable arrays, if an array's length differs from the grid length,
/// or if a name is repeated.
pub fn extract_frame<T>(series: &T, names: &[&str]) -> Result<StationFrame, WeatherDataError>
where
    T: TimeSeries + ?Sized,
{
    let (start, end) = series.time_bounds();
    let interval = series.interval_seconds();
    if interval <= 0 {
        return Err(WeatherDataError::malformed(format!(
            "interval must be positive, got {interval}s"
        )));
    }

    let span_ms = (end - start).num_milliseconds();
    if span_ms < 0 {
        return Err(WeatherDataError::malformed(format!(
            "end {end} lies before start {start}"
        )));
    }
    let interval_ms = interval
        .checked_mul(1000)
        .ok_or_else(|| WeatherDataError::malformed(format!("interval {interval}s is too large")))?;
    if span_ms % interval_ms != 0 {
        return Err(WeatherDataError::malformed(format!(
            "interval {interval}s does not evenly divide {start} .. {end}"
        )));
    }
    let rows = span_ms / interval_ms;

    if series.variable_count() != names.len() {
        return Err(WeatherDataError::malformed(format!(
            "{} variable arrays but {} parameter names",
            series.variable_count(),
            names.len()
        )));
    }

    let mut seen = HashSet::with_capacity(names.len());
    for name in names {
        if *name == DATETIME_COLUMN || !seen.insert(*name) {
            return Err(WeatherDataError::malformed(format!(
                "parameter name '{name}' is used twice"
            )));
        }
    }

    let start_ms = start.timestamp_millis();
    let millis: Vec<i64> = (0..rows).map(|i| start_ms + i * interval_ms).collect();

    let mut columns = Vec::with_capacity(names.len());
    for (index, name) in names.iter().enumerate() {
        let values = series.variable_at(index).ok_or_else(|| {
            WeatherDataError::malformed(format!("variable {index} ('{name}') is missing"))
        })?;
        if values.len() != millis.len() {
            return Err(WeatherDataError::malformed(format!(
                "variable '{name}' has {} values, expected {} grid points",
                values.len(),
                millis.len()
            )));
        }
        let values = values
            .iter()
            .map(|v| (!v.is_nan()).then_some(f64::from(*v)))
            .collect();
        columns.push((name.to_string(), values));
    }

    StationFrame::from_parts(millis, columns)
}
