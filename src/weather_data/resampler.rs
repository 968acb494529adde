//! Upsampling of hourly frames onto the 15-minute grid.
//!
//! Interpolation is linear in time between the two valid samples bounding a grid
//! point, so an interpolated value never leaves the range of its neighbours.
//! Values after the last valid sample hold that sample; values before the first
//! valid sample stay null.

use crate::types::station_frame::{StationFrame, DATETIME_COLUMN};
use crate::weather_data::error::WeatherDataError;
use chrono::{DateTime, Duration, Utc};
use polars::prelude::{Duration as PolarsDuration, *};

/// Grid spacing, in minutes, hourly data is interpolated onto.
pub const RESAMPLE_STEP_MINUTES: i64 = 15;

/// Interpolates an hourly frame to 15 minutes and aligns it to `targets`.
///
/// Returns an empty frame (no rows, no columns) when `hourly` has no rows, which
/// the merger reads as "no hourly data to merge".
///
/// # Errors
///
/// Returns [`WeatherDataError::GridAlignment`] if the hourly timestamps or the
/// targets are not strictly ascending.
pub fn interpolate_hourly(
    hourly: &StationFrame,
    targets: &[DateTime<Utc>],
) -> Result<StationFrame, WeatherDataError> {
    let upsampled = upsample_linear(hourly, Duration::minutes(RESAMPLE_STEP_MINUTES))?;
    reindex_nearest(&upsampled, targets)
}

/// Resamples `frame` to a regular grid of `step` spanning its own first to last
/// timestamp, filling every column by linear interpolation.
///
/// Columns with fewer than two valid values cannot be interpolated and come back all-null.
pub fn upsample_linear(
    frame: &StationFrame,
    step: Duration,
) -> Result<StationFrame, WeatherDataError> {
    let step_ms = step.num_milliseconds();
    if step_ms <= 0 {
        return Err(WeatherDataError::misaligned(format!(
            "resample step must be positive, got {step_ms} ms"
        )));
    }
    if frame.is_empty() {
        return Ok(StationFrame::empty());
    }
    ensure_strictly_ascending(&frame.timestamps_millis()?, "source")?;

    let every = PolarsDuration::try_parse(&format!("{step_ms}ms"))?;
    let upsampled = frame
        .frame
        .upsample(Vec::<PlSmallStr>::new(), DATETIME_COLUMN, every)?;

    let mut dense = Vec::new();
    let mut sparse = Vec::new();
    for name in frame.value_column_names() {
        if frame.values(&name)?.iter().flatten().count() >= 2 {
            dense.push(
                col(name.as_str())
                    .cast(DataType::Float64)
                    .interpolate(InterpolationMethod::Linear)
                    .forward_fill(None)
                    .alias(name.as_str()),
            );
        } else {
            sparse.push(name);
        }
    }

    let mut filled = upsampled
        .lazy()
        .sort([DATETIME_COLUMN], SortMultipleOptions::default())
        .with_columns(dense)
        .collect()?;
    let height = filled.height();
    for name in sparse {
        filled.with_column(Column::full_null(
            name.as_str().into(),
            height,
            &DataType::Float64,
        ))?;
    }
    Ok(StationFrame::new(filled))
}

/// Aligns `frame` onto `targets` by picking, per target, the row with the nearest
/// timestamp. Ties go to the earlier row; targets outside the frame's range take the
/// boundary row.
///
/// A nearest as-of join (`AsofStrategy::Nearest`) would settle an exact tie on the
/// later row, so the pick is done here over the sorted timestamps.
pub fn reindex_nearest(
    frame: &StationFrame,
    targets: &[DateTime<Utc>],
) -> Result<StationFrame, WeatherDataError> {
    if frame.is_empty() {
        return Ok(StationFrame::empty());
    }

    let source = frame.timestamps_millis()?;
    ensure_strictly_ascending(&source, "source")?;
    let targets: Vec<i64> = targets.iter().map(DateTime::timestamp_millis).collect();
    ensure_strictly_ascending(&targets, "target")?;

    let picks: Vec<usize> = targets
        .iter()
        .map(|target| nearest_index(&source, *target))
        .collect();

    let columns = frame
        .value_column_names()
        .into_iter()
        .map(|name| {
            let values = frame.values(&name)?;
            let aligned = picks.iter().map(|&i| values[i]).collect();
            Ok((name, aligned))
        })
        .collect::<Result<Vec<_>, WeatherDataError>>()?;

    StationFrame::from_parts(targets, columns)
}

fn ensure_strictly_ascending(millis: &[i64], what: &str) -> Result<(), WeatherDataError> {
    match millis.windows(2).position(|pair| pair[0] >= pair[1]) {
        Some(i) => Err(WeatherDataError::misaligned(format!(
            "{what} timestamps are not strictly ascending at row {}",
            i + 1
        ))),
        None => Ok(()),
    }
}

/// `source` must be non-empty and ascending.
fn nearest_index(source: &[i64], target: i64) -> usize {
    let after = source.partition_point(|t| *t < target);
    if after == 0 {
        return 0;
    }
    if after == source.len() {
        return source.len() - 1;
    }
    let before = after - 1;
    if target - source[before] <= source[after] - target {
        before
    } else {
        after
    }
}
