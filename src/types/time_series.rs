//! The read-only shape of one raw time series as delivered by a forecast source.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One provider time series: a regular grid `[start, end)` stepped by a fixed
/// interval, with one value array per requested variable.
///
/// Implement this for whatever object your client library hands back; the
/// extraction pipeline only relies on this shape.
pub trait TimeSeries {
    /// Start (inclusive) and end (exclusive) of the series.
    fn time_bounds(&self) -> (DateTime<Utc>, DateTime<Utc>);

    /// Sampling interval in seconds.
    fn interval_seconds(&self) -> i64;

    /// Number of variable arrays in the series.
    fn variable_count(&self) -> usize;

    /// Values of the variable at `index`, in request order. Missing values are NaN.
    fn variable_at(&self, index: usize) -> Option<&[f32]>;
}

/// An owned [`TimeSeries`], e.g. decoded from a response or built in tests.
///
/// Timestamps (de)serialize as unix seconds, matching the provider's `time` /
/// `time_end` fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawTimeSeries {
    #[serde(with = "chrono::serde::ts_seconds")]
    pub start: DateTime<Utc>,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub end: DateTime<Utc>,
    pub interval: i64,
    pub variables: Vec<Vec<f32>>,
}

impl RawTimeSeries {
    pub fn new(
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        interval: i64,
        variables: Vec<Vec<f32>>,
    ) -> Self {
        Self {
            start,
            end,
            interval,
            variables,
        }
    }
}

impl TimeSeries for RawTimeSeries {
    fn time_bounds(&self) -> (DateTime<Utc>, DateTime<Utc>) {
        (self.start, self.end)
    }

    fn interval_seconds(&self) -> i64 {
        self.interval
    }

    fn variable_count(&self) -> usize {
        self.variables.len()
    }

    fn variable_at(&self, index: usize) -> Option<&[f32]> {
        self.variables.get(index).map(Vec::as_slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_raw_series_deserializes_unix_seconds() {
        let json = r#"{"start": 1700000000, "end": 1700007200, "interval": 3600, "variables": [[1.0, 2.5]]}"#;
        let series: RawTimeSeries = serde_json::from_str(json).unwrap();

        assert_eq!(
            series.time_bounds(),
            (
                Utc.timestamp_opt(1_700_000_000, 0).unwrap(),
                Utc.timestamp_opt(1_700_007_200, 0).unwrap()
            )
        );
        assert_eq!(series.interval_seconds(), 3600);
        assert_eq!(series.variable_count(), 1);
        assert_eq!(series.variable_at(0), Some(&[1.0f32, 2.5][..]));
        assert_eq!(series.variable_at(1), None);
    }
}
