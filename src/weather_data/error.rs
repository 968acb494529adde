use crate::types::cadence::Cadence;
use crate::types::station::LatLon;
use polars::error::PolarsError;
use std::fmt;
use thiserror::Error;

/// Boxed error returned by a [`crate::ForecastSource`].
pub type SourceError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum WeatherDataError {
    #[error("Malformed time series: {reason}")]
    MalformedSeries { reason: String },

    #[error("Timestamp grids are not aligned: {reason}")]
    GridAlignment { reason: String },

    #[error("Response has no {0} series")]
    MissingSeries(Cadence),

    #[error("Source returned no response for this station")]
    MissingResponse,

    #[error("Required column '{0}' not found in DataFrame")]
    ColumnNotFound(String, #[source] PolarsError),

    #[error("Column '{column}' has unsupported type {dtype}")]
    UnexpectedColumnType { column: String, dtype: String },

    #[error("Failed processing DataFrame: {0}")]
    DataFrameProcessing(#[from] PolarsError),

    #[error("Forecast source failed")]
    Source(#[source] SourceError),
}

impl WeatherDataError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        WeatherDataError::MalformedSeries {
            reason: reason.into(),
        }
    }

    pub(crate) fn misaligned(reason: impl Into<String>) -> Self {
        WeatherDataError::GridAlignment {
            reason: reason.into(),
        }
    }
}

/// The processing step a batch failure happened in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Fetch,
    ExtractMinutely15,
    ExtractHourly,
    Resample,
    Merge,
    Concatenate,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Fetch => "fetch",
            Stage::ExtractMinutely15 => "extract minutely_15",
            Stage::ExtractHourly => "extract hourly",
            Stage::Resample => "resample",
            Stage::Merge => "merge",
            Stage::Concatenate => "concatenate",
        };
        f.write_str(name)
    }
}

/// A failure while processing a batch, tagged with the station and stage it happened in.
///
/// `station` and `location` are `None` for whole-batch stages (fetching, concatenation).
#[derive(Debug, Error)]
#[error("{} failed at stage '{stage}'", station_label(.station, .location))]
pub struct BatchProcessingError {
    pub station: Option<usize>,
    pub location: Option<LatLon>,
    pub stage: Stage,
    #[source]
    pub source: WeatherDataError,
}

impl BatchProcessingError {
    pub(crate) fn for_station(
        station: usize,
        location: Option<LatLon>,
        stage: Stage,
        source: WeatherDataError,
    ) -> Self {
        Self {
            station: Some(station),
            location,
            stage,
            source,
        }
    }

    pub(crate) fn for_batch(stage: Stage, source: WeatherDataError) -> Self {
        Self {
            station: None,
            location: None,
            stage,
            source,
        }
    }
}

fn station_label(station: &Option<usize>, location: &Option<LatLon>) -> String {
    match (station, location) {
        (Some(index), Some(location)) => format!("Station {index} {location}"),
        (Some(index), None) => format!("Station {index}"),
        _ => "Batch".to_string(),
    }
}

/// Stage and station context attached to a [`WeatherDataError`] by the pipeline.
pub(crate) type StageResult<T> = Result<T, (Stage, WeatherDataError)>;

pub(crate) trait AtStage<T> {
    fn at_stage(self, stage: Stage) -> StageResult<T>;
}

impl<T> AtStage<T> for Result<T, WeatherDataError> {
    fn at_stage(self, stage: Stage) -> StageResult<T> {
        self.map_err(|e| (stage, e))
    }
}
