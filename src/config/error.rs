use chrono::{DateTime, Utc};
use std::path::PathBuf;
use thiserror::Error;

/// Invalid request configuration. Always reported before the forecast source is called.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    #[error("Unknown forecast model '{0}'")]
    UnknownModel(String),

    #[error("Unknown minutely_15 parameter '{0}'")]
    UnknownMinutely15Parameter(String),

    #[error("Unknown hourly parameter '{0}'")]
    UnknownHourlyParameter(String),

    #[error("Unsupported cadence of {0} minutes, expected 15 or 60")]
    UnsupportedCadence(u32),

    #[error("No station coordinates given")]
    NoStations,

    #[error("Invalid coordinates ({lat}, {lon}): latitude must be -90 to 90, longitude -180 to 180")]
    InvalidCoordinates { lat: f64, lon: f64 },

    #[error("Time window is empty: start {start} is not before end {end}")]
    EmptyTimeWindow {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to determine config directory")]
    ConfigDirResolution,

    #[error("Failed to read settings file '{0}'")]
    Read(PathBuf, #[source] std::io::Error),

    #[error("Failed to parse settings file '{0}'")]
    Parse(PathBuf, #[source] serde_json::Error),

    #[error(transparent)]
    Invalid(#[from] ConfigurationError),
}
