mod config;
mod error;
mod open_meteo;
mod types;
mod utils;
mod weather_data;

pub use error::OpenMeteoError;
pub use open_meteo::*;

pub use config::error::{ConfigurationError, SettingsError};
pub use config::settings::{LocationSettings, OpenMeteoSettings, Settings};
pub use utils::get_config_dir;

pub use types::cadence::Cadence;
pub use types::catalog::{parse_params, ForecastModel, HourlyParam, Minutely15Param};
pub use types::station::LatLon;
pub use types::station_frame::{StationFrame, DATETIME_COLUMN};
pub use types::time_series::{RawTimeSeries, TimeSeries};

pub use weather_data::batch::{BatchFrames, BatchOutcome, BatchResult, BatchSummary};
pub use weather_data::endpoint::Endpoint;
pub use weather_data::error::{BatchProcessingError, SourceError, Stage, WeatherDataError};
pub use weather_data::extractor::extract_frame;
pub use weather_data::merger::{concat_frames, merge_frames};
pub use weather_data::pipeline::Pipeline;
pub use weather_data::resampler::{
    interpolate_hourly, reindex_nearest, upsample_linear, RESAMPLE_STEP_MINUTES,
};
pub use weather_data::source::{ForecastQuery, ForecastResponse, ForecastSource};
