use crate::types::cadence::Cadence;
use crate::types::station_frame::StationFrame;
use crate::types::time_series::TimeSeries;
use crate::weather_data::error::{AtStage, Stage, StageResult, WeatherDataError};
use crate::weather_data::extractor::extract_frame;
use crate::weather_data::merger::merge_frames;
use crate::weather_data::resampler::interpolate_hourly;
use crate::weather_data::source::ForecastResponse;

/// How one station response is turned into a frame. Chosen once per batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pipeline {
    /// Hourly table only, no interpolation.
    HourlyOnly,
    /// 15-minute table with hourly columns interpolated in.
    Minutely15WithHourly,
}

impl From<Cadence> for Pipeline {
    fn from(cadence: Cadence) -> Self {
        match cadence {
            Cadence::Hourly => Pipeline::HourlyOnly,
            Cadence::Minutely15 => Pipeline::Minutely15WithHourly,
        }
    }
}

impl Pipeline {
    pub(crate) fn process<T: TimeSeries>(
        &self,
        response: &ForecastResponse<T>,
        minutely_names: &[&str],
        hourly_names: &[&str],
    ) -> StageResult<StationFrame> {
        match self {
            Pipeline::HourlyOnly => {
                let hourly = response
                    .hourly
                    .as_ref()
                    .ok_or(WeatherDataError::MissingSeries(Cadence::Hourly))
                    .at_stage(Stage::ExtractHourly)?;
                extract_frame(hourly, hourly_names).at_stage(Stage::ExtractHourly)
            }
            Pipeline::Minutely15WithHourly => {
                let minutely = response
                    .minutely_15
                    .as_ref()
                    .ok_or(WeatherDataError::MissingSeries(Cadence::Minutely15))
                    .at_stage(Stage::ExtractMinutely15)?;
                let minutely =
                    extract_frame(minutely, minutely_names).at_stage(Stage::ExtractMinutely15)?;

                // No hourly series means nothing to merge in
                let Some(hourly) = response.hourly.as_ref() else {
                    return Ok(minutely);
                };
                let hourly = extract_frame(hourly, hourly_names).at_stage(Stage::ExtractHourly)?;

                let targets = minutely.timestamps().at_stage(Stage::Resample)?;
                let interpolated =
                    interpolate_hourly(&hourly, &targets).at_stage(Stage::Resample)?;
                merge_frames(&minutely, &interpolated).at_stage(Stage::Merge)
            }
        }
    }
}
