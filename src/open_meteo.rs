//! This module provides the main entry point: assembling a multi-station forecast
//! batch into station frames.

use crate::config::error::ConfigurationError;
use crate::config::settings::Settings;
use crate::error::OpenMeteoError;
use crate::types::cadence::Cadence;
use crate::types::catalog::{ForecastModel, HourlyParam, Minutely15Param};
use crate::types::station::LatLon;
use crate::types::station_frame::StationFrame;
use crate::utils::format_window;
use crate::weather_data::batch::{BatchFrames, BatchOutcome, BatchResult, BatchSummary};
use crate::weather_data::endpoint::Endpoint;
use crate::weather_data::error::{BatchProcessingError, Stage, WeatherDataError};
use crate::weather_data::merger::concat_frames;
use crate::weather_data::pipeline::Pipeline;
use crate::weather_data::source::{ForecastQuery, ForecastSource};
use bon::bon;
use chrono::{DateTime, Duration, Utc};
use log::{debug, error, info, warn};
use std::collections::HashSet;
use std::hash::Hash;

/// The main client struct for assembling Open-Meteo forecasts.
///
/// Wraps a [`ForecastSource`] that performs the actual requests. The client picks
/// the endpoint, turns every station response into a [`StationFrame`] and stacks
/// the results.
///
/// # Examples
///
/// ```no_run
/// # use openmeteo::{OpenMeteo, ForecastSource, LatLon, Cadence, BatchOutcome, OpenMeteoError};
/// # async fn run<S: ForecastSource>(source: S) -> Result<(), OpenMeteoError> {
/// let client = OpenMeteo::new(source);
/// let outcome = client
///     .load_data()
///     .stations(&[LatLon(52.1015, 5.1779)])
///     .cadence(Cadence::Minutely15)
///     .model("icon_d2")
///     .call()
///     .await?;
///
/// if let BatchOutcome::Loaded(result) = outcome {
///     println!("{} rows", result.summary.rows_after_concat);
/// }
/// # Ok(())
/// # }
/// ```
pub struct OpenMeteo<S> {
    source: S,
    api_key: Option<String>,
}

#[bon]
impl<S: ForecastSource> OpenMeteo<S> {
    /// Creates a client without an API key, using the free endpoints.
    pub fn new(source: S) -> Self {
        Self {
            source,
            api_key: None,
        }
    }

    /// Sets the API key, switching requests to the customer endpoints.
    /// A blank key is ignored.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        let api_key = api_key.into();
        let api_key = api_key.trim();
        self.api_key = (!api_key.is_empty()).then(|| api_key.to_string());
        self
    }

    /// Creates a client using the API key from `settings`, if any.
    pub fn from_settings(source: S, settings: &Settings) -> Self {
        Self {
            source,
            api_key: settings.api_key().map(str::to_string),
        }
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    /// Loads a forecast batch for `stations` and assembles it into frames.
    ///
    /// This method uses a builder pattern.
    ///
    /// # Arguments
    ///
    /// * `.stations(&[LatLon])`: **Required.** Station coordinates, in output order.
    /// * `.cadence(Cadence)`: **Required.** [`Cadence::Minutely15`] merges interpolated
    ///   hourly columns into the 15-minute table, [`Cadence::Hourly`] returns the hourly table.
    /// * `.params_15m(Vec<Minutely15Param>)`: Optional. Defaults to the whole 15-minute catalog.
    ///   Ignored for hourly cadence.
    /// * `.params_hourly(Vec<HourlyParam>)`: Optional. Defaults to the whole hourly catalog.
    /// * `.start_time(DateTime<Utc>)`: Optional. Defaults to 24 hours ago.
    /// * `.end_time(DateTime<Utc>)`: Optional. Defaults to 24 hours from now.
    /// * `.model(&str)`: Optional. Forecast model identifier, defaults to `best_match`.
    /// * `.merge(bool)`: Optional. Stack all station frames into one. Defaults to `true`.
    ///
    /// # Returns
    ///
    /// [`BatchOutcome::Loaded`] when at least one station produced a frame. Stations that
    /// failed are skipped and listed in [`BatchResult::failures`]. [`BatchOutcome::NoResult`]
    /// when the source failed, every station failed or stacking failed.
    ///
    /// # Errors
    ///
    /// Returns [`OpenMeteoError::Configuration`] for an unknown model, no stations,
    /// invalid coordinates or an empty time window. These are checked before the
    /// source is called.
    #[builder]
    #[allow(clippy::too_many_arguments)]
    pub async fn load_data(
        &self,
        stations: &[LatLon],
        cadence: Cadence,
        params_15m: Option<Vec<Minutely15Param>>,
        params_hourly: Option<Vec<HourlyParam>>,
        start_time: Option<DateTime<Utc>>,
        end_time: Option<DateTime<Utc>>,
        model: Option<&str>,
        merge: Option<bool>,
    ) -> Result<BatchOutcome, OpenMeteoError> {
        let now = Utc::now();
        let start_time = start_time.unwrap_or(now - Duration::hours(24));
        let end_time = end_time.unwrap_or(now + Duration::hours(24));
        let model = model.map_or(Ok(ForecastModel::default()), str::parse::<ForecastModel>)?;
        validate_request(stations, start_time, end_time)?;
        let merge = merge.unwrap_or(true);

        let minutely_15 = match cadence {
            Cadence::Minutely15 => {
                unique(params_15m.unwrap_or_else(|| Minutely15Param::ALL.to_vec()))
            }
            Cadence::Hourly => {
                if params_15m.is_some() {
                    debug!("Ignoring minutely_15 parameters for hourly cadence");
                }
                Vec::new()
            }
        };
        let hourly = unique(params_hourly.unwrap_or_else(|| HourlyParam::ALL.to_vec()));

        let query = ForecastQuery {
            stations: stations.to_vec(),
            cadence,
            minutely_15,
            hourly,
            start_time,
            end_time,
            model,
            endpoint: Endpoint::select(start_time, now, self.api_key.is_some()),
            api_key: self.api_key.clone(),
        };
        let window = format_window(start_time, end_time);
        debug!(
            "OpenMeteo. {}. Requesting {} stations at {} cadence from {} (model {})",
            window,
            stations.len(),
            cadence,
            query.endpoint,
            model
        );

        let responses = match self.source.fetch(&query).await {
            Ok(responses) => responses,
            Err(e) => {
                let failure =
                    BatchProcessingError::for_batch(Stage::Fetch, WeatherDataError::Source(e));
                error!("{}: {}", failure, failure.source);
                return Ok(BatchOutcome::NoResult(vec![failure]));
            }
        };
        if responses.len() != stations.len() {
            warn!(
                "OpenMeteo. {}. Source returned {} responses for {} stations",
                window,
                responses.len(),
                stations.len()
            );
        }

        let pipeline = Pipeline::from(cadence);
        let minutely_names = query.minutely_15_names();
        let hourly_names = query.hourly_names();

        let mut frames: Vec<Option<StationFrame>> = Vec::with_capacity(stations.len());
        let mut failures = Vec::new();
        let mut responses = responses.into_iter();
        for (index, location) in stations.iter().enumerate() {
            let processed = match responses.next() {
                Some(response) => pipeline.process(&response, &minutely_names, &hourly_names),
                None => Err((Stage::Fetch, WeatherDataError::MissingResponse)),
            };
            match processed {
                Ok(frame) => frames.push(Some(frame)),
                Err((stage, source)) => {
                    let failure =
                        BatchProcessingError::for_station(index, Some(*location), stage, source);
                    error!("{}: {}", failure, failure.source);
                    failures.push(failure);
                    frames.push(None);
                }
            }
        }

        let stations_loaded = frames.iter().flatten().count();
        if stations_loaded == 0 {
            warn!("OpenMeteo. {}. No station produced data", window);
            return Ok(BatchOutcome::NoResult(failures));
        }

        let rows_before_concat: usize = frames.iter().flatten().map(StationFrame::height).sum();
        info!("OpenMeteo. {}. Loaded {} records.", window, rows_before_concat);

        let (frames, rows_after_concat) = if merge {
            let produced: Vec<StationFrame> = frames.into_iter().flatten().collect();
            match concat_frames(&produced) {
                Ok(merged) => {
                    let height = merged.height();
                    (BatchFrames::Merged(merged), height)
                }
                Err(e) => {
                    let failure = BatchProcessingError::for_batch(Stage::Concatenate, e);
                    error!("{}: {}", failure, failure.source);
                    failures.push(failure);
                    return Ok(BatchOutcome::NoResult(failures));
                }
            }
        } else {
            (BatchFrames::PerStation(frames), rows_before_concat)
        };
        info!("OpenMeteo. {}. Loaded {} records.", window, rows_after_concat);

        Ok(BatchOutcome::Loaded(BatchResult {
            frames,
            summary: BatchSummary {
                start: start_time,
                end: end_time,
                rows_before_concat,
                rows_after_concat,
                stations_loaded,
                stations_failed: failures.len(),
            },
            failures,
        }))
    }

    /// Loads a batch for the stations, model, cadence and merge flag in `settings`.
    pub async fn load_configured(
        &self,
        settings: &Settings,
        start_time: Option<DateTime<Utc>>,
        end_time: Option<DateTime<Utc>>,
    ) -> Result<BatchOutcome, OpenMeteoError> {
        settings.validate()?;
        let model = settings.model()?;
        let stations = settings.stations();
        self.load_data()
            .stations(&stations)
            .cadence(settings.cadence()?)
            .maybe_start_time(start_time)
            .maybe_end_time(end_time)
            .model(model.as_str())
            .merge(settings.merge())
            .call()
            .await
    }
}

fn validate_request(
    stations: &[LatLon],
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
) -> Result<(), ConfigurationError> {
    if stations.is_empty() {
        return Err(ConfigurationError::NoStations);
    }
    stations.iter().try_for_each(LatLon::validate)?;
    if start_time >= end_time {
        return Err(ConfigurationError::EmptyTimeWindow {
            start: start_time,
            end: end_time,
        });
    }
    Ok(())
}

/// Drops repeated entries, keeping the first occurrence.
fn unique<T: Copy + Eq + Hash>(items: Vec<T>) -> Vec<T> {
    let mut seen = HashSet::with_capacity(items.len());
    items.into_iter().filter(|item| seen.insert(*item)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_validate_request() {
        let start = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
        let end = start + Duration::hours(6);
        let station = [LatLon(52.1, 5.2)];

        assert!(validate_request(&station, start, end).is_ok());
        assert_eq!(
            validate_request(&[], start, end),
            Err(ConfigurationError::NoStations)
        );
        assert!(matches!(
            validate_request(&[LatLon(f64::NAN, 5.0)], start, end),
            Err(ConfigurationError::InvalidCoordinates { .. })
        ));
        assert!(matches!(
            validate_request(&station, end, start),
            Err(ConfigurationError::EmptyTimeWindow { .. })
        ));
        assert!(validate_request(&station, start, start).is_err());
    }

    #[test]
    fn test_unique_keeps_first_occurrence() {
        let params = vec![
            HourlyParam::CloudCover,
            HourlyParam::Temperature2m,
            HourlyParam::CloudCover,
        ];
        assert_eq!(
            unique(params),
            vec![HourlyParam::CloudCover, HourlyParam::Temperature2m]
        );
    }
}
