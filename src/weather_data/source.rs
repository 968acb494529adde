//! The seam between batch assembly and whatever client talks to the forecast API.

use crate::types::cadence::Cadence;
use crate::types::catalog::{ForecastModel, HourlyParam, Minutely15Param};
use crate::types::station::LatLon;
use crate::types::time_series::TimeSeries;
use crate::weather_data::endpoint::Endpoint;
use crate::weather_data::error::SourceError;
use chrono::{DateTime, NaiveDate, Utc};
use std::future::Future;

/// Everything a source needs to issue one multi-station forecast request.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastQuery {
    pub stations: Vec<LatLon>,
    pub cadence: Cadence,
    /// Empty unless the cadence is [`Cadence::Minutely15`].
    pub minutely_15: Vec<Minutely15Param>,
    pub hourly: Vec<HourlyParam>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub model: ForecastModel,
    pub endpoint: Endpoint,
    pub api_key: Option<String>,
}

impl ForecastQuery {
    pub fn start_date(&self) -> NaiveDate {
        self.start_time.date_naive()
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end_time.date_naive()
    }

    pub fn minutely_15_names(&self) -> Vec<&'static str> {
        self.minutely_15.iter().map(Minutely15Param::as_str).collect()
    }

    pub fn hourly_names(&self) -> Vec<&'static str> {
        self.hourly.iter().map(HourlyParam::as_str).collect()
    }
}

/// The series returned for one station. Either may be absent.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastResponse<T> {
    pub minutely_15: Option<T>,
    pub hourly: Option<T>,
}

impl<T> ForecastResponse<T> {
    pub fn new(minutely_15: Option<T>, hourly: Option<T>) -> Self {
        Self {
            minutely_15,
            hourly,
        }
    }
}

/// Fetches forecast responses, one per station, in the order of `query.stations`.
pub trait ForecastSource {
    type Series: TimeSeries;

    fn fetch(
        &self,
        query: &ForecastQuery,
    ) -> impl Future<Output = Result<Vec<ForecastResponse<Self::Series>>, SourceError>> + Send;
}

impl<S: ForecastSource + ?Sized + Sync> ForecastSource for &S {
    type Series = S::Series;

    fn fetch(
        &self,
        query: &ForecastQuery,
    ) -> impl Future<Output = Result<Vec<ForecastResponse<Self::Series>>, SourceError>> + Send {
        (**self).fetch(query)
    }
}
