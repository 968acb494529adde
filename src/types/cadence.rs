//! Defines the sampling cadence of forecast frames.

use crate::config::error::ConfigurationError;
use std::fmt;

/// The sampling interval of a forecast table.
///
/// Open-Meteo serves a subset of variables at a 15-minute resolution and the full
/// variable set hourly. The cadence of a batch decides which series are requested
/// and whether hourly data gets interpolated onto the 15-minute grid.
///
/// # Examples
///
/// ```
/// use openmeteo::Cadence;
///
/// assert_eq!(Cadence::try_from(15).unwrap(), Cadence::Minutely15);
/// assert_eq!(Cadence::Hourly.minutes(), 60);
/// assert!(Cadence::try_from(30).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cadence {
    /// 15-minute data, enriched with hourly variables interpolated onto the same grid.
    Minutely15,
    /// Plain hourly data.
    #[default]
    Hourly,
}

impl Cadence {
    pub fn minutes(&self) -> u32 {
        match self {
            Cadence::Minutely15 => 15,
            Cadence::Hourly => 60,
        }
    }

    /// The key the provider uses for this resolution's series (`minutely_15` / `hourly`).
    pub fn series_key(&self) -> &'static str {
        match self {
            Cadence::Minutely15 => "minutely_15",
            Cadence::Hourly => "hourly",
        }
    }
}

impl TryFrom<u32> for Cadence {
    type Error = ConfigurationError;

    fn try_from(minutes: u32) -> Result<Self, Self::Error> {
        match minutes {
            15 => Ok(Cadence::Minutely15),
            60 => Ok(Cadence::Hourly),
            other => Err(ConfigurationError::UnsupportedCadence(other)),
        }
    }
}

impl fmt::Display for Cadence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.series_key())
    }
}
