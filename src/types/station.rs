use crate::config::error::ConfigurationError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Represents a geographical coordinate using latitude and longitude.
///
/// Latitude is the first element (index 0), and longitude is the second (index 1).
///
/// # Examples
///
/// ```
/// use openmeteo::LatLon;
///
/// let de_bilt = LatLon(52.1015, 5.1779);
/// assert_eq!(de_bilt.0, 52.1015); // Latitude
/// assert_eq!(de_bilt.1, 5.1779); // Longitude
/// assert!(de_bilt.validate().is_ok());
/// assert!(LatLon(91.0, 0.0).validate().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLon(pub f64, pub f64);

impl LatLon {
    pub fn latitude(&self) -> f64 {
        self.0
    }

    pub fn longitude(&self) -> f64 {
        self.1
    }

    /// Checks that latitude is within -90..=90 and longitude within -180..=180.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        let LatLon(lat, lon) = *self;
        let lat_ok = lat.is_finite() && (-90.0..=90.0).contains(&lat);
        let lon_ok = lon.is_finite() && (-180.0..=180.0).contains(&lon);
        if lat_ok && lon_ok {
            Ok(())
        } else {
            Err(ConfigurationError::InvalidCoordinates { lat, lon })
        }
    }
}

impl fmt::Display for LatLon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.4}, {:.4})", self.0, self.1)
    }
}
