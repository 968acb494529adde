//! Loading of the JSON settings file: API credentials, model choice and station list.
//!
//! ```json
//! {
//!   "Openmeteo": { "api_key": "…", "model": "icon_d2", "cadence": 15, "merge": true },
//!   "Location": { "latitude": 52.1015, "longitude": 5.1779 },
//!   "Stations": [{ "latitude": 51.44, "longitude": 5.47 }]
//! }
//! ```
//!
//! Every field is optional. `Location` is the primary station, `Stations` adds more.

use crate::config::error::{ConfigurationError, SettingsError};
use crate::types::cadence::Cadence;
use crate::types::catalog::ForecastModel;
use crate::types::station::LatLon;
use crate::utils::get_config_dir;
use log::debug;
use serde::{Deserialize, Serialize};
use std::path::Path;

const SETTINGS_FILE_NAME: &str = "config.json";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(rename = "Openmeteo", default)]
    pub openmeteo: OpenMeteoSettings,
    #[serde(rename = "Location", default)]
    pub location: Option<LocationSettings>,
    #[serde(rename = "Stations", default)]
    pub stations: Vec<LocationSettings>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OpenMeteoSettings {
    pub api_key: Option<String>,
    pub model: Option<String>,
    /// Cadence in minutes, 15 or 60.
    pub cadence: Option<u32>,
    pub merge: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocationSettings {
    pub latitude: f64,
    pub longitude: f64,
}

impl From<LocationSettings> for LatLon {
    fn from(location: LocationSettings) -> Self {
        LatLon(location.latitude, location.longitude)
    }
}

impl Settings {
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Reads and validates a settings file.
    pub async fn from_path(path: &Path) -> Result<Self, SettingsError> {
        let contents = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| SettingsError::Read(path.to_path_buf(), e))?;
        let settings = Self::from_json_str(&contents)
            .map_err(|e| SettingsError::Parse(path.to_path_buf(), e))?;
        settings.validate()?;
        debug!(
            "Loaded settings from {:?} ({} stations)",
            path,
            settings.stations().len()
        );
        Ok(settings)
    }

    /// Reads `config.json` from the default config directory
    /// (e.g. `~/.config/openmeteo_rs/config.json` on Linux).
    pub async fn load() -> Result<Self, SettingsError> {
        Self::load_from_dir(&get_config_dir()?).await
    }

    /// Reads `config.json` from `dir`.
    pub async fn load_from_dir(dir: &Path) -> Result<Self, SettingsError> {
        Self::from_path(&dir.join(SETTINGS_FILE_NAME)).await
    }

    /// The API key, if one is configured and non-blank.
    pub fn api_key(&self) -> Option<&str> {
        self.openmeteo
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    pub fn model(&self) -> Result<ForecastModel, ConfigurationError> {
        self.openmeteo
            .model
            .as_deref()
            .map_or(Ok(ForecastModel::default()), str::parse::<ForecastModel>)
    }

    pub fn cadence(&self) -> Result<Cadence, ConfigurationError> {
        self.openmeteo
            .cadence
            .map_or(Ok(Cadence::default()), Cadence::try_from)
    }

    pub fn merge(&self) -> bool {
        self.openmeteo.merge.unwrap_or(true)
    }

    /// The primary location followed by any additional stations.
    pub fn stations(&self) -> Vec<LatLon> {
        self.location
            .iter()
            .chain(self.stations.iter())
            .copied()
            .map(LatLon::from)
            .collect()
    }

    /// Checks model, cadence and coordinates. An empty station list is allowed here;
    /// it is rejected when a batch is requested.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        self.model()?;
        self.cadence()?;
        self.stations().iter().try_for_each(LatLon::validate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = r#"{
        "Openmeteo": { "api_key": "secret", "model": "icon_d2", "cadence": 15 },
        "Location": { "latitude": 52.1015, "longitude": 5.1779 },
        "Stations": [{ "latitude": 51.44, "longitude": 5.47 }]
    }"#;

    #[test]
    fn test_parse_sample_settings() {
        let settings = Settings::from_json_str(SAMPLE).unwrap();

        assert_eq!(settings.api_key(), Some("secret"));
        assert_eq!(settings.model().unwrap(), ForecastModel::IconD2);
        assert_eq!(settings.cadence().unwrap(), Cadence::Minutely15);
        assert!(settings.merge());
        assert_eq!(
            settings.stations(),
            vec![LatLon(52.1015, 5.1779), LatLon(51.44, 5.47)]
        );
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_defaults_for_empty_settings() {
        let settings = Settings::from_json_str("{}").unwrap();

        assert_eq!(settings.api_key(), None);
        assert_eq!(settings.model().unwrap(), ForecastModel::BestMatch);
        assert_eq!(settings.cadence().unwrap(), Cadence::Hourly);
        assert!(settings.stations().is_empty());
    }

    #[test]
    fn test_blank_api_key_is_ignored() {
        let settings =
            Settings::from_json_str(r#"{"Openmeteo": {"api_key": "   "}}"#).unwrap();
        assert_eq!(settings.api_key(), None);
    }

    #[test]
    fn test_invalid_values_fail_validation() {
        let bad_model = Settings::from_json_str(r#"{"Openmeteo": {"model": "not_a_model"}}"#)
            .unwrap();
        assert!(matches!(
            bad_model.validate(),
            Err(ConfigurationError::UnknownModel(_))
        ));

        let bad_cadence =
            Settings::from_json_str(r#"{"Openmeteo": {"cadence": 30}}"#).unwrap();
        assert_eq!(
            bad_cadence.validate(),
            Err(ConfigurationError::UnsupportedCadence(30))
        );

        let bad_location = Settings::from_json_str(
            r#"{"Location": {"latitude": 123.0, "longitude": 5.0}}"#,
        )
        .unwrap();
        assert!(matches!(
            bad_location.validate(),
            Err(ConfigurationError::InvalidCoordinates { .. })
        ));
    }

    #[tokio::test]
    async fn test_from_path_reads_file() -> Result<(), Box<dyn std::error::Error>> {
        let mut file = NamedTempFile::new()?;
        file.write_all(SAMPLE.as_bytes())?;
        file.flush()?;

        let settings = Settings::from_path(file.path()).await?;
        assert_eq!(settings.stations().len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_from_path_reports_parse_errors() -> Result<(), Box<dyn std::error::Error>> {
        let mut file = NamedTempFile::new()?;
        file.write_all(b"{ not json")?;
        file.flush()?;

        let err = Settings::from_path(file.path()).await.unwrap_err();
        assert!(matches!(err, SettingsError::Parse(ref path, _) if path == file.path()));
        Ok(())
    }

    #[tokio::test]
    async fn test_from_path_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");

        let err = Settings::from_path(&missing).await.unwrap_err();
        assert!(matches!(err, SettingsError::Read(_, _)));
    }

    #[tokio::test]
    async fn test_load_from_dir_reads_config_json() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        std::fs::write(dir.path().join("config.json"), SAMPLE)?;

        let settings = Settings::load_from_dir(dir.path()).await?;
        assert_eq!(settings.api_key(), Some("secret"));
        assert_eq!(settings.stations().len(), 2);

        let empty = tempfile::tempdir()?;
        let err = Settings::load_from_dir(empty.path()).await.unwrap_err();
        assert!(
            matches!(err, SettingsError::Read(ref path, _) if path == &empty.path().join("config.json"))
        );
        Ok(())
    }
}
