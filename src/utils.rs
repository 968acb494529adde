use crate::config::error::SettingsError;
use chrono::{DateTime, Utc};
use std::path::PathBuf;

const CONFIG_DIR_NAME: &str = "openmeteo_rs";

pub fn get_config_dir() -> Result<PathBuf, SettingsError> {
    dirs::config_dir()
        .ok_or(SettingsError::ConfigDirResolution)
        .map(|p| p.join(CONFIG_DIR_NAME))
}

/// Formats a time window the way batch progress lines print it.
pub(crate) fn format_window(start: DateTime<Utc>, end: DateTime<Utc>) -> String {
    format!(
        "{} - {}",
        start.format("%Y-%m-%d %H:%M"),
        end.format("%Y-%m-%d %H:%M")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_window() {
        let start = Utc.with_ymd_and_hms(2025, 3, 1, 6, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2025, 3, 2, 18, 30, 0).unwrap();
        assert_eq!(format_window(start, end), "2025-03-01 06:00 - 2025-03-02 18:30");
    }
}
