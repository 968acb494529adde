use chrono::{DateTime, Duration, Utc};
use std::fmt;

/// Forecast API endpoint family a batch is sent to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Forecast,
    CustomerForecast,
    HistoricalForecast,
    CustomerHistoricalForecast,
}

impl Endpoint {
    /// Windows starting more than a day before `now` go to the historical forecast API.
    /// An API key selects the customer variant.
    pub fn select(start: DateTime<Utc>, now: DateTime<Utc>, has_api_key: bool) -> Self {
        let historical = start < now - Duration::days(1);
        match (historical, has_api_key) {
            (false, false) => Endpoint::Forecast,
            (false, true) => Endpoint::CustomerForecast,
            (true, false) => Endpoint::HistoricalForecast,
            (true, true) => Endpoint::CustomerHistoricalForecast,
        }
    }

    pub fn url(&self) -> &'static str {
        match self {
            Endpoint::Forecast => "https://api.open-meteo.com/v1/forecast",
            Endpoint::CustomerForecast => "https://customer-api.open-meteo.com/v1/forecast",
            Endpoint::HistoricalForecast => {
                "https://historical-forecast-api.open-meteo.com/v1/forecast"
            }
            Endpoint::CustomerHistoricalForecast => {
                "https://customer-historical-forecast-api.open-meteo.com/v1/forecast"
            }
        }
    }

    pub fn is_historical(&self) -> bool {
        matches!(
            self,
            Endpoint::HistoricalForecast | Endpoint::CustomerHistoricalForecast
        )
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.url())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 10, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_recent_window_uses_forecast_api() {
        let start = now() - Duration::hours(24);
        assert_eq!(Endpoint::select(start, now(), false), Endpoint::Forecast);
        assert_eq!(
            Endpoint::select(start, now(), true),
            Endpoint::CustomerForecast
        );
    }

    #[test]
    fn test_old_window_uses_historical_api() {
        let start = now() - Duration::days(3);
        assert_eq!(
            Endpoint::select(start, now(), false),
            Endpoint::HistoricalForecast
        );
        assert_eq!(
            Endpoint::select(start, now(), true),
            Endpoint::CustomerHistoricalForecast
        );
        assert!(Endpoint::select(start, now(), true).is_historical());
    }

    #[test]
    fn test_historical_switch_is_exactly_one_day_back() {
        let boundary = now() - Duration::days(1);
        assert_eq!(
            Endpoint::select(boundary, now(), false),
            Endpoint::Forecast
        );
        assert_eq!(
            Endpoint::select(boundary - Duration::seconds(1), now(), false),
            Endpoint::HistoricalForecast
        );
        assert_eq!(
            Endpoint::select(boundary - Duration::seconds(1), now(), true),
            Endpoint::CustomerHistoricalForecast
        );
    }

    #[test]
    fn test_urls() {
        assert_eq!(
            Endpoint::Forecast.url(),
            "https://api.open-meteo.com/v1/forecast"
        );
        assert_eq!(
            Endpoint::CustomerHistoricalForecast.to_string(),
            "https://customer-historical-forecast-api.open-meteo.com/v1/forecast"
        );
    }
}
