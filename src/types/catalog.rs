//! Static catalogs of the variables and forecast models Open-Meteo serves.
//!
//! Every catalog is a closed enum with an `ALL` slice, a provider identifier per
//! variant (`as_str`) and a `FromStr` implementation that rejects unknown names
//! with a [`ConfigurationError`].

use crate::config::error::ConfigurationError;
use std::fmt;
use std::str::FromStr;

macro_rules! catalog {
    (
        $(#[$meta:meta])*
        $name:ident, $unknown:path {
            $($variant:ident => $value:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            /// Every entry of the catalog, in catalog order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The identifier the provider uses for this entry.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $value),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ConfigurationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $name::ALL
                    .iter()
                    .copied()
                    .find(|entry| entry.as_str() == s)
                    .ok_or_else(|| $unknown(s.to_string()))
            }
        }
    };
}

catalog! {
    /// Variables available at a 15-minute resolution.
    Minutely15Param, ConfigurationError::UnknownMinutely15Parameter {
        Temperature2m => "temperature_2m",
        RelativeHumidity2m => "relative_humidity_2m",
        DewPoint2m => "dew_point_2m",
        ApparentTemperature => "apparent_temperature",
        Precipitation => "precipitation",
        Rain => "rain",
        Snowfall => "snowfall",
        SnowfallHeight => "snowfall_height",
        FreezingLevelHeight => "freezing_level_height",
        SunshineDuration => "sunshine_duration",
        WeatherCode => "weather_code",
        WindSpeed10m => "wind_speed_10m",
        WindSpeed80m => "wind_speed_80m",
        WindDirection10m => "wind_direction_10m",
        WindDirection80m => "wind_direction_80m",
        WindGusts10m => "wind_gusts_10m",
        Visibility => "visibility",
        Cape => "cape",
        IsDay => "is_day",
        GlobalTiltedIrradiance => "global_tilted_irradiance",
        ShortwaveRadiation => "shortwave_radiation",
        DirectNormalIrradiance => "direct_normal_irradiance",
        DirectRadiation => "direct_radiation",
        DiffuseRadiation => "diffuse_radiation",
        TerrestrialRadiation => "terrestrial_radiation",
    }
}

catalog! {
    /// Variables available at an hourly resolution.
    HourlyParam, ConfigurationError::UnknownHourlyParameter {
        RelativeHumidity2m => "relative_humidity_2m",
        DewPoint2m => "dew_point_2m",
        ApparentTemperature => "apparent_temperature",
        Precipitation => "precipitation",
        Rain => "rain",
        Showers => "showers",
        Snowfall => "snowfall",
        SnowDepth => "snow_depth",
        WeatherCode => "weather_code",
        PressureMsl => "pressure_msl",
        SurfacePressure => "surface_pressure",
        CloudCover => "cloud_cover",
        CloudCoverLow => "cloud_cover_low",
        CloudCoverMid => "cloud_cover_mid",
        CloudCoverHigh => "cloud_cover_high",
        Visibility => "visibility",
        WindSpeed10m => "wind_speed_10m",
        WindSpeed80m => "wind_speed_80m",
        WindSpeed120m => "wind_speed_120m",
        WindSpeed180m => "wind_speed_180m",
        WindDirection10m => "wind_direction_10m",
        WindDirection80m => "wind_direction_80m",
        WindDirection120m => "wind_direction_120m",
        WindDirection180m => "wind_direction_180m",
        WindGusts10m => "wind_gusts_10m",
        Temperature2m => "temperature_2m",
        Temperature80m => "temperature_80m",
        Temperature120m => "temperature_120m",
        Temperature180m => "temperature_180m",
        SoilTemperature0cm => "soil_temperature_0cm",
        SoilMoisture0To1cm => "soil_moisture_0_to_1cm",
        UvIndex => "uv_index",
        UvIndexClearSky => "uv_index_clear_sky",
        SunshineDuration => "sunshine_duration",
        Cape => "cape",
        GlobalTiltedIrradiance => "global_tilted_irradiance",
        ShortwaveRadiation => "shortwave_radiation",
        DirectNormalIrradiance => "direct_normal_irradiance",
        DirectRadiation => "direct_radiation",
        DiffuseRadiation => "diffuse_radiation",
        TerrestrialRadiation => "terrestrial_radiation",
        Evapotranspiration => "evapotranspiration",
        VapourPressureDeficit => "vapour_pressure_deficit",
    }
}

catalog! {
    /// Forecast models that can be requested. `best_match` lets the provider pick.
    ForecastModel, ConfigurationError::UnknownModel {
        BestMatch => "best_match",
        EcmwfIfs04 => "ecmwf_ifs04",
        EcmwfIfs025 => "ecmwf_ifs025",
        EcmwfAifs025 => "ecmwf_aifs025",
        CmaGrapesGlobal => "cma_grapes_global",
        BomAccessGlobal => "bom_access_global",
        GfsSeamless => "gfs_seamless",
        GfsGlobal => "gfs_global",
        GfsHrrr => "gfs_hrrr",
        GfsGraphcast025 => "gfs_graphcast025",
        JmaSeamless => "jma_seamless",
        JmaMsm => "jma_msm",
        JmaGsm => "jma_gsm",
        IconSeamless => "icon_seamless",
        IconGlobal => "icon_global",
        IconEu => "icon_eu",
        IconD2 => "icon_d2",
        GemSeamless => "gem_seamless",
        GemGlobal => "gem_global",
        GemRegional => "gem_regional",
        GemHrdpsContinental => "gem_hrdps_continental",
        MeteofranceSeamless => "meteofrance_seamless",
        MeteofranceArpegeWorld => "meteofrance_arpege_world",
        MeteofranceArpegeEurope => "meteofrance_arpege_europe",
        MeteofranceAromeFrance => "meteofrance_arome_france",
        MeteofranceAromeFranceHd => "meteofrance_arome_france_hd",
        ArpaeCosmoSeamless => "arpae_cosmo_seamless",
        ArpaeCosmo2i => "arpae_cosmo_2i",
        ArpaeCosmo2iRuc => "arpae_cosmo_2i_ruc",
        ArpaeCosmo5m => "arpae_cosmo_5m",
        MetnoSeamless => "metno_seamless",
        MetnoNordic => "metno_nordic",
        KnmiSeamless => "knmi_seamless",
        KnmiHarmonieAromeEurope => "knmi_harmonie_arome_europe",
        KnmiHarmonieAromeNetherlands => "knmi_harmonie_arome_netherlands",
        DmiSeamless => "dmi_seamless",
        DmiHarmonieAromeEurope => "dmi_harmonie_arome_europe",
        UkmoSeamless => "ukmo_seamless",
        UkmoGlobalDeterministic10km => "ukmo_global_deterministic_10km",
        UkmoUkDeterministic2km => "ukmo_uk_deterministic_2km",
    }
}

impl Default for ForecastModel {
    fn default() -> Self {
        ForecastModel::BestMatch
    }
}

/// Parses a list of provider identifiers into catalog entries, failing on the first unknown one.
pub fn parse_params<T>(names: &[impl AsRef<str>]) -> Result<Vec<T>, ConfigurationError>
where
    T: FromStr<Err = ConfigurationError>,
{
    names.iter().map(|name| name.as_ref().parse()).collect()
}
