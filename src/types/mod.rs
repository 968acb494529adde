pub mod cadence;
pub mod catalog;
pub mod station;
pub mod station_frame;
pub mod time_series;
