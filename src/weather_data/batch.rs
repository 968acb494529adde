use crate::types::station_frame::StationFrame;
use crate::weather_data::error::BatchProcessingError;
use chrono::{DateTime, Utc};

/// Frames produced by a batch.
#[derive(Debug, Clone)]
pub enum BatchFrames {
    /// One entry per requested station, in request order. `None` marks a failed station.
    PerStation(Vec<Option<StationFrame>>),
    /// All station frames stacked in station order.
    Merged(StationFrame),
}

/// Row counts and station tallies of one batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// Sum of the row counts of every produced station frame.
    pub rows_before_concat: usize,
    /// Height of the merged frame, or `rows_before_concat` when not merging.
    pub rows_after_concat: usize,
    pub stations_loaded: usize,
    pub stations_failed: usize,
}

#[derive(Debug)]
pub struct BatchResult {
    pub frames: BatchFrames,
    pub summary: BatchSummary,
    /// Stations that were skipped, with the stage they failed in.
    pub failures: Vec<BatchProcessingError>,
}

impl BatchResult {
    /// The merged frame, if the batch was concatenated.
    pub fn merged(&self) -> Option<&StationFrame> {
        match &self.frames {
            BatchFrames::Merged(frame) => Some(frame),
            BatchFrames::PerStation(_) => None,
        }
    }

    /// Per-station frames, if the batch was not concatenated.
    pub fn per_station(&self) -> Option<&[Option<StationFrame>]> {
        match &self.frames {
            BatchFrames::PerStation(frames) => Some(frames),
            BatchFrames::Merged(_) => None,
        }
    }
}

/// Result of [`crate::OpenMeteo::load_data`] once configuration is valid.
#[derive(Debug)]
pub enum BatchOutcome {
    Loaded(BatchResult),
    /// Nothing usable was produced; carries what went wrong.
    NoResult(Vec<BatchProcessingError>),
}

impl BatchOutcome {
    pub fn is_loaded(&self) -> bool {
        matches!(self, BatchOutcome::Loaded(_))
    }

    pub fn result(&self) -> Option<&BatchResult> {
        match self {
            BatchOutcome::Loaded(result) => Some(result),
            BatchOutcome::NoResult(_) => None,
        }
    }

    pub fn into_result(self) -> Option<BatchResult> {
        match self {
            BatchOutcome::Loaded(result) => Some(result),
            BatchOutcome::NoResult(_) => None,
        }
    }

    /// Failures recorded for this batch, whether or not anything loaded.
    pub fn failures(&self) -> &[BatchProcessingError] {
        match self {
            BatchOutcome::Loaded(result) => &result.failures,
            BatchOutcome::NoResult(failures) => failures,
        }
    }
}
