use crate::types::station_frame::{StationFrame, DATETIME_COLUMN};
use crate::weather_data::error::WeatherDataError;
use log::debug;
use polars::prelude::*;

/// Suffix the join gives to hourly columns that collide with a minutely_15 column.
const DUPLICATE_SUFFIX: &str = "_duplicate";

/// Left-joins interpolated hourly columns onto a 15-minute frame on `datetime`.
///
/// A column present in both frames is taken from `minutely`; the hourly duplicate
/// is dropped. An interpolated frame without rows, or a `minutely` frame without
/// columns, leaves `minutely` unchanged.
///
/// # Errors
///
/// Returns [`WeatherDataError::GridAlignment`] if either frame repeats a timestamp
/// or the joined frame does not have one row per `minutely` row.
pub fn merge_frames(
    minutely: &StationFrame,
    interpolated: &StationFrame,
) -> Result<StationFrame, WeatherDataError> {
    if interpolated.is_empty() || minutely.frame.width() == 0 {
        return Ok(minutely.clone());
    }
    minutely.ensure_unique_timestamps()?;
    interpolated.ensure_unique_timestamps()?;

    let mut args = JoinArgs::new(JoinType::Left).with_suffix(Some(DUPLICATE_SUFFIX.into()));
    args.maintain_order = MaintainOrderJoin::Left;
    let joined = minutely.frame.join(
        &interpolated.frame,
        [DATETIME_COLUMN],
        [DATETIME_COLUMN],
        args,
        None,
    )?;

    let existing = minutely.column_names();
    let duplicates: Vec<String> = interpolated
        .value_column_names()
        .into_iter()
        .filter(|name| existing.contains(name))
        .map(|name| {
            debug!("Keeping minutely_15 '{}' over interpolated hourly duplicate", name);
            format!("{name}{DUPLICATE_SUFFIX}")
        })
        .collect();
    let merged = joined.drop_many(duplicates);

    if merged.height() != minutely.height() {
        return Err(WeatherDataError::misaligned(format!(
            "join produced {} rows for {} minutely_15 rows",
            merged.height(),
            minutely.height()
        )));
    }
    Ok(StationFrame::new(merged))
}

/// Stacks frames vertically, in order.
///
/// The result has the union of all columns in first-seen order; a frame lacking
/// a column contributes nulls for it. Frames without columns are skipped.
pub fn concat_frames(frames: &[StationFrame]) -> Result<StationFrame, WeatherDataError> {
    let inputs: Vec<LazyFrame> = frames
        .iter()
        .filter(|f| f.frame.width() > 0)
        .map(|f| f.frame.clone().lazy())
        .collect();
    if inputs.is_empty() {
        return Ok(StationFrame::empty());
    }

    let args = UnionArgs {
        rechunk: true,
        ..Default::default()
    };
    let combined = concat_lf_diagonal(inputs, args)?.collect()?;
    Ok(StationFrame::new(combined))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};

    fn ms(hour: u32, minute: u32) -> i64 {
        Utc.with_ymd_and_hms(2025, 6, 1, hour, minute, 0)
            .unwrap()
            .timestamp_millis()
    }

    fn frame(millis: Vec<i64>, columns: &[(&str, Vec<Option<f64>>)]) -> StationFrame {
        let columns = columns
            .iter()
            .map(|(name, values)| (name.to_string(), values.clone()))
            .collect();
        StationFrame::from_parts(millis, columns).unwrap()
    }

    fn minutely() -> StationFrame {
        frame(
            vec![ms(9, 0), ms(9, 15), ms(9, 30)],
            &[
                ("temperature_2m", vec![Some(20.1), Some(20.4), Some(21.2)]),
                ("rain", vec![Some(0.0), None, Some(0.2)]),
            ],
        )
    }

    #[test]
    fn test_merge_with_empty_interpolated_is_identity() {
        let left = minutely();
        let merged = merge_frames(&left, &StationFrame::empty()).unwrap();
        assert!(merged.frame.equals_missing(&left.frame));
    }

    #[test]
    fn test_merge_keeps_minutely_value_on_collision() {
        let interpolated = frame(
            vec![ms(9, 0), ms(9, 15), ms(9, 30)],
            &[
                ("temperature_2m", vec![Some(99.0), Some(99.0), Some(99.0)]),
                ("cloud_cover", vec![Some(10.0), Some(12.5), Some(15.0)]),
            ],
        );

        let merged = merge_frames(&minutely(), &interpolated).unwrap();

        assert_eq!(
            merged.column_names(),
            ["datetime", "temperature_2m", "rain", "cloud_cover"]
        );
        assert_eq!(
            merged.values("temperature_2m").unwrap(),
            vec![Some(20.1), Some(20.4), Some(21.2)]
        );
        assert_eq!(
            merged.values("cloud_cover").unwrap(),
            vec![Some(10.0), Some(12.5), Some(15.0)]
        );
        assert!(!merged
            .column_names()
            .iter()
            .any(|name| name.ends_with("_duplicate") || name.ends_with("_right")));
    }

    #[test]
    fn test_merge_is_a_left_join() {
        let interpolated = frame(
            vec![ms(9, 15), ms(9, 30), ms(9, 45)],
            &[("cloud_cover", vec![Some(1.0), Some(2.0), Some(3.0)])],
        );

        let merged = merge_frames(&minutely(), &interpolated).unwrap();

        assert_eq!(merged.height(), 3);
        assert_eq!(
            merged.values("cloud_cover").unwrap(),
            vec![None, Some(1.0), Some(2.0)]
        );
    }

    #[test]
    fn test_merge_rejects_duplicate_timestamps() {
        let duplicated = frame(
            vec![ms(9, 0), ms(9, 0), ms(9, 30)],
            &[("cloud_cover", vec![Some(1.0), Some(2.0), Some(3.0)])],
        );

        let err = merge_frames(&minutely(), &duplicated).unwrap_err();
        assert!(matches!(err, WeatherDataError::GridAlignment { .. }));

        let err = merge_frames(&duplicated, &minutely()).unwrap_err();
        assert!(matches!(err, WeatherDataError::GridAlignment { .. }));
    }

    #[test]
    fn test_concat_unions_columns_and_keeps_order() {
        let first = minutely();
        let second = frame(
            vec![ms(10, 0), ms(11, 0)],
            &[
                ("temperature_2m", vec![Some(23.0), Some(24.0)]),
                ("cloud_cover", vec![Some(50.0), None]),
            ],
        );

        let combined =
            concat_frames(&[first.clone(), StationFrame::empty(), second.clone()]).unwrap();

        assert_eq!(combined.height(), first.height() + second.height());
        assert_eq!(
            combined.column_names(),
            ["datetime", "temperature_2m", "rain", "cloud_cover"]
        );
        assert_eq!(
            combined.values("temperature_2m").unwrap(),
            vec![Some(20.1), Some(20.4), Some(21.2), Some(23.0), Some(24.0)]
        );
        assert_eq!(
            combined.values("rain").unwrap(),
            vec![Some(0.0), None, Some(0.2), None, None]
        );
        let expected: Vec<DateTime<Utc>> = first
            .timestamps()
            .unwrap()
            .into_iter()
            .chain(second.timestamps().unwrap())
            .collect();
        assert_eq!(combined.timestamps().unwrap(), expected);
    }

    #[test]
    fn test_merge_onto_frame_without_columns_keeps_it() {
        let interpolated = frame(
            vec![ms(9, 0), ms(9, 15)],
            &[("cloud_cover", vec![Some(1.0), Some(2.0)])],
        );

        let merged = merge_frames(&StationFrame::empty(), &interpolated).unwrap();
        assert!(merged.column_names().is_empty());
        assert!(merged.is_empty());
    }

    #[test]
    fn test_concat_of_many_frames_is_a_single_chunk() {
        let frames: Vec<StationFrame> = (0..50)
            .map(|i| {
                frame(
                    vec![ms(i / 4, (i % 4) * 15)],
                    &[("rain", vec![Some(f64::from(i))])],
                )
            })
            .collect();

        let combined = concat_frames(&frames).unwrap();
        assert_eq!(combined.height(), 50);
        assert_eq!(combined.frame.max_n_chunks(), 1);
        assert_eq!(combined.values("rain").unwrap()[49], Some(49.0));
    }

    #[test]
    fn test_concat_of_nothing_is_empty() {
        assert!(concat_frames(&[]).unwrap().is_empty());
    }
}
