use chrono::{Duration, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use openmeteo::{extract_frame, interpolate_hourly, merge_frames, HourlyParam, RawTimeSeries};

fn bench_resample(c: &mut Criterion) {
    let start = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
    let end = start + Duration::days(16);
    let hours = 16 * 24;
    let names: Vec<&str> = HourlyParam::ALL.iter().map(HourlyParam::as_str).collect();

    let hourly = RawTimeSeries::new(
        start,
        end,
        3600,
        (0..names.len())
            .map(|v| (0..hours).map(|h| (v * h % 37) as f32).collect())
            .collect(),
    );
    let minutely = RawTimeSeries::new(
        start,
        end,
        900,
        vec![(0..hours * 4).map(|q| (q % 11) as f32).collect()],
    );

    let hourly = extract_frame(&hourly, &names).unwrap();
    let minutely = extract_frame(&minutely, &["precipitation"]).unwrap();
    let targets = minutely.timestamps().unwrap();

    c.bench_function("interpolate_hourly", |b| {
        b.iter(|| interpolate_hourly(black_box(&hourly), black_box(&targets)))
    });
    let interpolated = interpolate_hourly(&hourly, &targets).unwrap();
    c.bench_function("merge_frames", |b| {
        b.iter(|| merge_frames(black_box(&minutely), black_box(&interpolated)))
    });
}

criterion_group!(benches, bench_resample);
criterion_main!(benches);
