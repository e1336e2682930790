use chrono::{Duration, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use runtrace::series::elevation::gain_from_altitudes;
use runtrace::{derive_activity, slice_window, RawSample, SessionSummary};

/// Benchmarks for the derivation engine
///
/// Sample counts cover a short interval session up to a multi-hour
/// recording at one sample per second.

fn bench_derive_activity(c: &mut Criterion) {
    let mut group = c.benchmark_group("Derive Activity");

    for &size in &[600, 3_600, 18_000] {
        let samples = create_recorded_samples(size);

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(
            BenchmarkId::new("recorded_distance", size),
            &samples,
            |b, samples| {
                b.iter(|| derive_activity(black_box(samples), None));
            },
        );
    }

    group.finish();
}

fn bench_speed_integration(c: &mut Criterion) {
    let mut group = c.benchmark_group("Speed Integration");

    for &size in &[600, 3_600, 18_000] {
        let samples = create_speed_only_samples(size);
        let session = SessionSummary {
            total_ascent: Some(420.0),
            ..Default::default()
        };

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(
            BenchmarkId::new("speed_only", size),
            &samples,
            |b, samples| {
                b.iter(|| derive_activity(black_box(samples), Some(&session)));
            },
        );
    }

    group.finish();
}

fn bench_elevation_gain(c: &mut Criterion) {
    let altitudes: Vec<Option<f64>> = create_recorded_samples(18_000)
        .iter()
        .map(|s| s.altitude)
        .collect();

    c.bench_function("gain_from_altitudes_18000", |b| {
        b.iter(|| gain_from_altitudes(black_box(altitudes.iter().copied())));
    });
}

fn bench_zoom_slicing(c: &mut Criterion) {
    let derived = derive_activity(&create_recorded_samples(18_000), None);
    let chart = &derived.series.chart;

    c.bench_function("slice_window_sweep", |b| {
        b.iter(|| {
            let mut total = 0;
            for position in (0..=100).step_by(5) {
                total += slice_window(black_box(chart), 25.0, position as f64).len();
            }
            total
        });
    });
}

fn create_recorded_samples(count: usize) -> Vec<RawSample> {
    let start = Utc.with_ymd_and_hms(2024, 5, 1, 7, 0, 0).unwrap();
    (0..count)
        .map(|i| {
            let t = i as f64;
            RawSample::default()
                .with_distance(t * 3.1)
                .with_speed(3.0 + (t / 60.0).sin() * 0.5)
                .with_altitude(120.0 + (t / 300.0).sin() * 35.0)
                .with_heart_rate(140 + (i % 30) as u16)
                .with_timestamp(start + Duration::seconds(i as i64))
        })
        .collect()
}

fn create_speed_only_samples(count: usize) -> Vec<RawSample> {
    (0..count)
        .map(|i| RawSample::default().with_speed(2.5 + (i % 10) as f64 * 0.1))
        .collect()
}

criterion_group!(
    benches,
    bench_derive_activity,
    bench_speed_integration,
    bench_elevation_gain,
    bench_zoom_slicing
);
criterion_main!(benches);
