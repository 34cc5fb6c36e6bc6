use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ghcn_snod::models::{ObservationRecord, StationRecord};
use ghcn_snod::processors::{Densifier, MaskFilter, MaskMode, OutputAssembler};

// Create a catalog and one day of reports covering roughly a third of it
fn create_test_data(station_count: usize, date: NaiveDate) -> (Vec<StationRecord>, Vec<ObservationRecord>) {
    let mut stations = Vec::with_capacity(station_count);
    let mut observations = Vec::new();
    let previous_day = date.pred_opt().unwrap();

    for i in 0..station_count {
        let id = format!("USC{:08}", i);
        stations.push(StationRecord::new(
            id.clone(),
            25.0 + (i % 2500) as f64 * 0.01,
            -125.0 + (i % 6000) as f64 * 0.01,
            (i % 3000) as f64,
        ));

        if i % 3 == 0 {
            observations.push(ObservationRecord::new(
                id.clone(),
                date,
                "SNWD".to_string(),
                Some((i % 500) as f64),
            ));
        }
        observations.push(ObservationRecord::new(
            id,
            previous_day,
            "SNWD".to_string(),
            Some(10.0),
        ));
    }

    (stations, observations)
}

fn benchmark_densifier(c: &mut Criterion) {
    let date = NaiveDate::from_ymd_opt(2022, 1, 1).unwrap();
    let mut group = c.benchmark_group("densify");

    for station_count in [1_000, 10_000, 100_000] {
        let (stations, observations) = create_test_data(station_count, date);
        let densifier = Densifier::new();

        group.bench_with_input(
            BenchmarkId::from_parameter(station_count),
            &station_count,
            |b, _| {
                b.iter(|| {
                    densifier
                        .densify(black_box(&stations), black_box(&observations), date)
                        .unwrap()
                })
            },
        );
    }

    group.finish();
}

fn benchmark_mask_and_assemble(c: &mut Criterion) {
    let date = NaiveDate::from_ymd_opt(2022, 1, 1).unwrap();
    let (stations, observations) = create_test_data(100_000, date);
    let records = Densifier::new().densify(&stations, &observations, date).unwrap();

    c.bench_function("maskout_and_assemble", |b| {
        b.iter(|| {
            let masked = MaskFilter::new(MaskMode::MaskOut).apply(black_box(records.clone()));
            OutputAssembler::new().assemble(&masked)
        })
    });
}

criterion_group!(benches, benchmark_densifier, benchmark_mask_and_assemble);
criterion_main!(benches);
