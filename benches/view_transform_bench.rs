use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use tips_dash::api::{ControlChanged, ControlId, RawControlValue};
use tips_dash::core::{Dataset, DeviationKind, Dimension, NormalRange, NumericColumn};
use tips_dash::views::histogram_panels;
use tips_dash::{Dashboard, DashboardConfig};

const TIPS_CSV: &str = include_str!("../tests/fixtures/tips.csv");

fn tips() -> Dataset {
    Dataset::from_csv_reader(TIPS_CSV.as_bytes()).expect("fixture loads")
}

fn bench_csv_load(c: &mut Criterion) {
    c.bench_function("csv_load_244", |b| {
        b.iter(|| {
            let _ = Dataset::from_csv_reader(black_box(TIPS_CSV.as_bytes())).expect("load");
        })
    });
}

fn bench_histogram_partition(c: &mut Criterion) {
    let dataset = tips();
    let range = NormalRange::for_column(&dataset, NumericColumn::TotalBill, DeviationKind::Sample)
        .expect("range");

    c.bench_function("histogram_partition_day", |b| {
        b.iter(|| {
            let _ = histogram_panels(
                black_box(&dataset),
                NumericColumn::TotalBill,
                Dimension::Day,
                black_box(range),
            )
            .expect("panels");
        })
    });
}

fn bench_render_all(c: &mut Criterion) {
    let dataset = tips();
    let dashboard = Dashboard::new(&dataset, DashboardConfig::default()).expect("dashboard");

    c.bench_function("render_all_views", |b| {
        b.iter(|| {
            let _ = black_box(&dashboard).render_all().expect("render");
        })
    });
}

fn bench_range_dispatch_json(c: &mut Criterion) {
    let dataset = tips();
    let mut dashboard = Dashboard::new(&dataset, DashboardConfig::default()).expect("dashboard");
    let event = ControlChanged::new(ControlId::TotalBillRange, RawControlValue::Pair([10.0, 30.0]));

    c.bench_function("range_dispatch_json_contract", |b| {
        b.iter(|| {
            let outcome = dashboard.handle(black_box(&event)).expect("dispatch");
            let _ = outcome.to_json_contract_v1_pretty().expect("json");
        })
    });
}

criterion_group!(
    benches,
    bench_csv_load,
    bench_histogram_partition,
    bench_render_all,
    bench_range_dispatch_json
);
criterion_main!(benches);
