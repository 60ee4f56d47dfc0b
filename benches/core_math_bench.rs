use chrono::NaiveTime;
use criterion::{Criterion, criterion_group, criterion_main};
use glucose_charts::api::{ChartFrame, ChartLayout};
use glucose_charts::core::{
    DEFAULT_GLUCOSE_DOMAIN, Margin, Sample, SampleSeries, TrendComparison, Viewport,
};
use glucose_charts::data::parse_series_json;
use glucose_charts::interaction::SelectionSet;
use std::hint::black_box;

fn day_series(len: u32) -> SampleSeries {
    let step = 86_000 / len;
    let samples = (0..len)
        .map(|i| {
            let time = NaiveTime::from_num_seconds_from_midnight_opt(i * step, 0)
                .expect("valid generated time");
            Sample::new(time, 90.0 + f64::from(i % 120))
        })
        .collect();
    SampleSeries::new(samples).expect("sorted generated series")
}

fn bench_nearest_lookup_10k(c: &mut Criterion) {
    let series = day_series(10_000);
    let queries: Vec<NaiveTime> = (0..256)
        .map(|i| {
            NaiveTime::from_num_seconds_from_midnight_opt(i * 337, 0).expect("valid query")
        })
        .collect();

    c.bench_function("nearest_lookup_10k", |b| {
        b.iter(|| {
            for query in &queries {
                let _ = series.nearest_index(black_box(*query)).expect("lookup");
            }
        })
    });
}

fn bench_hover_snap_10k(c: &mut Criterion) {
    let series = day_series(10_000);
    let layout = ChartLayout::new(Viewport::new(1000, 500), Margin::default());
    let frame =
        ChartFrame::for_series(layout, &series, DEFAULT_GLUCOSE_DOMAIN).expect("frame");

    c.bench_function("hover_snap_10k", |b| {
        b.iter(|| {
            let _ = frame
                .snap_at_pixel(black_box(&series), black_box(517.0))
                .expect("snap");
        })
    });
}

fn bench_selection_toggle(c: &mut Criterion) {
    let clicks = ["1", "14", "22", "1", "22", "abc", "14"];

    c.bench_function("selection_toggle_sequence", |b| {
        b.iter(|| {
            let mut set = SelectionSet::empty();
            for id in clicks {
                let _ = set.toggle(black_box(id));
            }
            set
        })
    });
}

fn bench_trend_comparison_2x500(c: &mut Criterion) {
    let left = day_series(500);
    let right = day_series(480);

    c.bench_function("trend_comparison_2x500", |b| {
        b.iter(|| {
            let _ = TrendComparison::build([("1", black_box(&left)), ("14", black_box(&right))])
                .expect("comparison");
        })
    });
}

fn bench_series_json_parse_2k(c: &mut Criterion) {
    let records: Vec<String> = (0..2_000)
        .map(|i| {
            format!(
                r#"{{"time":"{:02}:{:02}:{:02}","glucose":{}}}"#,
                (i * 40) / 3600,
                ((i * 40) / 60) % 60,
                (i * 40) % 60,
                90 + i % 100
            )
        })
        .collect();
    let input = format!("[{}]", records.join(","));

    c.bench_function("series_json_parse_2k", |b| {
        b.iter(|| {
            let _ = parse_series_json(black_box(&input)).expect("parse");
        })
    });
}

criterion_group!(
    benches,
    bench_nearest_lookup_10k,
    bench_hover_snap_10k,
    bench_selection_toggle,
    bench_trend_comparison_2x500,
    bench_series_json_parse_2k
);
criterion_main!(benches);
