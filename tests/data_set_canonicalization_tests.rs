use chrono::NaiveTime;
use glucose_charts::core::{FoodLog, Sample, SampleSeries};

fn at(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).expect("valid time")
}

#[test]
fn canonicalize_sorts_and_keeps_last_duplicate() {
    let series = SampleSeries::canonicalize(vec![
        Sample::new(at(9, 0), 130.0),
        Sample::new(at(7, 0), 90.0),
        Sample::new(at(8, 0), 110.0),
        Sample::new(at(8, 0), 115.0),
        Sample::new(at(7, 0), 95.0),
    ]);

    let glucose: Vec<f64> = series.iter().map(|sample| sample.glucose).collect();
    assert_eq!(series.len(), 3);
    assert_eq!(glucose, vec![95.0, 115.0, 130.0]);
    assert_eq!(series.time_extent(), Some((at(7, 0), at(9, 0))));
}

#[test]
fn canonicalize_filters_non_finite_readings() {
    let series = SampleSeries::canonicalize(vec![
        Sample::new(at(7, 0), f64::NAN),
        Sample::new(at(7, 5), f64::INFINITY),
        Sample::new(at(7, 10), 101.0),
    ]);

    assert_eq!(series.len(), 1);
    assert_eq!(series.samples()[0], Sample::new(at(7, 10), 101.0));
}

#[test]
fn canonical_series_is_accepted_by_the_strict_constructor() {
    let canonical = SampleSeries::canonicalize(vec![
        Sample::new(at(10, 0), 140.0),
        Sample::new(at(6, 30), 85.0),
    ]);
    let strict = SampleSeries::new(canonical.samples().to_vec()).expect("sorted");
    assert_eq!(strict, canonical);
}

#[test]
fn minutes_after_first_aligns_to_series_start() {
    let series = SampleSeries::canonicalize(vec![
        Sample::new(at(8, 0), 100.0),
        Sample::new(at(8, 5), 112.0),
        Sample::new(at(9, 30), 98.0),
    ]);

    assert_eq!(
        series.minutes_after_first(),
        vec![(0.0, 100.0), (5.0, 112.0), (90.0, 98.0)]
    );
    assert!(SampleSeries::default().minutes_after_first().is_empty());
}

#[test]
fn canonicalize_merges_food_across_duplicate_times() {
    let series = SampleSeries::canonicalize(vec![
        Sample::new(at(8, 0), 100.0).with_food(FoodLog::new("Toast")),
        Sample::new(at(8, 0), 101.0),
        Sample::new(at(9, 0), 110.0),
        Sample::new(at(9, 0), 112.0).with_food(FoodLog::new("Apple")),
        Sample::new(at(10, 0), 95.0).with_food(FoodLog::new("Rice")),
        Sample::new(at(10, 0), 96.0).with_food(FoodLog::new("Beans")),
    ]);

    let meals: Vec<(f64, &str)> = series
        .iter()
        .map(|sample| {
            let name = sample.food.as_ref().map_or("", |food| food.name.as_str());
            (sample.glucose, name)
        })
        .collect();
    assert_eq!(
        meals,
        vec![(101.0, "Toast"), (112.0, "Apple"), (96.0, "Beans")]
    );
}
