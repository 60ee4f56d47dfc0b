use chrono::NaiveTime;
use glucose_charts::core::{
    GlucoseZone, Sample, SampleSeries, TrendComparison, max_paired_difference, zone_for,
};
use glucose_charts::error::ChartError;

fn at(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).expect("valid time")
}

fn breakfast(start_hour: u32, readings: &[f64]) -> SampleSeries {
    let samples = readings
        .iter()
        .enumerate()
        .map(|(i, glucose)| Sample::new(at(start_hour, (i as u32) * 15), *glucose))
        .collect();
    SampleSeries::new(samples).expect("sorted series")
}

#[test]
fn trends_align_on_minutes_after_first_sample() {
    let early = breakfast(7, &[95.0, 130.0, 150.0, 120.0]);
    let late = breakfast(9, &[100.0, 170.0]);
    let comparison =
        TrendComparison::build([("1", &early), ("14", &late)]).expect("comparison");

    assert_eq!(comparison.trends.len(), 2);
    assert_eq!(comparison.trends[0].participant, "1");
    assert_eq!(comparison.trends[1].color_slot, 1);
    assert_eq!(comparison.trends[1].points, vec![(0.0, 100.0), (15.0, 170.0)]);
    assert_eq!(comparison.minutes_domain, (0.0, 45.0));
    assert_eq!(comparison.glucose_domain, (85.0, 180.0));
    assert_eq!(comparison.max_difference, Some(40.0));
}

#[test]
fn single_trend_has_no_difference() {
    let only = breakfast(8, &[110.0, 125.0]);
    let comparison = TrendComparison::build([("3", &only)]).expect("comparison");
    assert_eq!(comparison.trends.len(), 1);
    assert_eq!(comparison.max_difference, None);
}

#[test]
fn empty_inputs_are_rejected() {
    let none: [(&str, &SampleSeries); 0] = [];
    assert!(matches!(
        TrendComparison::build(none).expect_err("no series"),
        ChartError::InvalidInput(_)
    ));

    let empty = SampleSeries::default();
    let full = breakfast(8, &[110.0]);
    assert!(TrendComparison::build([("1", &full), ("2", &empty)]).is_err());
}

#[test]
fn paired_difference_is_positional_over_common_prefix() {
    let left = breakfast(7, &[100.0, 180.0, 90.0]);
    let right = breakfast(10, &[120.0, 130.0]);
    assert_eq!(max_paired_difference(&left, &right), Some(50.0));
    assert_eq!(max_paired_difference(&left, &SampleSeries::default()), None);
}

#[test]
fn zones_cover_the_shaded_bands() {
    assert_eq!(zone_for(65.0), None);
    assert_eq!(zone_for(85.0), Some(GlucoseZone::Normal));
    assert_eq!(zone_for(99.5), Some(GlucoseZone::Elevated));
    assert_eq!(zone_for(126.0), Some(GlucoseZone::High));
    assert_eq!(zone_for(231.0), None);
}
