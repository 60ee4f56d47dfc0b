use approx::assert_relative_eq;
use chrono::NaiveTime;
use glucose_charts::api::{ChartFrame, ChartLayout, ScatterFrame, ScatterPoint, TrendFrame};
use glucose_charts::core::{
    DEFAULT_GLUCOSE_DOMAIN, Gender, GlucoseScale, Margin, ParticipantSummary, Sample,
    SampleSeries, TimeScale, TrendComparison, Viewport,
};
use glucose_charts::interaction::SelectionSet;
use glucose_charts::error::ChartError;

fn at(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).expect("valid time")
}

fn layout() -> ChartLayout {
    ChartLayout::new(Viewport::new(1000, 500), Margin::new(60.0, 0.0, 40.0, 60.0))
}

fn day() -> SampleSeries {
    SampleSeries::new(vec![
        Sample::new(at(8, 0), 90.0),
        Sample::new(at(9, 45), 160.0),
        Sample::new(at(10, 10), 130.0),
        Sample::new(at(12, 0), 100.0),
    ])
    .expect("sorted series")
}

#[test]
fn frame_fits_plot_area_inside_margin() {
    let frame = ChartFrame::for_series(layout(), &day(), DEFAULT_GLUCOSE_DOMAIN).expect("frame");
    let plot = frame.plot_area();
    assert_relative_eq!(plot.width, 940.0);
    assert_relative_eq!(plot.height, 400.0);
    assert_relative_eq!(frame.time_scale().width_px(), 940.0);
}

#[test]
fn pointer_inverts_to_time_and_glucose() {
    let frame = ChartFrame::for_series(layout(), &day(), DEFAULT_GLUCOSE_DOMAIN).expect("frame");
    // halfway across the plot, halfway down it
    let (time, glucose) = frame.pointer_to_domain(60.0 + 470.0, 60.0 + 200.0).expect("invert");
    assert_eq!(time, at(10, 0));
    assert_relative_eq!(glucose, 140.0, epsilon = 1e-9);
}

#[test]
fn snap_pins_to_nearest_sample_in_plot_space() {
    let frame = ChartFrame::for_series(layout(), &day(), DEFAULT_GLUCOSE_DOMAIN).expect("frame");
    let series = day();

    let snap = frame.snap_at_pixel(&series, 60.0 + 470.0).expect("snap");
    assert_eq!(snap.index, 2);
    assert_eq!(snap.sample.time, at(10, 10));

    let expected_x = frame.time_scale().time_to_pixel(at(10, 10)).expect("x");
    assert_relative_eq!(snap.x, expected_x, epsilon = 1e-9);
    assert_relative_eq!(snap.y, 200.0 * (230.0 - 130.0) / 90.0, epsilon = 1e-9);
}

#[test]
fn pointer_outside_plot_clamps_to_edge_samples() {
    let frame = ChartFrame::for_series(layout(), &day(), DEFAULT_GLUCOSE_DOMAIN).expect("frame");
    let series = day();
    assert_eq!(frame.nearest_at_pixel(&series, 0.0).expect("left").0, 0);
    assert_eq!(frame.nearest_at_pixel(&series, 1_000.0).expect("right").0, 3);
}

#[test]
fn glucose_axis_puts_higher_readings_nearer_the_top() {
    let scale = GlucoseScale::with_default_domain(400.0).expect("scale");
    assert_relative_eq!(scale.glucose_to_pixel(230.0).expect("top"), 0.0);
    assert_relative_eq!(scale.glucose_to_pixel(50.0).expect("bottom"), 400.0);

}

#[test]
fn single_sample_series_gets_a_non_degenerate_time_axis() {
    let series = SampleSeries::new(vec![Sample::new(at(7, 0), 100.0)]).expect("series");
    let scale = TimeScale::from_series(&series, 500.0).expect("scale");
    let (start, end) = scale.domain_seconds();
    assert!(end > start);
    assert_relative_eq!(scale.time_to_pixel(at(7, 0)).expect("px"), 250.0, epsilon = 1e-9);
}

#[test]
fn empty_series_has_no_frame() {
    let err = ChartFrame::for_series(layout(), &SampleSeries::default(), DEFAULT_GLUCOSE_DOMAIN)
        .expect_err("empty");
    assert!(matches!(err, ChartError::InvalidData(_)));
}

#[test]
fn margin_larger_than_viewport_is_rejected() {
    let cramped = ChartLayout::new(Viewport::new(100, 80), Margin::new(60.0, 0.0, 40.0, 60.0));
    assert!(cramped.plot_area().is_err());

    let zero = ChartLayout::new(Viewport::new(0, 80), Margin::default());
    assert!(matches!(
        zero.plot_area().expect_err("zero width"),
        ChartError::InvalidViewport { width: 0, height: 80 }
    ));
}

#[test]
fn trend_frame_maps_minutes_and_padded_glucose() {
    let series = SampleSeries::new(vec![
        Sample::new(at(7, 0), 100.0),
        Sample::new(at(7, 30), 160.0),
        Sample::new(at(8, 0), 120.0),
    ])
    .expect("sorted series");
    let comparison = TrendComparison::build([("1", &series)]).expect("comparison");
    let layout = ChartLayout::new(Viewport::new(900, 450), Margin::new(20.0, 40.0, 60.0, 90.0));
    let frame = TrendFrame::for_comparison(layout, &comparison).expect("frame");

    // plot is 770 x 370; glucose domain is [90, 170]
    let points = frame.project(&comparison.trends[0]).expect("project");
    assert_relative_eq!(points[0].0, 0.0);
    assert_relative_eq!(points[1].0, 385.0, epsilon = 1e-9);
    assert_relative_eq!(points[2].0, 770.0, epsilon = 1e-9);
    assert_relative_eq!(points[1].1, 370.0 * 10.0 / 80.0, epsilon = 1e-9);
    assert_relative_eq!(
        frame.threshold_y().expect("threshold"),
        370.0 * 30.0 / 80.0,
        epsilon = 1e-9
    );

    let (minutes, glucose) = frame
        .pointer_to_domain(90.0 + 385.0, 20.0 + 185.0)
        .expect("invert");
    assert_relative_eq!(minutes, 30.0, epsilon = 1e-9);
    assert_relative_eq!(glucose, 130.0, epsilon = 1e-9);
}

#[test]
fn trend_frame_handles_single_sample_trend() {
    let series = SampleSeries::new(vec![Sample::new(at(7, 0), 100.0)]).expect("series");
    let comparison = TrendComparison::build([("1", &series)]).expect("comparison");
    let frame = TrendFrame::for_comparison(layout(), &comparison).expect("frame");
    assert_eq!(frame.minutes_scale().domain(), (0.0, 1.0));
}

#[test]
fn scatter_frame_rounds_axes_and_projects_points() {
    let layout = ChartLayout::new(Viewport::new(600, 400), Margin::new(30.0, 30.0, 50.0, 60.0));
    let frame = ScatterFrame::for_domains(layout, ((93.4, 168.2), (11.7, 38.9))).expect("frame");
    assert_eq!(frame.mean_scale().domain(), (90.0, 170.0));
    assert_eq!(frame.std_scale().domain(), (10.0, 40.0));

    let summary = ParticipantSummary {
        participant: "1".to_owned(),
        mean_glucose: 130.0,
        std_glucose: 40.0,
        gender: Gender::Male,
        hba1c: None,
    };
    let point = ScatterPoint {
        participant: summary.participant.clone(),
        mean_glucose: summary.mean_glucose,
        std_glucose: summary.std_glucose,
        highlight: SelectionSet::empty().highlight_for(&summary),
    };
    let (x, y) = frame.point_to_plot(&point).expect("project");
    // plot is 510 x 320
    assert_relative_eq!(x, 255.0, epsilon = 1e-9);
    assert_relative_eq!(y, 0.0, epsilon = 1e-9);
}
