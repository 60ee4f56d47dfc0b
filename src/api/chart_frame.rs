use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::core::{
    AlignedTrend, GlucoseScale, LinearScale, POSTPRANDIAL_THRESHOLD_MG_DL, PlotArea, Sample,
    SampleSeries, TimeScale, TrendComparison, nice_domain,
};
use crate::error::ChartResult;
use crate::interaction::HoverSnap;

use super::{ChartLayout, ScatterPoint};

/// Approximate tick count the scatter axes are rounded to.
const SCATTER_TICKS: usize = 10;

/// Scales of one time-of-day chart, fitted to a series.
///
/// Pointer coordinates are surface-relative; the margin inset is removed
/// before inverting. Projected coordinates are plot-relative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartFrame {
    layout: ChartLayout,
    plot: PlotArea,
    time_scale: TimeScale,
    glucose_scale: GlucoseScale,
}

impl ChartFrame {
    pub fn for_series(
        layout: ChartLayout,
        series: &SampleSeries,
        glucose_domain: (f64, f64),
    ) -> ChartResult<Self> {
        let plot = layout.plot_area()?;
        let time_scale = TimeScale::from_series(series, plot.width)?;
        let glucose_scale = GlucoseScale::new(glucose_domain.0, glucose_domain.1, plot.height)?;
        Ok(Self {
            layout,
            plot,
            time_scale,
            glucose_scale,
        })
    }

    #[must_use]
    pub fn layout(&self) -> ChartLayout {
        self.layout
    }

    #[must_use]
    pub fn plot_area(&self) -> PlotArea {
        self.plot
    }

    #[must_use]
    pub fn time_scale(&self) -> TimeScale {
        self.time_scale
    }

    #[must_use]
    pub fn glucose_scale(&self) -> GlucoseScale {
        self.glucose_scale
    }

    pub fn pointer_to_domain(&self, pointer_x: f64, pointer_y: f64) -> ChartResult<(NaiveTime, f64)> {
        let time = self
            .time_scale
            .pixel_to_time(pointer_x - self.layout.margin.left)?;
        let glucose = self
            .glucose_scale
            .pixel_to_glucose(pointer_y - self.layout.margin.top)?;
        Ok((time, glucose))
    }

    pub fn sample_to_plot(&self, sample: &Sample) -> ChartResult<(f64, f64)> {
        Ok((
            self.time_scale.time_to_pixel(sample.time)?,
            self.glucose_scale.glucose_to_pixel(sample.glucose)?,
        ))
    }

    /// Nearest sample to the time under `pointer_x`.
    pub fn nearest_at_pixel<'s>(
        &self,
        series: &'s SampleSeries,
        pointer_x: f64,
    ) -> ChartResult<(usize, &'s Sample)> {
        let query = self
            .time_scale
            .pixel_to_time(pointer_x - self.layout.margin.left)?;
        let index = series.nearest_index(query)?;
        Ok((index, &series.samples()[index]))
    }

    pub fn snap_at_pixel(&self, series: &SampleSeries, pointer_x: f64) -> ChartResult<HoverSnap> {
        let (index, sample) = self.nearest_at_pixel(series, pointer_x)?;
        let (x, y) = self.sample_to_plot(sample)?;
        Ok(HoverSnap {
            index,
            x,
            y,
            sample: sample.clone(),
        })
    }
}

/// Scales of the breakfast trend overlay: minutes after the first sample on
/// x, padded glucose on y.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendFrame {
    layout: ChartLayout,
    plot: PlotArea,
    minutes_scale: LinearScale,
    glucose_scale: GlucoseScale,
}

impl TrendFrame {
    pub fn for_comparison(layout: ChartLayout, comparison: &TrendComparison) -> ChartResult<Self> {
        let plot = layout.plot_area()?;
        let (_, last_minute) = comparison.minutes_domain;
        // one-sample trends still get a unit-wide axis
        let minutes_scale = LinearScale::with_range(0.0, last_minute.max(1.0), 0.0, plot.width)?;
        let (glucose_min, glucose_max) = comparison.glucose_domain;
        let glucose_scale = GlucoseScale::new(glucose_min, glucose_max, plot.height)?;
        Ok(Self {
            layout,
            plot,
            minutes_scale,
            glucose_scale,
        })
    }

    #[must_use]
    pub fn layout(&self) -> ChartLayout {
        self.layout
    }

    #[must_use]
    pub fn plot_area(&self) -> PlotArea {
        self.plot
    }

    #[must_use]
    pub fn minutes_scale(&self) -> LinearScale {
        self.minutes_scale
    }

    #[must_use]
    pub fn glucose_scale(&self) -> GlucoseScale {
        self.glucose_scale
    }

    /// Plot-space polyline of one trend.
    pub fn project(&self, trend: &AlignedTrend) -> ChartResult<Vec<(f64, f64)>> {
        trend
            .points
            .iter()
            .map(|&(minutes, glucose)| -> ChartResult<(f64, f64)> {
                Ok((
                    self.minutes_scale.domain_to_pixel(minutes)?,
                    self.glucose_scale.glucose_to_pixel(glucose)?,
                ))
            })
            .collect()
    }

    /// Plot-space y of the postprandial reference line.
    pub fn threshold_y(&self) -> ChartResult<f64> {
        self.glucose_scale
            .glucose_to_pixel(POSTPRANDIAL_THRESHOLD_MG_DL)
    }

    /// `(minutes after start, glucose)` under a surface-relative pointer.
    pub fn pointer_to_domain(&self, pointer_x: f64, pointer_y: f64) -> ChartResult<(f64, f64)> {
        Ok((
            self.minutes_scale
                .pixel_to_domain(pointer_x - self.layout.margin.left)?,
            self.glucose_scale
                .pixel_to_glucose(pointer_y - self.layout.margin.top)?,
        ))
    }
}

/// Scales of the summary scatter: mean glucose on x, standard deviation on
/// y, both rounded out to tick boundaries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScatterFrame {
    layout: ChartLayout,
    plot: PlotArea,
    mean_scale: LinearScale,
    std_scale: LinearScale,
}

impl ScatterFrame {
    /// `domains` is `(mean extent, std extent)` as reported by the scatter.
    pub fn for_domains(
        layout: ChartLayout,
        domains: ((f64, f64), (f64, f64)),
    ) -> ChartResult<Self> {
        let plot = layout.plot_area()?;
        let ((mean_min, mean_max), (std_min, std_max)) = domains;
        let (mean_min, mean_max) = nice_domain(mean_min, mean_max, SCATTER_TICKS)?;
        let (std_min, std_max) = nice_domain(std_min, std_max, SCATTER_TICKS)?;
        Ok(Self {
            layout,
            plot,
            mean_scale: LinearScale::with_range(mean_min, mean_max, 0.0, plot.width)?,
            std_scale: LinearScale::with_range(std_min, std_max, plot.height, 0.0)?,
        })
    }

    #[must_use]
    pub fn layout(&self) -> ChartLayout {
        self.layout
    }

    #[must_use]
    pub fn plot_area(&self) -> PlotArea {
        self.plot
    }

    #[must_use]
    pub fn mean_scale(&self) -> LinearScale {
        self.mean_scale
    }

    #[must_use]
    pub fn std_scale(&self) -> LinearScale {
        self.std_scale
    }

    pub fn point_to_plot(&self, point: &ScatterPoint) -> ChartResult<(f64, f64)> {
        Ok((
            self.mean_scale.domain_to_pixel(point.mean_glucose)?,
            self.std_scale.domain_to_pixel(point.std_glucose)?,
        ))
    }
}
