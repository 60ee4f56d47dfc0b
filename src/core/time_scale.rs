use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::core::sample::{seconds_to_time, time_to_seconds};
use crate::core::{LinearScale, SampleSeries};
use crate::error::{ChartError, ChartResult};

/// Time-of-day axis mapped onto `[0, width]` plot pixels.
///
/// The domain is held in seconds since midnight; a zero-width domain (a
/// one-sample series) is widened by one second on each side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeScale {
    start_seconds: f64,
    end_seconds: f64,
    width_px: f64,
}

impl TimeScale {
    pub fn new(start: NaiveTime, end: NaiveTime, width_px: f64) -> ChartResult<Self> {
        let (start_seconds, end_seconds) =
            normalize_range(time_to_seconds(start), time_to_seconds(end), 2.0)?;
        if !width_px.is_finite() || width_px <= 0.0 {
            return Err(ChartError::InvalidData(
                "time scale width must be finite and > 0".to_owned(),
            ));
        }
        Ok(Self {
            start_seconds,
            end_seconds,
            width_px,
        })
    }

    /// Fits the domain to the series' time extent.
    pub fn from_series(series: &SampleSeries, width_px: f64) -> ChartResult<Self> {
        let (start, end) = series.time_extent().ok_or_else(|| {
            ChartError::InvalidData("time scale cannot be built from an empty series".to_owned())
        })?;
        Self::new(start, end, width_px)
    }

    /// Domain bounds in seconds since midnight.
    #[must_use]
    pub fn domain_seconds(self) -> (f64, f64) {
        (self.start_seconds, self.end_seconds)
    }

    #[must_use]
    pub fn width_px(self) -> f64 {
        self.width_px
    }

    pub fn time_to_pixel(self, time: NaiveTime) -> ChartResult<f64> {
        self.linear()?.domain_to_pixel(time_to_seconds(time))
    }

    /// Inverts a plot-space pixel; the result is clamped to the day.
    pub fn pixel_to_time(self, pixel: f64) -> ChartResult<NaiveTime> {
        seconds_to_time(self.linear()?.pixel_to_domain(pixel)?)
    }

    fn linear(self) -> ChartResult<LinearScale> {
        LinearScale::with_range(self.start_seconds, self.end_seconds, 0.0, self.width_px)
    }
}

fn normalize_range(start: f64, end: f64, min_span: f64) -> ChartResult<(f64, f64)> {
    if !start.is_finite() || !end.is_finite() {
        return Err(ChartError::InvalidData(
            "scale range must be finite".to_owned(),
        ));
    }

    if start == end {
        let half = min_span / 2.0;
        return Ok((start - half, end + half));
    }

    Ok((start.min(end), start.max(end)))
}
