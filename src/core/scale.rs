use crate::error::{ChartError, ChartResult};

/// Linear mapping from a value domain onto a pixel range.
///
/// The range may be inverted (`range_start > range_end`), which is how the
/// glucose axis maps larger values towards the top of the plot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    range_start: f64,
    range_end: f64,
}

impl LinearScale {
    pub fn new(domain_start: f64, domain_end: f64) -> ChartResult<Self> {
        Self::with_range(domain_start, domain_end, 0.0, 1.0)
    }

    pub fn with_range(
        domain_start: f64,
        domain_end: f64,
        range_start: f64,
        range_end: f64,
    ) -> ChartResult<Self> {
        if !domain_start.is_finite() || !domain_end.is_finite() || domain_start == domain_end {
            return Err(ChartError::InvalidData(
                "scale domain must be finite and non-zero".to_owned(),
            ));
        }
        if !range_start.is_finite() || !range_end.is_finite() || range_start == range_end {
            return Err(ChartError::InvalidData(
                "scale range must be finite and non-zero".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_end,
            range_start,
            range_end,
        })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    pub fn domain_to_pixel(self, value: f64) -> ChartResult<f64> {
        if !value.is_finite() {
            return Err(ChartError::InvalidData("value must be finite".to_owned()));
        }

        let normalized = (value - self.domain_start) / (self.domain_end - self.domain_start);
        Ok(self.range_start + normalized * (self.range_end - self.range_start))
    }

    pub fn pixel_to_domain(self, pixel: f64) -> ChartResult<f64> {
        if !pixel.is_finite() {
            return Err(ChartError::InvalidData("pixel must be finite".to_owned()));
        }

        let normalized = (pixel - self.range_start) / (self.range_end - self.range_start);
        Ok(self.domain_start + normalized * (self.domain_end - self.domain_start))
    }
}

/// Expands `(min, max)` outward to round tick boundaries, aiming for about
/// `tick_count` ticks. A zero-width extent is first widened by one unit on
/// each side.
pub fn nice_domain(min: f64, max: f64, tick_count: usize) -> ChartResult<(f64, f64)> {
    if !min.is_finite() || !max.is_finite() || tick_count == 0 {
        return Err(ChartError::InvalidData(
            "nice domain needs a finite extent and a positive tick count".to_owned(),
        ));
    }
    let (mut min, mut max) = (min.min(max), min.max(max));
    if min == max {
        min -= 1.0;
        max += 1.0;
    }

    let step = tick_step((max - min) / tick_count as f64);
    if step < 1.0 {
        // integer inverse keeps fractional steps exact
        let inverse = (1.0 / step).round();
        return Ok(((min * inverse).floor() / inverse, (max * inverse).ceil() / inverse));
    }
    Ok(((min / step).floor() * step, (max / step).ceil() * step))
}

/// Rounds a raw step to 1, 2 or 5 times a power of ten.
fn tick_step(raw: f64) -> f64 {
    let power = 10_f64.powf(raw.log10().floor());
    let error = raw / power;
    let factor = if error >= 50_f64.sqrt() {
        10.0
    } else if error >= 10_f64.sqrt() {
        5.0
    } else if error >= 2_f64.sqrt() {
        2.0
    } else {
        1.0
    };
    factor * power
}
