use serde::{Deserialize, Serialize};

use crate::core::LinearScale;
use crate::error::{ChartError, ChartResult};

pub const DEFAULT_GLUCOSE_DOMAIN: (f64, f64) = (50.0, 230.0);

/// Vertical glucose axis, mg/dL mapped onto `[height, 0]` so higher
/// readings sit nearer the top.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GlucoseScale {
    min: f64,
    max: f64,
    height_px: f64,
}

impl GlucoseScale {
    pub fn new(min: f64, max: f64, height_px: f64) -> ChartResult<Self> {
        if !min.is_finite() || !max.is_finite() || min >= max {
            return Err(ChartError::InvalidData(
                "glucose domain must be finite with min < max".to_owned(),
            ));
        }
        if !height_px.is_finite() || height_px <= 0.0 {
            return Err(ChartError::InvalidData(
                "glucose scale height must be finite and > 0".to_owned(),
            ));
        }
        Ok(Self {
            min,
            max,
            height_px,
        })
    }

    pub fn with_default_domain(height_px: f64) -> ChartResult<Self> {
        Self::new(DEFAULT_GLUCOSE_DOMAIN.0, DEFAULT_GLUCOSE_DOMAIN.1, height_px)
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.min, self.max)
    }

    pub fn glucose_to_pixel(self, glucose: f64) -> ChartResult<f64> {
        self.linear()?.domain_to_pixel(glucose)
    }

    pub fn pixel_to_glucose(self, pixel: f64) -> ChartResult<f64> {
        self.linear()?.pixel_to_domain(pixel)
    }

    fn linear(self) -> ChartResult<LinearScale> {
        LinearScale::with_range(self.min, self.max, self.height_px, 0.0)
    }
}
