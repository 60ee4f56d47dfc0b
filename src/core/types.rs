use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Outer drawing surface size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Inset between the drawing surface edge and the plot area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Margin {
    #[must_use]
    pub fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    fn validate(self) -> ChartResult<Self> {
        for (value, name) in [
            (self.top, "top"),
            (self.right, "right"),
            (self.bottom, "bottom"),
            (self.left, "left"),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "margin `{name}` must be finite and >= 0"
                )));
            }
        }
        Ok(self)
    }
}

impl Default for Margin {
    fn default() -> Self {
        Self::new(60.0, 0.0, 40.0, 60.0)
    }
}

/// Plot area left after applying a margin to a viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotArea {
    pub width: f64,
    pub height: f64,
}

impl PlotArea {
    pub fn inset(viewport: Viewport, margin: Margin) -> ChartResult<Self> {
        if !viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        let margin = margin.validate()?;

        let width = f64::from(viewport.width) - margin.left - margin.right;
        let height = f64::from(viewport.height) - margin.top - margin.bottom;
        if width <= 0.0 || height <= 0.0 {
            return Err(ChartError::InvalidData(format!(
                "margin leaves no plot area inside {}x{} viewport",
                viewport.width, viewport.height
            )));
        }

        Ok(Self { width, height })
    }
}
