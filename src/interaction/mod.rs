pub mod selection;

use serde::{Deserialize, Serialize};

use crate::core::{FoodLog, Sample};

pub use selection::{
    DEFAULT_SELECTION, MAX_SELECTION, PointHighlight, SELECTION_COLORS, SelectionSet,
    ToggleOutcome,
};

/// Tooltip time label, e.g. `8:15 AM`.
pub const HOVER_TIME_FORMAT: &str = "%-I:%M %p";

/// Sample the hover dot is pinned to, with its plot-space position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoverSnap {
    pub index: usize,
    pub x: f64,
    pub y: f64,
    pub sample: Sample,
}

/// Pointer/hover state exposed to the host for one chart.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HoverState {
    pub visible: bool,
    pub pointer_x: f64,
    pub pointer_y: f64,
    pub snap: Option<HoverSnap>,
}

impl HoverState {
    pub fn on_pointer_move(&mut self, x: f64, y: f64) {
        self.visible = true;
        self.pointer_x = x;
        self.pointer_y = y;
    }

    pub fn on_pointer_leave(&mut self) {
        self.visible = false;
        self.snap = None;
    }

    pub fn set_snap(&mut self, snap: Option<HoverSnap>) {
        self.snap = snap;
    }

    /// Tooltip content for the snapped sample, if the hover is showing.
    #[must_use]
    pub fn readout(&self) -> Option<HoverReadout> {
        if !self.visible {
            return None;
        }
        self.snap
            .as_ref()
            .map(|snap| HoverReadout::from_sample(&snap.sample))
    }
}

/// Text shown for a hovered sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoverReadout {
    pub time_label: String,
    pub glucose_label: String,
    pub food_lines: Vec<String>,
}

impl HoverReadout {
    #[must_use]
    pub fn from_sample(sample: &Sample) -> Self {
        Self {
            time_label: sample.time.format(HOVER_TIME_FORMAT).to_string(),
            glucose_label: format!("Glucose: {} mg/dL", sample.glucose),
            food_lines: sample.food.as_ref().map(food_lines).unwrap_or_default(),
        }
    }
}

fn food_lines(food: &FoodLog) -> Vec<String> {
    vec![
        format!("Food: {}", food.name),
        format!("Calories: {} kcal", optional_amount(food.calories)),
        format!("Carbs: {}g", optional_amount(food.total_carb)),
        format!("Sugar: {}g", optional_amount(food.sugar)),
        format!("Protein: {}g", optional_amount(food.protein)),
    ]
}

fn optional_amount(value: Option<f64>) -> String {
    value.map_or_else(|| "N/A".to_owned(), |v| v.to_string())
}
