use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::SampleSeries;
use crate::error::{ChartError, ChartResult};

/// Vertical padding applied around the observed glucose extent.
pub const TREND_GLUCOSE_PADDING: f64 = 10.0;

/// One participant's curve re-expressed as minutes after the meal start.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignedTrend {
    pub participant: String,
    pub color_slot: usize,
    /// `(minutes after first sample, glucose)`
    pub points: Vec<(f64, f64)>,
}

/// Breakfast trend overlay for the current selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendComparison {
    pub trends: SmallVec<[AlignedTrend; 2]>,
    /// `[0, latest minute across trends]`
    pub minutes_domain: (f64, f64),
    /// Observed extent padded by [`TREND_GLUCOSE_PADDING`].
    pub glucose_domain: (f64, f64),
    /// Largest index-paired difference; `None` unless exactly two trends.
    pub max_difference: Option<f64>,
}

impl TrendComparison {
    /// Builds the overlay from `(participant, series)` pairs in selection order.
    pub fn build<'a, I>(series: I) -> ChartResult<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a SampleSeries)>,
    {
        let inputs: SmallVec<[(&str, &SampleSeries); 2]> = series.into_iter().collect();
        if inputs.is_empty() {
            return Err(ChartError::InvalidInput(
                "trend comparison needs at least one series".to_owned(),
            ));
        }

        let mut max_minutes = 0.0_f64;
        let mut glucose_min = f64::INFINITY;
        let mut glucose_max = f64::NEG_INFINITY;
        let mut trends = SmallVec::new();
        for (slot, (participant, series)) in inputs.iter().enumerate() {
            if series.is_empty() {
                return Err(ChartError::InvalidInput(format!(
                    "trend series for participant {participant} is empty"
                )));
            }
            let points = series.minutes_after_first();
            for &(minutes, glucose) in &points {
                max_minutes = max_minutes.max(minutes);
                glucose_min = glucose_min.min(glucose);
                glucose_max = glucose_max.max(glucose);
            }
            trends.push(AlignedTrend {
                participant: (*participant).to_owned(),
                color_slot: slot,
                points,
            });
        }

        let max_difference = match inputs.as_slice() {
            [(_, left), (_, right)] => max_paired_difference(left, right),
            _ => None,
        };

        Ok(Self {
            trends,
            minutes_domain: (0.0, max_minutes),
            glucose_domain: (
                glucose_min - TREND_GLUCOSE_PADDING,
                glucose_max + TREND_GLUCOSE_PADDING,
            ),
            max_difference,
        })
    }
}

/// Largest `|a[i] - b[i]|` over the common prefix of two series.
///
/// Samples are paired by position, not by timestamp. Returns `None` when the
/// series share no samples.
#[must_use]
pub fn max_paired_difference(left: &SampleSeries, right: &SampleSeries) -> Option<f64> {
    left.iter()
        .zip(right.iter())
        .map(|(a, b)| (a.glucose - b.glucose).abs())
        .filter(|diff| diff.is_finite())
        .reduce(f64::max)
}
