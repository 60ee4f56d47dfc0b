use chrono::NaiveTime;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::sample::{Sample, minutes_between};
use crate::error::{ChartError, ChartResult};

/// Samples of one participant-day, sorted ascending by time.
///
/// Sortedness is checked once at construction so [`SampleSeries::nearest`]
/// can bisect without re-validating. Duplicate timestamps are allowed by
/// [`SampleSeries::new`]; [`SampleSeries::canonicalize`] collapses them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SampleSeries {
    samples: Vec<Sample>,
}

impl SampleSeries {
    /// Wraps already-ordered samples, rejecting out-of-order input.
    pub fn new(samples: Vec<Sample>) -> ChartResult<Self> {
        if let Some(position) = samples
            .windows(2)
            .position(|pair| pair[1].time < pair[0].time)
        {
            return Err(ChartError::InvalidInput(format!(
                "series must be sorted ascending by time (sample {} at {} precedes {})",
                position + 1,
                samples[position + 1].time,
                samples[position].time
            )));
        }
        if samples.iter().any(|sample| !sample.glucose.is_finite()) {
            return Err(ChartError::InvalidInput(
                "series glucose values must be finite".to_owned(),
            ));
        }
        Ok(Self { samples })
    }

    /// Sorts by time, drops non-finite readings and keeps the last sample
    /// for a repeated timestamp. A meal logged on any of the collapsed
    /// samples survives; the latest one wins.
    #[must_use]
    pub fn canonicalize(samples: Vec<Sample>) -> Self {
        let original_count = samples.len();
        let mut samples: Vec<Sample> = samples
            .into_iter()
            .filter(|sample| sample.glucose.is_finite())
            .collect();
        // Stable sort keeps file order among equal times, so the later one replaces.
        samples.sort_by(|a, b| a.time.cmp(&b.time));

        let mut canonical: Vec<Sample> = Vec::with_capacity(samples.len());
        for sample in samples {
            match canonical.last_mut() {
                Some(last) if last.time == sample.time => {
                    last.glucose = sample.glucose;
                    last.food = sample.food.or(last.food.take());
                }
                _ => canonical.push(sample),
            }
        }

        debug!(
            original_count,
            canonical_count = canonical.len(),
            "canonicalize series"
        );
        Self { samples: canonical }
    }

    #[must_use]
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    #[must_use]
    pub fn first(&self) -> Option<&Sample> {
        self.samples.first()
    }

    #[must_use]
    pub fn last(&self) -> Option<&Sample> {
        self.samples.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Sample> {
        self.samples.iter()
    }

    /// Sample whose timestamp is closest to `query`.
    ///
    /// Equal distances resolve to the earlier sample. Queries outside the
    /// series clamp to the first or last sample.
    pub fn nearest(&self, query: NaiveTime) -> ChartResult<&Sample> {
        let index = self.nearest_index(query)?;
        Ok(&self.samples[index])
    }

    /// Index form of [`SampleSeries::nearest`].
    pub fn nearest_index(&self, query: NaiveTime) -> ChartResult<usize> {
        if self.samples.is_empty() {
            return Err(ChartError::InvalidInput(
                "nearest lookup on an empty series".to_owned(),
            ));
        }

        // bisect-left with a lower bound of 1 so `upper - 1` is always valid
        let upper = self
            .samples
            .partition_point(|sample| sample.time < query)
            .clamp(1, self.samples.len());
        let lower = upper - 1;
        if upper == self.samples.len() {
            return Ok(lower);
        }

        let before = query.signed_duration_since(self.samples[lower].time);
        let after = self.samples[upper].time.signed_duration_since(query);
        Ok(if before > after { upper } else { lower })
    }

    /// Time extent `(first, last)`, `None` for an empty series.
    #[must_use]
    pub fn time_extent(&self) -> Option<(NaiveTime, NaiveTime)> {
        Some((self.first()?.time, self.last()?.time))
    }

    /// Glucose extent `(min, max)`, `None` for an empty series.
    #[must_use]
    pub fn glucose_extent(&self) -> Option<(f64, f64)> {
        glucose_extent(self.samples.iter())
    }

    /// Samples carrying a logged meal.
    pub fn food_events(&self) -> impl Iterator<Item = &Sample> {
        self.samples.iter().filter(|sample| sample.food.is_some())
    }

    /// `(minutes after the first sample, glucose)` pairs.
    #[must_use]
    pub fn minutes_after_first(&self) -> Vec<(f64, f64)> {
        let Some(origin) = self.first().map(|sample| sample.time) else {
            return Vec::new();
        };
        self.samples
            .iter()
            .map(|sample| (minutes_between(origin, sample.time), sample.glucose))
            .collect()
    }
}

impl<'a> IntoIterator for &'a SampleSeries {
    type Item = &'a Sample;
    type IntoIter = std::slice::Iter<'a, Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

pub(crate) fn glucose_extent<'a>(samples: impl Iterator<Item = &'a Sample>) -> Option<(f64, f64)> {
    let mut extent: Option<(OrderedFloat<f64>, OrderedFloat<f64>)> = None;
    for sample in samples {
        let value = OrderedFloat(sample.glucose);
        extent = Some(match extent {
            None => (value, value),
            Some((min, max)) => (min.min(value), max.max(value)),
        });
    }
    extent.map(|(min, max)| (min.0, max.0))
}
