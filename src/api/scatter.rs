use serde::Serialize;
use tracing::trace;

use crate::core::ParticipantSummary;
use crate::interaction::{PointHighlight, SelectionSet, ToggleOutcome};

/// One scatter point: mean glucose on x, glucose standard deviation on y.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub participant: String,
    pub mean_glucose: f64,
    pub std_glucose: f64,
    pub highlight: PointHighlight,
}

/// Summary scatter plus the participants picked for trend comparison.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScatterState {
    summaries: Vec<ParticipantSummary>,
    selection: SelectionSet,
}

impl ScatterState {
    #[must_use]
    pub fn new(selection: SelectionSet) -> Self {
        Self {
            summaries: Vec::new(),
            selection,
        }
    }

    pub fn set_summaries(&mut self, summaries: Vec<ParticipantSummary>) {
        self.summaries = summaries;
    }

    #[must_use]
    pub fn summaries(&self) -> &[ParticipantSummary] {
        &self.summaries
    }

    #[must_use]
    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    /// Toggles a participant's membership in the comparison selection.
    ///
    /// Once summaries are loaded, an id missing from them can't be added
    /// and is rejected as invalid. A selected id can always be removed.
    pub fn toggle(&mut self, participant: &str) -> ToggleOutcome {
        let known = self.summaries.is_empty()
            || self.selection.contains(participant)
            || self.summary(participant.trim()).is_some();
        if !known {
            trace!(participant, "toggle on unknown participant");
            return ToggleOutcome::RejectedInvalid;
        }
        self.selection.toggle(participant)
    }

    #[must_use]
    pub fn summary(&self, participant: &str) -> Option<&ParticipantSummary> {
        self.summaries
            .iter()
            .find(|summary| summary.participant == participant)
    }

    #[must_use]
    pub fn points(&self) -> Vec<ScatterPoint> {
        self.summaries
            .iter()
            .map(|summary| ScatterPoint {
                participant: summary.participant.clone(),
                mean_glucose: summary.mean_glucose,
                std_glucose: summary.std_glucose,
                highlight: self.selection.highlight_for(summary),
            })
            .collect()
    }

    /// `(mean extent, std extent)` across all participants.
    #[must_use]
    pub fn domains(&self) -> Option<((f64, f64), (f64, f64))> {
        let mut iter = self.summaries.iter();
        let first = iter.next()?;
        let init = (
            (first.mean_glucose, first.mean_glucose),
            (first.std_glucose, first.std_glucose),
        );
        Some(iter.fold(init, |((mean_lo, mean_hi), (std_lo, std_hi)), summary| {
            (
                (
                    mean_lo.min(summary.mean_glucose),
                    mean_hi.max(summary.mean_glucose),
                ),
                (
                    std_lo.min(summary.std_glucose),
                    std_hi.max(summary.std_glucose),
                ),
            )
        }))
    }
}
