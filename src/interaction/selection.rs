use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::ParticipantSummary;

/// Capacity of the compared-participants selection.
pub const MAX_SELECTION: usize = 2;

/// Participants highlighted when the scatter page first renders.
pub const DEFAULT_SELECTION: [&str; 2] = ["1", "14"];

/// Secondary colors by selection slot.
pub const SELECTION_COLORS: [&str; MAX_SELECTION] = ["#7c3aed", "#10b981"];

/// Result of [`SelectionSet::toggle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ToggleOutcome {
    Added,
    Removed,
    /// The set is full and the id is not a member; nothing is evicted.
    RejectedFull,
    /// Empty or non-numeric identifier, or one the summary table lacks.
    RejectedInvalid,
}

impl ToggleOutcome {
    /// Whether membership changed, i.e. dependent charts need a redraw.
    #[must_use]
    pub fn changed(self) -> bool {
        matches!(self, Self::Added | Self::Removed)
    }
}

/// Insertion-ordered participant set with a fixed capacity.
///
/// A member's position is its color slot, so removing the first member
/// moves the second into slot 0. Equality compares membership only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionSet {
    members: IndexSet<String>,
    capacity: usize,
}

impl Default for SelectionSet {
    fn default() -> Self {
        Self::empty()
    }
}

impl SelectionSet {
    #[must_use]
    pub fn empty() -> Self {
        Self::with_capacity(MAX_SELECTION)
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            members: IndexSet::with_capacity(capacity),
            capacity,
        }
    }

    /// Seeds the set by toggling each id in order; invalid or overflowing
    /// ids are skipped.
    #[must_use]
    pub fn seeded<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::empty();
        for id in ids {
            set.toggle(id.as_ref());
        }
        set
    }

    #[must_use]
    pub fn with_defaults() -> Self {
        Self::seeded(DEFAULT_SELECTION)
    }

    pub fn toggle(&mut self, id: &str) -> ToggleOutcome {
        let id = id.trim();
        let outcome = if !is_participant_id(id) {
            ToggleOutcome::RejectedInvalid
        } else if self.members.shift_remove(id) {
            ToggleOutcome::Removed
        } else if self.members.len() < self.capacity {
            self.members.insert(id.to_owned());
            ToggleOutcome::Added
        } else {
            ToggleOutcome::RejectedFull
        };
        trace!(id, ?outcome, len = self.members.len(), "toggle selection");
        outcome
    }

    /// Value-style toggle: returns the resulting set and whether it changed.
    #[must_use]
    pub fn toggled(mut self, id: &str) -> (Self, bool) {
        let changed = self.toggle(id).changed();
        (self, changed)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.members.contains(id.trim())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.members.len() >= self.capacity
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.members.iter().map(String::as_str)
    }

    #[must_use]
    pub fn to_vec(&self) -> Vec<String> {
        self.members.iter().cloned().collect()
    }

    #[must_use]
    pub fn color_slot(&self, id: &str) -> Option<usize> {
        self.members.get_index_of(id.trim())
    }

    #[must_use]
    pub fn highlight_for(&self, summary: &ParticipantSummary) -> PointHighlight {
        match self.color_slot(&summary.participant) {
            Some(slot) => PointHighlight::selected(slot),
            None => PointHighlight::unselected(summary.gender.color()),
        }
    }
}

/// Scatter point styling derived from the selection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PointHighlight {
    pub slot: Option<usize>,
    pub fill: &'static str,
    pub radius: f64,
    pub stroke_width: f64,
}

impl PointHighlight {
    fn selected(slot: usize) -> Self {
        Self {
            slot: Some(slot),
            fill: SELECTION_COLORS[slot % SELECTION_COLORS.len()],
            radius: 8.0,
            stroke_width: 2.0,
        }
    }

    fn unselected(fill: &'static str) -> Self {
        Self {
            slot: None,
            fill,
            radius: 6.0,
            stroke_width: 0.5,
        }
    }
}

fn is_participant_id(id: &str) -> bool {
    !id.is_empty() && id.parse::<f64>().is_ok_and(f64::is_finite)
}
