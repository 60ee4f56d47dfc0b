use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Chart whose data arrives through an asynchronous load.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChartSlot {
    /// Breakfast trend overlay driven by the scatter selection.
    Trends,
    /// Full-day chart of the profile currently being guessed.
    QuizDay,
    /// Full-day chart on the results card of one participant.
    Result(String),
}

/// Identifies one requested load; only the newest ticket per slot is current.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LoadTicket {
    pub slot: ChartSlot,
    pub generation: u64,
}

/// Generation counter per chart slot.
///
/// Every new request for a slot supersedes the previous one, so a completion
/// that arrives after a newer request is recognized as stale and dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadTracker {
    generations: IndexMap<ChartSlot, u64>,
}

impl LoadTracker {
    pub fn begin(&mut self, slot: ChartSlot) -> LoadTicket {
        let generation = self.generations.entry(slot.clone()).or_insert(0);
        *generation += 1;
        trace!(?slot, generation = *generation, "begin load");
        LoadTicket {
            slot,
            generation: *generation,
        }
    }

    /// Invalidates any in-flight load for `slot` without starting a new one.
    pub fn cancel(&mut self, slot: ChartSlot) {
        self.begin(slot);
    }

    #[must_use]
    pub fn is_current(&self, ticket: &LoadTicket) -> bool {
        self.generations.get(&ticket.slot) == Some(&ticket.generation)
    }

    #[must_use]
    pub fn generation(&self, slot: &ChartSlot) -> u64 {
        self.generations.get(slot).copied().unwrap_or(0)
    }
}
