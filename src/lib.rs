//! glucose-charts: headless model layer for interactive glucose charts.
//!
//! The crate turns participant summary tables and per-day glucose series
//! into the state a rendering host needs: hover lookups pinned to the
//! nearest reading, a two-participant comparison selection, trend overlays
//! and the guess-the-profile quiz. Drawing stays with the host.

pub mod api;
pub mod core;
pub mod data;
pub mod error;
pub mod interaction;
pub mod telemetry;

pub use api::{Command, Message, StoryConfig, StoryState};
pub use core::{Sample, SampleSeries};
pub use error::{ChartError, ChartResult};
pub use interaction::{SelectionSet, ToggleOutcome};
