//! Loaders turning the site's data files into normalized records.
//!
//! Malformed rows never reach the core types: they are filtered here and
//! logged through `tracing`.

pub mod fields;
pub mod series_json;
pub mod summary_csv;

pub use fields::{FieldAliases, PARTICIPANT_FIELD, ResolvedField};
pub use series_json::{load_series_json, parse_series_json};
pub use summary_csv::{load_summary_csv, read_summary_csv};
