use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other(String),
}

impl Gender {
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.eq_ignore_ascii_case("male") {
            Self::Male
        } else if trimmed.eq_ignore_ascii_case("female") {
            Self::Female
        } else {
            Self::Other(trimmed.to_owned())
        }
    }

    /// Scatter fill for unselected participants.
    #[must_use]
    pub fn color(&self) -> &'static str {
        match self {
            Self::Male => "#ADD8E6",
            Self::Female => "pink",
            Self::Other(_) => "#9ca3af",
        }
    }
}

/// One row of the per-participant summary table, after field resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticipantSummary {
    pub participant: String,
    /// mg/dL
    pub mean_glucose: f64,
    /// mg/dL
    pub std_glucose: f64,
    pub gender: Gender,
    /// Percent, e.g. `5.3` for `5.3%`.
    pub hba1c: Option<Decimal>,
}

impl ParticipantSummary {
    /// HbA1c as shown in tooltips: `5.3%` or `N/A`.
    #[must_use]
    pub fn hba1c_label(&self) -> String {
        format_hba1c(self.hba1c)
    }
}

/// Parses `5.3`, `5.3%` or ` 5.3 % `. Blank input is `Ok(None)`.
pub fn parse_hba1c(raw: &str) -> ChartResult<Option<Decimal>> {
    let trimmed = raw.trim().trim_end_matches('%').trim_end();
    if trimmed.is_empty() {
        return Ok(None);
    }
    Decimal::from_str(trimmed)
        .map(Some)
        .map_err(|err| ChartError::InvalidData(format!("invalid HbA1c `{raw}`: {err}")))
}

#[must_use]
pub fn format_hba1c(hba1c: Option<Decimal>) -> String {
    match hba1c {
        Some(value) => format!("{}%", value.normalize()),
        None => "N/A".to_owned(),
    }
}
