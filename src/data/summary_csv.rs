use std::io::Read;
use std::path::Path;

use tracing::{debug, warn};

use crate::core::summary::parse_hba1c;
use crate::core::{Gender, ParticipantSummary};
use crate::data::fields::{
    FieldAliases, GENDER_FIELD, HBA1C_FIELD, MEAN_GLUCOSE_FIELD, PARTICIPANT_FIELD,
    ResolvedField, STD_GLUCOSE_FIELD,
};
use crate::error::{ChartError, ChartResult};

/// Reads the per-participant summary table.
///
/// Rows without a participant id or with non-numeric mean/std are skipped
/// and logged; a missing required column fails the whole file.
pub fn read_summary_csv<R: Read>(reader: R) -> ChartResult<Vec<ParticipantSummary>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let participant_field = required(PARTICIPANT_FIELD, &headers)?;
    let mean_field = required(MEAN_GLUCOSE_FIELD, &headers)?;
    let std_field = required(STD_GLUCOSE_FIELD, &headers)?;
    let gender_field = ResolvedField::resolve(GENDER_FIELD, headers.iter());
    let hba1c_field = ResolvedField::resolve(HBA1C_FIELD, headers.iter());

    let mut rows = Vec::new();
    let mut skipped = 0_usize;
    for (row, record) in csv_reader.records().enumerate() {
        let record = match record {
            Ok(record) => record,
            Err(err) => {
                warn!(row, error = %err, "skipping undecodable summary row");
                skipped += 1;
                continue;
            }
        };

        let Some(id) = participant_field.value(&record) else {
            warn!(row, "skipping summary row without participant id");
            skipped += 1;
            continue;
        };
        let (Some(mean_glucose), Some(std_glucose)) = (
            finite_number(mean_field.value(&record)),
            finite_number(std_field.value(&record)),
        ) else {
            warn!(row, participant = id, "skipping summary row with non-numeric glucose stats");
            skipped += 1;
            continue;
        };
        let hba1c = match hba1c_field.value(&record).map(parse_hba1c).transpose() {
            Ok(value) => value.flatten(),
            Err(err) => {
                warn!(row, participant = id, error = %err, "ignoring unreadable HbA1c");
                None
            }
        };

        rows.push(ParticipantSummary {
            participant: id.to_owned(),
            mean_glucose,
            std_glucose,
            gender: Gender::parse(gender_field.value(&record).unwrap_or_default()),
            hba1c,
        });
    }

    debug!(count = rows.len(), skipped, "read participant summary");
    Ok(rows)
}

pub fn load_summary_csv(path: impl AsRef<Path>) -> ChartResult<Vec<ParticipantSummary>> {
    let file = std::fs::File::open(path.as_ref())?;
    read_summary_csv(file)
}

fn required(aliases: FieldAliases, headers: &csv::StringRecord) -> ChartResult<ResolvedField> {
    let resolved = ResolvedField::resolve(aliases, headers.iter());
    if resolved.is_present() {
        Ok(resolved)
    } else {
        Err(ChartError::InvalidData(format!(
            "summary table has no `{}` column (tried {})",
            aliases.field,
            aliases.candidates.join(", ")
        )))
    }
}

fn finite_number(value: Option<&str>) -> Option<f64> {
    value?.parse::<f64>().ok().filter(|v| v.is_finite())
}
