use std::path::Path;

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::core::{FoodLog, Sample, SampleSeries, parse_time_of_day};
use crate::error::ChartResult;

/// One record as it appears in a series file. Numeric fields are kept as
/// raw JSON values because exports mix numbers and numeric strings.
#[derive(Debug, Clone, Default, Deserialize)]
struct RawSample {
    #[serde(default)]
    time: Option<String>,
    #[serde(default)]
    glucose: Option<Value>,
    #[serde(default)]
    logged_food: Option<Value>,
    #[serde(default)]
    calorie: Option<Value>,
    #[serde(default)]
    total_carb: Option<Value>,
    #[serde(default)]
    sugar: Option<Value>,
    #[serde(default)]
    protein: Option<Value>,
}

/// Parses a series file: a JSON array of `{time, glucose, logged_food, ...}`.
///
/// Records without a usable reading are dropped: glucose missing, zero or
/// non-numeric, time missing or empty. Records whose time is not
/// `HH:MM:SS` are dropped with a warning. The survivors are canonicalized.
pub fn parse_series_json(input: &str) -> ChartResult<SampleSeries> {
    let raw: Vec<RawSample> = serde_json::from_str(input)?;
    let original_count = raw.len();

    let mut samples = Vec::with_capacity(raw.len());
    for (index, record) in raw.into_iter().enumerate() {
        let Some(glucose) = record.glucose.as_ref().and_then(number).filter(|g| *g != 0.0)
        else {
            continue;
        };
        let Some(time) = record.time.as_deref().filter(|t| !t.trim().is_empty()) else {
            continue;
        };
        let time = match parse_time_of_day(time) {
            Ok(time) => time,
            Err(err) => {
                warn!(index, error = %err, "dropping sample with unreadable time");
                continue;
            }
        };

        let mut sample = Sample::new(time, glucose);
        sample.food = food_log(&record);
        samples.push(sample);
    }

    debug!(
        original_count,
        usable_count = samples.len(),
        "parsed series json"
    );
    Ok(SampleSeries::canonicalize(samples))
}

pub fn load_series_json(path: impl AsRef<Path>) -> ChartResult<SampleSeries> {
    let input = std::fs::read_to_string(path.as_ref())?;
    parse_series_json(&input)
}

fn food_log(record: &RawSample) -> Option<FoodLog> {
    let name = match record.logged_food.as_ref()? {
        Value::String(name) if !name.trim().is_empty() => name.trim().to_owned(),
        Value::Number(number) if number.as_f64().is_some_and(|v| v != 0.0) => number.to_string(),
        _ => return None,
    };
    Some(FoodLog {
        name,
        calories: record.calorie.as_ref().and_then(number),
        total_carb: record.total_carb.as_ref().and_then(number),
        sugar: record.sugar.as_ref().and_then(number),
        protein: record.protein.as_ref().and_then(number),
    })
}

fn number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|v| v.is_finite())
}
