use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Time format used by the series files.
pub const TIME_OF_DAY_FORMAT: &str = "%H:%M:%S";

pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Meal annotation attached to the reading closest to when it was logged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodLog {
    pub name: String,
    pub calories: Option<f64>,
    pub total_carb: Option<f64>,
    pub sugar: Option<f64>,
    pub protein: Option<f64>,
}

impl FoodLog {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            calories: None,
            total_carb: None,
            sugar: None,
            protein: None,
        }
    }

    #[must_use]
    pub fn with_macros(
        mut self,
        calories: f64,
        total_carb: f64,
        sugar: f64,
        protein: f64,
    ) -> Self {
        self.calories = Some(calories);
        self.total_carb = Some(total_carb);
        self.sugar = Some(sugar);
        self.protein = Some(protein);
        self
    }
}

/// One glucose reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub time: NaiveTime,
    /// mg/dL
    pub glucose: f64,
    pub food: Option<FoodLog>,
}

impl Sample {
    #[must_use]
    pub fn new(time: NaiveTime, glucose: f64) -> Self {
        Self {
            time,
            glucose,
            food: None,
        }
    }

    #[must_use]
    pub fn with_food(mut self, food: FoodLog) -> Self {
        self.food = Some(food);
        self
    }

    #[must_use]
    pub fn seconds_of_day(&self) -> f64 {
        time_to_seconds(self.time)
    }
}

pub fn parse_time_of_day(value: &str) -> ChartResult<NaiveTime> {
    NaiveTime::parse_from_str(value.trim(), TIME_OF_DAY_FORMAT).map_err(|source| {
        ChartError::TimeParse {
            value: value.to_owned(),
            source,
        }
    })
}

#[must_use]
pub fn time_to_seconds(time: NaiveTime) -> f64 {
    f64::from(time.num_seconds_from_midnight()) + f64::from(time.nanosecond()) / 1e9
}

/// Converts seconds since midnight back into a time of day, clamped to the day.
pub fn seconds_to_time(seconds: f64) -> ChartResult<NaiveTime> {
    if !seconds.is_finite() {
        return Err(ChartError::InvalidData(
            "time-of-day seconds must be finite".to_owned(),
        ));
    }

    let clamped = seconds.clamp(0.0, SECONDS_PER_DAY - 1.0e-6);
    let whole = clamped.floor();
    let nanos = (((clamped - whole) * 1e9).round() as u32).min(999_999_999);
    NaiveTime::from_num_seconds_from_midnight_opt(whole as u32, nanos).ok_or_else(|| {
        ChartError::InvalidData(format!("{seconds} is not a valid time of day"))
    })
}

/// Signed minutes from `origin` to `time`.
#[must_use]
pub fn minutes_between(origin: NaiveTime, time: NaiveTime) -> f64 {
    time.signed_duration_since(origin).num_milliseconds() as f64 / 60_000.0
}
