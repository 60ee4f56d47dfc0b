pub mod comparison;
pub mod glucose_scale;
pub mod sample;
pub mod scale;
pub mod series;
pub mod summary;
pub mod time_scale;
pub mod types;
pub mod zones;

pub use comparison::{AlignedTrend, TrendComparison, max_paired_difference};
pub use glucose_scale::{DEFAULT_GLUCOSE_DOMAIN, GlucoseScale};
pub use sample::{FoodLog, Sample, parse_time_of_day};
pub use scale::{LinearScale, nice_domain};
pub use series::SampleSeries;
pub use summary::{Gender, ParticipantSummary};
pub use time_scale::TimeScale;
pub use types::{Margin, PlotArea, Viewport};
pub use zones::{GlucoseZone, POSTPRANDIAL_THRESHOLD_MG_DL, ZONE_BANDS, ZoneBand, zone_for};
