use serde::{Deserialize, Serialize};

/// Post-meal reference line drawn on trend charts, mg/dL.
pub const POSTPRANDIAL_THRESHOLD_MG_DL: f64 = 140.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GlucoseZone {
    Normal,
    Elevated,
    High,
}

/// Inclusive mg/dL band shaded behind result charts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ZoneBand {
    pub zone: GlucoseZone,
    pub min: f64,
    pub max: f64,
    pub color: &'static str,
}

pub const ZONE_BANDS: [ZoneBand; 3] = [
    ZoneBand {
        zone: GlucoseZone::Normal,
        min: 70.0,
        max: 99.0,
        color: "#d1fae5",
    },
    ZoneBand {
        zone: GlucoseZone::Elevated,
        min: 100.0,
        max: 125.0,
        color: "#fef3c7",
    },
    ZoneBand {
        zone: GlucoseZone::High,
        min: 126.0,
        max: 230.0,
        color: "#fee2e2",
    },
];

/// Band a reading falls into.
///
/// Readings between two integer bands (e.g. 99.5) belong to the upper one;
/// readings below 70 or above 230 are outside every band.
#[must_use]
pub fn zone_for(glucose: f64) -> Option<GlucoseZone> {
    if !glucose.is_finite() || glucose < ZONE_BANDS[0].min {
        return None;
    }
    ZONE_BANDS
        .iter()
        .find(|band| glucose <= band.max)
        .map(|band| band.zone)
}

#[must_use]
pub fn exceeds_postprandial(glucose: f64) -> bool {
    glucose > POSTPRANDIAL_THRESHOLD_MG_DL
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zone_boundaries() {
        assert_eq!(zone_for(69.9), None);
        assert_eq!(zone_for(70.0), Some(GlucoseZone::Normal));
        assert_eq!(zone_for(99.5), Some(GlucoseZone::Elevated));
        assert_eq!(zone_for(125.0), Some(GlucoseZone::Elevated));
        assert_eq!(zone_for(126.0), Some(GlucoseZone::High));
        assert_eq!(zone_for(231.0), None);
    }

    #[test]
    fn postprandial_is_strictly_above_threshold() {
        assert!(!exceeds_postprandial(140.0));
        assert!(exceeds_postprandial(140.5));
    }
}
