use crate::calendar::WheelKind;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const WEEK_RADIUS: f64 = 140.0;
pub const MONTH_RADIUS: f64 = 160.0;
pub const SENSITIVITY: f64 = 0.5;
pub const TAP_THRESHOLD: f64 = 5.0; // max travel for a tap
pub const CENTER_HIT_RADIUS: f64 = 60.0; // tap here confirms the center date
pub const SLOT_HIT_RADIUS: f64 = 22.0;
pub const SNAP_DURATION_MS: u64 = 280;

/// Geometry and touch tuning for one wheel. Week and month wheels differ only in these values.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct WheelConfig {
    pub radius: f64,
    pub sensitivity: f64,
    pub tap_threshold: f64,
    pub center_hit_radius: f64,
    pub slot_hit_radius: f64,
    pub snap_duration_ms: u64,
}

impl WheelConfig {
    pub fn week() -> Self {
        Self {
            radius: WEEK_RADIUS,
            ..Self::default()
        }
    }

    pub fn month() -> Self {
        Self {
            radius: MONTH_RADIUS,
            ..Self::default()
        }
    }

    pub fn for_kind(kind: WheelKind) -> Self {
        match kind {
            WheelKind::Week => Self::week(),
            WheelKind::Month => Self::month(),
        }
    }

    pub fn snap_duration(&self) -> Duration {
        Duration::from_millis(self.snap_duration_ms)
    }
}

/// A partial `WheelConfig` table. Missing fields fall back to whichever preset it is applied to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct WheelOverrides {
    pub radius: Option<f64>,
    pub sensitivity: Option<f64>,
    pub tap_threshold: Option<f64>,
    pub center_hit_radius: Option<f64>,
    pub slot_hit_radius: Option<f64>,
    pub snap_duration_ms: Option<u64>,
}

impl WheelOverrides {
    pub fn apply(self, base: WheelConfig) -> WheelConfig {
        WheelConfig {
            radius: self.radius.unwrap_or(base.radius),
            sensitivity: self.sensitivity.unwrap_or(base.sensitivity),
            tap_threshold: self.tap_threshold.unwrap_or(base.tap_threshold),
            center_hit_radius: self.center_hit_radius.unwrap_or(base.center_hit_radius),
            slot_hit_radius: self.slot_hit_radius.unwrap_or(base.slot_hit_radius),
            snap_duration_ms: self.snap_duration_ms.unwrap_or(base.snap_duration_ms),
        }
    }
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            radius: WEEK_RADIUS,
            sensitivity: SENSITIVITY,
            tap_threshold: TAP_THRESHOLD,
            center_hit_radius: CENTER_HIT_RADIUS,
            slot_hit_radius: SLOT_HIT_RADIUS,
            snap_duration_ms: SNAP_DURATION_MS,
        }
    }
}
