//! Capacity warning levels.
//!
//! Informational only: admission decisions never look at the warning level.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Occupancy bucket of a session's registered roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapacityWarningLevel {
    /// Below 50%, or nothing to measure.
    None,
    /// At least 50% full.
    HalfFull,
    /// At least 80% full.
    NearlyFull,
}

impl CapacityWarningLevel {
    pub const HALF_FULL_RATIO: f64 = 0.5;
    pub const NEARLY_FULL_RATIO: f64 = 0.8;

    /// Buckets `registered / max_capacity`.
    ///
    /// A zero capacity or an empty roster is always `None`.
    pub fn from_occupancy(registered: usize, max_capacity: u32) -> Self {
        if max_capacity == 0 || registered == 0 {
            return CapacityWarningLevel::None;
        }
        let ratio = registered as f64 / f64::from(max_capacity);
        if ratio >= Self::NEARLY_FULL_RATIO {
            CapacityWarningLevel::NearlyFull
        } else if ratio >= Self::HALF_FULL_RATIO {
            CapacityWarningLevel::HalfFull
        } else {
            CapacityWarningLevel::None
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CapacityWarningLevel::None => "none",
            CapacityWarningLevel::HalfFull => "≥50%",
            CapacityWarningLevel::NearlyFull => "≥80%",
        }
    }

    pub fn is_warning(&self) -> bool {
        !matches!(self, CapacityWarningLevel::None)
    }
}

impl fmt::Display for CapacityWarningLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
