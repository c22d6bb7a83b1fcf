//! Registration tier definitions.
//!
//! The tier is the attendee's registration class. It drives the priority
//! weighting used when promoting from a waitlist.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Registration class of an attendee (Standard < Premium < Gold).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub enum RegistrationTier {
    #[default]
    Standard,
    Premium,
    Gold,
}

impl RegistrationTier {
    /// All tiers in ascending order.
    pub const ALL: [RegistrationTier; 3] = [
        RegistrationTier::Standard,
        RegistrationTier::Premium,
        RegistrationTier::Gold,
    ];

    /// Numeric value of the tier (Standard=1, Premium=2, Gold=3).
    pub fn value(&self) -> u32 {
        match self {
            RegistrationTier::Standard => 1,
            RegistrationTier::Premium => 2,
            RegistrationTier::Gold => 3,
        }
    }

    /// Base priority weight, `value * 100`.
    pub fn weight(&self) -> u32 {
        self.value() * 100
    }

    /// Returns the display name for this tier.
    pub fn display_name(&self) -> &'static str {
        match self {
            RegistrationTier::Standard => "Standard",
            RegistrationTier::Premium => "Premium",
            RegistrationTier::Gold => "Gold",
        }
    }

    /// Parses free-form tier input. Never fails: anything unrecognised
    /// becomes `Standard`.
    ///
    /// Names are matched case-insensitively after trimming; the numeric
    /// values `1`, `2` and `3` are accepted as well.
    pub fn parse_lenient(input: &str) -> Self {
        input.parse().unwrap_or_default()
    }
}

impl FromStr for RegistrationTier {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "standard" | "1" => Ok(RegistrationTier::Standard),
            "premium" | "2" => Ok(RegistrationTier::Premium),
            "gold" | "3" => Ok(RegistrationTier::Gold),
            _ => Err(ValidationError::invalid_format(
                "tier",
                format!("unknown registration tier '{}'", trimmed),
            )),
        }
    }
}

impl fmt::Display for RegistrationTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
