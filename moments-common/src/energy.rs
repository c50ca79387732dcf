//! Energy level scale
//!
//! Describes whether a song is perceived as restoring (negative) or
//! consuming/energizing (positive). The slider in the share dialog and the
//! filter bar both work in whole steps between [`EnergyLevel::MIN`] and
//! [`EnergyLevel::MAX`]; zero is neutral.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A validated energy level in `-5..=5`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EnergyLevel(i32);

/// Coarse direction of an energy level, used for colouring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnergyTone {
    Restoring,
    Neutral,
    Energizing,
}

impl EnergyLevel {
    pub const MIN: i32 = -5;
    pub const MAX: i32 = 5;
    pub const NEUTRAL: EnergyLevel = EnergyLevel(0);

    /// Validate a raw level, rejecting values outside the scale
    pub fn new(level: i32) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&level).then_some(Self(level))
    }

    /// Slider semantics: out-of-range input snaps to the nearest end
    pub fn clamped(level: i32) -> Self {
        Self(level.clamp(Self::MIN, Self::MAX))
    }

    pub fn value(self) -> i32 {
        self.0
    }

    pub fn is_neutral(self) -> bool {
        self.0 == 0
    }

    pub fn label(self) -> &'static str {
        energy_label(self.0)
    }

    pub fn tone(self) -> EnergyTone {
        match self.0 {
            l if l < 0 => EnergyTone::Restoring,
            0 => EnergyTone::Neutral,
            _ => EnergyTone::Energizing,
        }
    }
}

impl fmt::Display for EnergyLevel {
    /// Signed readout, e.g. `+3`, `0`, `-2`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 > 0 {
            write!(f, "+{}", self.0)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

/// Display label for a raw level as stored on a moment
///
/// Works on unvalidated values so that out-of-range data from the backend
/// still renders.
pub fn energy_label(level: i32) -> &'static str {
    if level <= -3 {
        "极度治愈"
    } else if level <= -1 {
        "舒缓放松"
    } else if level == 0 {
        "平和"
    } else if level <= 2 {
        "激昂"
    } else {
        "极度激情"
    }
}
