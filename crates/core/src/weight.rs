//! Carried weight, kept in fixed-point hundredths.
//!
//! Item documents give weights as decimal numbers. Budgets are added to and
//! subtracted from on every push and pop, so they are tracked as a whole
//! number of hundredths and only turned back into `f64` for display.

use serde::{Deserialize, Serialize};

use crate::value_object::ValueObject;

pub const HUNDREDTHS_PER_UNIT: i64 = 100;

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Weight(i64);

impl ValueObject for Weight {}

impl Weight {
    pub const ZERO: Weight = Weight(0);

    pub const fn from_hundredths(hundredths: i64) -> Self {
        Self(hundredths)
    }

    /// Nearest hundredth of `value`. Out-of-range values saturate.
    pub fn from_f64(value: f64) -> Self {
        Self((value * HUNDREDTHS_PER_UNIT as f64).round() as i64)
    }

    pub const fn hundredths(self) -> i64 {
        self.0
    }

    pub fn as_f64(self) -> f64 {
        self.0 as f64 / HUNDREDTHS_PER_UNIT as f64
    }

    /// `self - other`, or `None` when `other` is heavier.
    pub fn checked_sub(self, other: Weight) -> Option<Weight> {
        self.0
            .checked_sub(other.0)
            .filter(|rest| *rest >= 0)
            .map(Weight)
    }

    pub fn saturating_add(self, other: Weight) -> Weight {
        Weight(self.0.saturating_add(other.0))
    }
}

impl core::fmt::Display for Weight {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:.2}", self.as_f64())
    }
}
