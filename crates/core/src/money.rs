//! Currency model: gold, silver and copper pieces.
//!
//! All arithmetic goes through a single integer "smallest unit" count:
//! 1 gp = 10000, 1 sp = 100, 1 cp = 1. Results are always renormalized, so
//! callers may rely on the total value but not on the split between coins.

use core::str::FromStr;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::DomainError;
use crate::value_object::ValueObject;

pub const SMALLEST_UNITS_PER_GOLD: i64 = 10_000;
pub const SMALLEST_UNITS_PER_SILVER: i64 = 100;
pub const SMALLEST_UNITS_PER_COPPER: i64 = 1;

/// Coin kind, written as its two-letter code in item documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Denomination {
    #[serde(rename = "gp")]
    Gold,
    #[serde(rename = "sp")]
    Silver,
    #[serde(rename = "cp")]
    Copper,
}

impl Denomination {
    /// Denominations in conversion order (largest first).
    pub const ALL: [Denomination; 3] = [Self::Gold, Self::Silver, Self::Copper];

    pub fn code(self) -> &'static str {
        match self {
            Self::Gold => "gp",
            Self::Silver => "sp",
            Self::Copper => "cp",
        }
    }

    pub fn smallest_units(self) -> i64 {
        match self {
            Self::Gold => SMALLEST_UNITS_PER_GOLD,
            Self::Silver => SMALLEST_UNITS_PER_SILVER,
            Self::Copper => SMALLEST_UNITS_PER_COPPER,
        }
    }
}

impl core::fmt::Display for Denomination {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Denomination {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gp" => Ok(Self::Gold),
            "sp" => Ok(Self::Silver),
            "cp" => Ok(Self::Copper),
            other => Err(DomainError::validation(format!(
                "unknown coin unit `{other}` (expected gp, sp or cp)"
            ))),
        }
    }
}

/// A purse of coins.
///
/// Plain value object: fields are not bounded and may in principle hold
/// negative values. The inventory only ever produces non-negative balances.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Money {
    pub gold: i64,
    pub silver: i64,
    pub copper: i64,
}

impl ValueObject for Money {}

impl Money {
    pub const fn new(gold: i64, silver: i64, copper: i64) -> Self {
        Self {
            gold,
            silver,
            copper,
        }
    }

    pub const fn zero() -> Self {
        Self::new(0, 0, 0)
    }

    /// `amount` coins of a single denomination.
    pub fn from_coins(amount: i64, denomination: Denomination) -> Self {
        match denomination {
            Denomination::Gold => Self::new(amount, 0, 0),
            Denomination::Silver => Self::new(0, amount, 0),
            Denomination::Copper => Self::new(0, 0, amount),
        }
    }

    pub fn to_smallest_unit(&self) -> i64 {
        self.gold * SMALLEST_UNITS_PER_GOLD
            + self.silver * SMALLEST_UNITS_PER_SILVER
            + self.copper * SMALLEST_UNITS_PER_COPPER
    }

    /// Split a smallest-unit total into coins, gold first.
    pub fn from_smallest_unit(total: i64) -> Self {
        let gold = total / SMALLEST_UNITS_PER_GOLD;
        let rest = total % SMALLEST_UNITS_PER_GOLD;
        Self {
            gold,
            silver: rest / SMALLEST_UNITS_PER_SILVER,
            copper: rest % SMALLEST_UNITS_PER_SILVER,
        }
    }

    /// Same value, minimal coin split.
    pub fn normalized(&self) -> Self {
        Self::from_smallest_unit(self.to_smallest_unit())
    }

    pub fn is_zero(&self) -> bool {
        self.to_smallest_unit() == 0
    }

    /// Pay `cost` out of this purse.
    ///
    /// All or nothing: fails when the purse holds less than `cost`.
    pub fn subtract(&self, cost: &Money) -> Result<Money, InsufficientFunds> {
        let available = self.to_smallest_unit();
        let required = cost.to_smallest_unit();
        if available < required {
            return Err(InsufficientFunds {
                available: *self,
                required: *cost,
            });
        }
        Ok(Self::from_smallest_unit(available - required))
    }

    /// Put `amount` into this purse. Always succeeds.
    pub fn add(&self, amount: &Money) -> Money {
        Self::from_smallest_unit(self.to_smallest_unit() + amount.to_smallest_unit())
    }
}

impl core::fmt::Display for Money {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}gp {}sp {}cp", self.gold, self.silver, self.copper)
    }
}

/// Rejection raised by [`Money::subtract`].
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error(
    "insufficient funds: costs {required}, only {available} available ({} short)",
    missing_amount(.available, .required)
)]
pub struct InsufficientFunds {
    pub available: Money,
    pub required: Money,
}

impl InsufficientFunds {
    /// Missing amount, normalized.
    pub fn shortfall(&self) -> Money {
        missing_amount(&self.available, &self.required)
    }
}

fn missing_amount(available: &Money, required: &Money) -> Money {
    Money::from_smallest_unit(required.to_smallest_unit() - available.to_smallest_unit())
}

/// Parse a single coin token such as `42sp`.
pub fn parse_coin_token(token: &str) -> Result<(u32, Denomination), DomainError> {
    let split = token
        .find(|c: char| !c.is_ascii_digit())
        .ok_or_else(|| DomainError::validation(format!("`{token}` has no coin unit")))?;
    let (digits, unit) = token.split_at(split);
    if digits.is_empty() {
        return Err(DomainError::validation(format!("`{token}` has no coin amount")));
    }
    let amount = digits
        .parse::<u32>()
        .map_err(|e| DomainError::validation(format!("`{token}`: {e}")))?;
    Ok((amount, unit.parse()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn converts_mixed_purse_to_smallest_units() {
        assert_eq!(Money::new(4, 42, 69).to_smallest_unit(), 44_269);
    }

    #[test]
    fn splits_gold_first() {
        assert_eq!(Money::from_smallest_unit(44_269), Money::new(4, 42, 69));
        assert_eq!(Money::from_smallest_unit(99), Money::new(0, 0, 99));
        assert_eq!(Money::from_smallest_unit(10_000), Money::new(1, 0, 0));
    }

    #[test]
    fn paying_fifty_copper_renormalizes() {
        let remaining = Money::new(4, 42, 69).subtract(&Money::new(0, 0, 50)).unwrap();
        assert_eq!(remaining.to_smallest_unit(), 44_219);
        assert_eq!(remaining, Money::new(4, 42, 19));
    }

    #[test]
    fn paying_more_than_available_fails_with_shortfall() {
        let err = Money::new(0, 5, 0).subtract(&Money::new(1, 0, 0)).unwrap_err();
        assert_eq!(err.available, Money::new(0, 5, 0));
        assert_eq!(err.shortfall(), Money::new(0, 95, 0));
    }

    #[test]
    fn paying_exact_amount_leaves_empty_purse() {
        let remaining = Money::new(0, 1, 0).subtract(&Money::new(0, 0, 100)).unwrap();
        assert!(remaining.is_zero());
    }

    #[test]
    fn add_renormalizes_coins() {
        let total = Money::new(0, 99, 99).add(&Money::new(0, 0, 1));
        assert_eq!(total, Money::new(1, 0, 0));
    }

    #[test]
    fn denomination_codes_round_trip() {
        for d in Denomination::ALL {
            assert_eq!(d.code().parse::<Denomination>().unwrap(), d);
        }
        assert!("pp".parse::<Denomination>().is_err());
    }

    #[test]
    fn parses_coin_tokens() {
        assert_eq!(parse_coin_token("42sp").unwrap(), (42, Denomination::Silver));
        assert!(parse_coin_token("gp").is_err());
        assert!(parse_coin_token("12").is_err());
        assert!(parse_coin_token("3gpx").is_err());
    }

    #[test]
    fn displays_all_three_coins() {
        assert_eq!(Money::new(15, 0, 3).to_string(), "15gp 0sp 3cp");
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 512,
            ..ProptestConfig::default()
        })]

        /// Property: splitting and re-totalling is lossless for non-negative totals.
        #[test]
        fn smallest_unit_round_trip(x in 0i64..=i64::from(u32::MAX) * 10_000) {
            prop_assert_eq!(Money::from_smallest_unit(x).to_smallest_unit(), x);
        }

        /// Property: subtraction fails exactly when the purse is too small.
        #[test]
        fn subtract_fails_iff_purse_too_small(
            a in (0i64..100_000, 0i64..1_000, 0i64..1_000),
            c in (0i64..100_000, 0i64..1_000, 0i64..1_000),
        ) {
            let available = Money::new(a.0, a.1, a.2);
            let cost = Money::new(c.0, c.1, c.2);
            match available.subtract(&cost) {
                Ok(rest) => {
                    prop_assert!(available.to_smallest_unit() >= cost.to_smallest_unit());
                    prop_assert_eq!(
                        rest.to_smallest_unit(),
                        available.to_smallest_unit() - cost.to_smallest_unit()
                    );
                }
                Err(_) => {
                    prop_assert!(available.to_smallest_unit() < cost.to_smallest_unit());
                }
            }
        }

        /// Property: addition always succeeds and preserves the total.
        #[test]
        fn add_preserves_total(
            a in (0i64..100_000, 0i64..1_000, 0i64..1_000),
            b in (0i64..100_000, 0i64..1_000, 0i64..1_000),
        ) {
            let left = Money::new(a.0, a.1, a.2);
            let right = Money::new(b.0, b.1, b.2);
            prop_assert_eq!(
                left.add(&right).to_smallest_unit(),
                left.to_smallest_unit() + right.to_smallest_unit()
            );
        }
    }
}
