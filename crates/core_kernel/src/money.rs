//! Claim amounts
//!
//! Claims carry a plain decimal amount with no currency. An amount is never
//! negative and must fit the stored `NUMERIC(18,2)` column: at most two
//! decimal places and sixteen integer digits.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors that can occur when building an amount
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AmountError {
    #[error("Amount must not be negative, got {0}")]
    Negative(Decimal),

    #[error("Amount {0} has more than two decimal places")]
    TooPrecise(Decimal),

    #[error("Amount {0} exceeds the maximum of {max}", max = ClaimAmount::MAX)]
    TooLarge(Decimal),
}

/// A non-negative monetary amount attached to a claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ClaimAmount(Decimal);

impl ClaimAmount {
    /// Largest amount the claims table can hold
    pub const MAX: Decimal = Decimal::from_parts(0xA763_FFFF, 0x0DE0_B6B3, 0, false, 2);

    /// Creates an amount, rejecting values the claims table cannot store exactly
    pub fn new(amount: Decimal) -> Result<Self, AmountError> {
        if amount < Decimal::ZERO {
            return Err(AmountError::Negative(amount));
        }
        // trailing zeros do not count, 12.500 is stored as 12.50
        if amount.normalize().scale() > 2 {
            return Err(AmountError::TooPrecise(amount));
        }
        if amount > Self::MAX {
            return Err(AmountError::TooLarge(amount));
        }
        Ok(Self(amount))
    }

    /// Creates a zero amount
    pub fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    /// Returns the underlying decimal
    pub fn amount(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for ClaimAmount {
    type Error = AmountError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ClaimAmount> for Decimal {
    fn from(amount: ClaimAmount) -> Decimal {
        amount.0
    }
}

impl<'de> Deserialize<'de> for ClaimAmount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let amount = <Decimal as Deserialize>::deserialize(deserializer)?;
        ClaimAmount::new(amount).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for ClaimAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_zero_is_allowed() {
        assert_eq!(ClaimAmount::new(dec!(0)).unwrap(), ClaimAmount::zero());
    }

    #[test]
    fn test_negative_zero_is_allowed() {
        assert!(ClaimAmount::new(dec!(-0.00)).is_ok());
    }

    #[test]
    fn test_negative_is_rejected() {
        assert_eq!(
            ClaimAmount::new(dec!(-0.01)),
            Err(AmountError::Negative(dec!(-0.01)))
        );
    }

    #[test]
    fn test_more_than_two_decimals_is_rejected() {
        assert_eq!(
            ClaimAmount::new(dec!(10.005)),
            Err(AmountError::TooPrecise(dec!(10.005)))
        );
        assert_eq!(ClaimAmount::new(dec!(12.500)).unwrap().amount(), dec!(12.500));
    }

    #[test]
    fn test_column_limit() {
        assert_eq!(ClaimAmount::MAX, dec!(9999999999999999.99));
        assert!(ClaimAmount::new(dec!(9999999999999999.99)).is_ok());
        assert_eq!(
            ClaimAmount::new(dec!(10000000000000000)),
            Err(AmountError::TooLarge(dec!(10000000000000000)))
        );
    }

    #[test]
    fn test_deserialize_validates() {
        let amount: ClaimAmount = serde_json::from_str("\"12.5\"").unwrap();
        assert_eq!(amount.amount(), dec!(12.5));

        let number: ClaimAmount = serde_json::from_str("12.5").unwrap();
        assert_eq!(number, amount);

        let negative = serde_json::from_str::<ClaimAmount>("\"-1\"").unwrap_err();
        assert!(negative.to_string().contains("must not be negative"));

        assert!(serde_json::from_str::<ClaimAmount>("1e17").is_err());
    }

    proptest! {
        #[test]
        fn non_negative_amounts_round_trip(cents in 0i64..1_000_000_000i64) {
            let value = Decimal::new(cents, 2);
            let amount = ClaimAmount::new(value).unwrap();
            prop_assert_eq!(amount.amount(), value);
        }

        #[test]
        fn negative_amounts_are_rejected(cents in 1i64..1_000_000_000i64) {
            prop_assert!(ClaimAmount::new(Decimal::new(-cents, 2)).is_err());
        }
    }
}
