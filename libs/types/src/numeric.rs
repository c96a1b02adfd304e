//! Wei-denominated amounts
//!
//! Every balance in the registry is an unsigned integer count of wei.
//! Ether-denominated decimals only appear at the edges, converted through
//! rust_decimal so no floating-point rounding ever touches a balance.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::AmountError;

/// Number of wei in one ether
pub const WEI_PER_ETHER: u64 = 1_000_000_000_000_000_000;

/// Decimal places between wei and ether
pub const ETHER_DECIMALS: u32 = 18;

/// Non-negative amount in wei
///
/// Arithmetic is checked only; callers decide how to surface overflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(u128);

impl Amount {
    pub const ZERO: Amount = Amount(0);

    pub const fn from_wei(wei: u128) -> Self {
        Self(wei)
    }

    /// Whole ether amount
    pub const fn ether(whole: u64) -> Self {
        Self(whole as u128 * WEI_PER_ETHER as u128)
    }

    pub const fn as_wei(&self) -> u128 {
        self.0
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn checked_add(self, other: Amount) -> Option<Amount> {
        self.0.checked_add(other.0).map(Amount)
    }

    pub fn checked_sub(self, other: Amount) -> Option<Amount> {
        self.0.checked_sub(other.0).map(Amount)
    }

    /// Convert an ether-denominated decimal into wei.
    ///
    /// Rejects negative values and values finer than one wei.
    pub fn from_ether(ether: Decimal) -> Result<Self, AmountError> {
        if ether.is_sign_negative() && !ether.is_zero() {
            return Err(AmountError::Negative {
                value: ether.to_string(),
            });
        }

        let wei = ether
            .checked_mul(Decimal::from(WEI_PER_ETHER))
            .ok_or_else(|| AmountError::OutOfRange {
                value: ether.to_string(),
            })?;

        if !wei.fract().is_zero() {
            return Err(AmountError::SubWeiPrecision {
                value: ether.to_string(),
            });
        }

        wei.trunc()
            .to_u128()
            .map(Amount)
            .ok_or_else(|| AmountError::OutOfRange {
                value: ether.to_string(),
            })
    }

    /// Express this amount in ether.
    ///
    /// Fails only for amounts beyond the 96-bit decimal mantissa.
    pub fn to_ether(&self) -> Result<Decimal, AmountError> {
        let out_of_range = || AmountError::OutOfRange {
            value: self.0.to_string(),
        };
        let wei = i128::try_from(self.0).map_err(|_| out_of_range())?;
        Decimal::try_from_i128_with_scale(wei, ETHER_DECIMALS)
            .map(|d| d.normalize())
            .map_err(|_| out_of_range())
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u128> for Amount {
    fn from(wei: u128) -> Self {
        Self(wei)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_ether_constructor() {
        assert_eq!(Amount::ether(1).as_wei(), 1_000_000_000_000_000_000);
        assert_eq!(Amount::ether(0), Amount::ZERO);
    }

    #[test]
    fn test_from_ether_whole_and_fractional() {
        let five = Amount::from_ether(Decimal::from(5)).unwrap();
        assert_eq!(five, Amount::ether(5));

        let half = Amount::from_ether(Decimal::from_str("0.5").unwrap()).unwrap();
        assert_eq!(half.as_wei(), 500_000_000_000_000_000);

        let one_wei = Amount::from_ether(Decimal::from_str("0.000000000000000001").unwrap()).unwrap();
        assert_eq!(one_wei.as_wei(), 1);
    }

    #[test]
    fn test_from_ether_rejects_negative() {
        let result = Amount::from_ether(Decimal::from(-1));
        assert!(matches!(result, Err(AmountError::Negative { .. })));
    }

    #[test]
    fn test_from_ether_rejects_sub_wei() {
        let result = Amount::from_ether(Decimal::from_str("0.0000000000000000001").unwrap());
        assert!(matches!(result, Err(AmountError::SubWeiPrecision { .. })));
    }

    #[test]
    fn test_to_ether() {
        let amount = Amount::from_wei(1_500_000_000_000_000_000);
        assert_eq!(amount.to_ether().unwrap(), Decimal::from_str("1.5").unwrap());
        assert_eq!(Amount::ZERO.to_ether().unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_to_ether_out_of_range() {
        let huge = Amount::from_wei(u128::MAX);
        assert!(matches!(huge.to_ether(), Err(AmountError::OutOfRange { .. })));
    }

    #[test]
    fn test_checked_arithmetic() {
        let max = Amount::from_wei(u128::MAX);
        assert_eq!(max.checked_add(Amount::from_wei(1)), None);
        assert_eq!(Amount::ZERO.checked_sub(Amount::from_wei(1)), None);
        assert_eq!(
            Amount::ether(2).checked_sub(Amount::ether(1)),
            Some(Amount::ether(1))
        );
    }

    #[test]
    fn test_amount_serializes_as_integer() {
        let json = serde_json::to_string(&Amount::from_wei(42)).unwrap();
        assert_eq!(json, "42");
    }
}
