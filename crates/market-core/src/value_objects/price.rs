//! Price value object - NUMERIC(10,2) money amount

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Price errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PriceError {
    #[error("A valid number is required.")]
    Invalid,
    #[error("Ensure this value is greater than or equal to 0.")]
    Negative,
    #[error("Ensure that there are no more than {0} decimal places.")]
    TooManyDecimals(u32),
    #[error("Ensure that there are no more than {0} digits before the decimal point.")]
    TooManyDigits(u32),
}

/// Non-negative amount with at most 10 digits, 2 of them decimals
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Price(Decimal);

impl Price {
    pub const SCALE: u32 = 2;
    pub const MAX_INTEGER_DIGITS: u32 = 8;

    /// Validate and wrap a decimal amount
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative);
        }
        let normalized = amount.normalize();
        if normalized.scale() > Self::SCALE {
            return Err(PriceError::TooManyDecimals(Self::SCALE));
        }
        if normalized.trunc() >= Decimal::from(10_i64.pow(Self::MAX_INTEGER_DIGITS)) {
            return Err(PriceError::TooManyDigits(Self::MAX_INTEGER_DIGITS));
        }

        let mut value = normalized;
        value.rescale(Self::SCALE);
        Ok(Self(value))
    }

    /// Parse a decimal string such as `"19.99"`
    pub fn parse(s: &str) -> Result<Self, PriceError> {
        let amount = Decimal::from_str(s.trim()).map_err(|_| PriceError::Invalid)?;
        Self::new(amount)
    }

    #[inline]
    pub fn amount(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<Decimal> for Price {
    type Error = PriceError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Self {
        price.0
    }
}

impl FromStr for Price {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
