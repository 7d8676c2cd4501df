use crate::error::ConfigError;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Minor units per major currency unit (cents per dollar).
const MINOR_PER_MAJOR: Decimal = dec!(100);

/// A transaction price expressed as a whole number of minor currency units.
///
/// Prices never go through floating point. A major-unit amount is scaled and
/// rounded half away from zero, so `0.5` becomes `50` and `0.125` becomes `13`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Price(u64);

impl Price {
    pub const ZERO: Self = Self(0);

    pub fn from_minor_units(units: u64) -> Self {
        Self(units)
    }

    /// Converts an amount in major units (e.g. dollars) into minor units.
    pub fn from_major(amount: Decimal) -> Result<Self, ConfigError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(ConfigError::InvalidPrice(format!("{amount} is negative")));
        }
        amount
            .checked_mul(MINOR_PER_MAJOR)
            .map(|scaled| scaled.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
            .and_then(|rounded| rounded.to_u64())
            .map(Self)
            .ok_or_else(|| ConfigError::InvalidPrice(format!("{amount} is out of range")))
    }

    pub fn minor_units(&self) -> u64 {
        self.0
    }
}

impl From<Price> for u64 {
    fn from(price: Price) -> Self {
        price.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
