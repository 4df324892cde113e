//! Fixed-point decimal used for redemption rates and their bounds.
//!
//! A [`Dec`] stores its value as an integer number of atomics with 18 fractional digits. All
//! multiplications and divisions against token amounts round down and are computed in 256-bit
//! precision so that the product of two `u128` values never overflows mid-computation.

use std::{fmt, str::FromStr};

use ethnum::U256;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::{errors::ParseError, types::Amount};

/// Number of fractional digits carried by a [`Dec`].
pub const DECIMAL_PLACES: u32 = 18;

/// `10^DECIMAL_PLACES`.
const DECIMAL_FRACTIONAL: u128 = 1_000_000_000_000_000_000;

/// A non-negative fixed-point decimal with 18 fractional digits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Dec(u128);

impl Dec {
    /// Zero.
    pub const ZERO: Self = Self(0);

    /// One.
    pub const ONE: Self = Self(DECIMAL_FRACTIONAL);

    /// Creates a decimal from its raw atomics (value × 10^18).
    pub const fn from_atomics(atomics: u128) -> Self {
        Self(atomics)
    }

    /// Returns the raw atomics (value × 10^18).
    pub const fn atomics(&self) -> u128 {
        self.0
    }

    /// Creates a decimal from a whole number, returning `None` on overflow.
    pub fn from_int(value: u128) -> Option<Self> {
        value.checked_mul(DECIMAL_FRACTIONAL).map(Self)
    }

    /// Creates a decimal equal to `value / 100`.
    pub const fn percent(value: u64) -> Self {
        Self(value as u128 * (DECIMAL_FRACTIONAL / 100))
    }

    /// Returns `floor(numerator / denominator)` as a decimal.
    ///
    /// Returns `None` if the denominator is zero or if the result does not fit.
    pub fn from_ratio(numerator: u128, denominator: u128) -> Option<Self> {
        if denominator == 0 {
            return None;
        }

        let atomics = U256::new(numerator) * U256::new(DECIMAL_FRACTIONAL) / U256::new(denominator);
        to_u128(atomics).map(Self)
    }

    /// Returns `true` if the value is zero.
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if the value is strictly greater than zero.
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Returns `floor(amount × self)`, or `None` if the product does not fit in an [`Amount`].
    pub fn mul_floor(&self, amount: Amount) -> Option<Amount> {
        let product = U256::new(amount) * U256::new(self.0) / U256::new(DECIMAL_FRACTIONAL);
        to_u128(product)
    }

    /// Returns `floor(amount / self)`, or `None` if `self` is zero or the quotient does not fit.
    pub fn div_floor(&self, amount: Amount) -> Option<Amount> {
        if self.0 == 0 {
            return None;
        }

        let quotient = U256::new(amount) * U256::new(DECIMAL_FRACTIONAL) / U256::new(self.0);
        to_u128(quotient)
    }
}

fn to_u128(value: U256) -> Option<u128> {
    (value <= U256::new(u128::MAX)).then(|| value.as_u128())
}

impl fmt::Display for Dec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / DECIMAL_FRACTIONAL;
        let fractional = self.0 % DECIMAL_FRACTIONAL;

        if fractional == 0 {
            return write!(f, "{whole}");
        }

        let digits = format!("{fractional:018}");
        write!(f, "{whole}.{}", digits.trim_end_matches('0'))
    }
}

impl FromStr for Dec {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseError::InvalidDecimal(s.to_string());

        let (whole, fractional) = match s.split_once('.') {
            Some((whole, fractional)) => (whole, fractional),
            None => (s, ""),
        };

        if whole.is_empty() || !whole.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }
        if fractional.len() > DECIMAL_PLACES as usize
            || !fractional.chars().all(|c| c.is_ascii_digit())
            || (s.contains('.') && fractional.is_empty())
        {
            return Err(invalid());
        }

        let whole: u128 = whole.parse().map_err(|_| invalid())?;
        let padded = format!("{fractional:0<18}");
        let fractional: u128 = padded.parse().map_err(|_| invalid())?;

        whole
            .checked_mul(DECIMAL_FRACTIONAL)
            .and_then(|w| w.checked_add(fractional))
            .map(Self)
            .ok_or_else(invalid)
    }
}

impl Serialize for Dec {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Dec {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}
