//! Money with exact two-decimal precision.
//!
//! Amounts are stored in minor units (cents). Every rounding decision in the
//! ledger happens once, at the cent, so sums are exact.

use core::fmt;
use core::iter::Sum;
use core::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use core::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{DomainError, DomainResult};
use crate::value_object::ValueObject;

/// Minor units per major currency unit.
pub const MINOR_PER_UNIT: i64 = 100;

// Largest magnitude accepted from decimal input (well inside f64's exact range).
const MAX_MINOR: i64 = 1_000_000_000_000_000;

/// Signed monetary amount in minor units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl ValueObject for Money {}

impl Money {
    pub const ZERO: Money = Money(0);

    /// One major currency unit.
    pub const UNIT: Money = Money(MINOR_PER_UNIT);

    pub const fn from_minor(minor: i64) -> Self {
        Self(minor)
    }

    pub const fn from_major(major: i64) -> Self {
        Self(major * MINOR_PER_UNIT)
    }

    pub const fn minor(self) -> i64 {
        self.0
    }

    /// Convert a decimal number in major units.
    ///
    /// Rejects non-finite values, values beyond the supported range, and values
    /// with more than two fractional digits.
    pub fn from_major_f64(value: f64) -> DomainResult<Self> {
        if !value.is_finite() {
            return Err(DomainError::invalid_amount(format!("{value} is not finite")));
        }
        let scaled = value * MINOR_PER_UNIT as f64;
        let rounded = scaled.round();
        if (scaled - rounded).abs() > 1e-6 {
            return Err(DomainError::invalid_amount(format!(
                "{value} has more than two decimals"
            )));
        }
        if rounded.abs() > MAX_MINOR as f64 {
            return Err(DomainError::invalid_amount(format!("{value} is out of range")));
        }
        Ok(Self(rounded as i64))
    }

    pub fn to_major_f64(self) -> f64 {
        self.0 as f64 / MINOR_PER_UNIT as f64
    }

    pub fn abs(self) -> Self {
        Self(self.0.abs())
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub fn is_positive(self) -> bool {
        self.0 > 0
    }

    pub fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Sum that reports `None` instead of overflowing.
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }

    /// Divide by `parts`, rounding half away from zero to the cent.
    ///
    /// Returns `None` when `parts` is zero.
    pub fn round_div(self, parts: usize) -> Option<Self> {
        if parts == 0 {
            return None;
        }
        let n = i64::try_from(parts).ok()?;
        let q = self.0 / n;
        let r = self.0 % n;
        let q = if 2 * r.abs() >= n { q + self.0.signum() } else { q };
        Some(Self(q))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let unit = MINOR_PER_UNIT as u64;
        write!(f, "{sign}{}.{:02}", abs / unit, abs % unit)
    }
}

impl FromStr for Money {
    type Err = DomainError;

    /// Parse an exact decimal such as `33.34`, `-5` or `0.5`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DomainError::invalid_amount(format!("{s:?} is not a decimal amount"));

        let (negative, digits) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        let (whole, frac) = match digits.split_once('.') {
            Some((w, f)) => (w, f),
            None => (digits, ""),
        };
        if whole.is_empty()
            || frac.len() > 2
            || !whole.bytes().all(|b| b.is_ascii_digit())
            || !frac.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }

        let whole: i64 = whole.parse().map_err(|_| invalid())?;
        let frac_minor: i64 = match frac.len() {
            0 => 0,
            1 => frac.parse::<i64>().map_err(|_| invalid())? * 10,
            _ => frac.parse().map_err(|_| invalid())?,
        };
        let minor = whole
            .checked_mul(MINOR_PER_UNIT)
            .and_then(|w| w.checked_add(frac_minor))
            .filter(|m| *m <= MAX_MINOR)
            .ok_or_else(invalid)?;

        Ok(Self(if negative { -minor } else { minor }))
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.to_major_f64())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        Money::from_major_f64(value).map_err(|e| match e {
            DomainError::InvalidAmount(msg) => serde::de::Error::custom(msg),
            other => serde::de::Error::custom(other),
        })
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}
