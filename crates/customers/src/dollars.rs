//! Money amounts in dollars.
//!
//! Amounts are kept in whole cents (the smallest currency unit) so arithmetic is
//! exact. Negative amounts and fractions of a cent cannot be represented.

use core::iter::Sum;
use core::ops::{Add, AddAssign};

use serde::{Deserialize, Serialize};

use cinerent_core::{DomainError, DomainResult, ValueObject};

/// A non-negative amount of dollars.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64")]
pub struct Dollars(u64);

impl Dollars {
    pub const ZERO: Dollars = Dollars(0);

    /// Upper bound for a single constructed amount: one million dollars.
    pub const MAX_CENTS: u64 = 1_000_000 * 100;

    pub fn from_cents(cents: i64) -> DomainResult<Self> {
        let cents = u64::try_from(cents)
            .map_err(|_| DomainError::validation("dollar amount cannot be negative"))?;
        Self::checked(cents)
    }

    pub fn whole(dollars: i64) -> DomainResult<Self> {
        if dollars < 0 {
            return Err(DomainError::validation("dollar amount cannot be negative"));
        }
        let cents = dollars
            .checked_mul(100)
            .ok_or_else(|| DomainError::validation("dollar amount is too large"))?;
        Self::from_cents(cents)
    }

    /// Parse a decimal amount such as `"12"`, `"12.5"` or `"12.50"`.
    pub fn parse(input: &str) -> DomainResult<Self> {
        let s = input.trim();
        if s.starts_with('-') {
            return Err(DomainError::validation("dollar amount cannot be negative"));
        }

        let (whole, fraction) = s.split_once('.').unwrap_or((s, ""));
        let is_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if whole.is_empty() || !is_digits(whole) || !is_digits(fraction) {
            return Err(DomainError::validation(format!(
                "dollar amount is not a number: {input:?}"
            )));
        }
        if fraction.bytes().skip(2).any(|b| b != b'0') {
            return Err(DomainError::validation(
                "dollar amount cannot contain part of a penny",
            ));
        }

        let fraction_cents = fraction
            .bytes()
            .chain(core::iter::repeat(b'0'))
            .take(2)
            .fold(0u64, |acc, b| acc * 10 + u64::from(b - b'0'));

        let cents = whole
            .parse::<u64>()
            .ok()
            .and_then(|d| d.checked_mul(100))
            .and_then(|c| c.checked_add(fraction_cents))
            .ok_or_else(|| DomainError::validation("dollar amount is too large"))?;

        Self::checked(cents)
    }

    /// For amounts known to be within bounds at compile time.
    pub(crate) const fn from_cents_unchecked(cents: u64) -> Self {
        Self(cents)
    }

    fn checked(cents: u64) -> DomainResult<Self> {
        if cents > Self::MAX_CENTS {
            return Err(DomainError::validation(
                "dollar amount cannot be greater than 1,000,000",
            ));
        }
        Ok(Self(cents))
    }

    pub fn cents(self) -> u64 {
        self.0
    }

    /// Whole-dollar amounts without cents (`"100"`), others as `Display` does (`"12.50"`).
    pub fn to_plain_string(self) -> String {
        if self.0 % 100 == 0 {
            (self.0 / 100).to_string()
        } else {
            self.to_string()
        }
    }

    /// This amount scaled by `percent` (100 = unchanged), rounded half-up to the cent.
    pub fn percent(self, percent: u32) -> Self {
        let scaled = (u128::from(self.0) * u128::from(percent) + 50) / 100;
        Self(u64::try_from(scaled).unwrap_or(u64::MAX))
    }
}

impl ValueObject for Dollars {}

impl core::fmt::Display for Dollars {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl TryFrom<i64> for Dollars {
    type Error = DomainError;

    fn try_from(cents: i64) -> Result<Self, Self::Error> {
        Self::from_cents(cents)
    }
}

// Totals may exceed the single-amount bound; they saturate instead of wrapping.
impl Add for Dollars {
    type Output = Dollars;

    fn add(self, rhs: Dollars) -> Dollars {
        Dollars(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Dollars {
    fn add_assign(&mut self, rhs: Dollars) {
        *self = *self + rhs;
    }
}

impl Sum for Dollars {
    fn sum<I: Iterator<Item = Dollars>>(iter: I) -> Self {
        iter.fold(Dollars::ZERO, Add::add)
    }
}
