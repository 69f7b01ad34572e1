//! Fixed-point currency
//!
//! Costs are tracked in integer micro-dollars so that accumulating many small
//! deltas never drifts. [`Usd`] is signed only so that a caller-supplied
//! negative delta can be represented and rejected; stored run totals are
//! never negative.
//!
//! [`UsdTotal`] sums amounts across runs. Every run total fits in an `i64`,
//! so an `i128` accumulator cannot overflow for any number of runs a process
//! can hold.

use crate::error::TrackerError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::ops::{Add, AddAssign};

const MICROS_PER_DOLLAR: i64 = 1_000_000;
const MICROS_PER_CENT: i64 = 10_000;
const FRACTION_DIGITS: usize = 6;

/// An amount of US dollars with micro-dollar precision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Usd(i64);

impl Usd {
    /// Zero dollars
    pub const ZERO: Usd = Usd(0);

    /// Create from micro-dollars
    pub const fn from_micros(micros: i64) -> Self {
        Usd(micros)
    }

    /// Create from cents
    pub const fn from_cents(cents: i64) -> Self {
        Usd(cents.saturating_mul(MICROS_PER_CENT))
    }

    /// Amount in micro-dollars
    pub const fn as_micros(&self) -> i64 {
        self.0
    }

    /// Check if the amount is below zero
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Checked addition, `None` on overflow
    pub fn checked_add(self, other: Usd) -> Option<Usd> {
        self.0.checked_add(other.0).map(Usd)
    }

    /// Amount in dollars as a float, for display or wire encoding only
    pub fn as_dollars_f64(&self) -> f64 {
        self.0 as f64 / MICROS_PER_DOLLAR as f64
    }

    /// Amount rounded half away from zero to whole cents
    pub fn round_to_cents(&self) -> i64 {
        round_to_cents(i128::from(self.0)) as i64
    }
}

fn round_to_cents(micros: i128) -> i128 {
    let per_cent = i128::from(MICROS_PER_CENT);
    let half = per_cent / 2;
    if micros >= 0 {
        (micros + half) / per_cent
    } else {
        (micros - half) / per_cent
    }
}

fn write_cents(f: &mut std::fmt::Formatter<'_>, micros: i128) -> std::fmt::Result {
    let cents = round_to_cents(micros);
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
}

/// Two decimal places, rounded half away from zero (`0.91`, `-1.00`)
impl std::fmt::Display for Usd {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write_cents(f, i128::from(self.0))
    }
}

/// Parses decimal dollar amounts: `0.91`, `12`, `-1`, `$0.000125`
///
/// At most six fractional digits are accepted.
impl std::str::FromStr for Usd {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || TrackerError::InvalidInput(format!("malformed dollar amount: {:?}", s));

        let trimmed = s.trim();
        let (negative, rest) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };
        let rest = rest.strip_prefix('$').unwrap_or(rest);
        let (whole, frac) = match rest.split_once('.') {
            Some((whole, frac)) => (whole, frac),
            None => (rest, ""),
        };
        if whole.is_empty() && frac.is_empty() {
            return Err(invalid());
        }
        if frac.len() > FRACTION_DIGITS
            || !whole.chars().all(|c| c.is_ascii_digit())
            || !frac.chars().all(|c| c.is_ascii_digit())
        {
            return Err(invalid());
        }

        let whole: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid())?
        };
        let frac_micros: i64 = if frac.is_empty() {
            0
        } else {
            let padded = format!("{:0<width$}", frac, width = FRACTION_DIGITS);
            padded.parse().map_err(|_| invalid())?
        };

        let micros = whole
            .checked_mul(MICROS_PER_DOLLAR)
            .and_then(|m| m.checked_add(frac_micros))
            .ok_or_else(invalid)?;
        Ok(Usd(if negative { -micros } else { micros }))
    }
}

/// Encoded as a JSON number of dollars, the shape presentation layers expect
impl Serialize for Usd {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_dollars_f64())
    }
}

impl<'de> Deserialize<'de> for Usd {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let dollars = f64::deserialize(deserializer)?;
        if !dollars.is_finite() {
            return Err(serde::de::Error::custom("dollar amount must be finite"));
        }
        Ok(Usd((dollars * MICROS_PER_DOLLAR as f64).round() as i64))
    }
}

/// Exact sum of [`Usd`] amounts across many runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct UsdTotal(i128);

impl UsdTotal {
    /// Zero dollars
    pub const ZERO: UsdTotal = UsdTotal(0);

    /// Total in micro-dollars
    pub const fn as_micros(&self) -> i128 {
        self.0
    }

    /// Total in dollars as a float, for display or wire encoding only
    pub fn as_dollars_f64(&self) -> f64 {
        self.0 as f64 / MICROS_PER_DOLLAR as f64
    }
}

impl From<Usd> for UsdTotal {
    fn from(amount: Usd) -> Self {
        UsdTotal(i128::from(amount.0))
    }
}

impl Add<Usd> for UsdTotal {
    type Output = UsdTotal;

    fn add(self, rhs: Usd) -> UsdTotal {
        UsdTotal(self.0 + i128::from(rhs.0))
    }
}

impl AddAssign<Usd> for UsdTotal {
    fn add_assign(&mut self, rhs: Usd) {
        *self = *self + rhs;
    }
}

impl std::iter::Sum<Usd> for UsdTotal {
    fn sum<I: Iterator<Item = Usd>>(iter: I) -> UsdTotal {
        iter.fold(UsdTotal::ZERO, Add::add)
    }
}

impl PartialEq<Usd> for UsdTotal {
    fn eq(&self, other: &Usd) -> bool {
        self.0 == i128::from(other.0)
    }
}

impl std::fmt::Display for UsdTotal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write_cents(f, self.0)
    }
}

impl Serialize for UsdTotal {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_dollars_f64())
    }
}

impl<'de> Deserialize<'de> for UsdTotal {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let dollars = f64::deserialize(deserializer)?;
        if !dollars.is_finite() {
            return Err(serde::de::Error::custom("dollar amount must be finite"));
        }
        Ok(UsdTotal((dollars * MICROS_PER_DOLLAR as f64).round() as i128))
    }
}
