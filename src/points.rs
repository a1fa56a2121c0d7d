//! Signed whole-point amount type.
//!
//! Loyalty points are integral; this newtype keeps point arithmetic out of
//! raw `i64` territory and gives the crate one place for parsing, display,
//! and serialization.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::num::ParseIntError;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use std::str::FromStr;

/// A signed amount of loyalty points.
///
/// Negative amounts represent corrections issued by a payer.
///
/// # Examples
///
/// ```
/// use std::str::FromStr;
/// use points_engine::Points;
///
/// let amount = Points::from_str("300").unwrap();
/// assert_eq!(amount.to_string(), "300");
/// assert!(amount > Points::ZERO);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub struct Points(i64);

impl Points {
    /// Zero points.
    pub const ZERO: Self = Points(0);

    /// Creates a point amount from a raw integer.
    pub fn new(value: i64) -> Self {
        Points(value)
    }

    /// Returns the raw integer value.
    pub fn get(self) -> i64 {
        self.0
    }

    /// Returns `true` if this amount is zero.
    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if this amount is strictly positive.
    pub fn is_positive(self) -> bool {
        self.0 > 0
    }
}

impl FromStr for Points {
    type Err = ParseIntError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        s.trim().parse::<i64>().map(Points)
    }
}

impl fmt::Display for Points {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Add for Points {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Points(self.0 + rhs.0)
    }
}

impl AddAssign for Points {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Points {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Points(self.0 - rhs.0)
    }
}

impl SubAssign for Points {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl Neg for Points {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Points(-self.0)
    }
}

impl Serialize for Points {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_i64(self.0)
    }
}

impl<'de> Deserialize<'de> for Points {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        i64::deserialize(deserializer).map(Points)
    }
}
