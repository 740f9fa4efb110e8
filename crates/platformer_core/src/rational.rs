//! Exact rational distances for deterministic simulation.
//!
//! Vertical velocity accumulates fractional gravity every tick. Instead of
//! floating point (which can differ between CPUs) it is stored as an
//! unreduced numerator/denominator pair and only rounded to whole pixels
//! when applied to a position.
//!
//! # Representation
//!
//! - Fractions are never reduced: `{2, 4}` and `{1, 2}` compare as equal
//!   values but are different representations, so `==` is field equality.
//! - The sign may sit in either part. Comparisons and rounding account for
//!   a negative denominator without normalizing it away.
//! - A zero denominator is a precondition violation. Use
//!   [`RationalDistance::try_new`] when the input is untrusted.

use std::fmt;
use std::ops::{Add, AddAssign, Div, Neg};

use serde::{Deserialize, Serialize};

use crate::error::{PhysicsError, Result};

/// Signed integer unit of every position and size.
///
/// 64 bits leaves room for position × scale products and for the
/// cross-multiplications done by the sweep test.
pub type Distance = i64;

/// Exact fractional distance.
///
/// # Example
///
/// ```
/// use platformer_core::rational::RationalDistance;
///
/// let velocity = RationalDistance::new(3, 4) + RationalDistance::new(5, 6);
/// assert_eq!(velocity, RationalDistance::new(19, 12));
/// assert_eq!(velocity.round(), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RationalDistance {
    /// Numerator.
    pub numerator: Distance,
    /// Denominator. Never zero; may be negative.
    pub denominator: Distance,
}

impl RationalDistance {
    /// Zero, as `{0, 1}`.
    pub const ZERO: Self = Self {
        numerator: 0,
        denominator: 1,
    };

    /// Create a rational without validating the denominator.
    #[must_use]
    pub const fn new(numerator: Distance, denominator: Distance) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    /// Create a rational, rejecting a zero denominator.
    pub fn try_new(numerator: Distance, denominator: Distance) -> Result<Self> {
        if denominator == 0 {
            return Err(PhysicsError::ZeroDenominator);
        }
        Ok(Self::new(numerator, denominator))
    }

    /// Whole distance `{d, 1}`.
    #[must_use]
    pub const fn from_distance(distance: Distance) -> Self {
        Self::new(distance, 1)
    }

    /// Add two rationals over their least common denominator.
    ///
    /// # Errors
    ///
    /// Returns [`PhysicsError::RationalOverflow`] when the common
    /// denominator or either scaled numerator does not fit in a
    /// [`Distance`].
    pub fn checked_add(self, other: Self) -> Result<Self> {
        let overflow = || PhysicsError::RationalOverflow {
            augend: self,
            addend: other,
        };
        let common = common_denominator(self.denominator, other.denominator).ok_or_else(overflow)?;
        let numerator = scale_numerator(self, common)
            .zip(scale_numerator(other, common))
            .and_then(|(a, b)| a.checked_add(b))
            .ok_or_else(overflow)?;
        Ok(Self::new(numerator, common))
    }

    /// Exact `self < other`.
    #[must_use]
    pub fn less_than(self, other: Self) -> bool {
        let lhs = i128::from(self.numerator) * i128::from(other.denominator);
        let rhs = i128::from(other.numerator) * i128::from(self.denominator);
        if signs_differ(self.denominator, other.denominator) {
            lhs > rhs
        } else {
            lhs < rhs
        }
    }

    /// Exact `self > other`.
    #[must_use]
    pub fn greater_than(self, other: Self) -> bool {
        other.less_than(self)
    }

    /// Exact `self < distance`.
    #[must_use]
    pub fn less_than_distance(self, distance: Distance) -> bool {
        let numerator = i128::from(self.numerator);
        let scaled = i128::from(distance) * i128::from(self.denominator);
        if self.denominator < 0 {
            numerator > scaled
        } else {
            numerator < scaled
        }
    }

    /// Exact `self > distance`.
    #[must_use]
    pub fn greater_than_distance(self, distance: Distance) -> bool {
        let numerator = i128::from(self.numerator);
        let scaled = i128::from(distance) * i128::from(self.denominator);
        if self.denominator < 0 {
            numerator < scaled
        } else {
            numerator > scaled
        }
    }

    /// True when the value is below zero.
    #[must_use]
    pub fn is_negative(self) -> bool {
        self.less_than_distance(0)
    }

    /// Round to the nearest whole distance, halves away from zero.
    #[must_use]
    pub fn round(self) -> Distance {
        let truncated = self.numerator / self.denominator;
        let remainder = (self.numerator % self.denominator).abs();
        if remainder < (self.denominator.abs() + 1) / 2 {
            truncated
        } else if signs_differ(self.numerator, self.denominator) {
            truncated - 1
        } else {
            truncated + 1
        }
    }
}

impl Default for RationalDistance {
    fn default() -> Self {
        Self::ZERO
    }
}

impl From<Distance> for RationalDistance {
    fn from(distance: Distance) -> Self {
        Self::from_distance(distance)
    }
}

impl fmt::Display for RationalDistance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

fn signs_differ(a: Distance, b: Distance) -> bool {
    (a < 0) != (b < 0)
}

fn greatest_common_divisor(mut a: Distance, mut b: Distance) -> Distance {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// Least common multiple of the denominator magnitudes.
fn common_denominator(a: Distance, b: Distance) -> Option<Distance> {
    let a = a.checked_abs()?;
    let b = b.checked_abs()?;
    if a == 0 || b == 0 {
        return None;
    }
    (a / greatest_common_divisor(a, b)).checked_mul(b)
}

fn scale_numerator(value: RationalDistance, common: Distance) -> Option<Distance> {
    value.numerator.checked_mul(common / value.denominator)
}

/// Saturating addition: on overflow the left operand is returned unchanged.
impl Add for RationalDistance {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        self.checked_add(rhs).unwrap_or_else(|err| {
            tracing::warn!(%err, "Rational addition saturated, addend dropped");
            self
        })
    }
}

impl AddAssign for RationalDistance {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Add<Distance> for RationalDistance {
    type Output = Self;

    fn add(self, rhs: Distance) -> Self::Output {
        Self::new(self.numerator + self.denominator * rhs, self.denominator)
    }
}

impl Neg for RationalDistance {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self::new(-self.numerator, self.denominator)
    }
}

impl Div for RationalDistance {
    type Output = Self;

    fn div(self, rhs: Self) -> Self::Output {
        Self::new(
            self.numerator * rhs.denominator,
            self.denominator * rhs.numerator,
        )
    }
}

impl Div<Distance> for RationalDistance {
    type Output = Self;

    fn div(self, rhs: Distance) -> Self::Output {
        Self::new(self.numerator, self.denominator * rhs)
    }
}
