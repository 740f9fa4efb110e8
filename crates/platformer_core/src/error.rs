//! Error types for the physics core.

use thiserror::Error;

use crate::rational::RationalDistance;

/// Result type alias using [`PhysicsError`].
pub type Result<T> = std::result::Result<T, PhysicsError>;

/// Top-level error type for the physics core.
///
/// Collision and resolution functions are total and never fail; these
/// errors come from checked arithmetic and configuration validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PhysicsError {
    /// No common denominator fits in a [`Distance`](crate::rational::Distance).
    #[error("Rational addition overflowed: {augend:?} + {addend:?}")]
    RationalOverflow {
        /// Left operand.
        augend: RationalDistance,
        /// Right operand.
        addend: RationalDistance,
    },

    /// A rational was constructed with a zero denominator.
    #[error("Rational distance has a zero denominator")]
    ZeroDenominator,

    /// Physics or level configuration is unusable.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
