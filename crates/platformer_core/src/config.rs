//! Physics tuning.

use serde::{Deserialize, Serialize};

use crate::error::{PhysicsError, Result};
use crate::rational::{Distance, RationalDistance};

/// Accelerations and limits applied by [`apply_forces`](crate::kinematics::apply_forces).
///
/// # Example RON
///
/// ```ron
/// PhysicsConfig(
///     gravity: (numerator: 1, denominator: 2),
///     jump_acceleration: (numerator: -10, denominator: 1),
///     run_acceleration: 2,
///     max_horizontal_speed: 6,
///     ground_friction: 1,
/// )
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PhysicsConfig {
    /// Added to vertical velocity every tick.
    pub gravity: RationalDistance,
    /// One-time impulse when a jump starts. Negative is upward.
    pub jump_acceleration: RationalDistance,
    /// Horizontal speed gained per tick while a direction is held.
    pub run_acceleration: Distance,
    /// Horizontal speed limit, applied before friction.
    pub max_horizontal_speed: Distance,
    /// Horizontal speed lost every tick.
    pub ground_friction: Distance,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: RationalDistance::new(1, 2),
            jump_acceleration: RationalDistance::new(-10, 1),
            run_acceleration: 2,
            max_horizontal_speed: 6,
            ground_friction: 1,
        }
    }
}

impl PhysicsConfig {
    /// Check that the configuration can drive a simulation.
    ///
    /// # Errors
    ///
    /// Returns [`PhysicsError::ZeroDenominator`] for a rational with a zero
    /// denominator and [`PhysicsError::InvalidConfig`] for negative limits.
    pub fn validate(&self) -> Result<()> {
        RationalDistance::try_new(self.gravity.numerator, self.gravity.denominator)?;
        RationalDistance::try_new(
            self.jump_acceleration.numerator,
            self.jump_acceleration.denominator,
        )?;
        if self.max_horizontal_speed < 0 {
            return Err(PhysicsError::InvalidConfig(format!(
                "max_horizontal_speed must not be negative, got {}",
                self.max_horizontal_speed
            )));
        }
        if self.ground_friction < 0 {
            return Err(PhysicsError::InvalidConfig(format!(
                "ground_friction must not be negative, got {}",
                self.ground_friction
            )));
        }
        if self.run_acceleration < 0 {
            return Err(PhysicsError::InvalidConfig(format!(
                "run_acceleration must not be negative, got {}",
                self.run_acceleration
            )));
        }
        Ok(())
    }
}
