//! Physics state definitions.
//!
//! Everything here is a plain `Copy` value. Collision and force functions
//! take state by value and return the next state; nothing is shared or
//! aliased between ticks.

use std::ops::Neg;

use serde::{Deserialize, Serialize};

use crate::geometry::Rectangle;
use crate::rational::{Distance, RationalDistance};

/// Per-tick displacement.
///
/// Vertical velocity is fractional so gravity can accumulate in sub-pixel
/// steps; horizontal velocity is always whole pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Velocity {
    /// Rows per tick, positive is downward.
    pub vertical: RationalDistance,
    /// Columns per tick, positive is rightward.
    pub horizontal: Distance,
}

impl Velocity {
    /// At rest.
    pub const ZERO: Self = Self {
        vertical: RationalDistance::ZERO,
        horizontal: 0,
    };

    /// Create a new velocity.
    #[must_use]
    pub const fn new(vertical: RationalDistance, horizontal: Distance) -> Self {
        Self {
            vertical,
            horizontal,
        }
    }
}

impl Neg for Velocity {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self::new(-self.vertical, -self.horizontal)
    }
}

/// Pose and momentum of a moving body for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct MovingObject {
    /// Current rectangle.
    pub rectangle: Rectangle,
    /// Displacement to apply this tick.
    pub velocity: Velocity,
}

impl MovingObject {
    /// Create a new moving object.
    #[must_use]
    pub const fn new(rectangle: Rectangle, velocity: Velocity) -> Self {
        Self {
            rectangle,
            velocity,
        }
    }
}

/// Rectangle after applying only the horizontal velocity.
#[must_use]
pub fn apply_horizontal_velocity(object: MovingObject) -> Rectangle {
    object
        .rectangle
        .shift_horizontally(object.velocity.horizontal)
}

/// Rectangle after applying only the vertical velocity, rounded to a row.
#[must_use]
pub fn apply_vertical_velocity(object: MovingObject) -> Rectangle {
    object
        .rectangle
        .shift_vertically(object.velocity.vertical.round())
}

/// Where the player is in a jump.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum JumpState {
    /// Standing on something; a new jump may start.
    #[default]
    Grounded,
    /// Jump key still held since takeoff.
    Started,
    /// Jump key let go before landing.
    Released,
}

/// Which way the player sprite faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DirectionFacing {
    /// Facing left.
    Left,
    /// Facing right.
    #[default]
    Right,
}

/// Full player state carried from tick to tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PlayerState {
    /// Physical body.
    pub object: MovingObject,
    /// Jump progress.
    pub jump_state: JumpState,
    /// Presentation only, never read by physics.
    pub direction_facing: DirectionFacing,
}

impl PlayerState {
    /// A grounded, motionless player occupying `rectangle`.
    #[must_use]
    pub const fn at_rest(rectangle: Rectangle) -> Self {
        Self {
            object: MovingObject::new(rectangle, Velocity::ZERO),
            jump_state: JumpState::Grounded,
            direction_facing: DirectionFacing::Right,
        }
    }
}
