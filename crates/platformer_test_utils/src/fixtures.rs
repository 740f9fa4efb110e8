//! Test fixtures and helpers.
//!
//! Pre-built levels and bodies for consistent testing.

use platformer_core::components::{DirectionFacing, JumpState, MovingObject, PlayerState, Velocity};
use platformer_core::geometry::Rectangle;
use platformer_core::rational::{Distance, RationalDistance};
use platformer_core::simulation::Level;

/// Player sprite size used by every fixture.
pub const PLAYER_SIZE: Distance = 16;

/// Row of the floor's top edge in [`flat_level`].
pub const FLOOR_TOP: Distance = 240;

/// Create a rational.
#[must_use]
pub fn rational(numerator: Distance, denominator: Distance) -> RationalDistance {
    RationalDistance::new(numerator, denominator)
}

/// Create a rectangle.
#[must_use]
pub fn rect(x: Distance, y: Distance, width: Distance, height: Distance) -> Rectangle {
    Rectangle::new(x, y, width, height)
}

/// Moving object with the given rectangle and velocity.
#[must_use]
pub fn moving(
    rectangle: Rectangle,
    vertical: RationalDistance,
    horizontal: Distance,
) -> MovingObject {
    MovingObject::new(rectangle, Velocity::new(vertical, horizontal))
}

/// Player-sized rectangle with its top-left corner at `(x, y)`.
#[must_use]
pub fn player_rect(x: Distance, y: Distance) -> Rectangle {
    rect(x, y, PLAYER_SIZE, PLAYER_SIZE)
}

/// Airborne player after releasing jump.
#[must_use]
pub fn airborne_player(
    rectangle: Rectangle,
    vertical: RationalDistance,
    horizontal: Distance,
) -> PlayerState {
    PlayerState {
        object: moving(rectangle, vertical, horizontal),
        jump_state: JumpState::Released,
        direction_facing: DirectionFacing::Right,
    }
}

/// Player standing on the floor of [`flat_level`].
#[must_use]
pub fn grounded_player(x: Distance) -> PlayerState {
    PlayerState::at_rest(player_rect(x, FLOOR_TOP - PLAYER_SIZE))
}

/// 640x480 level with its floor top at [`FLOOR_TOP`].
#[must_use]
pub fn flat_level() -> Level {
    Level::new(rect(0, 0, 640, 480), rect(0, FLOOR_TOP, 640, 240), 320)
}

/// [`flat_level`] with a ledge, a low ceiling and a wall.
#[must_use]
pub fn obstacle_course() -> Level {
    flat_level()
        .with_obstacle(rect(160, 180, 64, 8))
        .with_obstacle(rect(300, 120, 80, 16))
        .with_obstacle(rect(480, 160, 16, 80))
}
