//! Forces, the jump state machine, and velocity integration.
//!
//! Jump states:
//!
//! ```text
//! Grounded --jump pressed--> Started --jump released--> Released
//!     ^                         |                          |
//!     +------- landed ----------+--------------------------+
//! ```
//!
//! Landing is decided by [`resolution`](crate::resolution); this module
//! only handles takeoff and the jump cut.

use serde::{Deserialize, Serialize};

use crate::components::{
    apply_horizontal_velocity, DirectionFacing, JumpState, MovingObject, PlayerState,
};
use crate::config::PhysicsConfig;
use crate::geometry::{clamp, with_friction};
use crate::rational::RationalDistance;

/// Buttons held during one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ControlInput {
    /// Run left.
    pub left: bool,
    /// Run right.
    pub right: bool,
    /// Jump.
    pub jump: bool,
}

impl ControlInput {
    /// Nothing held.
    pub const NONE: Self = Self {
        left: false,
        right: false,
        jump: false,
    };
}

/// Accelerate horizontally for held direction keys and update facing.
#[must_use]
pub fn apply_run_input(
    mut player: PlayerState,
    input: ControlInput,
    config: &PhysicsConfig,
) -> PlayerState {
    if input.left {
        player.object.velocity.horizontal -= config.run_acceleration;
        player.direction_facing = DirectionFacing::Left;
    }
    if input.right {
        player.object.velocity.horizontal += config.run_acceleration;
        player.direction_facing = DirectionFacing::Right;
    }
    player
}

/// Start a jump if grounded. Returns whether a jump started.
pub fn start_jump(player: &mut PlayerState, config: &PhysicsConfig) -> bool {
    if player.jump_state != JumpState::Grounded {
        return false;
    }
    player.jump_state = JumpState::Started;
    player.object.velocity.vertical += config.jump_acceleration;
    tracing::debug!(velocity = %player.object.velocity.vertical, "Jump started");
    true
}

/// Handle the jump key being let go.
///
/// Only a jump still in [`JumpState::Started`] is affected. If the player is
/// still rising, upward velocity is cut to zero, giving variable jump height.
#[must_use]
pub fn release_jump(mut player: PlayerState) -> PlayerState {
    if player.jump_state != JumpState::Started {
        return player;
    }
    player.jump_state = JumpState::Released;
    if player.object.velocity.vertical.is_negative() {
        tracing::debug!(velocity = %player.object.velocity.vertical, "Jump cut");
        player.object.velocity.vertical = RationalDistance::ZERO;
    }
    player
}

/// Add gravity to vertical velocity.
#[must_use]
pub fn apply_gravity(mut object: MovingObject, gravity: RationalDistance) -> MovingObject {
    object.velocity.vertical += gravity;
    object
}

/// Clamp horizontal speed then apply friction.
#[must_use]
pub fn limit_horizontal_speed(mut object: MovingObject, config: &PhysicsConfig) -> MovingObject {
    object.velocity.horizontal = with_friction(
        clamp(object.velocity.horizontal, config.max_horizontal_speed),
        config.ground_friction,
    );
    object
}

/// Result of [`apply_forces`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForceOutcome {
    /// Player state with updated velocity and jump state.
    pub player: PlayerState,
    /// Whether a jump started this tick.
    pub jumped: bool,
}

/// Apply one tick of input and forces to the player's velocity.
///
/// Order: run input, jump takeoff, gravity, jump release, speed clamp and
/// friction. Gravity applies in every jump state.
#[must_use]
pub fn apply_forces(
    player: PlayerState,
    input: ControlInput,
    config: &PhysicsConfig,
) -> ForceOutcome {
    let mut player = apply_run_input(player, input, config);
    let jumped = input.jump && start_jump(&mut player, config);
    player.object = apply_gravity(player.object, config.gravity);
    if !input.jump {
        player = release_jump(player);
    }
    player.object = limit_horizontal_speed(player.object, config);
    ForceOutcome { player, jumped }
}

/// Move the rectangle by its velocity, horizontal first.
#[must_use]
pub fn apply_velocity(mut object: MovingObject) -> MovingObject {
    object.rectangle = apply_horizontal_velocity(object);
    object.rectangle = object
        .rectangle
        .shift_vertically(object.velocity.vertical.round());
    object
}
