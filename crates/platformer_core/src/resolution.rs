//! Collision resolution.
//!
//! Each pass tries candidates nearest-first along the direction of travel
//! and applies the first true collision only. The caller supplies the
//! candidates already split by the face they could be approached from.
//!
//! Resolution snaps the rectangle against the contact edge and zeroes the
//! velocity component along the collision normal. Integration later applies
//! whatever velocity remains.

use std::cmp::Reverse;

use crate::collision::{passes_through, CollisionAxis, CollisionDirection};
use crate::components::{
    apply_horizontal_velocity, apply_vertical_velocity, JumpState, MovingObject, PlayerState,
};
use crate::geometry::{distance_first_exceeds_second_vertically, Rectangle};
use crate::rational::{Distance, RationalDistance};

fn collide_vertically(mut object: MovingObject, ground: Distance) -> MovingObject {
    object.velocity.vertical = RationalDistance::ZERO;
    object.rectangle.origin.y = ground - object.rectangle.height;
    object
}

fn on_player_hit_ground(mut player: PlayerState, ground: Distance) -> PlayerState {
    player.object = collide_vertically(player.object, ground);
    if player.jump_state != JumpState::Grounded {
        tracing::debug!(ground, previous = ?player.jump_state, "Player landed");
    }
    player.jump_state = JumpState::Grounded;
    player
}

fn sorted_by_key<K: Ord>(
    candidates: &[Rectangle],
    key: impl Fn(&Rectangle) -> K,
) -> Vec<Rectangle> {
    let mut sorted = candidates.to_vec();
    sorted.sort_by_key(key);
    sorted
}

/// True when advancing vertically leaves the object resting on or sunk into
/// the floor. Resting contact counts so a standing player is re-grounded
/// every tick instead of accumulating gravity until it rounds to a row.
/// Platforms keep the strict sweep test; only the floor accepts resting
/// contact.
fn reaches_floor(object: MovingObject, floor: Rectangle) -> bool {
    distance_first_exceeds_second_vertically(apply_vertical_velocity(object), floor) >= -1
}

/// Surface the vertical pass stopped the player against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalContact {
    /// Snapped onto a platform or the floor whose top edge is this row.
    Ground(Distance),
    /// Stopped under a ceiling whose bottom edge is this row.
    Ceiling(Distance),
}

/// Resolve landings, the floor, and head bumps for one tick.
///
/// Order:
/// 1. `below` candidates by top edge ascending; first hit grounds the player
///    on it.
/// 2. The floor, if the vertical advance rests on or passes its top edge.
/// 3. `above` candidates by bottom edge descending; first hit stops upward
///    motion under it without changing the jump state.
///
/// Returns the state unchanged when nothing is hit.
#[must_use]
pub fn handle_vertical_collisions(
    player: PlayerState,
    below: &[Rectangle],
    above: &[Rectangle],
    floor: Rectangle,
) -> PlayerState {
    resolve_vertical_contact(player, below, above, floor).0
}

/// [`handle_vertical_collisions`], also reporting which surface was hit.
///
/// A ground contact is reported every tick the player is snapped onto a
/// surface, including while standing still on it.
#[must_use]
pub fn resolve_vertical_contact(
    player: PlayerState,
    below: &[Rectangle],
    above: &[Rectangle],
    floor: Rectangle,
) -> (PlayerState, Option<VerticalContact>) {
    if let Some(candidate) = sorted_by_key(below, |r| r.top_edge())
        .into_iter()
        .find(|&candidate| {
            passes_through(
                player.object,
                candidate,
                CollisionDirection::FromBelow,
                CollisionAxis::Vertical,
            )
        })
    {
        let ground = candidate.top_edge();
        return (
            on_player_hit_ground(player, ground),
            Some(VerticalContact::Ground(ground)),
        );
    }
    if reaches_floor(player.object, floor) {
        let ground = floor.top_edge();
        return (
            on_player_hit_ground(player, ground),
            Some(VerticalContact::Ground(ground)),
        );
    }
    if let Some(candidate) = sorted_by_key(above, |r| Reverse(r.bottom_edge()))
        .into_iter()
        .find(|&candidate| {
            passes_through(
                player.object,
                candidate,
                CollisionDirection::FromAbove,
                CollisionAxis::Vertical,
            )
        })
    {
        let ceiling = candidate.bottom_edge();
        tracing::debug!(ceiling, "Player bumped head");
        let mut player = player;
        player.object.velocity.vertical = RationalDistance::ZERO;
        player.object.rectangle.origin.y = ceiling + 1;
        return (player, Some(VerticalContact::Ceiling(ceiling)));
    }
    (player, None)
}

fn collide_horizontally(mut object: MovingObject, left_edge: Distance) -> MovingObject {
    tracing::debug!(left_edge, "Horizontal collision");
    object.velocity.horizontal = 0;
    object.rectangle.origin.x = left_edge;
    object
}

/// Resolve walls and level bounds for one tick.
///
/// Order:
/// 1. `right` candidates by left edge ascending; first hit stops the object
///    against its left side.
/// 2. The level's right bound.
/// 3. `left` candidates by right edge descending; first hit stops the object
///    against its right side.
/// 4. The level's left bound.
#[must_use]
pub fn handle_horizontal_collisions(
    object: MovingObject,
    right: &[Rectangle],
    left: &[Rectangle],
    level: Rectangle,
) -> MovingObject {
    if let Some(candidate) = sorted_by_key(right, |r| r.left_edge())
        .into_iter()
        .find(|&candidate| {
            passes_through(
                object,
                candidate,
                CollisionDirection::FromRight,
                CollisionAxis::Horizontal,
            )
        })
    {
        return collide_horizontally(object, candidate.left_edge() - object.rectangle.width);
    }
    if apply_horizontal_velocity(object).right_edge() >= level.right_edge() {
        return collide_horizontally(object, level.right_edge() - object.rectangle.width);
    }
    if let Some(candidate) = sorted_by_key(left, |r| Reverse(r.right_edge()))
        .into_iter()
        .find(|&candidate| {
            passes_through(
                object,
                candidate,
                CollisionDirection::FromLeft,
                CollisionAxis::Horizontal,
            )
        })
    {
        return collide_horizontally(object, candidate.right_edge() + 1);
    }
    if level.left_edge() >= apply_horizontal_velocity(object).left_edge() {
        return collide_horizontally(object, level.left_edge() + 1);
    }
    object
}
