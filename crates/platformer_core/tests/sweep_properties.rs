//! Property tests for the sweep test and rational arithmetic.

use platformer_core::collision::{passes_through, CollisionAxis, CollisionDirection};
use platformer_core::components::{MovingObject, Velocity};
use platformer_core::geometry::Rectangle;
use platformer_core::rational::{Distance, RationalDistance};
use platformer_test_utils::determinism::strategies::{arb_extent, arb_rational, arb_rectangle};
use platformer_test_utils::fixtures::moving;
use proptest::prelude::*;

/// Place a `width` x `height` object `gap` pixels before `direction`'s face
/// of `stationary`, overlapping it laterally at `offset`, moving toward the
/// face at `speed` with no parallel drift.
fn approaching(
    stationary: Rectangle,
    direction: CollisionDirection,
    (width, height): (Distance, Distance),
    gap: Distance,
    offset: Distance,
    speed: Distance,
) -> MovingObject {
    let still = RationalDistance::ZERO;
    let lateral_x = stationary.left_edge() - width + 1 + offset;
    let lateral_y = stationary.top_edge() - height + 1 + offset;
    match direction {
        CollisionDirection::FromBelow => moving(
            Rectangle::new(lateral_x, stationary.top_edge() - height - gap, width, height),
            RationalDistance::from_distance(speed),
            0,
        ),
        CollisionDirection::FromAbove => moving(
            Rectangle::new(lateral_x, stationary.bottom_edge() + 1 + gap, width, height),
            RationalDistance::from_distance(-speed),
            0,
        ),
        CollisionDirection::FromRight => moving(
            Rectangle::new(stationary.left_edge() - width - gap, lateral_y, width, height),
            still,
            speed,
        ),
        CollisionDirection::FromLeft => moving(
            Rectangle::new(stationary.right_edge() + 1 + gap, lateral_y, width, height),
            still,
            -speed,
        ),
    }
}

fn lateral_span(
    stationary: Rectangle,
    direction: CollisionDirection,
    size: (Distance, Distance),
) -> Distance {
    match direction.axis() {
        CollisionAxis::Vertical => stationary.width + size.0 - 1,
        CollisionAxis::Horizontal => stationary.height + size.1 - 1,
    }
}

/// An object placed next to an obstacle with no lateral overlap.
struct Beside {
    size: (Distance, Distance),
    /// Empty pixels between the object and the obstacle's near side.
    lateral_gap: Distance,
    /// Right of (or below) the obstacle rather than left of (or above) it.
    far_side: bool,
}

impl Beside {
    /// Distance from the object's trailing side to the obstacle's far side.
    fn clearance(&self, stationary: Rectangle, direction: CollisionDirection) -> Distance {
        lateral_span(stationary, direction, self.size) + self.lateral_gap
    }

    /// Object `gap` pixels before `direction`'s face, moving toward it at
    /// `speed`. Positive `drift` moves it laterally toward the obstacle,
    /// negative drift away.
    fn object(
        &self,
        stationary: Rectangle,
        direction: CollisionDirection,
        gap: Distance,
        speed: Distance,
        drift: Distance,
    ) -> MovingObject {
        let (width, height) = self.size;
        let (lateral_x, drift_x) = if self.far_side {
            (stationary.right_edge() + 1 + self.lateral_gap, -drift)
        } else {
            (stationary.left_edge() - width - self.lateral_gap, drift)
        };
        let (lateral_y, drift_y) = if self.far_side {
            (stationary.bottom_edge() + 1 + self.lateral_gap, -drift)
        } else {
            (stationary.top_edge() - height - self.lateral_gap, drift)
        };
        let (rectangle, vertical, horizontal) = match direction {
            CollisionDirection::FromBelow => (
                Rectangle::new(lateral_x, stationary.top_edge() - height - gap, width, height),
                speed,
                drift_x,
            ),
            CollisionDirection::FromAbove => (
                Rectangle::new(lateral_x, stationary.bottom_edge() + 1 + gap, width, height),
                -speed,
                drift_x,
            ),
            CollisionDirection::FromRight => (
                Rectangle::new(stationary.left_edge() - width - gap, lateral_y, width, height),
                drift_y,
                speed,
            ),
            CollisionDirection::FromLeft => (
                Rectangle::new(stationary.right_edge() + 1 + gap, lateral_y, width, height),
                drift_y,
                -speed,
            ),
        };
        MovingObject::new(
            rectangle,
            Velocity::new(RationalDistance::from_distance(vertical), horizontal),
        )
    }
}

proptest! {
    /// An object heading straight at a face it overlaps laterally is caught,
    /// including when one tick carries it far past the obstacle.
    #[test]
    fn prop_straight_approach_is_detected(
        stationary in arb_rectangle(),
        size in (arb_extent(), arb_extent()),
        gap in 0i64..100,
        extra in 0i64..500,
        lateral in 0i64..10_000,
        direction_index in 0usize..4,
    ) {
        let direction = CollisionDirection::ALL[direction_index];
        let offset = lateral % lateral_span(stationary, direction, size);
        let object = approaching(stationary, direction, size, gap, offset, gap + 1 + extra);
        prop_assert!(passes_through(object, stationary, direction, direction.axis()));
    }

    /// Stopping short of the face never counts as a collision.
    #[test]
    fn prop_falling_short_is_not_detected(
        stationary in arb_rectangle(),
        size in (arb_extent(), arb_extent()),
        gap in 1i64..100,
        direction_index in 0usize..4,
    ) {
        let direction = CollisionDirection::ALL[direction_index];
        let object = approaching(stationary, direction, size, gap, 0, gap);
        prop_assert!(!passes_through(object, stationary, direction, direction.axis()));
    }

    /// Approaching a face from beside the obstacle while drifting away from
    /// it, or not drifting at all, is never a collision.
    #[test]
    fn prop_passing_beside_obstacle_is_not_detected(
        stationary in arb_rectangle(),
        size in (arb_extent(), arb_extent()),
        lateral_gap in 0i64..50,
        gap in 0i64..100,
        speed in 1i64..1000,
        drift in 0i64..200,
        far_side in any::<bool>(),
        direction_index in 0usize..4,
    ) {
        let direction = CollisionDirection::ALL[direction_index];
        let placement = Beside { size, lateral_gap, far_side };
        let object = placement.object(stationary, direction, gap, speed, -drift);
        prop_assert!(!passes_through(object, stationary, direction, direction.axis()));
    }

    /// Drifting toward the obstacle fast enough to slide past its far edge
    /// before reaching the face is not a collision.
    #[test]
    fn prop_overshooting_far_edge_is_not_detected(
        stationary in arb_rectangle(),
        size in (arb_extent(), arb_extent()),
        lateral_gap in 0i64..50,
        gap in 1i64..100,
        speed in 1i64..1000,
        extra_drift in 0i64..200,
        far_side in any::<bool>(),
        direction_index in 0usize..4,
    ) {
        let direction = CollisionDirection::ALL[direction_index];
        let placement = Beside { size, lateral_gap, far_side };
        // Lateral travel needed to clear the far edge, plus one
        let clearance = placement.clearance(stationary, direction) + 1;
        let drift = (speed * clearance + gap - 1) / gap + extra_drift;
        let object = placement.object(stationary, direction, gap, speed, drift);
        prop_assert!(!passes_through(object, stationary, direction, direction.axis()));
    }

    /// Objects already overlapping along the normal axis are left alone.
    #[test]
    fn prop_overlapping_is_never_detected(
        stationary in arb_rectangle(),
        object in platformer_test_utils::determinism::strategies::arb_moving_object(),
        direction_index in 0usize..4,
    ) {
        let direction = CollisionDirection::ALL[direction_index];
        prop_assume!(direction.distance_penetrates(object, stationary) >= 0);
        prop_assert!(!passes_through(object, stationary, direction, direction.axis()));
    }

    /// Scaling both parts of a rational changes neither comparisons nor rounding.
    #[test]
    fn prop_representation_does_not_matter(
        a in arb_rational(),
        b in arb_rational(),
        k in prop_oneof![-9i64..=-1, 1i64..=9],
    ) {
        let scaled = RationalDistance::new(a.numerator * k, a.denominator * k);
        prop_assert_eq!(a.less_than(b), scaled.less_than(b));
        prop_assert_eq!(a.greater_than(b), scaled.greater_than(b));
        prop_assert_eq!(a.round(), scaled.round());
    }

    /// Rational addition agrees with cross-multiplied comparison.
    #[test]
    fn prop_sum_exceeds_each_positive_addend(
        a in arb_rational(),
        numerator in 1i64..100,
        denominator in 1i64..100,
    ) {
        let b = RationalDistance::new(numerator, denominator);
        prop_assert!((a + b).greater_than(a));
    }
}
