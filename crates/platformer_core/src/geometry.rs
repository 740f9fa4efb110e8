//! Axis-aligned rectangles on an inclusive pixel grid.
//!
//! A rectangle covers the pixels `origin.x ..= origin.x + width - 1` and
//! `origin.y ..= origin.y + height - 1`. `y` grows downward, so the top edge
//! is the smallest row and the bottom edge the largest.

use std::ops::{Mul, MulAssign};

use serde::{Deserialize, Serialize};

use crate::rational::Distance;

/// Top-left corner of a rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    /// Column.
    pub x: Distance,
    /// Row.
    pub y: Distance,
}

impl Point {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: Distance, y: Distance) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle with inclusive edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rectangle {
    /// Top-left corner.
    pub origin: Point,
    /// Width in pixels, expected positive.
    pub width: Distance,
    /// Height in pixels, expected positive.
    pub height: Distance,
}

impl Rectangle {
    /// Create a rectangle from its top-left corner and size.
    #[must_use]
    pub const fn new(x: Distance, y: Distance, width: Distance, height: Distance) -> Self {
        Self {
            origin: Point::new(x, y),
            width,
            height,
        }
    }

    /// First row covered.
    #[must_use]
    pub const fn top_edge(self) -> Distance {
        self.origin.y
    }

    /// First column covered.
    #[must_use]
    pub const fn left_edge(self) -> Distance {
        self.origin.x
    }

    /// Last column covered.
    #[must_use]
    pub const fn right_edge(self) -> Distance {
        self.origin.x + self.width - 1
    }

    /// Last row covered.
    #[must_use]
    pub const fn bottom_edge(self) -> Distance {
        self.origin.y + self.height - 1
    }

    /// Column at the horizontal middle, rounded toward the left.
    #[must_use]
    pub const fn center_x(self) -> Distance {
        self.origin.x + self.width / 2
    }

    /// Same rectangle moved `distance` columns to the right.
    #[must_use]
    pub fn shift_horizontally(mut self, distance: Distance) -> Self {
        self.origin.x += distance;
        self
    }

    /// Same rectangle moved `distance` rows down.
    #[must_use]
    pub fn shift_vertically(mut self, distance: Distance) -> Self {
        self.origin.y += distance;
        self
    }
}

/// Uniform scale of origin and extents, used when drawing.
impl MulAssign<Distance> for Rectangle {
    fn mul_assign(&mut self, scale: Distance) {
        self.origin.x *= scale;
        self.origin.y *= scale;
        self.width *= scale;
        self.height *= scale;
    }
}

impl Mul<Distance> for Rectangle {
    type Output = Self;

    fn mul(mut self, scale: Distance) -> Self::Output {
        self *= scale;
        self
    }
}

/// How far `a`'s bottom edge reaches past `b`'s top edge.
///
/// Negative while `a` is still above `b`; zero or more once they share a row.
#[must_use]
pub const fn distance_first_exceeds_second_vertically(a: Rectangle, b: Rectangle) -> Distance {
    a.bottom_edge() - b.top_edge()
}

/// How far `a`'s right edge reaches past `b`'s left edge.
///
/// Negative while `a` is still left of `b`; zero or more once they share a
/// column.
#[must_use]
pub const fn distance_first_exceeds_second_horizontally(a: Rectangle, b: Rectangle) -> Distance {
    a.right_edge() - b.left_edge()
}

/// Clamp `velocity` to `[-limit, limit]`.
#[must_use]
pub fn clamp(velocity: Distance, limit: Distance) -> Distance {
    velocity.clamp(-limit, limit)
}

/// Reduce the magnitude of `velocity` by `friction`, stopping at zero.
#[must_use]
pub fn with_friction(velocity: Distance, friction: Distance) -> Distance {
    velocity.signum() * (velocity.abs() - friction).max(0)
}
