//! Background scroll helper.
//!
//! Read-only with respect to physics: the camera follows the player and
//! never feeds back into collision.

use serde::{Deserialize, Serialize};

use crate::geometry::Rectangle;
use crate::rational::Distance;

/// Scroll the background source rectangle so the player stays centered
/// within a camera `camera_width` wide, without showing past either end of
/// a background `background_width` wide.
///
/// Only `origin.x` of the source changes.
#[must_use]
pub fn shift_background(
    mut source: Rectangle,
    background_width: Distance,
    player: &Rectangle,
    camera_width: Distance,
) -> Rectangle {
    let furthest = (background_width - source.width).max(0);
    source.origin.x = (player.center_x() - camera_width / 2).clamp(0, furthest);
    source
}

/// Viewport into a scrolling background.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Camera {
    /// Portion of the background currently shown.
    pub source: Rectangle,
    /// Full background width.
    pub background_width: Distance,
    /// Width of the visible area.
    pub camera_width: Distance,
}

impl Camera {
    /// Camera showing the left end of a level `level_width` wide.
    #[must_use]
    pub const fn new(
        level_width: Distance,
        level_height: Distance,
        camera_width: Distance,
    ) -> Self {
        Self {
            source: Rectangle::new(0, 0, camera_width, level_height),
            background_width: level_width,
            camera_width,
        }
    }

    /// Recenter on `player`.
    pub fn follow(&mut self, player: &Rectangle) {
        self.source =
            shift_background(self.source, self.background_width, player, self.camera_width);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_near_left_end() {
        let source = Rectangle::new(50, 0, 320, 240);
        let player = Rectangle::new(10, 100, 16, 16);
        let shifted = shift_background(source, 1280, &player, 320);
        assert_eq!(shifted, Rectangle::new(0, 0, 320, 240));
    }

    #[test]
    fn test_player_in_middle_is_centered() {
        let source = Rectangle::new(0, 0, 320, 240);
        let player = Rectangle::new(600, 100, 16, 16);
        let shifted = shift_background(source, 1280, &player, 320);
        // center 608 - 160
        assert_eq!(shifted.origin.x, 448);
        assert_eq!(shifted.width, 320);
        assert_eq!(shifted.height, 240);
    }

    #[test]
    fn test_player_near_right_end() {
        let source = Rectangle::new(0, 0, 320, 240);
        let player = Rectangle::new(1270, 100, 16, 16);
        let shifted = shift_background(source, 1280, &player, 320);
        assert_eq!(shifted.origin.x, 960);
    }

    #[test]
    fn test_background_narrower_than_camera() {
        let source = Rectangle::new(0, 0, 320, 240);
        let player = Rectangle::new(200, 100, 16, 16);
        let shifted = shift_background(source, 200, &player, 320);
        assert_eq!(shifted.origin.x, 0);
    }

    #[test]
    fn test_camera_follow() {
        let mut camera = Camera::new(1280, 480, 320);
        camera.follow(&Rectangle::new(400, 0, 16, 16));
        assert_eq!(camera.source.origin.x, 248);
    }
}
