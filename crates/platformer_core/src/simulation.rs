//! Per-tick simulation driver.
//!
//! Stands in for the game loop: it owns the level and player, classifies
//! obstacles into collision candidates, and runs the physics steps in order.
//!
//! # Tick order
//!
//! 1. Forces: run input, jump takeoff, gravity, jump release, friction
//! 2. Vertical collisions against platforms, the floor and ceilings
//! 3. Horizontal collisions against walls and the level bounds
//! 4. Velocity integration
//! 5. Camera follow
//!
//! # Example
//!
//! ```
//! use platformer_core::prelude::*;
//!
//! let level = Level::new(Rectangle::new(0, 0, 640, 480), Rectangle::new(0, 240, 640, 240), 320);
//! let mut sim = Simulation::new(level, Rectangle::new(0, 224, 16, 16), PhysicsConfig::default())
//!     .expect("valid level");
//!
//! sim.tick(ControlInput { right: true, ..ControlInput::NONE });
//! assert_eq!(sim.player().object.rectangle.origin.y, 224);
//! ```

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::audio::SoundCue;
use crate::camera::Camera;
use crate::components::{JumpState, PlayerState};
use crate::config::PhysicsConfig;
use crate::error::{PhysicsError, Result};
use crate::geometry::Rectangle;
use crate::kinematics::{apply_forces, apply_velocity, ControlInput, ForceOutcome};
use crate::rational::Distance;
use crate::resolution::{handle_horizontal_collisions, resolve_vertical_contact, VerticalContact};

/// Static level geometry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Level {
    /// Playable area; the player is kept inside its left and right edges.
    pub bounds: Rectangle,
    /// Ground the player can never fall through.
    pub floor: Rectangle,
    /// Solid blocks usable as platforms, ceilings and walls.
    #[serde(default)]
    pub obstacles: Vec<Rectangle>,
    /// Width of the visible area.
    pub camera_width: Distance,
}

impl Level {
    /// Create a level without obstacles.
    #[must_use]
    pub fn new(bounds: Rectangle, floor: Rectangle, camera_width: Distance) -> Self {
        Self {
            bounds,
            floor,
            obstacles: Vec::new(),
            camera_width,
        }
    }

    /// Add an obstacle.
    #[must_use]
    pub fn with_obstacle(mut self, obstacle: Rectangle) -> Self {
        self.obstacles.push(obstacle);
        self
    }

    /// Check that the level geometry is usable.
    ///
    /// # Errors
    ///
    /// Returns [`PhysicsError::InvalidConfig`] for a rectangle without
    /// positive size or a camera width that is not positive.
    pub fn validate(&self) -> Result<()> {
        let named = [("bounds", &self.bounds), ("floor", &self.floor)];
        let obstacles = self.obstacles.iter().map(|r| ("obstacle", r));
        for (name, rect) in named.into_iter().chain(obstacles) {
            if rect.width <= 0 || rect.height <= 0 {
                return Err(PhysicsError::InvalidConfig(format!(
                    "{name} must have positive size, got {rect:?}"
                )));
            }
        }
        if self.camera_width <= 0 {
            return Err(PhysicsError::InvalidConfig(format!(
                "camera_width must be positive, got {}",
                self.camera_width
            )));
        }
        Ok(())
    }

    /// Obstacles entirely below and entirely above `player`.
    #[must_use]
    pub fn vertical_candidates(&self, player: Rectangle) -> (Vec<Rectangle>, Vec<Rectangle>) {
        let below = self
            .obstacles
            .iter()
            .copied()
            .filter(|r| r.top_edge() > player.bottom_edge())
            .collect();
        let above = self
            .obstacles
            .iter()
            .copied()
            .filter(|r| r.bottom_edge() < player.top_edge())
            .collect();
        (below, above)
    }

    /// Obstacles entirely right of and entirely left of `player`.
    #[must_use]
    pub fn horizontal_candidates(&self, player: Rectangle) -> (Vec<Rectangle>, Vec<Rectangle>) {
        let right = self
            .obstacles
            .iter()
            .copied()
            .filter(|r| r.left_edge() > player.right_edge())
            .collect();
        let left = self
            .obstacles
            .iter()
            .copied()
            .filter(|r| r.right_edge() < player.left_edge())
            .collect();
        (right, left)
    }
}

/// What happened during one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickEvents {
    /// A jump started.
    pub jumped: bool,
    /// The player touched down after being airborne, whether it was
    /// jumping or had walked off an edge.
    pub landed: bool,
    /// Upward motion was stopped by a ceiling.
    pub bumped_head: bool,
    /// Horizontal motion was stopped by a wall or level bound.
    pub hit_wall: bool,
}

/// A running level with one player.
#[derive(Debug, Clone)]
pub struct Simulation {
    tick: u64,
    player: PlayerState,
    level: Level,
    config: PhysicsConfig,
    camera: Camera,
    jump_cue: SoundCue,
    on_ground: bool,
}

impl Simulation {
    /// Start a simulation with a grounded, motionless player at `player`.
    ///
    /// # Errors
    ///
    /// Returns an error if the level or physics configuration is invalid.
    pub fn new(level: Level, player: Rectangle, config: PhysicsConfig) -> Result<Self> {
        Self::with_player(level, PlayerState::at_rest(player), config)
    }

    /// Start a simulation from an arbitrary player state.
    ///
    /// # Errors
    ///
    /// Returns an error if the level or physics configuration is invalid.
    pub fn with_player(level: Level, player: PlayerState, config: PhysicsConfig) -> Result<Self> {
        level.validate()?;
        config.validate()?;
        let mut camera = Camera::new(level.bounds.width, level.bounds.height, level.camera_width);
        camera.follow(&player.object.rectangle);
        Ok(Self {
            tick: 0,
            on_ground: player.jump_state == JumpState::Grounded,
            player,
            level,
            config,
            camera,
            jump_cue: SoundCue::new(),
        })
    }

    /// Advance one tick.
    pub fn tick(&mut self, input: ControlInput) -> TickEvents {
        let mut events = TickEvents::default();

        let ForceOutcome { player, jumped } = apply_forces(self.player, input, &self.config);
        if jumped {
            self.jump_cue.signal();
            events.jumped = true;
        }

        let (below, above) = self.level.vertical_candidates(player.object.rectangle);
        let (resolved, contact) =
            resolve_vertical_contact(player, &below, &above, self.level.floor);
        // A tick whose advance rounds to zero rows keeps whatever contact the
        // player already had.
        let on_ground = match contact {
            Some(VerticalContact::Ground(_)) => true,
            Some(VerticalContact::Ceiling(_)) => false,
            None => self.on_ground && resolved.object.velocity.vertical.round() == 0,
        };
        events.landed = on_ground && !self.on_ground;
        events.bumped_head = matches!(contact, Some(VerticalContact::Ceiling(_)));
        self.on_ground = on_ground;

        let (right, left) = self.level.horizontal_candidates(resolved.object.rectangle);
        let object =
            handle_horizontal_collisions(resolved.object, &right, &left, self.level.bounds);
        events.hit_wall =
            resolved.object.velocity.horizontal != 0 && object.velocity.horizontal == 0;

        self.player = PlayerState {
            object: apply_velocity(object),
            ..resolved
        };
        self.camera.follow(&self.player.object.rectangle);
        self.tick += 1;

        tracing::trace!(
            tick = self.tick,
            x = self.player.object.rectangle.origin.x,
            y = self.player.object.rectangle.origin.y,
            vertical = %self.player.object.velocity.vertical,
            horizontal = self.player.object.velocity.horizontal,
            jump_state = ?self.player.jump_state,
            "Tick complete"
        );

        events
    }

    /// Ticks run so far.
    #[must_use]
    pub fn current_tick(&self) -> u64 {
        self.tick
    }

    /// Current player state.
    #[must_use]
    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    /// Level geometry.
    #[must_use]
    pub fn level(&self) -> &Level {
        &self.level
    }

    /// Physics tuning in use.
    #[must_use]
    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    /// Camera viewport.
    #[must_use]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Handle for the audio side to listen for jump sounds.
    #[must_use]
    pub fn jump_cue(&self) -> SoundCue {
        self.jump_cue.clone()
    }

    /// Hash of the tick counter and player state, for determinism checks.
    #[must_use]
    pub fn state_hash(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.tick.hash(&mut hasher);
        self.player.hash(&mut hasher);
        hasher.finish()
    }
}
