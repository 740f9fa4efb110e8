//! # Platformer Core
//!
//! Deterministic physics core for a side-scrolling platformer.
//!
//! This crate contains **only** deterministic logic:
//! - No rendering
//! - No IO
//! - No floating-point math (velocities are exact rationals)
//!
//! Positions are integers, vertical velocity is a [`RationalDistance`], and
//! collisions are decided with a continuous sweep test that compares
//! trajectory slopes by cross-multiplication. Fast objects never tunnel
//! through thin obstacles, and no sub-stepping is needed.
//!
//! ## Crate Structure
//!
//! - [`rational`] - Exact rational distances
//! - [`geometry`] - Rectangles, edges and signed gap distances
//! - [`components`] - Velocity, moving objects and player state
//! - [`collision`] - Collision axis/direction and the sweep test
//! - [`resolution`] - Vertical and horizontal collision resolution
//! - [`kinematics`] - Forces, the jump state machine and integration
//! - [`camera`] - Background scroll helper
//! - [`audio`] - Cross-thread sound cue flag
//! - [`config`] - Physics tuning
//! - [`simulation`] - Per-tick driver tying the pieces together

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod audio;
pub mod camera;
pub mod collision;
pub mod components;
pub mod config;
pub mod error;
pub mod geometry;
pub mod kinematics;
pub mod rational;
pub mod resolution;
pub mod simulation;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::audio::SoundCue;
    pub use crate::camera::{shift_background, Camera};
    pub use crate::collision::{passes_through, CollisionAxis, CollisionDirection};
    pub use crate::components::{DirectionFacing, JumpState, MovingObject, PlayerState, Velocity};
    pub use crate::config::PhysicsConfig;
    pub use crate::error::{PhysicsError, Result};
    pub use crate::geometry::{Point, Rectangle};
    pub use crate::kinematics::{apply_forces, apply_velocity, ControlInput};
    pub use crate::rational::{Distance, RationalDistance};
    pub use crate::resolution::{
        handle_horizontal_collisions, handle_vertical_collisions, resolve_vertical_contact,
        VerticalContact,
    };
    pub use crate::simulation::{Level, Simulation, TickEvents};
}
