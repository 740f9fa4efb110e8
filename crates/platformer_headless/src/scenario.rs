//! Scenario loading and configuration.
//!
//! Scenarios define a level, physics tuning, where the player starts, and a
//! scripted sequence of button presses to replay without a window.

use std::path::Path;

use platformer_core::config::PhysicsConfig;
use platformer_core::error::PhysicsError;
use platformer_core::geometry::Rectangle;
use platformer_core::kinematics::ControlInput;
use platformer_core::simulation::Level;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for scenario operations.
#[derive(Error, Debug)]
pub enum ScenarioError {
    /// File not found.
    #[error("Scenario file not found: {0}")]
    FileNotFound(String),
    /// Failed to read file.
    #[error("Failed to read scenario file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse RON.
    #[error("Failed to parse scenario: {0}")]
    ParseError(#[from] ron::error::SpannedError),
    /// Failed to write RON.
    #[error("Failed to serialize scenario: {0}")]
    SerializeError(#[from] ron::Error),
    /// Parsed, but the contents cannot drive a simulation.
    #[error("Invalid scenario: {0}")]
    Invalid(#[from] PhysicsError),
}

/// Buttons held over a half-open range of ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScriptedInput {
    /// First tick the buttons are held.
    pub from_tick: u64,
    /// First tick the buttons are no longer held.
    pub until_tick: u64,
    /// Hold left.
    #[serde(default)]
    pub left: bool,
    /// Hold right.
    #[serde(default)]
    pub right: bool,
    /// Hold jump.
    #[serde(default)]
    pub jump: bool,
}

impl ScriptedInput {
    /// Whether this entry is active on `tick`.
    #[must_use]
    pub fn covers(&self, tick: u64) -> bool {
        (self.from_tick..self.until_tick).contains(&tick)
    }
}

/// A complete scenario configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    /// Scenario name.
    pub name: String,
    /// Human-readable description.
    #[serde(default)]
    pub description: String,
    /// Level geometry.
    pub level: Level,
    /// Physics tuning.
    #[serde(default)]
    pub physics: PhysicsConfig,
    /// Player rectangle on tick zero. The player starts grounded and still.
    pub player: Rectangle,
    /// Button presses. Overlapping entries combine.
    #[serde(default)]
    pub script: Vec<ScriptedInput>,
    /// Number of ticks to run.
    pub ticks: u64,
}

impl Default for Scenario {
    fn default() -> Self {
        Self::demo()
    }
}

impl Scenario {
    /// Load a scenario from a RON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, unreadable, malformed, or
    /// describes an invalid level or physics configuration.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ScenarioError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ScenarioError::FileNotFound(path.display().to_string()));
        }
        let contents = std::fs::read_to_string(path)?;
        Self::from_ron_str(&contents)
    }

    /// Load from a RON string (useful for embedded scenarios).
    ///
    /// # Errors
    ///
    /// Returns an error if the RON is malformed or the scenario is invalid.
    pub fn from_ron_str(ron: &str) -> Result<Self, ScenarioError> {
        let scenario: Scenario = ron::from_str(ron)?;
        scenario.validate()?;
        Ok(scenario)
    }

    /// Serialize to pretty-printed RON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_ron_string(&self) -> Result<String, ScenarioError> {
        Ok(ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())?)
    }

    /// Check the level, physics and script.
    ///
    /// # Errors
    ///
    /// Returns [`ScenarioError::Invalid`] describing the first problem found.
    pub fn validate(&self) -> Result<(), ScenarioError> {
        self.level.validate()?;
        self.physics.validate()?;
        if self.player.width <= 0 || self.player.height <= 0 {
            return Err(PhysicsError::InvalidConfig(format!(
                "player must have positive size, got {:?}",
                self.player
            ))
            .into());
        }
        if let Some(entry) = self.script.iter().find(|e| e.from_tick > e.until_tick) {
            return Err(PhysicsError::InvalidConfig(format!(
                "script entry ends before it starts: {entry:?}"
            ))
            .into());
        }
        Ok(())
    }

    /// Buttons held on `tick`: every covering script entry, combined.
    #[must_use]
    pub fn input_at(&self, tick: u64) -> ControlInput {
        self.script
            .iter()
            .filter(|entry| entry.covers(tick))
            .fold(ControlInput::NONE, |input, entry| ControlInput {
                left: input.left || entry.left,
                right: input.right || entry.right,
                jump: input.jump || entry.jump,
            })
    }

    /// Built-in demo: run right past a ledge and a ceiling into a wall,
    /// hopping along the way.
    #[must_use]
    pub fn demo() -> Self {
        Self {
            name: "Demo Run".to_string(),
            description: "Run right past a ledge and a ceiling, stop at a wall".to_string(),
            level: Level::new(
                Rectangle::new(0, 0, 1280, 480),
                Rectangle::new(0, 240, 1280, 240),
                320,
            )
            .with_obstacle(Rectangle::new(160, 200, 96, 8))
            .with_obstacle(Rectangle::new(420, 150, 120, 16))
            .with_obstacle(Rectangle::new(900, 120, 24, 120)),
            physics: PhysicsConfig::default(),
            player: Rectangle::new(32, 224, 16, 16),
            script: vec![
                ScriptedInput {
                    from_tick: 0,
                    until_tick: 360,
                    right: true,
                    ..ScriptedInput::default()
                },
                ScriptedInput {
                    from_tick: 20,
                    until_tick: 34,
                    jump: true,
                    ..ScriptedInput::default()
                },
                ScriptedInput {
                    from_tick: 90,
                    until_tick: 120,
                    jump: true,
                    ..ScriptedInput::default()
                },
                ScriptedInput {
                    from_tick: 200,
                    until_tick: 204,
                    jump: true,
                    ..ScriptedInput::default()
                },
            ],
            ticks: 420,
        }
    }
}
