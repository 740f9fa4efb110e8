//! Headless scenario runner implementation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use platformer_core::audio::SoundCue;
use platformer_core::components::{JumpState, PlayerState};
use platformer_core::error::PhysicsError;
use platformer_core::rational::{Distance, RationalDistance};
use platformer_core::simulation::{Simulation, TickEvents};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::scenario::{Scenario, ScenarioError};

/// Error type for running a scenario.
#[derive(Error, Debug)]
pub enum RunnerError {
    /// The scenario failed validation.
    #[error(transparent)]
    Scenario(#[from] ScenarioError),
    /// The simulation could not be built.
    #[error("Failed to start simulation: {0}")]
    Physics(#[from] PhysicsError),
    /// The audio listener thread could not be started.
    #[error("Failed to spawn audio listener: {0}")]
    Spawn(#[from] std::io::Error),
    /// The audio listener thread panicked.
    #[error("Audio listener thread panicked")]
    ListenerPanicked,
}

/// Headless runner configuration.
#[derive(Debug, Clone)]
pub struct HeadlessConfig {
    /// Run this many ticks instead of the scenario's own count.
    pub tick_override: Option<u64>,
    /// Keep a [`TickRecord`] for every tick.
    pub record_ticks: bool,
    /// How long the audio listener sleeps between polls.
    pub listener_poll: Duration,
}

impl Default for HeadlessConfig {
    fn default() -> Self {
        Self {
            tick_override: None,
            record_ticks: true,
            listener_poll: Duration::from_millis(1),
        }
    }
}

/// Player state after one tick, flattened for JSON output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickRecord {
    /// Ticks completed, starting at 1.
    pub tick: u64,
    /// Player left edge.
    pub x: Distance,
    /// Player top edge.
    pub y: Distance,
    /// Vertical velocity.
    pub vertical: RationalDistance,
    /// Horizontal velocity.
    pub horizontal: Distance,
    /// Jump state.
    pub jump_state: JumpState,
    /// Left edge of the visible background.
    pub camera_x: Distance,
    /// A jump started.
    pub jumped: bool,
    /// The player landed.
    pub landed: bool,
    /// The player hit a ceiling.
    pub bumped_head: bool,
    /// The player hit a wall or level bound.
    pub hit_wall: bool,
}

impl TickRecord {
    fn capture(sim: &Simulation, events: TickEvents) -> Self {
        let object = sim.player().object;
        Self {
            tick: sim.current_tick(),
            x: object.rectangle.origin.x,
            y: object.rectangle.origin.y,
            vertical: object.velocity.vertical,
            horizontal: object.velocity.horizontal,
            jump_state: sim.player().jump_state,
            camera_x: sim.camera().source.origin.x,
            jumped: events.jumped,
            landed: events.landed,
            bumped_head: events.bumped_head,
            hit_wall: events.hit_wall,
        }
    }
}

/// Outcome of a scenario run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// Scenario name.
    pub scenario: String,
    /// Ticks run.
    pub ticks: u64,
    /// Per-tick records, empty unless recording was enabled.
    pub records: Vec<TickRecord>,
    /// Player state after the last tick.
    pub final_player: PlayerState,
    /// Simulation state hash after the last tick.
    pub final_hash: u64,
    /// Jumps started.
    pub jumps: u64,
    /// Landings.
    pub landings: u64,
    /// Jump sounds the listener played. Cues signalled faster than the
    /// listener polls coalesce, so this can be lower than `jumps`.
    pub sounds_played: u64,
}

/// Raises the listener's stop flag when dropped, so the thread exits even if
/// a tick panics partway through a run.
struct StopOnDrop(Arc<AtomicBool>);

impl Drop for StopOnDrop {
    fn drop(&mut self) {
        self.0.store(true, Ordering::Release);
    }
}

/// Stand-in audio thread: polls the jump cue until told to stop, then
/// drains it one last time.
fn spawn_listener(
    cue: SoundCue,
    stop: Arc<AtomicBool>,
    poll: Duration,
) -> std::io::Result<thread::JoinHandle<u64>> {
    thread::Builder::new()
        .name("audio-listener".to_string())
        .spawn(move || {
            let mut played = 0;
            loop {
                let stopping = stop.load(Ordering::Acquire);
                if cue.take() {
                    played += 1;
                    tracing::debug!(played, "Playing jump sound");
                }
                if stopping {
                    break;
                }
                thread::sleep(poll);
            }
            played
        })
}

/// Runs scenarios to completion without a window.
#[derive(Debug, Clone, Default)]
pub struct HeadlessRunner {
    config: HeadlessConfig,
}

impl HeadlessRunner {
    /// Create a new headless runner with default config.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a runner with custom configuration.
    #[must_use]
    pub fn with_config(config: HeadlessConfig) -> Self {
        Self { config }
    }

    /// Run `scenario` from tick zero.
    ///
    /// # Errors
    ///
    /// Returns an error if the scenario is invalid or the listener thread
    /// fails.
    pub fn run(&self, scenario: &Scenario) -> Result<RunReport, RunnerError> {
        scenario.validate()?;
        let ticks = self.config.tick_override.unwrap_or(scenario.ticks);
        let mut sim =
            Simulation::new(scenario.level.clone(), scenario.player, scenario.physics)?;

        tracing::info!(scenario = %scenario.name, ticks, "Starting run");

        let stop = Arc::new(AtomicBool::new(false));
        let listener =
            spawn_listener(sim.jump_cue(), Arc::clone(&stop), self.config.listener_poll)?;
        let stop_guard = StopOnDrop(stop);

        let mut records = Vec::new();
        let mut jumps = 0;
        let mut landings = 0;
        for tick in 0..ticks {
            let events = sim.tick(scenario.input_at(tick));
            jumps += u64::from(events.jumped);
            landings += u64::from(events.landed);
            if self.config.record_ticks {
                records.push(TickRecord::capture(&sim, events));
            }
        }

        drop(stop_guard);
        let sounds_played = listener.join().map_err(|_| RunnerError::ListenerPanicked)?;

        let report = RunReport {
            scenario: scenario.name.clone(),
            ticks,
            records,
            final_player: *sim.player(),
            final_hash: sim.state_hash(),
            jumps,
            landings,
            sounds_played,
        };
        tracing::info!(
            jumps = report.jumps,
            landings = report.landings,
            sounds_played = report.sounds_played,
            hash = report.final_hash,
            "Run complete"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_runs_to_completion() {
        let scenario = Scenario::demo();
        let report = HeadlessRunner::new().run(&scenario).unwrap();

        assert_eq!(report.ticks, scenario.ticks);
        assert_eq!(report.records.len(), 420);
        assert_eq!(report.records.last().unwrap().tick, scenario.ticks);
        assert!(report.jumps >= 1);
        assert!(report.sounds_played >= 1);
        assert!(report.sounds_played <= report.jumps);
    }

    #[test]
    fn test_runs_are_deterministic() {
        let scenario = Scenario::demo();
        let runner = HeadlessRunner::new();
        let a = runner.run(&scenario).unwrap();
        let b = runner.run(&scenario).unwrap();
        assert_eq!(a.final_hash, b.final_hash);
        assert_eq!(a.records, b.records);
    }

    #[test]
    fn test_tick_override_and_no_recording() {
        let runner = HeadlessRunner::with_config(HeadlessConfig {
            tick_override: Some(7),
            record_ticks: false,
            ..HeadlessConfig::default()
        });
        let report = runner.run(&Scenario::demo()).unwrap();
        assert_eq!(report.ticks, 7);
        assert!(report.records.is_empty());
        assert_eq!(report.final_player.object.rectangle.origin.y, 224);
    }

    #[test]
    fn test_idle_scenario_never_jumps() {
        let mut scenario = Scenario::demo();
        scenario.script.clear();
        let report = HeadlessRunner::new().run(&scenario).unwrap();
        assert_eq!(report.jumps, 0);
        assert_eq!(report.sounds_played, 0);
        assert!(report.records.iter().all(|r| r.y == 224 && r.x == 32));
    }

    #[test]
    fn test_invalid_scenario_rejected() {
        let mut scenario = Scenario::demo();
        scenario.level.camera_width = 0;
        assert!(matches!(
            HeadlessRunner::new().run(&scenario),
            Err(RunnerError::Scenario(ScenarioError::Invalid(_)))
        ));
    }

    #[test]
    fn test_listener_stops_when_tick_loop_unwinds() {
        let cue = SoundCue::new();
        let stop = Arc::new(AtomicBool::new(false));
        let listener =
            spawn_listener(cue.clone(), Arc::clone(&stop), Duration::from_millis(1)).unwrap();

        let guard_flag = Arc::clone(&stop);
        let unwound = std::panic::catch_unwind(move || {
            let _guard = StopOnDrop(guard_flag);
            cue.signal();
            panic!("tick failed");
        });

        assert!(unwound.is_err());
        assert!(stop.load(Ordering::Acquire));
        assert_eq!(listener.join().unwrap(), 1);
    }

    #[test]
    fn test_record_serializes_as_json_line() {
        let report = HeadlessRunner::new().run(&Scenario::demo()).unwrap();
        let line = serde_json::to_string(&report.records[0]).unwrap();
        assert!(!line.contains('\n'));
        let back: TickRecord = serde_json::from_str(&line).unwrap();
        assert_eq!(back, report.records[0]);
    }
}
