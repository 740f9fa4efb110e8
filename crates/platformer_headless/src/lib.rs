//! Headless scenario runner for physics verification and CI.
//!
//! Replays a scripted scenario against the physics core without a window
//! and reports what happened on every tick. This enables:
//!
//! - **Regression checks**: exact positions per tick, compared across builds
//! - **Determinism checks**: the final state hash must never change for a
//!   given scenario
//! - **Tuning**: try physics constants from a RON file without recompiling
//!
//! # Output
//!
//! - **stdout**: one JSON [`TickRecord`](runner::TickRecord) per line with
//!   `--trace`, then a JSON summary
//! - **stderr**: logs (human-readable)
//!
//! # Example
//!
//! ```bash
//! # Run the built-in demo
//! cargo run -p platformer_headless
//!
//! # Run a scenario with a per-tick trace
//! cargo run -p platformer_headless -- --scenario scenarios/demo.ron --trace
//! ```

pub mod runner;
pub mod scenario;

pub use runner::{HeadlessConfig, HeadlessRunner, RunReport, RunnerError, TickRecord};
pub use scenario::{Scenario, ScenarioError, ScriptedInput};
