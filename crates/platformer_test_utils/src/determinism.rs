//! Determinism testing utilities.
//!
//! Provides a harness for verifying that the simulation produces
//! identical results given identical inputs.
//!
//! # Testing Strategy
//!
//! Physics must be reproducible tick for tick. Sources of non-determinism
//! the harness guards against:
//!
//! - **Floating-point math**: velocities are [`RationalDistance`]s and
//!   positions are integers; nothing in the core uses floats.
//! - **Candidate ordering**: resolution sorts candidates with a stable sort,
//!   so equal edges keep their input order.
//! - **Thread scheduling**: the only shared state is the sound cue flag,
//!   which never feeds back into physics.
//!
//! [`RationalDistance`]: platformer_core::rational::RationalDistance

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::thread;

use platformer_core::kinematics::ControlInput;
use platformer_core::simulation::Simulation;

/// Result of a determinism test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeterminismResult {
    /// Whether all runs produced identical results.
    pub is_deterministic: bool,
    /// Hashes from each run.
    pub hashes: Vec<u64>,
    /// Number of ticks simulated.
    pub ticks: u64,
}

impl DeterminismResult {
    /// Get all unique hashes (should be 1 for deterministic simulation).
    #[must_use]
    pub fn unique_hashes(&self) -> Vec<u64> {
        let mut unique: Vec<u64> = self.hashes.clone();
        unique.sort_unstable();
        unique.dedup();
        unique
    }

    /// Assert that the simulation was deterministic, with a detailed error message.
    ///
    /// # Panics
    ///
    /// Panics if the simulation produced different hashes across runs.
    pub fn assert_deterministic(&self) {
        if !self.is_deterministic {
            let unique = self.unique_hashes();
            panic!(
                "Simulation is non-deterministic!\n\
                 Runs: {}\n\
                 Ticks: {}\n\
                 Unique hashes: {} (expected 1)\n\
                 All hashes: {:?}",
                self.hashes.len(),
                self.ticks,
                unique.len(),
                self.hashes
            );
        }
    }
}

/// Run a simulation multiple times and verify determinism.
///
/// `step` receives the state and the zero-based tick index.
pub fn verify_determinism<S, Setup, Step, HashFn>(
    runs: usize,
    ticks: u64,
    setup: Setup,
    step: Step,
    hash: HashFn,
) -> DeterminismResult
where
    Setup: Fn() -> S,
    Step: Fn(&mut S, u64),
    HashFn: Fn(&S) -> u64,
{
    let mut hashes = Vec::with_capacity(runs);

    for _ in 0..runs {
        let mut state = setup();

        for tick in 0..ticks {
            step(&mut state, tick);
        }

        hashes.push(hash(&state));
    }

    let is_deterministic = hashes.windows(2).all(|w| w[0] == w[1]);

    DeterminismResult {
        is_deterministic,
        hashes,
        ticks,
    }
}

/// Run a [`Simulation`] twice with the same input script and compare hashes.
///
/// `input` maps a tick index to the buttons held on that tick.
pub fn verify_simulation_determinism<F, I>(setup_fn: F, input: I, num_ticks: u64) -> bool
where
    F: Fn() -> Simulation,
    I: Fn(u64) -> ControlInput,
{
    verify_determinism(
        2,
        num_ticks,
        setup_fn,
        |sim: &mut Simulation, tick| {
            sim.tick(input(tick));
        },
        Simulation::state_hash,
    )
    .is_deterministic
}

/// Run `num_sims` copies of a scripted simulation on separate threads and
/// return each final hash.
pub fn run_parallel_simulations<F, I>(
    setup_fn: F,
    input: I,
    num_sims: usize,
    num_ticks: u64,
) -> Vec<u64>
where
    F: Fn() -> Simulation + Sync,
    I: Fn(u64) -> ControlInput + Sync,
{
    let setup_ref = &setup_fn;
    let input_ref = &input;
    thread::scope(|scope| {
        let handles: Vec<_> = (0..num_sims)
            .map(|_| {
                scope.spawn(move || {
                    let mut sim = setup_ref();
                    for tick in 0..num_ticks {
                        sim.tick(input_ref(tick));
                    }
                    sim.state_hash()
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().expect("simulation thread panicked"))
            .collect()
    })
}

/// Hash any hashable value.
pub fn compute_hash<T: Hash>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

/// Proptest strategies for physics testing.
pub mod strategies {
    use proptest::prelude::*;

    use platformer_core::components::{MovingObject, Velocity};
    use platformer_core::geometry::Rectangle;
    use platformer_core::kinematics::ControlInput;
    use platformer_core::rational::{Distance, RationalDistance};

    /// Coordinate in a typical level.
    pub fn arb_coordinate() -> impl Strategy<Value = Distance> {
        -1000i64..1000
    }

    /// Positive rectangle extent.
    pub fn arb_extent() -> impl Strategy<Value = Distance> {
        1i64..64
    }

    /// Rectangle with positive size.
    pub fn arb_rectangle() -> impl Strategy<Value = Rectangle> {
        (arb_coordinate(), arb_coordinate(), arb_extent(), arb_extent())
            .prop_map(|(x, y, width, height)| Rectangle::new(x, y, width, height))
    }

    /// Rational with a nonzero denominator of either sign.
    pub fn arb_rational() -> impl Strategy<Value = RationalDistance> {
        (
            -500i64..500,
            prop_oneof![-64i64..=-1, 1i64..=64],
        )
            .prop_map(|(numerator, denominator)| RationalDistance::new(numerator, denominator))
    }

    /// Per-tick velocity, including speeds much larger than any rectangle.
    pub fn arb_velocity() -> impl Strategy<Value = Velocity> {
        (arb_rational(), -200i64..200)
            .prop_map(|(vertical, horizontal)| Velocity::new(vertical, horizontal))
    }

    /// Rectangle with a velocity.
    pub fn arb_moving_object() -> impl Strategy<Value = MovingObject> {
        (arb_rectangle(), arb_velocity())
            .prop_map(|(rectangle, velocity)| MovingObject::new(rectangle, velocity))
    }

    /// Buttons held for one tick.
    pub fn arb_control_input() -> impl Strategy<Value = ControlInput> {
        (any::<bool>(), any::<bool>(), any::<bool>())
            .prop_map(|(left, right, jump)| ControlInput { left, right, jump })
    }

    /// Sequence of inputs.
    pub fn arb_input_sequence(max_len: usize) -> impl Strategy<Value = Vec<ControlInput>> {
        proptest::collection::vec(arb_control_input(), 0..max_len)
    }
}
