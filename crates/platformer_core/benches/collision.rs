//! Collision benchmarks for platformer_core.
//!
//! Run with: `cargo bench -p platformer_core`

// Benchmark binaries don't need docs on macro-generated functions
#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use platformer_core::collision::{passes_through, CollisionAxis, CollisionDirection};
use platformer_core::config::PhysicsConfig;
use platformer_core::kinematics::ControlInput;
use platformer_core::simulation::Simulation;
use platformer_test_utils::fixtures::{
    grounded_player, moving, obstacle_course, player_rect, rational, rect,
};

/// Sweep test for a fast diagonal fall onto a thin platform.
pub fn sweep_benchmark(c: &mut Criterion) {
    let object = moving(player_rect(100, 0), rational(97, 3), 7);
    let platform = rect(90, 40, 64, 4);

    c.bench_function("passes_through_diagonal", |b| {
        b.iter(|| {
            passes_through(
                black_box(object),
                black_box(platform),
                CollisionDirection::FromBelow,
                CollisionAxis::Vertical,
            )
        })
    });
}

/// Full ticks over the obstacle course with a scripted run and jump.
pub fn tick_benchmark(c: &mut Criterion) {
    c.bench_function("obstacle_course_600_ticks", |b| {
        b.iter(|| {
            let mut sim = Simulation::with_player(
                obstacle_course(),
                grounded_player(20),
                PhysicsConfig::default(),
            )
            .expect("fixture level is valid");
            for tick in 0..600u64 {
                sim.tick(ControlInput {
                    left: false,
                    right: tick % 120 < 90,
                    jump: tick % 40 < 12,
                });
            }
            black_box(sim.state_hash())
        })
    });
}

criterion_group!(benches, sweep_benchmark, tick_benchmark);
criterion_main!(benches);
