//! Tests against the scenario files shipped with the crate.

use std::path::PathBuf;

use platformer_core::components::JumpState;
use platformer_headless::{HeadlessRunner, Scenario};

fn scenario_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("scenarios")
        .join(name)
}

#[test]
fn test_demo_file_matches_builtin() {
    let loaded = Scenario::load(scenario_path("demo.ron")).unwrap();
    assert_eq!(loaded, Scenario::demo());
}

#[test]
fn test_floor_drop_lands_on_thin_platform() {
    let scenario = Scenario::load(scenario_path("floor_drop.ron")).unwrap();
    let report = HeadlessRunner::new().run(&scenario).unwrap();

    // Gravity 60 carries the player past the 4-row platform on tick 2
    assert_eq!(report.landings, 1);
    let landing = report.records.iter().find(|r| r.landed).unwrap();
    assert_eq!(landing.y, 120 - 16);
    assert_eq!(report.final_player.object.rectangle.origin.y, 120 - 16);
    assert_eq!(report.final_player.jump_state, JumpState::Grounded);
}

#[test]
fn test_every_shipped_scenario_is_deterministic() {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios");
    let runner = HeadlessRunner::new();
    for entry in std::fs::read_dir(dir).unwrap() {
        let path = entry.unwrap().path();
        let scenario = Scenario::load(&path).unwrap();
        let first = runner.run(&scenario).unwrap();
        let second = runner.run(&scenario).unwrap();
        assert_eq!(first.final_hash, second.final_hash, "{}", path.display());
    }
}
