//! Headless platformer scenario runner.
//!
//! # Usage
//!
//! ```bash
//! # Built-in demo scenario
//! cargo run -p platformer_headless
//!
//! # Scenario file, overriding its tick count, with per-tick JSON lines
//! cargo run -p platformer_headless -- --scenario scenarios/demo.ron --ticks 600 --trace
//! ```
//!
//! Logs go to stderr and are filtered with `RUST_LOG`; stdout carries only
//! JSON.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use platformer_headless::{HeadlessConfig, HeadlessRunner, RunReport, Scenario};

#[derive(Parser)]
#[command(name = "platformer_headless")]
#[command(about = "Headless platformer scenario runner for physics verification")]
#[command(version)]
struct Cli {
    /// Scenario file to load (RON). Runs the built-in demo when omitted.
    #[arg(short, long)]
    scenario: Option<PathBuf>,

    /// Number of ticks to run, overriding the scenario
    #[arg(short, long)]
    ticks: Option<u64>,

    /// Print every tick as a JSON line on stdout
    #[arg(long)]
    trace: bool,
}

/// Final line printed after a run.
#[derive(Serialize)]
struct Summary<'a> {
    scenario: &'a str,
    ticks: u64,
    jumps: u64,
    landings: u64,
    sounds_played: u64,
    final_x: i64,
    final_y: i64,
    final_hash: u64,
}

impl<'a> From<&'a RunReport> for Summary<'a> {
    fn from(report: &'a RunReport) -> Self {
        let rectangle = report.final_player.object.rectangle;
        Self {
            scenario: &report.scenario,
            ticks: report.ticks,
            jumps: report.jumps,
            landings: report.landings,
            sounds_played: report.sounds_played,
            final_x: rectangle.origin.x,
            final_y: rectangle.origin.y,
            final_hash: report.final_hash,
        }
    }
}

fn write_report(report: &RunReport, trace: bool) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    if trace {
        for record in &report.records {
            serde_json::to_writer(&mut out, record)?;
            writeln!(out)?;
        }
    }
    serde_json::to_writer(&mut out, &Summary::from(report))?;
    writeln!(out)?;
    Ok(())
}

fn main() {
    // Logs to stderr; stdout is for JSON
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let scenario = match cli.scenario {
        Some(path) => match Scenario::load(&path) {
            Ok(scenario) => scenario,
            Err(e) => {
                tracing::error!("Failed to load {}: {e}", path.display());
                std::process::exit(1);
            }
        },
        None => Scenario::demo(),
    };

    let runner = HeadlessRunner::with_config(HeadlessConfig {
        tick_override: cli.ticks,
        record_ticks: cli.trace,
        ..HeadlessConfig::default()
    });

    let report = match runner.run(&scenario) {
        Ok(report) => report,
        Err(e) => {
            tracing::error!("Run failed: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = write_report(&report, cli.trace) {
        tracing::error!("Failed to write output: {e}");
        std::process::exit(1);
    }
}
