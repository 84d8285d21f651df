//! headless-drive: soak a citydrive simulation without a renderer.
//!
//! Usage:
//!   headless-drive [--config sim.json] [--seed N] [--frames N] [--delta SECS]
//!
//! Builds an engine from the config (defaults when no file is given), drives
//! a scripted lap pattern for the requested number of frames and prints a
//! JSON run summary on stdout. Logs go to stderr; set RUST_LOG to tune them.

use std::path::{Path, PathBuf};
use std::process;

use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use citydrive_core::commands::{DriveIntents, FrameInput};
use citydrive_core::config::SimConfig;
use citydrive_core::events::SimEvent;
use citydrive_core::types::SimTime;
use citydrive_sim::SimulationEngine;

const DEFAULT_FRAMES: u32 = 3_600;
const DEFAULT_DELTA: f32 = 1.0 / 60.0;

#[derive(Debug, Default, Serialize)]
struct RunSummary {
    seed: u64,
    time: SimTime,
    score: u32,
    missiles_fired: u32,
    pedestrian_hits: u32,
    vehicle_hits: u32,
    explosions: u32,
    pedestrians: usize,
    vehicles: usize,
    collidables: usize,
    final_player_position: [f32; 3],
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| matches!(a.as_str(), "help" | "--help" | "-h")) {
        print_usage();
        return;
    }

    let mut config = match parse_path(&args, "--config") {
        Some(path) => load_config(&path),
        None => SimConfig::default(),
    };
    if let Some(seed) = parse_number::<u64>(&args, "--seed") {
        config.seed = seed;
    }
    let frames = parse_number::<u32>(&args, "--frames").unwrap_or(DEFAULT_FRAMES);
    let delta = parse_number::<f32>(&args, "--delta").unwrap_or(DEFAULT_DELTA);

    let summary = run(config, frames, delta);
    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("Error: failed to encode summary: {e}");
            process::exit(1);
        }
    }
}

fn print_usage() {
    eprintln!(
        "headless-drive: run the citydrive simulation without a renderer\n\
         \n\
           --config <path>  JSON SimConfig (optional, defaults otherwise)\n\
           --seed <N>       Override the config seed\n\
           --frames <N>     Frames to simulate (default: 3600)\n\
           --delta <secs>   Seconds per frame (default: 1/60)\n\
         \n\
         Example:\n\
         \n\
           RUST_LOG=citydrive_sim=debug headless-drive --seed 7 --frames 600\n"
    );
}

fn parse_path(args: &[String], flag: &str) -> Option<PathBuf> {
    for i in 0..args.len() {
        if args[i] == flag && i + 1 < args.len() {
            return Some(PathBuf::from(&args[i + 1]));
        }
    }
    None
}

fn parse_number<T: std::str::FromStr>(args: &[String], flag: &str) -> Option<T> {
    for i in 0..args.len() {
        if args[i] == flag && i + 1 < args.len() {
            match args[i + 1].parse() {
                Ok(value) => return Some(value),
                Err(_) => {
                    eprintln!("Error: invalid value for {flag}: {}", args[i + 1]);
                    process::exit(1);
                }
            }
        }
    }
    None
}

fn load_config(path: &Path) -> SimConfig {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("Error: cannot read {}: {e}", path.display());
            process::exit(1);
        }
    };
    match serde_json::from_str(&text) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: invalid config {}: {e}", path.display());
            process::exit(1);
        }
    }
}

/// Drive laps: accelerate, sweep left, ease off, sweep right, reverse.
/// Fire every half second.
fn scripted_input(frame: u32) -> FrameInput {
    let lap = frame % 600;
    FrameInput {
        intents: DriveIntents {
            forward: lap < 400,
            backward: (450..500).contains(&lap),
            turn_left: (100..160).contains(&lap),
            turn_right: (300..330).contains(&lap),
        },
        fire: frame % 30 == 0,
    }
}

fn run(config: SimConfig, frames: u32, delta: f32) -> RunSummary {
    let seed = config.seed;
    let mut engine = SimulationEngine::new(config);
    if let Err(e) = engine.initialize() {
        eprintln!("Error: {e}");
        process::exit(1);
    }

    let mut summary = RunSummary {
        seed,
        collidables: engine.collidable_count(),
        ..Default::default()
    };

    for frame in 0..frames {
        let snapshot = match engine.advance(delta, &scripted_input(frame)) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                eprintln!("Error at frame {frame}: {e}");
                process::exit(1);
            }
        };

        for event in &snapshot.events {
            match event {
                SimEvent::MissileFired { .. } => summary.missiles_fired += 1,
                SimEvent::PedestrianHit { .. } => summary.pedestrian_hits += 1,
                SimEvent::VehicleHit { .. } => summary.vehicle_hits += 1,
                SimEvent::Explosion { .. } => summary.explosions += 1,
                SimEvent::ScoreChanged { .. } => {}
            }
        }

        summary.time = snapshot.time;
        summary.score = snapshot.score;
        summary.pedestrians = snapshot.pedestrians.len();
        summary.vehicles = snapshot.vehicles.len();
        summary.final_player_position = snapshot.player.transform.position.to_array();
    }

    info!(
        frames,
        score = summary.score,
        missiles = summary.missiles_fired,
        "run complete"
    );
    summary
}
