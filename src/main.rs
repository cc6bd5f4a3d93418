//! Ringfall entry point
//!
//! Runs a headless demo round: fixed-timestep loop with an accumulator,
//! logging a snapshot once per simulated second.

use std::path::Path;

use ringfall::consts::{MAX_SUBSTEPS, SIM_DT};
use ringfall::sim::{tick, ArenaPhase, ArenaState};
use ringfall::Config;

/// Simulated frame length for the demo loop (30 fps wall clock)
const FRAME_DT: f32 = 1.0 / 30.0;

fn main() {
    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => Config::load(Path::new(&path)),
        None => Config::default(),
    };

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);

    log::info!("Ringfall starting (seed {})", seed);

    let mut state = ArenaState::new(seed, &config);
    state.start();

    let mut accumulator = 0.0f32;
    let mut next_report = 1.0f32;
    let mut elapsed = 0.0f32;

    while state.phase != ArenaPhase::Finished {
        accumulator += FRAME_DT;
        elapsed += FRAME_DT;

        let mut substeps = 0;
        while accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            tick(&mut state, SIM_DT);
            accumulator -= SIM_DT;
            substeps += 1;
        }

        if elapsed >= next_report {
            next_report += 1.0;
            let snap = state.snapshot();
            log::info!(
                "t={:>5.1}s round={} dropped={} standing={} falling={}",
                elapsed,
                snap.drop_round,
                snap.dropped_count,
                snap.standing_count,
                snap.dropped_count - snap.fallen_count,
            );
        }
    }

    let snap = state.snapshot();
    println!(
        "Round over after {:.1}s: {} of {} tiles dropped across {} rounds",
        elapsed,
        snap.dropped_count,
        snap.dropped_count + snap.standing_count,
        snap.drop_round,
    );
}
