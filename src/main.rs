//! Smart Jets headless demo
//!
//! No window here: a seeded pseudo-pilot flies the player jet so the
//! learning loop can be watched through the logs (`RUST_LOG=info`). A real
//! frontend would do exactly what this loop does - publish one `TickInput`
//! snapshot per tick and read the arena back out for drawing.

use std::fs;
use std::path::Path;

use glam::DVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Deserialize;

use smartjets::consts::SAMPLE_CAPACITY;
use smartjets::{
    Arena, ArenaConfig, JetTrainer, KnnClassifier, NearestThreats, TickEvent, TickInput, tick,
};

/// Optional config overrides, read from the working directory.
const CONFIG_PATH: &str = "smartjets.json";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct DemoConfig {
    arena: ArenaConfig,
    /// Ticks to simulate before exiting.
    ticks: u64,
    /// Pseudo-pilot RNG seed; same seed, same flight.
    seed: u64,
    /// Capacity of the staging and training buffers.
    sample_capacity: usize,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            arena: ArenaConfig::default(),
            ticks: 200_000,
            seed: 7,
            sample_capacity: SAMPLE_CAPACITY,
        }
    }
}

fn load_config() -> DemoConfig {
    if !Path::new(CONFIG_PATH).exists() {
        return DemoConfig::default();
    }
    match fs::read_to_string(CONFIG_PATH).map_err(|e| e.to_string()).and_then(|text| {
        serde_json::from_str::<DemoConfig>(&text).map_err(|e| e.to_string())
    }) {
        Ok(config) => {
            log::info!("loaded {CONFIG_PATH}");
            config
        }
        Err(e) => {
            log::warn!("ignoring {CONFIG_PATH}: {e}");
            DemoConfig::default()
        }
    }
}

fn main() {
    env_logger::init();

    let config = load_config();
    let trainer = JetTrainer::new(
        Box::new(NearestThreats::default()),
        Box::new(KnnClassifier::default()),
        config.sample_capacity,
    );
    let mut arena = Arena::new(config.arena, trainer);
    let mut rng = Pcg32::seed_from_u64(config.seed);
    let mut input = TickInput::default();

    let mut rounds_lost = 0u64;
    let mut rounds_trained = 0u64;

    log::info!("flying {} ticks, seed {}", config.ticks, config.seed);
    for t in 0..config.ticks {
        // Keys flip rarely so headings persist the way a held key would;
        // the pointer sweeps a circle to spread volleys around the arena.
        if rng.random_bool(0.02) {
            input.up = !input.up;
        }
        if rng.random_bool(0.02) {
            input.down = !input.down;
        }
        if rng.random_bool(0.02) {
            input.left = !input.left;
        }
        if rng.random_bool(0.02) {
            input.right = !input.right;
        }
        let sweep = t as f64 * 0.004;
        input.pointer = DVec2::from_angle(sweep) * (config.arena.arena_radius * 0.6);

        match tick(&mut arena, &input) {
            TickEvent::None => {}
            TickEvent::RoundLost { .. } => rounds_lost += 1,
            TickEvent::RoundTrained { .. } => rounds_trained += 1,
        }
    }

    log::info!(
        "done: {rounds_trained} rounds trained, {rounds_lost} rounds lost, {} samples confirmed",
        arena.trainer().confirmed()
    );
}
