//! Smart Jets - a circular arena dogfight with bots that learn from you
//!
//! Core modules:
//! - `angle`: normalized angle arithmetic and the "no direction" sentinel
//! - `sim`: deterministic simulation (jets, projectiles, collisions, rounds)
//! - `learn`: online imitation learning (samples, features, classifier)
//!
//! The host owns the timer, the window and the input devices; it feeds one
//! [`sim::TickInput`] snapshot per tick into [`sim::tick()`] and draws
//! whatever [`sim::Arena`] exposes afterwards.

pub mod angle;
pub mod learn;
pub mod sim;

pub use angle::Angle;
pub use learn::{Classifier, FeatureGenerator, JetTrainer, KnnClassifier, NearestThreats};
pub use sim::{Arena, ArenaConfig, TickEvent, TickInput, tick};

/// Game configuration constants
pub mod consts {
    /// Radius of the circular arena
    pub const ARENA_RADIUS: f64 = 250.0;
    /// Body radius of every jet
    pub const JET_RADIUS: f64 = 10.0;
    /// Body radius of every projectile
    pub const PROJECTILE_RADIUS: f64 = 2.0;
    /// Ticks between volleys
    pub const FIRE_INTERVAL: u64 = 100;

    /// Suggested host timer delay between ticks, in milliseconds
    pub const TICK_INTERVAL_MS: u64 = 5;

    /// Steering labels are multiples of this step (π/4: eight headings
    /// plus "hold position")
    pub const ACTION_STEP: f64 = std::f64::consts::FRAC_PI_4;
    /// Default capacity of the staging and training sample buffers
    pub const SAMPLE_CAPACITY: usize = 10_000;
    /// Enemy projectiles observed by the default feature policy
    pub const THREATS_OBSERVED: usize = 3;
}
