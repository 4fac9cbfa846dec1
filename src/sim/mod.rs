//! Deterministic simulation module
//!
//! All arena logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Stable iteration order (jet list order, player first)
//! - No rendering or platform dependencies
//! - No RNG: two runs fed identical input snapshots stay identical

pub mod body;
pub mod collision;
pub mod state;
pub mod tick;

pub use body::Body;
pub use collision::{circles_touch, separate_pair};
pub use state::{Arena, ArenaConfig, Jet, Projectile, RoundPhase, Team};
pub use tick::{PLAYER, TickEvent, TickInput, tick};
