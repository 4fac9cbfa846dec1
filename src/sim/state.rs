//! Arena state and core simulation entities
//!
//! Everything the tick engine mutates lives here: the jets, their
//! projectiles, the tick/alive counters, and the round phase.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::body::Body;
use crate::angle::Angle;
use crate::consts::*;
use crate::learn::JetTrainer;

/// Which side a jet fights for. The player is always [`Team::Blue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Team {
    Blue,
    Red,
}

/// A projectile in flight.
///
/// Velocity and radius are fixed at creation; only the position changes.
#[derive(Debug, Clone)]
pub struct Projectile {
    pos: DVec2,
    vel: DVec2,
    radius: f64,
}

impl Projectile {
    pub fn new(pos: DVec2, vel: DVec2, radius: f64) -> Self {
        Self { pos, vel, radius }
    }

    /// Advance one tick along the fixed velocity.
    pub fn advance(&mut self) {
        self.pos += self.vel;
    }

    pub fn vel(&self) -> DVec2 {
        self.vel
    }
}

impl Body for Projectile {
    fn pos(&self) -> DVec2 {
        self.pos
    }

    fn set_pos(&mut self, pos: DVec2) {
        self.pos = pos;
    }

    fn radius(&self) -> f64 {
        self.radius
    }
}

/// A team-affiliated circular body that fires projectiles and can be shot
/// down. Jets are created once at arena setup and reused across rounds.
#[derive(Debug, Clone)]
pub struct Jet {
    pos: DVec2,
    /// Position restored by [`Jet::reset`] at round boundaries.
    spawn: DVec2,
    /// Firing direction in radians; updated by [`Jet::point_at`].
    heading: f64,
    team: Team,
    alive: bool,
    radius: f64,
    projectile_radius: f64,
    projectiles: Vec<Projectile>,
}

impl Jet {
    pub fn new(spawn: DVec2, team: Team, radius: f64, projectile_radius: f64) -> Self {
        Self {
            pos: spawn,
            spawn,
            heading: 0.0,
            team,
            alive: true,
            radius,
            projectile_radius,
            projectiles: Vec::new(),
        }
    }

    pub fn team(&self) -> Team {
        self.team
    }

    pub fn heading(&self) -> f64 {
        self.heading
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Projectiles this jet currently owns, oldest first.
    pub fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }

    pub(crate) fn projectiles_mut(&mut self) -> &mut Vec<Projectile> {
        &mut self.projectiles
    }

    /// Turn the nose toward a target point.
    pub fn point_at(&mut self, target: DVec2) {
        self.heading = self.angle_to(target);
    }

    /// Spawn a projectile at the jet's position, one distance-unit per tick
    /// along the current heading. Dead jets do not fire.
    pub fn fire(&mut self) {
        if !self.alive {
            return;
        }
        self.projectiles.push(Projectile::new(
            self.pos,
            DVec2::from_angle(self.heading),
            self.projectile_radius,
        ));
    }

    /// Advance every owned projectile one tick.
    pub fn advance_projectiles(&mut self) {
        for p in &mut self.projectiles {
            p.advance();
        }
    }

    /// Displace the jet one unit along a steering angle. Dead jets and the
    /// "no direction" sentinel hold position.
    pub fn fly(&mut self, steer: Angle) {
        if !self.alive || steer.is_none() {
            return;
        }
        self.pos += DVec2::from_angle(steer.radians());
    }

    /// Mark the jet shot down. Idempotent.
    pub fn hit(&mut self) {
        self.alive = false;
    }

    /// Restore spawn position, revive, and discard all owned projectiles.
    pub fn reset(&mut self) {
        self.pos = self.spawn;
        self.alive = true;
        self.projectiles.clear();
    }
}

impl Body for Jet {
    fn pos(&self) -> DVec2 {
        self.pos
    }

    fn set_pos(&mut self, pos: DVec2) {
        self.pos = pos;
    }

    fn radius(&self) -> f64 {
        self.radius
    }
}

/// Fixed arena tuning, set once at construction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    /// Radius of the circular arena.
    pub arena_radius: f64,
    /// Body radius of every jet.
    pub jet_radius: f64,
    /// Body radius of every projectile.
    pub projectile_radius: f64,
    /// Ticks between volleys.
    pub fire_interval: u64,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            arena_radius: ARENA_RADIUS,
            jet_radius: JET_RADIUS,
            projectile_radius: PROJECTILE_RADIUS,
            fire_interval: FIRE_INTERVAL,
        }
    }
}

/// Round lifecycle phase. The engine is `Active` except while a round
/// boundary is being processed inside a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundPhase {
    Active,
    Resetting,
}

/// Complete simulation state: jets, counters, round phase, and the trainer
/// that drives the red jets.
///
/// The renderer reads jet and projectile state through the accessors
/// between ticks; nothing here is shared across threads.
pub struct Arena {
    pub(crate) config: ArenaConfig,
    /// All jets, player first. List order is update order.
    pub(crate) jets: Vec<Jet>,
    /// Ticks since the round started.
    pub(crate) ticks: u64,
    /// Jets currently alive.
    pub(crate) alive: usize,
    pub(crate) phase: RoundPhase,
    pub(crate) trainer: JetTrainer,
}

impl Arena {
    /// Standard setup: the player at the center, two red jets docked at the
    /// east and west walls.
    pub fn new(config: ArenaConfig, trainer: JetTrainer) -> Self {
        let wall = config.arena_radius - config.jet_radius;
        let jets = vec![
            Jet::new(DVec2::ZERO, Team::Blue, config.jet_radius, config.projectile_radius),
            Jet::new(
                DVec2::new(wall, 0.0),
                Team::Red,
                config.jet_radius,
                config.projectile_radius,
            ),
            Jet::new(
                DVec2::new(-wall, 0.0),
                Team::Red,
                config.jet_radius,
                config.projectile_radius,
            ),
        ];
        Self::with_jets(config, trainer, jets)
    }

    /// Setup with an explicit jet list. The first jet is the player.
    pub fn with_jets(config: ArenaConfig, trainer: JetTrainer, jets: Vec<Jet>) -> Self {
        assert!(!jets.is_empty(), "arena needs at least the player jet");
        let alive = jets.iter().filter(|j| j.is_alive()).count();
        Self {
            config,
            jets,
            ticks: 0,
            alive,
            phase: RoundPhase::Active,
            trainer,
        }
    }

    pub fn config(&self) -> &ArenaConfig {
        &self.config
    }

    /// All jets, player first.
    pub fn jets(&self) -> &[Jet] {
        &self.jets
    }

    /// Ticks since the round started.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Number of jets currently alive.
    pub fn alive(&self) -> usize {
        self.alive
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn trainer(&self) -> &JetTrainer {
        &self.trainer
    }
}
