//! Fixed timestep simulation tick
//!
//! Advances the arena deterministically: record the player's action as a
//! training sample, fire and move every jet, contain everything inside the
//! arena, resolve collisions, and handle round boundaries (train or discard
//! the round's samples, then reset).

use glam::DVec2;

use super::body::Body;
use super::collision;
use super::state::{Arena, Jet, RoundPhase};
use crate::angle::Angle;
use crate::consts::ACTION_STEP;

/// Index of the player jet in the arena's jet list.
pub const PLAYER: usize = 0;

/// Input snapshot for a single tick.
///
/// The host captures keys and pointer asynchronously but publishes one
/// whole value per tick; the engine never reads input through shared
/// mutable fields, so a tick cannot observe a torn combination of
/// direction flags.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Pointer position in arena coordinates (origin at arena center).
    pub pointer: DVec2,
}

/// What a tick did, beyond advancing the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickEvent {
    /// Round still running.
    None,
    /// The player was shot down; the round's staged samples were discarded.
    RoundLost { discarded: usize },
    /// The field was cleared down to at most one jet; the classifier was
    /// retrained and the round's samples committed.
    RoundTrained { dataset: usize },
}

/// Advance the arena by one tick.
pub fn tick(arena: &mut Arena, input: &TickInput) -> TickEvent {
    // 1. The player's intended heading from the key snapshot.
    let intended = Angle::from_keys(input.up, input.down, input.left, input.right);

    // 2. Record the player's action relative to its bearing on the origin,
    //    discretized to the label alphabet. Collected from the very first
    //    tick, long before the classifier is first trained.
    let to_origin = Angle::new(arena.jets[PLAYER].angle_to_origin());
    let action = (intended - to_origin).round_to(Angle::new(ACTION_STEP));
    arena.trainer.record(&arena.jets, PLAYER, action);

    // 3. Volley cadence.
    let fire = arena.ticks % arena.config.fire_interval == 0;
    arena.ticks += 1;

    // 4. Per jet, in list order: projectiles advance, volley, then flight.
    for i in 0..arena.jets.len() {
        arena.jets[i].advance_projectiles();

        if fire {
            let aim = if i == PLAYER {
                input.pointer
            } else {
                arena.jets[PLAYER].pos()
            };
            arena.jets[i].point_at(aim);
            arena.jets[i].fire();
        }

        if i == PLAYER {
            arena.jets[i].fly(intended);
        } else if arena.trainer.is_trained() {
            // The classifier predicts an origin-relative steering angle;
            // anchor it to this jet's own bearing on the origin.
            let relative = arena.trainer.infer(&arena.jets, i);
            let steer = relative + Angle::new(arena.jets[i].angle_to_origin());
            arena.jets[i].fly(steer);
        }
    }

    // 5 + 6. Containment: clamp jets onto the arena, drop lost projectiles.
    let prune_r = arena.config.arena_radius + arena.config.projectile_radius;
    for jet in &mut arena.jets {
        clamp_to_arena(jet, arena.config.arena_radius);
        prune_projectiles(jet, prune_r);
    }

    // 7. Collisions.
    separate_overlapping(&mut arena.jets);
    apply_projectile_hits(arena);

    // 8. Round boundaries. A dead player loses the round and the round's
    //    samples with it; a cleared field confirms them and retrains.
    if !arena.jets[PLAYER].is_alive() {
        let discarded = arena.trainer.staged();
        log::info!("round lost, discarding {discarded} staged samples");
        restart(arena, false);
        TickEvent::RoundLost { discarded }
    } else if arena.alive <= 1 {
        let dataset = arena.trainer.confirmed() + arena.trainer.staged();
        log::info!("round won, retraining on {dataset} samples");
        restart(arena, true);
        TickEvent::RoundTrained { dataset }
    } else {
        TickEvent::None
    }
}

/// Project a jet that escaped the arena back onto the boundary circle,
/// along its existing ray from the origin.
fn clamp_to_arena(jet: &mut Jet, arena_radius: f64) {
    let max_r = arena_radius - jet.radius();
    if jet.distance_to_origin() > max_r {
        let theta = jet.angle_from_origin();
        jet.set_pos(DVec2::from_angle(theta) * max_r);
    }
}

/// Drop projectiles that have flown past the arena edge beyond their own
/// radius (`max_r` = arena radius + projectile radius).
fn prune_projectiles(jet: &mut Jet, max_r: f64) {
    jet.projectiles_mut()
        .retain(|p| p.distance_to_origin() <= max_r);
}

/// Push every overlapping jet pair apart to exactly touching distance.
/// Dead jets still occupy space and participate.
fn separate_overlapping(jets: &mut [Jet]) {
    for i in 0..jets.len() {
        for j in (i + 1)..jets.len() {
            let (head, tail) = jets.split_at_mut(j);
            let (a, b) = (&mut head[i], &mut tail[0]);
            let min_dist = a.radius() + b.radius();
            if let Some((pa, pb)) = collision::separate_pair(a.pos(), b.pos(), min_dist) {
                a.set_pos(pa);
                b.set_pos(pb);
            }
        }
    }
}

/// A projectile overlapping a living enemy jet.
struct HitEvent {
    attacker: usize,
    defender: usize,
    projectile: usize,
}

/// Detect and apply projectile hits.
///
/// Detection runs over a snapshot of the jet list; application is
/// sequential with a liveness recheck, so a jet that dies mid-pass stops
/// absorbing projectiles (a projectile whose target is already down stays
/// in flight).
fn apply_projectile_hits(arena: &mut Arena) {
    let mut events = Vec::new();
    for (a, attacker) in arena.jets.iter().enumerate() {
        for (d, defender) in arena.jets.iter().enumerate() {
            if defender.team() == attacker.team() || !defender.is_alive() {
                continue;
            }
            for (p, projectile) in attacker.projectiles().iter().enumerate() {
                if collision::circles_touch(
                    defender.pos(),
                    defender.radius(),
                    projectile.pos(),
                    projectile.radius(),
                ) {
                    events.push(HitEvent {
                        attacker: a,
                        defender: d,
                        projectile: p,
                    });
                }
            }
        }
    }

    let mut removed: Vec<Vec<usize>> = vec![Vec::new(); arena.jets.len()];
    for ev in &events {
        if !arena.jets[ev.defender].is_alive() {
            continue;
        }
        arena.jets[ev.defender].hit();
        arena.alive -= 1;
        // One projectile overlapping two defenders downs both but is only
        // removed once
        if !removed[ev.attacker].contains(&ev.projectile) {
            removed[ev.attacker].push(ev.projectile);
        }
    }

    // Remove spent projectiles back-to-front so indices stay valid.
    for (a, mut spent) in removed.into_iter().enumerate() {
        spent.sort_unstable_by(|x, y| y.cmp(x));
        for p in spent {
            arena.jets[a].projectiles_mut().remove(p);
        }
    }
}

/// Process a round boundary: train-and-commit or discard, then reset every
/// jet and the counters.
fn restart(arena: &mut Arena, train: bool) {
    arena.phase = RoundPhase::Resetting;
    if train {
        arena.trainer.train_and_commit();
    } else {
        arena.trainer.discard_round();
    }
    for jet in &mut arena.jets {
        jet.reset();
    }
    arena.ticks = 0;
    arena.alive = arena.jets.len();
    arena.phase = RoundPhase::Active;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{JET_RADIUS, PROJECTILE_RADIUS};
    use crate::learn::{JetTrainer, KnnClassifier, NearestThreats};
    use crate::sim::state::{ArenaConfig, Team};

    fn trainer() -> JetTrainer {
        JetTrainer::new(
            Box::new(NearestThreats::default()),
            Box::new(KnnClassifier::default()),
            1000,
        )
    }

    fn jet_at(x: f64, y: f64, team: Team) -> Jet {
        Jet::new(DVec2::new(x, y), team, JET_RADIUS, PROJECTILE_RADIUS)
    }

    #[test]
    fn test_boundary_clamp_projects_onto_circle() {
        let config = ArenaConfig::default();
        let jets = vec![
            jet_at(300.0, 0.0, Team::Blue),
            jet_at(-100.0, 50.0, Team::Red),
        ];
        let mut arena = Arena::with_jets(config, trainer(), jets);
        tick(&mut arena, &TickInput::default());
        let player = &arena.jets()[PLAYER];
        let max_r = config.arena_radius - config.jet_radius;
        assert!((player.distance_to_origin() - max_r).abs() < 1e-9);
        // Same ray from the origin as before
        assert!((player.pos().y).abs() < 1e-9);
        assert!(player.pos().x > 0.0);
    }

    #[test]
    fn test_approaching_jets_separate_and_survive() {
        // Same team on purpose: projectiles cannot hit, only bodies meet.
        let jets = vec![jet_at(-30.0, 0.0, Team::Red), jet_at(0.0, 0.0, Team::Red)];
        let mut arena = Arena::with_jets(ArenaConfig::default(), trainer(), jets);
        let input = TickInput {
            right: true,
            ..Default::default()
        };
        for _ in 0..100 {
            tick(&mut arena, &input);
            let d = arena.jets()[0].distance_to(arena.jets()[1].pos());
            assert!(d >= 2.0 * JET_RADIUS - 1e-9);
        }
        assert!(arena.jets()[0].is_alive());
        assert!(arena.jets()[1].is_alive());
        // The walker shoved the idle jet ahead of it
        assert!(arena.jets()[1].pos().x > 0.0);
    }

    #[test]
    fn test_projectile_kill_decrements_alive_and_is_removed() {
        let mut player = jet_at(0.0, 0.0, Team::Blue);
        player.point_at(DVec2::new(1.0, 0.0));
        player.fire();
        let jets = vec![
            player,
            jet_at(30.0, 0.0, Team::Red),
            // Far-off wingman keeps the round from ending on the kill
            jet_at(0.0, 200.0, Team::Red),
        ];
        let mut arena = Arena::with_jets(ArenaConfig::default(), trainer(), jets);
        arena.ticks = 1; // off the volley cadence

        let mut killed_at = None;
        for t in 0..40 {
            let event = tick(&mut arena, &TickInput::default());
            assert_eq!(event, TickEvent::None);
            if !arena.jets()[1].is_alive() {
                killed_at = Some(t);
                break;
            }
        }
        assert!(killed_at.is_some(), "projectile never connected");
        assert_eq!(arena.alive(), 2);
        assert!(arena.jets()[PLAYER].projectiles().is_empty());
    }

    #[test]
    fn test_dead_jet_is_not_hit_again() {
        let mut player = jet_at(0.0, 0.0, Team::Blue);
        player.point_at(DVec2::new(1.0, 0.0));
        player.fire();
        let mut downed = jet_at(30.0, 0.0, Team::Red);
        downed.hit();
        let jets = vec![player, downed, jet_at(0.0, 200.0, Team::Red)];
        let mut arena = Arena::with_jets(ArenaConfig::default(), trainer(), jets);
        arena.ticks = 1;

        let alive_before = arena.alive();
        for _ in 0..40 {
            tick(&mut arena, &TickInput::default());
        }
        // The projectile sailed straight through the wreck
        assert_eq!(arena.alive(), alive_before);
        assert_eq!(arena.jets()[PLAYER].projectiles().len(), 1);
    }

    #[test]
    fn test_dead_jets_still_occupy_space() {
        let mut downed = jet_at(5.0, 0.0, Team::Red);
        downed.hit();
        let jets = vec![
            jet_at(0.0, 0.0, Team::Blue),
            downed,
            jet_at(0.0, 200.0, Team::Red),
        ];
        let mut arena = Arena::with_jets(ArenaConfig::default(), trainer(), jets);
        arena.ticks = 1;
        tick(&mut arena, &TickInput::default());
        let d = arena.jets()[0].distance_to(arena.jets()[1].pos());
        assert!((d - 2.0 * JET_RADIUS).abs() < 1e-9);
    }

    #[test]
    fn test_fire_interval_cadence() {
        let config = ArenaConfig {
            fire_interval: 10,
            ..Default::default()
        };
        let jets = vec![jet_at(0.0, 0.0, Team::Blue), jet_at(240.0, 0.0, Team::Red)];
        let mut arena = Arena::with_jets(config, trainer(), jets);
        for _ in 0..25 {
            tick(&mut arena, &TickInput::default());
        }
        // Volleys at ticks 0, 10 and 20
        assert_eq!(arena.jets()[1].projectiles().len(), 3);
    }

    #[test]
    fn test_lost_projectiles_are_pruned() {
        let config = ArenaConfig {
            arena_radius: 30.0,
            fire_interval: 1000,
            ..Default::default()
        };
        let mut player = jet_at(0.0, 0.0, Team::Blue);
        player.point_at(DVec2::new(1.0, 0.0));
        player.fire();
        let jets = vec![player, jet_at(-20.0, 0.0, Team::Blue)];
        let mut arena = Arena::with_jets(config, trainer(), jets);
        arena.ticks = 1;
        for _ in 0..40 {
            tick(&mut arena, &TickInput::default());
        }
        assert!(arena.jets()[PLAYER].projectiles().is_empty());
    }

    #[test]
    fn test_bots_hold_position_until_trained() {
        let mut arena = Arena::new(ArenaConfig::default(), trainer());
        let spawn = arena.jets()[1].pos();
        let input = TickInput {
            up: true,
            ..Default::default()
        };
        for _ in 0..50 {
            tick(&mut arena, &input);
        }
        assert!(!arena.trainer().is_trained());
        assert_eq!(arena.jets()[1].pos(), spawn);
    }

    #[test]
    fn test_bots_fly_once_trained() {
        let mut arena = Arena::new(ArenaConfig::default(), trainer());
        let input = TickInput {
            up: true,
            ..Default::default()
        };
        for _ in 0..50 {
            tick(&mut arena, &input);
        }
        arena.trainer.train_and_commit();
        let before = arena.jets()[1].pos();
        tick(&mut arena, &input);
        let after = arena.jets()[1].pos();
        // Non-sentinel predictions displace the jet exactly one unit
        assert!((before.distance(after) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_player_death_discards_round() {
        let mut shooter = jet_at(14.0, 0.0, Team::Red);
        shooter.point_at(DVec2::ZERO);
        shooter.fire();
        let jets = vec![
            jet_at(0.0, 0.0, Team::Blue),
            shooter,
            jet_at(0.0, 200.0, Team::Red),
        ];
        let mut arena = Arena::with_jets(ArenaConfig::default(), trainer(), jets);
        arena.ticks = 1;

        // The first tick's separation shoves the player back to x=-3, so
        // the projectile connects a few ticks later at x=8.
        let mut event = TickEvent::None;
        for _ in 0..10 {
            event = tick(&mut arena, &TickInput::default());
            if event != TickEvent::None {
                break;
            }
        }
        match event {
            TickEvent::RoundLost { discarded } => assert!(discarded > 0),
            other => panic!("expected a lost round, got {other:?}"),
        }
        assert!(!arena.trainer().is_trained());
        assert_eq!(arena.trainer().staged(), 0);
        // Round reset: everyone is back up at their spawn
        assert_eq!(arena.alive(), 3);
        assert!(arena.jets()[PLAYER].is_alive());
        assert_eq!(arena.ticks(), 0);
        assert_eq!(arena.phase(), RoundPhase::Active);
    }

    #[test]
    fn test_cleared_field_trains_and_commits() {
        let mut player = jet_at(0.0, 0.0, Team::Blue);
        player.point_at(DVec2::new(1.0, 0.0));
        player.fire();
        let jets = vec![player, jet_at(20.0, 0.0, Team::Red)];
        let mut arena = Arena::with_jets(ArenaConfig::default(), trainer(), jets);
        arena.ticks = 1;

        let mut event = TickEvent::None;
        for _ in 0..20 {
            event = tick(&mut arena, &TickInput { up: true, ..Default::default() });
            if event != TickEvent::None {
                break;
            }
        }
        match event {
            TickEvent::RoundTrained { dataset } => assert!(dataset > 0),
            other => panic!("expected a trained round, got {other:?}"),
        }
        assert!(arena.trainer().is_trained());
        assert_eq!(arena.trainer().staged(), 0);
        assert!(arena.trainer().confirmed() > 0);
        assert_eq!(arena.alive(), 2);
    }

    #[test]
    fn test_determinism() {
        let mut a = Arena::new(ArenaConfig::default(), trainer());
        let mut b = Arena::new(ArenaConfig::default(), trainer());
        let inputs = [
            TickInput { up: true, ..Default::default() },
            TickInput { up: true, right: true, ..Default::default() },
            TickInput::default(),
            TickInput { left: true, pointer: DVec2::new(40.0, -10.0), ..Default::default() },
        ];
        for round in 0..20 {
            let input = inputs[round % inputs.len()];
            tick(&mut a, &input);
            tick(&mut b, &input);
        }
        for (ja, jb) in a.jets().iter().zip(b.jets()) {
            assert_eq!(ja.pos(), jb.pos());
            assert_eq!(ja.projectiles().len(), jb.projectiles().len());
        }
    }
}
