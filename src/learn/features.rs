//! Observation features
//!
//! Turns a game state into the fixed-length numeric vector the classifier
//! sees. The policy is swappable; the default one describes the nearest
//! incoming projectiles relative to the observer's bearing on the origin,
//! so the representation is rotation-friendly and works from any seat in
//! the arena.

use std::cmp::Ordering;

use crate::angle::normalize;
use crate::consts::THREATS_OBSERVED;
use crate::sim::{Body, Jet};

/// Produces the observation vector for one jet.
///
/// Implementations must return the same length for every call; `observer`
/// must index into `jets` (out of bounds is a caller bug and panics).
pub trait FeatureGenerator {
    fn generate(&self, jets: &[Jet], observer: usize) -> Vec<f64>;
}

/// Default policy: the `observed` nearest enemy projectiles.
///
/// Two features per observed projectile — the angle between
/// (observer→projectile) and (observer→origin), normalized to `[0, 2π)`,
/// and the distance to it — plus a final feature for the observer's own
/// distance to the origin. Slots without a projectile hold NaN, meaning
/// "not observed". Vector length is `2 * observed + 1`.
#[derive(Debug, Clone, Copy)]
pub struct NearestThreats {
    observed: usize,
}

impl NearestThreats {
    pub fn new(observed: usize) -> Self {
        Self { observed }
    }
}

impl Default for NearestThreats {
    fn default() -> Self {
        Self::new(THREATS_OBSERVED)
    }
}

impl FeatureGenerator for NearestThreats {
    fn generate(&self, jets: &[Jet], observer: usize) -> Vec<f64> {
        let me = &jets[observer];
        let to_origin = me.angle_to_origin();

        // Every projectile fired by the other side, as (distance, bearing)
        let mut threats: Vec<(f64, f64)> = jets
            .iter()
            .filter(|j| j.team() != me.team())
            .flat_map(|j| j.projectiles())
            .map(|p| (me.distance_to(p.pos()), me.angle_to(p.pos())))
            .collect();
        // Stable sort: ties keep insertion order, so the result is
        // deterministic for identical states
        threats.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));

        let mut features = vec![f64::NAN; 2 * self.observed + 1];
        for (k, (distance, bearing)) in threats.iter().take(self.observed).enumerate() {
            features[2 * k] = normalize(bearing - to_origin);
            features[2 * k + 1] = *distance;
        }
        features[2 * self.observed] = me.distance_to_origin();
        features
    }
}
