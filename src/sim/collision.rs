//! Collision math for circular bodies
//!
//! Pure geometry over positions and radii: overlap separation for jet
//! pairs and the touch predicate used for projectile hits. The tick engine
//! decides which pairs to test and applies the results; nothing here
//! mutates entities.

use glam::DVec2;

/// Separate two overlapping circles symmetrically.
///
/// If the centers are closer than `min_dist`, returns new positions pushed
/// apart along the line connecting the centers, half the deficit each, so
/// the resulting distance is exactly `min_dist`. Returns `None` when the
/// pair is not overlapping. Coincident centers separate along +x.
pub fn separate_pair(a: DVec2, b: DVec2, min_dist: f64) -> Option<(DVec2, DVec2)> {
    let gap = a.distance(b) - min_dist;
    if gap >= 0.0 {
        return None;
    }
    let dir = DVec2::from_angle((b - a).y.atan2((b - a).x));
    let half = -gap / 2.0;
    Some((a - dir * half, b + dir * half))
}

/// Whether two circles overlap (strict: touching exactly does not count).
pub fn circles_touch(a: DVec2, a_radius: f64, b: DVec2, b_radius: f64) -> bool {
    a.distance(b) < a_radius + b_radius
}
