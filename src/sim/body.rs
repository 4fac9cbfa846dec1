//! Shared geometry for circular bodies
//!
//! Jets and projectiles are both circles with a position; everything else
//! about them differs. `Body` carries the common geometry so collision and
//! observation code can work in terms of positions, distances and bearings
//! without caring which entity it is looking at.

use glam::DVec2;

/// A positionable circular body.
///
/// Angles are plain `atan2` results in `(-π, π]`, deliberately *not*
/// normalized: callers that need `[0, 2π)` wrap through
/// [`Angle`](crate::angle::Angle).
pub trait Body {
    /// Center position in arena coordinates (origin at arena center).
    fn pos(&self) -> DVec2;

    /// Move the body to a new center position.
    fn set_pos(&mut self, pos: DVec2);

    /// Body radius.
    fn radius(&self) -> f64;

    /// Bearing from this body toward a target point.
    fn angle_to(&self, target: DVec2) -> f64 {
        let d = target - self.pos();
        d.y.atan2(d.x)
    }

    /// Bearing from a source point toward this body.
    fn angle_from(&self, source: DVec2) -> f64 {
        let d = self.pos() - source;
        d.y.atan2(d.x)
    }

    /// Bearing toward the arena center.
    fn angle_to_origin(&self) -> f64 {
        self.angle_to(DVec2::ZERO)
    }

    /// Bearing from the arena center out to this body.
    fn angle_from_origin(&self) -> f64 {
        self.angle_from(DVec2::ZERO)
    }

    /// Euclidean distance to a target point.
    fn distance_to(&self, target: DVec2) -> f64 {
        self.pos().distance(target)
    }

    /// Euclidean distance to the arena center.
    fn distance_to_origin(&self) -> f64 {
        self.pos().length()
    }
}
