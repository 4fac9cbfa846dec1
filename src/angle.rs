//! Normalized angle arithmetic
//!
//! Steering directions, firing headings, and classifier labels are all
//! angles in radians confined to `[0, 2π)`. A reserved NaN sentinel means
//! "no direction" (no keys held); it propagates through every operation so
//! a directionless input stays directionless after relative-angle math.

use std::fmt;
use std::ops::{Add, Sub};
use std::str::FromStr;

use std::f64::consts::TAU;

/// An angle in radians, normalized to `[0, 2π)`, or the "no direction"
/// sentinel.
///
/// Comparison follows float semantics: two sentinels are *not* equal to
/// each other. Use [`Angle::is_none`] to test for the sentinel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Angle(f64);

/// Wrap an angle into `[0, 2π)`. NaN passes through unchanged.
pub fn normalize(radians: f64) -> f64 {
    let mut a = radians % TAU;
    if a < 0.0 {
        a += TAU;
    }
    // % can land exactly on 2π after the rounding above
    if a >= TAU {
        a -= TAU;
    }
    a
}

impl Angle {
    /// The "no direction" sentinel.
    pub const NONE: Self = Angle(f64::NAN);

    /// Create an angle from radians, wrapping into `[0, 2π)`.
    pub fn new(radians: f64) -> Self {
        Angle(normalize(radians))
    }

    /// Create an angle from four direction flags.
    ///
    /// The flags form the lattice vector `(right - left, up - down)`; the
    /// result is that vector's polar angle. All-false or canceling flags
    /// give [`Angle::NONE`], never zero.
    pub fn from_keys(up: bool, down: bool, left: bool, right: bool) -> Self {
        let x = (right as i32) - (left as i32);
        let y = (up as i32) - (down as i32);
        if x == 0 && y == 0 {
            return Angle::NONE;
        }
        Angle::new((y as f64).atan2(x as f64))
    }

    /// Whether this is the "no direction" sentinel.
    pub fn is_none(self) -> bool {
        self.0.is_nan()
    }

    /// The normalized radian value (NaN for the sentinel).
    pub fn radians(self) -> f64 {
        self.0
    }

    /// Round to the nearest multiple of `base`, renormalized.
    ///
    /// Discretizes continuous steering into the finite label alphabet used
    /// for classification. The sentinel rounds to itself.
    pub fn round_to(self, base: Angle) -> Angle {
        Angle::new(base.0 * (self.0 / base.0).round())
    }
}

impl Add for Angle {
    type Output = Angle;

    fn add(self, rhs: Angle) -> Angle {
        Angle::new(self.0 + rhs.0)
    }
}

impl Sub for Angle {
    type Output = Angle;

    fn sub(self, rhs: Angle) -> Angle {
        Angle::new(self.0 - rhs.0)
    }
}

impl fmt::Display for Angle {
    /// Shortest representation that parses back to the same value; used
    /// verbatim as a classification label.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Angle {
    type Err = std::num::ParseFloatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Angle::new(s.parse::<f64>()?))
    }
}
