/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//!
//! # Basic geometric types
//!
//! The stroker only ever needs one kind of point: a 2D point with `f64` components. `flo_curves`
//! makes this generic (any type that implements its `Coordinate` trait can be used), but the
//! curve primitive here is a closed set of variants over a fixed point type, so a single concrete
//! `Coord2` is enough.
//!

use std::ops::{Add, Div, Mul, Neg, Sub};

/// Distance below which two points are considered coincident, and below which a line-line
/// intersection determinant is considered degenerate (parallel lines).
pub const SMALL_DISTANCE: f64 = 0.001;

/// A point, or a vector, in 2D space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Coord2(pub f64, pub f64);

impl Coord2 {
    #[inline]
    pub fn x(&self) -> f64 {
        self.0
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.1
    }

    #[inline]
    pub fn origin() -> Coord2 {
        Coord2(0.0, 0.0)
    }

    #[inline]
    pub fn dot(&self, other: &Coord2) -> f64 {
        self.0 * other.0 + self.1 * other.1
    }

    /// The z component of the 3D cross product of two vectors lying in the xy plane.
    #[inline]
    pub fn cross(&self, other: &Coord2) -> f64 {
        self.0 * other.1 - self.1 * other.0
    }

    #[inline]
    pub fn magnitude(&self) -> f64 {
        self.dot(self).sqrt()
    }

    #[inline]
    pub fn distance_to(&self, other: &Coord2) -> f64 {
        (*self - *other).magnitude()
    }

    #[inline]
    pub fn is_near_to(&self, other: &Coord2, distance: f64) -> bool {
        self.distance_to(other) <= distance
    }

    /// Returns this vector scaled to unit length. Degenerate (zero-length) vectors are
    /// returned unchanged: callers that might see a degenerate tangent should check for
    /// that case separately (see `Curve::start_tangent`/`end_tangent`).
    #[inline]
    pub fn to_unit_vector(&self) -> Coord2 {
        let len = self.magnitude();
        if len < SMALL_DISTANCE {
            *self
        } else {
            *self / len
        }
    }

    /// The vector rotated a quarter turn counter-clockwise: `(x, y) -> (-y, x)`.
    #[inline]
    pub fn rotate_90(&self) -> Coord2 {
        Coord2(-self.1, self.0)
    }

    /// The unit normal to the line from this point to `other`, rotated so that it points to
    /// the "right" of the direction of travel (consistent with the sign convention used for
    /// the `l`/`r` offset curves throughout `path::stroke`).
    #[inline]
    pub fn normal_to(&self, other: &Coord2) -> Coord2 {
        Coord2(self.1 - other.1, other.0 - self.0).to_unit_vector()
    }
}

impl Add for Coord2 {
    type Output = Coord2;
    #[inline]
    fn add(self, rhs: Coord2) -> Coord2 {
        Coord2(self.0 + rhs.0, self.1 + rhs.1)
    }
}

impl Sub for Coord2 {
    type Output = Coord2;
    #[inline]
    fn sub(self, rhs: Coord2) -> Coord2 {
        Coord2(self.0 - rhs.0, self.1 - rhs.1)
    }
}

impl Neg for Coord2 {
    type Output = Coord2;
    #[inline]
    fn neg(self) -> Coord2 {
        Coord2(-self.0, -self.1)
    }
}

impl Mul<f64> for Coord2 {
    type Output = Coord2;
    #[inline]
    fn mul(self, rhs: f64) -> Coord2 {
        Coord2(self.0 * rhs, self.1 * rhs)
    }
}

impl Div<f64> for Coord2 {
    type Output = Coord2;
    #[inline]
    fn div(self, rhs: f64) -> Coord2 {
        Coord2(self.0 / rhs, self.1 / rhs)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn dot_product() {
        assert_eq!(Coord2(1.0, 0.0).dot(&Coord2(0.0, 1.0)), 0.0);
        assert_eq!(Coord2(2.0, 0.0).dot(&Coord2(3.0, 0.0)), 6.0);
    }

    #[test]
    fn unit_vector_has_unit_length() {
        let v = Coord2(3.0, 4.0).to_unit_vector();
        assert!((v.magnitude() - 1.0).abs() < 1e-10);
    }

    #[test]
    fn rotate_90_is_perpendicular() {
        let v = Coord2(1.0, 2.0);
        assert_eq!(v.dot(&v.rotate_90()), 0.0);
    }
}
