/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use crate::geo::*;

///
/// A single path segment: a line, a cubic bezier, or a rational quadratic (conic) bezier.
///
/// `Curve` is a closed, tagged union rather than a trait object or a generic parameter: the
/// stroker only ever needs to deal with these three shapes, so there's no benefit in making the
/// set of variants extensible. Every operation is a value -> value transform; a `Curve` never
/// borrows or mutates another.
///
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Curve {
    /// A straight line from `p0` to `p1`
    Line { p0: Coord2, p1: Coord2 },

    /// A cubic bezier curve with control points `p0..p3`
    Cubic {
        p0: Coord2,
        p1: Coord2,
        p2: Coord2,
        p3: Coord2,
    },

    /// A rational quadratic (conic) bezier curve: control points `p0, p1, p2`, with `weight`
    /// applied to the middle control point. `weight == 1.0` is an ordinary quadratic.
    Conic {
        p0: Coord2,
        p1: Coord2,
        p2: Coord2,
        weight: f64,
    },
}

impl Curve {
    #[inline]
    pub fn line(p0: Coord2, p1: Coord2) -> Curve {
        Curve::Line { p0, p1 }
    }

    #[inline]
    pub fn cubic(p0: Coord2, p1: Coord2, p2: Coord2, p3: Coord2) -> Curve {
        Curve::Cubic { p0, p1, p2, p3 }
    }

    #[inline]
    pub fn conic(p0: Coord2, p1: Coord2, p2: Coord2, weight: f64) -> Curve {
        Curve::Conic { p0, p1, p2, weight }
    }

    /// The point this curve starts at
    pub fn start_point(&self) -> Coord2 {
        match *self {
            Curve::Line { p0, .. } => p0,
            Curve::Cubic { p0, .. } => p0,
            Curve::Conic { p0, .. } => p0,
        }
    }

    /// The point this curve ends at
    pub fn end_point(&self) -> Coord2 {
        match *self {
            Curve::Line { p1, .. } => p1,
            Curve::Cubic { p3, .. } => p3,
            Curve::Conic { p2, .. } => p2,
        }
    }

    /// Evaluates the curve at parameter `t`, which should lie in `[0, 1]`
    pub fn evaluate(&self, t: f64) -> Coord2 {
        match *self {
            Curve::Line { p0, p1 } => p0 + (p1 - p0) * t,

            Curve::Cubic { p0, p1, p2, p3 } => {
                let ab = p0 + (p1 - p0) * t;
                let bc = p1 + (p2 - p1) * t;
                let cd = p2 + (p3 - p2) * t;
                let abc = ab + (bc - ab) * t;
                let bcd = bc + (cd - bc) * t;
                abc + (bcd - abc) * t
            }

            Curve::Conic { p0, p1, p2, weight } => conic_point_at(p0, p1, p2, weight, t),
        }
    }

    /// The unit tangent vector at the start of the curve (direction of travel)
    pub fn start_tangent(&self) -> Coord2 {
        match *self {
            Curve::Line { p0, p1 } => (p1 - p0).to_unit_vector(),

            Curve::Cubic { p0, p1, p2, p3 } => {
                first_nonzero(&[p1 - p0, p2 - p0, p3 - p0])
            }

            Curve::Conic { p0, p1, p2, .. } => first_nonzero(&[p1 - p0, p2 - p0]),
        }
    }

    /// The unit tangent vector at the end of the curve (direction of travel)
    pub fn end_tangent(&self) -> Coord2 {
        match *self {
            Curve::Line { p0, p1 } => (p1 - p0).to_unit_vector(),

            Curve::Cubic { p0, p1, p2, p3 } => {
                first_nonzero(&[p3 - p2, p3 - p1, p3 - p0])
            }

            Curve::Conic { p0, p1, p2, .. } => first_nonzero(&[p2 - p1, p2 - p0]),
        }
    }

    /// Splits this curve into two curves of the same variant at parameter `t`, such that
    /// evaluating the first over `[0,1]` then the second over `[0,1]` retraces the original
    /// curve over `[0,t]` then `[t,1]`.
    pub fn split(&self, t: f64) -> (Curve, Curve) {
        match *self {
            Curve::Line { p0, p1 } => {
                let mid = p0 + (p1 - p0) * t;
                (Curve::line(p0, mid), Curve::line(mid, p1))
            }

            Curve::Cubic { p0, p1, p2, p3 } => {
                let ab = p0 + (p1 - p0) * t;
                let bc = p1 + (p2 - p1) * t;
                let cd = p2 + (p3 - p2) * t;
                let abc = ab + (bc - ab) * t;
                let bcd = bc + (cd - bc) * t;
                let abcd = abc + (bcd - abc) * t;

                (
                    Curve::cubic(p0, ab, abc, abcd),
                    Curve::cubic(abcd, bcd, cd, p3),
                )
            }

            Curve::Conic { p0, p1, p2, weight } => {
                // Homogeneous de Casteljau on control points weighted (1, weight, 1). c1/c2 are
                // the two new hull midpoints (of p0-p1 and p1-p2); mid is the point the curve
                // passes through at t, i.e. the shared endpoint of the two split halves.
                let c1_w = (1.0 - t) + t * weight;
                let c2_w = (1.0 - t) * weight + t;
                let mid_w = (1.0 - t) * c1_w + t * c2_w;

                let c1 = p0 + (p1 - p0) * (t * weight / c1_w);
                let c2 = p1 + (p2 - p1) * (t / c2_w);
                let mid = c1 + (c2 - c1) * (t * c2_w / mid_w);

                // Re-derive unit-endpoint weights for each half from the homogeneous weight
                // triple via the standard geometric-mean normalization for conic arcs.
                let w_left = c1_w / (mid_w).sqrt();
                let w_right = c2_w / (mid_w).sqrt();

                (
                    Curve::conic(p0, c1, mid, w_left),
                    Curve::conic(mid, c2, p2, w_right),
                )
            }
        }
    }

    /// The sub-curve of this curve between parameters `t0` and `t1` (`0 <= t0 <= t1 <= 1`)
    pub fn segment(&self, t0: f64, t1: f64) -> Curve {
        if t0 <= 0.0 {
            if t1 >= 1.0 {
                return *self;
            }
            return self.split(t1).0;
        }

        let (_, tail) = self.split(t0);
        if t1 >= 1.0 {
            return tail;
        }

        // t1 needs to be re-expressed in tail's own parametrization
        let t1_in_tail = (t1 - t0) / (1.0 - t0);
        tail.split(t1_in_tail).0
    }

    /// This curve, traversed in the opposite direction
    pub fn reverse(&self) -> Curve {
        match *self {
            Curve::Line { p0, p1 } => Curve::line(p1, p0),
            Curve::Cubic { p0, p1, p2, p3 } => Curve::cubic(p3, p2, p1, p0),
            Curve::Conic { p0, p1, p2, weight } => Curve::conic(p2, p1, p0, weight),
        }
    }
}

/// Returns the first of the given vectors that isn't (near) zero length, as a unit vector. Used
/// to fall back to the next control point when two adjacent control points coincide, per the
/// handling for degenerate tangents.
fn first_nonzero(candidates: &[Coord2]) -> Coord2 {
    for candidate in candidates {
        if candidate.magnitude() >= SMALL_DISTANCE {
            return candidate.to_unit_vector();
        }
    }

    // All the control points are coincident: there is no well-defined tangent. Returning a
    // zero vector lets callers (the turn classifier, the offset code) treat this the same as
    // any other degenerate direction rather than panicking.
    Coord2::origin()
}

/// Evaluates a conic (rational quadratic) at `t` directly, without going through `split`:
/// the standard rational-quadratic formula with weights `(1, weight, 1)` on `p0, p1, p2`.
fn conic_point_at(p0: Coord2, p1: Coord2, p2: Coord2, weight: f64, t: f64) -> Coord2 {
    let u = 1.0 - t;
    let b0 = u * u;
    let b1 = 2.0 * u * t * weight;
    let b2 = t * t;

    (p0 * b0 + p1 * b1 + p2 * b2) / (b0 + b1 + b2)
}
