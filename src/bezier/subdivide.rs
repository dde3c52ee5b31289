/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//!
//! # Adaptive subdivision
//!
//! Splits curved segments into pieces "simple" enough that `Curve::offset`'s endpoint-
//! displacement approximation looks right. The first split (at the full depth budget)
//! uses the curve's curvature extrema so the pieces it produces are already close to
//! monotone; subsequent splits (on pieces that still aren't simple) bisect at the
//! midpoint.
//!

use crate::bezier::curve::Curve;
use crate::geo::Coord2;
use itertools::Itertools;
use roots::{find_roots_quadratic, Roots};
use smallvec::SmallVec;
use std::f64::consts::PI;

/// Recursion depth budget for subdivision: halved (roughly) on every non-simple split.
pub const MAX_SUBDIVISION: u32 = 8;

/// The angle above which two endpoint normals are considered too divergent for the
/// offset approximation to hold.
const SIMPLE_NORMAL_ANGLE: f64 = PI / 3.0;

/// Splits `curve` into simple pieces, in order, appending them to `out`. Lines are
/// always simple and pass through unchanged.
pub fn subdivide(curve: &Curve) -> SmallVec<[Curve; 8]> {
    let mut out = SmallVec::new();
    subdivide_into(curve, MAX_SUBDIVISION, &mut out);
    out
}

fn subdivide_into(curve: &Curve, level: u32, out: &mut SmallVec<[Curve; 8]>) {
    if matches!(curve, Curve::Line { .. }) {
        out.push(*curve);
        return;
    }

    if level == 0 || (level < MAX_SUBDIVISION && is_simple(curve)) {
        out.push(*curve);
        return;
    }

    if level == MAX_SUBDIVISION {
        match *curve {
            Curve::Cubic { p0, p1, p2, p3 } => {
                let mut params: SmallVec<[f64; 5]> = SmallVec::new();
                params.push(0.0);
                for t in curvature_extrema_params(p0, p1, p2, p3) {
                    params.push(t);
                }
                params.push(1.0);
                params.sort_by(|a, b| a.partial_cmp(b).unwrap());

                for (t0, t1) in params.into_iter().tuple_windows() {
                    if t1 - t0 <= f64::EPSILON {
                        continue;
                    }
                    let piece = curve.segment(t0, t1);
                    subdivide_into(&piece, level - 1, out);
                }
            }

            Curve::Conic { .. } => {
                let (left, right) = curve.split(0.5);
                subdivide_into(&left, level - 1, out);
                subdivide_into(&right, level - 1, out);
            }

            Curve::Line { .. } => unreachable!("lines return above"),
        }
        return;
    }

    let (left, right) = curve.split(0.5);
    subdivide_into(&left, level - 1, out);
    subdivide_into(&right, level - 1, out);
}

/// Whether `curve` is simple enough for `Curve::offset`'s approximation to be visually
/// acceptable. Lines are always simple.
pub fn is_simple(curve: &Curve) -> bool {
    match *curve {
        Curve::Line { .. } => true,
        Curve::Cubic { p0, p1, p2, p3 } => cubic_is_simple(p0, p1, p2, p3),
        Curve::Conic { p0, p1, p2, .. } => conic_is_simple(p0, p1, p2),
    }
}

/// A cubic is simple iff its control polygon doesn't inflect (the turns at `p1` and
/// `p2` have the same sign) and its endpoint normals don't diverge by more than 60
/// degrees.
fn cubic_is_simple(p0: Coord2, p1: Coord2, p2: Coord2, p3: Coord2) -> bool {
    let turn_at_p1 = (p1 - p0).cross(&(p2 - p1));
    let turn_at_p2 = (p2 - p1).cross(&(p3 - p2));

    if turn_at_p1 * turn_at_p2 < 0.0 {
        return false;
    }

    let n0 = (p1 - p0).to_unit_vector().rotate_90();
    let n3 = (p3 - p2).to_unit_vector().rotate_90();

    normal_angle_is_small(n0, n3)
}

/// A conic is simple iff the normals either side of the middle control point don't
/// diverge by more than 60 degrees.
fn conic_is_simple(p0: Coord2, p1: Coord2, p2: Coord2) -> bool {
    let n0 = (p1 - p0).to_unit_vector().rotate_90();
    let n1 = (p2 - p1).to_unit_vector().rotate_90();

    normal_angle_is_small(n0, n1)
}

fn normal_angle_is_small(n0: Coord2, n1: Coord2) -> bool {
    let cos_angle = n0.dot(&n1).clamp(-1.0, 1.0);
    cos_angle.acos() < SIMPLE_NORMAL_ANGLE
}

/// Split parameters in `(0, 1)` at which a cubic's curvature is extremal: the roots of
/// `cross(B'(t), B''(t)) = 0` (where the curve inflects) plus the vertex of that
/// quadratic (where the curvature magnitude peaks between inflections).
///
/// `cross(B', B'')` is invariant under translation and rotation (both derivatives
/// depend only on differences of control points, and a proper rotation preserves the
/// 2D cross product), so this computes the same roots the source's "align to the
/// x-axis first" construction would, directly from the control point differences.
fn curvature_extrema_params(p0: Coord2, p1: Coord2, p2: Coord2, p3: Coord2) -> SmallVec<[f64; 3]> {
    let a = p1 - p0;
    let b = p2 - p1;
    let c = p3 - p2;

    let q0 = a;
    let q1 = (b - a) * 2.0;
    let q2 = a - b * 2.0 + c;
    let r0 = b - a;

    // cross(B'(t), B''(t)) / 18 = x*t^2 + y*t + z (the t^3 term vanishes identically
    // since cross(q2, q2) = 0).
    let x = q2.cross(&r0) + q1.cross(&q2);
    let y = q1.cross(&r0) + q0.cross(&q2);
    let z = q0.cross(&r0);

    let mut params = SmallVec::new();

    if x.abs() >= crate::geo::SMALL_DISTANCE {
        match find_roots_quadratic(x, y, z) {
            Roots::No(_) => {}
            Roots::One([t]) => push_if_interior(&mut params, t),
            Roots::Two([t0, t1]) => {
                push_if_interior(&mut params, t0);
                push_if_interior(&mut params, t1);
            }
            _ => {}
        }

        let vertex = -y / (2.0 * x);
        if vertex > 0.0 && vertex < 1.0 {
            push_if_interior(&mut params, vertex);
        }
    } else if y.abs() >= crate::geo::SMALL_DISTANCE {
        // Degenerates to a single linear root: x*t + y = 0 (after dropping the
        // vanishing quadratic term) -- still a valid single inflection parameter.
        push_if_interior(&mut params, -z / y);
    }

    params
}

fn push_if_interior(params: &mut SmallVec<[f64; 3]>, t: f64) {
    if t > 0.0 && t < 1.0 && !params.iter().any(|&p| (p - t).abs() < 1e-9) {
        params.push(t);
    }
}
