/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//!
//! # Curve-curve intersection
//!
//! Finds crossing points between two curves, used by the orchestrator to trim the
//! inside of a turn instead of synthesizing a join there. Only `max_hits = 1` is
//! actually used by the stroker, so this favors robustness (bounding-box pruned
//! recursive subdivision, bottoming out in a line-line intersection) over finding
//! every intersection of two arbitrary curves.
//!

use crate::bezier::curve::Curve;
use crate::geo::{Coord2, SMALL_DISTANCE};
use smallvec::SmallVec;

/// How many times the two curves are halved before giving up and treating the
/// remaining (tiny) pieces as straight lines.
const MAX_INTERSECTION_DEPTH: u32 = 24;

/// A single intersection between two curves: the parameter on each curve, and the
/// point in common (the average of the two curves' evaluation at their own
/// parameter, which coincide within tolerance).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Intersection {
    pub t_self: f64,
    pub t_other: f64,
    pub point: Coord2,
}

impl Curve {
    /// Up to `max_hits` parameter pairs `(t, s)` at which `self` and `other` cross.
    pub fn intersect(&self, other: &Curve, max_hits: usize) -> SmallVec<[Intersection; 4]> {
        curve_intersections(self, other, max_hits)
    }
}

/// Finds up to `max_hits` intersections between `a` and `b`.
pub fn curve_intersections(a: &Curve, b: &Curve, max_hits: usize) -> SmallVec<[Intersection; 4]> {
    let mut hits = SmallVec::new();

    if max_hits == 0 {
        return hits;
    }

    intersect_rec(
        a,
        0.0,
        1.0,
        b,
        0.0,
        1.0,
        MAX_INTERSECTION_DEPTH,
        max_hits,
        &mut hits,
    );
    hits
}

#[allow(clippy::too_many_arguments)]
fn intersect_rec(
    a: &Curve,
    ta0: f64,
    ta1: f64,
    b: &Curve,
    tb0: f64,
    tb1: f64,
    depth: u32,
    max_hits: usize,
    hits: &mut SmallVec<[Intersection; 4]>,
) {
    if hits.len() >= max_hits {
        return;
    }

    let seg_a = a.segment(ta0, ta1);
    let seg_b = b.segment(tb0, tb1);

    let (a_min, a_max) = control_bounds(&seg_a);
    let (b_min, b_max) = control_bounds(&seg_b);

    if !bounds_overlap(a_min, a_max, b_min, b_max) {
        return;
    }

    let is_flat_enough =
        depth == 0 || (ta1 - ta0 < SMALL_DISTANCE && tb1 - tb0 < SMALL_DISTANCE);

    if is_flat_enough {
        if let Some((s, t)) = line_line_intersect(
            seg_a.start_point(),
            seg_a.end_point(),
            seg_b.start_point(),
            seg_b.end_point(),
        ) {
            if (0.0..=1.0).contains(&s) && (0.0..=1.0).contains(&t) {
                let t_self = ta0 + s * (ta1 - ta0);
                let t_other = tb0 + t * (tb1 - tb0);
                let point = a.evaluate(t_self);

                if !hits
                    .iter()
                    .any(|h: &Intersection| (h.t_self - t_self).abs() < 1e-6)
                {
                    hits.push(Intersection {
                        t_self,
                        t_other,
                        point,
                    });
                }
            }
        }
        return;
    }

    let ta_mid = (ta0 + ta1) * 0.5;
    let tb_mid = (tb0 + tb1) * 0.5;

    intersect_rec(a, ta0, ta_mid, b, tb0, tb_mid, depth - 1, max_hits, hits);
    intersect_rec(a, ta0, ta_mid, b, tb_mid, tb1, depth - 1, max_hits, hits);
    intersect_rec(a, ta_mid, ta1, b, tb0, tb_mid, depth - 1, max_hits, hits);
    intersect_rec(a, ta_mid, ta1, b, tb_mid, tb1, depth - 1, max_hits, hits);
}

fn control_bounds(curve: &Curve) -> (Coord2, Coord2) {
    let points: SmallVec<[Coord2; 4]> = match *curve {
        Curve::Line { p0, p1 } => SmallVec::from_slice(&[p0, p1]),
        Curve::Cubic { p0, p1, p2, p3 } => SmallVec::from_slice(&[p0, p1, p2, p3]),
        Curve::Conic { p0, p1, p2, .. } => SmallVec::from_slice(&[p0, p1, p2]),
    };

    let mut min = points[0];
    let mut max = points[0];
    for p in points.iter().skip(1) {
        min = Coord2(min.x().min(p.x()), min.y().min(p.y()));
        max = Coord2(max.x().max(p.x()), max.y().max(p.y()));
    }

    (min, max)
}

fn bounds_overlap(a_min: Coord2, a_max: Coord2, b_min: Coord2, b_max: Coord2) -> bool {
    let margin = SMALL_DISTANCE;
    a_min.x() <= b_max.x() + margin
        && a_max.x() + margin >= b_min.x()
        && a_min.y() <= b_max.y() + margin
        && a_max.y() + margin >= b_min.y()
}

/// Solves for the parameters `(s, t)` at which the line through `a0, a1` meets the
/// line through `b0, b1`, i.e. `a0 + s*(a1-a0) == b0 + t*(b1-b0)`. Returns `None` if
/// the determinant is below [`SMALL_DISTANCE`] (parallel or near-parallel lines).
pub fn line_line_intersect(
    a0: Coord2,
    a1: Coord2,
    b0: Coord2,
    b1: Coord2,
) -> Option<(f64, f64)> {
    let da = a1 - a0;
    let db = b1 - b0;

    let denom = da.cross(&db);
    if denom.abs() < SMALL_DISTANCE {
        return None;
    }

    let diff = b0 - a0;
    let s = diff.cross(&db) / denom;
    let t = diff.cross(&da) / denom;

    Some((s, t))
}
