/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//!
//! # Join and cap synthesis
//!
//! Builds the small pieces of geometry the orchestrator stitches in at
//! contour-internal corners (joins, between two offset segments on the outside of a
//! turn) and contour endpoints (caps, sealing an open contour). Every function here
//! appends to the current point of `output` (which the caller has already moved to
//! `a` / `s`) and leaves the current point at `b` / `e`.
//!

use crate::bezier::intersection::line_line_intersect;
use crate::geo::{Coord2, SMALL_DISTANCE};
use crate::path::builder::{append_arc, BezPath, PathBuilder};

/// How contour-internal corners are joined.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineJoin {
    /// Extend both offset edges until they meet; fall back to `Bevel` past `miter_limit`.
    Miter,
    /// Like `Miter`, but clip the point past `miter_limit` instead of beveling it away.
    MiterClip,
    /// A circular arc of radius `line_width / 2`, centered on the corner.
    Round,
    /// A straight line directly between the two offset edges.
    Bevel,
}

/// How a contour's open ends are sealed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineCap {
    /// A straight line directly across.
    Butt,
    /// A semicircular arc of radius `line_width / 2`.
    Round,
    /// Extend outward by `line_width / 2` before crossing, producing a square end.
    Square,
}

/// Synthesizes a join on `output` (whose current point must already be `a`) between
/// the end of the previous offset segment (`a`, with outgoing tangent `a_tangent`) and
/// the start of the next (`b`, with incoming tangent `b_tangent`), around source
/// corner `corner`, for a turn of signed angle `turn_angle` (as produced by
/// `bezier::turn::turn_angle`).
pub fn join(
    output: &mut BezPath,
    a: Coord2,
    a_tangent: Coord2,
    b: Coord2,
    b_tangent: Coord2,
    corner: Coord2,
    turn_angle: f64,
    half_width: f64,
    style: LineJoin,
    miter_limit: f64,
) {
    match style {
        LineJoin::Bevel => output.line_to(b),

        LineJoin::Round => {
            let start_angle = (a.y() - corner.y()).atan2(a.x() - corner.x());
            let end_angle = (b.y() - corner.y()).atan2(b.x() - corner.x());
            let delta = normalize_angle(end_angle - start_angle);
            append_arc(output, corner, half_width, start_angle, delta);
        }

        LineJoin::Miter => match miter_point(a, a_tangent, b, b_tangent) {
            Some(p) if miter_ratio(turn_angle) <= miter_limit => {
                output.line_to(p);
                output.line_to(b);
            }
            _ => output.line_to(b),
        },

        LineJoin::MiterClip => match miter_point(a, a_tangent, b, b_tangent) {
            Some(p) if miter_ratio(turn_angle) <= miter_limit => {
                output.line_to(p);
                output.line_to(b);
            }
            Some(p) => {
                if let Some((a1, b1)) = miter_clip_points(a, a_tangent, b, b_tangent, corner, p) {
                    output.line_to(a1);
                    output.line_to(b1);
                    output.line_to(b);
                } else {
                    output.line_to(b);
                }
            }
            None => output.line_to(b),
        },
    }
}

/// Synthesizes a cap on `output` (whose current point must already be `s`) between the
/// two offset endpoints `s` (one side) and `e` (the other) at a contour endpoint whose
/// source point is `center`. `outward` is the direction the contour would continue in
/// if it weren't ending here (the end tangent for an end cap, the negated start tangent
/// for a start cap): `s` and `e` are antipodal about `center`, so nothing else in this
/// function disambiguates which of the two congruent semicircles/squares bulges away
/// from the contour rather than back into it.
pub fn cap(
    output: &mut BezPath,
    s: Coord2,
    e: Coord2,
    center: Coord2,
    outward: Coord2,
    half_width: f64,
    style: LineCap,
) {
    match style {
        LineCap::Butt => output.line_to(e),

        LineCap::Round => {
            let start_angle = (s.y() - center.y()).atan2(s.x() - center.x());
            // s and e are antipodal about center, so a sweep of +-pi reaches e either
            // way; the sign picks which of the two semicircles is meant, by checking
            // which one's midpoint lies towards `outward` rather than back towards the
            // contour.
            let ccw_midpoint_direction = (s - center).rotate_90();
            let delta = if ccw_midpoint_direction.dot(&outward) >= 0.0 {
                std::f64::consts::PI
            } else {
                -std::f64::consts::PI
            };
            append_arc(output, center, half_width, start_angle, delta);
        }

        LineCap::Square => {
            let n = outward.to_unit_vector() * half_width;
            output.line_to(s + n);
            output.line_to(e + n);
            output.line_to(e);
        }
    }
}

fn normalize_angle(mut angle: f64) -> f64 {
    use std::f64::consts::PI;
    while angle <= -PI {
        angle += 2.0 * PI;
    }
    while angle > PI {
        angle -= 2.0 * PI;
    }
    angle
}

/// The intersection of the ray through `a` in direction `a_tangent` with the ray
/// through `b` in direction `b_tangent`, or `None` if they're (near) parallel.
fn miter_point(a: Coord2, a_tangent: Coord2, b: Coord2, b_tangent: Coord2) -> Option<Coord2> {
    let (s, _) = line_line_intersect(a, a + a_tangent, b, b + b_tangent)?;
    Some(a + a_tangent * s)
}

/// The ratio of miter length to half-width for a join of `turn_angle`: `1/|sin((pi -
/// turn_angle)/2)|`. Rejected (falls back to bevel, or is clipped) once this exceeds
/// the configured `miter_limit`.
fn miter_ratio(turn_angle: f64) -> f64 {
    let half = (std::f64::consts::PI - turn_angle.abs()) / 2.0;
    1.0 / half.sin().abs()
}

/// Clips a miter point `p` (the unbounded apex) at the perpendicular bisector of the
/// segment from source corner `corner` to `p`: finds where each offset edge's ray
/// meets that bisector.
fn miter_clip_points(
    a: Coord2,
    a_tangent: Coord2,
    b: Coord2,
    b_tangent: Coord2,
    corner: Coord2,
    p: Coord2,
) -> Option<(Coord2, Coord2)> {
    let midpoint = corner + (p - corner) * 0.5;
    let clip_direction = (p - corner).rotate_90();

    let (s_a, _) = line_line_intersect(a, a + a_tangent, midpoint, midpoint + clip_direction)?;
    let (s_b, _) = line_line_intersect(b, b + b_tangent, midpoint, midpoint + clip_direction)?;

    Some((a + a_tangent * s_a, b + b_tangent * s_b))
}

#[cfg(test)]
mod test {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn bevel_join_just_connects_the_two_points() {
        let mut output = BezPath::new();
        output.move_to(Coord2(0.0, 1.0));
        join(
            &mut output,
            Coord2(0.0, 1.0),
            Coord2(1.0, 0.0),
            Coord2(1.0, 0.0),
            Coord2(0.0, 1.0),
            Coord2(0.0, 0.0),
            FRAC_PI_2,
            1.0,
            LineJoin::Bevel,
            4.0,
        );

        assert_eq!(output.current_point(), Coord2(1.0, 0.0));
    }

    #[test]
    fn miter_join_under_limit_adds_sharp_point() {
        let mut output = BezPath::new();
        output.move_to(Coord2(0.0, 1.0));

        // A 90 degree right turn: a approaches along +x, b leaves along +y.
        join(
            &mut output,
            Coord2(0.0, 1.0),
            Coord2(1.0, 0.0),
            Coord2(1.0, 0.0),
            Coord2(0.0, 1.0),
            Coord2(0.0, 0.0),
            FRAC_PI_2,
            1.0,
            LineJoin::Miter,
            4.0,
        );

        // Should have inserted a sharp corner at (1, 1) before reaching b.
        let curves = output.to_curves();
        assert_eq!(curves.len(), 2);
        assert!(curves[0].end_point().is_near_to(&Coord2(1.0, 1.0), 1e-6));
    }

    #[test]
    fn miter_over_limit_falls_back_to_bevel() {
        let mut output = BezPath::new();
        output.move_to(Coord2(0.0, 1.0));

        // A very sharp turn (close to a 180 degree reversal) should exceed any
        // reasonable miter limit.
        let sharp_angle = std::f64::consts::PI - 0.01;
        join(
            &mut output,
            Coord2(0.0, 1.0),
            Coord2(1.0, 0.0),
            Coord2(1.0, 2.0),
            Coord2(-1.0, 0.0),
            Coord2(0.5, 1.0),
            sharp_angle,
            1.0,
            LineJoin::Miter,
            4.0,
        );

        let curves = output.to_curves();
        assert_eq!(curves.len(), 1);
    }

    #[test]
    fn round_cap_ends_at_e() {
        let mut output = BezPath::new();
        output.move_to(Coord2(0.0, 1.0));
        cap(
            &mut output,
            Coord2(0.0, 1.0),
            Coord2(0.0, -1.0),
            Coord2(0.0, 0.0),
            Coord2(1.0, 0.0),
            1.0,
            LineCap::Round,
        );

        assert!(output.current_point().is_near_to(&Coord2(0.0, -1.0), 1e-6));
    }

    /// Like S2's end cap: `s`/`e` are antipodal about `center`, so the only thing
    /// telling the arc which of the two congruent semicircles to take is `outward`;
    /// the apex must land on that side, not back towards the contour.
    #[test]
    fn round_cap_bulges_towards_outward_direction() {
        let mut output = BezPath::new();
        output.move_to(Coord2(0.0, 1.0));
        cap(
            &mut output,
            Coord2(0.0, 1.0),
            Coord2(0.0, -1.0),
            Coord2(0.0, 0.0),
            Coord2(1.0, 0.0),
            1.0,
            LineCap::Round,
        );

        let curves = output.to_curves();
        let apex = curves[curves.len() / 2].start_point();
        assert!(apex.x() > 0.5, "expected apex at +x (outward), got {apex:?}");

        // Reversing `outward` must flip which side the arc bulges to.
        let mut mirrored = BezPath::new();
        mirrored.move_to(Coord2(0.0, 1.0));
        cap(
            &mut mirrored,
            Coord2(0.0, 1.0),
            Coord2(0.0, -1.0),
            Coord2(0.0, 0.0),
            Coord2(-1.0, 0.0),
            1.0,
            LineCap::Round,
        );
        let mirrored_curves = mirrored.to_curves();
        let mirrored_apex = mirrored_curves[mirrored_curves.len() / 2].start_point();
        assert!(
            mirrored_apex.x() < -0.5,
            "expected apex at -x (outward), got {mirrored_apex:?}"
        );
    }

    #[test]
    fn square_cap_extends_outward() {
        let mut output = BezPath::new();
        output.move_to(Coord2(0.0, 1.0));
        cap(
            &mut output,
            Coord2(0.0, 1.0),
            Coord2(0.0, -1.0),
            Coord2(0.0, 0.0),
            Coord2(1.0, 0.0),
            1.0,
            LineCap::Square,
        );

        let curves = output.to_curves();
        // s -> s+n, s+n -> e+n, e+n -> e
        assert_eq!(curves.len(), 3);
        assert!(
            curves[0].end_point().x() > 0.5,
            "expected the extension towards +x (outward), got {:?}",
            curves[0].end_point()
        );
    }
}
