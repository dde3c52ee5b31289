/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//!
//! # Curve offsetting
//!
//! Displacing a curve by a fixed signed distance along its outward normal. This is an
//! approximation for curved segments (only exact for lines): it's only called on curves
//! that have already passed the "simple" test in `subdivide`, where displacing the
//! endpoints and adjusting the interior control points to preserve the endpoint tangents
//! produces a visually acceptable result.
//!

use crate::bezier::curve::Curve;
use crate::geo::Coord2;

impl Curve {
    /// The curve approximating the locus of points at signed perpendicular distance `d`
    /// from this curve, displaced along the outward (right-hand, per `Coord2::normal_to`)
    /// normal. Positive `d` displaces to the right of the direction of travel.
    pub fn offset(&self, d: f64) -> Curve {
        match *self {
            Curve::Line { p0, p1 } => {
                let n = p0.normal_to(&p1);
                Curve::line(p0 + n * d, p1 + n * d)
            }

            Curve::Cubic { p0, p1, p2, p3 } => {
                let n0 = self.start_tangent().rotate_90();
                let n3 = self.end_tangent().rotate_90();

                let new_p0 = p0 + n0 * d;
                let new_p3 = p3 + n3 * d;

                // Displace the interior control points by the same vector as the nearest
                // endpoint: this preserves the endpoint tangents (the direction p0->p1 and
                // p2->p3 is unchanged) while moving the curve as a whole outward.
                let new_p1 = p1 + n0 * d;
                let new_p2 = p2 + n3 * d;

                Curve::cubic(new_p0, new_p1, new_p2, new_p3)
            }

            Curve::Conic { p0, p1, p2, weight } => {
                let n0 = self.start_tangent().rotate_90();
                let n2 = self.end_tangent().rotate_90();

                let new_p0 = p0 + n0 * d;
                let new_p2 = p2 + n2 * d;

                // The middle control point is displaced along the bisector of the two
                // endpoint normals, scaled so the offset curve's tangents at the
                // endpoints still point towards the displaced p1 (matching the source
                // curve's endpoint tangent directions).
                let bisector = (n0 + n2).to_unit_vector();
                let new_p1 = if bisector.magnitude() < crate::geo::SMALL_DISTANCE {
                    // Endpoint normals point in opposite directions (a near 180 degree
                    // turn): fall back to displacing along the start normal only.
                    p1 + n0 * d
                } else {
                    p1 + bisector * d
                };

                Curve::conic(new_p0, new_p1, new_p2, weight)
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn line_offset_is_parallel() {
        let line = Curve::line(Coord2(0.0, 0.0), Coord2(10.0, 0.0));
        let offset = line.offset(1.0);

        assert_eq!(offset.start_point().y(), line.start_point().y() + 1.0);
        assert_eq!(offset.end_point().y(), line.end_point().y() + 1.0);
    }

    #[test]
    fn cubic_offset_endpoints_match_normal_displacement() {
        let cubic = Curve::cubic(
            Coord2(0.0, 0.0),
            Coord2(0.0, 10.0),
            Coord2(10.0, 10.0),
            Coord2(10.0, 0.0),
        );
        let offset = cubic.offset(1.0);

        let n0 = cubic.start_tangent().rotate_90();
        let n3 = cubic.end_tangent().rotate_90();

        assert!(offset
            .start_point()
            .is_near_to(&(cubic.start_point() + n0), 1e-9));
        assert!(offset
            .end_point()
            .is_near_to(&(cubic.end_point() + n3), 1e-9));
    }
}
