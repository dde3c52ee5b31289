/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! End-to-end coverage of the stroker's public entry point, against the crate's own
//! testable properties rather than any single module's internals.

use flo_stroke::geo::Coord2;
use flo_stroke::path::*;

fn close_count(path: &BezPath) -> usize {
    path.events()
        .iter()
        .filter(|e| matches!(e, PathEvent::Close { .. }))
        .count()
}

/// Property 1: a closed contour with no self-intersection produces exactly two closed
/// sub-paths, and (for width well below the contour's minimum radius of curvature)
/// those two sub-paths don't overlap.
#[test]
fn closed_square_produces_two_disjoint_subpaths() {
    let mut input = BezPath::new();
    input.move_to(Coord2(0.0, 0.0));
    input.line_to(Coord2(20.0, 0.0));
    input.line_to(Coord2(20.0, 20.0));
    input.line_to(Coord2(0.0, 20.0));
    input.close();

    let options = StrokeOptions::new(2.0);
    let mut output = BezPath::new();
    stroke(&input, &options, &mut output);

    assert_eq!(close_count(&output), 2);

    let curves = output.to_curves();
    let xs: Vec<f64> = curves.iter().map(|c| c.start_point().x()).collect();
    // The outer outline extends past the square; the inner stays within it. A width of
    // 2 on a 20x20 square keeps the two rings comfortably apart.
    assert!(xs.iter().any(|&x| x < -0.5));
    assert!(xs.iter().any(|&x| x > 0.5 && x < 19.5));
}

/// Property 2: an open contour produces exactly one closed sub-path.
#[test]
fn open_polyline_produces_one_subpath() {
    let mut input = BezPath::new();
    input.move_to(Coord2(0.0, 0.0));
    input.line_to(Coord2(10.0, 0.0));
    input.line_to(Coord2(10.0, 10.0));
    input.line_to(Coord2(0.0, 10.0));

    let options = StrokeOptions::new(2.0);
    let mut output = BezPath::new();
    stroke(&input, &options, &mut output);

    assert_eq!(close_count(&output), 1);
}

/// Property 5: `miter` joins produce a sharp corner iff `1/|sin((pi - turn_angle)/2)|
/// <= miter_limit`. This V (tangents at +-45 degrees either side of vertical) turns by
/// 90 degrees, for a miter ratio of exactly `1/sin(45 deg) = sqrt(2)`.
#[test]
fn miter_limit_boundary_is_exact() {
    let vshape = |limit: f64| -> BezPath {
        let mut input = BezPath::new();
        input.move_to(Coord2(-10.0, 10.0));
        input.line_to(Coord2(0.0, 0.0));
        input.line_to(Coord2(10.0, 10.0));

        let options = StrokeOptions::new(2.0)
            .with_line_join(LineJoin::Miter)
            .with_miter_limit(limit);
        let mut output = BezPath::new();
        stroke(&input, &options, &mut output);
        output
    };

    let ratio = std::f64::consts::SQRT_2;
    let under = vshape(ratio + 0.01);
    let over = vshape(ratio - 0.01);

    // A surviving miter inserts an extra vertex the bevel fallback doesn't, so the
    // two cases must differ in curve count.
    assert_ne!(under.to_curves().len(), over.to_curves().len());
}

/// Property 8: pattern [5, 3] on a line of length 20 walks three on-intervals (0-5,
/// 8-13, 16-20, the last truncated to length 4 by the end of the line), each becoming
/// its own disjoint dash rectangle.
#[test]
fn dash_pattern_5_3_over_length_20_produces_three_full_dashes() {
    let mut input = BezPath::new();
    input.move_to(Coord2(0.0, 0.0));
    input.line_to(Coord2(20.0, 0.0));

    let options = StrokeOptions::new(1.0).with_dash_pattern(vec![5.0, 3.0]);
    let mut output = BezPath::new();
    stroke(&input, &options, &mut output);

    // Each dash becomes its own closed, capped sub-path.
    assert_eq!(close_count(&output), 3);
}
