/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//!
//! # Driver
//!
//! The crate's single public entry point. Decides whether to walk `contour` directly
//! or through the dash generator, dispatches each event it sees to the [`StrokeState`]
//! orchestrator (subdividing curved segments into simple pieces along the way), and
//! finalizes whatever contour is still open once the source is exhausted.
//!

use crate::bezier::curve::Curve;
use crate::bezier::subdivide::subdivide;
use crate::path::builder::PathBuilder;
use crate::path::dash::DashedContour;
use crate::path::event::{ContourSource, PathEvent};
use crate::path::stroke::{StrokeOptions, StrokeState};

/// Converts `contour` into a filled stroke outline, written to `builder`.
///
/// If `options` carries a non-empty dash pattern, `contour` is walked through the dash
/// generator first and only the on-intervals reach the stroker; otherwise it's walked
/// directly.
pub fn stroke(contour: &dyn ContourSource, options: &StrokeOptions, builder: &mut dyn PathBuilder) {
    let mut state = StrokeState::new(options, builder);

    let mut dispatch = |event: PathEvent| match event {
        PathEvent::Move(p) => state.on_move(p),
        PathEvent::Line { p0, p1 } => subdivide_and_add(&mut state, Curve::line(p0, p1)),
        PathEvent::Cubic { p0, p1, p2, p3 } => {
            subdivide_and_add(&mut state, Curve::cubic(p0, p1, p2, p3))
        }
        PathEvent::Conic { p0, p1, p2, weight } => {
            subdivide_and_add(&mut state, Curve::conic(p0, p1, p2, weight))
        }
        PathEvent::Close {
            last_point,
            start_point,
        } => state.on_close(last_point, start_point),
    };

    if options.dash_pattern().is_empty() {
        contour.foreach(&mut dispatch);
    } else {
        let dashed = DashedContour::new(contour, options.dash_pattern(), options.dash_offset());
        dashed.foreach(&mut dispatch);
    }

    if state.has_current_point() {
        state.cap_and_connect_contours();
    }
}

/// Runs `curve` through the adaptive subdivider and offers each simple piece to the
/// orchestrator in order.
fn subdivide_and_add<B: PathBuilder + ?Sized>(state: &mut StrokeState<B>, curve: Curve) {
    for piece in subdivide(&curve) {
        state.add_curve(piece);
    }
}
