/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//!
//! # Input segment stream
//!
//! The stroker doesn't walk its input path itself: it's handed a [`ContourSource`],
//! which calls back with a [`PathEvent`] for every move, segment and close in source
//! order. This is the seam between the stroker and whatever path representation and
//! traversal code the caller is using (and, for dashing, the seam between the dash
//! generator and the stroker).
//!

use crate::geo::Coord2;

/// A single event in an input path's traversal.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathEvent {
    /// Starts a new contour at `point`.
    Move(Coord2),

    /// A straight line from `p0` to `p1`.
    Line { p0: Coord2, p1: Coord2 },

    /// A cubic bezier from `p0` to `p3`, via control points `p1, p2`.
    Cubic {
        p0: Coord2,
        p1: Coord2,
        p2: Coord2,
        p3: Coord2,
    },

    /// A rational quadratic (conic) bezier from `p0` to `p2`, via control point `p1`
    /// with the given `weight`.
    Conic {
        p0: Coord2,
        p1: Coord2,
        p2: Coord2,
        weight: f64,
    },

    /// Closes the current contour: `last_point` is wherever the traversal currently
    /// is, `start_point` is the point the contour's `Move` began at.
    Close {
        last_point: Coord2,
        start_point: Coord2,
    },
}

/// A source of path events: anything that can walk its contents and report a
/// [`PathEvent`] for every move, segment and close, in order.
///
/// This is the "foreach" collaborator: the stroker's driver calls [`ContourSource::foreach`]
/// once per `stroke` call and dispatches each event it's handed to the orchestrator.
pub trait ContourSource {
    /// Calls `visit` once for every event in this source's traversal, in order.
    fn foreach(&self, visit: &mut dyn FnMut(PathEvent));
}
