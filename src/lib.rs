/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//!
//! # flo_stroke
//!
//! Converts a 2D path outline (a sequence of straight and curved segments, arranged
//! into one or more contours) into a filled stroke outline: the shape you'd get by
//! drawing the path with a pen of a given width, with configurable joins, caps and
//! dashing.
//!
//! The entry point is [`path::stroke()`], which walks a [`path::ContourSource`] and
//! writes the result to a [`path::PathBuilder`]:
//!
//! ```
//! use flo_stroke::geo::Coord2;
//! use flo_stroke::path::*;
//!
//! let mut input = BezPath::new();
//! input.move_to(Coord2(0.0, 0.0));
//! input.line_to(Coord2(10.0, 0.0));
//!
//! let options = StrokeOptions::new(2.0);
//! let mut output = BezPath::new();
//! stroke(&input, &options, &mut output);
//! ```
//!

pub mod bezier;
pub mod geo;
pub mod path;
