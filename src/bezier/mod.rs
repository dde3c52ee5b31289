/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//!
//! # Curve primitives
//!
//! The pieces the stroker uses to reason about individual path segments: the
//! `Curve` value type itself, offsetting a curve by a fixed distance, classifying
//! the turn between two adjacent curves, adaptive subdivision into "simple" pieces,
//! and pairwise curve-curve intersection.
//!

pub mod curve;
pub mod intersection;
pub mod offset;
pub mod subdivide;
pub mod turn;

pub use curve::Curve;
pub use intersection::{curve_intersections, Intersection};
pub use subdivide::subdivide;
pub use turn::{classify_turn, turn_angle, Turn};
