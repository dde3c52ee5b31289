/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//!
//! # Turn classification
//!
//! Classifies the corner between two adjacent segments from the signed angle between
//! the outgoing tangent of the first and the incoming tangent of the second, which
//! determines whether the orchestrator synthesizes a join on one side and trims by
//! intersection on the other, or simply connects both sides with a straight segment.
//!

use crate::geo::Coord2;
use std::f64::consts::PI;

/// Below this angle (radians) a corner is treated as a smooth continuation rather than
/// an actual turn. `5` degrees, per the stroker's fixed numerical tolerances.
pub const STRAIGHT_ANGLE_THRESHOLD: f64 = 5.0 * PI / 180.0;

/// The classification of a corner between two segments.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Turn {
    /// The turn angle's magnitude is below [`STRAIGHT_ANGLE_THRESHOLD`]: treat the
    /// corner as a smooth continuation.
    Straight,

    /// A positive turn angle: the right-hand offset is on the outside of the turn
    /// (needs a join) and the left-hand offset is on the inside (needs trimming).
    Right,

    /// A negative turn angle: mirror of [`Turn::Right`].
    Left,
}

/// The signed angle (radians, in `(-pi, pi]`) from `previous_end_tangent` to
/// `next_start_tangent`.
pub fn turn_angle(previous_end_tangent: Coord2, next_start_tangent: Coord2) -> f64 {
    let a1 = previous_end_tangent.y().atan2(previous_end_tangent.x());
    let a2 = next_start_tangent.y().atan2(next_start_tangent.x());

    let mut angle = a2 - a1;
    while angle <= -PI {
        angle += 2.0 * PI;
    }
    while angle > PI {
        angle -= 2.0 * PI;
    }
    angle
}

/// Classifies the corner between two adjacent segments from their tangents.
pub fn classify_turn(previous_end_tangent: Coord2, next_start_tangent: Coord2) -> Turn {
    let angle = turn_angle(previous_end_tangent, next_start_tangent);

    if angle.abs() < STRAIGHT_ANGLE_THRESHOLD {
        Turn::Straight
    } else if angle > 0.0 {
        Turn::Right
    } else {
        Turn::Left
    }
}
