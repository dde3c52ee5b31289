/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//!
//! # Output sink and the concrete path type
//!
//! [`PathBuilder`] is the stroker's output sink: wherever the orchestrator has a
//! finished contour, it hands it to a `PathBuilder` a segment at a time (or, for a
//! whole sub-path at once, via `add_path`). [`BezPath`] is the stroker's own concrete
//! implementation of both `PathBuilder` and [`ContourSource`]: it's what callers
//! build their input path out of, what the orchestrator uses for its left/right
//! accumulating sub-paths, and a reasonable default for the caller's output too.
//!

use crate::bezier::curve::Curve;
use crate::geo::{Coord2, SMALL_DISTANCE};
use crate::path::event::{ContourSource, PathEvent};
use std::f64::consts::PI;

/// The output sink a stroke is written to.
///
/// A `PathBuilder` tracks its own current point (the end of the last segment added,
/// or the point of the last `move_to`): every `*_to` method is relative to it.
pub trait PathBuilder {
    /// Starts a new contour at `p`.
    fn move_to(&mut self, p: Coord2);

    /// A straight line from the current point to `p`.
    fn line_to(&mut self, p: Coord2);

    /// A cubic bezier from the current point to `p3`, via `p1, p2`.
    fn cubic_to(&mut self, p1: Coord2, p2: Coord2, p3: Coord2);

    /// A rational quadratic (conic) bezier from the current point to `p2`, via `p1`
    /// with the given `weight`.
    fn conic_to(&mut self, p1: Coord2, p2: Coord2, weight: f64);

    /// An elliptical arc from the current point to `to`, per the SVG `A` path command
    /// parameterization: radii `rx, ry`, the ellipse's `x_axis_rotation` (radians),
    /// and the `large_arc`/`sweep` flags disambiguating which of the (up to) four
    /// candidate arcs is meant.
    fn svg_arc_to(
        &mut self,
        rx: f64,
        ry: f64,
        x_axis_rotation: f64,
        large_arc: bool,
        sweep: bool,
        to: Coord2,
    );

    /// Closes the current contour with a line back to its start point, if the
    /// current point isn't already there.
    fn close(&mut self);

    /// Appends a whole prebuilt sub-path, preserving its own moves and closes.
    fn add_path(&mut self, path: &BezPath);
}

/// A path: a sequence of [`PathEvent`]s. The stroker's own `PathBuilder` and
/// `ContourSource` implementation, used both for caller input and as the
/// orchestrator's accumulating left/right sub-paths.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BezPath {
    events: Vec<PathEvent>,
}

impl BezPath {
    /// An empty path.
    pub fn new() -> BezPath {
        BezPath { events: Vec::new() }
    }

    /// The events that make up this path, in order.
    pub fn events(&self) -> &[PathEvent] {
        &self.events
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// The point this path is currently at: the end of the last segment added, or
    /// the point of the last `move_to` if no segment has been added since.
    pub fn current_point(&self) -> Coord2 {
        match self.events.last() {
            Some(PathEvent::Move(p)) => *p,
            Some(PathEvent::Line { p1, .. }) => *p1,
            Some(PathEvent::Cubic { p3, .. }) => *p3,
            Some(PathEvent::Conic { p2, .. }) => *p2,
            Some(PathEvent::Close { start_point, .. }) => *start_point,
            None => Coord2::origin(),
        }
    }

    fn contour_start(&self) -> Coord2 {
        for event in self.events.iter().rev() {
            match event {
                PathEvent::Move(p) => return *p,
                PathEvent::Close { .. } => break,
                _ => {}
            }
        }
        Coord2::origin()
    }

    /// Appends `curve`, whose start point must match the current point (checked in
    /// debug builds only: this is an internal invariant of the stroker, not something
    /// a caller can violate through the public `PathBuilder` methods).
    pub fn push_curve(&mut self, curve: Curve) {
        debug_assert!(
            self.is_empty() || curve.start_point().is_near_to(&self.current_point(), 1e-6),
            "curve {:?} does not start at the current point {:?}",
            curve,
            self.current_point()
        );

        match curve {
            Curve::Line { p1, .. } => self.line_to(p1),
            Curve::Cubic { p1, p2, p3, .. } => self.cubic_to(p1, p2, p3),
            Curve::Conic {
                p1, p2, weight, ..
            } => self.conic_to(p1, p2, weight),
        }
    }

    /// This path's segments as `Curve` values, in order, ignoring `Move`/`Close`
    /// events. Assumes the path holds a single contour (which is how the stroker
    /// uses `BezPath` internally for its left/right sub-paths).
    pub fn to_curves(&self) -> Vec<Curve> {
        let mut curves = Vec::with_capacity(self.events.len());

        for event in &self.events {
            match *event {
                PathEvent::Move(_) | PathEvent::Close { .. } => {}
                PathEvent::Line { p0, p1 } => curves.push(Curve::line(p0, p1)),
                PathEvent::Cubic { p0, p1, p2, p3 } => curves.push(Curve::cubic(p0, p1, p2, p3)),
                PathEvent::Conic { p0, p1, p2, weight } => {
                    curves.push(Curve::conic(p0, p1, p2, weight))
                }
            }
        }

        curves
    }

}

impl PathBuilder for BezPath {
    fn move_to(&mut self, p: Coord2) {
        self.events.push(PathEvent::Move(p));
    }

    fn line_to(&mut self, p: Coord2) {
        let p0 = self.current_point();
        self.events.push(PathEvent::Line { p0, p1: p });
    }

    fn cubic_to(&mut self, p1: Coord2, p2: Coord2, p3: Coord2) {
        let p0 = self.current_point();
        self.events.push(PathEvent::Cubic { p0, p1, p2, p3 });
    }

    fn conic_to(&mut self, p1: Coord2, p2: Coord2, weight: f64) {
        let p0 = self.current_point();
        self.events.push(PathEvent::Conic { p0, p1, p2, weight });
    }

    fn svg_arc_to(
        &mut self,
        rx: f64,
        ry: f64,
        x_axis_rotation: f64,
        large_arc: bool,
        sweep: bool,
        to: Coord2,
    ) {
        svg_arc_to_conics(self, rx, ry, x_axis_rotation, large_arc, sweep, to);
    }

    fn close(&mut self) {
        let last_point = self.current_point();
        let start_point = self.contour_start();
        self.events.push(PathEvent::Close {
            last_point,
            start_point,
        });
    }

    fn add_path(&mut self, path: &BezPath) {
        self.events.extend_from_slice(&path.events);
    }
}

impl ContourSource for BezPath {
    fn foreach(&self, visit: &mut dyn FnMut(PathEvent)) {
        for event in &self.events {
            visit(*event);
        }
    }
}

/// Converts an SVG-style endpoint arc (current point, radii, rotation, flags, end
/// point) to center parameterization, then emits it as one or more `conic_to` calls,
/// each spanning at most 90 degrees (so each piece's weight stays comfortably away
/// from the degenerate `weight -> 0` a single near-180-degree conic would need).
///
/// Conics are affine-invariant, so each piece is built directly from the symmetric
/// unit-circle construction (half-angle `a`: endpoints at `+-a`, apex control point at
/// `1/cos(a)` on the bisector, weight `cos(a)`) and then mapped through the ellipse's
/// scale/rotate/translate, without needing to re-derive the weight afterwards.
fn svg_arc_to_conics(
    builder: &mut BezPath,
    rx: f64,
    ry: f64,
    x_axis_rotation: f64,
    large_arc: bool,
    sweep: bool,
    to: Coord2,
) {
    let from = builder.current_point();

    if rx.abs() < SMALL_DISTANCE || ry.abs() < SMALL_DISTANCE || from.is_near_to(&to, SMALL_DISTANCE) {
        builder.line_to(to);
        return;
    }

    let (mut rx, mut ry) = (rx.abs(), ry.abs());
    let (cos_phi, sin_phi) = (x_axis_rotation.cos(), x_axis_rotation.sin());

    // Endpoint -> center parameterization (SVG 1.1 appendix F.6.5).
    let dx2 = (from.x() - to.x()) / 2.0;
    let dy2 = (from.y() - to.y()) / 2.0;
    let x1p = cos_phi * dx2 + sin_phi * dy2;
    let y1p = -sin_phi * dx2 + cos_phi * dy2;

    let lambda = (x1p * x1p) / (rx * rx) + (y1p * y1p) / (ry * ry);
    if lambda > 1.0 {
        let scale = lambda.sqrt();
        rx *= scale;
        ry *= scale;
    }

    let sign = if large_arc == sweep { -1.0 } else { 1.0 };
    let num = (rx * rx * ry * ry - rx * rx * y1p * y1p - ry * ry * x1p * x1p).max(0.0);
    let den = rx * rx * y1p * y1p + ry * ry * x1p * x1p;
    let coef = if den > SMALL_DISTANCE * SMALL_DISTANCE {
        sign * (num / den).sqrt()
    } else {
        0.0
    };

    let cxp = coef * rx * y1p / ry;
    let cyp = -coef * ry * x1p / rx;

    let cx = cos_phi * cxp - sin_phi * cyp + (from.x() + to.x()) / 2.0;
    let cy = sin_phi * cxp + cos_phi * cyp + (from.y() + to.y()) / 2.0;

    let ux = (x1p - cxp) / rx;
    let uy = (y1p - cyp) / ry;
    let vx = (-x1p - cxp) / rx;
    let vy = (-y1p - cyp) / ry;

    let vector_angle = |ux: f64, uy: f64, vx: f64, vy: f64| -> f64 {
        let dot = ux * vx + uy * vy;
        let len = ((ux * ux + uy * uy) * (vx * vx + vy * vy)).sqrt();
        let mut angle = (dot / len).clamp(-1.0, 1.0).acos();
        if ux * vy - uy * vx < 0.0 {
            angle = -angle;
        }
        angle
    };

    let theta1 = vector_angle(1.0, 0.0, ux, uy);
    let mut delta_theta = vector_angle(ux, uy, vx, vy);

    if !sweep && delta_theta > 0.0 {
        delta_theta -= 2.0 * PI;
    }
    if sweep && delta_theta < 0.0 {
        delta_theta += 2.0 * PI;
    }

    let segment_count = ((delta_theta.abs() / (PI / 2.0)).ceil() as usize).max(1);
    let segment_angle = delta_theta / segment_count as f64;

    let map_unit = |ux: f64, uy: f64| -> Coord2 {
        let (sx, sy) = (ux * rx, uy * ry);
        Coord2(
            sx * cos_phi - sy * sin_phi + cx,
            sx * sin_phi + sy * cos_phi + cy,
        )
    };

    let mut theta = theta1;
    for _ in 0..segment_count {
        let half = segment_angle / 2.0;
        let mid = theta + half;
        let end = theta + segment_angle;

        let weight = half.cos();
        let apex_scale = 1.0 / half.cos();

        let control = map_unit(apex_scale * mid.cos(), apex_scale * mid.sin());
        let end_point = map_unit(end.cos(), end.sin());

        builder.conic_to(control, end_point, weight);

        theta = end;
    }
}

/// Appends a circular arc of `radius` centered at `center`, starting at `start_angle`
/// (radians) and sweeping through `delta_angle` (signed; positive is counter-clockwise
/// in the `Coord2` frame), as one or more `conic_to` calls of at most 90 degrees each.
/// Used by `path::join_cap` for round joins and caps, where the arc's center and
/// radius are already known (unlike `svg_arc_to`, which has to recover them from the
/// endpoint parameterization first).
pub(crate) fn append_arc<B: PathBuilder + ?Sized>(
    builder: &mut B,
    center: Coord2,
    radius: f64,
    start_angle: f64,
    delta_angle: f64,
) {
    let segment_count = ((delta_angle.abs() / (PI / 2.0)).ceil() as usize).max(1);
    let segment_angle = delta_angle / segment_count as f64;

    let mut theta = start_angle;
    for _ in 0..segment_count {
        let half = segment_angle / 2.0;
        let mid = theta + half;
        let end = theta + segment_angle;

        let weight = half.cos();
        let apex = radius / half.cos();

        let control = Coord2(center.x() + apex * mid.cos(), center.y() + apex * mid.sin());
        let end_point = Coord2(
            center.x() + radius * end.cos(),
            center.y() + radius * end.sin(),
        );

        builder.conic_to(control, end_point, weight);
        theta = end;
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn line_to_records_current_point() {
        let mut path = BezPath::new();
        path.move_to(Coord2(0.0, 0.0));
        path.line_to(Coord2(10.0, 0.0));

        assert_eq!(path.current_point(), Coord2(10.0, 0.0));
        assert_eq!(path.to_curves().len(), 1);
    }

    #[test]
    fn quarter_circle_svg_arc_round_trips_through_evaluate() {
        let mut path = BezPath::new();
        path.move_to(Coord2(10.0, 0.0));
        path.svg_arc_to(10.0, 10.0, 0.0, false, true, Coord2(0.0, 10.0));

        let curves = path.to_curves();
        assert_eq!(curves.len(), 1);

        let mid = curves[0].evaluate(0.5);
        assert!(mid.magnitude() > 0.0);
        // A point on a circle of radius 10 centered at the origin.
        assert!((mid.magnitude() - 10.0).abs() < 1e-6);
    }

    #[test]
    fn add_path_concatenates_events() {
        let mut sub = BezPath::new();
        sub.move_to(Coord2(0.0, 0.0));
        sub.line_to(Coord2(1.0, 0.0));

        let mut out = BezPath::new();
        out.add_path(&sub);

        assert_eq!(out.events().len(), sub.events().len());
    }
}
