/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//!
//! # Stroke parameters and the orchestrator
//!
//! [`StrokeOptions`] is the configuration a stroke runs with. [`StrokeState`] is the
//! orchestrator: the state machine that walks a contour's segments one at a time,
//! holds the previous segment's offsets pending until it knows how the next segment
//! joins onto them, and deposits each finished contour into the output builder.
//!

use crate::bezier::curve::Curve;
use crate::bezier::turn::{classify_turn, turn_angle, Turn};
use crate::geo::{Coord2, SMALL_DISTANCE};
use crate::path::builder::{BezPath, PathBuilder};
use crate::path::join_cap::{self, LineCap, LineJoin};

/// Default miter limit: the ratio (miter length / half stroke width) above which a
/// `miter` join falls back to a bevel.
const DEFAULT_MITER_LIMIT: f64 = 4.0;

/// The configuration a stroke runs with.
#[derive(Clone, Debug, PartialEq)]
pub struct StrokeOptions {
    line_width: f64,
    line_join: LineJoin,
    miter_limit: f64,
    line_cap: LineCap,
    dash_pattern: Vec<f64>,
    dash_offset: f64,
}

impl StrokeOptions {
    /// Stroke options for a given `line_width`, with `miter` joins, `butt` caps, a
    /// miter limit of 4 and no dashing.
    pub fn new(line_width: f64) -> StrokeOptions {
        StrokeOptions {
            line_width,
            line_join: LineJoin::Miter,
            miter_limit: DEFAULT_MITER_LIMIT,
            line_cap: LineCap::Butt,
            dash_pattern: Vec::new(),
            dash_offset: 0.0,
        }
    }

    pub fn with_line_join(self, line_join: LineJoin) -> StrokeOptions {
        StrokeOptions { line_join, ..self }
    }

    pub fn with_miter_limit(self, miter_limit: f64) -> StrokeOptions {
        StrokeOptions {
            miter_limit,
            ..self
        }
    }

    pub fn with_line_cap(self, line_cap: LineCap) -> StrokeOptions {
        StrokeOptions { line_cap, ..self }
    }

    pub fn with_dash_pattern(self, dash_pattern: impl Into<Vec<f64>>) -> StrokeOptions {
        StrokeOptions {
            dash_pattern: dash_pattern.into(),
            ..self
        }
    }

    pub fn with_dash_offset(self, dash_offset: f64) -> StrokeOptions {
        StrokeOptions {
            dash_offset,
            ..self
        }
    }

    #[inline]
    pub fn line_width(&self) -> f64 {
        self.line_width
    }

    #[inline]
    pub fn line_join(&self) -> LineJoin {
        self.line_join
    }

    #[inline]
    pub fn miter_limit(&self) -> f64 {
        self.miter_limit
    }

    #[inline]
    pub fn line_cap(&self) -> LineCap {
        self.line_cap
    }

    #[inline]
    pub fn dash_pattern(&self) -> &[f64] {
        &self.dash_pattern
    }

    #[inline]
    pub fn dash_offset(&self) -> f64 {
        self.dash_offset
    }
}

/// The orchestrator: walks one contour's worth of segments, maintaining the pending
/// previous segment's offsets, and deposits finished contours into `builder`.
///
/// Lives for the duration of a single `stroke` call, across every contour of the
/// input (reset at each `Move`, per [`StrokeState::on_move`]).
pub(crate) struct StrokeState<'b, B: PathBuilder + ?Sized> {
    options: &'b StrokeOptions,
    builder: &'b mut B,

    has_current_point: bool,
    has_current_curve: bool,
    is_first_curve: bool,

    move_point: Coord2,

    c: Option<Curve>,
    l: Option<Curve>,
    r: Option<Curve>,

    c0: Option<Curve>,
    l0: Option<Curve>,
    r0: Option<Curve>,

    left: BezPath,
    right: BezPath,
}

impl<'b, B: PathBuilder + ?Sized> StrokeState<'b, B> {
    pub fn new(options: &'b StrokeOptions, builder: &'b mut B) -> StrokeState<'b, B> {
        StrokeState {
            options,
            builder,
            has_current_point: false,
            has_current_curve: false,
            is_first_curve: false,
            move_point: Coord2::origin(),
            c: None,
            l: None,
            r: None,
            c0: None,
            l0: None,
            r0: None,
            left: BezPath::new(),
            right: BezPath::new(),
        }
    }

    pub fn has_current_point(&self) -> bool {
        self.has_current_point
    }

    fn half_width(&self) -> f64 {
        self.options.line_width() / 2.0
    }

    /// A move establishing the start of a new contour. If a contour is already open,
    /// it's finalized first (it was never explicitly closed, so it's open).
    pub fn on_move(&mut self, p: Coord2) {
        if self.has_current_point {
            self.cap_and_connect_contours();
        }

        self.move_point = p;

        // A synthetic unit-x segment at `p`, purely to give the "dot cap" case (an
        // isolated move with no segment following it) a well-defined orientation.
        let hw = self.half_width();
        let normal = Coord2(1.0, 0.0).rotate_90();
        let r_point = p + normal * hw;
        let l_point = p + normal * -hw;

        self.c0 = Some(Curve::line(p, p));
        self.r0 = Some(Curve::line(r_point, r_point));
        self.l0 = Some(Curve::line(l_point, l_point));

        self.left = BezPath::new();
        self.right = BezPath::new();

        self.has_current_point = true;
        self.has_current_curve = false;
        self.is_first_curve = false;
    }

    /// A simple segment (already past the subdivider, for curved input) arriving in
    /// source order.
    pub fn add_curve(&mut self, curve: Curve) {
        let hw = self.half_width();
        let l = curve.offset(-hw);
        let r = curve.offset(hw);

        if !self.has_current_curve {
            self.c = Some(curve);
            self.c0 = Some(curve);
            self.l = Some(l);
            self.r = Some(r);
            self.l0 = Some(l);
            self.r0 = Some(r);

            self.right = BezPath::new();
            self.right.move_to(r.start_point());
            self.left = BezPath::new();
            self.left.move_to(l.start_point());

            self.has_current_curve = true;
            self.is_first_curve = true;
        } else {
            self.add_segments(curve, l, r);
        }
    }

    /// The heart of the algorithm: resolves the join (or trim-by-intersection)
    /// between the pending segment and the newly arrived one, then makes the new
    /// segment pending in turn.
    fn add_segments(&mut self, c_next: Curve, mut l_next: Curve, mut r_next: Curve) {
        let prev_c = self.c.expect("add_segments with no pending segment");
        let prev_l = self.l.expect("add_segments with no pending left offset");
        let prev_r = self.r.expect("add_segments with no pending right offset");

        let phi = turn_angle(prev_c.end_tangent(), c_next.start_tangent());
        let hw = self.half_width();

        match classify_turn(prev_c.end_tangent(), c_next.start_tangent()) {
            Turn::Straight => {
                self.append_right(prev_r);
                self.right.line_to(r_next.start_point());

                self.append_left(prev_l);
                self.left.line_to(l_next.start_point());
            }

            Turn::Right => {
                let hits = prev_r.intersect(&r_next, 1);
                if let Some(hit) = hits.first() {
                    let trimmed_prev_r = prev_r.segment(0.0, hit.t_self);
                    r_next = r_next.segment(hit.t_other, 1.0);
                    self.append_right(trimmed_prev_r);
                } else {
                    self.append_right(prev_r);
                    self.right.line_to(r_next.start_point());
                }

                self.append_left(prev_l);
                join_cap::join(
                    &mut self.left,
                    prev_l.end_point(),
                    prev_l.end_tangent(),
                    l_next.start_point(),
                    l_next.start_tangent(),
                    c_next.start_point(),
                    phi,
                    hw,
                    self.options.line_join(),
                    self.options.miter_limit(),
                );
            }

            Turn::Left => {
                let hits = prev_l.intersect(&l_next, 1);
                if let Some(hit) = hits.first() {
                    let trimmed_prev_l = prev_l.segment(0.0, hit.t_self);
                    l_next = l_next.segment(hit.t_other, 1.0);
                    self.append_left(trimmed_prev_l);
                } else {
                    self.append_left(prev_l);
                    self.left.line_to(l_next.start_point());
                }

                self.append_right(prev_r);
                join_cap::join(
                    &mut self.right,
                    prev_r.end_point(),
                    prev_r.end_tangent(),
                    r_next.start_point(),
                    r_next.start_tangent(),
                    c_next.start_point(),
                    phi,
                    hw,
                    self.options.line_join(),
                    self.options.miter_limit(),
                );
            }
        }

        self.c = Some(c_next);
        self.l = Some(l_next);
        self.r = Some(r_next);
        self.is_first_curve = false;
    }

    /// Flushes `curve` onto the right sub-path: deferred (a move-only placeholder) if
    /// it's still the contour's first segment, appended for real otherwise.
    fn append_right(&mut self, curve: Curve) {
        if self.is_first_curve {
            self.right.move_to(curve.end_point());
        } else {
            self.right.push_curve(curve);
        }
    }

    /// The mirror of [`StrokeState::append_right`] for the left sub-path.
    fn append_left(&mut self, curve: Curve) {
        if self.is_first_curve {
            self.left.move_to(curve.end_point());
        } else {
            self.left.push_curve(curve);
        }
    }

    /// A `Close` event: joins the last point back to the contour's start (via a
    /// synthetic line if they don't already coincide), then finalizes as a closed
    /// contour.
    pub fn on_close(&mut self, last_point: Coord2, start_point: Coord2) {
        if last_point.distance_to(&start_point) > SMALL_DISTANCE {
            self.add_curve(Curve::line(last_point, start_point));
        }

        self.close_contours();
        self.has_current_point = false;
    }

    /// Finalizes a closed contour: the first saved segment `c0` is treated as the
    /// "next" arrival, synthesizing the wrap-around join and trimming the first and
    /// last offsets consistently; the result is two closed sub-paths.
    fn close_contours(&mut self) {
        if !self.has_current_curve {
            // A move immediately followed by `close`, with no segment in between:
            // there's nothing to stroke.
            return;
        }

        let c0 = self.c0.expect("close_contours with no saved first segment");
        let l0 = self.l0.expect("close_contours with no saved first left offset");
        let r0 = self.r0.expect("close_contours with no saved first right offset");

        self.add_segments(c0, l0, r0);

        let r = self.r.expect("add_segments always repopulates r");
        let l = self.l.expect("add_segments always repopulates l");

        self.right.push_curve(r);
        self.left.push_curve(l);

        self.right.close();
        self.left.close();

        self.builder.add_path(&self.right);
        self.builder.add_path(&self.left);
    }

    /// Finalizes an open contour: the two sub-paths are joined end-to-end (the left
    /// one reversed) with a cap at each end, producing a single closed outline.
    pub fn cap_and_connect_contours(&mut self) {
        if !self.has_current_curve {
            self.emit_dot_cap();
            return;
        }

        let r = self.r.expect("cap_and_connect_contours with no pending right offset");
        let l = self.l.expect("cap_and_connect_contours with no pending left offset");
        let r0 = self.r0.expect("cap_and_connect_contours with no saved first right offset");
        let l0 = self.l0.expect("cap_and_connect_contours with no saved first left offset");
        let c = self.c.expect("cap_and_connect_contours with no pending segment");
        let c0 = self.c0.expect("cap_and_connect_contours with no saved first segment");

        self.right.push_curve(r);
        self.left.push_curve(l);

        let hw = self.half_width();
        let cap_style = self.options.line_cap();

        let mut combined = BezPath::new();
        combined.add_path(&self.right);

        join_cap::cap(
            &mut combined,
            r.end_point(),
            l.end_point(),
            c.end_point(),
            c.end_tangent(),
            hw,
            cap_style,
        );

        // Retrace `left` from its end back to its start directly onto `combined`'s
        // current contour, rather than via `reversed()` + `add_path`: the latter would
        // splice in its own `Move`, breaking the single continuous contour this builds
        // (and corrupting `close()`'s idea of where that contour started).
        for curve in self.left.to_curves().into_iter().rev() {
            combined.push_curve(curve.reverse());
        }

        // `c0`/`l0`/`r0` are the contour's true first segment. If it's still pending
        // (a single-segment contour), it's already in `right`/`left` via the pushes
        // above and needs no repeating. Otherwise `append_right`/`append_left` only
        // ever deferred it to a move-only placeholder, so its geometry has to be
        // stitched back in here: the reversed half first, completing the retrace back
        // to the contour's true start, then (after the start cap) the un-reversed half,
        // completing the forward side.
        if !self.is_first_curve {
            combined.push_curve(l0.reverse());
        }

        join_cap::cap(
            &mut combined,
            l0.start_point(),
            r0.start_point(),
            c0.start_point(),
            -c0.start_tangent(),
            hw,
            cap_style,
        );

        if !self.is_first_curve {
            combined.push_curve(r0);
        }

        combined.close();
        self.builder.add_path(&combined);
    }

    /// Finalizes a contour whose only content was a move: a "dot", sealed with two
    /// back-to-back caps around the synthetic `r0`/`l0` points (so `round` produces a
    /// small circle, `butt` produces nothing visible, and `square` a small square).
    fn emit_dot_cap(&mut self) {
        let r0 = self.r0.expect("emit_dot_cap with no seeded right offset");
        let l0 = self.l0.expect("emit_dot_cap with no seeded left offset");

        let hw = self.half_width();
        let cap_style = self.options.line_cap();

        // Mirrors the real end-cap/start-cap pair in `cap_and_connect_contours`: the
        // synthetic unit-x segment seeded in `on_move` stands in for `c`/`c0`, so its
        // tangent (and the tangent's negation) disambiguate which side each semicircle
        // bulges to, the same way a real segment's end/start tangent would.
        let synthetic_tangent = Coord2(1.0, 0.0);

        let mut combined = BezPath::new();
        combined.move_to(r0.start_point());
        join_cap::cap(
            &mut combined,
            r0.start_point(),
            l0.start_point(),
            self.move_point,
            synthetic_tangent,
            hw,
            cap_style,
        );
        join_cap::cap(
            &mut combined,
            l0.start_point(),
            r0.start_point(),
            self.move_point,
            -synthetic_tangent,
            hw,
            cap_style,
        );
        combined.close();

        self.builder.add_path(&combined);
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::path::event::PathEvent;

    fn run_stroke(events: &[PathEvent], options: &StrokeOptions) -> BezPath {
        let mut output = BezPath::new();
        {
            let mut state = StrokeState::new(options, &mut output);
            for event in events {
                match *event {
                    PathEvent::Move(p) => state.on_move(p),
                    PathEvent::Line { p0, p1 } => state.add_curve(Curve::line(p0, p1)),
                    PathEvent::Cubic { p0, p1, p2, p3 } => {
                        state.add_curve(Curve::cubic(p0, p1, p2, p3))
                    }
                    PathEvent::Conic { p0, p1, p2, weight } => {
                        state.add_curve(Curve::conic(p0, p1, p2, weight))
                    }
                    PathEvent::Close {
                        last_point,
                        start_point,
                    } => state.on_close(last_point, start_point),
                }
            }
            if state.has_current_point() {
                state.cap_and_connect_contours();
            }
        }
        output
    }

    /// S1: a single straight segment, open, butt caps -> a rectangle.
    #[test]
    fn straight_segment_with_butt_caps_is_a_rectangle() {
        let options = StrokeOptions::new(2.0);
        let output = run_stroke(
            &[
                PathEvent::Move(Coord2(0.0, 0.0)),
                PathEvent::Line {
                    p0: Coord2(0.0, 0.0),
                    p1: Coord2(10.0, 0.0),
                },
            ],
            &options,
        );

        let curves = output.to_curves();
        assert_eq!(curves.len(), 4);

        let mut ys: Vec<f64> = curves.iter().map(|c| c.start_point().y()).collect();
        ys.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert!((ys[0] + 1.0).abs() < 1e-6 || (ys[0] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn closed_triangle_produces_two_subpaths() {
        let options = StrokeOptions::new(2.0);
        let output = run_stroke(
            &[
                PathEvent::Move(Coord2(0.0, 0.0)),
                PathEvent::Line {
                    p0: Coord2(0.0, 0.0),
                    p1: Coord2(10.0, 0.0),
                },
                PathEvent::Line {
                    p0: Coord2(10.0, 0.0),
                    p1: Coord2(10.0, 10.0),
                },
                PathEvent::Close {
                    last_point: Coord2(10.0, 10.0),
                    start_point: Coord2(0.0, 0.0),
                },
            ],
            &options,
        );

        let close_count = output
            .events()
            .iter()
            .filter(|e| matches!(e, PathEvent::Close { .. }))
            .count();
        assert_eq!(close_count, 2);
    }

    /// The first segment of a multi-segment open contour is deferred (never pushed
    /// for real) until the contour is finalized, so its offset geometry has to be
    /// stitched back in by `cap_and_connect_contours` rather than simply dropped.
    #[test]
    fn open_polyline_retains_first_segment_offset() {
        let options = StrokeOptions::new(2.0);
        let output = run_stroke(
            &[
                PathEvent::Move(Coord2(0.0, 0.0)),
                PathEvent::Line {
                    p0: Coord2(0.0, 0.0),
                    p1: Coord2(10.0, 0.0),
                },
                PathEvent::Line {
                    p0: Coord2(10.0, 0.0),
                    p1: Coord2(10.0, 10.0),
                },
            ],
            &options,
        );

        let curves = output.to_curves();
        assert!(!curves.is_empty());

        let min_x = curves
            .iter()
            .map(|c| c.start_point().x().min(c.end_point().x()))
            .fold(f64::INFINITY, f64::min);
        assert!(
            min_x < 1.0,
            "expected the first segment's offset (near x=0) to appear, got min_x={min_x}"
        );

        // The contour should come back round to its true start: the last curve's end
        // point and the first curve's start point should coincide.
        assert!(curves
            .last()
            .unwrap()
            .end_point()
            .is_near_to(&curves[0].start_point(), 1e-6));
    }

    #[test]
    fn single_point_move_with_round_cap_emits_a_dot() {
        let options = StrokeOptions::new(2.0).with_line_cap(LineCap::Round);
        let output = run_stroke(&[PathEvent::Move(Coord2(5.0, 5.0))], &options);

        assert!(!output.is_empty());
        let close_count = output
            .events()
            .iter()
            .filter(|e| matches!(e, PathEvent::Close { .. }))
            .count();
        assert_eq!(close_count, 1);
    }
}
