/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//!
//! # Dash generation
//!
//! The stroker consumes pre-dashed segments through the same [`ContourSource`]
//! channel it consumes ordinary contours through: [`DashedContour`] wraps any
//! `ContourSource` and re-emits it restricted to the on-intervals of a dash pattern,
//! so `path::driver::stroke` can treat the dashed and undashed cases identically
//! once it has picked which source to walk.
//!
//! Distance along each source segment is measured by sampling it at a fixed number of
//! points and building a piecewise-linear arc-length table, rather than by an exact
//! closed-form arc length (none of the three curve variants has one in general).
//!

use crate::bezier::curve::Curve;
use crate::geo::{Coord2, SMALL_DISTANCE};
use crate::path::event::{ContourSource, PathEvent};

/// Number of samples used to build each segment's arc-length table. Higher means a
/// more accurate placement of dash boundaries on sharply curved segments, at
/// proportionally more cost.
const ARC_LENGTH_SAMPLES: usize = 64;

/// Wraps a [`ContourSource`], re-emitting only the on-intervals of `pattern`
/// (cycling `pattern[0]` on, `pattern[1]` off, `pattern[2]` on, ... and back to the
/// start), phased by `offset` (a distance, not a pattern index).
pub struct DashedContour<'a, S: ContourSource + ?Sized> {
    source: &'a S,
    pattern: Vec<f64>,
    offset: f64,
}

impl<'a, S: ContourSource + ?Sized> DashedContour<'a, S> {
    pub fn new(source: &'a S, pattern: &[f64], offset: f64) -> DashedContour<'a, S> {
        DashedContour {
            source,
            pattern: pattern.to_vec(),
            offset,
        }
    }
}

impl<'a, S: ContourSource + ?Sized> ContourSource for DashedContour<'a, S> {
    fn foreach(&self, visit: &mut dyn FnMut(PathEvent)) {
        if self.pattern.is_empty() || self.pattern.iter().all(|&p| p <= 0.0) {
            self.source.foreach(visit);
            return;
        }

        let mut state = DashState::new(&self.pattern, self.offset);
        let mut dash_open = false;

        self.source.foreach(&mut |event| match event {
            PathEvent::Move(_) => {
                state = DashState::new(&self.pattern, self.offset);
                dash_open = false;
            }

            PathEvent::Close { .. } => {
                dash_open = false;
            }

            PathEvent::Line { p0, p1 } => {
                walk_segment(Curve::line(p0, p1), &mut state, &mut dash_open, visit);
            }

            PathEvent::Cubic { p0, p1, p2, p3 } => {
                walk_segment(
                    Curve::cubic(p0, p1, p2, p3),
                    &mut state,
                    &mut dash_open,
                    visit,
                );
            }

            PathEvent::Conic { p0, p1, p2, weight } => {
                walk_segment(
                    Curve::conic(p0, p1, p2, weight),
                    &mut state,
                    &mut dash_open,
                    visit,
                );
            }
        });
    }
}

/// The cursor through a dash pattern: which pattern entry is current, how much
/// distance is left in it, and whether that entry is an on- or off-interval.
struct DashState {
    pattern: Vec<f64>,
    index: usize,
    remaining: f64,
    on: bool,
}

impl DashState {
    fn new(pattern: &[f64], offset: f64) -> DashState {
        let mut state = DashState {
            pattern: pattern.to_vec(),
            index: 0,
            remaining: 0.0,
            on: true,
        };

        let cycle: f64 = pattern.iter().sum();
        if cycle <= 0.0 {
            state.remaining = f64::INFINITY;
            return state;
        }

        let mut off = offset % cycle;
        if off < 0.0 {
            off += cycle;
        }

        let mut index = 0;
        let mut on = true;
        loop {
            let len = pattern[index];
            if off < len {
                state.index = index;
                state.remaining = len - off;
                state.on = on;
                return state;
            }
            off -= len;
            index = (index + 1) % pattern.len();
            on = !on;
        }
    }

    /// Moves to the next pattern entry, flipping on/off.
    fn advance_entry(&mut self) {
        self.index = (self.index + 1) % self.pattern.len();
        self.on = !self.on;
        self.remaining = self.pattern[self.index];
    }
}

/// Walks `curve`'s length against `state`, emitting a `Move` plus segment events for
/// each on-interval onto `visit`. `dash_open` tracks whether the dash that's currently
/// on was already started by a previous segment of the same contour (so consecutive
/// segments falling in the same on-interval form a single unbroken dash).
fn walk_segment(
    curve: Curve,
    state: &mut DashState,
    dash_open: &mut bool,
    visit: &mut dyn FnMut(PathEvent),
) {
    let table = ArcLengthTable::build(&curve);
    let total = table.total_length();

    if total < SMALL_DISTANCE {
        return;
    }

    let mut consumed = 0.0;
    while consumed < total - 1e-9 {
        let step = (total - consumed).min(state.remaining);
        let t0 = table.t_at_length(consumed);
        let t1 = table.t_at_length(consumed + step);

        if state.on && t1 > t0 {
            let piece = curve.segment(t0, t1);
            if !*dash_open {
                visit(PathEvent::Move(piece.start_point()));
                *dash_open = true;
            }
            emit_curve(piece, visit);
        }

        consumed += step;
        state.remaining -= step;

        if state.remaining <= SMALL_DISTANCE {
            let was_on = state.on;
            state.advance_entry();
            if was_on {
                *dash_open = false;
            }
        }
    }
}

fn emit_curve(curve: Curve, visit: &mut dyn FnMut(PathEvent)) {
    match curve {
        Curve::Line { p0, p1 } => visit(PathEvent::Line { p0, p1 }),
        Curve::Cubic { p0, p1, p2, p3 } => visit(PathEvent::Cubic { p0, p1, p2, p3 }),
        Curve::Conic { p0, p1, p2, weight } => visit(PathEvent::Conic { p0, p1, p2, weight }),
    }
}

/// A piecewise-linear approximation of cumulative arc length along a curve, built by
/// sampling at `ARC_LENGTH_SAMPLES` even steps in `t`.
struct ArcLengthTable {
    ts: Vec<f64>,
    lengths: Vec<f64>,
}

impl ArcLengthTable {
    fn build(curve: &Curve) -> ArcLengthTable {
        let mut ts = Vec::with_capacity(ARC_LENGTH_SAMPLES + 1);
        let mut lengths = Vec::with_capacity(ARC_LENGTH_SAMPLES + 1);

        let mut total = 0.0;
        let mut previous = curve.evaluate(0.0);
        ts.push(0.0);
        lengths.push(0.0);

        for i in 1..=ARC_LENGTH_SAMPLES {
            let t = i as f64 / ARC_LENGTH_SAMPLES as f64;
            let point = curve.evaluate(t);
            total += point.distance_to(&previous);
            ts.push(t);
            lengths.push(total);
            previous = point;
        }

        ArcLengthTable { ts, lengths }
    }

    fn total_length(&self) -> f64 {
        *self.lengths.last().unwrap()
    }

    fn t_at_length(&self, target: f64) -> f64 {
        let total = self.total_length();
        if target <= 0.0 {
            return 0.0;
        }
        if target >= total {
            return 1.0;
        }

        let index = self.lengths.partition_point(|&l| l < target);
        let i0 = index.saturating_sub(1);
        let i1 = index.min(self.lengths.len() - 1);

        let (l0, l1) = (self.lengths[i0], self.lengths[i1]);
        let (t0, t1) = (self.ts[i0], self.ts[i1]);

        if (l1 - l0).abs() < 1e-12 {
            t0
        } else {
            t0 + (t1 - t0) * (target - l0) / (l1 - l0)
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::path::builder::{BezPath, PathBuilder};

    fn straight_line(length: f64) -> BezPath {
        let mut path = BezPath::new();
        path.move_to(Coord2(0.0, 0.0));
        path.line_to(Coord2(length, 0.0));
        path
    }

    fn collect_moves_and_lengths(source: &impl ContourSource) -> Vec<(Coord2, f64)> {
        let mut dashes = vec![];
        let mut current_start: Option<Coord2> = None;
        let mut current_end = Coord2::origin();

        source.foreach(&mut |event| match event {
            PathEvent::Move(p) => {
                if let Some(start) = current_start.take() {
                    dashes.push((start, (current_end - start).magnitude()));
                }
                current_start = Some(p);
                current_end = p;
            }
            PathEvent::Line { p1, .. } => current_end = p1,
            PathEvent::Cubic { p3, .. } => current_end = p3,
            PathEvent::Conic { p2, .. } => current_end = p2,
            PathEvent::Close { .. } => {}
        });

        if let Some(start) = current_start {
            dashes.push((start, (current_end - start).magnitude()));
        }

        dashes
    }

    #[test]
    fn dash_pattern_4_2_over_length_10_matches_s6() {
        let line = straight_line(10.0);
        let dashed = DashedContour::new(&line, &[4.0, 2.0], 0.0);

        let dashes = collect_moves_and_lengths(&dashed);
        assert_eq!(dashes.len(), 2);
        assert!(dashes[0].0.is_near_to(&Coord2(0.0, 0.0), 1e-6));
        assert!((dashes[0].1 - 4.0).abs() < 1e-6);
        assert!(dashes[1].0.is_near_to(&Coord2(6.0, 0.0), 1e-6));
        assert!((dashes[1].1 - 4.0).abs() < 1e-6);
    }

    #[test]
    fn empty_pattern_passes_through_unmodified() {
        let line = straight_line(10.0);
        let dashed = DashedContour::new(&line, &[], 0.0);

        let dashes = collect_moves_and_lengths(&dashed);
        assert_eq!(dashes.len(), 1);
        assert!((dashes[0].1 - 10.0).abs() < 1e-6);
    }
}
