/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use criterion::{criterion_group, criterion_main, Criterion};

use flo_stroke::bezier::curve::Curve;
use flo_stroke::bezier::subdivide;
use flo_stroke::geo::Coord2;

fn criterion_benchmark(c: &mut Criterion) {
    let gentle = Curve::cubic(
        Coord2(0.0, 0.0),
        Coord2(30.0, 10.0),
        Coord2(70.0, 10.0),
        Coord2(100.0, 0.0),
    );
    let sharp = Curve::cubic(
        Coord2(0.0, 0.0),
        Coord2(100.0, 80.0),
        Coord2(-80.0, 100.0),
        Coord2(100.0, 0.0),
    );

    c.bench_function("subdivide_gentle_cubic", |b| {
        b.iter(|| subdivide(&gentle))
    });
    c.bench_function("subdivide_sharp_cubic", |b| b.iter(|| subdivide(&sharp)));
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
