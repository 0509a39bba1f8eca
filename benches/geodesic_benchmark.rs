// Copyright (c) 2026 Ken Barker

// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"),
// to deal in the Software without restriction, including without limitation the
// rights to use, copy, modify, merge, publish, distribute, sublicense, and/or
// sell copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:

// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.

// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN
// THE SOFTWARE.

use angle_sc::Degrees;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use geodesic_wgs84::{Mask, Metres, WGS84_ELLIPSOID};

fn inverse_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("inverse");
    group.bench_function("istanbul_washington", |b| {
        b.iter(|| {
            WGS84_ELLIPSOID.inverse(
                black_box(Degrees(42.0)),
                black_box(Degrees(29.0)),
                black_box(Degrees(39.0)),
                black_box(Degrees(-77.0)),
                Mask::DISTANCE | Mask::AZIMUTH,
            )
        })
    });
    group.bench_function("nearly_antipodal", |b| {
        b.iter(|| {
            WGS84_ELLIPSOID.inverse(
                black_box(Degrees(0.0)),
                black_box(Degrees(0.0)),
                black_box(Degrees(0.5)),
                black_box(Degrees(179.5)),
                Mask::DISTANCE | Mask::AZIMUTH,
            )
        })
    });
    group.bench_function("all_outputs", |b| {
        b.iter(|| {
            WGS84_ELLIPSOID.inverse(
                black_box(Degrees(42.0)),
                black_box(Degrees(29.0)),
                black_box(Degrees(39.0)),
                black_box(Degrees(-77.0)),
                Mask::ALL,
            )
        })
    });
    group.finish();
}

fn direct_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("direct");
    group.bench_function("distance", |b| {
        b.iter(|| {
            WGS84_ELLIPSOID.direct(
                black_box(Degrees(40.0)),
                black_box(Degrees(-75.0)),
                black_box(Degrees(30.0)),
                black_box(1.0e6),
                false,
                Mask::LATITUDE | Mask::LONGITUDE | Mask::AZIMUTH,
            )
        })
    });
    group.bench_function("arc_length", |b| {
        b.iter(|| {
            WGS84_ELLIPSOID.direct(
                black_box(Degrees(40.0)),
                black_box(Degrees(-75.0)),
                black_box(Degrees(30.0)),
                black_box(9.0),
                true,
                Mask::LATITUDE | Mask::LONGITUDE | Mask::AZIMUTH,
            )
        })
    });
    group.finish();
}

fn line_bench(c: &mut Criterion) {
    let line = WGS84_ELLIPSOID.line(Degrees(40.0), Degrees(-75.0), Degrees(30.0), Mask::ALL);

    let mut group = c.benchmark_group("geodesic_line");
    group.bench_function("construct", |b| {
        b.iter(|| {
            WGS84_ELLIPSOID.line(
                black_box(Degrees(40.0)),
                black_box(Degrees(-75.0)),
                black_box(Degrees(30.0)),
                Mask::ALL,
            )
        })
    });
    group.bench_function("position_at", |b| {
        b.iter(|| line.position_at(black_box(Metres(1.0e6))))
    });
    group.bench_function("all_outputs", |b| {
        b.iter(|| line.position(false, black_box(1.0e6), Mask::ALL))
    });
    group.finish();
}

criterion_group!(benches, inverse_bench, direct_bench, line_bench);
criterion_main!(benches);
