// Copyright (c) 2024-2026 Ken Barker

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

// extern crate we're testing, same as any other code would do.
extern crate geodesic_wgs84;

use angle_sc::{is_within_tolerance, Degrees};
use geodesic_wgs84::ellipsoid::normalize_degrees;
use geodesic_wgs84::geodesic::{solve_inverse_with_max_iterations, MAX_ITERATIONS};
use geodesic_wgs84::{Ellipsoid, GeodesicLine, Mask, Metres, WGS84_ELLIPSOID};
use unit_sphere::LatLong;

/// The maximum distance error of the geodesic calculations.
#[cfg(not(feature = "low-precision"))]
const MAX_DISTANCE_ERROR: f64 = 15.0e-9;
#[cfg(feature = "low-precision")]
const MAX_DISTANCE_ERROR: f64 = 1.0e-4;

/// The distance tolerance against the published fixture values.
#[cfg(not(feature = "low-precision"))]
const FIXTURE_DISTANCE_ERROR: f64 = 1.0e-6;
#[cfg(feature = "low-precision")]
const FIXTURE_DISTANCE_ERROR: f64 = 2.0e-5;

/// The maximum position and azimuth error of a ray round trip, in degrees.
#[cfg(not(feature = "low-precision"))]
const MAX_ANGLE_ERROR: f64 = 1.0e-11;
#[cfg(feature = "low-precision")]
const MAX_ANGLE_ERROR: f64 = 1.0e-9;

#[test]
fn test_inverse_geodtest_examples() {
    // GeodTest.dat line 2874, a random geodesic
    let solution = WGS84_ELLIPSOID.inverse(
        Degrees(5.421_025_561_218),
        Degrees(0.0),
        Degrees(3.027_329_237_478_900_117),
        Degrees(109.666_857_465_735_641_205),
        Mask::ALL,
    );
    assert!(solution.converged);
    assert!(is_within_tolerance(
        84.846_843_174_846,
        solution.data.azi1.0,
        1e-9
    ));
    assert!(is_within_tolerance(
        12_161_089.999_180_5,
        solution.data.s12.0,
        FIXTURE_DISTANCE_ERROR
    ));

    // GeodTest.dat line 100001, a nearly antipodal geodesic
    let solution = WGS84_ELLIPSOID.inverse(
        Degrees(8.226_828_747_671),
        Degrees(0.0),
        Degrees(-8.516_119_211_674_268_968),
        Degrees(178.688_979_582_629_224_039),
        Mask::ALL,
    );
    assert!(solution.converged);
    assert!(is_within_tolerance(
        111.126_964_572_5,
        solution.data.azi1.0,
        1e-9
    ));
    assert!(is_within_tolerance(
        19_886_305.671_004_1,
        solution.data.s12.0,
        FIXTURE_DISTANCE_ERROR
    ));
}

#[test]
fn test_inverse_across_the_antimeridian() {
    let solution = WGS84_ELLIPSOID.inverse(
        Degrees(-30.0),
        Degrees(-154.0),
        Degrees(-30.0),
        Degrees(77.0),
        Mask::ALL,
    );
    assert!(solution.converged);
    assert!(solution.iterations < MAX_ITERATIONS);
    assert!(is_within_tolerance(
        11_454_287.863_336_667,
        solution.data.s12.0,
        FIXTURE_DISTANCE_ERROR
    ));
    assert!(is_within_tolerance(
        -136.410_708_073_383_72,
        solution.data.azi1.0,
        1e-9
    ));
    assert!(is_within_tolerance(
        -43.589_291_926_616_305,
        solution.data.azi2.0,
        1e-9
    ));

    // The geodesic is symmetric about the meridian half way between
    // the points.
    assert!(is_within_tolerance(
        solution.data.scale12,
        solution.data.scale21,
        1e-14
    ));
}

#[test]
fn test_direct_inverse_round_trips() {
    for lat1 in [-80.0, -30.0, 0.0, 45.0, 89.0] {
        for azi1 in [0.0, 45.0, 90.0, 135.0, 180.0, -60.0] {
            let line =
                WGS84_ELLIPSOID.line(Degrees(lat1), Degrees(10.0), Degrees(azi1), Mask::ALL);
            for s12 in [1.0e3, 1.0e6, 1.0e7, 1.5e7] {
                let data = line.position(false, s12, Mask::ALL);
                let solution = WGS84_ELLIPSOID.inverse(
                    Degrees(lat1),
                    Degrees(10.0),
                    data.lat2,
                    data.lon2,
                    Mask::DISTANCE | Mask::AZIMUTH,
                );
                assert!(solution.converged);
                assert!(
                    is_within_tolerance(s12, solution.data.s12.0, MAX_DISTANCE_ERROR),
                    "lat1: {lat1} azi1: {azi1} s12: {s12} result: {:?}",
                    solution.data.s12
                );
                let delta_azimuth = normalize_degrees(solution.data.azi1.0 - azi1);
                assert!(
                    libm::fabs(delta_azimuth) < 1e-9,
                    "lat1: {lat1} azi1: {azi1} s12: {s12} delta: {delta_azimuth}"
                );
            }
        }
    }
}

#[test]
fn test_geodesic_line_round_trip() {
    let a = LatLong::new(Degrees(-33.9), Degrees(151.2));
    let line = GeodesicLine::from((&a, Degrees(60.0)));
    for s12 in [-1.0e7, -1.0e5, 1.0, 5.0e5, 1.2e7] {
        let data = line.position(false, s12, Mask::ALL);
        let back = WGS84_ELLIPSOID.line(data.lat2, data.lon2, data.azi2, Mask::ALL);
        let start = back.position(false, -s12, Mask::ALL);
        assert!(is_within_tolerance(a.lat().0, start.lat2.0, MAX_ANGLE_ERROR));
        assert!(is_within_tolerance(a.lon().0, start.lon2.0, MAX_ANGLE_ERROR));
        assert!(is_within_tolerance(60.0, start.azi2.0, MAX_ANGLE_ERROR));
    }
}

#[test]
fn test_sphere() {
    let sphere = Ellipsoid::new(Metres(6_371_000.0), 0.0).expect("valid sphere");

    // antipodal points
    let solution = sphere.inverse(
        Degrees(30.0),
        Degrees(0.0),
        Degrees(-30.0),
        Degrees(180.0),
        Mask::DISTANCE,
    );
    assert!(solution.converged);
    assert!(is_within_tolerance(
        core::f64::consts::PI * 6_371_000.0,
        solution.data.s12.0,
        FIXTURE_DISTANCE_ERROR
    ));

    // On a sphere the arc length is the distance
    let data = sphere.direct(
        Degrees(10.0),
        Degrees(20.0),
        Degrees(30.0),
        40.0,
        true,
        Mask::ALL,
    );
    assert!(is_within_tolerance(
        40.0_f64.to_radians() * 6_371_000.0,
        data.s12.0,
        1e-6
    ));
    assert!(is_within_tolerance(
        40.0_f64.to_radians().sin() * 6_371_000.0,
        data.m12.0,
        1e-6
    ));
}

#[test]
fn test_inverse_not_converged() {
    let ellipsoid = Ellipsoid::wgs84();
    let solution = solve_inverse_with_max_iterations(
        -30.0,
        0.0,
        29.9,
        179.8,
        Mask::ALL,
        0,
        &ellipsoid,
    );
    assert!(!solution.converged);
    assert!(solution.data.s12.0 < 0.0);
}

#[cfg(not(feature = "low-precision"))]
#[test]
#[ignore]
fn test_geodesic_examples() {
    use csv::ReaderBuilder;
    use std::env;
    use std::path::Path;

    // Read GEODTEST_DIR/GeodTest.dat file and run tests
    let geoid = Ellipsoid::wgs84();

    let filename = "GeodTest.dat";
    let dir_key = "GEODTEST_DIR";

    let p = env::var(dir_key).expect("Environment variable not found: GEODTEST_DIR");
    let path = Path::new(&p);
    let file_path = path.join(filename);
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(false)
        .delimiter(b' ')
        .from_path(file_path)
        .expect("Could not read file: GeodTest.dat");
    for (line_number, result) in csv_reader.records().enumerate() {
        let record = result.expect("Could not read a record");
        let value = |index: usize| {
            record[index]
                .parse::<f64>()
                .expect("Could not parse a value")
        };

        let lat1 = Degrees(value(0));
        let lon1 = Degrees(value(1));
        let azi1 = Degrees(value(2));
        let lat2 = Degrees(value(3));
        let lon2 = Degrees(value(4));
        let azi2 = Degrees(value(5));
        let s12 = Metres(value(6));
        let a12 = Degrees(value(7));

        let solution = geoid.inverse(lat1, lon1, lat2, lon2, Mask::ALL);
        assert!(solution.converged, "line: {line_number}");

        let delta_length = libm::fabs(s12.0 - solution.data.s12.0);
        assert!(
            delta_length <= MAX_DISTANCE_ERROR,
            "inverse length, line: {line_number} delta: {delta_length}"
        );
        let delta_arc = libm::fabs(a12.0 - solution.data.a12.0);
        assert!(
            delta_arc <= 1e-12,
            "inverse arc length, line: {line_number} delta: {delta_arc}"
        );

        let data = geoid.direct(lat1, lon1, azi1, s12.0, false, Mask::ALL);
        let delta_lat = libm::fabs(lat2.0 - data.lat2.0);
        assert!(
            delta_lat <= 1e-12,
            "direct latitude, line: {line_number} delta: {delta_lat}"
        );
        let delta_azimuth = libm::fabs(normalize_degrees(azi2.0 - data.azi2.0));
        assert!(
            delta_azimuth <= 1e-9,
            "direct azimuth, line: {line_number} delta: {delta_azimuth}"
        );
    }
}
