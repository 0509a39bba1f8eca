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

//! The ellipsoid module contains types and functions for defining an ellipsoid
//! given its Semimajor axis (the equivalent of its radius) and flattening ratio.
//!
//! It also contains the angle functions used to reduce latitudes, longitudes
//! and azimuths before they are mapped onto the auxiliary sphere.

#![allow(clippy::float_cmp, clippy::suboptimal_flops)]

pub mod coefficients;
pub mod wgs84;

use crate::Metres;
use angle_sc::{Angle, Degrees};

/// The square root of the smallest normal `f64`.
/// It is used to break the degeneracy of points at the poles.
pub const TINY: f64 = 1.491_668_146_240_041_3e-154;

/// The machine epsilon.
pub const TOL0: f64 = f64::EPSILON;

/// The square root of the machine epsilon.
pub const TOL2: f64 = 1.490_116_119_384_765_6e-8;

/// Calculate the Semiminor axis of an ellipsoid.
/// * `a` - the Semimajor axis of an ellipsoid.
/// * `f` - the flattening ratio.
/// # Examples
/// ```
/// use geodesic_wgs84::Metres;
/// use geodesic_wgs84::ellipsoid::{calculate_minor_axis, wgs84};
///
/// // The WGS 84 Semiminor axis measured in metres.
/// let b : Metres = Metres(6_356_752.314_245_179);
/// assert_eq!(b, calculate_minor_axis(wgs84::A, wgs84::F));
/// ```
#[must_use]
pub fn calculate_minor_axis(a: Metres, f: f64) -> Metres {
    Metres(a.0 * (1.0 - f))
}

/// Calculate the square of the Eccentricity of an ellipsoid.
/// * `f` - the flattening ratio.
/// # Examples
/// ```
/// use geodesic_wgs84::ellipsoid::{calculate_sq_eccentricity, wgs84};
///
/// // The WGS 84 sq_eccentricity.
/// assert_eq!(0.0066943799901413165, calculate_sq_eccentricity(wgs84::F));
/// ```
#[must_use]
pub fn calculate_sq_eccentricity(f: f64) -> f64 {
    f * (2.0 - f)
}

/// Calculate the square of the second Eccentricity of an ellipsoid.
/// * `f` - the flattening ratio.
#[must_use]
pub fn calculate_sq_2nd_eccentricity(f: f64) -> f64 {
    let one_minus_f = 1.0 - f;
    calculate_sq_eccentricity(f) / (one_minus_f * one_minus_f)
}

/// Calculate the third flattening of an ellipsoid.
/// * `f` - the flattening ratio.
/// # Examples
/// ```
/// use geodesic_wgs84::ellipsoid::{calculate_3rd_flattening, wgs84};
///
/// // The WGS 84 3rd flattening.
/// assert_eq!(0.0016792203863837047, calculate_3rd_flattening(wgs84::F));
/// ```
#[must_use]
pub fn calculate_3rd_flattening(f: f64) -> f64 {
    f / (2.0 - f)
}

/// Calculate the square of the authalic radius of an ellipsoid, the radius
/// of the sphere with the same surface area as the ellipsoid.
/// * `a` - the Semimajor axis of an ellipsoid.
/// * `f` - the flattening ratio.
///
/// returns the square of the authalic radius in square metres.
#[must_use]
pub fn calculate_sq_authalic_radius(a: Metres, f: f64) -> f64 {
    let e_2 = calculate_sq_eccentricity(f);
    let b = calculate_minor_axis(a, f).0;
    let ratio = if e_2 == 0.0 {
        1.0
    } else {
        let e = libm::sqrt(libm::fabs(e_2));
        if e_2 > 0.0 {
            libm::atanh(e) / e
        } else {
            libm::atan(e) / e
        }
    };
    (a.0 * a.0 + b * b * ratio) / 2.0
}

/// Calculate the tolerance used to identify very short geodesics in the
/// inverse calculation.
/// * `f` - the flattening ratio.
#[must_use]
pub fn calculate_short_line_tolerance(f: f64) -> f64 {
    0.1 * TOL2 / libm::sqrt(libm::fabs(f).max(0.001) * (1.0 - f / 2.0).min(1.0) / 2.0)
}

/// Function to calculate `epsilon`, the variable used in series expansions.
///
/// Note: `epsilon` is small, it is negative on a prolate ellipsoid.
/// CFF Karney, [Algorithms for geodesics](https://arxiv.org/pdf/1109.4448.pdf)
/// Eqs 9 & 16.
/// * `k2` - the square of Karney's k: `ep_2 * cos(alpha0)^2`.
#[must_use]
pub fn calculate_epsilon(k2: f64) -> f64 {
    let sqrt_k2_1 = libm::sqrt(1.0 + k2) + 1.0;
    k2 / (sqrt_k2_1 * sqrt_k2_1)
}

/// Normalize a pair of sine and cosine values so that they lie on the unit
/// circle.
/// * `sinx`, `cosx` - the unnormalized sine and cosine.
#[must_use]
pub fn normalize_sin_cos(sinx: f64, cosx: f64) -> (f64, f64) {
    let r = libm::hypot(sinx, cosx);
    (sinx / r, cosx / r)
}

/// Normalize an angle in degrees to the range [-180, 180).
/// * `x` - the angle in degrees.
#[must_use]
pub fn normalize_degrees(x: f64) -> f64 {
    let y = libm::remainder(x, 360.0);
    if y < 180.0 {
        y
    } else {
        y - 360.0
    }
}

/// Round an angle in degrees so that tiny values are set to zero.
/// The smallest gap in the result is 1/2^57 degrees, about 0.7 pm on the
/// earth, this avoids near singular cases when `x` is non-zero but tiny.
/// * `x` - the angle in degrees.
#[must_use]
pub fn round_degrees(x: f64) -> f64 {
    const Z: f64 = 1.0 / 16.0;
    let y = libm::fabs(x);
    let y = if y < Z { Z - (Z - y) } else { y };
    if x < 0.0 {
        -y
    } else {
        y
    }
}

/// Calculate the sine and cosine of an angle in degrees.
/// The sine of multiples of 180° and the cosine of odd multiples of 90° are
/// exactly zero.
/// Zero results are positive, except for the sine of -0.
/// * `x` - the angle in degrees.
#[must_use]
pub fn sin_cos_degrees(x: f64) -> (f64, f64) {
    if x == 0.0 {
        (x, 1.0)
    } else {
        let angle = Angle::from(Degrees(x));
        (angle.sin().0 + 0.0, angle.cos().0 + 0.0)
    }
}

/// Function to convert a `geodetic` Latitude to a `parametric` (reduced)
/// Latitude on the auxiliary sphere: `tan(beta) = (1 - f) * tan(lat)`.
/// * `lat` - the `geodetic` Latitude in degrees.
/// * `one_minus_f` - one minus the flattening ratio.
///
/// returns the sine and cosine of the `parametric` Latitude, the cosine is
/// at least `TINY` so that points at the poles have a defined azimuth.
#[must_use]
pub fn calculate_parametric_latitude(lat: f64, one_minus_f: f64) -> (f64, f64) {
    let (sin_lat, cos_lat) = sin_cos_degrees(lat);
    let (sbet, cbet) = normalize_sin_cos(one_minus_f * sin_lat, cos_lat);
    (sbet, cbet.max(TINY))
}

/// Function to convert a `parametric` Latitude on the auxiliary sphere to a
/// `geodetic` Latitude.
/// * `sbet`, `cbet` - the sine and cosine of the `parametric` Latitude.
/// * `one_minus_f` - one minus the flattening ratio.
///
/// returns the `geodetic` Latitude in degrees.
#[must_use]
pub fn calculate_geodetic_latitude(sbet: f64, cbet: f64, one_minus_f: f64) -> f64 {
    libm::atan2(sbet, one_minus_f * cbet).to_degrees()
}

#[cfg(test)]
mod tests {
    use super::*;
    use angle_sc::is_within_tolerance;

    #[test]
    fn test_constants() {
        assert!(is_within_tolerance(
            TINY,
            libm::sqrt(f64::MIN_POSITIVE),
            1e-168
        ));
        assert_eq!(TOL2, libm::sqrt(TOL0));
    }

    #[test]
    fn test_calculate_sq_2nd_eccentricity() {
        assert_eq!(
            0.006739496742276434,
            calculate_sq_2nd_eccentricity(wgs84::F)
        );
        assert_eq!(0.0, calculate_sq_2nd_eccentricity(0.0));
        assert!(calculate_sq_2nd_eccentricity(-0.1) < 0.0);
    }

    #[test]
    fn test_calculate_epsilon() {
        let wgs84_ep2 = calculate_sq_2nd_eccentricity(wgs84::F);
        // on a meridian, epsilon is the third flattening
        assert!(is_within_tolerance(
            calculate_3rd_flattening(wgs84::F),
            calculate_epsilon(wgs84_ep2),
            f64::EPSILON
        ));
        assert!(is_within_tolerance(
            0.0012604720416530619,
            calculate_epsilon(0.75 * wgs84_ep2),
            f64::EPSILON
        ));
        assert_eq!(0.0, calculate_epsilon(0.0));
        assert!(calculate_epsilon(-0.01) < 0.0);
    }

    #[test]
    fn test_calculate_sq_authalic_radius() {
        // A sphere
        let a = Metres(6_371_000.0);
        assert_eq!(a.0 * a.0, calculate_sq_authalic_radius(a, 0.0));

        // WGS 84, authalic radius = 6371007.180918 m
        let c2 = calculate_sq_authalic_radius(wgs84::A, wgs84::F);
        assert!(is_within_tolerance(6_371_007.180_9, libm::sqrt(c2), 1e-3));

        // A prolate ellipsoid is larger than its equatorial sphere
        let c2 = calculate_sq_authalic_radius(a, -0.1);
        assert!(c2 > a.0 * a.0);
    }

    #[test]
    fn test_calculate_short_line_tolerance() {
        let etol2 = calculate_short_line_tolerance(wgs84::F);
        assert!(0.0 < etol2);
        assert!(etol2 < 1e-7);
        // very small flattenings are clamped
        assert_eq!(
            calculate_short_line_tolerance(0.0),
            calculate_short_line_tolerance(-1e-6)
        );
    }

    #[test]
    fn test_normalize_sin_cos() {
        let (s, c) = normalize_sin_cos(3.0, 4.0);
        assert_eq!(0.6, s);
        assert_eq!(0.8, c);

        let (s, c) = normalize_sin_cos(-TINY, TINY);
        assert!(is_within_tolerance(-core::f64::consts::FRAC_1_SQRT_2, s, f64::EPSILON));
        assert!(is_within_tolerance(core::f64::consts::FRAC_1_SQRT_2, c, f64::EPSILON));

        // The midpoint of the initial inverse bracket, due East
        let (s, c) = normalize_sin_cos(TINY, 0.0);
        assert_eq!(1.0, s);
        assert_eq!(0.0, c);
    }

    #[test]
    fn test_normalize_degrees() {
        assert_eq!(0.0, normalize_degrees(0.0));
        assert_eq!(-180.0, normalize_degrees(180.0));
        assert_eq!(-180.0, normalize_degrees(-180.0));
        assert_eq!(179.0, normalize_degrees(-181.0));
        assert_eq!(-179.0, normalize_degrees(181.0));
        assert_eq!(90.0, normalize_degrees(450.0));
        assert_eq!(-90.0, normalize_degrees(-810.0));
    }

    #[test]
    fn test_round_degrees() {
        assert_eq!(0.0, round_degrees(1.0e-200));
        assert_eq!(0.0, round_degrees(-1.0e-200));
        assert_eq!(45.0, round_degrees(45.0));
        assert_eq!(-45.0, round_degrees(-45.0));
        assert_eq!(0.0625, round_degrees(0.0625));
        // values below 1/16 are rounded to a multiple of 1/2^57
        let x = round_degrees(0.01);
        assert_eq!(0.0, libm::remainder(x, 1.0 / 144_115_188_075_855_872.0));
    }

    #[test]
    fn test_sin_cos_degrees() {
        assert_eq!((0.0, 1.0), sin_cos_degrees(0.0));
        assert_eq!((1.0, 0.0), sin_cos_degrees(90.0));
        assert_eq!(0.0, sin_cos_degrees(180.0).0);
        assert_eq!(-1.0, sin_cos_degrees(180.0).1);
        assert_eq!(0.0, sin_cos_degrees(-90.0).1);
        assert!(sin_cos_degrees(180.0).0.is_sign_positive());
        assert!(sin_cos_degrees(-0.0).0.is_sign_negative());

        let (s, c) = sin_cos_degrees(30.0);
        assert!(is_within_tolerance(0.5, s, f64::EPSILON));
        assert!(is_within_tolerance(libm::sqrt(3.0) / 2.0, c, f64::EPSILON));
    }

    #[test]
    fn test_calculate_parametric_and_geodetic_latitude() {
        let one_minus_f = 1.0 - wgs84::F;

        for i in -90..91 {
            let latitude = f64::from(i);
            let (sbet, cbet) = calculate_parametric_latitude(latitude, one_minus_f);
            let result = calculate_geodetic_latitude(sbet, cbet, one_minus_f);

            assert!(is_within_tolerance(latitude, result, 64.0 * f64::EPSILON));
        }

        // the poles have a tiny positive cosine
        let (sbet, cbet) = calculate_parametric_latitude(-90.0, one_minus_f);
        assert_eq!(-1.0, sbet);
        assert_eq!(TINY, cbet);
    }
}
