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

//! geodesic-wgs84
//!
//! A library for solving the direct and inverse
//! [geodesic problems](https://en.wikipedia.org/wiki/Geodesics_on_an_ellipsoid)
//! on an ellipsoid of revolution, in particular the
//! [WGS-84](https://www.icao.int/NACC/Documents/Meetings/2014/ECARAIM/REF08-Doc9674.pdf)
//! ellipsoid.
//!
//! The shortest path between two points on the surface of an ellipsoid is a
//! geodesic. It is the equivalent of a straight line segment in planar
//! geometry or a [great circle arc](https://en.wikipedia.org/wiki/Great_circle)
//! on the surface of a sphere.
//!
//! This library calculates:
//!
//! - the position and azimuth at a distance along a geodesic, the direct problem;
//! - the length and azimuths of the geodesic between two positions, the inverse problem;
//! - the reduced length, geodesic scales and area of a geodesic.
//!
//! ## Design
//!
//! The library is based on Charles Karney's [GeographicLib](https://geographiclib.sourceforge.io/) library.
//!
//! Like `GeographicLib`, it models geodesics as great circle arcs on
//! the surface of an auxiliary sphere and uses series expansions in the
//! third flattening to convert between the sphere and the ellipsoid, see:
//! [Karney(2013)](https://link.springer.com/article/10.1007/s00190-012-0578-z)
//! *Algorithms for geodesics.*
//!
//! The `Ellipsoid` class represents an ellipsoid of revolution and solves the
//! direct and inverse problems.
//! The static `WGS84_ELLIPSOID` represents the WGS-84 `Ellipsoid`.
//!
//! A `GeodesicLine` is a geodesic from a start position with a start azimuth.
//! It calculates the series coefficients that its `Mask` capabilities
//! require once, so that many positions along the line can be calculated
//! efficiently.
//!
//! The series are sixth order by default, giving round-off limited accuracy
//! (about 15 nanometres) for the WGS-84 ellipsoid. The `low-precision` feature
//! uses third order series instead.
//!
//! The library depends upon the following crates:
//!
//! - [angle-sc](https://crates.io/crates/angle-sc) - to define `Angle`,
//!   `Degrees` and `Radians` and perform trigonometric calculations;
//! - [unit-sphere](https://crates.io/crates/unit-sphere) - to define `LatLong`.
//! - [icao_units](https://crates.io/crates/icao-units) - to define `Metres`.
//!
//! The library is declared [no_std](https://docs.rust-embedded.org/book/intro/no-std.html)
//! so it can be used in embedded applications.

#![cfg_attr(not(test), no_std)]

extern crate angle_sc;
extern crate icao_units;
extern crate unit_sphere;

pub mod ellipsoid;
pub mod error;
pub mod geodesic;
pub mod geodesic_line;
pub mod mask;

pub use angle_sc::{Angle, Degrees, Radians};
pub use error::EllipsoidError;
pub use geodesic::{GeodesicData, InverseSolution};
pub use geodesic_line::GeodesicLine;
pub use icao_units::si::Metres;
pub use mask::Mask;
pub use unit_sphere::LatLong;

use ellipsoid::coefficients::{
    evaluate_coeffs_a3x, evaluate_coeffs_c3x, evaluate_coeffs_c3y, evaluate_coeffs_c4x,
    evaluate_coeffs_c4y, evaluate_polynomial, GEODESIC_ORDER, NC3X, NC4X,
};
use once_cell::sync::Lazy;

/// The parameters of an `Ellipsoid`.
#[derive(Clone, Debug, PartialEq)]
pub struct Ellipsoid {
    /// The Semimajor axis of the ellipsoid.
    a: Metres,
    /// The flattening of the ellipsoid, a ratio.
    f: f64,

    /// The Semiminor axis of the ellipsoid.
    b: Metres,
    /// One minus the flattening ratio.
    one_minus_f: f64,
    /// The square of the Eccentricity of the ellipsoid.
    e_2: f64,
    /// The square of the second Eccentricity of the ellipsoid.
    ep_2: f64,
    /// The third flattening of the ellipsoid.
    n: f64,
    /// The square of the authalic radius.
    c2: f64,
    /// The tolerance of very short lines in the inverse calculation.
    etol2: f64,

    /// The A3 series `coefficients` of the ellipsoid.
    a3x: [f64; GEODESIC_ORDER],
    /// The C3x series `coefficients` of the ellipsoid.
    c3x: [f64; NC3X],
    /// The C4x series `coefficients` of the ellipsoid.
    c4x: [f64; NC4X],
}

impl Ellipsoid {
    /// Constructor.
    /// * `a` - the Semimajor axis of the `Ellipsoid`.
    /// * `f` - the flattening of the `Ellipsoid`, a ratio.
    ///   It is negative for a prolate ellipsoid and zero for a sphere.
    ///
    /// # Errors
    ///
    /// Returns an `EllipsoidError` if `a` is not finite and positive or
    /// `f` is not finite and between -1 and 1.
    ///
    /// # Examples
    /// ```
    /// use geodesic_wgs84::{Ellipsoid, EllipsoidError, Metres};
    ///
    /// let sphere = Ellipsoid::new(Metres(6_371_000.0), 0.0);
    /// assert!(sphere.is_ok());
    ///
    /// let invalid = Ellipsoid::new(Metres(0.0), 0.0);
    /// assert_eq!(Err(EllipsoidError::InvalidSemimajorAxis(0.0)), invalid);
    /// ```
    pub fn new(a: Metres, f: f64) -> Result<Self, EllipsoidError> {
        error::validate_parameters(a.0, f)?;
        Ok(Self::from_valid_parameters(a, f))
    }

    /// Construct an `Ellipsoid` from parameters that are known to be valid.
    fn from_valid_parameters(a: Metres, f: f64) -> Self {
        let n = ellipsoid::calculate_3rd_flattening(f);
        Self {
            a,
            f,
            b: ellipsoid::calculate_minor_axis(a, f),
            one_minus_f: 1.0 - f,
            e_2: ellipsoid::calculate_sq_eccentricity(f),
            ep_2: ellipsoid::calculate_sq_2nd_eccentricity(f),
            n,
            c2: ellipsoid::calculate_sq_authalic_radius(a, f),
            etol2: ellipsoid::calculate_short_line_tolerance(f),
            a3x: evaluate_coeffs_a3x(n),
            c3x: evaluate_coeffs_c3x(n),
            c4x: evaluate_coeffs_c4x(n),
        }
    }

    /// Construct an `Ellipsoid` with the WGS-84 parameters.
    #[must_use]
    pub fn wgs84() -> Self {
        Self::from_valid_parameters(ellipsoid::wgs84::A, ellipsoid::wgs84::F)
    }

    /// The Semimajor axis of the ellipsoid.
    #[must_use]
    pub const fn a(&self) -> Metres {
        self.a
    }

    /// The flattening of the ellipsoid, a ratio.
    #[must_use]
    pub const fn f(&self) -> f64 {
        self.f
    }

    /// The inverse flattening of the ellipsoid, zero for a sphere.
    #[allow(clippy::float_cmp)]
    #[must_use]
    pub fn inverse_flattening(&self) -> f64 {
        if self.f == 0.0 {
            0.0
        } else {
            1.0 / self.f
        }
    }

    /// The Semiminor axis of the ellipsoid.
    #[must_use]
    pub const fn b(&self) -> Metres {
        self.b
    }

    /// One minus the flattening ratio.
    #[must_use]
    pub const fn one_minus_f(&self) -> f64 {
        self.one_minus_f
    }

    /// The square of the Eccentricity of the ellipsoid.
    #[must_use]
    pub const fn e_2(&self) -> f64 {
        self.e_2
    }

    /// The square of the second Eccentricity of the ellipsoid.
    #[must_use]
    pub const fn ep_2(&self) -> f64 {
        self.ep_2
    }

    /// The third flattening of the ellipsoid.
    #[must_use]
    pub const fn n(&self) -> f64 {
        self.n
    }

    /// The square of the authalic radius of the ellipsoid.
    #[must_use]
    pub const fn c2(&self) -> f64 {
        self.c2
    }

    /// The tolerance of very short lines in the inverse calculation.
    #[must_use]
    pub const fn etol2(&self) -> f64 {
        self.etol2
    }

    /// Calculate `A3` from the A3 series `coefficients` of the ellipsoid.
    /// * `eps` - epsilon
    #[must_use]
    pub fn a3f(&self, eps: f64) -> f64 {
        evaluate_polynomial(&self.a3x, eps)
    }

    /// Calculate the coefficients `C3[l]` in the Fourier expansion of `C3`.
    /// * `eps` - epsilon
    #[must_use]
    pub fn c3f(&self, eps: f64) -> [f64; GEODESIC_ORDER] {
        evaluate_coeffs_c3y(&self.c3x, eps)
    }

    /// Calculate the coefficients `C4[l]` in the Fourier expansion of `C4`.
    /// * `eps` - epsilon
    #[must_use]
    pub fn c4f(&self, eps: f64) -> [f64; GEODESIC_ORDER] {
        evaluate_coeffs_c4y(&self.c4x, eps)
    }

    /// Solve the direct geodesic problem.
    /// * `lat1`, `lon1` - the start position.
    /// * `azi1` - the azimuth at the start position.
    /// * `s12_a12` - the distance in metres or, if `arcmode` is true, the
    ///   arc length on the auxiliary sphere in degrees.
    /// * `arcmode` - whether `s12_a12` is an arc length.
    /// * `outmask` - the values to calculate.
    ///
    /// returns the `GeodesicData` of the end position.
    ///
    /// # Examples
    /// ```
    /// use angle_sc::{is_within_tolerance, Degrees};
    /// use geodesic_wgs84::{Mask, WGS84_ELLIPSOID};
    ///
    /// let data = WGS84_ELLIPSOID.direct(
    ///     Degrees(40.0),
    ///     Degrees(-75.0),
    ///     Degrees(30.0),
    ///     1.0e6,
    ///     false,
    ///     Mask::LATITUDE | Mask::LONGITUDE | Mask::AZIMUTH,
    /// );
    /// assert!(is_within_tolerance(47.617_759_838_595_14, data.lat2.0, 1e-9));
    /// assert!(is_within_tolerance(-68.361_198_524_517_14, data.lon2.0, 1e-9));
    /// assert!(is_within_tolerance(34.608_623_903_368_25, data.azi2.0, 1e-9));
    /// ```
    #[must_use]
    pub fn direct(
        &self,
        lat1: Degrees,
        lon1: Degrees,
        azi1: Degrees,
        s12_a12: f64,
        arcmode: bool,
        outmask: Mask,
    ) -> GeodesicData {
        let caps = if arcmode {
            outmask
        } else {
            outmask | Mask::DISTANCE_IN
        };
        GeodesicLine::new(lat1, lon1, azi1, caps, self).position(arcmode, s12_a12, outmask)
    }

    /// Calculate the position and azimuth at a distance from a start
    /// position.
    /// * `a` - the start position.
    /// * `azi1` - the azimuth at the start position.
    /// * `s12` - the distance from the start position.
    ///
    /// returns the end position and the azimuth at the end position.
    #[must_use]
    pub fn direct_position(&self, a: &LatLong, azi1: Degrees, s12: Metres) -> (LatLong, Degrees) {
        let data = self.direct(
            a.lat(),
            a.lon(),
            azi1,
            s12.0,
            false,
            Mask::LATITUDE | Mask::LONGITUDE | Mask::AZIMUTH,
        );
        (LatLong::new(data.lat2, data.lon2), data.azi2)
    }

    /// Solve the inverse geodesic problem.
    /// * `lat1`, `lon1` - the start position.
    /// * `lat2`, `lon2` - the end position.
    /// * `outmask` - the values to calculate.
    ///
    /// returns the `InverseSolution` between the positions.
    ///
    /// # Examples
    /// ```
    /// use angle_sc::{is_within_tolerance, Degrees};
    /// use geodesic_wgs84::{Mask, WGS84_ELLIPSOID};
    ///
    /// // Istanbul to Washington
    /// let solution = WGS84_ELLIPSOID.inverse(
    ///     Degrees(42.0),
    ///     Degrees(29.0),
    ///     Degrees(39.0),
    ///     Degrees(-77.0),
    ///     Mask::DISTANCE | Mask::AZIMUTH,
    /// );
    /// assert!(solution.converged);
    /// assert!(is_within_tolerance(-50.69375304113997, solution.data.azi1.0, 1e-9));
    /// assert!(is_within_tolerance(8_339_863.136_005_359, solution.data.s12.0, 1e-5));
    /// assert!(is_within_tolerance(-132.2646607116376, solution.data.azi2.0, 1e-9));
    /// ```
    #[must_use]
    pub fn inverse(
        &self,
        lat1: Degrees,
        lon1: Degrees,
        lat2: Degrees,
        lon2: Degrees,
        outmask: Mask,
    ) -> InverseSolution {
        geodesic::solve_inverse_with_max_iterations(
            lat1.0,
            lon1.0,
            lat2.0,
            lon2.0,
            outmask,
            geodesic::MAX_ITERATIONS,
            self,
        )
    }

    /// Construct a `GeodesicLine` on this `Ellipsoid`.
    /// * `lat1`, `lon1` - the start position.
    /// * `azi1` - the azimuth at the start position.
    /// * `caps` - the capabilities of the line.
    #[must_use]
    pub fn line(&self, lat1: Degrees, lon1: Degrees, azi1: Degrees, caps: Mask) -> GeodesicLine {
        GeodesicLine::new(lat1, lon1, azi1, caps, self)
    }
}

/// A static instance of the WGS-84 `Ellipsoid`.
pub static WGS84_ELLIPSOID: Lazy<Ellipsoid> = Lazy::new(Ellipsoid::wgs84);
