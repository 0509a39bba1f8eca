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

//! The `geodesic_line` module contains the `GeodesicLine` type: a geodesic
//! starting at a given position with a given azimuth.
//!
//! A `GeodesicLine` calculates the series coefficients of the geodesic once,
//! so that positions along the line can be found efficiently.
//! It only calculates the coefficients required by its capabilities, see `Mask`.

#![allow(clippy::float_cmp, clippy::similar_names, clippy::suboptimal_flops)]

use crate::ellipsoid::coefficients::{
    cos_series, evaluate_a1m1, evaluate_a2m1, evaluate_coeffs_c1, evaluate_coeffs_c1p,
    evaluate_coeffs_c2, sin_cos_series, GEODESIC_ORDER,
};
use crate::ellipsoid::{
    calculate_epsilon, calculate_geodetic_latitude, calculate_parametric_latitude,
    normalize_degrees, normalize_sin_cos, round_degrees, sin_cos_degrees, TINY,
};
use crate::geodesic::GeodesicData;
use crate::{Degrees, Ellipsoid, LatLong, Mask, Metres};

/// The largest flattening for which the reverted `C1p` series converts a
/// distance to an arc length accurately.
const MAX_REVERTED_SERIES_FLATTENING: f64 = 0.01;

/// A geodesic line on the surface of an ellipsoid, starting at a position
/// with an azimuth.
///
/// `GeodesicLine::default()` is uninitialized: it has no capabilities and
/// all of its positions are NaN.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GeodesicLine {
    lat1: f64,
    lon1: f64,
    azi1: f64,

    /// The ellipsoid parameters.
    a: f64,
    b: f64,
    c2: f64,
    f: f64,
    one_minus_f: f64,
    e_2: f64,

    /// The azimuth at the start point.
    salp1: f64,
    calp1: f64,
    /// The azimuth at the Equator.
    salp0: f64,
    calp0: f64,
    /// The arc length and longitude from the Equator on the auxiliary sphere.
    ssig1: f64,
    csig1: f64,
    somg1: f64,
    comg1: f64,
    k2: f64,

    a1m1: f64,
    a2m1: f64,
    a3c: f64,
    a4: f64,
    b11: f64,
    b21: f64,
    b31: f64,
    b41: f64,
    /// The start point distance parameter on the auxiliary sphere, sig1 + B11.
    stau1: f64,
    ctau1: f64,

    c1a: [f64; GEODESIC_ORDER + 1],
    c1pa: [f64; GEODESIC_ORDER + 1],
    c2a: [f64; GEODESIC_ORDER + 1],
    c3a: [f64; GEODESIC_ORDER],
    c4a: [f64; GEODESIC_ORDER],

    caps: Mask,
}

impl GeodesicLine {
    /// Construct a `GeodesicLine`.
    /// * `lat1` - the start point latitude, in the range [-90, 90].
    /// * `lon1` - the start point longitude.
    /// * `azi1` - the azimuth at the start point.
    /// * `caps` - the capabilities of the line, `LATITUDE` and `AZIMUTH`
    ///   are always included.
    /// * `ellipsoid` - the `Ellipsoid`.
    ///
    /// # Examples
    /// ```
    /// use angle_sc::{is_within_tolerance, Degrees};
    /// use geodesic_wgs84::{Ellipsoid, GeodesicLine, Mask, Metres};
    ///
    /// let ellipsoid = Ellipsoid::wgs84();
    /// let line = GeodesicLine::new(
    ///     Degrees(42.0),
    ///     Degrees(29.0),
    ///     Degrees(-50.69375304113997),
    ///     Mask::ALL,
    ///     &ellipsoid,
    /// );
    /// let (lat2, lon2, _) = line.position_at(Metres(8_339_863.136_005_359));
    /// assert!(is_within_tolerance(39.0, lat2.0, 1e-9));
    /// assert!(is_within_tolerance(-77.0, lon2.0, 1e-9));
    /// ```
    #[must_use]
    pub fn new(
        lat1: Degrees,
        lon1: Degrees,
        azi1: Degrees,
        caps: Mask,
        ellipsoid: &Ellipsoid,
    ) -> Self {
        let caps = caps | Mask::LATITUDE | Mask::AZIMUTH;

        // Guard against underflow in salp0
        let azi1 = round_degrees(normalize_degrees(azi1.0));
        let lon1 = normalize_degrees(lon1.0);

        // sin and cos are exact at multiples of 90 degrees
        let (salp1, calp1) = sin_cos_degrees(azi1);
        // cbet1 = TINY at the poles
        let (sbet1, cbet1) = calculate_parametric_latitude(lat1.0, ellipsoid.one_minus_f());

        // Evaluate alp0 from sin(alp1) * cos(bet1) = sin(alp0),
        let salp0 = salp1 * cbet1;
        let calp0 = libm::hypot(calp1, salp1 * sbet1);

        // Evaluate sig with tan(bet1) = tan(sig1) * cos(alp1), sig = 0 is the
        // nearest northward crossing of the Equator.
        // Evaluate omg1 with tan(omg1) = sin(alp0) * tan(sig1).
        let comg1 = if sbet1 != 0.0 || calp1 != 0.0 {
            cbet1 * calp1
        } else {
            1.0
        };
        let (ssig1, csig1) = normalize_sin_cos(sbet1, comg1);
        let (somg1, comg1) = normalize_sin_cos(salp0 * sbet1, comg1);

        let k2 = calp0 * calp0 * ellipsoid.ep_2();
        let eps = calculate_epsilon(k2);

        let mut line = Self {
            lat1: lat1.0,
            lon1,
            azi1,
            a: ellipsoid.a().0,
            b: ellipsoid.b().0,
            c2: ellipsoid.c2(),
            f: ellipsoid.f(),
            one_minus_f: ellipsoid.one_minus_f(),
            e_2: ellipsoid.e_2(),
            salp1,
            calp1,
            salp0,
            calp0,
            ssig1,
            csig1,
            somg1,
            comg1,
            k2,
            caps,
            ..Self::default()
        };

        if caps.intersects(Mask::CAP_C1) {
            line.a1m1 = evaluate_a1m1(eps);
            line.c1a = evaluate_coeffs_c1(eps);
            line.b11 = sin_cos_series(&line.c1a, ssig1, csig1);
            let s = libm::sin(line.b11);
            let c = libm::cos(line.b11);
            // tau1 = sig1 + B11
            line.stau1 = ssig1 * c + csig1 * s;
            line.ctau1 = csig1 * c - ssig1 * s;
        }

        if caps.intersects(Mask::CAP_C1P) {
            line.c1pa = evaluate_coeffs_c1p(eps);
        }

        if caps.intersects(Mask::CAP_C2) {
            line.a2m1 = evaluate_a2m1(eps);
            line.c2a = evaluate_coeffs_c2(eps);
            line.b21 = sin_cos_series(&line.c2a, ssig1, csig1);
        }

        if caps.intersects(Mask::CAP_C3) {
            line.c3a = ellipsoid.c3f(eps);
            line.a3c = -line.f * salp0 * ellipsoid.a3f(eps);
            line.b31 = sin_cos_series(&line.c3a, ssig1, csig1);
        }

        if caps.intersects(Mask::CAP_C4) {
            line.c4a = ellipsoid.c4f(eps);
            // Multiplier = a^2 * e^2 * cos(alpha0) * sin(alpha0)
            line.a4 = line.a * line.a * calp0 * salp0 * line.e_2;
            line.b41 = cos_series(&line.c4a, ssig1, csig1);
        }

        line
    }

    /// Accessor for the start point latitude.
    #[must_use]
    pub const fn lat1(&self) -> Degrees {
        Degrees(self.lat1)
    }

    /// Accessor for the start point longitude, in the range [-180, 180).
    #[must_use]
    pub const fn lon1(&self) -> Degrees {
        Degrees(self.lon1)
    }

    /// Accessor for the start point azimuth, in the range [-180, 180).
    #[must_use]
    pub const fn azi1(&self) -> Degrees {
        Degrees(self.azi1)
    }

    /// Accessor for the capabilities of the line.
    #[must_use]
    pub const fn capabilities(&self) -> Mask {
        self.caps
    }

    /// Whether the line has been constructed.
    #[must_use]
    pub const fn is_initialized(&self) -> bool {
        self.caps.bits() != 0
    }

    /// Whether the line has all of the capabilities in `mask`.
    #[must_use]
    pub const fn has_capability(&self, mask: Mask) -> bool {
        self.caps.contains(mask)
    }

    /// The azimuth of the line where it crosses the Equator northwards.
    #[must_use]
    pub fn equatorial_azimuth(&self) -> Degrees {
        Degrees(libm::atan2(self.salp0, self.calp0).to_degrees())
    }

    /// Calculate a position along the line.
    /// * `arcmode` - whether `s12_a12` is an arc length on the auxiliary
    ///   sphere in degrees, otherwise it is a distance in metres.
    /// * `s12_a12` - the distance or arc length from the start point,
    ///   it may be negative.
    /// * `outmask` - the values to calculate, limited by the capabilities of
    ///   the line.
    ///
    /// returns the `GeodesicData` of the position, all NaN if the line is
    /// uninitialized or it cannot calculate positions from distances.
    #[must_use]
    pub fn position(&self, arcmode: bool, s12_a12: f64, outmask: Mask) -> GeodesicData {
        let outmask = outmask & self.caps & Mask::OUT_ALL;
        let mut data = GeodesicData::new();
        if !self.is_initialized()
            || !(arcmode || self.caps.intersects(Mask::DISTANCE_IN & Mask::OUT_ALL))
        {
            return data;
        }

        let (sig12, ssig12, csig12, mut b12) = if arcmode {
            // Interpret s12_a12 as spherical arc length
            let (ssig12, csig12) = sin_cos_degrees(s12_a12);
            (s12_a12.to_radians(), ssig12, csig12, 0.0)
        } else {
            // Interpret s12_a12 as distance
            let tau12 = s12_a12 / (self.b * (1.0 + self.a1m1));
            let s = libm::sin(tau12);
            let c = libm::cos(tau12);
            // tau2 = tau1 + tau12
            let b12 = -sin_cos_series(
                &self.c1pa,
                self.stau1 * c + self.ctau1 * s,
                self.ctau1 * c - self.stau1 * s,
            );
            let mut sig12 = tau12 - (b12 - self.b11);
            if libm::fabs(self.f) > MAX_REVERTED_SERIES_FLATTENING {
                // Correct sig12 with one Newton step
                let ssig12 = libm::sin(sig12);
                let csig12 = libm::cos(sig12);
                let ssig2 = self.ssig1 * csig12 + self.csig1 * ssig12;
                let csig2 = self.csig1 * csig12 - self.ssig1 * ssig12;
                let b12 = sin_cos_series(&self.c1a, ssig2, csig2);
                let serr = (1.0 + self.a1m1) * (sig12 + (b12 - self.b11)) - s12_a12 / self.b;
                sig12 -= serr / libm::sqrt(1.0 + self.k2 * ssig2 * ssig2);
            }
            (sig12, libm::sin(sig12), libm::cos(sig12), b12)
        };

        // sig2 = sig1 + sig12
        let ssig2 = self.ssig1 * csig12 + self.csig1 * ssig12;
        let mut csig2 = self.csig1 * csig12 - self.ssig1 * ssig12;
        let mut ab1 = 0.0;
        if outmask.intersects(Mask::DISTANCE | Mask::REDUCEDLENGTH | Mask::GEODESICSCALE) {
            if arcmode || libm::fabs(self.f) > MAX_REVERTED_SERIES_FLATTENING {
                b12 = sin_cos_series(&self.c1a, ssig2, csig2);
            }
            ab1 = (1.0 + self.a1m1) * (b12 - self.b11);
        }

        // sin(bet2) = cos(alp0) * sin(sig2)
        let sbet2 = self.calp0 * ssig2;
        let mut cbet2 = libm::hypot(self.salp0, self.calp0 * csig2);
        if cbet2 == 0.0 {
            // I.e., salp0 = 0, csig2 = 0.  Break the degeneracy in this case
            cbet2 = TINY;
            csig2 = TINY;
        }
        // tan(omg2) = sin(alp0) * tan(sig2)
        let somg2 = self.salp0 * ssig2;
        let comg2 = csig2;
        // tan(alp0) = cos(sig2) * tan(alp2)
        let salp2 = self.salp0;
        let calp2 = self.calp0 * csig2;

        data.lat1 = Degrees(self.lat1);
        data.lon1 = Degrees(self.lon1);
        data.azi1 = Degrees(self.azi1);
        data.a12 = Degrees(if arcmode {
            s12_a12
        } else {
            sig12.to_degrees()
        });

        if outmask.intersects(Mask::DISTANCE) {
            data.s12 = Metres(if arcmode {
                self.b * ((1.0 + self.a1m1) * sig12 + ab1)
            } else {
                s12_a12
            });
        }

        if outmask.intersects(Mask::LONGITUDE) {
            // omg12 = omg2 - omg1
            let omg12 = libm::atan2(
                somg2 * self.comg1 - comg2 * self.somg1,
                comg2 * self.comg1 + somg2 * self.somg1,
            );
            let lam12 = omg12
                + self.a3c * (sig12 + (sin_cos_series(&self.c3a, ssig2, csig2) - self.b31));
            let lon12 = lam12.to_degrees();
            // The longitude may have wrapped multiple times.
            let lon12 = lon12 - 360.0 * libm::floor(lon12 / 360.0 + 0.5);
            data.lon2 = Degrees(normalize_degrees(self.lon1 + lon12));
        }

        if outmask.intersects(Mask::LATITUDE) {
            data.lat2 = Degrees(calculate_geodetic_latitude(sbet2, cbet2, self.one_minus_f));
        }

        if outmask.intersects(Mask::AZIMUTH) {
            // minus signs give range [-180, 180). 0- converts -0 to +0.
            data.azi2 = Degrees(0.0 - libm::atan2(-salp2, calp2).to_degrees());
        }

        if outmask.intersects(Mask::REDUCEDLENGTH | Mask::GEODESICSCALE) {
            let ssig1sq = self.ssig1 * self.ssig1;
            let ssig2sq = ssig2 * ssig2;
            let w1 = libm::sqrt(1.0 + self.k2 * ssig1sq);
            let w2 = libm::sqrt(1.0 + self.k2 * ssig2sq);
            let b22 = sin_cos_series(&self.c2a, ssig2, csig2);
            let ab2 = (1.0 + self.a2m1) * (b22 - self.b21);
            let j12 = (self.a1m1 - self.a2m1) * sig12 + (ab1 - ab2);
            if outmask.intersects(Mask::REDUCEDLENGTH) {
                // The parentheses ensure accurate cancellation for
                // coincident points.
                data.m12 = Metres(
                    self.b
                        * ((w2 * (self.csig1 * ssig2) - w1 * (self.ssig1 * csig2))
                            - self.csig1 * csig2 * j12),
                );
            }
            if outmask.intersects(Mask::GEODESICSCALE) {
                let t = self.k2 * (ssig2sq - ssig1sq) / (w1 + w2);
                data.scale12 = csig12 + (t * ssig2 - csig2 * j12) * self.ssig1 / w1;
                data.scale21 = csig12 - (t * self.ssig1 - self.csig1 * j12) * ssig2 / w2;
            }
        }

        if outmask.intersects(Mask::AREA) {
            let b42 = cos_series(&self.c4a, ssig2, csig2);
            // alp12 = alp2 - alp1, used in atan2 so no need to normalize
            let mut salp12 = salp2 * self.calp1 - calp2 * self.salp1;
            let mut calp12 = calp2 * self.calp1 + salp2 * self.salp1;
            // The right thing appears to happen if alp1 = +/-180 and alp2 = 0,
            // viz salp12 = -0 and alp12 = -180.  However this depends on the
            // sign being attached to 0 correctly.
            if salp12 == 0.0 && calp12 < 0.0 {
                salp12 = TINY * self.calp1;
                calp12 = -1.0;
            }
            data.area12 =
                self.c2 * libm::atan2(salp12, calp12) + self.a4 * (b42 - self.b41);
        }

        data
    }

    /// Calculate the position and azimuth at a distance along the line.
    /// * `s12` - the distance from the start point, it may be negative.
    ///
    /// returns the latitude, longitude and azimuth at the position.
    #[must_use]
    pub fn position_at(&self, s12: Metres) -> (Degrees, Degrees, Degrees) {
        let data = self.position(
            false,
            s12.0,
            Mask::LATITUDE | Mask::LONGITUDE | Mask::AZIMUTH,
        );
        (data.lat2, data.lon2, data.azi2)
    }

    /// Calculate the values at an arc length along the line.
    /// * `a12` - the arc length from the start point on the auxiliary sphere.
    /// * `outmask` - the values to calculate.
    #[must_use]
    pub fn arc_position(&self, a12: Degrees, outmask: Mask) -> GeodesicData {
        self.position(true, a12.0, outmask)
    }
}

impl From<(&LatLong, Degrees)> for GeodesicLine {
    /// Construct a `GeodesicLine` on the WGS-84 `Ellipsoid` with all
    /// capabilities.
    /// * `params` - the start position and azimuth.
    fn from(params: (&LatLong, Degrees)) -> Self {
        Self::new(
            params.0.lat(),
            params.0.lon(),
            params.1,
            Mask::ALL,
            &crate::WGS84_ELLIPSOID,
        )
    }
}
