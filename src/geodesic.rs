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

//! The geodesic module contains functions for solving the inverse geodesic
//! problem on the auxiliary sphere, together with the types that hold the
//! results of direct and inverse geodesic calculations.
//!
//! The inverse problem is solved by finding the azimuth at the start point
//! that gives the required longitude difference on the ellipsoid.
//! It uses Newton's method, starting from a spherical estimate or, for nearly
//! antipodal points, from the solution of an astroid problem, see:
//! [Karney(2013)](https://link.springer.com/article/10.1007/s00190-012-0578-z)
//! *Algorithms for geodesics.*

#![allow(
    clippy::float_cmp,
    clippy::many_single_char_names,
    clippy::similar_names,
    clippy::suboptimal_flops,
    clippy::too_many_arguments,
    clippy::too_many_lines
)]

use crate::ellipsoid::coefficients::{
    evaluate_a1m1, evaluate_a2m1, evaluate_coeffs_c1, evaluate_coeffs_c2, cos_series,
    sin_cos_series,
};
use crate::ellipsoid::{
    calculate_epsilon, calculate_parametric_latitude, normalize_degrees, normalize_sin_cos,
    round_degrees, sin_cos_degrees, TINY, TOL0, TOL2,
};
use crate::{Degrees, Ellipsoid, LatLong, Mask, Metres};
use core::f64::consts::PI;

/// The number of iterations that may use Newton's method, after which the
/// inverse solution only bisects its bracket.
const MAX_NEWTON_ITERATIONS: u32 = 20;

/// The number of bisections that narrow the widest bracket below `TOLB`,
/// with a margin for the normalization of its midpoints.
const MAX_BISECTIONS: u32 = 100;

/// The maximum number of iterations of the inverse solution.
pub const MAX_ITERATIONS: u32 = MAX_NEWTON_ITERATIONS + MAX_BISECTIONS;

/// The astroid solution tolerance.
const TOL1: f64 = 200.0 * TOL0;
/// The bisection tolerance.
const TOLB: f64 = TOL0 * TOL2;
/// The threshold for the nearly antipodal cut.
const XTHRESH: f64 = 1000.0 * TOL2;

/// The results of a direct or inverse geodesic calculation.
///
/// Values that were not requested by the output `Mask` are NaN.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeodesicData {
    /// The start point latitude.
    pub lat1: Degrees,
    /// The start point longitude.
    pub lon1: Degrees,
    /// The azimuth at the start point.
    pub azi1: Degrees,
    /// The end point latitude.
    pub lat2: Degrees,
    /// The end point longitude.
    pub lon2: Degrees,
    /// The azimuth at the end point.
    pub azi2: Degrees,
    /// The geodesic distance between the points.
    pub s12: Metres,
    /// The arc length between the points on the auxiliary sphere.
    pub a12: Degrees,
    /// The reduced length of the geodesic.
    pub m12: Metres,
    /// The geodesic scale of the end point relative to the start point.
    pub scale12: f64,
    /// The geodesic scale of the start point relative to the end point.
    pub scale21: f64,
    /// The area between the geodesic and the equator in square metres.
    pub area12: f64,
}

impl GeodesicData {
    /// Construct a `GeodesicData` with all values NaN.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            lat1: Degrees(f64::NAN),
            lon1: Degrees(f64::NAN),
            azi1: Degrees(f64::NAN),
            lat2: Degrees(f64::NAN),
            lon2: Degrees(f64::NAN),
            azi2: Degrees(f64::NAN),
            s12: Metres(f64::NAN),
            a12: Degrees(f64::NAN),
            m12: Metres(f64::NAN),
            scale12: f64::NAN,
            scale21: f64::NAN,
            area12: f64::NAN,
        }
    }
}

impl Default for GeodesicData {
    fn default() -> Self {
        Self::new()
    }
}

/// The solution of an inverse geodesic calculation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InverseSolution {
    /// The geodesic between the points.
    pub data: GeodesicData,
    /// Whether the iteration converged.
    /// If not, the distances and arc length are negated and the azimuths
    /// are reversed.
    pub converged: bool,
    /// The number of iterations performed.
    pub iterations: u32,
}

/// Calculate Karney's `k`, the solution of the astroid problem:
///   k^4 + 2k^3 - (x^2 + y^2 - 1)k^2 - 2y^2k - y^2 = 0
/// for the positive root, see CFF Karney, Eq. 55.
/// * `x`, `y` - the scaled coordinates of the nearly antipodal end point.
///
/// returns k, zero when y is zero and x is inside the astroid.
#[must_use]
pub fn calculate_astroid(x: f64, y: f64) -> f64 {
    let p = x * x;
    let q = y * y;
    let r = (p + q - 1.0) / 6.0;

    // y = 0 with |x| <= 1
    if q == 0.0 && r <= 0.0 {
        return 0.0;
    }

    let s = p * q / 4.0;
    let r2 = r * r;
    let r3 = r * r2;
    // The discriminant of the quadratic equation for T3.
    // This is zero on the evolute curve p^(1/3)+q^(1/3) = 1
    let discriminant = s * (s + 2.0 * r3);
    let mut u = r;
    if discriminant >= 0.0 {
        let mut t3 = s + r3;
        // Pick the sign on the sqrt to maximize abs(T3), to minimise loss of
        // precision due to cancellation.
        t3 += if t3 < 0.0 {
            -libm::sqrt(discriminant)
        } else {
            libm::sqrt(discriminant)
        };
        // Take the real cube root
        let t = libm::cbrt(t3);
        // t can be zero; but then r2 / t -> 0.
        u += if t == 0.0 { 0.0 } else { t + r2 / t };
    } else {
        // T is complex, but the way u is defined the result is real.
        let angle = libm::atan2(libm::sqrt(-discriminant), -(s + r3));
        // There are three possible cube roots, choose the root which avoids
        // cancellation.  Note: discriminant < 0 implies r < 0.
        u += 2.0 * r * libm::cos(angle / 3.0);
    }

    // guaranteed positive
    let v = libm::sqrt(u * u + q);
    // avoid loss of accuracy when u < 0
    let uv = if u < 0.0 { q / (v - u) } else { u + v };
    let w = (uv - q) / (2.0 * v);

    uv / (libm::sqrt(uv + w * w) + w)
}

/// The lengths of a geodesic on the auxiliary sphere, scaled by b.
#[derive(Clone, Copy, Debug)]
struct Lengths {
    /// The distance.
    s12b: f64,
    /// The reduced length.
    m12b: f64,
    /// `A1 - A2`, the reduced length coefficient of the arc length.
    m0: f64,
    scale12: f64,
    scale21: f64,
}

/// Calculate the distance, reduced length and geodesic scales of a geodesic
/// between a pair of points on the auxiliary sphere.
/// See CFF Karney, Eqs. 38, 39 and 40.
/// * `eps` - epsilon the integration variable derived from Clairaut's constant.
/// * `sig12` - the arc length between the points.
/// * `ssig1`, `csig1` - the sine and cosine of the arc length of the start point.
/// * `dn1` - the start point `sqrt(1 + ep2 sin^2 beta)`.
/// * `ssig2`, `csig2`, `dn2` - the corresponding values at the end point.
/// * `cbet1`, `cbet2` - the cosines of the parametric latitudes.
/// * `ep_2` - the square of the second eccentricity.
#[must_use]
fn calculate_lengths(
    eps: f64,
    sig12: f64,
    ssig1: f64,
    csig1: f64,
    dn1: f64,
    ssig2: f64,
    csig2: f64,
    dn2: f64,
    cbet1: f64,
    cbet2: f64,
    ep_2: f64,
) -> Lengths {
    let a1 = evaluate_a1m1(eps);
    let c1 = evaluate_coeffs_c1(eps);
    let a2 = evaluate_a2m1(eps);
    let c2 = evaluate_coeffs_c2(eps);
    let m0 = a1 - a2;
    let a1 = 1.0 + a1;
    let a2 = 1.0 + a2;

    let b1 = sin_cos_series(&c1, ssig2, csig2) - sin_cos_series(&c1, ssig1, csig1);
    let b2 = sin_cos_series(&c2, ssig2, csig2) - sin_cos_series(&c2, ssig1, csig1);
    let j12 = m0 * sig12 + (a1 * b1 - a2 * b2);

    // The parentheses ensure accurate cancellation for coincident points.
    let m12b = dn2 * (csig1 * ssig2) - dn1 * (ssig1 * csig2) - csig1 * csig2 * j12;

    let csig12 = csig1 * csig2 + ssig1 * ssig2;
    let t = ep_2 * (cbet1 - cbet2) * (cbet1 + cbet2) / (dn1 + dn2);

    Lengths {
        s12b: a1 * (sig12 + b1),
        m12b,
        m0,
        scale12: csig12 + (t * ssig2 - csig2 * j12) * ssig1 / dn1,
        scale21: csig12 - (t * ssig1 - csig1 * j12) * ssig2 / dn2,
    }
}

/// The first estimate of the azimuths of an inverse geodesic.
#[derive(Clone, Copy, Debug)]
struct InitialEstimate {
    /// The arc length of a short line, negative if the line requires
    /// iteration.
    sig12: f64,
    salp1: f64,
    calp1: f64,
    /// The end point azimuth of a short line.
    salp2: f64,
    calp2: f64,
    /// The mean `sqrt(1 + ep2 sin^2 beta)` of a short line.
    dnm: f64,
}

/// Estimate the start azimuth of an inverse geodesic on the auxiliary sphere.
/// Short lines are solved directly, nearly antipodal points use the
/// solution of the astroid problem, see CFF Karney, Section 5.
/// * `sbet1`, `cbet1`, `dn1` - the start point parametric latitude values.
/// * `sbet2`, `cbet2`, `dn2` - the end point parametric latitude values.
/// * `lam12`, `slam12`, `clam12` - the longitude difference and its sine and
///   cosine.
#[must_use]
fn estimate_initial_azimuth(
    sbet1: f64,
    cbet1: f64,
    dn1: f64,
    sbet2: f64,
    cbet2: f64,
    dn2: f64,
    lam12: f64,
    slam12: f64,
    clam12: f64,
    ellipsoid: &Ellipsoid,
) -> InitialEstimate {
    let f = ellipsoid.f();
    let n = ellipsoid.n();

    let mut estimate = InitialEstimate {
        sig12: -1.0,
        salp1: 0.0,
        calp1: 0.0,
        salp2: f64::NAN,
        calp2: f64::NAN,
        dnm: f64::NAN,
    };

    // sin and cos of bet2 - bet1 and bet2 + bet1
    let sbet12 = sbet2 * cbet1 - cbet2 * sbet1;
    let cbet12 = cbet2 * cbet1 + sbet2 * sbet1;
    let sbet12a = sbet2 * cbet1 + cbet2 * sbet1;

    let shortline = cbet12 >= 0.0 && sbet12 < 0.5 && cbet2 * lam12 < 0.5;
    let (somg12, comg12) = if shortline {
        let mut sbetm2 = (sbet1 + sbet2) * (sbet1 + sbet2);
        // sin(betm)^2 = (sbet1 + sbet2)^2 / ((sbet1 + sbet2)^2 + (cbet1 + cbet2)^2)
        sbetm2 /= sbetm2 + (cbet1 + cbet2) * (cbet1 + cbet2);
        estimate.dnm = libm::sqrt(1.0 + ellipsoid.ep_2() * sbetm2);
        let omg12 = lam12 / (ellipsoid.one_minus_f() * estimate.dnm);
        (libm::sin(omg12), libm::cos(omg12))
    } else {
        (slam12, clam12)
    };

    let mut salp1 = cbet2 * somg12;
    let mut calp1 = if comg12 >= 0.0 {
        sbet12 + cbet2 * sbet1 * somg12 * somg12 / (1.0 + comg12)
    } else {
        sbet12a - cbet2 * sbet1 * somg12 * somg12 / (1.0 - comg12)
    };

    let ssig12 = libm::hypot(salp1, calp1);
    let csig12 = sbet1 * sbet2 + cbet1 * cbet2 * comg12;

    if shortline && ssig12 < ellipsoid.etol2() {
        // really short lines
        let salp2 = cbet1 * somg12;
        let calp2 = sbet12
            - cbet1
                * sbet2
                * if comg12 >= 0.0 {
                    somg12 * somg12 / (1.0 + comg12)
                } else {
                    1.0 - comg12
                };
        (estimate.salp2, estimate.calp2) = normalize_sin_cos(salp2, calp2);
        estimate.sig12 = libm::atan2(ssig12, csig12);
    } else if libm::fabs(n) > 0.1
        || csig12 >= 0.0
        || ssig12 >= 6.0 * libm::fabs(n) * PI * cbet1 * cbet1
    {
        // Nothing to do, the zeroth order spherical approximation is fine
    } else {
        // Scale lam12 and bet2 to x, y coordinates where the antipodal point
        // is at the origin and the singular point is at y = 0, x = -1
        let lam12x = libm::atan2(-slam12, -clam12);
        let (x, y, lamscale) = if f >= 0.0 {
            // In fact f == 0 does not get here
            let k2 = sbet1 * sbet1 * ellipsoid.ep_2();
            let eps = calculate_epsilon(k2);
            let lamscale = f * cbet1 * ellipsoid.a3f(eps) * PI;
            let betscale = lamscale * cbet1;
            (lam12x / lamscale, sbet12a / betscale, lamscale)
        } else {
            // f < 0: the x and y coordinates are swapped
            let cbet12a = cbet2 * cbet1 - sbet2 * sbet1;
            let bet12a = libm::atan2(sbet12a, cbet12a);
            let lengths = calculate_lengths(
                n,
                PI + bet12a,
                sbet1,
                -cbet1,
                dn1,
                sbet2,
                cbet2,
                dn2,
                cbet1,
                cbet2,
                ellipsoid.ep_2(),
            );
            let x = -1.0 + lengths.m12b / (cbet1 * cbet2 * lengths.m0 * PI);
            let betscale = if x < -0.01 {
                sbet12a / x
            } else {
                -f * cbet1 * cbet1 * PI
            };
            let lamscale = betscale / cbet1;
            (x, lam12x / lamscale, lamscale)
        };

        if y > -TOL1 && x > -1.0 - XTHRESH {
            // strip near cut
            if f >= 0.0 {
                salp1 = (-x).min(1.0);
                calp1 = -libm::sqrt(1.0 - salp1 * salp1);
            } else {
                calp1 = x.max(if x > -TOL1 { 0.0 } else { -1.0 });
                salp1 = libm::sqrt(1.0 - calp1 * calp1);
            }
        } else {
            let k = calculate_astroid(x, y);
            let omg12a = lamscale
                * if f >= 0.0 {
                    -x * k / (1.0 + k)
                } else {
                    -y * (1.0 + k) / k
                };
            let somg12 = libm::sin(omg12a);
            let comg12 = -libm::cos(omg12a);
            // Update spherical estimate of alp1 using omg12 instead of lam12
            salp1 = cbet2 * somg12;
            calp1 = sbet12a - cbet2 * sbet1 * somg12 * somg12 / (1.0 - comg12);
        }
    }

    // Sanity check on starting guess
    if salp1 > 0.0 {
        (estimate.salp1, estimate.calp1) = normalize_sin_cos(salp1, calp1);
    } else {
        estimate.salp1 = 1.0;
        estimate.calp1 = 0.0;
    }
    estimate
}

/// The longitude difference on the ellipsoid of a trial start azimuth.
#[derive(Clone, Copy, Debug)]
struct Lambda12 {
    lam12: f64,
    salp2: f64,
    calp2: f64,
    sig12: f64,
    ssig1: f64,
    csig1: f64,
    ssig2: f64,
    csig2: f64,
    eps: f64,
    /// The difference between the ellipsoid and auxiliary sphere longitudes.
    domg12: f64,
    /// The derivative of lam12 with respect to the start azimuth.
    dlam12: f64,
}

/// Calculate the longitude difference on the ellipsoid of a geodesic from a
/// start point with azimuth alpha1 to the latitude of the end point.
/// See CFF Karney, Eqs. 5, 6, 7 and 8.
/// * `sbet1`, `cbet1`, `dn1` - the start point parametric latitude values.
/// * `sbet2`, `cbet2`, `dn2` - the end point parametric latitude values.
/// * `salp1`, `calp1` - the sine and cosine of the trial start azimuth.
/// * `diffp` - whether to calculate the derivative for Newton's method.
#[must_use]
fn calculate_lambda12(
    sbet1: f64,
    cbet1: f64,
    dn1: f64,
    sbet2: f64,
    cbet2: f64,
    dn2: f64,
    salp1: f64,
    calp1: f64,
    diffp: bool,
    ellipsoid: &Ellipsoid,
) -> Lambda12 {
    // Break degeneracy of equatorial line.
    let calp1 = if sbet1 == 0.0 && calp1 == 0.0 {
        -TINY
    } else {
        calp1
    };

    // sin(alp1) * cos(bet1) = sin(alp0)
    let salp0 = salp1 * cbet1;
    // calp0 > 0
    let calp0 = libm::hypot(calp1, salp1 * sbet1);

    // tan(bet1) = tan(sig1) * cos(alp1)
    // tan(omg1) = sin(alp0) * tan(sig1) = tan(omg1)=tan(alp1)*sin(bet1)
    let somg1 = salp0 * sbet1;
    let comg1 = calp1 * cbet1;
    let (ssig1, csig1) = normalize_sin_cos(sbet1, comg1);

    // Enforce symmetries in the case abs(bet2) = -bet1.
    let salp2 = if cbet2 == cbet1 { salp1 } else { salp0 / cbet2 };
    // calp2 = sqrt(1 - sq(salp2))
    //       = sqrt(sq(calp0) - sq(sbet2)) / cbet2
    // and subst for calp0 and rearrange to give (choose positive sqrt
    // to give alp2 in [0, pi/2]).
    let calp2 = if cbet2 != cbet1 || libm::fabs(sbet2) != -sbet1 {
        libm::sqrt(
            (calp1 * cbet1) * (calp1 * cbet1)
                + if cbet1 < -sbet1 {
                    (cbet2 - cbet1) * (cbet1 + cbet2)
                } else {
                    (sbet1 - sbet2) * (sbet1 + sbet2)
                },
        ) / cbet2
    } else {
        libm::fabs(calp1)
    };

    // tan(bet2) = tan(sig2) * cos(alp2)
    // tan(omg2) = sin(alp0) * tan(sig2).
    let somg2 = salp0 * sbet2;
    let comg2 = calp2 * cbet2;
    let (ssig2, csig2) = normalize_sin_cos(sbet2, comg2);

    // sig12 = sig2 - sig1, limit to [0, pi]
    let sig12 = libm::atan2(
        (csig1 * ssig2 - ssig1 * csig2).max(0.0),
        csig1 * csig2 + ssig1 * ssig2,
    );
    // omg12 = omg2 - omg1, limit to [0, pi]
    let omg12 = libm::atan2(
        (comg1 * somg2 - somg1 * comg2).max(0.0),
        comg1 * comg2 + somg1 * somg2,
    );

    let k2 = calp0 * calp0 * ellipsoid.ep_2();
    let eps = calculate_epsilon(k2);
    let c3 = ellipsoid.c3f(eps);
    let b312 = sin_cos_series(&c3, ssig2, csig2) - sin_cos_series(&c3, ssig1, csig1);
    let domg12 = -ellipsoid.f() * ellipsoid.a3f(eps) * salp0 * (sig12 + b312);

    let dlam12 = if diffp {
        if calp2 == 0.0 {
            -2.0 * ellipsoid.one_minus_f() * dn1 / sbet1
        } else {
            let lengths = calculate_lengths(
                eps,
                sig12,
                ssig1,
                csig1,
                dn1,
                ssig2,
                csig2,
                dn2,
                cbet1,
                cbet2,
                ellipsoid.ep_2(),
            );
            lengths.m12b * ellipsoid.one_minus_f() / (calp2 * cbet2)
        }
    } else {
        f64::NAN
    };

    Lambda12 {
        lam12: omg12 + domg12,
        salp2,
        calp2,
        sig12,
        ssig1,
        csig1,
        ssig2,
        csig2,
        eps,
        domg12,
        dlam12,
    }
}

/// Solve the inverse geodesic problem between a pair of points with a limit
/// on the number of iterations.
/// * `lat1`, `lon1` - the start point latitude and longitude in degrees.
/// * `lat2`, `lon2` - the end point latitude and longitude in degrees.
/// * `outmask` - the values to calculate.
/// * `max_iterations` - the maximum number of iterations.
///
/// returns the `InverseSolution` between the points.
#[must_use]
pub fn solve_inverse_with_max_iterations(
    lat1: f64,
    lon1: f64,
    lat2: f64,
    lon2: f64,
    outmask: Mask,
    max_iterations: u32,
    ellipsoid: &Ellipsoid,
) -> InverseSolution {
    let outmask = outmask.outputs();
    let f = ellipsoid.f();
    let f1 = ellipsoid.one_minus_f();
    let b = ellipsoid.b().0;
    let ep_2 = ellipsoid.ep_2();

    // Compute longitude difference in [0, 180] and remember its sign.
    let lon12 = round_degrees(normalize_degrees(
        normalize_degrees(lon2) - normalize_degrees(lon1),
    ));
    let mut lonsign = if lon12 >= 0.0 { 1.0 } else { -1.0 };
    let lon12 = lon12 * lonsign;

    // Swap points so that the point with the higher (abs) latitude is
    // point 1, then make lat1 <= 0.
    let mut phi1 = round_degrees(lat1);
    let mut phi2 = round_degrees(lat2);
    let swapp = if libm::fabs(phi1) >= libm::fabs(phi2) {
        1.0
    } else {
        -1.0
    };
    if swapp < 0.0 {
        lonsign = -lonsign;
        core::mem::swap(&mut phi1, &mut phi2);
    }
    let latsign = if phi1 < 0.0 { 1.0 } else { -1.0 };
    phi1 *= latsign;
    phi2 *= latsign;

    let (sbet1, cbet1) = calculate_parametric_latitude(phi1, f1);
    let (mut sbet2, mut cbet2) = calculate_parametric_latitude(phi2, f1);

    // If cbet1 < -sbet1, then cbet2 - cbet1 is a sensitive measure of the
    // |bet1| - |bet2|.  Alternatively (cbet1 >= -sbet1), abs(sbet2) + sbet1
    // is a better measure.
    if cbet1 < -sbet1 {
        if cbet2 == cbet1 {
            sbet2 = if sbet2 < 0.0 { sbet1 } else { -sbet1 };
        }
    } else if libm::fabs(sbet2) == -sbet1 {
        cbet2 = cbet1;
    }

    let dn1 = libm::sqrt(1.0 + ep_2 * sbet1 * sbet1);
    let dn2 = libm::sqrt(1.0 + ep_2 * sbet2 * sbet2);

    let lam12 = lon12.to_radians();
    let (slam12, clam12) = sin_cos_degrees(lon12);

    let mut salp1 = 0.0;
    let mut calp1 = 1.0;
    let mut salp2 = 0.0;
    let mut calp2 = 1.0;
    let mut s12x = f64::NAN;
    let mut m12x = f64::NAN;
    let mut a12 = f64::NAN;
    let mut scale12 = f64::NAN;
    let mut scale21 = f64::NAN;
    // The longitude difference on the auxiliary sphere, NaN for meridians.
    let mut omg12 = f64::NAN;
    let mut converged = true;
    let mut iterations = 0;

    let mut meridian = phi1 == -90.0 || slam12 == 0.0;
    if meridian {
        // Endpoints are on a single full meridian, so the geodesic might lie
        // on a meridian.
        calp1 = clam12;
        salp1 = slam12;

        // tan(bet) = tan(sig) * cos(alp)
        let ssig1 = sbet1;
        let csig1 = calp1 * cbet1;
        let ssig2 = sbet2;
        let csig2 = calp2 * cbet2;

        // sig12 = sig2 - sig1
        let mut sig12 = libm::atan2(
            (csig1 * ssig2 - ssig1 * csig2).max(0.0),
            csig1 * csig2 + ssig1 * ssig2,
        );
        let lengths = calculate_lengths(
            ellipsoid.n(),
            sig12,
            ssig1,
            csig1,
            dn1,
            ssig2,
            csig2,
            dn2,
            cbet1,
            cbet2,
            ep_2,
        );

        // Add the check for sig12 since zero length geodesics might yield
        // m12 < 0.  Test case was
        //
        //    echo 20.001 0 20.001 0 | GeodSolve -i
        if sig12 < 1.0 || lengths.m12b >= 0.0 {
            let mut s12b = lengths.s12b;
            let mut m12b = lengths.m12b;
            // Prevent negative s12 or m12 for short lines
            if sig12 < 3.0 * TINY || (sig12 < TOL0 && (s12b < 0.0 || m12b < 0.0)) {
                sig12 = 0.0;
                s12b = 0.0;
                m12b = 0.0;
            }
            s12x = s12b * b;
            m12x = m12b * b;
            a12 = sig12.to_degrees();
            scale12 = lengths.scale12;
            scale21 = lengths.scale21;
        } else {
            // m12 < 0, i.e., prolate and too close to anti-podal
            meridian = false;
        }
    }

    if !meridian && sbet1 == 0.0 && (f <= 0.0 || lon12 <= 180.0 - f * 180.0) {
        // Geodesic runs along equator
        calp1 = 0.0;
        calp2 = 0.0;
        salp1 = 1.0;
        salp2 = 1.0;
        s12x = ellipsoid.a().0 * lam12;
        let sig12 = lam12 / f1;
        omg12 = sig12;
        m12x = b * libm::sin(sig12);
        scale12 = libm::cos(sig12);
        scale21 = scale12;
        a12 = lon12 / f1;
    } else if !meridian {
        let estimate = estimate_initial_azimuth(
            sbet1, cbet1, dn1, sbet2, cbet2, dn2, lam12, slam12, clam12, ellipsoid,
        );
        salp1 = estimate.salp1;
        calp1 = estimate.calp1;

        if estimate.sig12 >= 0.0 {
            // Short line, the estimate is the solution.
            let sig12 = estimate.sig12;
            let dnm = estimate.dnm;
            salp2 = estimate.salp2;
            calp2 = estimate.calp2;
            s12x = sig12 * b * dnm;
            m12x = dnm * dnm * b * libm::sin(sig12 / dnm);
            scale12 = 1.0;
            scale21 = 1.0;
            a12 = sig12.to_degrees();
            omg12 = lam12 / (f1 * dnm);
        } else {
            // Newton's method, bracketed by the azimuths of a pair of
            // points where v > 0 and v < 0.
            let mut salp1a = TINY;
            let mut calp1a = 1.0;
            let mut salp1b = TINY;
            let mut calp1b = -1.0;
            let mut tripn = false;
            let mut tripb = false;
            converged = false;

            let mut lambda;
            loop {
                let newton = iterations < MAX_NEWTON_ITERATIONS;
                lambda = calculate_lambda12(
                    sbet1, cbet1, dn1, sbet2, cbet2, dn2, salp1, calp1, newton, ellipsoid,
                );
                let v = lambda.lam12 - lam12;

                // Reversed test to allow escape with NaNs
                if tripb || !(libm::fabs(v) >= (if tripn { 8.0 } else { 2.0 }) * TOL0) {
                    converged = true;
                    break;
                }
                if iterations >= max_iterations {
                    break;
                }
                iterations += 1;

                // Update bracketing values
                if v > 0.0 && (!newton || calp1 / salp1 > calp1b / salp1b) {
                    salp1b = salp1;
                    calp1b = calp1;
                } else if v < 0.0 && (!newton || calp1 / salp1 < calp1a / salp1a) {
                    salp1a = salp1;
                    calp1a = calp1;
                }

                if newton && lambda.dlam12 > 0.0 {
                    let dalp1 = -v / lambda.dlam12;
                    if libm::fabs(dalp1) < PI {
                        let sdalp1 = libm::sin(dalp1);
                        let cdalp1 = libm::cos(dalp1);
                        let nsalp1 = salp1 * cdalp1 + calp1 * sdalp1;
                        if nsalp1 > 0.0 {
                            calp1 = calp1 * cdalp1 - salp1 * sdalp1;
                            (salp1, calp1) = normalize_sin_cos(nsalp1, calp1);
                            // In some regimes a Newton step moves v by more
                            // than when a bisection step is taken.
                            tripn = libm::fabs(v) <= 16.0 * TOL0;
                            continue;
                        }
                    }
                }

                // Either dlam12 <= 0, the Newton step leaves alp1 in
                // [0, pi], or Newton's method has run out of iterations:
                // bisect the bracket.
                (salp1, calp1) =
                    normalize_sin_cos((salp1a + salp1b) / 2.0, (calp1a + calp1b) / 2.0);
                tripn = false;
                tripb = libm::fabs(salp1a - salp1) + (calp1a - calp1) < TOLB
                    || libm::fabs(salp1 - salp1b) + (calp1 - calp1b) < TOLB;
            }

            salp2 = lambda.salp2;
            calp2 = lambda.calp2;
            let lengths = calculate_lengths(
                lambda.eps,
                lambda.sig12,
                lambda.ssig1,
                lambda.csig1,
                dn1,
                lambda.ssig2,
                lambda.csig2,
                dn2,
                cbet1,
                cbet2,
                ep_2,
            );
            s12x = lengths.s12b * b;
            m12x = lengths.m12b * b;
            scale12 = lengths.scale12;
            scale21 = lengths.scale21;
            a12 = lambda.sig12.to_degrees();
            omg12 = lam12 - lambda.domg12;
        }
    }

    let mut area12 = f64::NAN;
    if outmask.intersects(Mask::AREA) {
        // From Lambda12: sin(alp1) * cos(bet1) = sin(alp0)
        let salp0 = salp1 * cbet1;
        let calp0 = libm::hypot(calp1, salp1 * sbet1);
        let mut s12 = if calp0 != 0.0 && salp0 != 0.0 {
            // From Lambda12: tan(bet) = tan(sig) * cos(alp)
            let (ssig1, csig1) = normalize_sin_cos(sbet1, calp1 * cbet1);
            let (ssig2, csig2) = normalize_sin_cos(sbet2, calp2 * cbet2);
            let k2 = calp0 * calp0 * ep_2;
            let eps = calculate_epsilon(k2);
            let a = ellipsoid.a().0;
            // Multiplier = a^2 * e^2 * cos(alpha0) * sin(alpha0).
            let a4 = a * a * calp0 * salp0 * ellipsoid.e_2();
            let c4 = ellipsoid.c4f(eps);
            let b41 = cos_series(&c4, ssig1, csig1);
            let b42 = cos_series(&c4, ssig2, csig2);
            a4 * (b42 - b41)
        } else {
            // Avoid problems with indeterminate sig1, sig2 on equator
            0.0
        };

        let somg12 = libm::sin(omg12);
        let comg12 = libm::cos(omg12);
        let alp12 = if !meridian && comg12 > -0.7071 && sbet2 - sbet1 < 1.75 {
            // Use tan(Gamma/2) = tan(omg12/2)
            // * (tan(bet1/2)+tan(bet2/2))/(1+tan(bet1/2)*tan(bet2/2))
            // with tan(x/2) = sin(x)/(1+cos(x))
            let domg12 = 1.0 + comg12;
            let dbet1 = 1.0 + cbet1;
            let dbet2 = 1.0 + cbet2;
            2.0 * libm::atan2(
                somg12 * (sbet1 * dbet2 + sbet2 * dbet1),
                domg12 * (sbet1 * sbet2 + dbet1 * dbet2),
            )
        } else {
            // alp12 = alp2 - alp1, used in atan2 so no need to normalize
            let mut salp12 = salp2 * calp1 - calp2 * salp1;
            let mut calp12 = calp2 * calp1 + salp2 * salp1;
            // The right thing appears to happen if alp1 = +/-180 and alp2 = 0,
            // viz salp12 = -0 and alp12 = -180.  However this depends on the
            // sign being attached to 0 correctly.
            if salp12 == 0.0 && calp12 < 0.0 {
                salp12 = TINY * calp1;
                calp12 = -1.0;
            }
            libm::atan2(salp12, calp12)
        };
        s12 += ellipsoid.c2() * alp12;
        // Convert -0 to 0
        area12 = s12 * swapp * lonsign * latsign + 0.0;
    }

    // Convert calp, salp to azimuth accounting for lonsign, swapp, latsign.
    if swapp < 0.0 {
        core::mem::swap(&mut salp1, &mut salp2);
        core::mem::swap(&mut calp1, &mut calp2);
        core::mem::swap(&mut scale12, &mut scale21);
    }
    salp1 *= swapp * lonsign;
    calp1 *= swapp * latsign;
    salp2 *= swapp * lonsign;
    calp2 *= swapp * latsign;

    if !converged {
        // Mark the result: negative lengths and reversed azimuths
        s12x = -s12x;
        m12x = -m12x;
        a12 = -a12;
        salp1 = -salp1;
        calp1 = -calp1;
        salp2 = -salp2;
        calp2 = -calp2;
    }

    let mut data = GeodesicData::new();
    data.lat1 = Degrees(lat1);
    data.lon1 = Degrees(lon1);
    data.lat2 = Degrees(lat2);
    data.lon2 = Degrees(lon2);
    data.a12 = Degrees(a12);
    if outmask.intersects(Mask::DISTANCE) {
        data.s12 = Metres(s12x + 0.0);
    }
    if outmask.intersects(Mask::AZIMUTH) {
        // minus signs give range [-180, 180). 0- converts -0 to +0.
        data.azi1 = Degrees(0.0 - libm::atan2(-salp1, calp1).to_degrees());
        data.azi2 = Degrees(0.0 - libm::atan2(-salp2, calp2).to_degrees());
    }
    if outmask.intersects(Mask::REDUCEDLENGTH) {
        data.m12 = Metres(m12x + 0.0);
    }
    if outmask.intersects(Mask::GEODESICSCALE) {
        data.scale12 = scale12;
        data.scale21 = scale21;
    }
    data.area12 = area12;

    InverseSolution {
        data,
        converged,
        iterations,
    }
}

/// Calculate the azimuths and geodesic length (in metres) between a pair
/// of positions on the ellipsoid.
/// * `a`, `b` - the start and finish positions in geodetic coordinates.
/// * `ellipsoid` - the `Ellipsoid`.
///
/// returns the start azimuth, geodesic length and end azimuth.
/// # Examples
/// ```
/// use angle_sc::{is_within_tolerance, Degrees};
/// use geodesic_wgs84::geodesic::calculate_azimuths_and_geodesic_length;
/// use geodesic_wgs84::{LatLong, WGS84_ELLIPSOID};
///
/// let istanbul = LatLong::new(Degrees(42.0), Degrees(29.0));
/// let washington = LatLong::new(Degrees(39.0), Degrees(-77.0));
///
/// let (azi1, length, _azi2) =
///     calculate_azimuths_and_geodesic_length(&istanbul, &washington, &WGS84_ELLIPSOID);
/// assert!(is_within_tolerance(-50.69375304113997, azi1.0, 1e-9));
/// assert!(is_within_tolerance(8_339_863.136_005_359, length.0, 1e-5));
/// ```
#[must_use]
pub fn calculate_azimuths_and_geodesic_length(
    a: &LatLong,
    b: &LatLong,
    ellipsoid: &Ellipsoid,
) -> (Degrees, Metres, Degrees) {
    let solution = solve_inverse_with_max_iterations(
        a.lat().0,
        a.lon().0,
        b.lat().0,
        b.lon().0,
        Mask::DISTANCE | Mask::AZIMUTH,
        MAX_ITERATIONS,
        ellipsoid,
    );
    (solution.data.azi1, solution.data.s12, solution.data.azi2)
}
