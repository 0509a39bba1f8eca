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

//! This module contains the series coefficients and functions for performing
//! geodesic calculations on the surface of an ellipsoid.
//!
//! It uses the equations given by CFF Karney in
//! [Algorithms for geodesics](https://arxiv.org/pdf/1109.4448.pdf).
//!
//! The coefficients are held in compact tables for a sixth order expansion:
//! each polynomial is stored as its numerators, highest power first,
//! followed by its denominator.
//! Lower order expansions are evaluated by ignoring the highest power
//! terms of each polynomial.

#![allow(clippy::suboptimal_flops)]

/// The order of the series expansions used by the geodesic calculations.
#[cfg(not(feature = "low-precision"))]
pub const GEODESIC_ORDER: usize = 6;

/// The order of the series expansions used by the geodesic calculations.
#[cfg(feature = "low-precision")]
pub const GEODESIC_ORDER: usize = 3;

/// The number of `C3x` coefficients of an ellipsoid.
pub const NC3X: usize = GEODESIC_ORDER * (GEODESIC_ORDER - 1) / 2;

/// The number of `C4x` coefficients of an ellipsoid.
pub const NC4X: usize = GEODESIC_ORDER * (GEODESIC_ORDER + 1) / 2;

/// The order of the compact coefficient tables.
const TABLE_ORDER: usize = 6;

/// `A1 - 1`, a polynomial in eps^2.
const COEFF_A1M1: [f64; 5] = [1.0, 4.0, 64.0, 0.0, 256.0];

/// `A2 - 1`, a polynomial in eps^2.
const COEFF_A2M1: [f64; 5] = [-11.0, -28.0, -192.0, 0.0, 256.0];

/// `C1[l]`, polynomials in eps^2.
const COEFF_C1: [f64; 18] = [
    -1.0, 6.0, -16.0, 32.0, // C1[1]
    -9.0, 64.0, -128.0, 2048.0, // C1[2]
    9.0, -16.0, 768.0, // C1[3]
    3.0, -5.0, 512.0, // C1[4]
    -7.0, 1280.0, // C1[5]
    -7.0, 2048.0, // C1[6]
];

/// `C1p[l]`, polynomials in eps^2.
const COEFF_C1P: [f64; 18] = [
    205.0, -432.0, 768.0, 1536.0, // C1p[1]
    4005.0, -4736.0, 3840.0, 12288.0, // C1p[2]
    -225.0, 116.0, 384.0, // C1p[3]
    -7173.0, 2695.0, 7680.0, // C1p[4]
    3467.0, 7680.0, // C1p[5]
    38081.0, 61440.0, // C1p[6]
];

/// `C2[l]`, polynomials in eps^2.
const COEFF_C2: [f64; 18] = [
    1.0, 2.0, 16.0, 32.0, // C2[1]
    35.0, 64.0, 384.0, 2048.0, // C2[2]
    15.0, 80.0, 768.0, // C2[3]
    7.0, 35.0, 512.0, // C2[4]
    63.0, 1280.0, // C2[5]
    77.0, 2048.0, // C2[6]
];

/// The coefficients of eps^j in `A3`, for j from 5 down to 0,
/// as polynomials in n.
const COEFF_A3: [f64; 18] = [
    -3.0, 128.0, // eps^5
    -2.0, -3.0, 64.0, // eps^4
    -1.0, -3.0, -1.0, 16.0, // eps^3
    3.0, -1.0, -2.0, 8.0, // eps^2
    1.0, -1.0, 2.0, // eps^1
    1.0, 1.0, // eps^0
];

/// The coefficients of eps^j in `C3[l]`, for l from 1 to 5 and j from 5
/// down to l, as polynomials in n.
const COEFF_C3: [f64; 45] = [
    3.0, 128.0, // C3[1], eps^5
    2.0, 5.0, 128.0, // C3[1], eps^4
    -1.0, 3.0, 3.0, 64.0, // C3[1], eps^3
    -1.0, 0.0, 1.0, 8.0, // C3[1], eps^2
    -1.0, 1.0, 4.0, // C3[1], eps^1
    5.0, 256.0, // C3[2], eps^5
    1.0, 3.0, 128.0, // C3[2], eps^4
    -3.0, -2.0, 3.0, 64.0, // C3[2], eps^3
    1.0, -3.0, 2.0, 32.0, // C3[2], eps^2
    7.0, 512.0, // C3[3], eps^5
    -10.0, 9.0, 384.0, // C3[3], eps^4
    5.0, -9.0, 5.0, 192.0, // C3[3], eps^3
    7.0, 512.0, // C3[4], eps^5
    -14.0, 7.0, 512.0, // C3[4], eps^4
    21.0, 2560.0, // C3[5], eps^5
];

/// The coefficients of eps^j in `C4[l]`, for l from 0 to 5 and j from 5
/// down to l, as polynomials in n.
const COEFF_C4: [f64; 77] = [
    97.0, 15015.0, // C4[0], eps^5
    1088.0, 156.0, 45045.0, // C4[0], eps^4
    -224.0, -4784.0, 1573.0, 45045.0, // C4[0], eps^3
    -10656.0, 14144.0, -4576.0, -858.0, 45045.0, // C4[0], eps^2
    64.0, 624.0, -4576.0, 6864.0, -3003.0, 15015.0, // C4[0], eps^1
    100.0, 208.0, 572.0, 3432.0, -12012.0, 30030.0, 45045.0, // C4[0], eps^0
    1.0, 9009.0, // C4[1], eps^5
    -2944.0, 468.0, 135_135.0, // C4[1], eps^4
    5792.0, 1040.0, -1287.0, 135_135.0, // C4[1], eps^3
    5952.0, -11648.0, 9152.0, -2574.0, 135_135.0, // C4[1], eps^2
    -64.0, -624.0, 4576.0, -6864.0, 3003.0, 135_135.0, // C4[1], eps^1
    8.0, 10725.0, // C4[2], eps^5
    1856.0, -936.0, 225_225.0, // C4[2], eps^4
    -8448.0, 4992.0, -1144.0, 225_225.0, // C4[2], eps^3
    -1440.0, 4160.0, -4576.0, 1716.0, 225_225.0, // C4[2], eps^2
    -136.0, 63063.0, // C4[3], eps^5
    1024.0, -208.0, 105_105.0, // C4[3], eps^4
    3584.0, -3328.0, 1144.0, 315_315.0, // C4[3], eps^3
    -128.0, 135_135.0, // C4[4], eps^5
    -2560.0, 832.0, 405_405.0, // C4[4], eps^4
    128.0, 99099.0, // C4[5], eps^5
];

/// Evaluate a polynomial block of a compact table, truncated to
/// degree `m`.
/// * `block` - the numerators, highest power first, then the denominator.
/// * `m` - the degree of the truncated polynomial.
/// * `x` - the variable.
#[must_use]
fn evaluate_block(block: &[f64], m: usize, x: f64) -> f64 {
    let end = block.len() - 1;
    block[end - m - 1..end]
        .iter()
        .fold(0.0, |acc, &coeff| acc * x + coeff)
        / block[end]
}

/// Evaluate the coefficients of a Fourier series in eps from a compact table
/// of polynomials in eps^2.
/// * `table` - the compact table of `C1`, `C1p` or `C2`.
/// * `eps` - epsilon the integration variable derived from Clairaut's constant.
#[must_use]
fn evaluate_fourier_coeffs(table: &[f64], eps: f64) -> [f64; GEODESIC_ORDER + 1] {
    let eps2 = eps * eps;
    let mut d = eps;
    let mut offset = 0;
    let mut coeffs = [0.0; GEODESIC_ORDER + 1];
    for (l, coeff) in coeffs.iter_mut().enumerate().skip(1) {
        let block_degree = (TABLE_ORDER - l) / 2;
        let degree = (GEODESIC_ORDER - l) / 2;
        *coeff = d * evaluate_block(&table[offset..offset + block_degree + 2], degree, eps2);
        offset += block_degree + 2;
        d *= eps;
    }
    coeffs
}

/// The scale factor `A1 - 1`.
/// CFF Karney, Eq. 17.
/// * `eps` - epsilon the integration variable derived from Clairaut's constant.
/// # Examples
/// ```
/// use angle_sc::is_within_tolerance;
/// use geodesic_wgs84::ellipsoid::{calculate_sq_2nd_eccentricity, wgs84};
/// use geodesic_wgs84::ellipsoid::coefficients::evaluate_a1m1;
///
/// // evaluate_a1m1 for WGS 84 latitude 45.0
/// let eps45 = calculate_sq_2nd_eccentricity(wgs84::F) / 2.0;
/// let a1m1 = evaluate_a1m1(eps45);
///
/// assert!(is_within_tolerance(0.0033839903702120875, a1m1, 1e-11));
/// ```
#[must_use]
pub fn evaluate_a1m1(eps: f64) -> f64 {
    let t = evaluate_block(&COEFF_A1M1, GEODESIC_ORDER / 2, eps * eps);
    (t + eps) / (1.0 - eps)
}

/// The scale factor `A2 - 1`.
/// CFF Karney, Eq. 42.
/// * `eps` - epsilon the integration variable derived from Clairaut's constant.
#[must_use]
pub fn evaluate_a2m1(eps: f64) -> f64 {
    let t = evaluate_block(&COEFF_A2M1, GEODESIC_ORDER / 2, eps * eps);
    (t - eps) / (1.0 + eps)
}

/// The coefficients `C1[l]` in the Fourier expansion of `B1`.
/// CFF Karney, Eq. 18.
/// * `eps` - epsilon the integration variable derived from Clairaut's constant.
#[must_use]
pub fn evaluate_coeffs_c1(eps: f64) -> [f64; GEODESIC_ORDER + 1] {
    evaluate_fourier_coeffs(&COEFF_C1, eps)
}

/// The coefficients `C1p[l]` in the Fourier expansion of `B1p`,
/// the reversion of the `B1` series.
/// CFF Karney, Eq. 21.
/// * `eps` - epsilon the integration variable derived from Clairaut's constant.
#[must_use]
pub fn evaluate_coeffs_c1p(eps: f64) -> [f64; GEODESIC_ORDER + 1] {
    evaluate_fourier_coeffs(&COEFF_C1P, eps)
}

/// The coefficients `C2[l]` in the Fourier expansion of `B2`.
/// CFF Karney, Eq. 43.
/// * `eps` - epsilon the integration variable derived from Clairaut's constant.
#[must_use]
pub fn evaluate_coeffs_c2(eps: f64) -> [f64; GEODESIC_ORDER + 1] {
    evaluate_fourier_coeffs(&COEFF_C2, eps)
}

/// The coefficients `A3x`: the coefficient of eps^j in `A3` is `A3x[j]`.
/// CFF Karney, Eq. 24.
/// * `n` - the third flattening of the ellipsoid.
#[must_use]
pub fn evaluate_coeffs_a3x(n: f64) -> [f64; GEODESIC_ORDER] {
    let mut a3x = [0.0; GEODESIC_ORDER];
    let mut offset = 0;
    for j in (0..TABLE_ORDER).rev() {
        let block_degree = (TABLE_ORDER - j - 1).min(j);
        if j < GEODESIC_ORDER {
            let degree = (GEODESIC_ORDER - j - 1).min(j);
            a3x[j] = evaluate_block(&COEFF_A3[offset..offset + block_degree + 2], degree, n);
        }
        offset += block_degree + 2;
    }
    a3x
}

/// The coefficients `C3x`, the polynomials in eps of each `C3[l]` for l
/// from 1, lowest power first.
/// CFF Karney, Eq. 25.
/// * `n` - the third flattening of the ellipsoid.
#[must_use]
pub fn evaluate_coeffs_c3x(n: f64) -> [f64; NC3X] {
    let mut c3x = [0.0; NC3X];
    let mut offset = 0;
    let mut start = 0;
    for l in 1..TABLE_ORDER {
        for j in (l..TABLE_ORDER).rev() {
            let block_degree = (TABLE_ORDER - j - 1).min(j);
            if j < GEODESIC_ORDER {
                let degree = (GEODESIC_ORDER - j - 1).min(j);
                c3x[start + j - l] =
                    evaluate_block(&COEFF_C3[offset..offset + block_degree + 2], degree, n);
            }
            offset += block_degree + 2;
        }
        if l < GEODESIC_ORDER {
            start += GEODESIC_ORDER - l;
        }
    }
    c3x
}

/// The coefficients `C4x`, the polynomials in eps of each `C4[l]` for l
/// from 0, lowest power first.
/// CFF Karney, Eq. 63.
/// * `n` - the third flattening of the ellipsoid.
#[must_use]
pub fn evaluate_coeffs_c4x(n: f64) -> [f64; NC4X] {
    let mut c4x = [0.0; NC4X];
    let mut offset = 0;
    let mut start = 0;
    for l in 0..TABLE_ORDER {
        for j in (l..TABLE_ORDER).rev() {
            let block_degree = TABLE_ORDER - j - 1;
            if j < GEODESIC_ORDER {
                let degree = GEODESIC_ORDER - j - 1;
                c4x[start + j - l] =
                    evaluate_block(&COEFF_C4[offset..offset + block_degree + 2], degree, n);
            }
            offset += block_degree + 2;
        }
        if l < GEODESIC_ORDER {
            start += GEODESIC_ORDER - l;
        }
    }
    c4x
}

/// Evaluate the polynomial in x using
/// [Horner's method](https://en.wikipedia.org/wiki/Horner%27s_method).
/// * `coeffs` - the polynomial coefficients, lowest power first.
/// * `x` - the variable.
#[must_use]
pub fn evaluate_polynomial(coeffs: &[f64], x: f64) -> f64 {
    coeffs.iter().rev().fold(0.0, |acc, &coeff| acc * x + coeff)
}

/// The coefficients `C3[l]` in the Fourier expansion of `C3`.
/// CFF Karney, Eq. 26.
/// * `c3x` - the polynomial coefficients from `evaluate_coeffs_c3x`.
/// * `eps` - epsilon the integration variable derived from Clairaut's constant.
///
/// returns the coefficients, `C3[0]` is unused.
#[must_use]
pub fn evaluate_coeffs_c3y(c3x: &[f64; NC3X], eps: f64) -> [f64; GEODESIC_ORDER] {
    let mut coeffs = [0.0; GEODESIC_ORDER];
    let mut mult = 1.0;
    let mut start = 0;
    for (l, coeff) in coeffs.iter_mut().enumerate().skip(1) {
        let end = start + GEODESIC_ORDER - l;
        mult *= eps;
        *coeff = mult * evaluate_polynomial(&c3x[start..end], eps);
        start = end;
    }
    coeffs
}

/// The coefficients `C4[l]` in the Fourier expansion of `I4`.
/// CFF Karney, Eq. 64.
/// * `c4x` - the polynomial coefficients from `evaluate_coeffs_c4x`.
/// * `eps` - epsilon the integration variable derived from Clairaut's constant.
#[must_use]
pub fn evaluate_coeffs_c4y(c4x: &[f64; NC4X], eps: f64) -> [f64; GEODESIC_ORDER] {
    let mut coeffs = [0.0; GEODESIC_ORDER];
    let mut mult = 1.0;
    let mut start = 0;
    for (l, coeff) in coeffs.iter_mut().enumerate() {
        let end = start + GEODESIC_ORDER - l;
        *coeff = mult * evaluate_polynomial(&c4x[start..end], eps);
        mult *= eps;
        start = end;
    }
    coeffs
}

/// Evaluate the following:
///   `y = sum(c[l] * sin(2*l * x), l, 1, n)`
/// using [Clenshaw summation](https://en.wikipedia.org/wiki/Clenshaw_algorithm).
/// * `coeffs` - the series coefficients, `coeffs[0]` is unused.
/// * `sinx`, `cosx` - the sine and cosine of x.
#[must_use]
pub fn sin_cos_series(coeffs: &[f64], sinx: f64, cosx: f64) -> f64 {
    // 2 * cos(2 * x)
    let ar = 2.0 * (cosx - sinx) * (cosx + sinx);

    let mut index = coeffs.len();
    let mut k0 = 0.0;
    let mut k1 = 0.0;
    if index > 0 && index % 2 == 0 {
        index -= 1;
        k0 = coeffs[index];
    }

    // Unroll loop x 2, so accumulators return to their original role.
    while index > 1 {
        index -= 1;
        k1 = ar * k0 - k1 + coeffs[index];
        index -= 1;
        k0 = ar * k1 - k0 + coeffs[index];
    }
    2.0 * sinx * cosx * k0
}

/// Evaluate the following:
///   `y = sum(c[l] * cos((2*l + 1) * x), l, 0, n - 1)`
/// using [Clenshaw summation](https://en.wikipedia.org/wiki/Clenshaw_algorithm).
/// * `coeffs` - the series coefficients.
/// * `sinx`, `cosx` - the sine and cosine of x.
#[must_use]
pub fn cos_series(coeffs: &[f64], sinx: f64, cosx: f64) -> f64 {
    let ar = 2.0 * (cosx - sinx) * (cosx + sinx);

    let mut index = coeffs.len();
    let mut k0 = 0.0;
    let mut k1 = 0.0;
    if index % 2 == 1 {
        index -= 1;
        k0 = coeffs[index];
    }

    while index > 0 {
        index -= 1;
        k1 = ar * k0 - k1 + coeffs[index];
        index -= 1;
        k0 = ar * k1 - k0 + coeffs[index];
    }
    cosx * (k0 - k1)
}
