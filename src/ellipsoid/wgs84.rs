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

//! The wgs84 module contains the WGS 84 ellipsoid defining parameters from the ICAO
//! [WGS 84 Implementation Manual Version 2.4](https://www.icao.int/safety/pbn/Documentation/EUROCONTROL/Eurocontrol%20WGS%2084%20Implementation%20Manual.pdf)
//! Chapter 3, page 14.

use crate::Metres;

/// The WGS 84 equatorial radius, in metres.
pub const A: Metres = Metres(6_378_137.0);

/// The WGS 84 inverse flattening, as published.
pub const INVERSE_F: f64 = 298.257_223_563;

/// The WGS 84 flattening: (a - b) / a.
pub const F: f64 = 1.0 / INVERSE_F;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wgs84_parameters() {
        assert_eq!(6_378_137.0, A.0);
        assert!((F * INVERSE_F - 1.0).abs() <= f64::EPSILON);
        assert!(0.0033 < F && F < 0.0034);
    }
}
