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

//! The mask module contains the capability and output flags of the geodesic
//! calculations.
//!
//! Each output flag implies the series coefficient families that must be
//! computed to evaluate it, so a `GeodesicLine` constructed for a set of
//! outputs only calculates the coefficients that those outputs require.

use core::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign};

/// A bit mask of geodesic capabilities and outputs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Mask(pub u32);

impl Mask {
    /// No capabilities or outputs.
    pub const NONE: Self = Self(0);

    /// The `C1` series coefficients: distances.
    pub const CAP_C1: Self = Self(1 << 0);
    /// The `C1p` series coefficients: distance to arc length conversion.
    pub const CAP_C1P: Self = Self(1 << 1);
    /// The `C2` series coefficients: reduced lengths and geodesic scales.
    pub const CAP_C2: Self = Self(1 << 2);
    /// The `C3` series coefficients: longitudes.
    pub const CAP_C3: Self = Self(1 << 3);
    /// The `C4` series coefficients: areas.
    pub const CAP_C4: Self = Self(1 << 4);
    /// All of the series coefficients.
    pub const CAP_ALL: Self = Self(0x1F);
    /// All of the output bits.
    pub const OUT_ALL: Self = Self(0x7F80);

    /// Calculate the latitude.
    pub const LATITUDE: Self = Self(1 << 7);
    /// Calculate the longitude.
    pub const LONGITUDE: Self = Self((1 << 8) | Self::CAP_C3.0);
    /// Calculate the azimuth.
    pub const AZIMUTH: Self = Self(1 << 9);
    /// Calculate the distance.
    pub const DISTANCE: Self = Self((1 << 10) | Self::CAP_C1.0);
    /// Allow the distance to be used as an input.
    pub const DISTANCE_IN: Self = Self((1 << 11) | Self::CAP_C1.0 | Self::CAP_C1P.0);
    /// Calculate the reduced length.
    pub const REDUCEDLENGTH: Self = Self((1 << 12) | Self::CAP_C1.0 | Self::CAP_C2.0);
    /// Calculate the geodesic scales.
    pub const GEODESICSCALE: Self = Self((1 << 13) | Self::CAP_C1.0 | Self::CAP_C2.0);
    /// Calculate the area.
    pub const AREA: Self = Self((1 << 14) | Self::CAP_C4.0);
    /// All capabilities and outputs.
    pub const ALL: Self = Self(Self::OUT_ALL.0 | Self::CAP_ALL.0);

    /// The raw bits of the `Mask`.
    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Whether all of the bits of `other` are set in this `Mask`.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Whether any of the bits of `other` are set in this `Mask`.
    #[must_use]
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    /// The output bits of this `Mask`, without the coefficient bits.
    #[must_use]
    pub const fn outputs(self) -> Self {
        Self(self.0 & Self::OUT_ALL.0)
    }

    /// The coefficient bits of this `Mask`, without the output bits.
    #[must_use]
    pub const fn capabilities(self) -> Self {
        Self(self.0 & Self::CAP_ALL.0)
    }
}

impl BitOr for Mask {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for Mask {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for Mask {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl BitAndAssign for Mask {
    fn bitand_assign(&mut self, rhs: Self) {
        self.0 &= rhs.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_values() {
        assert_eq!(0x80, Mask::LATITUDE.bits());
        assert_eq!(0x108, Mask::LONGITUDE.bits());
        assert_eq!(0x200, Mask::AZIMUTH.bits());
        assert_eq!(0x401, Mask::DISTANCE.bits());
        assert_eq!(0x803, Mask::DISTANCE_IN.bits());
        assert_eq!(0x1005, Mask::REDUCEDLENGTH.bits());
        assert_eq!(0x2005, Mask::GEODESICSCALE.bits());
        assert_eq!(0x4010, Mask::AREA.bits());
        assert_eq!(0x7F9F, Mask::ALL.bits());
        assert_eq!(Mask::NONE, Mask::default());
    }

    #[test]
    fn test_outputs_imply_capabilities() {
        assert_eq!(Mask::CAP_C3, Mask::LONGITUDE.capabilities());
        assert_eq!(Mask::NONE, Mask::LATITUDE.capabilities());
        assert_eq!(Mask::NONE, Mask::AZIMUTH.capabilities());
        assert_eq!(Mask::CAP_C1, Mask::DISTANCE.capabilities());
        assert_eq!(
            Mask::CAP_C1 | Mask::CAP_C1P,
            Mask::DISTANCE_IN.capabilities()
        );
        assert_eq!(
            Mask::CAP_C1 | Mask::CAP_C2,
            Mask::REDUCEDLENGTH.capabilities()
        );
        assert_eq!(
            Mask::CAP_C1 | Mask::CAP_C2,
            Mask::GEODESICSCALE.capabilities()
        );
        assert_eq!(Mask::CAP_C4, Mask::AREA.capabilities());

        let mut all_outputs = Mask::NONE;
        for mask in [
            Mask::LATITUDE,
            Mask::LONGITUDE,
            Mask::AZIMUTH,
            Mask::DISTANCE,
            Mask::DISTANCE_IN,
            Mask::REDUCEDLENGTH,
            Mask::GEODESICSCALE,
            Mask::AREA,
        ] {
            all_outputs |= mask;
        }
        assert_eq!(Mask::ALL, all_outputs);
        assert_eq!(Mask::OUT_ALL, all_outputs.outputs());
    }

    #[test]
    fn test_mask_operations() {
        let mask = Mask::LATITUDE | Mask::LONGITUDE;
        assert!(mask.contains(Mask::LATITUDE));
        assert!(mask.contains(Mask::LONGITUDE));
        assert!(mask.contains(Mask::CAP_C3));
        assert!(!mask.contains(Mask::DISTANCE));
        assert!(!mask.intersects(Mask::GEODESICSCALE));
        assert!(mask.intersects(Mask::LATITUDE | Mask::AREA));

        let mut mask = Mask::ALL;
        mask &= Mask::OUT_ALL;
        assert_eq!(Mask::OUT_ALL, mask);
        assert_eq!(Mask::NONE, Mask::AREA & Mask::DISTANCE);
    }
}
