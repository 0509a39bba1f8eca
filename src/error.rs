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

//! The error module contains the errors returned when constructing an
//! `Ellipsoid` with invalid parameters.

use thiserror::Error;

/// The ways in which the parameters of an `Ellipsoid` may be invalid.
#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub enum EllipsoidError {
    /// The Semimajor axis is not a finite, positive length.
    #[error("invalid semimajor axis: {0} metres, it must be finite and positive")]
    InvalidSemimajorAxis(f64),
    /// The flattening is not finite or not in the open range (-1, 1).
    #[error("invalid flattening: {0}, it must be finite and between -1 and 1")]
    InvalidFlattening(f64),
}

/// Validate the parameters of an `Ellipsoid`.
/// * `a` - the Semimajor axis in metres.
/// * `f` - the flattening ratio.
///
/// # Errors
///
/// Returns an `EllipsoidError` if `a` is not finite and positive, or if
/// `f` is not finite and in the range (-1, 1).
pub fn validate_parameters(a: f64, f: f64) -> Result<(), EllipsoidError> {
    if !(a.is_finite() && a > 0.0) {
        return Err(EllipsoidError::InvalidSemimajorAxis(a));
    }
    if !(f.is_finite() && -1.0 < f && f < 1.0) {
        return Err(EllipsoidError::InvalidFlattening(f));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_parameters() {
        assert_eq!(Ok(()), validate_parameters(6_378_137.0, 1.0 / 298.257_223_563));
        assert_eq!(Ok(()), validate_parameters(1.0, 0.0));
        assert_eq!(Ok(()), validate_parameters(1.0, -0.5));

        assert_eq!(
            Err(EllipsoidError::InvalidSemimajorAxis(0.0)),
            validate_parameters(0.0, 0.0)
        );
        assert_eq!(
            Err(EllipsoidError::InvalidSemimajorAxis(-1.0)),
            validate_parameters(-1.0, 0.0)
        );
        assert!(validate_parameters(f64::NAN, 0.0).is_err());
        assert!(validate_parameters(f64::INFINITY, 0.0).is_err());

        assert_eq!(
            Err(EllipsoidError::InvalidFlattening(1.0)),
            validate_parameters(1.0, 1.0)
        );
        assert!(validate_parameters(1.0, -1.0).is_err());
        assert!(validate_parameters(1.0, f64::NAN).is_err());
    }

    #[test]
    fn test_ellipsoid_error_display() {
        let error = EllipsoidError::InvalidSemimajorAxis(-1.0);
        assert_eq!(
            "invalid semimajor axis: -1 metres, it must be finite and positive",
            error.to_string()
        );

        let error = EllipsoidError::InvalidFlattening(2.0);
        assert_eq!(
            "invalid flattening: 2, it must be finite and between -1 and 1",
            error.to_string()
        );
    }
}
