// SPDX-License-Identifier: MPL-2.0
//! Fixed-point rational representation of decimal degrees.
//!
//! EXIF GPS tags store coordinates as unsigned rationals, with the sign
//! carried separately by the hemisphere reference tag. This module converts a
//! signed decimal degree value into the intermediate signed rational that the
//! tag builder consumes.

/// A decimal degree value scaled to four fractional digits.
///
/// Invariant: the denominator is always [`DecimalRational::DENOMINATOR`]; the
/// numerator carries the sign of the original coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecimalRational {
    pub numerator: i64,
    pub denominator: u32,
}

impl DecimalRational {
    /// Fixed denominator giving four decimal digits of precision.
    pub const DENOMINATOR: u32 = 10_000;

    /// Scales `degrees` to a fixed-point rational.
    ///
    /// The magnitude is truncated toward zero, not rounded: `0.99995`
    /// becomes `9999/10000`, never `10000/10000`. Callers are expected to
    /// validate that the input is finite; the hemisphere sign survives in
    /// the numerator.
    #[must_use]
    pub fn from_degrees(degrees: f64) -> Self {
        let magnitude = (degrees.abs() * f64::from(Self::DENOMINATOR)) as i64;
        let numerator = if degrees < 0.0 { -magnitude } else { magnitude };
        Self {
            numerator,
            denominator: Self::DENOMINATOR,
        }
    }

    /// Magnitude of the numerator, as stored in the unsigned EXIF rational.
    #[must_use]
    pub fn unsigned_numerator(&self) -> u32 {
        self.numerator.unsigned_abs() as u32
    }

    /// True when the encoded coordinate lies in the positive hemisphere
    /// (north latitude / east longitude). Zero counts as positive.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.numerator >= 0
    }

    /// The decimal degrees this rational approximates.
    #[must_use]
    pub fn to_degrees(&self) -> f64 {
        self.numerator as f64 / f64::from(self.denominator)
    }
}
