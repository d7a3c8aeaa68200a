// SPDX-License-Identifier: MPL-2.0
//! GPS stamping of JPEG images.
//!
//! This module implements the stamping core: a signed decimal coordinate pair
//! is scaled to EXIF rationals, assembled into a minimal metadata block
//! (camera make, user comment, GPS sub-block) using the `little_exif` crate,
//! and attached to a re-encoded copy of the source JPEG. The transformation
//! is pure: input buffers are never mutated and each call owns its output.

pub mod batch;
pub mod rational;
pub mod reader;

pub use batch::{stamp_all, StampOutcome};
pub use rational::DecimalRational;

use crate::error::{Error, Result};
use image_rs::ImageFormat;
use little_exif::exif_tag::ExifTag;
use little_exif::filetype::FileExtension;
use little_exif::metadata::Metadata;
use little_exif::rational::uR64;
use std::io::Cursor;

/// Values for the constant metadata fields written alongside the GPS block.
///
/// The stamping core always writes a `Make` and a `UserComment` tag. Their
/// content is not derived from the image; it comes from configuration, with
/// placeholder defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagDefaults {
    /// Value of the `Make` tag in the 0th IFD.
    pub camera_make: String,
    /// Value of the `UserComment` tag in the Exif IFD.
    pub user_comment: String,
}

impl Default for TagDefaults {
    fn default() -> Self {
        Self {
            camera_make: crate::app::config::DEFAULT_CAMERA_MAKE.to_string(),
            user_comment: crate::app::config::DEFAULT_USER_COMMENT.to_string(),
        }
    }
}

/// Stamps `image_bytes` with the given coordinates and returns the new JPEG.
///
/// The input must decode as a JPEG image. The pixels are re-encoded (lossy
/// per JPEG itself, no geometric or color transform) with a fresh EXIF block
/// attached, so any metadata previously present is replaced, never merged.
///
/// # Errors
///
/// Returns [`Error::Encoding`] when the input does not decode as a JPEG,
/// when re-encoding fails, or when the EXIF block cannot be serialized.
/// The input buffer is left untouched in every case.
pub fn apply_geotag(
    image_bytes: &[u8],
    latitude: f64,
    longitude: f64,
    tags: &TagDefaults,
) -> Result<Vec<u8>> {
    let latitude = DecimalRational::from_degrees(latitude);
    let longitude = DecimalRational::from_degrees(longitude);

    let decoded = image_rs::load_from_memory_with_format(image_bytes, ImageFormat::Jpeg)
        .map_err(|e| Error::Encoding(format!("failed to decode JPEG: {e}")))?;

    // JPEG has no alpha channel; normalize to RGB before encoding.
    let mut output = Vec::new();
    image_rs::DynamicImage::ImageRgb8(decoded.to_rgb8())
        .write_to(&mut Cursor::new(&mut output), ImageFormat::Jpeg)
        .map_err(|e| Error::Encoding(format!("failed to re-encode JPEG: {e}")))?;

    build_metadata(latitude, longitude, tags)
        .write_to_vec(&mut output, FileExtension::JPEG)
        .map_err(|e| Error::Encoding(format!("failed to attach EXIF block: {e:?}")))?;

    Ok(output)
}

/// Assembles the EXIF metadata block for one stamped image.
///
/// The hemisphere reference characters carry the coordinate signs, so the
/// GPS value tags store the numerator magnitude only. Minutes and seconds
/// are fixed to 0/1; the whole coordinate lives in the degrees rational.
fn build_metadata(
    latitude: DecimalRational,
    longitude: DecimalRational,
    tags: &TagDefaults,
) -> Metadata {
    let latitude_ref = if latitude.is_positive() { "N" } else { "S" };
    let longitude_ref = if longitude.is_positive() { "E" } else { "W" };

    let mut metadata = Metadata::new();
    metadata.set_tag(ExifTag::Make(tags.camera_make.clone()));
    metadata.set_tag(ExifTag::UserComment(
        tags.user_comment.clone().into_bytes(),
    ));
    metadata.set_tag(ExifTag::GPSLatitudeRef(latitude_ref.to_string()));
    metadata.set_tag(ExifTag::GPSLatitude(degrees_triple(latitude)));
    metadata.set_tag(ExifTag::GPSLongitudeRef(longitude_ref.to_string()));
    metadata.set_tag(ExifTag::GPSLongitude(degrees_triple(longitude)));
    metadata
}

/// Builds the degrees/minutes/seconds triple for one axis.
fn degrees_triple(value: DecimalRational) -> Vec<uR64> {
    vec![
        uR64 {
            nominator: value.unsigned_numerator(),
            denominator: value.denominator,
        },
        uR64 {
            nominator: 0,
            denominator: 1,
        },
        uR64 {
            nominator: 0,
            denominator: 1,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::encoded_test_jpeg;

    #[test]
    fn stamping_a_valid_jpeg_succeeds() {
        let jpeg = encoded_test_jpeg(8, 8);
        let stamped = apply_geotag(&jpeg, 45.0, -122.0, &TagDefaults::default())
            .expect("stamping should succeed");
        // Output must still be a decodable JPEG.
        image_rs::load_from_memory_with_format(&stamped, ImageFormat::Jpeg)
            .expect("output should decode as JPEG");
    }

    #[test]
    fn stamping_leaves_the_input_untouched() {
        let jpeg = encoded_test_jpeg(4, 4);
        let before = jpeg.clone();
        let _ = apply_geotag(&jpeg, -33.8688, 151.2093, &TagDefaults::default());
        assert_eq!(jpeg, before);
    }

    #[test]
    fn malformed_input_yields_encoding_error() {
        let result = apply_geotag(b"not a jpeg at all", 0.0, 0.0, &TagDefaults::default());
        match result {
            Err(crate::error::Error::Encoding(message)) => {
                assert!(!message.is_empty());
            }
            other => panic!("expected Encoding error, got {:?}", other),
        }
    }

    #[test]
    fn png_input_is_rejected() {
        // Only JPEG is in scope; a valid PNG must still fail.
        let img = image_rs::RgbaImage::from_pixel(2, 2, image_rs::Rgba([10, 20, 30, 255]));
        let mut png = Vec::new();
        image_rs::DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
            .expect("write png");

        assert!(matches!(
            apply_geotag(&png, 1.0, 1.0, &TagDefaults::default()),
            Err(crate::error::Error::Encoding(_))
        ));
    }

    #[test]
    fn degrees_triple_zeroes_minutes_and_seconds() {
        let triple = degrees_triple(DecimalRational::from_degrees(45.5));
        assert_eq!(triple.len(), 3);
        assert_eq!(triple[0].nominator, 455_000);
        assert_eq!(triple[0].denominator, 10_000);
        assert_eq!((triple[1].nominator, triple[1].denominator), (0, 1));
        assert_eq!((triple[2].nominator, triple[2].denominator), (0, 1));
    }
}
