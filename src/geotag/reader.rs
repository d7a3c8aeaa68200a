// SPDX-License-Identifier: MPL-2.0
//! GPS tag read-back from JPEG bytes.
//!
//! The stamper never merges existing metadata, but the UI shows whether a
//! selected image already carries GPS tags, and tests verify the round-trip.
//! Reading goes through `kamadak-exif`, writing through `little_exif`; the
//! two crates keep each other honest.

use std::io::Cursor;

/// Reads the GPS position stored in `image_bytes`, if any.
///
/// Returns `None` when the image carries no usable GPS tags, including when
/// there is no EXIF block at all or the container cannot be parsed. A missing
/// block is an answer, not a failure, so this never errors.
///
/// The degrees/minutes/seconds triples are collapsed to signed decimal
/// degrees, with the sign taken from the hemisphere reference tags.
#[must_use]
pub fn read_gps(image_bytes: &[u8]) -> Option<(f64, f64)> {
    let mut cursor = Cursor::new(image_bytes);
    let exif = exif::Reader::new().read_from_container(&mut cursor).ok()?;

    let latitude = read_axis(&exif, exif::Tag::GPSLatitude, exif::Tag::GPSLatitudeRef)?;
    let longitude = read_axis(&exif, exif::Tag::GPSLongitude, exif::Tag::GPSLongitudeRef)?;
    Some((latitude, longitude))
}

/// Extracts one signed axis from its value and reference tags.
fn read_axis(exif: &exif::Exif, value_tag: exif::Tag, ref_tag: exif::Tag) -> Option<f64> {
    let reference = exif
        .get_field(ref_tag, exif::In::PRIMARY)?
        .display_value()
        .to_string();

    let field = exif.get_field(value_tag, exif::In::PRIMARY)?;
    let magnitude = match &field.value {
        exif::Value::Rational(triple) => dms_to_degrees(triple)?,
        _ => return None,
    };

    // South and west are the negative hemispheres.
    let sign = if reference == "S" || reference == "W" {
        -1.0
    } else {
        1.0
    };
    Some(sign * magnitude)
}

/// Collapses a degrees/minutes/seconds rational triple to decimal degrees.
fn dms_to_degrees(triple: &[exif::Rational]) -> Option<f64> {
    if triple.len() < 3 {
        return None;
    }
    Some(triple[0].to_f64() + triple[1].to_f64() / 60.0 + triple[2].to_f64() / 3600.0)
}
