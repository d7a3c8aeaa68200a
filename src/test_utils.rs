// SPDX-License-Identifier: MPL-2.0
//! Test utilities shared by unit tests: float assertions and image fixtures.

// Re-export approx macros for convenient use in tests
pub use approx::{assert_abs_diff_eq, assert_relative_eq};

/// Default epsilon for coordinate comparisons (four decimal digits of
/// precision, the resolution of the stamped rationals).
pub const COORDINATE_EPSILON: f64 = 1e-4;

/// Encodes a solid-color JPEG of the given dimensions in memory.
pub fn encoded_test_jpeg(width: u32, height: u32) -> Vec<u8> {
    let img = image_rs::RgbImage::from_pixel(width, height, image_rs::Rgb([120, 160, 200]));
    let mut bytes = Vec::new();
    image_rs::DynamicImage::ImageRgb8(img)
        .write_to(
            &mut std::io::Cursor::new(&mut bytes),
            image_rs::ImageFormat::Jpeg,
        )
        .expect("encoding a fresh RGB image as JPEG cannot fail");
    bytes
}
