// SPDX-License-Identifier: MPL-2.0
//! End-to-end tests over the public stamping API: stamp real JPEG bytes,
//! read the EXIF back with an independent parser, and package archives.

use geostamp::app::config::{self, Config, GeneralConfig};
use geostamp::archive;
use geostamp::geotag::{apply_geotag, reader, stamp_all, TagDefaults};
use geostamp::i18n::fluent::I18n;
use std::io::{Cursor, Read};

/// Encodes a small solid-color JPEG in memory.
fn test_jpeg() -> Vec<u8> {
    let img = image_rs::RgbImage::from_pixel(16, 16, image_rs::Rgb([200, 120, 80]));
    let mut bytes = Vec::new();
    image_rs::DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut bytes), image_rs::ImageFormat::Jpeg)
        .expect("encoding test JPEG");
    bytes
}

/// Reads one GPS tag's rational triple as (numerator, denominator) pairs.
fn gps_rationals(bytes: &[u8], tag: exif::Tag) -> Vec<(u32, u32)> {
    let exif = exif::Reader::new()
        .read_from_container(&mut Cursor::new(bytes))
        .expect("stamped image should carry EXIF");
    let field = exif
        .get_field(tag, exif::In::PRIMARY)
        .expect("GPS tag should be present");
    match &field.value {
        exif::Value::Rational(triple) => triple.iter().map(|r| (r.num, r.denom)).collect(),
        other => panic!("expected rational value, got {:?}", other),
    }
}

/// Reads one ASCII tag's display text.
fn tag_text(bytes: &[u8], tag: exif::Tag) -> String {
    let exif = exif::Reader::new()
        .read_from_container(&mut Cursor::new(bytes))
        .expect("stamped image should carry EXIF");
    exif.get_field(tag, exif::In::PRIMARY)
        .expect("tag should be present")
        .display_value()
        .to_string()
}

/// Reads one tag's raw payload bytes (ASCII or UNDEFINED).
fn tag_bytes(bytes: &[u8], tag: exif::Tag) -> Vec<u8> {
    let exif = exif::Reader::new()
        .read_from_container(&mut Cursor::new(bytes))
        .expect("stamped image should carry EXIF");
    let field = exif
        .get_field(tag, exif::In::PRIMARY)
        .expect("tag should be present");
    match &field.value {
        exif::Value::Ascii(parts) => parts.concat(),
        exif::Value::Undefined(data, _) => data.clone(),
        other => panic!("expected byte-like value, got {:?}", other),
    }
}

/// True when `haystack` contains `needle` as a contiguous subslice.
fn contains_bytes(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}

#[test]
fn stamped_coordinates_round_trip_within_precision() {
    let stamped = apply_geotag(&test_jpeg(), 48.8566, 2.3522, &TagDefaults::default())
        .expect("stamping should succeed");

    let (lat, lng) = reader::read_gps(&stamped).expect("GPS tags expected");
    assert!((lat - 48.8566).abs() < 1e-4, "latitude was {lat}");
    assert!((lng - 2.3522).abs() < 1e-4, "longitude was {lng}");
}

#[test]
fn northwest_reference_characters() {
    let stamped = apply_geotag(&test_jpeg(), 45.0, -122.0, &TagDefaults::default())
        .expect("stamping should succeed");

    assert!(tag_text(&stamped, exif::Tag::GPSLatitudeRef).contains('N'));
    assert!(tag_text(&stamped, exif::Tag::GPSLongitudeRef).contains('W'));
}

#[test]
fn southeast_reference_characters() {
    let stamped = apply_geotag(&test_jpeg(), -33.8, 151.2, &TagDefaults::default())
        .expect("stamping should succeed");

    assert!(tag_text(&stamped, exif::Tag::GPSLatitudeRef).contains('S'));
    assert!(tag_text(&stamped, exif::Tag::GPSLongitudeRef).contains('E'));
}

#[test]
fn degrees_rational_uses_fixed_denominator_and_zero_minutes() {
    let stamped = apply_geotag(&test_jpeg(), 45.5, -122.67891, &TagDefaults::default())
        .expect("stamping should succeed");

    let latitude = gps_rationals(&stamped, exif::Tag::GPSLatitude);
    assert_eq!(latitude, vec![(455_000, 10_000), (0, 1), (0, 1)]);

    // Longitude magnitude is truncated, not rounded, and the reference tag
    // carries the sign.
    let longitude = gps_rationals(&stamped, exif::Tag::GPSLongitude);
    assert_eq!(longitude, vec![(1_226_789, 10_000), (0, 1), (0, 1)]);
}

#[test]
fn placeholder_tags_are_written() {
    let stamped = apply_geotag(&test_jpeg(), 10.0, 20.0, &TagDefaults::default())
        .expect("stamping should succeed");

    assert!(contains_bytes(&tag_bytes(&stamped, exif::Tag::Make), b"Make"));
    assert!(contains_bytes(
        &tag_bytes(&stamped, exif::Tag::UserComment),
        b"Comment"
    ));
}

#[test]
fn configured_tag_values_are_honored() {
    let tags = TagDefaults {
        camera_make: "ACME Optics".to_string(),
        user_comment: "survey run 7".to_string(),
    };
    let stamped =
        apply_geotag(&test_jpeg(), 10.0, 20.0, &tags).expect("stamping should succeed");

    assert!(contains_bytes(
        &tag_bytes(&stamped, exif::Tag::Make),
        b"ACME Optics"
    ));
    assert!(contains_bytes(
        &tag_bytes(&stamped, exif::Tag::UserComment),
        b"survey run 7"
    ));
}

#[test]
fn malformed_input_fails_without_panicking() {
    let result = apply_geotag(b"\xFF\xD8broken", 0.0, 0.0, &TagDefaults::default());
    assert!(result.is_err());
}

#[test]
fn batch_keeps_going_past_bad_images() {
    let good = test_jpeg();
    let inputs = vec![
        ("ok-1.jpg", good.as_slice()),
        ("bad.jpg", b"not an image".as_slice()),
        ("ok-2.jpg", good.as_slice()),
    ];

    let outcomes = stamp_all(inputs, 45.0, -122.0, &TagDefaults::default());

    assert_eq!(outcomes.len(), 3);
    let successes = outcomes.iter().filter(|o| o.is_success()).count();
    assert_eq!(successes, 2);
    assert!(!outcomes[1].is_success());
    // Order matches the inputs.
    assert_eq!(outcomes[0].file_name, "ok-1.jpg");
    assert_eq!(outcomes[2].file_name, "ok-2.jpg");
}

#[test]
fn restamping_overwrites_rather_than_merges() {
    let tags = TagDefaults::default();
    let once = apply_geotag(&test_jpeg(), 45.0, -122.0, &tags).expect("first stamp");
    let twice = apply_geotag(&once, 45.0, -122.0, &tags).expect("second stamp");

    // The GPS fields after re-stamping equal those of a single application.
    assert_eq!(
        gps_rationals(&once, exif::Tag::GPSLatitude),
        gps_rationals(&twice, exif::Tag::GPSLatitude)
    );
    assert_eq!(
        gps_rationals(&once, exif::Tag::GPSLongitude),
        gps_rationals(&twice, exif::Tag::GPSLongitude)
    );
    assert_eq!(
        tag_text(&once, exif::Tag::GPSLatitudeRef),
        tag_text(&twice, exif::Tag::GPSLatitudeRef)
    );
    assert_eq!(
        tag_text(&once, exif::Tag::GPSLongitudeRef),
        tag_text(&twice, exif::Tag::GPSLongitudeRef)
    );
}

#[test]
fn archive_packages_exactly_the_successes() {
    let good = test_jpeg();
    let inputs = vec![
        ("keep.jpg", good.as_slice()),
        ("drop.jpg", b"garbage".as_slice()),
    ];
    let outcomes = stamp_all(inputs, -33.8, 151.2, &TagDefaults::default());

    let archive_bytes = archive::archive_to_vec(&outcomes).expect("archive should build");
    let mut archive =
        zip::ZipArchive::new(Cursor::new(&archive_bytes)).expect("archive should parse");

    assert_eq!(archive.len(), 1);
    let mut entry = archive.by_name("keep.jpg").expect("entry should exist");
    let mut unpacked = Vec::new();
    entry.read_to_end(&mut unpacked).expect("read entry");

    // The unpacked entry is a stamped JPEG with the expected coordinates.
    let (lat, lng) = reader::read_gps(&unpacked).expect("GPS tags expected");
    assert!((lat + 33.8).abs() < 1e-4);
    assert!((lng - 151.2).abs() < 1e-4);
}

#[test]
fn language_change_via_config_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("settings.toml");

    let french_config = Config {
        general: GeneralConfig {
            language: Some("fr".to_string()),
            ..GeneralConfig::default()
        },
        ..Config::default()
    };
    config::save_to_path(&french_config, &path).expect("save config");

    let loaded = config::load_from_path(&path).expect("load config");
    let i18n = I18n::new(None, &loaded);
    assert_eq!(i18n.current_locale().to_string(), "fr");

    // CLI flag wins over the config file.
    let i18n_cli = I18n::new(Some("en-US".to_string()), &loaded);
    assert_eq!(i18n_cli.current_locale().to_string(), "en-US");
}
