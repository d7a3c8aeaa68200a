// SPDX-License-Identifier: MPL-2.0
//! `geostamp` is a batch GPS geotagging tool built with the Iced GUI framework.
//!
//! It stamps JPEG images with a fixed latitude/longitude as EXIF GPS metadata
//! and packages the results into a zip archive, and demonstrates
//! internationalization with Fluent, user preference management, and modular
//! UI design.

#![doc(html_root_url = "https://docs.rs/geostamp/0.2.0")]

pub mod app;
pub mod archive;
pub mod error;
pub mod geotag;
pub mod i18n;
pub mod media;
pub mod ui;

#[cfg(test)]
pub mod test_utils;
