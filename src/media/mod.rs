// SPDX-License-Identifier: MPL-2.0
//! Source image handling: loading uploaded files and preview handles.
//!
//! The stamping core works on in-memory byte buffers only; this module is the
//! boundary that turns picked/dropped file paths into those buffers. The
//! `.jpg`/`.jpeg` extension filter is a selection convention for dialogs and
//! drops, never enforced by the core itself.

use crate::error::Result;
use crate::geotag::reader;
use iced::widget::image::Handle;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// File extensions offered by the pick dialog and accepted on drop.
pub const JPEG_EXTENSIONS: &[&str] = &["jpg", "jpeg"];

/// True when `path` carries a JPEG extension (case-insensitive).
#[must_use]
pub fn has_jpeg_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            JPEG_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

/// An image queued for stamping.
///
/// Bytes are shared via `Arc`: the same buffer backs the list row, the
/// stamping task, and any preview handle without copies.
#[derive(Debug, Clone)]
pub struct SourceImage {
    pub path: PathBuf,
    pub file_name: String,
    pub bytes: Arc<Vec<u8>>,
    /// Coordinates already present in the file, if any. Display only;
    /// stamping always overwrites.
    pub existing_gps: Option<(f64, f64)>,
}

impl SourceImage {
    /// Reads the file at `path` into memory and probes it for GPS tags.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::Error::Io`] when the file cannot be read.
    pub fn load(path: PathBuf) -> Result<Self> {
        let bytes = std::fs::read(&path)?;
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .map(String::from)
            .unwrap_or_else(|| "image.jpg".to_string());
        let existing_gps = reader::read_gps(&bytes);

        Ok(Self {
            path,
            file_name,
            bytes: Arc::new(bytes),
            existing_gps,
        })
    }
}

/// Builds an Iced image handle from encoded JPEG bytes.
///
/// Iced decodes the bytes itself, so this also works for stamped outputs.
#[must_use]
pub fn preview_handle(bytes: &[u8]) -> Handle {
    Handle::from_bytes(bytes.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::encoded_test_jpeg;
    use std::io::Write;

    #[test]
    fn extension_filter_is_case_insensitive() {
        assert!(has_jpeg_extension(Path::new("photo.jpg")));
        assert!(has_jpeg_extension(Path::new("photo.JPEG")));
        assert!(has_jpeg_extension(Path::new("dir/photo.Jpg")));
        assert!(!has_jpeg_extension(Path::new("photo.png")));
        assert!(!has_jpeg_extension(Path::new("photo")));
    }

    #[test]
    fn load_reads_bytes_and_name() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("sample.jpg");
        let jpeg = encoded_test_jpeg(4, 4);
        std::fs::File::create(&path)
            .expect("create file")
            .write_all(&jpeg)
            .expect("write file");

        let source = SourceImage::load(path.clone()).expect("load should succeed");
        assert_eq!(source.file_name, "sample.jpg");
        assert_eq!(*source.bytes, jpeg);
        assert_eq!(source.existing_gps, None);
    }

    #[test]
    fn load_missing_file_is_an_io_error() {
        let result = SourceImage::load(PathBuf::from("/nonexistent/missing.jpg"));
        assert!(matches!(result, Err(crate::error::Error::Io(_))));
    }
}
