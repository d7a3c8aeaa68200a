// SPDX-License-Identifier: MPL-2.0
//! Zip packaging of stamped images.
//!
//! Successful batch outcomes are written into a deflate-compressed zip
//! archive under their original file names. Failed images are simply left
//! out; the archive only ever contains valid stamped JPEGs.

use crate::error::{Error, Result};
use crate::geotag::StampOutcome;
use std::fs::File;
use std::io::{BufWriter, Cursor, Seek, Write};
use std::path::Path;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Writes the successful outcomes into a zip archive at `path`.
///
/// Returns the number of entries written. An empty archive (no successful
/// outcome) is rejected with [`Error::Archive`] so the UI never offers a
/// useless download.
pub fn write_archive_file(path: &Path, outcomes: &[StampOutcome]) -> Result<usize> {
    let file = File::create(path)?;
    write_archive(BufWriter::new(file), outcomes)
}

/// Builds the archive in memory.
pub fn archive_to_vec(outcomes: &[StampOutcome]) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    write_archive(Cursor::new(&mut buffer), outcomes)?;
    Ok(buffer)
}

fn write_archive<W: Write + Seek>(writer: W, outcomes: &[StampOutcome]) -> Result<usize> {
    let successes: Vec<(&str, &[u8])> = outcomes
        .iter()
        .filter_map(|outcome| match &outcome.result {
            Ok(bytes) => Some((outcome.file_name.as_str(), bytes.as_slice())),
            Err(_) => None,
        })
        .collect();

    if successes.is_empty() {
        return Err(Error::Archive("no stamped images to package".to_string()));
    }

    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut zip = ZipWriter::new(writer);
    for (name, bytes) in &successes {
        zip.start_file(*name, options)?;
        zip.write_all(bytes)?;
    }
    zip.finish()?;

    Ok(successes.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geotag::{stamp_all, TagDefaults};
    use crate::test_utils::encoded_test_jpeg;
    use std::io::Read;

    fn sample_outcomes() -> Vec<StampOutcome> {
        let good = encoded_test_jpeg(4, 4);
        let inputs = vec![
            ("first.jpg", good.as_slice()),
            ("broken.jpg", b"garbage".as_slice()),
            ("second.jpg", good.as_slice()),
        ];
        stamp_all(inputs, 45.0, -122.0, &TagDefaults::default())
    }

    #[test]
    fn archive_contains_only_successful_entries() {
        let outcomes = sample_outcomes();
        let bytes = archive_to_vec(&outcomes).expect("archive should build");

        let mut archive =
            zip::ZipArchive::new(Cursor::new(&bytes)).expect("archive should parse back");
        assert_eq!(archive.len(), 2);
        assert!(archive.by_name("first.jpg").is_ok());
        assert!(archive.by_name("second.jpg").is_ok());
        assert!(archive.by_name("broken.jpg").is_err());
    }

    #[test]
    fn archive_entries_round_trip_byte_for_byte() {
        let outcomes = sample_outcomes();
        let bytes = archive_to_vec(&outcomes).expect("archive should build");

        let mut archive = zip::ZipArchive::new(Cursor::new(&bytes)).expect("parse");
        let mut entry = archive.by_name("first.jpg").expect("entry exists");
        let mut unpacked = Vec::new();
        entry.read_to_end(&mut unpacked).expect("read entry");

        let stamped = outcomes[0].result.as_ref().expect("first outcome succeeded");
        assert_eq!(&unpacked, stamped);
    }

    #[test]
    fn all_failed_batch_is_rejected() {
        let inputs = vec![("a.jpg", b"nope".as_slice()), ("b.jpg", b"nah".as_slice())];
        let outcomes = stamp_all(inputs, 0.0, 0.0, &TagDefaults::default());

        assert!(matches!(
            archive_to_vec(&outcomes),
            Err(Error::Archive(_))
        ));
    }

    #[test]
    fn archive_writes_to_disk() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("stamped.zip");
        let outcomes = sample_outcomes();

        let written = write_archive_file(&path, &outcomes).expect("write should succeed");
        assert_eq!(written, 2);
        assert!(path.exists());

        let file = std::fs::File::open(&path).expect("open archive");
        let archive = zip::ZipArchive::new(file).expect("parse archive");
        assert_eq!(archive.len(), 2);
    }
}
