// SPDX-License-Identifier: MPL-2.0
//! Batch stamping over a set of uploaded images.
//!
//! Every image in a batch is stamped with the same coordinate pair. Failures
//! are per-image: a malformed file produces a failed outcome in its slot and
//! the rest of the batch continues.

use super::{apply_geotag, TagDefaults};
use crate::error::{Error, Result};

/// The result of stamping a single image.
#[derive(Debug, Clone)]
pub struct StampOutcome {
    /// File name of the source image, reused as the archive entry name.
    pub file_name: String,
    /// Stamped JPEG bytes, or the per-image failure.
    pub result: Result<Vec<u8>>,
}

impl StampOutcome {
    /// True when this image was stamped successfully.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    /// The failure message, if this image failed.
    #[must_use]
    pub fn failure_message(&self) -> Option<String> {
        match &self.result {
            Ok(_) => None,
            Err(Error::Encoding(message)) => Some(message.clone()),
            Err(other) => Some(other.to_string()),
        }
    }
}

/// Stamps every input with the shared coordinate pair.
///
/// Outcomes are returned in input order, one per input, successes and
/// failures interleaved as they occurred. No failure aborts the batch.
pub fn stamp_all<'a, I>(
    inputs: I,
    latitude: f64,
    longitude: f64,
    tags: &TagDefaults,
) -> Vec<StampOutcome>
where
    I: IntoIterator<Item = (&'a str, &'a [u8])>,
{
    inputs
        .into_iter()
        .map(|(file_name, bytes)| StampOutcome {
            file_name: file_name.to_string(),
            result: apply_geotag(bytes, latitude, longitude, tags),
        })
        .collect()
}
