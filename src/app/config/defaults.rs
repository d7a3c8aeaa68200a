// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module is the single source of truth for defaults used across the
//! application, from the placeholder EXIF tag values to UI timing.

// ==========================================================================
// Stamp Metadata Defaults
// ==========================================================================

/// Default value written to the `Make` tag (0th IFD).
///
/// A visible placeholder rather than a real vendor string; users can change
/// it in the settings screen.
pub const DEFAULT_CAMERA_MAKE: &str = "Make";

/// Default value written to the `UserComment` tag (Exif IFD).
pub const DEFAULT_USER_COMMENT: &str = "Comment";

// ==========================================================================
// Archive Defaults
// ==========================================================================

/// Default file name suggested by the archive save dialog.
pub const DEFAULT_ARCHIVE_FILE_NAME: &str = "geotagged_images.zip";

// ==========================================================================
// UI Timing Defaults
// ==========================================================================

/// Interval of the periodic UI tick that drives toast auto-dismiss (ms).
pub const TICK_INTERVAL_MS: u64 = 500;

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    assert!(!DEFAULT_CAMERA_MAKE.is_empty());
    assert!(!DEFAULT_USER_COMMENT.is_empty());
    assert!(!DEFAULT_ARCHIVE_FILE_NAME.is_empty());
    assert!(TICK_INTERVAL_MS > 0);
    assert!(TICK_INTERVAL_MS <= 1_000);
};
