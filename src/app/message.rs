// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::error::Error;
use crate::geotag::StampOutcome;
use crate::media::SourceImage;
use crate::ui::notifications;
use crate::ui::theming::ThemeMode;
use std::path::PathBuf;
use std::time::Instant;
use unic_langid::LanguageIdentifier;

use super::Screen;

/// Top-level messages consumed by `App::update`.
#[derive(Debug, Clone)]
pub enum Message {
    /// The latitude text input changed.
    LatitudeInputChanged(String),
    /// The longitude text input changed.
    LongitudeInputChanged(String),
    /// Trigger the image pick dialog.
    OpenFileDialog,
    /// Result from the image pick dialog (`None` = cancelled).
    FilesPicked(Option<Vec<PathBuf>>),
    /// A file was dropped on the window.
    FileDropped(PathBuf),
    /// Result of reading picked/dropped files into memory.
    SourcesLoaded {
        loaded: Vec<SourceImage>,
        /// File names that could not be read.
        failed: Vec<String>,
    },
    /// Remove a single image row.
    RemoveImage(usize),
    /// Empty the image list.
    ClearImages,
    /// Run the batch with the current coordinates.
    StampRequested,
    /// The batch finished; one outcome per image row, in order.
    StampCompleted(Vec<StampOutcome>),
    /// Trigger the archive save dialog.
    SaveArchiveDialog,
    /// Result from the archive save dialog (`None` = cancelled).
    ArchivePathChosen(Option<PathBuf>),
    /// The archive write finished with an entry count or an error.
    ArchiveWritten(Result<usize, Error>),
    SwitchScreen(Screen),
    Settings(SettingsMessage),
    Notification(notifications::NotificationMessage),
    /// Periodic tick driving toast auto-dismiss.
    Tick(Instant),
}

/// Messages from the settings screen. Every change is applied and persisted
/// immediately; there is no separate "save" step.
#[derive(Debug, Clone)]
pub enum SettingsMessage {
    LanguageSelected(LanguageIdentifier),
    ThemeModeSelected(ThemeMode),
    CameraMakeChanged(String),
    UserCommentChanged(String),
    ArchiveNameChanged(String),
}

/// Runtime flags passed in from the CLI or launcher to tweak startup behavior.
#[derive(Debug, Default)]
pub struct Flags {
    /// Optional locale override in BCP-47 form (e.g. `fr`, `en-US`).
    pub lang: Option<String>,
    /// Optional config directory override (for settings.toml).
    /// Takes precedence over the `GEOSTAMP_CONFIG_DIR` environment variable.
    pub config_dir: Option<String>,
    /// Image paths to preload into the file list on startup.
    pub files: Vec<String>,
}
