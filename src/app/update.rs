// SPDX-License-Identifier: MPL-2.0
//! Message handlers for the application update loop.
//!
//! Handlers that kick off asynchronous work (dialogs, file reads, the batch
//! itself) return a `Task`; everything else mutates `App` state in place.

use super::message::{Message, SettingsMessage};
use super::{App, ImageRow, RowStatus};
use crate::app::config;
use crate::archive;
use crate::error::Error;
use crate::geotag::{stamp_all, StampOutcome, TagDefaults};
use crate::media::{self, SourceImage};
use crate::ui::notifications::Notification;
use iced::Task;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// How long the "files could not be read" warning stays visible; longer than
/// the default because it lists file names.
const FILE_WARNING_SECS: u64 = 8;

/// Reads the given paths into memory off the UI thread.
pub fn load_sources_task(paths: Vec<PathBuf>) -> Task<Message> {
    Task::perform(
        async move {
            let mut loaded = Vec::new();
            let mut failed = Vec::new();
            for path in paths {
                let display_name = path
                    .file_name()
                    .and_then(|name| name.to_str())
                    .map(String::from)
                    .unwrap_or_else(|| path.to_string_lossy().into_owned());
                match SourceImage::load(path) {
                    Ok(source) => loaded.push(source),
                    Err(_) => failed.push(display_name),
                }
            }
            (loaded, failed)
        },
        |(loaded, failed)| Message::SourcesLoaded { loaded, failed },
    )
}

pub fn handle_open_file_dialog(last_directory: Option<PathBuf>) -> Task<Message> {
    Task::perform(
        async move {
            let mut dialog =
                rfd::AsyncFileDialog::new().add_filter("JPEG images", media::JPEG_EXTENSIONS);

            if let Some(dir) = last_directory {
                if dir.exists() {
                    dialog = dialog.set_directory(&dir);
                }
            }

            dialog.pick_files().await.map(|handles| {
                handles
                    .into_iter()
                    .map(|handle| handle.path().to_path_buf())
                    .collect::<Vec<_>>()
            })
        },
        Message::FilesPicked,
    )
}

pub fn handle_files_picked(app: &mut App, paths: Option<Vec<PathBuf>>) -> Task<Message> {
    let Some(paths) = paths else {
        // User cancelled the dialog
        return Task::none();
    };

    if let Some(parent) = paths.first().and_then(|p| p.parent()) {
        app.last_open_directory = Some(parent.to_path_buf());
    }

    let fresh: Vec<PathBuf> = paths
        .into_iter()
        .filter(|path| !app.images.iter().any(|row| row.source.path == *path))
        .collect();

    if fresh.is_empty() {
        Task::none()
    } else {
        load_sources_task(fresh)
    }
}

pub fn handle_file_dropped(app: &mut App, path: PathBuf) -> Task<Message> {
    // The extension filter is a selection convention only; the stamping core
    // judges bytes, not names.
    if !media::has_jpeg_extension(&path) {
        return Task::none();
    }
    if app.images.iter().any(|row| row.source.path == path) {
        return Task::none();
    }
    load_sources_task(vec![path])
}

pub fn handle_sources_loaded(
    app: &mut App,
    loaded: Vec<SourceImage>,
    failed: Vec<String>,
) -> Task<Message> {
    for source in loaded {
        app.images.push(ImageRow {
            source,
            status: RowStatus::Pending,
        });
    }

    if !failed.is_empty() {
        app.notifications.push(
            Notification::warning("notification-files-load-error")
                .with_arg("files", failed.join(", "))
                .auto_dismiss(Duration::from_secs(FILE_WARNING_SECS)),
        );
    }

    Task::none()
}

pub fn handle_stamp_requested(app: &mut App) -> Task<Message> {
    let Some((latitude, longitude)) = app.parsed_coordinates() else {
        return Task::none();
    };
    if app.images.is_empty() || app.is_stamping {
        return Task::none();
    }

    app.is_stamping = true;
    for row in &mut app.images {
        row.status = RowStatus::Pending;
    }

    let inputs: Vec<(String, Arc<Vec<u8>>)> = app
        .images
        .iter()
        .map(|row| (row.source.file_name.clone(), row.source.bytes.clone()))
        .collect();
    let tags: TagDefaults = app.config.tag_defaults();

    Task::perform(
        async move {
            stamp_all(
                inputs.iter().map(|(name, bytes)| (name.as_str(), bytes.as_slice())),
                latitude,
                longitude,
                &tags,
            )
        },
        Message::StampCompleted,
    )
}

pub fn handle_stamp_completed(app: &mut App, outcomes: Vec<StampOutcome>) -> Task<Message> {
    app.is_stamping = false;

    // The form is locked while stamping, so rows and outcomes line up.
    let mut succeeded = 0usize;
    let mut failed = 0usize;
    for (row, outcome) in app.images.iter_mut().zip(outcomes) {
        match outcome.result {
            Ok(bytes) => {
                succeeded += 1;
                let preview = media::preview_handle(&bytes);
                row.status = RowStatus::Stamped {
                    bytes: Arc::new(bytes),
                    preview,
                };
            }
            Err(error) => {
                failed += 1;
                row.status = RowStatus::Failed {
                    message: match error {
                        Error::Encoding(message) => message,
                        other => other.to_string(),
                    },
                };
            }
        }
    }

    let notification = if failed == 0 {
        Notification::success("notification-stamp-complete")
    } else if succeeded == 0 {
        Notification::error("notification-stamp-complete")
    } else {
        Notification::warning("notification-stamp-complete")
    };
    app.notifications.push(
        notification
            .with_arg("succeeded", succeeded.to_string())
            .with_arg("failed", failed.to_string()),
    );

    Task::none()
}

pub fn handle_save_archive_dialog(app: &mut App) -> Task<Message> {
    if !app.has_stamped_results() || app.is_stamping {
        app.notifications
            .push(Notification::info("notification-no-results"));
        return Task::none();
    }

    let file_name = app.config.archive_file_name();
    let last_directory = app.last_save_directory.clone();

    Task::perform(
        async move {
            let mut dialog = rfd::AsyncFileDialog::new()
                .add_filter("Zip archive", &["zip"])
                .set_file_name(&file_name);

            if let Some(dir) = last_directory {
                if dir.exists() {
                    dialog = dialog.set_directory(&dir);
                }
            }

            dialog
                .save_file()
                .await
                .map(|handle| handle.path().to_path_buf())
        },
        Message::ArchivePathChosen,
    )
}

pub fn handle_archive_path_chosen(app: &mut App, path: Option<PathBuf>) -> Task<Message> {
    let Some(path) = path else {
        // User cancelled the dialog
        return Task::none();
    };

    if let Some(parent) = path.parent() {
        app.last_save_directory = Some(parent.to_path_buf());
    }

    let outcomes: Vec<StampOutcome> = app
        .images
        .iter()
        .filter_map(|row| match &row.status {
            RowStatus::Stamped { bytes, .. } => Some(StampOutcome {
                file_name: row.source.file_name.clone(),
                result: Ok(bytes.as_ref().clone()),
            }),
            _ => None,
        })
        .collect();

    Task::perform(
        async move { archive::write_archive_file(&path, &outcomes) },
        Message::ArchiveWritten,
    )
}

pub fn handle_archive_written(
    app: &mut App,
    result: Result<usize, Error>,
) -> Task<Message> {
    match result {
        Ok(count) => {
            app.notifications.push(
                Notification::success("notification-archive-saved")
                    .with_arg("count", count.to_string()),
            );
        }
        Err(error) => {
            app.notifications.push(
                Notification::error("notification-archive-error")
                    .with_arg("message", error.to_string()),
            );
        }
    }
    Task::none()
}

pub fn handle_settings_message(app: &mut App, message: SettingsMessage) -> Task<Message> {
    match message {
        SettingsMessage::LanguageSelected(locale) => {
            app.i18n.set_locale(locale.clone());
            app.config.general.language = Some(locale.to_string());
        }
        SettingsMessage::ThemeModeSelected(mode) => {
            app.theme_mode = mode;
            app.config.general.theme_mode = mode;
        }
        SettingsMessage::CameraMakeChanged(value) => {
            app.config.stamp.camera_make = Some(value);
        }
        SettingsMessage::UserCommentChanged(value) => {
            app.config.stamp.user_comment = Some(value);
        }
        SettingsMessage::ArchiveNameChanged(value) => {
            app.config.archive.file_name = Some(value);
        }
    }

    persist_config(app);
    Task::none()
}

/// Writes the config to disk, surfacing failures as a warning toast.
fn persist_config(app: &mut App) {
    if config::save(&app.config).is_err() {
        app.notifications
            .push(Notification::warning("notification-config-save-error"));
    }
}
