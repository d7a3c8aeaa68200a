// SPDX-License-Identifier: MPL-2.0
//! Application root state and orchestration between the form and settings views.
//!
//! The `App` struct wires together the domains (stamping form, localization,
//! settings) and translates messages into side effects like config persistence
//! or batch stamping. This file intentionally keeps policy decisions (window
//! sizing, persistence format, localization switching) close to the main
//! update loop so it is easy to audit user-facing behavior.

pub mod config;
mod message;
pub mod paths;
mod screen;
mod update;
mod view;

pub use message::{Flags, Message, SettingsMessage};
pub use screen::Screen;

use crate::i18n::fluent::I18n;
use crate::media::SourceImage;
use crate::ui::notifications;
use crate::ui::theming::ThemeMode;
use iced::widget::image::Handle;
use iced::{time, window, Element, Subscription, Task, Theme};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Per-image state shown in the file list.
#[derive(Debug, Clone)]
pub struct ImageRow {
    pub source: SourceImage,
    pub status: RowStatus,
}

/// Where a row is in the stamp lifecycle.
#[derive(Debug, Clone)]
pub enum RowStatus {
    /// Selected but not stamped yet (or inputs changed since the last run).
    Pending,
    /// Stamped successfully; holds the output bytes and a preview handle.
    Stamped {
        bytes: Arc<Vec<u8>>,
        preview: Handle,
    },
    /// Stamping failed for this image only.
    Failed { message: String },
}

impl RowStatus {
    #[must_use]
    pub fn is_stamped(&self) -> bool {
        matches!(self, RowStatus::Stamped { .. })
    }
}

/// Root Iced application state that bridges the form, localization, and
/// persisted preferences.
pub struct App {
    pub i18n: I18n,
    pub(crate) screen: Screen,
    pub(crate) config: config::Config,
    pub(crate) theme_mode: ThemeMode,

    pub(crate) latitude_input: String,
    pub(crate) longitude_input: String,

    pub(crate) images: Vec<ImageRow>,
    pub(crate) is_stamping: bool,

    /// Dialog starting points, remembered for the session only.
    pub(crate) last_open_directory: Option<PathBuf>,
    pub(crate) last_save_directory: Option<PathBuf>,

    pub(crate) notifications: notifications::Manager,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("screen", &self.screen)
            .field("image_count", &self.images.len())
            .field("is_stamping", &self.is_stamping)
            .finish()
    }
}

pub const WINDOW_DEFAULT_HEIGHT: u32 = 620;
pub const WINDOW_DEFAULT_WIDTH: u32 = 760;
pub const MIN_WINDOW_HEIGHT: u32 = 480;
pub const MIN_WINDOW_WIDTH: u32 = 560;

/// Builds the window settings
pub fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH as f32, WINDOW_DEFAULT_HEIGHT as f32),
        min_size: Some(iced::Size::new(
            MIN_WINDOW_WIDTH as f32,
            MIN_WINDOW_HEIGHT as f32,
        )),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // Wrap flags in RefCell<Option<_>> to satisfy Fn trait requirement
    // while only consuming flags once (iced 0.14 requires Fn, not FnOnce)
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state
            .borrow_mut()
            .take()
            .expect("Boot function called more than once");
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

impl Default for App {
    fn default() -> Self {
        Self {
            i18n: I18n::default(),
            screen: Screen::Stamper,
            config: config::Config::default(),
            theme_mode: ThemeMode::System,
            latitude_input: String::new(),
            longitude_input: String::new(),
            images: Vec::new(),
            is_stamping: false,
            last_open_directory: None,
            last_save_directory: None,
            notifications: notifications::Manager::new(),
        }
    }
}

impl App {
    /// Initializes application state and optionally kicks off asynchronous
    /// loading of image paths received from the launcher.
    fn new(flags: Flags) -> (Self, Task<Message>) {
        let (config, config_warning) = config::load();
        let i18n = I18n::new(flags.lang.clone(), &config);

        let mut app = App {
            i18n,
            theme_mode: config.general.theme_mode,
            config,
            ..Self::default()
        };

        if let Some(key) = config_warning {
            app.notifications
                .push(notifications::Notification::warning(&key));
        }

        let preload: Vec<PathBuf> = flags.files.iter().map(PathBuf::from).collect();
        let task = if preload.is_empty() {
            Task::none()
        } else {
            update::load_sources_task(preload)
        };

        (app, task)
    }

    fn title(&self) -> String {
        let app_name = self.i18n.tr("window-title");

        match self.images.len() {
            0 => app_name,
            1 => format!("{} - {}", self.images[0].source.file_name, app_name),
            n => {
                let many = self
                    .i18n
                    .tr_with_args("window-title-many", &[("count", &n.to_string())]);
                format!("{} - {}", many, app_name)
            }
        }
    }

    fn theme(&self) -> Theme {
        if self.theme_mode.is_dark() {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    fn subscription(&self) -> Subscription<Message> {
        let drop_sub = iced::event::listen_with(|event, _status, _window| match event {
            iced::Event::Window(window::Event::FileDropped(path)) => {
                Some(Message::FileDropped(path))
            }
            _ => None,
        });

        // Ticks are only needed while toasts can expire.
        if self.notifications.has_notifications() {
            let tick_sub = time::every(Duration::from_millis(config::TICK_INTERVAL_MS))
                .map(Message::Tick);
            Subscription::batch([drop_sub, tick_sub])
        } else {
            drop_sub
        }
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::LatitudeInputChanged(value) => {
                self.latitude_input = value;
                Task::none()
            }
            Message::LongitudeInputChanged(value) => {
                self.longitude_input = value;
                Task::none()
            }
            Message::OpenFileDialog => {
                update::handle_open_file_dialog(self.last_open_directory.clone())
            }
            Message::FilesPicked(paths) => update::handle_files_picked(self, paths),
            Message::FileDropped(path) => update::handle_file_dropped(self, path),
            Message::SourcesLoaded { loaded, failed } => {
                update::handle_sources_loaded(self, loaded, failed)
            }
            Message::RemoveImage(index) => {
                if !self.is_stamping && index < self.images.len() {
                    self.images.remove(index);
                }
                Task::none()
            }
            Message::ClearImages => {
                if !self.is_stamping {
                    self.images.clear();
                }
                Task::none()
            }
            Message::StampRequested => update::handle_stamp_requested(self),
            Message::StampCompleted(outcomes) => update::handle_stamp_completed(self, outcomes),
            Message::SaveArchiveDialog => update::handle_save_archive_dialog(self),
            Message::ArchivePathChosen(path) => update::handle_archive_path_chosen(self, path),
            Message::ArchiveWritten(result) => update::handle_archive_written(self, result),
            Message::SwitchScreen(target) => {
                self.screen = target;
                Task::none()
            }
            Message::Settings(settings_message) => {
                update::handle_settings_message(self, settings_message)
            }
            Message::Notification(notification_message) => {
                self.notifications.handle_message(&notification_message);
                Task::none()
            }
            Message::Tick(_instant) => {
                self.notifications.tick();
                Task::none()
            }
        }
    }

    /// The coordinates currently entered, when both parse as finite degrees.
    ///
    /// This is the validation layer in front of the stamping core: non-finite
    /// or unparseable input never reaches `apply_geotag`.
    pub(crate) fn parsed_coordinates(&self) -> Option<(f64, f64)> {
        let latitude: f64 = self.latitude_input.trim().parse().ok()?;
        let longitude: f64 = self.longitude_input.trim().parse().ok()?;
        if latitude.is_finite() && longitude.is_finite() {
            Some((latitude, longitude))
        } else {
            None
        }
    }

    /// True when both coordinate fields hold text that does not validate.
    pub(crate) fn coordinates_invalid(&self) -> bool {
        let touched =
            !self.latitude_input.trim().is_empty() || !self.longitude_input.trim().is_empty();
        touched && self.parsed_coordinates().is_none()
    }

    /// True when at least one row has been stamped successfully.
    pub(crate) fn has_stamped_results(&self) -> bool {
        self.images.iter().any(|row| row.status.is_stamped())
    }

    fn view(&self) -> Element<'_, Message> {
        view::view(view::ViewContext {
            i18n: &self.i18n,
            screen: self.screen,
            config: &self.config,
            latitude_input: &self.latitude_input,
            longitude_input: &self.longitude_input,
            coordinates_invalid: self.coordinates_invalid(),
            can_stamp: !self.is_stamping
                && !self.images.is_empty()
                && self.parsed_coordinates().is_some(),
            can_save_archive: !self.is_stamping && self.has_stamped_results(),
            images: &self.images,
            is_stamping: self.is_stamping,
            notifications: &self.notifications,
        })
    }
}
