// SPDX-License-Identifier: MPL-2.0
//! View rendering for the application.
//!
//! This module renders the current screen from application state. The form
//! screen is the heart of the app: coordinate inputs, the image list with
//! per-row stamp status, and the batch actions. Toasts overlay every screen.

use super::{ImageRow, Message, RowStatus, Screen, SettingsMessage};
use crate::app::config::Config;
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{palette, sizing, spacing, typography};
use crate::ui::notifications::Manager;
use crate::ui::theming::ThemeMode;
use iced::widget::space::horizontal as horizontal_space;
use iced::widget::{
    button, container, image, pick_list, scrollable, stack, text, text_input,
    Column, Container, Row, Text,
};
use iced::{alignment, Element, Length};
use std::fmt;

/// Context required to render the application view.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub screen: Screen,
    pub config: &'a Config,
    pub latitude_input: &'a str,
    pub longitude_input: &'a str,
    pub coordinates_invalid: bool,
    pub can_stamp: bool,
    pub can_save_archive: bool,
    pub images: &'a [ImageRow],
    pub is_stamping: bool,
    pub notifications: &'a Manager,
}

/// Renders the current application view based on the active screen.
pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let ViewContext {
        i18n,
        screen,
        config,
        latitude_input,
        longitude_input,
        coordinates_invalid,
        can_stamp,
        can_save_archive,
        images,
        is_stamping,
        notifications,
    } = ctx;

    let current_view: Element<'_, Message> = match screen {
        Screen::Stamper => view_stamper(StamperContext {
            i18n,
            latitude_input,
            longitude_input,
            coordinates_invalid,
            can_stamp,
            can_save_archive,
            images,
            is_stamping,
        }),
        Screen::Settings => view_settings(i18n, config),
    };

    let content = Container::new(current_view)
        .width(Length::Fill)
        .height(Length::Fill);
    let toast_overlay = notifications.view(i18n).map(Message::Notification);

    stack([content.into(), toast_overlay]).into()
}

struct StamperContext<'a> {
    i18n: &'a I18n,
    latitude_input: &'a str,
    longitude_input: &'a str,
    coordinates_invalid: bool,
    can_stamp: bool,
    can_save_archive: bool,
    images: &'a [ImageRow],
    is_stamping: bool,
}

fn view_stamper(ctx: StamperContext<'_>) -> Element<'_, Message> {
    let i18n = ctx.i18n;

    let header = Row::new()
        .align_y(alignment::Vertical::Center)
        .push(Text::new(i18n.tr("form-heading")).size(typography::TITLE_MD))
        .push(horizontal_space())
        .push(
            button(text(i18n.tr("settings-button")).size(typography::BODY))
                .on_press(Message::SwitchScreen(Screen::Settings)),
        );

    let intro = Text::new(i18n.tr("form-intro")).size(typography::BODY);

    let coordinates = coordinate_inputs(
        i18n,
        ctx.latitude_input,
        ctx.longitude_input,
        ctx.coordinates_invalid,
        ctx.is_stamping,
    );

    let actions = Row::new()
        .spacing(spacing::SM)
        .push(
            button(text(i18n.tr("add-images-button")).size(typography::BODY)).on_press_maybe(
                (!ctx.is_stamping).then_some(Message::OpenFileDialog),
            ),
        )
        .push(
            button(text(i18n.tr("clear-images-button")).size(typography::BODY)).on_press_maybe(
                (!ctx.is_stamping && !ctx.images.is_empty()).then_some(Message::ClearImages),
            ),
        )
        .push(horizontal_space())
        .push(
            button(text(i18n.tr("stamp-button")).size(typography::BODY))
                .on_press_maybe(ctx.can_stamp.then_some(Message::StampRequested)),
        )
        .push(
            button(text(i18n.tr("save-archive-button")).size(typography::BODY))
                .on_press_maybe(ctx.can_save_archive.then_some(Message::SaveArchiveDialog)),
        );

    let list: Element<'_, Message> = if ctx.images.is_empty() {
        Container::new(
            Text::new(i18n.tr("image-list-empty"))
                .size(typography::BODY)
                .color(palette::GRAY_400),
        )
        .width(Length::Fill)
        .padding(spacing::LG)
        .align_x(alignment::Horizontal::Center)
        .into()
    } else {
        let count_caption = Text::new(
            i18n.tr_with_args("image-count", &[("count", &ctx.images.len().to_string())]),
        )
        .size(typography::CAPTION)
        .color(palette::GRAY_400);

        let rows: Vec<Element<'_, Message>> = ctx
            .images
            .iter()
            .enumerate()
            .map(|(index, row)| image_row(i18n, index, row, ctx.is_stamping))
            .collect();

        Column::new()
            .spacing(spacing::XS)
            .push(count_caption)
            .push(scrollable(Column::with_children(rows).spacing(spacing::XS)).height(Length::Fill))
            .into()
    };

    Column::new()
        .spacing(spacing::MD)
        .padding(spacing::LG)
        .push(header)
        .push(intro)
        .push(coordinates)
        .push(actions)
        .push(list)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

fn coordinate_inputs<'a>(
    i18n: &'a I18n,
    latitude_input: &str,
    longitude_input: &str,
    coordinates_invalid: bool,
    is_stamping: bool,
) -> Element<'a, Message> {
    let latitude_field = Column::new()
        .spacing(spacing::XXS)
        .push(Text::new(i18n.tr("latitude-label")).size(typography::CAPTION))
        .push(
            text_input("48.8566", latitude_input)
                .on_input_maybe((!is_stamping).then_some(Message::LatitudeInputChanged))
                .width(Length::Fixed(sizing::COORDINATE_INPUT_WIDTH)),
        );

    let longitude_field = Column::new()
        .spacing(spacing::XXS)
        .push(Text::new(i18n.tr("longitude-label")).size(typography::CAPTION))
        .push(
            text_input("2.3522", longitude_input)
                .on_input_maybe((!is_stamping).then_some(Message::LongitudeInputChanged))
                .width(Length::Fixed(sizing::COORDINATE_INPUT_WIDTH)),
        );

    let mut inputs = Row::new()
        .spacing(spacing::MD)
        .align_y(alignment::Vertical::Bottom)
        .push(latitude_field)
        .push(longitude_field);

    if coordinates_invalid {
        inputs = inputs.push(
            Text::new(i18n.tr("coordinates-invalid"))
                .size(typography::CAPTION)
                .color(palette::ERROR_500),
        );
    }

    inputs.into()
}

/// Renders one image row: preview, name, GPS note, status, remove button.
fn image_row<'a>(
    i18n: &'a I18n,
    index: usize,
    row: &'a ImageRow,
    is_stamping: bool,
) -> Element<'a, Message> {
    let mut details = Column::new()
        .spacing(spacing::XXS)
        .push(Text::new(&row.source.file_name).size(typography::BODY));

    if let Some((lat, lng)) = row.source.existing_gps {
        details = details.push(
            Text::new(i18n.tr_with_args(
                "existing-gps-note",
                &[
                    ("lat", &format!("{lat:.4}")),
                    ("lng", &format!("{lng:.4}")),
                ],
            ))
            .size(typography::CAPTION)
            .color(palette::GRAY_400),
        );
    }

    details = details.push(status_line(i18n, &row.status));

    let mut content = Row::new()
        .spacing(spacing::SM)
        .align_y(alignment::Vertical::Center);

    if let RowStatus::Stamped { preview, .. } = &row.status {
        content = content.push(
            image(preview.clone()).height(Length::Fixed(sizing::PREVIEW_HEIGHT)),
        );
    }

    content = content
        .push(details)
        .push(horizontal_space())
        .push(
            button(text(i18n.tr("remove-image-button")).size(typography::CAPTION))
                .on_press_maybe((!is_stamping).then_some(Message::RemoveImage(index))),
        );

    container(content)
        .width(Length::Fill)
        .padding(spacing::XS)
        .into()
}

fn status_line<'a>(i18n: &'a I18n, status: &RowStatus) -> Text<'a> {
    match status {
        RowStatus::Pending => Text::new(i18n.tr("status-pending"))
            .size(typography::CAPTION)
            .color(palette::GRAY_400),
        RowStatus::Stamped { .. } => Text::new(i18n.tr("status-stamped"))
            .size(typography::CAPTION)
            .color(palette::SUCCESS_500),
        RowStatus::Failed { message } => Text::new(
            i18n.tr_with_args("status-failed", &[("message", message.as_str())]),
        )
        .size(typography::CAPTION)
        .color(palette::ERROR_500),
    }
}

/// Option wrapper so the theme pick list shows localized labels.
#[derive(Debug, Clone, PartialEq)]
struct ThemeOption {
    mode: ThemeMode,
    label: String,
}

impl fmt::Display for ThemeOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

fn view_settings<'a>(i18n: &'a I18n, config: &'a Config) -> Element<'a, Message> {
    let header = Row::new()
        .align_y(alignment::Vertical::Center)
        .push(Text::new(i18n.tr("settings-title")).size(typography::TITLE_MD))
        .push(horizontal_space())
        .push(
            button(text(i18n.tr("back-button")).size(typography::BODY))
                .on_press(Message::SwitchScreen(Screen::Stamper)),
        );

    let language_row = Row::new()
        .spacing(spacing::MD)
        .align_y(alignment::Vertical::Center)
        .push(Text::new(i18n.tr("language-label")).size(typography::BODY))
        .push(pick_list(
            i18n.available_locales.clone(),
            Some(i18n.current_locale().clone()),
            |locale| Message::Settings(SettingsMessage::LanguageSelected(locale)),
        ));

    let theme_options: Vec<ThemeOption> = ThemeMode::ALL
        .iter()
        .map(|mode| ThemeOption {
            mode: *mode,
            label: i18n.tr(mode.label_key()),
        })
        .collect();
    let selected_theme = theme_options
        .iter()
        .find(|option| option.mode == config.general.theme_mode)
        .cloned();
    let theme_row = Row::new()
        .spacing(spacing::MD)
        .align_y(alignment::Vertical::Center)
        .push(Text::new(i18n.tr("theme-label")).size(typography::BODY))
        .push(pick_list(theme_options, selected_theme, |option| {
            Message::Settings(SettingsMessage::ThemeModeSelected(option.mode))
        }));

    let camera_make = config.stamp.camera_make.clone().unwrap_or_default();
    let user_comment = config.stamp.user_comment.clone().unwrap_or_default();
    let archive_name = config.archive.file_name.clone().unwrap_or_default();

    let stamp_section = Column::new()
        .spacing(spacing::XS)
        .push(Text::new(i18n.tr("settings-stamp-section")).size(typography::BODY))
        .push(labeled_input(
            i18n.tr("camera-make-label"),
            &camera_make,
            |value| Message::Settings(SettingsMessage::CameraMakeChanged(value)),
        ))
        .push(labeled_input(
            i18n.tr("user-comment-label"),
            &user_comment,
            |value| Message::Settings(SettingsMessage::UserCommentChanged(value)),
        ));

    let archive_section = Column::new()
        .spacing(spacing::XS)
        .push(Text::new(i18n.tr("settings-archive-section")).size(typography::BODY))
        .push(labeled_input(
            i18n.tr("archive-name-label"),
            &archive_name,
            |value| Message::Settings(SettingsMessage::ArchiveNameChanged(value)),
        ));

    Column::new()
        .spacing(spacing::LG)
        .padding(spacing::LG)
        .push(header)
        .push(language_row)
        .push(theme_row)
        .push(stamp_section)
        .push(archive_section)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

fn labeled_input<'a>(
    label: String,
    value: &str,
    on_input: impl Fn(String) -> Message + 'a,
) -> Element<'a, Message> {
    Column::new()
        .spacing(spacing::XXS)
        .push(
            Text::new(label)
                .size(typography::CAPTION)
                .color(palette::GRAY_400),
        )
        .push(
            text_input("", value)
                .on_input(on_input)
                .width(Length::Fixed(sizing::SETTINGS_INPUT_WIDTH)),
        )
        .into()
}
