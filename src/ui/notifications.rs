// SPDX-License-Identifier: MPL-2.0
//! Toast notifications for user feedback.
//!
//! Batch results, archive writes, and settings problems surface here as
//! small toast cards in the bottom-right corner instead of blocking dialogs.
//! Success and warning toasts dismiss themselves; errors stay until the user
//! closes them. At most [`MAX_VISIBLE`] toasts show at once, the rest queue.

use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{border, palette, radius, shadow, sizing, spacing, typography};
use iced::widget::{button, container, text, Column, Container, Row, Text};
use iced::{alignment, Color, Element, Length, Theme};
use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Maximum number of toasts visible at once.
const MAX_VISIBLE: usize = 3;

/// Monotonically increasing toast identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NotificationId(u64);

impl NotificationId {
    fn next() -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

/// Severity drives the accent color and the auto-dismiss policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    #[default]
    Success,
    Info,
    Warning,
    Error,
}

impl Severity {
    fn accent_color(self) -> Color {
        match self {
            Severity::Success => palette::SUCCESS_500,
            Severity::Info => palette::INFO_500,
            Severity::Warning => palette::WARNING_500,
            Severity::Error => palette::ERROR_500,
        }
    }

    /// `None` means the toast never dismisses on its own.
    fn auto_dismiss_after(self) -> Option<Duration> {
        match self {
            Severity::Success | Severity::Info => Some(Duration::from_secs(3)),
            Severity::Warning => Some(Duration::from_secs(5)),
            Severity::Error => None,
        }
    }
}

/// One queued or visible toast. The message is an i18n key resolved at
/// render time, so notifications created before a language switch still
/// display in the new language.
#[derive(Debug, Clone)]
pub struct Notification {
    id: NotificationId,
    severity: Severity,
    message_key: String,
    message_args: Vec<(String, String)>,
    created_at: Instant,
    dismiss_override: Option<Duration>,
}

impl Notification {
    pub fn new(severity: Severity, message_key: impl Into<String>) -> Self {
        Self {
            id: NotificationId::next(),
            severity,
            message_key: message_key.into(),
            message_args: Vec::new(),
            created_at: Instant::now(),
            dismiss_override: None,
        }
    }

    pub fn success(message_key: impl Into<String>) -> Self {
        Self::new(Severity::Success, message_key)
    }

    pub fn info(message_key: impl Into<String>) -> Self {
        Self::new(Severity::Info, message_key)
    }

    pub fn warning(message_key: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message_key)
    }

    pub fn error(message_key: impl Into<String>) -> Self {
        Self::new(Severity::Error, message_key)
    }

    /// Adds an interpolation argument for the Fluent message.
    #[must_use]
    pub fn with_arg(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.message_args.push((key.into(), value.into()));
        self
    }

    /// Overrides the severity's auto-dismiss delay (e.g. long file lists).
    #[must_use]
    pub fn auto_dismiss(mut self, duration: Duration) -> Self {
        self.dismiss_override = Some(duration);
        self
    }

    #[must_use]
    pub fn id(&self) -> NotificationId {
        self.id
    }

    #[must_use]
    pub fn severity(&self) -> Severity {
        self.severity
    }

    #[must_use]
    pub fn message_key(&self) -> &str {
        &self.message_key
    }

    fn expired(&self) -> bool {
        self.dismiss_override
            .or_else(|| self.severity.auto_dismiss_after())
            .is_some_and(|delay| self.created_at.elapsed() >= delay)
    }

    fn resolve_text(&self, i18n: &I18n) -> String {
        if self.message_args.is_empty() {
            i18n.tr(&self.message_key)
        } else {
            let args: Vec<(&str, &str)> = self
                .message_args
                .iter()
                .map(|(k, v)| (k.as_str(), v.as_str()))
                .collect();
            i18n.tr_with_args(&self.message_key, &args)
        }
    }
}

/// Messages for toast state changes.
#[derive(Debug, Clone)]
pub enum Message {
    /// Dismiss a specific toast by ID.
    Dismiss(NotificationId),
    /// Tick for checking auto-dismiss timers.
    Tick,
}

/// Alias used by the application message enum, where `Message` is taken.
pub use self::Message as NotificationMessage;

/// Queues notifications and bounds how many are visible.
#[derive(Debug, Default)]
pub struct Manager {
    visible: VecDeque<Notification>,
    queue: VecDeque<Notification>,
}

impl Manager {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Shows the notification now, or queues it when the screen is full.
    pub fn push(&mut self, notification: Notification) {
        if self.visible.len() < MAX_VISIBLE {
            self.visible.push_front(notification);
        } else {
            self.queue.push_back(notification);
        }
    }

    /// Removes a toast wherever it currently lives.
    pub fn dismiss(&mut self, id: NotificationId) -> bool {
        if let Some(pos) = self.visible.iter().position(|n| n.id() == id) {
            self.visible.remove(pos);
            if let Some(queued) = self.queue.pop_front() {
                self.visible.push_back(queued);
            }
            return true;
        }
        if let Some(pos) = self.queue.iter().position(|n| n.id() == id) {
            self.queue.remove(pos);
            return true;
        }
        false
    }

    /// Drops every expired toast. Call on the periodic UI tick.
    pub fn tick(&mut self) {
        let expired: Vec<NotificationId> = self
            .visible
            .iter()
            .filter(|n| n.expired())
            .map(Notification::id)
            .collect();
        for id in expired {
            self.dismiss(id);
        }
    }

    pub fn handle_message(&mut self, message: &Message) {
        match message {
            Message::Dismiss(id) => {
                self.dismiss(*id);
            }
            Message::Tick => self.tick(),
        }
    }

    pub fn visible(&self) -> impl Iterator<Item = &Notification> {
        self.visible.iter()
    }

    #[must_use]
    pub fn has_notifications(&self) -> bool {
        !self.visible.is_empty() || !self.queue.is_empty()
    }

    #[must_use]
    pub fn queued_count(&self) -> usize {
        self.queue.len()
    }

    /// Renders the toast overlay (bottom-right, newest on top).
    pub fn view<'a>(&'a self, i18n: &'a I18n) -> Element<'a, Message> {
        let toasts: Vec<Element<'a, Message>> =
            self.visible().map(|n| toast_card(n, i18n)).collect();

        if toasts.is_empty() {
            return Container::new(text(""))
                .width(Length::Shrink)
                .height(Length::Shrink)
                .into();
        }

        let stack_column = Column::with_children(toasts)
            .spacing(spacing::XS)
            .align_x(alignment::Horizontal::Right);

        Container::new(stack_column)
            .width(Length::Fill)
            .height(Length::Fill)
            .align_x(alignment::Horizontal::Right)
            .align_y(alignment::Vertical::Bottom)
            .padding(spacing::MD)
            .into()
    }
}

/// Renders a single toast card: accent marker, message, dismiss button.
fn toast_card<'a>(notification: &'a Notification, i18n: &'a I18n) -> Element<'a, Message> {
    let accent = notification.severity().accent_color();

    let marker = Text::new("●").size(typography::BODY).color(accent);
    let message = Text::new(notification.resolve_text(i18n)).size(typography::BODY);
    let dismiss = button(Text::new("✕").size(typography::CAPTION))
        .on_press(Message::Dismiss(notification.id()))
        .padding(spacing::XXS)
        .style(dismiss_button_style);

    let content = Row::new()
        .spacing(spacing::SM)
        .align_y(alignment::Vertical::Center)
        .push(marker)
        .push(
            Container::new(message)
                .width(Length::Fill)
                .align_x(alignment::Horizontal::Left),
        )
        .push(dismiss);

    Container::new(content)
        .width(Length::Fixed(sizing::TOAST_WIDTH))
        .padding(spacing::SM)
        .style(move |theme: &Theme| toast_container_style(theme, accent))
        .into()
}

fn toast_container_style(theme: &Theme, accent_color: Color) -> container::Style {
    let bg_color = theme.extended_palette().background.base.color;

    container::Style {
        background: Some(iced::Background::Color(bg_color)),
        border: iced::Border {
            color: accent_color,
            width: border::WIDTH_MD,
            radius: radius::MD.into(),
        },
        shadow: shadow::MD,
        text_color: Some(theme.palette().text),
        ..Default::default()
    }
}

fn dismiss_button_style(theme: &Theme, status: button::Status) -> button::Style {
    let base = theme.extended_palette().background.base;
    let text_color = match status {
        button::Status::Hovered | button::Status::Pressed => theme.palette().danger,
        _ => base.text,
    };

    button::Style {
        background: None,
        text_color,
        border: iced::Border::default(),
        shadow: shadow::NONE,
        snap: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique() {
        let a = Notification::success("x");
        let b = Notification::success("x");
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn errors_never_expire_on_their_own() {
        assert!(Severity::Error.auto_dismiss_after().is_none());
        let n = Notification::error("key");
        assert!(!n.expired());
    }

    #[test]
    fn warnings_outlive_successes() {
        let warning = Severity::Warning.auto_dismiss_after().unwrap();
        let success = Severity::Success.auto_dismiss_after().unwrap();
        assert!(warning > success);
    }

    #[test]
    fn overflow_goes_to_the_queue() {
        let mut manager = Manager::new();
        for _ in 0..MAX_VISIBLE {
            manager.push(Notification::info("key"));
        }
        assert_eq!(manager.queued_count(), 0);

        manager.push(Notification::info("key"));
        assert_eq!(manager.visible().count(), MAX_VISIBLE);
        assert_eq!(manager.queued_count(), 1);
    }

    #[test]
    fn dismiss_promotes_from_the_queue() {
        let mut manager = Manager::new();
        let mut ids = Vec::new();
        for _ in 0..MAX_VISIBLE + 1 {
            let n = Notification::info("key");
            ids.push(n.id());
            manager.push(n);
        }

        assert!(manager.dismiss(ids[0]));
        assert_eq!(manager.visible().count(), MAX_VISIBLE);
        assert_eq!(manager.queued_count(), 0);
    }

    #[test]
    fn dismissing_unknown_id_is_a_no_op() {
        let mut manager = Manager::new();
        manager.push(Notification::info("key"));
        let bogus = Notification::info("other").id();
        assert!(!manager.dismiss(bogus));
        assert_eq!(manager.visible().count(), 1);
    }

    #[test]
    fn with_arg_accumulates() {
        let n = Notification::error("key")
            .with_arg("files", "a.jpg")
            .with_arg("count", "2");
        assert_eq!(n.message_args.len(), 2);
        assert_eq!(n.severity(), Severity::Error);
        assert_eq!(n.message_key(), "key");
    }
}
