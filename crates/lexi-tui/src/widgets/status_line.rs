//! Status line widget: the bottom row that shows the latest notification.
//!
//! A notification stays visible for `ui.toast_ms` and then the row falls back
//! to keybinding hints. Expiry is checked at render time; the event loop
//! redraws often enough for the message to disappear on its own.

use crate::theme::Theme;
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local};
use lexi_core::{Notification, NotificationLevel};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Status {
    pub note: Notification,
    /// Wall-clock time shown beside the message.
    pub shown_at: DateTime<Local>,
}

#[derive(Debug, Default)]
pub struct StatusState {
    pub current: Option<Status>,
}

impl StatusState {
    /// Replace whatever is showing with `note`.
    pub fn push(&mut self, note: Notification) {
        tracing::debug!(level = %note.level, message = %note.message, "status: notification");
        self.current = Some(Status {
            note,
            shown_at: Local::now(),
        });
    }

    /// The current notification if it has not yet expired.
    pub fn visible(&self, ttl: Duration) -> Option<&Status> {
        self.current
            .as_ref()
            .filter(|s| s.note.raised_at.elapsed() < ttl)
    }
}

pub struct StatusLine<'a> {
    status: Option<&'a Status>,
    timestamp_format: &'a str,
    theme: &'a Theme,
}

impl<'a> StatusLine<'a> {
    pub fn new(status: Option<&'a Status>, timestamp_format: &'a str, theme: &'a Theme) -> Self {
        Self { status, timestamp_format, theme }
    }
}

impl Widget for StatusLine<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let dim = Style::default().add_modifier(Modifier::DIM);

        let line = match self.status {
            Some(status) => {
                let style = match status.note.level {
                    NotificationLevel::Success => self.theme.status_success,
                    NotificationLevel::Failure => self.theme.status_failure,
                };
                Line::from(vec![
                    Span::styled(
                        format!(" {} ", status.shown_at.format(checked_format(self.timestamp_format))),
                        dim,
                    ),
                    Span::styled(status.note.message.clone(), style),
                ])
            }
            None => Line::from(Span::styled(
                " q:quit  ?:help  /:search  i:save internal  e:save external  c:copy external",
                dim,
            )),
        };

        buf.set_line(area.x, area.y, &line, area.width);
    }
}

/// `format!` panics on a malformed strftime string, so a bad config value
/// falls back to the default format.
fn checked_format(fmt: &str) -> &str {
    if StrftimeItems::new(fmt).any(|item| matches!(item, Item::Error)) {
        "%H:%M:%S"
    } else {
        fmt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notification_expires() {
        let mut s = StatusState::default();
        s.push(Notification::success("saved"));
        assert!(s.visible(Duration::from_secs(60)).is_some());
        assert!(s.visible(Duration::ZERO).is_none());
    }

    #[test]
    fn newer_notification_replaces_older() {
        let mut s = StatusState::default();
        s.push(Notification::success("first"));
        s.push(Notification::failure("second"));
        let shown = s.visible(Duration::from_secs(60)).unwrap();
        assert_eq!(shown.note.message, "second");
    }

    #[test]
    fn malformed_timestamp_format_falls_back() {
        assert_eq!(checked_format("%Q%"), "%H:%M:%S");
        assert_eq!(checked_format("%H:%M"), "%H:%M");
    }
}
