//! Button bar widget: the three export actions in a row.
//!
//! `←`/`h` and `→`/`l` move between buttons; `Enter` is handled by the app
//! shell, which runs [`ButtonBarState::selected`].

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use lexi_core::ExportAction;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction as LayoutDir, Layout, Rect},
    widgets::{Block, Paragraph, Widget},
};

#[derive(Debug, Default)]
pub struct ButtonBarState {
    /// Index into [`ExportAction::ALL`].
    pub cursor: usize,
}

impl ButtonBarState {
    pub fn selected(&self) -> ExportAction {
        ExportAction::ALL[self.cursor.min(ExportAction::ALL.len() - 1)]
    }

    pub fn handle(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Nav(Direction::Left) => {
                self.cursor = self.cursor.saturating_sub(1);
            }
            AppEvent::Nav(Direction::Right) => {
                self.cursor = (self.cursor + 1).min(ExportAction::ALL.len() - 1);
            }
            _ => return,
        }
        tracing::debug!(button = %self.selected(), "buttons: moved");
    }
}

pub struct ButtonBar<'a> {
    state: &'a ButtonBarState,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> ButtonBar<'a> {
    pub fn new(state: &'a ButtonBarState, focused: bool, theme: &'a Theme) -> Self {
        Self { state, focused, theme }
    }
}

impl Widget for ButtonBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let cells = Layout::default()
            .direction(LayoutDir::Horizontal)
            .constraints([Constraint::Ratio(1, 3); 3])
            .split(area);

        for (i, action) in ExportAction::ALL.iter().enumerate() {
            let active = self.focused && i == self.state.cursor;
            let (border, label) = if active {
                (self.theme.border_focused, self.theme.button_active)
            } else {
                (self.theme.border_unfocused, self.theme.button)
            };
            let block = Block::bordered().border_style(border);
            let inner = block.inner(cells[i]);
            block.render(cells[i], buf);
            Paragraph::new(action.label())
                .style(label)
                .alignment(Alignment::Center)
                .render(inner, buf);
        }
    }
}
