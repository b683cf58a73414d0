//! Result list widget: the lines produced by the latest search.
//!
//! Holds either a single definition (exact match) or the words containing
//! the query. `↑`/`k` and `↓`/`j` move the highlight; the app shell copies the
//! highlighted line into the query bar on `Enter`.

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use lexi_core::SearchResults;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, List, ListItem, ListState, Paragraph, StatefulWidget, Widget},
};

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct ResultListState {
    pub items: Vec<String>,
    /// True when `items` holds the definition of an exact match.
    pub is_definition: bool,
    /// Index of the highlighted item.
    pub cursor: usize,
}

impl ResultListState {
    /// Replace the contents with a fresh search outcome.
    pub fn set(&mut self, results: SearchResults) {
        self.is_definition = results.is_definition();
        self.items = results.into_items();
        self.cursor = 0;
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.is_definition = false;
        self.cursor = 0;
    }

    pub fn selected(&self) -> Option<&str> {
        self.items.get(self.cursor).map(String::as_str)
    }

    pub fn handle(&mut self, event: &AppEvent) {
        if self.items.is_empty() {
            return;
        }
        match event {
            AppEvent::Nav(Direction::Up) => {
                self.cursor = self.cursor.saturating_sub(1);
                tracing::debug!(cursor = self.cursor, "results: cursor up");
            }
            AppEvent::Nav(Direction::Down) => {
                if self.cursor + 1 < self.items.len() {
                    self.cursor += 1;
                }
                tracing::debug!(cursor = self.cursor, "results: cursor down");
            }
            _ => {}
        }
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct ResultList<'a> {
    state: &'a ResultListState,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> ResultList<'a> {
    pub fn new(state: &'a ResultListState, focused: bool, theme: &'a Theme) -> Self {
        Self { state, focused, theme }
    }
}

impl Widget for ResultList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            self.theme.border_focused
        } else {
            self.theme.border_unfocused
        };

        let title = if self.state.is_definition {
            "Definition".to_string()
        } else {
            format!("Words ({})", self.state.items.len())
        };

        let block = Block::bordered().title(title).border_style(border_style);
        let inner = block.inner(area);
        block.render(area, buf);

        if self.state.items.is_empty() {
            Paragraph::new(Line::from(Span::styled(
                "no matches",
                Style::default().add_modifier(Modifier::DIM),
            )))
            .render(inner, buf);
            return;
        }

        let item_style = if self.state.is_definition {
            self.theme.definition
        } else {
            self.theme.word
        };
        let items: Vec<ListItem> = self
            .state
            .items
            .iter()
            .map(|text| ListItem::new(Line::from(Span::styled(text.as_str(), item_style))))
            .collect();

        let highlight = if self.focused {
            self.theme.selection
        } else {
            Style::default()
        };
        let list = List::new(items).highlight_style(highlight);
        let mut list_state = ListState::default().with_selected(Some(self.state.cursor));
        StatefulWidget::render(list, inner, buf, &mut list_state);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
