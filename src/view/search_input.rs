//! Search prompt shown in the status bar while a query is being typed.

use crate::state::SearchState;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

/// Search prompt widget. Renders nothing unless the editor is open.
pub struct SearchInput<'a> {
    search_state: &'a SearchState,
    style: Style,
}

impl<'a> SearchInput<'a> {
    /// Create new SearchInput widget.
    pub fn new(search_state: &'a SearchState, style: Style) -> Self {
        Self {
            search_state,
            style,
        }
    }

    /// Prompt line: `/query` followed by a block cursor.
    pub fn line(&self) -> Option<Line<'static>> {
        match self.search_state {
            SearchState::Editing { query } => Some(Line::from(vec![
                Span::styled(format!("/{query}"), self.style),
                Span::styled(" ", Style::default().add_modifier(Modifier::REVERSED)),
            ])),
            SearchState::Inactive { .. } => None,
        }
    }
}

impl Widget for SearchInput<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if let Some(line) = self.line() {
            Paragraph::new(line).render(area, buf);
        }
    }
}
