//! DebugPanel component: tail of the in-memory debug log.

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::{
    app_state::AppState,
    component::Component,
    theme::{C_MUTED, C_SECONDARY},
    widgets::pane_chrome::{pane_chrome, Badge},
};

pub struct DebugPanel;

impl DebugPanel {
    pub fn new() -> Self {
        Self
    }
}

impl Component for DebugPanel {
    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        let count = state.debug.len().to_string();
        let block = pane_chrome(
            "debug",
            Some("L"),
            focused,
            Some(Badge {
                text: &count,
                color: C_MUTED,
            }),
        );
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let rows = inner.height as usize;
        let skip = state.debug.len().saturating_sub(rows);
        let lines: Vec<Line> = state
            .debug
            .entries()
            .skip(skip)
            .map(|e| Line::from(Span::styled(e.to_string(), Style::default().fg(C_SECONDARY))))
            .collect();
        frame.render_widget(Paragraph::new(lines), inner);
    }
}
