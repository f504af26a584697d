//! GroupList component: left panel of the browser.

use iptv_core::focus::Panel;
use iptv_core::model::FAVORITES_GROUP;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{List, ListItem, ListState},
    Frame,
};

use crate::{
    app_state::AppState,
    component::Component,
    theme::{style_default, style_selected, style_selected_focused, C_FAVORITE, C_GROUP, C_MUTED},
    widgets::pane_chrome::{pane_chrome, Badge},
};

#[derive(Default)]
pub struct GroupList {
    list_state: ListState,
}

impl GroupList {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Component for GroupList {
    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        let session = state.session;
        let groups = session.groups();
        let title = state.t("groups");
        let count = format!("{}", groups.len().saturating_sub(1));
        let block = pane_chrome(
            &title,
            Some("←"),
            focused,
            Some(Badge {
                text: &count,
                color: C_MUTED,
            }),
        );
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let cursor = session.focus.is_focused(Panel::Groups).then(|| session.focus.index());
        let current = session.focus.current_group();

        let items: Vec<ListItem> = groups
            .iter()
            .enumerate()
            .map(|(i, group)| {
                let is_cursor = cursor == Some(i);
                let style = match (is_cursor, focused) {
                    (true, true) => style_selected_focused(),
                    (true, false) => style_selected(),
                    _ => style_default(),
                };
                let marker = if current == Some(group.as_str()) { "▸ " } else { "  " };
                let label = if group == FAVORITES_GROUP {
                    Span::styled(format!("★ {}", state.t("myFavorites")), Style::default().fg(C_FAVORITE))
                } else {
                    Span::raw(group.clone())
                };
                ListItem::new(Line::from(vec![
                    Span::styled(marker, Style::default().fg(C_GROUP)),
                    label,
                ]))
                .style(style)
            })
            .collect();

        self.list_state.select(cursor);
        frame.render_stateful_widget(List::new(items), inner, &mut self.list_state);
    }
}
