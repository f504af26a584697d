//! ChannelList component (right panel): channels of the current group.

use iptv_core::focus::Panel;
use iptv_core::model::FAVORITES_GROUP;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::{
    app_state::AppState,
    component::Component,
    theme::{
        style_default, style_selected, style_selected_focused, C_FAVORITE, C_MUTED, C_NUMBER_HINT,
    },
    widgets::pane_chrome::{pane_chrome, Badge},
};

#[derive(Default)]
pub struct ChannelList {
    list_state: ListState,
}

impl ChannelList {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Translation key for the placeholder of an empty channel panel.
fn empty_message_key(current_group: Option<&str>) -> &'static str {
    match current_group {
        None => "selectGroup",
        Some(FAVORITES_GROUP) => "noFavorites",
        Some(_) => "noChannels",
    }
}

impl Component for ChannelList {
    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        let session = state.session;
        let channels = session.visible_channels();
        let group = session.focus.current_group();
        let title = match group {
            Some(FAVORITES_GROUP) => state.t("myFavorites"),
            Some(g) => g.to_string(),
            None => state.t("channels"),
        };
        let cursor = session
            .focus
            .is_focused(Panel::Channels)
            .then(|| session.focus.index());
        let badge_text = match cursor {
            Some(i) if !channels.is_empty() => format!("{}/{}", i + 1, channels.len()),
            _ => channels.len().to_string(),
        };
        let block = pane_chrome(
            &title,
            Some("→"),
            focused,
            Some(Badge {
                text: &badge_text,
                color: C_MUTED,
            }),
        );
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if channels.is_empty() {
            frame.render_widget(
                Paragraph::new(Span::styled(
                    format!("  {}", state.t(empty_message_key(group))),
                    Style::default().fg(C_MUTED),
                )),
                inner,
            );
            return;
        }

        let number_width = channels
            .iter()
            .map(|c| c.number.to_string().len())
            .max()
            .unwrap_or(1);

        let items: Vec<ListItem> = channels
            .iter()
            .enumerate()
            .map(|(i, channel)| {
                let style = match (cursor == Some(i), focused) {
                    (true, true) => style_selected_focused(),
                    (true, false) => style_selected(),
                    _ => style_default(),
                };
                let star = if session.is_favorite(&channel.id) { "★ " } else { "  " };
                ListItem::new(Line::from(vec![
                    Span::styled(
                        format!("{:>width$} ", channel.number, width = number_width),
                        Style::default().fg(C_NUMBER_HINT),
                    ),
                    Span::styled(star, Style::default().fg(C_FAVORITE)),
                    Span::raw(channel.name.clone()),
                ]))
                .style(style)
            })
            .collect();

        self.list_state.select(cursor);
        frame.render_stateful_widget(List::new(items), inner, &mut self.list_state);
    }
}
