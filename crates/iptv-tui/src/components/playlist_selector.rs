//! PlaylistSelector component: saved playlists, shown in PlaylistSelecting mode.

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
    theme::{style_default, style_selected_focused, C_LOADING, C_MUTED, C_SECONDARY},
    widgets::pane_chrome::{pane_chrome, Badge},
};

#[derive(Default)]
pub struct PlaylistSelector {
    list_state: ListState,
}

impl PlaylistSelector {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Component for PlaylistSelector {
    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        let session = state.session;
        let title = state.t("selectPlaylist");
        let loading = state.t("loading");
        let badge = session.is_loading().then(|| Badge {
            text: loading.as_str(),
            color: C_LOADING,
        });
        let block = pane_chrome(&title, None, focused, badge);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if session.playlists.is_empty() {
            frame.render_widget(
                Paragraph::new(Span::styled(
                    format!("  a: {}", state.t("addPlaylist")),
                    Style::default().fg(C_MUTED),
                )),
                inner,
            );
            return;
        }

        let loading_id = session.pending_load().map(|l| l.playlist_id.as_str());
        let items: Vec<ListItem> = session
            .playlists
            .iter()
            .enumerate()
            .map(|(i, playlist)| {
                let style = if i == session.selector_index() {
                    style_selected_focused()
                } else {
                    style_default()
                };
                let mut spans = vec![
                    Span::raw(format!(" {} ", playlist.name)),
                    Span::styled(playlist.url.clone(), Style::default().fg(C_SECONDARY)),
                ];
                if !playlist.channels.is_empty() {
                    spans.push(Span::styled(
                        format!("  {} ch", playlist.channels.len()),
                        Style::default().fg(C_MUTED),
                    ));
                }
                if loading_id == Some(playlist.id.as_str()) {
                    spans.push(Span::styled(
                        format!("  {}", state.t("loadingChannels")),
                        Style::default().fg(C_LOADING),
                    ));
                }
                ListItem::new(Line::from(spans)).style(style)
            })
            .collect();

        self.list_state.select(Some(session.selector_index()));
        frame.render_stateful_widget(List::new(items), inner, &mut self.list_state);
    }
}
