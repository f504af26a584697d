//! PlayerView component: what the terminal shows while mpv plays, with
//! the info overlay at the bottom.

use iptv_core::session::Session;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::{
    app_state::AppState,
    component::Component,
    theme::{C_FAVORITE, C_GROUP, C_MUTED, C_PANEL_BORDER_FOCUSED, C_POPUP_BG, C_PRIMARY},
};

pub struct PlayerView;

impl PlayerView {
    pub fn new() -> Self {
        Self
    }
}

/// "n / total" position of the playing channel in the full list.
fn position_label(session: &Session) -> Option<String> {
    let id = session.playback.channel_id.as_deref()?;
    let channels = session.channels();
    let pos = channels.iter().position(|c| c.id == id)?;
    Some(format!("{} / {}", pos + 1, channels.len()))
}

impl Component for PlayerView {
    fn draw(&mut self, frame: &mut Frame, area: Rect, _focused: bool, state: &AppState) {
        let session = state.session;
        let Some(channel) = session.current_channel() else {
            return;
        };

        let center = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage(40),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(area);
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                format!("▶ {}", channel.name),
                Style::default().fg(C_MUTED),
            )))
            .centered(),
            center[1],
        );

        if !session.playback.overlay_visible {
            return;
        }

        let height = 5.min(area.height);
        let overlay = Rect {
            x: area.x,
            y: area.y + area.height - height,
            width: area.width,
            height,
        };
        let favorite = session.is_favorite(&channel.id);
        let lines = vec![
            Line::from(vec![
                Span::styled(
                    format!(" {} ", channel.number),
                    Style::default().fg(C_MUTED).add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    channel.name.clone(),
                    Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    if favorite { "  ★" } else { "" },
                    Style::default().fg(C_FAVORITE),
                ),
            ]),
            Line::from(vec![
                Span::styled(format!(" {}", channel.group_title), Style::default().fg(C_GROUP)),
                Span::styled(
                    format!("   {}", position_label(session).unwrap_or_default()),
                    Style::default().fg(C_MUTED),
                ),
            ]),
            Line::from(Span::styled(
                format!(
                    " ↑↓ channel  ● {}  Bksp {}",
                    if favorite {
                        state.t("removeFromFavorites")
                    } else {
                        state.t("addToFavorites")
                    },
                    state.t("back")
                ),
                Style::default().fg(C_MUTED),
            )),
        ];

        frame.render_widget(Clear, overlay);
        frame.render_widget(
            Paragraph::new(lines).block(
                Block::default()
                    .borders(Borders::TOP)
                    .title(Span::styled(
                        format!(" {} ", state.t("nowPlaying")),
                        Style::default().fg(C_PRIMARY),
                    ))
                    .border_style(Style::default().fg(C_PANEL_BORDER_FOCUSED))
                    .style(Style::default().bg(C_POPUP_BG)),
            ),
            overlay,
        );
    }
}
