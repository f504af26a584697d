//! Status bar: bottom line with the active playlist and remote key hints.

use iptv_core::session::Mode;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::action::Screen;
use crate::app_state::AppState;
use crate::theme::{
    C_KEY_BLUE, C_KEY_GREEN, C_KEY_RED, C_KEY_YELLOW, C_LOADING, C_MUTED, C_PLAYING, C_SECONDARY,
    C_SEPARATOR,
};

fn mode_label(screen: Screen, mode: Mode) -> (&'static str, Color) {
    match screen {
        Screen::Disclaimer => ("LEGAL", C_SECONDARY),
        Screen::Setup => ("SETUP", C_SECONDARY),
        Screen::Settings => ("SETTINGS", C_SECONDARY),
        Screen::Main => match mode {
            Mode::Browsing => ("BROWSE", C_SECONDARY),
            Mode::Playing => ("PLAYING", C_PLAYING),
            Mode::PlaylistSelecting => ("LISTS", C_LOADING),
        },
    }
}

fn color_key<'a>(color: Color, key: &'a str, label: String) -> Vec<Span<'a>> {
    vec![
        Span::styled("● ", Style::default().fg(color)),
        Span::styled(key, Style::default().fg(C_SECONDARY)),
        Span::styled(format!(" {}  ", label), Style::default().fg(C_MUTED)),
    ]
}

/// Draw the key hints footer (one row).
pub fn draw_keys_bar(frame: &mut Frame, area: Rect, screen: Screen, state: &AppState) {
    let (label, color) = mode_label(screen, state.session.mode);
    let mut spans = vec![
        Span::styled(
            format!(" {} ", label),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
    ];

    match screen {
        Screen::Disclaimer => spans.push(Span::styled(
            format!(" Enter {}  Esc {}", state.t("accept"), state.t("exit")),
            Style::default().fg(C_MUTED),
        )),
        Screen::Setup => spans.push(Span::styled(
            format!(" Tab field  Enter {}  Esc {}", state.t("save"), state.t("cancel")),
            Style::default().fg(C_MUTED),
        )),
        Screen::Settings => spans.push(Span::styled(
            format!(" ↑↓ move  Enter select  Esc {}", state.t("back")),
            Style::default().fg(C_MUTED),
        )),
        Screen::Main => {
            spans.push(Span::styled(
                " ↑↓←→ move  Enter ok  Bksp back  ",
                Style::default().fg(C_MUTED),
            ));
            if state.session.mode == Mode::PlaylistSelecting {
                spans.push(Span::styled(
                    format!("a {}  ", state.t("addPlaylist")),
                    Style::default().fg(C_MUTED),
                ));
            } else {
                spans.extend(color_key(C_KEY_YELLOW, "F3/y", state.t("favorites")));
            }
            spans.extend(color_key(C_KEY_GREEN, "F2/g", state.t("settings")));
            spans.push(Span::styled("● ", Style::default().fg(C_KEY_RED)));
            spans.push(Span::styled("● ", Style::default().fg(C_KEY_BLUE)));
            let debug_hint = if state.debug.is_enabled() {
                " L debug (rec)  q quit"
            } else {
                " L debug  q quit"
            };
            spans.push(Span::styled(debug_hint, Style::default().fg(C_MUTED)));
        }
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Header: playlist name on the left, remote-control address on the right.
pub fn draw_header(frame: &mut Frame, area: Rect, state: &AppState, remote: Option<&str>) {
    let playlist = state
        .session
        .active_playlist()
        .map(|p| p.name.clone())
        .unwrap_or_else(|| state.t("selectPlaylist"));
    let mut spans = vec![
        Span::styled(" iptv ", Style::default().fg(C_SECONDARY).add_modifier(Modifier::BOLD)),
        Span::styled("│ ", Style::default().fg(C_SEPARATOR)),
        Span::styled(playlist, Style::default().fg(C_SECONDARY)),
    ];
    if state.session.is_loading() {
        spans.push(Span::styled(
            format!("  {}", state.t("loading")),
            Style::default().fg(C_LOADING),
        ));
    }
    if let Some(addr) = remote {
        spans.push(Span::styled(
            format!("  remote: {}", addr),
            Style::default().fg(C_MUTED),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
