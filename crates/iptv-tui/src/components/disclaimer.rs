//! Disclaimer component: legal notice that must be accepted once.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::{
    action::Action,
    app_state::AppState,
    component::Component,
    theme::{C_ACCENT, C_MUTED, C_PANEL_BORDER_FOCUSED, C_POPUP_BG, C_PRIMARY},
    widgets::pane_chrome::centered_rect,
};

pub struct Disclaimer;

impl Disclaimer {
    pub fn new() -> Self {
        Self
    }
}

impl Component for Disclaimer {
    fn handle_key(&mut self, key: KeyEvent, _state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }
        match key.code {
            KeyCode::Enter => vec![Action::AcceptDisclaimer],
            KeyCode::Esc | KeyCode::Char('q') => vec![Action::Quit],
            _ => vec![],
        }
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, _focused: bool, state: &AppState) {
        let popup = centered_rect(70, 14, area);
        frame.render_widget(Clear, popup);

        let mut lines: Vec<Line> = state
            .t("disclaimerText")
            .lines()
            .map(|l| Line::from(Span::styled(format!(" {}", l), Style::default().fg(C_PRIMARY))))
            .collect();
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled(
                format!(" [Enter] {}", state.t("accept")),
                Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("   [Esc] {}", state.t("exit")), Style::default().fg(C_MUTED)),
        ]));

        frame.render_widget(
            Paragraph::new(lines)
                .wrap(Wrap { trim: false })
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(C_PANEL_BORDER_FOCUSED))
                        .title(Span::styled(
                            format!(" {} ", state.t("disclaimerTitle")),
                            Style::default().fg(C_ACCENT).add_modifier(Modifier::BOLD),
                        ))
                        .style(Style::default().bg(C_POPUP_BG)),
                ),
            popup,
        );
    }
}
