//! SettingsMenu component: modal opened with the green button.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::{
    action::{Action, SettingsItem},
    app_state::AppState,
    component::Component,
    theme::{
        style_default, style_selected_focused, C_MUTED, C_PANEL_BORDER_FOCUSED, C_POPUP_BG,
        C_PRIMARY, C_SECONDARY,
    },
    widgets::pane_chrome::centered_rect,
};

#[derive(Default)]
pub struct SettingsMenu {
    index: usize,
}

impl SettingsMenu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.index = 0;
    }

    pub fn selected(&self) -> SettingsItem {
        SettingsItem::ALL[self.index.min(SettingsItem::ALL.len() - 1)]
    }
}

impl Component for SettingsMenu {
    fn handle_key(&mut self, key: KeyEvent, _state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.index = self.index.saturating_sub(1);
                vec![]
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.index = (self.index + 1).min(SettingsItem::ALL.len() - 1);
                vec![]
            }
            KeyCode::Enter => vec![Action::Settings(self.selected())],
            KeyCode::Esc | KeyCode::Backspace | KeyCode::F(2) | KeyCode::Char('g') => {
                vec![Action::CloseSettings]
            }
            KeyCode::Char('q') => vec![Action::Quit],
            _ => vec![],
        }
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, _focused: bool, state: &AppState) {
        let popup = centered_rect(50, SettingsItem::ALL.len() as u16 + 4, area);
        frame.render_widget(Clear, popup);

        let mut lines = vec![Line::from("")];
        for (i, item) in SettingsItem::ALL.iter().enumerate() {
            let style = if i == self.index {
                style_selected_focused()
            } else {
                style_default()
            };
            let mut spans = vec![Span::styled(format!("  {}", state.t(item.label_key())), style)];
            if *item == SettingsItem::Language {
                spans.push(Span::styled(
                    format!("  [{}]", state.language.code()),
                    Style::default().fg(C_SECONDARY),
                ));
            }
            if *item == SettingsItem::About {
                spans.push(Span::styled(
                    format!("  v{}", env!("CARGO_PKG_VERSION")),
                    Style::default().fg(C_MUTED),
                ));
            }
            lines.push(Line::from(spans));
        }

        frame.render_widget(
            Paragraph::new(lines).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(C_PANEL_BORDER_FOCUSED))
                    .title(Span::styled(
                        format!(" {} ", state.t("settingsTitle")),
                        Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD),
                    ))
                    .style(Style::default().bg(C_POPUP_BG)),
            ),
            popup,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::debug_log::DebugLog;
    use iptv_core::config::DebugConfig;
    use iptv_core::favorites::Favorites;
    use iptv_core::i18n::Language;
    use iptv_core::session::Session;
    use ratatui::crossterm::event::KeyModifiers;

    #[test]
    fn test_cursor_clamps_and_enter_selects() {
        let session = Session::new(Vec::new(), Favorites::new());
        let debug = DebugLog::new(&DebugConfig::default());
        let state = AppState {
            session: &session,
            language: Language::En,
            debug: &debug,
        };
        let press = |menu: &mut SettingsMenu, code| {
            menu.handle_key(KeyEvent::new(code, KeyModifiers::NONE), &state)
        };

        let mut menu = SettingsMenu::new();
        press(&mut menu, KeyCode::Up);
        assert_eq!(menu.selected(), SettingsItem::Language);
        for _ in 0..10 {
            press(&mut menu, KeyCode::Down);
        }
        assert_eq!(menu.selected(), SettingsItem::LegalDisclaimer);
        assert_eq!(
            press(&mut menu, KeyCode::Enter),
            vec![Action::Settings(SettingsItem::LegalDisclaimer)]
        );
        assert_eq!(press(&mut menu, KeyCode::Esc), vec![Action::CloseSettings]);
    }
}
