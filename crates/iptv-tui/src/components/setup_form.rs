//! SetupForm component: URL + optional name for a new playlist.

use ratatui::crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use tui_input::{backend::crossterm::EventHandler, Input};

use crate::{
    action::Action,
    app_state::AppState,
    component::Component,
    theme::{style_input, C_MUTED, C_PANEL_BORDER_FOCUSED, C_POPUP_BG, C_PRIMARY, C_SECONDARY},
    widgets::pane_chrome::centered_rect,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Field {
    #[default]
    Url,
    Name,
}

#[derive(Default)]
pub struct SetupForm {
    url: Input,
    name: Input,
    field: Field,
}

impl SetupForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    fn focused_input(&mut self) -> &mut Input {
        match self.field {
            Field::Url => &mut self.url,
            Field::Name => &mut self.name,
        }
    }
}

impl Component for SetupForm {
    fn handle_key(&mut self, key: KeyEvent, _state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }
        match key.code {
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                self.field = match self.field {
                    Field::Url => Field::Name,
                    Field::Name => Field::Url,
                };
                vec![]
            }
            KeyCode::Enter => vec![Action::SubmitPlaylist {
                url: self.url.value().to_string(),
                name: self.name.value().to_string(),
            }],
            KeyCode::Esc => vec![Action::CancelSetup],
            _ => {
                self.focused_input().handle_event(&Event::Key(key));
                vec![]
            }
        }
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, _focused: bool, state: &AppState) {
        let popup = centered_rect(70, 10, area);
        frame.render_widget(Clear, popup);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(C_PANEL_BORDER_FOCUSED))
            .title(Span::styled(
                format!(" {} ", state.t("setupTitle")),
                Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD),
            ))
            .style(Style::default().bg(C_POPUP_BG));
        let inner = block.inner(popup);
        frame.render_widget(block, popup);

        let width = inner.width.saturating_sub(2) as usize;
        let rows = [
            (Field::Url, "labelUrl", "urlPlaceholder", &self.url, inner.y + 1),
            (Field::Name, "labelName", "namePlaceholder", &self.name, inner.y + 4),
        ];
        for (field, label, placeholder, input, y) in rows {
            if y + 1 >= inner.y + inner.height {
                break;
            }
            let active = self.field == field;
            let label_style = if active {
                Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(C_SECONDARY)
            };
            frame.render_widget(
                Paragraph::new(Span::styled(format!(" {}", state.t(label)), label_style)),
                Rect { y, height: 1, ..inner },
            );

            let scroll = input.visual_scroll(width);
            let value = input.value();
            let text = if value.is_empty() {
                Span::styled(format!(" {}", state.t(placeholder)), Style::default().fg(C_MUTED))
            } else {
                let visible: String = value.chars().skip(scroll).collect();
                Span::raw(format!(" {}", visible))
            };
            let field_area = Rect {
                y: y + 1,
                height: 1,
                ..inner
            };
            frame.render_widget(Paragraph::new(Line::from(text)).style(style_input()), field_area);

            if active {
                let cursor_x = field_area.x + 1 + (input.visual_cursor().saturating_sub(scroll)) as u16;
                frame.set_cursor_position((
                    cursor_x.min(field_area.x + field_area.width.saturating_sub(1)),
                    field_area.y,
                ));
            }
        }
    }
}
