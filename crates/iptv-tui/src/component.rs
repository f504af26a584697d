//! Component trait: the interface every screen and panel implements.
//!
//! Components own their own widget state (cursor, list offsets, text
//! inputs), read everything else from `AppState`, and answer key presses
//! with `Vec<Action>` for the App to dispatch.

use ratatui::crossterm::event::KeyEvent;
use ratatui::{layout::Rect, Frame};

use crate::action::Action;
use crate::app_state::AppState;

pub trait Component {
    /// Handle a key event while this component owns the keyboard.
    fn handle_key(&mut self, _key: KeyEvent, _state: &AppState) -> Vec<Action> {
        Vec::new()
    }

    /// Render the component into `area`.
    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState);
}
