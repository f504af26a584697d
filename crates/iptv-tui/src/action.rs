//! Action enum: everything a key press or a modal screen can ask the App to
//! do, plus the keyboard → remote mapping used on the main screen.

use iptv_core::navigation::InputEvent;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Which screen currently owns the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Disclaimer,
    Setup,
    Settings,
    /// Selector, group/channel panels and the player, depending on `Mode`.
    Main,
}

/// Entries of the settings modal, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsItem {
    Language,
    ListManagement,
    About,
    LegalDisclaimer,
}

impl SettingsItem {
    pub const ALL: [SettingsItem; 4] = [
        SettingsItem::Language,
        SettingsItem::ListManagement,
        SettingsItem::About,
        SettingsItem::LegalDisclaimer,
    ];

    /// Translation key of the label.
    pub fn label_key(self) -> &'static str {
        match self {
            SettingsItem::Language => "language",
            SettingsItem::ListManagement => "listManagement",
            SettingsItem::About => "about",
            SettingsItem::LegalDisclaimer => "legalDisclaimer",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// A remote-control button, fed to the navigation state machine.
    Input(InputEvent),

    // ── Disclaimer ───────────────────────────────────────────────────────────
    AcceptDisclaimer,

    // ── Setup form ───────────────────────────────────────────────────────────
    SubmitPlaylist { url: String, name: String },
    CancelSetup,

    // ── Settings ─────────────────────────────────────────────────────────────
    CloseSettings,
    Settings(SettingsItem),

    // ── System ───────────────────────────────────────────────────────────────
    ToggleDebugPanel,
    Quit,
}

/// Map a key on the main screen to an action.
///
/// Arrows, Enter and Backspace/Esc behave like the d-pad; the color buttons
/// live on F1–F4 with letter aliases (r/g/y/b).
pub fn main_screen_action(key: KeyEvent) -> Option<Action> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Action::Quit),
            _ => None,
        };
    }
    let input = match key.code {
        KeyCode::Up | KeyCode::Char('k') => InputEvent::Up,
        KeyCode::Down | KeyCode::Char('j') => InputEvent::Down,
        KeyCode::Left | KeyCode::Char('h') => InputEvent::Left,
        KeyCode::Right | KeyCode::Char('l') => InputEvent::Right,
        KeyCode::Enter => InputEvent::Select,
        KeyCode::Esc | KeyCode::Backspace => InputEvent::Back,
        KeyCode::F(1) | KeyCode::Char('r') => InputEvent::Reserved,
        KeyCode::F(2) | KeyCode::Char('g') => InputEvent::OpenSettings,
        KeyCode::F(3) | KeyCode::Char('y') => InputEvent::FavoriteToggle,
        KeyCode::F(4) | KeyCode::Char('b') => InputEvent::Reserved,
        KeyCode::Char('a') | KeyCode::Insert => InputEvent::AddNew,
        KeyCode::Char('L') => return Some(Action::ToggleDebugPanel),
        KeyCode::Char('q') => return Some(Action::Quit),
        _ => return None,
    };
    Some(Action::Input(input))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_dpad_keys() {
        assert_eq!(main_screen_action(key(KeyCode::Up)), Some(Action::Input(InputEvent::Up)));
        assert_eq!(
            main_screen_action(key(KeyCode::Enter)),
            Some(Action::Input(InputEvent::Select))
        );
        assert_eq!(
            main_screen_action(key(KeyCode::Backspace)),
            Some(Action::Input(InputEvent::Back))
        );
    }

    #[test]
    fn test_color_buttons() {
        assert_eq!(
            main_screen_action(key(KeyCode::F(3))),
            Some(Action::Input(InputEvent::FavoriteToggle))
        );
        assert_eq!(
            main_screen_action(key(KeyCode::Char('g'))),
            Some(Action::Input(InputEvent::OpenSettings))
        );
        assert_eq!(
            main_screen_action(key(KeyCode::F(1))),
            Some(Action::Input(InputEvent::Reserved))
        );
    }

    #[test]
    fn test_quit_and_release() {
        assert_eq!(
            main_screen_action(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Action::Quit)
        );
        let mut release = key(KeyCode::Up);
        release.kind = KeyEventKind::Release;
        assert_eq!(main_screen_action(release), None);
        assert_eq!(main_screen_action(key(KeyCode::Char('z'))), None);
    }
}
