//! NavigationController: the remote-control state machine.
//!
//! `handle_input` is the only place key presses mutate the [`Session`]. It
//! never performs I/O: everything the outside world has to do (redraw, start
//! mpv, arm a timer, write the store, fetch a playlist) comes back as an
//! [`Effect`] for the caller to execute in order.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::focus::Panel;
use crate::session::{Mode, Session};

/// One discrete remote-control key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputEvent {
    Up,
    Down,
    Left,
    Right,
    /// OK / Enter.
    Select,
    Back,
    /// Yellow button.
    FavoriteToggle,
    /// Green button.
    OpenSettings,
    /// Add a new playlist from the selector.
    AddNew,
    /// Red and blue buttons; no function yet.
    Reserved,
}

/// Which part of the screen needs redrawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Groups,
    Channels,
    Selector,
    Player,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    Info,
    Success,
    Error,
}

/// Side effect requested by a state transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Render(View),
    StartPlayback { channel_id: String, stream_url: String },
    StopPlayback,
    /// Replace any pending overlay auto-hide with a new one for `generation`.
    ArmOverlayTimer { generation: u64 },
    CancelOverlayTimer,
    /// Transient notification; `key` is a translation key.
    Notify { key: &'static str, notice: Notice },
    PersistFavorites,
    PersistPlaylists,
    OpenSettings,
    OpenSetupForm,
    /// Fetch and parse `url`, then report back with `request_id`.
    LoadPlaylist { request_id: u64, url: String },
    /// Abort whatever fetch is in flight.
    CancelLoad,
}

/// Apply one input event to the session.
pub fn handle_input(session: &mut Session, event: InputEvent) -> Vec<Effect> {
    let effects = match session.mode {
        Mode::PlaylistSelecting => selecting(session, event),
        Mode::Playing => playing(session, event),
        Mode::Browsing => browsing(session, event),
    };
    debug!(
        "nav: {:?} -> mode={:?} panel={:?} index={} effects={}",
        event,
        session.mode,
        session.focus.panel(),
        session.focus.index(),
        effects.len()
    );
    effects
}

fn panel_view(panel: Panel) -> View {
    match panel {
        Panel::Groups => View::Groups,
        Panel::Channels => View::Channels,
    }
}

fn browsing(session: &mut Session, event: InputEvent) -> Vec<Effect> {
    let panel = session.focus.panel();
    match event {
        InputEvent::Up => {
            let len = session.focused_len();
            if session.focus.move_up(len) {
                vec![Effect::Render(panel_view(panel))]
            } else {
                Vec::new()
            }
        }
        InputEvent::Down => {
            let len = session.focused_len();
            if session.focus.move_down(len) {
                vec![Effect::Render(panel_view(panel))]
            } else {
                Vec::new()
            }
        }
        InputEvent::Left => {
            if session.focus.focus_groups() {
                vec![Effect::Render(View::Groups), Effect::Render(View::Channels)]
            } else {
                Vec::new()
            }
        }
        InputEvent::Right => {
            if session.focus.focus_channels() {
                vec![Effect::Render(View::Groups), Effect::Render(View::Channels)]
            } else {
                Vec::new()
            }
        }
        InputEvent::Select => match panel {
            Panel::Groups => {
                let Some(group) = session.groups().get(session.focus.index()).cloned() else {
                    return Vec::new();
                };
                session.focus.select_group(group);
                vec![Effect::Render(View::Groups), Effect::Render(View::Channels)]
            }
            Panel::Channels => {
                let Some(id) = session.focused_channel().map(|c| c.id.clone()) else {
                    return Vec::new();
                };
                session.play_channel(&id)
            }
        },
        InputEvent::FavoriteToggle => {
            let Some(id) = session.focused_channel().map(|c| c.id.clone()) else {
                return Vec::new();
            };
            let added = session.toggle_favorite(&id);
            let len = session.visible_channels().len();
            session.focus.set_index(0);
            session.focus.clamp(len);
            vec![
                favorite_notice(added),
                Effect::PersistFavorites,
                Effect::Render(View::Channels),
            ]
        }
        InputEvent::OpenSettings => vec![Effect::OpenSettings],
        InputEvent::Back | InputEvent::AddNew | InputEvent::Reserved => Vec::new(),
    }
}

fn playing(session: &mut Session, event: InputEvent) -> Vec<Effect> {
    match event {
        InputEvent::Up => step_channel(session, -1),
        InputEvent::Down => step_channel(session, 1),
        InputEvent::Left | InputEvent::Right => session.show_overlay(),
        InputEvent::Select | InputEvent::Back => session.stop_playback(),
        InputEvent::FavoriteToggle => {
            let Some(id) = session.playback.channel_id.clone() else {
                return Vec::new();
            };
            let added = session.toggle_favorite(&id);
            let mut effects = vec![favorite_notice(added), Effect::PersistFavorites];
            effects.extend(session.show_overlay());
            effects
        }
        InputEvent::OpenSettings => {
            let mut effects = vec![Effect::OpenSettings];
            if !session.playback.overlay_visible {
                effects.extend(session.show_overlay());
            }
            effects
        }
        InputEvent::AddNew | InputEvent::Reserved => {
            if session.playback.overlay_visible {
                Vec::new()
            } else {
                session.show_overlay()
            }
        }
    }
}

/// Previous/next channel across the whole playlist, ignoring groups.
fn step_channel(session: &mut Session, delta: isize) -> Vec<Effect> {
    let channels = session.channels();
    let len = channels.len();
    if len == 0 {
        return Vec::new();
    }
    let current = session
        .playback
        .channel_id
        .as_deref()
        .and_then(|id| channels.iter().position(|c| c.id == id));
    let next = match current {
        Some(i) => (i as isize + delta).rem_euclid(len as isize) as usize,
        // Lost track of the playing channel: start from the matching end.
        None if delta > 0 => 0,
        None => len - 1,
    };
    let id = channels[next].id.clone();
    session.play_channel(&id)
}

fn selecting(session: &mut Session, event: InputEvent) -> Vec<Effect> {
    match event {
        InputEvent::Up => {
            if session.selector_up() {
                vec![Effect::Render(View::Selector)]
            } else {
                Vec::new()
            }
        }
        InputEvent::Down => {
            if session.selector_down() {
                vec![Effect::Render(View::Selector)]
            } else {
                Vec::new()
            }
        }
        InputEvent::Select => session.begin_load(session.selector_index()),
        InputEvent::AddNew => {
            let mut effects = session.cancel_load();
            effects.push(Effect::OpenSetupForm);
            effects
        }
        InputEvent::OpenSettings => vec![Effect::OpenSettings],
        InputEvent::Left
        | InputEvent::Right
        | InputEvent::Back
        | InputEvent::FavoriteToggle
        | InputEvent::Reserved => Vec::new(),
    }
}

fn favorite_notice(added: bool) -> Effect {
    Effect::Notify {
        key: if added {
            "addedToFavorites"
        } else {
            "removedFromFavorites"
        },
        notice: Notice::Success,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::m3u;
    use crate::model::FAVORITES_GROUP;

    const LIST: &str = "#EXTM3U
#EXTINF:-1 group-title=\"News\",BBC
http://s/bbc
#EXTINF:-1 group-title=\"Sports\",ESPN
http://s/espn
#EXTINF:-1 group-title=\"News\",CNN
http://s/cnn
#EXTINF:-1 group-title=\"Kids\",Cartoons
http://s/kids
";

    fn session() -> Session {
        Session::with_channels(m3u::parse(LIST))
    }

    fn press(session: &mut Session, events: &[InputEvent]) -> Vec<Effect> {
        let mut all = Vec::new();
        for &e in events {
            all.extend(handle_input(session, e));
        }
        all
    }

    /// Select the group at `index` and move focus into the channel panel.
    fn open_group(session: &mut Session, index: usize) {
        session.focus.set_index(index);
        press(session, &[InputEvent::Select, InputEvent::Right]);
    }

    #[test]
    fn test_group_navigation_wraps() {
        let mut s = session();
        // FAVORITES, News, Sports, Kids
        assert_eq!(s.groups().len(), 4);
        press(&mut s, &[InputEvent::Up]);
        assert_eq!(s.focus.index(), 3);
        press(&mut s, &[InputEvent::Down]);
        assert_eq!(s.focus.index(), 0);
    }

    #[test]
    fn test_select_group_does_not_move_focus() {
        let mut s = session();
        press(&mut s, &[InputEvent::Down, InputEvent::Select]);
        assert_eq!(s.focus.current_group(), Some("News"));
        assert_eq!(s.focus.panel(), Panel::Groups);
        let names: Vec<&str> = s.visible_channels().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["BBC", "CNN"]);
    }

    #[test]
    fn test_left_on_groups_is_noop() {
        let mut s = session();
        s.focus.set_index(2);
        assert!(press(&mut s, &[InputEvent::Left]).is_empty());
        assert_eq!(s.focus.panel(), Panel::Groups);
        assert_eq!(s.focus.index(), 2);
    }

    #[test]
    fn test_right_then_left_resets_index() {
        let mut s = session();
        open_group(&mut s, 1);
        assert_eq!(s.focus.panel(), Panel::Channels);
        press(&mut s, &[InputEvent::Down]);
        assert_eq!(s.focus.index(), 1);
        press(&mut s, &[InputEvent::Left]);
        assert_eq!(s.focus.panel(), Panel::Groups);
        assert_eq!(s.focus.index(), 0);
        press(&mut s, &[InputEvent::Right]);
        assert_eq!(s.focus.index(), 0);
    }

    #[test]
    fn test_empty_favorites_panel_ignores_directions() {
        let mut s = session();
        assert_eq!(s.focus.current_group(), Some(FAVORITES_GROUP));
        press(&mut s, &[InputEvent::Right]);
        assert_eq!(s.focus.panel(), Panel::Channels);
        assert!(s.visible_channels().is_empty());
        assert!(press(&mut s, &[InputEvent::Up, InputEvent::Down, InputEvent::Select]).is_empty());
        assert_eq!(s.focus.index(), 0);
        assert_eq!(s.mode, Mode::Browsing);
    }

    #[test]
    fn test_select_channel_starts_playback() {
        let mut s = session();
        open_group(&mut s, 2); // Sports
        let effects = press(&mut s, &[InputEvent::Select]);
        assert_eq!(s.mode, Mode::Playing);
        assert!(s.playback.overlay_visible);
        assert!(effects.iter().any(|e| matches!(
            e,
            Effect::StartPlayback { stream_url, .. } if stream_url == "http://s/espn"
        )));
        assert!(effects.iter().any(|e| matches!(e, Effect::ArmOverlayTimer { .. })));
    }

    #[test]
    fn test_playing_up_down_walks_full_list() {
        let mut s = session();
        open_group(&mut s, 1); // News: BBC, CNN
        press(&mut s, &[InputEvent::Select]);
        assert_eq!(s.current_channel().map(|c| c.name.as_str()), Some("BBC"));

        press(&mut s, &[InputEvent::Down]);
        assert_eq!(s.current_channel().map(|c| c.name.as_str()), Some("ESPN"));

        press(&mut s, &[InputEvent::Up, InputEvent::Up]);
        assert_eq!(s.current_channel().map(|c| c.name.as_str()), Some("Cartoons"));
        assert_eq!(s.mode, Mode::Playing);
    }

    #[test]
    fn test_playing_unknown_channel_steps_from_list_ends() {
        let mut s = session();
        open_group(&mut s, 1);
        press(&mut s, &[InputEvent::Select]);

        s.playback.channel_id = Some("gone".to_string());
        press(&mut s, &[InputEvent::Down]);
        assert_eq!(s.current_channel().map(|c| c.name.as_str()), Some("BBC"));

        s.playback.channel_id = Some("gone".to_string());
        press(&mut s, &[InputEvent::Up]);
        assert_eq!(s.current_channel().map(|c| c.name.as_str()), Some("Cartoons"));
    }

    #[test]
    fn test_back_and_select_stop_playback() {
        for exit in [InputEvent::Back, InputEvent::Select] {
            let mut s = session();
            open_group(&mut s, 1);
            press(&mut s, &[InputEvent::Select]);
            let effects = press(&mut s, &[exit]);
            assert!(effects.contains(&Effect::StopPlayback));
            assert_eq!(s.mode, Mode::Browsing);
            assert!(s.playback.channel_id.is_none());
            assert_eq!(s.focus.panel(), Panel::Channels);
        }
    }

    #[test]
    fn test_back_while_browsing_is_noop() {
        let mut s = session();
        assert!(press(&mut s, &[InputEvent::Back]).is_empty());
    }

    #[test]
    fn test_favorite_toggle_in_browsing() {
        let mut s = session();
        open_group(&mut s, 1);
        press(&mut s, &[InputEvent::Down]);
        let effects = press(&mut s, &[InputEvent::FavoriteToggle]);
        assert!(effects.contains(&Effect::PersistFavorites));
        let cnn = s.channels().iter().find(|c| c.name == "CNN").unwrap().id.clone();
        assert!(s.is_favorite(&cnn));
        assert_eq!(s.focus.index(), 0);
    }

    #[test]
    fn test_unfavorite_inside_favorites_group_shrinks_list() {
        let mut s = session();
        let bbc = s.channels()[0].id.clone();
        s.toggle_favorite(&bbc);
        open_group(&mut s, 0);
        assert_eq!(s.visible_channels().len(), 1);

        press(&mut s, &[InputEvent::FavoriteToggle]);
        assert!(s.visible_channels().is_empty());
        assert_eq!(s.focus.index(), 0);
        assert!(press(&mut s, &[InputEvent::Down]).is_empty());
    }

    #[test]
    fn test_favorite_toggle_on_groups_is_noop() {
        let mut s = session();
        assert!(press(&mut s, &[InputEvent::FavoriteToggle]).is_empty());
        assert!(s.favorites.is_empty());
    }

    #[test]
    fn test_favorite_toggle_while_playing_shows_overlay() {
        let mut s = session();
        open_group(&mut s, 1);
        press(&mut s, &[InputEvent::Select]);
        let generation = s.playback.overlay_generation;
        s.on_overlay_expired(generation);
        assert!(!s.playback.overlay_visible);

        let effects = press(&mut s, &[InputEvent::FavoriteToggle]);
        assert!(s.playback.overlay_visible);
        assert!(effects.contains(&Effect::ArmOverlayTimer {
            generation: s.playback.overlay_generation
        }));
        let id = s.playback.channel_id.clone().unwrap();
        assert!(s.is_favorite(&id));
    }

    #[test]
    fn test_hidden_overlay_revealed_by_other_keys() {
        let mut s = session();
        open_group(&mut s, 1);
        press(&mut s, &[InputEvent::Select]);
        let generation = s.playback.overlay_generation;
        s.on_overlay_expired(generation);

        press(&mut s, &[InputEvent::Reserved]);
        assert!(s.playback.overlay_visible);

        // Visible overlay: reserved keys leave the timer alone, arrows restart it.
        assert!(press(&mut s, &[InputEvent::Reserved]).is_empty());
        let before = s.playback.overlay_generation;
        press(&mut s, &[InputEvent::Right]);
        assert_eq!(s.playback.overlay_generation, before + 1);
    }

    #[test]
    fn test_settings_open_in_every_mode() {
        let mut s = session();
        assert_eq!(press(&mut s, &[InputEvent::OpenSettings]), vec![Effect::OpenSettings]);
        open_group(&mut s, 1);
        press(&mut s, &[InputEvent::Select]);
        assert!(press(&mut s, &[InputEvent::OpenSettings]).contains(&Effect::OpenSettings));
    }

    #[test]
    fn test_selector_cursor_clamps() {
        let mut s = Session::new(
            vec![
                crate::model::Playlist::new("http://a", "A"),
                crate::model::Playlist::new("http://b", "B"),
                crate::model::Playlist::new("http://c", "C"),
            ],
            crate::favorites::Favorites::new(),
        );
        assert!(press(&mut s, &[InputEvent::Up]).is_empty());
        assert_eq!(s.selector_index(), 0);
        press(&mut s, &[InputEvent::Down, InputEvent::Down, InputEvent::Down]);
        assert_eq!(s.selector_index(), 2);

        let effects = press(&mut s, &[InputEvent::Select]);
        assert!(matches!(
            effects.as_slice(),
            [Effect::LoadPlaylist { url, .. }, Effect::Render(View::Selector)] if url == "http://c"
        ));
    }

    #[test]
    fn test_add_new_cancels_pending_load() {
        let mut s = Session::new(
            vec![crate::model::Playlist::new("http://a", "A")],
            crate::favorites::Favorites::new(),
        );
        press(&mut s, &[InputEvent::Select]);
        assert!(s.is_loading());
        let effects = press(&mut s, &[InputEvent::AddNew]);
        assert_eq!(effects, vec![Effect::CancelLoad, Effect::OpenSetupForm]);
        assert!(!s.is_loading());
    }
}
