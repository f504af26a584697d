//! Session: the single application-state value threaded through every
//! input handler.
//!
//! The TUI owns one `Session`. It mutates it only through
//! [`crate::navigation::handle_input`] and the completion entry points here
//! (`on_playlist_loaded`, `on_overlay_expired`, `add_playlist`), each of which
//! returns the side effects the caller must carry out.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{FetchError, InvalidInputError};
use crate::favorites::Favorites;
use crate::focus::{FocusState, Panel};
use crate::groups::{group_list, visible_channels};
use crate::library;
use crate::model::{Channel, Playlist, FAVORITES_GROUP};
use crate::navigation::{Effect, Notice, View};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Group/channel panels visible, nothing playing.
    #[default]
    Browsing,
    /// Fullscreen playback with the info overlay shown or hidden.
    Playing,
    /// Saved-playlist picker.
    PlaylistSelecting,
}

/// What is playing and whether its overlay is up.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaybackSession {
    pub is_playing: bool,
    pub channel_id: Option<String>,
    pub overlay_visible: bool,
    /// Bumped every time the auto-hide timer is (re)armed; only the expiry
    /// carrying the latest generation may hide the overlay.
    pub overlay_generation: u64,
}

/// The one in-flight playlist fetch, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadRequest {
    pub request_id: u64,
    pub playlist_id: String,
}

#[derive(Debug, Clone, Default)]
pub struct Session {
    pub mode: Mode,
    pub focus: FocusState,
    pub playback: PlaybackSession,
    pub favorites: Favorites,
    pub playlists: Vec<Playlist>,
    active_playlist: Option<usize>,
    groups: Vec<String>,
    selector_index: usize,
    load: Option<LoadRequest>,
    next_request_id: u64,
}

impl Session {
    /// Fresh session: the playlist picker when there is anything to pick,
    /// otherwise an empty browser waiting for the first playlist.
    pub fn new(playlists: Vec<Playlist>, favorites: Favorites) -> Self {
        let mode = if playlists.is_empty() {
            Mode::Browsing
        } else {
            Mode::PlaylistSelecting
        };
        Self {
            mode,
            favorites,
            playlists,
            groups: group_list(&[]),
            ..Self::default()
        }
    }

    // ── Derived views ────────────────────────────────────────────────────────

    pub fn active_playlist(&self) -> Option<&Playlist> {
        self.active_playlist.and_then(|i| self.playlists.get(i))
    }

    /// Master channel list of the active playlist (empty when none).
    pub fn channels(&self) -> &[Channel] {
        self.active_playlist()
            .map(|p| p.channels.as_slice())
            .unwrap_or(&[])
    }

    pub fn groups(&self) -> &[String] {
        &self.groups
    }

    /// Channels of the currently selected group; empty before any selection.
    pub fn visible_channels(&self) -> Vec<&Channel> {
        match self.focus.current_group() {
            Some(group) => visible_channels(self.channels(), group, &self.favorites),
            None => Vec::new(),
        }
    }

    /// Length of the list the focused panel is showing.
    pub fn focused_len(&self) -> usize {
        match self.focus.panel() {
            Panel::Groups => self.groups.len(),
            Panel::Channels => self.visible_channels().len(),
        }
    }

    pub fn focused_channel(&self) -> Option<&Channel> {
        if self.focus.panel() != Panel::Channels {
            return None;
        }
        self.visible_channels().get(self.focus.index()).copied()
    }

    pub fn current_channel(&self) -> Option<&Channel> {
        let id = self.playback.channel_id.as_deref()?;
        self.channels().iter().find(|c| c.id == id)
    }

    pub fn channel_by_id(&self, id: &str) -> Option<&Channel> {
        self.channels().iter().find(|c| c.id == id)
    }

    pub fn is_favorite(&self, channel_id: &str) -> bool {
        self.favorites.contains(channel_id)
    }

    pub fn selector_index(&self) -> usize {
        self.selector_index
    }

    pub fn pending_load(&self) -> Option<&LoadRequest> {
        self.load.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.load.is_some()
    }

    // ── Favorites ────────────────────────────────────────────────────────────

    /// Flip favorite membership. Returns `true` when the channel was added.
    pub fn toggle_favorite(&mut self, channel_id: &str) -> bool {
        let added = self.favorites.toggle(channel_id);
        debug!("favorite {} {}", if added { "added" } else { "removed" }, channel_id);
        added
    }

    // ── Selector cursor ──────────────────────────────────────────────────────

    pub(crate) fn selector_up(&mut self) -> bool {
        if self.selector_index == 0 {
            return false;
        }
        self.selector_index -= 1;
        true
    }

    pub(crate) fn selector_down(&mut self) -> bool {
        if self.selector_index + 1 >= self.playlists.len() {
            return false;
        }
        self.selector_index += 1;
        true
    }

    /// Show the playlist picker again (settings → list management).
    pub fn open_selector(&mut self) -> Vec<Effect> {
        if self.playlists.is_empty() {
            return vec![Effect::OpenSetupForm];
        }
        let mut effects = Vec::new();
        if self.mode == Mode::Playing {
            effects.extend(self.stop_playback());
        }
        self.mode = Mode::PlaylistSelecting;
        self.selector_index = self.active_playlist.unwrap_or(0).min(self.playlists.len() - 1);
        effects.push(Effect::Render(View::Selector));
        effects
    }

    // ── Playlist loading ─────────────────────────────────────────────────────

    /// Append a playlist from the add-playlist form and start loading it.
    pub fn add_playlist(&mut self, url: &str, name: &str) -> Result<Vec<Effect>, InvalidInputError> {
        let playlist = library::new_playlist(url, name)?;
        info!("adding playlist '{}' ({})", playlist.name, playlist.url);
        self.playlists.push(playlist);
        let index = self.playlists.len() - 1;
        self.selector_index = index;
        if self.mode != Mode::Playing {
            self.mode = Mode::PlaylistSelecting;
        }

        let mut effects = vec![Effect::PersistPlaylists];
        effects.extend(self.begin_load(index));
        Ok(effects)
    }

    /// Start fetching playlist `index`, superseding any load in flight.
    pub fn begin_load(&mut self, index: usize) -> Vec<Effect> {
        let Some(playlist) = self.playlists.get(index) else {
            return Vec::new();
        };
        self.next_request_id += 1;
        let request = LoadRequest {
            request_id: self.next_request_id,
            playlist_id: playlist.id.clone(),
        };
        let url = playlist.url.clone();
        let mut effects = Vec::new();
        if let Some(old) = self.load.replace(request.clone()) {
            debug!("load #{} superseded by #{}", old.request_id, request.request_id);
            effects.push(Effect::CancelLoad);
        }
        info!("loading playlist #{} from {}", request.request_id, url);
        effects.push(Effect::LoadPlaylist {
            request_id: request.request_id,
            url,
        });
        effects.push(Effect::Render(View::Selector));
        effects
    }

    /// Drop the in-flight load, if any.
    pub fn cancel_load(&mut self) -> Vec<Effect> {
        match self.load.take() {
            Some(old) => {
                debug!("load #{} cancelled", old.request_id);
                vec![Effect::CancelLoad]
            }
            None => Vec::new(),
        }
    }

    /// Completion of a fetch+parse. Results for anything but the active
    /// request are discarded.
    pub fn on_playlist_loaded(
        &mut self,
        request_id: u64,
        result: Result<Vec<Channel>, FetchError>,
    ) -> Vec<Effect> {
        let Some(request) = self.load.as_ref().filter(|r| r.request_id == request_id) else {
            debug!("ignoring stale playlist result #{}", request_id);
            return Vec::new();
        };
        let playlist_id = request.playlist_id.clone();
        self.load = None;

        let Some(index) = self.playlists.iter().position(|p| p.id == playlist_id) else {
            warn!("loaded playlist {} no longer exists", playlist_id);
            return Vec::new();
        };

        match result {
            Ok(channels) => {
                let playlist = &mut self.playlists[index];
                let adopted = playlist.adopt_channels(channels);
                info!(
                    "playlist '{}' loaded: {} channels ({} ids kept)",
                    playlist.name,
                    playlist.channels.len(),
                    adopted
                );
                self.active_playlist = Some(index);
                self.groups = group_list(&self.playlists[index].channels);
                self.focus.reset(Some(FAVORITES_GROUP.to_string()));
                self.mode = Mode::Browsing;
                vec![
                    Effect::PersistPlaylists,
                    Effect::Render(View::Groups),
                    Effect::Render(View::Channels),
                ]
            }
            Err(e) => {
                warn!("playlist load failed: {}", e);
                self.active_playlist = None;
                self.groups = group_list(&[]);
                self.focus.reset(None);
                self.mode = Mode::PlaylistSelecting;
                self.selector_index = index;
                vec![
                    Effect::Notify {
                        key: "errorLoadingPlaylist",
                        notice: Notice::Error,
                    },
                    Effect::Render(View::Selector),
                ]
            }
        }
    }

    // ── Playback ─────────────────────────────────────────────────────────────

    pub(crate) fn play_channel(&mut self, channel_id: &str) -> Vec<Effect> {
        let Some(channel) = self.channel_by_id(channel_id) else {
            return Vec::new();
        };
        let stream_url = channel.stream_url.clone();
        info!("playing #{} {} ({})", channel.number, channel.name, stream_url);
        self.mode = Mode::Playing;
        self.playback.is_playing = true;
        self.playback.channel_id = Some(channel_id.to_string());

        let mut effects = vec![Effect::StartPlayback {
            channel_id: channel_id.to_string(),
            stream_url,
        }];
        effects.extend(self.show_overlay());
        effects
    }

    pub(crate) fn stop_playback(&mut self) -> Vec<Effect> {
        if let Some(channel) = self.current_channel() {
            info!("stopping {}", channel.name);
        }
        self.mode = Mode::Browsing;
        self.playback.is_playing = false;
        self.playback.channel_id = None;
        self.playback.overlay_visible = false;
        self.playback.overlay_generation += 1;
        vec![
            Effect::StopPlayback,
            Effect::CancelOverlayTimer,
            Effect::Render(View::Groups),
            Effect::Render(View::Channels),
        ]
    }

    /// Reveal the overlay and (re)arm its auto-hide timer.
    pub(crate) fn show_overlay(&mut self) -> Vec<Effect> {
        self.playback.overlay_visible = true;
        self.playback.overlay_generation += 1;
        vec![
            Effect::ArmOverlayTimer {
                generation: self.playback.overlay_generation,
            },
            Effect::Render(View::Player),
        ]
    }

    /// The auto-hide timer for `generation` fired.
    pub fn on_overlay_expired(&mut self, generation: u64) -> Vec<Effect> {
        if generation != self.playback.overlay_generation
            || !self.playback.is_playing
            || !self.playback.overlay_visible
        {
            return Vec::new();
        }
        self.playback.overlay_visible = false;
        vec![Effect::Render(View::Player)]
    }

    /// Refresh the group list after the channel list changed out-of-band.
    pub(crate) fn rederive_groups(&mut self) {
        self.groups = group_list(self.channels());
        if self.focus.panel() == Panel::Groups {
            self.focus.clamp(self.groups.len());
        }
    }

    #[cfg(test)]
    pub(crate) fn with_channels(channels: Vec<Channel>) -> Self {
        let mut playlist = Playlist::new("http://test/list.m3u", "Test");
        playlist.channels = channels;
        let mut session = Session::new(vec![playlist], Favorites::new());
        session.active_playlist = Some(0);
        session.rederive_groups();
        session.focus.reset(Some(FAVORITES_GROUP.to_string()));
        session.mode = Mode::Browsing;
        session
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::m3u;

    const LIST: &str = "#EXTM3U\n#EXTINF:-1 group-title=\"News\",BBC\nhttp://s/bbc\n#EXTINF:-1 group-title=\"Sports\",ESPN\nhttp://s/espn\n";

    fn two_playlists() -> Session {
        Session::new(
            vec![
                Playlist::new("http://a/list.m3u", "A"),
                Playlist::new("http://b/list.m3u", "B"),
            ],
            Favorites::new(),
        )
    }

    fn load_request_id(effects: &[Effect]) -> u64 {
        effects
            .iter()
            .find_map(|e| match e {
                Effect::LoadPlaylist { request_id, .. } => Some(*request_id),
                _ => None,
            })
            .expect("load effect")
    }

    #[test]
    fn test_new_session_mode_depends_on_playlists() {
        assert_eq!(Session::new(Vec::new(), Favorites::new()).mode, Mode::Browsing);
        assert_eq!(two_playlists().mode, Mode::PlaylistSelecting);
    }

    #[test]
    fn test_successful_load_enters_browsing_with_favorites_selected() {
        let mut session = two_playlists();
        let id = load_request_id(&session.begin_load(1));
        let effects = session.on_playlist_loaded(id, Ok(m3u::parse(LIST)));

        assert!(effects.contains(&Effect::PersistPlaylists));
        assert_eq!(session.mode, Mode::Browsing);
        assert_eq!(session.active_playlist().map(|p| p.name.as_str()), Some("B"));
        assert_eq!(session.groups(), ["FAVORITES", "News", "Sports"]);
        assert_eq!(session.focus.panel(), Panel::Groups);
        assert_eq!(session.focus.current_group(), Some(FAVORITES_GROUP));
        assert!(!session.is_loading());
    }

    #[test]
    fn test_stale_load_result_is_ignored() {
        let mut session = two_playlists();
        let first = load_request_id(&session.begin_load(0));
        let effects = session.begin_load(1);
        assert!(effects.contains(&Effect::CancelLoad));
        let second = load_request_id(&effects);

        assert!(session.on_playlist_loaded(first, Ok(m3u::parse(LIST))).is_empty());
        assert_eq!(session.mode, Mode::PlaylistSelecting);
        assert!(session.is_loading());

        session.on_playlist_loaded(second, Ok(Vec::new()));
        assert_eq!(session.active_playlist().map(|p| p.name.as_str()), Some("B"));
    }

    #[test]
    fn test_failed_load_returns_to_selector() {
        let mut session = two_playlists();
        let id = load_request_id(&session.begin_load(1));
        let effects = session.on_playlist_loaded(id, Err(FetchError::Status(404)));

        assert_eq!(session.mode, Mode::PlaylistSelecting);
        assert!(session.active_playlist().is_none());
        assert_eq!(session.selector_index(), 1);
        assert!(effects.iter().any(|e| matches!(
            e,
            Effect::Notify { key: "errorLoadingPlaylist", notice: Notice::Error }
        )));
    }

    #[test]
    fn test_add_playlist_rejects_empty_url() {
        let mut session = Session::new(Vec::new(), Favorites::new());
        assert_eq!(
            session.add_playlist("   ", "Name").unwrap_err(),
            InvalidInputError::EmptyUrl
        );
        assert!(session.playlists.is_empty());
    }

    #[test]
    fn test_add_playlist_persists_and_loads() {
        let mut session = Session::new(Vec::new(), Favorites::new());
        let effects = session.add_playlist("http://x/new.m3u", "").unwrap();
        assert_eq!(effects[0], Effect::PersistPlaylists);
        assert!(matches!(effects[1], Effect::LoadPlaylist { ref url, .. } if url == "http://x/new.m3u"));
        assert_eq!(session.playlists[0].name, library::DEFAULT_PLAYLIST_NAME);
        assert_eq!(session.mode, Mode::PlaylistSelecting);
    }

    #[test]
    fn test_overlay_expiry_respects_generation() {
        let mut session = Session::with_channels(m3u::parse(LIST));
        let id = session.channels()[0].id.clone();
        session.play_channel(&id);
        let old = session.playback.overlay_generation;
        session.show_overlay();

        assert!(session.on_overlay_expired(old).is_empty());
        assert!(session.playback.overlay_visible);

        let current = session.playback.overlay_generation;
        assert_eq!(session.on_overlay_expired(current), vec![Effect::Render(View::Player)]);
        assert!(!session.playback.overlay_visible);
    }

    #[test]
    fn test_open_selector_stops_playback() {
        let mut session = Session::with_channels(m3u::parse(LIST));
        let id = session.channels()[1].id.clone();
        session.play_channel(&id);

        let effects = session.open_selector();
        assert!(effects.contains(&Effect::StopPlayback));
        assert_eq!(session.mode, Mode::PlaylistSelecting);
        assert!(!session.playback.is_playing);
    }
}
