//! Wire types for the remote-control API.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::focus::Panel;
use crate::model::Channel;
use crate::navigation::InputEvent;
use crate::session::{Mode, Session};

/// A button on the remote, as named in `/api/key/{key}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RemoteKey {
    Up,
    Down,
    Left,
    Right,
    Ok,
    Back,
    Yellow,
    Green,
    Red,
    Blue,
    Add,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown remote key '{0}'")]
pub struct UnknownKey(pub String);

impl RemoteKey {
    pub const ALL: [RemoteKey; 11] = [
        RemoteKey::Up,
        RemoteKey::Down,
        RemoteKey::Left,
        RemoteKey::Right,
        RemoteKey::Ok,
        RemoteKey::Back,
        RemoteKey::Yellow,
        RemoteKey::Green,
        RemoteKey::Red,
        RemoteKey::Blue,
        RemoteKey::Add,
    ];

    pub fn name(self) -> &'static str {
        match self {
            RemoteKey::Up => "up",
            RemoteKey::Down => "down",
            RemoteKey::Left => "left",
            RemoteKey::Right => "right",
            RemoteKey::Ok => "ok",
            RemoteKey::Back => "back",
            RemoteKey::Yellow => "yellow",
            RemoteKey::Green => "green",
            RemoteKey::Red => "red",
            RemoteKey::Blue => "blue",
            RemoteKey::Add => "add",
        }
    }

    pub fn to_input(self) -> InputEvent {
        match self {
            RemoteKey::Up => InputEvent::Up,
            RemoteKey::Down => InputEvent::Down,
            RemoteKey::Left => InputEvent::Left,
            RemoteKey::Right => InputEvent::Right,
            RemoteKey::Ok => InputEvent::Select,
            RemoteKey::Back => InputEvent::Back,
            RemoteKey::Yellow => InputEvent::FavoriteToggle,
            RemoteKey::Green => InputEvent::OpenSettings,
            RemoteKey::Red | RemoteKey::Blue => InputEvent::Reserved,
            RemoteKey::Add => InputEvent::AddNew,
        }
    }
}

impl FromStr for RemoteKey {
    type Err = UnknownKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        RemoteKey::ALL
            .into_iter()
            .find(|k| k.name() == lower)
            .ok_or_else(|| UnknownKey(s.to_string()))
    }
}

impl fmt::Display for RemoteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChannelInfo {
    pub id: String,
    pub number: u32,
    pub name: String,
    pub group: String,
    pub logo: String,
    pub favorite: bool,
}

impl ChannelInfo {
    fn new(channel: &Channel, favorite: bool) -> Self {
        Self {
            id: channel.id.clone(),
            number: channel.number,
            name: channel.name.clone(),
            group: channel.group_title.clone(),
            logo: channel.logo.clone(),
            favorite,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlaylistInfo {
    pub id: String,
    pub name: String,
    pub url: String,
    pub channel_count: usize,
}

/// Everything a remote needs to draw its own view of the front-end.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StateSnapshot {
    pub mode: Mode,
    pub panel: Panel,
    pub index: usize,
    pub current_group: Option<String>,
    pub playlist: Option<String>,
    pub now_playing: Option<ChannelInfo>,
    pub overlay_visible: bool,
    pub loading: bool,
    pub selector_index: usize,
    pub playlists: Vec<PlaylistInfo>,
    pub groups: Vec<String>,
    /// Channels of the current group.
    pub channels: Vec<ChannelInfo>,
}

impl StateSnapshot {
    pub fn from_session(session: &Session) -> Self {
        Self {
            mode: session.mode,
            panel: session.focus.panel(),
            index: session.focus.index(),
            current_group: session.focus.current_group().map(str::to_string),
            playlist: session.active_playlist().map(|p| p.name.clone()),
            now_playing: session
                .current_channel()
                .map(|c| ChannelInfo::new(c, session.is_favorite(&c.id))),
            overlay_visible: session.playback.overlay_visible,
            loading: session.is_loading(),
            selector_index: session.selector_index(),
            playlists: session
                .playlists
                .iter()
                .map(|p| PlaylistInfo {
                    id: p.id.clone(),
                    name: p.name.clone(),
                    url: p.url.clone(),
                    channel_count: p.channels.len(),
                })
                .collect(),
            groups: session.groups().to_vec(),
            channels: session
                .visible_channels()
                .into_iter()
                .map(|c| ChannelInfo::new(c, session.is_favorite(&c.id)))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::m3u;

    #[test]
    fn test_key_names_parse() {
        for key in RemoteKey::ALL {
            assert_eq!(key.name().parse::<RemoteKey>(), Ok(key));
        }
        assert_eq!("OK".parse::<RemoteKey>(), Ok(RemoteKey::Ok));
        assert_eq!(
            "purple".parse::<RemoteKey>(),
            Err(UnknownKey("purple".to_string()))
        );
    }

    #[test]
    fn test_color_buttons() {
        assert_eq!(RemoteKey::Yellow.to_input(), InputEvent::FavoriteToggle);
        assert_eq!(RemoteKey::Green.to_input(), InputEvent::OpenSettings);
        assert_eq!(RemoteKey::Red.to_input(), InputEvent::Reserved);
        assert_eq!(RemoteKey::Blue.to_input(), InputEvent::Reserved);
    }

    #[test]
    fn test_snapshot_serializes_mode_snake_case() {
        let session = Session::with_channels(m3u::parse(
            "#EXTINF:-1 group-title=\"News\",BBC\nhttp://s/bbc\n",
        ));
        let snapshot = StateSnapshot::from_session(&session);
        assert_eq!(snapshot.groups, vec!["FAVORITES", "News"]);
        assert_eq!(snapshot.playlist.as_deref(), Some("Test"));
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["mode"], "browsing");
        assert_eq!(json["panel"], "groups");
    }
}
