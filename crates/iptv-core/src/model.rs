use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Group label used when a channel carries no (or an empty) `group-title`.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Synthetic group that lists favorite channels. Always first in the group list.
pub const FAVORITES_GROUP: &str = "FAVORITES";

/// Fresh random 128-bit identifier (UUID v4, hyphenated).
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Channel {
    pub id: String,
    /// 1-based order of the channel's `#EXTINF` line in the source playlist.
    pub number: u32,
    pub name: String,
    pub group_title: String,
    #[serde(default)]
    pub logo: String,
    #[serde(default)]
    pub tvg_id: Option<String>,
    pub stream_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Playlist {
    pub id: String,
    pub name: String,
    pub url: String,
    pub created_at: DateTime<Utc>,
    /// Last successfully parsed channel list; empty until the first load.
    #[serde(default)]
    pub channels: Vec<Channel>,
}

impl Playlist {
    pub fn new(url: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            name: name.into(),
            url: url.into(),
            created_at: Utc::now(),
            channels: Vec::new(),
        }
    }

    /// Replace the channel list with a freshly parsed one.
    ///
    /// Channels that match a previously stored channel on `(stream_url, name)`
    /// keep the stored id so favorites survive a reload. Each stored id goes to
    /// at most one fresh channel, so duplicate entries stay distinct. Returns
    /// how many ids were carried over.
    pub fn adopt_channels(&mut self, mut fresh: Vec<Channel>) -> usize {
        let mut claimed = vec![false; self.channels.len()];
        let mut adopted = 0;
        for channel in fresh.iter_mut() {
            let found = self.channels.iter().enumerate().position(|(i, c)| {
                !claimed[i] && c.stream_url == channel.stream_url && c.name == channel.name
            });
            if let Some(i) = found {
                claimed[i] = true;
                channel.id = self.channels[i].id.clone();
                adopted += 1;
            }
        }
        self.channels = fresh;
        adopted
    }
}

/// User preferences persisted in the `settings` collection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Settings {
    #[serde(default = "default_language")]
    pub language: String,
}

fn default_language() -> String {
    "en".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            language: default_language(),
        }
    }
}
