use serde::{Deserialize, Serialize};

/// Favorite channel ids. Independent of any playlist.
///
/// Serialized as a plain JSON array in toggle order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(into = "Vec<String>", from = "Vec<String>")]
pub struct Favorites {
    ids: Vec<String>,
}

impl Favorites {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, channel_id: &str) -> bool {
        self.ids.iter().any(|id| id == channel_id)
    }

    /// Flip membership. Returns `true` when the id was added.
    pub fn toggle(&mut self, channel_id: &str) -> bool {
        if let Some(pos) = self.ids.iter().position(|id| id == channel_id) {
            self.ids.remove(pos);
            false
        } else {
            self.ids.push(channel_id.to_string());
            true
        }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl From<Vec<String>> for Favorites {
    fn from(ids: Vec<String>) -> Self {
        ids.into_iter().collect()
    }
}

impl From<Favorites> for Vec<String> {
    fn from(favorites: Favorites) -> Self {
        favorites.ids
    }
}

impl FromIterator<String> for Favorites {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        let mut favorites = Favorites::new();
        for id in iter {
            if !favorites.contains(&id) {
                favorites.ids.push(id);
            }
        }
        favorites
    }
}
