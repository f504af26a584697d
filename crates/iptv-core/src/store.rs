//! Durable key-value store: one pretty-printed JSON file per collection in
//! the data directory.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Playlists,
    Favorites,
    Settings,
    DisclaimerAccepted,
}

impl Collection {
    pub fn key(self) -> &'static str {
        match self {
            Collection::Playlists => "playlists",
            Collection::Favorites => "favorites",
            Collection::Settings => "settings",
            Collection::DisclaimerAccepted => "disclaimer-accepted",
        }
    }

    fn file_name(self) -> String {
        format!("{}.json", self.key())
    }
}

#[derive(Debug, Clone)]
pub struct Store {
    dir: PathBuf,
}

impl Store {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path(&self, collection: Collection) -> PathBuf {
        self.dir.join(collection.file_name())
    }

    /// Read a collection. A missing file yields the default; an unreadable or
    /// corrupt one is logged and also yields the default.
    pub fn load<T: DeserializeOwned + Default>(&self, collection: Collection) -> T {
        let path = self.path(collection);
        let content = match std::fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("store: {} not found, using default", path.display());
                return T::default();
            }
            Err(e) => {
                warn!("store: cannot read {}: {}", path.display(), e);
                return T::default();
            }
        };
        match serde_json::from_str(&content) {
            Ok(value) => value,
            Err(e) => {
                warn!("store: {} is corrupt ({}), using default", path.display(), e);
                T::default()
            }
        }
    }

    /// Write a collection, replacing what was there.
    pub fn persist<T: Serialize + ?Sized>(
        &self,
        collection: Collection,
        value: &T,
    ) -> anyhow::Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.path(collection);
        let json = serde_json::to_string_pretty(value)?;
        // write-then-rename
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &path)?;
        debug!("store: wrote {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::favorites::Favorites;
    use crate::model::{Playlist, Settings};

    #[test]
    fn test_missing_collection_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path());
        let favs: Favorites = store.load(Collection::Favorites);
        assert!(favs.is_empty());
        let accepted: bool = store.load(Collection::DisclaimerAccepted);
        assert!(!accepted);
    }

    #[test]
    fn test_persist_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path().join("nested"));
        let playlists = vec![Playlist::new("http://a/list.m3u", "A")];
        store.persist(Collection::Playlists, &playlists).unwrap();

        let back: Vec<Playlist> = store.load(Collection::Playlists);
        assert_eq!(back.len(), 1);
        assert_eq!(back[0].id, playlists[0].id);
        assert_eq!(back[0].created_at, playlists[0].created_at);
        assert!(store.path(Collection::Playlists).ends_with("playlists.json"));
    }

    #[test]
    fn test_corrupt_file_falls_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path());
        std::fs::write(store.path(Collection::Settings), "{ not json").unwrap();
        let settings: Settings = store.load(Collection::Settings);
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_disclaimer_file_name() {
        let store = Store::new("/data");
        assert_eq!(
            store.path(Collection::DisclaimerAccepted),
            PathBuf::from("/data/disclaimer-accepted.json")
        );
    }
}
