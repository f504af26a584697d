//! Saved playlists: creation from the add-playlist form.

use crate::error::InvalidInputError;
use crate::model::Playlist;

/// Name given to a playlist saved without one.
pub const DEFAULT_PLAYLIST_NAME: &str = "My List";

/// Validate form input and build a new, not yet loaded, playlist.
pub fn new_playlist(url: &str, name: &str) -> Result<Playlist, InvalidInputError> {
    let url = url.trim();
    if url.is_empty() {
        return Err(InvalidInputError::EmptyUrl);
    }
    let name = match name.trim() {
        "" => DEFAULT_PLAYLIST_NAME,
        n => n,
    };
    Ok(Playlist::new(url, name))
}
