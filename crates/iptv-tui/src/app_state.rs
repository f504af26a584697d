//! AppState: read-only view handed to components during render and key
//! handling.
//!
//! Components never mutate the session; the App event loop is the only
//! writer.

use iptv_core::i18n::{self, Language};
use iptv_core::session::Session;

use crate::debug_log::DebugLog;

pub struct AppState<'a> {
    pub session: &'a Session,
    pub language: Language,
    pub debug: &'a DebugLog,
}

impl AppState<'_> {
    /// Translated UI string.
    pub fn t(&self, key: &str) -> String {
        i18n::translate(self.language.code(), key)
    }
}
