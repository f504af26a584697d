//! Core of the IPTV front-end: playlist parsing, grouping, favorites and the
//! remote-control navigation state machine.
//!
//! Nothing in here draws to a screen or talks to a media player. The TUI
//! crate feeds `InputEvent`s into [`navigation::handle_input`] and executes
//! the returned [`navigation::Effect`]s.

pub mod config;
pub mod error;
pub mod favorites;
pub mod fetch;
pub mod focus;
pub mod groups;
pub mod i18n;
pub mod library;
pub mod m3u;
pub mod model;
pub mod navigation;
pub mod platform;
pub mod protocol;
pub mod session;
pub mod store;
