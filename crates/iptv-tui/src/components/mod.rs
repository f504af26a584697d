pub mod channel_list;
pub mod debug_panel;
pub mod disclaimer;
pub mod group_list;
pub mod player_view;
pub mod playlist_selector;
pub mod settings_menu;
pub mod setup_form;
