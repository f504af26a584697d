//! App: the event loop around the navigation state machine.
//!
//! Architecture:
//! - `App` owns the `Session`, every component, and the side-effect executors
//!   (mpv, overlay timer, playlist fetch, store).
//! - A `tokio::mpsc` channel carries `AppMessage` events in from background
//!   tasks; remote-control presses arrive on a second channel from the HTTP
//!   server.
//! - Every key press becomes an `InputEvent` for `navigation::handle_input`;
//!   the returned effects are executed in order.
//! - After each message the latest `StateSnapshot` is published for the HTTP
//!   API.

use std::io;
use std::time::Duration;

use anyhow::anyhow;
use iptv_core::config::Config;
use iptv_core::error::FetchError;
use iptv_core::fetch::fetch_text;
use iptv_core::focus::Panel;
use iptv_core::i18n::{self, Language};
use iptv_core::m3u;
use iptv_core::model::{Channel, Settings};
use iptv_core::navigation::{handle_input, Effect, InputEvent};
use iptv_core::protocol::StateSnapshot;
use iptv_core::session::{Mode, Session};
use iptv_core::store::{Collection, Store};
use ratatui::crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, trace, warn};

use crate::action::{main_screen_action, Action, Screen, SettingsItem};
use crate::app_state::AppState;
use crate::component::Component;
use crate::components::{
    channel_list::ChannelList, debug_panel::DebugPanel, disclaimer::Disclaimer,
    group_list::GroupList, player_view::PlayerView, playlist_selector::PlaylistSelector,
    settings_menu::SettingsMenu, setup_form::SetupForm,
};
use crate::debug_log::DebugLog;
use crate::overlay::OverlayTimer;
use crate::player::Player;
use crate::widgets::status_bar::{draw_header, draw_keys_bar};
use crate::widgets::toast::{Severity, ToastManager};

const DEBUG_PANEL_HEIGHT: u16 = 8;

pub enum AppMessage {
    Event(Event),
    PlaylistLoaded(u64, Result<Vec<Channel>, FetchError>),
    OverlayExpired(u64),
}

pub struct App {
    session: Session,
    store: Store,
    config: Config,
    settings: Settings,
    language: Language,
    disclaimer_accepted: bool,
    screen: Screen,
    remote_address: Option<String>,

    group_list: GroupList,
    channel_list: ChannelList,
    playlist_selector: PlaylistSelector,
    player_view: PlayerView,
    setup_form: SetupForm,
    settings_menu: SettingsMenu,
    disclaimer: Disclaimer,
    debug_panel: DebugPanel,

    toasts: ToastManager,
    debug: DebugLog,
    player: Player,
    overlay: OverlayTimer,
    fetch_task: Option<JoinHandle<()>>,

    tx: mpsc::Sender<AppMessage>,
    rx: Option<mpsc::Receiver<AppMessage>>,
    snapshot_tx: watch::Sender<StateSnapshot>,
    should_quit: bool,
}

impl App {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        config: Config,
        store: Store,
        session: Session,
        settings: Settings,
        disclaimer_accepted: bool,
        snapshot_tx: watch::Sender<StateSnapshot>,
        remote_address: Option<String>,
    ) -> Self {
        let (tx, rx) = mpsc::channel::<AppMessage>(1024);
        let screen = if !disclaimer_accepted {
            Screen::Disclaimer
        } else if session.playlists.is_empty() {
            Screen::Setup
        } else {
            Screen::Main
        };
        let language = Language::from_code(&settings.language);
        let player = Player::new(&config.player, store.dir().to_path_buf());
        Self {
            toasts: ToastManager::new(Duration::from_millis(config.toast.duration_ms)),
            debug: DebugLog::new(&config.debug),
            overlay: OverlayTimer::new(Duration::from_millis(config.overlay.hide_after_ms)),
            player,
            session,
            store,
            config,
            settings,
            language,
            disclaimer_accepted,
            screen,
            remote_address,
            group_list: GroupList::new(),
            channel_list: ChannelList::new(),
            playlist_selector: PlaylistSelector::new(),
            player_view: PlayerView::new(),
            setup_form: SetupForm::new(),
            settings_menu: SettingsMenu::new(),
            disclaimer: Disclaimer::new(),
            debug_panel: DebugPanel::new(),
            fetch_task: None,
            tx,
            rx: Some(rx),
            snapshot_tx,
            should_quit: false,
        }
    }

    fn t(&self, key: &str) -> String {
        i18n::translate(self.language.code(), key)
    }

    // ── Main run loop ─────────────────────────────────────────────────────────

    pub async fn run(mut self, mut remote_rx: mpsc::Receiver<InputEvent>) -> anyhow::Result<()> {
        let mut rx = self
            .rx
            .take()
            .ok_or_else(|| anyhow!("App::run called twice"))?;

        debug!("run(): enabling raw mode");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        debug!("run(): terminal created, size={:?}", terminal.size());

        // ── Background task: keyboard events ──────────────────────────────────
        let event_tx = self.tx.clone();
        tokio::task::spawn_blocking(move || {
            while !event_tx.is_closed() {
                match event::poll(Duration::from_millis(250)) {
                    Ok(true) => match event::read() {
                        Ok(ev) => {
                            if event_tx.blocking_send(AppMessage::Event(ev)).is_err() {
                                break;
                            }
                        }
                        Err(_) => break,
                    },
                    Ok(false) => {}
                    Err(_) => break,
                }
            }
        });

        // Toast expiry check + spinner animation
        let mut toast_tick = tokio::time::interval(Duration::from_millis(100));
        toast_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        // mpv liveness
        let mut ui_tick = tokio::time::interval(Duration::from_millis(500));
        ui_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        self.publish_snapshot();

        // ── Main loop ─────────────────────────────────────────────────────────
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal.draw(|f| self.draw(f))?;
            }
            needs_redraw = false;

            if self.should_quit {
                break;
            }

            tokio::select! {
                Some(msg) = rx.recv() => {
                    self.handle_message(msg);
                    needs_redraw = true;
                }
                Some(input) = remote_rx.recv() => {
                    self.handle_remote(input);
                    needs_redraw = true;
                }
                _ = toast_tick.tick() => {
                    if !self.toasts.is_empty() {
                        self.toasts.tick();
                        needs_redraw = true;
                    }
                }
                _ = ui_tick.tick() => {
                    needs_redraw = self.check_player();
                }
            }
            self.publish_snapshot();
        }

        // ── Teardown ──────────────────────────────────────────────────────────
        self.player.stop();
        self.overlay.cancel();
        if let Some(task) = self.fetch_task.take() {
            task.abort();
        }
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;
        info!("iptv exiting");

        Ok(())
    }

    fn publish_snapshot(&self) {
        let next = StateSnapshot::from_session(&self.session);
        self.snapshot_tx.send_if_modified(|current| {
            if *current == next {
                false
            } else {
                *current = next;
                true
            }
        });
    }

    // ── Message handler ───────────────────────────────────────────────────────

    fn handle_message(&mut self, msg: AppMessage) {
        match msg {
            AppMessage::Event(Event::Key(key)) => {
                if key.kind == KeyEventKind::Release {
                    return;
                }
                for action in self.handle_key(key) {
                    self.dispatch(action);
                }
            }
            AppMessage::Event(_) => {}
            AppMessage::PlaylistLoaded(request_id, result) => {
                if let Err(e) = &result {
                    self.debug.push(format!("load #{} failed: {}", request_id, e));
                }
                let effects = self.session.on_playlist_loaded(request_id, result);
                if !self.session.is_loading() {
                    self.fetch_task = None;
                    self.toasts.dismiss_spinner();
                }
                self.execute(effects);
            }
            AppMessage::OverlayExpired(generation) => {
                let effects = self.session.on_overlay_expired(generation);
                self.execute(effects);
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Vec<Action> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return vec![Action::Quit];
        }
        let state = AppState {
            session: &self.session,
            language: self.language,
            debug: &self.debug,
        };
        match self.screen {
            Screen::Disclaimer => self.disclaimer.handle_key(key, &state),
            Screen::Setup => self.setup_form.handle_key(key, &state),
            Screen::Settings => self.settings_menu.handle_key(key, &state),
            Screen::Main => main_screen_action(key).into_iter().collect(),
        }
    }

    /// A press from the HTTP remote. Modal screens get the equivalent key.
    fn handle_remote(&mut self, input: InputEvent) {
        self.debug.push(format!("remote {:?}", input));
        if self.screen == Screen::Main {
            self.apply_input(input);
            return;
        }
        let code = match input {
            InputEvent::Up => KeyCode::Up,
            InputEvent::Down => KeyCode::Down,
            InputEvent::Select => KeyCode::Enter,
            InputEvent::Back => KeyCode::Esc,
            InputEvent::OpenSettings => KeyCode::F(2),
            _ => return,
        };
        for action in self.handle_key(KeyEvent::new(code, KeyModifiers::NONE)) {
            self.dispatch(action);
        }
    }

    /// Notice mpv going away on its own (window closed, stream died).
    fn check_player(&mut self) -> bool {
        if !self.player.is_running() || self.player.process_alive() {
            return false;
        }
        if self.session.mode != Mode::Playing {
            return false;
        }
        warn!("mpv exited during playback");
        self.debug.push("player exited");
        self.apply_input(InputEvent::Back);
        true
    }

    // ── Action dispatch ───────────────────────────────────────────────────────

    fn dispatch(&mut self, action: Action) {
        trace!("dispatch {:?}", action);
        match action {
            Action::Input(input) => self.apply_input(input),
            Action::AcceptDisclaimer => {
                if !self.disclaimer_accepted {
                    self.disclaimer_accepted = true;
                    if let Err(e) = self.store.persist(Collection::DisclaimerAccepted, &true) {
                        error!("persist disclaimer: {:#}", e);
                    }
                }
                self.screen = if self.session.playlists.is_empty() {
                    Screen::Setup
                } else {
                    Screen::Main
                };
            }
            Action::SubmitPlaylist { url, name } => match self.session.add_playlist(&url, &name) {
                Ok(effects) => {
                    self.setup_form.clear();
                    self.screen = Screen::Main;
                    self.execute(effects);
                }
                Err(e) => {
                    debug!("setup form rejected: {}", e);
                    let msg = self.t("invalidUrl");
                    self.toasts.error(msg);
                }
            },
            Action::CancelSetup => {
                // Nothing to go back to without a playlist.
                if !self.session.playlists.is_empty() {
                    self.setup_form.clear();
                    self.screen = Screen::Main;
                }
            }
            Action::CloseSettings => self.screen = Screen::Main,
            Action::Settings(item) => self.on_settings_item(item),
            Action::ToggleDebugPanel => self.debug.toggle_panel(),
            Action::Quit => {
                if self.screen == Screen::Disclaimer && self.disclaimer_accepted {
                    self.screen = Screen::Main;
                } else {
                    self.should_quit = true;
                }
            }
        }
    }

    fn on_settings_item(&mut self, item: SettingsItem) {
        match item {
            SettingsItem::Language => {
                self.language = self.language.toggled();
                self.settings.language = self.language.code().to_string();
                info!("language set to {}", self.settings.language);
                if let Err(e) = self.store.persist(Collection::Settings, &self.settings) {
                    error!("persist settings: {:#}", e);
                }
                let msg = self.t("language");
                self.toasts.info(msg);
            }
            SettingsItem::ListManagement => {
                self.screen = Screen::Main;
                let effects = self.session.open_selector();
                self.execute(effects);
            }
            SettingsItem::About => {
                self.toasts.info(format!("iptv {}", env!("CARGO_PKG_VERSION")));
            }
            SettingsItem::LegalDisclaimer => self.screen = Screen::Disclaimer,
        }
    }

    fn apply_input(&mut self, input: InputEvent) {
        let before = self.session.mode;
        let effects = handle_input(&mut self.session, input);
        self.debug.push(format!(
            "{:?} {:?} -> {:?} {:?}/{} ({} effects)",
            input,
            before,
            self.session.mode,
            self.session.focus.panel(),
            self.session.focus.index(),
            effects.len()
        ));
        self.execute(effects);
    }

    // ── Effect executor ───────────────────────────────────────────────────────

    fn execute(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Render(view) => trace!("render {:?}", view),
                Effect::StartPlayback {
                    channel_id,
                    stream_url,
                } => {
                    let title = self
                        .session
                        .channel_by_id(&channel_id)
                        .map(|c| c.name.clone())
                        .unwrap_or_default();
                    if let Err(e) = self.player.play(&stream_url, &title) {
                        error!("playback failed: {:#}", e);
                        self.debug.push(format!("playback failed: {:#}", e));
                        let msg = self.t("channelNotAvailable");
                        self.toasts.error(msg);
                        if self.session.mode == Mode::Playing {
                            self.apply_input(InputEvent::Back);
                        }
                    }
                }
                Effect::StopPlayback => self.player.stop(),
                Effect::ArmOverlayTimer { generation } => {
                    self.overlay
                        .arm(self.tx.clone(), AppMessage::OverlayExpired(generation));
                }
                Effect::CancelOverlayTimer => self.overlay.cancel(),
                Effect::Notify { key, notice } => {
                    let msg = self.t(key);
                    self.toasts.push(msg, Severity::from(notice));
                }
                Effect::PersistFavorites => {
                    if let Err(e) = self.store.persist(Collection::Favorites, &self.session.favorites) {
                        error!("persist favorites: {:#}", e);
                    }
                }
                Effect::PersistPlaylists => {
                    if let Err(e) = self.store.persist(Collection::Playlists, &self.session.playlists) {
                        error!("persist playlists: {:#}", e);
                    }
                }
                Effect::OpenSettings => {
                    self.settings_menu.reset();
                    self.screen = Screen::Settings;
                }
                Effect::OpenSetupForm => {
                    self.setup_form.clear();
                    self.screen = Screen::Setup;
                }
                Effect::LoadPlaylist { request_id, url } => self.start_fetch(request_id, url),
                Effect::CancelLoad => {
                    if let Some(task) = self.fetch_task.take() {
                        task.abort();
                    }
                    self.toasts.dismiss_spinner();
                }
            }
        }
    }

    fn start_fetch(&mut self, request_id: u64, url: String) {
        if let Some(task) = self.fetch_task.take() {
            task.abort();
        }
        let msg = self.t("loadingChannels");
        self.toasts.spinner(msg);
        let fetch_config = self.config.fetch.clone();
        let tx = self.tx.clone();
        self.fetch_task = Some(tokio::spawn(async move {
            let result = fetch_text(&url, &fetch_config)
                .await
                .map(|text| m3u::parse(&text));
            let _ = tx.send(AppMessage::PlaylistLoaded(request_id, result)).await;
        }));
    }

    // ── Rendering ─────────────────────────────────────────────────────────────

    fn draw(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let state = AppState {
            session: &self.session,
            language: self.language,
            debug: &self.debug,
        };

        let debug_height = if self.debug.show_panel { DEBUG_PANEL_HEIGHT } else { 0 };
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(3),
                Constraint::Length(debug_height),
                Constraint::Length(1),
            ])
            .split(area);

        draw_header(frame, rows[0], &state, self.remote_address.as_deref());

        let main_focused = self.screen == Screen::Main;
        match self.session.mode {
            Mode::PlaylistSelecting => {
                self.playlist_selector.draw(frame, rows[1], main_focused, &state);
            }
            Mode::Playing => self.player_view.draw(frame, rows[1], main_focused, &state),
            Mode::Browsing => {
                let panels = Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
                    .split(rows[1]);
                let panel = self.session.focus.panel();
                self.group_list
                    .draw(frame, panels[0], main_focused && panel == Panel::Groups, &state);
                self.channel_list
                    .draw(frame, panels[1], main_focused && panel == Panel::Channels, &state);
            }
        }

        if self.debug.show_panel {
            self.debug_panel.draw(frame, rows[2], false, &state);
        }
        draw_keys_bar(frame, rows[3], self.screen, &state);

        match self.screen {
            Screen::Disclaimer => self.disclaimer.draw(frame, area, true, &state),
            Screen::Setup => self.setup_form.draw(frame, area, true, &state),
            Screen::Settings => self.settings_menu.draw(frame, area, true, &state),
            Screen::Main => {}
        }

        self.toasts.draw(frame, area);
    }
}
