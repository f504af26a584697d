mod action;
mod app;
mod app_state;
mod component;
mod components;
mod debug_log;
mod http;
mod overlay;
mod player;
mod theme;
mod widgets;

use iptv_core::config::Config;
use iptv_core::favorites::Favorites;
use iptv_core::model::{Playlist, Settings};
use iptv_core::navigation::InputEvent;
use iptv_core::platform;
use iptv_core::protocol::StateSnapshot;
use iptv_core::session::Session;
use iptv_core::store::{Collection, Store};
use tokio::sync::{mpsc, watch};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let data_dir = platform::data_dir();
    std::fs::create_dir_all(&data_dir)?;

    let log_path = platform::log_file();
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;

    // Allow RUST_LOG override; keep HTTP client internals quiet by default.
    let log_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "debug,hyper_util=warn,reqwest=warn,hyper=warn".to_string());
    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_env_filter(log_filter.as_str())
        .with_ansi(false)
        .init();

    // Print log path to stderr so the operator can tail it immediately.
    eprintln!("iptv log: {}", log_path.display());

    tracing::info!("iptv starting…");

    // ── Load config ──────────────────────────────────────────────────────────
    let config = Config::load().unwrap_or_else(|e| {
        tracing::warn!("config: {:#}, using defaults", e);
        Config::default()
    });

    // ── Persisted collections ────────────────────────────────────────────────
    let store = Store::new(&data_dir);
    let playlists: Vec<Playlist> = store.load(Collection::Playlists);
    let favorites: Favorites = store.load(Collection::Favorites);
    let settings: Settings = store.load(Collection::Settings);
    let disclaimer_accepted: bool = store.load(Collection::DisclaimerAccepted);
    tracing::info!(
        "loaded {} playlists, {} favorites",
        playlists.len(),
        favorites.len()
    );

    let session = Session::new(playlists, favorites);

    // ── Snapshot channel (App → HTTP) ────────────────────────────────────────
    let (snapshot_tx, snapshot_rx) = watch::channel(StateSnapshot::from_session(&session));

    // ── Remote input channel (HTTP → App) ────────────────────────────────────
    let (input_tx, input_rx) = mpsc::channel::<InputEvent>(64);

    // ── HTTP server ──────────────────────────────────────────────────────────
    let remote_address = if config.http.enabled {
        http::start_server(
            config.http.bind_address.clone(),
            config.http.port,
            input_tx,
            snapshot_rx,
        );
        Some(format!("{}:{}", config.http.bind_address, config.http.port))
    } else {
        drop(input_tx);
        None
    };

    // ── Run TUI ──────────────────────────────────────────────────────────────
    let app = app::App::new(
        config,
        store,
        session,
        settings,
        disclaimer_accepted,
        snapshot_tx,
        remote_address,
    );
    app.run(input_rx).await?;

    Ok(())
}
