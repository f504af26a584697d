use iptv_core::config::FetchConfig;
use iptv_core::favorites::Favorites;
use iptv_core::fetch::fetch_text;
use iptv_core::focus::Panel;
use iptv_core::m3u;
use iptv_core::model::{Playlist, FAVORITES_GROUP};
use iptv_core::navigation::{handle_input, Effect, InputEvent};
use iptv_core::protocol::{RemoteKey, StateSnapshot};
use iptv_core::session::{Mode, Session};
use iptv_core::store::{Collection, Store};

const PLAYLIST: &str = "#EXTM3U
#EXTINF:-1 tvg-id=\"bbc1\" tvg-logo=\"http://logo/bbc.png\" group-title=\"News\",BBC News
http://stream/bbc
#EXTINF:-1 group-title=\"Sports\",Sport One
http://stream/sport1
#EXTINF:-1 group-title=\"News\",CNN
http://stream/cnn
";

fn load_request(effects: &[Effect]) -> (u64, String) {
    effects
        .iter()
        .find_map(|e| match e {
            Effect::LoadPlaylist { request_id, url } => Some((*request_id, url.clone())),
            _ => None,
        })
        .expect("load requested")
}

fn press(session: &mut Session, keys: &[&str]) -> Vec<Effect> {
    let mut effects = Vec::new();
    for key in keys {
        let key: RemoteKey = key.parse().expect("known key");
        effects.extend(handle_input(session, key.to_input()));
    }
    effects
}

async fn load(session: &mut Session, effects: &[Effect]) -> Vec<Effect> {
    let (request_id, url) = load_request(effects);
    let result = fetch_text(&url, &FetchConfig::default())
        .await
        .map(|text| m3u::parse(&text));
    session.on_playlist_loaded(request_id, result)
}

#[tokio::test]
async fn test_select_load_browse_play_and_favorite() {
    let dir = tempfile::tempdir().unwrap();
    let list_path = dir.path().join("list.m3u");
    std::fs::write(&list_path, PLAYLIST).unwrap();
    let store = Store::new(dir.path().join("data"));

    let mut session = Session::new(
        vec![Playlist::new(list_path.to_string_lossy(), "Home")],
        Favorites::new(),
    );
    assert_eq!(session.mode, Mode::PlaylistSelecting);

    let effects = press(&mut session, &["ok"]);
    let effects = load(&mut session, &effects).await;
    assert!(effects.contains(&Effect::PersistPlaylists));
    assert_eq!(session.mode, Mode::Browsing);
    assert_eq!(session.groups(), ["FAVORITES", "News", "Sports"]);
    assert_eq!(session.focus.current_group(), Some(FAVORITES_GROUP));

    // News group, second channel.
    press(&mut session, &["down", "ok", "right", "down"]);
    assert_eq!(session.focus.panel(), Panel::Channels);
    assert_eq!(session.focused_channel().map(|c| c.name.as_str()), Some("CNN"));

    press(&mut session, &["yellow"]);
    store.persist(Collection::Favorites, &session.favorites).unwrap();

    press(&mut session, &["ok"]);
    assert_eq!(session.mode, Mode::Playing);
    let snapshot = StateSnapshot::from_session(&session);
    let playing = snapshot.now_playing.expect("now playing");
    assert_eq!(playing.name, "CNN");
    assert!(playing.favorite);

    press(&mut session, &["back"]);
    assert_eq!(session.mode, Mode::Browsing);

    let favorites: Favorites = store.load(Collection::Favorites);
    assert_eq!(favorites.len(), 1);
}

#[tokio::test]
async fn test_favorites_survive_reload() {
    let dir = tempfile::tempdir().unwrap();
    let list_path = dir.path().join("list.m3u");
    std::fs::write(&list_path, PLAYLIST).unwrap();

    let mut session = Session::new(
        vec![Playlist::new(list_path.to_string_lossy(), "Home")],
        Favorites::new(),
    );
    let effects = press(&mut session, &["ok"]);
    load(&mut session, &effects).await;
    let bbc = session.channels()[0].id.clone();
    session.toggle_favorite(&bbc);

    let effects = session.open_selector();
    assert!(effects.contains(&Effect::Render(iptv_core::navigation::View::Selector)));
    let effects = press(&mut session, &["ok"]);
    load(&mut session, &effects).await;

    assert_eq!(session.channels()[0].id, bbc);
    press(&mut session, &["ok", "right"]);
    let visible: Vec<&str> = session
        .visible_channels()
        .iter()
        .map(|c| c.name.as_str())
        .collect();
    assert_eq!(visible, vec!["BBC News"]);
}

#[tokio::test]
async fn test_reload_keeps_duplicate_entries_distinct() {
    let dir = tempfile::tempdir().unwrap();
    let list_path = dir.path().join("dup.m3u");
    std::fs::write(
        &list_path,
        "#EXTM3U
#EXTINF:-1 group-title=\"Dup\",Same
http://stream/same
#EXTINF:-1 group-title=\"Dup\",Same
http://stream/same
#EXTINF:-1 group-title=\"Dup\",Other
http://stream/other
",
    )
    .unwrap();

    let mut session = Session::new(
        vec![Playlist::new(list_path.to_string_lossy(), "Dup")],
        Favorites::new(),
    );
    let effects = press(&mut session, &["ok"]);
    load(&mut session, &effects).await;
    let first: Vec<String> = session.channels().iter().map(|c| c.id.clone()).collect();

    session.open_selector();
    let effects = press(&mut session, &["ok"]);
    load(&mut session, &effects).await;
    let ids: Vec<String> = session.channels().iter().map(|c| c.id.clone()).collect();
    assert_eq!(ids, first);
    assert_ne!(ids[0], ids[1]);

    // Dup group, second "Same", then walk the full list.
    press(&mut session, &["down", "ok", "right", "down", "ok"]);
    assert_eq!(session.mode, Mode::Playing);
    let mut walked = Vec::new();
    for _ in 0..4 {
        press(&mut session, &["down"]);
        let id = session.playback.channel_id.clone().expect("playing");
        walked.push(ids.iter().position(|i| *i == id).expect("known id"));
    }
    assert_eq!(walked, vec![2, 0, 1, 2]);
}

#[tokio::test]
async fn test_unreachable_playlist_returns_to_selector() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = Session::new(
        vec![Playlist::new(
            dir.path().join("missing.m3u").to_string_lossy(),
            "Gone",
        )],
        Favorites::new(),
    );
    let effects = press(&mut session, &["ok"]);
    let effects = load(&mut session, &effects).await;

    assert_eq!(session.mode, Mode::PlaylistSelecting);
    assert!(session.active_playlist().is_none());
    assert!(effects
        .iter()
        .any(|e| matches!(e, Effect::Notify { key: "errorLoadingPlaylist", .. })));
}
