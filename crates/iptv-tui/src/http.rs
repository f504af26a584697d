//! HTTP remote-control API.
//!
//! Key presses are forwarded into the App's input channel exactly like
//! keyboard input; reads are served from the latest published
//! [`StateSnapshot`].

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use iptv_core::navigation::InputEvent;
use iptv_core::protocol::{ChannelInfo, RemoteKey, StateSnapshot};
use serde::Serialize;
use tokio::net::TcpListener;
use tokio::sync::{mpsc, watch};
use tower_http::cors::CorsLayer;
use tracing::{error, info, warn};

#[derive(Clone)]
struct HttpState {
    input_tx: mpsc::Sender<InputEvent>,
    snapshot_rx: watch::Receiver<StateSnapshot>,
}

#[derive(Serialize)]
struct KeyAccepted {
    key: RemoteKey,
    input: InputEvent,
}

#[derive(Serialize)]
struct ApiError {
    error: String,
}

#[derive(Serialize)]
struct GroupsResponse {
    current_group: Option<String>,
    groups: Vec<String>,
}

#[derive(Serialize)]
struct ChannelsResponse {
    group: Option<String>,
    channels: Vec<ChannelInfo>,
}

fn router(input_tx: mpsc::Sender<InputEvent>, snapshot_rx: watch::Receiver<StateSnapshot>) -> Router {
    Router::new()
        .route("/api/state", get(get_state))
        .route("/api/key/:key", get(press_key).post(press_key))
        .route("/api/groups", get(get_groups))
        .route("/api/channels", get(get_channels))
        .layer(CorsLayer::permissive())
        .with_state(HttpState {
            input_tx,
            snapshot_rx,
        })
}

pub fn start_server(
    bind_address: String,
    port: u16,
    input_tx: mpsc::Sender<InputEvent>,
    snapshot_rx: watch::Receiver<StateSnapshot>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let app = router(input_tx, snapshot_rx);

        let addr = format!("{}:{}", bind_address, port);
        let listener = match TcpListener::bind(&addr).await {
            Ok(l) => l,
            Err(e) => {
                error!("Failed to bind HTTP server to {}: {}", addr, e);
                return;
            }
        };

        info!("HTTP remote listening on http://{}", addr);

        if let Err(e) = axum::serve(listener, app).await {
            error!("HTTP server error: {}", e);
        }
    })
}

async fn get_state(State(state): State<HttpState>) -> Json<StateSnapshot> {
    Json(state.snapshot_rx.borrow().clone())
}

async fn press_key(State(state): State<HttpState>, Path(key): Path<String>) -> Response {
    let key: RemoteKey = match key.parse() {
        Ok(k) => k,
        Err(e) => {
            warn!("HTTP API: {}", e);
            let body = ApiError {
                error: e.to_string(),
            };
            return (StatusCode::BAD_REQUEST, Json(body)).into_response();
        }
    };
    let input = key.to_input();
    info!("HTTP API: key {} -> {:?}", key, input);
    if state.input_tx.send(input).await.is_err() {
        error!("Failed to forward key {}", key);
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }
    Json(KeyAccepted { key, input }).into_response()
}

async fn get_groups(State(state): State<HttpState>) -> Json<GroupsResponse> {
    let snapshot = state.snapshot_rx.borrow();
    Json(GroupsResponse {
        current_group: snapshot.current_group.clone(),
        groups: snapshot.groups.clone(),
    })
}

async fn get_channels(State(state): State<HttpState>) -> Json<ChannelsResponse> {
    let snapshot = state.snapshot_rx.borrow();
    Json(ChannelsResponse {
        group: snapshot.current_group.clone(),
        channels: snapshot.channels.clone(),
    })
}
