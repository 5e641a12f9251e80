use std::sync::Arc;

use axum::extract::ws::{CloseFrame, Message, WebSocket, WebSocketUpgrade, close_code};
use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use beacon_core::{PeerId, RoomId};
use serde::Deserialize;
use tokio::time::timeout;
use tracing::{info, warn};

use crate::hub::RegisterError;
use crate::server::AppState;
use crate::signaling::client::{CLOSE_GRACE, Client, MAX_MESSAGE_BYTES};
use crate::transport;

#[derive(Debug, Deserialize)]
pub struct WsParams {
    #[serde(default)]
    room: String,
    #[serde(default)]
    peer: String,
}

/// Admits a signaling connection: validates identifiers and origin before
/// the upgrade, then hands the socket to a client actor.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    Query(params): Query<WsParams>,
    headers: HeaderMap,
    State(state): State<AppState>,
) -> Response {
    let room_id = params.room.trim();
    let peer_id = params.peer.trim();
    if room_id.is_empty() || peer_id.is_empty() {
        warn!(room = room_id, peer = peer_id, "websocket request rejected: missing parameters");
        return (
            StatusCode::BAD_REQUEST,
            "missing room or peer query parameter",
        )
            .into_response();
    }

    let origin = headers
        .get(header::ORIGIN)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();
    if !state.policy.is_empty() && !state.policy.allows(origin) {
        warn!(origin, "rejecting websocket origin");
        return StatusCode::FORBIDDEN.into_response();
    }

    let room_id = RoomId::from(room_id);
    let peer_id = PeerId::from(peer_id);
    ws.max_message_size(MAX_MESSAGE_BYTES)
        .on_upgrade(move |socket| handle_socket(socket, room_id, peer_id, state))
}

async fn handle_socket(socket: WebSocket, room_id: RoomId, peer_id: PeerId, state: AppState) {
    let (client, outbound_rx) = Client::new(room_id, peer_id, state.shutdown.child_token());

    if let Err(err) = state.hub.register(Arc::clone(&client)) {
        let (code, reason) = match err {
            RegisterError::AlreadyRegistered => (close_code::POLICY, "peer already registered"),
        };
        warn!(
            room = %client.room_id(),
            peer = %client.peer_id(),
            code,
            reason,
            "closing websocket after register failure"
        );
        close_with(socket, code, reason).await;
        return;
    }

    info!(room = %client.room_id(), peer = %client.peer_id(), "websocket client registered");

    let (room_id, peer_id) = (client.room_id().clone(), client.peer_id().clone());
    let (sink, source) = transport::duplex(socket);
    client
        .run(
            Arc::clone(&state.hub),
            Box::new(source),
            Box::new(sink),
            outbound_rx,
        )
        .await;

    info!(room = %room_id, peer = %peer_id, "websocket client disconnected");
}

async fn close_with(mut socket: WebSocket, code: u16, reason: &'static str) {
    let frame = CloseFrame {
        code,
        reason: reason.into(),
    };
    let _ = timeout(CLOSE_GRACE, socket.send(Message::Close(Some(frame)))).await;
}
