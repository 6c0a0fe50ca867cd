use axum::{
    extract::{Extension, ws::{Message, WebSocket, WebSocketUpgrade}},
    response::IntoResponse,
};
use futures_util::{SinkExt, StreamExt};
use serde::Serialize;
use tokio::sync::broadcast;
use tracing::{error, info};

use crate::dto::{
    match_dto::{MatchState, StateUpdate},
    saved_team_dto::{SavedTeam, SavedTeamsUpdate},
};
use crate::routes::AppStore;

fn broadcast_json<T: Serialize>(tx: &broadcast::Sender<String>, update: &T) {
    match serde_json::to_string(update) {
        Ok(json) => {
            // No receivers simply means no client is connected.
            let _ = tx.send(json);
        }
        Err(e) => {
            error!("Failed to serialize update message: {}", e);
        }
    }
}

pub fn state_update_message(state: &MatchState) -> Option<String> {
    let update = StateUpdate {
        r#type: "state_update",
        state,
    };
    serde_json::to_string(&update)
        .map_err(|e| error!("Failed to serialize state update: {}", e))
        .ok()
}

pub fn send_state_update(tx: &broadcast::Sender<String>, state: &MatchState) {
    if let Some(message) = state_update_message(state) {
        let _ = tx.send(message);
    }
}

pub fn send_saved_teams_update(tx: &broadcast::Sender<String>, saved_teams: &[SavedTeam]) {
    broadcast_json(
        tx,
        &SavedTeamsUpdate {
            r#type: "saved_teams_update",
            saved_teams,
        },
    );
}

/* Web Socket stuff */
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    Extension(tx): Extension<broadcast::Sender<String>>,
    Extension(store): Extension<AppStore>,
) -> impl IntoResponse {
    let (rx, greeting) = {
        let guard = store.read().await;
        subscribe_viewer(&tx, guard.get())
    };
    ws.on_upgrade(move |socket| handle_socket(socket, rx, greeting))
}

/// Subscribes before the greeting is rendered. With the store lock held by the
/// caller, every later mutation reaches the returned receiver.
pub fn subscribe_viewer(
    tx: &broadcast::Sender<String>,
    state: &MatchState,
) -> (broadcast::Receiver<String>, Option<String>) {
    let rx = tx.subscribe();
    (rx, state_update_message(state))
}

async fn handle_socket(
    socket: WebSocket,
    mut rx: broadcast::Receiver<String>,
    greeting: Option<String>,
) {
    let (mut sender, mut receiver) = socket.split();
    info!("Viewer connected.");

    if let Some(greeting) = greeting {
        if sender.send(Message::Text(greeting.into())).await.is_err() {
            return;
        }
    }

    // Task to send messages to this client
    let send_task = tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(msg) => {
                    if sender.send(Message::Text(msg.into())).await.is_err() {
                        break;
                    }
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    info!("Viewer lagged behind by {} updates.", skipped);
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    });

    // Clients only listen; drain until they go away.
    while let Some(Ok(msg)) = receiver.next().await {
        if let Message::Close(_) = msg {
            break;
        }
    }

    // Clean up
    send_task.abort();
    info!("Viewer disconnected.");
}
