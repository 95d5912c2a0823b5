//! HTTP endpoints of the HipChat add-on.

use crate::Cinema;
use axum::{
    Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{delete, get, post},
};
use cinema_playback::RoomId;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::{error, info, instrument};

/// Body of the installation callback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallPayload {
    /// OAuth client id of this installation
    pub oauth_id: String,
    /// OAuth client secret of this installation
    pub oauth_secret: String,
    /// Room the add-on was installed in
    pub room_id: u64,
}

/// Body of the room message webhook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HookPayload {
    /// Installation the message belongs to
    pub oauth_client_id: String,
    /// Event item
    pub item: HookItem,
}

/// Event item of a room message webhook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HookItem {
    /// The posted message
    pub message: HookMessage,
}

/// A message posted in a room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HookMessage {
    /// Message text
    pub message: String,
}

/// Create the add-on router.
pub fn create_router(cinema: Cinema) -> Router {
    Router::new()
        .route("/", get(get_descriptor))
        .route("/atlassian-connect.json", get(get_descriptor))
        .route("/installable", post(install))
        .route("/installable/:client_id", delete(uninstall))
        .route("/hook", post(hook))
        .route("/health", get(health_check))
        .with_state(cinema)
}

/// Add-on descriptor advertising the callbacks under `base_url`.
pub fn descriptor(base_url: &str, name: &str) -> Value {
    let base_url = base_url.trim_end_matches('/');
    json!({
        "key": "hipchat-cinema",
        "name": name,
        "description": "Plays movie scripts into your room, one line at a time.",
        "links": {
            "self": format!("{}/atlassian-connect.json", base_url),
            "homepage": base_url,
        },
        "capabilities": {
            "hipchatApiConsumer": {
                "scopes": ["send_notification"],
                "fromName": name,
            },
            "installable": {
                "callbackUrl": format!("{}/installable", base_url),
                "allowGlobal": false,
                "allowRoom": true,
            },
            "webhook": [{
                "url": format!("{}/hook", base_url),
                "pattern": "^/(play|stop)",
                "event": "room_message",
                "name": "Cinema commands",
            }],
        },
    })
}

async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({"status": "ok"})))
}

async fn get_descriptor(State(cinema): State<Cinema>) -> impl IntoResponse {
    Json(descriptor(cinema.base_url(), cinema.bot_name()))
}

#[instrument(skip(cinema, payload), fields(client_id = %payload.oauth_id, room = payload.room_id))]
async fn install(
    State(cinema): State<Cinema>,
    Json(payload): Json<InstallPayload>,
) -> impl IntoResponse {
    info!("Received install request");
    let room = RoomId(payload.room_id.to_string());
    match cinema
        .install(&payload.oauth_id, &payload.oauth_secret, room)
        .await
    {
        Ok(()) => (StatusCode::OK, Json(json!(["OK"]))),
        Err(e) => {
            error!(error = %e, "Installation failed");
            (
                StatusCode::BAD_GATEWAY,
                Json(json!({"error": "installation failed"})),
            )
        }
    }
}

/// Always answers 204, whether or not the client was registered.
#[instrument(skip(cinema))]
async fn uninstall(State(cinema): State<Cinema>, Path(client_id): Path<String>) -> StatusCode {
    info!("Received uninstall request");
    cinema.uninstall(&client_id);
    StatusCode::NO_CONTENT
}

#[instrument(skip(cinema, payload), fields(client_id = %payload.oauth_client_id))]
async fn hook(State(cinema): State<Cinema>, Json(payload): Json<HookPayload>) -> StatusCode {
    match cinema
        .handle_message(&payload.oauth_client_id, &payload.item.message.message)
        .await
    {
        Some(_) => StatusCode::NO_CONTENT,
        None => StatusCode::NOT_FOUND,
    }
}
