use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use dropcito_sdk::accounts::AccountsPanel;
use dropcito_sdk::{FriendRequest, FriendRequestSender};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use crate::error::AppError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct FriendRequestBody {
    pub username: String,
    pub item_name: String,
    pub item_price: String,
    /// Use the unauthenticated `/addtofriends` endpoint.
    #[serde(default)]
    pub legacy: bool,
}

/// GET /api/accounts
///
/// Store accounts visitors can add.
pub async fn list_accounts() -> Json<Value> {
    let panel = AccountsPanel::default();
    Json(json!({ "data": panel.accounts(), "count": panel.accounts().len() }))
}

/// POST /api/friend-requests
///
/// Forward a visitor's username to the backend.
pub async fn send_friend_request(
    State(state): State<Arc<AppState>>,
    Json(body): Json<FriendRequestBody>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let username = body.username.trim().to_string();
    if username.is_empty() {
        return Err(AppError::bad_request("username must not be empty"));
    }

    let request = FriendRequest {
        username,
        item_name: body.item_name,
        item_price: body.item_price,
    };
    let legacy = body.legacy;
    let sent = request.clone();
    state
        .sdk
        .run(move |s| {
            if legacy {
                s.legacy_backend().send_friend_request(&sent)
            } else {
                s.backend().send_friend_request(&sent)
            }
        })
        .await?;

    info!(username = %request.username, legacy, "friend request forwarded");
    Ok((StatusCode::ACCEPTED, Json(json!({ "data": request }))))
}
