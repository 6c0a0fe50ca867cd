use axum::{
    Json,
    extract::{Extension, Path},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tokio::sync::broadcast;
use tracing::{info, warn};

use crate::dto::{
    match_dto::{Position, TeamKey, TeamUpdate},
    request_dto::{ApplySavedTeamRequest, PlayerNameRequest, SaveTeamRequest},
};
use crate::routes::AppStore;
use crate::services::websocket::send_saved_teams_update;

/**
 * PUT request to replace a team's name and/or player names.
 */
pub async fn update_team(
    Extension(store): Extension<AppStore>,
    Path(team): Path<TeamKey>,
    Json(payload): Json<TeamUpdate>,
) -> impl IntoResponse {
    info!("Updating {}.", team.as_str());
    store.write().await.update_team(team, payload).await;
    (StatusCode::OK, format!("Updated {}.", team.as_str()))
}

pub async fn set_player_name(
    Extension(store): Extension<AppStore>,
    Path((team, position)): Path<(TeamKey, Position)>,
    Json(payload): Json<PlayerNameRequest>,
) -> impl IntoResponse {
    store
        .write()
        .await
        .set_player_name(team, position, payload.name)
        .await;
    (
        StatusCode::OK,
        format!("Updated {} {}.", team.as_str(), position.as_str()),
    )
}

/**
 * DELETE request to blank a team's name and roster.
 */
pub async fn clear_team(
    Extension(store): Extension<AppStore>,
    Path(team): Path<TeamKey>,
) -> impl IntoResponse {
    info!("Clearing {}.", team.as_str());
    store.write().await.clear_team(team).await;
    (StatusCode::OK, format!("Cleared {}.", team.as_str()))
}

pub async fn swap_teams(Extension(store): Extension<AppStore>) -> impl IntoResponse {
    info!("Swapping sides.");
    store.write().await.swap_teams().await;
    (StatusCode::OK, "Teams swapped sides.".to_string())
}

/**
 * GET request to list the saved rosters.
 */
pub async fn get_saved_teams(Extension(store): Extension<AppStore>) -> Response {
    let guard = store.read().await;
    (StatusCode::OK, Json(guard.saved_teams())).into_response()
}

/**
 * POST request to save a team's roster under its name.
 */
pub async fn save_team(
    Extension(store): Extension<AppStore>,
    Extension(tx): Extension<broadcast::Sender<String>>,
    Json(payload): Json<SaveTeamRequest>,
) -> Response {
    let mut guard = store.write().await;

    if !guard.save_team_to_list(payload.team).await {
        warn!("Refused to save {} without a name.", payload.team.as_str());
        return (StatusCode::BAD_REQUEST, "Enter a team name before saving.".to_string())
            .into_response();
    }

    send_saved_teams_update(&tx, guard.saved_teams());
    (StatusCode::OK, Json(guard.saved_teams())).into_response()
}

/**
 * DELETE request to remove a saved roster by id.
 */
pub async fn delete_saved_team(
    Extension(store): Extension<AppStore>,
    Extension(tx): Extension<broadcast::Sender<String>>,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    info!("Deleting saved team {}", id);
    let mut guard = store.write().await;

    if guard.delete_saved_team(id).await {
        send_saved_teams_update(&tx, guard.saved_teams());
        (StatusCode::OK, "Saved team was removed.".to_string())
    } else {
        (StatusCode::NOT_FOUND, "Saved team was not found.".to_string())
    }
}

pub async fn apply_saved_team(
    Extension(store): Extension<AppStore>,
    Path(id): Path<i64>,
    Json(payload): Json<ApplySavedTeamRequest>,
) -> impl IntoResponse {
    info!("Applying saved team {} to {}.", id, payload.target.as_str());

    if store.write().await.apply_saved_team(id, payload.target).await {
        (StatusCode::OK, format!("Loaded saved team into {}.", payload.target.as_str()))
    } else {
        (StatusCode::NOT_FOUND, "Saved team was not found.".to_string())
    }
}

