use axum::{
    Json,
    extract::{Extension, Path},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{info, warn};

use crate::dto::{
    match_dto::Side,
    request_dto::{BanRequest, CurrentGameRequest, PickRequest, SwapBansRequest, SwapSlotsRequest},
};
use crate::routes::{AppStore, outcome};
use crate::services::catalog::Catalogs;

pub async fn get_state(Extension(store): Extension<AppStore>) -> impl IntoResponse {
    let state_guard = store.read().await;
    let cloned_state = state_guard.get().clone();

    (StatusCode::OK, Json(cloned_state)).into_response()
}

/**
 * GET request for one game's champion board.
 */
pub async fn get_game(Extension(store): Extension<AppStore>, Path(game): Path<u8>) -> Response {
    let guard = store.read().await;
    match guard.game_champions(game) {
        Some(board) => (StatusCode::OK, Json(board)).into_response(),
        None => (StatusCode::NOT_FOUND, format!("Game {} does not exist.", game)).into_response(),
    }
}

pub async fn set_current_game(
    Extension(store): Extension<AppStore>,
    Json(payload): Json<CurrentGameRequest>,
) -> impl IntoResponse {
    info!("Switching to game {}.", payload.game);
    let applied = store.write().await.set_current_game(payload.game).await;
    outcome(applied, &format!("Now on game {}.", payload.game))
}

/**
 * POST request to put a champion into (or clear) a slot of the current game.
 */
pub async fn assign_champion(
    Extension(store): Extension<AppStore>,
    Extension(catalogs): Extension<Catalogs>,
    Json(payload): Json<PickRequest>,
) -> impl IntoResponse {
    let champion = match payload.champion_id {
        Some(id) => {
            catalogs.champions.load().await;
            match catalogs.champions.get_by_id(id) {
                Some(champion) => Some(champion.clone()),
                None => {
                    warn!("Unknown champion {}", id);
                    return (StatusCode::NOT_FOUND, format!("Champion {} was not found.", id));
                }
            }
        }
        None => None,
    };

    info!(
        "Assigning {:?} to {} {}.",
        champion.as_ref().map(|c| &c.name_en),
        payload.team.as_str(),
        payload.position.as_str()
    );

    store
        .write()
        .await
        .assign_champion(payload.team, payload.position, champion)
        .await;

    (StatusCode::OK, "Slot updated.".to_string())
}

pub async fn swap_champions(
    Extension(store): Extension<AppStore>,
    Json(payload): Json<SwapSlotsRequest>,
) -> impl IntoResponse {
    let (from, to) = (payload.from, payload.to);
    let applied = store
        .write()
        .await
        .swap_champions(from.team, from.position, to.team, to.position)
        .await;
    outcome(applied, "Slots swapped.")
}

pub async fn reset_game(
    Extension(store): Extension<AppStore>,
    Path(game): Path<u8>,
) -> impl IntoResponse {
    info!("Resetting game {}.", game);
    let applied = store.write().await.reset_game(game).await;
    outcome(applied, &format!("Game {} was reset.", game))
}

/**
 * POST request to clear the current game's picks and every global ban.
 */
pub async fn reset_current_game_and_bans(
    Extension(store): Extension<AppStore>,
) -> impl IntoResponse {
    info!("Resetting current game and global bans.");
    store.write().await.reset_current_game_and_bans().await;
    (StatusCode::OK, "Current game and bans were reset.".to_string())
}

pub async fn add_ban(
    Extension(store): Extension<AppStore>,
    Extension(catalogs): Extension<Catalogs>,
    Path((side, index)): Path<(Side, usize)>,
    Json(payload): Json<BanRequest>,
) -> impl IntoResponse {
    catalogs.champions.load().await;
    let Some(champion) = catalogs.champions.get_by_id(payload.champion_id).cloned() else {
        warn!("Unknown champion {}", payload.champion_id);
        return (
            StatusCode::NOT_FOUND,
            format!("Champion {} was not found.", payload.champion_id),
        );
    };

    info!("Banning {} in {:?} slot {}.", champion.name_en, side, index);
    let applied = store.write().await.add_global_ban(side, index, champion).await;
    outcome(applied, "Ban added.")
}

pub async fn remove_ban(
    Extension(store): Extension<AppStore>,
    Path((side, index)): Path<(Side, usize)>,
) -> impl IntoResponse {
    let applied = store.write().await.remove_global_ban(side, index).await;
    outcome(applied, "Ban removed.")
}

pub async fn swap_bans(
    Extension(store): Extension<AppStore>,
    Json(payload): Json<SwapBansRequest>,
) -> impl IntoResponse {
    let (from, to) = (payload.from, payload.to);
    let applied = store
        .write()
        .await
        .swap_global_bans(from.side, from.index, to.side, to.index)
        .await;
    outcome(applied, "Bans swapped.")
}

/**
 * POST request to start over: rosters, every game and the bans. Saved teams stay.
 */
pub async fn reset_all(Extension(store): Extension<AppStore>) -> impl IntoResponse {
    info!("Resetting the whole match.");
    store.write().await.reset().await;
    (StatusCode::OK, "Match state was reset.".to_string())
}
