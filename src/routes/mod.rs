use axum::{
    Router,
    extract::Extension,
    http::StatusCode,
    routing::{delete, get, post, put},
};
use tokio::sync::broadcast;
use tower_http::cors::CorsLayer;

use crate::services::{
    catalog::Catalogs,
    match_store::{MatchStore, SharedMatchStore},
    storage::SqliteStorage,
    websocket::{send_state_update, websocket_handler},
};

pub mod catalog;
pub mod draft;
pub mod teams;
pub mod views;

pub type AppStore = SharedMatchStore<SqliteStorage>;

/// Answer for store operations that report whether they were applied.
pub(crate) fn outcome(applied: bool, done: &str) -> (StatusCode, String) {
    if applied {
        (StatusCode::OK, done.to_string())
    } else {
        (
            StatusCode::UNPROCESSABLE_ENTITY,
            "Request was ignored.".to_string(),
        )
    }
}

/// Loads the match state, wires the broadcast channel and builds the router.
pub async fn app(storage: SqliteStorage, catalogs: Catalogs) -> Router {
    let (tx, _rx) = broadcast::channel::<String>(100);

    let mut store = MatchStore::load(storage).await;
    let listener_tx = tx.clone();
    store.subscribe(move |state| send_state_update(&listener_tx, state));

    router(store.shared(), catalogs, tx)
}

pub fn router(store: AppStore, catalogs: Catalogs, tx: broadcast::Sender<String>) -> Router {
    Router::new()
        .route("/state", get(draft::get_state))
        .route("/ws", get(websocket_handler))
        .route("/reset", post(draft::reset_all))
        // roster
        .route("/teams/swap", post(teams::swap_teams))
        .route("/teams/{team}", put(teams::update_team).delete(teams::clear_team))
        .route("/teams/{team}/players/{position}", put(teams::set_player_name))
        .route("/saved-teams", get(teams::get_saved_teams).post(teams::save_team))
        .route("/saved-teams/{id}", delete(teams::delete_saved_team))
        .route("/saved-teams/{id}/apply", post(teams::apply_saved_team))
        // games
        .route("/games/current", put(draft::set_current_game))
        .route("/games/current/picks", post(draft::assign_champion))
        .route("/games/current/swap", post(draft::swap_champions))
        .route("/games/current/reset", post(draft::reset_current_game_and_bans))
        .route("/games/{game}", get(draft::get_game))
        .route("/games/{game}/reset", post(draft::reset_game))
        // bans
        .route("/bans/swap", post(draft::swap_bans))
        .route("/bans/{side}/{index}", put(draft::add_ban).delete(draft::remove_ban))
        // catalogs
        .route("/champions", get(catalog::get_champions))
        .route("/champions/{id}", get(catalog::get_champion))
        .route("/champion-details/{name}", get(catalog::get_champion_detail))
        .route("/items", get(catalog::get_items))
        .route("/items/{id}", get(catalog::get_item))
        .route("/objects", get(catalog::get_objects))
        .route("/objects/categories", get(catalog::get_object_categories))
        // views
        .route("/views", get(views::get_default_view))
        .route("/views/{token}", get(views::get_view))
        .layer(Extension(store))
        .layer(Extension(catalogs))
        .layer(Extension(tx))
        .layer(CorsLayer::permissive())
}
