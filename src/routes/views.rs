use axum::{
    Json,
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::info;

use crate::dto::{request_dto::DictionaryQuery, view_dto::View};
use crate::routes::AppStore;
use crate::services::{catalog::Catalogs, view_builder::build_view};

/**
 * GET the model of the page addressed by a location token such as `champion-pick`.
 * Unknown tokens get the default page.
 */
pub async fn get_view(
    Extension(store): Extension<AppStore>,
    Extension(catalogs): Extension<Catalogs>,
    Path(token): Path<String>,
    Query(query): Query<DictionaryQuery>,
) -> impl IntoResponse {
    let view = View::from_token(&token);
    if view.token() != token.trim_start_matches('#') {
        info!("Unknown view {:?}, falling back to {}.", token, view.token());
    }
    render(store, catalogs, view, query).await
}

pub async fn get_default_view(
    Extension(store): Extension<AppStore>,
    Extension(catalogs): Extension<Catalogs>,
    Query(query): Query<DictionaryQuery>,
) -> impl IntoResponse {
    render(store, catalogs, View::DEFAULT, query).await
}

async fn render(
    store: AppStore,
    catalogs: Catalogs,
    view: View,
    query: DictionaryQuery,
) -> impl IntoResponse {
    // Catalog fetches may be slow; they run before the store lock is taken.
    match view {
        View::ChampionPick => {
            catalogs.champions.load().await;
        }
        View::ItemDict => {
            catalogs.items.load().await;
        }
        View::ObjectDict => {
            catalogs.objects.load().await;
        }
        View::TeamSetup | View::MatchView => {}
    }

    let guard = store.read().await;
    let model = build_view(view, &*guard, &catalogs, &query);
    (StatusCode::OK, Json(model))
}
