use axum::{
    Json,
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::info;

use crate::dto::request_dto::{DictionaryQuery, SearchQuery};
use crate::services::{catalog::Catalogs, view_builder::item_dict_view};

/**
 * GET the champion catalog, optionally narrowed by `?q=`.
 */
pub async fn get_champions(
    Extension(catalogs): Extension<Catalogs>,
    Query(query): Query<SearchQuery>,
) -> Response {
    catalogs.champions.load().await;
    let champions = catalogs.champions.search(query.q.as_deref());
    (StatusCode::OK, Json(champions)).into_response()
}

pub async fn get_champion(
    Extension(catalogs): Extension<Catalogs>,
    Path(id): Path<i64>,
) -> Response {
    catalogs.champions.load().await;
    match catalogs.champions.get_by_id(id) {
        Some(champion) => (StatusCode::OK, Json(champion)).into_response(),
        None => (StatusCode::NOT_FOUND, format!("Champion {} was not found.", id)).into_response(),
    }
}

/**
 * GET passive and ability details for a champion, by English id (e.g. `Ahri`).
 */
pub async fn get_champion_detail(
    Extension(catalogs): Extension<Catalogs>,
    Path(name): Path<String>,
) -> Response {
    info!("Fetching champion detail for {}", name);
    match catalogs.champions.champion_detail(&name).await {
        Some(detail) => (StatusCode::OK, Json(detail)).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            format!("Could not load details for {}.", name),
        )
            .into_response(),
    }
}

/**
 * GET items filtered by `?type=&tier=&role=` labels and searched by `?q=`.
 */
pub async fn get_items(
    Extension(catalogs): Extension<Catalogs>,
    Query(query): Query<DictionaryQuery>,
) -> Response {
    catalogs.items.load().await;
    let view = item_dict_view(&catalogs.items, &query);
    (StatusCode::OK, Json(view.items)).into_response()
}

pub async fn get_item(Extension(catalogs): Extension<Catalogs>, Path(id): Path<i64>) -> Response {
    catalogs.items.load().await;
    match catalogs.items.get_by_id(id) {
        Some(item) => (StatusCode::OK, Json(item)).into_response(),
        None => (StatusCode::NOT_FOUND, format!("Item {} was not found.", id)).into_response(),
    }
}

pub async fn get_objects(
    Extension(catalogs): Extension<Catalogs>,
    Query(query): Query<DictionaryQuery>,
) -> Response {
    catalogs.objects.load().await;
    let objects = catalogs
        .objects
        .filtered(query.category.as_deref(), query.q.as_deref());
    (StatusCode::OK, Json(objects)).into_response()
}

pub async fn get_object_categories(Extension(catalogs): Extension<Catalogs>) -> impl IntoResponse {
    catalogs.objects.load().await;
    (StatusCode::OK, Json(catalogs.objects.categories()))
}
