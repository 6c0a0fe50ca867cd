use std::sync::{Arc, LazyLock};

use regex::Regex;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::info;

use crate::config::CatalogConfig;
use crate::error::CatalogError;
use crate::services::{
    champion_service::ChampionService, item_service::ItemService, object_service::ObjectService,
};

/// GETs `url` and decodes the body. Non-2xx answers are errors.
pub async fn fetch_json<T: DeserializeOwned>(client: &Client, url: &str) -> Result<T, CatalogError> {
    info!("Fetching {}", url);
    let response = client.get(url).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(CatalogError::Status {
            status,
            url: url.to_string(),
        });
    }

    let body = response.bytes().await?;
    Ok(serde_json::from_slice(&body)?)
}

static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid tag pattern"));
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace pattern"));

/// Drops markup tags and collapses runs of whitespace.
pub fn clean_description(html: &str) -> String {
    let text = TAG.replace_all(html, "");
    WHITESPACE.replace_all(&text, " ").trim().to_string()
}

pub fn matches_query(haystack: &str, normalized_query: &str) -> bool {
    haystack.to_lowercase().contains(normalized_query)
}

/// Lower-cased, trimmed query; `None` when there is nothing to search for.
pub fn normalize_query(query: Option<&str>) -> Option<String> {
    query
        .map(|q| q.trim().to_lowercase())
        .filter(|q| !q.is_empty())
}

/// The three read-only catalogs, sharing one HTTP client.
#[derive(Clone)]
pub struct Catalogs {
    pub champions: Arc<ChampionService>,
    pub items: Arc<ItemService>,
    pub objects: Arc<ObjectService>,
}

impl Catalogs {
    pub fn new(config: &CatalogConfig) -> Self {
        let client = Client::new();
        Self {
            champions: Arc::new(ChampionService::new(client.clone(), config.clone())),
            items: Arc::new(ItemService::new(client.clone(), config)),
            objects: Arc::new(ObjectService::new(client, config.objects_url.clone())),
        }
    }
}
