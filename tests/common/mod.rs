#![allow(dead_code)]

use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use axum::{Json, Router, http::StatusCode, routing::get};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use viewer_helper_backend::{
    config::CatalogConfig,
    dto::champion_dto::Champion,
    error::StorageError,
    services::storage::Storage,
};

pub fn champion(id: i64, name_kr: &str, name_en: &str) -> Champion {
    Champion {
        id,
        name_kr: name_kr.to_string(),
        name_en: name_en.to_string(),
        thumbnail: format!("https://cdn.example/{id}.png"),
        extra: Default::default(),
    }
}

/// Storage whose every call fails, like a browser with storage disabled.
pub struct FailingStorage;

impl Storage for FailingStorage {
    async fn get_item(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Unavailable)
    }

    async fn set_item(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable)
    }
}

/// Counts how often each catalog document was requested.
#[derive(Clone, Default)]
pub struct Hits {
    pub champions: Arc<AtomicUsize>,
    pub items: Arc<AtomicUsize>,
    pub broken: Arc<AtomicUsize>,
}

impl Hits {
    pub fn champions(&self) -> usize {
        self.champions.load(Ordering::SeqCst)
    }

    pub fn items(&self) -> usize {
        self.items.load(Ordering::SeqCst)
    }

    pub fn broken(&self) -> usize {
        self.broken.load(Ordering::SeqCst)
    }
}

fn champions_document() -> Value {
    json!({
        "champions": [
            { "id": 1, "nameKr": "애니", "nameEn": "Annie", "thumbnail": "https://cdn.example/1.png" },
            { "id": 103, "nameKr": "아리", "nameEn": "Ahri", "thumbnail": "https://cdn.example/103.png" },
            { "id": 84, "nameKr": "아칼리", "nameEn": "Akali", "thumbnail": "https://cdn.example/84.png" },
            { "id": 412, "nameKr": "쓰레쉬", "nameEn": "Thresh", "thumbnail": "https://cdn.example/412.png" }
        ]
    })
}

fn objects_document() -> Value {
    json!({
        "objects": [
            { "id": "baron", "nameKr": "내셔 남작", "category": "에픽 몬스터", "spawnTime": "20:00" },
            { "id": "infernal", "nameKr": "화염 드래곤", "category": "드래곤" },
            { "id": "ocean", "nameKr": "바다 드래곤", "category": "드래곤" }
        ]
    })
}

fn items_document() -> Value {
    json!({
        "data": {
            "3031": {
                "name": "무한의 대검",
                "description": "<mainText><stats>공격력 <attention>65</attention></stats></mainText>",
                "plaintext": "치명타 피해량 증가",
                "tags": ["Damage", "CriticalStrike"],
                "gold": { "total": 3450, "purchasable": true },
                "depth": 3,
                "from": ["1038", "1018"],
                "maps": { "11": true },
                "stats": { "FlatPhysicalDamageMod": 65 }
            },
            "1001": {
                "name": "장화",
                "description": "<mainText><stats>이동 속도 <attention>25</attention></stats></mainText>",
                "plaintext": "이동 속도 증가",
                "tags": ["Boots"],
                "gold": { "total": 300, "purchasable": true },
                "into": ["3006"],
                "maps": { "11": true }
            },
            "2003": {
                "name": "체력 물약",
                "description": "<mainText>체력 회복</mainText>",
                "tags": ["Consumable"],
                "gold": { "total": 50, "purchasable": true },
                "maps": { "11": true }
            },
            "3400": {
                "name": "숨겨진 아이템",
                "tags": ["Damage"],
                "gold": { "total": 0, "purchasable": false },
                "maps": { "11": true }
            }
        }
    })
}

fn ahri_document() -> Value {
    json!({
        "data": {
            "Ahri": {
                "id": "Ahri",
                "name": "아리",
                "title": "구미호",
                "tags": ["Mage", "Assassin"],
                "passive": {
                    "name": "정기 흡수",
                    "description": "적을 처치하면 <b>체력</b>을 회복합니다.",
                    "image": { "full": "Ahri_SoulEater2.png" }
                },
                "spells": [
                    { "name": "현혹의 구슬", "description": "구슬을 던집니다.", "cooldownBurn": "7", "image": { "full": "AhriQ.png" } },
                    { "name": "여우불", "description": "불꽃을 날립니다.", "cooldownBurn": "9", "image": { "full": "AhriW.png" } },
                    { "name": "매혹", "description": "입맞춤을 날립니다.", "cooldownBurn": "14", "image": { "full": "AhriE.png" } },
                    { "name": "혼령 질주", "description": "돌진합니다.", "cooldownBurn": "130/105/80", "image": { "full": "AhriR.png" } }
                ]
            }
        }
    })
}

/// Serves catalog documents from 127.0.0.1 on a random port.
pub async fn spawn_catalog_server() -> (CatalogConfig, Hits) {
    let hits = Hits::default();

    let champions_hits = hits.champions.clone();
    let items_hits = hits.items.clone();
    let broken_hits = hits.broken.clone();

    let fixtures = Router::new()
        .route(
            "/champions.json",
            get(move || {
                let hits = champions_hits.clone();
                async move {
                    hits.fetch_add(1, Ordering::SeqCst);
                    Json(champions_document())
                }
            }),
        )
        .route("/objects.json", get(|| async { Json(objects_document()) }))
        .route(
            "/cdn/14.24.1/data/ko_KR/item.json",
            get(move || {
                let hits = items_hits.clone();
                async move {
                    hits.fetch_add(1, Ordering::SeqCst);
                    Json(items_document())
                }
            }),
        )
        .route(
            "/cdn/14.24.1/data/ko_KR/champion/Ahri.json",
            get(|| async { Json(ahri_document()) }),
        )
        .route(
            "/broken.json",
            get(move || {
                let hits = broken_hits.clone();
                async move {
                    hits.fetch_add(1, Ordering::SeqCst);
                    (StatusCode::INTERNAL_SERVER_ERROR, "boom")
                }
            }),
        )
        .route("/garbage.json", get(|| async { "{ not json" }));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, fixtures).await.unwrap();
    });

    let base = format!("http://{addr}");
    let config = CatalogConfig {
        champions_url: format!("{base}/champions.json"),
        objects_url: format!("{base}/objects.json"),
        ddragon_base: format!("{base}/cdn"),
        ddragon_version: "14.24.1".to_string(),
        locale: "ko_KR".to_string(),
    };

    (config, hits)
}

/// Same server, with every catalog URL swapped for `path`.
pub async fn spawn_catalog_server_serving(path: &str) -> (CatalogConfig, Hits) {
    let (config, hits) = spawn_catalog_server().await;
    let base = config.ddragon_base.trim_end_matches("/cdn").to_string();
    let config = CatalogConfig {
        champions_url: format!("{base}{path}"),
        objects_url: format!("{base}{path}"),
        ddragon_base: format!("{base}/missing"),
        ..config
    };
    (config, hits)
}
