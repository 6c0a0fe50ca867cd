use std::collections::HashMap;

use reqwest::Client;
use tokio::sync::{OnceCell, RwLock};
use tracing::{error, info, warn};

use crate::config::CatalogConfig;
use crate::dto::champion_dto::{
    Champion, ChampionCatalog, ChampionDetail, DdragonChampion, DdragonChampionDocument, ImageKind,
    Skill,
};
use crate::error::CatalogError;
use crate::services::catalog::{clean_description, fetch_json, matches_query, normalize_query};

const SPELL_KEYS: [&str; 4] = ["Q", "W", "E", "R"];

fn role_label(tag: &str) -> String {
    match tag {
        "Fighter" => "전사",
        "Tank" => "탱커",
        "Mage" => "마법사",
        "Assassin" => "암살자",
        "Marksman" => "원거리 딜러",
        "Support" => "서포터",
        other => other,
    }
    .to_string()
}

pub struct ChampionService {
    client: Client,
    config: CatalogConfig,
    champions: OnceCell<Vec<Champion>>,
    details: RwLock<HashMap<String, ChampionDetail>>,
}

impl ChampionService {
    pub fn new(client: Client, config: CatalogConfig) -> Self {
        Self {
            client,
            config,
            champions: OnceCell::new(),
            details: RwLock::new(HashMap::new()),
        }
    }

    /// Service whose catalog is already in memory.
    pub fn with_champions(client: Client, config: CatalogConfig, champions: Vec<Champion>) -> Self {
        Self {
            champions: OnceCell::new_with(Some(champions)),
            ..Self::new(client, config)
        }
    }

    /// Fetches the catalog on first use. A failed fetch yields an empty list and is retried next time.
    pub async fn load(&self) -> &[Champion] {
        let loaded = self
            .champions
            .get_or_try_init(|| async {
                let catalog: ChampionCatalog =
                    fetch_json(&self.client, &self.config.champions_url).await?;
                info!("Loaded {} champions.", catalog.champions.len());
                Ok::<_, CatalogError>(catalog.champions)
            })
            .await;

        match loaded {
            Ok(champions) => champions,
            Err(e) => {
                error!("Failed to load champion catalog: {}", e);
                &[]
            }
        }
    }

    pub fn all(&self) -> &[Champion] {
        self.champions.get().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn get_by_id(&self, id: i64) -> Option<&Champion> {
        self.all().iter().find(|c| c.id == id)
    }

    /// Matches on the Korean or English name. A blank query returns everything.
    pub fn search(&self, query: Option<&str>) -> Vec<&Champion> {
        let champions = self.all();
        match normalize_query(query) {
            None => champions.iter().collect(),
            Some(query) => champions
                .iter()
                .filter(|c| matches_query(&c.name_kr, &query) || matches_query(&c.name_en, &query))
                .collect(),
        }
    }

    pub fn image_url(&self, champion_id: i64, kind: ImageKind) -> String {
        format!(
            "https://cdn.communitydragon.org/latest/champion/{}/{}",
            champion_id,
            kind.as_str()
        )
    }

    /// Ability and passive details, fetched once per champion and then served from memory.
    pub async fn champion_detail(&self, name_en: &str) -> Option<ChampionDetail> {
        if name_en.is_empty() || !name_en.chars().all(|c| c.is_ascii_alphanumeric()) {
            warn!("Refusing champion detail lookup for {:?}", name_en);
            return None;
        }

        if let Some(detail) = self.details.read().await.get(name_en) {
            return Some(detail.clone());
        }

        match self.fetch_detail(name_en).await {
            Ok(detail) => {
                self.details
                    .write()
                    .await
                    .insert(name_en.to_string(), detail.clone());
                Some(detail)
            }
            Err(e) => {
                error!("Failed to load champion detail for {}: {}", name_en, e);
                None
            }
        }
    }

    async fn fetch_detail(&self, name_en: &str) -> Result<ChampionDetail, CatalogError> {
        let url = self.config.champion_detail_url(name_en);
        let mut document: DdragonChampionDocument = fetch_json(&self.client, &url).await?;
        let champion = document
            .data
            .remove(name_en)
            .ok_or_else(|| CatalogError::MissingEntry(name_en.to_string()))?;

        Ok(self.to_detail(champion))
    }

    fn to_detail(&self, champion: DdragonChampion) -> ChampionDetail {
        let root = self.config.ddragon_root();

        let passive = Skill {
            key: "P".to_string(),
            name: champion.passive.name,
            description: clean_description(&champion.passive.description),
            cooldown: None,
            image: format!("{}/img/passive/{}", root, champion.passive.image.full),
        };

        let spells = champion
            .spells
            .into_iter()
            .zip(SPELL_KEYS)
            .map(|(spell, key)| Skill {
                key: key.to_string(),
                name: spell.name,
                description: clean_description(&spell.description),
                cooldown: spell.cooldown_burn.filter(|c| !c.is_empty()),
                image: format!("{}/img/spell/{}", root, spell.image.full),
            })
            .collect();

        ChampionDetail {
            roles: champion.tags.iter().map(|t| role_label(t)).collect(),
            id: champion.id,
            name: champion.name,
            title: champion.title,
            tags: champion.tags,
            passive,
            spells,
        }
    }
}
