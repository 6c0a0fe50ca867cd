use serde::{Deserialize, Serialize};

/// Champion record from the catalog. Assignment slots hold copies of it.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Champion {
    pub id: i64,
    #[serde(default)]
    pub name_kr: String,
    #[serde(default)]
    pub name_en: String,
    #[serde(default)]
    pub thumbnail: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Deserialize, Default)]
pub struct ChampionCatalog {
    #[serde(default)]
    pub champions: Vec<Champion>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Square,
    Tile,
    SplashArt,
}

impl ImageKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ImageKind::Square => "square",
            ImageKind::Tile => "tile",
            ImageKind::SplashArt => "splash-art",
        }
    }
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct Skill {
    pub key: String,
    pub name: String,
    pub description: String,
    pub cooldown: Option<String>,
    pub image: String,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct ChampionDetail {
    pub id: String,
    pub name: String,
    pub title: String,
    pub tags: Vec<String>,
    pub roles: Vec<String>,
    pub passive: Skill,
    pub spells: Vec<Skill>,
}

/* Data Dragon per-champion document */

#[derive(Debug, Deserialize)]
pub struct DdragonChampionDocument {
    pub data: std::collections::HashMap<String, DdragonChampion>,
}

#[derive(Debug, Deserialize)]
pub struct DdragonImage {
    pub full: String,
}

#[derive(Debug, Deserialize)]
pub struct DdragonChampion {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub passive: DdragonPassive,
    #[serde(default)]
    pub spells: Vec<DdragonSpell>,
}

#[derive(Debug, Deserialize)]
pub struct DdragonPassive {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub image: DdragonImage,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DdragonSpell {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub cooldown_burn: Option<String>,
    pub image: DdragonImage,
}
