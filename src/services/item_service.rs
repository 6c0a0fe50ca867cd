use std::collections::HashSet;

use reqwest::Client;
use tokio::sync::OnceCell;
use tracing::{error, info};

use crate::config::CatalogConfig;
use crate::dto::item_dto::{
    DdragonItem, DdragonItemDocument, Item, ItemFilter, ItemRole, ItemTier, ItemType,
};
use crate::error::CatalogError;
use crate::services::catalog::{clean_description, fetch_json, matches_query, normalize_query};

const STARTER_ITEM_IDS: &[i64] = &[
    1054, 1055, 1056, // doran's blade, shield, ring
    1082, // dark seal
    1083, // cull
    2033, // corrupting potion
    3850, 3851, 3854, 3855, 3858, 3859, 3860, 3862, 3863, 3864, // support starters
    1101, 1102, 1103, // jungle pets
];

const MAX_ITEM_ID: i64 = 200_000;
const SUMMONERS_RIFT: &str = "11";

fn has(tags: &[String], tag: &str) -> bool {
    tags.iter().any(|t| t == tag)
}

pub fn classify_type(tags: &[String]) -> ItemType {
    if tags.is_empty() {
        return ItemType::Other;
    }
    if has(tags, "Boots") {
        return ItemType::Boots;
    }
    if has(tags, "Consumable") {
        return ItemType::Consumable;
    }
    if has(tags, "Jungle") && !has(tags, "Damage") {
        return ItemType::Other;
    }
    if has(tags, "Vision") {
        return ItemType::Other;
    }
    ItemType::Main
}

pub fn classify_tier(item: &DdragonItem, id: i64) -> ItemTier {
    let depth = item.depth.unwrap_or(1);
    let gold = item.gold.as_ref().map_or(0, |g| g.total);
    let builds_from = item.from.as_ref().is_some_and(|from| !from.is_empty());

    if STARTER_ITEM_IDS.contains(&id) {
        return ItemTier::Starter;
    }
    if has(&item.tags, "Consumable") {
        return ItemTier::Other;
    }
    if depth >= 3 || (item.into.is_none() && builds_from) {
        return ItemTier::Legendary;
    }
    if depth == 2 || (item.from.is_some() && item.into.is_some()) {
        return ItemTier::Epic;
    }
    if item.from.is_none() && gold >= 300 {
        return ItemTier::Basic;
    }
    ItemTier::Other
}

pub fn classify_role(tags: &[String]) -> ItemRole {
    if tags.is_empty() {
        return ItemRole::Other;
    }

    let damage = has(tags, "Damage");
    let spell_damage = has(tags, "SpellDamage");
    let crit = has(tags, "CriticalStrike");
    let attack_speed = has(tags, "AttackSpeed");
    let life_steal = has(tags, "LifeSteal");
    let armor = has(tags, "Armor");
    let health = has(tags, "Health");
    let spell_block = has(tags, "SpellBlock");
    let mana = has(tags, "Mana") || has(tags, "ManaRegen");
    let support = has(tags, "Support") || has(tags, "Aura");

    if support {
        ItemRole::Support
    } else if crit || (attack_speed && damage) {
        ItemRole::Marksman
    } else if damage && life_steal && !health {
        ItemRole::Assassin
    } else if spell_damage || mana {
        ItemRole::Mage
    } else if damage && (health || armor) {
        ItemRole::Fighter
    } else if (armor || spell_block || health) && !damage {
        ItemRole::Tank
    } else if damage {
        ItemRole::Assassin
    } else {
        ItemRole::Other
    }
}

fn is_listed(id: i64, item: &DdragonItem) -> bool {
    let purchasable = item.gold.as_ref().is_some_and(|g| g.purchasable);
    purchasable
        && !item.hide_from_all
        && id < MAX_ITEM_ID
        && item.maps.get(SUMMONERS_RIFT) != Some(&false)
}

/// Turns a Data Dragon item document into the dictionary list: only items sold on
/// Summoner's Rift, one per name (lowest id wins), cheapest first. Icons live
/// under `icon_root`.
pub fn build_items(document: DdragonItemDocument, icon_root: &str) -> Vec<Item> {
    let mut listed: Vec<(i64, DdragonItem)> = document
        .data
        .into_iter()
        .filter_map(|(id, item)| id.parse::<i64>().ok().map(|id| (id, item)))
        .filter(|(id, item)| is_listed(*id, item))
        .collect();
    listed.sort_by_key(|(id, _)| *id);

    let mut seen_names = HashSet::new();
    let mut items: Vec<Item> = listed
        .into_iter()
        .filter(|(_, item)| seen_names.insert(item.name.clone()))
        .map(|(id, item)| Item {
            id,
            icon_url: format!("{}/{}.png", icon_root, id),
            r#type: classify_type(&item.tags),
            tier: classify_tier(&item, id),
            role: classify_role(&item.tags),
            effect: clean_description(&item.plaintext),
            description: clean_description(&item.description),
            gold: item.gold.as_ref().map_or(0, |g| g.total),
            name_kr: item.name,
            tags: item.tags,
            stats: item.stats,
        })
        .collect();

    items.sort_by_key(|item| item.gold);
    items
}

pub struct ItemService {
    client: Client,
    url: String,
    icon_root: String,
    items: OnceCell<Vec<Item>>,
}

impl ItemService {
    pub fn new(client: Client, config: &CatalogConfig) -> Self {
        Self {
            client,
            url: config.items_url(),
            icon_root: format!("{}/img/item", config.ddragon_root()),
            items: OnceCell::new(),
        }
    }

    pub fn with_items(client: Client, config: &CatalogConfig, items: Vec<Item>) -> Self {
        Self {
            items: OnceCell::new_with(Some(items)),
            ..Self::new(client, config)
        }
    }

    pub async fn load(&self) -> &[Item] {
        let loaded = self
            .items
            .get_or_try_init(|| async {
                let document: DdragonItemDocument = fetch_json(&self.client, &self.url).await?;
                let items = build_items(document, &self.icon_root);
                info!("Loaded {} items.", items.len());
                Ok::<_, CatalogError>(items)
            })
            .await;

        match loaded {
            Ok(items) => items,
            Err(e) => {
                error!("Failed to load item catalog: {}", e);
                &[]
            }
        }
    }

    pub fn all(&self) -> &[Item] {
        self.items.get().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn get_by_id(&self, id: i64) -> Option<&Item> {
        self.all().iter().find(|i| i.id == id)
    }

    pub fn search(&self, query: Option<&str>) -> Vec<&Item> {
        let items = self.all();
        match normalize_query(query) {
            None => items.iter().collect(),
            Some(query) => items
                .iter()
                .filter(|i| matches_query(&i.name_kr, &query))
                .collect(),
        }
    }

    pub fn filtered(&self, filter: ItemFilter) -> Vec<&Item> {
        self.all()
            .iter()
            .filter(|i| filter.r#type.is_none_or(|t| i.r#type == t))
            .filter(|i| filter.tier.is_none_or(|t| i.tier == t))
            .filter(|i| filter.role.is_none_or(|r| i.role == r))
            .collect()
    }

    pub fn types(&self) -> Vec<&'static str> {
        ItemType::labels()
    }

    pub fn tiers(&self) -> Vec<&'static str> {
        ItemTier::labels()
    }

    pub fn roles(&self) -> Vec<&'static str> {
        ItemRole::labels()
    }
}
