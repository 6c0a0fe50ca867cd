use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::dto::ALL_LABEL;

macro_rules! labelled_enum {
    ($name:ident { $($variant:ident => $label:literal),+ $(,)? }) => {
        #[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $(#[serde(rename = $label)] $variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }

            /// Parses a filter label. Blank input and the "all" label yield `None`.
            pub fn from_filter(label: &str) -> Option<Self> {
                let label = label.trim();
                Self::ALL.iter().copied().find(|v| v.label() == label)
            }

            /// Label list as offered by the dictionary filter buttons.
            pub fn labels() -> Vec<&'static str> {
                std::iter::once(ALL_LABEL)
                    .chain(Self::ALL.iter().map(|v| v.label()))
                    .collect()
            }
        }
    };
}

labelled_enum!(ItemType {
    Main => "메인",
    Boots => "신발",
    Consumable => "소모품",
    Other => "기타",
});

labelled_enum!(ItemTier {
    Legendary => "전설급",
    Epic => "서사급",
    Basic => "기본",
    Starter => "시작",
    Other => "기타",
});

labelled_enum!(ItemRole {
    Fighter => "전사",
    Marksman => "원딜",
    Assassin => "암살자",
    Mage => "마법사",
    Tank => "탱커",
    Support => "서포터",
    Other => "기타",
});

#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: i64,
    pub name_kr: String,
    pub icon_url: String,
    pub r#type: ItemType,
    pub tier: ItemTier,
    pub role: ItemRole,
    pub effect: String,
    pub description: String,
    pub tags: Vec<String>,
    pub gold: i64,
    pub stats: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ItemFilter {
    pub r#type: Option<ItemType>,
    pub tier: Option<ItemTier>,
    pub role: Option<ItemRole>,
}

/* Data Dragon item.json */

#[derive(Debug, Deserialize)]
pub struct DdragonItemDocument {
    #[serde(default)]
    pub data: HashMap<String, DdragonItem>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct DdragonGold {
    #[serde(default)]
    pub total: i64,
    #[serde(default)]
    pub purchasable: bool,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct DdragonItem {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub plaintext: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub gold: Option<DdragonGold>,
    pub depth: Option<i64>,
    pub from: Option<Vec<String>>,
    pub into: Option<Vec<String>>,
    #[serde(default)]
    pub hide_from_all: bool,
    #[serde(default)]
    pub maps: HashMap<String, bool>,
    #[serde(default)]
    pub stats: serde_json::Map<String, serde_json::Value>,
}
