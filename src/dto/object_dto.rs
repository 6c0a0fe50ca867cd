use serde::{Deserialize, Serialize};

/// Map objective (dragons, baron, turrets, ...) shown in the object dictionary.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GameObject {
    pub id: String,
    pub name_kr: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub effect: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spawn_time: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct ObjectCatalog {
    #[serde(default)]
    pub objects: Vec<GameObject>,
}
