use serde::Deserialize;

use crate::dto::match_dto::{Position, Side, TeamKey};

#[derive(Debug, Deserialize)]
pub struct PlayerNameRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct SaveTeamRequest {
    pub team: TeamKey,
}

#[derive(Debug, Deserialize)]
pub struct ApplySavedTeamRequest {
    pub target: TeamKey,
}

#[derive(Debug, Deserialize)]
pub struct CurrentGameRequest {
    pub game: u8,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PickRequest {
    pub team: TeamKey,
    pub position: Position,
    pub champion_id: Option<i64>,
}

#[derive(Debug, Deserialize, Clone, Copy)]
pub struct SlotRef {
    pub team: TeamKey,
    pub position: Position,
}

#[derive(Debug, Deserialize)]
pub struct SwapSlotsRequest {
    pub from: SlotRef,
    pub to: SlotRef,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BanRequest {
    pub champion_id: i64,
}

#[derive(Debug, Deserialize, Clone, Copy)]
pub struct BanRef {
    pub side: Side,
    pub index: usize,
}

#[derive(Debug, Deserialize)]
pub struct SwapBansRequest {
    pub from: BanRef,
    pub to: BanRef,
}

#[derive(Debug, Deserialize, Default)]
pub struct SearchQuery {
    pub q: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct DictionaryQuery {
    pub q: Option<String>,
    pub category: Option<String>,
    pub r#type: Option<String>,
    pub tier: Option<String>,
    pub role: Option<String>,
}
