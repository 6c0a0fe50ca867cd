use serde::Serialize;

use crate::dto::{
    champion_dto::Champion,
    item_dto::Item,
    match_dto::{GlobalBans, Position, Team, TeamKey},
    object_dto::GameObject,
    saved_team_dto::SavedTeam,
};

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum View {
    TeamSetup,
    ChampionPick,
    MatchView,
    ItemDict,
    ObjectDict,
}

impl View {
    pub const ALL: [View; 5] = [
        View::TeamSetup,
        View::ChampionPick,
        View::MatchView,
        View::ItemDict,
        View::ObjectDict,
    ];

    pub const DEFAULT: View = View::TeamSetup;

    pub fn token(self) -> &'static str {
        match self {
            View::TeamSetup => "team-setup",
            View::ChampionPick => "champion-pick",
            View::MatchView => "match-view",
            View::ItemDict => "item-dict",
            View::ObjectDict => "object-dict",
        }
    }

    /// Resolves a location fragment such as `#match-view`. Unknown tokens land on the default view.
    pub fn from_token(token: &str) -> View {
        let token = token.trim().trim_start_matches('#');
        View::ALL
            .into_iter()
            .find(|view| view.token() == token)
            .unwrap_or(View::DEFAULT)
    }
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ChampionStatus {
    Available,
    SelectedBlue,
    SelectedRed,
    Banned,
    PickedOther,
}

#[derive(Debug, Serialize, Clone)]
pub struct ChampionCard {
    pub champion: Champion,
    pub status: ChampionStatus,
    pub selectable: bool,
}

#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PickSlot {
    pub team: TeamKey,
    pub position: Position,
    pub position_label: &'static str,
    pub player_name: String,
    pub champion: Option<Champion>,
}

#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TeamSetupView {
    pub blue_team: Team,
    pub red_team: Team,
    pub saved_teams: Vec<SavedTeam>,
}

#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ChampionPickView {
    pub current_game: u8,
    pub blue_team_name: String,
    pub red_team_name: String,
    pub blue_slots: Vec<PickSlot>,
    pub red_slots: Vec<PickSlot>,
    pub global_bans: GlobalBans,
    pub champions: Vec<ChampionCard>,
}

#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PlayerCardView {
    pub player_name: String,
    pub champion: Option<Champion>,
    pub splash_art: Option<String>,
    pub tile: Option<String>,
}

#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PositionRow {
    pub position: Position,
    pub position_label: &'static str,
    pub blue: PlayerCardView,
    pub red: PlayerCardView,
}

#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct MatchView {
    pub current_game: u8,
    pub blue_team_name: String,
    pub red_team_name: String,
    pub rows: Vec<PositionRow>,
}

#[derive(Debug, Serialize, Clone)]
pub struct ItemDictView {
    pub types: Vec<&'static str>,
    pub tiers: Vec<&'static str>,
    pub roles: Vec<&'static str>,
    pub items: Vec<Item>,
}

#[derive(Debug, Serialize, Clone)]
pub struct ObjectDictView {
    pub categories: Vec<String>,
    pub objects: Vec<GameObject>,
}

#[derive(Debug, Serialize, Clone)]
#[serde(tag = "view", content = "data", rename_all = "kebab-case")]
pub enum ViewModel {
    TeamSetup(TeamSetupView),
    ChampionPick(ChampionPickView),
    MatchView(MatchView),
    ItemDict(ItemDictView),
    ObjectDict(ObjectDictView),
}
