use serde::{Deserialize, Serialize};

use crate::dto::match_dto::{Player, Team};

/// Roster template kept outside the active match.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct SavedTeam {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub players: Vec<Player>,
}

impl SavedTeam {
    pub fn from_team(id: i64, team: &Team) -> Self {
        Self {
            id,
            name: team.name.clone(),
            players: team.players.to_vec(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedTeamsUpdate<'a> {
    pub r#type: &'static str,
    pub saved_teams: &'a [SavedTeam],
}
