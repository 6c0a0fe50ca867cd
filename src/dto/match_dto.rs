use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::dto::champion_dto::Champion;

pub const MAX_GAMES: u8 = 5;
pub const BAN_SLOTS: usize = 5;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Position {
    #[serde(rename = "TOP")]
    Top,
    #[serde(rename = "JG")]
    Jg,
    #[serde(rename = "MID")]
    Mid,
    #[serde(rename = "ADC")]
    Adc,
    #[serde(rename = "SUP")]
    Sup,
}

impl Position {
    pub const ALL: [Position; 5] = [
        Position::Top,
        Position::Jg,
        Position::Mid,
        Position::Adc,
        Position::Sup,
    ];

    /// Left-to-right slot order on the blue half of the pick screen.
    pub const BLUE_SLOT_ORDER: [Position; 5] = [
        Position::Sup,
        Position::Adc,
        Position::Mid,
        Position::Jg,
        Position::Top,
    ];

    pub const RED_SLOT_ORDER: [Position; 5] = Position::ALL;

    pub fn as_str(self) -> &'static str {
        match self {
            Position::Top => "TOP",
            Position::Jg => "JG",
            Position::Mid => "MID",
            Position::Adc => "ADC",
            Position::Sup => "SUP",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Position::Top => "탑",
            Position::Jg => "정글",
            Position::Mid => "미드",
            Position::Adc => "원딜",
            Position::Sup => "서포터",
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum TeamKey {
    BlueTeam,
    RedTeam,
}

impl TeamKey {
    pub const ALL: [TeamKey; 2] = [TeamKey::BlueTeam, TeamKey::RedTeam];

    pub fn as_str(self) -> &'static str {
        match self {
            TeamKey::BlueTeam => "blueTeam",
            TeamKey::RedTeam => "redTeam",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Blue,
    Red,
}

impl Side {
    pub const ALL: [Side; 2] = [Side::Blue, Side::Red];
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Player {
    pub position: Position,
    #[serde(default)]
    pub name: String,
}

impl Player {
    pub fn empty(position: Position) -> Self {
        Self {
            position,
            name: String::new(),
        }
    }
}

/// Roster as it may appear on the wire: any number of players in any order.
#[derive(Debug, Deserialize, Default)]
struct RawTeam {
    #[serde(default)]
    name: String,
    #[serde(default)]
    players: Vec<Player>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(from = "RawTeam")]
pub struct Team {
    pub name: String,
    pub players: [Player; 5],
}

impl Default for Team {
    fn default() -> Self {
        Self {
            name: String::new(),
            players: Position::ALL.map(Player::empty),
        }
    }
}

impl From<RawTeam> for Team {
    fn from(raw: RawTeam) -> Self {
        let mut team = Team {
            name: raw.name,
            ..Team::default()
        };
        let mut seen = [false; 5];
        for player in raw.players {
            let idx = player.position.index();
            if !seen[idx] {
                seen[idx] = true;
                team.players[idx].name = player.name;
            }
        }
        team
    }
}

impl Team {
    pub fn player(&self, position: Position) -> &Player {
        &self.players[position.index()]
    }

    pub fn player_mut(&mut self, position: Position) -> &mut Player {
        &mut self.players[position.index()]
    }
}

/// Fields of a team that an update replaces. `None` leaves the field as is.
#[derive(Debug, Deserialize, Default, Clone)]
pub struct TeamUpdate {
    pub name: Option<String>,
    pub players: Option<Vec<Player>>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct TeamBoard {
    #[serde(rename = "TOP", default)]
    pub top: Option<Champion>,
    #[serde(rename = "JG", default)]
    pub jg: Option<Champion>,
    #[serde(rename = "MID", default)]
    pub mid: Option<Champion>,
    #[serde(rename = "ADC", default)]
    pub adc: Option<Champion>,
    #[serde(rename = "SUP", default)]
    pub sup: Option<Champion>,
}

impl TeamBoard {
    pub fn get(&self, position: Position) -> Option<&Champion> {
        match position {
            Position::Top => self.top.as_ref(),
            Position::Jg => self.jg.as_ref(),
            Position::Mid => self.mid.as_ref(),
            Position::Adc => self.adc.as_ref(),
            Position::Sup => self.sup.as_ref(),
        }
    }

    pub fn slot_mut(&mut self, position: Position) -> &mut Option<Champion> {
        match position {
            Position::Top => &mut self.top,
            Position::Jg => &mut self.jg,
            Position::Mid => &mut self.mid,
            Position::Adc => &mut self.adc,
            Position::Sup => &mut self.sup,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Position, Option<&Champion>)> + '_ {
        Position::ALL.into_iter().map(|position| (position, self.get(position)))
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GameBoard {
    #[serde(default)]
    pub blue_team: TeamBoard,
    #[serde(default)]
    pub red_team: TeamBoard,
}

impl GameBoard {
    pub fn team(&self, team: TeamKey) -> &TeamBoard {
        match team {
            TeamKey::BlueTeam => &self.blue_team,
            TeamKey::RedTeam => &self.red_team,
        }
    }

    pub fn team_mut(&mut self, team: TeamKey) -> &mut TeamBoard {
        match team {
            TeamKey::BlueTeam => &mut self.blue_team,
            TeamKey::RedTeam => &mut self.red_team,
        }
    }

    pub fn champion_ids(&self) -> impl Iterator<Item = i64> + '_ {
        TeamKey::ALL.into_iter().flat_map(move |team| {
            self.team(team)
                .iter()
                .filter_map(|(_, champion)| champion.map(|c| c.id))
        })
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct GlobalBans {
    #[serde(default, deserialize_with = "ban_slots")]
    pub blue: [Option<Champion>; BAN_SLOTS],
    #[serde(default, deserialize_with = "ban_slots")]
    pub red: [Option<Champion>; BAN_SLOTS],
}

/// Reads a ban list of any length into exactly `BAN_SLOTS` slots. Missing
/// slots stay empty, extra entries are dropped, and an entry that is not a
/// champion reads as an empty slot.
fn ban_slots<'de, D>(deserializer: D) -> Result<[Option<Champion>; BAN_SLOTS], D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Vec<serde_json::Value>>::deserialize(deserializer)?.unwrap_or_default();
    let mut slots: [Option<Champion>; BAN_SLOTS] = Default::default();
    for (slot, value) in slots.iter_mut().zip(raw) {
        *slot = serde_json::from_value(value).ok().flatten();
    }
    Ok(slots)
}

impl GlobalBans {
    pub fn side(&self, side: Side) -> &[Option<Champion>; BAN_SLOTS] {
        match side {
            Side::Blue => &self.blue,
            Side::Red => &self.red,
        }
    }

    pub fn side_mut(&mut self, side: Side) -> &mut [Option<Champion>; BAN_SLOTS] {
        match side {
            Side::Blue => &mut self.blue,
            Side::Red => &mut self.red,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MatchState {
    pub blue_team: Team,
    pub red_team: Team,
    pub current_game: u8,
    pub games: BTreeMap<u8, GameBoard>,
    pub global_bans: GlobalBans,
}

impl Default for MatchState {
    fn default() -> Self {
        Self {
            blue_team: Team::default(),
            red_team: Team::default(),
            current_game: 1,
            games: (1..=MAX_GAMES).map(|n| (n, GameBoard::default())).collect(),
            global_bans: GlobalBans::default(),
        }
    }
}

impl MatchState {
    pub fn team(&self, team: TeamKey) -> &Team {
        match team {
            TeamKey::BlueTeam => &self.blue_team,
            TeamKey::RedTeam => &self.red_team,
        }
    }

    pub fn team_mut(&mut self, team: TeamKey) -> &mut Team {
        match team {
            TeamKey::BlueTeam => &mut self.blue_team,
            TeamKey::RedTeam => &mut self.red_team,
        }
    }

    pub fn is_valid_game(game: u8) -> bool {
        (1..=MAX_GAMES).contains(&game)
    }
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
pub struct Assignment {
    pub team: TeamKey,
    pub position: Position,
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
pub struct BanAssignment {
    pub side: Side,
    pub index: usize,
}

#[derive(Serialize)]
pub struct StateUpdate<'a> {
    pub r#type: &'static str,
    pub state: &'a MatchState,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn team_from_unordered_players_is_normalized() {
        let team: Team = serde_json::from_str(
            r#"{"name":"T1","players":[
                {"position":"MID","name":"Faker"},
                {"position":"TOP","name":"Zeus"},
                {"position":"MID","name":"Duplicate"}
            ]}"#,
        )
        .unwrap();

        assert_eq!(team.name, "T1");
        let positions: Vec<Position> = team.players.iter().map(|p| p.position).collect();
        assert_eq!(positions, Position::ALL.to_vec());
        assert_eq!(team.player(Position::Mid).name, "Faker");
        assert_eq!(team.player(Position::Top).name, "Zeus");
        assert_eq!(team.player(Position::Sup).name, "");
    }

    #[test]
    fn default_state_has_every_game_board() {
        let state = MatchState::default();
        assert_eq!(state.current_game, 1);
        assert_eq!(state.games.keys().copied().collect::<Vec<_>>(), vec![1, 2, 3, 4, 5]);
        assert!(state.global_bans.blue.iter().all(Option::is_none));
    }

    #[test]
    fn ban_lists_of_any_length_fill_five_slots() {
        let bans: GlobalBans = serde_json::from_str(
            r#"{"blue":[{"id":1,"nameKr":"애니","nameEn":"Annie","thumbnail":""},"junk"],
                "red":[null,null,null,null,null,{"id":2}]}"#,
        )
        .unwrap();
        assert_eq!(bans.blue[0].as_ref().map(|c| c.id), Some(1));
        assert!(bans.blue[1..].iter().all(Option::is_none));
        assert!(bans.red.iter().all(Option::is_none));

        let bans: GlobalBans = serde_json::from_str(r#"{"blue":null}"#).unwrap();
        assert_eq!(bans, GlobalBans::default());
    }

    #[test]
    fn state_serializes_with_camel_case_keys() {
        let value = serde_json::to_value(MatchState::default()).unwrap();
        assert!(value.get("blueTeam").is_some());
        assert!(value.get("globalBans").is_some());
        assert_eq!(value["currentGame"], 1);
        assert!(value["games"]["1"]["redTeam"]["TOP"].is_null());
    }
}
