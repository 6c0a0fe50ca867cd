use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::{info, warn};

use crate::dto::{
    match_dto::{GameBoard, MAX_GAMES, MatchState, Position, TeamKey},
    saved_team_dto::SavedTeam,
};
use crate::error::SnapshotError;

/// Shape generations of the persisted match snapshot, oldest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SnapshotVersion {
    /// Single game; champions stored on the roster entries.
    Legacy,
    /// Per-game boards plus global bans.
    MultiGame,
}

impl SnapshotVersion {
    pub const CURRENT: SnapshotVersion = SnapshotVersion::MultiGame;

    pub fn detect(snapshot: &Map<String, Value>) -> Self {
        if snapshot.contains_key("games") {
            SnapshotVersion::MultiGame
        } else {
            SnapshotVersion::Legacy
        }
    }
}

type Migration = fn(&mut Map<String, Value>);

/// Ordered steps; entry `i` upgrades a snapshot from version `i` to `i + 1`.
const MIGRATIONS: [(SnapshotVersion, Migration); 1] =
    [(SnapshotVersion::Legacy, move_roster_champions_to_first_game)];

fn move_roster_champions_to_first_game(snapshot: &mut Map<String, Value>) {
    let mut first_game = Map::new();

    for team in TeamKey::ALL {
        let mut board = Map::new();
        let players = snapshot
            .get_mut(team.as_str())
            .and_then(|t| t.get_mut("players"))
            .and_then(Value::as_array_mut);

        if let Some(players) = players {
            for player in players.iter_mut().filter_map(Value::as_object_mut) {
                let champion = player.remove("champion").unwrap_or(Value::Null);
                if champion.is_null() {
                    continue;
                }
                let position = player
                    .get("position")
                    .cloned()
                    .and_then(|p| serde_json::from_value::<Position>(p).ok());
                if let Some(position) = position {
                    board.entry(position.as_str()).or_insert(champion);
                }
            }
        }

        first_game.insert(team.as_str().to_string(), Value::Object(board));
    }

    let mut games = Map::new();
    games.insert("1".to_string(), Value::Object(first_game));
    snapshot.insert("games".to_string(), Value::Object(games));
}

/// Brings a raw snapshot up to the current shape.
pub fn migrate(snapshot: &mut Map<String, Value>) -> SnapshotVersion {
    let detected = SnapshotVersion::detect(snapshot);
    for (from, step) in MIGRATIONS {
        if from >= detected {
            info!("Migrating state snapshot from {:?}.", from);
            step(snapshot);
        }
    }
    detected
}

/// Decodes a persisted match snapshot, migrating it first. Each top-level field
/// is decoded on its own; a missing or unreadable field keeps its default.
pub fn restore(json: &str) -> Result<MatchState, SnapshotError> {
    let parsed: Value = serde_json::from_str(json)?;
    let Value::Object(mut snapshot) = parsed else {
        return Err(SnapshotError::NotAnObject);
    };

    migrate(&mut snapshot);

    let defaults = MatchState::default();
    Ok(MatchState {
        blue_team: take_field(&mut snapshot, "blueTeam").unwrap_or(defaults.blue_team),
        red_team: take_field(&mut snapshot, "redTeam").unwrap_or(defaults.red_team),
        current_game: restore_current_game(snapshot.remove("currentGame")),
        games: restore_games(snapshot.remove("games")),
        global_bans: take_field(&mut snapshot, "globalBans").unwrap_or(defaults.global_bans),
    })
}

fn take_field<T: DeserializeOwned>(snapshot: &mut Map<String, Value>, key: &str) -> Option<T> {
    let value = snapshot.remove(key)?;
    serde_json::from_value(value)
        .map_err(|e| warn!("Snapshot field {} is unreadable, using default: {}", key, e))
        .ok()
}

fn restore_current_game(value: Option<Value>) -> u8 {
    let Some(value) = value else {
        return 1;
    };

    match value
        .as_i64()
        .and_then(|game| u8::try_from(game).ok())
        .filter(|game| MatchState::is_valid_game(*game))
    {
        Some(game) => game,
        None => {
            warn!("Snapshot current game {} is out of range, resetting to 1.", value);
            1
        }
    }
}

/// Boards for games `1..=MAX_GAMES`. Unknown games and unreadable boards are
/// dropped, and every game left without a board gets an empty one.
fn restore_games(value: Option<Value>) -> BTreeMap<u8, GameBoard> {
    let mut games = BTreeMap::new();

    if let Some(Value::Object(raw)) = value {
        for (key, board) in raw {
            let Some(game) = key
                .parse::<u8>()
                .ok()
                .filter(|game| MatchState::is_valid_game(*game))
            else {
                warn!("Dropping board of unknown game {:?}.", key);
                continue;
            };

            match serde_json::from_value(board) {
                Ok(board) => {
                    games.insert(game, board);
                }
                Err(e) => warn!("Board of game {} is unreadable, clearing it: {}", game, e),
            }
        }
    }

    for game in 1..=MAX_GAMES {
        games.entry(game).or_default();
    }
    games
}

pub fn restore_saved_teams(json: &str) -> Result<Vec<SavedTeam>, SnapshotError> {
    Ok(serde_json::from_str(json)?)
}
