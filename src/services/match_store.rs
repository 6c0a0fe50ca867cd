use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;
use tracing::{error, info, warn};

use crate::dto::{
    champion_dto::Champion,
    match_dto::{
        Assignment, BAN_SLOTS, BanAssignment, GameBoard, MatchState, Position, Side, Team,
        TeamKey, TeamUpdate,
    },
    saved_team_dto::SavedTeam,
};
use crate::services::{snapshot, storage::Storage};

pub const STORAGE_KEY: &str = "lol-viewer-helper-state";
pub const SAVED_TEAMS_KEY: &str = "lol-viewer-helper-saved-teams";

pub type Listener = Box<dyn Fn(&MatchState) + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

pub type SharedMatchStore<S> = Arc<RwLock<MatchStore<S>>>;

/// Owner of the roster, the per-game boards and the global ban list.
///
/// Every mutator changes the in-memory state, writes the snapshot and then calls
/// the subscribers in registration order. Requests that do not make sense (game
/// out of range, ban index past the last slot, unknown saved team) are ignored
/// and reported as `false`; nothing here returns an error to the caller.
/// Storage failures are logged and the store keeps working in memory.
///
/// Duplicate picks are not rejected: the same champion may sit in two cells of
/// one game, or in a ban slot and a pick slot at once. Callers use
/// [`MatchStore::find_champion_assignment`] and friends to keep the board clean.
pub struct MatchStore<S> {
    state: MatchState,
    saved_teams: Vec<SavedTeam>,
    storage: S,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener: u64,
}

impl<S: Storage> MatchStore<S> {
    /// Starts from defaults and rehydrates whatever the storage holds.
    pub async fn load(storage: S) -> Self {
        let mut store = Self {
            state: MatchState::default(),
            saved_teams: Vec::new(),
            storage,
            listeners: Vec::new(),
            next_listener: 0,
        };

        match store.storage.get_item(STORAGE_KEY).await {
            Ok(Some(json)) => match snapshot::restore(&json) {
                Ok(state) => store.state = state,
                Err(e) => warn!("Failed to restore match state, using defaults: {}", e),
            },
            Ok(None) => info!("No match state found in storage. Initializing to default."),
            Err(e) => error!("Failed to read match state: {}", e),
        }

        match store.storage.get_item(SAVED_TEAMS_KEY).await {
            Ok(Some(json)) => match snapshot::restore_saved_teams(&json) {
                Ok(teams) => store.saved_teams = teams,
                Err(e) => warn!("Failed to restore saved teams: {}", e),
            },
            Ok(None) => {}
            Err(e) => error!("Failed to read saved teams: {}", e),
        }

        store
    }

    pub fn shared(self) -> SharedMatchStore<S> {
        Arc::new(RwLock::new(self))
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    async fn save(&self) {
        let json = match serde_json::to_string(&self.state) {
            Ok(json) => json,
            Err(e) => {
                error!("Failed to serialize match state: {}", e);
                return;
            }
        };

        if let Err(e) = self.storage.set_item(STORAGE_KEY, &json).await {
            error!("Failed to save match state: {}", e);
        }
    }

    async fn save_saved_teams(&self) {
        let json = match serde_json::to_string(&self.saved_teams) {
            Ok(json) => json,
            Err(e) => {
                error!("Failed to serialize saved teams: {}", e);
                return;
            }
        };

        if let Err(e) = self.storage.set_item(SAVED_TEAMS_KEY, &json).await {
            error!("Failed to save saved teams: {}", e);
        }
    }

    fn notify(&self) {
        for (_, listener) in &self.listeners {
            listener(&self.state);
        }
    }

    async fn commit(&self) {
        self.save().await;
        self.notify();
    }

    /* Subscriptions */

    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: Fn(&MatchState) + Send + Sync + 'static,
    {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Removes exactly the listener registered under `id`.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    /* Queries */

    pub fn get(&self) -> &MatchState {
        &self.state
    }

    pub fn current_game(&self) -> u8 {
        self.state.current_game
    }

    pub fn game_champions(&self, game: u8) -> Option<&GameBoard> {
        self.state.games.get(&game)
    }

    pub fn current_game_champions(&self) -> &GameBoard {
        // Every game in range has a board; see `snapshot::restore`.
        static EMPTY: std::sync::OnceLock<GameBoard> = std::sync::OnceLock::new();
        self.game_champions(self.state.current_game)
            .unwrap_or_else(|| EMPTY.get_or_init(GameBoard::default))
    }

    /// First cell of the current game holding `champion_id`, blue before red.
    pub fn find_champion_assignment(&self, champion_id: i64) -> Option<Assignment> {
        let board = self.current_game_champions();
        TeamKey::ALL.into_iter().find_map(|team| {
            board
                .team(team)
                .iter()
                .find(|(_, champion)| champion.is_some_and(|c| c.id == champion_id))
                .map(|(position, _)| Assignment { team, position })
        })
    }

    pub fn picked_champions_in_other_games(&self) -> HashSet<i64> {
        self.state
            .games
            .iter()
            .filter(|(game, _)| **game != self.state.current_game)
            .flat_map(|(_, board)| board.champion_ids())
            .collect()
    }

    pub fn global_banned_champion_ids(&self) -> HashSet<i64> {
        Side::ALL
            .into_iter()
            .flat_map(|side| self.state.global_bans.side(side).iter())
            .filter_map(|slot| slot.as_ref().map(|c| c.id))
            .collect()
    }

    pub fn find_global_ban_assignment(&self, champion_id: i64) -> Option<BanAssignment> {
        Side::ALL.into_iter().find_map(|side| {
            self.state
                .global_bans
                .side(side)
                .iter()
                .position(|slot| slot.as_ref().is_some_and(|c| c.id == champion_id))
                .map(|index| BanAssignment { side, index })
        })
    }

    pub fn saved_teams(&self) -> &[SavedTeam] {
        &self.saved_teams
    }

    /* Roster */

    pub async fn update_team(&mut self, team: TeamKey, update: TeamUpdate) {
        let target = self.state.team_mut(team);
        if let Some(name) = update.name {
            target.name = name;
        }
        if let Some(players) = update.players {
            for player in players {
                target.player_mut(player.position).name = player.name;
            }
        }
        self.commit().await;
    }

    pub async fn set_player_name(&mut self, team: TeamKey, position: Position, name: String) {
        self.state.team_mut(team).player_mut(position).name = name;
        self.commit().await;
    }

    pub async fn clear_team(&mut self, team: TeamKey) {
        *self.state.team_mut(team) = Team::default();
        self.commit().await;
    }

    /// Exchanges rosters, the current game's board halves and the ban lists.
    pub async fn swap_teams(&mut self) {
        let state = &mut self.state;
        std::mem::swap(&mut state.blue_team, &mut state.red_team);
        if let Some(board) = state.games.get_mut(&state.current_game) {
            std::mem::swap(&mut board.blue_team, &mut board.red_team);
        }
        std::mem::swap(&mut state.global_bans.blue, &mut state.global_bans.red);
        self.commit().await;
    }

    /* Games */

    pub async fn set_current_game(&mut self, game: u8) -> bool {
        if !MatchState::is_valid_game(game) {
            return false;
        }
        self.state.current_game = game;
        self.commit().await;
        true
    }

    /// Writes a cell of the current game. `None` clears it.
    pub async fn assign_champion(
        &mut self,
        team: TeamKey,
        position: Position,
        champion: Option<Champion>,
    ) {
        let game = self.state.current_game;
        let board = self.state.games.entry(game).or_default();
        *board.team_mut(team).slot_mut(position) = champion;
        self.commit().await;
    }

    pub async fn swap_champions(
        &mut self,
        team_a: TeamKey,
        position_a: Position,
        team_b: TeamKey,
        position_b: Position,
    ) -> bool {
        if team_a == team_b && position_a == position_b {
            return false;
        }

        let game = self.state.current_game;
        let board = self.state.games.entry(game).or_default();
        let first = board.team_mut(team_a).slot_mut(position_a).take();
        let second = std::mem::replace(board.team_mut(team_b).slot_mut(position_b), first);
        *board.team_mut(team_a).slot_mut(position_a) = second;

        self.commit().await;
        true
    }

    pub async fn reset_game(&mut self, game: u8) -> bool {
        if !MatchState::is_valid_game(game) {
            return false;
        }
        self.state.games.insert(game, GameBoard::default());
        self.commit().await;
        true
    }

    pub async fn reset_current_game_and_bans(&mut self) {
        let game = self.state.current_game;
        self.state.games.insert(game, GameBoard::default());
        self.state.global_bans = Default::default();
        self.commit().await;
    }

    /// Back to a fresh match. Saved teams are kept.
    pub async fn reset(&mut self) {
        self.state = MatchState::default();
        self.commit().await;
    }

    /* Global bans */

    pub async fn add_global_ban(&mut self, side: Side, index: usize, champion: Champion) -> bool {
        if index >= BAN_SLOTS {
            return false;
        }
        self.state.global_bans.side_mut(side)[index] = Some(champion);
        self.commit().await;
        true
    }

    pub async fn remove_global_ban(&mut self, side: Side, index: usize) -> bool {
        if index >= BAN_SLOTS {
            return false;
        }
        self.state.global_bans.side_mut(side)[index] = None;
        self.commit().await;
        true
    }

    pub async fn swap_global_bans(
        &mut self,
        side_a: Side,
        index_a: usize,
        side_b: Side,
        index_b: usize,
    ) -> bool {
        if index_a >= BAN_SLOTS || index_b >= BAN_SLOTS {
            return false;
        }

        let bans = &mut self.state.global_bans;
        let first = bans.side_mut(side_a)[index_a].take();
        let second = std::mem::replace(&mut bans.side_mut(side_b)[index_b], first);
        bans.side_mut(side_a)[index_a] = second;

        self.commit().await;
        true
    }

    /* Saved teams */

    /// Stores the team's name and roster names. Champions are never included.
    /// Returns `false` when the team has no name.
    pub async fn save_team_to_list(&mut self, team: TeamKey) -> bool {
        let source = self.state.team(team);
        let name = source.name.trim();
        if name.is_empty() {
            return false;
        }

        match self.saved_teams.iter_mut().find(|t| t.name == source.name) {
            Some(existing) => {
                info!("Updating saved team {}", existing.name);
                *existing = SavedTeam::from_team(existing.id, source);
            }
            None => {
                let id = self.next_saved_team_id();
                info!("Saving new team {}", source.name);
                self.saved_teams.push(SavedTeam::from_team(id, source));
            }
        }

        self.save_saved_teams().await;
        true
    }

    fn next_saved_team_id(&self) -> i64 {
        let now = Utc::now().timestamp_millis();
        let newest = self.saved_teams.iter().map(|t| t.id).max().unwrap_or(0);
        match newest.checked_add(1) {
            Some(next) => now.max(next),
            // The largest id is taken; reuse the first free id from now on.
            None => {
                let taken: HashSet<i64> = self.saved_teams.iter().map(|t| t.id).collect();
                (now..i64::MAX).find(|id| !taken.contains(id)).unwrap_or(now)
            }
        }
    }

    pub async fn delete_saved_team(&mut self, id: i64) -> bool {
        let before = self.saved_teams.len();
        self.saved_teams.retain(|t| t.id != id);
        if self.saved_teams.len() == before {
            return false;
        }
        self.save_saved_teams().await;
        true
    }

    /// Copies a saved roster into `target`. The board is left untouched.
    pub async fn apply_saved_team(&mut self, id: i64, target: TeamKey) -> bool {
        let Some(saved) = self.saved_teams.iter().find(|t| t.id == id) else {
            return false;
        };

        let mut team = Team {
            name: saved.name.clone(),
            ..Team::default()
        };
        for position in Position::ALL {
            if let Some(player) = saved.players.iter().find(|p| p.position == position) {
                team.player_mut(position).name = player.name.clone();
            }
        }

        *self.state.team_mut(target) = team;
        self.commit().await;
        true
    }
}
