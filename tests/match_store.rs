mod common;

use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use common::{FailingStorage, champion};
use sqlx::sqlite::SqlitePoolOptions;
use viewer_helper_backend::{
    dto::match_dto::{Assignment, MatchState, Player, Position, Side, TeamKey, TeamUpdate},
    services::{
        match_store::{MatchStore, SAVED_TEAMS_KEY, STORAGE_KEY},
        storage::{MemoryStorage, SqliteStorage, Storage},
    },
};

async fn counted_store() -> (MatchStore<MemoryStorage>, Arc<AtomicUsize>) {
    let mut store = MatchStore::load(MemoryStorage::new()).await;
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    store.subscribe(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    (store, calls)
}

fn named(name: &str) -> TeamUpdate {
    TeamUpdate {
        name: Some(name.to_string()),
        players: None,
    }
}

#[tokio::test]
async fn assigned_champion_is_read_back_and_persisted() {
    let (mut store, calls) = counted_store().await;

    store
        .assign_champion(TeamKey::BlueTeam, Position::Mid, Some(champion(103, "아리", "Ahri")))
        .await;

    assert_eq!(
        store.current_game_champions().blue_team.mid.as_ref().map(|c| c.id),
        Some(103)
    );
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    let saved = store.storage().snapshot(STORAGE_KEY).unwrap();
    let saved: MatchState = serde_json::from_str(&saved).unwrap();
    assert_eq!(&saved, store.get());
}

#[tokio::test]
async fn picks_only_touch_the_current_game() {
    let (mut store, _) = counted_store().await;

    assert!(store.set_current_game(3).await);
    store
        .assign_champion(TeamKey::RedTeam, Position::Sup, Some(champion(412, "쓰레쉬", "Thresh")))
        .await;

    for game in [1, 2, 4, 5] {
        let board = store.game_champions(game).unwrap();
        assert_eq!(board.champion_ids().count(), 0, "game {game} was touched");
    }
    assert_eq!(store.game_champions(3).unwrap().champion_ids().collect::<Vec<_>>(), vec![412]);
}

#[tokio::test]
async fn swapping_two_cells_twice_restores_the_board() {
    let (mut store, _) = counted_store().await;
    store
        .assign_champion(TeamKey::BlueTeam, Position::Top, Some(champion(1, "애니", "Annie")))
        .await;
    store
        .assign_champion(TeamKey::RedTeam, Position::Adc, Some(champion(84, "아칼리", "Akali")))
        .await;
    let before = store.current_game_champions().clone();

    assert!(
        store
            .swap_champions(TeamKey::BlueTeam, Position::Top, TeamKey::RedTeam, Position::Adc)
            .await
    );
    let board = store.current_game_champions();
    assert_eq!(board.blue_team.top.as_ref().map(|c| c.id), Some(84));
    assert_eq!(board.red_team.adc.as_ref().map(|c| c.id), Some(1));

    assert!(
        store
            .swap_champions(TeamKey::BlueTeam, Position::Top, TeamKey::RedTeam, Position::Adc)
            .await
    );
    assert_eq!(store.current_game_champions(), &before);
}

#[tokio::test]
async fn swapping_a_filled_cell_with_an_empty_one_moves_the_pick() {
    let (mut store, _) = counted_store().await;
    store
        .assign_champion(TeamKey::BlueTeam, Position::Jg, Some(champion(1, "애니", "Annie")))
        .await;

    assert!(
        store
            .swap_champions(TeamKey::BlueTeam, Position::Jg, TeamKey::BlueTeam, Position::Sup)
            .await
    );

    let board = store.current_game_champions();
    assert!(board.blue_team.jg.is_none());
    assert_eq!(board.blue_team.sup.as_ref().map(|c| c.id), Some(1));
}

#[tokio::test]
async fn swap_teams_twice_is_the_identity() {
    let (mut store, _) = counted_store().await;
    store.update_team(TeamKey::BlueTeam, named("T1")).await;
    store.update_team(TeamKey::RedTeam, named("Gen.G")).await;
    store
        .assign_champion(TeamKey::BlueTeam, Position::Top, Some(champion(1, "애니", "Annie")))
        .await;
    store.add_global_ban(Side::Red, 2, champion(84, "아칼리", "Akali")).await;
    let before = store.get().clone();

    store.swap_teams().await;
    let swapped = store.get();
    assert_eq!(swapped.blue_team.name, "Gen.G");
    assert_eq!(swapped.red_team.name, "T1");
    assert_eq!(
        store.current_game_champions().red_team.top.as_ref().map(|c| c.id),
        Some(1)
    );
    assert_eq!(swapped.global_bans.blue[2].as_ref().map(|c| c.id), Some(84));

    store.swap_teams().await;
    assert_eq!(store.get(), &before);
}

#[tokio::test]
async fn swap_teams_leaves_other_games_alone() {
    let (mut store, _) = counted_store().await;
    store
        .assign_champion(TeamKey::BlueTeam, Position::Mid, Some(champion(103, "아리", "Ahri")))
        .await;
    store.set_current_game(2).await;

    store.swap_teams().await;

    let first = store.game_champions(1).unwrap();
    assert_eq!(first.blue_team.mid.as_ref().map(|c| c.id), Some(103));
    assert!(first.red_team.mid.is_none());
}

#[tokio::test]
async fn resetting_current_game_and_bans_spares_other_games_and_rosters() {
    let (mut store, _) = counted_store().await;
    store.update_team(TeamKey::BlueTeam, named("T1")).await;
    store
        .assign_champion(TeamKey::BlueTeam, Position::Top, Some(champion(1, "애니", "Annie")))
        .await;
    store.set_current_game(2).await;
    store
        .assign_champion(TeamKey::RedTeam, Position::Top, Some(champion(84, "아칼리", "Akali")))
        .await;
    store.add_global_ban(Side::Blue, 0, champion(103, "아리", "Ahri")).await;

    store.reset_current_game_and_bans().await;

    assert_eq!(store.current_game_champions().champion_ids().count(), 0);
    assert!(store.global_banned_champion_ids().is_empty());
    assert_eq!(
        store.game_champions(1).unwrap().blue_team.top.as_ref().map(|c| c.id),
        Some(1)
    );
    assert_eq!(store.get().blue_team.name, "T1");
    assert_eq!(store.current_game(), 2);
}

#[tokio::test]
async fn reset_game_and_reset_all() {
    let (mut store, _) = counted_store().await;
    store.update_team(TeamKey::RedTeam, named("Gen.G")).await;
    store
        .assign_champion(TeamKey::BlueTeam, Position::Top, Some(champion(1, "애니", "Annie")))
        .await;
    store.update_team(TeamKey::RedTeam, named("Gen.G")).await;
    assert!(store.save_team_to_list(TeamKey::RedTeam).await);

    assert!(!store.reset_game(6).await);
    assert!(store.reset_game(1).await);
    assert_eq!(store.game_champions(1).unwrap().champion_ids().count(), 0);

    store.set_current_game(4).await;
    store.reset().await;
    assert_eq!(store.get(), &MatchState::default());
    assert_eq!(store.saved_teams().len(), 1);
}

#[tokio::test]
async fn out_of_range_game_is_ignored_without_notifying() {
    let (mut store, calls) = counted_store().await;

    assert!(!store.set_current_game(0).await);
    assert!(!store.set_current_game(6).await);

    assert_eq!(store.current_game(), 1);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert_eq!(store.storage().snapshot(STORAGE_KEY), None);
    assert!(store.game_champions(6).is_none());
}

#[tokio::test]
async fn saving_a_team_upserts_by_name() {
    let (mut store, calls) = counted_store().await;

    assert!(!store.save_team_to_list(TeamKey::BlueTeam).await);
    store.update_team(TeamKey::BlueTeam, named("   ")).await;
    assert!(!store.save_team_to_list(TeamKey::BlueTeam).await);
    assert!(store.saved_teams().is_empty());

    store
        .update_team(
            TeamKey::BlueTeam,
            TeamUpdate {
                name: Some("T1".to_string()),
                players: Some(vec![Player {
                    position: Position::Mid,
                    name: "Faker".to_string(),
                }]),
            },
        )
        .await;
    store
        .assign_champion(TeamKey::BlueTeam, Position::Mid, Some(champion(103, "아리", "Ahri")))
        .await;
    let notified = calls.load(Ordering::SeqCst);

    assert!(store.save_team_to_list(TeamKey::BlueTeam).await);
    let id = store.saved_teams()[0].id;

    store.set_player_name(TeamKey::BlueTeam, Position::Mid, "Poby".to_string()).await;
    assert!(store.save_team_to_list(TeamKey::BlueTeam).await);

    let saved = store.saved_teams();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].id, id);
    assert_eq!(saved[0].players.len(), 5);
    assert_eq!(saved[0].players[2].name, "Poby");

    // Saved rosters never carry champions.
    let raw = store.storage().snapshot(SAVED_TEAMS_KEY).unwrap();
    assert!(!raw.contains("champion"));
    assert!(!raw.contains("Ahri"));

    // Only the player-name edit notified.
    assert_eq!(calls.load(Ordering::SeqCst), notified + 1);
}

#[tokio::test]
async fn saved_teams_can_be_applied_and_deleted() {
    let (mut store, _) = counted_store().await;
    store
        .update_team(
            TeamKey::BlueTeam,
            TeamUpdate {
                name: Some("T1".to_string()),
                players: Some(vec![Player {
                    position: Position::Top,
                    name: "Zeus".to_string(),
                }]),
            },
        )
        .await;
    assert!(store.save_team_to_list(TeamKey::BlueTeam).await);
    let id = store.saved_teams()[0].id;

    assert!(store.apply_saved_team(id, TeamKey::RedTeam).await);
    assert_eq!(store.get().red_team.name, "T1");
    assert_eq!(store.get().red_team.player(Position::Top).name, "Zeus");

    assert!(store.delete_saved_team(id).await);
    assert!(!store.delete_saved_team(id).await);
    assert!(!store.apply_saved_team(id, TeamKey::BlueTeam).await);
    assert_eq!(store.storage().snapshot(SAVED_TEAMS_KEY).as_deref(), Some("[]"));
}

#[tokio::test]
async fn clear_team_blanks_the_roster_only() {
    let (mut store, _) = counted_store().await;
    store.update_team(TeamKey::RedTeam, named("Gen.G")).await;
    store.set_player_name(TeamKey::RedTeam, Position::Jg, "Canyon".to_string()).await;
    store
        .assign_champion(TeamKey::RedTeam, Position::Jg, Some(champion(1, "애니", "Annie")))
        .await;

    store.clear_team(TeamKey::RedTeam).await;

    let red = &store.get().red_team;
    assert_eq!(red.name, "");
    assert!(red.players.iter().all(|p| p.name.is_empty()));
    assert_eq!(
        red.players.iter().map(|p| p.position).collect::<Vec<_>>(),
        Position::ALL.to_vec()
    );
    assert!(store.current_game_champions().red_team.jg.is_some());
}

#[tokio::test]
async fn current_game_lookup_and_other_games_are_disjoint_views() {
    let (mut store, _) = counted_store().await;
    store
        .assign_champion(TeamKey::RedTeam, Position::Mid, Some(champion(103, "아리", "Ahri")))
        .await;
    store.set_current_game(2).await;

    assert_eq!(store.find_champion_assignment(103), None);
    assert!(store.picked_champions_in_other_games().contains(&103));

    store.set_current_game(1).await;
    assert_eq!(
        store.find_champion_assignment(103),
        Some(Assignment {
            team: TeamKey::RedTeam,
            position: Position::Mid,
        })
    );
    assert!(!store.picked_champions_in_other_games().contains(&103));
}

#[tokio::test]
async fn duplicate_picks_are_allowed_and_found_blue_first() {
    let (mut store, _) = counted_store().await;
    store
        .assign_champion(TeamKey::RedTeam, Position::Top, Some(champion(1, "애니", "Annie")))
        .await;
    store
        .assign_champion(TeamKey::BlueTeam, Position::Sup, Some(champion(1, "애니", "Annie")))
        .await;

    assert_eq!(
        store.find_champion_assignment(1),
        Some(Assignment {
            team: TeamKey::BlueTeam,
            position: Position::Sup,
        })
    );
}

#[tokio::test]
async fn storage_failures_do_not_stop_the_store() {
    let mut store = MatchStore::load(FailingStorage).await;
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    store.subscribe(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    assert_eq!(store.get(), &MatchState::default());

    store.update_team(TeamKey::BlueTeam, named("T1")).await;
    assert!(store.set_current_game(5).await);
    assert!(store.save_team_to_list(TeamKey::BlueTeam).await);

    assert_eq!(store.get().blue_team.name, "T1");
    assert_eq!(store.current_game(), 5);
    assert_eq!(store.saved_teams().len(), 1);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn unreadable_snapshot_falls_back_to_defaults() {
    let storage = MemoryStorage::with_item(STORAGE_KEY, "{ definitely not json");
    let store = MatchStore::load(storage).await;
    assert_eq!(store.get(), &MatchState::default());
}

#[tokio::test]
async fn sqlite_state_survives_a_restart() {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite://{}", dir.path().join("nested/viewer.db").display());

    {
        let storage = SqliteStorage::connect(&url).await.unwrap();
        let mut store = MatchStore::load(storage).await;
        store.update_team(TeamKey::BlueTeam, named("T1")).await;
        store.set_current_game(2).await;
        store
            .assign_champion(TeamKey::BlueTeam, Position::Adc, Some(champion(84, "아칼리", "Akali")))
            .await;
        store.add_global_ban(Side::Red, 4, champion(1, "애니", "Annie")).await;
        assert!(store.save_team_to_list(TeamKey::BlueTeam).await);
    }

    let storage = SqliteStorage::connect(&url).await.unwrap();
    let store = MatchStore::load(storage).await;

    assert_eq!(store.get().blue_team.name, "T1");
    assert_eq!(store.current_game(), 2);
    assert_eq!(
        store.current_game_champions().blue_team.adc.as_ref().map(|c| c.id),
        Some(84)
    );
    assert_eq!(store.find_global_ban_assignment(1).map(|b| b.index), Some(4));
    assert_eq!(store.saved_teams()[0].name, "T1");
}

#[tokio::test]
async fn sqlite_storage_reads_what_it_wrote() {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    let storage = SqliteStorage::from_pool(pool).await.unwrap();

    assert_eq!(storage.get_item(STORAGE_KEY).await.unwrap(), None);
    storage.set_item(STORAGE_KEY, "{}").await.unwrap();

    let store = MatchStore::load(storage).await;
    assert_eq!(store.get(), &MatchState::default());
}
