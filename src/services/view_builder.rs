use std::collections::HashSet;

use crate::dto::{
    champion_dto::{Champion, ImageKind},
    item_dto::{ItemFilter, ItemRole, ItemTier, ItemType},
    match_dto::{GameBoard, MatchState, Position, TeamKey},
    request_dto::DictionaryQuery,
    view_dto::{
        ChampionCard, ChampionPickView, ChampionStatus, ItemDictView, MatchView, ObjectDictView,
        PickSlot, PlayerCardView, PositionRow, TeamSetupView, View, ViewModel,
    },
};
use crate::services::{
    catalog::Catalogs,
    champion_service::ChampionService,
    item_service::ItemService,
    match_store::MatchStore,
    object_service::ObjectService,
    storage::Storage,
};

const BLUE_TEAM_FALLBACK: &str = "블루팀";
const RED_TEAM_FALLBACK: &str = "레드팀";

fn display_name(name: &str, fallback: &str) -> String {
    if name.trim().is_empty() {
        fallback.to_string()
    } else {
        name.to_string()
    }
}

/// Ids that are off the table for the current pick: global bans and picks made
/// in other games. Built once per render.
struct Unavailable {
    banned: HashSet<i64>,
    picked_other: HashSet<i64>,
}

impl Unavailable {
    fn of<S: Storage>(store: &MatchStore<S>) -> Self {
        Self {
            banned: store.global_banned_champion_ids(),
            picked_other: store.picked_champions_in_other_games(),
        }
    }

    /// Picks in the current game win over bans, which win over picks made in
    /// earlier games.
    fn status<S: Storage>(&self, store: &MatchStore<S>, champion_id: i64) -> ChampionStatus {
        if let Some(assignment) = store.find_champion_assignment(champion_id) {
            return match assignment.team {
                TeamKey::BlueTeam => ChampionStatus::SelectedBlue,
                TeamKey::RedTeam => ChampionStatus::SelectedRed,
            };
        }
        if self.banned.contains(&champion_id) {
            return ChampionStatus::Banned;
        }
        if self.picked_other.contains(&champion_id) {
            return ChampionStatus::PickedOther;
        }
        ChampionStatus::Available
    }
}

pub fn champion_cards<'a, S, I>(store: &MatchStore<S>, champions: I) -> Vec<ChampionCard>
where
    S: Storage,
    I: IntoIterator<Item = &'a Champion>,
{
    let unavailable = Unavailable::of(store);
    champions
        .into_iter()
        .map(|champion| {
            let status = unavailable.status(store, champion.id);
            ChampionCard {
                champion: champion.clone(),
                status,
                selectable: status == ChampionStatus::Available,
            }
        })
        .collect()
}

fn pick_slots(state: &MatchState, board: &GameBoard, team: TeamKey) -> Vec<PickSlot> {
    let order = match team {
        TeamKey::BlueTeam => Position::BLUE_SLOT_ORDER,
        TeamKey::RedTeam => Position::RED_SLOT_ORDER,
    };

    order
        .into_iter()
        .map(|position| PickSlot {
            team,
            position,
            position_label: position.label(),
            player_name: state.team(team).player(position).name.clone(),
            champion: board.team(team).get(position).cloned(),
        })
        .collect()
}

pub fn team_setup_view<S: Storage>(store: &MatchStore<S>) -> TeamSetupView {
    let state = store.get();
    TeamSetupView {
        blue_team: state.blue_team.clone(),
        red_team: state.red_team.clone(),
        saved_teams: store.saved_teams().to_vec(),
    }
}

pub fn champion_pick_view<S: Storage>(
    store: &MatchStore<S>,
    champions: &[&Champion],
) -> ChampionPickView {
    let state = store.get();
    let board = store.current_game_champions();

    ChampionPickView {
        current_game: state.current_game,
        blue_team_name: display_name(&state.blue_team.name, BLUE_TEAM_FALLBACK),
        red_team_name: display_name(&state.red_team.name, RED_TEAM_FALLBACK),
        blue_slots: pick_slots(state, board, TeamKey::BlueTeam),
        red_slots: pick_slots(state, board, TeamKey::RedTeam),
        global_bans: state.global_bans.clone(),
        champions: champion_cards(store, champions.iter().copied()),
    }
}

pub fn match_view<S: Storage>(store: &MatchStore<S>, champions: &ChampionService) -> MatchView {
    let state = store.get();
    let board = store.current_game_champions();

    let card = |team: TeamKey, position: Position| {
        let champion = board.team(team).get(position);
        PlayerCardView {
            player_name: state.team(team).player(position).name.clone(),
            splash_art: champion.map(|c| champions.image_url(c.id, ImageKind::SplashArt)),
            tile: champion.map(|c| champions.image_url(c.id, ImageKind::Tile)),
            champion: champion.cloned(),
        }
    };

    MatchView {
        current_game: state.current_game,
        blue_team_name: display_name(&state.blue_team.name, BLUE_TEAM_FALLBACK),
        red_team_name: display_name(&state.red_team.name, RED_TEAM_FALLBACK),
        rows: Position::ALL
            .into_iter()
            .map(|position| PositionRow {
                position,
                position_label: position.label(),
                blue: card(TeamKey::BlueTeam, position),
                red: card(TeamKey::RedTeam, position),
            })
            .collect(),
    }
}

pub fn item_filter(query: &DictionaryQuery) -> ItemFilter {
    ItemFilter {
        r#type: query.r#type.as_deref().and_then(ItemType::from_filter),
        tier: query.tier.as_deref().and_then(ItemTier::from_filter),
        role: query.role.as_deref().and_then(ItemRole::from_filter),
    }
}

pub fn item_dict_view(items: &ItemService, query: &DictionaryQuery) -> ItemDictView {
    let search = query.q.as_deref();
    let matching: Vec<i64> = items.search(search).iter().map(|i| i.id).collect();

    ItemDictView {
        types: items.types(),
        tiers: items.tiers(),
        roles: items.roles(),
        items: items
            .filtered(item_filter(query))
            .into_iter()
            .filter(|i| matching.contains(&i.id))
            .cloned()
            .collect(),
    }
}

pub fn object_dict_view(objects: &ObjectService, query: &DictionaryQuery) -> ObjectDictView {
    ObjectDictView {
        categories: objects.categories(),
        objects: objects
            .filtered(query.category.as_deref(), query.q.as_deref())
            .into_iter()
            .cloned()
            .collect(),
    }
}

/// Builds the model for `view` from the store and the catalogs loaded so far.
pub fn build_view<S: Storage>(
    view: View,
    store: &MatchStore<S>,
    catalogs: &Catalogs,
    query: &DictionaryQuery,
) -> ViewModel {
    match view {
        View::TeamSetup => ViewModel::TeamSetup(team_setup_view(store)),
        View::ChampionPick => {
            let champions = catalogs.champions.search(query.q.as_deref());
            ViewModel::ChampionPick(champion_pick_view(store, &champions))
        }
        View::MatchView => ViewModel::MatchView(match_view(store, &catalogs.champions)),
        View::ItemDict => ViewModel::ItemDict(item_dict_view(&catalogs.items, query)),
        View::ObjectDict => ViewModel::ObjectDict(object_dict_view(&catalogs.objects, query)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CatalogConfig;
    use crate::dto::match_dto::{Side, TeamUpdate};
    use crate::services::storage::MemoryStorage;

    fn champion(id: i64) -> Champion {
        Champion {
            id,
            name_kr: format!("챔피언{id}"),
            name_en: format!("Champion{id}"),
            thumbnail: String::new(),
            extra: Default::default(),
        }
    }

    fn champion_status<S: Storage>(store: &MatchStore<S>, id: i64) -> ChampionStatus {
        let single = champion(id);
        champion_cards(store, [&single])[0].status
    }

    #[tokio::test]
    async fn status_precedence_prefers_current_pick_then_ban_then_other_game() {
        let mut store = MatchStore::load(MemoryStorage::new()).await;
        store.set_current_game(2).await;
        store
            .assign_champion(TeamKey::BlueTeam, Position::Top, Some(champion(1)))
            .await;
        store.set_current_game(1).await;
        store
            .assign_champion(TeamKey::RedTeam, Position::Mid, Some(champion(2)))
            .await;
        store.add_global_ban(Side::Red, 0, champion(2)).await;
        store.add_global_ban(Side::Blue, 1, champion(1)).await;
        store.add_global_ban(Side::Blue, 2, champion(3)).await;

        assert_eq!(champion_status(&store, 2), ChampionStatus::SelectedRed);
        assert_eq!(champion_status(&store, 1), ChampionStatus::Banned);
        assert_eq!(champion_status(&store, 3), ChampionStatus::Banned);
        assert_eq!(champion_status(&store, 4), ChampionStatus::Available);

        store.remove_global_ban(Side::Blue, 1).await;
        assert_eq!(champion_status(&store, 1), ChampionStatus::PickedOther);

        let all: Vec<Champion> = (1..=4).map(champion).collect();
        let cards = champion_cards(&store, &all);
        let statuses: Vec<ChampionStatus> = cards.iter().map(|c| c.status).collect();
        assert_eq!(
            statuses,
            vec![
                ChampionStatus::PickedOther,
                ChampionStatus::SelectedRed,
                ChampionStatus::Banned,
                ChampionStatus::Available,
            ]
        );
        assert_eq!(cards.iter().filter(|c| c.selectable).count(), 1);
        for card in &cards {
            assert_eq!(card.status, champion_status(&store, card.champion.id));
        }
    }

    #[tokio::test]
    async fn pick_slots_follow_screen_order_and_names_fall_back() {
        let mut store = MatchStore::load(MemoryStorage::new()).await;
        store
            .update_team(TeamKey::RedTeam, TeamUpdate { name: Some("T1".into()), players: None })
            .await;
        store
            .set_player_name(TeamKey::BlueTeam, Position::Sup, "Keria".into())
            .await;

        let view = champion_pick_view(&store, &[]);
        assert_eq!(view.blue_team_name, "블루팀");
        assert_eq!(view.red_team_name, "T1");
        assert_eq!(view.blue_slots[0].position, Position::Sup);
        assert_eq!(view.blue_slots[0].player_name, "Keria");
        assert_eq!(view.red_slots[0].position, Position::Top);

        store
            .assign_champion(TeamKey::RedTeam, Position::Adc, Some(champion(222)))
            .await;
        let champions = ChampionService::new(reqwest::Client::new(), CatalogConfig::default());
        let matches = match_view(&store, &champions);
        assert_eq!(matches.rows.len(), 5);
        assert_eq!(matches.rows[4].blue.player_name, "Keria");
        assert_eq!(matches.rows[4].blue.splash_art, None);
        assert_eq!(
            matches.rows[3].red.splash_art.as_deref(),
            Some("https://cdn.communitydragon.org/latest/champion/222/splash-art")
        );
        assert_eq!(
            matches.rows[3].red.tile.as_deref(),
            Some("https://cdn.communitydragon.org/latest/champion/222/tile")
        );
    }
}
