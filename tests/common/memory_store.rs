use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;
use validator::Validate;

use player_stats_api::db::players::PlayerStore;
use player_stats_api::error::{StoreError, StoreResult};
use player_stats_api::models::match_history::{MatchHistory, NewMatchHistory};
use player_stats_api::models::player::{NewPlayer, Player, PlayerChanges};

/// `PlayerStore` kept in process memory so the HTTP tests run without Postgres.
/// Mirrors the Postgres schema: serial ids, cascading match deletes,
/// rejected matches for unknown players.
#[derive(Default)]
pub struct MemoryPlayerStore {
    state: Mutex<MemoryState>,
}

#[derive(Default)]
struct MemoryState {
    next_player_id: i32,
    next_match_id: i32,
    players: BTreeMap<i32, Player>,
    matches: BTreeMap<i32, MatchHistory>,
}

impl MemoryPlayerStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn player_count(&self) -> usize {
        self.state.lock().unwrap().players.len()
    }

    pub fn snapshot(&self) -> Vec<Player> {
        self.state.lock().unwrap().players.values().cloned().collect()
    }
}

#[async_trait]
impl PlayerStore for MemoryPlayerStore {
    async fn list_players(&self) -> StoreResult<Vec<Player>> {
        Ok(self.snapshot())
    }

    async fn get_player(&self, player_id: i32) -> StoreResult<Option<Player>> {
        Ok(self.state.lock().unwrap().players.get(&player_id).cloned())
    }

    async fn create_player(&self, player: NewPlayer) -> StoreResult<Player> {
        let mut state = self.state.lock().unwrap();
        state.next_player_id += 1;
        let created = Player {
            id: state.next_player_id,
            username: player.username,
            email: player.email,
            total_matches: player.total_matches,
            wins: player.wins,
            losses: player.losses,
            elo_rating: player.elo_rating,
            created_at: player.created_at,
            last_active_at: None,
        };
        state.players.insert(created.id, created.clone());
        Ok(created)
    }

    async fn update_player(
        &self,
        player_id: i32,
        changes: PlayerChanges,
    ) -> StoreResult<Option<Player>> {
        let mut state = self.state.lock().unwrap();
        let Some(player) = state.players.get_mut(&player_id) else {
            return Ok(None);
        };
        player.username = changes.username;
        player.email = changes.email;
        player.total_matches = changes.total_matches;
        player.wins = changes.wins;
        player.losses = changes.losses;
        player.elo_rating = changes.elo_rating;
        player.last_active_at = Some(changes.last_active_at);
        Ok(Some(player.clone()))
    }

    async fn delete_player(&self, player_id: i32) -> StoreResult<bool> {
        let mut state = self.state.lock().unwrap();
        if state.players.remove(&player_id).is_none() {
            return Ok(false);
        }
        state.matches.retain(|_, m| m.player_id != player_id);
        Ok(true)
    }

    async fn leaderboard(&self, limit: i64) -> StoreResult<Vec<Player>> {
        let mut players = self.snapshot();
        players.sort_by(|a, b| b.elo_rating.cmp(&a.elo_rating).then(a.id.cmp(&b.id)));
        players.truncate(usize::try_from(limit).unwrap_or(0));
        Ok(players)
    }

    async fn match_histories_for_player(&self, player_id: i32) -> StoreResult<Vec<MatchHistory>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .matches
            .values()
            .filter(|m| m.player_id == player_id)
            .cloned()
            .collect())
    }

    async fn record_match(&self, new_match: NewMatchHistory) -> StoreResult<MatchHistory> {
        new_match.validate()?;

        let mut state = self.state.lock().unwrap();
        if !state.players.contains_key(&new_match.player_id) {
            return Err(StoreError::MissingPlayer(new_match.player_id));
        }
        state.next_match_id += 1;
        let recorded = MatchHistory {
            id: state.next_match_id,
            player_id: new_match.player_id,
            game: new_match.game,
            match_date: new_match.match_date,
            is_win: new_match.is_win,
            score: new_match.score,
            rank: new_match.rank,
        };
        state.matches.insert(recorded.id, recorded.clone());
        Ok(recorded)
    }
}
