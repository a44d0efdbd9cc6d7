use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, info};
use validator::Validate;

use crate::error::{StoreError, StoreResult};
use crate::models::match_history::{MatchHistory, NewMatchHistory};
use crate::models::player::{NewPlayer, Player, PlayerChanges};

const PLAYER_COLUMNS: &str = r#"
    id, username, email, total_matches, wins, losses, elo_rating, created_at, last_active_at
"#;

const MATCH_HISTORY_COLUMNS: &str = r#"
    id, player_id, game, match_date, is_win, score, rank
"#;

/// Persistence operations behind the player endpoints.
///
/// Each method is a single atomic store call. Nothing here serializes
/// concurrent writers: two updates racing on the same id end with whichever
/// committed last.
#[async_trait]
pub trait PlayerStore: Send + Sync {
    /// All players, in whatever order the store yields them.
    async fn list_players(&self) -> StoreResult<Vec<Player>>;

    async fn get_player(&self, player_id: i32) -> StoreResult<Option<Player>>;

    async fn create_player(&self, player: NewPlayer) -> StoreResult<Player>;

    /// Returns `None` without touching anything when `player_id` is unknown.
    async fn update_player(
        &self,
        player_id: i32,
        changes: PlayerChanges,
    ) -> StoreResult<Option<Player>>;

    /// Removes the player and its match histories. `false` if it did not exist.
    async fn delete_player(&self, player_id: i32) -> StoreResult<bool>;

    /// Top `limit` players by rating, highest first. Order among equal
    /// ratings is not part of the contract.
    async fn leaderboard(&self, limit: i64) -> StoreResult<Vec<Player>>;

    async fn match_histories_for_player(&self, player_id: i32) -> StoreResult<Vec<MatchHistory>>;

    /// Fails with [`StoreError::Invalid`] when the record breaks the field
    /// rules and with [`StoreError::MissingPlayer`] if the owner does not exist.
    async fn record_match(&self, new_match: NewMatchHistory) -> StoreResult<MatchHistory>;
}

#[derive(Debug, Clone)]
pub struct PgPlayerStore {
    pool: PgPool,
}

impl PgPlayerStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Every method checks a connection out of the pool for the duration of the
// call. It is handed back when `conn` drops, whichever way the call exits.
#[async_trait]
impl PlayerStore for PgPlayerStore {
    async fn list_players(&self) -> StoreResult<Vec<Player>> {
        let mut conn = self.pool.acquire().await?;

        let players = sqlx::query_as::<_, Player>(&format!(
            "SELECT {} FROM players",
            PLAYER_COLUMNS
        ))
        .fetch_all(&mut *conn)
        .await?;

        debug!("Loaded {} players", players.len());
        Ok(players)
    }

    async fn get_player(&self, player_id: i32) -> StoreResult<Option<Player>> {
        let mut conn = self.pool.acquire().await?;

        let player = sqlx::query_as::<_, Player>(&format!(
            "SELECT {} FROM players WHERE id = $1",
            PLAYER_COLUMNS
        ))
        .bind(player_id)
        .fetch_optional(&mut *conn)
        .await?;

        Ok(player)
    }

    async fn create_player(&self, player: NewPlayer) -> StoreResult<Player> {
        let mut conn = self.pool.acquire().await?;

        let created = sqlx::query_as::<_, Player>(&format!(
            r#"
            INSERT INTO players (username, email, total_matches, wins, losses, elo_rating, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {}
            "#,
            PLAYER_COLUMNS
        ))
        .bind(&player.username)
        .bind(&player.email)
        .bind(player.total_matches)
        .bind(player.wins)
        .bind(player.losses)
        .bind(player.elo_rating)
        .bind(player.created_at)
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| {
            tracing::error!("Failed to execute player insert query: {:?}", e);
            e
        })?;

        info!("Created player {} ({})", created.id, created.username);
        Ok(created)
    }

    async fn update_player(
        &self,
        player_id: i32,
        changes: PlayerChanges,
    ) -> StoreResult<Option<Player>> {
        let mut conn = self.pool.acquire().await?;

        let updated = sqlx::query_as::<_, Player>(&format!(
            r#"
            UPDATE players
            SET
                username = $2,
                email = $3,
                total_matches = $4,
                wins = $5,
                losses = $6,
                elo_rating = $7,
                last_active_at = $8
            WHERE id = $1
            RETURNING {}
            "#,
            PLAYER_COLUMNS
        ))
        .bind(player_id)
        .bind(&changes.username)
        .bind(&changes.email)
        .bind(changes.total_matches)
        .bind(changes.wins)
        .bind(changes.losses)
        .bind(changes.elo_rating)
        .bind(changes.last_active_at)
        .fetch_optional(&mut *conn)
        .await?;

        Ok(updated)
    }

    async fn delete_player(&self, player_id: i32) -> StoreResult<bool> {
        let mut conn = self.pool.acquire().await?;

        // match_histories rows go with it through ON DELETE CASCADE
        let result = sqlx::query("DELETE FROM players WHERE id = $1")
            .bind(player_id)
            .execute(&mut *conn)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn leaderboard(&self, limit: i64) -> StoreResult<Vec<Player>> {
        let mut conn = self.pool.acquire().await?;

        let players = sqlx::query_as::<_, Player>(&format!(
            "SELECT {} FROM players ORDER BY elo_rating DESC, id ASC LIMIT $1",
            PLAYER_COLUMNS
        ))
        .bind(limit)
        .fetch_all(&mut *conn)
        .await?;

        Ok(players)
    }

    async fn match_histories_for_player(&self, player_id: i32) -> StoreResult<Vec<MatchHistory>> {
        let mut conn = self.pool.acquire().await?;

        let matches = sqlx::query_as::<_, MatchHistory>(&format!(
            "SELECT {} FROM match_histories WHERE player_id = $1 ORDER BY match_date DESC, id DESC",
            MATCH_HISTORY_COLUMNS
        ))
        .bind(player_id)
        .fetch_all(&mut *conn)
        .await?;

        Ok(matches)
    }

    async fn record_match(&self, new_match: NewMatchHistory) -> StoreResult<MatchHistory> {
        new_match.validate()?;

        let mut conn = self.pool.acquire().await?;

        let recorded = sqlx::query_as::<_, MatchHistory>(&format!(
            r#"
            INSERT INTO match_histories (player_id, game, match_date, is_win, score, rank)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {}
            "#,
            MATCH_HISTORY_COLUMNS
        ))
        .bind(new_match.player_id)
        .bind(&new_match.game)
        .bind(new_match.match_date)
        .bind(new_match.is_win)
        .bind(new_match.score)
        .bind(&new_match.rank)
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| classify_match_insert_error(e, new_match.player_id))?;

        Ok(recorded)
    }
}

/// PostgreSQL foreign key violation: error code 23503
fn classify_match_insert_error(err: sqlx::Error, player_id: i32) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some("23503") {
            return StoreError::MissingPlayer(player_id);
        }
    }
    StoreError::Database(err)
}
