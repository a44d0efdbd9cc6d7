use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

use crate::models::common::not_blank;

pub const DEFAULT_ELO_RATING: i32 = 1000;

/// Player row as stored in the `players` table.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Player {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub total_matches: i32,
    pub wins: i32,
    pub losses: i32,
    pub elo_rating: i32,
    pub created_at: DateTime<Utc>,
    pub last_active_at: Option<DateTime<Utc>>,
}

impl Player {
    /// Percentage of matches won, derived on every read and never stored.
    pub fn win_rate(&self) -> f64 {
        if self.total_matches > 0 {
            f64::from(self.wins) / f64::from(self.total_matches) * 100.0
        } else {
            0.0
        }
    }
}

/// Wire representation of a player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerResponse {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub total_matches: i32,
    pub wins: i32,
    pub losses: i32,
    pub elo_rating: i32,
    pub win_rate: f64,
    pub created_at: DateTime<Utc>,
    pub last_active_at: Option<DateTime<Utc>>,
}

impl From<Player> for PlayerResponse {
    fn from(player: Player) -> Self {
        let win_rate = player.win_rate();
        Self {
            id: player.id,
            username: player.username,
            email: player.email,
            total_matches: player.total_matches,
            wins: player.wins,
            losses: player.losses,
            elo_rating: player.elo_rating,
            win_rate,
            created_at: player.created_at,
            last_active_at: player.last_active_at,
        }
    }
}

/// Body accepted by `POST /players` and `PUT /players/{id}`.
///
/// `id`, `winRate` and `lastActiveAt` are not part of the payload; serde
/// drops them if a client sends them anyway. Username and email are
/// optional at the serde level so a missing or `null` value is reported as
/// a field error instead of a parse error.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PlayerPayload {
    #[serde(default)]
    #[validate(
        required(message = "Username is required"),
        custom(function = "not_blank", message = "Username is required"),
        length(max = 100, message = "Username must be at most 100 characters")
    )]
    pub username: Option<String>,
    #[serde(default)]
    #[validate(
        required(message = "Email is required"),
        email(message = "Email must be a valid email address")
    )]
    pub email: Option<String>,
    #[serde(default)]
    pub total_matches: i32,
    #[serde(default)]
    pub wins: i32,
    #[serde(default)]
    pub losses: i32,
    #[serde(default = "default_elo_rating")]
    pub elo_rating: i32,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

fn default_elo_rating() -> i32 {
    DEFAULT_ELO_RATING
}

impl PlayerPayload {
    /// Validates the payload and turns it into insert values.
    pub fn into_new_player(self, now: DateTime<Utc>) -> Result<NewPlayer, ValidationErrors> {
        self.validate()?;
        Ok(NewPlayer {
            username: self.username.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            total_matches: self.total_matches,
            wins: self.wins,
            losses: self.losses,
            elo_rating: self.elo_rating,
            created_at: self.created_at.unwrap_or(now),
        })
    }

    /// Validates the payload and turns it into update values. The client's
    /// `createdAt` is ignored here, it is set once at creation.
    pub fn into_changes(self, now: DateTime<Utc>) -> Result<PlayerChanges, ValidationErrors> {
        self.validate()?;
        Ok(PlayerChanges {
            username: self.username.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            total_matches: self.total_matches,
            wins: self.wins,
            losses: self.losses,
            elo_rating: self.elo_rating,
            last_active_at: now,
        })
    }
}

/// Validated values for a player insert.
#[derive(Debug, Clone)]
pub struct NewPlayer {
    pub username: String,
    pub email: String,
    pub total_matches: i32,
    pub wins: i32,
    pub losses: i32,
    pub elo_rating: i32,
    pub created_at: DateTime<Utc>,
}

/// Columns overwritten by an update. `last_active_at` is always server time.
#[derive(Debug, Clone)]
pub struct PlayerChanges {
    pub username: String,
    pub email: String,
    pub total_matches: i32,
    pub wins: i32,
    pub losses: i32,
    pub elo_rating: i32,
    pub last_active_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct LeaderboardQuery {
    pub limit: Option<i64>,
}
