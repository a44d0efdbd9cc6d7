use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::common::not_blank;

/// One recorded match. Always owned by an existing player and removed
/// together with it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct MatchHistory {
    pub id: i32,
    pub player_id: i32,
    pub game: String,
    pub match_date: DateTime<Utc>,
    pub is_win: bool,
    pub score: i32,
    pub rank: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewMatchHistory {
    pub player_id: i32,
    #[validate(custom(function = "not_blank"), length(max = 100))]
    pub game: String,
    pub match_date: DateTime<Utc>,
    #[serde(default)]
    pub is_win: bool,
    #[serde(default)]
    pub score: i32,
    #[validate(length(max = 50))]
    pub rank: Option<String>,
}
