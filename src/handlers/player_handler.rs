use actix_web::{http::header, web, HttpResponse};
use chrono::Utc;

use crate::config::settings::LeaderboardSettings;
use crate::db::players::PlayerStore;
use crate::error::ApiError;
use crate::models::player::{LeaderboardQuery, PlayerPayload, PlayerResponse};

#[tracing::instrument(name = "Listing players", skip(store))]
pub async fn list_players(store: web::Data<dyn PlayerStore>) -> Result<HttpResponse, ApiError> {
    let players: Vec<PlayerResponse> = store
        .list_players()
        .await?
        .into_iter()
        .map(PlayerResponse::from)
        .collect();

    Ok(HttpResponse::Ok().json(players))
}

#[tracing::instrument(name = "Fetching player", skip(store))]
pub async fn get_player(
    store: web::Data<dyn PlayerStore>,
    player_id: i32,
) -> Result<HttpResponse, ApiError> {
    let player = store
        .get_player(player_id)
        .await?
        .ok_or(ApiError::NotFound(player_id))?;

    Ok(HttpResponse::Ok().json(PlayerResponse::from(player)))
}

#[tracing::instrument(
    name = "Creating player",
    skip(store, payload),
    fields(username = ?payload.username)
)]
pub async fn create_player(
    store: web::Data<dyn PlayerStore>,
    payload: PlayerPayload,
) -> Result<HttpResponse, ApiError> {
    // Rejected before the store is touched
    let new_player = payload.into_new_player(Utc::now())?;

    let created = store.create_player(new_player).await?;
    let location = format!("/players/{}", created.id);

    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, location))
        .json(PlayerResponse::from(created)))
}

#[tracing::instrument(
    name = "Updating player",
    skip(store, payload),
    fields(username = ?payload.username)
)]
pub async fn update_player(
    store: web::Data<dyn PlayerStore>,
    player_id: i32,
    payload: PlayerPayload,
) -> Result<HttpResponse, ApiError> {
    let changes = payload.into_changes(Utc::now())?;

    let updated = store
        .update_player(player_id, changes)
        .await?
        .ok_or(ApiError::NotFound(player_id))?;

    Ok(HttpResponse::Ok().json(PlayerResponse::from(updated)))
}

#[tracing::instrument(name = "Deleting player", skip(store))]
pub async fn delete_player(
    store: web::Data<dyn PlayerStore>,
    player_id: i32,
) -> Result<HttpResponse, ApiError> {
    if !store.delete_player(player_id).await? {
        return Err(ApiError::NotFound(player_id));
    }

    Ok(HttpResponse::NoContent().finish())
}

#[tracing::instrument(name = "Fetching leaderboard", skip(store, settings))]
pub async fn get_leaderboard(
    store: web::Data<dyn PlayerStore>,
    settings: web::Data<LeaderboardSettings>,
    query: LeaderboardQuery,
) -> Result<HttpResponse, ApiError> {
    let limit = settings.effective_limit(query.limit);

    let players: Vec<PlayerResponse> = store
        .leaderboard(limit)
        .await?
        .into_iter()
        .map(PlayerResponse::from)
        .collect();

    Ok(HttpResponse::Ok().json(players))
}
