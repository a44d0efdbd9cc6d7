use actix_web::{delete, get, post, put, web, HttpResponse};

use crate::config::settings::LeaderboardSettings;
use crate::db::players::PlayerStore;
use crate::error::ApiError;
use crate::handlers::player_handler;
use crate::models::player::{LeaderboardQuery, PlayerPayload};

#[get("")]
pub async fn list_players(store: web::Data<dyn PlayerStore>) -> Result<HttpResponse, ApiError> {
    player_handler::list_players(store).await
}

// Registered ahead of `/{player_id}`
#[get("/leaderboard")]
pub async fn get_leaderboard(
    store: web::Data<dyn PlayerStore>,
    settings: web::Data<LeaderboardSettings>,
    query: web::Query<LeaderboardQuery>,
) -> Result<HttpResponse, ApiError> {
    player_handler::get_leaderboard(store, settings, query.into_inner()).await
}

#[get("/{player_id}")]
pub async fn get_player(
    store: web::Data<dyn PlayerStore>,
    path: web::Path<i32>,
) -> Result<HttpResponse, ApiError> {
    player_handler::get_player(store, path.into_inner()).await
}

#[post("")]
pub async fn create_player(
    store: web::Data<dyn PlayerStore>,
    payload: web::Json<PlayerPayload>,
) -> Result<HttpResponse, ApiError> {
    player_handler::create_player(store, payload.into_inner()).await
}

#[put("/{player_id}")]
pub async fn update_player(
    store: web::Data<dyn PlayerStore>,
    path: web::Path<i32>,
    payload: web::Json<PlayerPayload>,
) -> Result<HttpResponse, ApiError> {
    player_handler::update_player(store, path.into_inner(), payload.into_inner()).await
}

#[delete("/{player_id}")]
pub async fn delete_player(
    store: web::Data<dyn PlayerStore>,
    path: web::Path<i32>,
) -> Result<HttpResponse, ApiError> {
    player_handler::delete_player(store, path.into_inner()).await
}
