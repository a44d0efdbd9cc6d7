use actix_web::{error::InternalError, web, HttpRequest, ResponseError};

pub mod backend_health;
pub mod players;

use crate::error::ApiError;

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(query_config())
        .service(backend_health::backend_health);

    cfg.service(
        web::scope("/players")
            .service(players::list_players)
            .service(players::get_leaderboard)
            .service(players::get_player)
            .service(players::create_player)
            .service(players::update_player)
            .service(players::delete_player)
    );
}

// Malformed bodies and query strings get the same JSON envelope as
// validation failures instead of actix's plain-text default.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req: &HttpRequest| {
        let api_error = ApiError::BadRequest(err.to_string());
        let response = api_error.error_response();
        InternalError::from_response(err, response).into()
    })
}

fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req: &HttpRequest| {
        let api_error = ApiError::BadRequest(err.to_string());
        let response = api_error.error_response();
        InternalError::from_response(err, response).into()
    })
}
