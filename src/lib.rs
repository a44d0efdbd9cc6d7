use actix_web::{http, web, App, HttpServer};
use actix_web::dev::Server;
use tracing_actix_web::TracingLogger;
use std::net::TcpListener;
use std::sync::Arc;
use actix_cors::Cors;

pub mod config;
pub mod db;
pub mod error;
mod handlers;
pub mod models;
mod routes;
pub mod telemetry;

use crate::config::settings::LeaderboardSettings;
use crate::db::players::PlayerStore;
use crate::routes::init_routes;

pub fn run(
    listener: TcpListener,
    store: Arc<dyn PlayerStore>,
    leaderboard_settings: LeaderboardSettings,
    allowed_origins: Vec<String>,
) -> Result<Server, std::io::Error> {
    // Wrap using web::Data, which boils down to an Arc smart pointer
    let store_data: web::Data<dyn PlayerStore> = web::Data::from(store);
    let leaderboard_data = web::Data::new(leaderboard_settings);

    let server = HttpServer::new(move || {
        let cors = allowed_origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE"])
            .allowed_headers(vec![
                http::header::ACCEPT,
                http::header::CONTENT_TYPE,
            ])
            .expose_headers(vec![http::header::LOCATION])
            .max_age(3600);

        App::new()
            .wrap(TracingLogger::default())
            .wrap(cors)
            // Get a pointer copy and attach it to the application state
            .app_data(store_data.clone())
            .app_data(leaderboard_data.clone())
            .configure(init_routes)
    })
    .listen(listener)?
    .run();

    Ok(server)
}
