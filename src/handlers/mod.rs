pub mod backend_health_handler;
pub mod player_handler;
