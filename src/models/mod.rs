pub mod common;
pub mod match_history;
pub mod player;
