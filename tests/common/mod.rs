#![allow(dead_code)]

pub mod memory_store;
pub mod player_helpers;
pub mod utils;
