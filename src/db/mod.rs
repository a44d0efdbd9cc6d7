pub mod players;

pub use players::{PgPlayerStore, PlayerStore};
