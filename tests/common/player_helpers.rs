use reqwest::{Client, Response};
use serde_json::{json, Value};

use player_stats_api::models::player::PlayerResponse;

pub fn player_payload(username: &str, elo_rating: i32) -> Value {
    json!({
        "username": username,
        "email": format!("{}@example.com", username),
        "eloRating": elo_rating
    })
}

pub async fn post_player(client: &Client, address: &str, body: &Value) -> Response {
    client
        .post(&format!("{}/players", address))
        .json(body)
        .send()
        .await
        .expect("Failed to execute request.")
}

pub async fn create_player(client: &Client, address: &str, username: &str, elo_rating: i32) -> PlayerResponse {
    let response = post_player(client, address, &player_payload(username, elo_rating)).await;
    assert_eq!(response.status().as_u16(), 201, "Failed to create player {}", username);
    response.json().await.expect("Failed to parse created player")
}

pub async fn fetch_player(client: &Client, address: &str, player_id: i32) -> Response {
    client
        .get(&format!("{}/players/{}", address, player_id))
        .send()
        .await
        .expect("Failed to execute request.")
}
