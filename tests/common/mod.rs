//! Shared fixtures for the integration tests: a mock backend, sessions and
//! sample payloads.

#![allow(dead_code)]

use mymdb::config::ClientProfile;
use mymdb::{ApiClient, Session, User};
use serde_json::{json, Value};
use wiremock::MockServer;

pub async fn mock_backend() -> MockServer {
    MockServer::start().await
}

pub fn client_for(server: &MockServer, session: &Session) -> ApiClient {
    let profile = ClientProfile::new(&server.uri(), false).expect("mock server URI is valid");
    ApiClient::new(&profile, session.clone()).expect("client builds")
}

/// Session holding user `u1` with token `t1`
pub fn logged_in_session() -> Session {
    let session = Session::in_memory();
    let user = User {
        id: "u1".to_string(),
        username: "ripley".to_string(),
        email: "ripley@nostromo.space".to_string(),
        birthday: Some("2092-01-07".to_string()),
        favorite_movies: vec!["m1".to_string()],
    };
    session.store_login(&user, "t1").expect("memory session stores");
    session
}

pub fn movie_json(id: &str, title: &str) -> Value {
    json!({
        "_id": id,
        "Title": title,
        "Description": format!("{title} description"),
        "Actors": ["Sigourney Weaver"],
        "ImagePath": format!("{id}.png"),
        "Featured": false,
        "Director": { "Name": "Ridley Scott", "Bio": "English director" },
        "Genres": [{ "Name": "Sci-Fi", "Description": "Science fiction" }]
    })
}

pub fn user_json(id: &str, favorites: &[&str]) -> Value {
    json!({
        "_id": id,
        "Username": "ripley",
        "Email": "ripley@nostromo.space",
        "Birthday": "2092-01-07",
        "FavoriteMovies": favorites
    })
}

/// Number of requests the mock backend has seen
pub async fn request_count(server: &MockServer) -> usize {
    server
        .received_requests()
        .await
        .map(|requests| requests.len())
        .unwrap_or(0)
}
