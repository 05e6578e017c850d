//! Local stand-in for the Spotify endpoints plshuffle talks to.

#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use axum::{
    Form, Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use plshuffle::config::Config;
use serde_json::{Value, json};

/// Items in the "big" playlist, including one null track (position 10) and
/// one local file without id (position 20).
pub const BIG_TRACK_COUNT: usize = 252;
pub const PAGE_SIZE: usize = 100;

#[derive(Debug, Default)]
pub struct Recorded {
    pub created: Vec<(String, Value)>,
    pub added: Vec<(String, Vec<String>)>,
    pub token_requests: Vec<HashMap<String, String>>,
    pub flaky_hits: usize,
    /// Requests for a playlist object, i.e. playlist fetches.
    pub playlist_hits: usize,
}

/// Access token the mock answers with 401, as for a token revoked by the user.
pub const REVOKED_TOKEN: &str = "revoked";

#[derive(Clone)]
struct MockState {
    base: String,
    recorded: Arc<Mutex<Recorded>>,
}

pub struct MockSpotify {
    pub base: String,
    pub recorded: Arc<Mutex<Recorded>>,
}

impl MockSpotify {
    pub async fn start() -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        let recorded = Arc::new(Mutex::new(Recorded::default()));

        let state = MockState {
            base: base.clone(),
            recorded: Arc::clone(&recorded),
        };

        let app = Router::new()
            .route("/api/token", post(token))
            .route("/v1/me", get(me))
            .route("/v1/me/playlists", get(my_playlists))
            .route("/v1/playlists/{id}", get(playlist))
            .route("/v1/playlists/{id}/tracks", get(tracks).post(add_tracks))
            .route("/v1/users/{user}/playlists", post(create_playlist))
            .route("/v1/flaky", get(flaky))
            .route("/v1/throttled", get(throttled))
            .with_state(state);

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base, recorded }
    }

    pub fn config(&self) -> Config {
        let api_url = format!("{}/v1", self.base);
        let token_url = format!("{}/api/token", self.base);
        let auth_url = format!("{}/authorize", self.base);
        Config::from_lookup(|key| match key {
            "SPOTIFY_API_AUTH_CLIENT_ID" => Some("test-client".to_string()),
            "SPOTIFY_API_URL" => Some(api_url.clone()),
            "SPOTIFY_API_TOKEN_URL" => Some(token_url.clone()),
            "SPOTIFY_API_AUTH_URL" => Some(auth_url.clone()),
            _ => None,
        })
        .unwrap()
    }
}

fn track_item(index: usize) -> Value {
    match index {
        10 => json!({ "track": null }),
        20 => json!({ "track": { "name": "Local 20", "id": null, "type": "track" } }),
        _ => json!({
            "track": { "name": format!("Track {index}"), "id": format!("id{index}"), "type": "track" }
        }),
    }
}

fn big_tracks_page(base: &str, offset: usize) -> Value {
    let end = (offset + PAGE_SIZE).min(BIG_TRACK_COUNT);
    let items: Vec<Value> = (offset..end).map(track_item).collect();
    let next = (end < BIG_TRACK_COUNT)
        .then(|| format!("{base}/v1/playlists/big/tracks?offset={end}&limit={PAGE_SIZE}"));
    json!({ "items": items, "next": next, "total": BIG_TRACK_COUNT })
}

fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": { "status": 404, "message": "Resource not found" } })),
    )
        .into_response()
}

async fn token(
    State(state): State<MockState>,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    state.recorded.lock().unwrap().token_requests.push(form.clone());

    match form.get("grant_type").map(String::as_str) {
        Some("authorization_code") if form.get("code").map(String::as_str) == Some("good") => {
            Json(json!({
                "access_token": "access-1",
                "token_type": "Bearer",
                "scope": "playlist-read-private",
                "expires_in": 3600,
                "refresh_token": "refresh-1"
            }))
            .into_response()
        }
        Some("refresh_token") if form.get("refresh_token").map(String::as_str) == Some(REVOKED_TOKEN) => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "invalid_grant" })),
        )
            .into_response(),
        Some("refresh_token") => Json(json!({
            "access_token": "access-2",
            "token_type": "Bearer",
            "expires_in": 3600
        }))
        .into_response(),
        _ => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "invalid_grant" })),
        )
            .into_response(),
    }
}

async fn me(headers: HeaderMap) -> Response {
    if !headers.contains_key("authorization") {
        return (StatusCode::UNAUTHORIZED, "no token").into_response();
    }
    Json(json!({ "id": "user-1", "display_name": "Test User" })).into_response()
}

async fn my_playlists(
    State(state): State<MockState>,
    Query(query): Query<HashMap<String, String>>,
) -> Json<Value> {
    let base = &state.base;
    match query.get("offset").map(String::as_str) {
        Some("2") => Json(json!({
            "items": [
                { "id": "taken", "name": "Taken Name", "public": false, "images": null, "tracks": { "total": 1 } }
            ],
            "next": null,
            "total": 3
        })),
        _ => Json(json!({
            "items": [
                { "id": "big", "name": "Big Mix", "public": true, "images": [], "tracks": { "total": BIG_TRACK_COUNT } },
                { "id": "small", "name": "Small", "public": null, "tracks": { "total": 3 } }
            ],
            "next": format!("{base}/v1/me/playlists?offset=2&limit=50"),
            "total": 3
        })),
    }
}

fn is_revoked(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {REVOKED_TOKEN}"))
}

async fn playlist(
    State(state): State<MockState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    if is_revoked(&headers) {
        return (StatusCode::UNAUTHORIZED, "token revoked").into_response();
    }
    state.recorded.lock().unwrap().playlist_hits += 1;

    match id.as_str() {
        "big" => Json(json!({
            "id": "big",
            "name": "Big Mix",
            "public": true,
            "images": [{ "url": "https://img.example/big.jpg", "width": 640, "height": 640 }],
            "tracks": big_tracks_page(&state.base, 0)
        }))
        .into_response(),
        "small" => Json(json!({
            "id": "small",
            "name": "Small",
            "public": null,
            "images": null,
            "tracks": {
                "items": [
                    { "track": { "name": "A", "id": "1", "type": "track" } },
                    { "track": { "name": "B", "id": "2", "type": "track" } },
                    { "track": { "name": "C", "id": "3", "type": "track" } }
                ],
                "next": null,
                "total": 3
            }
        }))
        .into_response(),
        _ => not_found(),
    }
}

async fn tracks(
    State(state): State<MockState>,
    Path(id): Path<String>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    if id != "big" {
        return not_found();
    }
    let offset = query
        .get("offset")
        .and_then(|o| o.parse().ok())
        .unwrap_or(0);
    Json(big_tracks_page(&state.base, offset)).into_response()
}

async fn add_tracks(
    State(state): State<MockState>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    let uris: Vec<String> = body["uris"]
        .as_array()
        .map(|a| a.iter().filter_map(|u| u.as_str().map(String::from)).collect())
        .unwrap_or_default();

    if uris.len() > 100 {
        return (StatusCode::BAD_REQUEST, "too many uris").into_response();
    }

    let mut recorded = state.recorded.lock().unwrap();
    recorded.added.push((id, uris));
    let snapshot = format!("snapshot-{}", recorded.added.len());
    (StatusCode::CREATED, Json(json!({ "snapshot_id": snapshot }))).into_response()
}

async fn create_playlist(
    State(state): State<MockState>,
    Path(user): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    let mut recorded = state.recorded.lock().unwrap();
    recorded.created.push((user, body.clone()));
    let id = format!("new-{}", recorded.created.len());
    (
        StatusCode::CREATED,
        Json(json!({ "id": id, "name": body["name"], "public": body["public"] })),
    )
        .into_response()
}

async fn flaky(State(state): State<MockState>) -> Response {
    let hits = {
        let mut recorded = state.recorded.lock().unwrap();
        recorded.flaky_hits += 1;
        recorded.flaky_hits
    };
    if hits == 1 {
        return (
            StatusCode::TOO_MANY_REQUESTS,
            [("retry-after", "0")],
            "slow down",
        )
            .into_response();
    }
    Json(json!({ "id": "flaky-user" })).into_response()
}

async fn throttled() -> Response {
    (
        StatusCode::TOO_MANY_REQUESTS,
        [("retry-after", "500")],
        "slow down",
    )
        .into_response()
}
