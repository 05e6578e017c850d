//! # Spotify Integration Module
//!
//! Thin client for the handful of Web API endpoints plshuffle needs. Every
//! function takes the [`Config`] and a bearer token explicitly; nothing here
//! keeps credentials around between calls.
//!
//! ```text
//! Application Layer (web handlers, CLI)
//!          ↓
//! Spotify Integration Layer
//!     ├── Authentication (authorization code + PKCE, refresh)
//!     ├── User (current profile)
//!     └── Playlists (list, fetch with pagination, create, add items)
//!          ↓
//! HTTP Layer (reqwest, JSON)
//! ```
//!
//! ## Error handling
//!
//! Failures are surfaced as [`SpotifyError`] and passed upward unchanged. The
//! only retries happen in [`send`]: `429 Too Many Requests` waits for the
//! `Retry-After` delay (up to 120 seconds) and `502 Bad Gateway` waits ten
//! seconds, each a bounded number of times.
//!
//! ## API Coverage
//!
//! - `GET /me`
//! - `GET /me/playlists`
//! - `GET /playlists/{playlist_id}` and its `next` track pages
//! - `POST /users/{user_id}/playlists`
//! - `POST /playlists/{playlist_id}/tracks`
//! - `POST /api/token`

pub mod auth;
pub mod playlist;
pub mod user;

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tokio::time::sleep;

use crate::config::Config;

const MAX_ATTEMPTS: u32 = 3;
const MAX_RETRY_AFTER_SECS: u64 = 120;
const BAD_GATEWAY_DELAY: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum SpotifyError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Spotify answered {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("rate limited for {0} seconds")]
    RateLimited(u64),
    #[error("request body cannot be replayed")]
    NotReplayable,
    #[error("authorization failed: {0}")]
    Auth(String),
}

impl SpotifyError {
    /// Whether the failure means the token is no longer accepted.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, SpotifyError::Status { status, .. } if *status == StatusCode::UNAUTHORIZED)
    }
}

/// Sends `request`, retrying on rate limits and bad gateways.
///
/// Any other non-success status becomes [`SpotifyError::Status`] with the
/// response body attached.
pub async fn send(request: RequestBuilder) -> Result<Response, SpotifyError> {
    let mut attempt = 0;

    loop {
        attempt += 1;
        let response = request
            .try_clone()
            .ok_or(SpotifyError::NotReplayable)?
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        if attempt < MAX_ATTEMPTS {
            if status == StatusCode::TOO_MANY_REQUESTS {
                let retry_after = response
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse::<u64>().ok())
                    .unwrap_or(1);
                if retry_after > MAX_RETRY_AFTER_SECS {
                    log::warn!(
                        "retry-after of {}s exceeds {}s, giving up",
                        retry_after,
                        MAX_RETRY_AFTER_SECS
                    );
                    return Err(SpotifyError::RateLimited(retry_after));
                }
                log::debug!("rate limited, retrying in {}s", retry_after);
                sleep(Duration::from_secs(retry_after)).await;
                continue;
            }

            if status == StatusCode::BAD_GATEWAY {
                log::debug!("bad gateway, retrying in {:?}", BAD_GATEWAY_DELAY);
                sleep(BAD_GATEWAY_DELAY).await;
                continue;
            }
        }

        let body = response.text().await.unwrap_or_default();
        return Err(SpotifyError::Status { status, body });
    }
}

/// `GET` an absolute URL and decode the JSON body.
pub async fn get_json<T: DeserializeOwned>(url: &str, token: &str) -> Result<T, SpotifyError> {
    let client = Client::new();
    log::debug!("GET {}", url);
    let response = send(client.get(url).bearer_auth(token)).await?;
    Ok(response.json::<T>().await?)
}

/// `GET` a path relative to the Web API base URL.
pub async fn get_api<T: DeserializeOwned>(
    config: &Config,
    path: &str,
    token: &str,
) -> Result<T, SpotifyError> {
    get_json(&config.api_endpoint(path), token).await
}
