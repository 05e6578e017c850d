//! # API Module
//!
//! HTTP handlers of the web app and of the temporary callback server used by
//! `plshuffle auth`.
//!
//! ## Endpoints
//!
//! ### Authentication
//!
//! - [`index`] - `GET /`: starts the authorization-code + PKCE flow, or sends
//!   an already signed-in browser to its playlists
//! - [`callback`] - `GET /callback`: verifies `state` and exchanges the code
//! - [`logout`] - `GET /logout`: forgets the session
//! - [`cli_callback`] - `GET /callback` on the CLI's temporary server
//!
//! ### Shuffling
//!
//! - [`playlists`] - `GET /playlists`: the user's playlists
//! - [`view_playlist`] - `GET /playlist/{id}`: original and shuffled order
//! - [`submit_playlist`] - `POST /playlist/{id}`: reshuffle, or save the
//!   shuffled order as a new playlist
//!
//! ### Monitoring
//!
//! - [`health`] - `GET /health`
//!
//! ## Sessions
//!
//! A random id in the [`SESSION_COOKIE`] cookie points into the
//! [`SessionStore`]. Handlers copy what they need out of the store and never
//! keep it locked while Spotify is being called.

mod auth;
mod callback;
mod error;
mod health;
mod playlist;
mod playlists;
pub mod views;

use std::sync::Arc;

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;

use crate::{
    config::Config,
    management::{Session, SessionStore},
};

pub use auth::{callback, index, logout};
pub use callback::{CallbackState, cli_callback};
pub use error::AppError;
pub use health::health;
pub use playlist::{PlaylistAction, PlaylistForm, submit_playlist, view_playlist};
pub use playlists::playlists;

pub const SESSION_COOKIE: &str = "plshuffle_session";

/// State shared by all web handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub sessions: SessionStore,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
            sessions: SessionStore::new(),
        }
    }
}

/// Query string Spotify appends to the redirect URI.
#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}

/// A signed-in request: the session id, a copy of the session, and an access
/// token that is valid right now.
pub(crate) struct Authenticated {
    pub session_id: String,
    pub session: Session,
    pub token: String,
}

pub(crate) fn session_id(jar: &CookieJar) -> Option<String> {
    jar.get(SESSION_COOKIE).map(|c| c.value().to_string())
}

/// Returns the id of the browser's session, creating one (and the cookie)
/// when the browser has none or an unknown one.
pub(crate) async fn resolve_session(state: &AppState, jar: CookieJar) -> (CookieJar, String) {
    if let Some(id) = session_id(&jar) {
        if state.sessions.contains(&id).await {
            return (jar, id);
        }
    }

    let id = state.sessions.create().await;
    let cookie = Cookie::build((SESSION_COOKIE, id.clone()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax);
    (jar.add(cookie), id)
}

/// Loads the signed-in session and makes sure its token is fresh.
///
/// A refresh that fails signs the session out, so the next request starts a
/// new login instead of failing again.
pub(crate) async fn authenticate(
    state: &AppState,
    jar: &CookieJar,
) -> Result<Authenticated, AppError> {
    let session_id = session_id(jar).ok_or(AppError::Unauthenticated)?;
    let mut session = state
        .sessions
        .get(&session_id)
        .await
        .ok_or(AppError::Unauthenticated)?;
    let mut manager = session.token.clone().ok_or(AppError::Unauthenticated)?;

    match manager.get_valid_token(&state.config).await {
        Ok((token, refreshed)) => {
            if refreshed {
                session.token = Some(manager.clone());
                state
                    .sessions
                    .update(&session_id, |s| s.token = Some(manager))
                    .await;
            }
            Ok(Authenticated {
                session_id,
                session,
                token,
            })
        }
        Err(e) => {
            log::warn!("token refresh failed, signing session out: {}", e);
            state.sessions.update(&session_id, |s| s.token = None).await;
            Err(AppError::Unauthenticated)
        }
    }
}
