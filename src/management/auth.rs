use std::path::PathBuf;

use chrono::Utc;

use crate::{
    config::{self, Config},
    spotify::{self, SpotifyError},
    types::Token,
};

/// Seconds before the real expiry at which a token is already treated as
/// expired.
const EXPIRY_MARGIN_SECS: u64 = 240;

/// Holds one user's credentials and refreshes them on demand.
///
/// The web app keeps a `TokenManager` per session; the CLI loads one from the
/// token cache. Either way it is handed to API calls explicitly.
#[derive(Debug, Clone)]
pub struct TokenManager {
    token: Token,
}

impl TokenManager {
    pub fn new(token: Token) -> Self {
        TokenManager { token }
    }

    pub async fn load() -> Result<Self, String> {
        let path = Self::token_path();
        let content = async_fs::read_to_string(&path)
            .await
            .map_err(|e| e.to_string())?;
        let token: Token = serde_json::from_str(&content).map_err(|e| e.to_string())?;
        Ok(Self { token })
    }

    pub async fn persist(&self) -> Result<(), String> {
        let path = Self::token_path();
        if let Some(parent) = path.parent() {
            async_fs::create_dir_all(parent)
                .await
                .map_err(|e| e.to_string())?;
        }

        let json = serde_json::to_string_pretty(&self.token).map_err(|e| e.to_string())?;
        async_fs::write(&path, json)
            .await
            .map_err(|e| e.to_string())
    }

    /// Returns an access token that is valid for at least a few more minutes,
    /// refreshing it first if necessary.
    ///
    /// The boolean reports whether a refresh happened, so callers that cache
    /// the manager know to store it again.
    pub async fn get_valid_token(&mut self, config: &Config) -> Result<(String, bool), SpotifyError> {
        let mut refreshed = false;
        if self.is_expired() {
            log::debug!("access token expired, refreshing");
            self.token = spotify::auth::refresh_token(config, &self.token.refresh_token).await?;
            refreshed = true;
        }

        Ok((self.token.access_token.clone(), refreshed))
    }

    pub fn is_expired(&self) -> bool {
        let now = Utc::now().timestamp() as u64;
        now + EXPIRY_MARGIN_SECS >= self.token.obtained_at + self.token.expires_in
    }

    pub fn current_token(&self) -> &Token {
        &self.token
    }

    fn token_path() -> PathBuf {
        let mut path = config::data_dir();
        path.push("cache/token.json");
        path
    }
}
