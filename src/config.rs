//! Configuration management for plshuffle.
//!
//! Configuration comes from environment variables, optionally seeded from a
//! `.env` file. The lookup order is:
//! 1. Environment variables (highest priority)
//! 2. `.env` in the local data directory (`<data_local_dir>/plshuffle/.env`)
//! 3. `.env` in the current working directory
//! 4. Application defaults (where applicable)
//!
//! Values are read once into a [`Config`] which is then passed explicitly to
//! everything that talks to Spotify.

use std::{env, net::SocketAddr, path::PathBuf};

use thiserror::Error;

pub const DEFAULT_SCOPE: &str = "playlist-modify-public playlist-modify-private playlist-read-collaborative playlist-read-private";
pub const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:8080";
pub const DEFAULT_REDIRECT_URI: &str = "http://127.0.0.1:8080/callback";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{var} is invalid: {reason}")]
    Invalid { var: &'static str, reason: String },
}

/// Runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Client ID from the Spotify developer dashboard.
    pub client_id: String,
    /// Only needed for apps registered as confidential clients. When present it
    /// is sent as HTTP basic auth on every token request.
    pub client_secret: Option<String>,
    /// Must match a redirect URI registered for the app.
    pub redirect_uri: String,
    pub scope: String,
    pub auth_url: String,
    pub token_url: String,
    /// Base URL of the Web API, without trailing slash.
    pub api_url: String,
    pub server_address: SocketAddr,
}

impl Config {
    /// Builds the configuration from the process environment.
    ///
    /// Call [`load_env`] first so values from `.env` files are visible.
    ///
    /// # Variables
    ///
    /// | variable | default |
    /// |---|---|
    /// | `SPOTIFY_API_AUTH_CLIENT_ID` | required |
    /// | `SPOTIFY_API_AUTH_CLIENT_SECRET` | none |
    /// | `SPOTIFY_API_REDIRECT_URI` | [`DEFAULT_REDIRECT_URI`] |
    /// | `SPOTIFY_API_AUTH_SCOPE` | [`DEFAULT_SCOPE`] |
    /// | `SPOTIFY_API_AUTH_URL` | [`DEFAULT_AUTH_URL`] |
    /// | `SPOTIFY_API_TOKEN_URL` | [`DEFAULT_TOKEN_URL`] |
    /// | `SPOTIFY_API_URL` | [`DEFAULT_API_URL`] |
    /// | `SERVER_ADDRESS` | [`DEFAULT_SERVER_ADDRESS`] |
    ///
    /// # Errors
    ///
    /// - [`ConfigError::Missing`] if `SPOTIFY_API_AUTH_CLIENT_ID` is not set
    /// - [`ConfigError::Invalid`] if `SERVER_ADDRESS` is not a socket address
    ///
    /// # Example
    ///
    /// ```
    /// use plshuffle::config::{self, Config};
    ///
    /// #[tokio::main]
    /// async fn main() {
    ///     let _ = config::load_env().await;
    ///     match Config::from_env() {
    ///         Ok(config) => println!("serving on {}", config.server_url()),
    ///         Err(e) => eprintln!("Invalid configuration: {}", e),
    ///     }
    /// }
    /// ```
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// Values are trimmed, and empty values are treated like unset ones. A
    /// trailing `/` on `SPOTIFY_API_URL` is dropped.
    ///
    /// # Arguments
    ///
    /// * `lookup` - Returns the raw value of a variable, or `None` if unset
    ///
    /// # Errors
    ///
    /// Same as [`Config::from_env`].
    ///
    /// # Example
    ///
    /// ```
    /// use plshuffle::config::Config;
    ///
    /// let config = Config::from_lookup(|key| match key {
    ///     "SPOTIFY_API_AUTH_CLIENT_ID" => Some("my-client-id".to_string()),
    ///     _ => None,
    /// })
    /// .unwrap();
    /// assert_eq!(config.api_endpoint("me"), "https://api.spotify.com/v1/me");
    /// ```
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let client_id =
            get("SPOTIFY_API_AUTH_CLIENT_ID").ok_or(ConfigError::Missing("SPOTIFY_API_AUTH_CLIENT_ID"))?;

        let server_address = get("SERVER_ADDRESS")
            .unwrap_or_else(|| DEFAULT_SERVER_ADDRESS.to_string())
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::Invalid {
                var: "SERVER_ADDRESS",
                reason: e.to_string(),
            })?;

        Ok(Self {
            client_id,
            client_secret: get("SPOTIFY_API_AUTH_CLIENT_SECRET"),
            redirect_uri: get("SPOTIFY_API_REDIRECT_URI")
                .unwrap_or_else(|| DEFAULT_REDIRECT_URI.to_string()),
            scope: get("SPOTIFY_API_AUTH_SCOPE").unwrap_or_else(|| DEFAULT_SCOPE.to_string()),
            auth_url: get("SPOTIFY_API_AUTH_URL").unwrap_or_else(|| DEFAULT_AUTH_URL.to_string()),
            token_url: get("SPOTIFY_API_TOKEN_URL")
                .unwrap_or_else(|| DEFAULT_TOKEN_URL.to_string()),
            api_url: get("SPOTIFY_API_URL")
                .unwrap_or_else(|| DEFAULT_API_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            server_address,
        })
    }

    /// Joins `path` onto the Web API base URL.
    pub fn api_endpoint(&self, path: &str) -> String {
        format!(
            "{base}/{path}",
            base = self.api_url,
            path = path.trim_start_matches('/')
        )
    }

    /// URL the local web app is reachable at.
    pub fn server_url(&self) -> String {
        format!("http://{}", self.server_address)
    }
}

/// Directory holding the `.env` file and the token cache.
///
/// # Directory Structure
///
/// - Linux: `~/.local/share/plshuffle/`
/// - macOS: `~/Library/Application Support/plshuffle/`
/// - Windows: `%LOCALAPPDATA%/plshuffle/`
///
/// Falls back to `./plshuffle` when the platform has no local data directory.
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("plshuffle");
    path
}

/// Loads environment variables from `.env` files.
///
/// Creates the local data directory if needed, then loads
/// `<data_local_dir>/plshuffle/.env` and finally a `.env` in the working
/// directory. Neither file is required, and variables already present in the
/// environment are never overwritten.
///
/// # Returns
///
/// `Ok(())` when both files were loaded or are absent.
///
/// # Errors
///
/// Returns an error string if the data directory cannot be created or an
/// existing `.env` file cannot be parsed.
///
/// # Example
///
/// ```
/// use plshuffle::config;
///
/// #[tokio::main]
/// async fn main() {
///     if let Err(e) = config::load_env().await {
///         eprintln!("Cannot load environment: {}", e);
///     }
/// }
/// ```
pub async fn load_env() -> Result<(), String> {
    let dir = data_dir();
    async_fs::create_dir_all(&dir)
        .await
        .map_err(|e| e.to_string())?;

    let path = dir.join(".env");
    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| format!("{}: {}", path.display(), e))?;
    }

    match dotenv::dotenv() {
        Ok(_) => Ok(()),
        Err(e) if e.not_found() => Ok(()),
        Err(e) => Err(e.to_string()),
    }
}
