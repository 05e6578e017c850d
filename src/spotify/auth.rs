use std::{sync::Arc, time::Duration};

use chrono::Utc;
use reqwest::{Client, RequestBuilder, Url};
use tokio::sync::Mutex;

use crate::{
    config::Config,
    server::start_callback_server,
    types::{PkceToken, Token, TokenResponse},
    utils, warning,
};

use super::{SpotifyError, send};

const CALLBACK_TIMEOUT: Duration = Duration::from_secs(120);

/// Builds the URL of Spotify's consent page for the authorization-code flow
/// with PKCE.
///
/// # Arguments
///
/// * `config` - Supplies the client id, redirect URI, scope and authorize URL
/// * `code_challenge` - S256 challenge derived from the code verifier with
///   [`utils::generate_code_challenge`]
/// * `state` - Random value echoed back on the callback; it must be compared
///   against the value stored before redirecting
///
/// # Errors
///
/// [`SpotifyError::Auth`] if the configured authorize URL cannot be parsed.
///
/// # Example
///
/// ```
/// let verifier = utils::generate_code_verifier();
/// let challenge = utils::generate_code_challenge(&verifier);
/// let state = utils::generate_state();
/// let url = authorize_url(&config, &challenge, &state)?;
/// ```
pub fn authorize_url(
    config: &Config,
    code_challenge: &str,
    state: &str,
) -> Result<String, SpotifyError> {
    let url = Url::parse_with_params(
        &config.auth_url,
        &[
            ("client_id", config.client_id.as_str()),
            ("response_type", "code"),
            ("redirect_uri", config.redirect_uri.as_str()),
            ("code_challenge_method", "S256"),
            ("code_challenge", code_challenge),
            ("scope", config.scope.as_str()),
            ("state", state),
        ],
    )
    .map_err(|e| SpotifyError::Auth(format!("invalid authorization URL: {e}")))?;

    Ok(url.into())
}

/// Exchanges an authorization code for an access token.
///
/// # Arguments
///
/// * `config` - Supplies the token URL, client id and redirect URI, plus the
///   client secret if one is configured (sent as HTTP basic auth)
/// * `code` - The `code` query parameter of the callback
/// * `verifier` - PKCE code verifier whose challenge was part of the
///   authorization request
///
/// # Returns
///
/// A [`Token`] stamped with the current time, ready for a [`TokenManager`].
///
/// # Errors
///
/// - [`SpotifyError::Status`] when Spotify rejects the code (`invalid_grant`)
/// - [`SpotifyError::Auth`] when the response carries no refresh token
/// - [`SpotifyError::Http`] on transport or decoding failures
///
/// [`TokenManager`]: crate::management::TokenManager
pub async fn exchange_code(
    config: &Config,
    code: &str,
    verifier: &str,
) -> Result<Token, SpotifyError> {
    let client = Client::new();
    let request = client.post(&config.token_url).form(&[
        ("grant_type", "authorization_code"),
        ("client_id", config.client_id.as_str()),
        ("code", code),
        ("code_verifier", verifier),
        ("redirect_uri", config.redirect_uri.as_str()),
    ]);

    let response = send(with_client_secret(config, request)).await?;
    let body = response.json::<TokenResponse>().await?;

    let refresh_token = body
        .refresh_token
        .clone()
        .ok_or_else(|| SpotifyError::Auth("token response carries no refresh token".into()))?;
    Ok(into_token(body, refresh_token))
}

/// Refreshes an expired access token.
///
/// Spotify may or may not rotate the refresh token; when the response carries
/// none, the previous one stays valid and is kept.
pub async fn refresh_token(config: &Config, refresh_token: &str) -> Result<Token, SpotifyError> {
    let client = Client::new();
    let request = client.post(&config.token_url).form(&[
        ("grant_type", "refresh_token"),
        ("refresh_token", refresh_token),
        ("client_id", config.client_id.as_str()),
    ]);

    let response = send(with_client_secret(config, request)).await?;
    let body = response.json::<TokenResponse>().await?;
    let refresh = body
        .refresh_token
        .clone()
        .unwrap_or_else(|| refresh_token.to_string());
    Ok(into_token(body, refresh))
}

fn with_client_secret(config: &Config, request: RequestBuilder) -> RequestBuilder {
    match &config.client_secret {
        Some(secret) => request.basic_auth(&config.client_id, Some(secret)),
        None => request,
    }
}

fn into_token(body: TokenResponse, refresh_token: String) -> Token {
    Token {
        access_token: body.access_token,
        refresh_token,
        scope: body.scope.unwrap_or_default(),
        expires_in: body.expires_in,
        obtained_at: Utc::now().timestamp() as u64,
    }
}

/// Runs the complete authorization flow from the command line.
///
/// # Authentication Flow
///
/// 1. **PKCE Setup**: Generates the code verifier, its challenge and a `state`
///    value, and stores verifier and state in `shared_state`
/// 2. **Server Start**: Starts a temporary callback server on the configured
///    address
/// 3. **Browser Launch**: Opens the consent page in the default browser, or
///    prints the URL if no browser can be opened
/// 4. **Callback Handling**: The callback handler checks `state`, exchanges the
///    code and leaves the token in `shared_state`
///
/// # Arguments
///
/// * `config` - Shared with the callback server
/// * `shared_state` - PKCE data and, once the callback ran, the token
///
/// # Returns
///
/// `Some(token)` on success, `None` when the user does not finish within two
/// minutes. The callback server is stopped either way.
///
/// # Example
///
/// ```
/// let shared_state = Arc::new(Mutex::new(None));
/// if let Some(token) = authorize_interactive(config, shared_state).await? {
///     TokenManager::new(token).persist().await?;
/// }
/// ```
pub async fn authorize_interactive(
    config: Arc<Config>,
    shared_state: Arc<Mutex<Option<PkceToken>>>,
) -> Result<Option<Token>, SpotifyError> {
    let code_verifier = utils::generate_code_verifier();
    let code_challenge = utils::generate_code_challenge(&code_verifier);
    let state = utils::generate_state();

    let auth_url = authorize_url(&config, &code_challenge, &state)?;

    // store verifier before anyone can hit the callback
    {
        let mut lock = shared_state.lock().await;
        *lock = Some(PkceToken {
            code_verifier,
            state,
            token: None,
        });
    }

    let server_config = Arc::clone(&config);
    let server_state = Arc::clone(&shared_state);
    let server = tokio::spawn(async move {
        if let Err(e) = start_callback_server(server_config, server_state).await {
            warning!("Callback server stopped: {}", e);
        }
    });

    if webbrowser::open(&auth_url).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            auth_url
        )
    }

    let token = wait_for_token(shared_state, CALLBACK_TIMEOUT).await;
    server.abort();
    Ok(token)
}

/// Polls the shared state until the callback handler has stored a token or
/// `max_wait` has elapsed.
pub async fn wait_for_token(
    shared_state: Arc<Mutex<Option<PkceToken>>>,
    max_wait: Duration,
) -> Option<Token> {
    use std::time::Instant;

    let start = Instant::now();

    while start.elapsed() < max_wait {
        let lock = shared_state.lock().await;
        if let Some(token) = lock.as_ref().and_then(|pkce| pkce.token.as_ref()) {
            return Some(token.clone());
        }
        drop(lock);
        tokio::time::sleep(Duration::from_millis(500)).await;
    }

    None
}
