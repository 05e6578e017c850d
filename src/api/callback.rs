use std::sync::Arc;

use axum::{
    extract::{Query, State},
    response::Html,
};
use tokio::sync::Mutex;

use crate::{config::Config, spotify, types::PkceToken, warning};

use super::CallbackParams;

/// State of the temporary server started by `plshuffle auth`.
#[derive(Clone)]
pub struct CallbackState {
    pub config: Arc<Config>,
    pub pkce: Arc<Mutex<Option<PkceToken>>>,
}

/// Completes a command-line login: checks `state`, exchanges the code and
/// leaves the token in the shared state for the waiting CLI.
pub async fn cli_callback(
    Query(params): Query<CallbackParams>,
    State(state): State<CallbackState>,
) -> Html<&'static str> {
    if let Some(error) = params.error {
        warning!("Spotify denied the authorization: {}", error);
        return Html("<h4>Login was cancelled.</h4>");
    }

    let Some(code) = params.code else {
        return Html("<h4>Missing authorization code.</h4>");
    };

    let (verifier, expected_state) = {
        let lock = state.pkce.lock().await;
        let Some(pkce) = lock.as_ref() else {
            return Html("<h4>Missing PKCE code verifier.</h4>");
        };
        (pkce.code_verifier.clone(), pkce.state.clone())
    };

    if params.state.as_deref() != Some(expected_state.as_str()) {
        return Html("<h4>Login failed: state mismatch.</h4>");
    }

    // lock released while talking to the token endpoint
    match spotify::auth::exchange_code(&state.config, &code, &verifier).await {
        Ok(token) => {
            if let Some(pkce) = state.pkce.lock().await.as_mut() {
                pkce.token = Some(token);
            }
            Html("<h2>Authentication successful.</h2><p>You can close this window.</p>")
        }
        Err(e) => {
            warning!("Token exchange failed: {}", e);
            Html("<h4>Login failed.</h4>")
        }
    }
}
