use axum::{
    extract::{Query, State},
    response::Redirect,
};
use axum_extra::extract::cookie::CookieJar;

use crate::{
    management::{PendingLogin, TokenManager},
    spotify, utils,
};

use super::{AppError, AppState, CallbackParams, resolve_session, session_id};

/// Sends signed-in browsers to their playlists and everyone else to
/// Spotify's consent page.
pub async fn index(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, Redirect), AppError> {
    let (jar, id) = resolve_session(&state, jar).await;

    let signed_in = state
        .sessions
        .get(&id)
        .await
        .is_some_and(|s| s.is_authenticated());
    if signed_in {
        return Ok((jar, Redirect::to("/playlists")));
    }

    let code_verifier = utils::generate_code_verifier();
    let code_challenge = utils::generate_code_challenge(&code_verifier);
    let login_state = utils::generate_state();
    let auth_url = spotify::auth::authorize_url(&state.config, &code_challenge, &login_state)?;

    state
        .sessions
        .update(&id, |s| {
            s.login = Some(PendingLogin {
                code_verifier,
                state: login_state,
            })
        })
        .await;

    log::debug!("session {} redirected to authorization", &id[..6]);
    Ok((jar, Redirect::to(&auth_url)))
}

/// Finishes the login started by [`index`].
pub async fn callback(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(params): Query<CallbackParams>,
) -> Result<Redirect, AppError> {
    let id = session_id(&jar).ok_or_else(|| AppError::Login("No login in progress.".into()))?;
    let login = state
        .sessions
        .update(&id, |s| s.login.take())
        .await
        .flatten()
        .ok_or_else(|| AppError::Login("No login in progress.".into()))?;

    if let Some(error) = params.error {
        return Err(AppError::Login(format!("Spotify reported: {error}")));
    }
    if params.state.as_deref() != Some(login.state.as_str()) {
        return Err(AppError::Login("State mismatch.".into()));
    }
    let code = params
        .code
        .ok_or_else(|| AppError::Login("Missing authorization code.".into()))?;

    let token = spotify::auth::exchange_code(&state.config, &code, &login.code_verifier)
        .await
        .map_err(|e| AppError::Login(format!("Spotify rejected the authorization code: {e}")))?;
    let user = spotify::user::current_user(&state.config, &token.access_token).await?;
    log::info!("user {} signed in", user.id);

    let manager = TokenManager::new(token);
    state
        .sessions
        .update(&id, |s| {
            s.token = Some(manager);
            s.user_id = Some(user.id);
        })
        .await;

    Ok(Redirect::to("/playlists"))
}

pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> Redirect {
    if let Some(id) = session_id(&jar) {
        state.sessions.remove(&id).await;
    }
    Redirect::to("/")
}
