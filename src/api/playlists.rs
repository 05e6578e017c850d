use axum::{extract::State, response::Html};
use axum_extra::extract::cookie::CookieJar;

use crate::spotify;

use super::{AppError, AppState, authenticate, views};

/// Lists the user's playlists and remembers their names for the
/// name-collision check on save.
pub async fn playlists(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<Html<String>, AppError> {
    let auth = authenticate(&state, &jar).await?;
    let playlists = spotify::playlist::list(&state.config, &auth.token).await?;

    let names: Vec<String> = playlists.iter().map(|p| p.name.clone()).collect();
    let flash = state
        .sessions
        .update(&auth.session_id, |s| {
            s.playlist_names = names;
            s.take_flash()
        })
        .await
        .flatten();

    Ok(Html(views::playlists_page(&playlists, flash.as_deref())))
}
