use axum::{
    Form,
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use crate::{management::WorkflowCache, spotify, utils};

use super::{AppError, AppState, authenticate, views};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaylistAction {
    Shuffle,
    Save,
}

#[derive(Debug, Deserialize)]
pub struct PlaylistForm {
    pub action: PlaylistAction,
    #[serde(default)]
    pub name: String,
}

/// Playlist ids are plain base-62 strings. Anything else never reaches the
/// Web API, where it would end up inside the request path.
fn checked_id(raw: &str) -> Result<String, AppError> {
    utils::parse_playlist_id(raw)
        .filter(|id| id == raw)
        .ok_or_else(|| AppError::NotFound(format!("'{raw}' is not a playlist id.")))
}

/// Shows a playlist next to a freshly drawn shuffle of it.
///
/// The playlist is fetched once per workflow: as long as the session's cache
/// belongs to `playlist_id`, only a new permutation is drawn.
pub async fn view_playlist(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(playlist_id): Path<String>,
) -> Result<Html<String>, AppError> {
    let playlist_id = checked_id(&playlist_id)?;
    let auth = authenticate(&state, &jar).await?;

    let workflow = match auth.session.workflow {
        Some(mut cached) if cached.matches(&playlist_id) => {
            cached.reshuffle();
            cached
        }
        _ => {
            let playlist =
                spotify::playlist::fetch(&state.config, &auth.token, &playlist_id).await?;
            WorkflowCache::new(playlist)
        }
    };

    let page = views::playlist_page(&workflow, None, "");
    state
        .sessions
        .update(&auth.session_id, |s| s.workflow = Some(workflow))
        .await;

    Ok(Html(page))
}

/// Handles the two buttons of the playlist page.
///
/// `shuffle` goes back to [`view_playlist`], which draws a new permutation.
/// `save` writes the permutation the user is looking at to a new playlist.
pub async fn submit_playlist(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(playlist_id): Path<String>,
    Form(form): Form<PlaylistForm>,
) -> Result<Response, AppError> {
    let playlist_id = checked_id(&playlist_id)?;
    let view_url = format!("/playlist/{playlist_id}");
    if form.action == PlaylistAction::Shuffle {
        return Ok(Redirect::to(&view_url).into_response());
    }

    let auth = authenticate(&state, &jar).await?;
    let Some(workflow) = auth.session.workflow.filter(|w| w.matches(&playlist_id)) else {
        // nothing shown for this playlist yet
        return Ok(Redirect::to(&view_url).into_response());
    };

    let mut existing = auth.session.playlist_names;
    if existing.is_empty() {
        existing = spotify::playlist::list(&state.config, &auth.token)
            .await?
            .into_iter()
            .map(|p| p.name)
            .collect();
    }

    let name = match utils::validate_playlist_name(&form.name, &existing) {
        Ok(name) => name,
        Err(message) => {
            return Ok(Html(views::playlist_page(&workflow, Some(message), &form.name)).into_response());
        }
    };

    let user_id = match auth.session.user_id {
        Some(id) => id,
        None => spotify::user::current_user(&state.config, &auth.token).await?.id,
    };

    let saved = workflow
        .save_copy(&state.config, &auth.token, &user_id, &name)
        .await?;

    let mut flash = format!("Playlist '{}' saved.", saved.playlist.name);
    if saved.skipped > 0 {
        flash.push_str(&format!(
            " {} unavailable tracks were left out.",
            saved.skipped
        ));
    }

    existing.push(name);
    state
        .sessions
        .update(&auth.session_id, |s| {
            s.playlist_names = existing;
            s.flash = Some(flash);
        })
        .await;

    Ok(Redirect::to("/playlists").into_response())
}
