use reqwest::Client;

use crate::{
    config::Config,
    types::{
        AddTrackToPlaylistRequest, AddTrackToPlaylistResponse, CreatePlaylistRequest,
        CreatePlaylistResponse, FullPlaylist, Page, Playlist, PlaylistItem, PlaylistSummary,
    },
};

use super::{SpotifyError, get_api, get_json, send};

const PLAYLISTS_PAGE_LIMIT: u32 = 50;

/// Retrieves every playlist the current user owns or follows.
///
/// Follows the `next` link of each page until the listing is exhausted, so the
/// result is complete regardless of how many playlists the user has.
pub async fn list(config: &Config, token: &str) -> Result<Vec<PlaylistSummary>, SpotifyError> {
    let mut page: Page<PlaylistSummary> = get_api(
        config,
        &format!("me/playlists?limit={PLAYLISTS_PAGE_LIMIT}"),
        token,
    )
    .await?;

    let mut playlists = Vec::with_capacity(page.total.unwrap_or(0) as usize);
    loop {
        playlists.append(&mut page.items);
        match page.next.take() {
            Some(next) => page = get_json(&next, token).await?,
            None => break,
        }
    }

    log::info!("fetched {} playlists", playlists.len());
    Ok(playlists)
}

/// Fetches a playlist together with all of its tracks.
///
/// The first page of tracks arrives embedded in the playlist object; the rest
/// are requested one `next` link at a time and appended in order. Items whose
/// track object is null are skipped. Tracks with a null id are kept so they
/// can still be shown; they are filtered out before writing.
pub async fn fetch(
    config: &Config,
    token: &str,
    playlist_id: &str,
) -> Result<Playlist, SpotifyError> {
    let full: FullPlaylist = get_api(config, &format!("playlists/{playlist_id}"), token).await?;

    let mut page: Page<PlaylistItem> = full.tracks;
    let mut tracks = Vec::with_capacity(page.total.unwrap_or(0) as usize);
    loop {
        tracks.extend(page.items.drain(..).filter_map(|item| item.track));
        match page.next.take() {
            Some(next) => page = get_json(&next, token).await?,
            None => break,
        }
    }

    log::info!(
        "fetched playlist {} ({}) with {} tracks",
        full.name,
        full.id,
        tracks.len()
    );

    Ok(Playlist {
        id: full.id,
        name: full.name,
        public: full.public.unwrap_or(false),
        images: full.images.unwrap_or_default(),
        tracks,
    })
}

/// Creates an empty playlist for `user_id`.
pub async fn create(
    config: &Config,
    token: &str,
    user_id: &str,
    name: &str,
    description: &str,
    public: bool,
) -> Result<CreatePlaylistResponse, SpotifyError> {
    let client = Client::new();
    let body = CreatePlaylistRequest {
        name: name.to_string(),
        description: description.to_string(),
        public,
    };

    let response = send(
        client
            .post(config.api_endpoint(&format!("users/{user_id}/playlists")))
            .bearer_auth(token)
            .json(&body),
    )
    .await?;

    let created = response.json::<CreatePlaylistResponse>().await?;
    log::info!("created playlist {} ({})", created.name, created.id);
    Ok(created)
}

/// Appends one batch of item URIs to a playlist.
///
/// The endpoint accepts at most 100 URIs per call; batching is the caller's
/// job (see [`crate::shuffle::batches`]).
pub async fn add_tracks(
    config: &Config,
    token: &str,
    playlist_id: &str,
    uris: Vec<String>,
) -> Result<AddTrackToPlaylistResponse, SpotifyError> {
    let client = Client::new();
    let count = uris.len();
    let response = send(
        client
            .post(config.api_endpoint(&format!("playlists/{playlist_id}/tracks")))
            .bearer_auth(token)
            .json(&AddTrackToPlaylistRequest { uris }),
    )
    .await?;

    log::debug!("added {} items to playlist {}", count, playlist_id);
    Ok(response.json::<AddTrackToPlaylistResponse>().await?)
}

