use tabled::Table;

use crate::{
    config::Config, error, info, management::WorkflowCache, spotify, success,
    types::ShuffledTableRow, utils, warning,
};

use super::{auth::access_token, spinner};

/// Writes a shuffled copy of `playlist` called `name`.
///
/// `playlist` may be an id, a `spotify:playlist:` URI or a share link. With
/// `dry_run` the shuffled order is printed and nothing is written.
pub async fn shuffle(config: &Config, playlist: String, name: String, dry_run: bool) {
    let Some(playlist_id) = utils::parse_playlist_id(&playlist) else {
        error!("'{}' is not a playlist id, URI or link", playlist);
    };

    let token = access_token(config).await;

    let pb = spinner("Fetching playlist...");
    let source = match spotify::playlist::fetch(config, &token, &playlist_id).await {
        Ok(source) => source,
        Err(e) => {
            pb.finish_and_clear();
            error!("Failed to fetch playlist {}: {}", playlist_id, e);
        }
    };
    pb.finish_and_clear();
    success!("Fetched {} tracks from {}", source.tracks.len(), source.name);

    let workflow = WorkflowCache::new(source);

    if dry_run {
        let shuffled = match workflow.shuffled() {
            Ok(tracks) => tracks,
            Err(e) => error!("{}", e),
        };
        let rows: Vec<ShuffledTableRow> = shuffled
            .into_iter()
            .zip(workflow.permutation().as_slice())
            .enumerate()
            .map(|(position, (track, &from))| ShuffledTableRow {
                position: position + 1,
                name: track.name.clone(),
                from: from + 1,
            })
            .collect();
        println!("{}", Table::new(rows));
        return;
    }

    let existing: Vec<String> = match spotify::playlist::list(config, &token).await {
        Ok(playlists) => playlists.into_iter().map(|p| p.name).collect(),
        Err(e) => error!("Failed to fetch playlists: {}", e),
    };
    let name = match utils::validate_playlist_name(&name, &existing) {
        Ok(name) => name,
        Err(message) => error!("{}", message),
    };

    let user = match spotify::user::current_user(config, &token).await {
        Ok(user) => user,
        Err(e) => error!("Failed to fetch user profile: {}", e),
    };

    info!("Create playlist {}", name);
    let pb = spinner("Writing shuffled tracks...");
    let saved = match workflow.save_copy(config, &token, &user.id, &name).await {
        Ok(saved) => saved,
        Err(e) => {
            pb.finish_and_clear();
            error!("Failed to write playlist: {}", e);
        }
    };
    pb.finish_and_clear();

    success!(
        "Playlist '{}' saved with {} tracks in {} batches.",
        saved.playlist.name,
        saved.written,
        saved.batches
    );
    if saved.skipped > 0 {
        warning!(
            "{} tracks are unavailable and were skipped",
            saved.skipped
        );
    }
}
