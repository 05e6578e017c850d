use tabled::Table;

use crate::{config::Config, error, spotify, types::PlaylistTableRow, warning};

use super::{auth::access_token, spinner};

pub async fn list_playlists(config: &Config, search: Option<String>) {
    let token = access_token(config).await;

    let pb = spinner("Fetching playlists...");
    let mut playlists = match spotify::playlist::list(config, &token).await {
        Ok(playlists) => playlists,
        Err(e) => {
            pb.finish_and_clear();
            error!("Failed to fetch playlists: {}", e);
        }
    };
    pb.finish_and_clear();

    if let Some(search) = search {
        let term = search.to_lowercase();
        playlists.retain(|p| p.name.to_lowercase().contains(&term));
    }

    if playlists.is_empty() {
        warning!("No playlists found.");
        return;
    }

    let rows: Vec<PlaylistTableRow> = playlists
        .into_iter()
        .map(|p| PlaylistTableRow {
            tracks: p.track_count(),
            visibility: match p.public {
                Some(true) => "public".to_string(),
                Some(false) => "private".to_string(),
                None => "-".to_string(),
            },
            id: p.id,
            name: p.name,
        })
        .collect();

    println!("{}", Table::new(rows));
}
