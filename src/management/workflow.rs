use std::sync::Arc;

use thiserror::Error;

use crate::{
    config::Config,
    shuffle::{self, MAX_BATCH_SIZE, Permutation, ShuffleError},
    spotify::{self, SpotifyError},
    types::{CreatePlaylistResponse, Playlist, Track},
    utils,
};

#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error(transparent)]
    Shuffle(#[from] ShuffleError),
    #[error(transparent)]
    Spotify(#[from] SpotifyError),
}

/// What a user is currently looking at: one fetched playlist and the
/// permutation drawn for it.
///
/// Kept between "view shuffle" and "confirm save" so the playlist is not
/// fetched again. The cache belongs to exactly one playlist id; selecting a
/// different playlist replaces it.
#[derive(Debug, Clone)]
pub struct WorkflowCache {
    playlist: Arc<Playlist>,
    permutation: Permutation,
}

/// Result of writing a shuffled copy.
#[derive(Debug, Clone)]
pub struct SavedCopy {
    pub playlist: CreatePlaylistResponse,
    pub written: usize,
    pub skipped: usize,
    pub batches: usize,
}

impl WorkflowCache {
    /// Caches `playlist` and draws its first permutation.
    pub fn new(playlist: Playlist) -> Self {
        let permutation = Permutation::random(playlist.tracks.len());
        Self {
            playlist: Arc::new(playlist),
            permutation,
        }
    }

    /// Caches `playlist` with a permutation drawn elsewhere.
    pub fn with_permutation(playlist: Playlist, permutation: Permutation) -> Result<Self, ShuffleError> {
        if permutation.len() != playlist.tracks.len() {
            return Err(ShuffleError::InvalidArgument(format!(
                "permutation covers {} positions but the playlist has {} tracks",
                permutation.len(),
                playlist.tracks.len()
            )));
        }

        Ok(Self {
            playlist: Arc::new(playlist),
            permutation,
        })
    }

    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    pub fn permutation(&self) -> &Permutation {
        &self.permutation
    }

    /// Whether this cache can serve a request for `playlist_id`.
    pub fn matches(&self, playlist_id: &str) -> bool {
        self.playlist.id == playlist_id
    }

    /// Discards the current permutation and draws a new, independent one.
    pub fn reshuffle(&mut self) {
        self.permutation = Permutation::random(self.playlist.tracks.len());
    }

    /// Tracks in shuffled order.
    pub fn shuffled(&self) -> Result<Vec<&Track>, ShuffleError> {
        self.permutation.apply(&self.playlist.tracks)
    }

    /// URIs to write, in shuffled order, without unavailable tracks.
    pub fn playable_uris(&self) -> Result<Vec<String>, ShuffleError> {
        Ok(shuffle::filter_playable(self.shuffled()?)
            .filter_map(Track::uri)
            .collect())
    }

    /// Creates `name` for `user_id` and fills it with the shuffled tracks.
    ///
    /// The new playlist copies the source's visibility. Items are appended one
    /// batch at a time, in order; the first failing call aborts the copy and
    /// its error is returned as is.
    pub async fn save_copy(
        &self,
        config: &Config,
        token: &str,
        user_id: &str,
        name: &str,
    ) -> Result<SavedCopy, WorkflowError> {
        let uris = self.playable_uris()?;
        let written = uris.len();
        let skipped = self.playlist.tracks.len() - written;

        let created = spotify::playlist::create(
            config,
            token,
            user_id,
            name,
            &utils::copy_description(&self.playlist.name),
            self.playlist.public,
        )
        .await?;

        let mut batches = 0;
        for batch in shuffle::batches(uris, MAX_BATCH_SIZE) {
            spotify::playlist::add_tracks(config, token, &created.id, batch).await?;
            batches += 1;
        }

        log::info!(
            "saved {} tracks to {} in {} batches ({} unavailable skipped)",
            written,
            created.id,
            batches,
            skipped
        );

        Ok(SavedCopy {
            playlist: created,
            written,
            skipped,
            batches,
        })
    }
}
