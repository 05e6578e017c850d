use crate::types::Track;

/// Keeps the tracks that can still be written to a playlist.
///
/// Tracks removed from the catalogue (and local files) come back from the API
/// without an id. They are dropped here; the remaining tracks keep their
/// relative order.
pub fn filter_playable<'a, I>(tracks: I) -> impl Iterator<Item = &'a Track>
where
    I: IntoIterator<Item = &'a Track>,
{
    tracks
        .into_iter()
        .filter(|track| track.id.as_deref().is_some_and(|id| !id.is_empty()))
}
