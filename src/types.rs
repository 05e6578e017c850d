use serde::{Deserialize, Serialize};
use tabled::Tabled;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub refresh_token: String,
    pub scope: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

/// Body of a successful response from the token endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
    #[serde(default = "default_expires_in")]
    pub expires_in: u64,
}

fn default_expires_in() -> u64 {
    3600
}

#[derive(Debug, Clone)]
pub struct PkceToken {
    pub code_verifier: String,
    pub state: String,
    pub token: Option<Token>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

/// One page of a paginated listing. `next` holds the absolute URL of the
/// following page, if any.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub total: Option<u64>,
}

/// A track as far as shuffling is concerned: something to display and
/// something to write back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub name: String,
    /// `None` for local files and tracks delisted from the catalogue.
    #[serde(default)]
    pub id: Option<String>,
    /// `track` or `episode`.
    #[serde(rename = "type", default = "default_track_kind")]
    pub kind: String,
}

fn default_track_kind() -> String {
    "track".to_string()
}

impl Track {
    pub fn new(name: impl Into<String>, id: Option<&str>) -> Self {
        Self {
            name: name.into(),
            id: id.map(str::to_string),
            kind: default_track_kind(),
        }
    }

    /// URI form of the identifier, as the playlist endpoints expect it.
    pub fn uri(&self) -> Option<String> {
        self.id
            .as_deref()
            .filter(|id| !id.is_empty())
            .map(|id| format!("spotify:{kind}:{id}", kind = self.kind))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistItem {
    /// Null when the item is no longer available at all.
    #[serde(default)]
    pub track: Option<Track>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TracksRef {
    pub total: u64,
}

/// Entry of the current user's playlist listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistSummary {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub public: Option<bool>,
    #[serde(default)]
    pub images: Option<Vec<Image>>,
    #[serde(default)]
    pub tracks: Option<TracksRef>,
}

impl PlaylistSummary {
    pub fn cover(&self) -> Option<&Image> {
        self.images.as_ref().and_then(|images| images.first())
    }

    pub fn track_count(&self) -> u64 {
        self.tracks.as_ref().map_or(0, |t| t.total)
    }
}

/// Response of `GET /playlists/{id}`; `tracks` is only the first page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullPlaylist {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub public: Option<bool>,
    #[serde(default)]
    pub images: Option<Vec<Image>>,
    pub tracks: Page<PlaylistItem>,
}

/// A playlist with every page of tracks fetched and flattened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    pub id: String,
    pub name: String,
    pub public: bool,
    pub images: Vec<Image>,
    pub tracks: Vec<Track>,
}

impl Playlist {
    pub fn cover(&self) -> Option<&Image> {
        self.images.first()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylistRequest {
    pub name: String,
    pub description: String,
    pub public: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylistResponse {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub public: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTrackToPlaylistRequest {
    pub uris: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTrackToPlaylistResponse {
    pub snapshot_id: String,
}

#[derive(Tabled)]
pub struct PlaylistTableRow {
    pub id: String,
    pub name: String,
    pub tracks: u64,
    pub visibility: String,
}

#[derive(Tabled)]
pub struct ShuffledTableRow {
    pub position: usize,
    pub name: String,
    pub from: usize,
}
