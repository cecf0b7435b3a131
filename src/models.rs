use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}

#[derive(Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub query: String,
}

#[derive(Serialize)]
pub struct SearchResult {
    pub id: String,
    pub title: String,
    pub duration: Option<f64>,
    pub thumbnail: Option<String>,
    pub url: String,
}

#[derive(Serialize)]
pub struct SearchResponse {
    pub results: Vec<SearchResult>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayMode {
    #[default]
    Stream,
    Download,
}

#[derive(Deserialize)]
pub struct PlayAudioRequest {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub mode: PlayMode,
}

#[derive(Serialize)]
pub struct PlayAudioResponse {
    pub success: bool,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// A library record. Opaque beyond `id` — whatever else the client sends
/// rides along in `extra` and survives the round trip untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Song {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub liked_at: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub played_at: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Playlist {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub songs: Vec<Song>,
    #[serde(default)]
    pub created_at: i64,
}

#[derive(Deserialize)]
pub struct LikeSongRequest {
    pub song: Song,
}

#[derive(Deserialize)]
pub struct RemoveByIdRequest {
    pub id: String,
}

#[derive(Serialize)]
pub struct LikedSongsResponse {
    pub songs: Vec<Song>,
}

#[derive(Deserialize)]
pub struct CreatePlaylistRequest {
    #[serde(default)]
    pub name: String,
}

#[derive(Serialize)]
pub struct PlaylistsResponse {
    pub playlists: Vec<Playlist>,
}

#[derive(Serialize)]
pub struct CreatePlaylistResponse {
    pub success: bool,
    pub playlist: Playlist,
}

#[derive(Deserialize)]
pub struct AddPlaylistSongRequest {
    pub song: Song,
}

#[derive(Deserialize)]
pub struct AddRecentTrackRequest {
    pub track: Song,
}

#[derive(Serialize)]
pub struct RecentTracksResponse {
    pub tracks: Vec<Song>,
}

#[derive(Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}
