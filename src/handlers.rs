use crate::cache;
use crate::error::ApiError;
use crate::models::{
    AddPlaylistSongRequest, AddRecentTrackRequest, CreatePlaylistRequest, CreatePlaylistResponse,
    HealthResponse, LikeSongRequest, LikedSongsResponse, PlayAudioRequest, PlayAudioResponse,
    PlaylistsResponse, RecentTracksResponse, RemoveByIdRequest, SearchRequest, SearchResponse,
    SearchResult, SuccessResponse,
};
use crate::resolver::Resolution;
use crate::state::AppState;
use axum::Json;
use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;

const SEARCH_MAX_RESULTS: usize = 5;

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        message: "Tunebridge API is running".to_string(),
    })
}

pub async fn search(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, ApiError> {
    let query = request.query.trim();
    if query.is_empty() {
        return Err(ApiError::Validation("No search query provided".to_string()));
    }

    let hits = state.extractor.search(query, SEARCH_MAX_RESULTS).await?;
    let results = hits
        .into_iter()
        .map(|hit| SearchResult {
            url: format!("https://youtube.com/watch?v={}", hit.id),
            id: hit.id,
            title: hit.title,
            duration: hit.duration,
            thumbnail: hit.thumbnail,
        })
        .collect();

    Ok(Json(SearchResponse { results }))
}

pub async fn play_audio(
    State(state): State<Arc<AppState>>,
    Json(request): Json<PlayAudioRequest>,
) -> Result<Json<PlayAudioResponse>, ApiError> {
    if request.url.trim().is_empty() {
        return Err(ApiError::Validation("No URL provided".to_string()));
    }

    let response = match state.resolver.resolve(&request.url, request.mode).await? {
        Resolution::Cached(path) => file_response("cached", &path),
        Resolution::Downloaded(path) => file_response("download", &path),
        Resolution::Streamed(descriptor) => PlayAudioResponse {
            success: true,
            kind: "stream".to_string(),
            file: None,
            stream_url: Some(descriptor.url),
            title: Some(descriptor.title),
        },
    };

    Ok(Json(response))
}

fn file_response(kind: &str, path: &std::path::Path) -> PlayAudioResponse {
    PlayAudioResponse {
        success: true,
        kind: kind.to_string(),
        file: path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned()),
        stream_url: None,
        title: None,
    }
}

/// Serves a cached audio file. The filename must match the deterministic
/// `{id}.mp3` cache-key shape before it is joined to the cache directory.
pub async fn play_file(
    State(state): State<Arc<AppState>>,
    Path(filename): Path<String>,
) -> Result<Response, ApiError> {
    if !cache::is_valid_cache_filename(&filename) {
        return Err(ApiError::Validation(format!(
            "invalid audio filename: {filename}"
        )));
    }

    let path = state.cache.dir().join(&filename);
    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|_| ApiError::NotFound(format!("file {filename}")))?;

    Ok(([(header::CONTENT_TYPE, "audio/mpeg")], bytes).into_response())
}

pub async fn get_liked_songs(State(state): State<Arc<AppState>>) -> Json<LikedSongsResponse> {
    Json(LikedSongsResponse {
        songs: state.library.liked_songs.load().await,
    })
}

pub async fn like_song(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LikeSongRequest>,
) -> Result<Json<SuccessResponse>, ApiError> {
    if request.song.id.trim().is_empty() {
        return Err(ApiError::Validation("song id is required".to_string()));
    }

    state.library.like_song(request.song).await?;
    Ok(Json(SuccessResponse { success: true }))
}

pub async fn unlike_song(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RemoveByIdRequest>,
) -> Result<Json<SuccessResponse>, ApiError> {
    state.library.unlike_song(&request.id).await?;
    Ok(Json(SuccessResponse { success: true }))
}

pub async fn get_playlists(State(state): State<Arc<AppState>>) -> Json<PlaylistsResponse> {
    Json(PlaylistsResponse {
        playlists: state.library.playlists.load().await,
    })
}

pub async fn create_playlist(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreatePlaylistRequest>,
) -> Result<Json<CreatePlaylistResponse>, ApiError> {
    let name = request.name.trim();
    if name.is_empty() {
        return Err(ApiError::Validation("playlist name is required".to_string()));
    }

    let playlist = state.library.create_playlist(name.to_string()).await?;
    Ok(Json(CreatePlaylistResponse {
        success: true,
        playlist,
    }))
}

pub async fn add_playlist_song(
    State(state): State<Arc<AppState>>,
    Path(playlist_id): Path<String>,
    Json(request): Json<AddPlaylistSongRequest>,
) -> Result<Json<SuccessResponse>, ApiError> {
    if request.song.id.trim().is_empty() {
        return Err(ApiError::Validation("song id is required".to_string()));
    }

    let found = state
        .library
        .add_song_to_playlist(&playlist_id, request.song)
        .await?;
    if !found {
        return Err(ApiError::NotFound(format!("playlist {playlist_id}")));
    }

    Ok(Json(SuccessResponse { success: true }))
}

pub async fn remove_playlist_song(
    State(state): State<Arc<AppState>>,
    Path(playlist_id): Path<String>,
    Json(request): Json<RemoveByIdRequest>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let found = state
        .library
        .remove_song_from_playlist(&playlist_id, &request.id)
        .await?;
    if !found {
        return Err(ApiError::NotFound(format!("playlist {playlist_id}")));
    }

    Ok(Json(SuccessResponse { success: true }))
}

pub async fn get_recent_tracks(State(state): State<Arc<AppState>>) -> Json<RecentTracksResponse> {
    Json(RecentTracksResponse {
        tracks: state.library.recent_tracks.load().await,
    })
}

pub async fn add_recent_track(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AddRecentTrackRequest>,
) -> Result<Json<SuccessResponse>, ApiError> {
    if request.track.id.trim().is_empty() {
        return Err(ApiError::Validation("track id is required".to_string()));
    }

    state.library.record_recent_track(request.track).await?;
    Ok(Json(SuccessResponse { success: true }))
}
