use crate::fixtures::{FakeEncoder, FakeExtractor, build_test_app, sample_hits, song};
use axum::Json;
use axum::extract::{Path, State};
use tunebridge::error::ApiError;
use tunebridge::handlers::{
    add_playlist_song, create_playlist, get_playlists, remove_playlist_song,
};
use tunebridge::models::{AddPlaylistSongRequest, CreatePlaylistRequest, RemoveByIdRequest};

#[tokio::test]
async fn created_playlist_is_listed() {
    let app = build_test_app(FakeExtractor::with_hits(sample_hits()), FakeEncoder::new());

    let Json(created) = create_playlist(
        State(app.state.clone()),
        Json(CreatePlaylistRequest {
            name: "Chill".to_string(),
        }),
    )
    .await
    .unwrap();

    assert!(created.success);
    assert_eq!(created.playlist.id, "1");
    assert_eq!(created.playlist.name, "Chill");

    let Json(data) = get_playlists(State(app.state.clone())).await;
    assert_eq!(data.playlists.len(), 1);
    assert_eq!(data.playlists[0].name, "Chill");
}

#[tokio::test]
async fn playlist_without_name_is_rejected() {
    let app = build_test_app(FakeExtractor::with_hits(sample_hits()), FakeEncoder::new());

    let result = create_playlist(
        State(app.state.clone()),
        Json(CreatePlaylistRequest {
            name: String::new(),
        }),
    )
    .await;

    assert!(matches!(result, Err(ApiError::Validation(_))));
}

#[tokio::test]
async fn songs_can_be_added_to_a_playlist() {
    let app = build_test_app(FakeExtractor::with_hits(sample_hits()), FakeEncoder::new());

    let Json(created) = create_playlist(
        State(app.state.clone()),
        Json(CreatePlaylistRequest {
            name: "Mix".to_string(),
        }),
    )
    .await
    .unwrap();

    add_playlist_song(
        State(app.state.clone()),
        Path(created.playlist.id.clone()),
        Json(AddPlaylistSongRequest {
            song: song("a1", "A"),
        }),
    )
    .await
    .unwrap();

    let Json(data) = get_playlists(State(app.state.clone())).await;
    assert_eq!(data.playlists[0].songs.len(), 1);
    assert_eq!(data.playlists[0].songs[0].id, "a1");
}

#[tokio::test]
async fn adding_to_a_missing_playlist_is_not_found() {
    let app = build_test_app(FakeExtractor::with_hits(sample_hits()), FakeEncoder::new());

    let result = add_playlist_song(
        State(app.state.clone()),
        Path("99".to_string()),
        Json(AddPlaylistSongRequest {
            song: song("a1", "A"),
        }),
    )
    .await;

    assert!(matches!(result, Err(ApiError::NotFound(_))));
}

#[tokio::test]
async fn removing_an_absent_song_still_succeeds() {
    let app = build_test_app(FakeExtractor::with_hits(sample_hits()), FakeEncoder::new());

    let Json(created) = create_playlist(
        State(app.state.clone()),
        Json(CreatePlaylistRequest {
            name: "Mix".to_string(),
        }),
    )
    .await
    .unwrap();

    let Json(response) = remove_playlist_song(
        State(app.state.clone()),
        Path(created.playlist.id),
        Json(RemoveByIdRequest {
            id: "never-added".to_string(),
        }),
    )
    .await
    .unwrap();

    assert!(response.success);
}

#[tokio::test]
async fn removing_from_a_missing_playlist_is_not_found() {
    let app = build_test_app(FakeExtractor::with_hits(sample_hits()), FakeEncoder::new());

    let result = remove_playlist_song(
        State(app.state.clone()),
        Path("99".to_string()),
        Json(RemoveByIdRequest {
            id: "a1".to_string(),
        }),
    )
    .await;

    assert!(matches!(result, Err(ApiError::NotFound(_))));
}
