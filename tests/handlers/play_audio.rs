use crate::fixtures::{FakeEncoder, FakeExtractor, build_test_app, sample_hits};
use axum::Json;
use axum::extract::State;
use tunebridge::error::ApiError;
use tunebridge::handlers::play_audio;
use tunebridge::models::{PlayAudioRequest, PlayMode};

#[tokio::test]
async fn first_download_encodes_second_serves_cached() {
    let app = build_test_app(FakeExtractor::with_hits(sample_hits()), FakeEncoder::new());

    let Json(first) = play_audio(
        State(app.state.clone()),
        Json(PlayAudioRequest {
            url: "https://youtu.be/abc123".to_string(),
            mode: PlayMode::Download,
        }),
    )
    .await
    .unwrap();

    assert!(first.success);
    assert_eq!(first.kind, "download");
    assert_eq!(first.file.as_deref(), Some("abc123.mp3"));

    let Json(second) = play_audio(
        State(app.state.clone()),
        Json(PlayAudioRequest {
            url: "https://youtu.be/abc123".to_string(),
            mode: PlayMode::Download,
        }),
    )
    .await
    .unwrap();

    assert_eq!(second.kind, "cached");
    assert_eq!(second.file.as_deref(), Some("abc123.mp3"));
    assert_eq!(app.encoder.call_count(), 1);
}

#[tokio::test]
async fn stream_mode_returns_ephemeral_url_and_title() {
    let app = build_test_app(FakeExtractor::with_hits(sample_hits()), FakeEncoder::new());

    let Json(data) = play_audio(
        State(app.state.clone()),
        Json(PlayAudioRequest {
            url: "https://youtu.be/abc123".to_string(),
            mode: PlayMode::Stream,
        }),
    )
    .await
    .unwrap();

    assert!(data.success);
    assert_eq!(data.kind, "stream");
    assert!(data.stream_url.is_some());
    assert_eq!(data.title.as_deref(), Some("Test Track"));
    assert!(data.file.is_none());
}

#[tokio::test]
async fn missing_url_is_rejected() {
    let app = build_test_app(FakeExtractor::with_hits(sample_hits()), FakeEncoder::new());

    let result = play_audio(
        State(app.state.clone()),
        Json(PlayAudioRequest {
            url: String::new(),
            mode: PlayMode::Stream,
        }),
    )
    .await;

    assert!(matches!(result, Err(ApiError::Validation(_))));
}

#[tokio::test]
async fn invalid_youtube_url_is_rejected() {
    let app = build_test_app(FakeExtractor::with_hits(sample_hits()), FakeEncoder::new());

    let result = play_audio(
        State(app.state.clone()),
        Json(PlayAudioRequest {
            url: "https://example.com/watch?v=abc".to_string(),
            mode: PlayMode::Download,
        }),
    )
    .await;

    assert!(matches!(result, Err(ApiError::InvalidReference(_))));
}
