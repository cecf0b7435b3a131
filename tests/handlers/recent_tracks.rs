use crate::fixtures::{FakeEncoder, FakeExtractor, build_test_app, sample_hits, song};
use axum::Json;
use axum::extract::State;
use tunebridge::handlers::{add_recent_track, get_recent_tracks};
use tunebridge::library::RECENT_TRACKS_CAP;
use tunebridge::models::AddRecentTrackRequest;

#[tokio::test]
async fn recorded_track_appears_first_on_get() {
    let app = build_test_app(FakeExtractor::with_hits(sample_hits()), FakeEncoder::new());

    for (id, title) in [("t1", "First"), ("t2", "Second")] {
        add_recent_track(
            State(app.state.clone()),
            Json(AddRecentTrackRequest {
                track: song(id, title),
            }),
        )
        .await
        .unwrap();
    }

    let Json(data) = get_recent_tracks(State(app.state.clone())).await;
    assert_eq!(data.tracks.len(), 2);
    assert_eq!(data.tracks[0].id, "t2");
    assert!(data.tracks[0].played_at.is_some());
}

#[tokio::test]
async fn history_is_bounded() {
    let app = build_test_app(FakeExtractor::with_hits(sample_hits()), FakeEncoder::new());

    for n in 0..(RECENT_TRACKS_CAP + 3) {
        add_recent_track(
            State(app.state.clone()),
            Json(AddRecentTrackRequest {
                track: song(&format!("t{n}"), "track"),
            }),
        )
        .await
        .unwrap();
    }

    let Json(data) = get_recent_tracks(State(app.state.clone())).await;
    assert_eq!(data.tracks.len(), RECENT_TRACKS_CAP);
}
