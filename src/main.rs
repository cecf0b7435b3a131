use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;
use tunebridge::config::Config;
use tunebridge::media::{Encoder, Extractor};
use tunebridge::state::AppState;
use tunebridge::ytdlp::YtDlp;
use tunebridge::handlers;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env();
    let bind_addr = config.bind_addr.clone();

    let ytdlp = Arc::new(YtDlp::new(&config));
    let extractor: Arc<dyn Extractor> = ytdlp.clone();
    let encoder: Arc<dyn Encoder> = ytdlp;

    let app_state = match AppState::new(config, extractor, encoder) {
        Ok(state) => Arc::new(state),
        Err(e) => {
            eprintln!("Failed to initialize app state: {e}");
            std::process::exit(1);
        }
    };

    let app = Router::new()
        .route("/health", get(handlers::health_check))
        .route("/search", post(handlers::search))
        .route("/play-audio", post(handlers::play_audio))
        .route("/play/:filename", get(handlers::play_file))
        .route(
            "/liked-songs",
            get(handlers::get_liked_songs)
                .post(handlers::like_song)
                .delete(handlers::unlike_song),
        )
        .route(
            "/playlists",
            get(handlers::get_playlists).post(handlers::create_playlist),
        )
        .route(
            "/playlists/:id/songs",
            post(handlers::add_playlist_song).delete(handlers::remove_playlist_song),
        )
        .route(
            "/recent-tracks",
            get(handlers::get_recent_tracks).post(handlers::add_recent_track),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await.unwrap();

    info!("Server running on http://{bind_addr}");

    axum::serve(listener, app).await.unwrap();
}
