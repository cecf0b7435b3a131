use crate::error::ApiError;
use async_trait::async_trait;
use std::path::Path;

/// One search result from the media platform.
#[derive(Debug, Clone)]
pub struct SearchHit {
    pub id: String,
    pub title: String,
    pub duration: Option<f64>,
    pub thumbnail: Option<String>,
}

/// Platform-issued direct audio URL. Ephemeral — it may expire at any time
/// and carries no expiry information, so it is never persisted.
#[derive(Debug, Clone)]
pub struct StreamDescriptor {
    pub url: String,
    pub title: String,
    pub format: String,
}

/// Search and ephemeral stream-URL resolution against the media platform.
#[async_trait]
pub trait Extractor: Send + Sync {
    async fn search(&self, query: &str, max_results: usize)
    -> Result<Vec<SearchHit>, ApiError>;

    /// Best-audio stream for a watch URL, preferring m4a, then mp3, then
    /// webm, falling back to whatever the platform calls best.
    async fn resolve_stream(&self, url: &str) -> Result<StreamDescriptor, ApiError>;
}

/// Produces a normalized, locally stored mp3 from a media reference.
#[async_trait]
pub trait Encoder: Send + Sync {
    /// Writes `{output_stem}.mp3`.
    async fn transcode_to_file(&self, url: &str, output_stem: &Path) -> Result<(), ApiError>;
}
