use crate::cache::CacheStore;
use crate::error::ApiError;
use crate::media::{Encoder, Extractor, StreamDescriptor};
use crate::models::PlayMode;
use crate::video_id::{self, VideoRef};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

/// What a playback request resolved to. Callers must distinguish "serve
/// this local file" from "redirect to this ephemeral URL".
#[derive(Debug)]
pub enum Resolution {
    Cached(PathBuf),
    Downloaded(PathBuf),
    Streamed(StreamDescriptor),
}

/// Orchestrates identifier parsing, the cache probe, and the two adapters.
///
/// Streaming intentionally never writes to the cache — it only needs a
/// short-lived direct URL. Downloading caches so the expensive encode never
/// repeats for the same id.
pub struct AudioResolver {
    cache: CacheStore,
    extractor: Arc<dyn Extractor>,
    encoder: Arc<dyn Encoder>,
    // One lock per video id; the map itself is only held long enough to
    // fetch or create an entry.
    encode_locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl AudioResolver {
    pub fn new(
        cache: CacheStore,
        extractor: Arc<dyn Extractor>,
        encoder: Arc<dyn Encoder>,
    ) -> Self {
        Self {
            cache,
            extractor,
            encoder,
            encode_locks: Mutex::new(HashMap::new()),
        }
    }

    pub async fn resolve(&self, reference: &str, mode: PlayMode) -> Result<Resolution, ApiError> {
        let video = video_id::identify(reference)?;

        // A cached file short-circuits both modes.
        if let Some(path) = self.cache.materialized_file(&video.id) {
            return Ok(Resolution::Cached(path));
        }

        match mode {
            PlayMode::Download => self.download(&video).await,
            PlayMode::Stream => {
                let descriptor = self.extractor.resolve_stream(&video.canonical_url).await?;
                Ok(Resolution::Streamed(descriptor))
            }
        }
    }

    /// Concurrent downloads of one id collapse onto a single encoder run:
    /// whoever takes the per-id lock first encodes, later holders find the
    /// file already cached when they re-check under the lock.
    async fn download(&self, video: &VideoRef) -> Result<Resolution, ApiError> {
        let id_lock = self.lock_for(&video.id).await;
        let _guard = id_lock.lock().await;

        if let Some(path) = self.cache.materialized_file(&video.id) {
            return Ok(Resolution::Cached(path));
        }

        let output_path = self.cache.path_for(&video.id);
        let output_stem = output_path.with_extension("");
        self.encoder
            .transcode_to_file(&video.canonical_url, &output_stem)
            .await?;

        if !self.cache.exists(&video.id) {
            return Err(ApiError::EncodingFailure(format!(
                "encoder produced no file for {}",
                video.id
            )));
        }

        info!(video_id = %video.id, "encoded and cached");
        Ok(Resolution::Downloaded(output_path))
    }

    async fn lock_for(&self, video_id: &str) -> Arc<Mutex<()>> {
        let mut locks = self.encode_locks.lock().await;
        locks.entry(video_id.to_string()).or_default().clone()
    }
}
