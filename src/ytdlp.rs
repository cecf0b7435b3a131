use crate::config::Config;
use crate::error::ApiError;
use crate::media::{Encoder, Extractor, SearchHit, StreamDescriptor};
use async_trait::async_trait;
use serde::Deserialize;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::debug;

const STREAM_FORMAT_CHAIN: &str =
    "bestaudio[ext=m4a]/bestaudio[ext=mp3]/bestaudio[ext=webm]/bestaudio";

/// Real Extractor/Encoder backed by the `yt-dlp` binary (ffmpeg behind it
/// for the mp3 transcode). Every invocation runs under a timeout so a stuck
/// subprocess cannot pin a per-id lock.
pub struct YtDlp {
    binary: String,
    search_timeout: Duration,
    encode_timeout: Duration,
}

#[derive(Deserialize)]
struct FlatEntry {
    #[serde(default)]
    id: String,
    #[serde(default)]
    title: String,
    duration: Option<f64>,
    thumbnail: Option<String>,
    // flat-playlist entries carry thumbnails as a list instead
    #[serde(default)]
    thumbnails: Vec<Thumbnail>,
}

#[derive(Deserialize)]
struct Thumbnail {
    url: String,
}

#[derive(Deserialize)]
struct StreamInfo {
    url: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    ext: String,
}

impl YtDlp {
    pub fn new(config: &Config) -> Self {
        Self {
            binary: config.ytdlp_binary.clone(),
            search_timeout: config.search_timeout,
            encode_timeout: config.encode_timeout,
        }
    }

    async fn run(
        &self,
        args: &[&str],
        timeout: Duration,
        failure: fn(String) -> ApiError,
    ) -> Result<String, ApiError> {
        debug!(?args, "running yt-dlp");

        let output = tokio::time::timeout(
            timeout,
            Command::new(&self.binary)
                .args(args)
                .stdin(Stdio::null())
                .kill_on_drop(true)
                .output(),
        )
        .await
        .map_err(|_| failure(format!("yt-dlp timed out after {}s", timeout.as_secs())))?
        .map_err(|e| failure(format!("failed to run yt-dlp: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(failure(stderr.trim().to_string()));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[async_trait]
impl Extractor for YtDlp {
    async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<SearchHit>, ApiError> {
        let target = format!("ytsearch{max_results}:{query}");
        let stdout = self
            .run(
                &["--dump-json", "--flat-playlist", "--no-warnings", &target],
                self.search_timeout,
                ApiError::ExtractionFailure,
            )
            .await?;

        // One JSON document per line; entries that fail to parse are skipped.
        let hits = stdout
            .lines()
            .filter_map(|line| serde_json::from_str::<FlatEntry>(line).ok())
            .filter(|entry| !entry.id.is_empty())
            .map(|entry| SearchHit {
                thumbnail: entry
                    .thumbnail
                    .or_else(|| entry.thumbnails.into_iter().last().map(|t| t.url)),
                id: entry.id,
                title: entry.title,
                duration: entry.duration,
            })
            .collect();

        Ok(hits)
    }

    async fn resolve_stream(&self, url: &str) -> Result<StreamDescriptor, ApiError> {
        let stdout = self
            .run(
                &[
                    "--dump-json",
                    "--no-warnings",
                    "-f",
                    STREAM_FORMAT_CHAIN,
                    url,
                ],
                self.search_timeout,
                ApiError::ExtractionFailure,
            )
            .await?;

        let info: StreamInfo = serde_json::from_str(stdout.trim())
            .map_err(|e| ApiError::ExtractionFailure(format!("unusable yt-dlp output: {e}")))?;

        Ok(StreamDescriptor {
            url: info.url,
            title: info.title,
            format: info.ext,
        })
    }
}

#[async_trait]
impl Encoder for YtDlp {
    async fn transcode_to_file(&self, url: &str, output_stem: &Path) -> Result<(), ApiError> {
        // yt-dlp appends the extension itself once ffmpeg has produced mp3.
        let template = format!("{}.%(ext)s", output_stem.display());

        self.run(
            &[
                "-f",
                "bestaudio/best",
                "-x",
                "--audio-format",
                "mp3",
                "--audio-quality",
                "192K",
                "--no-warnings",
                "-o",
                &template,
                url,
            ],
            self.encode_timeout,
            ApiError::EncodingFailure,
        )
        .await?;

        Ok(())
    }
}
