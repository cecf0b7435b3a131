use std::path::PathBuf;
use std::time::Duration;

/// Runtime configuration, read from the environment once at startup and
/// passed by reference everywhere a path or timeout is needed.
#[derive(Debug, Clone)]
pub struct Config {
    pub cache_dir: PathBuf,
    pub data_dir: PathBuf,
    pub bind_addr: String,
    pub ytdlp_binary: String,
    pub search_timeout: Duration,
    pub encode_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Self {
        let cache_dir =
            PathBuf::from(std::env::var("CACHE_DIR").unwrap_or_else(|_| "cache".to_string()));
        let data_dir =
            PathBuf::from(std::env::var("DATA_DIR").unwrap_or_else(|_| "data".to_string()));
        let port = std::env::var("PORT")
            .ok()
            .and_then(|raw| raw.parse::<u16>().ok())
            .unwrap_or(5000);

        Self {
            cache_dir,
            data_dir,
            bind_addr: format!("0.0.0.0:{port}"),
            ytdlp_binary: std::env::var("YTDLP_BIN").unwrap_or_else(|_| "yt-dlp".to_string()),
            search_timeout: env_seconds("SEARCH_TIMEOUT_SECS", 30),
            encode_timeout: env_seconds("ENCODE_TIMEOUT_SECS", 120),
        }
    }
}

fn env_seconds(name: &str, default: u64) -> Duration {
    let seconds = std::env::var(name)
        .ok()
        .and_then(|raw| raw.parse::<u64>().ok())
        .unwrap_or(default);
    Duration::from_secs(seconds)
}
