use std::path::{Path, PathBuf};

/// Filesystem-backed audio cache. Presence of a file at the deterministic
/// `{cache_dir}/{id}.mp3` path is the entire cache entry; there is no
/// metadata index, eviction, or TTL.
#[derive(Debug, Clone)]
pub struct CacheStore {
    cache_dir: PathBuf,
}

impl CacheStore {
    pub fn new(cache_dir: PathBuf) -> Self {
        Self { cache_dir }
    }

    pub fn dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Deterministic path for a video id. Pure; no I/O.
    pub fn path_for(&self, video_id: &str) -> PathBuf {
        self.cache_dir.join(format!("{video_id}.mp3"))
    }

    pub fn exists(&self, video_id: &str) -> bool {
        self.path_for(video_id).is_file()
    }

    pub fn materialized_file(&self, video_id: &str) -> Option<PathBuf> {
        let path = self.path_for(video_id);
        path.is_file().then_some(path)
    }
}

/// Accepts only the `{id}.mp3` shape the cache itself produces, so a
/// client-supplied filename can never traverse out of the cache directory.
pub fn is_valid_cache_filename(filename: &str) -> bool {
    let Some(stem) = filename.strip_suffix(".mp3") else {
        return false;
    };
    !stem.is_empty()
        && stem
            .bytes()
            .all(|byte| byte.is_ascii_alphanumeric() || byte == b'-' || byte == b'_')
}
