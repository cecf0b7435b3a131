use crate::error::ApiError;
use url::Url;

/// Stable identity for a remote media item. The `id` doubles as the cache
/// key, so it is restricted to the charset YouTube uses for video ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoRef {
    pub id: String,
    pub canonical_url: String,
}

const WATCH_HOSTS: &[&str] = &["youtube.com", "www.youtube.com", "music.youtube.com"];
const SHORT_HOST: &str = "youtu.be";

/// Parses a YouTube URL into a `VideoRef`. Pure; no network access.
///
/// Recognized shapes: `youtu.be/<id>` and `youtube.com/watch?v=<id>`
/// (with `www.` and `music.` variants). Everything else fails.
pub fn identify(reference: &str) -> Result<VideoRef, ApiError> {
    let invalid = || ApiError::InvalidReference(reference.to_string());

    let parsed = Url::parse(reference).map_err(|_| invalid())?;
    let host = parsed.host_str().ok_or_else(|| invalid())?;

    let id = if host == SHORT_HOST {
        parsed.path().trim_start_matches('/').to_string()
    } else if WATCH_HOSTS.contains(&host) && parsed.path() == "/watch" {
        parsed
            .query_pairs()
            .find(|(key, _)| key == "v")
            .map(|(_, value)| value.into_owned())
            .ok_or_else(|| invalid())?
    } else {
        return Err(invalid());
    };

    if !is_valid_video_id(&id) {
        return Err(invalid());
    }

    Ok(VideoRef {
        canonical_url: format!("https://youtube.com/watch?v={id}"),
        id,
    })
}

fn is_valid_video_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .bytes()
            .all(|byte| byte.is_ascii_alphanumeric() || byte == b'-' || byte == b'_')
}
