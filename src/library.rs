use crate::error::ApiError;
use crate::models::{Playlist, Song};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use tokio::sync::RwLock;
use tracing::warn;

pub const RECENT_TRACKS_CAP: usize = 50;

pub fn current_timestamp() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs() as i64
}

/// A record addressable by its `id` within a collection.
pub trait Keyed {
    fn key(&self) -> &str;
}

impl Keyed for Song {
    fn key(&self) -> &str {
        &self.id
    }
}

impl Keyed for Playlist {
    fn key(&self) -> &str {
        &self.id
    }
}

/// Generic engine over one JSON-encoded ordered sequence of records, backed
/// by a single file. Every mutation is load → transform → save under the
/// collection's write lock; loads take the read lock, so concurrent reads
/// are fine but never overlap a write to the same file.
pub struct CollectionStore<T> {
    file_path: PathBuf,
    lock: RwLock<()>,
    _record: PhantomData<T>,
}

impl<T> CollectionStore<T>
where
    T: Serialize + DeserializeOwned + Keyed,
{
    pub fn new(file_path: PathBuf) -> Self {
        Self {
            file_path,
            lock: RwLock::new(()),
            _record: PhantomData,
        }
    }

    /// A missing or corrupt file degrades to an empty collection; corruption
    /// is logged, never surfaced to the caller.
    pub async fn load(&self) -> Vec<T> {
        let _guard = self.lock.read().await;
        self.read_records().await
    }

    /// One atomic load-transform-save round against this collection.
    pub async fn mutate<F, R>(&self, transform: F) -> Result<R, ApiError>
    where
        F: FnOnce(&mut Vec<T>) -> R,
    {
        let _guard = self.lock.write().await;
        let mut records = self.read_records().await;
        let outcome = transform(&mut records);
        self.write_records(&records).await?;
        Ok(outcome)
    }

    /// Removes any record with the same id, then inserts at the front and
    /// truncates to `cap` if given. Most-recently-used ordering.
    pub async fn upsert_front(&self, record: T, cap: Option<usize>) -> Result<(), ApiError> {
        self.mutate(|records| {
            records.retain(|existing| existing.key() != record.key());
            records.insert(0, record);
            if let Some(cap) = cap {
                records.truncate(cap);
            }
        })
        .await
    }

    /// No-op when the id is absent; that is not an error.
    pub async fn remove_by_key(&self, key: &str) -> Result<(), ApiError> {
        self.mutate(|records| {
            if let Some(position) = records.iter().position(|r| r.key() == key) {
                records.remove(position);
            }
        })
        .await
    }

    async fn read_records(&self) -> Vec<T> {
        let bytes = match tokio::fs::read(&self.file_path).await {
            Ok(bytes) => bytes,
            Err(_) => return Vec::new(),
        };

        match serde_json::from_slice(&bytes) {
            Ok(records) => records,
            Err(e) => {
                warn!(
                    file = %self.file_path.display(),
                    "collection file failed to parse, starting empty: {e}"
                );
                Vec::new()
            }
        }
    }

    /// Write-temp-then-rename so a crash mid-write cannot leave a truncated
    /// collection behind.
    async fn write_records(&self, records: &[T]) -> Result<(), ApiError> {
        let serialized = serde_json::to_vec_pretty(records).map_err(|e| {
            ApiError::StorageFailure(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
        })?;

        let temp_path = self.file_path.with_extension("json.tmp");
        tokio::fs::write(&temp_path, serialized).await?;
        tokio::fs::rename(&temp_path, &self.file_path).await?;
        Ok(())
    }
}

/// The personal media library: three independent collections, one file each.
pub struct Library {
    pub liked_songs: CollectionStore<Song>,
    pub playlists: CollectionStore<Playlist>,
    pub recent_tracks: CollectionStore<Song>,
}

impl Library {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            liked_songs: CollectionStore::new(data_dir.join("liked_songs.json")),
            playlists: CollectionStore::new(data_dir.join("playlists.json")),
            recent_tracks: CollectionStore::new(data_dir.join("recent_tracks.json")),
        }
    }

    /// Re-liking a song moves it back to the front without duplicating it.
    pub async fn like_song(&self, mut song: Song) -> Result<(), ApiError> {
        song.liked_at = Some(current_timestamp());
        self.liked_songs.upsert_front(song, None).await
    }

    pub async fn unlike_song(&self, song_id: &str) -> Result<(), ApiError> {
        self.liked_songs.remove_by_key(song_id).await
    }

    pub async fn record_recent_track(&self, mut track: Song) -> Result<(), ApiError> {
        track.played_at = Some(current_timestamp());
        self.recent_tracks
            .upsert_front(track, Some(RECENT_TRACKS_CAP))
            .await
    }

    /// Playlist ids stay sequential (`count + 1`) for compatibility with the
    /// persisted format, so ids can repeat once playlists are deleted.
    pub async fn create_playlist(&self, name: String) -> Result<Playlist, ApiError> {
        self.playlists
            .mutate(|playlists| {
                let playlist = Playlist {
                    id: (playlists.len() + 1).to_string(),
                    name,
                    songs: Vec::new(),
                    created_at: current_timestamp(),
                };
                playlists.push(playlist.clone());
                playlist
            })
            .await
    }

    /// Membership is append-ordered: re-adding a song drops the old entry
    /// and appends at the end. Returns false when the playlist is missing.
    pub async fn add_song_to_playlist(
        &self,
        playlist_id: &str,
        song: Song,
    ) -> Result<bool, ApiError> {
        self.playlists
            .mutate(|playlists| {
                match playlists.iter_mut().find(|p| p.id == playlist_id) {
                    Some(playlist) => {
                        playlist.songs.retain(|existing| existing.id != song.id);
                        playlist.songs.push(song);
                        true
                    }
                    None => false,
                }
            })
            .await
    }

    /// Removing an absent song succeeds; only a missing playlist is an
    /// error, reported as false.
    pub async fn remove_song_from_playlist(
        &self,
        playlist_id: &str,
        song_id: &str,
    ) -> Result<bool, ApiError> {
        self.playlists
            .mutate(|playlists| {
                match playlists.iter_mut().find(|p| p.id == playlist_id) {
                    Some(playlist) => {
                        playlist.songs.retain(|existing| existing.id != song_id);
                        true
                    }
                    None => false,
                }
            })
            .await
    }
}
