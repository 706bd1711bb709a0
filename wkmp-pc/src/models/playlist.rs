//! Playlist record

use super::track::Track;
use serde::{Deserialize, Serialize};

/// Reserved id of the rank-1 hits playlist
pub const HITS_VOL_1_ID: &str = "p1";
/// Reserved id of the rank-2 hits playlist
pub const HITS_VOL_2_ID: &str = "p2";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Playlist {
    pub id: String,
    pub title: String,
    pub subtitle: String,
    pub tracks: Vec<Track>,
}

impl Playlist {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            subtitle: String::new(),
            tracks: Vec::new(),
        }
    }

    /// Sum of track durations in seconds
    pub fn duration(&self) -> u64 {
        self.tracks.iter().map(Track::seconds).sum()
    }

    /// True when a track of `album_key` is already present
    ///
    /// Keyless lookups never match.
    pub fn has_album(&self, album_key: Option<&str>) -> bool {
        match album_key {
            Some(key) => self
                .tracks
                .iter()
                .any(|t| t.origin_album_id.as_deref() == Some(key)),
            None => false,
        }
    }

    /// Number of tracks from `album_key` in this playlist
    pub fn album_count(&self, album_key: &str) -> usize {
        self.tracks
            .iter()
            .filter(|t| t.origin_album_id.as_deref() == Some(album_key))
            .count()
    }
}
