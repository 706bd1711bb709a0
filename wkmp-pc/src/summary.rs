//! Per-album provenance summary

use crate::context::CurationContext;
use crate::models::playlist::Playlist;
use crate::models::provenance::ProvenanceEntry;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

pub const UNKNOWN_ALBUM: &str = "Unknown Album";
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";
/// Summary key for tracks that never joined an album
pub const UNKNOWN_ALBUM_KEY: &str = "unknown";

/// Where one track ended up, and why
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackPlacement {
    pub track_id: String,
    pub title: String,
    pub acclaim_rank: Option<u32>,
    pub playlist_id: String,
    pub playlist_title: String,
    pub duration: u64,
    pub ranking_info: Vec<ProvenanceEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbumSummary {
    pub album_id: String,
    pub title: String,
    pub artist: String,
    /// Placements in final playlist order
    pub tracks: Vec<TrackPlacement>,
    /// Declared plus attributed source names, sorted
    pub sources: BTreeSet<String>,
}

/// Album key -> summary, ordered for stable output
pub type RankingSummary = BTreeMap<String, AlbumSummary>;

/// Roll every placed track up into its album's summary
pub fn build_summary(playlists: &[Playlist], ctx: &CurationContext) -> RankingSummary {
    let mut summary = RankingSummary::new();

    for playlist in playlists {
        for track in &playlist.tracks {
            let key = track
                .origin_album_id
                .clone()
                .unwrap_or_else(|| UNKNOWN_ALBUM_KEY.to_string());

            let album = summary.entry(key.clone()).or_insert_with(|| {
                let info = ctx.album_info(&key);
                AlbumSummary {
                    album_id: key.clone(),
                    title: info
                        .and_then(|i| i.title.clone())
                        .unwrap_or_else(|| UNKNOWN_ALBUM.to_string()),
                    artist: info
                        .and_then(|i| i.artist.clone())
                        .unwrap_or_else(|| UNKNOWN_ARTIST.to_string()),
                    tracks: Vec::new(),
                    sources: info
                        .map(|i| i.declared_sources.iter().cloned().collect())
                        .unwrap_or_default(),
                }
            });

            album
                .sources
                .extend(track.ranking_info.iter().map(|e| e.source.name.clone()));

            album.tracks.push(TrackPlacement {
                track_id: track.id_str().to_string(),
                title: track.title_str().to_string(),
                acclaim_rank: track.acclaim_rank,
                playlist_id: playlist.id.clone(),
                playlist_title: playlist.title.clone(),
                duration: track.seconds(),
                ranking_info: track.ranking_info.clone(),
            });
        }
    }

    summary
}
