//! Title-keyed lookup indices over an album's ranking tables

use crate::models::album::{Album, ConsolidatedEntry, EvidenceEntry};
use crate::models::track::Track;
use crate::normalize::normalize_title;
use std::collections::HashMap;
use tracing::debug;

/// Identity hints gathered from `tracks` and `tracksByAcclaim`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackHint {
    pub id: Option<String>,
    pub duration: Option<u32>,
}

/// Per-album indices keyed by normalized title
///
/// The first entry seen for a title wins; later duplicates are ignored.
#[derive(Debug, Default)]
pub struct TitleIndex<'a> {
    pub consolidated: HashMap<String, &'a ConsolidatedEntry>,
    pub evidence: HashMap<String, &'a EvidenceEntry>,
    /// Ratings carried by the acclaim list
    pub acclaim: HashMap<String, f64>,
    pub tracks: HashMap<String, TrackHint>,
}

impl<'a> TitleIndex<'a> {
    pub fn build(album: &'a Album) -> Self {
        let mut index = TitleIndex::default();

        for entry in &album.ranking_consolidated {
            if let Some(key) = index_key(entry.track_title.as_deref(), "consolidated") {
                index.consolidated.entry(key).or_insert(entry);
            }
        }

        for entry in &album.best_ever_evidence {
            if let Some(key) = index_key(entry.track_title.as_deref(), "evidence") {
                index.evidence.entry(key).or_insert(entry);
            }
        }

        for track in &album.tracks_by_acclaim {
            if let (Some(key), Some(rating)) = (
                index_key(track.title.as_deref(), "acclaim list"),
                track.rating,
            ) {
                index.acclaim.entry(key).or_insert(rating);
            }
        }

        for track in album.tracks.iter().chain(&album.tracks_by_acclaim) {
            if let Some(key) = index_key(track.title.as_deref(), "track") {
                index.tracks.entry(key).or_insert_with(|| hint(track));
            }
        }

        index
    }

    pub fn consolidated(&self, key: &str) -> Option<&'a ConsolidatedEntry> {
        self.consolidated.get(key).copied()
    }

    pub fn evidence(&self, key: &str) -> Option<&'a EvidenceEntry> {
        self.evidence.get(key).copied()
    }

    pub fn acclaim_rating(&self, key: &str) -> Option<f64> {
        self.acclaim.get(key).copied()
    }

    pub fn track_hint(&self, key: &str) -> Option<&TrackHint> {
        self.tracks.get(key)
    }
}

fn hint(track: &Track) -> TrackHint {
    TrackHint {
        id: track.id.clone(),
        duration: track.duration,
    }
}

fn index_key(title: Option<&str>, table: &str) -> Option<String> {
    let key = normalize_title(title.unwrap_or(""));
    if key.is_empty() {
        debug!("Skipping {} entry without a usable title", table);
        return None;
    }
    Some(key)
}
