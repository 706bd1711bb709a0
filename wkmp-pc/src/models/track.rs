//! Track record

use super::lenient;
use super::provenance::ProvenanceEntry;
use serde::{Deserialize, Serialize};

/// A single track as it flows through reconciliation and allocation
///
/// Tracks are values: every stage of the curator clones the caller's
/// tracks and works on the copies.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Track {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub album: Option<String>,

    /// Length in whole seconds
    #[serde(
        deserialize_with = "lenient::whole_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub duration: Option<u32>,

    /// Provider rating (arbitrary scale)
    #[serde(
        deserialize_with = "lenient::finite",
        skip_serializing_if = "Option::is_none"
    )]
    pub rating: Option<f64>,

    /// Normalized score used as the first tie-break after rating
    #[serde(
        alias = "normalizedScore",
        deserialize_with = "lenient::finite",
        skip_serializing_if = "Option::is_none"
    )]
    pub acclaim_score: Option<f64>,

    /// Source-of-truth position before reconciliation
    #[serde(
        deserialize_with = "lenient::whole_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub canonical_rank: Option<u32>,

    /// Position as supplied by the caller
    #[serde(
        alias = "position",
        deserialize_with = "lenient::whole_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub rank: Option<u32>,

    /// Reconciled 1-based rank within the album
    #[serde(
        deserialize_with = "lenient::whole_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub acclaim_rank: Option<u32>,

    /// Album key of the working set this track belongs to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin_album_id: Option<String>,

    pub ranking_info: Vec<ProvenanceEntry>,
}

impl Track {
    /// Duration in seconds, unknown counting as zero
    pub fn seconds(&self) -> u64 {
        u64::from(self.duration.unwrap_or(0))
    }

    pub fn id_str(&self) -> &str {
        self.id.as_deref().unwrap_or("")
    }

    pub fn title_str(&self) -> &str {
        self.title.as_deref().unwrap_or("")
    }

    /// Consume the track and return it with one more provenance entry
    pub fn with_provenance(mut self, entry: ProvenanceEntry) -> Self {
        self.ranking_info.push(entry);
        self
    }

    /// True when both tracks carry the same origin album key
    pub fn shares_album_with(&self, other: &Track) -> bool {
        matches!(
            (&self.origin_album_id, &other.origin_album_id),
            (Some(a), Some(b)) if a == b
        )
    }
}
