//! Curation data model
//!
//! Records arrive from upstream collaborators as camelCase JSON and leave
//! the curator in the same dialect.

pub mod album;
pub mod playlist;
pub mod provenance;
pub mod track;

pub use album::{Album, ConsolidatedEntry, EvidenceEntry, ReconciledAlbum, SourceDeclaration};
pub use playlist::Playlist;
pub use provenance::{ProvenanceEntry, SourceRef};
pub use track::Track;

/// Lenient numeric fields
///
/// Upstream extractors emit durations and positions as integers, floats or
/// null. Anything that is not a finite, non-negative number becomes `None`
/// instead of failing the whole document.
pub(crate) mod lenient {
    use serde::{Deserialize, Deserializer};

    pub fn whole_number<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
        Ok(raw
            .and_then(|v| v.as_f64())
            .filter(|v| v.is_finite() && *v >= 0.0 && *v <= u32::MAX as f64)
            .map(|v| v.round() as u32))
    }

    pub fn finite<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
        Ok(raw.and_then(|v| v.as_f64()).filter(|v| v.is_finite()))
    }
}
