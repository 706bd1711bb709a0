//! Provenance (rankingInfo) entries

use crate::sources::SourceKind;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Compact reference to a registered ranking source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceRef {
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: SourceKind,
}

/// One step of a track's audit trail
///
/// Entries are only ever appended; see [`crate::models::Track::with_provenance`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProvenanceEntry {
    /// Why the value or placement was assigned (e.g. "fill: worse-ranked")
    pub reason: String,
    pub source: SourceRef,
    /// Weight of the decision, or the derived value for rating entries
    pub score: f64,
    pub timestamp: DateTime<Utc>,
}
