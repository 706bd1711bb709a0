//! Album record and its ranking tables

use super::lenient;
use super::track::Track;
use crate::sources::SourceKind;
use serde::{Deserialize, Serialize};

/// Album as supplied by the enrichment pipeline
///
/// Every field is optional on input. Missing tables default to empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Album {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,

    pub tracks: Vec<Track>,

    /// Tracks pre-ordered by acclaim (highest priority base list)
    pub tracks_by_acclaim: Vec<Track>,

    pub ranking_consolidated: Vec<ConsolidatedEntry>,

    /// Community ratings (BestEverAlbums)
    pub best_ever_evidence: Vec<EvidenceEntry>,

    pub ranking_sources: Vec<SourceDeclaration>,
}

impl Album {
    /// True when the album has nothing to reconcile
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
            && self.tracks_by_acclaim.is_empty()
            && self.ranking_consolidated.is_empty()
    }
}

/// Row of the consolidated ranking table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConsolidatedEntry {
    #[serde(alias = "title", skip_serializing_if = "Option::is_none")]
    pub track_title: Option<String>,

    #[serde(
        deserialize_with = "lenient::whole_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub final_position: Option<u32>,

    #[serde(
        deserialize_with = "lenient::whole_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub position: Option<u32>,

    #[serde(
        deserialize_with = "lenient::finite",
        skip_serializing_if = "Option::is_none"
    )]
    pub rating: Option<f64>,

    #[serde(
        deserialize_with = "lenient::finite",
        skip_serializing_if = "Option::is_none"
    )]
    pub normalized_score: Option<f64>,
}

impl ConsolidatedEntry {
    /// `finalPosition`, falling back to `position`
    pub fn effective_position(&self) -> Option<u32> {
        self.final_position.or(self.position)
    }
}

/// Row of the community rating table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EvidenceEntry {
    #[serde(alias = "title", skip_serializing_if = "Option::is_none")]
    pub track_title: Option<String>,

    #[serde(
        deserialize_with = "lenient::finite",
        skip_serializing_if = "Option::is_none"
    )]
    pub rating: Option<f64>,
}

/// Ranking source as declared on an album
///
/// Upstream writes either a bare name or a full descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SourceDeclaration {
    Name(String),
    Full(RankingSourceDecl),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingSourceDecl {
    pub name: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<SourceKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secure: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl SourceDeclaration {
    pub fn name(&self) -> &str {
        match self {
            SourceDeclaration::Name(name) => name,
            SourceDeclaration::Full(decl) => &decl.name,
        }
    }
}

/// Output of the reconciler for one album
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReconciledAlbum {
    /// `id`, or `album-<n>` for albums without one
    pub key: String,
    /// Tracks in acclaim order, `acclaim_rank` 1..N
    pub tracks: Vec<Track>,
}
