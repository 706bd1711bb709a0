//! Per-run curation context
//!
//! Holds everything a single curation run accumulates: run identity, the
//! ranking source registry and the album lookup used by the summary.
//! Created inside [`crate::curate`] and consumed when the result is built.

use crate::models::album::Album;
use crate::models::provenance::ProvenanceEntry;
use crate::sources::{BuiltinSource, SourceRegistry};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use uuid::Uuid;

/// Display data and declared sources for one album key
#[derive(Debug, Clone, Default)]
pub struct AlbumInfo {
    pub title: Option<String>,
    pub artist: Option<String>,
    /// Names of the sources the album declared, in declaration order
    pub declared_sources: Vec<String>,
}

pub struct CurationContext {
    pub run_id: Uuid,
    /// Stamped on every provenance entry of the run
    pub started_at: DateTime<Utc>,
    sources: SourceRegistry,
    albums: HashMap<String, AlbumInfo>,
}

impl CurationContext {
    pub fn new() -> Self {
        Self::with_clock(Uuid::new_v4(), Utc::now())
    }

    /// Context with a fixed run id and timestamp
    pub fn with_clock(run_id: Uuid, started_at: DateTime<Utc>) -> Self {
        Self {
            run_id,
            started_at,
            sources: SourceRegistry::new(),
            albums: HashMap::new(),
        }
    }

    /// Build a provenance entry attributed to a built-in source
    pub fn provenance(
        &mut self,
        reason: impl Into<String>,
        source: BuiltinSource,
        score: f64,
    ) -> ProvenanceEntry {
        ProvenanceEntry {
            reason: reason.into(),
            source: self.sources.builtin(source),
            score,
            timestamp: self.started_at,
        }
    }

    /// Record an album's display data and register its declared sources
    pub fn register_album(&mut self, key: &str, album: &Album) {
        let mut declared_sources = Vec::new();
        for decl in &album.ranking_sources {
            if let Some(source) = self.sources.register_declared(decl) {
                declared_sources.push(source.name.clone());
            }
        }

        self.albums.insert(
            key.to_string(),
            AlbumInfo {
                title: album.title.clone(),
                artist: album.artist.clone(),
                declared_sources,
            },
        );
    }

    pub fn album_info(&self, key: &str) -> Option<&AlbumInfo> {
        self.albums.get(key)
    }

    pub fn sources(&self) -> &SourceRegistry {
        &self.sources
    }

    pub fn into_sources(self) -> SourceRegistry {
        self.sources
    }
}

impl Default for CurationContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::album::SourceDeclaration;
    use crate::sources::SourceKind;

    #[test]
    fn test_provenance_uses_run_timestamp() {
        let started = Utc::now();
        let mut ctx = CurationContext::with_clock(Uuid::new_v4(), started);

        let entry = ctx.provenance("hit: acclaim rank 1", BuiltinSource::HybridAlgorithm, 1.0);
        assert_eq!(entry.timestamp, started);
        assert_eq!(entry.source.name, "Hybrid Algorithm");
        assert_eq!(entry.source.kind, SourceKind::Internal);
        assert_eq!(ctx.sources().len(), 1);
    }

    #[test]
    fn test_register_album_records_sources() {
        let mut ctx = CurationContext::new();
        let album = Album {
            title: Some("Abbey Road".to_string()),
            ranking_sources: vec![
                SourceDeclaration::Name("Rolling Stone".to_string()),
                SourceDeclaration::Name("rolling stone".to_string()),
            ],
            ..Default::default()
        };

        ctx.register_album("alb1", &album);

        let info = ctx.album_info("alb1").unwrap();
        assert_eq!(info.title.as_deref(), Some("Abbey Road"));
        assert_eq!(info.declared_sources, vec!["Rolling Stone", "Rolling Stone"]);
        assert_eq!(ctx.sources().len(), 1);
        assert!(ctx.album_info("missing").is_none());
    }
}
