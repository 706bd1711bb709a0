//! Ranking source registry
//!
//! Sources are registered lazily the first time an album declares one or
//! the curator attributes a value to one. The registry belongs to a single
//! curation run and is handed back to the caller with the result.

use crate::models::album::SourceDeclaration;
use crate::models::provenance::SourceRef;
use crate::normalize::normalize_title;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// Whether a source is computed by the curator or comes from outside
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Internal,
    #[default]
    #[serde(alias = "secure")]
    External,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingSource {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: SourceKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub secure: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl RankingSource {
    pub fn source_ref(&self) -> SourceRef {
        SourceRef {
            name: self.name.clone(),
            kind: self.kind,
        }
    }
}

impl From<&SourceDeclaration> for RankingSource {
    fn from(decl: &SourceDeclaration) -> Self {
        match decl {
            SourceDeclaration::Name(name) => RankingSource {
                name: name.trim().to_string(),
                kind: SourceKind::External,
                url: None,
                secure: false,
                description: None,
            },
            SourceDeclaration::Full(full) => RankingSource {
                name: full.name.trim().to_string(),
                kind: full.kind.unwrap_or_default(),
                url: full.url.clone(),
                secure: full.secure.unwrap_or(false),
                description: full.description.clone(),
            },
        }
    }
}

/// Sources the curator attributes values to on its own
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinSource {
    /// Ratings taken from `rankingConsolidated`
    Consolidated,
    /// Ratings taken from `bestEverEvidence`
    Community,
    /// Ratings taken from `tracksByAcclaim`
    AcclaimList,
    /// Hit seeding, fill and swap decisions
    HybridAlgorithm,
}

impl BuiltinSource {
    pub fn name(self) -> &'static str {
        match self {
            BuiltinSource::Consolidated => "Consolidated Ranking",
            BuiltinSource::Community => "BestEverAlbums",
            BuiltinSource::AcclaimList => "Acclaim List",
            BuiltinSource::HybridAlgorithm => "Hybrid Algorithm",
        }
    }

    pub fn descriptor(self) -> RankingSource {
        let (kind, url, secure, description) = match self {
            BuiltinSource::Consolidated => (
                SourceKind::External,
                None,
                false,
                "Consolidated ranking table supplied with the album",
            ),
            BuiltinSource::Community => (
                SourceKind::External,
                Some("https://www.besteveralbums.com"),
                true,
                "Community track ratings",
            ),
            BuiltinSource::AcclaimList => (
                SourceKind::External,
                None,
                false,
                "Pre-ordered acclaim list supplied with the album",
            ),
            BuiltinSource::HybridAlgorithm => (
                SourceKind::Internal,
                None,
                false,
                "Curator hit seeding, duration fill and swap balancing",
            ),
        };

        RankingSource {
            name: self.name().to_string(),
            kind,
            url: url.map(str::to_string),
            secure,
            description: Some(description.to_string()),
        }
    }
}

/// Run-scoped set of ranking sources, deduplicated by normalized name
#[derive(Debug, Default)]
pub struct SourceRegistry {
    sources: Vec<RankingSource>,
    index: HashMap<String, usize>,
}

impl SourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a source, or return the existing entry with the same
    /// normalized name unchanged
    pub fn register(&mut self, source: RankingSource) -> &RankingSource {
        let key = normalize_title(&source.name);
        let idx = match self.index.get(&key) {
            Some(&idx) => idx,
            None => {
                debug!("Registering ranking source '{}'", source.name);
                self.sources.push(source);
                let idx = self.sources.len() - 1;
                self.index.insert(key, idx);
                idx
            }
        };
        &self.sources[idx]
    }

    /// Register an album-declared source; blank names are ignored
    pub fn register_declared(&mut self, decl: &SourceDeclaration) -> Option<&RankingSource> {
        let source = RankingSource::from(decl);
        if normalize_title(&source.name).is_empty() {
            debug!("Ignoring ranking source declaration without a name");
            return None;
        }
        Some(self.register(source))
    }

    /// Register a built-in source on first use and return its reference
    pub fn builtin(&mut self, builtin: BuiltinSource) -> SourceRef {
        self.register(builtin.descriptor()).source_ref()
    }

    pub fn get(&self, name: &str) -> Option<&RankingSource> {
        self.index
            .get(&normalize_title(name))
            .map(|&idx| &self.sources[idx])
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RankingSource> {
        self.sources.iter()
    }

    /// Registered sources in registration order
    pub fn into_sources(self) -> Vec<RankingSource> {
        self.sources
    }
}
