//! wkmp-pc (Playlist Curator) library
//!
//! Curates a set of albums into duration-targeted playlists:
//! - the reconciler merges each album's ranking tables into one acclaim order
//! - the allocator seeds two Greatest Hits playlists with every album's top
//!   two tracks, deals the rest into Deep Cuts playlists and swap-balances
//!   them toward the target length
//! - every placement decision is recorded on the track (`rankingInfo`) and
//!   rolled up per album in the result
//!
//! Entry point: [`curate`].

pub mod allocate;
pub mod config;
pub mod context;
pub mod curator;
pub mod error;
pub mod models;
pub mod normalize;
pub mod reconcile;
pub mod report;
pub mod sources;
pub mod summary;

pub use allocate::balance::{BalanceReport, StopReason};
pub use config::CurationOptions;
pub use context::CurationContext;
pub use curator::{curate, curate_with_context, CurationResult};
pub use error::{CurationError, Result};
pub use models::{Album, Playlist, ProvenanceEntry, Track};
pub use sources::{RankingSource, SourceRegistry};
pub use summary::RankingSummary;
