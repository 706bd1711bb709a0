//! Curation entry point
//!
//! One call reconciles every album, allocates and balances playlists and
//! rolls the provenance up into a summary. No state outlives the call.

use crate::allocate::{allocate, balance::BalanceReport, Allocation};
use crate::config::CurationOptions;
use crate::context::CurationContext;
use crate::error::Result;
use crate::models::album::{Album, ReconciledAlbum};
use crate::models::playlist::Playlist;
use crate::reconcile::reconcile_album;
use crate::sources::RankingSource;
use crate::summary::{build_summary, RankingSummary};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

/// Everything a curation run produces
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurationResult {
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub target_seconds: u64,
    pub playlists: Vec<Playlist>,
    pub ranking_summary: RankingSummary,
    /// Sources registered during the run, in registration order
    pub ranking_sources: Vec<RankingSource>,
    pub balance: BalanceReport,
}

/// Album key: the album id, or `album-<n>` (1-based input position)
pub fn album_key(album: &Album, position: usize) -> String {
    album
        .id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| format!("album-{}", position))
}

/// Curate `albums` into balanced playlists
pub fn curate(albums: &[Album], options: &CurationOptions) -> Result<CurationResult> {
    curate_with_context(albums, options, CurationContext::new())
}

/// Curate with a caller-built context (fixed run id or clock)
pub fn curate_with_context(
    albums: &[Album],
    options: &CurationOptions,
    mut ctx: CurationContext,
) -> Result<CurationResult> {
    options.validate()?;

    info!(
        "Curation run {} started: {} albums, target {}s",
        ctx.run_id,
        albums.len(),
        options.target_seconds
    );

    let reconciled: Vec<ReconciledAlbum> = albums
        .iter()
        .enumerate()
        .map(|(i, album)| {
            let key = album_key(album, i + 1);
            ctx.register_album(&key, album);
            let tracks = reconcile_album(album, &key, &mut ctx);
            ReconciledAlbum { key, tracks }
        })
        .collect();

    let Allocation { playlists, balance } = allocate(&reconciled, options, &mut ctx);
    let ranking_summary = build_summary(&playlists, &ctx);

    let track_count: usize = playlists.iter().map(|p| p.tracks.len()).sum();
    info!(
        "Curation run {} finished: {} tracks in {} playlists, {} swaps ({:?})",
        ctx.run_id,
        track_count,
        playlists.len(),
        balance.swaps,
        balance.stop_reason
    );

    let run_id = ctx.run_id;
    let generated_at = ctx.started_at;

    Ok(CurationResult {
        run_id,
        generated_at,
        target_seconds: options.target_seconds,
        playlists,
        ranking_summary,
        ranking_sources: ctx.into_sources().into_sources(),
        balance,
    })
}
