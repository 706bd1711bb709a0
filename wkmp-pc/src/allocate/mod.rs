//! Playlist Allocator
//!
//! Turns reconciled albums into two Greatest Hits playlists followed by K
//! Deep Cuts playlists, then balances their durations.
//!
//! Steps, in order:
//! 1. seed `p1`/`p2` with every album's rank-1/rank-2 track
//! 2. fill both hits playlists up to the target from the leftover pool
//! 3. size the deep cuts from what is left
//! 4. deal the pool round-robin by album
//! 5. swap-balance all playlists

pub mod balance;
pub mod deep_cuts;
pub mod hits;

use crate::config::CurationOptions;
use crate::context::CurationContext;
use crate::models::album::ReconciledAlbum;
use crate::models::playlist::Playlist;
use crate::models::track::Track;
use balance::{balance_playlists, BalanceReport};
use tracing::debug;
use wkmp_common::human_time::format_duration;

/// Allocator output
#[derive(Debug, Clone)]
pub struct Allocation {
    /// `p1`, `p2`, then `p3..p(2+K)`
    pub playlists: Vec<Playlist>,
    pub balance: BalanceReport,
}

/// Allocate every reconciled track to exactly one playlist
pub fn allocate(
    albums: &[ReconciledAlbum],
    options: &CurationOptions,
    ctx: &mut CurationContext,
) -> Allocation {
    let target = options.target_seconds;

    let hits::HitSeed {
        mut hits_1,
        mut hits_2,
        mut remaining,
    } = hits::seed_hits(albums, ctx);

    hits::fill_hits_playlist(&mut hits_1, &mut remaining, target, ctx);
    hits::fill_hits_playlist(&mut hits_2, &mut remaining, target, ctx);

    let remaining_seconds: u64 = remaining.iter().map(Track::seconds).sum();
    let count = deep_cuts::deep_cut_count(albums.len(), remaining_seconds, target);
    debug!(
        "{} tracks ({}s) left after fill, {} deep-cut playlists",
        remaining.len(),
        remaining_seconds,
        count
    );

    let mut deep = deep_cuts::deep_cut_playlists(count);
    deep_cuts::distribute(remaining, &mut deep);

    let mut playlists = Vec::with_capacity(2 + deep.len());
    playlists.push(hits_1);
    playlists.push(hits_2);
    playlists.extend(deep);

    let balance = balance_playlists(&mut playlists, options, ctx);

    for playlist in &mut playlists {
        playlist.subtitle = render_subtitle(playlist);
    }

    Allocation { playlists, balance }
}

/// "<n> tracks · <duration>"
pub fn render_subtitle(playlist: &Playlist) -> String {
    format!(
        "{} tracks · {}",
        playlist.tracks.len(),
        format_duration(playlist.duration())
    )
}
