//! Pairwise swap balancer
//!
//! Bounded local search: each iteration swaps one track between the
//! longest and the shortest playlist if that strictly narrows their gap.
//! Ending outside the tolerance band is a normal outcome.

use crate::config::CurationOptions;
use crate::context::CurationContext;
use crate::models::playlist::{Playlist, HITS_VOL_1_ID, HITS_VOL_2_ID};
use crate::models::track::Track;
use crate::sources::BuiltinSource;
use serde::{Deserialize, Serialize};
use std::mem;
use tracing::{debug, warn};

/// Provenance weight of a balancing swap
pub const SWAP_WEIGHT: f64 = 0.45;

/// Why the balancer stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// Longest and shortest playlists are inside the tolerance band
    Balanced,
    /// No guarded swap narrows the gap
    NoImprovingSwap,
    IterationLimit,
    /// Fewer than two playlists, or all extremes already equal
    NothingToBalance,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceReport {
    pub iterations: u32,
    pub swaps: u32,
    /// Every playlist ended inside `[T - tol, T + tol]`
    pub converged: bool,
    /// Longest minus shortest playlist duration at exit
    pub spread_seconds: u64,
    pub stop_reason: StopReason,
}

/// Indices of the longest and shortest playlist (first index on ties)
fn extremes(durations: &[u64]) -> (usize, usize) {
    let mut over = 0;
    let mut under = 0;
    for (i, &d) in durations.iter().enumerate() {
        if d > durations[over] {
            over = i;
        }
        if d < durations[under] {
            under = i;
        }
    }
    (over, under)
}

/// Seeded hits never leave their hits playlist
fn is_protected_hit(track: &Track, playlist: &Playlist) -> bool {
    match playlist.id.as_str() {
        HITS_VOL_1_ID => track.acclaim_rank == Some(1),
        HITS_VOL_2_ID => track.acclaim_rank == Some(2),
        _ => false,
    }
}

/// Only track of its album in `playlist`; keyless tracks always are
fn is_sole_representative(track: &Track, playlist: &Playlist) -> bool {
    match track.origin_album_id.as_deref() {
        Some(key) => playlist.album_count(key) <= 1,
        None => true,
    }
}

/// Whether `track` may leave `playlist` in exchange for `counterpart`
fn can_move(track: &Track, playlist: &Playlist, counterpart: &Track) -> bool {
    if is_protected_hit(track, playlist) {
        return false;
    }
    !is_sole_representative(track, playlist) || track.shares_album_with(counterpart)
}

/// Best guarded swap between `over` and `under`, if any narrows the gap
fn best_swap(over: &Playlist, under: &Playlist) -> Option<(usize, usize)> {
    let over_total = over.duration() as i64;
    let under_total = under.duration() as i64;
    let current_gap = (over_total - under_total).abs();

    let mut best: Option<(usize, usize, i64)> = None;
    for (i, a) in over.tracks.iter().enumerate() {
        for (j, b) in under.tracks.iter().enumerate() {
            if !can_move(a, over, b) || !can_move(b, under, a) {
                continue;
            }
            let delta = b.seconds() as i64 - a.seconds() as i64;
            let gap = ((over_total + delta) - (under_total - delta)).abs();
            if gap < current_gap && best.map_or(true, |(_, _, g)| gap < g) {
                best = Some((i, j, gap));
            }
        }
    }

    best.map(|(i, j, _)| (i, j))
}

/// Swap tracks between distinct playlists, each taking the other's index
fn swap_tracks(playlists: &mut [Playlist], over: usize, i: usize, under: usize, j: usize) {
    let (first, second) = if over < under {
        let (left, right) = playlists.split_at_mut(under);
        (&mut left[over].tracks[i], &mut right[0].tracks[j])
    } else {
        let (left, right) = playlists.split_at_mut(over);
        (&mut right[0].tracks[i], &mut left[under].tracks[j])
    };
    mem::swap(first, second);
}

fn annotate(track: Track, destination: &str, ctx: &mut CurationContext) -> Track {
    let entry = ctx.provenance(
        format!("Swap: moved to {}", destination),
        BuiltinSource::HybridAlgorithm,
        SWAP_WEIGHT,
    );
    track.with_provenance(entry)
}

/// Balance playlist durations toward the target in place
pub fn balance_playlists(
    playlists: &mut [Playlist],
    options: &CurationOptions,
    ctx: &mut CurationContext,
) -> BalanceReport {
    let lower = options.lower_bound();
    let upper = options.upper_bound();
    let mut iterations = 0u32;
    let mut swaps = 0u32;

    let stop_reason = loop {
        if playlists.len() < 2 {
            break StopReason::NothingToBalance;
        }

        let durations: Vec<u64> = playlists.iter().map(Playlist::duration).collect();
        let (over, under) = extremes(&durations);

        if durations[under] >= lower && durations[over] <= upper {
            break StopReason::Balanced;
        }
        if durations[over] == durations[under] {
            break StopReason::NothingToBalance;
        }
        if iterations >= options.max_swap_iterations {
            break StopReason::IterationLimit;
        }
        iterations += 1;

        let Some((i, j)) = best_swap(&playlists[over], &playlists[under]) else {
            break StopReason::NoImprovingSwap;
        };

        swap_tracks(playlists, over, i, under, j);

        let under_title = playlists[under].title.clone();
        let over_title = playlists[over].title.clone();
        let moved_down = mem::take(&mut playlists[under].tracks[j]);
        playlists[under].tracks[j] = annotate(moved_down, &under_title, ctx);
        let moved_up = mem::take(&mut playlists[over].tracks[i]);
        playlists[over].tracks[i] = annotate(moved_up, &over_title, ctx);
        swaps += 1;

        debug!(
            "Swap {}: '{}' {} -> {}, '{}' {} -> {}",
            swaps,
            playlists[under].tracks[j].title_str(),
            playlists[over].id,
            playlists[under].id,
            playlists[over].tracks[i].title_str(),
            playlists[under].id,
            playlists[over].id
        );
    };

    let durations: Vec<u64> = playlists.iter().map(Playlist::duration).collect();
    let max = durations.iter().copied().max().unwrap_or(0);
    let min = durations.iter().copied().min().unwrap_or(0);
    let converged = durations.iter().all(|&d| d >= lower && d <= upper);

    let report = BalanceReport {
        iterations,
        swaps,
        converged,
        spread_seconds: max - min,
        stop_reason,
    };

    if converged {
        debug!("Balancing finished: {:?}", report);
    } else {
        warn!(
            "Balancing ended outside tolerance ({:?} after {} iterations, spread {}s)",
            report.stop_reason, report.iterations, report.spread_seconds
        );
    }

    report
}
