//! Greatest Hits seeding and duration fill

use crate::context::CurationContext;
use crate::models::album::ReconciledAlbum;
use crate::models::playlist::{Playlist, HITS_VOL_1_ID, HITS_VOL_2_ID};
use crate::models::track::Track;
use crate::reconcile::ordering::{sort_by_acclaim, RankKey};
use crate::sources::BuiltinSource;
use tracing::debug;

pub const HITS_VOL_1_TITLE: &str = "Greatest Hits Vol. 1";
pub const HITS_VOL_2_TITLE: &str = "Greatest Hits Vol. 2";

/// Provenance weight of a seeded hit
pub const HIT_WEIGHT: f64 = 1.0;
/// Provenance weight of a track pulled in to fill a hits playlist
pub const FILL_WEIGHT: f64 = 0.35;

/// Hits playlists plus everything ranked 3rd or lower
#[derive(Debug, Default)]
pub struct HitSeed {
    pub hits_1: Playlist,
    pub hits_2: Playlist,
    /// Leftover pool, best-ranked first
    pub remaining: Vec<Track>,
}

/// Place every album's rank-1 track in `p1` and rank-2 track in `p2`
///
/// Ranks are re-derived from the reconciled order, so `acclaim_rank` on
/// the returned tracks is always 1..N per album.
pub fn seed_hits(albums: &[ReconciledAlbum], ctx: &mut CurationContext) -> HitSeed {
    let mut seed = HitSeed {
        hits_1: Playlist::new(HITS_VOL_1_ID, HITS_VOL_1_TITLE),
        hits_2: Playlist::new(HITS_VOL_2_ID, HITS_VOL_2_TITLE),
        remaining: Vec::new(),
    };

    for album in albums {
        let ordered = sort_by_acclaim(album.tracks.clone(), |t| RankKey {
            rating: t.rating,
            score: t.acclaim_score,
            position: t.acclaim_rank.or(t.rank),
            title: t.title_str().to_string(),
        });

        for (i, mut track) in ordered.into_iter().enumerate() {
            let rank = i as u32 + 1;
            track.acclaim_rank = Some(rank);

            match rank {
                1 | 2 => {
                    let entry = ctx.provenance(
                        format!("hit: acclaim rank {}", rank),
                        BuiltinSource::HybridAlgorithm,
                        HIT_WEIGHT,
                    );
                    let playlist = if rank == 1 {
                        &mut seed.hits_1
                    } else {
                        &mut seed.hits_2
                    };
                    playlist.tracks.push(track.with_provenance(entry));
                }
                _ => seed.remaining.push(track),
            }
        }
    }

    seed.remaining.sort_by_key(|t| t.acclaim_rank.unwrap_or(u32::MAX));

    debug!(
        "Seeded hits: {} in {}, {} in {}, {} remaining",
        seed.hits_1.tracks.len(),
        HITS_VOL_1_ID,
        seed.hits_2.tracks.len(),
        HITS_VOL_2_ID,
        seed.remaining.len()
    );

    seed
}

/// Fill a hits playlist up to `target_seconds` from the head of `pool`
///
/// Prefers the best-ranked track whose album is not yet represented in the
/// playlist, falling back to the pool head.
pub fn fill_hits_playlist(
    playlist: &mut Playlist,
    pool: &mut Vec<Track>,
    target_seconds: u64,
    ctx: &mut CurationContext,
) {
    let mut filled = 0usize;

    while playlist.duration() < target_seconds && !pool.is_empty() {
        let idx = pool
            .iter()
            .position(|t| !playlist.has_album(t.origin_album_id.as_deref()))
            .unwrap_or(0);
        let track = pool.remove(idx);

        let entry = ctx.provenance(
            "fill: worse-ranked",
            BuiltinSource::HybridAlgorithm,
            FILL_WEIGHT,
        );
        playlist.tracks.push(track.with_provenance(entry));
        filled += 1;
    }

    debug!(
        "Filled {} with {} tracks ({}s of {}s target)",
        playlist.id,
        filled,
        playlist.duration(),
        target_seconds
    );
}
