//! Deep cuts: playlist count and round-robin distribution

use crate::models::playlist::Playlist;
use crate::models::track::Track;
use std::collections::{HashMap, VecDeque};
use tracing::debug;

/// Ids of generated playlists start after the two hits playlists
const FIRST_DEEP_CUT_NUMBER: usize = 3;

/// Number of deep-cut playlists for the leftover pool
///
/// `max(1, ceil(remaining / target))`, or zero when there are no albums.
pub fn deep_cut_count(album_count: usize, remaining_seconds: u64, target_seconds: u64) -> usize {
    if album_count == 0 {
        return 0;
    }
    let needed = remaining_seconds.div_ceil(target_seconds.max(1));
    (needed as usize).max(1)
}

/// Empty playlists `p3..p(2+count)` titled "Deep Cuts Vol. i"
pub fn deep_cut_playlists(count: usize) -> Vec<Playlist> {
    (1..=count)
        .map(|i| {
            Playlist::new(
                format!("p{}", FIRST_DEEP_CUT_NUMBER + i - 1),
                format!("Deep Cuts Vol. {}", i),
            )
        })
        .collect()
}

/// Spread `pool` over `playlists` one album at a time
///
/// Tracks are bucketed by album in first-appearance order (keyless tracks
/// get a bucket each). Each cycle takes one track from every non-empty
/// bucket. A running turn counter picks the playlist, so consecutive tracks
/// go to consecutive playlists and the first K tracks reach all K of them.
/// When the playlist on turn already ends with the same album, the next
/// playlist that does not is used instead.
pub fn distribute(pool: Vec<Track>, playlists: &mut [Playlist]) {
    if playlists.is_empty() {
        debug_assert!(pool.is_empty(), "tracks left without a deep-cut playlist");
        return;
    }

    let mut buckets: Vec<VecDeque<Track>> = Vec::new();
    let mut bucket_of: HashMap<String, usize> = HashMap::new();

    for track in pool {
        match track.origin_album_id.clone() {
            Some(key) => {
                let idx = *bucket_of.entry(key).or_insert_with(|| {
                    buckets.push(VecDeque::new());
                    buckets.len() - 1
                });
                buckets[idx].push_back(track);
            }
            None => buckets.push(VecDeque::from([track])),
        }
    }

    let count = playlists.len();
    let mut turn = 0usize;
    let mut placed = 0usize;
    loop {
        let mut progressed = false;
        for bucket in buckets.iter_mut() {
            if let Some(track) = bucket.pop_front() {
                let idx = next_playlist(playlists, &track, turn);
                playlists[idx].tracks.push(track);
                turn = idx + 1;
                placed += 1;
                progressed = true;
            }
        }
        if !progressed {
            break;
        }
    }

    debug!(
        "Distributed {} tracks from {} buckets over {} deep-cut playlists",
        placed,
        buckets.len(),
        count
    );
}

/// First playlist from `turn` onward whose last track is from another album
///
/// Falls back to the playlist on turn when every playlist ends with this album.
fn next_playlist(playlists: &[Playlist], track: &Track, turn: usize) -> usize {
    let count = playlists.len();
    (0..count)
        .map(|offset| (turn + offset) % count)
        .find(|&idx| {
            playlists[idx]
                .tracks
                .last()
                .map_or(true, |last| !last.shares_album_with(track))
        })
        .unwrap_or(turn % count)
}
