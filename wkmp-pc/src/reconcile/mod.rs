//! Ranking Reconciler
//!
//! Merges the acclaim list, the consolidated ranking table, community
//! ratings and each track's own fields into one ordered track list per
//! album. Every surviving track gets a contention-free `acclaim_rank`
//! 1..N. Reconciliation never fails; unusable entries are skipped.

pub mod indices;
pub mod ordering;
pub mod resolvers;

use crate::context::CurationContext;
use crate::models::album::Album;
use crate::models::track::Track;
use crate::normalize::normalize_title;
use indices::TitleIndex;
use ordering::{sort_by_acclaim, RankKey};
use resolvers::{first_resolved, ResolveInput};
use tracing::debug;

/// Which table supplied the base track list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaseList {
    AcclaimList,
    Consolidated,
    Tracks,
}

/// Reconcile one album into enriched track copies in acclaim order
pub fn reconcile_album(album: &Album, album_key: &str, ctx: &mut CurationContext) -> Vec<Track> {
    let index = TitleIndex::build(album);
    let (base_kind, base) = base_list(album, &index);

    if base.is_empty() {
        debug!("Album {} has no tracks to reconcile", album_key);
        return Vec::new();
    }

    // (position key, enriched track)
    let mut enriched: Vec<(Option<u32>, Track)> = Vec::with_capacity(base.len());
    for (offset, track) in base.iter().enumerate() {
        let position = offset as u32 + 1;
        let track = enrich_track(track, position, album, album_key, &index, ctx);
        let position_key = track.rank.or(track.canonical_rank).or(Some(position));
        enriched.push((position_key, track));
    }

    let ordered = sort_by_acclaim(enriched, |(position, track)| RankKey {
        rating: track.rating,
        score: track.acclaim_score,
        position: *position,
        title: track.title_str().to_string(),
    });

    let tracks: Vec<Track> = ordered
        .into_iter()
        .enumerate()
        .map(|(i, (_, mut track))| {
            track.acclaim_rank = Some(i as u32 + 1);
            track
        })
        .collect();

    debug!(
        "Reconciled album {}: {} tracks from {:?}",
        album_key,
        tracks.len(),
        base_kind
    );

    tracks
}

/// Pick the base track list by table priority
fn base_list(album: &Album, index: &TitleIndex<'_>) -> (BaseList, Vec<Track>) {
    if !album.tracks_by_acclaim.is_empty() {
        return (BaseList::AcclaimList, album.tracks_by_acclaim.clone());
    }

    let mut entries: Vec<_> = album
        .ranking_consolidated
        .iter()
        .filter(|e| {
            e.track_title
                .as_deref()
                .is_some_and(|t| !normalize_title(t).is_empty())
        })
        .collect();

    if !entries.is_empty() {
        // Stable: entries without a position keep their relative order at the end
        entries.sort_by_key(|e| e.effective_position().map_or(u64::MAX, u64::from));

        let tracks = entries
            .into_iter()
            .map(|entry| {
                let title = entry.track_title.clone().unwrap_or_default();
                let id = index
                    .track_hint(&normalize_title(&title))
                    .and_then(|hint| hint.id.clone());
                Track {
                    id,
                    title: Some(title),
                    rank: entry.effective_position(),
                    ..Default::default()
                }
            })
            .collect();
        return (BaseList::Consolidated, tracks);
    }

    (BaseList::Tracks, album.tracks.clone())
}

fn enrich_track(
    base: &Track,
    position: u32,
    album: &Album,
    album_key: &str,
    index: &TitleIndex<'_>,
    ctx: &mut CurationContext,
) -> Track {
    let key = normalize_title(base.title_str());
    let input = ResolveInput {
        track: base,
        key: &key,
        index,
    };

    let canonical_rank = first_resolved(resolvers::CANONICAL_RANK, &input);
    let rating = first_resolved(resolvers::RATING, &input);
    let acclaim_score =
        first_resolved(resolvers::ACCLAIM_SCORE, &input).or(rating.map(|(value, _)| value));
    let duration = first_resolved(resolvers::DURATION, &input);
    let id = first_resolved(resolvers::ID, &input)
        .unwrap_or_else(|| format!("{}-t{}", album_key, position));

    let title = base
        .title
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| format!("Track {}", position));

    let mut track = Track {
        id: Some(id),
        title: Some(title),
        artist: base.artist.clone().or_else(|| album.artist.clone()),
        album: base.album.clone().or_else(|| album.title.clone()),
        duration,
        rating: rating.map(|(value, _)| value),
        acclaim_score,
        canonical_rank,
        rank: base.rank,
        acclaim_rank: None,
        origin_album_id: Some(album_key.to_string()),
        ranking_info: base.ranking_info.clone(),
    };

    if let Some((value, origin)) = rating {
        if let Some(source) = origin.derived_from() {
            let entry = ctx.provenance(
                format!("rating derived from {}", source.name()),
                source,
                value,
            );
            track = track.with_provenance(entry);
        }
    }

    track
}
