//! End-to-end curation tests
//!
//! Properties that must hold for every run (no track lost, hits contract,
//! protected hits) plus the reference scenarios.

mod helpers;

use chrono::{TimeZone, Utc};
use helpers::{album, placed_ids, placement_map, playlist_ids, ranked_track, track, uniform_album};
use std::collections::HashMap;
use uuid::Uuid;
use wkmp_pc::allocate::hits::{fill_hits_playlist, seed_hits};
use wkmp_pc::models::album::{ReconciledAlbum, SourceDeclaration};
use wkmp_pc::reconcile::reconcile_album;
use wkmp_pc::{
    curate, curate_with_context, Album, CurationContext, CurationOptions, CurationResult,
    StopReason, Track,
};

fn options(target_seconds: u64) -> CurationOptions {
    CurationOptions {
        target_seconds,
        ..Default::default()
    }
}

fn mixed_library() -> Vec<Album> {
    vec![
        uniform_album("a", 8, 240),
        uniform_album("b", 5, 300),
        Album {
            title: Some("Untitled Demos".to_string()),
            tracks: vec![
                Track {
                    duration: Some(200),
                    ..Default::default()
                },
                Track {
                    title: Some("Demo 2".to_string()),
                    duration: Some(410),
                    ..Default::default()
                },
                Track::default(),
            ],
            ..Default::default()
        },
        album("single", vec![track("single-1", 333)]),
        album("empty", vec![]),
    ]
}

#[test]
fn test_no_track_is_lost_or_duplicated() {
    let albums = mixed_library();
    let result = curate(&albums, &options(900)).unwrap();

    let mut ctx = CurationContext::new();
    let mut expected: Vec<String> = albums
        .iter()
        .enumerate()
        .flat_map(|(i, a)| {
            let key = wkmp_pc::curator::album_key(a, i + 1);
            reconcile_album(a, &key, &mut ctx)
        })
        .map(|t| t.id_str().to_string())
        .collect();
    expected.sort();

    assert_eq!(expected.len(), 17);
    assert_eq!(placed_ids(&result), expected);
}

#[test]
fn test_hits_contract_holds_after_balancing() {
    let result = curate(&mixed_library(), &options(900)).unwrap();

    for (key, summary) in &result.ranking_summary {
        for placement in &summary.tracks {
            match placement.acclaim_rank {
                Some(1) => assert_eq!(placement.playlist_id, "p1", "rank 1 of {}", key),
                Some(2) => assert_eq!(placement.playlist_id, "p2", "rank 2 of {}", key),
                _ => {}
            }
        }
    }

    // One rank-1 track per non-empty album, one rank-2 per album with 2+ tracks
    let p1_seeds = result.playlists[0]
        .tracks
        .iter()
        .filter(|t| t.acclaim_rank == Some(1))
        .count();
    let p2_seeds = result.playlists[1]
        .tracks
        .iter()
        .filter(|t| t.acclaim_rank == Some(2))
        .count();
    assert_eq!(p1_seeds, 4);
    assert_eq!(p2_seeds, 3);
}

#[test]
fn test_playlist_layout() {
    let result = curate(&mixed_library(), &options(900)).unwrap();

    assert_eq!(result.playlists[0].title, "Greatest Hits Vol. 1");
    assert_eq!(result.playlists[1].title, "Greatest Hits Vol. 2");
    for (i, playlist) in result.playlists.iter().enumerate().skip(2) {
        assert_eq!(playlist.id, format!("p{}", i + 1));
        assert_eq!(playlist.title, format!("Deep Cuts Vol. {}", i - 1));
    }
    for playlist in &result.playlists {
        assert!(playlist.subtitle.starts_with(&format!("{} tracks · ", playlist.tracks.len())));
    }
    assert!(result.balance.iterations <= 100);
}

#[test]
fn test_scenario_low_ranks_only_fill() {
    let alb1 = album(
        "alb1",
        vec![
            ranked_track("r1", 1, 60),
            ranked_track("r2", 2, 60),
            ranked_track("r3", 3, 60),
            ranked_track("r10", 10, 60),
            ranked_track("r9", 9, 60),
        ],
    );
    let result = curate(&[alb1], &options(180)).unwrap();
    let placements = placement_map(&result);

    assert_eq!(placements["r1"], "p1");
    assert_eq!(placements["r2"], "p2");
    assert_eq!(playlist_ids(&result, "p1"), vec!["r1", "r3", "r9"]);
    assert_eq!(playlist_ids(&result, "p2"), vec!["r2", "r10"]);

    for playlist in &result.playlists {
        for t in &playlist.tracks {
            if t.id_str() == "r9" || t.id_str() == "r10" {
                assert!(t.acclaim_rank.unwrap() > 2);
                assert!(t
                    .ranking_info
                    .iter()
                    .any(|e| e.reason == "fill: worse-ranked" && e.score == 0.35));
                assert!(!t.ranking_info.iter().any(|e| e.reason.starts_with("hit:")));
            }
        }
    }
}

#[test]
fn test_scenario_deep_cuts_spread_across_albums() {
    let albums = vec![
        album(
            "A",
            vec![
                ranked_track("a1", 1, 100),
                ranked_track("a2", 2, 100),
                ranked_track("a3", 3, 150),
            ],
        ),
        album(
            "B",
            vec![
                ranked_track("b1", 1, 100),
                ranked_track("b2", 2, 100),
                ranked_track("b3", 3, 150),
            ],
        ),
    ];
    let result = curate(&albums, &options(100)).unwrap();
    let placements = placement_map(&result);

    // 300s left over at T=100 gives three deep-cut playlists for two tracks
    assert_eq!(result.playlists.len(), 5);
    assert_eq!(placements["a3"], "p3");
    assert_eq!(placements["b3"], "p4");
    assert!(playlist_ids(&result, "p5").is_empty());
}

/// Deep-cut playlists (`p3..`) of a result
fn deep_cuts(result: &CurationResult) -> &[wkmp_pc::Playlist] {
    &result.playlists[2..]
}

#[test]
fn test_single_album_deep_cuts_fill_every_playlist() {
    let result = curate(&[uniform_album("a", 12, 300)], &options(900)).unwrap();

    assert_eq!(playlist_ids(&result, "p1"), vec!["a-1", "a-3", "a-4"]);
    assert_eq!(playlist_ids(&result, "p2"), vec!["a-2", "a-5", "a-6"]);
    assert_eq!(deep_cuts(&result).len(), 2);
    assert_eq!(playlist_ids(&result, "p3"), vec!["a-7", "a-9", "a-11"]);
    assert_eq!(playlist_ids(&result, "p4"), vec!["a-8", "a-10", "a-12"]);

    assert_eq!(result.balance.stop_reason, StopReason::Balanced);
    assert_eq!(result.balance.swaps, 0);
}

#[test]
fn test_two_albums_interleave_over_four_deep_cut_playlists() {
    let albums = vec![uniform_album("a", 8, 300), uniform_album("b", 8, 300)];
    let result = curate(&albums, &options(900)).unwrap();

    assert_eq!(deep_cuts(&result).len(), 4);
    assert_eq!(playlist_ids(&result, "p3"), vec!["a-4", "b-7"]);
    assert_eq!(playlist_ids(&result, "p4"), vec!["b-4", "a-6"]);
    assert_eq!(playlist_ids(&result, "p5"), vec!["a-5", "b-6", "a-8"]);
    assert_eq!(playlist_ids(&result, "p6"), vec!["b-5", "a-7", "b-8"]);
    assert_eq!(result.balance.stop_reason, StopReason::Balanced);
}

#[test]
fn test_deep_cuts_spread_albums_across_playlists() {
    // Uniform durations leave the balancer nothing to improve, so the dealt
    // order is the final order
    let albums = vec![
        uniform_album("a", 9, 300),
        uniform_album("b", 6, 300),
        uniform_album("c", 4, 300),
    ];
    let result = curate(&albums, &options(1200)).unwrap();
    assert_eq!(result.balance.swaps, 0);

    let deep = deep_cuts(&result);
    let pool_size: usize = deep.iter().map(|p| p.tracks.len()).sum();
    assert_eq!(deep.len(), 3);
    assert!(pool_size >= deep.len());
    for playlist in deep {
        assert!(!playlist.tracks.is_empty(), "{} left empty", playlist.id);
    }

    // Deal position of each deep cut within its album
    let mut by_album: HashMap<String, Vec<u32>> = HashMap::new();
    for t in deep.iter().flat_map(|p| p.tracks.iter()) {
        by_album
            .entry(t.origin_album_id.clone().unwrap())
            .or_default()
            .push(t.acclaim_rank.unwrap());
    }
    for ranks in by_album.values_mut() {
        ranks.sort_unstable();
    }

    // Same-album neighbours only once every other album has run out
    for playlist in deep {
        for pair in playlist.tracks.windows(2) {
            if !pair[0].shares_album_with(&pair[1]) {
                continue;
            }
            let album_id = pair[1].origin_album_id.as_deref().unwrap();
            let ranks = &by_album[album_id];
            let position = ranks
                .iter()
                .position(|&r| Some(r) == pair[1].acclaim_rank)
                .unwrap();
            for (other, other_ranks) in &by_album {
                if other != album_id {
                    assert!(
                        other_ranks.len() <= position,
                        "{} repeats {} in {} while {} still had tracks",
                        pair[1].id_str(),
                        album_id,
                        playlist.id,
                        other
                    );
                }
            }
        }
    }
}

#[test]
fn test_scenario_zero_durations_exit_at_once() {
    let albums = vec![uniform_album("a", 4, 0), uniform_album("b", 3, 0)];
    let result = curate(&albums, &CurationOptions::default()).unwrap();

    assert_eq!(result.balance.iterations, 0);
    assert_eq!(result.balance.swaps, 0);
    assert_eq!(result.balance.stop_reason, StopReason::NothingToBalance);
    assert_eq!(placed_ids(&result).len(), 7);
}

#[test]
fn test_empty_input() {
    let result = curate(&[], &CurationOptions::default()).unwrap();

    assert_eq!(result.playlists.len(), 2);
    assert_eq!(result.playlists[0].id, "p1");
    assert_eq!(result.playlists[1].id, "p2");
    assert!(result.playlists.iter().all(|p| p.tracks.is_empty()));
    assert!(result.ranking_summary.is_empty());
    assert!(result.ranking_sources.is_empty());
}

#[test]
fn test_hits_filled_to_target_or_pool_exhausted() {
    let mut ctx = CurationContext::new();
    let albums: Vec<ReconciledAlbum> = [uniform_album("a", 6, 200), uniform_album("b", 3, 250)]
        .iter()
        .map(|a| {
            let key = a.id.clone().unwrap();
            let tracks = reconcile_album(a, &key, &mut ctx);
            ReconciledAlbum { key, tracks }
        })
        .collect();

    let mut seed = seed_hits(&albums, &mut ctx);
    fill_hits_playlist(&mut seed.hits_1, &mut seed.remaining, 1000, &mut ctx);
    fill_hits_playlist(&mut seed.hits_2, &mut seed.remaining, 1000, &mut ctx);

    assert!(seed.hits_1.duration() >= 1000);
    assert!(seed.hits_2.duration() >= 1000 || seed.remaining.is_empty());
}

#[test]
fn test_sources_and_summary() {
    let mut first = uniform_album("a", 4, 200);
    first.ranking_sources = vec![SourceDeclaration::Name("Rolling Stone".to_string())];
    let result = curate(&[first], &options(300)).unwrap();

    let names: Vec<&str> = result.ranking_sources.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Rolling Stone", "Hybrid Algorithm"]);

    let summary = &result.ranking_summary["a"];
    assert_eq!(summary.title, "Album a");
    assert_eq!(summary.artist, "Artist a");
    assert_eq!(summary.tracks.len(), 4);
    assert!(summary.sources.contains("Rolling Stone"));
    assert!(summary.sources.contains("Hybrid Algorithm"));
}

#[test]
fn test_fixed_clock_gives_identical_output() {
    let run_id = Uuid::new_v4();
    let started = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
    let albums = mixed_library();

    let first = curate_with_context(
        &albums,
        &options(900),
        CurationContext::with_clock(run_id, started),
    )
    .unwrap();
    let second = curate_with_context(
        &albums,
        &options(900),
        CurationContext::with_clock(run_id, started),
    )
    .unwrap();

    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
    let json = serde_json::to_value(&first).unwrap();
    assert_eq!(json["generatedAt"], "2024-05-01T12:00:00Z");
}

#[test]
fn test_caller_albums_untouched() {
    let albums = mixed_library();
    let before = albums.clone();
    let _ = curate(&albums, &options(600)).unwrap();
    assert_eq!(albums, before);
}
