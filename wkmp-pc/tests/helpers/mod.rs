//! Test Helper Utilities
//!
//! Album and track builders shared by the wkmp-pc integration tests

#![allow(dead_code)]

use std::collections::HashMap;
use wkmp_pc::{Album, CurationResult, Track};

/// Track with id, title and duration
pub fn track(id: &str, duration: u32) -> Track {
    Track {
        id: Some(id.to_string()),
        title: Some(id.to_string()),
        duration: Some(duration),
        ..Default::default()
    }
}

/// Track with an explicit caller-supplied rank
pub fn ranked_track(id: &str, rank: u32, duration: u32) -> Track {
    Track {
        rank: Some(rank),
        ..track(id, duration)
    }
}

/// Track with an explicit rating
pub fn rated_track(id: &str, rating: f64, duration: u32) -> Track {
    Track {
        rating: Some(rating),
        ..track(id, duration)
    }
}

/// Album with an id and a plain track list
pub fn album(id: &str, tracks: Vec<Track>) -> Album {
    Album {
        id: Some(id.to_string()),
        title: Some(format!("Album {}", id)),
        artist: Some(format!("Artist {}", id)),
        tracks,
        ..Default::default()
    }
}

/// Album whose tracks are `<id>-1..<id>-n`, ranked in order, all `duration` long
pub fn uniform_album(id: &str, count: u32, duration: u32) -> Album {
    let tracks = (1..=count)
        .map(|i| ranked_track(&format!("{}-{}", id, i), i, duration))
        .collect();
    album(id, tracks)
}

/// Sorted ids of every track in every playlist
pub fn placed_ids(result: &CurationResult) -> Vec<String> {
    let mut ids: Vec<String> = result
        .playlists
        .iter()
        .flat_map(|p| p.tracks.iter().map(|t| t.id_str().to_string()))
        .collect();
    ids.sort();
    ids
}

/// Track id -> playlist id
pub fn placement_map(result: &CurationResult) -> HashMap<String, String> {
    result
        .playlists
        .iter()
        .flat_map(|p| {
            p.tracks
                .iter()
                .map(move |t| (t.id_str().to_string(), p.id.clone()))
        })
        .collect()
}

/// Ids of the tracks in playlist `playlist_id`
pub fn playlist_ids(result: &CurationResult, playlist_id: &str) -> Vec<String> {
    result
        .playlists
        .iter()
        .find(|p| p.id == playlist_id)
        .map(|p| p.tracks.iter().map(|t| t.id_str().to_string()).collect())
        .unwrap_or_default()
}
