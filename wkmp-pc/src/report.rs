//! Album input, result export and CLI formatting

use crate::curator::CurationResult;
use crate::error::Result;
use crate::models::album::Album;
use crate::summary::RankingSummary;
use serde::Deserialize;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::{debug, info};
use wkmp_common::human_time::{format_duration, format_offset};

/// Accepted shapes of the album input document
#[derive(Deserialize)]
#[serde(untagged)]
enum AlbumDocument {
    List(Vec<Album>),
    Wrapped { albums: Vec<Album> },
}

/// Parse albums from a JSON string: a bare array or `{"albums": [...]}`
pub fn parse_albums(json: &str) -> Result<Vec<Album>> {
    let document: AlbumDocument = serde_json::from_str(json)?;
    Ok(match document {
        AlbumDocument::List(albums) | AlbumDocument::Wrapped { albums } => albums,
    })
}

/// Read albums from a JSON file
pub fn read_albums(path: &Path) -> Result<Vec<Album>> {
    let albums = parse_albums(&fs::read_to_string(path)?)?;
    debug!("Read {} albums from {}", albums.len(), path.display());
    Ok(albums)
}

/// Write the result as pretty JSON
///
/// Writes to a sibling temp file and renames it over `output_path`, so an
/// interrupted run never leaves a truncated result behind.
pub fn write_result_json(result: &CurationResult, output_path: &Path) -> Result<()> {
    let temp_path = output_path.with_extension("json.tmp");

    {
        let mut writer = BufWriter::new(File::create(&temp_path)?);
        serde_json::to_writer_pretty(&mut writer, result)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
    }

    if let Err(e) = fs::rename(&temp_path, output_path) {
        let _ = fs::remove_file(&temp_path);
        return Err(e.into());
    }

    info!(
        "Wrote {} playlists to {}",
        result.playlists.len(),
        output_path.display()
    );
    Ok(())
}

/// Plain-text rendering of a curation result
pub struct CliFormatter;

impl CliFormatter {
    /// One line per playlist: title, track count, duration, offset from target
    pub fn format_playlists(result: &CurationResult) -> String {
        let mut output = String::new();
        let target = result.target_seconds as i64;

        output.push_str(&format!(
            "\nPlaylists (target {}):\n",
            format_duration(result.target_seconds)
        ));
        for playlist in &result.playlists {
            let duration = playlist.duration();
            output.push_str(&format!(
                "  {:<4} {:<24} {:>4} tracks  {:>8}  ({})\n",
                playlist.id,
                playlist.title,
                playlist.tracks.len(),
                format_duration(duration),
                format_offset(duration as i64 - target)
            ));
        }

        let balance = &result.balance;
        output.push_str(&format!(
            "\nBalancing: {:?} after {} iterations, {} swaps, spread {}{}\n",
            balance.stop_reason,
            balance.iterations,
            balance.swaps,
            format_duration(balance.spread_seconds),
            if balance.converged {
                ""
            } else {
                " (outside tolerance)"
            }
        ));

        output
    }

    /// Per-album placement rollup
    pub fn format_summary(summary: &RankingSummary) -> String {
        let mut output = String::new();

        for album in summary.values() {
            output.push_str(&format!(
                "\n{} - {} [{}]\n",
                album.artist, album.title, album.album_id
            ));
            for placement in &album.tracks {
                let rank = placement
                    .acclaim_rank
                    .map(|r| format!("#{}", r))
                    .unwrap_or_else(|| "#-".to_string());
                output.push_str(&format!(
                    "  {:>4} {:<32} {:>6} -> {}\n",
                    rank,
                    placement.title,
                    format_duration(placement.duration),
                    placement.playlist_title
                ));
            }
            if !album.sources.is_empty() {
                let sources: Vec<&str> = album.sources.iter().map(String::as_str).collect();
                output.push_str(&format!("  sources: {}\n", sources.join(", ")));
            }
        }

        output
    }
}
