//! wkmp-pc (Playlist Curator) command-line tool
//!
//! Reads enriched album records, curates them into Greatest Hits and Deep
//! Cuts playlists and writes the result as JSON.
//!
//! **Usage:**
//! ```bash
//! wkmp-pc --input albums.json [--output result.json] [--target-minutes 45] [--summary]
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use wkmp_pc::config::{self, OptionOverrides};
use wkmp_pc::curate;
use wkmp_pc::report::{self, CliFormatter};

/// Playlist curator
#[derive(Parser, Debug)]
#[clap(name = "wkmp-pc", version)]
#[clap(about = "Curate albums into duration-balanced Greatest Hits and Deep Cuts playlists")]
struct Args {
    /// Album records (JSON array, or object with an `albums` array)
    #[clap(short, long, value_name = "FILE")]
    input: PathBuf,

    /// Write the result here instead of stdout
    #[clap(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Target playlist length in minutes
    #[clap(long, conflicts_with = "target_seconds")]
    target_minutes: Option<u64>,

    /// Target playlist length in seconds
    #[clap(long)]
    target_seconds: Option<u64>,

    /// Accepted deviation from the target when balancing (seconds)
    #[clap(long)]
    tolerance_seconds: Option<u64>,

    /// Maximum balancer iterations
    #[clap(long)]
    max_swap_iterations: Option<u32>,

    /// TOML config file (default: <config dir>/wkmp/wkmp-pc.toml)
    #[clap(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Also print the per-album placement summary
    #[clap(long)]
    summary: bool,

    /// Suppress the playlist report on stderr
    #[clap(short, long)]
    quiet: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[clap(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn overrides(&self) -> OptionOverrides {
        OptionOverrides {
            target_seconds: self
                .target_seconds
                .or(self.target_minutes.map(|m| m.saturating_mul(60))),
            tolerance_seconds: self.tolerance_seconds,
            max_swap_iterations: self.max_swap_iterations,
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Config is loaded before logging so its level can seed the filter
    let file_config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            init_logging(&args, None);
            error!("{}", e);
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    init_logging(&args, Some(&file_config.logging.level));

    match run(&args, &file_config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args, file_config: &config::CuratorToml) -> Result<()> {
    info!(
        "Starting WKMP Playlist Curator (wkmp-pc) v{}",
        env!("CARGO_PKG_VERSION")
    );

    let options = config::resolve_options(&args.overrides(), &file_config.curation)
        .context("Invalid curation options")?;

    let albums = report::read_albums(&args.input)
        .with_context(|| format!("Failed to read albums from {}", args.input.display()))?;

    let result = curate(&albums, &options)?;

    match &args.output {
        Some(path) => report::write_result_json(&result, path)
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => {
            let json = serde_json::to_string_pretty(&result)?;
            println!("{}", json);
        }
    }

    if !args.quiet {
        eprint!("{}", CliFormatter::format_playlists(&result));
        if args.summary {
            eprint!("{}", CliFormatter::format_summary(&result.ranking_summary));
        }
    }

    Ok(())
}

/// Log to stderr so stdout stays clean JSON
///
/// RUST_LOG wins; otherwise -v flags, then the config file level.
fn init_logging(args: &Args, config_level: Option<&str>) {
    let filter = match args.verbose {
        0 => config_level.unwrap_or("warn"),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
