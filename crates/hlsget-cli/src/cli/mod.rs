//! CLI for the hlsget playlist segment fetcher.
//!
//! Flag-driven: one invocation can chain download, merge, and delete, in
//! that order. Each operation re-reads the playlist, so they stay
//! independent of each other.

use anyhow::Result;
use clap::Parser;
use hlsget_core::{config, delete, downloader, merge, playlist};
use std::path::PathBuf;

/// Downloads the media segments of an m3u8-style playlist with a pool of
/// worker threads, and optionally merges or deletes them afterwards.
#[derive(Debug, Parser)]
#[command(name = "hlsget")]
#[command(about = "hlsget: concurrent playlist segment fetcher", long_about = None)]
pub struct Cli {
    /// Playlist file listing the media segments.
    #[arg(short = 'f', long = "playlist", value_name = "FILE")]
    pub playlist: PathBuf,

    /// Download all segments into this directory.
    #[arg(short = 's', long = "save-dir", value_name = "DIR")]
    pub save_dir: Option<PathBuf>,

    /// Number of download workers (overrides the config file, default 10).
    #[arg(short = 't', long = "workers", value_name = "N")]
    pub workers: Option<usize>,

    /// Concatenate the downloaded segments into this file, in playlist order.
    #[arg(short = 'm', long = "merge", value_name = "FILE")]
    pub merge: Option<PathBuf>,

    /// Delete the downloaded segments from DIR (defaults to --save-dir).
    #[arg(short = 'd', long = "delete", value_name = "DIR", num_args = 0..=1)]
    pub delete: Option<Option<PathBuf>>,

    /// Base URL prefixed onto relative segment references.
    #[arg(short = 'u', long = "base-url", value_name = "URL")]
    pub base_url: Option<String>,
}

pub fn run_from_args() -> Result<()> {
    run(Cli::parse())
}

fn run(cli: Cli) -> Result<()> {
    let cfg = config::load_or_init()?;
    tracing::debug!("loaded config: {:?}", cfg);
    let workers = cli.workers.unwrap_or(cfg.workers);

    if let Some(save_dir) = &cli.save_dir {
        let tasks = playlist::decode(&cli.playlist, cli.base_url.as_deref())?;
        downloader::run(save_dir, tasks, workers, &cfg.user_agent)?;
    }

    if let Some(output) = &cli.merge {
        let save_dir = cli
            .save_dir
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("merging needs --save-dir to find the segments"))?;
        merge::run(&cli.playlist, save_dir, output)?;
    }

    if let Some(delete_dir) = cli.delete {
        let target = delete_dir
            .or_else(|| cli.save_dir.clone())
            .ok_or_else(|| {
                anyhow::anyhow!("a delete directory is needed (pass --delete DIR or --save-dir)")
            })?;
        delete::run(&cli.playlist, &target)?;
    }

    Ok(())
}
