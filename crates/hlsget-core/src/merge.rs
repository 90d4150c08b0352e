//! Sequential concatenation of downloaded segments into one file.
//!
//! Merge re-reads the playlist and appends each segment in file order; the
//! total order is the reason this is single-threaded, unlike download.

use crate::playlist;
use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Concatenates every segment referenced by the playlist, in playlist order,
/// into `output`. A missing segment file aborts the whole merge; whatever
/// was already appended stays flushed on disk.
pub fn run(playlist_path: &Path, save_dir: &Path, output: &Path) -> Result<()> {
    let text = playlist::read_playlist(playlist_path)?;

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        if !parent.exists() {
            tracing::info!("output dir {} does not exist, creating it", parent.display());
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create output dir {}", parent.display()))?;
        }
    }
    if output.exists() && !output.is_file() {
        anyhow::bail!("merge output {} exists and is not a file", output.display());
    }

    let mut writer = BufWriter::new(
        File::create(output).with_context(|| format!("failed to create {}", output.display()))?,
    );
    for reference in playlist::media_lines(&text) {
        let path = save_dir.join(playlist::local_filename(reference));
        if !path.exists() {
            // Keep what was already appended readable before aborting.
            let _ = writer.flush();
            anyhow::bail!("segment {} does not exist, merge aborted", path.display());
        }
        let mut segment =
            File::open(&path).with_context(|| format!("failed to open {}", path.display()))?;
        io::copy(&mut segment, &mut writer)
            .with_context(|| format!("failed to append {}", path.display()))?;
        tracing::debug!("appended {}", path.display());
    }
    writer.flush().context("failed to flush merge output")?;
    tracing::info!("merged playlist into {}", output.display());
    Ok(())
}
