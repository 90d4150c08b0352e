//! Sequential removal of downloaded segments listed by the playlist.

use crate::playlist;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Removes every segment file referenced by the playlist from `target_dir`.
/// Files that are already gone are skipped, so running this twice is fine.
pub fn run(playlist_path: &Path, target_dir: &Path) -> Result<()> {
    let text = playlist::read_playlist(playlist_path)?;
    let mut removed = 0usize;
    for reference in playlist::media_lines(&text) {
        let path = target_dir.join(playlist::local_filename(reference));
        if path.exists() {
            fs::remove_file(&path)
                .with_context(|| format!("failed to delete {}", path.display()))?;
            tracing::info!("deleted {}", path.display());
            removed += 1;
        }
    }
    tracing::info!(
        "deleted {} segment file(s) from {}",
        removed,
        target_dir.display()
    );
    Ok(())
}
