//! Playlist decoding: directive lines filtered, references resolved against
//! the base URL, tasks materialized up front.

mod base_url;

pub use base_url::resolve_prefix;

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// One segment to download: resolved URL, local filename, and 1-based
/// position in the playlist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentTask {
    pub url: String,
    pub filename: String,
    pub index: usize,
}

/// Media reference lines of a playlist: trimmed, non-empty, non-`#`, in file
/// order. Download, merge, and delete all re-read the playlist through this,
/// so edits between operations are visible.
pub fn media_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
}

/// Local filename for a reference: everything from the first `?` is stripped.
pub fn local_filename(reference: &str) -> &str {
    reference.split('?').next().unwrap_or(reference)
}

/// Reads the playlist file, failing if it is missing or not a regular file.
pub fn read_playlist(playlist: &Path) -> Result<String> {
    if !playlist.exists() {
        anyhow::bail!("playlist {} does not exist", playlist.display());
    }
    if !playlist.is_file() {
        anyhow::bail!("playlist {} is not a file", playlist.display());
    }
    fs::read_to_string(playlist)
        .with_context(|| format!("failed to read playlist {}", playlist.display()))
}

/// Decodes the playlist into download tasks.
///
/// The first media reference decides URL resolution for the whole playlist:
/// an absolute URL means every reference is used verbatim, otherwise
/// `base_url` (required) is normalized to end in `/` and prefixed onto each
/// reference.
pub fn decode(playlist: &Path, base_url: Option<&str>) -> Result<Vec<SegmentTask>> {
    let text = read_playlist(playlist)?;
    let prefix = match media_lines(&text).next() {
        Some(first) => resolve_prefix(first, base_url)?,
        None => String::new(),
    };
    Ok(media_lines(&text)
        .enumerate()
        .map(|(i, reference)| SegmentTask {
            url: format!("{}{}", prefix, reference),
            filename: local_filename(reference).to_string(),
            index: i + 1,
        })
        .collect())
}
