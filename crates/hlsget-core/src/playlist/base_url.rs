//! Base URL resolution from the first media reference.

use anyhow::Result;

/// Schemes a reference can carry and be fetched as-is.
const ABSOLUTE_SCHEMES: [&str; 4] = ["http", "https", "ftp", "file"];

/// Whether `reference` is already a fetchable absolute URL.
fn is_absolute_reference(reference: &str) -> bool {
    match url::Url::parse(reference) {
        Ok(parsed) => ABSOLUTE_SCHEMES.contains(&parsed.scheme()),
        Err(_) => false,
    }
}

/// Decides the URL prefix applied to every reference in the playlist.
///
/// The first media reference is the probe: if it is an absolute URL the
/// prefix is empty and references are self-sufficient; otherwise `base_url`
/// is required and is normalized to end with `/`.
pub fn resolve_prefix(first_reference: &str, base_url: Option<&str>) -> Result<String> {
    if is_absolute_reference(first_reference) {
        return Ok(String::new());
    }
    match base_url {
        Some(base) if !base.is_empty() => {
            if base.ends_with('/') {
                Ok(base.to_string())
            } else {
                Ok(format!("{}/", base))
            }
        }
        _ => anyhow::bail!("playlist references are relative, a base URL is needed"),
    }
}
