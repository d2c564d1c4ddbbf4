use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

/// Read a newline-delimited URL list.
///
/// Only the line terminator is stripped; no whitespace trimming, no
/// well-formedness check. Embedded blank lines are returned as empty strings,
/// a file-final newline produces no extra entry.
pub fn read_url_list(path: &Path) -> Result<Vec<String>> {
    info!(action = "start", component = "url_list", path = ?path, "Reading URL list");

    if !path.exists() {
        anyhow::bail!("URL list not found: {:?}", path);
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read URL list {:?}", path))?;
    let urls: Vec<String> = content.lines().map(str::to_string).collect();

    info!(
        action = "complete",
        component = "url_list",
        url_count = urls.len(),
        "URL list read"
    );
    Ok(urls)
}
