mod document;
pub use document::*;

pub mod history;

use anyhow::{Context, Result};
use globset::GlobMatcher;
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

/// Markup file extension in native mode.
pub const DOCBOX_EXT: &str = "docbox";
/// Markup file extension in markdown-compatibility mode.
pub const MARKDOWN_EXT: &str = "md";

/// Discover markup files in the input directory, in publication order.
///
/// Post files carry a 4-digit numeric sort prefix (`0042-some-post.docbox`);
/// `reverse` lists the newest first. Files matching an exclude glob are
/// skipped.
pub fn discover(
    input: &Path,
    markdown_mode: bool,
    reverse: bool,
    exclude: &[GlobMatcher],
) -> Result<Vec<Document>> {
    let extension = if markdown_mode { MARKDOWN_EXT } else { DOCBOX_EXT };

    let mut paths: Vec<PathBuf> = Vec::new();
    for entry in WalkBuilder::new(input).max_depth(Some(1)).build() {
        let entry = entry
            .with_context(|| format!("Failed to walk input directory {}", input.display()))?;
        let path = entry.into_path();

        if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some(extension) {
            continue;
        }
        if exclude.iter().any(|glob| glob.is_match(&path)) {
            continue;
        }
        paths.push(path);
    }

    paths.sort_by_key(|path| sort_prefix(path));
    if reverse {
        paths.reverse();
    }

    Ok(paths
        .into_iter()
        .map(|path| Document::from_path(path, markdown_mode))
        .collect())
}

/// The numeric publication prefix of a file name (`0042-…` → 42).
///
/// A file without a parseable prefix sorts first instead of failing.
fn sort_prefix(path: &Path) -> i64 {
    path.file_name()
        .and_then(|name| name.to_str())
        .and_then(|name| name.get(..4))
        .and_then(|prefix| prefix.parse().ok())
        .unwrap_or(0)
}
