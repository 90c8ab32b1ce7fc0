//! Page template fragments.
//!
//! A template directory provides three pieces: `main0.html` before the
//! cells, `cell.html` for each content/note pair, and `main1.html` after
//! the cells. Substitution is literal placeholder replacement, nothing
//! more.

use anyhow::{Context, Result};
use std::path::Path;

/// The three fragments a template directory must provide.
#[derive(Debug, Clone)]
pub struct Templates {
    /// `main0.html`, everything before the cells.
    pub prologue: String,
    /// `cell.html`, one content/note pair.
    pub cell: String,
    /// `main1.html`, everything after the cells.
    pub epilogue: String,
}

impl Templates {
    pub fn load(dir: &Path) -> Result<Templates> {
        Ok(Templates {
            prologue: read_fragment(dir, "main0.html")?,
            cell: read_fragment(dir, "cell.html")?,
            epilogue: read_fragment(dir, "main1.html")?,
        })
    }
}

fn read_fragment(dir: &Path, name: &str) -> Result<String> {
    let path = dir.join(name);
    std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read template fragment {}", path.display()))
}
