use crate::highlight::Highlighter;
use crate::markup::{tokenize, AnchorIds, Numbering, Token};
use crate::source::history;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// One markup source: a file on disk, or an inline text buffer.
#[derive(Debug, Clone)]
pub struct Document {
    path: PathBuf,
    text: Option<String>,
    markdown_mode: bool,

    /// Number of separator-delimited sections to keep before inserting the
    /// read-more break. `None` renders the whole document.
    pub limit: Option<usize>,

    /// Relative target of the read-more link, set in posts mode.
    pub read_more: String,
}

impl Document {
    pub fn from_path<P: Into<PathBuf>>(path: P, markdown_mode: bool) -> Document {
        Document {
            path: path.into(),
            text: None,
            markdown_mode,
            limit: None,
            read_more: String::new(),
        }
    }

    /// A document backed by an in-memory buffer instead of a file.
    pub fn from_text<S: ToString>(text: S, markdown_mode: bool) -> Document {
        Document {
            path: PathBuf::from("-"),
            text: Some(text.to_string()),
            markdown_mode,
            limit: None,
            read_more: String::new(),
        }
    }

    pub fn path(&self) -> &Path {
        self.path.as_path()
    }

    /// Break the document into tokens.
    ///
    /// `ids` and `numbers` are shared across all documents of a render
    /// target so anchors and numbering stay continuous between files.
    pub fn tokenize(
        &self,
        ids: &mut AnchorIds,
        numbers: &mut dyn Numbering,
        highlighter: &Highlighter,
    ) -> Result<Vec<Token>> {
        let lines = self.lines()?;
        tokenize(&lines, self.limit, &self.read_more, ids, numbers, highlighter)
    }

    /// Created and last-modified ISO dates from the file's git history.
    ///
    /// Inline documents have no history and report today for both.
    pub fn created_modified(&self) -> (String, String) {
        if self.text.is_some() {
            let today = history::today();
            return (today.clone(), today);
        }
        history::of(&self.path)
    }

    /// The document's lines, wrapped in separators in markdown mode so an
    /// otherwise separator-free prose file still forms one cell.
    fn lines(&self) -> Result<Vec<String>> {
        let contents = match &self.text {
            Some(text) => text.clone(),
            None => std::fs::read_to_string(&self.path)
                .with_context(|| format!("Failed to read {}", self.path.display()))?,
        };

        let mut lines: Vec<String> = Vec::new();
        if self.markdown_mode {
            lines.push("---".to_string());
        }
        lines.extend(contents.lines().map(str::to_string));
        if self.markdown_mode {
            lines.push("---".to_string());
        }
        Ok(lines)
    }
}
