//! HTML page generation.
//!
//! This module converts a set of documents into one two-column HTML page:
//! - Tokenized documents are folded into content/note cells
//! - Cells and the collected table of contents are substituted into the
//!   template fragments by literal placeholder replacement
//! - The written page is handed to the external minifier
//!
//! One sink renders exactly one output file; posts mode builds several
//! sinks, one for the index and one per post page.

pub mod assemble;
mod minify;
mod templates;

pub use assemble::{Assembly, Cell, TocEntry};
pub use templates::Templates;

use crate::highlight::Highlighter;
use crate::markup::{AnchorIds, Numbering};
use crate::source::Document;
use anyhow::{Context, Result};
use derive_builder::Builder;
use std::path::PathBuf;

/// Renders a document set into one HTML page.
#[derive(Builder, Debug)]
#[builder(setter(into))]
pub struct HtmlSink {
    /// Output file path.
    target: PathBuf,
    /// Directory holding `main0.html`, `cell.html`, and `main1.html`.
    template_dir: PathBuf,
    /// Shell command template run on the written page; `$OUT$` is replaced
    /// with the target path.
    minifier: String,
    /// Page title, already HTML-escaped.
    title: String,
    /// Page description, already HTML-escaped.
    description: String,
    /// Include every header level in the TOC instead of just level 1.
    #[builder(default)]
    all_headers: bool,
    /// Append the created/modified line after each document's first header.
    #[builder(default = "true")]
    include_meta: bool,
}

impl HtmlSink {
    /// Assemble the documents, write the page, and minify it.
    pub fn render(
        &self,
        documents: &[Document],
        ids: &mut AnchorIds,
        numbers: &mut dyn Numbering,
        highlighter: &Highlighter,
    ) -> Result<()> {
        let templates = Templates::load(&self.template_dir)?;
        let assembly = assemble::assemble(
            documents,
            ids,
            numbers,
            highlighter,
            self.all_headers,
            self.include_meta,
        )?;
        let styles = highlighter.style_defs()?;

        let mut page = String::new();
        page.push_str(&self.fill(&templates.prologue, &assembly.toc, &styles));
        for cell in &assembly.cells {
            page.push_str(
                &templates
                    .cell
                    .replace("$CONTENT$", &cell.content)
                    .replace("$NOTE$", &cell.note),
            );
        }
        page.push_str(&self.fill(&templates.epilogue, &assembly.toc, &styles));

        if let Some(parent) = self.target.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create output directory {}", parent.display())
                })?;
            }
        }
        std::fs::write(&self.target, page)
            .with_context(|| format!("Failed to write {}", self.target.display()))?;

        minify::run(&self.minifier, &self.target)
    }

    fn fill(&self, template: &str, toc: &str, styles: &str) -> String {
        template
            .replace("$TITLE$", &self.title)
            .replace("$DESCRIPTION$", &self.description)
            .replace("$TOC$", toc)
            .replace("$STYLES$", styles)
    }
}
