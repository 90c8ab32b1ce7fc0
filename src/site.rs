//! Conversion orchestration for the `build` subcommand.
//!
//! A run owns the shared anchor-ID and numbering generators so both stay
//! continuous across every document of one output page, and resets them
//! between independent output targets in posts mode.

use crate::cli::BuildArgs;
use crate::config::Configuration;
use crate::highlight::Highlighter;
use crate::markup::{AnchorIds, NoNumbers, Numbering, OutlineNumbers};
use crate::sinks::{HtmlSink, HtmlSinkBuilder};
use crate::source::{self, Document};
use anyhow::{Context, Result};
use globset::{Glob, GlobMatcher};
use indicatif::{ProgressBar, ProgressStyle};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// Number of separator-delimited sections each post keeps on the index page.
const PREVIEW_SECTIONS: usize = 2;

/// Length of the numeric sort prefix (digits plus separator) stripped from
/// post file names when deriving their page paths.
const SORT_PREFIX_LEN: usize = 5;

/// Run the `build` subcommand.
pub fn build(args: BuildArgs) -> Result<()> {
    let mut configuration = Configuration::load()?;
    if let Some(output) = args.output {
        configuration.paths.output = output;
    }
    if let Some(input) = args.input {
        configuration.paths.input = input;
    }
    if let Some(template) = args.template {
        configuration.paths.template = template;
    }
    if let Some(title) = args.title {
        configuration.site.title = title;
    }
    if let Some(desc) = args.desc {
        configuration.site.description = desc;
    }
    if args.no_number {
        configuration.numbering = false;
    }

    let exclude = compile_globs(&configuration.exclude)?;
    let documents = source::discover(
        &configuration.paths.input,
        args.md,
        args.reverse,
        &exclude,
    )?;

    let numbers: Box<dyn Numbering> = if configuration.numbering {
        Box::new(OutlineNumbers::default())
    } else {
        Box::new(NoNumbers)
    };

    let mut site = Site {
        markdown_mode: args.md,
        all_headers: args.all_headers_in_toc,
        ids: AnchorIds::default(),
        numbers,
        highlighter: Highlighter::new(configuration.theme),
        configuration,
    };

    match &args.posts {
        Some(posts_dir) => site.convert_posts(documents, posts_dir),
        None => site.convert(documents),
    }
}

/// One conversion run over a discovered document set.
struct Site {
    configuration: Configuration,
    markdown_mode: bool,
    all_headers: bool,
    ids: AnchorIds,
    numbers: Box<dyn Numbering>,
    highlighter: Highlighter,
}

impl Site {
    /// Render the whole document set into the single configured output page.
    fn convert(&mut self, documents: Vec<Document>) -> Result<()> {
        let sink = self.sink(self.configuration.paths.output.clone(), self.all_headers)?;
        sink.render(
            &documents,
            &mut self.ids,
            self.numbers.as_mut(),
            &self.highlighter,
        )?;

        println!("Wrote {}", self.configuration.paths.output.display());
        Ok(())
    }

    /// Posts mode: a truncated index page, then one full page per post.
    fn convert_posts(&mut self, mut documents: Vec<Document>, posts_dir: &str) -> Result<()> {
        let extension = if self.markdown_mode {
            source::MARKDOWN_EXT
        } else {
            source::DOCBOX_EXT
        };

        for document in &mut documents {
            document.limit = Some(PREVIEW_SECTIONS);
            document.read_more = post_page_path(posts_dir, document.path(), extension);
        }

        let index = self.sink(self.configuration.paths.output.clone(), self.all_headers)?;
        index.render(
            &documents,
            &mut self.ids,
            self.numbers.as_mut(),
            &self.highlighter,
        )?;

        let parent = self
            .configuration
            .paths
            .output
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();

        let progress = ProgressBar::new(documents.len() as u64);
        progress.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .expect("can parse progress style")
                .progress_chars("#>-"),
        );
        progress.set_message("Rendering posts...");

        for document in &mut documents {
            document.limit = None;
            let target = parent.join(&document.read_more);

            // each post page is an independent target: fresh anchors and
            // numbering, every header level in its ToC
            self.ids.reset();
            self.numbers.reset();
            let sink = self.sink(target, true)?;
            sink.render(
                std::slice::from_ref(document),
                &mut self.ids,
                self.numbers.as_mut(),
                &self.highlighter,
            )?;
            progress.inc(1);
        }
        progress.finish_and_clear();

        println!(
            "Wrote {} and {} post pages",
            self.configuration.paths.output.display(),
            documents.len()
        );
        Ok(())
    }

    fn sink(&self, target: PathBuf, all_headers: bool) -> Result<HtmlSink> {
        HtmlSinkBuilder::default()
            .target(target)
            .template_dir(self.configuration.paths.template.clone())
            .minifier(self.configuration.minifier.clone())
            .title(html_escape::encode_text(&self.configuration.site.title).into_owned())
            .description(
                html_escape::encode_text(&self.configuration.site.description).into_owned(),
            )
            .all_headers(all_headers)
            .build()
            .with_context(|| "Failed to build HTML sink")
    }
}

fn compile_globs(patterns: &[String]) -> Result<Vec<GlobMatcher>> {
    patterns
        .iter()
        .map(|pattern| {
            Ok(Glob::new(pattern)
                .with_context(|| format!("Failed to parse exclude glob `{pattern}`"))?
                .compile_matcher())
        })
        .collect()
}

/// Derive a post's page path from its source file name: the numeric sort
/// prefix goes, the markup extension becomes `.html`, and separators are
/// normalized to forward slashes.
fn post_page_path(posts_dir: &str, source_path: &Path, extension: &str) -> String {
    let name = source_path
        .file_name()
        .and_then(OsStr::to_str)
        .unwrap_or_default();
    let name = name.get(SORT_PREFIX_LEN..).unwrap_or(name);
    let stem = name
        .strip_suffix(&format!(".{extension}"))
        .unwrap_or(name);

    Path::new(posts_dir)
        .join(format!("{stem}.html"))
        .to_string_lossy()
        .replace('\\', "/")
}
