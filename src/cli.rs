use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Output file
    #[clap(short, long)]
    pub output: Option<PathBuf>,

    /// Input directory of markup files
    #[clap(long)]
    pub input: Option<PathBuf>,

    /// Use a different template directory
    #[clap(long)]
    pub template: Option<PathBuf>,

    /// Set a title
    #[clap(long)]
    pub title: Option<String>,

    /// Set a description
    #[clap(long)]
    pub desc: Option<String>,

    /// Convert input files in reverse order
    #[clap(short, long)]
    pub reverse: bool,

    /// Do not put numbers in titles
    #[clap(long)]
    pub no_number: bool,

    /// Include all levels of headers in the ToC, not just level 1 headers
    #[clap(long)]
    pub all_headers_in_toc: bool,

    /// Posts mode: write a truncated index plus one full page per input
    /// file under this directory
    #[clap(long)]
    pub posts: Option<String>,

    /// Convert .md files instead of .docbox files
    #[clap(long)]
    pub md: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generates a docbox.toml config file and template scaffolding
    Init,
    /// Converts the input directory into HTML pages
    Build(BuildArgs),
}

#[derive(Parser, Debug)]
#[clap(author, version, about)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}
