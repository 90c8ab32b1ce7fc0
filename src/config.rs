//! `docbox.toml` configuration.
//!
//! Every field has a default, so a missing file means a fully default
//! configuration and a partial file only overrides what it mentions. The
//! `build` subcommand's flags win over whatever the file provides.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

pub const CONFIG_FILE: &str = "docbox.toml";

/// Site metadata substituted into the page templates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Page title, replacing `$TITLE$`.
    pub title: String,
    /// Page description, replacing `$DESCRIPTION$`.
    pub description: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        SiteConfig {
            title: "DocBox Site".to_string(),
            description: "A documentation site generated by docbox".to_string(),
        }
    }
}

/// Where input is read from and output is written to.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Directory of markup files.
    pub input: PathBuf,
    /// Directory containing `main0.html`, `cell.html`, and `main1.html`.
    pub template: PathBuf,
    /// Output HTML file.
    pub output: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        PathsConfig {
            input: PathBuf::from("posts"),
            template: PathBuf::from("template"),
            output: PathBuf::from("docs/index.html"),
        }
    }
}

/// Syntax highlighting theme for fenced code blocks.
///
/// Serde names match the keys of syntect's bundled theme set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SyntaxTheme {
    #[default]
    #[serde(rename = "base16-ocean.dark")]
    OceanDark,
    #[serde(rename = "base16-eighties.dark")]
    EightiesDark,
    #[serde(rename = "base16-mocha.dark")]
    MochaDark,
    #[serde(rename = "base16-ocean.light")]
    OceanLight,
    #[serde(rename = "InspiredGitHub")]
    InspiredGitHub,
    #[serde(rename = "Solarized (dark)")]
    SolarizedDark,
    #[serde(rename = "Solarized (light)")]
    SolarizedLight,
}

impl fmt::Display for SyntaxTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl SyntaxTheme {
    /// The theme's key in syntect's bundled [`ThemeSet`](syntect::highlighting::ThemeSet).
    pub fn key(&self) -> &'static str {
        match self {
            SyntaxTheme::OceanDark => "base16-ocean.dark",
            SyntaxTheme::EightiesDark => "base16-eighties.dark",
            SyntaxTheme::MochaDark => "base16-mocha.dark",
            SyntaxTheme::OceanLight => "base16-ocean.light",
            SyntaxTheme::InspiredGitHub => "InspiredGitHub",
            SyntaxTheme::SolarizedDark => "Solarized (dark)",
            SyntaxTheme::SolarizedLight => "Solarized (light)",
        }
    }

    pub fn all() -> &'static [SyntaxTheme] {
        &[
            SyntaxTheme::OceanDark,
            SyntaxTheme::EightiesDark,
            SyntaxTheme::MochaDark,
            SyntaxTheme::OceanLight,
            SyntaxTheme::InspiredGitHub,
            SyntaxTheme::SolarizedDark,
            SyntaxTheme::SolarizedLight,
        ]
    }
}

/// Complete configuration for a docbox site.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Configuration {
    pub site: SiteConfig,
    pub paths: PathsConfig,

    /// Syntax highlighting theme.
    pub theme: SyntaxTheme,

    /// Glob patterns dropped during input discovery.
    pub exclude: Vec<String>,

    /// Shell command run on every written page, with `$OUT$` replaced by
    /// the page path. An empty string disables minification.
    pub minifier: String,

    /// Put outline numbers in headings.
    pub numbering: bool,
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration {
            site: SiteConfig::default(),
            paths: PathsConfig::default(),
            theme: SyntaxTheme::default(),
            exclude: Vec::new(),
            minifier: default_minifier_command(),
            numbering: true,
        }
    }
}

impl Configuration {
    /// Load `docbox.toml` from the working directory, falling back to the
    /// defaults when the file doesn't exist.
    pub fn load() -> Result<Configuration> {
        match std::fs::read_to_string(CONFIG_FILE) {
            Ok(contents) => {
                toml::from_str(&contents).with_context(|| format!("Failed to parse {CONFIG_FILE}"))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Configuration::default()),
            Err(e) => Err(e).with_context(|| format!("Failed to read {CONFIG_FILE}")),
        }
    }
}

pub fn default_minifier_command() -> String {
    "html-minifier --collapse-whitespace --remove-comments --remove-optional-tags \
     --remove-redundant-attributes --remove-script-type-attributes \
     --remove-tag-whitespace --use-short-doctype \
     --minify-css true --minify-js true -o \"$OUT$\" \"$OUT$\""
        .to_string()
}
