//! Interactive configuration wizard for creating `docbox.toml`.
//!
//! The wizard collects site metadata, paths, and the highlighting theme
//! through a series of prompts, writes `docbox.toml` to the current
//! directory, and can scaffold the three template fragments a fresh site
//! needs.

use crate::config::{Configuration, SyntaxTheme, CONFIG_FILE};
use anyhow::{Context, Result};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, FuzzySelect, Input};
use globset::Glob;
use std::path::{Path, PathBuf};

/// Run the interactive configuration wizard.
pub fn run() -> Result<()> {
    let theme = ColorfulTheme {
        ..ColorfulTheme::default()
    };
    let mut configuration = Configuration::default();

    configuration.site.title = Input::with_theme(&theme)
        .with_prompt("Site title")
        .default(configuration.site.title.clone())
        .interact()
        .with_context(|| "Failed to obtain title")?;

    configuration.site.description = Input::with_theme(&theme)
        .with_prompt("Site description")
        .default(configuration.site.description.clone())
        .interact()
        .with_context(|| "Failed to obtain description")?;

    let input_dir: String = Input::with_theme(&theme)
        .with_prompt("Input directory of markup files")
        .default(configuration.paths.input.display().to_string())
        .interact()
        .with_context(|| "Failed to obtain input directory")?;
    configuration.paths.input = PathBuf::from(input_dir);

    let template_dir: String = Input::with_theme(&theme)
        .with_prompt("Template directory")
        .default(configuration.paths.template.display().to_string())
        .interact()
        .with_context(|| "Failed to obtain template directory")?;
    configuration.paths.template = PathBuf::from(template_dir);

    let output_file: String = Input::with_theme(&theme)
        .with_prompt("Output file")
        .default(configuration.paths.output.display().to_string())
        .interact()
        .with_context(|| "Failed to obtain output file")?;
    configuration.paths.output = PathBuf::from(output_file);

    let themes = SyntaxTheme::all();
    let selected = FuzzySelect::with_theme(&theme)
        .with_prompt("Syntax highlighting theme")
        .items(themes)
        .default(0)
        .interact()
        .with_context(|| "Failed to obtain syntax theme")?;
    configuration.theme = themes[selected];

    configuration.numbering = Confirm::with_theme(&theme)
        .with_prompt("Number headings?")
        .default(true)
        .interact()
        .with_context(|| "Failed to obtain numbering choice")?;

    if Confirm::with_theme(&theme)
        .with_prompt("Do you wish to exclude some input files by glob?")
        .default(false)
        .interact()?
    {
        'exclude: loop {
            if !configuration.exclude.is_empty() {
                println!("Excluded globs: [{}]", configuration.exclude.join("], ["));
            }
            let glob: String = Input::with_theme(&theme)
                .with_prompt("Glob syntax of files you want to exclude (leave blank for done)")
                .allow_empty(true)
                .interact()?;
            if glob.trim().is_empty() {
                break 'exclude;
            }

            // validate before keeping the pattern
            Glob::new(&glob).with_context(|| "Failed to parse glob!")?;
            configuration.exclude.push(glob);
        }
    }

    let contents =
        toml::to_string_pretty(&configuration).with_context(|| "Failed to serialize configuration")?;
    std::fs::write(CONFIG_FILE, contents)
        .with_context(|| format!("Failed to write {CONFIG_FILE}"))?;
    println!("Wrote {CONFIG_FILE}");

    if Confirm::with_theme(&theme)
        .with_prompt("Create default template files?")
        .default(true)
        .interact()?
    {
        scaffold_templates(&configuration.paths.template)?;
        println!("Wrote templates to {}", configuration.paths.template.display());
    }

    Ok(())
}

/// Write the three default template fragments into the template directory.
fn scaffold_templates(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create template directory {}", dir.display()))?;

    for (name, contents) in [
        ("main0.html", default_prologue_template()),
        ("cell.html", default_cell_template()),
        ("main1.html", default_epilogue_template()),
    ] {
        let path = dir.join(name);
        std::fs::write(&path, contents)
            .with_context(|| format!("Failed to write template {}", path.display()))?;
    }
    Ok(())
}

pub fn default_prologue_template() -> String {
    r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8" />
<meta name="viewport" content="width=device-width, initial-scale=1" />
<meta name="description" content="$DESCRIPTION$" />
<title>$TITLE$</title>
<style>
body { margin: 0; font-family: sans-serif; display: flex; }
nav.toc { flex: 0 0 14rem; padding: 1rem; }
main { flex: 1; }
div.cell { display: flex; border-bottom: 1px solid #ccc; }
div.cell .content { flex: 2; padding: 1rem; }
div.cell .note { flex: 1; padding: 1rem; font-size: 0.9em; color: #555; }
span.timestamp { font-size: 0.8em; color: #888; }
a.read-more { font-weight: bold; }
$STYLES$
</style>
</head>
<body>
<nav class="toc">
$TOC$
</nav>
<main>
"#
    .to_string()
}

pub fn default_cell_template() -> String {
    r#"<div class="cell">
<div class="content">
$CONTENT$
</div>
<div class="note">
$NOTE$
</div>
</div>
"#
    .to_string()
}

pub fn default_epilogue_template() -> String {
    r#"</main>
</body>
</html>
"#
    .to_string()
}
