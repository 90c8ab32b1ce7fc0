//! External HTML minifier invocation.
//!
//! The minifier runs as a shell command against the freshly written page.
//! A failing minifier aborts the render target; nothing else about the
//! page is validated.

use anyhow::{bail, Context, Result};
use std::path::Path;
use std::process::Command;

/// Run the minifier command template against the target file.
///
/// `$OUT$` in the template is replaced with the target path. An empty
/// template disables minification.
pub fn run(command_template: &str, target: &Path) -> Result<()> {
    if command_template.trim().is_empty() {
        return Ok(());
    }

    let command = command_template.replace("$OUT$", &target.display().to_string());
    let status = shell(&command)
        .status()
        .with_context(|| format!("Failed to start minifier for {}", target.display()))?;

    if !status.success() {
        bail!(
            "Minifier `{command}` exited with {status} while minifying {}",
            target.display()
        );
    }
    Ok(())
}

#[cfg(not(windows))]
fn shell(command: &str) -> Command {
    let mut shell = Command::new("sh");
    shell.arg("-c").arg(command);
    shell
}

#[cfg(windows)]
fn shell(command: &str) -> Command {
    let mut shell = Command::new("cmd");
    shell.arg("/C").arg(command);
    shell
}
