//! Created/modified dates from git history.
//!
//! A document's timestamps come from the commits that change its file,
//! walking HEAD's history the way `git log --date=short -- <file>` does.
//! A file with no history at all (untracked, or not inside a repository)
//! is not an error: it reports today's date for both created and modified.

use chrono::{DateTime, Local, Utc};
use git2::Repository;
use std::path::{Path, PathBuf};

/// Created and last-modified ISO dates for a file.
pub fn of(path: &Path) -> (String, String) {
    match commit_dates(path) {
        Some(dates) => dates,
        None => {
            let today = today();
            (today.clone(), today)
        }
    }
}

/// Today's date in ISO format, the fallback for history-less files.
pub fn today() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}

fn commit_dates(path: &Path) -> Option<(String, String)> {
    let repo = Repository::discover(path.parent()?).ok()?;
    let workdir = repo.workdir()?.canonicalize().ok()?;
    let rel: PathBuf = path
        .canonicalize()
        .ok()?
        .strip_prefix(&workdir)
        .ok()?
        .to_path_buf();

    let mut walk = repo.revwalk().ok()?;
    walk.push_head().ok()?;
    walk.set_sorting(git2::Sort::TIME).ok()?;

    let mut times: Vec<i64> = Vec::new();
    for oid in walk {
        let oid = oid.ok()?;
        let commit = repo.find_commit(oid).ok()?;
        let blob = blob_id(&commit, &rel);

        // a commit touches the file when its blob differs from the first
        // parent's, matching default (simplified) git log history
        let touched = match commit.parent_count() {
            0 => blob.is_some(),
            _ => blob != blob_id(&commit.parent(0).ok()?, &rel),
        };
        if touched {
            times.push(commit.time().seconds());
        }
    }

    let newest = *times.iter().max()?;
    let oldest = *times.iter().min()?;
    Some((iso_date(oldest)?, iso_date(newest)?))
}

fn blob_id(commit: &git2::Commit, rel: &Path) -> Option<git2::Oid> {
    commit.tree().ok()?.get_path(rel).ok().map(|entry| entry.id())
}

fn iso_date(seconds: i64) -> Option<String> {
    DateTime::<Utc>::from_timestamp(seconds, 0).map(|date| date.format("%Y-%m-%d").to_string())
}
