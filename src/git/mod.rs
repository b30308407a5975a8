//! Git integration layer
//!
//! Provides the candidate file lists a plan is built from, using git2.
//! All paths are repository-relative and `/`-separated.

use crate::error::Result;
use git2::{Repository, Status, StatusEntry, StatusOptions};
use std::path::Path;

/// Git operations handler
pub struct GitRepo {
    repo: Repository,
}

impl GitRepo {
    /// Discover and open the repository containing `path`
    pub fn discover<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Repository::discover(path)?;
        tracing::debug!("Opened git repository at {}", repo.path().display());
        Ok(Self { repo })
    }

    /// Working directory root, if the repository is not bare
    pub fn workdir(&self) -> Option<&Path> {
        self.repo.workdir()
    }

    /// Files staged for commit, excluding deletions. Renamed files are
    /// reported under their new path.
    pub fn staged_files(&self) -> Result<Vec<String>> {
        let mut opts = StatusOptions::new();
        opts.include_untracked(false);
        opts.include_ignored(false);
        opts.renames_head_to_index(true);

        let statuses = self.repo.statuses(Some(&mut opts))?;
        let staged = Status::INDEX_NEW
            | Status::INDEX_MODIFIED
            | Status::INDEX_RENAMED
            | Status::INDEX_TYPECHANGE;

        let mut files = Vec::new();
        for entry in statuses.iter() {
            if !entry.status().intersects(staged) {
                continue;
            }
            match staged_path(&entry) {
                Some(path) => files.push(path),
                None => tracing::debug!("Skipping staged entry with a non UTF-8 path"),
            }
        }

        files.sort();
        Ok(files)
    }

    /// Every file tracked in the index
    pub fn all_files(&self) -> Result<Vec<String>> {
        let index = self.repo.index()?;
        let mut files = Vec::with_capacity(index.len());

        for entry in index.iter() {
            match String::from_utf8(entry.path) {
                Ok(path) => files.push(path),
                Err(_) => tracing::debug!("Skipping index entry with a non UTF-8 path"),
            }
        }

        Ok(files)
    }
}

/// Index-side path of a status entry
fn staged_path(entry: &StatusEntry<'_>) -> Option<String> {
    if entry.status().contains(Status::INDEX_RENAMED) {
        let delta = entry.head_to_index()?;
        let path = delta.new_file().path()?;
        return path.to_str().map(|p| p.replace('\\', "/"));
    }
    entry.path().map(str::to_string)
}
