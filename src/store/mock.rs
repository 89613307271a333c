use std::sync::Mutex;

use chrono::{DateTime, Utc};

use crate::domain::{Commit, NewRelease, Release};
use crate::error::{Result, VersioningError};
use crate::store::{CommitStore, ReleaseStore};

/// In-memory store for testing without a repository or network
///
/// Implements both store traits. Created releases are captured so tests can
/// assert on what the engine asked to publish.
#[derive(Default)]
pub struct MockStore {
    releases: Vec<Release>,
    commits: Vec<Commit>,
    created: Mutex<Vec<NewRelease>>,
    fail_listing: bool,
}

impl MockStore {
    /// Create a new empty mock store
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an existing release
    pub fn add_release(&mut self, release: Release) {
        self.releases.push(release);
    }

    /// Add a commit to the branch history
    pub fn add_commit(&mut self, commit: Commit) {
        self.commits.push(commit);
    }

    /// Make every listing call fail, to exercise fatal store errors
    pub fn fail_listing(&mut self) {
        self.fail_listing = true;
    }

    /// Releases the engine asked to create, in order
    pub fn created_releases(&self) -> Vec<NewRelease> {
        self.created.lock().unwrap().clone()
    }
}

impl ReleaseStore for MockStore {
    fn list_releases(&self) -> Result<Vec<Release>> {
        if self.fail_listing {
            return Err(VersioningError::store("mock listing failure"));
        }
        Ok(self.releases.clone())
    }

    fn create_release(&self, release: &NewRelease) -> Result<()> {
        self.created.lock().unwrap().push(release.clone());
        Ok(())
    }
}

impl CommitStore for MockStore {
    fn list_commits(
        &self,
        _branch: &str,
        since: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> Result<Vec<Commit>> {
        if self.fail_listing {
            return Err(VersioningError::store("mock listing failure"));
        }

        Ok(self
            .commits
            .iter()
            .filter(|c| c.timestamp >= since && c.timestamp < until)
            .cloned()
            .collect())
    }

    fn commit_timestamp(&self, revision: &str) -> Result<DateTime<Utc>> {
        self.commits
            .iter()
            .find(|c| c.sha == revision)
            .map(|c| c.timestamp)
            .ok_or_else(|| VersioningError::store(format!("Unknown revision: {}", revision)))
    }
}
