//! Store abstraction layer
//!
//! The engine never talks to a forge or a repository directly; it consumes
//! already-fetched releases and commits through these traits. Implementations:
//!
//! - [git::GitStore]: local repository backend using the `git2` crate, with
//!   tags standing in for releases
//! - [mock::MockStore]: in-memory implementation for tests
//!
//! Implementations are expected to paginate transparently where the backing
//! API pages its results; callers always see complete lists.

pub mod git;
pub mod mock;

pub use git::GitStore;
pub use mock::MockStore;

use chrono::{DateTime, Utc};

use crate::domain::{Commit, NewRelease, Release};
use crate::error::Result;

/// Read and create component releases
///
/// All methods return [crate::error::Result]; any store failure aborts the
/// whole run, there are no retries and no partial recovery.
pub trait ReleaseStore: Send + Sync {
    /// List every release in the repository, across all components
    fn list_releases(&self) -> Result<Vec<Release>>;

    /// Create a release record
    ///
    /// This is the single side-effecting step of a run and only happens
    /// after a successful version decision.
    fn create_release(&self, release: &NewRelease) -> Result<()>;
}

/// Read commits and commit metadata
pub trait CommitStore: Send + Sync {
    /// List commits on a branch within `[since, until)`
    ///
    /// The upper bound is exclusive; callers widen it themselves when the
    /// boundary commit must be included.
    fn list_commits(
        &self,
        branch: &str,
        since: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> Result<Vec<Commit>>;

    /// Committer timestamp of a single revision
    fn commit_timestamp(&self, revision: &str) -> Result<DateTime<Utc>>;
}
