use chrono::{DateTime, TimeZone, Utc};
use git2::{ObjectType, Repository as Git2Repo};
use std::path::Path;

use crate::domain::{Commit, NewRelease, Release};
use crate::error::{Result, VersioningError};
use crate::store::{CommitStore, ReleaseStore};

/// Local-repository store backend
///
/// Maps the release model onto git tags: a release is a tag named
/// "component-version", its body is the tag message, its publish time the
/// tagger time (or the tagged commit's time for lightweight tags).
pub struct GitStore {
    repo: Git2Repo,
    commit_url_base: Option<String>,
}

impl GitStore {
    /// Open or discover a repository at the given path
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;
        let commit_url_base = commit_url_base(&repo);

        Ok(GitStore {
            repo,
            commit_url_base,
        })
    }

    /// Create from an existing git2 repository handle
    pub fn from_git2(repo: Git2Repo) -> Self {
        let commit_url_base = commit_url_base(&repo);
        GitStore {
            repo,
            commit_url_base,
        }
    }

    fn commit_url(&self, sha: &str) -> String {
        match &self.commit_url_base {
            Some(base) => format!("{}/commit/{}", base, sha),
            None => String::new(),
        }
    }
}

impl ReleaseStore for GitStore {
    fn list_releases(&self) -> Result<Vec<Release>> {
        let tag_names = self.repo.tag_names(None)?;
        let mut releases = Vec::new();

        for name in tag_names.iter().flatten() {
            let reference = self.repo.find_reference(&format!("refs/tags/{}", name))?;
            let commit = reference.peel_to_commit().map_err(|e| {
                VersioningError::store(format!("Cannot peel tag '{}': {}", name, e))
            })?;

            // Annotated tags carry a tagger and a message; lightweight tags
            // fall back to the tagged commit's metadata
            let release = match reference.peel_to_tag() {
                Ok(tag) => {
                    let published_at = tag
                        .tagger()
                        .map(|sig| git_time_to_utc(sig.when()))
                        .unwrap_or_else(|| git_time_to_utc(commit.committer().when()));

                    Release {
                        tag: name.to_string(),
                        published_at,
                        target_commit: commit.id().to_string(),
                        title: name.to_string(),
                        body: tag.message().unwrap_or("").to_string(),
                    }
                }
                Err(_) => Release {
                    tag: name.to_string(),
                    published_at: git_time_to_utc(commit.committer().when()),
                    target_commit: commit.id().to_string(),
                    title: name.to_string(),
                    body: String::new(),
                },
            };

            releases.push(release);
        }

        Ok(releases)
    }

    fn create_release(&self, release: &NewRelease) -> Result<()> {
        let object = self
            .repo
            .revparse_single(&release.target_commit)
            .map_err(|e| {
                VersioningError::store(format!(
                    "Cannot resolve target commit '{}': {}",
                    release.target_commit, e
                ))
            })?;

        let signature = self.repo.signature()?;
        let message = format!("{}\n{}", release.title, release.body);

        self.repo
            .tag(&release.tag, &object, &signature, &message, false)
            .map_err(|e| {
                VersioningError::store(format!("Cannot create tag '{}': {}", release.tag, e))
            })?;

        Ok(())
    }
}

impl CommitStore for GitStore {
    fn list_commits(
        &self,
        branch: &str,
        since: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> Result<Vec<Commit>> {
        let branch_ref = self
            .repo
            .find_branch(branch, git2::BranchType::Local)
            .map_err(|e| {
                VersioningError::store(format!("Cannot find branch '{}': {}", branch, e))
            })?;

        let head = branch_ref.get().target().ok_or_else(|| {
            VersioningError::store(format!("Branch '{}' has no target", branch))
        })?;

        let mut revwalk = self.repo.revwalk()?;
        revwalk.push(head)?;

        let mut commits = Vec::new();
        for oid_result in revwalk {
            let oid = oid_result?;
            let commit = self.repo.find_commit(oid)?;
            let timestamp = git_time_to_utc(commit.committer().when());

            if timestamp < since || timestamp >= until {
                continue;
            }

            commits.push(Commit {
                sha: oid.to_string(),
                author: commit.author().name().unwrap_or("").to_string(),
                message: commit.message().unwrap_or("").to_string(),
                timestamp,
                url: self.commit_url(&oid.to_string()),
            });
        }

        Ok(commits)
    }

    fn commit_timestamp(&self, revision: &str) -> Result<DateTime<Utc>> {
        let commit = self
            .repo
            .revparse_single(revision)
            .and_then(|object| object.peel(ObjectType::Commit))
            .map_err(|e| {
                VersioningError::store(format!("Cannot resolve revision '{}': {}", revision, e))
            })?
            .into_commit()
            .map_err(|_| {
                VersioningError::store(format!("Revision '{}' is not a commit", revision))
            })?;

        let timestamp = git_time_to_utc(commit.committer().when());
        Ok(timestamp)
    }
}

// SAFETY: GitStore only exposes read paths and tag creation, both of which
// libgit2 guards internally; the wrapped Repository is never handed out.
unsafe impl Sync for GitStore {}

fn git_time_to_utc(time: git2::Time) -> DateTime<Utc> {
    Utc.timestamp_opt(time.seconds(), 0)
        .single()
        .unwrap_or_else(|| Utc.timestamp_opt(0, 0).unwrap())
}

/// Derive a browsable base URL from the origin remote, when one exists
///
/// Handles "https://host/owner/repo(.git)" and "git@host:owner/repo(.git)".
/// Anything else yields no URL and changelog entries fall back to bare links.
fn commit_url_base(repo: &Git2Repo) -> Option<String> {
    let remote = repo.find_remote("origin").ok()?;
    let url = remote.url()?;

    let base = if let Some(rest) = url.strip_prefix("git@") {
        let (host, path) = rest.split_once(':')?;
        format!("https://{}/{}", host, path)
    } else if url.starts_with("https://") || url.starts_with("http://") {
        url.to_string()
    } else {
        return None;
    };

    Some(base.trim_end_matches('/').trim_end_matches(".git").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_git_store_open_outside_repo_fails_gracefully() {
        let result = GitStore::open("/nonexistent/path");
        assert!(result.is_err());
    }

    #[test]
    fn test_git_time_conversion() {
        let time = git2::Time::new(1_700_000_000, 0);
        assert_eq!(git_time_to_utc(time).timestamp(), 1_700_000_000);
    }
}
