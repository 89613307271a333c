//! End-to-end versioning pipeline
//!
//! Reproduces the single-invocation control flow: narrow releases to the
//! component, derive the change window, classify and filter the window's
//! commits, decide the next version and, unless this is a dry run or a
//! no-op, ask the release store to create the release.

use crate::changelog::ChangelogBuilder;
use crate::domain::{Component, NewRelease, Version};
use crate::error::{Result, VersioningError};
use crate::filter;
use crate::resolver::{VersionDecision, VersionResolver};
use crate::store::{CommitStore, ReleaseStore};
use crate::window::ChangeWindow;

/// Immutable per-invocation configuration for the engine
///
/// Bundles what would otherwise be loose parameters; stores are injected
/// separately so the pipeline stays a pure function of its inputs.
#[derive(Debug, Clone)]
pub struct ReleaseContext {
    pub component: Component,
    /// Branch or ref being released
    pub branch: String,
    /// Default branch; anything else produces prerelease versions
    pub default_branch: String,
    /// Full hash of the commit being released
    pub revision: String,
}

/// What one engine run decided and did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    pub decision: VersionDecision,
    /// True when the target branch is not the default branch
    pub prerelease_branch: bool,
    /// The release candidate, present unless the decision was no-change.
    /// On a dry run it is computed but not created.
    pub release: Option<NewRelease>,
    /// The resolved commit window, for reporting
    pub window: ChangeWindow,
    /// Commits fetched in the window, before scope filtering
    pub commits_considered: usize,
    /// Records left after classification and scope filtering
    pub matching_records: usize,
    /// Tag of the latest prior release for the component, if any
    pub previous_release_tag: Option<String>,
}

impl RunOutcome {
    /// Whether a new version was decided
    pub fn created(&self) -> bool {
        self.decision.version().is_some()
    }

    /// Canonical version string of the decision, if any
    pub fn version_string(&self) -> Option<String> {
        self.decision.version().map(|v| v.to_string())
    }

    /// Whether the decided version carries a prerelease label
    pub fn is_prerelease(&self) -> bool {
        self.decision
            .version()
            .map(Version::is_prerelease)
            .unwrap_or(false)
    }
}

/// Run the full version-resolution pipeline for one component
///
/// Any store failure, malformed version string or short revision aborts the
/// run; release creation is the only side effect and happens last.
pub fn generate_version(
    ctx: &ReleaseContext,
    release_store: &dyn ReleaseStore,
    commit_store: &dyn CommitStore,
    dry_run: bool,
) -> Result<RunOutcome> {
    let component_releases =
        filter::releases_for_component(&ctx.component, release_store.list_releases()?);

    let (prior_version, first_release) = match component_releases.first() {
        None => (
            Version::parse(&ctx.component.initial_version)?,
            true,
        ),
        Some(latest) => {
            let version_part = ctx.component.strip_tag_prefix(&latest.tag).ok_or_else(|| {
                VersioningError::version(format!(
                    "Release tag '{}' does not carry the component prefix",
                    latest.tag
                ))
            })?;
            (Version::parse(version_part)?, false)
        }
    };

    let previous_change = match component_releases.first() {
        Some(latest) => Some(commit_store.commit_timestamp(&latest.target_commit)?),
        None => None,
    };
    let current_change = commit_store.commit_timestamp(&ctx.revision)?;
    let window = ChangeWindow::resolve(previous_change, current_change);

    let commits = commit_store.list_commits(&ctx.branch, window.since, window.until)?;
    let records = filter::classify_for_scope(&ctx.component, &commits);

    let resolver = VersionResolver::new(
        ctx.branch.as_str(),
        ctx.default_branch.as_str(),
        ctx.revision.as_str(),
    );
    let decision = resolver.resolve(&prior_version, first_release, &records)?;

    let mut outcome = RunOutcome {
        decision: decision.clone(),
        prerelease_branch: resolver.is_prerelease_branch(),
        release: None,
        window,
        commits_considered: commits.len(),
        matching_records: records.len(),
        previous_release_tag: component_releases.first().map(|r| r.tag.clone()),
    };

    let version = match decision.version() {
        Some(version) => version,
        None => return Ok(outcome),
    };

    // The changelog is rendered from the full window, not the filtered
    // records; the builder applies its own scope filtering.
    let body = ChangelogBuilder::new(ctx.component.clone()).build(&commits);

    let release = NewRelease {
        tag: ctx.component.tag_for_version(version),
        title: ctx.component.release_title(version),
        target_commit: ctx.revision.clone(),
        body,
        prerelease: outcome.prerelease_branch,
    };

    if !dry_run {
        release_store.create_release(&release)?;
    }

    outcome.release = Some(release);
    Ok(outcome)
}
