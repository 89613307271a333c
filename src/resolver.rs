//! Version bump decision engine
//!
//! Given the previously released version (or the configured initial version)
//! and the scope-filtered commit records since that release, decides whether
//! a new version is warranted and what it is.

use crate::domain::{ParsedCommit, Version, VersionBump};
use crate::error::Result;

/// Outcome of one version resolution
///
/// Computed fresh each invocation; the engine holds no state between runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionDecision {
    /// No relevant changes; no release should be created
    NoChange,
    /// A release should be created with this version
    Release {
        version: Version,
        /// True when no prior release existed for the component
        first_release: bool,
    },
}

impl VersionDecision {
    /// The decided version, if any
    pub fn version(&self) -> Option<&Version> {
        match self {
            VersionDecision::Release { version, .. } => Some(version),
            VersionDecision::NoChange => None,
        }
    }
}

/// Resolves the next version for one branch/revision pair
#[derive(Debug, Clone)]
pub struct VersionResolver {
    branch: String,
    default_branch: String,
    revision: String,
}

impl VersionResolver {
    pub fn new(
        branch: impl Into<String>,
        default_branch: impl Into<String>,
        revision: impl Into<String>,
    ) -> Self {
        VersionResolver {
            branch: branch.into(),
            default_branch: default_branch.into(),
            revision: revision.into(),
        }
    }

    /// Decide the next version
    ///
    /// On a first release the configured initial version is used as-is and
    /// commit content is not examined. Otherwise the records are scanned for
    /// the highest-priority bump (MAJOR > MINOR > PATCH); with no qualifying
    /// record the decision is [VersionDecision::NoChange].
    ///
    /// Off the default branch the decided version receives a prerelease
    /// label derived from the revision hash; a revision shorter than 7
    /// characters is an error.
    pub fn resolve(
        &self,
        prior_version: &Version,
        first_release: bool,
        records: &[ParsedCommit],
    ) -> Result<VersionDecision> {
        if first_release {
            let version = self.apply_branch_prerelease(prior_version.clone())?;
            return Ok(VersionDecision::Release {
                version,
                first_release: true,
            });
        }

        let bump = match scan_for_bump(records) {
            Some(bump) => bump,
            None => return Ok(VersionDecision::NoChange),
        };

        let version = self.apply_branch_prerelease(prior_version.bump(&bump))?;
        Ok(VersionDecision::Release {
            version,
            first_release: false,
        })
    }

    /// Whether this resolution targets a non-default branch
    pub fn is_prerelease_branch(&self) -> bool {
        // Exact, case-sensitive comparison
        self.branch != self.default_branch
    }

    fn apply_branch_prerelease(&self, version: Version) -> Result<Version> {
        if self.is_prerelease_branch() {
            version.with_revision_prerelease(&self.revision)
        } else {
            Ok(version)
        }
    }
}

/// Single pass over the records to find the highest-priority bump
///
/// A breaking record short-circuits the scan: nothing can outrank MAJOR.
/// Feature and fix presence are tracked independently to the end. Commit
/// types other than feat/fix never trigger a version on their own.
fn scan_for_bump(records: &[ParsedCommit]) -> Option<VersionBump> {
    let mut has_feature = false;
    let mut has_fix = false;

    for record in records {
        if record.breaking {
            return Some(VersionBump::Major);
        }

        if record.is_feature() {
            has_feature = true;
        }

        if record.is_fix() {
            has_fix = true;
        }
    }

    if has_feature {
        Some(VersionBump::Minor)
    } else if has_fix {
        Some(VersionBump::Patch)
    } else {
        None
    }
}
