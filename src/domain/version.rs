use crate::error::{Result, VersioningError};
use std::cmp::Ordering;
use std::fmt;

/// Shortest revision hash that can serve as a prerelease label
pub const SHORT_REVISION_LEN: usize = 7;

/// Semantic version representation with optional prerelease label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub prerelease: Option<String>,
}

impl Version {
    /// Create a new version without a prerelease label
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Version {
            major,
            minor,
            patch,
            prerelease: None,
        }
    }

    /// Parse a version string (e.g., "1.2.3" or "1.2.4-abcdef1")
    ///
    /// Parsing is all-or-nothing: a malformed string is an error, never a
    /// partially filled version.
    pub fn parse(input: &str) -> Result<Self> {
        let (core, prerelease) = match input.split_once('-') {
            Some((core, pre)) => (core, Some(pre)),
            None => (input, None),
        };

        if let Some(pre) = prerelease {
            if pre.is_empty() {
                return Err(VersioningError::version(format!(
                    "Empty prerelease label in '{}'",
                    input
                )));
            }
        }

        let parts: Vec<&str> = core.split('.').collect();
        if parts.len() != 3 {
            return Err(VersioningError::version(format!(
                "Invalid version format: '{}' - expected X.Y.Z",
                input
            )));
        }

        let major = parts[0].parse::<u64>().map_err(|_| {
            VersioningError::version(format!("Invalid major version: {}", parts[0]))
        })?;
        let minor = parts[1].parse::<u64>().map_err(|_| {
            VersioningError::version(format!("Invalid minor version: {}", parts[1]))
        })?;
        let patch = parts[2].parse::<u64>().map_err(|_| {
            VersioningError::version(format!("Invalid patch version: {}", parts[2]))
        })?;

        Ok(Version {
            major,
            minor,
            patch,
            prerelease: prerelease.map(|p| p.to_string()),
        })
    }

    /// Bump version according to bump type, dropping any prerelease label
    pub fn bump(&self, bump_type: &VersionBump) -> Self {
        match bump_type {
            VersionBump::Major => Version::new(self.major + 1, 0, 0),
            VersionBump::Minor => Version::new(self.major, self.minor + 1, 0),
            VersionBump::Patch => Version::new(self.major, self.minor, self.patch + 1),
        }
    }

    /// Return this version with a prerelease label derived from a revision hash
    ///
    /// The label is the first 7 characters of the revision. Revisions shorter
    /// than that cannot produce a stable label and are rejected.
    pub fn with_revision_prerelease(&self, revision: &str) -> Result<Self> {
        if revision.chars().count() < SHORT_REVISION_LEN {
            return Err(VersioningError::revision(format!(
                "Revision '{}' is shorter than {} characters",
                revision, SHORT_REVISION_LEN
            )));
        }

        Ok(Version {
            prerelease: Some(revision.chars().take(SHORT_REVISION_LEN).collect()),
            ..self.clone()
        })
    }

    /// Whether this version carries a prerelease label
    pub fn is_prerelease(&self) -> bool {
        self.prerelease.is_some()
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(pre) = &self.prerelease {
            write!(f, "-{}", pre)?;
        }
        Ok(())
    }
}

// Ordering is defined by the (major, minor, patch) tuple only; the prerelease
// label never participates in comparisons.
impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.major, self.minor, self.patch).cmp(&(other.major, other.minor, other.patch))
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Version bump type decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionBump {
    Major,
    Minor,
    Patch,
}
