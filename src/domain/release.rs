use chrono::{DateTime, Utc};

/// A published release as read back from the release store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Release {
    /// Tag string, "component-version" (e.g., "billing-1.2.3")
    pub tag: String,
    /// When the release was published
    pub published_at: DateTime<Utc>,
    /// Commit reference the release points at
    pub target_commit: String,
    pub title: String,
    pub body: String,
}

/// A candidate release the engine asks the store to create
///
/// Owned by the engine only until creation; the store is the system of
/// record afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRelease {
    pub tag: String,
    pub title: String,
    pub target_commit: String,
    pub body: String,
    pub prerelease: bool,
}
