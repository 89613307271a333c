//! Change window computation
//!
//! Determines the `[since, until)` time range of commits to consider for one
//! versioning decision. The computation is pure; callers hand the window to
//! the commit store together with the branch name.

use chrono::{DateTime, Duration, TimeZone, Utc};

/// Time range of candidate commits for a versioning decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangeWindow {
    /// Inclusive lower bound
    pub since: DateTime<Utc>,
    /// Exclusive upper bound
    pub until: DateTime<Utc>,
}

impl ChangeWindow {
    /// Resolve the window from the previous release's target commit time and
    /// the current revision's commit time.
    ///
    /// `until` is the current commit time plus one millisecond so the boundary
    /// commit itself is included despite the exclusive upper bound of the
    /// commit-listing contract. `since` is the Unix epoch when no prior
    /// release exists, otherwise the previous target commit time plus one
    /// second so the commit that produced the previous release is not
    /// re-included.
    pub fn resolve(
        previous_change: Option<DateTime<Utc>>,
        current_change: DateTime<Utc>,
    ) -> Self {
        let since = match previous_change {
            Some(time) => time + Duration::seconds(1),
            None => Utc.timestamp_opt(0, 0).unwrap(),
        };

        ChangeWindow {
            since,
            until: current_change + Duration::milliseconds(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    #[test]
    fn test_window_without_previous_release_starts_at_epoch() {
        let window = ChangeWindow::resolve(None, at(1_000));
        assert_eq!(window.since, at(0));
    }

    #[test]
    fn test_window_with_previous_release_skips_one_second() {
        let window = ChangeWindow::resolve(Some(at(500)), at(1_000));
        assert_eq!(window.since, at(501));
    }

    #[test]
    fn test_window_until_includes_boundary_commit() {
        let window = ChangeWindow::resolve(None, at(1_000));
        assert_eq!(window.until, at(1_000) + Duration::milliseconds(1));
        // The current commit's own timestamp sits inside [since, until)
        assert!(at(1_000) >= window.since && at(1_000) < window.until);
    }

    #[test]
    fn test_window_is_deterministic() {
        let a = ChangeWindow::resolve(Some(at(500)), at(1_000));
        let b = ChangeWindow::resolve(Some(at(500)), at(1_000));
        assert_eq!(a, b);
    }
}
