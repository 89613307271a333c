//! Narrowing releases and commit records to a single component

use crate::domain::{Commit, Component, ParsedCommit, Release};

/// Retain releases belonging to a component, newest first
///
/// A release belongs to a component when its lowercased tag starts with the
/// component's tag prefix. The result is ordered by publish time descending;
/// equal timestamps fall back to the tag string so the "latest release" pick
/// is deterministic.
pub fn releases_for_component(component: &Component, releases: Vec<Release>) -> Vec<Release> {
    let prefix = component.tag_prefix();

    let mut matching: Vec<Release> = releases
        .into_iter()
        .filter(|release| release.tag.to_lowercase().starts_with(&prefix))
        .collect();

    matching.sort_by(|a, b| {
        b.published_at
            .cmp(&a.published_at)
            .then_with(|| a.tag.cmp(&b.tag))
    });

    matching
}

/// Retain commit records scoped to a component
///
/// Records without a scope are always dropped; scope comparison is
/// case-insensitive.
pub fn records_for_scope(component: &Component, records: Vec<ParsedCommit>) -> Vec<ParsedCommit> {
    records
        .into_iter()
        .filter(|record| {
            record
                .scope
                .as_deref()
                .is_some_and(|scope| component.matches_scope(scope))
        })
        .collect()
}

/// Classify raw commits and retain the records scoped to a component
///
/// Commits whose messages are not conventional commits are skipped silently.
pub fn classify_for_scope(component: &Component, commits: &[Commit]) -> Vec<ParsedCommit> {
    let records = commits
        .iter()
        .filter_map(|commit| ParsedCommit::parse(&commit.message))
        .collect();

    records_for_scope(component, records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn component(name: &str) -> Component {
        Component::new(name, None, "1.0.0").unwrap()
    }

    fn release(tag: &str, published_secs: i64) -> Release {
        Release {
            tag: tag.to_string(),
            published_at: Utc.timestamp_opt(published_secs, 0).unwrap(),
            target_commit: format!("sha-{}", tag),
            title: tag.to_string(),
            body: String::new(),
        }
    }

    fn commit(message: &str) -> Commit {
        Commit {
            sha: "0123456789abcdef".to_string(),
            author: "alice".to_string(),
            message: message.to_string(),
            timestamp: Utc.timestamp_opt(0, 0).unwrap(),
            url: "https://example.test/c/0123456".to_string(),
        }
    }

    #[test]
    fn test_releases_filtered_by_prefix() {
        let releases = vec![
            release("foo-1.0.0", 100),
            release("bar-2.0.0", 200),
            release("foo-1.1.0", 300),
        ];

        let filtered = releases_for_component(&component("foo"), releases);
        assert_eq!(filtered.len(), 2);
        assert!(filtered.iter().all(|r| r.tag.starts_with("foo-")));
    }

    #[test]
    fn test_releases_sorted_newest_first() {
        let releases = vec![
            release("foo-1.0.0", 100),
            release("foo-1.2.0", 300),
            release("foo-1.1.0", 200),
        ];

        let filtered = releases_for_component(&component("foo"), releases);
        let tags: Vec<&str> = filtered.iter().map(|r| r.tag.as_str()).collect();
        assert_eq!(tags, vec!["foo-1.2.0", "foo-1.1.0", "foo-1.0.0"]);
    }

    #[test]
    fn test_releases_equal_timestamps_break_ties_by_tag() {
        let releases = vec![release("foo-1.0.1", 100), release("foo-1.0.0", 100)];

        let filtered = releases_for_component(&component("foo"), releases);
        let tags: Vec<&str> = filtered.iter().map(|r| r.tag.as_str()).collect();
        assert_eq!(tags, vec!["foo-1.0.0", "foo-1.0.1"]);
    }

    #[test]
    fn test_releases_prefix_match_is_case_insensitive() {
        let releases = vec![release("FOO-1.0.0", 100)];
        let filtered = releases_for_component(&component("Foo"), releases);
        assert_eq!(filtered.len(), 1);
    }

    #[test]
    fn test_releases_prefix_requires_hyphen() {
        // "foobar-1.0.0" must not match component "foo"
        let releases = vec![release("foobar-1.0.0", 100)];
        let filtered = releases_for_component(&component("foo"), releases);
        assert!(filtered.is_empty());
    }

    #[test]
    fn test_records_without_scope_are_dropped() {
        let records = vec![
            ParsedCommit::parse("fix: no scope").unwrap(),
            ParsedCommit::parse("fix(foo): scoped").unwrap(),
        ];

        let filtered = records_for_scope(&component("foo"), records);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].description, "scoped");
    }

    #[test]
    fn test_records_scope_match_is_case_insensitive() {
        let records = vec![ParsedCommit::parse("fix(Foo): x").unwrap()];
        let filtered = records_for_scope(&component("foo"), records);
        assert_eq!(filtered.len(), 1);
    }

    #[test]
    fn test_classify_skips_non_conventional_commits() {
        let commits = vec![
            commit("not a conventional message"),
            commit("fix(foo): real fix"),
            commit("feat(bar): other component"),
        ];

        let records = classify_for_scope(&component("foo"), &commits);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].description, "real fix");
    }
}
