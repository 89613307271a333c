//! Changelog rendering for a component release
//!
//! Classifies the commits in the change window and renders the matching ones
//! into a fixed markdown template. Scope filtering happens here again,
//! independently of the version decision, because the builder receives the
//! full window commit set.

use std::collections::HashSet;

use crate::domain::{Commit, Component, ParsedCommit};

const PREAMBLE: &str = "> Below is the changelog for this version. Changes are categorised by the type of change (breaking change, new feature, or bugfix). If there isn't a heading for a type of change, there were no relevant changes.";

const BREAKING_HEADING: &str = "### :hammer: Breaking Changes";
const BREAKING_CAPTION: &str = "_Breaking changes indicate that an existing behaviour or feature no longer works as before. Pay close attention to any listed breaking changes, and make sure they are acknowledged or mitigated before deploying this version._";

const FEATURES_HEADING: &str = "### :bulb: Features";
const FEATURES_CAPTION: &str = "_Feature changes contain some new functionality. Existing behaviour should not be affected._";

const FIXES_HEADING: &str = "### :construction_worker: Fixes";
const FIXES_CAPTION: &str = "_Fixes some unintended behaviour from a previous version. You should familiarise yourself with these changes to understand any problems you may have experienced in previous versions._";

const CONTRIBUTORS_HEADING: &str = "### :heart_eyes: Contributors";
const CONTRIBUTORS_CAPTION: &str = "_These people contributed to this version of the component - thank you! Note: the auto-generated contributor list may also include contributors to other components._";

/// Renders classified commits into a structured changelog body
pub struct ChangelogBuilder {
    component: Component,
}

impl ChangelogBuilder {
    pub fn new(component: Component) -> Self {
        ChangelogBuilder { component }
    }

    /// Build the markdown changelog from the window's commits
    ///
    /// A commit lands in every bucket it qualifies for: one that is both
    /// breaking and a feature appears under Breaking Changes and Features.
    /// Sections with no entries are omitted entirely, heading included.
    pub fn build(&self, commits: &[Commit]) -> String {
        let mut breaking = Vec::new();
        let mut features = Vec::new();
        let mut fixes = Vec::new();
        let mut contributors = Vec::new();
        let mut seen_contributors = HashSet::new();

        for commit in commits {
            let record = match ParsedCommit::parse(&commit.message) {
                Some(record) => record,
                None => continue,
            };

            let scoped = record
                .scope
                .as_deref()
                .is_some_and(|scope| self.component.matches_scope(scope));
            if !scoped {
                continue;
            }

            let entry = format_entry(commit, &record);

            if record.breaking {
                breaking.push(entry.clone());
            }
            if record.is_feature() {
                features.push(entry.clone());
            }
            if record.is_fix() {
                fixes.push(entry);
            }

            // First-seen order, de-duplicated; an empty author is still an entry
            if seen_contributors.insert(commit.author.clone()) {
                contributors.push(format!("* @{}", commit.author));
            }
        }

        let mut body = String::new();
        body.push('\n');
        body.push_str(PREAMBLE);
        body.push('\n');
        push_section(&mut body, BREAKING_HEADING, BREAKING_CAPTION, &breaking);
        push_section(&mut body, FEATURES_HEADING, FEATURES_CAPTION, &features);
        push_section(&mut body, FIXES_HEADING, FIXES_CAPTION, &fixes);
        push_section(
            &mut body,
            CONTRIBUTORS_HEADING,
            CONTRIBUTORS_CAPTION,
            &contributors,
        );

        body
    }
}

fn push_section(body: &mut String, heading: &str, caption: &str, entries: &[String]) {
    if entries.is_empty() {
        return;
    }

    body.push_str(heading);
    body.push('\n');
    body.push_str(caption);
    body.push('\n');
    for entry in entries {
        body.push_str(entry);
        body.push('\n');
    }
}

/// Format one changelog line for a commit
///
/// The sha is shortened to 7 characters to match how forges display it.
/// Commits without a sha fall back to a bare link.
fn format_entry(commit: &Commit, record: &ParsedCommit) -> String {
    if commit.sha.is_empty() {
        format!(
            "* [{}] {} (@{})",
            commit.url, record.description, commit.author
        )
    } else {
        let short_sha: String = commit.sha.chars().take(7).collect();
        format!(
            "* [`{}`]({}) {} (@{})",
            short_sha, commit.url, record.description, commit.author
        )
    }
}
