use chrono::{DateTime, Utc};
use regex::Regex;

/// Commit types recognized by the conventional commits specification
const CONVENTIONAL_TYPES: &[&str] = &[
    "build", "chore", "ci", "docs", "feat", "fix", "perf", "refactor", "revert", "style", "test",
];

/// A commit as fetched from the source-control store
///
/// Read-only input for one invocation; nothing in the engine mutates it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    /// Full commit hash
    pub sha: String,
    /// Author identifier, may be empty
    pub author: String,
    /// Full commit message
    pub message: String,
    /// Committer timestamp
    pub timestamp: DateTime<Utc>,
    /// Web URL for the commit
    pub url: String,
}

/// Parsed representation of a conventional commit message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommit {
    pub kind: String,
    pub scope: Option<String>,
    pub description: String,
    pub breaking: bool,
}

impl ParsedCommit {
    /// Classify a commit message according to the conventional commits spec
    ///
    /// Supported formats:
    /// - type(scope)!: description
    /// - type(scope): description
    /// - type!: description
    /// - type: description
    ///
    /// Messages that do not match any of these, or that use a type outside
    /// the conventional vocabulary, yield `None` and are silently excluded
    /// from both version decisions and changelogs.
    pub fn parse(message: &str) -> Option<Self> {
        // Format: type(scope)!: description
        if let Some(captures) = Regex::new(r"^([a-z]+)\(([^)]+)\)(!?):\s*(.*)")
            .ok()
            .and_then(|re| re.captures(message))
        {
            let kind = captures.get(1)?.as_str().to_string();
            if !is_conventional_type(&kind) {
                return None;
            }

            let scope = captures.get(2).map(|m| m.as_str().to_string());
            let has_exclamation = captures.get(3).map(|m| m.as_str()) == Some("!");
            let description = captures.get(4)?.as_str().to_string();

            return Some(ParsedCommit {
                kind,
                scope,
                description,
                breaking: has_exclamation || has_breaking_footer(message),
            });
        }

        // Format: type!: description
        if let Some(captures) = Regex::new(r"^([a-z]+)!:\s*(.*)")
            .ok()
            .and_then(|re| re.captures(message))
        {
            let kind = captures.get(1)?.as_str().to_string();
            if !is_conventional_type(&kind) {
                return None;
            }

            return Some(ParsedCommit {
                kind,
                scope: None,
                description: captures.get(2)?.as_str().to_string(),
                breaking: true,
            });
        }

        // Format: type: description
        if let Some(captures) = Regex::new(r"^([a-z]+):\s*(.*)")
            .ok()
            .and_then(|re| re.captures(message))
        {
            let kind = captures.get(1)?.as_str().to_string();
            if !is_conventional_type(&kind) {
                return None;
            }

            return Some(ParsedCommit {
                kind,
                scope: None,
                description: captures.get(2)?.as_str().to_string(),
                breaking: has_breaking_footer(message),
            });
        }

        None
    }

    /// Whether this commit introduces a feature (minor bump candidate)
    pub fn is_feature(&self) -> bool {
        self.kind == "feat"
    }

    /// Whether this commit is a bug fix (patch bump candidate)
    pub fn is_fix(&self) -> bool {
        self.kind == "fix"
    }
}

fn is_conventional_type(kind: &str) -> bool {
    CONVENTIONAL_TYPES.contains(&kind)
}

fn has_breaking_footer(message: &str) -> bool {
    message.contains("BREAKING CHANGE:") || message.contains("BREAKING-CHANGE:")
}
