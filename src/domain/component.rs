use crate::error::{Result, VersioningError};

use super::Version;

/// A named, independently versioned unit within a monorepo
///
/// Components are identified by the scope string used in conventional commit
/// messages. The identifier is case-insensitive for matching purposes but is
/// always lowercased when it appears in release tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    /// Identifier matched against commit scopes and release tag prefixes
    pub name: String,
    /// Optional human-readable label used in release titles
    pub label: Option<String>,
    /// Version assigned when no release exists yet for this component
    pub initial_version: String,
}

impl Component {
    /// Create a component, validating the identifier
    ///
    /// Identifiers may contain letters, digits, hyphens and underscores.
    /// Whitespace or other special characters would produce ambiguous tag
    /// prefixes and are rejected.
    pub fn new(
        name: impl Into<String>,
        label: Option<String>,
        initial_version: impl Into<String>,
    ) -> Result<Self> {
        let name = name.into();

        if name.is_empty() {
            return Err(VersioningError::config("Component name must not be empty"));
        }

        if !name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(VersioningError::config(format!(
                "Invalid component name '{}': only letters, digits, '-' and '_' are allowed",
                name
            )));
        }

        Ok(Component {
            name,
            label,
            initial_version: initial_version.into(),
        })
    }

    /// The release tag prefix for this component (lowercased name plus hyphen)
    pub fn tag_prefix(&self) -> String {
        format!("{}-", self.name.to_lowercase())
    }

    /// Build the release tag for a version (e.g., "billing-1.2.3")
    pub fn tag_for_version(&self, version: &Version) -> String {
        format!("{}{}", self.tag_prefix(), version)
    }

    /// Strip this component's prefix from a release tag, leaving the version string
    ///
    /// Returns `None` if the tag does not carry the prefix.
    pub fn strip_tag_prefix<'a>(&self, tag: &'a str) -> Option<&'a str> {
        let prefix = self.tag_prefix();
        if tag.len() < prefix.len() || !tag.is_char_boundary(prefix.len()) {
            return None;
        }

        if tag[..prefix.len()].eq_ignore_ascii_case(&prefix) {
            Some(&tag[prefix.len()..])
        } else {
            None
        }
    }

    /// Whether a commit scope refers to this component (case-insensitive)
    pub fn matches_scope(&self, scope: &str) -> bool {
        scope.eq_ignore_ascii_case(&self.name)
    }

    /// Release title: "Label: 1.2.3", preferring the human-readable label
    pub fn release_title(&self, version: &Version) -> String {
        let display_name = self.label.as_deref().unwrap_or(&self.name);
        format!("{}: {}", title_case(display_name), version)
    }
}

/// Uppercase the first character of a name for display
fn title_case(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn component(name: &str) -> Component {
        Component::new(name, None, "1.0.0").unwrap()
    }

    #[test]
    fn test_component_valid_names() {
        for name in ["foo", "Foo", "foo-bar", "foo_bar", "svc2"] {
            assert!(Component::new(name, None, "1.0.0").is_ok());
        }
    }

    #[test]
    fn test_component_invalid_names() {
        for name in ["", "foo bar", "foo/bar", "foo!", "foo.bar"] {
            assert!(Component::new(name, None, "1.0.0").is_err());
        }
    }

    #[test]
    fn test_tag_prefix_is_lowercased() {
        assert_eq!(component("Billing").tag_prefix(), "billing-");
    }

    #[test]
    fn test_tag_for_version() {
        let version = Version::new(1, 2, 3);
        assert_eq!(component("foo").tag_for_version(&version), "foo-1.2.3");
    }

    #[test]
    fn test_strip_tag_prefix_roundtrip() {
        let c = component("foo");
        for version in ["1.2.3", "0.1.0", "2.0.0-abcdef1"] {
            let v = Version::parse(version).unwrap();
            let tag = c.tag_for_version(&v);
            assert_eq!(c.strip_tag_prefix(&tag), Some(version));
        }
    }

    #[test]
    fn test_strip_tag_prefix_case_insensitive() {
        assert_eq!(component("foo").strip_tag_prefix("FOO-1.2.3"), Some("1.2.3"));
    }

    #[test]
    fn test_strip_tag_prefix_other_component() {
        assert_eq!(component("foo").strip_tag_prefix("bar-1.2.3"), None);
    }

    #[test]
    fn test_matches_scope_case_insensitive() {
        let c = component("foo");
        assert!(c.matches_scope("foo"));
        assert!(c.matches_scope("Foo"));
        assert!(c.matches_scope("FOO"));
        assert!(!c.matches_scope("bar"));
    }

    #[test]
    fn test_release_title_uses_label() {
        let c = Component::new("svc", Some("billing service".to_string()), "1.0.0").unwrap();
        let version = Version::new(1, 2, 3);
        assert_eq!(c.release_title(&version), "Billing service: 1.2.3");
    }

    #[test]
    fn test_release_title_falls_back_to_name() {
        let version = Version::new(2, 0, 0);
        assert_eq!(component("foo").release_title(&version), "Foo: 2.0.0");
    }
}
