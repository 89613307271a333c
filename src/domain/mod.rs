//! Core domain types: components, versions, commits and releases

pub mod commit;
pub mod component;
pub mod release;
pub mod version;

pub use commit::{Commit, ParsedCommit};
pub use component::Component;
pub use release::{NewRelease, Release};
pub use version::{Version, VersionBump, SHORT_REVISION_LEN};
