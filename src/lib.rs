pub mod changelog;
pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod filter;
pub mod resolver;
pub mod store;
pub mod ui;
pub mod window;

pub use error::{Result, VersioningError};
