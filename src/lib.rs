//! # hookpin
//!
//! Validate and plan pre-commit hook configurations.
//!
//! A `.pre-commit-config.yaml` pins hook repositories to revisions and
//! enables hooks from them, each with optional arguments and file filters.
//! hookpin parses that file, checks it, and works out which files each hook
//! would receive, without fetching or running anything.
//!
//! ```bash
//! hookpin validate
//! hookpin plan --all-files
//! hookpin audit
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod git;
pub mod plan;
pub mod select;

pub use cli::{Cli, Output};
pub use config::{HookConfig, HookEntry, HookRepository, Settings};
pub use error::{HookpinError, Result};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
