//! Core building blocks for dch-wrapper
//!
//! - **config**: Project configuration (.dch-wrapper.toml) parsing and validation
//! - **context**: Project context shared by the workflow and the preflight checks
//! - **error**: Error types with contextual help messages and exit codes
//! - **tools**: Locating external executables on PATH
//! - **vcs**: Git operations (SystemGit)

pub mod config;
pub mod context;
pub mod error;
pub mod tools;
pub mod vcs;
