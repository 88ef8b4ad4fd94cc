//! Preflight checks
//!
//! All checks implement the `Check` trait and are registered in
//! `create_default_runner()`.
//!
//! # Built-in Checks
//!
//! - **git-repository**: The package root is inside a git work tree
//! - **debian-directory**: debian/ (and ideally debian/changelog) exists
//! - **dch**: dch is installed
//! - **changelog-parser**: dpkg-parsechangelog is installed (warning only)
//! - **maintainer-identity**: A real maintainer name/address can be found

mod project;
mod runner;
mod tools;
mod trait_def;

pub use runner::create_default_runner;
pub use trait_def::{CheckContext, CheckResult, Severity};
