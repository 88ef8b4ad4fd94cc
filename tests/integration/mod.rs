//! Integration tests for dch-wrapper
//!
//! Each test builds a throwaway git repository with a debian/ directory and
//! runs the compiled binary against fake `dch` / `dpkg-parsechangelog`
//! scripts placed first on PATH.

#![cfg(unix)]

mod helpers;
mod test_check;
mod test_workflow;
mod test_worktree;
