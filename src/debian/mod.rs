//! Debian changelog drafting
//!
//! - **identity**: DEBFULLNAME / DEBEMAIL resolution from the environment or git config
//! - **worktree**: Classifying `git status` before the changelog is touched
//! - **version**: Version parsing, the next-version heuristic, and version sources
//! - **entries**: Building changelog lines from a message or commit subjects
//! - **dch**: dch command lines and their execution

pub mod dch;
pub mod entries;
pub mod identity;
pub mod version;
pub mod worktree;
