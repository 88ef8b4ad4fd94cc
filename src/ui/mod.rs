//! User interaction utilities
//!
//! - [`prompts`] - Interactive prompts and confirmations
//! - [`progress`] - Progress bar while dch appends entries

pub mod progress;
pub mod prompts;
