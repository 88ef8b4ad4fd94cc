//! User-facing commands
//!
//! - **run**: The changelog workflow (default)
//! - **doctor**: Preflight report (`--check`)

pub mod doctor;
pub mod run;

pub use doctor::run_doctor;
pub use run::{RunOptions, run_workflow};
