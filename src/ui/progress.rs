//! Progress indicator while dch appends changelog entries
//!
//! Uses `linya`, which draws to stderr

use linya::{Bar, Progress};

/// Progress bar for the append phase, one tick per dch call
pub struct EntryProgress {
  progress: Progress,
  bar: Bar,
}

impl EntryProgress {
  /// Create a new progress bar for `total` entries
  pub fn new(total: usize) -> Self {
    let mut progress = Progress::new();
    let bar = progress.bar(total, "Appending entries");
    Self { progress, bar }
  }

  /// Increment progress by 1
  pub fn inc(&mut self) {
    self.progress.inc_and_draw(&self.bar, 1);
  }
}
