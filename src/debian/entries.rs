//! Changelog content assembly from a custom message or commit subjects

use crate::core::error::ValidationError;
use serde::Serialize;

/// Entry used when git history could not be read
pub const UNREADABLE_HISTORY: &str = "Changes could not be read from git history";

/// Where the entries came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryOrigin {
  /// A message passed on the command line
  Message,
  /// Commit subjects from git log
  History,
  /// A single placeholder line (no commits, or git log failed)
  Placeholder,
}

/// Lines that become changelog bullet points, one dch call each
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangelogEntries {
  pub lines: Vec<String>,
  pub origin: EntryOrigin,
  /// Number of lines before truncation
  pub total: usize,
  pub truncated: bool,
}

impl ChangelogEntries {
  /// Use a single custom message
  pub fn from_message(message: &str) -> Result<Self, ValidationError> {
    let message = message.trim();
    if message.is_empty() {
      return Err(ValidationError::EmptyMessage);
    }
    Ok(Self::single(message.to_string(), EntryOrigin::Message))
  }

  /// Use commit subjects (newest first); no subjects yields a placeholder line
  pub fn from_subjects(subjects: Vec<String>, since_tag: Option<&str>) -> Self {
    let lines: Vec<String> = subjects
      .into_iter()
      .map(|s| s.trim().to_string())
      .filter(|s| !s.is_empty())
      .collect();

    if lines.is_empty() {
      let placeholder = match since_tag {
        Some(tag) => format!("No changes since {}", tag),
        None => "No changes recorded".to_string(),
      };
      return Self::placeholder(placeholder);
    }

    Self {
      total: lines.len(),
      lines,
      origin: EntryOrigin::History,
      truncated: false,
    }
  }

  /// A single placeholder line
  pub fn placeholder(text: impl Into<String>) -> Self {
    Self::single(text.into(), EntryOrigin::Placeholder)
  }

  fn single(line: String, origin: EntryOrigin) -> Self {
    Self {
      lines: vec![line],
      origin,
      total: 1,
      truncated: false,
    }
  }

  /// Whether the user should be asked about truncation
  pub fn exceeds(&self, max: usize) -> bool {
    self.lines.len() > max
  }

  /// Keep only the `max` most recent entries
  pub fn truncate(&mut self, max: usize) {
    if self.lines.len() > max {
      self.lines.truncate(max);
      self.truncated = true;
    }
  }
}
