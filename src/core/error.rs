//! Error types for dch-wrapper with contextual messages and exit codes
//!
//! This module provides a unified error type that categorizes errors and provides
//! contextual help messages to users. Most errors carry a suggestion that tells
//! the user how to get unstuck.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Exit codes for dch-wrapper
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
  /// User error (config, invalid input, cancelled prompts)
  User = 1,
  /// System error (git, dch, I/O)
  System = 2,
  /// Validation failure (dirty changelog, missing debian/ directory)
  Validation = 3,
}

impl ExitCode {
  /// Convert to i32 for process exit
  pub fn as_i32(self) -> i32 {
    self as i32
  }
}

/// Main error type for dch-wrapper
#[derive(Debug)]
pub enum WrapError {
  /// Configuration errors
  Config(ConfigError),

  /// Git operation errors
  Git(GitError),

  /// External tool errors (dch, dpkg-parsechangelog)
  Tool(ToolError),

  /// Validation errors (versions, working tree, project layout)
  Validation(ValidationError),

  /// The user declined to continue
  Aborted { reason: String },

  /// I/O errors
  Io(io::Error),

  /// Generic error with message and optional context
  Message {
    message: String,
    context: Option<String>,
    help: Option<String>,
  },
}

impl WrapError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    WrapError::Message {
      message: msg.into(),
      context: None,
      help: None,
    }
  }

  /// Create an error with help text
  pub fn with_help(msg: impl Into<String>, help: impl Into<String>) -> Self {
    WrapError::Message {
      message: msg.into(),
      context: None,
      help: Some(help.into()),
    }
  }

  /// Create an error for a cancelled operation
  pub fn aborted(reason: impl Into<String>) -> Self {
    WrapError::Aborted { reason: reason.into() }
  }

  /// Add context to an existing error
  pub fn context(self, ctx: impl Into<String>) -> Self {
    let ctx_str = ctx.into();
    match self {
      WrapError::Message { message, context, help } => WrapError::Message {
        message,
        context: Some(context.map(|c| format!("{}\n{}", ctx_str, c)).unwrap_or(ctx_str)),
        help,
      },
      WrapError::Io(err) => WrapError::Message {
        message: ctx_str,
        context: Some(err.to_string()),
        help: None,
      },
      _ => self,
    }
  }

  /// Get the appropriate exit code for this error
  pub fn exit_code(&self) -> ExitCode {
    match self {
      WrapError::Config(_) => ExitCode::User,
      WrapError::Git(_) => ExitCode::System,
      WrapError::Tool(_) => ExitCode::System,
      WrapError::Validation(_) => ExitCode::Validation,
      WrapError::Aborted { .. } => ExitCode::User,
      WrapError::Io(_) => ExitCode::System,
      WrapError::Message { .. } => ExitCode::User,
    }
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      WrapError::Config(e) => e.help_message(),
      WrapError::Git(e) => e.help_message(),
      WrapError::Tool(e) => e.help_message(),
      WrapError::Validation(e) => e.help_message(),
      WrapError::Message { help, .. } => help.clone(),
      _ => None,
    }
  }
}

impl fmt::Display for WrapError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      WrapError::Config(e) => write!(f, "{}", e),
      WrapError::Git(e) => write!(f, "{}", e),
      WrapError::Tool(e) => write!(f, "{}", e),
      WrapError::Validation(e) => write!(f, "{}", e),
      WrapError::Aborted { reason } => write!(f, "Cancelled: {}", reason),
      WrapError::Io(e) => write!(f, "I/O error: {}", e),
      WrapError::Message { message, context, .. } => {
        write!(f, "{}", message)?;
        if let Some(ctx) = context {
          write!(f, "\n{}", ctx)?;
        }
        Ok(())
      }
    }
  }
}

impl std::error::Error for WrapError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      WrapError::Io(e) => Some(e),
      _ => None,
    }
  }
}

impl From<io::Error> for WrapError {
  fn from(err: io::Error) -> Self {
    WrapError::Io(err)
  }
}

impl From<String> for WrapError {
  fn from(msg: String) -> Self {
    WrapError::message(msg)
  }
}

impl From<&str> for WrapError {
  fn from(msg: &str) -> Self {
    WrapError::message(msg)
  }
}

impl From<toml_edit::de::Error> for WrapError {
  fn from(err: toml_edit::de::Error) -> Self {
    WrapError::message(format!("TOML deserialization error: {}", err))
  }
}

impl From<serde_json::Error> for WrapError {
  fn from(err: serde_json::Error) -> Self {
    WrapError::message(format!("JSON error: {}", err))
  }
}

impl From<ValidationError> for WrapError {
  fn from(err: ValidationError) -> Self {
    WrapError::Validation(err)
  }
}

/// Configuration-related errors
#[derive(Debug)]
pub enum ConfigError {
  /// A config value failed validation
  InvalidValue { path: PathBuf, field: String, reason: String },
}

impl ConfigError {
  fn help_message(&self) -> Option<String> {
    match self {
      ConfigError::InvalidValue { path, field, .. } => {
        Some(format!("Fix `{}` in {} or remove it to use the default.", field, path.display()))
      }
    }
  }
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ConfigError::InvalidValue { path, field, reason } => {
        write!(f, "Invalid value for '{}' in {}: {}", field, path.display(), reason)
      }
    }
  }
}

/// Git operation errors
#[derive(Debug)]
pub enum GitError {
  /// Git command failed
  CommandFailed { command: String, stderr: String },

  /// Repository not found
  RepoNotFound { path: PathBuf },
}

impl GitError {
  fn help_message(&self) -> Option<String> {
    match self {
      GitError::RepoNotFound { path } => Some(format!(
        "Run dch-wrapper from inside a git checkout of the package (looked in {}).",
        path.display()
      )),
      GitError::CommandFailed { .. } => None,
    }
  }
}

impl fmt::Display for GitError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      GitError::CommandFailed { command, stderr } => {
        write!(f, "Git command failed: {}\n{}", command, stderr)
      }
      GitError::RepoNotFound { path } => {
        write!(f, "Git repository not found at: {}", path.display())
      }
    }
  }
}

/// External tool errors
#[derive(Debug)]
pub enum ToolError {
  /// Executable not found on PATH
  NotFound { name: String },

  /// The process could not be started
  SpawnFailed { command: String, reason: String },

  /// The process ran but exited unsuccessfully
  Failed { command: String, status: String },
}

impl ToolError {
  fn help_message(&self) -> Option<String> {
    match self {
      ToolError::NotFound { name } if name.ends_with("dch") => Some(
        "Install the devscripts package:\n  Ubuntu/Debian: sudo apt-get install devscripts\n  CentOS/RHEL: sudo yum install devscripts\n  Fedora: sudo dnf install devscripts"
          .to_string(),
      ),
      ToolError::NotFound { name } => Some(format!(
        "Make sure '{}' is installed and on PATH, or point the config file at it.",
        name
      )),
      ToolError::Failed { .. } => {
        Some("The changelog may be partially updated; review it with `git diff` before retrying.".to_string())
      }
      ToolError::SpawnFailed { .. } => None,
    }
  }
}

impl fmt::Display for ToolError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ToolError::NotFound { name } => write!(f, "Command not found: {}", name),
      ToolError::SpawnFailed { command, reason } => {
        write!(f, "Failed to start `{}`: {}", command, reason)
      }
      ToolError::Failed { command, status } => write!(f, "`{}` failed ({})", command, status),
    }
  }
}

/// Validation errors
#[derive(Debug)]
pub enum ValidationError {
  /// Version string rejected
  InvalidVersion { input: String, reason: String },

  /// Distribution name rejected
  InvalidDistribution { input: String },

  /// The project has no debian/ directory
  MissingDebianDir { path: PathBuf },

  /// The changelog has uncommitted modifications
  ChangelogDirty { path: String },

  /// A custom message was given but is blank
  EmptyMessage,

  /// One or more preflight checks failed
  ChecksFailed { failed: usize },
}

impl ValidationError {
  fn help_message(&self) -> Option<String> {
    match self {
      ValidationError::InvalidVersion { .. } => {
        Some("Debian versions look like [epoch:]upstream[-revision], e.g. 1.2.3 or 1:2.0-1.".to_string())
      }
      ValidationError::InvalidDistribution { .. } => {
        Some("Use a suite name such as unstable, experimental or UNRELEASED.".to_string())
      }
      ValidationError::MissingDebianDir { .. } => {
        Some("Run dch-wrapper from the package root, or pass --cwd <path>.".to_string())
      }
      ValidationError::ChangelogDirty { path } => Some(format!(
        "Commit or discard the changes first:\n  git add {path} && git commit -m 'Update changelog'\n  or\n  git checkout -- {path}"
      )),
      ValidationError::EmptyMessage => None,
      ValidationError::ChecksFailed { .. } => Some("Fix the failed checks above and run again.".to_string()),
    }
  }
}

impl fmt::Display for ValidationError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ValidationError::InvalidVersion { input, reason } => {
        write!(f, "Invalid version '{}': {}", input, reason)
      }
      ValidationError::InvalidDistribution { input } => {
        write!(f, "Invalid distribution '{}'", input)
      }
      ValidationError::MissingDebianDir { path } => {
        write!(f, "No debian directory found at: {}", path.display())
      }
      ValidationError::ChangelogDirty { path } => {
        write!(f, "{} has uncommitted changes", path)
      }
      ValidationError::EmptyMessage => write!(f, "Changelog message is empty"),
      ValidationError::ChecksFailed { failed } => write!(f, "{} preflight check(s) failed", failed),
    }
  }
}

/// Result type alias for dch-wrapper
pub type WrapResult<T> = Result<T, WrapError>;

/// Helper trait to add context to Results
pub trait ResultExt<T> {
  /// Add context to an error result
  fn context(self, ctx: impl Into<String>) -> WrapResult<T>;

  /// Add context using a closure (lazy evaluation)
  fn with_context<F>(self, f: F) -> WrapResult<T>
  where
    F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
  E: Into<WrapError>,
{
  fn context(self, ctx: impl Into<String>) -> WrapResult<T> {
    self.map_err(|e| e.into().context(ctx))
  }

  fn with_context<F>(self, f: F) -> WrapResult<T>
  where
    F: FnOnce() -> String,
  {
    self.map_err(|e| e.into().context(f()))
  }
}

/// Pretty-print an error to stderr with help text
pub fn print_error(error: &WrapError) {
  eprintln!("\n❌ {}\n", error);

  if let Some(help) = error.help_message() {
    eprintln!("💡 Help: {}\n", help);
  }
}
