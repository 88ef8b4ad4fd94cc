//! System git backend
//!
//! Every query is a single `git` subprocess run against the project root:
//! - Safe subprocess execution (isolated environment)
//! - Stable, untranslated output (LC_ALL=C)
//! - Errors normalized into [`GitError`]

use crate::core::error::{GitError, ResultExt, WrapError, WrapResult};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Environment variables passed through to git
///
/// Everything else is cleared so that repository-level overrides such as
/// GIT_DIR from a calling hook cannot redirect our queries.
const PASSTHROUGH_ENV: &[&str] = &[
  "PATH",
  "HOME",
  "XDG_CONFIG_HOME",
  "GIT_CONFIG_GLOBAL",
  "GIT_CONFIG_NOSYSTEM",
];

/// Git backend using system git (zero crate dependencies)
pub struct SystemGit {
  /// Directory git is run from
  pub(crate) repo_path: PathBuf,

  /// Working tree root
  pub(crate) work_tree: PathBuf,
}

impl SystemGit {
  /// Open a git repository
  ///
  /// This performs ONE subprocess call to get the repository metadata.
  pub fn open(path: &Path) -> WrapResult<Self> {
    let output = Command::new("git")
      .arg("-C")
      .arg(path)
      .args(["rev-parse", "--show-toplevel"])
      .env("LC_ALL", "C")
      .output()
      .context("Failed to execute git rev-parse")?;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      if stderr.contains("not a git repository") {
        return Err(WrapError::Git(GitError::RepoNotFound {
          path: path.to_path_buf(),
        }));
      }
      return Err(WrapError::message(format!("Failed to open git repository: {}", stderr)));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let work_tree = stdout.trim();

    Ok(Self {
      repo_path: path.to_path_buf(),
      work_tree: PathBuf::from(work_tree),
    })
  }

  /// Working tree root as reported by git
  pub fn work_tree(&self) -> &Path {
    &self.work_tree
  }

  /// Run a git command and return its raw output
  ///
  /// A non-zero exit is NOT an error here; callers decide what it means.
  pub(crate) fn run(&self, args: &[&str]) -> WrapResult<Output> {
    tracing::trace!(args = ?args, "git");
    self
      .git_cmd()
      .args(args)
      .output()
      .with_context(|| format!("Failed to execute git {}", args.join(" ")))
  }

  /// Run a git command that must succeed and return its stdout
  pub(crate) fn run_checked(&self, args: &[&str]) -> WrapResult<String> {
    let output = self.run(args)?;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      return Err(WrapError::Git(GitError::CommandFailed {
        command: format!("git {}", args.join(" ")),
        stderr: stderr.trim().to_string(),
      }));
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
  }

  /// Create a safe git command with isolated environment
  ///
  /// - Sets working directory to repo path
  /// - Clears environment variables except [`PASSTHROUGH_ENV`]
  /// - Adds safe configuration overrides
  pub(crate) fn git_cmd(&self) -> Command {
    let mut cmd = Command::new("git");

    cmd.arg("-C").arg(&self.repo_path);

    cmd.env_clear();
    for key in PASSTHROUGH_ENV {
      if let Ok(value) = std::env::var(key) {
        cmd.env(key, value);
      }
    }
    cmd.env("LC_ALL", "C");

    cmd.arg("-c").arg("core.quotePath=false"); // Don't escape non-ASCII
    cmd.arg("-c").arg("color.ui=false");

    cmd
  }
}
