//! Project context - build once, pass everywhere
//!
//! Holds the project root, the git backend, and the loaded configuration.
//! Built once in main.rs and passed by reference to the workflow and the
//! preflight checks.

use crate::core::config::WrapperConfig;
use crate::core::error::WrapResult;
use crate::core::vcs::SystemGit;
use std::path::{Path, PathBuf};

pub struct ProjectContext {
  /// Package root (directory containing debian/)
  pub root: PathBuf,

  /// Git backend rooted at `root`
  pub git: SystemGit,

  /// Configuration (defaults when no file exists)
  pub config: WrapperConfig,
}

impl ProjectContext {
  /// Open the git repository containing `root` and load its config
  pub fn build(root: &Path) -> WrapResult<Self> {
    let git = SystemGit::open(root)?;
    let config = WrapperConfig::load(root)?;

    Ok(Self {
      root: root.to_path_buf(),
      git,
      config,
    })
  }

  /// Absolute changelog path
  pub fn changelog_path(&self) -> PathBuf {
    self.root.join(&self.config.changelog)
  }

  /// The debian/ directory the changelog lives in
  pub fn debian_dir(&self) -> PathBuf {
    self
      .changelog_path()
      .parent()
      .map(Path::to_path_buf)
      .unwrap_or_else(|| self.root.clone())
  }

  /// Changelog path as `git status` prints it (relative to the work tree root)
  ///
  /// Differs from the configured path when the package lives in a
  /// subdirectory of the repository.
  pub fn changelog_status_path(&self) -> String {
    let relative = self.config.changelog_git_path();

    let root = self.root.canonicalize().unwrap_or_else(|_| self.root.clone());
    let work_tree = self
      .git
      .work_tree()
      .canonicalize()
      .unwrap_or_else(|_| self.git.work_tree().to_path_buf());

    match root.strip_prefix(&work_tree) {
      Ok(prefix) if !prefix.as_os_str().is_empty() => {
        let prefix = prefix
          .components()
          .map(|c| c.as_os_str().to_string_lossy().into_owned())
          .collect::<Vec<_>>()
          .join("/");
        format!("{}/{}", prefix, relative)
      }
      _ => relative,
    }
  }
}
