//! Repository queries used to draft a changelog (config, tags, status, log)

use super::system_git::SystemGit;
use crate::core::error::WrapResult;

impl SystemGit {
  /// Read a single config value (`git config --get <key>`)
  ///
  /// Returns `None` when the key is unset or empty.
  pub fn config_value(&self, key: &str) -> WrapResult<Option<String>> {
    let output = self.run(&["config", "--get", key])?;

    // Exit code 1 means "key not set"
    if !output.status.success() {
      return Ok(None);
    }

    let value = String::from_utf8_lossy(&output.stdout).trim().to_string();
    Ok(if value.is_empty() { None } else { Some(value) })
  }

  /// Most recent tag reachable from HEAD (`git describe --tags --abbrev=0`)
  ///
  /// Returns `None` when there are no tags or no commits yet.
  pub fn latest_tag(&self) -> WrapResult<Option<String>> {
    let output = self.run(&["describe", "--tags", "--abbrev=0"])?;

    if !output.status.success() {
      tracing::debug!(
        stderr = %String::from_utf8_lossy(&output.stderr).trim(),
        "git describe found no tag"
      );
      return Ok(None);
    }

    let tag = String::from_utf8_lossy(&output.stdout).trim().to_string();
    Ok(if tag.is_empty() { None } else { Some(tag) })
  }

  /// Raw `git status --porcelain` output
  ///
  /// Untracked directories are expanded to the files inside them.
  pub fn status_porcelain(&self) -> WrapResult<String> {
    self.run_checked(&["status", "--porcelain", "--untracked-files=all"])
  }

  /// Commit subjects since `since` (exclusive), newest first
  ///
  /// With `since = None` the whole history of HEAD is listed.
  pub fn commit_subjects(&self, since: Option<&str>, include_merges: bool) -> WrapResult<Vec<String>> {
    let range = since.map(|tag| format!("{}..HEAD", tag));

    let mut args = vec!["log", "--format=%s"];
    if !include_merges {
      args.push("--no-merges");
    }
    if let Some(range) = &range {
      args.push(range);
    }

    let stdout = self.run_checked(&args)?;

    Ok(
      stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect(),
    )
  }
}
