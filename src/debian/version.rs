//! Debian version strings: parsing, the next-version heuristic, and
//! reading the current version from the changelog or a git tag

use crate::core::error::{ToolError, ValidationError, WrapError, WrapResult};
use serde::Serialize;
use std::fmt;
use std::path::Path;
use std::process::Command;

/// A Debian package version: `[epoch:]upstream[-revision]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebianVersion {
  pub epoch: Option<u32>,
  pub upstream: String,
  pub revision: Option<String>,
}

impl DebianVersion {
  /// Parse and validate a version string
  pub fn parse(input: &str) -> Result<Self, ValidationError> {
    let invalid = |reason: &str| ValidationError::InvalidVersion {
      input: input.to_string(),
      reason: reason.to_string(),
    };

    if input.is_empty() {
      return Err(invalid("version is empty"));
    }
    if input.chars().any(char::is_whitespace) {
      return Err(invalid("version contains whitespace"));
    }

    let (epoch, rest) = match input.split_once(':') {
      Some((epoch, rest)) => {
        if epoch.is_empty() || !epoch.chars().all(|c| c.is_ascii_digit()) {
          return Err(invalid("epoch must be a number"));
        }
        let epoch = epoch.parse::<u32>().map_err(|_| invalid("epoch is too large"))?;
        (Some(epoch), rest)
      }
      None => (None, input),
    };

    let (upstream, revision) = match rest.rsplit_once('-') {
      Some((upstream, revision)) => {
        if revision.is_empty() {
          return Err(invalid("revision after '-' is empty"));
        }
        if !revision.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '+' | '~')) {
          return Err(invalid("revision may only contain letters, digits and . + ~"));
        }
        (upstream, Some(revision.to_string()))
      }
      None => (rest, None),
    };

    if !upstream.starts_with(|c: char| c.is_ascii_digit()) {
      return Err(invalid("upstream version must start with a digit"));
    }
    let upstream_ok = upstream
      .chars()
      .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '+' | '~' | '-') || (c == ':' && epoch.is_some()));
    if !upstream_ok {
      return Err(invalid("upstream version may only contain letters, digits and . + ~ - :"));
    }

    Ok(Self {
      epoch,
      upstream: upstream.to_string(),
      revision,
    })
  }

  /// Propose the next version by incrementing the last numeric dot-component
  ///
  /// The epoch is kept, anything after the incremented digits is dropped,
  /// and an existing Debian revision restarts at 1.
  pub fn bump(&self) -> Self {
    let parts: Vec<&str> = self.upstream.split('.').collect();

    let upstream = match parts.iter().rposition(|p| p.starts_with(|c: char| c.is_ascii_digit())) {
      Some(idx) => {
        let component = parts[idx];
        let digits_end = component
          .find(|c: char| !c.is_ascii_digit())
          .unwrap_or(component.len());
        let mut next: Vec<String> = parts[..idx].iter().map(|s| s.to_string()).collect();
        next.push(increment_decimal(&component[..digits_end]));
        next.join(".")
      }
      None => format!("{}.1", self.upstream),
    };

    Self {
      epoch: self.epoch,
      upstream,
      revision: self.revision.as_ref().map(|_| "1".to_string()),
    }
  }
}

impl fmt::Display for DebianVersion {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if let Some(epoch) = self.epoch {
      write!(f, "{}:", epoch)?;
    }
    write!(f, "{}", self.upstream)?;
    if let Some(revision) = &self.revision {
      write!(f, "-{}", revision)?;
    }
    Ok(())
  }
}

/// Add one to a string of ASCII digits without overflowing
fn increment_decimal(digits: &str) -> String {
  let mut bytes = digits.as_bytes().to_vec();
  for byte in bytes.iter_mut().rev() {
    if *byte == b'9' {
      *byte = b'0';
    } else {
      *byte += 1;
      return String::from_utf8_lossy(&bytes).into_owned();
    }
  }
  format!("1{}", String::from_utf8_lossy(&bytes))
}

/// Convert a git tag into a version string
///
/// Strips `debian/` or `upstream/` namespaces and the configured prefix,
/// then undoes DEP-14 tag mangling (`%` for `:`, `_` for `~`, `#` padding).
pub fn version_from_tag(tag: &str, prefix: &str) -> String {
  let mut version = tag;
  for namespace in ["debian/", "upstream/"] {
    if let Some(stripped) = version.strip_prefix(namespace) {
      version = stripped;
      break;
    }
  }
  if !prefix.is_empty()
    && let Some(stripped) = version.strip_prefix(prefix)
  {
    version = stripped;
  }

  version.replace('%', ":").replace('_', "~").replace('#', "")
}

/// Where the current version was read from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VersionSource {
  /// The changelog parser
  Changelog,
  /// The latest git tag
  Tag,
  /// Nothing found; the configured fallback is proposed
  Fallback,
}

impl fmt::Display for VersionSource {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      VersionSource::Changelog => write!(f, "changelog"),
      VersionSource::Tag => write!(f, "git tag"),
      VersionSource::Fallback => write!(f, "default"),
    }
  }
}

/// Result of version inference, before the user confirms it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionProposal {
  pub source: VersionSource,
  pub current: Option<String>,
  pub proposed: String,
}

impl VersionProposal {
  /// Build a proposal from whatever current version was found
  ///
  /// The changelog wins over the tag. A current version that does not parse
  /// is reported and replaced by the fallback.
  pub fn infer(changelog_version: Option<String>, tag_version: Option<String>, fallback: &str) -> Self {
    let found = changelog_version
      .map(|v| (VersionSource::Changelog, v))
      .or_else(|| tag_version.map(|v| (VersionSource::Tag, v)));

    let Some((source, current)) = found else {
      return Self {
        source: VersionSource::Fallback,
        current: None,
        proposed: fallback.to_string(),
      };
    };

    match DebianVersion::parse(&current) {
      Ok(version) => Self {
        source,
        proposed: version.bump().to_string(),
        current: Some(current),
      },
      Err(e) => {
        tracing::warn!(%current, %source, error = %e, "cannot bump current version, using fallback");
        Self {
          source: VersionSource::Fallback,
          current: Some(current),
          proposed: fallback.to_string(),
        }
      }
    }
  }
}

/// Read the version of the newest changelog entry with the changelog parser
///
/// Returns `None` if the parser ran but printed nothing.
pub fn read_changelog_version(parser: &Path, changelog: &Path, cwd: &Path) -> WrapResult<Option<String>> {
  let command = format!("{} -l {} -S Version", parser.display(), changelog.display());
  let output = Command::new(parser)
    .current_dir(cwd)
    .arg("-l")
    .arg(changelog)
    .args(["-S", "Version"])
    .output()
    .map_err(|e| {
      WrapError::Tool(ToolError::SpawnFailed {
        command: command.clone(),
        reason: e.to_string(),
      })
    })?;

  if !output.status.success() {
    tracing::debug!(stderr = %String::from_utf8_lossy(&output.stderr).trim(), "changelog parser failed");
    return Err(WrapError::Tool(ToolError::Failed {
      command,
      status: output.status.to_string(),
    }));
  }

  let version = String::from_utf8_lossy(&output.stdout).trim().to_string();
  Ok(if version.is_empty() { None } else { Some(version) })
}
