use crate::core::error::{ConfigError, WrapError, WrapResult, ResultExt};
use crate::debian::version::DebianVersion;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Default distribution written into new changelog entries
pub const DEFAULT_DISTRIBUTION: &str = "unstable";

/// Commit count above which the user is asked whether to truncate
pub const DEFAULT_MAX_ENTRIES: usize = 30;

/// Configuration for dch-wrapper
/// Searched in order: .dch-wrapper.toml, debian/dch-wrapper.toml, .config/dch-wrapper.toml
///
/// Every field is optional; a project without a config file gets the defaults.
///
/// # Example
///
/// ```toml
/// distribution = "UNRELEASED"
/// max_entries = 50
/// tag_prefix = "release-"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WrapperConfig {
  /// Distribution for new entries (default: "unstable")
  pub distribution: String,

  /// Changelog path relative to the project root (default: "debian/changelog")
  pub changelog: PathBuf,

  /// Commit count above which truncation is offered (default: 30)
  pub max_entries: usize,

  /// Version proposed when neither the changelog nor a tag yields one
  pub fallback_version: String,

  /// Prefix stripped from git tags before reading them as versions (default: "v")
  pub tag_prefix: String,

  /// Include merge commits in the drafted entries
  pub include_merges: bool,

  /// dch executable name or path
  pub dch: String,

  /// Changelog parser executable name or path
  pub parsechangelog: String,

  /// File this config was loaded from (None when using defaults)
  #[serde(skip)]
  pub source: Option<PathBuf>,
}

impl Default for WrapperConfig {
  fn default() -> Self {
    Self {
      distribution: DEFAULT_DISTRIBUTION.to_string(),
      changelog: PathBuf::from("debian/changelog"),
      max_entries: DEFAULT_MAX_ENTRIES,
      fallback_version: "1.0.0".to_string(),
      tag_prefix: "v".to_string(),
      include_merges: false,
      dch: "dch".to_string(),
      parsechangelog: "dpkg-parsechangelog".to_string(),
      source: None,
    }
  }
}

impl WrapperConfig {
  /// Find config file in search order
  pub fn find_config_path(root: &Path) -> Option<PathBuf> {
    let candidates = vec![
      root.join(".dch-wrapper.toml"),
      root.join("debian").join("dch-wrapper.toml"),
      root.join(".config").join("dch-wrapper.toml"),
    ];

    candidates.into_iter().find(|p| p.is_file())
  }

  /// Load config for a project, falling back to defaults when no file exists
  pub fn load(root: &Path) -> WrapResult<Self> {
    let Some(config_path) = Self::find_config_path(root) else {
      tracing::debug!(root = %root.display(), "no config file, using defaults");
      return Ok(Self::default());
    };

    let content = fs::read_to_string(&config_path)
      .with_context(|| format!("Failed to read config from {}", config_path.display()))?;
    let mut config = Self::parse(&content)
      .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;
    config.source = Some(config_path.clone());
    config.validate(&config_path)?;

    tracing::debug!(path = %config_path.display(), "loaded config");
    Ok(config)
  }

  /// Parse config from TOML text
  pub fn parse(content: &str) -> WrapResult<Self> {
    Ok(toml_edit::de::from_str(content)?)
  }

  /// Validate field values
  pub fn validate(&self, path: &Path) -> WrapResult<()> {
    let invalid = |field: &str, reason: String| {
      WrapError::Config(ConfigError::InvalidValue {
        path: path.to_path_buf(),
        field: field.to_string(),
        reason,
      })
    };

    if self.max_entries == 0 {
      return Err(invalid("max_entries", "must be at least 1".to_string()));
    }

    if !is_valid_distribution(&self.distribution) {
      return Err(invalid(
        "distribution",
        format!("'{}' is empty or contains whitespace", self.distribution),
      ));
    }

    if let Err(e) = DebianVersion::parse(&self.fallback_version) {
      return Err(invalid("fallback_version", e.to_string()));
    }

    let escapes_root = self
      .changelog
      .components()
      .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
    if self.changelog.as_os_str().is_empty() || escapes_root {
      return Err(invalid(
        "changelog",
        "must be a relative path inside the project".to_string(),
      ));
    }

    if self.dch.trim().is_empty() {
      return Err(invalid("dch", "must not be empty".to_string()));
    }

    Ok(())
  }

  /// Changelog path as git prints it (forward slashes, relative to root)
  pub fn changelog_git_path(&self) -> String {
    self
      .changelog
      .components()
      .filter_map(|c| match c {
        Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
        _ => None,
      })
      .collect::<Vec<_>>()
      .join("/")
  }
}

/// Distribution names are single non-empty tokens
pub fn is_valid_distribution(name: &str) -> bool {
  !name.is_empty() && !name.chars().any(char::is_whitespace)
}
