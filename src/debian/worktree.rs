//! Working tree cleanliness check
//!
//! `git status --porcelain` lines are `XY path` or `XY old -> new`.
//! A modified changelog blocks the run because dch would write on top of
//! the uncommitted edits; other modified files only warrant a warning.

/// One entry of porcelain status output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusEntry {
  /// Two-letter status code, e.g. ` M`, `??`, `R `
  pub code: String,
  /// Path (destination path for renames)
  pub path: String,
  /// Source path of a rename or copy
  pub original: Option<String>,
}

impl StatusEntry {
  /// Parse a single porcelain v1 line
  pub fn parse(line: &str) -> Option<Self> {
    if line.len() < 4 || !line.is_char_boundary(2) || !line.is_char_boundary(3) {
      return None;
    }
    let code = line[..2].to_string();
    let rest = unquote(&line[3..]);

    let (original, path) = match rest.split_once(" -> ") {
      Some((from, to)) => (Some(unquote(from)), unquote(to)),
      None => (None, rest),
    };

    Some(Self { code, path, original })
  }

  /// Whether this entry touches `path`
  ///
  /// A directory entry (`?? debian/`) touches every path below it.
  pub fn touches(&self, path: &str) -> bool {
    let covers = |entry: &str| entry == path || (entry.ends_with('/') && path.starts_with(entry));
    covers(self.path.as_str()) || self.original.as_deref().is_some_and(covers)
  }
}

impl std::fmt::Display for StatusEntry {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match &self.original {
      Some(original) => write!(f, "{} {} -> {}", self.code, original, self.path),
      None => write!(f, "{} {}", self.code, self.path),
    }
  }
}

/// Strip the quotes git adds around paths with special characters
fn unquote(path: &str) -> String {
  path
    .strip_prefix('"')
    .and_then(|p| p.strip_suffix('"'))
    .map(|p| p.replace("\\\"", "\"").replace("\\\\", "\\"))
    .unwrap_or_else(|| path.to_string())
}

/// Classification of the working tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorktreeState {
  /// Nothing to commit
  Clean,
  /// The changelog itself has uncommitted changes (hard stop)
  ChangelogDirty(Vec<StatusEntry>),
  /// Other files have uncommitted changes (warn and ask)
  OtherDirty(Vec<StatusEntry>),
}

impl WorktreeState {
  /// Classify porcelain output against the changelog path (git-style, relative to root)
  pub fn classify(porcelain: &str, changelog: &str) -> Self {
    let entries: Vec<StatusEntry> = porcelain
      .lines()
      .filter(|line| !line.trim().is_empty())
      .filter_map(StatusEntry::parse)
      .collect();

    if entries.is_empty() {
      return WorktreeState::Clean;
    }

    if entries.iter().any(|e| e.touches(changelog)) {
      return WorktreeState::ChangelogDirty(entries);
    }

    WorktreeState::OtherDirty(entries)
  }
}
