//! Locating external executables (dch, dpkg-parsechangelog) on PATH

use crate::core::error::{ToolError, WrapError, WrapResult};
use is_executable::IsExecutable;
use std::env;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// Find an executable by name on the current PATH
pub fn which(name: &str) -> Option<PathBuf> {
  find_executable(name, env::var_os("PATH").as_deref())
}

/// Find an executable by name on the given search path
///
/// Names containing a path separator are checked as-is and never searched.
pub fn find_executable(name: &str, search_path: Option<&OsStr>) -> Option<PathBuf> {
  if name.is_empty() {
    return None;
  }

  let candidate = Path::new(name);
  if candidate.components().count() > 1 {
    return is_runnable(candidate).then(|| candidate.to_path_buf());
  }

  let search_path = search_path?;
  env::split_paths(search_path)
    .filter(|dir| !dir.as_os_str().is_empty())
    .map(|dir| dir.join(name))
    .find(|path| is_runnable(path))
}

/// Like [`which`], but a missing executable is an error
pub fn require(name: &str) -> WrapResult<PathBuf> {
  let path = which(name).ok_or_else(|| WrapError::Tool(ToolError::NotFound { name: name.to_string() }))?;
  tracing::debug!(tool = name, path = %path.display(), "found executable");
  Ok(path)
}

fn is_runnable(path: &Path) -> bool {
  path.is_file() && path.is_executable()
}
