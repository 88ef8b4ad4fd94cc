//! Checks for the external tools the workflow shells out to

use super::trait_def::{Check, CheckContext, CheckResult};
use crate::core::error::WrapResult;
use crate::core::tools;

/// dch is installed (required)
pub struct DchCheck;

impl Check for DchCheck {
  fn name(&self) -> &str {
    "dch"
  }

  fn description(&self) -> &str {
    "dch (devscripts) is on PATH"
  }

  fn run(&self, ctx: &CheckContext) -> WrapResult<CheckResult> {
    Ok(match tools::which(&ctx.config.dch) {
      Some(path) => CheckResult::pass(self.name(), format!("Found {}", path.display())),
      None => CheckResult::error(
        self.name(),
        format!("'{}' not found on PATH", ctx.config.dch),
        Some("sudo apt-get install devscripts"),
      ),
    })
  }
}

/// dpkg-parsechangelog is installed (optional; git tags are the fallback)
pub struct ChangelogParserCheck;

impl Check for ChangelogParserCheck {
  fn name(&self) -> &str {
    "changelog-parser"
  }

  fn description(&self) -> &str {
    "dpkg-parsechangelog is on PATH"
  }

  fn run(&self, ctx: &CheckContext) -> WrapResult<CheckResult> {
    Ok(match tools::which(&ctx.config.parsechangelog) {
      Some(path) => CheckResult::pass(self.name(), format!("Found {}", path.display())),
      None => CheckResult::warning(
        self.name(),
        format!(
          "'{}' not found; the current version will be read from git tags",
          ctx.config.parsechangelog
        ),
        Some("sudo apt-get install dpkg-dev"),
      ),
    })
  }
}
