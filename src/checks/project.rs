//! Checks on the package checkout: git repository, debian/ directory, maintainer identity

use super::trait_def::{Check, CheckContext, CheckResult};
use crate::core::error::WrapResult;
use crate::core::vcs::SystemGit;
use crate::debian::identity::{Identity, IdentityOrigin};

/// The package root is inside a git work tree
pub struct GitRepoCheck;

impl Check for GitRepoCheck {
  fn name(&self) -> &str {
    "git-repository"
  }

  fn description(&self) -> &str {
    "Package root is inside a git repository"
  }

  fn run(&self, ctx: &CheckContext) -> WrapResult<CheckResult> {
    match SystemGit::open(&ctx.root) {
      Ok(git) => Ok(CheckResult::pass(
        self.name(),
        format!("Git work tree at {}", git.work_tree().display()),
      )),
      Err(e) => Ok(CheckResult::error(
        self.name(),
        e.to_string(),
        Some("Run from a git checkout of the package, or pass --cwd"),
      )),
    }
  }
}

/// The directory holding the changelog exists
pub struct DebianDirCheck;

impl Check for DebianDirCheck {
  fn name(&self) -> &str {
    "debian-directory"
  }

  fn description(&self) -> &str {
    "Package has a debian/ directory"
  }

  fn run(&self, ctx: &CheckContext) -> WrapResult<CheckResult> {
    let changelog = ctx.root.join(&ctx.config.changelog);
    let dir = changelog.parent().unwrap_or(&ctx.root);

    if !dir.is_dir() {
      return Ok(CheckResult::error(
        self.name(),
        format!("{} not found", dir.display()),
        Some("Run from the package root, or set `changelog` in .dch-wrapper.toml"),
      ));
    }

    if changelog.is_file() {
      Ok(CheckResult::pass(self.name(), format!("Found {}", changelog.display())))
    } else {
      Ok(CheckResult::warning(
        self.name(),
        format!("{} exists but has no changelog yet", dir.display()),
        Some("dch --create can start a new changelog"),
      ))
    }
  }
}

/// A maintainer name and address can be determined
pub struct IdentityCheck;

impl Check for IdentityCheck {
  fn name(&self) -> &str {
    "maintainer-identity"
  }

  fn description(&self) -> &str {
    "DEBFULLNAME/DEBEMAIL or git user.name/user.email are set"
  }

  fn run(&self, ctx: &CheckContext) -> WrapResult<CheckResult> {
    let Ok(git) = SystemGit::open(&ctx.root) else {
      return Ok(CheckResult::warning(
        self.name(),
        "Skipped: no git repository to read user.name/user.email from",
        None::<String>,
      ));
    };
    let identity = Identity::resolve(&git)?;

    let fallback =
      identity.name_origin == IdentityOrigin::Fallback || identity.email_origin == IdentityOrigin::Fallback;
    if fallback {
      return Ok(CheckResult::warning(
        self.name(),
        format!("Using placeholder identity {}", identity.display()),
        Some("git config user.name 'Your Name' && git config user.email you@example.com"),
      ));
    }

    Ok(CheckResult::pass(self.name(), format!("Entries will be signed by {}", identity.display())))
  }
}
