//! Maintainer identity for changelog trailers (DEBFULLNAME / DEBEMAIL)
//!
//! dch reads the maintainer name and address from the environment. When the
//! user has not set them, they are taken from git config and handed to every
//! dch invocation through [`Identity::exports`]. The tool never modifies its
//! own process environment.

use crate::core::error::WrapResult;
use crate::core::vcs::SystemGit;
use serde::Serialize;

pub const ENV_EMAIL: &str = "DEBEMAIL";
pub const ENV_NAME: &str = "DEBFULLNAME";

const FALLBACK_NAME: &str = "Unknown";
const FALLBACK_EMAIL: &str = "unknown@example.com";

/// Where an identity value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentityOrigin {
  Environment,
  Git,
  Fallback,
}

/// Effective maintainer identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identity {
  pub name: String,
  pub name_origin: IdentityOrigin,
  pub email: String,
  pub email_origin: IdentityOrigin,
}

impl Identity {
  /// Resolve from the process environment, consulting git only when needed
  pub fn resolve(git: &SystemGit) -> WrapResult<Self> {
    let env_name = non_empty(std::env::var(ENV_NAME).ok());
    let env_email = non_empty(std::env::var(ENV_EMAIL).ok());

    if env_name.is_some() && env_email.is_some() {
      tracing::debug!("{} and {} already set", ENV_NAME, ENV_EMAIL);
      return Ok(Self::from_parts(env_name, env_email, None, None));
    }

    let git_name = if env_name.is_none() { git.config_value("user.name")? } else { None };
    let git_email = if env_email.is_none() { git.config_value("user.email")? } else { None };

    Ok(Self::from_parts(env_name, env_email, git_name, git_email))
  }

  /// Combine the candidate values; environment beats git beats the fallback
  pub fn from_parts(
    env_name: Option<String>,
    env_email: Option<String>,
    git_name: Option<String>,
    git_email: Option<String>,
  ) -> Self {
    let (name, name_origin) = pick(env_name, git_name, FALLBACK_NAME);
    let (email, email_origin) = pick(env_email, git_email, FALLBACK_EMAIL);
    Self {
      name,
      name_origin,
      email,
      email_origin,
    }
  }

  /// Variables that must be set on dch invocations (those not already in the environment)
  pub fn exports(&self) -> Vec<(&'static str, String)> {
    let mut vars = Vec::new();
    if self.name_origin != IdentityOrigin::Environment {
      vars.push((ENV_NAME, self.name.clone()));
    }
    if self.email_origin != IdentityOrigin::Environment {
      vars.push((ENV_EMAIL, self.email.clone()));
    }
    vars
  }

  /// `Name <email>` as it appears in a changelog trailer
  pub fn display(&self) -> String {
    format!("{} <{}>", self.name, self.email)
  }
}

fn pick(env: Option<String>, git: Option<String>, fallback: &str) -> (String, IdentityOrigin) {
  match (non_empty(env), non_empty(git)) {
    (Some(value), _) => (value, IdentityOrigin::Environment),
    (None, Some(value)) => (value, IdentityOrigin::Git),
    (None, None) => (fallback.to_string(), IdentityOrigin::Fallback),
  }
}

fn non_empty(value: Option<String>) -> Option<String> {
  value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}
