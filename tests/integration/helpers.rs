//! Test helpers for integration tests

use anyhow::{Context, Result};
use std::io::Write;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

/// Records every call as `CALL [arg] [arg] ...` followed by the identity it saw
const FAKE_DCH: &str = r#"#!/bin/sh
{
  printf 'CALL'
  for arg in "$@"; do printf ' [%s]' "$arg"; done
  printf '\n'
  printf 'ENV DEBFULLNAME=%s DEBEMAIL=%s\n' "$DEBFULLNAME" "$DEBEMAIL"
} >> "@LOG@"
"#;

/// Prints the version of the top changelog entry (`-l <file> -S Version`)
const FAKE_PARSECHANGELOG: &str = r#"#!/bin/sh
sed -n '1s/^[^(]*(\([^)]*\)).*/\1/p' "$2"
"#;

pub const INITIAL_CHANGELOG: &str = "\
hello (1.0.0-1) unstable; urgency=medium

  * Initial release.

 -- Test User <test@example.com>  Mon, 01 Jan 2024 00:00:00 +0000
";

/// A package checkout with git history and fake Debian tools
pub struct TestProject {
  _root: TempDir,
  /// The git repository (package root)
  pub path: PathBuf,
  /// Directory holding the fake tools
  pub bin: PathBuf,
  /// Where the fake dch writes its calls
  pub dch_log: PathBuf,
}

impl TestProject {
  /// Repository with debian/changelog at 1.0.0-1, committed and tagged v1.0.0
  pub fn new() -> Result<Self> {
    let project = Self::bare()?;
    project.write_file("debian/changelog", INITIAL_CHANGELOG)?;
    project.write_file("README", "hello\n")?;
    project.commit("Initial packaging")?;
    project.tag("v1.0.0")?;
    Ok(project)
  }

  /// Repository with git configured but nothing committed
  pub fn bare() -> Result<Self> {
    let root = TempDir::new()?;
    let path = root.path().join("hello");
    let bin = root.path().join("bin");
    let dch_log = root.path().join("dch.log");
    std::fs::create_dir_all(&path)?;
    std::fs::create_dir_all(&bin)?;

    git(&path, &["init", "--initial-branch=main"])?;
    git(&path, &["config", "user.name", "Test User"])?;
    git(&path, &["config", "user.email", "test@example.com"])?;
    git(&path, &["config", "commit.gpgsign", "false"])?;
    git(&path, &["config", "tag.gpgsign", "false"])?;

    write_script(&bin.join("dch"), &FAKE_DCH.replace("@LOG@", &dch_log.to_string_lossy()))?;
    write_script(&bin.join("dpkg-parsechangelog"), FAKE_PARSECHANGELOG)?;

    Ok(Self {
      _root: root,
      path,
      bin,
      dch_log,
    })
  }

  pub fn write_file(&self, rel: &str, content: &str) -> Result<()> {
    let file = self.path.join(rel);
    if let Some(parent) = file.parent() {
      std::fs::create_dir_all(parent)?;
    }
    std::fs::write(file, content)?;
    Ok(())
  }

  /// Stage everything and commit
  pub fn commit(&self, message: &str) -> Result<()> {
    git(&self.path, &["add", "."])?;
    git(&self.path, &["commit", "-m", message])?;
    Ok(())
  }

  /// Commit `count` changes to a source file, numbered from 1
  pub fn commit_changes(&self, count: usize) -> Result<()> {
    for i in 1..=count {
      self.write_file("src.txt", &format!("change {}\n", i))?;
      self.commit(&format!("Change {}", i))?;
    }
    Ok(())
  }

  pub fn tag(&self, name: &str) -> Result<()> {
    git(&self.path, &["tag", name])?;
    Ok(())
  }

  /// Lines the fake dch recorded (empty if it never ran)
  pub fn dch_calls(&self) -> Result<Vec<String>> {
    if !self.dch_log.exists() {
      return Ok(Vec::new());
    }
    let log = std::fs::read_to_string(&self.dch_log)?;
    Ok(log.lines().filter(|l| l.starts_with("CALL")).map(String::from).collect())
  }

  /// Identity lines the fake dch recorded
  pub fn dch_env(&self) -> Result<Vec<String>> {
    if !self.dch_log.exists() {
      return Ok(Vec::new());
    }
    let log = std::fs::read_to_string(&self.dch_log)?;
    Ok(log.lines().filter(|l| l.starts_with("ENV")).map(String::from).collect())
  }

  fn command(&self, args: &[&str]) -> Command {
    let path = match std::env::var_os("PATH") {
      Some(existing) => {
        let mut dirs = vec![self.bin.clone()];
        dirs.extend(std::env::split_paths(&existing));
        std::env::join_paths(dirs).unwrap_or_else(|_| self.bin.clone().into_os_string())
      }
      None => self.bin.clone().into_os_string(),
    };

    let mut cmd = Command::new(env!("CARGO_BIN_EXE_dch-wrapper"));
    cmd
      .current_dir(&self.path)
      .args(args)
      .env("PATH", path)
      .env_remove("DEBFULLNAME")
      .env_remove("DEBEMAIL")
      .env_remove("RUST_LOG");
    cmd
  }

  /// Run dch-wrapper without stdin, whatever the outcome
  pub fn run(&self, args: &[&str]) -> Result<Output> {
    self
      .command(args)
      .stdin(Stdio::null())
      .output()
      .context("Failed to run dch-wrapper")
  }

  /// Run dch-wrapper and fail the test if it fails
  pub fn run_ok(&self, args: &[&str]) -> Result<Output> {
    let output = self.run(args)?;
    if !output.status.success() {
      anyhow::bail!(
        "dch-wrapper {} failed\nstdout: {}\nstderr: {}",
        args.join(" "),
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
      );
    }
    Ok(output)
  }

  /// Run dch-wrapper in interactive mode, answering prompts from `answers`
  pub fn run_with_answers(&self, args: &[&str], answers: &str) -> Result<Output> {
    let mut child = self
      .command(args)
      .arg("--interactive")
      .stdin(Stdio::piped())
      .stdout(Stdio::piped())
      .stderr(Stdio::piped())
      .spawn()
      .context("Failed to run dch-wrapper")?;

    if let Some(mut stdin) = child.stdin.take() {
      stdin.write_all(answers.as_bytes())?;
    }
    Ok(child.wait_with_output()?)
  }
}

fn write_script(path: &Path, content: &str) -> Result<()> {
  std::fs::write(path, content)?;
  std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))?;
  Ok(())
}

/// Run git command in a directory
pub fn git(cwd: &Path, args: &[&str]) -> Result<Output> {
  let output = Command::new("git")
    .current_dir(cwd)
    .args(args)
    .output()
    .context("Failed to run git command")?;

  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr);
    anyhow::bail!("Git command failed: git {}\n{}", args.join(" "), stderr);
  }

  Ok(output)
}

pub fn stdout(output: &Output) -> String {
  String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr(output: &Output) -> String {
  String::from_utf8_lossy(&output.stderr).into_owned()
}
