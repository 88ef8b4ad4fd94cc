//! End-to-end workflow tests

use crate::helpers::*;
use anyhow::Result;

#[test]
fn test_commits_since_tag_become_entries() -> Result<()> {
  let project = TestProject::new()?;
  project.commit_changes(3)?;

  project.run_ok(&["--no-interactive"])?;

  let calls = project.dch_calls()?;
  assert_eq!(
    calls,
    vec![
      "CALL [--changelog] [debian/changelog] [--newversion] [1.0.1-1] [--distribution] [unstable] \
       [--force-distribution] [--] [Change 3]",
      "CALL [--changelog] [debian/changelog] [--append] [--] [Change 2]",
      "CALL [--changelog] [debian/changelog] [--append] [--] [Change 1]",
      "CALL [--changelog] [debian/changelog] [--edit]",
    ]
  );

  // Identity comes from git config and reaches every call
  let env = project.dch_env()?;
  assert_eq!(env.len(), 4);
  assert!(env.iter().all(|l| l == "ENV DEBFULLNAME=Test User DEBEMAIL=test@example.com"));

  Ok(())
}

#[test]
fn test_environment_identity_is_not_overridden() -> Result<()> {
  let project = TestProject::new()?;
  project.commit_changes(1)?;

  let output = std::process::Command::new(env!("CARGO_BIN_EXE_dch-wrapper"))
    .current_dir(&project.path)
    .arg("--no-interactive")
    .env(
      "PATH",
      std::env::join_paths(
        std::iter::once(project.bin.clone()).chain(std::env::split_paths(&std::env::var_os("PATH").unwrap_or_default())),
      )?,
    )
    .env("DEBFULLNAME", "Env Maintainer")
    .env("DEBEMAIL", "env@example.org")
    .output()?;
  assert!(output.status.success(), "stderr: {}", stderr(&output));

  let env = project.dch_env()?;
  assert!(env.iter().all(|l| l == "ENV DEBFULLNAME=Env Maintainer DEBEMAIL=env@example.org"));
  Ok(())
}

#[test]
fn test_custom_message_replaces_history() -> Result<()> {
  let project = TestProject::new()?;
  project.commit_changes(5)?;

  project.run_ok(&["--no-interactive", "Rebuild against new toolchain"])?;

  let calls = project.dch_calls()?;
  assert_eq!(calls.len(), 2);
  assert!(calls[0].ends_with("[--] [Rebuild against new toolchain]"));
  assert_eq!(calls[1], "CALL [--changelog] [debian/changelog] [--edit]");
  Ok(())
}

#[test]
fn test_version_and_distribution_flags() -> Result<()> {
  let project = TestProject::new()?;
  project.commit_changes(1)?;

  project.run_ok(&[
    "--no-interactive",
    "--new-version",
    "2:2.0-1",
    "--distribution",
    "experimental",
  ])?;

  let calls = project.dch_calls()?;
  assert!(calls[0].contains("[--newversion] [2:2.0-1] [--distribution] [experimental]"));
  Ok(())
}

#[test]
fn test_invalid_version_flag_is_rejected() -> Result<()> {
  let project = TestProject::new()?;

  let output = project.run(&["--no-interactive", "--new-version", "banana"])?;
  assert_eq!(output.status.code(), Some(3));
  assert!(stderr(&output).contains("Invalid version 'banana'"));
  assert!(project.dch_calls()?.is_empty());
  Ok(())
}

#[test]
fn test_interactive_answers_override_proposals() -> Result<()> {
  let project = TestProject::new()?;
  project.commit_changes(1)?;

  // version (invalid, then valid), distribution
  let output = project.run_with_answers(&[], "not valid\n1.1.0-1\nUNRELEASED\n")?;
  assert!(output.status.success(), "stderr: {}", stderr(&output));
  assert!(stdout(&output).contains("New version [1.0.1-1]: "));
  assert!(stdout(&output).contains("Distribution [unstable]: "));

  let calls = project.dch_calls()?;
  assert!(calls[0].contains("[--newversion] [1.1.0-1] [--distribution] [UNRELEASED]"));
  Ok(())
}

#[test]
fn test_long_history_is_truncated_by_default() -> Result<()> {
  let project = TestProject::new()?;
  project.commit_changes(35)?;

  project.run_ok(&["--no-interactive"])?;

  let calls = project.dch_calls()?;
  // 30 entries plus the edit call
  assert_eq!(calls.len(), 31);
  assert!(calls[0].ends_with("[Change 35]"));
  assert!(calls[29].ends_with("[Change 6]"));
  Ok(())
}

#[test]
fn test_all_commits_keeps_everything() -> Result<()> {
  let project = TestProject::new()?;
  project.commit_changes(35)?;

  project.run_ok(&["--no-interactive", "--all-commits"])?;

  assert_eq!(project.dch_calls()?.len(), 36);
  Ok(())
}

#[test]
fn test_declining_truncation_keeps_everything() -> Result<()> {
  let project = TestProject::new()?;
  project.commit_changes(32)?;

  // keep version, keep distribution, decline truncation
  let output = project.run_with_answers(&[], "\n\nn\n")?;
  assert!(output.status.success(), "stderr: {}", stderr(&output));
  assert!(stdout(&output).contains("Found 32 commits since v1.0.0. Keep only the 30 most recent? (Y/n): "));
  assert_eq!(project.dch_calls()?.len(), 33);
  Ok(())
}

#[test]
fn test_no_commits_since_tag_uses_placeholder() -> Result<()> {
  let project = TestProject::new()?;

  project.run_ok(&["--no-interactive"])?;

  let calls = project.dch_calls()?;
  assert_eq!(calls.len(), 2);
  assert!(calls[0].ends_with("[--] [No changes since v1.0.0]"));
  Ok(())
}

#[test]
fn test_missing_dch_names_devscripts() -> Result<()> {
  let project = TestProject::new()?;
  project.write_file(".dch-wrapper.toml", "dch = \"/nonexistent/dch\"\n")?;
  project.commit("Configure dch-wrapper")?;

  let output = project.run(&["--no-interactive"])?;
  assert_eq!(output.status.code(), Some(2));
  let err = stderr(&output);
  assert!(err.contains("Command not found: /nonexistent/dch"));
  assert!(err.contains("devscripts"));
  Ok(())
}

#[test]
fn test_missing_debian_dir() -> Result<()> {
  let project = TestProject::bare()?;
  project.write_file("README", "no packaging here\n")?;
  project.commit("Initial commit")?;

  let output = project.run(&["--no-interactive"])?;
  assert_eq!(output.status.code(), Some(3));
  assert!(stderr(&output).contains("No debian directory found"));
  assert!(project.dch_calls()?.is_empty());
  Ok(())
}

#[test]
fn test_failing_dch_stops_the_workflow() -> Result<()> {
  let project = TestProject::new()?;
  project.commit_changes(2)?;
  std::fs::write(project.bin.join("dch"), "#!/bin/sh\nexit 7\n")?;

  let output = project.run(&["--no-interactive"])?;
  assert_eq!(output.status.code(), Some(2));
  assert!(stderr(&output).contains("--newversion 1.0.1-1"));
  Ok(())
}

#[test]
fn test_json_requires_dry_run() -> Result<()> {
  let project = TestProject::new()?;

  let output = project.run(&["--no-interactive", "--json"])?;
  assert!(!output.status.success());
  assert!(stderr(&output).contains("--json needs --dry-run or --check"));
  Ok(())
}
