//! Working tree cleanliness handling

use crate::helpers::*;
use anyhow::Result;

#[test]
fn test_dirty_changelog_is_a_hard_stop() -> Result<()> {
  let project = TestProject::new()?;
  project.write_file("debian/changelog", &format!("{}\n# local edit\n", INITIAL_CHANGELOG))?;

  let output = project.run(&["--no-interactive", "--allow-dirty"])?;
  assert_eq!(output.status.code(), Some(3));
  let err = stderr(&output);
  assert!(err.contains("debian/changelog has uncommitted changes"));
  assert!(err.contains("git checkout -- debian/changelog"));
  assert!(project.dch_calls()?.is_empty());
  Ok(())
}

#[test]
fn test_dirty_changelog_stops_dry_run_too() -> Result<()> {
  let project = TestProject::new()?;
  project.write_file("debian/changelog", "garbage\n")?;

  let output = project.run(&["--dry-run"])?;
  assert_eq!(output.status.code(), Some(3));
  Ok(())
}

#[test]
fn test_other_dirty_files_abort_without_a_terminal() -> Result<()> {
  let project = TestProject::new()?;
  project.write_file("README", "edited\n")?;

  let output = project.run(&["--no-interactive"])?;
  assert!(!output.status.success());
  let err = stderr(&output);
  assert!(err.contains("README"));
  assert!(err.contains("--allow-dirty"));
  assert!(project.dch_calls()?.is_empty());
  Ok(())
}

#[test]
fn test_allow_dirty_continues() -> Result<()> {
  let project = TestProject::new()?;
  project.commit_changes(1)?;
  project.write_file("notes.txt", "untracked\n")?;

  project.run_ok(&["--no-interactive", "--allow-dirty"])?;
  assert_eq!(project.dch_calls()?.len(), 2);
  Ok(())
}

#[test]
fn test_dirty_prompt_defaults_to_no() -> Result<()> {
  let project = TestProject::new()?;
  project.write_file("README", "edited\n")?;

  let output = project.run_with_answers(&[], "\n")?;
  assert_eq!(output.status.code(), Some(1));
  assert!(stdout(&output).contains("Continue anyway? (y/N): "));
  assert!(stderr(&output).contains("Cancelled"));
  assert!(project.dch_calls()?.is_empty());
  Ok(())
}

#[test]
fn test_dirty_prompt_yes_continues() -> Result<()> {
  let project = TestProject::new()?;
  project.commit_changes(1)?;
  project.write_file("README", "edited\n")?;

  // continue, keep version, keep distribution
  let output = project.run_with_answers(&[], "Yes\n\n\n")?;
  assert!(output.status.success(), "stderr: {}", stderr(&output));
  assert_eq!(project.dch_calls()?.len(), 2);
  Ok(())
}

#[test]
fn test_package_in_subdirectory() -> Result<()> {
  let project = TestProject::bare()?;
  project.write_file("tools/hello/debian/changelog", INITIAL_CHANGELOG)?;
  project.commit("Add packaging")?;
  project.write_file("tools/hello/debian/changelog", "edited\n")?;

  let pkg = project.path.join("tools/hello");
  let output = project.run(&["--no-interactive", "--cwd", &pkg.to_string_lossy()])?;
  assert_eq!(output.status.code(), Some(3));
  assert!(stderr(&output).contains("tools/hello/debian/changelog has uncommitted changes"));
  Ok(())
}

#[test]
fn test_untracked_debian_dir_is_a_hard_stop() -> Result<()> {
  let project = TestProject::bare()?;
  project.write_file("README", "hello\n")?;
  project.commit("Initial import")?;
  project.write_file("debian/changelog", INITIAL_CHANGELOG)?;

  let output = project.run(&["--no-interactive", "--allow-dirty"])?;
  assert_eq!(output.status.code(), Some(3));
  assert!(stderr(&output).contains("debian/changelog has uncommitted changes"));
  assert!(project.dch_calls()?.is_empty());
  Ok(())
}
