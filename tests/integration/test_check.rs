//! Preflight report (--check)

use crate::helpers::*;
use anyhow::Result;
use serde_json::Value;

#[test]
fn test_check_passes_in_a_prepared_project() -> Result<()> {
  let project = TestProject::new()?;

  let output = project.run_ok(&["--check"])?;
  let out = stdout(&output);
  assert!(out.contains("PASS  git-repository"));
  assert!(out.contains("PASS  dch"));
  assert!(out.contains("PASS  maintainer-identity"));
  assert!(out.contains("Summary: 5/5 checks passed"));
  assert!(project.dch_calls()?.is_empty());
  Ok(())
}

#[test]
fn test_check_fails_outside_git() -> Result<()> {
  let dir = tempfile::TempDir::new()?;
  std::fs::create_dir(dir.path().join("debian"))?;

  let output = std::process::Command::new(env!("CARGO_BIN_EXE_dch-wrapper"))
    .args(["--check", "--cwd"])
    .arg(dir.path())
    .output()?;

  assert_eq!(output.status.code(), Some(3));
  assert!(stdout(&output).contains("FAIL  git-repository"));
  assert!(stderr(&output).contains("preflight check(s) failed"));
  Ok(())
}

#[test]
fn test_check_json_reports_warnings() -> Result<()> {
  let project = TestProject::new()?;
  project.write_file(".dch-wrapper.toml", "parsechangelog = \"/nonexistent/parser\"\n")?;

  let output = project.run_ok(&["--check", "--json"])?;
  let results: Value = serde_json::from_slice(&output.stdout)?;
  let results = results.as_array().cloned().unwrap_or_default();
  assert_eq!(results.len(), 5);

  let parser = results
    .iter()
    .find(|r| r["check_name"] == "changelog-parser")
    .ok_or_else(|| anyhow::anyhow!("changelog-parser missing"))?;
  assert_eq!(parser["passed"], false);
  assert_eq!(parser["severity"], "Warning");
  Ok(())
}
