//! Preflight report (`--check`)
//!
//! Runs every built-in check against the package root and reports the
//! outcome. Blocking failures turn into a validation error so the exit
//! status tells scripts whether the workflow can run.

use std::path::Path;

use crate::checks::{CheckContext, CheckResult, Severity, create_default_runner};
use crate::core::config::WrapperConfig;
use crate::core::error::{ValidationError, WrapError, WrapResult};

/// Run the preflight checks and print a text or JSON report
pub fn run_doctor(root: &Path, json: bool) -> WrapResult<()> {
  let config = WrapperConfig::load(root)?;
  if let Some(source) = &config.source {
    tracing::debug!(config = %source.display(), "checks use project config");
  }

  let ctx = CheckContext {
    root: root.to_path_buf(),
    config,
  };

  let runner = create_default_runner();
  let results = runner.run_all(&ctx);

  if json {
    println!("{}", serde_json::to_string_pretty(&results)?);
  } else {
    println!("🏥 Running preflight checks in {}\n", root.display());
    println!("📋 Registered checks:");
    for check in runner.checks() {
      println!("   • {}: {}", check.name(), check.description());
    }
    println!();

    for result in &results {
      print_result(result);
    }

    let passed = results.iter().filter(|r| r.passed).count();
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("Summary: {}/{} checks passed", passed, results.len());
  }

  let failed = count_blocking(&results);
  if failed > 0 {
    return Err(WrapError::Validation(ValidationError::ChecksFailed { failed }));
  }

  if !json {
    if results.iter().any(|r| !r.passed) {
      println!("\n⚠️  Some warnings found. dch-wrapper will still run.");
    } else {
      println!("\n✨ All checks passed!");
    }
  }

  Ok(())
}

fn print_result(result: &CheckResult) {
  let label = match (result.passed, result.severity) {
    (true, _) => "PASS",
    (false, Severity::Error) => "FAIL",
    (false, _) => "WARN",
  };
  println!("{:<5} {:<20} {}", label, result.check_name, result.message);

  if !result.passed
    && let Some(suggestion) = &result.suggestion
  {
    println!("      💡 Fix: {}", suggestion);
  }
}

fn count_blocking(results: &[CheckResult]) -> usize {
  results.iter().filter(|r| r.is_blocking()).count()
}
