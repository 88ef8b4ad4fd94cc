//! dch invocations: building the command lines and running them
//!
//! Phase 1 creates the new changelog entry with the first line and appends
//! the rest one call at a time. Phase 2 opens the entry in the user's editor.

use crate::core::error::{ToolError, WrapError, WrapResult};
use crate::ui::progress::EntryProgress;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

/// Arguments for one dch run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DchInvocation {
  pub args: Vec<String>,
}

impl DchInvocation {
  /// Render as a shell command line for display
  pub fn command_line(&self, program: &str) -> String {
    std::iter::once(program)
      .chain(self.args.iter().map(String::as_str))
      .map(shell_quote)
      .collect::<Vec<_>>()
      .join(" ")
  }
}

/// Everything needed to build the dch command lines
#[derive(Debug, Clone)]
pub struct DchPlan {
  pub changelog: PathBuf,
  pub version: String,
  pub distribution: String,
  pub entries: Vec<String>,
}

impl DchPlan {
  /// Phase 1: one invocation per entry
  pub fn append_invocations(&self) -> Vec<DchInvocation> {
    let changelog = self.changelog.to_string_lossy().into_owned();

    self
      .entries
      .iter()
      .enumerate()
      .map(|(i, entry)| {
        let mut args = vec!["--changelog".to_string(), changelog.clone()];
        if i == 0 {
          args.extend([
            "--newversion".to_string(),
            self.version.clone(),
            "--distribution".to_string(),
            self.distribution.clone(),
            "--force-distribution".to_string(),
          ]);
        } else {
          args.push("--append".to_string());
        }
        args.push("--".to_string());
        args.push(entry.clone());
        DchInvocation { args }
      })
      .collect()
  }

  /// Phase 2: open the changelog in the editor
  pub fn edit_invocation(&self) -> DchInvocation {
    DchInvocation {
      args: vec![
        "--changelog".to_string(),
        self.changelog.to_string_lossy().into_owned(),
        "--edit".to_string(),
      ],
    }
  }
}

/// Runs dch with the identity exports applied
pub struct DchRunner {
  program: PathBuf,
  cwd: PathBuf,
  env: Vec<(&'static str, String)>,
}

impl DchRunner {
  pub fn new(program: PathBuf, cwd: &Path, env: Vec<(&'static str, String)>) -> Self {
    Self {
      program,
      cwd: cwd.to_path_buf(),
      env,
    }
  }

  fn command(&self, invocation: &DchInvocation) -> (Command, String) {
    let command_line = invocation.command_line(&self.program.to_string_lossy());
    tracing::debug!(command = %command_line, "running dch");

    let mut cmd = Command::new(&self.program);
    cmd.current_dir(&self.cwd).args(&invocation.args);
    for (key, value) in &self.env {
      cmd.env(key, value);
    }
    (cmd, command_line)
  }

  /// Run one invocation to completion, inheriting the terminal
  pub fn run(&self, invocation: &DchInvocation) -> WrapResult<()> {
    let (mut cmd, command_line) = self.command(invocation);
    let status = cmd
      .stdin(Stdio::inherit())
      .stdout(Stdio::inherit())
      .stderr(Stdio::inherit())
      .status()
      .map_err(|e| spawn_failed(&command_line, e))?;

    check_status(status, command_line)
  }

  /// Run one invocation without a terminal, appending whatever it prints to `log`
  ///
  /// The output is kept even when dch fails so it can be shown with the error.
  fn run_captured(&self, invocation: &DchInvocation, log: &mut String) -> WrapResult<()> {
    let (mut cmd, command_line) = self.command(invocation);
    let output = cmd
      .stdin(Stdio::null())
      .output()
      .map_err(|e| spawn_failed(&command_line, e))?;

    log.push_str(&String::from_utf8_lossy(&output.stdout));
    log.push_str(&String::from_utf8_lossy(&output.stderr));
    check_status(output.status, command_line)
  }

  /// Phase 1: run every append invocation in order, stopping at the first failure
  ///
  /// With a progress bar, dch output is held back until the bar is done so
  /// the two never share the terminal.
  pub fn run_all(&self, invocations: &[DchInvocation], show_progress: bool) -> WrapResult<()> {
    if !show_progress || invocations.len() < 2 {
      return invocations.iter().try_for_each(|invocation| self.run(invocation));
    }

    let mut progress = EntryProgress::new(invocations.len());
    let mut captured = String::new();
    let mut result = Ok(());
    for invocation in invocations {
      if let Err(e) = self.run_captured(invocation, &mut captured) {
        result = Err(e);
        break;
      }
      progress.inc();
    }
    drop(progress);

    if !captured.is_empty() {
      eprint!("{}", captured);
    }
    result
  }
}

fn spawn_failed(command_line: &str, e: std::io::Error) -> WrapError {
  WrapError::Tool(ToolError::SpawnFailed {
    command: command_line.to_string(),
    reason: e.to_string(),
  })
}

fn check_status(status: ExitStatus, command_line: String) -> WrapResult<()> {
  if status.success() {
    Ok(())
  } else {
    Err(WrapError::Tool(ToolError::Failed {
      command: command_line,
      status: status.to_string(),
    }))
  }
}

/// Quote a word for POSIX shells when it contains anything unusual
pub fn shell_quote(word: &str) -> String {
  let plain = !word.is_empty()
    && word
      .chars()
      .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '/' | ':' | '=' | '+' | ',' | '@' | '~'));
  if plain {
    word.to_string()
  } else {
    format!("'{}'", word.replace('\'', r"'\''"))
  }
}
