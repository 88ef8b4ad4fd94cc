//! Interactive prompts and confirmations
//!
//! # Design
//!
//! Prompts are only shown in interactive mode. In non-interactive mode every
//! prompt resolves to its default without reading input, so callers must
//! decide up front whether a default is acceptable (e.g. the dirty-tree
//! question refuses to continue unless `--allow-dirty` was given).
//!
//! Line input goes through the [`LineSource`] trait so tests can script the
//! answers.

use crate::core::error::{ResultExt, WrapResult};
use std::fmt::Display;
use std::io::{self, BufRead, Write};

/// Somewhere answers come from
pub trait LineSource {
  /// Show `message` and read one line; `None` on end of input
  fn read_line(&mut self, message: &str) -> WrapResult<Option<String>>;
}

/// Reads answers from stdin, writes questions to stdout
pub struct Terminal;

impl LineSource for Terminal {
  fn read_line(&mut self, message: &str) -> WrapResult<Option<String>> {
    let mut stdout = io::stdout();
    write!(stdout, "{}", message).context("Failed to write prompt")?;
    stdout.flush().context("Failed to write prompt")?;

    let mut line = String::new();
    let read = io::stdin().lock().read_line(&mut line).context("Failed to read answer")?;
    if read == 0 {
      println!();
      return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
  }
}

/// Pre-recorded answers, for tests
#[cfg(test)]
#[derive(Debug, Default)]
pub struct Scripted {
  answers: std::collections::VecDeque<String>,
  /// Every message shown, in order
  pub asked: Vec<String>,
}

#[cfg(test)]
impl Scripted {
  pub fn new<I, S>(answers: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    Self {
      answers: answers.into_iter().map(Into::into).collect(),
      asked: Vec::new(),
    }
  }
}

#[cfg(test)]
impl LineSource for Scripted {
  fn read_line(&mut self, message: &str) -> WrapResult<Option<String>> {
    self.asked.push(message.to_string());
    Ok(self.answers.pop_front())
  }
}

/// Prompt front-end that honours interactive mode
pub struct Prompter<'a> {
  source: &'a mut dyn LineSource,
  interactive: bool,
}

impl<'a> Prompter<'a> {
  pub fn new(source: &'a mut dyn LineSource, interactive: bool) -> Self {
    Self { source, interactive }
  }

  pub fn is_interactive(&self) -> bool {
    self.interactive
  }

  /// Ask a yes/no question
  ///
  /// Accepts y/yes and n/no in any case; anything else (including end of
  /// input) is the default.
  pub fn confirm(&mut self, message: &str, default: bool) -> WrapResult<bool> {
    if !self.interactive {
      return Ok(default);
    }

    let hint = if default { "(Y/n)" } else { "(y/N)" };
    let answer = self.source.read_line(&format!("{} {}: ", message, hint))?;

    Ok(match answer.as_deref().map(|a| a.trim().to_lowercase()) {
      Some(a) if a == "y" || a == "yes" => true,
      Some(a) if a == "n" || a == "no" => false,
      _ => default,
    })
  }

  /// Ask for a value until `validate` accepts it
  ///
  /// Empty input and end of input keep the default, which is NOT validated.
  pub fn input_with<E, F>(&mut self, message: &str, default: &str, validate: F) -> WrapResult<String>
  where
    E: Display,
    F: Fn(&str) -> Result<(), E>,
  {
    if !self.interactive {
      return Ok(default.to_string());
    }

    loop {
      let answer = self.source.read_line(&format!("{} [{}]: ", message, default))?;
      let value = match answer.as_deref().map(str::trim) {
        None | Some("") => return Ok(default.to_string()),
        Some(value) => value,
      };

      match validate(value) {
        Ok(()) => return Ok(value.to_string()),
        Err(e) => eprintln!("⚠️  {}", e),
      }
    }
  }
}
