//! The changelog workflow
//!
//! Steps, in order:
//! 1. Find dch
//! 2. Require the debian/ directory
//! 3. Resolve the maintainer identity
//! 4. Check the working tree
//! 5. Choose the new version
//! 6. Choose the distribution
//! 7. Collect the entries
//! 8. Run dch (or print what would run)

use crate::core::config::is_valid_distribution;
use crate::core::context::ProjectContext;
use crate::core::error::{ValidationError, WrapError, WrapResult};
use crate::core::tools;
use crate::debian::dch::{DchPlan, DchRunner};
use crate::debian::entries::{ChangelogEntries, UNREADABLE_HISTORY};
use crate::debian::identity::Identity;
use crate::debian::version::{self, DebianVersion, VersionProposal, VersionSource};
use crate::debian::worktree::WorktreeState;
use crate::ui::prompts::{LineSource, Prompter};
use serde::Serialize;
use std::path::Path;

/// Options from the command line
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
  /// Custom message; replaces the git history
  pub message: Option<String>,
  pub dry_run: bool,
  pub json: bool,
  pub new_version: Option<String>,
  pub distribution: Option<String>,
  pub all_commits: bool,
  pub allow_dirty: bool,
  pub interactive: bool,
  /// Draw a progress bar while appending entries
  pub show_progress: bool,
}

/// JSON document printed by `--dry-run --json`
#[derive(Debug, Serialize)]
struct PlanReport<'a> {
  version: &'a str,
  version_source: VersionSource,
  previous_version: Option<&'a str>,
  distribution: &'a str,
  changelog: String,
  identity: &'a Identity,
  entries: &'a [String],
  truncated: bool,
  commands: Vec<String>,
}

/// Run the whole workflow
pub fn run_workflow(ctx: &ProjectContext, opts: &RunOptions, input: &mut dyn LineSource) -> WrapResult<()> {
  // Dry runs never wait for answers
  let mut prompter = Prompter::new(input, opts.interactive && !opts.dry_run);
  let say = |line: String| {
    if !opts.json {
      println!("{}", line);
    }
  };

  let dch = tools::require(&ctx.config.dch)?;

  let debian_dir = ctx.debian_dir();
  if !debian_dir.is_dir() {
    return Err(WrapError::Validation(ValidationError::MissingDebianDir { path: debian_dir }));
  }

  let identity = Identity::resolve(&ctx.git)?;
  tracing::debug!(
    name_origin = ?identity.name_origin,
    email_origin = ?identity.email_origin,
    "resolved identity"
  );
  say(format!("👤 Maintainer: {}", identity.display()));

  check_worktree(ctx, opts, &mut prompter)?;

  let latest_tag = match ctx.git.latest_tag() {
    Ok(tag) => tag,
    Err(e) => {
      tracing::warn!(error = %e, "could not read tags");
      None
    }
  };
  tracing::debug!(tag = ?latest_tag, "latest tag");

  let proposal = propose_version(ctx, latest_tag.as_deref());
  if let Some(current) = &proposal.current {
    say(format!("📦 Current version: {} (from {})", current, proposal.source));
  }
  let new_version = choose_version(&proposal, opts.new_version.as_deref(), &mut prompter)?;
  tracing::info!(version = %new_version, "new version");

  let distribution = choose_distribution(&ctx.config.distribution, opts.distribution.as_deref(), &mut prompter)?;
  tracing::info!(%distribution, "distribution");

  let entries = collect_entries(ctx, opts, latest_tag.as_deref(), &mut prompter)?;
  tracing::info!(count = entries.lines.len(), origin = ?entries.origin, "changelog entries");

  let plan = DchPlan {
    changelog: ctx.config.changelog.clone(),
    version: new_version,
    distribution,
    entries: entries.lines.clone(),
  };

  if opts.dry_run {
    return print_plan(ctx, &plan, &proposal, &identity, &entries, opts.json);
  }

  let runner = DchRunner::new(dch, &ctx.root, identity.exports());

  println!(
    "📝 Adding {} entr{} to {} for {} ({})",
    plan.entries.len(),
    if plan.entries.len() == 1 { "y" } else { "ies" },
    ctx.config.changelog.display(),
    plan.version,
    plan.distribution
  );
  runner.run_all(&plan.append_invocations(), opts.show_progress)?;

  println!("✏️  Opening changelog in editor...");
  runner.run(&plan.edit_invocation())?;

  println!("✅ Changelog updated to {}", plan.version);
  Ok(())
}

/// Stop on a dirty changelog; ask before going on with other dirty files
fn check_worktree(ctx: &ProjectContext, opts: &RunOptions, prompter: &mut Prompter<'_>) -> WrapResult<()> {
  let changelog = ctx.changelog_status_path();
  let porcelain = match ctx.git.status_porcelain() {
    Ok(output) => output,
    Err(e) => {
      tracing::warn!(error = %e, "could not read git status, skipping working tree check");
      return Ok(());
    }
  };

  match WorktreeState::classify(&porcelain, &changelog) {
    WorktreeState::Clean => {
      tracing::debug!("working tree clean");
      Ok(())
    }
    WorktreeState::ChangelogDirty(_) => Err(WrapError::Validation(ValidationError::ChangelogDirty { path: changelog })),
    WorktreeState::OtherDirty(entries) => {
      eprintln!("⚠️  Uncommitted changes:");
      for entry in &entries {
        eprintln!("   {}", entry);
      }

      if opts.allow_dirty || opts.dry_run {
        return Ok(());
      }
      if !prompter.is_interactive() {
        return Err(WrapError::with_help(
          "Working tree has uncommitted changes",
          "Commit them first, or pass --allow-dirty to continue anyway.",
        ));
      }
      if prompter.confirm("Continue anyway?", false)? {
        Ok(())
      } else {
        Err(WrapError::aborted("uncommitted changes in working tree"))
      }
    }
  }
}

/// Find the current version and propose its successor
fn propose_version(ctx: &ProjectContext, latest_tag: Option<&str>) -> VersionProposal {
  let changelog = ctx.changelog_path();
  let from_changelog = if changelog.is_file() {
    match tools::which(&ctx.config.parsechangelog) {
      Some(parser) => match version::read_changelog_version(&parser, &ctx.config.changelog, &ctx.root) {
        Ok(found) => found,
        Err(e) => {
          tracing::warn!(error = %e, "could not read changelog version, falling back to git tags");
          None
        }
      },
      None => {
        tracing::debug!(parser = %ctx.config.parsechangelog, "changelog parser not installed");
        None
      }
    }
  } else {
    None
  };

  let from_tag = latest_tag.map(|tag| version::version_from_tag(tag, &ctx.config.tag_prefix));
  VersionProposal::infer(from_changelog, from_tag, &ctx.config.fallback_version)
}

fn choose_version(proposal: &VersionProposal, requested: Option<&str>, prompter: &mut Prompter<'_>) -> WrapResult<String> {
  if let Some(requested) = requested {
    let requested = requested.trim();
    DebianVersion::parse(requested)?;
    return Ok(requested.to_string());
  }

  prompter.input_with("New version", &proposal.proposed, |v| DebianVersion::parse(v).map(|_| ()))
}

fn choose_distribution(default: &str, requested: Option<&str>, prompter: &mut Prompter<'_>) -> WrapResult<String> {
  if let Some(requested) = requested {
    let requested = requested.trim();
    if !is_valid_distribution(requested) {
      return Err(WrapError::Validation(ValidationError::InvalidDistribution {
        input: requested.to_string(),
      }));
    }
    return Ok(requested.to_string());
  }

  prompter.input_with("Distribution", default, |d| {
    if is_valid_distribution(d) {
      Ok(())
    } else {
      Err(ValidationError::InvalidDistribution { input: d.to_string() })
    }
  })
}

fn collect_entries(
  ctx: &ProjectContext,
  opts: &RunOptions,
  latest_tag: Option<&str>,
  prompter: &mut Prompter<'_>,
) -> WrapResult<ChangelogEntries> {
  if let Some(message) = &opts.message {
    return Ok(ChangelogEntries::from_message(message)?);
  }

  let entries = match ctx.git.commit_subjects(latest_tag, ctx.config.include_merges) {
    Ok(subjects) => ChangelogEntries::from_subjects(subjects, latest_tag),
    Err(e) => {
      tracing::warn!(error = %e, "could not read git log");
      eprintln!("⚠️  Could not read git history, using a placeholder entry");
      ChangelogEntries::placeholder(UNREADABLE_HISTORY)
    }
  };

  limit_entries(entries, ctx.config.max_entries, opts.all_commits, latest_tag, prompter)
}

/// Offer to keep only the newest `max` entries
fn limit_entries(
  mut entries: ChangelogEntries,
  max: usize,
  all_commits: bool,
  latest_tag: Option<&str>,
  prompter: &mut Prompter<'_>,
) -> WrapResult<ChangelogEntries> {
  if all_commits || !entries.exceeds(max) {
    return Ok(entries);
  }

  let since = latest_tag.unwrap_or("the first commit");
  let question = format!(
    "Found {} commits since {}. Keep only the {} most recent?",
    entries.total, since, max
  );
  if prompter.confirm(&question, true)? {
    entries.truncate(max);
  }
  Ok(entries)
}

fn print_plan(
  ctx: &ProjectContext,
  plan: &DchPlan,
  proposal: &VersionProposal,
  identity: &Identity,
  entries: &ChangelogEntries,
  json: bool,
) -> WrapResult<()> {
  let program = ctx.config.dch.as_str();
  let mut invocations = plan.append_invocations();
  invocations.push(plan.edit_invocation());
  let commands: Vec<String> = invocations.iter().map(|i| i.command_line(program)).collect();

  if json {
    let report = PlanReport {
      version: &plan.version,
      version_source: proposal.source,
      previous_version: proposal.current.as_deref(),
      distribution: &plan.distribution,
      changelog: changelog_display(&plan.changelog),
      identity,
      entries: &plan.entries,
      truncated: entries.truncated,
      commands,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    return Ok(());
  }

  println!("\n🔍 Dry run: nothing will be changed\n");
  println!("Version:      {}", plan.version);
  println!("Distribution: {}", plan.distribution);
  println!("Changelog:    {}", changelog_display(&plan.changelog));
  if entries.truncated {
    println!("Entries:      {} of {}", plan.entries.len(), entries.total);
  } else {
    println!("Entries:      {}", plan.entries.len());
  }
  for entry in &plan.entries {
    println!("  * {}", entry);
  }

  println!("\nCommands:");
  for command in &commands {
    println!("  {}", command);
  }

  let exports = identity.exports();
  if !exports.is_empty() {
    println!("\nEnvironment:");
    for (key, value) in exports {
      println!("  {}={}", key, value);
    }
  }

  Ok(())
}

fn changelog_display(path: &Path) -> String {
  path.to_string_lossy().into_owned()
}
