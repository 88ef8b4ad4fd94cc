mod checks;
mod commands;
mod core;
mod debian;
mod ui;

use clap::{ArgAction, Parser};
use core::error::{WrapError, print_error};
use is_terminal::IsTerminal;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Draft Debian changelog entries with dch from git history
///
/// Proposes the next version, collects commit subjects since the last tag,
/// adds them with dch and opens the result in your editor.
#[derive(Parser)]
#[command(name = "dch-wrapper")]
#[command(version, about, long_about = None)]
#[command(styles = get_styles())]
struct Cli {
  /// Use this message as the only entry instead of the git history
  message: Option<String>,

  /// Show what would be run without running dch
  #[arg(short = 'n', long)]
  dry_run: bool,

  /// Print the plan (with --dry-run) or check results (with --check) as JSON
  #[arg(long)]
  json: bool,

  /// Use this version instead of asking
  #[arg(long, value_name = "VERSION")]
  new_version: Option<String>,

  /// Use this distribution instead of asking
  #[arg(short, long, value_name = "NAME")]
  distribution: Option<String>,

  /// Never drop old commits from a long history
  #[arg(long)]
  all_commits: bool,

  /// Continue without asking when files other than the changelog are modified
  #[arg(long)]
  allow_dirty: bool,

  /// Always ask questions, even when stdin is not a terminal
  #[arg(long, overrides_with = "no_interactive")]
  interactive: bool,

  /// Never ask questions; take every default
  #[arg(long, overrides_with = "interactive")]
  no_interactive: bool,

  /// Run as if started in this directory
  #[arg(short = 'C', long, value_name = "PATH")]
  cwd: Option<PathBuf>,

  /// Run preflight checks only
  #[arg(long, conflicts_with_all = ["dry_run", "message", "new_version", "distribution"])]
  check: bool,

  /// More logging (-v debug, -vv trace)
  #[arg(short, long, action = ArgAction::Count)]
  verbose: u8,
}

impl Cli {
  fn interactive(&self) -> bool {
    if self.no_interactive {
      false
    } else if self.interactive {
      true
    } else {
      std::io::stdin().is_terminal()
    }
  }
}

fn get_styles() -> clap::builder::Styles {
  let yellow = anstyle::Color::Ansi(anstyle::AnsiColor::Yellow);
  let red = anstyle::Style::new()
    .bold()
    .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red)));

  clap::builder::Styles::styled()
    .usage(anstyle::Style::new().bold().underline().fg_color(Some(yellow)))
    .header(anstyle::Style::new().bold().underline().fg_color(Some(yellow)))
    .literal(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))))
    .invalid(red)
    .error(red)
    .valid(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))),
    )
    .placeholder(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::White))))
}

/// RUST_LOG wins; otherwise warnings, raised by -v
fn init_logging(verbose: u8) {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
    EnvFilter::new(match verbose {
      0 => "warn",
      1 => "debug",
      _ => "trace",
    })
  });

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_target(false)
    .with_writer(std::io::stderr)
    .init();
}

fn main() {
  let cli = Cli::parse();
  init_logging(cli.verbose);

  if let Err(err) = run(cli) {
    handle_error(err);
  }
}

fn run(cli: Cli) -> core::error::WrapResult<()> {
  let root = match &cli.cwd {
    Some(dir) => dir.clone(),
    None => std::env::current_dir()?,
  };
  if !root.is_dir() {
    return Err(WrapError::message(format!("Directory not found: {}", root.display())));
  }
  tracing::debug!(root = %root.display(), "project root");

  if cli.check {
    return commands::run_doctor(&root, cli.json);
  }

  if cli.json && !cli.dry_run {
    return Err(WrapError::with_help(
      "--json needs --dry-run or --check",
      "dch-wrapper --dry-run --json",
    ));
  }

  let ctx = core::context::ProjectContext::build(&root)?;
  let opts = commands::RunOptions {
    interactive: cli.interactive(),
    show_progress: cli.verbose == 0 && std::io::stderr().is_terminal(),
    message: cli.message,
    dry_run: cli.dry_run,
    json: cli.json,
    new_version: cli.new_version,
    distribution: cli.distribution,
    all_commits: cli.all_commits,
    allow_dirty: cli.allow_dirty,
  };

  commands::run_workflow(&ctx, &opts, &mut ui::prompts::Terminal)
}

fn handle_error(err: WrapError) -> ! {
  print_error(&err);
  std::process::exit(err.exit_code().as_i32());
}
