mod checks;
mod commands;
mod core;
mod metadata;
mod model;
mod render;
mod resolver;

use crate::core::error::{WharfError, print_error};
use clap::{Parser, Subcommand};

/// Manage versions, metadata and packaging files of Python monorepos
#[derive(Parser)]
#[command(name = "wharf")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(styles = get_styles())]
struct WharfCli {
  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Run consistency and metadata checks
  Check {
    /// Treat warnings as errors (exit code 3)
    #[arg(long)]
    strict: bool,
    /// Output results in JSON format
    #[arg(long)]
    json: bool,
  },

  /// Regenerate packaging files (setup.py, namespace shims)
  Update {
    /// Show what would be written without touching anything
    #[arg(long)]
    dry: bool,
    /// Overwrite files that differ from their generated content
    #[arg(long)]
    force: bool,
    /// Output results in JSON format
    #[arg(long)]
    json: bool,
  },

  /// Install the current package and its dependencies via pip
  Install {
    /// Editable install pulling in test requirements (the default)
    #[arg(long, visible_alias = "dev", overrides_with = "no_develop")]
    develop: bool,
    /// Plain install, without editable mode or test requirements
    #[arg(long, overrides_with = "develop")]
    no_develop: bool,
    /// Do not resolve monorepo siblings to local paths
    #[arg(long)]
    no_inter_deps: bool,
    /// Install a named extra (repeatable)
    #[arg(long)]
    extra: Vec<String>,
    /// Pass --upgrade to pip
    #[arg(long)]
    upgrade: bool,
    /// Pass --quiet to pip
    #[arg(long, short)]
    quiet: bool,
    /// Pip command to use (default: $PIP, then "python -m pip")
    #[arg(long)]
    pip: Option<String>,
    /// Show the commands without running them
    #[arg(long)]
    dry: bool,
    /// Additional arguments passed to pip verbatim
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pip_args: Vec<String>,
  },

  /// Bump the version in package.toml and the source __version__
  Bump {
    /// Bump the major component
    #[arg(long, conflicts_with_all = ["minor", "patch", "to"])]
    major: bool,
    /// Bump the minor component
    #[arg(long, conflicts_with_all = ["patch", "to"])]
    minor: bool,
    /// Bump the patch component (default)
    #[arg(long, conflicts_with = "to")]
    patch: bool,
    /// Set an explicit version instead of bumping
    #[arg(long, value_name = "VERSION")]
    to: Option<String>,
    /// Show the bump without applying it
    #[arg(long)]
    dry: bool,
  },

  /// Show declared vs. source-embedded versions of all packages
  Status {
    /// Output status in JSON format
    #[arg(long)]
    json: bool,
  },
}

fn get_styles() -> clap::builder::Styles {
  clap::builder::Styles::styled()
    .usage(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .header(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .literal(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))))
    .invalid(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .error(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .valid(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))),
    )
    .placeholder(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::White))))
}

fn main() {
  let cli = WharfCli::parse();

  let result = match cli.command {
    Commands::Check { strict, json } => commands::run_check(strict, json),
    Commands::Update { dry, force, json } => commands::run_update(dry, force, json),
    Commands::Install {
      develop: _,
      no_develop,
      no_inter_deps,
      extra,
      upgrade,
      quiet,
      pip,
      dry,
      pip_args,
    } => commands::run_install(commands::InstallOptions {
      develop: !no_develop,
      inter_deps: !no_inter_deps,
      extras: extra,
      upgrade,
      quiet,
      pip,
      pip_args,
      dry,
    }),
    Commands::Bump {
      major,
      minor,
      patch: _,
      to,
      dry,
    } => commands::run_bump(major, minor, to, dry),
    Commands::Status { json } => commands::run_status(json),
  };

  if let Err(err) = result {
    handle_error(err);
  }
}

fn handle_error(err: WharfError) -> ! {
  print_error(&err);
  std::process::exit(err.exit_code().as_i32());
}
