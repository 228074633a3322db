//! Install command implementation
//!
//! Assembles the full pip command line for a package: inter-dependencies
//! first, then declared requirements, then the package itself, so that a
//! sibling a package depends on is never shadowed by a registry release of
//! the same name.

use crate::core::error::{WharfError, WharfResult};
use crate::core::project::Project;
use crate::model::package::PackageModel;
use crate::model::requirements::{RequirementEntry, RequirementsList, VendoredRequirement};
use crate::resolver;
use std::io;
use std::path::Path;
use std::process::Command;

pub struct InstallOptions {
  /// Install the package editable (pip -e) and pull in test requirements
  pub develop: bool,
  /// Resolve monorepo siblings to local paths
  pub inter_deps: bool,
  /// Named extras to install alongside the base requirements
  pub extras: Vec<String>,
  pub upgrade: bool,
  pub quiet: bool,
  /// Explicit pip command; falls back to $PIP, then "python -m pip"
  pub pip: Option<String>,
  /// Extra arguments appended verbatim to the pip invocation
  pub pip_args: Vec<String>,
  /// Print the commands instead of running them
  pub dry: bool,
}

/// Run the install command
pub fn run_install(opts: InstallOptions) -> WharfResult<()> {
  let project = Project::load(&std::env::current_dir()?)?;
  let package = project.require_current_package()?;

  let reqs = collect_requirements(&project, package, &opts)?;

  let mut command = pip_command(opts.pip.as_deref());
  command.push("install".to_string());
  command.extend(reqs.to_pip_args(package.directory(), opts.develop));
  if opts.upgrade {
    command.push("--upgrade".to_string());
  }
  if opts.quiet {
    command.push("--quiet".to_string());
  }
  command.extend(opts.pip_args.iter().cloned());

  let hooks = &package.install.hooks;
  if opts.dry {
    for hook in hooks.before(opts.develop) {
      println!("$ {}", hook);
    }
    println!("$ {}", shell_join(&command));
    for hook in hooks.after(opts.develop) {
      println!("$ {}", hook);
    }
    return Ok(());
  }

  for hook in hooks.before(opts.develop) {
    run_shell(hook, package.directory())?;
  }
  run_command(&command, package.directory())?;
  for hook in hooks.after(opts.develop) {
    run_shell(hook, package.directory())?;
  }

  Ok(())
}

/// Everything the pip invocation should install, in order
fn collect_requirements(
  project: &Project,
  package: &PackageModel,
  opts: &InstallOptions,
) -> WharfResult<RequirementsList> {
  let mut reqs = RequirementsList::new();
  reqs.extend(package.data.requirements.clone());

  // Develop installs always pull in the test requirements; the "test"
  // extra is an alias for the same list.
  if opts.develop || opts.extras.iter().any(|e| e == "test") {
    reqs.extend(package.data.test_requirements.clone());
  }
  for extra in &opts.extras {
    if extra == "test" {
      continue;
    }
    let extra_reqs = package.data.extra_requirements.get(extra).ok_or_else(|| {
      WharfError::with_help(
        format!("Package '{}' declares no extra '{}'", package.name(), extra),
        "Declare it under [package.extra-requirements] in package.toml.",
      )
    })?;
    reqs.extend(extra_reqs.clone());
  }

  if opts.inter_deps && project.is_monorepo() {
    let resolution = resolver::resolve_inter_dependencies(&project.packages, package)?;
    for warning in &resolution.warnings {
      eprintln!("warning: {}", warning);
    }
    // A sibling resolved to a local path must not also reach pip as a
    // registry requirement, or pip may pull the registry release over it.
    reqs = reqs
      .into_iter()
      .filter(|entry| match entry {
        RequirementEntry::Registry(r) => !resolution.sibling_names.contains(&r.name),
        RequirementEntry::Vendored(_) => true,
      })
      .collect();
    resolution.prepend_onto(&mut reqs);
  }

  // The package itself goes last.
  reqs.append(RequirementEntry::Vendored(VendoredRequirement::path(".")));
  Ok(reqs)
}

fn pip_command(pip: Option<&str>) -> Vec<String> {
  let spec = pip
    .map(str::to_string)
    .or_else(|| std::env::var("PIP").ok())
    .unwrap_or_else(|| "python -m pip".to_string());
  spec.split_whitespace().map(str::to_string).collect()
}

fn run_command(command: &[String], directory: &Path) -> WharfResult<()> {
  let (program, args) = command
    .split_first()
    .ok_or_else(|| WharfError::message("Empty pip command"))?;
  let status = Command::new(program).args(args).current_dir(directory).status()?;
  if !status.success() {
    return Err(io::Error::other(format!("Command failed with {}: {}", status, shell_join(command))).into());
  }
  Ok(())
}

fn run_shell(script: &str, directory: &Path) -> WharfResult<()> {
  let status = Command::new("sh").arg("-c").arg(script).current_dir(directory).status()?;
  if !status.success() {
    return Err(io::Error::other(format!("Hook failed with {}: {}", status, script)).into());
  }
  Ok(())
}

fn shell_join(command: &[String]) -> String {
  command
    .iter()
    .map(|arg| {
      if arg.contains(char::is_whitespace) {
        format!("'{}'", arg)
      } else {
        arg.clone()
      }
    })
    .collect::<Vec<_>>()
    .join(" ")
}
