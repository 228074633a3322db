//! Check command implementation

use crate::checks::{CheckResult, Severity, run_checks};
use crate::core::error::{ExitCode, WharfResult};
use crate::core::project::Project;

/// Run the check command
pub fn run_check(strict: bool, json: bool) -> WharfResult<()> {
  let project = Project::load(&std::env::current_dir()?)?;
  let targets = project.target_packages();
  let results = run_checks(&targets, project.monorepo.as_ref());

  if json {
    println!("{}", serde_json::to_string_pretty(&results)?);
  } else {
    print_check_report(&results, targets.len());
  }

  // Error findings mean a check could not run; those always fail the run.
  let has_errors = results.iter().any(|r| r.severity == Severity::Error);
  if has_errors || (strict && !results.is_empty()) {
    std::process::exit(ExitCode::Validation.as_i32());
  }

  Ok(())
}

fn print_check_report(results: &[CheckResult], package_count: usize) {
  if results.is_empty() {
    println!("✅ All checks passed ({} package(s))", package_count);
    return;
  }

  println!("⚠️  Found {} finding(s)", results.len());
  println!();

  // Results arrive grouped by package; print one header per group.
  let mut current: Option<&str> = None;
  for result in results {
    if current != Some(result.package.as_str()) {
      println!("📦 {}", result.package);
      current = Some(result.package.as_str());
    }
    println!("   {} [{}] {}", result.severity, result.check_name, result.message);
  }
  println!();
  println!("Silence a check per package via package.toml:");
  println!("  [linter]");
  println!("  disable = [\"consistency\"]");
}
