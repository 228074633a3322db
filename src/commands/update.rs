//! Update command implementation

use crate::core::error::{ExitCode, WharfResult};
use crate::core::project::Project;
use crate::render::{WriteOutcome, render_package, write_file};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct UpdateEntry {
  package: String,
  path: String,
  outcome: WriteOutcome,
}

/// Run the update command
pub fn run_update(dry: bool, force: bool, json: bool) -> WharfResult<()> {
  let project = Project::load(&std::env::current_dir()?)?;
  let mut entries = Vec::new();

  for package in project.target_packages() {
    for file in render_package(package, project.monorepo.as_ref()) {
      let outcome = write_file(&file, force, dry)?;
      entries.push(UpdateEntry {
        package: package.name().to_string(),
        path: file.path.display().to_string(),
        outcome,
      });
    }
  }

  if json {
    println!("{}", serde_json::to_string_pretty(&entries)?);
  } else {
    print_update_report(&entries, dry);
  }

  if entries.iter().any(|e| e.outcome == WriteOutcome::Conflict) {
    std::process::exit(ExitCode::Validation.as_i32());
  }

  Ok(())
}

fn print_update_report(entries: &[UpdateEntry], dry: bool) {
  if dry {
    println!("🔍 Dry-run mode (no changes applied)");
    println!();
  }

  for entry in entries {
    let icon = match entry.outcome {
      WriteOutcome::Created => "✅",
      WriteOutcome::Updated => "♻️ ",
      WriteOutcome::Unchanged => "  ",
      WriteOutcome::Conflict => "🚫",
    };
    println!("{} {:<9} {}", icon, entry.outcome.to_string(), entry.path);
  }

  let changed = entries
    .iter()
    .filter(|e| matches!(e.outcome, WriteOutcome::Created | WriteOutcome::Updated))
    .count();
  let conflicts = entries.iter().filter(|e| e.outcome == WriteOutcome::Conflict).count();

  println!();
  if changed == 0 && conflicts == 0 {
    println!("Everything up to date");
  } else {
    println!("{} file(s) changed", changed);
  }
  if conflicts > 0 {
    println!("{} file(s) differ from their generated content", conflicts);
    println!("Re-run with --force to overwrite them");
  }
}
