//! Status command implementation

use crate::core::error::WharfResult;
use crate::core::project::Project;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct PackageStatus {
  package: String,
  declared: Option<String>,
  embedded: Option<String>,
  consistent: bool,
}

/// Run the status command
pub fn run_status(json: bool) -> WharfResult<()> {
  let project = Project::load(&std::env::current_dir()?)?;

  let mut rows = Vec::new();
  for package in project.target_packages() {
    let metadata = package.metadata();
    let embedded = match metadata.entry_file() {
      Ok(_) => metadata.version()?,
      Err(_) => None,
    };
    let declared = package.data.version.as_ref().map(|v| v.to_string());
    // Only two present values can disagree.
    let consistent = match (&declared, &embedded) {
      (Some(d), Some(e)) => d == e,
      _ => true,
    };
    rows.push(PackageStatus {
      package: package.name().to_string(),
      declared,
      embedded,
      consistent,
    });
  }

  if json {
    println!("{}", serde_json::to_string_pretty(&rows)?);
    return Ok(());
  }

  if let Some(monorepo) = &project.monorepo {
    match &monorepo.data.version {
      Some(version) => println!("📦 {} {}", monorepo.name(), version),
      None => println!("📦 {}", monorepo.name()),
    }
    println!();
  }

  println!("{:<3} {:<24} {:<12} {}", "", "package", "declared", "embedded");
  for row in &rows {
    let marker = if row.consistent { "✅" } else { "⚠️ " };
    println!(
      "{:<3} {:<24} {:<12} {}",
      marker,
      row.package,
      row.declared.as_deref().unwrap_or("-"),
      row.embedded.as_deref().unwrap_or("-")
    );
  }

  Ok(())
}
