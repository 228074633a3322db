//! Integration tests for `wharf check`

use crate::helpers::{TestProject, run_wharf, run_wharf_unchecked, stdout};
use anyhow::Result;

#[test]
fn test_check_passes_on_consistent_monorepo() -> Result<()> {
  let project = TestProject::monorepo()?;
  project.add_package("lib-a", "0.1.0")?;
  project.add_package("lib-b", "1.2.0")?;

  let output = run_wharf(&project.path, &["check"])?;
  assert!(stdout(&output).contains("All checks passed"));
  Ok(())
}

#[test]
fn test_check_reports_version_mismatch() -> Result<()> {
  let project = TestProject::monorepo()?;
  let package_path = project.add_package("lib-a", "0.1.0")?;
  std::fs::write(
    package_path.join("src/lib_a.py"),
    "__author__ = 'Test Author <test@example.com>'\n__version__ = '0.2.0'\n",
  )?;

  // Warnings alone do not fail the run outside strict mode.
  let output = run_wharf(&project.path, &["check"])?;
  let out = stdout(&output);
  assert!(out.contains("inconsistent package version"));
  assert!(out.contains("0.1.0"));
  assert!(out.contains("0.2.0"));
  Ok(())
}

#[test]
fn test_check_strict_exits_with_validation_code() -> Result<()> {
  let project = TestProject::monorepo()?;
  let package_path = project.add_package("lib-a", "0.1.0")?;
  std::fs::write(
    package_path.join("src/lib_a.py"),
    "__author__ = 'Test Author <test@example.com>'\n__version__ = '0.2.0'\n",
  )?;

  let output = run_wharf_unchecked(&project.path, &["check", "--strict"])?;
  assert_eq!(output.status.code(), Some(3));
  Ok(())
}

#[test]
fn test_check_from_package_directory_targets_one_package() -> Result<()> {
  let project = TestProject::monorepo()?;
  let package_path = project.add_package("lib-a", "0.1.0")?;
  // lib-b is broken but must stay out of a lib-a-scoped run.
  project.add_package_with("lib-b", "[package]\nname = \"lib-b\"\nversion = \"1.0.0\"\n", "")?;
  std::fs::remove_file(project.path.join("lib-b/src/lib_b.py"))?;

  let output = run_wharf(&package_path, &["check"])?;
  assert!(stdout(&output).contains("All checks passed"));
  Ok(())
}

#[test]
fn test_check_json_output() -> Result<()> {
  let project = TestProject::monorepo()?;
  project.add_package_with("lib-a", "[package]\nname = \"lib-a\"\nversion = \"1.0.0\"\n", "__version__ = '1.0.0'\n")?;

  let output = run_wharf(&project.path, &["check", "--json"])?;
  let findings: serde_json::Value = serde_json::from_str(&stdout(&output))?;
  let findings = findings.as_array().expect("array of findings");

  // lib-a declares no author/license/url, so the field check fires.
  assert!(findings.iter().any(|f| {
    f["package"] == "lib-a" && f["check_name"] == "metadata-fields" && f["severity"] == "warning"
  }));
  Ok(())
}

#[test]
fn test_check_respects_linter_disable() -> Result<()> {
  let project = TestProject::monorepo()?;
  project.add_package_with(
    "lib-a",
    "[package]\nname = \"lib-a\"\nversion = \"1.0.0\"\n\n[linter]\ndisable = [\"metadata-fields\"]\n",
    "__version__ = '1.0.0'\n",
  )?;

  let output = run_wharf(&project.path, &["check", "--strict"])?;
  assert!(stdout(&output).contains("All checks passed"));
  Ok(())
}

#[test]
fn test_check_without_configuration_fails() -> Result<()> {
  let project = TestProject::standalone()?;
  let output = run_wharf_unchecked(&project.path, &["check"])?;
  assert_eq!(output.status.code(), Some(1));
  Ok(())
}
