//! Integration tests for `wharf bump`

use crate::helpers::{TestProject, run_wharf, run_wharf_unchecked, stdout};
use anyhow::Result;

#[test]
fn test_bump_patch_is_the_default() -> Result<()> {
  let project = TestProject::monorepo()?;
  let package_path = project.add_package("lib-a", "1.0.0")?;

  let output = run_wharf(&package_path, &["bump"])?;
  assert!(stdout(&output).contains("1.0.0 -> 1.0.1"));
  assert!(project.read_file("lib-a/package.toml")?.contains("version = \"1.0.1\""));
  assert!(project.read_file("lib-a/src/lib_a.py")?.contains("__version__ = '1.0.1'"));
  Ok(())
}

#[test]
fn test_bump_major_and_minor() -> Result<()> {
  let project = TestProject::monorepo()?;
  let package_path = project.add_package("lib-a", "1.2.3")?;

  run_wharf(&package_path, &["bump", "--minor"])?;
  assert!(project.read_file("lib-a/package.toml")?.contains("version = \"1.3.0\""));

  run_wharf(&package_path, &["bump", "--major"])?;
  assert!(project.read_file("lib-a/package.toml")?.contains("version = \"2.0.0\""));
  Ok(())
}

#[test]
fn test_bump_to_explicit_version_prints_tag() -> Result<()> {
  let project = TestProject::monorepo()?;
  let package_path = project.add_package("lib-a", "1.0.0")?;

  let output = run_wharf(&package_path, &["bump", "--to", "2.5.0"])?;
  assert!(stdout(&output).contains("lib-a@2.5.0"));
  assert!(project.read_file("lib-a/src/lib_a.py")?.contains("__version__ = '2.5.0'"));
  Ok(())
}

#[test]
fn test_bump_preserves_config_formatting() -> Result<()> {
  let project = TestProject::monorepo()?;
  let package_path = project.add_package_with(
    "lib-a",
    "# release config for lib-a\n[package]\nname = \"lib-a\"\nversion = \"1.0.0\"  # managed by wharf\n",
    "__version__ = '1.0.0'\n",
  )?;

  run_wharf(&package_path, &["bump"])?;

  let config = project.read_file("lib-a/package.toml")?;
  assert!(config.contains("# release config for lib-a"));
  assert!(config.contains("version = \"1.0.1\""));
  assert!(config.contains("# managed by wharf"));
  Ok(())
}

#[test]
fn test_bump_leaves_other_source_lines_alone() -> Result<()> {
  let project = TestProject::monorepo()?;
  let package_path = project.add_package_with(
    "lib-a",
    "[package]\nname = \"lib-a\"\nversion = \"1.0.0\"\n",
    "\"\"\"Docstring.\"\"\"\n__author__ = 'Test Author <test@example.com>'\n__version__ = '1.0.0'\n\nx = 1\n",
  )?;

  run_wharf(&package_path, &["bump"])?;

  let source = project.read_file("lib-a/src/lib_a.py")?;
  assert!(source.contains("\"\"\"Docstring.\"\"\""));
  assert!(source.contains("__author__ = 'Test Author <test@example.com>'"));
  assert!(source.contains("__version__ = '1.0.1'"));
  assert!(source.contains("x = 1"));
  Ok(())
}

#[test]
fn test_bump_accepts_commented_version_line() -> Result<()> {
  let project = TestProject::monorepo()?;
  let package_path = project.add_package_with(
    "lib-a",
    "[package]\nname = \"lib-a\"\nversion = \"1.0.0\"\n",
    "__version__ = '1.0.0'  # managed\n",
  )?;

  run_wharf(&package_path, &["bump"])?;
  assert!(project.read_file("lib-a/src/lib_a.py")?.contains("__version__ = '1.0.1'"));
  Ok(())
}

#[test]
fn test_bump_refuses_non_literal_version() -> Result<()> {
  let project = TestProject::monorepo()?;
  let package_path = project.add_package_with(
    "lib-a",
    "[package]\nname = \"lib-a\"\nversion = \"1.0.0\"\n",
    "__version__ = get_version()\n",
  )?;

  let output = run_wharf_unchecked(&package_path, &["bump"])?;
  assert_eq!(output.status.code(), Some(1));
  // Nothing was touched.
  assert!(project.read_file("lib-a/package.toml")?.contains("version = \"1.0.0\""));
  assert!(project.read_file("lib-a/src/lib_a.py")?.contains("get_version()"));
  Ok(())
}

#[test]
fn test_bump_dry_changes_nothing() -> Result<()> {
  let project = TestProject::monorepo()?;
  let package_path = project.add_package("lib-a", "1.0.0")?;

  let output = run_wharf(&package_path, &["bump", "--dry"])?;
  assert!(stdout(&output).contains("1.0.0 -> 1.0.1"));
  assert!(project.read_file("lib-a/package.toml")?.contains("version = \"1.0.0\""));
  Ok(())
}

#[test]
fn test_bump_requires_a_declared_version() -> Result<()> {
  let project = TestProject::monorepo()?;
  let package_path = project.add_package_with(
    "lib-a",
    "[package]\nname = \"lib-a\"\n",
    "__version__ = '1.0.0'\n",
  )?;

  let output = run_wharf_unchecked(&package_path, &["bump"])?;
  assert_eq!(output.status.code(), Some(1));
  Ok(())
}
