//! Integration tests for `wharf install`

use crate::helpers::{TestProject, run_wharf, run_wharf_unchecked, stderr, stdout};
use anyhow::Result;

#[test]
fn test_install_dry_prints_pip_command() -> Result<()> {
  let project = TestProject::monorepo()?;
  let package_path = project.add_package_with(
    "lib-a",
    "[package]\nname = \"lib-a\"\nversion = \"1.0.0\"\nrequirements = [\"requests >=2.28,<3.0\"]\n",
    "__version__ = '1.0.0'\n",
  )?;

  let output = run_wharf(&package_path, &["install", "--dry"])?;
  let out = stdout(&output);
  assert!(out.contains("python -m pip install"));
  assert!(out.contains("requests>=2.28,<3.0"));
  // The package itself comes last.
  assert!(out.trim_end().ends_with("/."));
  Ok(())
}

#[test]
fn test_install_develop_mode_is_the_default() -> Result<()> {
  let project = TestProject::monorepo()?;
  let package_path = project.add_package("lib-a", "1.0.0")?;

  let output = run_wharf(&package_path, &["install", "--dry"])?;
  assert!(stdout(&output).contains("-e"));

  let output = run_wharf(&package_path, &["install", "--no-develop", "--dry"])?;
  assert!(!stdout(&output).contains("-e"));
  Ok(())
}

#[test]
fn test_install_siblings_precede_requirements() -> Result<()> {
  let project = TestProject::monorepo()?;
  project.add_package("lib-a", "1.0.0")?;
  let package_path = project.add_package_with(
    "lib-b",
    "[package]\nname = \"lib-b\"\nversion = \"1.0.0\"\nrequirements = [\"requests\"]\ninter-dependencies = [\"lib-a\"]\n",
    "__version__ = '1.0.0'\n",
  )?;

  let output = run_wharf(&package_path, &["install", "--dry"])?;
  let out = stdout(&output);
  let sibling = out.find("lib-a").expect("sibling path in command");
  let requirement = out.find("requests").expect("requirement in command");
  assert!(sibling < requirement, "sibling must be installed first: {}", out);
  Ok(())
}

#[test]
fn test_install_selector_mismatch_skips_with_warning() -> Result<()> {
  let project = TestProject::monorepo()?;
  project.add_package("lib-a", "1.0.0")?;
  let package_path = project.add_package_with(
    "lib-b",
    "[package]\nname = \"lib-b\"\nversion = \"1.0.0\"\ninter-dependencies = [\"lib-a ^2.0\"]\n",
    "__version__ = '1.0.0'\n",
  )?;

  let output = run_wharf(&package_path, &["install", "--dry"])?;
  assert!(stderr(&output).contains("does not match"));
  assert!(!stdout(&output).contains("lib-a"));
  Ok(())
}

#[test]
fn test_install_unknown_sibling_is_fatal() -> Result<()> {
  let project = TestProject::monorepo()?;
  let package_path = project.add_package_with(
    "lib-b",
    "[package]\nname = \"lib-b\"\nversion = \"1.0.0\"\ninter-dependencies = [\"no-such-package\"]\n",
    "__version__ = '1.0.0'\n",
  )?;

  let output = run_wharf_unchecked(&package_path, &["install", "--dry"])?;
  assert_eq!(output.status.code(), Some(1));
  assert!(stderr(&output).contains("no-such-package"));
  Ok(())
}

#[test]
fn test_install_no_inter_deps_leaves_siblings_out() -> Result<()> {
  let project = TestProject::monorepo()?;
  project.add_package("lib-a", "1.0.0")?;
  let package_path = project.add_package_with(
    "lib-b",
    "[package]\nname = \"lib-b\"\nversion = \"1.0.0\"\nrequirements = [\"lib-a\"]\n",
    "__version__ = '1.0.0'\n",
  )?;

  // Without resolution the sibling stays a plain registry requirement.
  let output = run_wharf(&package_path, &["install", "--no-inter-deps", "--dry"])?;
  let out = stdout(&output);
  assert!(out.contains(" lib-a "));
  assert!(!out.contains(&format!("{}", project.path.join("lib-a").display())));
  Ok(())
}

#[test]
fn test_install_hooks_surround_pip_in_dry_output() -> Result<()> {
  let project = TestProject::monorepo()?;
  let package_path = project.add_package_with(
    "lib-a",
    "[package]\nname = \"lib-a\"\nversion = \"1.0.0\"\n\n[install.hooks]\nbefore-develop = [\"echo before\"]\nafter-develop = [\"echo after\"]\n",
    "__version__ = '1.0.0'\n",
  )?;

  let output = run_wharf(&package_path, &["install", "--dry"])?;
  let out = stdout(&output);
  let before = out.find("echo before").expect("before hook");
  let pip = out.find("pip install").expect("pip command");
  let after = out.find("echo after").expect("after hook");
  assert!(before < pip && pip < after);
  Ok(())
}

#[test]
fn test_install_requires_a_package_directory() -> Result<()> {
  let project = TestProject::monorepo()?;
  project.add_package("lib-a", "1.0.0")?;

  // From the monorepo root there is no current package.
  let output = run_wharf_unchecked(&project.path, &["install", "--dry"])?;
  assert_eq!(output.status.code(), Some(1));
  Ok(())
}
