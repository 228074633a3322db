//! Integration tests for `wharf update`

use crate::helpers::{TestProject, run_wharf, run_wharf_unchecked, stdout};
use anyhow::Result;

#[test]
fn test_update_generates_setup_py() -> Result<()> {
  let project = TestProject::monorepo()?;
  project.add_package("lib-a", "0.1.0")?;

  run_wharf(&project.path, &["update"])?;

  let setup = project.read_file("lib-a/setup.py")?;
  assert!(setup.contains("name='lib-a'"));
  assert!(setup.contains("version='0.1.0'"));
  Ok(())
}

#[test]
fn test_update_is_idempotent() -> Result<()> {
  let project = TestProject::monorepo()?;
  project.add_package("lib-a", "0.1.0")?;

  run_wharf(&project.path, &["update"])?;
  let first = project.read_file("lib-a/setup.py")?;

  let output = run_wharf(&project.path, &["update"])?;
  assert!(stdout(&output).contains("Everything up to date"));
  assert_eq!(project.read_file("lib-a/setup.py")?, first);
  Ok(())
}

#[test]
fn test_update_dry_run_writes_nothing() -> Result<()> {
  let project = TestProject::monorepo()?;
  project.add_package("lib-a", "0.1.0")?;

  let output = run_wharf(&project.path, &["update", "--dry"])?;
  assert!(stdout(&output).contains("created"));
  assert!(!project.file_exists("lib-a/setup.py"));
  Ok(())
}

#[test]
fn test_update_protects_hand_edited_files() -> Result<()> {
  let project = TestProject::monorepo()?;
  project.add_package("lib-a", "0.1.0")?;
  run_wharf(&project.path, &["update"])?;

  project.write_file("lib-a/setup.py", "# hand edited\n")?;

  let output = run_wharf_unchecked(&project.path, &["update"])?;
  assert_eq!(output.status.code(), Some(3));
  assert!(stdout(&output).contains("--force"));
  assert_eq!(project.read_file("lib-a/setup.py")?, "# hand edited\n");

  run_wharf(&project.path, &["update", "--force"])?;
  assert!(project.read_file("lib-a/setup.py")?.contains("name='lib-a'"));
  Ok(())
}

#[test]
fn test_update_generates_namespace_shims() -> Result<()> {
  let project = TestProject::monorepo()?;
  let package_path = project.add_package_with(
    "acme-core",
    "[package]\nname = \"acme-core\"\nmodulename = \"acme.core\"\nversion = \"1.0.0\"\n",
    "",
  )?;
  std::fs::create_dir_all(package_path.join("src/acme/core"))?;
  std::fs::write(package_path.join("src/acme/core/__init__.py"), "__version__ = '1.0.0'\n")?;

  run_wharf(&project.path, &["update"])?;

  let shim = project.read_file("acme-core/src/acme/__init__.py")?;
  assert!(shim.contains("extend_path"));
  // The leaf module is real source code and must never be generated over.
  assert_eq!(
    project.read_file("acme-core/src/acme/core/__init__.py")?,
    "__version__ = '1.0.0'\n"
  );
  Ok(())
}

#[test]
fn test_update_json_output() -> Result<()> {
  let project = TestProject::monorepo()?;
  project.add_package("lib-a", "0.1.0")?;

  let output = run_wharf(&project.path, &["update", "--json"])?;
  let entries: serde_json::Value = serde_json::from_str(&stdout(&output))?;
  let entries = entries.as_array().expect("array of entries");
  assert!(entries.iter().any(|e| {
    e["package"] == "lib-a" && e["outcome"] == "created" && e["path"].as_str().unwrap().ends_with("setup.py")
  }));
  Ok(())
}
