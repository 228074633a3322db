//! Integration tests for `wharf status`

use crate::helpers::{TestProject, run_wharf, stdout};
use anyhow::Result;

#[test]
fn test_status_lists_all_packages() -> Result<()> {
  let project = TestProject::monorepo()?;
  project.add_package("lib-a", "0.1.0")?;
  project.add_package("lib-b", "2.0.0")?;

  let output = run_wharf(&project.path, &["status"])?;
  let out = stdout(&output);
  assert!(out.contains("acme"));
  assert!(out.contains("lib-a"));
  assert!(out.contains("0.1.0"));
  assert!(out.contains("lib-b"));
  assert!(out.contains("2.0.0"));
  Ok(())
}

#[test]
fn test_status_json_flags_inconsistency() -> Result<()> {
  let project = TestProject::monorepo()?;
  project.add_package("lib-a", "0.1.0")?;
  let package_path = project.add_package("lib-b", "2.0.0")?;
  std::fs::write(package_path.join("src/lib_b.py"), "__version__ = '2.1.0'\n")?;

  let output = run_wharf(&project.path, &["status", "--json"])?;
  let rows: serde_json::Value = serde_json::from_str(&stdout(&output))?;
  let rows = rows.as_array().expect("array of rows");

  let a = rows.iter().find(|r| r["package"] == "lib-a").unwrap();
  assert_eq!(a["declared"], "0.1.0");
  assert_eq!(a["embedded"], "0.1.0");
  assert_eq!(a["consistent"], true);

  let b = rows.iter().find(|r| r["package"] == "lib-b").unwrap();
  assert_eq!(b["declared"], "2.0.0");
  assert_eq!(b["embedded"], "2.1.0");
  assert_eq!(b["consistent"], false);
  Ok(())
}

#[test]
fn test_status_handles_missing_source_metadata() -> Result<()> {
  let project = TestProject::monorepo()?;
  project.add_package_with("lib-a", "[package]\nname = \"lib-a\"\nversion = \"1.0.0\"\n", "x = 1\n")?;

  let output = run_wharf(&project.path, &["status", "--json"])?;
  let rows: serde_json::Value = serde_json::from_str(&stdout(&output))?;
  let row = &rows.as_array().unwrap()[0];
  assert_eq!(row["declared"], "1.0.0");
  assert_eq!(row["embedded"], serde_json::Value::Null);
  assert_eq!(row["consistent"], true);
  Ok(())
}
