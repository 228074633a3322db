//! Test helpers for integration tests

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// A test monorepo (or standalone package) on disk
pub struct TestProject {
  _root: TempDir,
  pub path: PathBuf,
}

impl TestProject {
  /// Create an empty directory without any wharf configuration
  pub fn standalone() -> Result<Self> {
    let root = TempDir::new()?;
    let path = root.path().to_path_buf();
    Ok(Self { _root: root, path })
  }

  /// Create a monorepo root with a monorepo.toml
  pub fn monorepo() -> Result<Self> {
    let project = Self::standalone()?;
    std::fs::write(
      project.path.join("monorepo.toml"),
      "[monorepo]\nname = \"acme\"\nversion = \"1.0.0\"\n",
    )?;
    Ok(project)
  }

  /// Add a package with complete metadata and a consistent source tree
  pub fn add_package(&self, name: &str, version: &str) -> Result<PathBuf> {
    self.add_package_with(
      name,
      &format!(
        r#"[package]
name = "{name}"
version = "{version}"
author = "Test Author <test@example.com>"
license = "MIT"
url = "https://example.com/{name}"
"#
      ),
      &format!("__author__ = 'Test Author <test@example.com>'\n__version__ = '{version}'\n"),
    )
  }

  /// Add a package with explicit package.toml content and entry-file source
  pub fn add_package_with(&self, name: &str, config: &str, source: &str) -> Result<PathBuf> {
    let package_path = self.path.join(name);
    let src = package_path.join("src");
    std::fs::create_dir_all(&src)?;
    std::fs::write(package_path.join("package.toml"), config)?;
    std::fs::write(src.join(format!("{}.py", name.replace('-', "_"))), source)?;
    Ok(package_path)
  }

  pub fn write_file(&self, path: &str, content: &str) -> Result<()> {
    std::fs::write(self.path.join(path), content)?;
    Ok(())
  }

  pub fn read_file(&self, path: &str) -> Result<String> {
    Ok(std::fs::read_to_string(self.path.join(path))?)
  }

  pub fn file_exists(&self, path: &str) -> bool {
    self.path.join(path).exists()
  }
}

/// Run the wharf CLI, failing the test on a non-zero exit
pub fn run_wharf(cwd: &Path, args: &[&str]) -> Result<Output> {
  let output = run_wharf_unchecked(cwd, args)?;

  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);
    anyhow::bail!(
      "wharf command failed: wharf {}\nstdout: {}\nstderr: {}",
      args.join(" "),
      stdout,
      stderr
    );
  }

  Ok(output)
}

/// Run the wharf CLI and hand back the output regardless of exit status
pub fn run_wharf_unchecked(cwd: &Path, args: &[&str]) -> Result<Output> {
  let wharf_bin = env!("CARGO_BIN_EXE_wharf");

  Command::new(wharf_bin)
    .current_dir(cwd)
    .args(args)
    .output()
    .context("Failed to run wharf")
}

pub fn stdout(output: &Output) -> String {
  String::from_utf8_lossy(&output.stdout).to_string()
}

pub fn stderr(output: &Output) -> String {
  String::from_utf8_lossy(&output.stderr).to_string()
}
