//! Project discovery and loading
//!
//! A run operates on a `Project`: either a standalone package, or a monorepo
//! with its child packages, discovered once at startup and treated as an
//! immutable snapshot for the rest of the run.

use crate::core::error::{ConfigError, WharfResult};
use crate::model::monorepo::MonorepoModel;
use crate::model::package::PackageModel;
use crate::resolver;
use std::fs;
use std::path::{Path, PathBuf};

pub const PACKAGE_FILE: &str = "package.toml";
pub const MONOREPO_FILE: &str = "monorepo.toml";

/// A loaded project: monorepo (optional) plus its packages
///
/// The monorepo owns the package list; the "current" package is the one the
/// working directory pointed at, tracked as an index rather than a reference
/// so there is no cycle between monorepo and package.
#[derive(Debug)]
pub struct Project {
  pub monorepo: Option<MonorepoModel>,
  pub packages: Vec<PackageModel>,
  current: Option<usize>,
}

impl Project {
  /// Load the project enclosing `start_dir`
  ///
  /// Walks upward until a package.toml or monorepo.toml is found. A package
  /// directly under a monorepo root pulls in the whole monorepo; duplicate
  /// package names are fatal here, before any resolution starts.
  pub fn load(start_dir: &Path) -> WharfResult<Self> {
    let mut dir = start_dir.to_path_buf();
    loop {
      let package_file = dir.join(PACKAGE_FILE);
      let monorepo_file = dir.join(MONOREPO_FILE);

      if package_file.is_file() {
        return Self::load_around_package(&package_file);
      }
      if monorepo_file.is_file() {
        let monorepo = MonorepoModel::load(&monorepo_file)?;
        let packages = discover_packages(monorepo.directory())?;
        resolver::package_index(&packages)?;
        return Ok(Self {
          monorepo: Some(monorepo),
          packages,
          current: None,
        });
      }

      if !dir.pop() {
        return Err(
          ConfigError::NotFound {
            search_root: start_dir.to_path_buf(),
          }
          .into(),
        );
      }
    }
  }

  fn load_around_package(package_file: &Path) -> WharfResult<Self> {
    let package = PackageModel::load(package_file)?;
    let package_dir = package.directory().to_path_buf();

    // A package one level below a monorepo root belongs to that monorepo.
    let monorepo_file = package_dir
      .parent()
      .map(|parent| parent.join(MONOREPO_FILE))
      .filter(|f| f.is_file());

    match monorepo_file {
      Some(monorepo_file) => {
        let monorepo = MonorepoModel::load(&monorepo_file)?;
        let packages = discover_packages(monorepo.directory())?;
        resolver::package_index(&packages)?;
        let current = packages.iter().position(|p| p.directory() == package_dir);
        Ok(Self {
          monorepo: Some(monorepo),
          packages,
          current,
        })
      }
      None => Ok(Self {
        monorepo: None,
        packages: vec![package],
        current: Some(0),
      }),
    }
  }

  /// The package the working directory pointed at, if any
  pub fn current_package(&self) -> Option<&PackageModel> {
    self.current.and_then(|i| self.packages.get(i))
  }

  /// Packages a command should operate on: the current one, or all of them
  pub fn target_packages(&self) -> Vec<&PackageModel> {
    match self.current_package() {
      Some(package) => vec![package],
      None => self.packages.iter().collect(),
    }
  }

  /// The current package, required
  pub fn require_current_package(&self) -> WharfResult<&PackageModel> {
    self.current_package().ok_or_else(|| {
      crate::core::error::WharfError::with_help(
        "This command operates on a single package",
        "Run it from a package directory (one containing package.toml).",
      )
    })
  }

  pub fn is_monorepo(&self) -> bool {
    self.monorepo.is_some()
  }
}

/// Discover packages directly under a monorepo root, in sorted order
///
/// Sorted traversal keeps discovery deterministic across filesystems.
fn discover_packages(root: &Path) -> WharfResult<Vec<PackageModel>> {
  let mut dirs: Vec<PathBuf> = fs::read_dir(root)?
    .filter_map(|entry| entry.ok())
    .map(|entry| entry.path())
    .filter(|path| path.is_dir() && path.join(PACKAGE_FILE).is_file())
    .collect();
  dirs.sort();

  let mut packages = Vec::with_capacity(dirs.len());
  for dir in dirs {
    packages.push(PackageModel::load(&dir.join(PACKAGE_FILE))?);
  }
  Ok(packages)
}
