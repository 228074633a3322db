//! Package model: the declarative, file-backed configuration of one package
//!
//! A `PackageModel` is loaded from a `package.toml` and owns the
//! `PackageData` plus install/linter/release sub-configurations. The model
//! is the *declared* source of truth; the metadata embedded in the package's
//! Python source is an independent one (see `metadata`), and the two are
//! only ever compared, never silently reconciled.

use crate::core::error::{WharfResult, ResultExt};
use crate::metadata::PythonPackageMetadata;
use crate::model::author::Author;
use crate::model::requirements::RequirementsList;
use crate::model::version::Version;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Declarative package data (the `[package]` table of package.toml)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PackageData {
  pub name: String,

  /// Python module name; defaults to the package name with `-` → `_`
  #[serde(default)]
  pub modulename: Option<String>,

  #[serde(default)]
  pub version: Option<Version>,

  #[serde(default)]
  pub author: Option<Author>,

  #[serde(default)]
  pub description: Option<String>,

  #[serde(default)]
  pub license: Option<String>,

  #[serde(default)]
  pub url: Option<String>,

  /// Explicit README path, relative to the package directory
  #[serde(default)]
  pub readme: Option<String>,

  /// Ship a py.typed marker
  #[serde(default)]
  pub typed: bool,

  #[serde(default)]
  pub requirements: RequirementsList,

  /// Explicit dependencies on sibling packages of the containing monorepo
  ///
  /// Unlike `requirements`, a name listed here that is not a monorepo
  /// package is a configuration error, not a registry requirement.
  #[serde(rename = "inter-dependencies", default)]
  pub inter_dependencies: RequirementsList,

  #[serde(rename = "test-requirements", default)]
  pub test_requirements: RequirementsList,

  #[serde(rename = "extra-requirements", default)]
  pub extra_requirements: BTreeMap<String, RequirementsList>,

  #[serde(rename = "source-directory", default = "default_source_directory")]
  pub source_directory: String,

  /// Path globs excluded from packaging
  #[serde(default = "default_exclude")]
  pub exclude: Vec<String>,

  /// Entry points: group → "name = module:function" specs
  #[serde(default)]
  pub entrypoints: BTreeMap<String, Vec<String>>,

  #[serde(default)]
  pub classifiers: Vec<String>,

  #[serde(default)]
  pub keywords: Vec<String>,
}

fn default_source_directory() -> String {
  "src".to_string()
}

fn default_exclude() -> Vec<String> {
  vec!["test".to_string(), "tests".to_string(), "docs".to_string()]
}

impl PackageData {
  /// The Python module name, derived from the package name when unset
  pub fn modulename(&self) -> String {
    self
      .modulename
      .clone()
      .unwrap_or_else(|| self.name.replace('-', "_"))
  }
}

/// Shell hooks around install/develop operations
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InstallHooks {
  #[serde(rename = "before-install", default)]
  pub before_install: Vec<String>,

  #[serde(rename = "after-install", default)]
  pub after_install: Vec<String>,

  #[serde(rename = "before-develop", default)]
  pub before_develop: Vec<String>,

  #[serde(rename = "after-develop", default)]
  pub after_develop: Vec<String>,
}

impl InstallHooks {
  /// Hooks to run before an install, depending on develop mode
  pub fn before(&self, develop: bool) -> &[String] {
    if develop { &self.before_develop } else { &self.before_install }
  }

  /// Hooks to run after an install, depending on develop mode
  pub fn after(&self, develop: bool) -> &[String] {
    if develop { &self.after_develop } else { &self.after_install }
  }
}

/// The `[install]` table
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InstallConfiguration {
  #[serde(default)]
  pub hooks: InstallHooks,
}

/// The `[linter]` table
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LinterConfiguration {
  /// Check names to skip for this package
  #[serde(default)]
  pub disable: Vec<String>,
}

impl LinterConfiguration {
  pub fn is_disabled(&self, check_name: &str) -> bool {
    self.disable.iter().any(|d| d == check_name)
  }
}

/// The `[release]` table
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReleaseConfiguration {
  /// Tag format; `{name}` and `{version}` are substituted
  #[serde(rename = "tag-format", default = "default_tag_format")]
  pub tag_format: String,
}

fn default_tag_format() -> String {
  "{name}@{version}".to_string()
}

impl Default for ReleaseConfiguration {
  fn default() -> Self {
    Self {
      tag_format: default_tag_format(),
    }
  }
}

impl ReleaseConfiguration {
  /// Render the release tag for a package name and version
  pub fn tag(&self, name: &str, version: &Version) -> String {
    self
      .tag_format
      .replace("{name}", name)
      .replace("{version}", &version.to_string())
  }
}

/// On-disk shape of package.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct PackageDocument {
  package: PackageData,
  #[serde(default)]
  install: InstallConfiguration,
  #[serde(default)]
  linter: LinterConfiguration,
  #[serde(default)]
  release: ReleaseConfiguration,
}

/// A package configuration bound to its location on disk
#[derive(Debug, Clone)]
pub struct PackageModel {
  /// Absolute path of the package.toml; its parent is the package root
  pub filename: PathBuf,
  pub data: PackageData,
  pub install: InstallConfiguration,
  pub linter: LinterConfiguration,
  pub release: ReleaseConfiguration,
}

impl PackageModel {
  /// Load a package model from its package.toml
  pub fn load(filename: &Path) -> WharfResult<Self> {
    let content =
      fs::read_to_string(filename).with_context(|| format!("Failed to read {}", filename.display()))?;
    let doc: PackageDocument = toml_edit::de::from_str(&content)
      .with_context(|| format!("Failed to parse {}", filename.display()))?;

    Ok(Self {
      filename: filename.to_path_buf(),
      data: doc.package,
      install: doc.install,
      linter: doc.linter,
      release: doc.release,
    })
  }

  pub fn name(&self) -> &str {
    &self.data.name
  }

  /// The package root directory
  pub fn directory(&self) -> &Path {
    self.filename.parent().unwrap_or_else(|| Path::new("."))
  }

  /// Source metadata snapshot for this package (recomputed per run)
  pub fn metadata(&self) -> PythonPackageMetadata {
    PythonPackageMetadata::new(self.directory().join(&self.data.source_directory), self.data.modulename())
  }

  /// Absolute path to the README, explicit setting first
  pub fn readme_file(&self) -> Option<PathBuf> {
    if let Some(readme) = &self.data.readme {
      return Some(self.directory().join(readme));
    }
    find_file_by_priority(
      self.directory(),
      &["README.md", "README.rst", "README.txt", "README"],
      "README.*",
    )
  }

  /// Absolute path to the LICENSE file
  pub fn license_file(&self) -> Option<PathBuf> {
    find_file_by_priority(
      self.directory(),
      &["LICENSE", "LICENSE.txt", "LICENSE.rst", "LICENSE.md"],
      "LICENSE.*",
    )
  }
}

/// Find a file in `directory` by an explicit priority list, falling back to
/// the lexicographically smallest match of `pattern`
///
/// Preferred names are checked first, independent of physical listing order.
fn find_file_by_priority(directory: &Path, preferred: &[&str], pattern: &str) -> Option<PathBuf> {
  for name in preferred {
    let candidate = directory.join(name);
    if candidate.is_file() {
      return Some(candidate);
    }
  }

  let pattern = glob::Pattern::new(pattern).ok()?;
  let mut matches: Vec<PathBuf> = fs::read_dir(directory)
    .ok()?
    .filter_map(|entry| entry.ok())
    .filter(|entry| entry.path().is_file())
    .filter(|entry| pattern.matches(&entry.file_name().to_string_lossy()))
    .map(|entry| entry.path())
    .collect();
  matches.sort();
  matches.into_iter().next()
}
