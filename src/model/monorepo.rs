//! Monorepo model: the root configuration of a multi-package source tree
//!
//! The monorepo *contains* its packages; packages look their siblings up by
//! name through the loaded `Project`, never by holding a reference back to
//! the monorepo.

use crate::core::error::{WharfResult, ResultExt};
use crate::model::author::Author;
use crate::model::package::ReleaseConfiguration;
use crate::model::version::Version;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// The `[monorepo]` table of monorepo.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MonorepoData {
  pub name: String,

  #[serde(default)]
  pub version: Option<Version>,

  #[serde(default)]
  pub author: Option<Author>,

  #[serde(default)]
  pub license: Option<String>,

  #[serde(default)]
  pub url: Option<String>,

  /// All packages carry the monorepo version when set
  #[serde(rename = "single-version", default)]
  pub single_version: bool,
}

/// On-disk shape of monorepo.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct MonorepoDocument {
  monorepo: MonorepoData,
  #[serde(default)]
  release: ReleaseConfiguration,
}

/// A monorepo configuration bound to its location on disk
#[derive(Debug, Clone)]
pub struct MonorepoModel {
  /// Absolute path of the monorepo.toml; its parent is the monorepo root
  pub filename: PathBuf,
  pub data: MonorepoData,
  pub release: ReleaseConfiguration,
}

impl MonorepoModel {
  /// Load a monorepo model from its monorepo.toml
  pub fn load(filename: &Path) -> WharfResult<Self> {
    let content =
      fs::read_to_string(filename).with_context(|| format!("Failed to read {}", filename.display()))?;
    let doc: MonorepoDocument = toml_edit::de::from_str(&content)
      .with_context(|| format!("Failed to parse {}", filename.display()))?;

    Ok(Self {
      filename: filename.to_path_buf(),
      data: doc.monorepo,
      release: doc.release,
    })
  }

  pub fn name(&self) -> &str {
    &self.data.name
  }

  /// The monorepo root directory
  pub fn directory(&self) -> &Path {
    self.filename.parent().unwrap_or_else(|| Path::new("."))
  }
}
