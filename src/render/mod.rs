//! File generation and update engine
//!
//! Renderers are pure: they turn a model into `FileToRender` descriptors
//! without touching disk, so a dry run can enumerate everything an `update`
//! would do with zero side effects. Writing is a separate, explicit step
//! with conflict protection for hand-edited files.
//!
//! Renderers are looked up through an explicit name registry instead of any
//! dynamic symbol resolution; adding a renderer means adding it to
//! `default_renderers` / `renderer`.

mod namespace;
mod setup;

pub use namespace::NamespaceRenderer;
pub use setup::SetupRenderer;

use crate::core::error::{WharfResult, ResultExt};
use crate::model::monorepo::MonorepoModel;
use crate::model::package::PackageModel;
use serde::Serialize;
use std::fmt;
use std::fs;
use std::path::PathBuf;

/// Everything a renderer may draw on
pub struct RenderContext<'a> {
  pub package: &'a PackageModel,
  pub monorepo: Option<&'a MonorepoModel>,
}

/// A file that should exist, not yet written
///
/// Target paths always derive from the owning package's own directory, so
/// two packages can never be assigned overlapping targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileToRender {
  /// Owning package name, if any
  pub package: Option<String>,
  /// Absolute target path
  pub path: PathBuf,
  /// Rendered content
  pub content: String,
}

/// A renderer produces the files a model implies should exist
pub trait Renderer {
  /// Registry name
  fn name(&self) -> &'static str;

  /// Enumerate files for one package (pure, no I/O on the target side)
  fn render(&self, ctx: &RenderContext<'_>) -> Vec<FileToRender>;
}

/// Look a renderer up by registry name
pub fn renderer(name: &str) -> Option<Box<dyn Renderer>> {
  match name {
    "setup" => Some(Box::new(SetupRenderer)),
    "namespace" => Some(Box::new(NamespaceRenderer)),
    _ => None,
  }
}

/// The renderers `update` applies, in output order
pub fn default_renderers() -> Vec<Box<dyn Renderer>> {
  vec![Box::new(SetupRenderer), Box::new(NamespaceRenderer)]
}

/// Enumerate every generated file for one package
pub fn render_package(package: &PackageModel, monorepo: Option<&MonorepoModel>) -> Vec<FileToRender> {
  let ctx = RenderContext { package, monorepo };
  default_renderers()
    .iter()
    .flat_map(|r| r.render(&ctx))
    .collect()
}

/// What happened (or, in dry mode, would happen) to one target file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WriteOutcome {
  /// Target did not exist and was written
  Created,
  /// Target existed with different content and was replaced (force)
  Updated,
  /// Target already had exactly the rendered content
  Unchanged,
  /// Target exists with different content and force is off; skipped
  Conflict,
}

impl fmt::Display for WriteOutcome {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      WriteOutcome::Created => write!(f, "created"),
      WriteOutcome::Updated => write!(f, "updated"),
      WriteOutcome::Unchanged => write!(f, "unchanged"),
      WriteOutcome::Conflict => write!(f, "conflict"),
    }
  }
}

/// Commit one rendered file to disk
///
/// `dry` computes the outcome without writing anything. An existing target
/// with different content is never overwritten unless `force` is set; the
/// conflict is reported and the caller moves on to the next file. Parent
/// directories are created as needed. Writing the same rendered content
/// twice is byte-stable.
pub fn write_file(file: &FileToRender, force: bool, dry: bool) -> WharfResult<WriteOutcome> {
  // Compare bytes, not strings: a hand-edited target that is not valid
  // UTF-8 is still a conflict, not an I/O failure.
  let existing = match fs::read(&file.path) {
    Ok(bytes) => Some(bytes),
    Err(err) if err.kind() == std::io::ErrorKind::NotFound => None,
    Err(err) => {
      return Err(err).with_context(|| format!("Failed to read {}", file.path.display()));
    }
  };

  let outcome = match &existing {
    Some(bytes) if bytes.as_slice() == file.content.as_bytes() => WriteOutcome::Unchanged,
    Some(_) if !force => WriteOutcome::Conflict,
    Some(_) => WriteOutcome::Updated,
    None => WriteOutcome::Created,
  };

  if dry || matches!(outcome, WriteOutcome::Unchanged | WriteOutcome::Conflict) {
    return Ok(outcome);
  }

  if let Some(parent) = file.path.parent() {
    fs::create_dir_all(parent).with_context(|| format!("Failed to create {}", parent.display()))?;
  }
  fs::write(&file.path, &file.content).with_context(|| format!("Failed to write {}", file.path.display()))?;
  Ok(outcome)
}
