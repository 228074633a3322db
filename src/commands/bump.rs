//! Bump command implementation
//!
//! Advances the declared version in package.toml (losslessly, preserving
//! formatting and comments) and rewrites the `__version__` line in the
//! package's entry file so the two sources of truth move together.

use crate::core::error::{ConfigError, ResultExt, WharfError, WharfResult};
use crate::core::project::Project;
use crate::metadata::NON_LITERAL;
use crate::model::version::Version;
use regex::Regex;
use std::fs;
use std::sync::OnceLock;
use toml_edit::DocumentMut;

/// Run the bump command
pub fn run_bump(major: bool, minor: bool, version: Option<String>, dry: bool) -> WharfResult<()> {
  let project = Project::load(&std::env::current_dir()?)?;
  let package = project.require_current_package()?;

  let current = package.data.version.clone().ok_or(ConfigError::MissingField {
    field: "package.version".to_string(),
  })?;

  let next = match version {
    Some(v) => Version::parse(&v)?,
    None if major => current.bump_major(),
    None if minor => current.bump_minor(),
    None => current.bump_patch(),
  };

  if next.compare(&current) != std::cmp::Ordering::Greater {
    eprintln!("warning: new version {} does not advance the current version {}", next, current);
  }

  // An embedded __version__ that is not a plain literal cannot be rewritten
  // mechanically; refuse rather than corrupt the source.
  let metadata = package.metadata();
  let entry_file = metadata.entry_file().ok().map(|p| p.to_path_buf());
  let embedded = match &entry_file {
    Some(_) => metadata.version()?,
    None => None,
  };
  if embedded.as_deref() == Some(NON_LITERAL) {
    return Err(WharfError::with_help(
      format!(
        "The __version__ of '{}' is not a string literal and cannot be rewritten",
        package.name()
      ),
      "Assign a plain string literal to __version__ so wharf can manage it.",
    ));
  }

  if dry {
    println!("🔍 {}: {} -> {} (dry run)", package.name(), current, next);
    return Ok(());
  }

  let content = fs::read_to_string(&package.filename)
    .with_context(|| format!("Failed to read {}", package.filename.display()))?;
  let mut doc: DocumentMut = content.parse()?;
  match doc
    .get_mut("package")
    .and_then(|p| p.get_mut("version"))
    .and_then(|i| i.as_value_mut())
  {
    // Swap the value but keep its decor so an inline comment survives.
    Some(value) => {
      let decor = value.decor().clone();
      *value = toml_edit::Value::from(next.to_string());
      *value.decor_mut() = decor;
    }
    None => {
      doc["package"]["version"] = toml_edit::value(next.to_string());
    }
  }
  fs::write(&package.filename, doc.to_string())
    .with_context(|| format!("Failed to write {}", package.filename.display()))?;

  if let (Some(entry_file), Some(_)) = (&entry_file, &embedded) {
    let source =
      fs::read_to_string(entry_file).with_context(|| format!("Failed to read {}", entry_file.display()))?;
    let rewritten = version_line()
      .replace(&source, format!("__version__ = '{}'", next).as_str())
      .into_owned();
    fs::write(entry_file, rewritten).with_context(|| format!("Failed to write {}", entry_file.display()))?;
  }

  println!("📦 {}: {} -> {}", package.name(), current, next);
  println!("   tag: {}", package.release.tag(package.name(), &next));
  Ok(())
}

fn version_line() -> &'static Regex {
  static VERSION_LINE: OnceLock<Regex> = OnceLock::new();
  VERSION_LINE.get_or_init(|| Regex::new(r"(?m)^__version__\s*=.*$").expect("valid regex"))
}
