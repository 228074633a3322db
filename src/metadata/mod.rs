//! Static extraction of metadata embedded in Python source
//!
//! Recovers the `__author__` / `__version__` a package actually ships by
//! parsing its entry file, without ever importing or executing the module.
//! Executing arbitrary top-level code as a side effect of a packaging tool
//! is off the table; only literal right-hand sides are evaluated, anything
//! else yields the `NON_LITERAL` sentinel.

use crate::core::error::{MetadataError, WharfResult, ResultExt};
use regex::Regex;
use std::cell::OnceCell;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Sentinel for assignments whose right-hand side is not a literal
pub const NON_LITERAL: &str = "<non-literal expression>";

/// Module members we care about, parsed once per snapshot
#[derive(Debug, Clone, Default)]
struct Members {
  author: Option<String>,
  version: Option<String>,
}

/// Lazily computed, cached view over a package's Python source tree
///
/// Not persisted; recomputed every run. The snapshot is immutable: entry
/// file and members are memoized on first access.
#[derive(Debug)]
pub struct PythonPackageMetadata {
  source_directory: PathBuf,
  modulename: String,
  entry_file: OnceCell<PathBuf>,
  members: OnceCell<Members>,
}

impl PythonPackageMetadata {
  pub fn new(source_directory: PathBuf, modulename: impl Into<String>) -> Self {
    Self {
      source_directory,
      modulename: modulename.into(),
      entry_file: OnceCell::new(),
      members: OnceCell::new(),
    }
  }

  pub fn source_directory(&self) -> &Path {
    &self.source_directory
  }

  pub fn modulename(&self) -> &str {
    &self.modulename
  }

  /// The file expected to declare the module's author/version
  ///
  /// Search order: `{module}.py`, `{module}/__version__.py`,
  /// `{module}/__init__.py`; first existing match wins. Dotted module names
  /// become nested directories.
  pub fn entry_file(&self) -> WharfResult<&Path> {
    if let Some(found) = self.entry_file.get() {
      return Ok(found);
    }

    let parts: Vec<&str> = self.modulename.split('.').collect();
    let (last, prefix) = parts.split_last().expect("modulename is never empty");
    let mut base = self.source_directory.clone();
    for part in prefix {
      base.push(part);
    }

    let candidates = [
      base.join(format!("{}.py", last)),
      base.join(last).join("__version__.py"),
      base.join(last).join("__init__.py"),
    ];

    for candidate in candidates {
      if candidate.is_file() {
        return Ok(self.entry_file.get_or_init(|| candidate));
      }
    }

    Err(
      MetadataError::EntryFileNotFound {
        modulename: self.modulename.clone(),
        source_directory: self.source_directory.clone(),
      }
      .into(),
    )
  }

  /// The `__author__` embedded in source, if declared
  pub fn author(&self) -> WharfResult<Option<String>> {
    Ok(self.load_members()?.author.clone())
  }

  /// The `__version__` embedded in source, if declared
  pub fn version(&self) -> WharfResult<Option<String>> {
    Ok(self.load_members()?.version.clone())
  }

  fn load_members(&self) -> WharfResult<&Members> {
    if let Some(members) = self.members.get() {
      return Ok(members);
    }

    let entry_file = self.entry_file()?.to_path_buf();
    let source =
      fs::read_to_string(&entry_file).with_context(|| format!("Failed to read {}", entry_file.display()))?;
    let members = parse_members(&source);
    Ok(self.members.get_or_init(|| members))
  }
}

/// Extract top-level `__author__` / `__version__` assignments
///
/// Only assignments starting at column zero count; indented ones live inside
/// a function or class and are not module metadata.
fn parse_members(source: &str) -> Members {
  static ASSIGNMENT: OnceLock<Regex> = OnceLock::new();
  let assignment = ASSIGNMENT
    .get_or_init(|| Regex::new(r"(?m)^(__author__|__version__)\s*=\s*(.+?)\s*$").expect("valid regex"));

  let mut members = Members::default();
  for captures in assignment.captures_iter(source) {
    let value = literal_eval(&captures[2]).unwrap_or_else(|| NON_LITERAL.to_string());
    match &captures[1] {
      "__author__" => members.author = Some(value),
      "__version__" => members.version = Some(value),
      _ => unreachable!(),
    }
  }
  members
}

/// Evaluate a string or numeric literal; None for anything else
fn literal_eval(expr: &str) -> Option<String> {
  let expr = strip_trailing_comment(expr).trim();

  if let Some(stripped) = string_literal(expr) {
    return Some(stripped);
  }

  // Plain ints and floats. Names that happen to parse as floats (inf, nan)
  // are identifiers in Python, not literals.
  let body = expr.strip_prefix(['+', '-']).unwrap_or(expr);
  if !body.is_empty()
    && body.chars().all(|c| c.is_ascii_digit() || c == '.')
    && expr.parse::<f64>().is_ok()
  {
    return Some(expr.to_string());
  }

  None
}

/// Drop a trailing `#` comment, ignoring `#` inside string quotes
fn strip_trailing_comment(expr: &str) -> &str {
  let mut quote: Option<char> = None;
  for (i, c) in expr.char_indices() {
    match quote {
      Some(q) if c == q => quote = None,
      Some(_) => {}
      None => match c {
        '\'' | '"' => quote = Some(c),
        '#' => return &expr[..i],
        _ => {}
      },
    }
  }
  expr
}

/// Unquote a single Python string literal, handling prefixes and triple quotes
fn string_literal(expr: &str) -> Option<String> {
  let body = expr
    .strip_prefix(['r', 'u', 'R', 'U', 'b', 'B'])
    .unwrap_or(expr);

  for quote in ["\"\"\"", "'''", "\"", "'"] {
    if let Some(inner) = body.strip_prefix(quote) {
      if let Some(value) = inner.strip_suffix(quote) {
        // A quote character inside means concatenation or an f-string
        // expression sneaked in; treat as non-literal.
        if value.contains(quote) {
          return None;
        }
        return Some(value.to_string());
      }
      return None;
    }
  }
  None
}
