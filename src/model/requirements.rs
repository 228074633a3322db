//! Typed dependency declarations and their installer-argument rendering
//!
//! Registry requirements ("requests >=2.28,<3") and vendored requirements
//! (local path or VCS location) live in one ordered `RequirementsList`.
//! Order is significant: vendored inter-dependencies must be installed
//! before third-party requirements that could shadow them, which is why the
//! resolver prepends siblings instead of appending them.

use crate::core::error::ParseError;
use crate::model::version::VersionSelector;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// A registry requirement: name, optional selector, optional extras
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requirement {
  pub name: String,
  pub selector: Option<VersionSelector>,
  pub extras: BTreeSet<String>,
}

impl Requirement {
  pub fn new(name: impl Into<String>, selector: Option<VersionSelector>) -> Self {
    Self {
      name: name.into(),
      selector,
      extras: BTreeSet::new(),
    }
  }

  /// Parse "name", "name ^1.0", "name[extra1,extra2] >=1.0,<2.0"
  pub fn parse(input: &str) -> Result<Self, ParseError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
      return Err(ParseError::new("requirement", input, "empty string"));
    }

    let (head, rest) = match trimmed.find(char::is_whitespace) {
      Some(idx) => (&trimmed[..idx], trimmed[idx..].trim()),
      None => (trimmed, ""),
    };

    let (name, extras) = if let Some(open) = head.find('[') {
      let close = head
        .rfind(']')
        .ok_or_else(|| ParseError::new("requirement", input, "unterminated extras list"))?;
      if close < open {
        return Err(ParseError::new("requirement", input, "malformed extras list"));
      }
      let extras: BTreeSet<String> = head[open + 1..close]
        .split(',')
        .map(|e| e.trim().to_string())
        .filter(|e| !e.is_empty())
        .collect();
      (head[..open].to_string(), extras)
    } else {
      (head.to_string(), BTreeSet::new())
    };

    if name.is_empty() {
      return Err(ParseError::new("requirement", input, "missing package name"));
    }

    let selector = if rest.is_empty() {
      None
    } else {
      Some(VersionSelector::parse(rest)?)
    };

    Ok(Self { name, selector, extras })
  }

  /// Render the single pip token for this requirement
  pub fn to_pip_arg(&self) -> String {
    let mut out = self.name.clone();
    if !self.extras.is_empty() {
      let extras: Vec<&str> = self.extras.iter().map(String::as_str).collect();
      out.push('[');
      out.push_str(&extras.join(","));
      out.push(']');
    }
    if let Some(selector) = &self.selector {
      if !selector.is_any() {
        // pip dislikes embedded whitespace in a single token
        out.push_str(&selector.to_string().replace(' ', ""));
      }
    }
    out
  }
}

impl fmt::Display for Requirement {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.name)?;
    if !self.extras.is_empty() {
      let extras: Vec<&str> = self.extras.iter().map(String::as_str).collect();
      write!(f, "[{}]", extras.join(","))?;
    }
    if let Some(selector) = &self.selector {
      write!(f, " {}", selector)?;
    }
    Ok(())
  }
}

impl FromStr for Requirement {
  type Err = ParseError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Requirement::parse(s)
  }
}

/// Where a vendored requirement comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VendoredKind {
  /// A local filesystem path
  Path,
  /// A VCS location installed via pip's git+ support
  Git,
}

/// A dependency resolved from a local path or VCS location, not a registry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VendoredRequirement {
  pub kind: VendoredKind,
  pub location: String,
}

impl VendoredRequirement {
  pub fn path(location: impl Into<String>) -> Self {
    Self {
      kind: VendoredKind::Path,
      location: location.into(),
    }
  }

  pub fn git(location: impl Into<String>) -> Self {
    Self {
      kind: VendoredKind::Git,
      location: location.into(),
    }
  }

  /// Render pip tokens, rooting relative paths at `directory`
  pub fn to_pip_args(&self, directory: &Path, develop: bool) -> Vec<String> {
    match self.kind {
      VendoredKind::Path => {
        let location = Path::new(&self.location);
        let resolved = if location.is_absolute() {
          location.to_path_buf()
        } else {
          directory.join(location)
        };
        let token = resolved.to_string_lossy().to_string();
        if develop {
          vec!["-e".to_string(), token]
        } else {
          vec![token]
        }
      }
      VendoredKind::Git => vec![format!("git+{}", self.location)],
    }
  }
}

impl fmt::Display for VendoredRequirement {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self.kind {
      VendoredKind::Path => write!(f, "{}", self.location),
      VendoredKind::Git => write!(f, "git+{}", self.location),
    }
  }
}

/// One entry of a requirements list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequirementEntry {
  Registry(Requirement),
  Vendored(VendoredRequirement),
}

impl RequirementEntry {
  /// Parse a config string into the right entry kind
  ///
  /// "git+<url>" is a Git vendored requirement; "./x", "../x" and absolute
  /// paths are Path vendored requirements; everything else is a registry
  /// requirement.
  pub fn parse(input: &str) -> Result<Self, ParseError> {
    let trimmed = input.trim();
    if let Some(url) = trimmed.strip_prefix("git+") {
      if url.is_empty() {
        return Err(ParseError::new("requirement", input, "empty git location"));
      }
      return Ok(RequirementEntry::Vendored(VendoredRequirement::git(url)));
    }
    if trimmed.starts_with("./") || trimmed.starts_with("../") || trimmed.starts_with('/') {
      return Ok(RequirementEntry::Vendored(VendoredRequirement::path(trimmed)));
    }
    Ok(RequirementEntry::Registry(Requirement::parse(trimmed)?))
  }

  fn is_vendored(&self) -> bool {
    matches!(self, RequirementEntry::Vendored(_))
  }
}

impl fmt::Display for RequirementEntry {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      RequirementEntry::Registry(r) => write!(f, "{}", r),
      RequirementEntry::Vendored(v) => write!(f, "{}", v),
    }
  }
}

impl Serialize for RequirementEntry {
  fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&self.to_string())
  }
}

impl<'de> Deserialize<'de> for RequirementEntry {
  fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    let s = String::deserialize(deserializer)?;
    RequirementEntry::parse(&s).map_err(serde::de::Error::custom)
  }
}

/// An ordered sequence of requirement entries
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequirementsList(Vec<RequirementEntry>);

impl RequirementsList {
  pub fn new() -> Self {
    Self(Vec::new())
  }

  pub fn append(&mut self, entry: RequirementEntry) {
    self.0.push(entry);
  }

  /// Insert at the front; used to give inter-dependencies priority
  pub fn prepend(&mut self, entry: RequirementEntry) {
    self.0.insert(0, entry);
  }

  pub fn extend(&mut self, other: impl IntoIterator<Item = RequirementEntry>) {
    self.0.extend(other);
  }

  pub fn iter(&self) -> impl Iterator<Item = &RequirementEntry> {
    self.0.iter()
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  /// Registry entries only, order preserved
  pub fn registry_reqs(&self) -> impl Iterator<Item = &Requirement> {
    self.0.iter().filter_map(|e| match e {
      RequirementEntry::Registry(r) => Some(r),
      RequirementEntry::Vendored(_) => None,
    })
  }

  /// Vendored entries only, order preserved
  pub fn vendored_reqs(&self) -> RequirementsList {
    Self(self.0.iter().filter(|e| e.is_vendored()).cloned().collect())
  }

  /// Render the flat sequence of pip install tokens (pure, no I/O)
  pub fn to_pip_args(&self, directory: &Path, develop: bool) -> Vec<String> {
    let mut args = Vec::new();
    for entry in &self.0 {
      match entry {
        RequirementEntry::Registry(r) => args.push(r.to_pip_arg()),
        RequirementEntry::Vendored(v) => args.extend(v.to_pip_args(directory, develop)),
      }
    }
    args
  }
}

impl IntoIterator for RequirementsList {
  type Item = RequirementEntry;
  type IntoIter = std::vec::IntoIter<RequirementEntry>;

  fn into_iter(self) -> Self::IntoIter {
    self.0.into_iter()
  }
}

impl FromIterator<RequirementEntry> for RequirementsList {
  fn from_iter<T: IntoIterator<Item = RequirementEntry>>(iter: T) -> Self {
    Self(iter.into_iter().collect())
  }
}
