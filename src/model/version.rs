//! Package versions and version selectors
//!
//! `Version` is a thin wrapper over `semver::Version` that accepts shortened
//! forms ("1", "1.2") by padding missing trailing components with zero.
//! `VersionSelector` wraps `semver::VersionReq` and keeps the source
//! expression verbatim so diagnostics can quote what the user wrote.

use crate::core::error::ParseError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// An immutable semantic version
///
/// Total order: components compared left to right, pre-release versions sort
/// strictly below the corresponding release ("1.0.0-rc.1" < "1.0.0").
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version(semver::Version);

impl Version {
  /// Parse a version string, padding missing trailing components to zero
  ///
  /// "1.2" parses as 1.2.0 and "1" as 1.0.0. Pre-release and build metadata
  /// are only accepted on the full three-component form.
  pub fn parse(input: &str) -> Result<Self, ParseError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
      return Err(ParseError::new("version", input, "empty string"));
    }

    let padded = pad_components(trimmed).ok_or_else(|| ParseError::new("version", input, "malformed component"))?;

    semver::Version::parse(&padded)
      .map(Version)
      .map_err(|e| ParseError::new("version", input, e.to_string()))
  }

  /// Three-way comparison, kept for callers that want an explicit ordering
  pub fn compare(&self, other: &Version) -> Ordering {
    self.0.cmp(&other.0)
  }

  /// Whether this is a pre-release version
  pub fn is_prerelease(&self) -> bool {
    !self.0.pre.is_empty()
  }

  pub fn major(&self) -> u64 {
    self.0.major
  }

  pub fn minor(&self) -> u64 {
    self.0.minor
  }

  pub fn patch(&self) -> u64 {
    self.0.patch
  }

  /// Next major version (resets minor and patch)
  pub fn bump_major(&self) -> Version {
    Version(semver::Version::new(self.0.major + 1, 0, 0))
  }

  /// Next minor version (resets patch)
  pub fn bump_minor(&self) -> Version {
    Version(semver::Version::new(self.0.major, self.0.minor + 1, 0))
  }

  /// Next patch version
  pub fn bump_patch(&self) -> Version {
    Version(semver::Version::new(self.0.major, self.0.minor, self.0.patch + 1))
  }

  pub(crate) fn as_semver(&self) -> &semver::Version {
    &self.0
  }
}

/// Pad "1" / "1.2" to "1.0.0" / "1.2.0"; pass full forms through unchanged.
///
/// Returns None when a numeric component that needs padding is not a plain
/// integer; full forms are left for the semver parser to validate.
fn pad_components(input: &str) -> Option<String> {
  // Anything carrying pre-release or build metadata must already be in
  // three-component form.
  if input.contains('-') || input.contains('+') {
    return Some(input.to_string());
  }

  let parts: Vec<&str> = input.split('.').collect();
  match parts.len() {
    1 | 2 => {
      if parts.iter().all(|p| !p.is_empty() && p.chars().all(|c| c.is_ascii_digit())) {
        let mut padded: Vec<String> = parts.iter().map(|p| p.to_string()).collect();
        while padded.len() < 3 {
          padded.push("0".to_string());
        }
        Some(padded.join("."))
      } else {
        None
      }
    }
    _ => Some(input.to_string()),
  }
}

impl fmt::Display for Version {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

impl FromStr for Version {
  type Err = ParseError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Version::parse(s)
  }
}

impl Serialize for Version {
  fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&self.to_string())
  }
}

impl<'de> Deserialize<'de> for Version {
  fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    let s = String::deserialize(deserializer)?;
    Version::parse(&s).map_err(serde::de::Error::custom)
  }
}

/// An immutable predicate over versions
///
/// One or more comparator clauses (`==`, `>=`, `<`, caret/tilde ranges)
/// combined by logical AND. `*` and the empty selector match every version.
#[derive(Debug, Clone)]
pub struct VersionSelector {
  req: semver::VersionReq,
  /// Source expression, verbatim, for display and equality
  expr: String,
}

impl VersionSelector {
  /// Parse a selector expression
  pub fn parse(expr: &str) -> Result<Self, ParseError> {
    let trimmed = expr.trim();
    if trimmed.is_empty() || trimmed == "*" {
      return Ok(Self {
        req: semver::VersionReq::STAR,
        expr: "*".to_string(),
      });
    }

    // semver spells equality as a bare version or "=v"; accept "==" too
    // since requirement files commonly use it.
    let normalized = trimmed.replace("==", "=");

    let req =
      semver::VersionReq::parse(&normalized).map_err(|e| ParseError::new("version selector", expr, e.to_string()))?;

    Ok(Self {
      req,
      expr: trimmed.to_string(),
    })
  }

  /// A selector that matches every version
  pub fn any() -> Self {
    Self {
      req: semver::VersionReq::STAR,
      expr: "*".to_string(),
    }
  }

  /// Test whether a version satisfies this selector (pure)
  pub fn matches(&self, version: &Version) -> bool {
    self.req.matches(version.as_semver())
  }

  /// Whether this selector matches everything
  pub fn is_any(&self) -> bool {
    self.expr == "*"
  }
}

impl fmt::Display for VersionSelector {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.expr)
  }
}

impl PartialEq for VersionSelector {
  fn eq(&self, other: &Self) -> bool {
    self.expr == other.expr
  }
}

impl Eq for VersionSelector {}

impl FromStr for VersionSelector {
  type Err = ParseError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    VersionSelector::parse(s)
  }
}

impl Serialize for VersionSelector {
  fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&self.expr)
  }
}

impl<'de> Deserialize<'de> for VersionSelector {
  fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    let s = String::deserialize(deserializer)?;
    VersionSelector::parse(&s).map_err(serde::de::Error::custom)
  }
}
