//! Consistency and metadata checks
//!
//! Checks compare the declarative model against reality (source-embedded
//! metadata, recommended fields) and report findings without fixing
//! anything: the declared and the embedded metadata are independent sources
//! of truth, and wharf never silently corrects one from the other.
//!
//! All checks implement the `Check` trait; the runner walks every package
//! and keeps going past per-package failures so one broken package cannot
//! block monorepo-wide reporting.

mod consistency;
mod metadata_fields;
mod mono_version;

pub use consistency::ConsistencyCheck;
pub use metadata_fields::MetadataFieldsCheck;
pub use mono_version::MonoVersionCheck;

use crate::model::monorepo::MonorepoModel;
use crate::model::package::PackageModel;
use serde::Serialize;
use std::fmt;

/// Severity of a finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
  /// Non-fatal finding that should be addressed
  Warning,
  /// The check itself could not run for this package
  Error,
}

impl fmt::Display for Severity {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Severity::Warning => write!(f, "WARN"),
      Severity::Error => write!(f, "ERROR"),
    }
  }
}

/// A single finding reported by a check
#[derive(Debug, Clone, Serialize)]
pub struct CheckResult {
  /// Name of the check that produced this finding
  pub check_name: String,
  /// Package the finding is about
  pub package: String,
  pub severity: Severity,
  pub message: String,
}

impl CheckResult {
  pub fn warning(check_name: &str, package: &str, message: impl Into<String>) -> Self {
    Self {
      check_name: check_name.to_string(),
      package: package.to_string(),
      severity: Severity::Warning,
      message: message.into(),
    }
  }

  pub fn error(check_name: &str, package: &str, message: impl Into<String>) -> Self {
    Self {
      check_name: check_name.to_string(),
      package: package.to_string(),
      severity: Severity::Error,
      message: message.into(),
    }
  }
}

/// Context handed to checks
pub struct CheckContext<'a> {
  pub package: &'a PackageModel,
  pub monorepo: Option<&'a MonorepoModel>,
}

/// A package-level check
///
/// Checks are pure observers: no filesystem writes, no mutation of the
/// model. A check that cannot run (missing entry file) reports an
/// error-severity finding for that package instead of aborting the run.
pub trait Check {
  /// Unique name (kebab-case); also the key for `[linter] disable`
  fn name(&self) -> &str;

  /// Run the check and return findings (empty = all good)
  fn run(&self, ctx: &CheckContext<'_>) -> Vec<CheckResult>;
}

/// The built-in check set, in reporting order
pub fn default_checks() -> Vec<Box<dyn Check>> {
  vec![
    Box::new(MetadataFieldsCheck),
    Box::new(ConsistencyCheck),
    Box::new(MonoVersionCheck),
  ]
}

/// Run every check over every target package
///
/// Honors each package's `[linter] disable` list. Per-package failures are
/// findings, not errors; the walk always completes.
pub fn run_checks(packages: &[&PackageModel], monorepo: Option<&MonorepoModel>) -> Vec<CheckResult> {
  let checks = default_checks();
  let mut results = Vec::new();

  for package in packages {
    let ctx = CheckContext { package, monorepo };
    for check in &checks {
      if package.linter.is_disabled(check.name()) {
        continue;
      }
      results.extend(check.run(&ctx));
    }
  }

  results
}
