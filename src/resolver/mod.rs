//! Inter-dependency resolution inside a monorepo
//!
//! Decides, for a target package, which sibling packages it depends on and
//! whether their declared versions satisfy the requested selector. This is
//! deliberately not a general resolver: only direct, declared sibling
//! dependencies are considered, with no backtracking.

use crate::core::error::{ConfigError, WharfResult};
use crate::model::package::PackageModel;
use crate::model::requirements::{RequirementEntry, RequirementsList, VendoredRequirement};
use std::collections::BTreeMap;

/// Outcome of resolving one package against its monorepo
#[derive(Debug)]
pub struct Resolution {
  /// Path-vendored sibling requirements, in declaration order
  pub siblings: Vec<VendoredRequirement>,
  /// Names of the matched sibling packages, parallel to `siblings`
  pub sibling_names: Vec<String>,
  /// Non-fatal findings (selector mismatches)
  pub warnings: Vec<String>,
}

impl Resolution {
  /// Prepend the resolved siblings onto a requirement list
  ///
  /// Siblings go to the front so they install before third-party
  /// requirements that might otherwise shadow them; prepending in reverse
  /// keeps their declaration order intact.
  pub fn prepend_onto(&self, reqs: &mut RequirementsList) {
    for vendored in self.siblings.iter().rev() {
      reqs.prepend(RequirementEntry::Vendored(vendored.clone()));
    }
  }
}

/// Build a name → package index, failing on duplicate names
///
/// Duplicate package names are a configuration error of the monorepo graph
/// and abort resolution before it starts.
pub fn package_index<'a>(packages: &'a [PackageModel]) -> WharfResult<BTreeMap<&'a str, &'a PackageModel>> {
  let mut index: BTreeMap<&str, &PackageModel> = BTreeMap::new();
  for package in packages {
    if let Some(existing) = index.insert(package.name(), package) {
      return Err(
        ConfigError::DuplicateName {
          name: package.name().to_string(),
          first: existing.filename.clone(),
          second: package.filename.clone(),
        }
        .into(),
      );
    }
  }
  Ok(index)
}

/// Resolve the sibling dependencies of `package` within the monorepo
///
/// Two channels feed resolution: the explicit `inter-dependencies` list,
/// where a name absent from the index is an `UnknownSibling` configuration
/// error, and plain `requirements` whose name happens to match a monorepo
/// package, which pass through untouched when they do not. Siblings whose
/// declared version satisfies the selector become Path-vendored
/// requirements; the rest are excluded with a warning naming both versions.
/// Deterministic over unchanged input.
pub fn resolve_inter_dependencies(packages: &[PackageModel], package: &PackageModel) -> WharfResult<Resolution> {
  let index = package_index(packages)?;

  let mut resolution = Resolution {
    siblings: Vec::new(),
    sibling_names: Vec::new(),
    warnings: Vec::new(),
  };

  for requirement in package.data.inter_dependencies.registry_reqs() {
    if requirement.name == package.name() {
      continue;
    }
    let Some(sibling) = index.get(requirement.name.as_str()) else {
      return Err(
        ConfigError::UnknownSibling {
          package: package.name().to_string(),
          reference: requirement.name.clone(),
        }
        .into(),
      );
    };
    resolve_one(package, sibling, requirement.selector.as_ref(), &mut resolution);
  }

  for requirement in package.data.requirements.registry_reqs() {
    // Self-references are ignored.
    if requirement.name == package.name() {
      continue;
    }

    let Some(sibling) = index.get(requirement.name.as_str()) else {
      continue;
    };

    // Already resolved through the explicit channel.
    if resolution.sibling_names.iter().any(|n| n == sibling.name()) {
      continue;
    }

    resolve_one(package, sibling, requirement.selector.as_ref(), &mut resolution);
  }

  Ok(resolution)
}

fn resolve_one(
  package: &PackageModel,
  sibling: &PackageModel,
  selector: Option<&crate::model::version::VersionSelector>,
  resolution: &mut Resolution,
) {
  let Some(declared) = &sibling.data.version else {
    resolution.warnings.push(format!(
      "skipping inter-dependency of '{}' on '{}': the sibling declares no version",
      package.name(),
      sibling.name()
    ));
    return;
  };

  let matches = match selector {
    Some(selector) => selector.matches(declared),
    None => true,
  };

  if matches {
    resolution
      .siblings
      .push(VendoredRequirement::path(sibling.directory().to_string_lossy()));
    resolution.sibling_names.push(sibling.name().to_string());
  } else {
    let selector = selector.map(|s| s.to_string()).unwrap_or_else(|| "*".to_string());
    resolution.warnings.push(format!(
      "skipping inter-dependency of '{}' on '{}': the version selector {} does not match the present version {}",
      package.name(),
      sibling.name(),
      selector,
      declared
    ));
  }
}

/// Look up a package by name, as a configuration error when absent
pub fn find_package<'a>(packages: &'a [PackageModel], name: &str) -> WharfResult<&'a PackageModel> {
  packages
    .iter()
    .find(|p| p.name() == name)
    .ok_or_else(|| ConfigError::PackageNotFound { name: name.to_string() }.into())
}
