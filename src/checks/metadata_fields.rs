//! Recommended metadata field presence

use crate::checks::{Check, CheckContext, CheckResult};

/// Warns about missing author/license/url regardless of source comparison
pub struct MetadataFieldsCheck;

const NAME: &str = "metadata-fields";

impl Check for MetadataFieldsCheck {
  fn name(&self) -> &str {
    NAME
  }

  fn run(&self, ctx: &CheckContext<'_>) -> Vec<CheckResult> {
    let data = &ctx.package.data;
    let mut results = Vec::new();

    if data.author.is_none() {
      results.push(CheckResult::warning(NAME, ctx.package.name(), "missing $.package.author"));
    }
    if data.license.is_none() {
      results.push(CheckResult::warning(NAME, ctx.package.name(), "missing $.package.license"));
    }
    if data.url.is_none() {
      results.push(CheckResult::warning(NAME, ctx.package.name(), "missing $.package.url"));
    }

    results
  }
}
