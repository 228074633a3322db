//! Single-version monorepo drift

use crate::checks::{Check, CheckContext, CheckResult};

/// In a `single-version` monorepo, every package must carry the monorepo version
pub struct MonoVersionCheck;

const NAME: &str = "mono-version";

impl Check for MonoVersionCheck {
  fn name(&self) -> &str {
    NAME
  }

  fn run(&self, ctx: &CheckContext<'_>) -> Vec<CheckResult> {
    let Some(monorepo) = ctx.monorepo else {
      return Vec::new();
    };
    if !monorepo.data.single_version {
      return Vec::new();
    }
    let Some(mono_version) = &monorepo.data.version else {
      return Vec::new();
    };

    match &ctx.package.data.version {
      Some(version) if version != mono_version => vec![CheckResult::warning(
        NAME,
        ctx.package.name(),
        format!(
          "version {} diverges from the single monorepo version {}",
          version, mono_version
        ),
      )],
      _ => Vec::new(),
    }
  }
}
