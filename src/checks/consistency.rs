//! Declared vs. source-embedded metadata comparison

use crate::checks::{Check, CheckContext, CheckResult};

/// Compares PackageData.author/version against `__author__`/`__version__`
pub struct ConsistencyCheck;

const NAME: &str = "consistency";

impl Check for ConsistencyCheck {
  fn name(&self) -> &str {
    NAME
  }

  fn run(&self, ctx: &CheckContext<'_>) -> Vec<CheckResult> {
    let package = ctx.package;
    let metadata = package.metadata();
    let mut results = Vec::new();

    // A missing entry file sinks this check for this package only.
    if let Err(err) = metadata.entry_file() {
      return vec![CheckResult::error(NAME, package.name(), err.to_string())];
    }

    match metadata.author() {
      Ok(embedded) => {
        if let Some(declared) = &package.data.author {
          let declared = declared.to_string();
          match embedded {
            Some(embedded) if embedded != declared => {
              results.push(CheckResult::warning(
                NAME,
                package.name(),
                format!("inconsistent package author ('{}' != '{}')", embedded, declared),
              ));
            }
            Some(_) => {}
            None => {
              results.push(CheckResult::warning(
                NAME,
                package.name(),
                format!("source declares no __author__ (package.toml says '{}')", declared),
              ));
            }
          }
        }
      }
      Err(err) => results.push(CheckResult::error(NAME, package.name(), err.to_string())),
    }

    match metadata.version() {
      Ok(embedded) => {
        if let Some(declared) = &package.data.version {
          let declared = declared.to_string();
          match embedded {
            Some(embedded) if embedded != declared => {
              results.push(CheckResult::warning(
                NAME,
                package.name(),
                format!("inconsistent package version ('{}' != '{}')", embedded, declared),
              ));
            }
            Some(_) => {}
            None => {
              results.push(CheckResult::warning(
                NAME,
                package.name(),
                format!("source declares no __version__ (package.toml says '{}')", declared),
              ));
            }
          }
        }
      }
      Err(err) => results.push(CheckResult::error(NAME, package.name(), err.to_string())),
    }

    results
  }
}
