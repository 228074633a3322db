//! Namespace shim renderer
//!
//! A dotted modulename like `acme.billing` needs its ancestor packages
//! (`acme`) to exist as pkgutil-style namespace packages so several sibling
//! packages can share the `acme.` prefix. This renderer generates exactly
//! those shim `__init__.py` files; the leaf module itself is real source
//! code and never generated.

use crate::render::{FileToRender, RenderContext, Renderer};

pub struct NamespaceRenderer;

const SHIM: &str = "\
# This file was automatically generated by wharf. Manual changes will be\n\
# overwritten on the next update; edit package.toml instead.\n\
\n\
__path__ = __import__('pkgutil').extend_path(__path__, __name__)\n";

impl Renderer for NamespaceRenderer {
  fn name(&self) -> &'static str {
    "namespace"
  }

  fn render(&self, ctx: &RenderContext<'_>) -> Vec<FileToRender> {
    let package = ctx.package;
    let modulename = package.data.modulename();
    let parts: Vec<&str> = modulename.split('.').collect();
    if parts.len() < 2 {
      return Vec::new();
    }

    let source = package.directory().join(&package.data.source_directory);
    let mut files = Vec::new();
    let mut dir = source;
    for part in &parts[..parts.len() - 1] {
      dir = dir.join(part);
      files.push(FileToRender {
        package: Some(package.name().to_string()),
        path: dir.join("__init__.py"),
        content: SHIM.to_string(),
      });
    }
    files
  }
}
